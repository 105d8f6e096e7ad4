pub mod logging;

use log::error;

/// Logs `err` with its full context chain and hands back `notice`, the short
/// message a UI shows to the user.
pub fn user_notice(notice: &'static str) -> impl FnOnce(anyhow::Error) -> String {
    move |err| {
        error!("{notice}: {err:#}");
        notice.to_string()
    }
}
