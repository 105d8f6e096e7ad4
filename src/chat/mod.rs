pub mod commands;
pub mod controller;
pub mod replies;

pub use controller::ChatController;
pub use replies::{pick_reply, ReplyDelay, CANNED_REPLIES};
