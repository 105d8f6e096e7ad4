use crate::{
    models::{ChatMessage, Sender},
    utils::user_notice,
    AppState,
};

pub async fn get_messages(state: &AppState) -> Result<Vec<ChatMessage>, String> {
    Ok(state.chat.messages().await)
}

/// Sends a message as the user; the coach answers on its own a moment later.
pub async fn send_message(state: &AppState, text: String) -> Result<ChatMessage, String> {
    state
        .chat
        .send(&text, Sender::User)
        .await
        .map_err(user_notice("No se pudo enviar el mensaje"))
}
