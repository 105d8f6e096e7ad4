//! Two-step gating for destructive actions.
//!
//! Callers first obtain a [`Pending`] describing what will happen, show its
//! prompt to the user, and hand it back together with a [`Decision`]. Nothing
//! is touched until the pending action is resolved with [`Decision::Confirm`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Decision {
    Confirm,
    Decline,
}

impl Decision {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Decision::Confirm)
    }
}

impl From<bool> for Decision {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Decision::Confirm
        } else {
            Decision::Decline
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DestructiveAction {
    DeleteSet { set_id: String },
    ResetSampleData,
    DeleteVideo { video_id: String },
}

impl DestructiveAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            DestructiveAction::DeleteSet { .. } => "¿Estás seguro de eliminar este set?",
            DestructiveAction::ResetSampleData => {
                "¿Reemplazar todo el historial con datos de ejemplo?"
            }
            DestructiveAction::DeleteVideo { .. } => "¿Estás seguro de eliminar este video?",
        }
    }
}

/// A destructive action waiting for the user's answer.
#[must_use = "a pending action does nothing until it is resolved"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pending {
    action: DestructiveAction,
    prompt: String,
}

impl Pending {
    pub fn new(action: DestructiveAction) -> Self {
        let prompt = action.prompt().to_string();
        Self { action, prompt }
    }

    pub fn action(&self) -> &DestructiveAction {
        &self.action
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn into_action(self) -> DestructiveAction {
        self.action
    }
}
