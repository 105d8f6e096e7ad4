use std::time::Duration;

use rand::Rng;

use crate::settings::CoachSettings;

/// Scripted encouragement the coach answers with.
pub const CANNED_REPLIES: [&str; 10] = [
    "¡Excelente! Recuerda mantener la espalda recta 🏋️",
    "¡Vamos campeón! Cada repetición te hace más fuerte 💪",
    "Perfecto. Controla la bajada y explota en la subida 🚀",
    "¡Así se hace! La técnica es más importante que el peso 🎯",
    "¡Increíble progreso! Sigue así campeona 👑",
    "Recuerda respirar: inhala al bajar, exhala al subir 🫁",
    "¡Fantástico! Tu fuerza está mejorando día a día 📈",
    "Mantén el core activado en cada repetición 🔥",
    "¡Brutal! Esa es la actitud que necesitas ⚡",
    "Escucha a tu cuerpo, pero no te rindas 🧠💪",
];

pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CANNED_REPLIES[rng.gen_range(0..CANNED_REPLIES.len())]
}

/// Half-open range `[min, max)` the coach waits before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    pub min: Duration,
    pub max: Duration,
}

impl ReplyDelay {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if max_ms > min_ms {
            Duration::from_millis(rng.gen_range(min_ms..max_ms))
        } else {
            self.min
        }
    }
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self::from(&CoachSettings::default())
    }
}

impl From<&CoachSettings> for ReplyDelay {
    fn from(settings: &CoachSettings) -> Self {
        Self {
            min: Duration::from_millis(settings.reply_delay_min_ms),
            max: Duration::from_millis(settings.reply_delay_max_ms),
        }
    }
}
