use std::{
    env, fs,
    path::PathBuf,
    sync::{PoisonError, RwLock},
};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

/// Overrides the platform data directory when set.
pub const DATA_DIR_ENV: &str = "DIANAPOWER_DATA_DIR";

/// Where the database and settings file live: `$DIANAPOWER_DATA_DIR`, or the
/// platform's per-user data directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "dianapower", "DianaPower")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("could not determine a home directory for app data"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachSettings {
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 1_500,
            reply_delay_max_ms: 4_500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UserSettings {
    coach: CoachSettings,
    seed_sample_data_when_empty: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            coach: CoachSettings::default(),
            seed_sample_data_when_empty: true,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(
                    "Ignoring unreadable settings at {}: {err}",
                    path.display()
                );
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn coach(&self) -> CoachSettings {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .coach
            .clone()
    }

    /// Writes new coach settings. A running chat only picks them up through
    /// `AppState::update_coach_settings`.
    pub fn update_coach(&self, settings: CoachSettings) -> Result<()> {
        self.update(|data| data.coach = settings)
    }

    pub fn seed_sample_data_when_empty(&self) -> bool {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .seed_sample_data_when_empty
    }

    pub fn set_seed_sample_data_when_empty(&self, enabled: bool) -> Result<()> {
        self.update(|data| data.seed_sample_data_when_empty = enabled)
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = data;
        Ok(())
    }

    /// Memory only changes once the file write succeeds.
    fn update(&self, change: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        change(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
