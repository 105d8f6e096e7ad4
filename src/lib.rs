pub mod chat;
pub mod confirmation;
pub mod db;
pub mod local_store;
pub mod models;
pub mod progress;
pub mod sample_data;
pub mod settings;
pub mod utils;
pub mod videos;
pub mod workout;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chat::{ChatController, ReplyDelay};
use db::Database;
use log::info;
use sample_data::SampleDataConfig;
use settings::{CoachSettings, SettingsStore};
use tokio::sync::Mutex;
use videos::VideoStore;
use workout::WorkoutLog;

const ENABLE_LOGS: bool = true;

pub const DATABASE_FILE: &str = "dianapower.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";

/// Everything the UI layer needs, opened over one data directory.
pub struct AppState {
    pub(crate) db: Database,
    pub(crate) workouts: Mutex<WorkoutLog>,
    pub(crate) chat: ChatController,
    pub(crate) videos: VideoStore,
    pub(crate) settings: SettingsStore,
}

impl AppState {
    /// Opens (or creates) the database and settings under `data_dir` and
    /// loads every stored collection. A corrupt snapshot fails the whole
    /// startup.
    pub async fn initialize(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("failed to create data directory {}", data_dir.display())
        })?;

        let database = Database::new(data_dir.join(DATABASE_FILE))?;
        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;

        let workouts = if settings.seed_sample_data_when_empty() {
            WorkoutLog::open_seeded(database.clone(), &SampleDataConfig::default()).await
        } else {
            WorkoutLog::open(database.clone()).await
        }
        .context("failed to load workout sets")?;

        let chat = ChatController::open(database.clone(), ReplyDelay::from(&settings.coach()))
            .await
            .context("failed to load chat history")?;

        let videos = VideoStore::new(database.clone());

        log_info!(
            "DianaPower ready: {} sets, {} chat messages",
            workouts.len(),
            chat.messages().await.len()
        );

        Ok(Self {
            db: database,
            workouts: Mutex::new(workouts),
            chat,
            videos,
            settings,
        })
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.db.path().parent()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Saves new coach settings and applies them to replies scheduled from
    /// now on.
    pub fn update_coach_settings(&self, coach: CoachSettings) -> Result<()> {
        self.settings.update_coach(coach.clone())?;
        self.chat.set_reply_delay(ReplyDelay::from(&coach));
        Ok(())
    }

    /// Cancels pending coach replies. Call before tearing the UI down.
    pub async fn shutdown(&self) {
        self.chat.shutdown().await;
        info!("DianaPower shut down");
    }
}

/// Initializes logging and opens the app state in the resolved data directory
/// (`$DIANAPOWER_DATA_DIR` or the platform default).
pub async fn start() -> Result<AppState> {
    utils::logging::init();
    info!("DianaPower starting up...");

    let data_dir = settings::resolve_data_dir()?;
    AppState::initialize(data_dir).await
}
