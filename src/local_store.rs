use std::marker::PhantomData;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use crate::db::Database;

pub const WORKOUT_SETS_KEY: &str = "workout-sets";
pub const CHAT_MESSAGES_KEY: &str = "chatMessages";

/// A collection persisted as one JSON array under a fixed key.
///
/// Every save writes the whole collection; there are no partial updates.
/// A key that was never written loads as an empty collection.
pub struct LocalStore<T> {
    db: Database,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for LocalStore<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T> LocalStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(db: Database, key: &'static str) -> Self {
        Self {
            db,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub async fn load(&self) -> Result<Vec<T>> {
        let Some(raw) = self.db.get_value(self.key).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw)
            .with_context(|| format!("stored snapshot under '{}' is not valid", self.key))
    }

    pub async fn save(&self, items: &[T]) -> Result<()> {
        let serialized = serde_json::to_string(items)
            .with_context(|| format!("failed to serialize snapshot for '{}'", self.key))?;
        self.db.set_value(self.key, serialized).await
    }

    pub async fn clear(&self) -> Result<()> {
        self.db.remove_value(self.key).await.map(|_| ())
    }
}

/// Makes every snapshot write on `db` fail, leaving reads untouched.
#[cfg(test)]
pub(crate) async fn reject_snapshot_writes(db: &Database) {
    db.execute(|conn| {
        conn.execute_batch(
            "CREATE TRIGGER reject_kv_insert BEFORE INSERT ON kv_entries
             BEGIN SELECT RAISE(ABORT, 'snapshot writes disabled'); END;
             CREATE TRIGGER reject_kv_update BEFORE UPDATE ON kv_entries
             BEGIN SELECT RAISE(ABORT, 'snapshot writes disabled'); END;",
        )?;
        Ok(())
    })
    .await
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, WorkoutSet};
    use chrono::Utc;

    fn temp_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("store.sqlite3")).unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn first_load_is_empty() {
        let (_dir, db) = temp_db();
        let store: LocalStore<WorkoutSet> = LocalStore::new(db, WORKOUT_SETS_KEY);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn snapshot_round_trips_by_value() {
        let (_dir, db) = temp_db();
        let store: LocalStore<WorkoutSet> = LocalStore::new(db, WORKOUT_SETS_KEY);

        let mut heavy = WorkoutSet::new_at(Utc::now());
        heavy.exercise = Exercise::PesoMuerto;
        heavy.series = 3;
        heavy.actual_reps = 4;
        heavy.actual_weight = 142.5;
        heavy.notes = Some("Buena sesión".into());
        let sets = vec![heavy, WorkoutSet::new_at(Utc::now())];

        store.save(&sets).await.unwrap();
        assert_eq!(store.load().await.unwrap(), sets);
    }

    #[tokio::test]
    async fn malformed_snapshot_fails_to_load() {
        let (_dir, db) = temp_db();
        db.set_value(WORKOUT_SETS_KEY, "{not json".into())
            .await
            .unwrap();
        let store: LocalStore<WorkoutSet> = LocalStore::new(db, WORKOUT_SETS_KEY);

        let err = store.load().await.unwrap_err();
        assert!(err.to_string().contains(WORKOUT_SETS_KEY));
    }

    #[tokio::test]
    async fn clear_forgets_the_snapshot() {
        let (_dir, db) = temp_db();
        let store: LocalStore<WorkoutSet> = LocalStore::new(db, WORKOUT_SETS_KEY);
        store.save(&[WorkoutSet::new_at(Utc::now())]).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_save_keeps_the_previous_snapshot() {
        let (_dir, db) = temp_db();
        let store: LocalStore<WorkoutSet> = LocalStore::new(db.clone(), WORKOUT_SETS_KEY);
        let first = vec![WorkoutSet::new_at(Utc::now())];
        store.save(&first).await.unwrap();

        reject_snapshot_writes(&db).await;
        let err = store.save(&[]).await.unwrap_err();
        assert!(format!("{err:#}").contains("snapshot writes disabled"));
        assert_eq!(store.load().await.unwrap(), first);
    }
}
