use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use uuid::Uuid;

use super::views::{self, DayGroup};
use crate::{
    confirmation::{Decision, DestructiveAction, Pending},
    db::Database,
    local_store::{LocalStore, WORKOUT_SETS_KEY},
    log_info, log_warn,
    models::{SetUpdate, WorkoutSet},
    sample_data::{generate_sample_data, SampleDataConfig},
};

const ENABLE_LOGS: bool = true;

/// The user's workout sets, owned in memory and written through to the
/// `workout-sets` snapshot after every mutation.
///
/// A mutation is applied to a copy first; the in-memory collection only
/// changes once the snapshot write has succeeded.
pub struct WorkoutLog {
    sets: Vec<WorkoutSet>,
    store: LocalStore<WorkoutSet>,
}

impl WorkoutLog {
    pub async fn open(db: Database) -> Result<Self> {
        let store = LocalStore::new(db, WORKOUT_SETS_KEY);
        let sets = store.load().await?;
        log_info!("Loaded {} workout sets", sets.len());
        Ok(Self { sets, store })
    }

    /// Opens the log and, if nothing was ever recorded, fills it with a
    /// generated history.
    pub async fn open_seeded(db: Database, config: &SampleDataConfig) -> Result<Self> {
        let mut log = Self::open(db).await?;
        if log.sets.is_empty() {
            let sample = fresh_sample(config);
            log_info!("Seeding empty workout log with {} sample sets", sample.len());
            log.commit(sample).await?;
        }
        Ok(log)
    }

    pub fn sets(&self) -> &[WorkoutSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, set_id: &str) -> Option<&WorkoutSet> {
        self.sets.iter().find(|set| set.id == set_id)
    }

    pub async fn add(&mut self) -> Result<WorkoutSet> {
        self.add_at(Utc::now()).await
    }

    pub async fn add_at(&mut self, timestamp: DateTime<Utc>) -> Result<WorkoutSet> {
        let mut set = WorkoutSet::new_at(timestamp);
        while self.get(&set.id).is_some() {
            set.id = Uuid::new_v4().to_string();
        }

        let mut next = self.sets.clone();
        next.push(set.clone());
        self.commit(next).await?;
        Ok(set)
    }

    /// Applies `update` to the set with `set_id`. Returns `false` without
    /// writing anything when no such set exists.
    pub async fn update(&mut self, set_id: &str, update: SetUpdate) -> Result<bool> {
        let Some(index) = self.sets.iter().position(|set| set.id == set_id) else {
            log_warn!("No workout set {set_id} to update");
            return Ok(false);
        };

        let mut next = self.sets.clone();
        next[index].apply(update);
        self.commit(next).await?;
        Ok(true)
    }

    pub fn request_delete(&self, set_id: &str) -> Pending {
        Pending::new(DestructiveAction::DeleteSet {
            set_id: set_id.to_string(),
        })
    }

    /// Removes the set named by `pending` when confirmed. Declining, or a set
    /// that no longer exists, leaves the log untouched.
    pub async fn resolve_delete(
        &mut self,
        pending: Pending,
        decision: Decision,
    ) -> Result<Option<WorkoutSet>> {
        let DestructiveAction::DeleteSet { set_id } = pending.into_action() else {
            bail!("pending action is not a set deletion");
        };
        if !decision.is_confirmed() {
            return Ok(None);
        }
        let Some(index) = self.sets.iter().position(|set| set.id == set_id) else {
            return Ok(None);
        };

        let mut next = self.sets.clone();
        let removed = next.remove(index);
        self.commit(next).await?;
        log_info!("Deleted workout set {}", removed.id);
        Ok(Some(removed))
    }

    pub fn request_reset(&self) -> Pending {
        Pending::new(DestructiveAction::ResetSampleData)
    }

    /// Replaces the whole log with a generated history when confirmed. The
    /// snapshot is overwritten in one write, so a failure keeps the old log.
    /// Returns whether the reset happened.
    pub async fn resolve_reset(
        &mut self,
        pending: Pending,
        decision: Decision,
        config: &SampleDataConfig,
    ) -> Result<bool> {
        if pending.into_action() != DestructiveAction::ResetSampleData {
            bail!("pending action is not a sample data reset");
        }
        if !decision.is_confirmed() {
            return Ok(false);
        }

        let sample = fresh_sample(config);
        log_info!("Reset workout log with {} sample sets", sample.len());
        self.commit(sample).await?;
        Ok(true)
    }

    pub fn today_sets(&self) -> Vec<WorkoutSet> {
        self.today_sets_on(Local::now().date_naive())
    }

    pub fn today_sets_on(&self, today: NaiveDate) -> Vec<WorkoutSet> {
        views::today_sets(&self.sets, today)
    }

    pub fn historical_sets(&self) -> Vec<DayGroup> {
        self.historical_sets_on(Local::now().date_naive())
    }

    pub fn historical_sets_on(&self, today: NaiveDate) -> Vec<DayGroup> {
        views::historical_sets(&self.sets, today)
    }

    async fn commit(&mut self, next: Vec<WorkoutSet>) -> Result<()> {
        self.store.save(&next).await?;
        self.sets = next;
        Ok(())
    }
}

fn fresh_sample(config: &SampleDataConfig) -> Vec<WorkoutSet> {
    let mut rng = rand::thread_rng();
    generate_sample_data(&mut rng, Local::now(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{local_store::reject_snapshot_writes, models::Exercise};
    use chrono::Duration;

    async fn temp_log() -> (tempfile::TempDir, Database, WorkoutLog) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("log.sqlite3")).unwrap();
        let log = WorkoutLog::open(db.clone()).await.unwrap();
        (dir, db, log)
    }

    async fn persisted(db: &Database) -> Vec<WorkoutSet> {
        LocalStore::new(db.clone(), WORKOUT_SETS_KEY)
            .load()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn add_update_delete_end_to_end() {
        let (_dir, db, mut log) = temp_log().await;
        assert!(log.is_empty());

        let added = log.add().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(added.series, 1);
        assert_eq!(added.target_reps, 5);
        assert_eq!(added.actual_reps, 0);
        assert_eq!(added.target_weight, 0.0);
        assert_eq!(added.actual_weight, 0.0);

        assert!(log
            .update(&added.id, SetUpdate::ActualWeight(82.5))
            .await
            .unwrap());
        let mut expected = added.clone();
        expected.actual_weight = 82.5;
        assert_eq!(log.get(&added.id), Some(&expected));
        assert_eq!(persisted(&db).await, vec![expected]);

        let pending = log.request_delete(&added.id);
        let removed = log
            .resolve_delete(pending, Decision::Confirm)
            .await
            .unwrap();
        assert_eq!(removed.map(|set| set.id), Some(added.id));
        assert!(log.is_empty());
        assert!(persisted(&db).await.is_empty());
    }

    #[tokio::test]
    async fn added_ids_are_unique() {
        let (_dir, _db, mut log) = temp_log().await;
        for expected_len in 1..=5 {
            let before: Vec<String> = log.sets().iter().map(|s| s.id.clone()).collect();
            let added = log.add().await.unwrap();
            assert_eq!(log.len(), expected_len);
            assert!(!before.contains(&added.id));
        }
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_no_op() {
        let (_dir, db, mut log) = temp_log().await;
        log.add().await.unwrap();
        let snapshot = log.sets().to_vec();

        let changed = log
            .update("missing", SetUpdate::Exercise(Exercise::PesoMuerto))
            .await
            .unwrap();
        assert!(!changed);
        assert_eq!(log.sets(), snapshot.as_slice());
        assert_eq!(persisted(&db).await, snapshot);
    }

    #[tokio::test]
    async fn declined_or_unknown_deletes_change_nothing() {
        let (_dir, _db, mut log) = temp_log().await;
        let kept = log.add().await.unwrap();

        let pending = log.request_delete(&kept.id);
        assert!(log
            .resolve_delete(pending, Decision::Decline)
            .await
            .unwrap()
            .is_none());

        let pending = log.request_delete("missing");
        assert!(log
            .resolve_delete(pending, Decision::Confirm)
            .await
            .unwrap()
            .is_none());

        assert_eq!(log.len(), 1);
        assert_eq!(log.sets()[0].id, kept.id);
    }

    #[tokio::test]
    async fn delete_rejects_a_foreign_pending_action() {
        let (_dir, _db, mut log) = temp_log().await;
        log.add().await.unwrap();
        let pending = log.request_reset();
        assert!(log
            .resolve_delete(pending, Decision::Confirm)
            .await
            .is_err());
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn reopening_restores_the_same_sets() {
        let (_dir, db, mut log) = temp_log().await;
        let first = log.add().await.unwrap();
        log.update(&first.id, SetUpdate::Notes(Some("RPE 8".into())))
            .await
            .unwrap();
        log.add().await.unwrap();

        let reopened = WorkoutLog::open(db).await.unwrap();
        assert_eq!(reopened.sets(), log.sets());
    }

    #[tokio::test]
    async fn views_split_today_from_history() {
        let (_dir, _db, mut log) = temp_log().await;
        let now = Utc::now();
        log.add_at(now).await.unwrap();
        log.add_at(now - Duration::days(3)).await.unwrap();
        log.add_at(now - Duration::days(3) - Duration::minutes(5))
            .await
            .unwrap();

        let today = views::local_date(&now);
        assert_eq!(log.today_sets_on(today).len(), 1);
        let history = log.historical_sets_on(today);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sets.len(), 2);
    }

    #[tokio::test]
    async fn seeding_only_fills_an_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("seed.sqlite3")).unwrap();
        let config = SampleDataConfig {
            training_day_probability: 1.0,
            ..SampleDataConfig::default()
        };

        let seeded = WorkoutLog::open_seeded(db.clone(), &config).await.unwrap();
        assert!(seeded.len() >= 30);
        let count = seeded.len();
        drop(seeded);

        let reopened = WorkoutLog::open_seeded(db, &config).await.unwrap();
        assert_eq!(reopened.len(), count);
    }

    #[tokio::test]
    async fn confirmed_reset_replaces_everything() {
        let (_dir, db, mut log) = temp_log().await;
        let mine = log.add().await.unwrap();
        let config = SampleDataConfig {
            training_day_probability: 1.0,
            ..SampleDataConfig::default()
        };

        let pending = log.request_reset();
        assert!(!log
            .resolve_reset(pending, Decision::Decline, &config)
            .await
            .unwrap());
        assert_eq!(log.len(), 1);

        let pending = log.request_reset();
        assert!(log
            .resolve_reset(pending, Decision::Confirm, &config)
            .await
            .unwrap());
        assert!(log.get(&mine.id).is_none());
        assert!(log.len() >= 30);
        assert_eq!(persisted(&db).await, log.sets());
    }

    #[tokio::test]
    async fn failed_writes_leave_the_log_untouched() {
        let (_dir, db, mut log) = temp_log().await;
        let first = log.add().await.unwrap();
        log.add().await.unwrap();
        let before = log.sets().to_vec();

        reject_snapshot_writes(&db).await;

        assert!(log.add().await.is_err());
        assert_eq!(log.sets(), before.as_slice());

        assert!(log
            .update(&first.id, SetUpdate::ActualReps(7))
            .await
            .is_err());
        assert_eq!(log.sets(), before.as_slice());

        let pending = log.request_delete(&first.id);
        assert!(log
            .resolve_delete(pending, Decision::Confirm)
            .await
            .is_err());
        assert_eq!(log.sets(), before.as_slice());

        assert_eq!(persisted(&db).await, before);
    }

    #[tokio::test]
    async fn failed_reset_keeps_the_existing_history() {
        let (_dir, db, mut log) = temp_log().await;
        log.add().await.unwrap();
        log.add().await.unwrap();
        let before = log.sets().to_vec();

        reject_snapshot_writes(&db).await;

        let pending = log.request_reset();
        assert!(log
            .resolve_reset(pending, Decision::Confirm, &SampleDataConfig::default())
            .await
            .is_err());
        assert_eq!(log.sets(), before.as_slice());
        assert_eq!(persisted(&db).await, before);
    }
}
