use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use uuid::Uuid;

use super::SampleDataConfig;
use crate::models::{Exercise, WorkoutSet};

/// Rounds to the nearest 0.5 kg, the plate granularity used everywhere.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    if half_width > 0.0 {
        rng.gen_range(-half_width..half_width)
    } else {
        0.0
    }
}

fn inclusive<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> u32 {
    rng.gen_range(low.min(high)..=high.max(low))
}

/// `day` at `time` on the local clock, stepping past a DST gap if needed.
fn local_timestamp(day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = day.and_time(time);
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

/// Builds a randomized history over the trailing `config.days` days ending at
/// `now`. Each entry is stamped on its day at `now`'s local time of day.
pub fn generate_sample_data<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Local>,
    config: &SampleDataConfig,
) -> Vec<WorkoutSet> {
    let today = now.date_naive();
    let time_of_day = now.time();
    let training_probability = config.training_day_probability.clamp(0.0, 1.0);
    let note_probability = config.note_probability.clamp(0.0, 1.0);

    let mut sets = Vec::new();

    for offset in (0..config.days).rev() {
        if !rng.gen_bool(training_probability) {
            continue;
        }

        let day = today - Duration::days(i64::from(offset));
        let timestamp = local_timestamp(day, time_of_day);
        let days_since_start = f64::from(config.days - offset);
        let entries = inclusive(
            rng,
            config.min_entries_per_day,
            config.max_entries_per_day,
        );

        for _ in 0..entries {
            let exercise = Exercise::ALL[rng.gen_range(0..Exercise::ALL.len())];

            let weight = config.base_weight(exercise)
                + config.progression_per_day * days_since_start
                + jitter(rng, config.target_weight_jitter);
            let actual_weight = weight + jitter(rng, config.actual_weight_jitter);

            let series = inclusive(rng, config.min_series, config.max_series);
            let target_reps = inclusive(rng, config.min_target_reps, config.max_target_reps);
            let actual_reps = (i64::from(target_reps) + rng.gen_range(-1i64..=1)).max(1);

            let notes = rng
                .gen_bool(note_probability)
                .then(|| config.note_text.to_string());

            sets.push(WorkoutSet {
                id: Uuid::new_v4().to_string(),
                exercise,
                series,
                target_reps,
                actual_reps: u32::try_from(actual_reps).unwrap_or(1),
                target_weight: round_to_half(weight).max(0.0),
                actual_weight: round_to_half(actual_weight).max(0.0),
                timestamp,
                notes,
            });
        }
    }

    sets
}
