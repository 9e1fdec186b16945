use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::errors::{Result, RoutineXError};
use crate::model::{ProgressPoint, RoutineUsage, Workout, WorkoutStats};
use crate::ports::{UserDirectory, WorkoutStore};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Compute statistics for a user's workout history
///
/// # Errors
/// * `UserNotFound` - If the user is unknown
pub fn get_workout_stats(
    users: &dyn UserDirectory,
    workouts: &dyn WorkoutStore,
    user_id: &str,
) -> Result<WorkoutStats> {
    if !users.user_exists(user_id)? {
        return Err(RoutineXError::UserNotFound {
            user_id: user_id.to_string(),
        });
    }

    let history = workouts.find_all_by_user(user_id)?;
    tracing::debug!(user_id, workouts = history.len(), "computing workout stats");
    Ok(compute_workout_stats(history))
}

/// Aggregate a workout history
///
/// Histories of zero or one workout only carry the total; every derived
/// field stays at zero/empty.
pub fn compute_workout_stats(mut history: Vec<Workout>) -> WorkoutStats {
    if history.len() <= 1 {
        return WorkoutStats::totals_only(history.len());
    }

    history.sort_by(|a, b| a.done_at.cmp(&b.done_at));

    WorkoutStats {
        total_workouts: history.len(),
        weekly_frequency: weekly_frequency(&history),
        most_used_routines: most_used_routines(&history),
        progress_over_time: progress_over_time(&history),
    }
}

/// Workouts per week over the span between the first and last workout
///
/// Expects `sorted` ordered by completion time. A span under one day counts
/// as a single week.
fn weekly_frequency(sorted: &[Workout]) -> f64 {
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return 0.0;
    };

    let total = sorted.len() as f64;
    let day_span = (last.done_at - first.done_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if day_span < 1.0 {
        return total;
    }
    total / (day_span / 7.0)
}

/// Count per routine-name snapshot; count descending, then name ascending
fn most_used_routines(history: &[Workout]) -> Vec<RoutineUsage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for workout in history {
        *counts.entry(workout.routine_name.as_str()).or_default() += 1;
    }

    let mut ranking: Vec<RoutineUsage> = counts
        .into_iter()
        .map(|(name, count)| RoutineUsage {
            routine_name: name.to_string(),
            count,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.routine_name.cmp(&b.routine_name))
    });
    ranking
}

/// One point per calendar month (UTC) that has workouts, oldest first
fn progress_over_time(history: &[Workout]) -> Vec<ProgressPoint> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for workout in history {
        *buckets
            .entry((workout.done_at.year(), workout.done_at.month()))
            .or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), count)| ProgressPoint {
            month: format!("{:04}-{:02}", year, month),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::MemoryStore;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn workout(n: usize, routine_name: &str, done_at: DateTime<Utc>) -> Workout {
        Workout::new(
            format!("w{}", n),
            "userX".to_string(),
            "r1".to_string(),
            routine_name.to_string(),
            done_at,
        )
    }

    #[test]
    fn test_three_workouts_two_weeks_apart() {
        let start = at(2024, 3, 1);
        let history = vec![
            workout(0, "R1", start),
            workout(1, "R1", start + Duration::days(7)),
            workout(2, "R1", start + Duration::days(14)),
        ];

        let stats = compute_workout_stats(history);
        assert_eq!(stats.total_workouts, 3);
        assert!((stats.weekly_frequency - 1.5).abs() < 1e-9);
        assert_eq!(
            stats.most_used_routines,
            vec![RoutineUsage {
                routine_name: "R1".to_string(),
                count: 3,
            }]
        );
    }

    #[test]
    fn test_zero_and_one_workout_are_totals_only() {
        assert_eq!(compute_workout_stats(Vec::new()), WorkoutStats::totals_only(0));

        let stats = compute_workout_stats(vec![workout(0, "R1", at(2024, 1, 1))]);
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.weekly_frequency, 0.0);
        assert!(stats.most_used_routines.is_empty());
        assert!(stats.progress_over_time.is_empty());
    }

    #[test]
    fn test_same_day_counts_as_one_week() {
        let start = at(2024, 5, 5);
        let history = vec![
            workout(0, "A", start),
            workout(1, "B", start + Duration::hours(2)),
            workout(2, "A", start + Duration::hours(5)),
        ];
        let stats = compute_workout_stats(history);
        assert_eq!(stats.weekly_frequency, 3.0);
    }

    #[test]
    fn test_ranking_ties_break_alphabetically() {
        let start = at(2024, 1, 1);
        let history = vec![
            workout(0, "push", start),
            workout(1, "pull", start + Duration::days(1)),
            workout(2, "legs", start + Duration::days(2)),
            workout(3, "pull", start + Duration::days(3)),
            workout(4, "push", start + Duration::days(4)),
        ];
        let names: Vec<(String, usize)> = compute_workout_stats(history)
            .most_used_routines
            .into_iter()
            .map(|u| (u.routine_name, u.count))
            .collect();
        assert_eq!(
            names,
            vec![
                ("pull".to_string(), 2),
                ("push".to_string(), 2),
                ("legs".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_progress_buckets_are_chronological() {
        let history = vec![
            workout(0, "A", at(2024, 2, 10)),
            workout(1, "A", at(2023, 12, 31)),
            workout(2, "A", at(2024, 2, 1)),
            workout(3, "A", at(2024, 1, 15)),
        ];
        let points = compute_workout_stats(history).progress_over_time;
        assert_eq!(
            points,
            vec![
                ProgressPoint {
                    month: "2023-12".to_string(),
                    count: 1,
                },
                ProgressPoint {
                    month: "2024-01".to_string(),
                    count: 1,
                },
                ProgressPoint {
                    month: "2024-02".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_get_workout_stats_unknown_user() {
        let store = MemoryStore::new();
        let err = get_workout_stats(&store, &store, "ghost").unwrap_err();
        assert!(matches!(err, RoutineXError::UserNotFound { .. }));
    }

    #[test]
    fn test_get_workout_stats_single_workout_is_not_an_error() {
        let store = MemoryStore::new();
        store.register_user("userY").unwrap();
        store
            .insert(&Workout::new(
                "w1".to_string(),
                "userY".to_string(),
                "r1".to_string(),
                "R1".to_string(),
                at(2024, 6, 1),
            ))
            .unwrap();

        let stats = get_workout_stats(&store, &store, "userY").unwrap();
        assert_eq!(stats, WorkoutStats::totals_only(1));
    }

    proptest! {
        #[test]
        fn prop_stats_orderings_hold(
            entries in prop::collection::vec((0usize..4, 0i64..(3 * 365 * 24)), 2..40)
        ) {
            let names = ["alpha", "bravo", "charlie", "delta"];
            let base = at(2022, 1, 1);
            let history: Vec<Workout> = entries
                .iter()
                .enumerate()
                .map(|(i, (n, hours))| workout(i, names[*n], base + Duration::hours(*hours)))
                .collect();
            let total = history.len();

            let stats = compute_workout_stats(history);

            prop_assert_eq!(stats.total_workouts, total);
            prop_assert!(stats.weekly_frequency > 0.0);

            let ranked: usize = stats.most_used_routines.iter().map(|u| u.count).sum();
            prop_assert_eq!(ranked, total);
            for pair in stats.most_used_routines.windows(2) {
                prop_assert!(
                    pair[0].count > pair[1].count
                        || (pair[0].count == pair[1].count
                            && pair[0].routine_name < pair[1].routine_name)
                );
            }

            let bucketed: usize = stats.progress_over_time.iter().map(|p| p.count).sum();
            prop_assert_eq!(bucketed, total);
            for pair in stats.progress_over_time.windows(2) {
                prop_assert!(pair[0].month < pair[1].month);
            }
            prop_assert!(stats.progress_over_time.iter().all(|p| p.count >= 1));
        }
    }
}
