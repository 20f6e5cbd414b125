//! Plan sanitizer: turns an accepted candidate into the finalized output,
//! dropping exercises the catalog does not know.

use crate::catalog::Catalog;
use crate::volume::{TargetRange, tally_plan};

use super::types::{CandidatePlan, FinalExercise, FinalWorkoutDay, PlannerOutput, WorkoutDay};

/// Remove exercises whose names are not catalog keys.
///
/// Days are kept even if all their exercises are dropped. Retained
/// exercises keep their `sets` and `intensity` unchanged.
pub fn retain_known_exercises(plan: &CandidatePlan, catalog: &Catalog) -> CandidatePlan {
    let mut sanitized = plan.clone();
    for day in &mut sanitized.workout_days {
        let WorkoutDay {
            day_name,
            exercises,
            ..
        } = day;
        exercises.retain(|exercise| {
            let known = catalog.contains(&exercise.exercise_name);
            if !known {
                tracing::warn!(
                    exercise = %exercise.exercise_name,
                    day = %day_name,
                    "dropping exercise not found in catalog"
                );
            }
            known
        });
    }
    sanitized
}

/// Build the caller-facing output from an accepted plan.
///
/// The weekly volume summary is recomputed from the sanitized plan and the
/// target range is rounded for output.
pub fn finalize_plan(
    plan: &CandidatePlan,
    catalog: &Catalog,
    optimal_sets: f64,
    target: TargetRange,
) -> PlannerOutput {
    let sanitized = retain_known_exercises(plan, catalog);
    let summary = tally_plan(&sanitized, catalog).summary();

    let workout_days = sanitized
        .workout_days
        .into_iter()
        .map(|day| FinalWorkoutDay {
            day_name: day.day_name,
            frequency_per_week: day.frequency_per_week,
            exercises: day
                .exercises
                .into_iter()
                .filter_map(|exercise| {
                    let definition = catalog.get(&exercise.exercise_name)?;
                    Some(FinalExercise {
                        muscle_activation: definition.activation.clone(),
                        exercise_name: exercise.exercise_name,
                        sets: exercise.sets,
                        intensity: exercise.intensity,
                    })
                })
                .collect(),
        })
        .collect();

    PlannerOutput {
        estimated_optimal_sets: optimal_sets,
        target_volume_range: target.rounded(),
        workout_days,
        weekly_volume_summary: summary,
    }
}
