//! Serde types for candidate plans (as returned by the generator) and for
//! the finalized planner output.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::MuscleGroup;
use crate::volume::TargetRange;

// ---------------------------------------------------------------------------
// Candidate plan (generator output)
// ---------------------------------------------------------------------------

/// A plan proposed by the generator. Produced fresh on every attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlan {
    pub workout_days: Vec<WorkoutDay>,
}

/// One distinct training day, repeated `frequency_per_week` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    #[serde(default = "default_day_name")]
    pub day_name: String,
    #[serde(default = "default_frequency", deserialize_with = "whole_number")]
    pub frequency_per_week: u32,
    #[serde(default)]
    pub exercises: Vec<PlannedExercise>,
}

/// A single exercise entry within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub exercise_name: String,
    #[serde(default, deserialize_with = "whole_number")]
    pub sets: u32,
    /// Percentage of one-rep max. Fractional values are rounded.
    #[serde(default = "default_intensity", deserialize_with = "rounded_number")]
    pub intensity: u32,
}

fn default_day_name() -> String {
    "Workout Day".to_string()
}

fn default_frequency() -> u32 {
    1
}

fn default_intensity() -> u32 {
    60
}

/// Accept `3` or `3.0`, reject `3.5`.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 {
        return Err(D::Error::custom(format!(
            "expected a whole number, got {value}"
        )));
    }
    to_u32::<D::Error>(value)
}

fn rounded_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    to_u32::<D::Error>(value.round())
}

fn to_u32<E: serde::de::Error>(value: f64) -> Result<u32, E> {
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(E::custom(format!(
            "expected a non-negative number no larger than {}, got {value}",
            u32::MAX
        )));
    }
    Ok(value as u32)
}

impl CandidatePlan {
    /// Sum of `frequency_per_week` across all days.
    pub fn total_frequency(&self) -> u32 {
        self.workout_days
            .iter()
            .map(|d| d.frequency_per_week)
            .fold(0u32, u32::saturating_add)
    }
}

// ---------------------------------------------------------------------------
// Planner output
// ---------------------------------------------------------------------------

/// Finalized plan returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerOutput {
    pub estimated_optimal_sets: f64,
    pub target_volume_range: TargetRange,
    pub workout_days: Vec<FinalWorkoutDay>,
    pub weekly_volume_summary: Vec<WeeklyVolume>,
}

/// A sanitized training day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalWorkoutDay {
    pub day_name: String,
    pub frequency_per_week: u32,
    pub exercises: Vec<FinalExercise>,
}

/// A retained exercise with the catalog's activation map attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalExercise {
    pub exercise_name: String,
    pub sets: u32,
    pub intensity: u32,
    pub muscle_activation: BTreeMap<MuscleGroup, f64>,
}

/// Realized weekly sets for one muscle group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeeklyVolume {
    pub muscle_group: MuscleGroup,
    pub weekly_sets: f64,
}
