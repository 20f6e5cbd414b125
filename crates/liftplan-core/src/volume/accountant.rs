//! Plan volume accountant: realized weekly sets per muscle group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{Catalog, MuscleGroup};
use crate::plan::types::{CandidatePlan, WeeklyVolume};

use super::target::round1;

/// Realized weekly sets for every muscle group. Always holds all twelve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VolumeReport {
    sets: BTreeMap<MuscleGroup, f64>,
}

impl Default for VolumeReport {
    fn default() -> Self {
        Self {
            sets: MuscleGroup::ALL.into_iter().map(|m| (m, 0.0)).collect(),
        }
    }
}

impl VolumeReport {
    /// Build a report from explicit values; muscles not listed are zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (MuscleGroup, f64)>) -> Self {
        let mut report = Self::default();
        for (muscle, sets) in pairs {
            report.sets.insert(muscle, sets);
        }
        report
    }

    pub fn get(&self, muscle: MuscleGroup) -> f64 {
        self.sets.get(&muscle).copied().unwrap_or(0.0)
    }

    /// Iterate muscles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, f64)> + '_ {
        self.sets.iter().map(|(m, s)| (*m, *s))
    }

    fn add(&mut self, muscle: MuscleGroup, sets: f64) {
        *self.sets.entry(muscle).or_insert(0.0) += sets;
    }

    /// Rounded per-muscle summary in canonical order.
    pub fn summary(&self) -> Vec<WeeklyVolume> {
        self.iter()
            .map(|(muscle_group, sets)| WeeklyVolume {
                muscle_group,
                weekly_sets: round1(sets),
            })
            .collect()
    }
}

/// Tally the weekly volume a plan delivers to each muscle group.
///
/// Each catalog exercise credits `sets * coefficient * frequency_per_week`
/// to every muscle it activates. Exercises missing from the catalog
/// contribute nothing.
pub fn tally_plan(plan: &CandidatePlan, catalog: &Catalog) -> VolumeReport {
    let mut report = VolumeReport::default();

    for day in &plan.workout_days {
        let frequency = f64::from(day.frequency_per_week);
        for exercise in &day.exercises {
            let Some(definition) = catalog.get(&exercise.exercise_name) else {
                continue;
            };
            let sets = f64::from(exercise.sets);
            for (muscle, coefficient) in &definition.activation {
                report.add(*muscle, sets * coefficient * frequency);
            }
        }
    }

    report
}
