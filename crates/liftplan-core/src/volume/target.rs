//! Volume target calculator: physiological inputs to an optimal weekly set
//! count and a dedication-scaled target band.

use serde::Serialize;

use crate::input::PlannerInput;

/// Target weekly sets per muscle group, inclusive on both ends.
///
/// Bounds are kept at full precision for validation; use
/// [`TargetRange::rounded`] for anything shown to a person or a generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

impl TargetRange {
    /// Both bounds rounded to one decimal.
    pub fn rounded(&self) -> Self {
        Self {
            min: round1(self.min),
            max: round1(self.max),
        }
    }
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Frequencies of three or more days are capped at an effective 2.5; age
/// reduces volume by 12% per decade past 50; female lifters get three extra
/// sets.
fn unrounded_optimal_sets(input: &PlannerInput) -> f64 {
    let frequency = input.training_frequency();
    let effective_frequency = if frequency < 3 {
        f64::from(frequency)
    } else {
        2.5
    };

    let decades_past_50 = f64::from(input.age().saturating_sub(50)) / 10.0;
    let age_factor = 1.0 - decades_past_50 * 0.12;

    (effective_frequency * 5.0)
        * input.recovery_factor()
        * input.energy_balance_factor()
        * f64::from(input.training_status()).sqrt()
        * age_factor
        + f64::from(input.sex()) * 3.0
}

/// Estimated optimal weekly sets per muscle group, rounded to one decimal.
pub fn optimal_sets(input: &PlannerInput) -> f64 {
    round1(unrounded_optimal_sets(input))
}

/// Target band for the input's dedication tier.
///
/// Scaled from the unrounded optimal so small volumes keep a band of
/// non-zero width.
pub fn target_range(input: &PlannerInput) -> TargetRange {
    let optimal = unrounded_optimal_sets(input);
    let (low, high) = input.dedication_level().fraction_band();
    TargetRange {
        min: optimal * low,
        max: optimal * high,
    }
}

/// Compute the rounded optimal set count and the full-precision target band.
pub fn compute_targets(input: &PlannerInput) -> (f64, TargetRange) {
    (optimal_sets(input), target_range(input))
}
