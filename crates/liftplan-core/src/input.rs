//! Planner input: the physiological and training parameters a plan is built
//! for, validated once at construction.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Field-level validation error for planner and calculator inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field} must be one of {expected}, got {value:?}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            InputError::OutOfRange { field, .. } | InputError::InvalidChoice { field, .. } => field,
        }
    }
}

/// Check that a float is finite and within `[min, max]`.
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<(), InputError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        })
    }
}

/// Check that a float is finite and strictly positive.
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
            expected: "greater than 0",
        })
    }
}

// ---------------------------------------------------------------------------
// Dedication tier
// ---------------------------------------------------------------------------

/// Coarse policy selecting what fraction of optimal volume to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DedicationLevel {
    /// Sustainability focus.
    A,
    /// Balanced approach.
    B,
    /// Maximum results.
    C,
}

impl DedicationLevel {
    /// Fraction of optimal sets spanned by the target band.
    pub fn fraction_band(self) -> (f64, f64) {
        match self {
            DedicationLevel::A => (0.60, 0.75),
            DedicationLevel::B => (0.75, 0.90),
            DedicationLevel::C => (0.90, 1.00),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DedicationLevel::A => "Sustainability Focus (60-75% of optimal volume)",
            DedicationLevel::B => "Balanced Approach (75-90% of optimal volume)",
            DedicationLevel::C => "Maximum Results (90-100% of optimal volume)",
        }
    }
}

impl fmt::Display for DedicationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DedicationLevel::A => "A",
            DedicationLevel::B => "B",
            DedicationLevel::C => "C",
        };
        f.write_str(s)
    }
}

impl FromStr for DedicationLevel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(DedicationLevel::A),
            "B" | "b" => Ok(DedicationLevel::B),
            "C" | "c" => Ok(DedicationLevel::C),
            other => Err(InputError::InvalidChoice {
                field: "dedication_level",
                value: other.to_string(),
                expected: "A, B, or C",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// PlannerInput
// ---------------------------------------------------------------------------

/// Validated planner input. Fields are private so every instance has passed
/// the range checks in [`PlannerInput::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerInput {
    training_status: u8,
    sex: u8,
    recovery_factor: f64,
    energy_balance_factor: f64,
    age: u32,
    training_frequency: u32,
    dedication_level: DedicationLevel,
}

impl PlannerInput {
    /// Validate and build an input.
    ///
    /// - `training_status`: 1 = novice, 2 = intermediate, 3 = advanced
    /// - `sex`: 0 = male, 1 = female
    /// - `recovery_factor`: 0.5 to 1.2
    /// - `energy_balance_factor`: greater than 0
    /// - `age`: 10 to 100
    /// - `training_frequency`: 1 to 7 days per week
    pub fn new(
        training_status: u8,
        sex: u8,
        recovery_factor: f64,
        energy_balance_factor: f64,
        age: u32,
        training_frequency: u32,
        dedication_level: DedicationLevel,
    ) -> Result<Self, InputError> {
        if !(1..=3).contains(&training_status) {
            return Err(InputError::InvalidChoice {
                field: "training_status",
                value: training_status.to_string(),
                expected: "1, 2, or 3",
            });
        }
        if sex > 1 {
            return Err(InputError::InvalidChoice {
                field: "sex",
                value: sex.to_string(),
                expected: "0 or 1",
            });
        }
        check_range(
            "recovery_factor",
            recovery_factor,
            0.5,
            1.2,
            "between 0.5 and 1.2",
        )?;
        check_positive("energy_balance_factor", energy_balance_factor)?;
        if !(10..=100).contains(&age) {
            return Err(InputError::OutOfRange {
                field: "age",
                value: age.to_string(),
                expected: "between 10 and 100",
            });
        }
        if !(1..=7).contains(&training_frequency) {
            return Err(InputError::OutOfRange {
                field: "training_frequency",
                value: training_frequency.to_string(),
                expected: "between 1 and 7",
            });
        }

        Ok(Self {
            training_status,
            sex,
            recovery_factor,
            energy_balance_factor,
            age,
            training_frequency,
            dedication_level,
        })
    }

    pub fn training_status(&self) -> u8 {
        self.training_status
    }

    pub fn sex(&self) -> u8 {
        self.sex
    }

    pub fn recovery_factor(&self) -> f64 {
        self.recovery_factor
    }

    pub fn energy_balance_factor(&self) -> f64 {
        self.energy_balance_factor
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Maximum training days per week; the ceiling for a plan's total frequency.
    pub fn training_frequency(&self) -> u32 {
        self.training_frequency
    }

    pub fn dedication_level(&self) -> DedicationLevel {
        self.dedication_level
    }

    pub fn training_status_label(&self) -> &'static str {
        match self.training_status {
            1 => "Novice",
            2 => "Intermediate",
            _ => "Advanced",
        }
    }

    pub fn sex_label(&self) -> &'static str {
        if self.sex == 1 { "Female" } else { "Male" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Result<PlannerInput, InputError> {
        PlannerInput::new(2, 0, 1.0, 1.0, 30, 4, DedicationLevel::B)
    }

    #[test]
    fn accepts_valid_input() {
        let input = valid().unwrap();
        assert_eq!(input.training_frequency(), 4);
        assert_eq!(input.training_status_label(), "Intermediate");
        assert_eq!(input.sex_label(), "Male");
    }

    #[test]
    fn rejects_training_status_out_of_set() {
        for status in [0, 4] {
            let err = PlannerInput::new(status, 0, 1.0, 1.0, 30, 4, DedicationLevel::B).unwrap_err();
            assert_eq!(err.field(), "training_status");
        }
    }

    #[test]
    fn rejects_sex_out_of_set() {
        let err = PlannerInput::new(2, 2, 1.0, 1.0, 30, 4, DedicationLevel::B).unwrap_err();
        assert_eq!(err.field(), "sex");
    }

    #[test]
    fn recovery_factor_bounds_are_inclusive() {
        assert!(PlannerInput::new(2, 0, 0.5, 1.0, 30, 4, DedicationLevel::B).is_ok());
        assert!(PlannerInput::new(2, 0, 1.2, 1.0, 30, 4, DedicationLevel::B).is_ok());
        let err = PlannerInput::new(2, 0, 1.21, 1.0, 30, 4, DedicationLevel::B).unwrap_err();
        assert_eq!(err.field(), "recovery_factor");
        let err = PlannerInput::new(2, 0, 0.49, 1.0, 30, 4, DedicationLevel::B).unwrap_err();
        assert_eq!(err.field(), "recovery_factor");
    }

    #[test]
    fn rejects_non_positive_energy_balance() {
        for ebf in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = PlannerInput::new(2, 0, 1.0, ebf, 30, 4, DedicationLevel::B).unwrap_err();
            assert_eq!(err.field(), "energy_balance_factor");
        }
    }

    #[test]
    fn rejects_age_out_of_range() {
        for age in [9, 101] {
            let err = PlannerInput::new(2, 0, 1.0, 1.0, age, 4, DedicationLevel::B).unwrap_err();
            assert_eq!(err.field(), "age");
        }
    }

    #[test]
    fn rejects_training_frequency_out_of_range() {
        for freq in [0, 8] {
            let err = PlannerInput::new(2, 0, 1.0, 1.0, 30, freq, DedicationLevel::B).unwrap_err();
            assert_eq!(err.field(), "training_frequency");
        }
    }

    #[test]
    fn error_message_names_field_and_range() {
        let err = PlannerInput::new(2, 0, 1.0, 1.0, 30, 9, DedicationLevel::B).unwrap_err();
        assert_eq!(
            err.to_string(),
            "training_frequency must be between 1 and 7, got 9"
        );
    }

    #[test]
    fn dedication_parses_case_insensitively() {
        assert_eq!("a".parse::<DedicationLevel>(), Ok(DedicationLevel::A));
        assert_eq!("C".parse::<DedicationLevel>(), Ok(DedicationLevel::C));
        let err = "D".parse::<DedicationLevel>().unwrap_err();
        assert_eq!(err.field(), "dedication_level");
    }
}
