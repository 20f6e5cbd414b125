//! Plan validator: checks a candidate plan's realized volume against the
//! target band and its total frequency against the user's ceiling.
//!
//! Volume is judged per muscle group against a tolerance band that widens
//! the target range by [`VOLUME_TOLERANCE`] on each side. Only muscles
//! outside the widened band reject the plan; muscles between the band and
//! the target edge are reported as informational. The frequency ceiling is
//! a hard limit with no tolerance.

pub mod remediation;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Catalog, MuscleGroup};
use crate::plan::types::CandidatePlan;
use crate::volume::{TargetRange, VolumeReport};

/// Fractional widening applied to both edges of the target range.
pub const VOLUME_TOLERANCE: f64 = 0.30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The widened acceptance window around a target range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceBand {
    pub lower: f64,
    pub upper: f64,
    pub tolerance: f64,
}

impl ToleranceBand {
    pub fn new(target: &TargetRange, tolerance: f64) -> Self {
        Self {
            lower: target.min * (1.0 - tolerance),
            upper: target.max * (1.0 + tolerance),
            tolerance,
        }
    }
}

/// How far, and in which direction, a muscle missed its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Severity {
    /// Below the tolerance band; `deficit` is measured to `target.min`.
    WayTooLow { deficit: f64 },
    /// Above the tolerance band; `excess` is measured from `target.max`.
    WayTooHigh { excess: f64 },
    /// Outside the target range but inside the tolerance band.
    SlightlyOff,
}

impl Severity {
    pub fn is_blocking(self) -> bool {
        !matches!(self, Severity::SlightlyOff)
    }
}

/// A single muscle group that missed its target range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deviation {
    pub muscle: MuscleGroup,
    pub realized: f64,
    pub severity: Severity,
}

/// Outcome of volume validation for one candidate plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationVerdict {
    pub accepted: bool,
    /// Muscles outside the target range, in canonical muscle order.
    pub deviations: Vec<Deviation>,
    /// Corrective text for the generator on rejection; an informational
    /// summary on acceptance.
    pub remediation: String,
}

/// The plan's total weekly frequency exceeds the user's ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("plan requires {total} days/week but the maximum is {ceiling} days/week")]
pub struct FrequencyViolation {
    pub total: u32,
    pub ceiling: u32,
}

impl FrequencyViolation {
    /// Corrective text appended to the next generator request.
    pub fn remediation(&self) -> String {
        format!(
            "FREQUENCY ERROR: Your plan has {total} total days/week which EXCEEDS the max of \
             {ceiling}. You MUST regenerate with total frequency \u{2264} {ceiling}.",
            total = self.total,
            ceiling = self.ceiling
        )
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Classify one muscle's realized volume, or `None` if it is on target.
pub fn classify(realized: f64, target: &TargetRange, band: &ToleranceBand) -> Option<Severity> {
    if realized < band.lower {
        Some(Severity::WayTooLow {
            deficit: target.min - realized,
        })
    } else if realized > band.upper {
        Some(Severity::WayTooHigh {
            excess: realized - target.max,
        })
    } else if realized < target.min || realized > target.max {
        Some(Severity::SlightlyOff)
    } else {
        None
    }
}

/// Validate realized volume against the target range.
///
/// The plan is rejected if any muscle is way too low or way too high.
/// Suggestions in the remediation text are restricted to `catalog`.
pub fn validate_volume(
    report: &VolumeReport,
    target: &TargetRange,
    catalog: &Catalog,
) -> ValidationVerdict {
    let band = ToleranceBand::new(target, VOLUME_TOLERANCE);

    let deviations: Vec<Deviation> = report
        .iter()
        .filter_map(|(muscle, realized)| {
            classify(realized, target, &band).map(|severity| Deviation {
                muscle,
                realized,
                severity,
            })
        })
        .collect();

    let accepted = !deviations.iter().any(|d| d.severity.is_blocking());
    let remediation = if accepted {
        remediation::render_acceptance(&deviations, target)
    } else {
        remediation::render_rejection(&deviations, target, &band, catalog)
    };

    ValidationVerdict {
        accepted,
        deviations,
        remediation,
    }
}

/// Check the plan's total weekly frequency against the ceiling.
pub fn check_frequency(plan: &CandidatePlan, ceiling: u32) -> Result<(), FrequencyViolation> {
    let total = plan.total_frequency();
    if total > ceiling {
        Err(FrequencyViolation { total, ceiling })
    } else {
        Ok(())
    }
}
