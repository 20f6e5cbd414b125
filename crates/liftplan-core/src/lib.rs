//! Workout volume planning engine.
//!
//! Computes per-muscle weekly set targets from a trainee's profile, drives a
//! [`generator::PlanGenerator`] to propose a weekly plan, validates the
//! proposal against the targets and the training-frequency ceiling, and
//! retries with corrective instructions until a plan is accepted.

pub mod catalog;
pub mod energy;
pub mod generator;
pub mod input;
pub mod plan;
pub mod planner;
pub mod validate;
pub mod volume;

pub use catalog::{Catalog, CatalogError, MuscleGroup};
pub use energy::{EnergyInput, EnergyReport, MacroTargets};
pub use input::{DedicationLevel, InputError, PlannerInput};
pub use plan::{CandidatePlan, PlannerOutput};
pub use planner::{
    AttemptOutcome, AttemptRecord, ExhaustionReason, PlanStatus, Planner, PlannerConfig,
    PlannerError, PlanningResult,
};
pub use volume::TargetRange;
