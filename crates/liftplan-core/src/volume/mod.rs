//! Weekly volume: target computation and realized-volume accounting.

pub mod accountant;
pub mod target;

pub use accountant::{VolumeReport, tally_plan};
pub use target::{TargetRange, compute_targets, optimal_sets, target_range};
