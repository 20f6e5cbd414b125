//! Plan generator interface.
//!
//! This module defines the [`PlanGenerator`] trait that every producer of
//! candidate plan text implements, the concrete [`CommandGenerator`] and
//! [`ReplayGenerator`], and the [`GeneratorRegistry`] for runtime lookup.
//!
//! # Architecture
//!
//! ```text
//! Planner
//!     |
//!     v
//! Arc<dyn PlanGenerator> <--get("command")-- GeneratorRegistry
//!     |
//!     |   generate(instructions) --> raw text
//!     |        |
//!     |        v
//!     |   parse_candidate_plan --> CandidatePlan
//! ```

pub mod command;
pub mod registry;
pub mod replay;
pub mod trait_def;

pub use command::CommandGenerator;
pub use registry::GeneratorRegistry;
pub use replay::{ReplayGenerator, ReplayLoadError};
pub use trait_def::{GenerationError, PlanGenerator};
