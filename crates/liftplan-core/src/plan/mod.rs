//! Plan handling: candidate parsing, generator instructions, sanitization.

pub mod parser;
pub mod prompt;
pub mod sanitize;
pub mod types;

pub use parser::{PlanParseError, parse_candidate_plan, strip_code_fences};
pub use prompt::{InstructionBundle, STRUCTURED_OUTPUT_DIRECTIVE, build_base_instructions};
pub use sanitize::{finalize_plan, retain_known_exercises};
pub use types::{
    CandidatePlan, FinalExercise, FinalWorkoutDay, PlannedExercise, PlannerOutput, WeeklyVolume,
    WorkoutDay,
};
