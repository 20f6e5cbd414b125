//! The `PlanGenerator` trait -- the adapter interface for plan producers.
//!
//! Each concrete generator (LLM subprocess, replay files, scripted test
//! stub) implements this trait. The trait is object-safe so it can be
//! stored as `Box<dyn PlanGenerator>` in the [`super::GeneratorRegistry`].

use async_trait::async_trait;
use thiserror::Error;

/// Failure to obtain a response from a generator.
///
/// The planning loop treats every variant the same way as an unparseable
/// response: retried while attempts remain.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to spawn generator binary '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("generator I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("generator exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },

    #[error("generator returned an empty response")]
    EmptyResponse,

    #[error("generator has no responses left (served {served})")]
    Exhausted { served: usize },

    #[error("generator failed: {0}")]
    Failed(String),
}

/// Adapter interface for producing candidate plan text.
///
/// Implementors receive the full rendered instructions for one attempt and
/// return the raw response text. Parsing and validation happen in the
/// planner, never in the generator.
///
/// # Object Safety
///
/// This trait is object-safe, so `Box<dyn PlanGenerator>` and
/// `Arc<dyn PlanGenerator>` both work.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Human-readable name for this generator (e.g. "command").
    fn name(&self) -> &str;

    /// Produce a response for the given instructions.
    async fn generate(&self, instructions: &str) -> Result<String, GenerationError>;
}

// Compile-time assertion: PlanGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn PlanGenerator) {}
};
