//! Replay generator: serves canned responses in order.
//!
//! Used for offline runs, where previously captured generator output is
//! fed back through the planner instead of calling a live model.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::trait_def::{GenerationError, PlanGenerator};

/// Generator that returns pre-recorded responses, one per call.
///
/// Once every response has been served, further calls fail with
/// [`GenerationError::Exhausted`].
#[derive(Debug)]
pub struct ReplayGenerator {
    responses: Vec<String>,
    next: AtomicUsize,
}

impl ReplayGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            next: AtomicUsize::new(0),
        }
    }

    /// Load one response per file, in the order given.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ReplayLoadError> {
        let mut responses = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let text = std::fs::read_to_string(path).map_err(|source| ReplayLoadError {
                path: path.to_path_buf(),
                source,
            })?;
            responses.push(text);
        }
        Ok(Self::new(responses))
    }

    /// Number of responses not yet served.
    pub fn remaining(&self) -> usize {
        self.responses
            .len()
            .saturating_sub(self.next.load(Ordering::SeqCst))
    }
}

/// A replay file could not be read.
#[derive(Debug, thiserror::Error)]
#[error("failed to read replay file {path}: {source}")]
pub struct ReplayLoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[async_trait]
impl PlanGenerator for ReplayGenerator {
    fn name(&self) -> &str {
        "replay"
    }

    async fn generate(&self, _instructions: &str) -> Result<String, GenerationError> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(index) {
            Some(text) => {
                debug!(index, "serving replayed response");
                Ok(text.clone())
            }
            None => Err(GenerationError::Exhausted {
                served: self.responses.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_responses_in_order_then_exhausts() {
        let generator = ReplayGenerator::new(["first", "second"]);
        assert_eq!(generator.remaining(), 2);
        assert_eq!(generator.generate("x").await.unwrap(), "first");
        assert_eq!(generator.generate("x").await.unwrap(), "second");
        assert_eq!(generator.remaining(), 0);

        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { served: 2 }));
        assert_eq!(generator.remaining(), 0);
    }

    #[tokio::test]
    async fn loads_files_in_given_order() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.json");
        let b = tmp.path().join("b.json");
        std::fs::write(&a, "{\"a\": 1}").unwrap();
        std::fs::write(&b, "{\"b\": 2}").unwrap();

        let generator = ReplayGenerator::from_files(&[&b, &a]).unwrap();
        assert_eq!(generator.generate("").await.unwrap(), "{\"b\": 2}");
        assert_eq!(generator.generate("").await.unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ReplayGenerator::from_files(&["/nonexistent/replay.json"]).unwrap_err();
        assert_eq!(err.path, PathBuf::from("/nonexistent/replay.json"));
        assert!(err.to_string().contains("/nonexistent/replay.json"));
    }
}
