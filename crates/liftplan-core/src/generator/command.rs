//! Subprocess generator.
//!
//! Runs an LLM CLI (by default `claude -p`), writes the instructions to its
//! stdin, and returns whatever it prints on stdout.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::trait_def::{GenerationError, PlanGenerator};

/// Default binary, found via `$PATH`.
pub const DEFAULT_BINARY: &str = "claude";

/// Maximum bytes of stderr carried in a [`GenerationError::NonZeroExit`].
const STDERR_SNIPPET_BYTES: usize = 1024;

/// Generator that shells out to an LLM command-line tool.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    binary: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Create a generator that runs `claude -p`.
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_BINARY)
    }

    /// Create a generator for a custom binary with the default `-p` flag.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: vec!["-p".to_string()],
        }
    }

    /// Replace the argument list passed to the binary.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanGenerator for CommandGenerator {
    fn name(&self) -> &str {
        "command"
    }

    async fn generate(&self, instructions: &str) -> Result<String, GenerationError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| GenerationError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;
        debug!(binary = %self.binary, bytes = instructions.len(), "generator spawned");

        let stdin = child.stdin.take();
        let write = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            stdin.write_all(instructions.as_bytes()).await?;
            stdin.shutdown().await
        };

        // Feed stdin while draining stdout so a chatty child cannot block.
        let (written, output) = tokio::join!(write, child.wait_with_output());
        let output = output?;

        if let Err(e) = written {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                warn!(binary = %self.binary, "generator closed stdin before reading all instructions");
            } else {
                return Err(GenerationError::Io(e));
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationError::NonZeroExit {
                status: output.status.to_string(),
                stderr: truncate_snippet(stderr.trim(), STDERR_SNIPPET_BYTES),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        debug!(bytes = text.len(), "generator responded");
        Ok(text)
    }
}

/// Truncate a string to at most `max_bytes` (on a char boundary), appending
/// "..." if truncated.
fn truncate_snippet(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut truncated = s[..end].to_owned();
    truncated.push_str("...");
    truncated
}
