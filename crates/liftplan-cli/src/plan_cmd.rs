//! `liftplan plan`: build a generator, run the planning loop, print the plan.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Args;

use liftplan_core::generator::{CommandGenerator, GeneratorRegistry, PlanGenerator, ReplayGenerator};
use liftplan_core::{DedicationLevel, Planner, PlannerConfig, PlannerInput, PlanningResult};

use crate::config::{LiftplanConfig, Overrides};

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Training status: 1 = novice, 2 = intermediate, 3 = advanced
    #[arg(long)]
    pub training_status: u8,
    /// Sex: 0 = male, 1 = female
    #[arg(long)]
    pub sex: u8,
    /// Recovery capacity multiplier (0.5 to 1.2)
    #[arg(long)]
    pub recovery_factor: f64,
    /// Energy balance multiplier (below 1.0 is a deficit)
    #[arg(long)]
    pub energy_balance_factor: f64,
    #[arg(long)]
    pub age: u32,
    /// Maximum training days per week (1 to 7)
    #[arg(long)]
    pub training_frequency: u32,
    /// A = sustainability, B = balanced, C = maximum results
    #[arg(long, default_value = "B")]
    pub dedication: DedicationLevel,
    /// Exercise catalog TOML (defaults to the builtin catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Registered generator to use (e.g. "command", "replay")
    #[arg(long)]
    pub generator: Option<String>,
    /// Serve generator responses from these files, in order
    #[arg(long, num_args = 1..)]
    pub replay: Vec<PathBuf>,
    #[arg(long)]
    pub max_attempts: Option<u32>,
    /// Write the plan here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Include status and per-attempt history in the output
    #[arg(long)]
    pub with_attempts: bool,
}

// -----------------------------------------------------------------------
// plan
// -----------------------------------------------------------------------

pub async fn run_plan(args: PlanArgs) -> Result<()> {
    let input = PlannerInput::new(
        args.training_status,
        args.sex,
        args.recovery_factor,
        args.energy_balance_factor,
        args.age,
        args.training_frequency,
        args.dedication,
    )
    .context("invalid planner input")?;

    let config = LiftplanConfig::resolve(&Overrides {
        generator: args.generator.clone(),
        catalog: args.catalog.clone(),
        max_attempts: args.max_attempts,
    })?;
    let catalog = Arc::new(config.load_catalog()?);
    let generator = select_generator(&config, &args.replay, args.generator.is_some())?;

    tracing::info!(
        generator = generator.name(),
        max_attempts = config.max_attempts,
        exercises = catalog.len(),
        "generating plan"
    );

    let planner =
        Planner::new(catalog, generator).with_config(PlannerConfig::new(config.max_attempts));
    let result = planner
        .generate(&input)
        .await
        .context("plan generation failed")?;

    if let Some(diagnostic) = result.diagnostic() {
        tracing::warn!(
            attempts = result.attempts.len(),
            diagnostic,
            "plan accepted with unresolved volume deviations"
        );
    }

    let rendered = render(&result, args.with_attempts)?;
    write_output(&rendered, args.output.as_deref())
}

/// Pick a generator from the registry.
///
/// Replay files register a `replay` generator, which becomes the default
/// unless a generator was named explicitly.
fn select_generator(
    config: &LiftplanConfig,
    replay: &[PathBuf],
    explicit: bool,
) -> Result<Arc<dyn PlanGenerator>> {
    let mut registry = GeneratorRegistry::new();
    registry.register(
        CommandGenerator::with_binary(config.generator_binary.clone())
            .args(config.generator_args.iter().cloned()),
    );

    if !replay.is_empty() {
        registry.register(ReplayGenerator::from_files(replay)?);
    }

    let kind = if !replay.is_empty() && !explicit {
        "replay"
    } else {
        config.generator_kind.as_str()
    };

    registry.get(kind).ok_or_else(|| {
        if kind == "replay" {
            anyhow!("the replay generator needs at least one --replay FILE")
        } else {
            anyhow!(
                "unknown generator {kind:?} (available: {})",
                registry.list().join(", ")
            )
        }
    })
}

fn render(result: &PlanningResult, with_attempts: bool) -> Result<String> {
    let json = if with_attempts {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string_pretty(&result.output)
    };
    json.context("failed to serialize plan")
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            tracing::info!(path = %path.display(), "plan written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: &str) -> LiftplanConfig {
        LiftplanConfig {
            generator_kind: kind.to_string(),
            generator_binary: "claude".to_string(),
            generator_args: vec!["-p".to_string()],
            max_attempts: 5,
            catalog: None,
        }
    }

    #[test]
    fn command_generator_is_the_default() {
        let generator = select_generator(&config("command"), &[], false).unwrap();
        assert_eq!(generator.name(), "command");
    }

    #[test]
    fn replay_files_select_the_replay_generator() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("attempt-1.json");
        std::fs::write(&path, "{}").unwrap();

        let generator = select_generator(&config("command"), &[path.clone()], false).unwrap();
        assert_eq!(generator.name(), "replay");

        let generator = select_generator(&config("command"), &[path], true).unwrap();
        assert_eq!(generator.name(), "command");
    }

    #[test]
    fn replay_without_files_is_an_error() {
        let err = select_generator(&config("replay"), &[], true).err().expect("expected an error");
        assert!(err.to_string().contains("--replay"), "unexpected error: {err}");
    }

    #[test]
    fn unknown_generator_lists_available() {
        let err = select_generator(&config("carrier-pigeon"), &[], true).err().expect("expected an error");
        let msg = err.to_string();
        assert!(msg.contains("carrier-pigeon"), "unexpected error: {msg}");
        assert!(msg.contains("command"), "unexpected error: {msg}");
    }

    #[test]
    fn missing_replay_file_is_an_error() {
        let result = select_generator(
            &config("command"),
            &[PathBuf::from("/nonexistent/attempt-1.json")],
            false,
        );
        assert!(result.is_err());
    }
}
