mod catalog_cmd;
mod config;
mod energy_cmd;
mod plan_cmd;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use liftplan_core::generator::command::DEFAULT_BINARY;

use crate::energy_cmd::EnergyArgs;
use crate::plan_cmd::PlanArgs;

#[derive(Parser)]
#[command(
    name = "liftplan",
    version,
    about = "Weekly training plans with validated per-muscle volume"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file to ~/.config/liftplan/config.toml
    Init {
        /// Binary the command generator runs
        #[arg(long, default_value = DEFAULT_BINARY)]
        generator_binary: String,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Generate a weekly plan and validate it against volume targets
    Plan(PlanArgs),
    /// Estimate daily energy expenditure and macronutrient targets
    Energy(EnergyArgs),
    /// List the exercise catalog
    Catalog {
        /// Catalog TOML to load instead of the configured one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print shell completions to stdout
    Completions {
        shell: clap_complete::Shell,
    },
}

fn cmd_init(generator_binary: String, force: bool) -> Result<()> {
    let path = config::config_path();
    if path.exists() && !force {
        bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut file = config::ConfigFile::default();
    file.generator.binary = generator_binary;
    let written = config::save_config(&file)?;
    println!("Config written to {}", written.display());
    println!("  generator: {} ({})", file.generator.kind, file.generator.binary);
    println!("  max_attempts: {}", file.planner.max_attempts);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            generator_binary,
            force,
        } => cmd_init(generator_binary, force)?,
        Commands::Plan(args) => plan_cmd::run_plan(args).await?,
        Commands::Energy(args) => energy_cmd::run_energy(&args)?,
        Commands::Catalog { catalog, json } => catalog_cmd::run_catalog(catalog, json)?,
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "liftplan",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plan_requires_profile_flags() {
        let result = Cli::try_parse_from(["liftplan", "plan", "--age", "30"]);
        assert!(result.is_err());
    }

    #[test]
    fn dedication_level_parses_case_insensitively() {
        let cli = Cli::try_parse_from([
            "liftplan",
            "plan",
            "--training-status",
            "2",
            "--sex",
            "0",
            "--recovery-factor",
            "1.0",
            "--energy-balance-factor",
            "1.0",
            "--age",
            "30",
            "--training-frequency",
            "4",
            "--dedication",
            "c",
        ])
        .unwrap();
        let Commands::Plan(args) = cli.command else {
            panic!("expected plan command");
        };
        assert_eq!(args.dedication, liftplan_core::DedicationLevel::C);
    }

    #[test]
    fn unknown_dedication_level_is_rejected() {
        let result = Cli::try_parse_from([
            "liftplan",
            "plan",
            "--training-status",
            "2",
            "--sex",
            "0",
            "--recovery-factor",
            "1.0",
            "--energy-balance-factor",
            "1.0",
            "--age",
            "30",
            "--training-frequency",
            "4",
            "--dedication",
            "Z",
        ]);
        assert!(result.is_err());
    }
}
