//! `liftplan energy`: daily energy and macronutrient targets.

use anyhow::{Context, Result};
use clap::Args;

use liftplan_core::EnergyInput;

#[derive(Debug, Args)]
pub struct EnergyArgs {
    #[arg(long)]
    pub bodyweight_kg: f64,
    #[arg(long)]
    pub body_fat_percentage: f64,
    /// Non-exercise activity multiplier (1.0 to 1.5)
    #[arg(long, default_value_t = 1.2)]
    pub physical_activity_factor: f64,
    /// Thermic effect of food multiplier (1.0 to 1.25)
    #[arg(long, default_value_t = 1.1)]
    pub thermic_effect_food_factor: f64,
    /// Length of a training session in minutes
    #[arg(long)]
    pub training_duration_min: f64,
    /// Target intake as a multiple of maintenance
    #[arg(long, default_value_t = 1.0)]
    pub energy_balance_factor: f64,
    #[arg(long)]
    pub training_days_per_week: u32,
}

pub fn run_energy(args: &EnergyArgs) -> Result<()> {
    let input = EnergyInput::new(
        args.bodyweight_kg,
        args.body_fat_percentage,
        args.physical_activity_factor,
        args.thermic_effect_food_factor,
        args.training_duration_min,
        args.energy_balance_factor,
        args.training_days_per_week,
    )
    .context("invalid energy input")?;

    let report = input.calculate();
    tracing::debug!(
        maintenance = report.maintenance_energy_intake,
        target = report.average_target_energy_intake,
        "energy report computed"
    );
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}
