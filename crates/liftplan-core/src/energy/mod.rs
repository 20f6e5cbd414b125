//! Energy and macronutrient calculator.
//!
//! Estimates daily energy expenditure from body composition and training
//! load (Cunningham BMR), averages training and rest days across the week,
//! and splits the target intake into protein, fat, and carbohydrate.

use serde::Serialize;

use crate::input::{InputError, check_positive, check_range};
use crate::volume::target::round1;

const PROTEIN_G_PER_KG: f64 = 1.6;
const FAT_SHARE: f64 = 0.30;
const PROTEIN_KCAL_PER_G: f64 = 4.0;
const FAT_KCAL_PER_G: f64 = 9.0;
const CARBS_KCAL_PER_G: f64 = 4.0;

/// Validated calculator input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyInput {
    bodyweight_kg: f64,
    body_fat_percentage: f64,
    physical_activity_factor: f64,
    thermic_effect_food_factor: f64,
    training_duration_min: f64,
    energy_balance_factor: f64,
    training_days_per_week: u32,
}

impl EnergyInput {
    pub fn new(
        bodyweight_kg: f64,
        body_fat_percentage: f64,
        physical_activity_factor: f64,
        thermic_effect_food_factor: f64,
        training_duration_min: f64,
        energy_balance_factor: f64,
        training_days_per_week: u32,
    ) -> Result<Self, InputError> {
        check_positive("bodyweight_kg", bodyweight_kg)?;
        check_range(
            "body_fat_percentage",
            body_fat_percentage,
            0.0,
            100.0,
            "between 0 and 100",
        )?;
        check_range(
            "physical_activity_factor",
            physical_activity_factor,
            1.0,
            1.5,
            "between 1.0 and 1.5",
        )?;
        check_range(
            "thermic_effect_food_factor",
            thermic_effect_food_factor,
            1.0,
            1.25,
            "between 1.0 and 1.25",
        )?;
        check_positive("training_duration_min", training_duration_min)?;
        check_positive("energy_balance_factor", energy_balance_factor)?;
        if training_days_per_week > 7 {
            return Err(InputError::OutOfRange {
                field: "training_days_per_week",
                value: training_days_per_week.to_string(),
                expected: "between 0 and 7",
            });
        }

        Ok(Self {
            bodyweight_kg,
            body_fat_percentage,
            physical_activity_factor,
            thermic_effect_food_factor,
            training_duration_min,
            energy_balance_factor,
            training_days_per_week,
        })
    }

    /// Run every step of the calculation.
    pub fn calculate(&self) -> EnergyReport {
        let fat_free_mass = self.bodyweight_kg * (1.0 - self.body_fat_percentage / 100.0);
        let bmr = 370.0 + 21.6 * fat_free_mass;
        let training_ee = 0.1 * self.bodyweight_kg * self.training_duration_min;
        let rest_day_ee = bmr * self.physical_activity_factor * self.thermic_effect_food_factor;
        let training_day_ee =
            (bmr * self.physical_activity_factor + training_ee) * self.thermic_effect_food_factor;

        let training_days = f64::from(self.training_days_per_week);
        let rest_days = 7.0 - training_days;
        let maintenance = (training_days * training_day_ee + rest_days * rest_day_ee) / 7.0;
        let target = maintenance * self.energy_balance_factor;

        EnergyReport {
            fat_free_mass_kg: round2(fat_free_mass),
            cunningham_bmr: round2(bmr),
            training_energy_expenditure: round2(training_ee),
            rest_day_energy_expenditure: round2(rest_day_ee),
            training_day_energy_expenditure: round2(training_day_ee),
            maintenance_energy_intake: round2(maintenance),
            average_target_energy_intake: round2(target),
            macro_targets: MacroTargets::for_intake(self.bodyweight_kg, target),
        }
    }
}

/// Daily energy figures in kcal (mass in kg), rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReport {
    pub fat_free_mass_kg: f64,
    pub cunningham_bmr: f64,
    pub training_energy_expenditure: f64,
    pub rest_day_energy_expenditure: f64,
    pub training_day_energy_expenditure: f64,
    pub maintenance_energy_intake: f64,
    pub average_target_energy_intake: f64,
    pub macro_targets: MacroTargets,
}

/// Macronutrient split of a target intake, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroTargets {
    pub protein_grams: f64,
    pub protein_calories: f64,
    pub fat_grams: f64,
    pub fat_calories: f64,
    pub carbs_grams: f64,
    pub carbs_calories: f64,
    pub protein_percentage: f64,
    pub fat_percentage: f64,
    pub carbs_percentage: f64,
}

impl MacroTargets {
    /// Protein is fixed per kg of bodyweight, fat is a fixed share of the
    /// intake, and carbohydrate takes the remainder (negative if protein and
    /// fat already exceed the intake).
    pub fn for_intake(bodyweight_kg: f64, target_kcal: f64) -> Self {
        let protein_grams = bodyweight_kg * PROTEIN_G_PER_KG;
        let protein_calories = protein_grams * PROTEIN_KCAL_PER_G;
        let fat_calories = target_kcal * FAT_SHARE;
        let fat_grams = fat_calories / FAT_KCAL_PER_G;
        let carbs_calories = target_kcal - protein_calories - fat_calories;
        let carbs_grams = carbs_calories / CARBS_KCAL_PER_G;

        let share = |kcal: f64| {
            if target_kcal > 0.0 {
                round1(kcal / target_kcal * 100.0)
            } else {
                0.0
            }
        };

        Self {
            protein_grams: round1(protein_grams),
            protein_calories: round1(protein_calories),
            fat_grams: round1(fat_grams),
            fat_calories: round1(fat_calories),
            carbs_grams: round1(carbs_grams),
            carbs_calories: round1(carbs_calories),
            protein_percentage: share(protein_calories),
            fat_percentage: share(fat_calories),
            carbs_percentage: share(carbs_calories),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
