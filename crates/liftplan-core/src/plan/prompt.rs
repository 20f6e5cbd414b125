//! Generator instructions: base prompt construction and the cumulative
//! remediation history appended on retries.
//!
//! This module contains pure string assembly (no I/O).

use crate::catalog::{Catalog, Category};
use crate::input::PlannerInput;
use crate::validate::{ToleranceBand, VOLUME_TOLERANCE};
use crate::volume::TargetRange;

// ---------------------------------------------------------------------------
// Static sections
// ---------------------------------------------------------------------------

/// Output schema included in every request.
const OUTPUT_SCHEMA: &str = r#"## Required Output Format

Respond with a single JSON object in exactly this structure:

```json
{
  "workout_days": [
    {
      "day_name": "Day A - [descriptive name]",
      "frequency_per_week": 2,
      "exercises": [
        {
          "exercise_name": "[exact name from the exercise database]",
          "sets": 3,
          "intensity": 80
        }
      ]
    }
  ]
}
```
"#;

/// Planning strategy guidance included in every request.
const STRATEGY_NOTES: &str = r#"## Strategy

1. Start with 2-3 compound movements that cover most muscle groups (squats, deadlifts, bench press, rows, overhead press).
2. Calculate weekly volume for ALL 12 muscle groups after adding those compounds.
3. Add isolation exercises for any muscle still below target (Leg curls for Hamstrings, Calf raises/jumps for Calves, Ab crunches for Abs, Leg extensions for Quadriceps).
4. Fine-tune with 2, 3, 4, or 5 sets per exercise. Do not default to 3-4 sets everywhere.
5. Verify EVERY muscle group is within range before answering.

Common mistakes:
- Lower body muscles (Quadriceps, Hamstrings, Glutes, Calves) need volume too.
- Abs and Calves usually need dedicated isolation work.
- The same exercise may appear on several days. Total weekly volume matters more than unique days.
- Any split (full-body, upper/lower, push/pull/legs) is fine as long as the constraints hold.
"#;

/// Directive appended after a response that could not be parsed.
pub const STRUCTURED_OUTPUT_DIRECTIVE: &str = "IMPORTANT: Your previous response was not valid JSON. \
Please provide ONLY valid JSON with no additional text or markdown formatting.";

/// Maximum sets per muscle group in a single session, stated to the generator.
pub const MAX_SETS_PER_MUSCLE_PER_DAY: u32 = 10;

// ---------------------------------------------------------------------------
// Base prompt
// ---------------------------------------------------------------------------

/// Target intensity (% of 1RM) for a training status and exercise category.
pub fn intensity_guideline(training_status: u8, category: Category) -> u32 {
    match (training_status, category) {
        (1, _) => 60,
        (2, Category::Compound) => 80,
        (2, Category::Isolation) => 65,
        (_, Category::Compound) => 85,
        (_, Category::Isolation) => 70,
    }
}

/// Build the base instructions for a planning request.
///
/// Embeds the user profile, the computed target range and its tolerance
/// window, the frequency ceiling, intensity guidelines, the full catalog,
/// and the output schema.
pub fn build_base_instructions(
    input: &PlannerInput,
    optimal_sets: f64,
    target: &TargetRange,
    catalog: &Catalog,
) -> String {
    let band = ToleranceBand::new(target, VOLUME_TOLERANCE);
    let ceiling = input.training_frequency();
    let mut prompt = String::with_capacity(8192);

    prompt.push_str(
        "You are an expert fitness coach creating a personalized workout plan. \
         Generate a workout plan that satisfies the following constraints.\n\n",
    );

    // Profile.
    prompt.push_str("## User Profile\n");
    prompt.push_str(&format!("- Training Status: {}\n", input.training_status_label()));
    prompt.push_str(&format!("- Sex: {}\n", input.sex_label()));
    prompt.push_str(&format!("- Age: {}\n", input.age()));
    prompt.push_str(&format!("- Training Frequency: {ceiling} days per week\n"));
    prompt.push_str(&format!(
        "- Dedication Level: {} - {}\n",
        input.dedication_level(),
        input.dedication_level().description()
    ));
    prompt.push_str(&format!("- Recovery Factor: {}\n", input.recovery_factor()));
    prompt.push_str(&format!(
        "- Energy Balance Factor: {}\n\n",
        input.energy_balance_factor()
    ));

    // Targets.
    prompt.push_str("## Calculated Target Volumes\n");
    prompt.push_str(&format!(
        "- Estimated Optimal Sets Per Muscle Group: {optimal_sets:.1}\n"
    ));
    prompt.push_str(&format!(
        "- Target Volume Range: {:.1} - {:.1} sets per week per muscle group\n\n",
        target.min, target.max
    ));

    // Intensity.
    prompt.push_str("## Training Intensity Guidelines (% of 1RM)\n");
    prompt.push_str(&format!(
        "- Compound Exercises: {}%\n",
        intensity_guideline(input.training_status(), Category::Compound)
    ));
    prompt.push_str(&format!(
        "- Isolation Exercises: {}%\n\n",
        intensity_guideline(input.training_status(), Category::Isolation)
    ));

    // Constraints.
    prompt.push_str("## CRITICAL CONSTRAINTS (MUST FOLLOW)\n");
    prompt.push_str(&format!(
        "1. VOLUME TARGET: Weekly sets for EACH of the 12 muscle groups must be close to \
         {:.1} - {:.1} sets.\n",
        target.min, target.max
    ));
    prompt.push_str(&format!(
        "   - Acceptable range (\u{b1}{:.0}% tolerance): {:.1} - {:.1} sets/week. \
         Plans outside it are REJECTED.\n",
        band.tolerance * 100.0,
        band.lower,
        band.upper
    ));
    prompt.push_str(
        "   - Muscle groups: Pecs, Delt, Traps, Lats, Biceps, Triceps, Erector Spine, \
         Quadriceps, Hamstrings, Glutes, Calves, Abs\n",
    );
    prompt.push_str(
        "   - Weekly volume = (sets per exercise) x (muscle activation value) x (frequency per week)\n",
    );
    prompt.push_str(
        "   - Example: 4 sets of Barbell bench press done 2x/week = 4 x 1.0 x 2 = 8 weekly sets for Pecs\n",
    );
    prompt.push_str(&format!(
        "2. FREQUENCY: The sum of ALL frequency_per_week values MUST NOT EXCEED {ceiling}. \
         Fewer days are fine; more are never allowed.\n"
    ));
    prompt.push_str(&format!(
        "3. Training volume per muscle per day MUST NOT exceed {MAX_SETS_PER_MUSCLE_PER_DAY} sets.\n"
    ));
    prompt.push_str("4. Use ONLY exercises from the Exercise Database below, with exact names.\n");
    prompt.push_str("5. Use the intensity percentages above based on exercise type.\n\n");

    // Catalog.
    prompt.push_str("## Exercise Database with Muscle Activation\n\n");
    let catalog_json = serde_json::to_string_pretty(&catalog.to_instruction_json())
        .unwrap_or_else(|_| "{}".to_string());
    prompt.push_str(&catalog_json);
    prompt.push_str("\n\n");

    prompt.push_str(OUTPUT_SCHEMA);
    prompt.push('\n');
    prompt.push_str(STRATEGY_NOTES);
    prompt.push('\n');
    prompt.push_str(&format!(
        "Generate the workout plan for a target of {:.1}-{:.1} sets/week now, as valid JSON:",
        target.min, target.max
    ));

    prompt
}

// ---------------------------------------------------------------------------
// Cumulative instructions
// ---------------------------------------------------------------------------

/// The base prompt plus every corrective note added so far.
///
/// Remediation is an append-only accumulator: newer notes always follow
/// older ones so the generator sees the full history.
#[derive(Debug, Clone)]
pub struct InstructionBundle {
    base: String,
    remediation: Vec<String>,
}

impl InstructionBundle {
    pub fn new(base: String) -> Self {
        Self {
            base,
            remediation: Vec::new(),
        }
    }

    /// Append a corrective note.
    pub fn push_remediation(&mut self, note: impl Into<String>) {
        self.remediation.push(note.into());
    }

    pub fn remediation(&self) -> &[String] {
        &self.remediation
    }

    /// Render the instructions sent for `attempt` (1-based).
    ///
    /// Retries end with a banner naming the attempt; the banner is not part
    /// of the accumulated history.
    pub fn render(&self, attempt: u32) -> String {
        let extra: usize = self.remediation.iter().map(|r| r.len() + 4).sum();
        let mut text = String::with_capacity(self.base.len() + extra + 128);
        text.push_str(&self.base);
        for note in &self.remediation {
            text.push_str("\n\n\u{1f6ab} ");
            text.push_str(note);
        }
        if attempt > 1 {
            let rule = "=".repeat(50);
            text.push_str(&format!(
                "\n\n{rule}\nATTEMPT {attempt} - Your previous plan was REJECTED.\n{rule}\n"
            ));
        }
        text
    }
}
