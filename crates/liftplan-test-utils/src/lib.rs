//! Shared test utilities for liftplan integration tests.
//!
//! Provides a [`ScriptedGenerator`] that replays queued responses and
//! records every instruction it receives, plus plan fixtures sized against
//! the builtin catalog.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use liftplan_core::generator::{GenerationError, PlanGenerator};
use liftplan_core::{DedicationLevel, PlannerInput};

// ---------------------------------------------------------------------------
// Scripted generator
// ---------------------------------------------------------------------------

/// A generator driven by a queue of canned results.
///
/// Each call pops the next result; once the queue is empty every call fails
/// with [`GenerationError::Exhausted`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    received: Mutex<Vec<String>>,
    served: Mutex<usize>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(self, text: impl Into<String>) -> Self {
        self.lock_script().push_back(Ok(text.into()));
        self
    }

    /// Queue the same successful response `times` times.
    pub fn respond_times(self, text: impl Into<String>, times: usize) -> Self {
        let text = text.into();
        {
            let mut script = self.lock_script();
            for _ in 0..times {
                script.push_back(Ok(text.clone()));
            }
        }
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.lock_script()
            .push_back(Err(GenerationError::Failed(message.into())));
        self
    }

    /// Instructions received so far, in call order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, GenerationError>>> {
        self.script.lock().unwrap()
    }
}

#[async_trait]
impl PlanGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, instructions: &str) -> Result<String, GenerationError> {
        self.received.lock().unwrap().push(instructions.to_string());
        let next = self.lock_script().pop_front();
        let mut served = self.served.lock().unwrap();
        match next {
            Some(result) => {
                *served += 1;
                result
            }
            None => Err(GenerationError::Exhausted { served: *served }),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Intermediate male, 30 years old, 4 days/week, tier B.
///
/// Optimal sets 17.7; target range 13.3-15.9 (unrounded 13.26-15.91); tolerance band 9.28-20.68.
pub fn sample_input() -> PlannerInput {
    PlannerInput::new(2, 0, 1.0, 1.0, 30, 4, DedicationLevel::B).unwrap()
}

/// A full-body day done twice a week that puts every muscle group inside
/// the [`sample_input`] target range (13.5-14.0 weekly sets each).
pub fn balanced_plan() -> Value {
    json!({
        "workout_days": [
            {
                "day_name": "Full Body",
                "frequency_per_week": 2,
                "exercises": [
                    {"exercise_name": "Barbell bench press", "sets": 4, "intensity": 80},
                    {"exercise_name": "Pull-ups & wide pulldowns", "sets": 4, "intensity": 80},
                    {"exercise_name": "Pull-overs & lat prayers", "sets": 2, "intensity": 80},
                    {"exercise_name": "Romanian deadlifts", "sets": 3, "intensity": 80},
                    {"exercise_name": "Barbell squats", "sets": 4, "intensity": 80},
                    {"exercise_name": "Leg extensions", "sets": 3, "intensity": 65},
                    {"exercise_name": "Leg curls", "sets": 4, "intensity": 65},
                    {"exercise_name": "Calf raises/jumps", "sets": 1, "intensity": 65},
                    {"exercise_name": "Triceps extensions", "sets": 1, "intensity": 65},
                    {"exercise_name": "Biceps curls", "sets": 3, "intensity": 65},
                    {"exercise_name": "Ab crunches", "sets": 5, "intensity": 65}
                ]
            }
        ]
    })
}

/// A plan that only trains chest: every other muscle is far below target.
pub fn lopsided_plan() -> Value {
    json!({
        "workout_days": [
            {
                "day_name": "Chest Day",
                "frequency_per_week": 2,
                "exercises": [
                    {"exercise_name": "Barbell bench press", "sets": 4, "intensity": 80}
                ]
            }
        ]
    })
}

/// [`balanced_plan`] split so its total weekly frequency is `total`.
pub fn plan_with_frequency(total: u32) -> Value {
    let mut plan = balanced_plan();
    plan["workout_days"][0]["frequency_per_week"] = json!(total);
    plan
}

/// Wrap text in a markdown code fence, the way chat models often answer.
pub fn fenced(text: &str) -> String {
    format!("```json\n{text}\n```")
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftplan_core::Catalog;
    use liftplan_core::plan::parse_candidate_plan;
    use liftplan_core::volume::{compute_targets, tally_plan};

    #[test]
    fn balanced_plan_is_inside_target_range() {
        let (_, target) = compute_targets(&sample_input());
        let plan = parse_candidate_plan(&balanced_plan().to_string()).unwrap();
        let report = tally_plan(&plan, &Catalog::builtin());
        for (muscle, sets) in report.iter() {
            assert!(
                sets >= target.min && sets <= target.max,
                "{muscle}: {sets} outside {}-{}",
                target.min,
                target.max
            );
        }
    }

    #[tokio::test]
    async fn scripted_generator_replays_in_order() {
        let generator = ScriptedGenerator::new().respond("one").fail("down").respond("two");
        assert_eq!(generator.generate("a").await.unwrap(), "one");
        assert!(generator.generate("b").await.is_err());
        assert_eq!(generator.generate("c").await.unwrap(), "two");
        assert!(matches!(
            generator.generate("d").await,
            Err(GenerationError::Exhausted { served: 3 })
        ));
        assert_eq!(generator.received(), vec!["a", "b", "c", "d"]);
    }
}
