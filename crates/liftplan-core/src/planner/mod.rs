//! Plan generation loop: drives the generator, validates each candidate,
//! and feeds corrective text back until a plan is accepted or the attempt
//! budget runs out.
//!
//! Targets are computed once per request and never change across attempts.
//! Each attempt ends in exactly one [`AttemptOutcome`]:
//!
//! - generator failure: retried with a structured-output directive
//! - parse failure: retried with the parser's correction for that error
//! - frequency over the ceiling: retried with the frequency remediation
//! - volume rejection: retried with the validator's remediation
//!
//! On the final attempt the first two are fatal, while a volume rejection is
//! downgraded to [`PlanStatus::AcceptedWithWarning`].

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::generator::PlanGenerator;
use crate::input::PlannerInput;
use crate::plan::{
    InstructionBundle, PlannerOutput, STRUCTURED_OUTPUT_DIRECTIVE, build_base_instructions,
    finalize_plan, parse_candidate_plan,
};
use crate::validate::{FrequencyViolation, check_frequency, validate_volume};
use crate::volume::{compute_targets, tally_plan};

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Configuration for the planning loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    max_attempts: u32,
}

impl PlannerConfig {
    /// Create a config with the given attempt budget (at least 1).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// How a single attempt ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Accepted,
    /// Volume validation failed; `blocking` muscles were way off.
    Rejected { blocking: usize },
    FrequencyExceeded { total: u32, ceiling: u32 },
    Unparseable { error: String },
    GeneratorFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Terminal status of a successful planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanStatus {
    Accepted,
    /// The final attempt still failed volume validation; `diagnostic` is the
    /// unresolved remediation text.
    AcceptedWithWarning { diagnostic: String },
}

/// A finalized plan together with how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningResult {
    pub output: PlannerOutput,
    pub status: PlanStatus,
    pub attempts: Vec<AttemptRecord>,
}

impl PlanningResult {
    /// The unresolved volume diagnostic, if the plan was accepted with a
    /// warning.
    pub fn diagnostic(&self) -> Option<&str> {
        match &self.status {
            PlanStatus::Accepted => None,
            PlanStatus::AcceptedWithWarning { diagnostic } => Some(diagnostic),
        }
    }
}

/// Why the attempt budget ran out without a usable plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExhaustionReason {
    #[error("generator response could not be parsed: {0}")]
    Unparseable(String),

    #[error("generator failed: {0}")]
    GeneratorFailed(String),

    #[error(transparent)]
    FrequencyExceeded(FrequencyViolation),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no usable plan after {attempts} attempts: {reason}")]
    Exhausted {
        attempts: u32,
        reason: ExhaustionReason,
    },
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Runs the generate/validate/retry loop against a catalog and generator.
pub struct Planner {
    catalog: Arc<Catalog>,
    generator: Arc<dyn PlanGenerator>,
    config: PlannerConfig,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("catalog_len", &self.catalog.len())
            .field("generator", &self.generator.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Planner {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn PlanGenerator>) -> Self {
        Self {
            catalog,
            generator,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> PlannerConfig {
        self.config
    }

    /// Generate a validated plan for `input`.
    ///
    /// Returns [`PlannerError::Exhausted`] if the final attempt produced no
    /// parseable plan or exceeded the frequency ceiling.
    pub async fn generate(&self, input: &PlannerInput) -> Result<PlanningResult, PlannerError> {
        let (optimal_sets, target) = compute_targets(input);
        let ceiling = input.training_frequency();
        let max_attempts = self.config.max_attempts;

        info!(
            optimal_sets,
            target_min = target.min,
            target_max = target.max,
            ceiling,
            max_attempts,
            generator = self.generator.name(),
            "starting plan generation"
        );

        let mut bundle = InstructionBundle::new(build_base_instructions(
            input,
            optimal_sets,
            &target,
            &self.catalog,
        ));
        let mut attempts: Vec<AttemptRecord> = Vec::new();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let is_final = attempt >= max_attempts;
            let instructions = bundle.render(attempt);
            debug!(attempt, bytes = instructions.len(), "invoking generator");

            // 1. Generate.
            let raw = match self.generator.generate(&instructions).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(attempt, error = %e, "generator call failed");
                    let error = e.to_string();
                    attempts.push(AttemptRecord {
                        attempt,
                        outcome: AttemptOutcome::GeneratorFailed {
                            error: error.clone(),
                        },
                    });
                    if is_final {
                        return Err(PlannerError::Exhausted {
                            attempts: attempt,
                            reason: ExhaustionReason::GeneratorFailed(error),
                        });
                    }
                    bundle.push_remediation(STRUCTURED_OUTPUT_DIRECTIVE);
                    continue;
                }
            };

            // 2. Parse.
            let plan = match parse_candidate_plan(&raw) {
                Ok(plan) => plan,
                Err(e) => {
                    warn!(attempt, error = %e, "generator response was not a valid plan");
                    let error = e.to_string();
                    attempts.push(AttemptRecord {
                        attempt,
                        outcome: AttemptOutcome::Unparseable {
                            error: error.clone(),
                        },
                    });
                    if is_final {
                        return Err(PlannerError::Exhausted {
                            attempts: attempt,
                            reason: ExhaustionReason::Unparseable(error),
                        });
                    }
                    bundle.push_remediation(e.remediation());
                    continue;
                }
            };

            // 3. Frequency ceiling.
            if let Err(violation) = check_frequency(&plan, ceiling) {
                warn!(
                    attempt,
                    total_frequency = violation.total,
                    ceiling,
                    "plan exceeds training frequency"
                );
                attempts.push(AttemptRecord {
                    attempt,
                    outcome: AttemptOutcome::FrequencyExceeded {
                        total: violation.total,
                        ceiling: violation.ceiling,
                    },
                });
                if is_final {
                    return Err(PlannerError::Exhausted {
                        attempts: attempt,
                        reason: ExhaustionReason::FrequencyExceeded(violation),
                    });
                }
                bundle.push_remediation(violation.remediation());
                continue;
            }

            // 4. Volume.
            let report = tally_plan(&plan, &self.catalog);
            let verdict = validate_volume(&report, &target, &self.catalog);
            for deviation in &verdict.deviations {
                debug!(
                    attempt,
                    muscle = %deviation.muscle,
                    realized = deviation.realized,
                    blocking = deviation.severity.is_blocking(),
                    "muscle off target"
                );
            }

            if verdict.accepted {
                info!(
                    attempt,
                    total_frequency = plan.total_frequency(),
                    "plan accepted"
                );
                attempts.push(AttemptRecord {
                    attempt,
                    outcome: AttemptOutcome::Accepted,
                });
                return Ok(PlanningResult {
                    output: finalize_plan(&plan, &self.catalog, optimal_sets, target),
                    status: PlanStatus::Accepted,
                    attempts,
                });
            }

            let blocking = verdict
                .deviations
                .iter()
                .filter(|d| d.severity.is_blocking())
                .count();
            attempts.push(AttemptRecord {
                attempt,
                outcome: AttemptOutcome::Rejected { blocking },
            });

            if is_final {
                warn!(
                    attempt,
                    blocking,
                    "attempts exhausted; returning last plan with warning"
                );
                return Ok(PlanningResult {
                    output: finalize_plan(&plan, &self.catalog, optimal_sets, target),
                    status: PlanStatus::AcceptedWithWarning {
                        diagnostic: verdict.remediation,
                    },
                    attempts,
                });
            }

            info!(attempt, blocking, "plan rejected on volume; retrying");
            bundle.push_remediation(verdict.remediation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationError;
    use crate::input::DedicationLevel;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves a fixed list of results and records what it was asked.
    struct StubGenerator {
        responses: Mutex<Vec<Result<String, GenerationError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
            let mut responses = responses;
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlanGenerator for StubGenerator {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate(&self, instructions: &str) -> Result<String, GenerationError> {
            self.seen.lock().unwrap().push(instructions.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(GenerationError::Exhausted { served: 0 }))
        }
    }

    fn input() -> PlannerInput {
        PlannerInput::new(2, 0, 1.0, 1.0, 30, 3, DedicationLevel::B).unwrap()
    }

    fn planner(stub: Arc<StubGenerator>, max_attempts: u32) -> Planner {
        Planner::new(Arc::new(Catalog::builtin()), stub)
            .with_config(PlannerConfig::new(max_attempts))
    }

    #[test]
    fn config_enforces_minimum_of_one() {
        assert_eq!(PlannerConfig::new(0).max_attempts(), 1);
        assert_eq!(PlannerConfig::default().max_attempts(), 5);
    }

    #[tokio::test]
    async fn generator_failure_then_frequency_failure_on_final_attempt() {
        let stub = Arc::new(StubGenerator::new(vec![
            Err(GenerationError::EmptyResponse),
            Ok(r#"{"workout_days":[{"day_name":"All","frequency_per_week":9,"exercises":[]}]}"#
                .to_string()),
        ]));
        let err = planner(Arc::clone(&stub), 2)
            .generate(&input())
            .await
            .unwrap_err();

        let PlannerError::Exhausted { attempts, reason } = err;
        assert_eq!(attempts, 2);
        assert_eq!(
            reason,
            ExhaustionReason::FrequencyExceeded(FrequencyViolation {
                total: 9,
                ceiling: 3
            })
        );

        let seen = stub.seen.lock().unwrap();
        assert!(!seen[0].contains(STRUCTURED_OUTPUT_DIRECTIVE));
        assert!(seen[1].contains(STRUCTURED_OUTPUT_DIRECTIVE));
    }

    #[tokio::test]
    async fn single_attempt_generator_failure_is_fatal() {
        let stub = Arc::new(StubGenerator::new(vec![Err(GenerationError::Failed(
            "offline".to_string(),
        ))]));
        let err = planner(stub, 1).generate(&input()).await.unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Exhausted {
                attempts: 1,
                reason: ExhaustionReason::GeneratorFailed(_)
            }
        ));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn attempt_record_serializes_flat() {
        let record = AttemptRecord {
            attempt: 2,
            outcome: AttemptOutcome::FrequencyExceeded {
                total: 6,
                ceiling: 4,
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"attempt": 2, "outcome": "frequency_exceeded", "total": 6, "ceiling": 4})
        );
    }
}
