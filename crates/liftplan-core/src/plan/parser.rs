//! Candidate plan parser.
//!
//! Extracts the JSON object from a generator response and validates its
//! structure:
//! - Optional Markdown code fences are stripped.
//! - If the remaining text is not a bare object, the outermost `{...}` span
//!   is tried instead.
//! - Every day must repeat at least once per week.

use thiserror::Error;

use super::prompt::STRUCTURED_OUTPUT_DIRECTIVE;
use super::types::CandidatePlan;

/// Errors that can occur while parsing a generator response.
#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("response is empty")]
    Empty,

    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("day {day:?} has frequency_per_week 0 (expected at least 1)")]
    ZeroFrequency { day: String },
}

impl PlanParseError {
    /// Correction to send with the next request.
    ///
    /// A zero-frequency day is valid JSON, so it gets a schema note naming
    /// the day rather than the generic JSON directive.
    pub fn remediation(&self) -> String {
        match self {
            PlanParseError::ZeroFrequency { day } => format!(
                "SCHEMA ERROR: Day {day:?} has frequency_per_week 0. Every \
                 frequency_per_week must be at least 1; remove days you do not train."
            ),
            _ => STRUCTURED_OUTPUT_DIRECTIVE.to_string(),
        }
    }
}

/// Parse and validate a candidate plan from raw generator text.
pub fn parse_candidate_plan(response: &str) -> Result<CandidatePlan, PlanParseError> {
    let body = strip_code_fences(response);
    if body.is_empty() {
        return Err(PlanParseError::Empty);
    }

    let plan: CandidatePlan = match serde_json::from_str(body) {
        Ok(plan) => plan,
        Err(direct_err) => {
            let Some(span) = outermost_object(body) else {
                return Err(PlanParseError::NoJsonObject);
            };
            if span.len() == body.len() {
                return Err(direct_err.into());
            }
            serde_json::from_str(span)?
        }
    };

    validate(&plan)?;
    Ok(plan)
}

/// Remove a leading ```` ``` ```` or ```` ```json ```` fence and a trailing
/// ```` ``` ```` fence, then trim.
pub fn strip_code_fences(response: &str) -> &str {
    let mut text = response.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// The slice from the first `{` to the last `}`, if both exist in order.
fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn validate(plan: &CandidatePlan) -> Result<(), PlanParseError> {
    for day in &plan.workout_days {
        if day.frequency_per_week == 0 {
            return Err(PlanParseError::ZeroFrequency {
                day: day.day_name.clone(),
            });
        }
    }
    Ok(())
}
