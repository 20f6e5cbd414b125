//! Corrective guidance for the generator: per-muscle exercise suggestions
//! and the remediation text appended to the next request.

use std::fmt::Write as _;

use crate::catalog::{Catalog, MuscleGroup};
use crate::volume::TargetRange;

use super::{Deviation, Severity, ToleranceBand};

/// Preferred exercises to add when a muscle group is far below target.
///
/// Names are exact catalog keys of the builtin catalog.
pub fn preferred_exercises(muscle: MuscleGroup) -> &'static [&'static str] {
    match muscle {
        MuscleGroup::Quadriceps => &[
            "Leg extensions",
            "Barbell squats",
            "Leg presses, hack & belt squats",
        ],
        MuscleGroup::Hamstrings => &["Leg curls", "Romanian deadlifts"],
        MuscleGroup::Glutes => &[
            "Hip thrusts & glute kickbacks",
            "Barbell squats",
            "Romanian deadlifts",
        ],
        MuscleGroup::Calves => &["Calf raises/jumps", "Seated calf raises"],
        MuscleGroup::Abs => &["Ab crunches"],
        MuscleGroup::Biceps => &["Biceps curls"],
        MuscleGroup::Triceps => &["Triceps extensions"],
        MuscleGroup::Pecs => &["Barbell bench press", "Dumbbell bench press", "Chest flys"],
        MuscleGroup::Delt => &["Barbell overhead press", "Lateral raises"],
        MuscleGroup::Traps => &["Shrugs", "Romanian deadlifts"],
        MuscleGroup::Lats => &["Pull-ups & wide pulldowns", "Chin-ups & pulldowns"],
        MuscleGroup::ErectorSpine => &["Romanian deadlifts", "Barbell squats"],
    }
}

/// Exercises to suggest for a lagging muscle, restricted to `catalog`.
///
/// Uses the preferred list when any of it is in the catalog; otherwise falls
/// back to up to three catalog exercises that credit the muscle most.
pub fn suggestions_for(muscle: MuscleGroup, catalog: &Catalog) -> Vec<String> {
    let preferred: Vec<String> = preferred_exercises(muscle)
        .iter()
        .filter(|name| catalog.contains(name))
        .map(|name| name.to_string())
        .collect();
    if !preferred.is_empty() {
        return preferred;
    }

    let mut candidates: Vec<(&str, f64)> = catalog
        .iter()
        .filter_map(|e| e.activation.get(&muscle).map(|c| (e.name.as_str(), *c)))
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Render the rejection text for a plan with way-off muscles.
pub(crate) fn render_rejection(
    deviations: &[Deviation],
    target: &TargetRange,
    band: &ToleranceBand,
    catalog: &Catalog,
) -> String {
    let mut text = String::with_capacity(1024);
    let _ = write!(
        text,
        "VOLUME VALIDATION FAILED - Target range: {:.1}-{:.1} sets/week \
         (accepting {:.1}-{:.1} with \u{b1}{:.0}% tolerance)\n\n",
        target.min,
        target.max,
        band.lower,
        band.upper,
        band.tolerance * 100.0
    );

    let too_low: Vec<&Deviation> = deviations
        .iter()
        .filter(|d| matches!(d.severity, Severity::WayTooLow { .. }))
        .collect();
    let too_high: Vec<&Deviation> = deviations
        .iter()
        .filter(|d| matches!(d.severity, Severity::WayTooHigh { .. }))
        .collect();
    let slightly_off: Vec<&Deviation> = deviations
        .iter()
        .filter(|d| d.severity == Severity::SlightlyOff)
        .collect();

    if !too_low.is_empty() {
        text.push_str("WAY TOO LOW (must fix):\n");
        for d in &too_low {
            if let Severity::WayTooLow { deficit } = d.severity {
                let _ = writeln!(
                    text,
                    "{}: {:.1} sets (needs {:.1} more sets)",
                    d.muscle, d.realized, deficit
                );
            }
        }
        text.push_str("\nSPECIFIC FIXES NEEDED:\n");
        for d in &too_low {
            let suggestions = suggestions_for(d.muscle, catalog);
            if suggestions.is_empty() {
                let _ = writeln!(text, "  - {}: Add exercises that train it", d.muscle);
            } else {
                let _ = writeln!(text, "  - {}: Add {}", d.muscle, suggestions.join(" or "));
            }
        }
        text.push('\n');
    }

    if !too_high.is_empty() {
        text.push_str("WAY TOO HIGH (must fix):\n");
        for d in &too_high {
            if let Severity::WayTooHigh { excess } = d.severity {
                let _ = writeln!(
                    text,
                    "{}: {:.1} sets ({:.1} sets too many)",
                    d.muscle, d.realized, excess
                );
            }
        }
        text.push_str(
            "\nSuggestions: Reduce sets or remove some exercises for these muscle groups.\n\n",
        );
    }

    if !slightly_off.is_empty() {
        text.push_str("Slightly off but acceptable:\n");
        push_slightly_off(&mut text, &slightly_off, target);
        text.push('\n');
    }

    text.push_str(
        "IMPORTANT: Focus on fixing the muscles that are WAY off. \
         Regenerate the plan with better balance.",
    );
    text
}

/// Render the informational text for an accepted plan.
pub(crate) fn render_acceptance(deviations: &[Deviation], target: &TargetRange) -> String {
    let slightly_off: Vec<&Deviation> = deviations
        .iter()
        .filter(|d| d.severity == Severity::SlightlyOff)
        .collect();
    if slightly_off.is_empty() {
        return "All muscle groups within target range".to_string();
    }
    let mut text = String::from(
        "Plan acceptable - some muscles slightly off target but within tolerance:\n",
    );
    push_slightly_off(&mut text, &slightly_off, target);
    text.truncate(text.trim_end().len());
    text
}

fn push_slightly_off(text: &mut String, deviations: &[&Deviation], target: &TargetRange) {
    for d in deviations {
        let _ = writeln!(
            text,
            "{}: {:.1} sets (target: {:.1}-{:.1})",
            d.muscle, d.realized, target.min, target.max
        );
    }
}
