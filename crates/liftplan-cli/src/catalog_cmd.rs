//! `liftplan catalog`: show the exercises the planner knows about.

use std::path::PathBuf;

use anyhow::{Context, Result};

use liftplan_core::Catalog;
use liftplan_core::catalog::ExerciseDefinition;

use crate::config::{LiftplanConfig, Overrides};

pub fn run_catalog(catalog: Option<PathBuf>, json: bool) -> Result<()> {
    let config = LiftplanConfig::resolve(&Overrides {
        catalog,
        ..Overrides::default()
    })?;
    let catalog = config.load_catalog()?;

    if json {
        let rendered = serde_json::to_string_pretty(&catalog.to_instruction_json())
            .context("failed to serialize catalog")?;
        println!("{rendered}");
    } else {
        print!("{}", render_table(&catalog));
    }
    Ok(())
}

fn render_table(catalog: &Catalog) -> String {
    let width = catalog
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max("EXERCISE".len());

    let mut out = format!("{:<width$}  {:<10}  ACTIVATION\n", "EXERCISE", "CATEGORY");
    for exercise in catalog.iter() {
        out.push_str(&format!(
            "{:<width$}  {:<10}  {}\n",
            exercise.name,
            exercise.category.to_string(),
            activation_summary(exercise)
        ));
    }
    out
}

fn activation_summary(exercise: &ExerciseDefinition) -> String {
    exercise
        .activation
        .iter()
        .map(|(muscle, coefficient)| format!("{muscle} {coefficient}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EXERCISES: &str = r#"
[[exercises]]
name = "Push-ups"
category = "Compound"
activation = { Pecs = 1.0, Triceps = 0.5 }

[[exercises]]
name = "Curls"
category = "Isolation"
activation = { Biceps = 1.0 }
"#;

    #[test]
    fn table_has_one_row_per_exercise() {
        let catalog = Catalog::from_toml_str(TWO_EXERCISES).unwrap();
        let table = render_table(&catalog);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("EXERCISE"));
        assert!(lines[1].starts_with("Push-ups"));
        assert!(lines[1].contains("Compound"));
        assert!(lines[1].contains("Pecs 1, Triceps 0.5"));
        assert!(lines[2].contains("Isolation"));
    }

    #[test]
    fn builtin_table_lists_every_exercise() {
        let catalog = Catalog::builtin();
        assert_eq!(render_table(&catalog).lines().count(), catalog.len() + 1);
    }
}
