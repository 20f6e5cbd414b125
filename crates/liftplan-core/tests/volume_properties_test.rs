//! Property tests for target computation, volume accounting, validation,
//! and sanitization.

use liftplan_core::plan::{CandidatePlan, PlannedExercise, WorkoutDay, retain_known_exercises};
use liftplan_core::validate::validate_volume;
use liftplan_core::volume::{VolumeReport, compute_targets, optimal_sets, tally_plan};
use liftplan_core::{Catalog, DedicationLevel, MuscleGroup, PlannerInput};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn dedication() -> impl Strategy<Value = DedicationLevel> {
    prop_oneof![
        Just(DedicationLevel::A),
        Just(DedicationLevel::B),
        Just(DedicationLevel::C),
    ]
}

/// Every valid energy balance factor, weighted towards tiny values.
fn energy_balance() -> impl Strategy<Value = f64> {
    prop_oneof![
        1e-6_f64..0.1,
        0.1_f64..=1.5,
        1.5_f64..1_000.0,
    ]
}

fn exercise_names() -> Vec<String> {
    let mut names: Vec<String> = Catalog::builtin().iter().map(|e| e.name.clone()).collect();
    names.extend(["Sled pushes", "Farmer carries", "barbell squats"].map(String::from));
    names
}

fn exercise() -> impl Strategy<Value = PlannedExercise> {
    (prop::sample::select(exercise_names()), 0_u32..7, 50_u32..90).prop_map(
        |(exercise_name, sets, intensity)| PlannedExercise {
            exercise_name,
            sets,
            intensity,
        },
    )
}

fn plan() -> impl Strategy<Value = CandidatePlan> {
    prop::collection::vec(
        (1_u32..4, prop::collection::vec(exercise(), 0..8)),
        0..5,
    )
    .prop_map(|days| CandidatePlan {
        workout_days: days
            .into_iter()
            .enumerate()
            .map(|(i, (frequency_per_week, exercises))| WorkoutDay {
                day_name: format!("Day {i}"),
                frequency_per_week,
                exercises,
            })
            .collect(),
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn target_range_is_ordered_and_non_negative(
        status in 1_u8..=3,
        sex in 0_u8..=1,
        recovery in 0.5_f64..=1.2,
        energy in energy_balance(),
        age in 10_u32..=100,
        frequency in 1_u32..=7,
        level in dedication(),
    ) {
        let input = PlannerInput::new(status, sex, recovery, energy, age, frequency, level).unwrap();
        let (optimal, target) = compute_targets(&input);
        prop_assert!(optimal >= 0.0);
        prop_assert!(target.min > 0.0, "min {} for energy {energy}", target.min);
        prop_assert!(target.min < target.max, "{} !< {}", target.min, target.max);
    }

    #[test]
    fn plan_at_band_midpoint_is_accepted(
        status in 1_u8..=3,
        sex in 0_u8..=1,
        recovery in 0.5_f64..=1.2,
        energy in energy_balance(),
        age in 10_u32..=100,
        frequency in 1_u32..=7,
        level in dedication(),
    ) {
        let catalog = Catalog::builtin();
        let input = PlannerInput::new(status, sex, recovery, energy, age, frequency, level).unwrap();
        let (_, target) = compute_targets(&input);
        let midpoint = (target.min + target.max) / 2.0;
        let report = VolumeReport::from_pairs(MuscleGroup::ALL.map(|m| (m, midpoint)));
        prop_assert!(validate_volume(&report, &target, &catalog).accepted);
    }

    #[test]
    fn optimal_sets_is_monotone_in_recovery_energy_and_status(
        status in 1_u8..=2,
        recovery in 0.5_f64..=1.0,
        recovery_step in 0.0_f64..=0.15,
        energy in energy_balance(),
        energy_step in 0.0_f64..=0.3,
        age in 10_u32..=100,
        frequency in 1_u32..=7,
    ) {
        let build = |status: u8, recovery: f64, energy: f64| {
            PlannerInput::new(status, 0, recovery, energy, age, frequency, DedicationLevel::B).unwrap()
        };
        let base = optimal_sets(&build(status, recovery, energy));
        prop_assert!(optimal_sets(&build(status, recovery + recovery_step, energy)) >= base);
        prop_assert!(optimal_sets(&build(status, recovery, energy + energy_step)) >= base);
        prop_assert!(optimal_sets(&build(status + 1, recovery, energy)) >= base);
    }

    #[test]
    fn tally_is_invariant_to_reordering(plan in plan()) {
        let catalog = Catalog::builtin();
        let mut reordered = plan.clone();
        reordered.workout_days.reverse();
        for day in &mut reordered.workout_days {
            day.exercises.reverse();
        }

        let original = tally_plan(&plan, &catalog);
        let shuffled = tally_plan(&reordered, &catalog);
        for ((muscle, a), (_, b)) in original.iter().zip(shuffled.iter()) {
            prop_assert!((a - b).abs() < 1e-9, "{muscle}: {a} != {b}");
        }
    }

    #[test]
    fn validation_is_idempotent(plan in plan()) {
        let catalog = Catalog::builtin();
        let input = PlannerInput::new(2, 0, 1.0, 1.0, 30, 4, DedicationLevel::B).unwrap();
        let (_, target) = compute_targets(&input);
        let report = tally_plan(&plan, &catalog);
        prop_assert_eq!(
            validate_volume(&report, &target, &catalog),
            validate_volume(&report, &target, &catalog)
        );
    }

    #[test]
    fn sanitizer_only_removes_unknown_exercises(plan in plan()) {
        let catalog = Catalog::builtin();
        let sanitized = retain_known_exercises(&plan, &catalog);

        prop_assert_eq!(sanitized.workout_days.len(), plan.workout_days.len());
        for (before, after) in plan.workout_days.iter().zip(&sanitized.workout_days) {
            let expected: Vec<&PlannedExercise> = before
                .exercises
                .iter()
                .filter(|e| catalog.contains(&e.exercise_name))
                .collect();
            let actual: Vec<&PlannedExercise> = after.exercises.iter().collect();
            prop_assert_eq!(actual, expected);
        }
        prop_assert_eq!(tally_plan(&sanitized, &catalog), tally_plan(&plan, &catalog));
    }
}
