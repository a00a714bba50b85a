// ABOUTME: Unit tests for the per-exercise progression state machine
// ABOUTME: Pain dominates every other signal; regression outranks progression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use tandem_engine::catalog::ExerciseCatalog;
use tandem_engine::config::ProgressionConfig;
use tandem_engine::models::user_profile::ExerciseMastery;
use tandem_engine::models::workout::{ExerciseLogBuilder, FormQuality};
use tandem_engine::progression::{ProgressionAnalyzer, ProgressionChange};

fn analyzer() -> ProgressionAnalyzer {
    ProgressionAnalyzer::new(
        Arc::new(ExerciseCatalog::builtin()),
        ProgressionConfig::default(),
    )
}

fn solid_mastery(exercise_id: &str, times: u32, form_ready: bool) -> ExerciseMastery {
    let mut mastery = ExerciseMastery::first(exercise_id, 3.0, 3.5, 12, common::t0());
    mastery.times_performed = times;
    mastery.form_ready_for_progression = form_ready;
    mastery
}

#[test]
fn pain_forces_regression_with_full_confidence() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    // Excellent numbers everywhere else; pain must still win.
    let log = ExerciseLogBuilder::new("pushup")
        .prescription(3, Some(12), None, None)
        .performance(3, Some(14), None, None)
        .rir(4)
        .form(FormQuality::Excellent)
        .completed(true)
        .felt_pain()
        .build()
        .unwrap();

    let recommendation = analyzer().analyze(
        Some(&solid_mastery("pushup", 10, true)),
        &[log],
        pushup,
        &[],
    );

    assert!((recommendation.confidence - 1.0).abs() < f64::EPSILON);
    assert!(matches!(
        recommendation.change,
        ProgressionChange::RegressVariation { .. } | ProgressionChange::ReduceReps { .. }
    ));
}

#[test]
fn two_failed_completions_regress_with_high_confidence() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    let failed = || {
        ExerciseLogBuilder::new("pushup")
            .prescription(3, Some(12), None, None)
            .performance(2, Some(6), None, None)
            .rir(1)
            .form(FormQuality::Fair)
            .completed(false)
            .build()
            .unwrap()
    };
    let window = vec![common::completed_entry("pushup", 2, FormQuality::Good), failed(), failed()];

    let recommendation = analyzer().analyze(None, &window, pushup, &[]);
    assert!((recommendation.confidence - 0.9).abs() < f64::EPSILON);
    assert_eq!(
        recommendation.change,
        ProgressionChange::RegressVariation {
            to: "knee_pushup".into()
        }
    );
}

#[test]
fn repeated_too_hard_reports_regress() {
    let catalog = ExerciseCatalog::builtin();
    let crunch = catalog.get("bicycle_crunch").unwrap();

    let hard = || {
        ExerciseLogBuilder::new("bicycle_crunch")
            .prescription(3, Some(12), None, None)
            .performance(3, Some(12), None, None)
            .form(FormQuality::Good)
            .completed(true)
            .too_hard()
            .build()
            .unwrap()
    };
    let window = vec![hard(), hard()];

    let recommendation = analyzer().analyze(None, &window, crunch, &[]);
    assert!((recommendation.confidence - 0.85).abs() < f64::EPSILON);
    // No easier variation is linked, so the reps come down instead.
    assert_eq!(recommendation.change, ProgressionChange::ReduceReps { by: 3 });
}

#[test]
fn rep_reduction_respects_the_floor() {
    let catalog = ExerciseCatalog::builtin();
    let crunch = catalog.get("bicycle_crunch").unwrap();

    let hard = || {
        ExerciseLogBuilder::new("bicycle_crunch")
            .prescription(3, Some(6), None, None)
            .performance(2, Some(4), None, None)
            .form(FormQuality::Fair)
            .completed(true)
            .too_hard()
            .build()
            .unwrap()
    };
    let recommendation = analyzer().analyze(None, &[hard(), hard()], crunch, &[]);
    assert_eq!(recommendation.change, ProgressionChange::ReduceReps { by: 1 });
}

#[test]
fn consistent_high_rir_progresses_with_confidence() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    let window: Vec<_> = (0..3)
        .map(|_| common::completed_entry("pushup", 4, FormQuality::Good))
        .collect();

    let recommendation = analyzer().analyze(
        Some(&solid_mastery("pushup", 3, true)),
        &window,
        pushup,
        &[],
    );

    assert!(recommendation.confidence >= 0.7);
    assert_eq!(
        recommendation.change,
        ProgressionChange::ProgressVariation {
            to: "decline_pushup".into()
        }
    );
}

#[test]
fn progression_without_ready_form_adds_reps_instead() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    let window: Vec<_> = (0..3)
        .map(|_| common::completed_entry("pushup", 4, FormQuality::Good))
        .collect();

    let recommendation = analyzer().analyze(
        Some(&solid_mastery("pushup", 5, false)),
        &window,
        pushup,
        &[],
    );
    assert_eq!(recommendation.change, ProgressionChange::AddReps { by: 3 });
}

#[test]
fn too_few_sessions_never_progress() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    let window: Vec<_> = (0..2)
        .map(|_| common::completed_entry("pushup", 4, FormQuality::Excellent))
        .collect();

    let recommendation = analyzer().analyze(
        Some(&solid_mastery("pushup", 2, true)),
        &window,
        pushup,
        &[],
    );
    assert_eq!(recommendation.change, ProgressionChange::Maintain);
}

#[test]
fn all_sessions_at_failure_regress() {
    let catalog = ExerciseCatalog::builtin();
    let crunch = catalog.get("bicycle_crunch").unwrap();

    let exhausted = || {
        ExerciseLogBuilder::new("bicycle_crunch")
            .prescription(3, Some(12), None, None)
            .performance(3, Some(12), None, None)
            .rir(0)
            .form(FormQuality::Good)
            .completed(true)
            .build()
            .unwrap()
    };
    let window = vec![exhausted(), exhausted(), exhausted()];

    let recommendation = analyzer().analyze(None, &window, crunch, &[]);
    assert!((recommendation.confidence - 0.75).abs() < f64::EPSILON);
}

#[test]
fn unremarkable_history_maintains() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();

    let window = vec![
        common::completed_entry("pushup", 2, FormQuality::Good),
        common::completed_entry("pushup", 3, FormQuality::Good),
    ];
    let recommendation = analyzer().analyze(
        Some(&solid_mastery("pushup", 8, true)),
        &window,
        pushup,
        &[],
    );
    assert_eq!(recommendation.change, ProgressionChange::Maintain);
}
