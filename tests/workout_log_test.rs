// ABOUTME: Unit tests for workout logs and the exercise log builder
// ABOUTME: Builder defaults fill at build(); sealed logs reject further entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::models::workout::{
    ExerciseLogBuilder, FormQuality, PairingStrategy, WorkoutLog,
};

#[test]
fn builder_infers_rir_from_flags() {
    let easy = ExerciseLogBuilder::new("pushup")
        .completed(true)
        .too_easy()
        .build()
        .unwrap();
    assert_eq!(easy.rir, 4);

    let hard = ExerciseLogBuilder::new("pushup")
        .completed(true)
        .too_hard()
        .build()
        .unwrap();
    assert_eq!(hard.rir, 0);

    let plain = ExerciseLogBuilder::new("pushup").completed(true).build().unwrap();
    assert_eq!(plain.rir, 2);
}

#[test]
fn explicit_rir_wins_over_flags() {
    let log = ExerciseLogBuilder::new("pushup")
        .rir(1)
        .too_easy()
        .completed(true)
        .build()
        .unwrap();
    assert_eq!(log.rir, 1);
}

#[test]
fn skipped_is_never_completed() {
    let log = ExerciseLogBuilder::new("pushup")
        .completed(true)
        .skipped()
        .build()
        .unwrap();
    assert!(log.skipped);
    assert!(!log.completed);
}

#[test]
fn builder_requires_an_exercise_id() {
    let error = ExerciseLogBuilder::default().build().unwrap_err();
    assert_eq!(error.code, tandem_engine::ErrorCode::MissingRequiredField);
}

#[test]
fn absurd_rir_is_rejected() {
    let error = ExerciseLogBuilder::new("pushup").rir(42).build().unwrap_err();
    assert_eq!(error.code, tandem_engine::ErrorCode::ValueOutOfRange);
}

#[test]
fn sealed_logs_reject_new_entries() {
    let mut log = WorkoutLog::begin(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        PairingStrategy::SameExercise,
        common::t0(),
    );
    log.append(common::completed_entry("pushup", 2, FormQuality::Good))
        .unwrap();
    log.complete(common::t0() + chrono::Duration::minutes(30));

    let error = log
        .append(common::completed_entry("plank", 2, FormQuality::Good))
        .unwrap_err();
    assert_eq!(error.code, tandem_engine::ErrorCode::InvalidInput);
}

#[test]
fn completion_and_skip_rates() {
    let mut log = WorkoutLog::begin(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        PairingStrategy::SameExercise,
        common::t0(),
    );
    log.append(common::completed_entry("pushup", 2, FormQuality::Good))
        .unwrap();
    log.append(
        ExerciseLogBuilder::new("plank")
            .completed(false)
            .build()
            .unwrap(),
    )
    .unwrap();
    log.append(ExerciseLogBuilder::new("burpee").skipped().build().unwrap())
        .unwrap();

    assert!((log.completion_rate() - 0.5).abs() < f64::EPSILON);
    assert!((log.skip_rate() - 1.0 / 3.0).abs() < 1e-9);
}
