// ABOUTME: Unit tests for feedback fusion: signals, preferences, warnings, priorities
// ABOUTME: Pain reports always produce the highest-priority recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use tandem_engine::catalog::ExerciseCatalog;
use tandem_engine::config::ProgressionConfig;
use tandem_engine::feedback::{FeedbackInput, FeedbackProcessor};
use tandem_engine::models::couple_profile::StrategyRecord;
use tandem_engine::models::feedback::{
    FocusArea, IntensityShift, PerceivedDifficulty, RecommendationPriority, WorkoutFeedback,
};
use tandem_engine::models::workout::{
    ExerciseLog, ExerciseLogBuilder, FormQuality, PairingStrategy, WorkoutLog,
};
use tandem_engine::progression::ProgressionAnalyzer;

fn processor() -> FeedbackProcessor {
    let catalog = Arc::new(ExerciseCatalog::builtin());
    let progression = ProgressionAnalyzer::new(Arc::clone(&catalog), ProgressionConfig::default());
    FeedbackProcessor::new(catalog, progression)
}

fn feedback_for(
    log: &WorkoutLog,
    enjoyment: u8,
    difficulty: PerceivedDifficulty,
    connection: u8,
) -> WorkoutFeedback {
    WorkoutFeedback {
        user_id: log.user_id,
        workout_id: log.workout_id,
        enjoyment,
        perceived_difficulty: difficulty,
        partner_connection: connection,
        comments: None,
    }
}

#[test]
fn pain_produces_the_top_priority_recommendation() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let painful = ExerciseLogBuilder::new("pushup")
        .prescription(3, Some(10), None, None)
        .performance(3, Some(10), None, None)
        .rir(3)
        .form(FormQuality::Good)
        .completed(true)
        .felt_pain()
        .build()
        .unwrap();
    let log = common::workout_log(couple.couple_id, profile.user_id, vec![painful], common::t0());
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 4);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    let first = processed.recommendations.first().unwrap();
    assert_eq!(first.priority, RecommendationPriority::High);
    assert!(first.message.contains("Push-Up"));
    assert!(!processed.warnings.is_empty());
}

#[test]
fn too_easy_sessions_raise_the_intensity_preference() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![common::completed_entry("pushup", 4, FormQuality::Good)],
        common::t0(),
    );
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::TooEasy, 4);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    assert_eq!(processed.intensity_preference, IntensityShift::Higher);
    assert!((processed.couple_adjustments.intensity_adjustment - 0.10).abs() < f64::EPSILON);
}

#[test]
fn enjoyable_completed_exercises_become_liked() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![
            common::completed_entry("pushup", 2, FormQuality::Good),
            common::completed_entry("bodyweight_squat", 2, FormQuality::Good),
        ],
        common::t0(),
    );
    let feedback = feedback_for(&log, 5, PerceivedDifficulty::JustRight, 4);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    assert!(processed.new_liked.contains(&"pushup".to_owned()));
    assert!(processed.new_liked.contains(&"bodyweight_squat".to_owned()));
    assert!(processed.new_disliked.is_empty());
}

#[test]
fn repeatedly_skipped_exercises_become_disliked() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let skipped = ExerciseLogBuilder::new("burpee").skipped().build().unwrap();
    let log = common::workout_log(couple.couple_id, profile.user_id, vec![skipped.clone()], common::t0());
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 4);

    let mut history: HashMap<String, Vec<ExerciseLog>> = HashMap::new();
    history.insert("burpee".into(), vec![skipped.clone(), skipped]);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &history,
            available_equipment: &[],
        })
        .unwrap();

    assert!(processed.new_disliked.contains(&"burpee".to_owned()));
}

#[test]
fn implicit_signals_reflect_the_log() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let skipped = ExerciseLogBuilder::new("burpee").skipped().build().unwrap();
    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![
            common::completed_entry("pushup", 2, FormQuality::Good),
            common::completed_entry("plank", 2, FormQuality::Good),
            skipped,
        ],
        common::t0(),
    );
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 4);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    assert!((processed.implicit.completion_rate - 1.0).abs() < f64::EPSILON);
    assert!((processed.implicit.skip_rate - 1.0 / 3.0).abs() < 1e-9);
    assert!((processed.implicit.average_rir.unwrap() - 2.0).abs() < f64::EPSILON);
}

#[test]
fn poorly_rated_strategies_land_on_the_avoid_list() {
    let profile = common::profile(Uuid::new_v4());
    let couple_base = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let mut couple = couple_base;
    for week in 0..3 {
        couple.strategy_history.push(StrategyRecord {
            strategy: PairingStrategy::Competitive,
            recorded_at: common::days_after(week * 7),
            enjoyment: 1.5,
        });
        couple.strategy_history.push(StrategyRecord {
            strategy: PairingStrategy::PartnerInteractive,
            recorded_at: common::days_after(week * 7),
            enjoyment: 4.5,
        });
    }

    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 4);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    assert!(processed
        .couple_adjustments
        .avoid_strategies
        .contains(&PairingStrategy::Competitive));
    assert!(processed
        .couple_adjustments
        .prefer_strategies
        .contains(&PairingStrategy::PartnerInteractive));
}

#[test]
fn weak_connection_becomes_a_focus_area() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );
    let feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 2);

    let processed = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap();

    assert!(processed
        .couple_adjustments
        .focus_areas
        .contains(&FocusArea::PartnerConnection));
}

#[test]
fn mismatched_feedback_owner_is_rejected() {
    let profile = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile, &common::profile(Uuid::new_v4()));
    let log = common::workout_log(
        couple.couple_id,
        profile.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );
    let mut feedback = feedback_for(&log, 3, PerceivedDifficulty::JustRight, 4);
    feedback.user_id = Uuid::new_v4();

    let error = processor()
        .process_workout_feedback(&FeedbackInput {
            profile: &profile,
            couple: &couple,
            workout: &log,
            feedback: &feedback,
            recent_exercise_logs: &HashMap::new(),
            available_equipment: &[],
        })
        .unwrap_err();
    assert_eq!(error.code, tandem_engine::ErrorCode::InvalidInput);
}
