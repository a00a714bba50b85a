// ABOUTME: Unit tests for couple-level updates: gap history, trend, comfort, milestones
// ABOUTME: Mutual comfort must equal the minimum of the two individual scores after any update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::couple_progress::CoupleProgressTracker;
use tandem_engine::models::couple_profile::{GapSnapshot, GapTrend, MilestoneKind};
use tandem_engine::models::feedback::{PerceivedDifficulty, WorkoutFeedback};
use tandem_engine::models::workout::{FormQuality, PairingStrategy};

fn feedback(user_id: Uuid, workout_id: Uuid, enjoyment: u8, connection: u8) -> WorkoutFeedback {
    WorkoutFeedback {
        user_id,
        workout_id,
        enjoyment,
        perceived_difficulty: PerceivedDifficulty::JustRight,
        partner_connection: connection,
        comments: None,
    }
}

#[test]
fn joint_workout_appends_gap_snapshot_and_first_milestone() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::stronger_profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    let log = common::workout_log(
        couple.couple_id,
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );

    let updated = CoupleProgressTracker::new()
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::SameExercise,
            None,
            None,
        )
        .unwrap();

    assert_eq!(updated.fitness_gap_history.len(), 1);
    assert!(updated.latest_gap().unwrap() > 0.0);
    assert_eq!(updated.joint_workout_count, 1);
    assert!(updated.has_milestone(MilestoneKind::FirstJointWorkout));
}

#[test]
fn milestones_fire_exactly_once() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::profile(Uuid::new_v4());
    let mut couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    let tracker = CoupleProgressTracker::new();

    for day in 0..3 {
        let log = common::workout_log(
            couple.couple_id,
            profile_a.user_id,
            vec![common::completed_entry("pushup", 2, FormQuality::Good)],
            common::days_after(day),
        );
        couple = tracker
            .update_after_workout(
                &couple,
                &log,
                &profile_a,
                &profile_b,
                PairingStrategy::SameExercise,
                None,
                None,
            )
            .unwrap();
    }

    let first_count = couple
        .milestones
        .iter()
        .filter(|m| m.kind == MilestoneKind::FirstJointWorkout)
        .count();
    assert_eq!(first_count, 1);
}

#[test]
fn mutual_comfort_is_always_the_minimum() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::profile(Uuid::new_v4());
    let mut couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    couple.partner_comfort.person_a = 3.0;
    couple.partner_comfort.person_b = 2.0;

    let log = common::workout_log(
        couple.couple_id,
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );
    let updated = CoupleProgressTracker::new()
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::PartnerInteractive,
            Some(&feedback(profile_a.user_id, log.workout_id, 4, 5)),
            Some(&feedback(profile_b.user_id, log.workout_id, 4, 1)),
        )
        .unwrap();

    assert!((updated.partner_comfort.person_a - 3.1).abs() < f64::EPSILON);
    assert!((updated.partner_comfort.person_b - 1.9).abs() < f64::EPSILON);
    assert!(
        (updated.partner_comfort.mutual()
            - updated
                .partner_comfort
                .person_a
                .min(updated.partner_comfort.person_b))
        .abs()
            < f64::EPSILON
    );
}

#[test]
fn competitiveness_moves_only_on_competitive_sessions() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    let tracker = CoupleProgressTracker::new();
    let log = common::workout_log(
        couple.couple_id,
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );
    let loved_it = feedback(profile_a.user_id, log.workout_id, 5, 3);

    let after_plain = tracker
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::SameExercise,
            Some(&loved_it),
            None,
        )
        .unwrap();
    assert!((after_plain.competitiveness.person_a - 3.0).abs() < f64::EPSILON);

    let after_competitive = tracker
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::Competitive,
            Some(&loved_it),
            None,
        )
        .unwrap();
    assert!((after_competitive.competitiveness.person_a - 3.1).abs() < f64::EPSILON);
}

#[test]
fn gap_history_retention_is_bounded() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::profile(Uuid::new_v4());
    let mut couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    for week in 0..60 {
        couple.fitness_gap_history.push(GapSnapshot {
            recorded_at: common::days_after(i64::from(week) * 7),
            gap: 5.0,
        });
    }
    couple.fitness_gap_history.truncate(52);

    let log = common::workout_log(
        couple.couple_id,
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::days_after(500),
    );
    let updated = CoupleProgressTracker::new()
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::SameExercise,
            None,
            None,
        )
        .unwrap();
    assert_eq!(updated.fitness_gap_history.len(), 52);
}

#[test]
fn widening_gap_is_detected() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::stronger_profile(Uuid::new_v4());
    let mut couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    for (week, gap) in [2.0, 3.0, 4.0, 5.0].iter().enumerate() {
        couple.fitness_gap_history.push(GapSnapshot {
            recorded_at: common::days_after(week as i64 * 7),
            gap: *gap,
        });
    }

    let log = common::workout_log(
        couple.couple_id,
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::days_after(35),
    );
    let updated = CoupleProgressTracker::new()
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::SameExercise,
            None,
            None,
        )
        .unwrap();
    assert_eq!(updated.gap_trend, GapTrend::Widening);
}

#[test]
fn wrong_couple_is_rejected() {
    let profile_a = common::profile(Uuid::new_v4());
    let profile_b = common::profile(Uuid::new_v4());
    let couple = common::couple(Uuid::new_v4(), &profile_a, &profile_b);
    let log = common::workout_log(
        Uuid::new_v4(),
        profile_a.user_id,
        vec![common::completed_entry("pushup", 2, FormQuality::Good)],
        common::t0(),
    );

    let error = CoupleProgressTracker::new()
        .update_after_workout(
            &couple,
            &log,
            &profile_a,
            &profile_b,
            PairingStrategy::SameExercise,
            None,
            None,
        )
        .unwrap_err();
    assert_eq!(error.code, tandem_engine::ErrorCode::InvalidInput);
}
