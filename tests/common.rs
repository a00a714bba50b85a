// ABOUTME: Shared fixtures for tandem-engine integration tests
// ABOUTME: Builds profiles, couples, logs, and a seeded catalog without touching the clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use tandem_engine::models::couple_profile::CoupleProgressProfile;
use tandem_engine::models::exercise::MuscleGroup;
use tandem_engine::models::user_profile::UserProgressProfile;
use tandem_engine::models::workout::{
    ExerciseLog, ExerciseLogBuilder, FormQuality, PairingStrategy, WorkoutLog,
};

/// Fixed reference instant so tests never depend on the wall clock
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 18, 0, 0).unwrap()
}

pub fn days_after(days: i64) -> DateTime<Utc> {
    t0() + chrono::Duration::days(days)
}

/// Profile with moderate, identical-by-construction abilities
pub fn profile(user_id: Uuid) -> UserProgressProfile {
    let mut profile = UserProgressProfile::new(user_id, t0());
    profile.abilities.max_pushups = 15;
    profile.abilities.plank_hold_seconds = 60;
    profile.abilities.max_squats = 25;
    for group in [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::Legs,
        MuscleGroup::Glutes,
    ] {
        profile.abilities.strength.insert(group, 50.0);
    }
    profile
}

/// Profile noticeably stronger than [`profile`] across every dimension
pub fn stronger_profile(user_id: Uuid) -> UserProgressProfile {
    let mut profile = profile(user_id);
    profile.abilities.max_pushups = 45;
    profile.abilities.plank_hold_seconds = 180;
    profile.abilities.max_squats = 60;
    for value in profile.abilities.strength.values_mut() {
        *value = 85.0;
    }
    profile.abilities.cardio_endurance = 85.0;
    profile
}

pub fn couple(
    couple_id: Uuid,
    profile_a: &UserProgressProfile,
    profile_b: &UserProgressProfile,
) -> CoupleProgressProfile {
    CoupleProgressProfile::new(couple_id, profile_a.user_id, profile_b.user_id, t0())
}

/// One completed, unremarkable entry for the given exercise
pub fn completed_entry(exercise_id: &str, rir: u8, form: FormQuality) -> ExerciseLog {
    ExerciseLogBuilder::new(exercise_id)
        .prescription(3, Some(10), None, None)
        .performance(3, Some(10), None, None)
        .rir(rir)
        .form(form)
        .completed(true)
        .build()
        .unwrap()
}

/// A sealed workout log containing the given entries
pub fn workout_log(
    couple_id: Uuid,
    user_id: Uuid,
    entries: Vec<ExerciseLog>,
    completed_at: DateTime<Utc>,
) -> WorkoutLog {
    let mut log = WorkoutLog::begin(
        Uuid::new_v4(),
        couple_id,
        user_id,
        PairingStrategy::SameExercise,
        completed_at - chrono::Duration::minutes(40),
    );
    for entry in entries {
        log.append(entry).unwrap();
    }
    log.complete(completed_at);
    log
}
