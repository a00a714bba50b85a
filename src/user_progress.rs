// ABOUTME: Post-workout updates to one person's profile: mastery, consistency, recovery, abilities
// ABOUTME: Log entries are applied in order; running averages and streaks are not commutative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # User Progress Tracker
//!
//! Applies one completed workout log to one person's profile and returns the
//! updated copy. The caller must serialize updates for the same person;
//! updates for the two partners are independent and may run in either order.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::catalog::ExerciseCatalog;
use crate::config::TrackerConfig;
use crate::errors::{AppError, AppResult};
use crate::models::exercise::{ExerciseDefinition, FoundationalMovement};
use crate::models::user_profile::{
    ExerciseMastery, FatigueLevel, ProgressionRate, UserProgressProfile,
};
use crate::models::workout::{ExerciseLog, FormQuality, WorkoutLog};
use crate::physiological_constants::{ability, consistency, fatigue, progression, rir};

/// Number of whole-week counts retained for frequency analysis
const WEEKLY_COUNT_RETENTION: usize = 8;

/// Tracker that folds workout logs into a person's progress profile
#[derive(Debug, Clone)]
pub struct UserProgressTracker {
    catalog: Arc<ExerciseCatalog>,
    config: TrackerConfig,
}

impl UserProgressTracker {
    /// Create a tracker over a catalog with the given configuration
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>, config: TrackerConfig) -> Self {
        Self { catalog, config }
    }

    /// Apply one workout log to the profile and return the updated copy
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the log belongs to a different
    /// person than the profile; that is a caller bug.
    pub fn update_after_workout(
        &self,
        profile: &UserProgressProfile,
        workout: &WorkoutLog,
    ) -> AppResult<UserProgressProfile> {
        if workout.user_id != profile.user_id {
            return Err(AppError::invalid_input(format!(
                "workout {} belongs to {}, not {}",
                workout.workout_id, workout.user_id, profile.user_id
            ))
            .with_user_id(profile.user_id));
        }

        let session_time = workout.completed_at.unwrap_or(workout.started_at);
        let mut updated = profile.clone();
        let mut workout_delta = 0.0;

        for entry in &workout.entries {
            if entry.skipped {
                continue;
            }
            let Some(exercise) = self.catalog.get(&entry.exercise_id) else {
                // Unknown catalog id: skip the entry, not the whole update.
                debug!(exercise = %entry.exercise_id, "log entry references unknown exercise");
                continue;
            };

            update_mastery(&mut updated, entry, session_time);
            update_foundational_capacity(&mut updated, entry, exercise);
            accumulate_fatigue(&mut updated, entry, exercise);
            workout_delta += apply_ability_adjustment(&mut updated, entry, exercise);
        }

        update_consistency(&mut updated, session_time, self.config.streak_window_days);
        updated.recovery.overall = bucket_fatigue(updated.recovery.average_fatigue());
        updated.recovery.last_updated = Some(session_time);
        update_progression_rate(&mut updated, workout_delta);
        updated.updated_at = session_time;

        debug!(
            user = %updated.user_id,
            streak = updated.consistency.current_streak,
            fatigue = ?updated.recovery.overall,
            delta = workout_delta,
            "profile updated after workout"
        );
        Ok(updated)
    }

    /// Decay fatigue for time elapsed since the last update
    ///
    /// Called when a profile is reloaded; fatigue decays exponentially,
    /// retaining a fixed fraction per 24 hours of rest.
    #[must_use]
    pub fn decay_fatigue(
        &self,
        profile: &UserProgressProfile,
        now: DateTime<Utc>,
    ) -> UserProgressProfile {
        let mut updated = profile.clone();
        let Some(last) = updated.recovery.last_updated else {
            return updated;
        };

        let hours = (now - last).num_minutes() as f64 / 60.0;
        if hours <= 0.0 {
            return updated;
        }

        let factor = self.config.daily_fatigue_retention.powf(hours / 24.0);
        for value in updated.recovery.muscle_fatigue.values_mut() {
            *value *= factor;
        }
        updated.recovery.overall = bucket_fatigue(updated.recovery.average_fatigue());
        updated.recovery.last_updated = Some(now);
        updated
    }

    /// Human-readable progress lines for one person
    #[must_use]
    pub fn progress_summary(&self, profile: &UserProgressProfile) -> Vec<String> {
        let mut lines = vec![
            format!(
                "{} workout streak, {} this week",
                profile.consistency.current_streak, profile.consistency.workouts_this_week
            ),
            format!("recovery: {:?}", profile.recovery.overall),
        ];

        let mut best: Vec<&ExerciseMastery> = profile.exercise_mastery.values().collect();
        best.sort_by(|a, b| b.times_performed.cmp(&a.times_performed));
        if let Some(top) = best.first() {
            let name = self
                .catalog
                .get(&top.exercise_id)
                .map_or(top.exercise_id.clone(), |e| e.name.clone());
            lines.push(format!(
                "most practiced: {name} ({} sessions, best {} reps)",
                top.times_performed, top.personal_best_reps
            ));
        }
        lines
    }
}

/// Running-average mastery update; creates the record on first log
fn update_mastery(
    profile: &mut UserProgressProfile,
    entry: &ExerciseLog,
    session_time: DateTime<Utc>,
) {
    let reps = entry.actual_reps.unwrap_or(0);
    let form_score = entry.form_quality.score();

    if let Some(mastery) = profile.exercise_mastery.get_mut(&entry.exercise_id) {
        let n = f64::from(mastery.times_performed);
        mastery.average_rir = (mastery.average_rir * n + f64::from(entry.rir)) / (n + 1.0);
        mastery.average_form = (mastery.average_form * n + form_score) / (n + 1.0);
        mastery.times_performed += 1;
        mastery.personal_best_reps = mastery.personal_best_reps.max(reps);
        mastery.last_performed = session_time;
        mastery.form_ready_for_progression = mastery.average_form
            >= progression::FORM_PROGRESSION_THRESHOLD
            && mastery.times_performed >= 2
            && !entry.felt_pain;
    } else {
        profile.exercise_mastery.insert(
            entry.exercise_id.clone(),
            ExerciseMastery::first(
                entry.exercise_id.clone(),
                f64::from(entry.rir),
                form_score,
                reps,
                session_time,
            ),
        );
    }
}

/// Record newly demonstrated foundational capacity
fn update_foundational_capacity(
    profile: &mut UserProgressProfile,
    entry: &ExerciseLog,
    exercise: &ExerciseDefinition,
) {
    if !entry.completed {
        return;
    }
    match exercise.foundational_requirement {
        Some(FoundationalMovement::PushUp) => {
            if let Some(reps) = entry.actual_reps {
                profile.abilities.max_pushups = profile.abilities.max_pushups.max(reps);
            }
        }
        Some(FoundationalMovement::Squat) => {
            if let Some(reps) = entry.actual_reps {
                profile.abilities.max_squats = profile.abilities.max_squats.max(reps);
            }
        }
        Some(FoundationalMovement::Plank) => {
            if let Some(seconds) = entry.actual_duration_seconds {
                profile.abilities.plank_hold_seconds =
                    profile.abilities.plank_hold_seconds.max(seconds);
            }
        }
        None => {}
    }
}

/// Fatigue accumulation: primary and secondary muscles plus effort bonuses
fn accumulate_fatigue(
    profile: &mut UserProgressProfile,
    entry: &ExerciseLog,
    exercise: &ExerciseDefinition,
) {
    let mut bonus = 0.0;
    if f64::from(entry.rir) <= rir::PRODUCTIVE_RIR_MIN {
        bonus += fatigue::NEAR_FAILURE_BONUS;
    }
    if entry.actual_reps.unwrap_or(0) >= fatigue::HIGH_REP_THRESHOLD {
        bonus += fatigue::HIGH_REP_BONUS;
    }

    let add = |slot: &mut f64, amount: f64| {
        *slot = (*slot + amount).min(fatigue::FATIGUE_CAP);
    };

    add(
        profile
            .recovery
            .muscle_fatigue
            .entry(exercise.muscle_group)
            .or_insert(0.0),
        fatigue::PRIMARY_MUSCLE_FATIGUE + bonus,
    );
    for secondary in &exercise.secondary_muscles {
        add(
            profile.recovery.muscle_fatigue.entry(*secondary).or_insert(0.0),
            fatigue::SECONDARY_MUSCLE_FATIGUE + bonus / 2.0,
        );
    }
}

/// Signed ability adjustment for one entry; returns the applied delta
fn apply_ability_adjustment(
    profile: &mut UserProgressProfile,
    entry: &ExerciseLog,
    exercise: &ExerciseDefinition,
) -> f64 {
    let base = if !entry.completed {
        ability::INCOMPLETE_WORK_DELTA
    } else if (rir::PRODUCTIVE_RIR_MIN..=rir::PRODUCTIVE_RIR_MAX).contains(&f64::from(entry.rir)) {
        ability::CHALLENGING_WORK_DELTA
    } else {
        ability::EASY_WORK_DELTA
    };

    let form_bonus = if entry.completed && entry.form_quality == FormQuality::Excellent {
        ability::EXCELLENT_FORM_BONUS
    } else {
        0.0
    };

    let delta = (base + form_bonus) * f64::from(exercise.difficulty) / 5.0;
    profile.abilities.adjust_strength(exercise.muscle_group, delta);
    delta
}

/// Streak, weekly and monthly counters, and the rolling weekly history
fn update_consistency(
    profile: &mut UserProgressProfile,
    session_time: DateTime<Utc>,
    streak_window_days: i64,
) {
    let metrics = &mut profile.consistency;

    match metrics.last_workout_at {
        Some(last) if (session_time - last).num_days() <= streak_window_days => {
            metrics.current_streak += 1;
        }
        _ => metrics.current_streak = 1,
    }
    metrics.longest_streak = metrics.longest_streak.max(metrics.current_streak);

    let same_week = metrics
        .last_workout_at
        .is_some_and(|last| last.iso_week() == session_time.iso_week());
    if same_week {
        metrics.workouts_this_week += 1;
    } else {
        if metrics.last_workout_at.is_some() {
            metrics.recent_weekly_counts.push(metrics.workouts_this_week);
            let overflow = metrics
                .recent_weekly_counts
                .len()
                .saturating_sub(WEEKLY_COUNT_RETENTION);
            metrics.recent_weekly_counts.drain(..overflow);
        }
        metrics.workouts_this_week = 1;
    }

    let same_month = metrics.last_workout_at.is_some_and(|last| {
        last.month() == session_time.month() && last.year() == session_time.year()
    });
    metrics.workouts_this_month = if same_month {
        metrics.workouts_this_month + 1
    } else {
        1
    };

    metrics.last_workout_at = Some(session_time);
}

/// Bucket the per-muscle fatigue average into the four levels
fn bucket_fatigue(average: f64) -> FatigueLevel {
    if average > fatigue::EXHAUSTED_THRESHOLD {
        FatigueLevel::Exhausted
    } else if average > fatigue::FATIGUED_THRESHOLD {
        FatigueLevel::Fatigued
    } else if average > fatigue::MODERATE_THRESHOLD {
        FatigueLevel::Moderate
    } else {
        FatigueLevel::Fresh
    }
}

/// Maintain the delta window and classify the progression rate
fn update_progression_rate(profile: &mut UserProgressProfile, workout_delta: f64) {
    profile.ability_delta_window.push(workout_delta);
    let overflow = profile
        .ability_delta_window
        .len()
        .saturating_sub(consistency::PROGRESSION_RATE_WINDOW);
    profile.ability_delta_window.drain(..overflow);

    let sum: f64 = profile.ability_delta_window.iter().sum();
    profile.progression_rate = if sum > consistency::IMPROVING_DELTA {
        ProgressionRate::Improving
    } else if sum < consistency::DECLINING_DELTA {
        ProgressionRate::Declining
    } else {
        ProgressionRate::Steady
    };
}
