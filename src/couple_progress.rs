// ABOUTME: Post-workout updates to the shared couple profile: gap history, trend, milestones
// ABOUTME: Runs only after both individual profile updates complete, since it reads both
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Couple Progress Tracker
//!
//! Maintains the shared half of the data model after each joint workout:
//! the fitness-gap history and trend, the pairing-strategy history, partner
//! comfort and competitiveness scores, and the milestone list. Every
//! milestone fires at most once.

use chrono::{DateTime, Datelike, Utc};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::models::couple_profile::{
    AchievedMilestone, CoupleProgressProfile, GapSnapshot, GapTrend, MilestoneKind, StrategyRecord,
};
use crate::models::feedback::WorkoutFeedback;
use crate::models::user_profile::UserProgressProfile;
use crate::models::workout::{PairingStrategy, WorkoutLog};
use crate::pairing::fitness_gap::calculate_fitness_gap;
use crate::physiological_constants::{comfort, trend};

/// Gap magnitude that must have been exceeded before `GapClosed` can fire
const GAP_CLOSED_PRIOR_MAGNITUDE: f64 = 25.0;
/// Gap magnitude under which `GapClosed` fires
const GAP_CLOSED_TARGET: f64 = 10.0;
/// Mutual comfort at which `ComfortEstablished` fires
const COMFORT_ESTABLISHED: f64 = 4.0;
/// Weekly joint workouts that keep a rhythm streak alive
const RHYTHM_WORKOUTS_PER_WEEK: u32 = 2;

/// Tracker that folds a joint session into the couple profile
#[derive(Debug, Clone, Default)]
pub struct CoupleProgressTracker;

impl CoupleProgressTracker {
    /// Create a tracker
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply one joint workout to the couple profile and return the updated copy
    ///
    /// `profile_a` and `profile_b` must be the partners' profiles after their
    /// individual updates for this session. Feedback is optional; without it,
    /// comfort and competitiveness are left untouched and enjoyment defaults
    /// to neutral.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the workout or profiles do not
    /// belong to this couple.
    #[allow(clippy::too_many_arguments)]
    pub fn update_after_workout(
        &self,
        couple: &CoupleProgressProfile,
        workout: &WorkoutLog,
        profile_a: &UserProgressProfile,
        profile_b: &UserProgressProfile,
        strategy: PairingStrategy,
        feedback_a: Option<&WorkoutFeedback>,
        feedback_b: Option<&WorkoutFeedback>,
    ) -> AppResult<CoupleProgressProfile> {
        validate_membership(couple, workout, profile_a, profile_b)?;

        let session_time = workout.completed_at.unwrap_or(workout.started_at);
        let mut updated = couple.clone();

        record_gap_snapshot(&mut updated, profile_a, profile_b, session_time);
        updated.gap_trend = classify_gap_trend(&updated.fitness_gap_history);

        record_strategy(&mut updated, strategy, feedback_a, feedback_b, session_time);
        nudge_comfort(&mut updated, feedback_a, feedback_b);
        if strategy == PairingStrategy::Competitive {
            nudge_competitiveness(&mut updated, feedback_a, feedback_b);
        }

        update_joint_counts(&mut updated, session_time);
        evaluate_milestones(&mut updated, session_time);

        updated.updated_at = session_time;
        debug!(
            couple = %updated.couple_id,
            gap = ?updated.latest_gap(),
            trend = ?updated.gap_trend,
            workouts = updated.joint_workout_count,
            "couple profile updated"
        );
        Ok(updated)
    }
}

fn validate_membership(
    couple: &CoupleProgressProfile,
    workout: &WorkoutLog,
    profile_a: &UserProgressProfile,
    profile_b: &UserProgressProfile,
) -> AppResult<()> {
    if workout.couple_id != couple.couple_id {
        return Err(AppError::invalid_input(format!(
            "workout {} belongs to couple {}, not {}",
            workout.workout_id, workout.couple_id, couple.couple_id
        ))
        .with_couple_id(couple.couple_id));
    }
    if profile_a.user_id != couple.user_a || profile_b.user_id != couple.user_b {
        return Err(AppError::invalid_input(format!(
            "profiles {} / {} do not match couple {}",
            profile_a.user_id, profile_b.user_id, couple.couple_id
        ))
        .with_couple_id(couple.couple_id));
    }
    Ok(())
}

/// Append a gap snapshot, keeping bounded retention
fn record_gap_snapshot(
    couple: &mut CoupleProgressProfile,
    profile_a: &UserProgressProfile,
    profile_b: &UserProgressProfile,
    at: DateTime<Utc>,
) {
    let gap = calculate_fitness_gap(profile_a, profile_b);
    couple.fitness_gap_history.push(GapSnapshot {
        recorded_at: at,
        gap,
    });
    let overflow = couple
        .fitness_gap_history
        .len()
        .saturating_sub(trend::GAP_HISTORY_RETENTION);
    couple.fitness_gap_history.drain(..overflow);
}

/// Compare absolute gaps across the trend window
fn classify_gap_trend(history: &[GapSnapshot]) -> GapTrend {
    let window_start = history.len().saturating_sub(trend::TREND_WINDOW);
    let window = &history[window_start..];
    if window.len() < 2 {
        return GapTrend::Stable;
    }

    let first = window[0].gap.abs();
    let last = window[window.len() - 1].gap.abs();
    let net = last - first;

    if net > trend::TREND_DELTA {
        GapTrend::Widening
    } else if net < -trend::TREND_DELTA {
        GapTrend::Closing
    } else {
        GapTrend::Stable
    }
}

/// Append a strategy record scored by average partner enjoyment
fn record_strategy(
    couple: &mut CoupleProgressProfile,
    strategy: PairingStrategy,
    feedback_a: Option<&WorkoutFeedback>,
    feedback_b: Option<&WorkoutFeedback>,
    at: DateTime<Utc>,
) {
    let ratings: Vec<f64> = [feedback_a, feedback_b]
        .iter()
        .flatten()
        .map(|f| f64::from(f.enjoyment))
        .collect();
    let enjoyment = if ratings.is_empty() {
        3.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    couple.strategy_history.push(StrategyRecord {
        strategy,
        recorded_at: at,
        enjoyment,
    });
    let overflow = couple
        .strategy_history
        .len()
        .saturating_sub(trend::STRATEGY_HISTORY_RETENTION);
    couple.strategy_history.drain(..overflow);
}

/// Move comfort toward 5 on strong connection ratings and toward 1 on weak ones
fn nudge_comfort(
    couple: &mut CoupleProgressProfile,
    feedback_a: Option<&WorkoutFeedback>,
    feedback_b: Option<&WorkoutFeedback>,
) {
    for (feedback, is_a) in [(feedback_a, true), (feedback_b, false)] {
        let Some(feedback) = feedback else { continue };
        if feedback.partner_connection >= comfort::POSITIVE_CONNECTION_RATING {
            couple.partner_comfort.nudge(is_a, comfort::NUDGE_STEP);
        } else if feedback.partner_connection <= comfort::NEGATIVE_CONNECTION_RATING {
            couple.partner_comfort.nudge(is_a, -comfort::NUDGE_STEP);
        }
    }
}

/// Competitiveness moves only after competitive sessions
fn nudge_competitiveness(
    couple: &mut CoupleProgressProfile,
    feedback_a: Option<&WorkoutFeedback>,
    feedback_b: Option<&WorkoutFeedback>,
) {
    for (feedback, is_a) in [(feedback_a, true), (feedback_b, false)] {
        let Some(feedback) = feedback else { continue };
        if feedback.enjoyment >= comfort::POSITIVE_CONNECTION_RATING {
            couple.competitiveness.nudge(is_a, comfort::NUDGE_STEP);
        } else if feedback.enjoyment <= comfort::NEGATIVE_CONNECTION_RATING {
            couple.competitiveness.nudge(is_a, -comfort::NUDGE_STEP);
        }
    }
}

/// Total and per-week joint workout counts
fn update_joint_counts(couple: &mut CoupleProgressProfile, at: DateTime<Utc>) {
    couple.joint_workout_count += 1;

    let same_week = couple.weekly_joint_counts.last().is_some()
        && couple.updated_at.iso_week() == at.iso_week();
    if same_week {
        if let Some(current) = couple.weekly_joint_counts.last_mut() {
            *current += 1;
        }
    } else {
        couple.weekly_joint_counts.push(1);
        let overflow = couple.weekly_joint_counts.len().saturating_sub(16);
        couple.weekly_joint_counts.drain(..overflow);
    }
}

/// Evaluate every milestone not yet achieved; each fires at most once
fn evaluate_milestones(couple: &mut CoupleProgressProfile, at: DateTime<Utc>) {
    let candidates = [
        (
            MilestoneKind::FirstJointWorkout,
            couple.joint_workout_count >= 1,
            "completed your first workout together".to_owned(),
        ),
        (
            MilestoneKind::TenJointWorkouts,
            couple.joint_workout_count >= 10,
            "10 workouts together".to_owned(),
        ),
        (
            MilestoneKind::TwentyFiveJointWorkouts,
            couple.joint_workout_count >= 25,
            "25 workouts together".to_owned(),
        ),
        (
            MilestoneKind::FiftyJointWorkouts,
            couple.joint_workout_count >= 50,
            "50 workouts together".to_owned(),
        ),
        (
            MilestoneKind::HundredJointWorkouts,
            couple.joint_workout_count >= 100,
            "100 workouts together".to_owned(),
        ),
        (
            MilestoneKind::GapClosed,
            gap_closed(couple),
            "closed the fitness gap between you".to_owned(),
        ),
        (
            MilestoneKind::ComfortEstablished,
            couple.partner_comfort.mutual() >= COMFORT_ESTABLISHED,
            "fully comfortable training as partners".to_owned(),
        ),
        (
            MilestoneKind::FourWeekRhythm,
            rhythm_weeks(couple) >= 4,
            "four straight weeks of regular training together".to_owned(),
        ),
        (
            MilestoneKind::TwelveWeekRhythm,
            rhythm_weeks(couple) >= 12,
            "twelve straight weeks of regular training together".to_owned(),
        ),
    ];

    for (kind, satisfied, description) in candidates {
        if satisfied && !couple.has_milestone(kind) {
            info!(couple = %couple.couple_id, ?kind, "milestone unlocked");
            couple.milestones.push(AchievedMilestone {
                kind,
                achieved_at: at,
                description,
            });
        }
    }
}

/// The gap is closed when it sits under the target after having been wide
fn gap_closed(couple: &CoupleProgressProfile) -> bool {
    let Some(latest) = couple.latest_gap() else {
        return false;
    };
    latest.abs() < GAP_CLOSED_TARGET
        && couple
            .fitness_gap_history
            .iter()
            .any(|s| s.gap.abs() >= GAP_CLOSED_PRIOR_MAGNITUDE)
}

/// Consecutive completed weeks, newest backwards, meeting the rhythm floor
fn rhythm_weeks(couple: &CoupleProgressProfile) -> usize {
    couple
        .weekly_joint_counts
        .iter()
        .rev()
        .take_while(|&&count| count >= RHYTHM_WORKOUTS_PER_WEEK)
        .count()
}
