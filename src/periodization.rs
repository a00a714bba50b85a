// ABOUTME: Weekly training-phase state machine with scheduled and forced deload transitions
// ABOUTME: Adaptation -> Building (x2 consecutive) -> Peak -> Deload -> Building/Adaptation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Periodization Manager
//!
//! Advances a couple's multi-week phase plan on each weekly update and
//! forces an immediate deload when any fatigue, plateau, or frequency
//! trigger fires, regardless of position in the cycle.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::PeriodizationConfig;
use crate::models::periodization::{PeriodizationPlan, PhaseRecord, TrainingPhase};
use crate::models::user_profile::{FatigueLevel, ProgressionRate, UserProgressProfile};
use crate::physiological_constants::periodization::FREQUENCY_WINDOW_WEEKS;

/// Days within which a workout counts as recent training for plateau detection
const RECENT_TRAINING_DAYS: i64 = 14;

/// Why a deload was forced outside the scheduled cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeloadTrigger {
    /// Too many weeks have passed without a deload
    Overdue,
    /// Ability estimates have plateaued for several weeks
    Plateau,
    /// Progression is declining or fatigue is at exhaustion
    Overreached,
    /// Workout frequency dropped sharply against the rolling average
    FrequencyDrop,
}

/// Manager that advances periodization plans
#[derive(Debug, Clone)]
pub struct PeriodizationManager {
    config: PeriodizationConfig,
}

impl PeriodizationManager {
    /// Create a manager with the given configuration
    #[must_use]
    pub const fn new(config: PeriodizationConfig) -> Self {
        Self { config }
    }

    /// Advance the plan by one week and return the updated copy
    ///
    /// The profile supplies the fatigue, progression-rate, and frequency
    /// signals that drive forced deloads.
    #[must_use]
    pub fn update_plan_weekly(
        &self,
        plan: &PeriodizationPlan,
        profile: &UserProgressProfile,
        now: DateTime<Utc>,
    ) -> PeriodizationPlan {
        let mut updated = plan.clone();

        updated.week_in_phase += 1;
        if updated.current_phase != TrainingPhase::Deload {
            updated.weeks_since_deload += 1;
        }
        // A plateau requires training without improvement; idle weeks hold
        // the counter and are handled by the frequency trigger instead.
        let trained_recently = profile
            .consistency
            .last_workout_at
            .is_some_and(|last| (now - last).num_days() <= RECENT_TRAINING_DAYS);
        updated.plateau_weeks = if profile.progression_rate == ProgressionRate::Improving {
            0
        } else if trained_recently {
            updated.plateau_weeks + 1
        } else {
            updated.plateau_weeks
        };

        if updated.current_phase != TrainingPhase::Deload {
            if let Some(trigger) = self.deload_trigger(&updated, profile) {
                info!(
                    couple = %updated.couple_id,
                    ?trigger,
                    from = ?updated.current_phase,
                    "forced deload"
                );
                enter_phase(&mut updated, TrainingPhase::Deload, now, true);
                updated.updated_at = now;
                return updated;
            }
        }

        if updated.week_in_phase >= updated.current_phase.scheduled_weeks() {
            let next = next_phase(&updated, profile);
            info!(
                couple = %updated.couple_id,
                from = ?updated.current_phase,
                to = ?next,
                "phase complete"
            );
            enter_phase(&mut updated, next, now, false);
        }

        updated.updated_at = now;
        updated
    }

    /// First firing deload trigger, if any
    #[must_use]
    pub fn deload_trigger(
        &self,
        plan: &PeriodizationPlan,
        profile: &UserProgressProfile,
    ) -> Option<DeloadTrigger> {
        if plan.weeks_since_deload >= self.config.max_weeks_without_deload {
            return Some(DeloadTrigger::Overdue);
        }
        if plan.plateau_weeks >= self.config.plateau_deload_weeks {
            return Some(DeloadTrigger::Plateau);
        }
        if profile.progression_rate == ProgressionRate::Declining
            || profile.recovery.overall == FatigueLevel::Exhausted
        {
            return Some(DeloadTrigger::Overreached);
        }
        if frequency_dropped(profile, self.config.frequency_drop_ratio) {
            return Some(DeloadTrigger::FrequencyDrop);
        }
        None
    }
}

/// Record the outgoing phase and start the next one
fn enter_phase(plan: &mut PeriodizationPlan, next: TrainingPhase, now: DateTime<Utc>, forced: bool) {
    plan.phase_history.push(PhaseRecord {
        phase: plan.current_phase,
        started_at: plan.phase_started_at,
        completed_weeks: plan.week_in_phase,
        cut_short: forced,
    });

    if next == TrainingPhase::Deload {
        plan.weeks_since_deload = 0;
        plan.plateau_weeks = 0;
    }
    plan.current_phase = next;
    plan.week_in_phase = 0;
    plan.phase_started_at = now;
}

/// Scheduled successor for a completed phase
fn next_phase(plan: &PeriodizationPlan, profile: &UserProgressProfile) -> TrainingPhase {
    match plan.current_phase {
        TrainingPhase::Adaptation => TrainingPhase::Building,
        TrainingPhase::Building => {
            let previous_was_building = plan
                .phase_history
                .last()
                .is_some_and(|record| record.phase == TrainingPhase::Building && !record.cut_short);
            if previous_was_building {
                TrainingPhase::Peak
            } else {
                TrainingPhase::Building
            }
        }
        TrainingPhase::Peak => TrainingPhase::Deload,
        TrainingPhase::Deload => {
            if profile.progression_rate == ProgressionRate::Declining {
                TrainingPhase::Adaptation
            } else {
                TrainingPhase::Building
            }
        }
    }
}

/// Whether the latest whole week fell sharply below the rolling average
fn frequency_dropped(profile: &UserProgressProfile, ratio: f64) -> bool {
    let counts = &profile.consistency.recent_weekly_counts;
    if counts.len() < FREQUENCY_WINDOW_WEEKS {
        return false;
    }
    let window = &counts[counts.len() - FREQUENCY_WINDOW_WEEKS..];
    let average = window.iter().map(|&c| f64::from(c)).sum::<f64>() / window.len() as f64;
    if average < 1.0 {
        return false;
    }
    f64::from(window[window.len() - 1]) < average * ratio
}
