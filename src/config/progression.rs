// ABOUTME: Progression, tracker, and periodization configuration structs
// ABOUTME: Defaults mirror the physiological constants; overrides are for tests and tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use serde::{Deserialize, Serialize};

use crate::physiological_constants::{consistency, fatigue, periodization, progression};

/// Configuration for the per-exercise progression analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Most recent logs evaluated per exercise
    pub evaluation_window: usize,
    /// Sessions required before progression is considered
    pub min_sessions_for_progression: u32,
    /// Minimum average form quality (1-4) to progress
    pub form_threshold: f64,
    /// Minimum completion rate to progress
    pub completion_rate_threshold: f64,
    /// Reps added when progressing without a variation edge
    pub rep_increase: u32,
    /// Reps removed when regressing without a variation edge
    pub rep_decrease: u32,
    /// Prescribed-rep floor for regressions
    pub min_reps: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            evaluation_window: progression::EVALUATION_WINDOW,
            min_sessions_for_progression: progression::MIN_SESSIONS_FOR_PROGRESSION,
            form_threshold: progression::FORM_PROGRESSION_THRESHOLD,
            completion_rate_threshold: progression::COMPLETION_RATE_THRESHOLD,
            rep_increase: progression::REP_INCREASE,
            rep_decrease: progression::REP_DECREASE,
            min_reps: progression::MIN_PRESCRIBED_REPS,
        }
    }
}

/// Configuration for the user progress tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Days between workouts within which a streak survives
    pub streak_window_days: i64,
    /// Fraction of fatigue retained per 24 hours of rest
    pub daily_fatigue_retention: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            streak_window_days: consistency::STREAK_WINDOW_DAYS,
            daily_fatigue_retention: fatigue::DAILY_RETENTION,
        }
    }
}

/// Configuration for the periodization manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodizationConfig {
    /// Forced deload after this many weeks without one
    pub max_weeks_without_deload: u32,
    /// Forced deload after this many consecutive plateau weeks
    pub plateau_deload_weeks: u32,
    /// Forced deload when weekly frequency drops below this fraction of the
    /// rolling average
    pub frequency_drop_ratio: f64,
}

impl Default for PeriodizationConfig {
    fn default() -> Self {
        Self {
            max_weeks_without_deload: periodization::MAX_WEEKS_WITHOUT_DELOAD,
            plateau_deload_weeks: periodization::PLATEAU_DELOAD_WEEKS,
            frequency_drop_ratio: periodization::FREQUENCY_DROP_RATIO,
        }
    }
}
