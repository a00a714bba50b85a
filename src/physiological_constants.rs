// ABOUTME: Sports-science constants for paired training, progression, and recovery
// ABOUTME: Fixed values grounded in published research; tunable weights live in config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! Physiological constants based on sports science research
//!
//! This module contains scientifically-established constants used throughout
//! the pairing and progression engine. These values are based on peer-reviewed
//! research and guidelines from sports science organizations.

/// Reps-in-reserve (RIR) scale anchors
///
/// References:
/// - Zourdos, M.C. et al. (2016). Novel resistance training-specific RPE scale measuring repetitions in reserve
/// - https://pubmed.ncbi.nlm.nih.gov/26049792/
pub mod rir {
    /// RIR value reported at muscular failure
    pub const FAILURE_RIR: f64 = 0.0;

    /// RIR above which a prescription is considered insufficiently challenging
    /// Reference: Helms, E.R. et al. (2016). Application of the repetitions in reserve-based RPE scale
    pub const EASY_RIR_THRESHOLD: f64 = 3.0;

    /// Target RIR band for productive hypertrophy/strength work
    /// Reference: Grgic, J. et al. (2022). Effects of resistance training performed to failure or non-failure
    pub const PRODUCTIVE_RIR_MIN: f64 = 1.0;
    pub const PRODUCTIVE_RIR_MAX: f64 = 3.0;

    /// Default RIR assumed when a log omits it and no flags indicate otherwise
    pub const DEFAULT_RIR: u8 = 2;

    /// RIR inferred from a "too easy" report when none was logged
    pub const TOO_EASY_INFERRED_RIR: u8 = 4;
}

/// Per-exercise progression and regression decision thresholds
///
/// References:
/// - ACSM (2009). Progression models in resistance training for healthy adults
/// - https://pubmed.ncbi.nlm.nih.gov/19204579/
pub mod progression {
    /// Number of most recent logs evaluated per exercise
    pub const EVALUATION_WINDOW: usize = 5;

    /// Minimum sessions before a progression is considered
    pub const MIN_SESSIONS_FOR_PROGRESSION: u32 = 3;

    /// Minimum average form quality (1-4 scale) required to progress
    pub const FORM_PROGRESSION_THRESHOLD: f64 = 3.0;

    /// Minimum completion rate required to progress
    pub const COMPLETION_RATE_THRESHOLD: f64 = 0.9;

    /// Sessions that must be pain-free before progressing
    pub const PAIN_FREE_SESSIONS: usize = 3;

    /// Consecutive high-RIR sessions that signal readiness to progress
    pub const HIGH_RIR_SESSIONS: usize = 2;

    /// Explicit "too easy" reports that signal readiness to progress
    pub const TOO_EASY_REPORTS: usize = 2;

    /// Regression trigger confidences, highest-priority first
    pub const PAIN_CONFIDENCE: f64 = 1.0;
    pub const FAILED_COMPLETION_CONFIDENCE: f64 = 0.9;
    pub const TOO_HARD_CONFIDENCE: f64 = 0.85;
    pub const POOR_FORM_CONFIDENCE: f64 = 0.8;
    pub const ZERO_RIR_CONFIDENCE: f64 = 0.75;

    /// Confidence attached to a readiness-based progression
    pub const PROGRESSION_CONFIDENCE: f64 = 0.75;

    /// Rep adjustments when no variation edge is available
    pub const REP_INCREASE: u32 = 3;
    pub const REP_DECREASE: u32 = 3;
    pub const MIN_PRESCRIBED_REPS: u32 = 5;

    /// External load step when equipment supports it (kg)
    pub const LOAD_INCREMENT_KG: f64 = 2.5;
}

/// Muscle fatigue accumulation and recovery model
///
/// References:
/// - Bishop, P.A., Jones, E., & Woods, A.K. (2008). Recovery from training: a brief review
/// - https://pubmed.ncbi.nlm.nih.gov/18438210/
pub mod fatigue {
    /// Fatigue added to an exercise's primary muscle group per session
    pub const PRIMARY_MUSCLE_FATIGUE: f64 = 20.0;

    /// Fatigue added to each secondary muscle group per session
    pub const SECONDARY_MUSCLE_FATIGUE: f64 = 10.0;

    /// Additional fatigue when the set was taken near failure (RIR <= 1)
    pub const NEAR_FAILURE_BONUS: f64 = 10.0;

    /// Additional fatigue for high-repetition work
    pub const HIGH_REP_BONUS: f64 = 5.0;
    pub const HIGH_REP_THRESHOLD: u32 = 15;

    /// Per-muscle fatigue ceiling
    pub const FATIGUE_CAP: f64 = 100.0;

    /// Overall fatigue level buckets over the per-muscle average
    pub const EXHAUSTED_THRESHOLD: f64 = 70.0;
    pub const FATIGUED_THRESHOLD: f64 = 50.0;
    pub const MODERATE_THRESHOLD: f64 = 25.0;

    /// Fraction of fatigue retained after 24 hours of rest
    /// Reference: Zatsiorsky, V.M. & Kraemer, W.J. (2006). Science and Practice of Strength Training, fitness-fatigue model
    pub const DAILY_RETENTION: f64 = 0.75;
}

/// Ability score adjustment model
pub mod ability {
    /// Ability delta for completed, appropriately challenging work
    pub const CHALLENGING_WORK_DELTA: f64 = 1.0;

    /// Ability delta for completed but easy work
    pub const EASY_WORK_DELTA: f64 = 0.5;

    /// Ability delta for incomplete work
    pub const INCOMPLETE_WORK_DELTA: f64 = -0.5;

    /// Bonus applied when form quality was excellent
    pub const EXCELLENT_FORM_BONUS: f64 = 0.2;

    /// Ability score bounds
    pub const ABILITY_MIN: f64 = 0.0;
    pub const ABILITY_MAX: f64 = 100.0;
}

/// Fitness gap dimension weights and normalization denominators
///
/// Weights sum to 1.0 across the seven dimensions. Denominators normalize raw
/// capacities into comparable [-1, 1] differences before weighting.
pub mod gap {
    /// Push-up capacity (reps)
    pub const PUSHUP_WEIGHT: f64 = 0.18;
    pub const PUSHUP_DENOMINATOR: f64 = 60.0;

    /// Plank endurance (seconds)
    pub const PLANK_WEIGHT: f64 = 0.12;
    pub const PLANK_DENOMINATOR: f64 = 240.0;

    /// Squat capacity (reps)
    pub const SQUAT_WEIGHT: f64 = 0.15;
    pub const SQUAT_DENOMINATOR: f64 = 80.0;

    /// Cardio endurance (0-100 score)
    pub const CARDIO_WEIGHT: f64 = 0.15;
    pub const CARDIO_DENOMINATOR: f64 = 100.0;

    /// Upper-body strength (0-100 score)
    pub const UPPER_BODY_WEIGHT: f64 = 0.15;
    pub const UPPER_BODY_DENOMINATOR: f64 = 100.0;

    /// Lower-body strength (0-100 score)
    pub const LOWER_BODY_WEIGHT: f64 = 0.15;
    pub const LOWER_BODY_DENOMINATOR: f64 = 100.0;

    /// Core strength (0-100 score)
    pub const CORE_WEIGHT: f64 = 0.10;
    pub const CORE_DENOMINATOR: f64 = 100.0;

    /// Final gap scale and bounds
    pub const GAP_SCALE: f64 = 100.0;
    pub const GAP_MAX: f64 = 100.0;
}

/// Partner comfort and competitiveness dynamics
pub mod comfort {
    /// Step applied per session when nudging comfort or competitiveness
    pub const NUDGE_STEP: f64 = 0.1;

    /// Comfort/competitiveness score bounds (1-5 scale)
    pub const SCORE_MIN: f64 = 1.0;
    pub const SCORE_MAX: f64 = 5.0;

    /// Partner-connection rating at or above which comfort rises
    pub const POSITIVE_CONNECTION_RATING: u8 = 4;

    /// Partner-connection rating at or below which comfort falls
    pub const NEGATIVE_CONNECTION_RATING: u8 = 2;
}

/// Couple gap-trend analysis
pub mod trend {
    /// Gap snapshots retained per couple (one year of weekly sessions)
    pub const GAP_HISTORY_RETENTION: usize = 52;

    /// Snapshots compared when classifying the gap trend
    pub const TREND_WINDOW: usize = 5;

    /// Net movement (in gap points) required before the trend leaves "stable"
    pub const TREND_DELTA: f64 = 1.0;

    /// Pairing-strategy history entries retained per couple
    pub const STRATEGY_HISTORY_RETENTION: usize = 100;
}

/// Periodization cycle structure and deload triggers
///
/// References:
/// - Bompa, T.O. & Buzzichelli, C. (2018). Periodization: Theory and Methodology of Training
/// - Gabbett, T.J. (2016). The training-injury prevention paradox
/// - https://bjsm.bmj.com/content/50/5/273
pub mod periodization {
    /// Phase lengths in weeks
    pub const ADAPTATION_WEEKS: u32 = 3;
    pub const BUILDING_WEEKS: u32 = 4;
    pub const PEAK_WEEKS: u32 = 2;
    pub const DELOAD_WEEKS: u32 = 1;

    /// Consecutive completed building phases required before peaking
    pub const BUILDING_PHASES_BEFORE_PEAK: usize = 2;

    /// Deload is forced once this many weeks pass without one
    pub const MAX_WEEKS_WITHOUT_DELOAD: u32 = 6;

    /// Deload is forced after this many consecutive plateau weeks
    pub const PLATEAU_DELOAD_WEEKS: u32 = 3;

    /// Deload is forced when weekly frequency drops below this fraction of
    /// the rolling four-week average
    pub const FREQUENCY_DROP_RATIO: f64 = 0.6;

    /// Weeks of history used for the rolling frequency average
    pub const FREQUENCY_WINDOW_WEEKS: usize = 4;
}

/// Consistency and streak tracking
pub mod consistency {
    /// Maximum days between workouts for a streak to continue
    pub const STREAK_WINDOW_DAYS: i64 = 3;

    /// Workout deltas averaged when classifying a user's progression rate
    pub const PROGRESSION_RATE_WINDOW: usize = 10;

    /// Summed ability delta above which the rate is "improving"
    pub const IMPROVING_DELTA: f64 = 1.0;

    /// Summed ability delta below which the rate is "declining"
    pub const DECLINING_DELTA: f64 = -0.5;
}
