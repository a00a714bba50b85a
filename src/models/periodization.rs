// ABOUTME: Periodization plan: training phases, phase parameters, and append-only phase history
// ABOUTME: The weekly state machine that advances plans lives in src/periodization.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::physiological_constants::periodization::{
    ADAPTATION_WEEKS, BUILDING_WEEKS, DELOAD_WEEKS, PEAK_WEEKS,
};

/// Multi-week training phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Technique and tissue adaptation at low intensity
    Adaptation,
    /// Progressive overload block
    Building,
    /// Short high-intensity block
    Peak,
    /// Deliberate recovery week
    Deload,
}

impl TrainingPhase {
    /// Scheduled length of this phase in weeks
    #[must_use]
    pub const fn scheduled_weeks(self) -> u32 {
        match self {
            Self::Adaptation => ADAPTATION_WEEKS,
            Self::Building => BUILDING_WEEKS,
            Self::Peak => PEAK_WEEKS,
            Self::Deload => DELOAD_WEEKS,
        }
    }

    /// Prescription parameters for this phase
    #[must_use]
    pub const fn parameters(self) -> PhaseParameters {
        match self {
            Self::Adaptation => PhaseParameters {
                intensity_min: 0.50,
                intensity_max: 0.65,
                volume_multiplier: 1.0,
                progression_speed: ProgressionSpeed::Slow,
            },
            Self::Building => PhaseParameters {
                intensity_min: 0.65,
                intensity_max: 0.80,
                volume_multiplier: 1.2,
                progression_speed: ProgressionSpeed::Normal,
            },
            Self::Peak => PhaseParameters {
                intensity_min: 0.80,
                intensity_max: 0.95,
                volume_multiplier: 0.9,
                progression_speed: ProgressionSpeed::Fast,
            },
            Self::Deload => PhaseParameters {
                intensity_min: 0.40,
                intensity_max: 0.55,
                volume_multiplier: 0.6,
                progression_speed: ProgressionSpeed::None,
            },
        }
    }
}

/// How aggressively prescriptions advance during a phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionSpeed {
    None,
    Slow,
    Normal,
    Fast,
}

/// Intensity range, volume multiplier, and progression speed for a phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhaseParameters {
    /// Lower bound of the target intensity fraction
    pub intensity_min: f64,
    /// Upper bound of the target intensity fraction
    pub intensity_max: f64,
    /// Multiplier applied to default exercise volume
    pub volume_multiplier: f64,
    /// Progression speed within the phase
    pub progression_speed: ProgressionSpeed,
}

/// One completed or in-progress phase in the plan history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Phase that ran
    pub phase: TrainingPhase,
    /// When the phase started
    pub started_at: DateTime<Utc>,
    /// Whole weeks completed in the phase
    pub completed_weeks: u32,
    /// Whether the phase ended early through a forced deload
    pub cut_short: bool,
}

/// A couple's periodization state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodizationPlan {
    /// Couple this plan belongs to
    pub couple_id: Uuid,
    /// Phase currently in effect
    pub current_phase: TrainingPhase,
    /// Whole weeks completed in the current phase
    pub week_in_phase: u32,
    /// Weeks since the last deload week completed
    pub weeks_since_deload: u32,
    /// Consecutive weeks without meaningful ability improvement
    pub plateau_weeks: u32,
    /// Completed phases, append-only
    pub phase_history: Vec<PhaseRecord>,
    /// When the current phase started
    pub phase_started_at: DateTime<Utc>,
    /// Last weekly update
    pub updated_at: DateTime<Utc>,
}

impl PeriodizationPlan {
    /// New plan starting in the adaptation phase
    #[must_use]
    pub fn new(couple_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            couple_id,
            current_phase: TrainingPhase::Adaptation,
            week_in_phase: 0,
            weeks_since_deload: 0,
            plateau_weeks: 0,
            phase_history: Vec::new(),
            phase_started_at: now,
            updated_at: now,
        }
    }

    /// Parameters for the phase currently in effect
    #[must_use]
    pub const fn current_parameters(&self) -> PhaseParameters {
        self.current_phase.parameters()
    }
}
