// ABOUTME: Shared couple progress: gap history, milestones, strategy history, comfort scores
// ABOUTME: Mutual comfort is always the minimum of the two individual scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::workout::PairingStrategy;
use crate::physiological_constants::comfort::{SCORE_MAX, SCORE_MIN};

/// One recorded fitness-gap measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapSnapshot {
    /// When the gap was measured
    pub recorded_at: DateTime<Utc>,
    /// Signed gap value in [-100, 100]; positive means partner B is stronger
    pub gap: f64,
}

/// Direction the absolute gap has been moving
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GapTrend {
    Widening,
    #[default]
    Stable,
    Closing,
}

/// Shared milestones a couple can unlock, each at most once
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    /// First workout completed together
    FirstJointWorkout,
    /// 10 joint workouts
    TenJointWorkouts,
    /// 25 joint workouts
    TwentyFiveJointWorkouts,
    /// 50 joint workouts
    FiftyJointWorkouts,
    /// 100 joint workouts
    HundredJointWorkouts,
    /// Gap brought under 10 after having exceeded 25
    GapClosed,
    /// Mutual partner-exercise comfort reached 4.0
    ComfortEstablished,
    /// Four consecutive weeks with at least two joint workouts
    FourWeekRhythm,
    /// Twelve consecutive weeks with at least two joint workouts
    TwelveWeekRhythm,
}

/// An unlocked milestone; the list is append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievedMilestone {
    /// Which milestone fired
    pub kind: MilestoneKind,
    /// When it fired
    pub achieved_at: DateTime<Utc>,
    /// Display text recorded at unlock time
    pub description: String,
}

/// One pairing-strategy session record, scored by average partner enjoyment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRecord {
    /// Strategy used for the session
    pub strategy: PairingStrategy,
    /// When the session concluded
    pub recorded_at: DateTime<Utc>,
    /// Average of both partners' enjoyment ratings (1-5)
    pub enjoyment: f64,
}

/// Comfort with partner-interactive exercises; mutual is the minimum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerComfort {
    /// Person A's comfort (1-5)
    pub person_a: f64,
    /// Person B's comfort (1-5)
    pub person_b: f64,
}

impl Default for PartnerComfort {
    fn default() -> Self {
        Self {
            person_a: 3.0,
            person_b: 3.0,
        }
    }
}

impl PartnerComfort {
    /// Mutual comfort: the minimum of the two individual scores
    #[must_use]
    pub fn mutual(&self) -> f64 {
        self.person_a.min(self.person_b)
    }

    /// Nudge one person's comfort by a signed step, clamped to the 1-5 scale
    pub fn nudge(&mut self, person_a: bool, step: f64) {
        let slot = if person_a {
            &mut self.person_a
        } else {
            &mut self.person_b
        };
        *slot = (*slot + step).clamp(SCORE_MIN, SCORE_MAX);
    }
}

/// Appetite for competitive pairings; mutual is the minimum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitivenessScores {
    /// Person A's competitiveness (1-5)
    pub person_a: f64,
    /// Person B's competitiveness (1-5)
    pub person_b: f64,
}

impl Default for CompetitivenessScores {
    fn default() -> Self {
        Self {
            person_a: 3.0,
            person_b: 3.0,
        }
    }
}

impl CompetitivenessScores {
    /// Mutual competitiveness: the minimum of the two individual scores
    #[must_use]
    pub fn mutual(&self) -> f64 {
        self.person_a.min(self.person_b)
    }

    /// Nudge one person's score by a signed step, clamped to the 1-5 scale
    pub fn nudge(&mut self, person_a: bool, step: f64) {
        let slot = if person_a {
            &mut self.person_a
        } else {
            &mut self.person_b
        };
        *slot = (*slot + step).clamp(SCORE_MIN, SCORE_MAX);
    }
}

/// Shared progress profile for one couple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoupleProgressProfile {
    /// Couple identifier
    pub couple_id: Uuid,
    /// Partner A's user id
    pub user_a: Uuid,
    /// Partner B's user id
    pub user_b: Uuid,
    /// Ordered gap snapshots, oldest first, bounded retention
    pub fitness_gap_history: Vec<GapSnapshot>,
    /// Current gap trend classification
    pub gap_trend: GapTrend,
    /// Unlocked milestones, append-only
    pub milestones: Vec<AchievedMilestone>,
    /// Pairing-strategy session history, append-only, bounded retention
    pub strategy_history: Vec<StrategyRecord>,
    /// Partner-exercise comfort scores
    pub partner_comfort: PartnerComfort,
    /// Competition-preference scores
    pub competitiveness: CompetitivenessScores,
    /// Strategies the couple has responded well to
    #[serde(default)]
    pub preferred_strategies: Vec<PairingStrategy>,
    /// Strategies the couple has responded poorly to
    #[serde(default)]
    pub avoided_strategies: Vec<PairingStrategy>,
    /// Total joint workouts completed
    pub joint_workout_count: u32,
    /// Joint-workout counts per recent whole week, newest last
    #[serde(default)]
    pub weekly_joint_counts: Vec<u32>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

impl CoupleProgressProfile {
    /// Fresh profile for a newly linked couple
    #[must_use]
    pub fn new(couple_id: Uuid, user_a: Uuid, user_b: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            couple_id,
            user_a,
            user_b,
            fitness_gap_history: Vec::new(),
            gap_trend: GapTrend::default(),
            milestones: Vec::new(),
            strategy_history: Vec::new(),
            partner_comfort: PartnerComfort::default(),
            competitiveness: CompetitivenessScores::default(),
            preferred_strategies: Vec::new(),
            avoided_strategies: Vec::new(),
            joint_workout_count: 0,
            weekly_joint_counts: Vec::new(),
            updated_at: now,
        }
    }

    /// Most recent gap measurement, if any
    #[must_use]
    pub fn latest_gap(&self) -> Option<f64> {
        self.fitness_gap_history.last().map(|s| s.gap)
    }

    /// Whether a milestone has already fired
    #[must_use]
    pub fn has_milestone(&self, kind: MilestoneKind) -> bool {
        self.milestones.iter().any(|m| m.kind == kind)
    }
}
