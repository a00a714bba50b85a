// ABOUTME: Per-person progress profile: abilities, mastery, consistency, recovery, preferences
// ABOUTME: Owned by the caller; engines receive a snapshot and return an updated copy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::exercise::{FoundationalMovement, InjuryArea, IntensityLevel, MuscleGroup};
use crate::physiological_constants::ability::{ABILITY_MAX, ABILITY_MIN};

/// Estimated physical abilities for one person
///
/// Strength scores are per muscle group on a 0-100 scale; foundational
/// capacities are raw demonstrated numbers used by the gap calculator and
/// the constraint filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityProfile {
    /// Estimated strength per muscle group (0-100)
    pub strength: HashMap<MuscleGroup, f64>,
    /// Flexibility estimate (0-100)
    pub flexibility: f64,
    /// Cardio endurance estimate (0-100)
    pub cardio_endurance: f64,
    /// Balance estimate (0-100)
    pub balance: f64,
    /// Best demonstrated consecutive push-ups
    pub max_pushups: u32,
    /// Best demonstrated plank hold (seconds)
    pub plank_hold_seconds: u32,
    /// Best demonstrated consecutive bodyweight squats
    pub max_squats: u32,
}

impl Default for AbilityProfile {
    fn default() -> Self {
        Self {
            strength: HashMap::new(),
            flexibility: 50.0,
            cardio_endurance: 50.0,
            balance: 50.0,
            max_pushups: 0,
            plank_hold_seconds: 0,
            max_squats: 0,
        }
    }
}

impl AbilityProfile {
    /// Strength estimate for one muscle group, defaulting to the midpoint
    /// when nothing has been observed yet
    #[must_use]
    pub fn muscle_strength(&self, group: MuscleGroup) -> f64 {
        self.strength.get(&group).copied().unwrap_or(50.0)
    }

    /// Mean strength across upper-body muscle groups
    #[must_use]
    pub fn upper_body_strength(&self) -> f64 {
        Self::mean_over(
            &[
                self.muscle_strength(MuscleGroup::Chest),
                self.muscle_strength(MuscleGroup::Back),
                self.muscle_strength(MuscleGroup::Shoulders),
                self.muscle_strength(MuscleGroup::Arms),
            ],
        )
    }

    /// Mean strength across lower-body muscle groups
    #[must_use]
    pub fn lower_body_strength(&self) -> f64 {
        Self::mean_over(&[
            self.muscle_strength(MuscleGroup::Legs),
            self.muscle_strength(MuscleGroup::Glutes),
        ])
    }

    /// Core strength estimate
    #[must_use]
    pub fn core_strength(&self) -> f64 {
        self.muscle_strength(MuscleGroup::Core)
    }

    /// Whether the person has demonstrated a foundational movement
    #[must_use]
    pub const fn has_demonstrated(&self, movement: FoundationalMovement) -> bool {
        match movement {
            FoundationalMovement::PushUp => self.max_pushups > 0,
            FoundationalMovement::Plank => self.plank_hold_seconds > 0,
            FoundationalMovement::Squat => self.max_squats > 0,
        }
    }

    /// Ability score most relevant to an exercise's primary muscle group
    #[must_use]
    pub fn relevant_ability(&self, group: MuscleGroup) -> f64 {
        match group {
            MuscleGroup::FullBody => {
                Self::mean_over(&[self.upper_body_strength(), self.lower_body_strength()])
            }
            other => self.muscle_strength(other),
        }
    }

    /// Apply a signed adjustment to one muscle group's strength, clamped to [0, 100]
    pub fn adjust_strength(&mut self, group: MuscleGroup, delta: f64) {
        let current = self.muscle_strength(group);
        self.strength
            .insert(group, (current + delta).clamp(ABILITY_MIN, ABILITY_MAX));
    }

    fn mean_over(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Accumulated per-exercise performance statistics for one person
///
/// Created on the first log of an exercise, updated by running average on
/// every subsequent log, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseMastery {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Total sessions logged for this exercise; strictly increases by 1 per log
    pub times_performed: u32,
    /// Running-average reported RIR
    pub average_rir: f64,
    /// Running-average form quality (1-4 scale)
    pub average_form: f64,
    /// Highest actual reps achieved in a single set
    pub personal_best_reps: u32,
    /// Whether form supports moving to a harder variation
    pub form_ready_for_progression: bool,
    /// Timestamp of the most recent log
    pub last_performed: DateTime<Utc>,
}

impl ExerciseMastery {
    /// First-log constructor
    #[must_use]
    pub fn first(exercise_id: impl Into<String>, rir: f64, form: f64, reps: u32, at: DateTime<Utc>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            times_performed: 1,
            average_rir: rir,
            average_form: form,
            personal_best_reps: reps,
            form_ready_for_progression: false,
            last_performed: at,
        }
    }
}

/// Workout-frequency and streak metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsistencyMetrics {
    /// Consecutive workouts within the streak window
    pub current_streak: u32,
    /// Longest streak ever achieved
    pub longest_streak: u32,
    /// Workouts completed in the current calendar week
    pub workouts_this_week: u32,
    /// Workouts completed in the current calendar month
    pub workouts_this_month: u32,
    /// Completed-workout counts for recent whole weeks, newest last
    #[serde(default)]
    pub recent_weekly_counts: Vec<u32>,
    /// When the last workout was logged
    pub last_workout_at: Option<DateTime<Utc>>,
}

/// Bucketed whole-body fatigue level, ordered from rested to spent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    #[default]
    Fresh,
    Moderate,
    Fatigued,
    Exhausted,
}

/// Per-muscle fatigue state with an overall bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecoveryStatus {
    /// Fatigue per muscle group (0-100)
    pub muscle_fatigue: HashMap<MuscleGroup, f64>,
    /// Bucketed overall fatigue
    pub overall: FatigueLevel,
    /// When fatigue was last accumulated or decayed
    pub last_updated: Option<DateTime<Utc>>,
}

impl RecoveryStatus {
    /// Mean fatigue across all tracked muscle groups
    #[must_use]
    pub fn average_fatigue(&self) -> f64 {
        if self.muscle_fatigue.is_empty() {
            return 0.0;
        }
        self.muscle_fatigue.values().sum::<f64>() / self.muscle_fatigue.len() as f64
    }
}

/// Exercise likes/dislikes and intensity preference learned from feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedPreferences {
    /// Exercises the person has responded well to
    pub liked_exercises: Vec<String>,
    /// Exercises the person avoids or rated poorly
    pub disliked_exercises: Vec<String>,
    /// Intensity the person prefers to train at
    pub preferred_intensity: IntensityLevel,
}

impl Default for LearnedPreferences {
    fn default() -> Self {
        Self {
            liked_exercises: Vec::new(),
            disliked_exercises: Vec::new(),
            preferred_intensity: IntensityLevel::Moderate,
        }
    }
}

/// Training goals used for goal-alignment scoring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    BuildStrength,
    LoseWeight,
    ImproveEndurance,
    ImproveFlexibility,
    ImproveBalance,
    TrainTogether,
}

/// Direction a person's ability estimates have been moving
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionRate {
    Improving,
    #[default]
    Steady,
    Declining,
}

/// Complete per-person progress profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgressProfile {
    /// Owner of this profile
    pub user_id: Uuid,
    /// Estimated abilities
    pub abilities: AbilityProfile,
    /// Per-exercise mastery records, keyed by exercise id
    pub exercise_mastery: HashMap<String, ExerciseMastery>,
    /// Frequency and streak metrics
    pub consistency: ConsistencyMetrics,
    /// Fatigue state
    pub recovery: RecoveryStatus,
    /// Learned exercise preferences
    pub preferences: LearnedPreferences,
    /// Active training goals
    #[serde(default)]
    pub goals: Vec<FitnessGoal>,
    /// Injuries currently limiting exercise selection
    #[serde(default)]
    pub current_injuries: Vec<InjuryArea>,
    /// Resolved injuries kept for history
    #[serde(default)]
    pub past_injuries: Vec<InjuryArea>,
    /// Per-workout summed ability deltas, newest last, bounded window
    #[serde(default)]
    pub ability_delta_window: Vec<f64>,
    /// Classified progression rate over the delta window
    #[serde(default)]
    pub progression_rate: ProgressionRate,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

impl UserProgressProfile {
    /// Fresh profile for a new user
    #[must_use]
    pub fn new(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            abilities: AbilityProfile::default(),
            exercise_mastery: HashMap::new(),
            consistency: ConsistencyMetrics::default(),
            recovery: RecoveryStatus::default(),
            preferences: LearnedPreferences::default(),
            goals: Vec::new(),
            current_injuries: Vec::new(),
            past_injuries: Vec::new(),
            ability_delta_window: Vec::new(),
            progression_rate: ProgressionRate::default(),
            updated_at: now,
        }
    }

    /// Mastery record for an exercise, if one exists
    #[must_use]
    pub fn mastery(&self, exercise_id: &str) -> Option<&ExerciseMastery> {
        self.exercise_mastery.get(exercise_id)
    }
}
