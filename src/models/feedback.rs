// ABOUTME: Explicit post-workout feedback and the fused ProcessedFeedback output
// ABOUTME: Implicit signals are derived from logs; explicit ratings come from the person
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::workout::PairingStrategy;
use crate::progression::ProgressionRecommendation;

/// Self-reported overall difficulty of a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerceivedDifficulty {
    TooEasy,
    JustRight,
    TooHard,
}

/// Explicit post-workout feedback from one person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutFeedback {
    /// Person giving the feedback
    pub user_id: Uuid,
    /// Workout the feedback refers to
    pub workout_id: Uuid,
    /// Overall enjoyment (1-5)
    pub enjoyment: u8,
    /// Overall difficulty impression
    pub perceived_difficulty: PerceivedDifficulty,
    /// How connected the session felt with the partner (1-5)
    pub partner_connection: u8,
    /// Free-form comments
    #[serde(default)]
    pub comments: Option<String>,
}

/// Classification of actual performance against the prescription
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceVsPrescription {
    /// Actual work exceeded the prescription by a meaningful margin
    Exceeded,
    /// Actual work matched the prescription
    Met,
    /// Actual work fell meaningfully short
    Below,
}

/// Direction of form quality relative to historical mastery averages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormTrend {
    Improving,
    Stable,
    Declining,
}

/// Performance-derived signals extracted from one workout log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitSignals {
    /// Fraction of attempted exercises completed
    pub completion_rate: f64,
    /// Fraction of exercises skipped
    pub skip_rate: f64,
    /// Performance relative to prescription
    pub performance: PerformanceVsPrescription,
    /// Mean reported RIR across non-skipped entries
    pub average_rir: Option<f64>,
    /// Form direction vs the person's historical averages
    pub form_trend: FormTrend,
}

/// Per-exercise progression adjustment produced by feedback fusion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAdjustment {
    /// Exercise the adjustment applies to
    pub exercise_id: String,
    /// Delegated progression recommendation
    pub recommendation: ProgressionRecommendation,
}

/// Inferred preference for future session intensity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntensityShift {
    Lower,
    Same,
    Higher,
}

/// Couple-level focus areas suggested by feedback
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    GapReduction,
    PartnerConnection,
}

/// Couple-level pairing adjustments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouplePairingAdjustments {
    /// Strategies to avoid in upcoming sessions
    pub avoid_strategies: Vec<PairingStrategy>,
    /// Strategies to prefer in upcoming sessions
    pub prefer_strategies: Vec<PairingStrategy>,
    /// Bounded intensity adjustment in [-0.10, 0.10]
    pub intensity_adjustment: f64,
    /// Focus-area tags
    pub focus_areas: Vec<FocusArea>,
}

/// Priority of a human-readable recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

/// One prioritized recommendation line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrioritizedRecommendation {
    /// Display priority
    pub priority: RecommendationPriority,
    /// Human-readable message
    pub message: String,
}

/// Fused output of the feedback processor for one person's session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedFeedback {
    /// Person the feedback belongs to
    pub user_id: Uuid,
    /// Workout the feedback refers to
    pub workout_id: Uuid,
    /// Signals derived from the log alone
    pub implicit: ImplicitSignals,
    /// Per-exercise progression adjustments
    pub exercise_adjustments: Vec<ExerciseAdjustment>,
    /// Exercises newly added to the liked list
    pub new_liked: Vec<String>,
    /// Exercises newly added to the disliked list
    pub new_disliked: Vec<String>,
    /// Inferred intensity preference for future sessions
    pub intensity_preference: IntensityShift,
    /// Fatigue and form warnings
    pub warnings: Vec<String>,
    /// Couple-level pairing adjustments
    pub couple_adjustments: CouplePairingAdjustments,
    /// Prioritized, human-readable recommendation list, High first
    pub recommendations: Vec<PrioritizedRecommendation>,
}
