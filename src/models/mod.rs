// ABOUTME: Shared data model for the pairing and progression engine
// ABOUTME: Re-exports all model types; engines depend on this module, never on each other's internals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Data Model
//!
//! Every profile and plan is owned by the person or couple it describes.
//! Engines receive a snapshot, return an updated copy, and the caller is
//! responsible for persistence.

/// Couple-level progress, milestones, and comfort scores
pub mod couple_profile;
/// Exercise reference types from the catalog
pub mod exercise;
/// Post-workout feedback and fused feedback output
pub mod feedback;
/// Periodization phases and plans
pub mod periodization;
/// Per-person progress profile
pub mod user_profile;
/// Workout logs, generated workouts, and scored pairs
pub mod workout;

pub use couple_profile::{
    AchievedMilestone, CompetitivenessScores, CoupleProgressProfile, GapSnapshot, GapTrend,
    MilestoneKind, PartnerComfort, StrategyRecord,
};
pub use exercise::{
    Equipment, ExerciseCategory, ExerciseDefinition, FoundationalMovement, InjuryArea,
    IntensityLevel, InteractionType, MuscleGroup, SpaceRequirement,
};
pub use feedback::{
    CouplePairingAdjustments, ExerciseAdjustment, FocusArea, FormTrend, ImplicitSignals,
    IntensityShift, PerceivedDifficulty, PerformanceVsPrescription, PrioritizedRecommendation,
    ProcessedFeedback, RecommendationPriority, WorkoutFeedback,
};
pub use periodization::{
    PeriodizationPlan, PhaseParameters, PhaseRecord, ProgressionSpeed, TrainingPhase,
};
pub use user_profile::{
    AbilityProfile, ConsistencyMetrics, ExerciseMastery, FatigueLevel, FitnessGoal,
    LearnedPreferences, ProgressionRate, RecoveryStatus, UserProgressProfile,
};
pub use workout::{
    ExerciseLog, ExerciseLogBuilder, ExercisePair, FormQuality, GeneratedWorkout, PairingScore,
    PairingStrategy, Prescription, WorkoutDifficulty, WorkoutLog,
};
