// ABOUTME: Pairing engine facade: gap -> strategy -> candidates -> scores -> assembled workout
// ABOUTME: Stateless between invocations; receives snapshots and returns a GeneratedWorkout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Pairing Engine
//!
//! Turns two individual profiles plus couple history into a complete paired
//! workout. The pipeline runs the constraint filter, fitness-gap calculator,
//! strategy selector, candidate generator, scorer, and assembler in order;
//! infeasible slots degrade to partial coverage rather than failing the
//! whole workout.

/// Workout assembly from scored pairs
pub mod assembler;
/// Candidate pair generation per strategy
pub mod candidates;
/// Safety and feasibility filtering
pub mod constraints;
/// Partner ability differential
pub mod fitness_gap;
/// Multi-factor pair scoring
pub mod scoring;
/// Gap-band strategy selection
pub mod strategy;

pub use candidates::{target_difficulty, CandidateGenerator, CandidatePair, PairingContext};
pub use constraints::{check_exercise, pair_is_usable, ConstraintVerdict};
pub use fitness_gap::calculate_fitness_gap;
pub use scoring::PairScorer;
pub use strategy::StrategySelector;

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::ExerciseCatalog;
use crate::config::PairingConfig;
use crate::errors::{AppError, AppResult};
use crate::models::couple_profile::CoupleProgressProfile;
use crate::models::exercise::{Equipment, MuscleGroup, SpaceRequirement};
use crate::models::periodization::{PhaseParameters, ProgressionSpeed, TrainingPhase};
use crate::models::user_profile::UserProgressProfile;
use crate::models::workout::GeneratedWorkout;

use assembler::WorkoutAssembler;

/// Everything workout generation needs for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingInput {
    /// Couple profile snapshot
    pub couple: CoupleProgressProfile,
    /// Partner A's profile snapshot
    pub profile_a: UserProgressProfile,
    /// Partner B's profile snapshot
    pub profile_b: UserProgressProfile,
    /// Equipment available where the couple trains
    pub available_equipment: Vec<Equipment>,
    /// Space available where the couple trains
    pub available_space: SpaceRequirement,
    /// Muscle groups the session should cover, in section order
    pub target_muscle_groups: Vec<MuscleGroup>,
    /// Exercise ids used in recent sessions, for variety scoring
    #[serde(default)]
    pub recent_exercise_ids: Vec<String>,
    /// Training phase currently in effect, if a plan exists
    #[serde(default)]
    pub phase: Option<TrainingPhase>,
    /// Bounded couple-level intensity adjustment from feedback, in [-0.10, 0.10]
    #[serde(default)]
    pub intensity_adjustment: f64,
}

/// Engine that generates paired workouts
#[derive(Debug, Clone)]
pub struct PairingEngine {
    catalog: Arc<ExerciseCatalog>,
    config: PairingConfig,
}

impl PairingEngine {
    /// Create an engine over a catalog with the given configuration
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>, config: PairingConfig) -> Self {
        Self { catalog, config }
    }

    /// Generate a complete paired workout
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the profiles do not belong to the
    /// referenced couple; that is a caller bug, not a recoverable condition.
    pub fn generate_workout(&self, input: &PairingInput) -> AppResult<GeneratedWorkout> {
        self.generate_workout_with_rng(input, &mut rand::thread_rng())
    }

    /// Generate with an injected random source, for deterministic callers
    ///
    /// # Errors
    ///
    /// Same contract as [`PairingEngine::generate_workout`].
    pub fn generate_workout_with_rng(
        &self,
        input: &PairingInput,
        rng: &mut impl Rng,
    ) -> AppResult<GeneratedWorkout> {
        validate_membership(input)?;

        let ctx = PairingContext {
            profile_a: &input.profile_a,
            profile_b: &input.profile_b,
            couple: &input.couple,
            available_equipment: &input.available_equipment,
            available_space: input.available_space,
        };

        let gap = calculate_fitness_gap(&input.profile_a, &input.profile_b);
        let strategy = StrategySelector::new(self.config.clone()).select(gap, &input.couple);

        let phase_parameters = input
            .phase
            .map_or(NEUTRAL_PHASE_PARAMETERS, TrainingPhase::parameters);
        let intensity_adjustment = input.intensity_adjustment.clamp(-0.10, 0.10);

        let workout = WorkoutAssembler::new(self.config.clone()).assemble(
            &self.catalog,
            &ctx,
            strategy,
            &input.target_muscle_groups,
            &input.recent_exercise_ids,
            phase_parameters,
            intensity_adjustment,
            rng,
        );

        info!(
            couple = %input.couple.couple_id,
            gap,
            strategy = ?strategy,
            summary = %workout.summary(),
            "workout generated"
        );
        Ok(workout)
    }
}

/// Parameters used when no periodization plan exists yet
const NEUTRAL_PHASE_PARAMETERS: PhaseParameters = PhaseParameters {
    intensity_min: 0.65,
    intensity_max: 0.80,
    volume_multiplier: 1.0,
    progression_speed: ProgressionSpeed::Normal,
};

fn validate_membership(input: &PairingInput) -> AppResult<()> {
    if input.profile_a.user_id != input.couple.user_a
        || input.profile_b.user_id != input.couple.user_b
    {
        return Err(AppError::invalid_input(format!(
            "profiles {} / {} do not match couple {}",
            input.profile_a.user_id, input.profile_b.user_id, input.couple.couple_id
        ))
        .with_couple_id(input.couple.couple_id));
    }
    Ok(())
}
