// ABOUTME: Storage-backed facade exposing the engine entry points to session management
// ABOUTME: Serializes per-person updates and runs the couple update only after both complete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Session Service
//!
//! Thin async composition layer wiring the catalog, storage adapters, and
//! engines together. Computation stays synchronous; the only suspension
//! points are the storage reads and writes at the component boundaries.
//! A caller that abandons a session simply never invokes
//! [`SessionService::complete_workout`], leaving every profile unmodified.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::catalog::ExerciseCatalog;
use crate::config::EngineConfig;
use crate::couple_progress::CoupleProgressTracker;
use crate::errors::{AppError, AppResult};
use crate::feedback::{FeedbackInput, FeedbackProcessor};
use crate::models::couple_profile::CoupleProgressProfile;
use crate::models::exercise::{Equipment, MuscleGroup, SpaceRequirement};
use crate::models::feedback::{ProcessedFeedback, WorkoutFeedback};
use crate::models::periodization::PeriodizationPlan;
use crate::models::user_profile::{ProgressionRate, UserProgressProfile};
use crate::models::workout::{ExerciseLog, GeneratedWorkout, WorkoutLog};
use crate::pairing::{PairingEngine, PairingInput};
use crate::periodization::PeriodizationManager;
use crate::progression::ProgressionAnalyzer;
use crate::storage::{CoupleProfileStorage, PlanStorage, ProfileStorage, WorkoutLogStorage};
use crate::user_progress::UserProgressTracker;

/// Recent sessions consulted for variety scoring
const RECENT_SESSIONS_FOR_VARIETY: usize = 3;
/// Logs pulled per exercise for progression analysis
const RECENT_LOGS_PER_EXERCISE: usize = 5;

/// Result of completing one joint session
#[derive(Debug, Clone)]
pub struct CompletedSession {
    /// Partner A's updated profile
    pub profile_a: UserProgressProfile,
    /// Partner B's updated profile
    pub profile_b: UserProgressProfile,
    /// Updated couple profile
    pub couple: CoupleProgressProfile,
    /// Processed feedback for partner A, when feedback was given
    pub feedback_a: Option<ProcessedFeedback>,
    /// Processed feedback for partner B, when feedback was given
    pub feedback_b: Option<ProcessedFeedback>,
}

/// Storage-backed engine facade
pub struct SessionService {
    catalog: Arc<ExerciseCatalog>,
    pairing: PairingEngine,
    progression: ProgressionAnalyzer,
    user_tracker: UserProgressTracker,
    couple_tracker: CoupleProgressTracker,
    periodization: PeriodizationManager,
    feedback: FeedbackProcessor,
    profiles: Arc<dyn ProfileStorage>,
    couples: Arc<dyn CoupleProfileStorage>,
    plans: Arc<dyn PlanStorage>,
    logs: Arc<dyn WorkoutLogStorage>,
}

impl SessionService {
    /// Wire the engines over a catalog, configuration, and storage adapters
    #[must_use]
    pub fn new(
        catalog: Arc<ExerciseCatalog>,
        config: EngineConfig,
        profiles: Arc<dyn ProfileStorage>,
        couples: Arc<dyn CoupleProfileStorage>,
        plans: Arc<dyn PlanStorage>,
        logs: Arc<dyn WorkoutLogStorage>,
    ) -> Self {
        let progression =
            ProgressionAnalyzer::new(Arc::clone(&catalog), config.progression.clone());
        Self {
            pairing: PairingEngine::new(Arc::clone(&catalog), config.pairing.clone()),
            user_tracker: UserProgressTracker::new(Arc::clone(&catalog), config.tracker.clone()),
            couple_tracker: CoupleProgressTracker::new(),
            periodization: PeriodizationManager::new(config.periodization.clone()),
            feedback: FeedbackProcessor::new(Arc::clone(&catalog), progression.clone()),
            progression,
            catalog,
            profiles,
            couples,
            plans,
            logs,
        }
    }

    /// Read-only access to the catalog this service was built over
    #[must_use]
    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    /// Direct access to the progression analyzer
    #[must_use]
    pub const fn progression(&self) -> &ProgressionAnalyzer {
        &self.progression
    }

    /// Generate a workout for a couple from stored state
    ///
    /// # Errors
    ///
    /// Returns not-found when the couple or either profile is missing, and
    /// propagates storage failures.
    pub async fn generate_workout(
        &self,
        couple_id: uuid::Uuid,
        available_equipment: Vec<Equipment>,
        available_space: SpaceRequirement,
        target_muscle_groups: Vec<MuscleGroup>,
    ) -> AppResult<GeneratedWorkout> {
        let couple = self
            .couples
            .get(couple_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("couple {couple_id}")))?;

        let now = Utc::now();
        let profile_a = self.load_profile(couple.user_a).await?;
        let profile_b = self.load_profile(couple.user_b).await?;
        // Fatigue decays between sessions; apply it on reload.
        let profile_a = self.user_tracker.decay_fatigue(&profile_a, now);
        let profile_b = self.user_tracker.decay_fatigue(&profile_b, now);

        let recent_exercise_ids = self.recent_exercise_ids(couple_id).await?;
        let phase = self
            .plans
            .get(couple_id)
            .await?
            .map(|plan| plan.current_phase);

        let input = PairingInput {
            couple,
            profile_a,
            profile_b,
            available_equipment,
            available_space,
            target_muscle_groups,
            recent_exercise_ids,
            phase,
            intensity_adjustment: 0.0,
        };
        self.pairing.generate_workout(&input)
    }

    /// Complete a joint session: apply both logs, the couple update, and feedback
    ///
    /// The two individual updates are independent; the couple update runs
    /// only after both, since it reads both final profiles.
    ///
    /// # Errors
    ///
    /// Propagates membership violations from the trackers and storage
    /// failures from the adapters.
    pub async fn complete_workout(
        &self,
        log_a: WorkoutLog,
        log_b: WorkoutLog,
        feedback_a: Option<WorkoutFeedback>,
        feedback_b: Option<WorkoutFeedback>,
        available_equipment: &[Equipment],
    ) -> AppResult<CompletedSession> {
        if log_a.workout_id != log_b.workout_id || log_a.couple_id != log_b.couple_id {
            return Err(AppError::invalid_input(
                "partner logs do not describe the same session",
            ));
        }

        let couple = self
            .couples
            .get(log_a.couple_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("couple {}", log_a.couple_id)))?;

        let profile_a = self.load_profile(couple.user_a).await?;
        let profile_b = self.load_profile(couple.user_b).await?;

        let profile_a = self.user_tracker.update_after_workout(&profile_a, &log_a)?;
        let profile_b = self.user_tracker.update_after_workout(&profile_b, &log_b)?;
        self.profiles.save(&profile_a).await?;
        self.profiles.save(&profile_b).await?;
        self.logs.save(&log_a).await?;
        self.logs.save(&log_b).await?;

        let mut couple = self.couple_tracker.update_after_workout(
            &couple,
            &log_a,
            &profile_a,
            &profile_b,
            log_a.strategy,
            feedback_a.as_ref(),
            feedback_b.as_ref(),
        )?;

        let feedback_a = match feedback_a {
            Some(feedback) => Some(
                self.process_feedback(&profile_a, &couple, &log_a, &feedback, available_equipment)
                    .await?,
            ),
            None => None,
        };
        let feedback_b = match feedback_b {
            Some(feedback) => Some(
                self.process_feedback(&profile_b, &couple, &log_b, &feedback, available_equipment)
                    .await?,
            ),
            None => None,
        };

        // Fold couple-level pairing adjustments back into the stored profile.
        for processed in [feedback_a.as_ref(), feedback_b.as_ref()].into_iter().flatten() {
            for strategy in &processed.couple_adjustments.avoid_strategies {
                if !couple.avoided_strategies.contains(strategy) {
                    couple.avoided_strategies.push(*strategy);
                }
                couple.preferred_strategies.retain(|s| s != strategy);
            }
            for strategy in &processed.couple_adjustments.prefer_strategies {
                if !couple.preferred_strategies.contains(strategy)
                    && !couple.avoided_strategies.contains(strategy)
                {
                    couple.preferred_strategies.push(*strategy);
                }
            }
        }
        self.couples.save(&couple).await?;

        info!(
            couple = %couple.couple_id,
            workout = %log_a.workout_id,
            "joint session completed and persisted"
        );
        Ok(CompletedSession {
            profile_a,
            profile_b,
            couple,
            feedback_a,
            feedback_b,
        })
    }

    /// Advance the couple's periodization plan by one week
    ///
    /// The partner whose profile shows the more conservative signal drives
    /// the update, so a struggling partner forces the deload for both.
    ///
    /// # Errors
    ///
    /// Returns not-found when the couple is missing; a missing plan starts a
    /// fresh one in the adaptation phase.
    pub async fn weekly_plan_update(&self, couple_id: uuid::Uuid) -> AppResult<PeriodizationPlan> {
        let couple = self
            .couples
            .get(couple_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("couple {couple_id}")))?;

        let now = Utc::now();
        let plan = match self.plans.get(couple_id).await? {
            Some(plan) => plan,
            None => PeriodizationPlan::new(couple_id, now),
        };

        let profile_a = self.load_profile(couple.user_a).await?;
        let profile_b = self.load_profile(couple.user_b).await?;
        let driver = more_conservative(&profile_a, &profile_b);

        let updated = self.periodization.update_plan_weekly(&plan, driver, now);
        self.plans.save(&updated).await?;
        Ok(updated)
    }

    async fn process_feedback(
        &self,
        profile: &UserProgressProfile,
        couple: &CoupleProgressProfile,
        workout: &WorkoutLog,
        feedback: &WorkoutFeedback,
        available_equipment: &[Equipment],
    ) -> AppResult<ProcessedFeedback> {
        let mut recent: HashMap<String, Vec<ExerciseLog>> = HashMap::new();
        for entry in &workout.entries {
            if recent.contains_key(&entry.exercise_id) {
                continue;
            }
            let history = self
                .logs
                .recent_exercise_logs(
                    workout.user_id,
                    &entry.exercise_id,
                    RECENT_LOGS_PER_EXERCISE,
                )
                .await?;
            recent.insert(entry.exercise_id.clone(), history);
        }

        self.feedback.process_workout_feedback(&FeedbackInput {
            profile,
            couple,
            workout,
            feedback,
            recent_exercise_logs: &recent,
            available_equipment,
        })
    }

    async fn recent_exercise_ids(&self, couple_id: uuid::Uuid) -> AppResult<Vec<String>> {
        let recent = self
            .logs
            .list_by_couple(couple_id, RECENT_SESSIONS_FOR_VARIETY * 2)
            .await?;
        let mut ids = Vec::new();
        for log in recent {
            for entry in log.entries {
                if !ids.contains(&entry.exercise_id) {
                    ids.push(entry.exercise_id);
                }
            }
        }
        Ok(ids)
    }

    async fn load_profile(&self, user_id: uuid::Uuid) -> AppResult<UserProgressProfile> {
        self.profiles
            .get(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("profile {user_id}")).with_user_id(user_id))
    }
}

/// Pick the profile with the weaker progression signal
fn more_conservative<'a>(
    a: &'a UserProgressProfile,
    b: &'a UserProgressProfile,
) -> &'a UserProgressProfile {
    let rank = |p: &UserProgressProfile| match p.progression_rate {
        ProgressionRate::Declining => 0,
        ProgressionRate::Steady => 1,
        ProgressionRate::Improving => 2,
    };
    let fatigue_rank =
        |p: &UserProgressProfile| std::cmp::Reverse(p.recovery.overall);
    if (rank(a), fatigue_rank(a)) <= (rank(b), fatigue_rank(b)) {
        a
    } else {
        b
    }
}
