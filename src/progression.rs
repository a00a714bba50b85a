// ABOUTME: Per-exercise progress/regress/maintain analysis over recent logs
// ABOUTME: Regression triggers run first and pain always wins with full confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Progression Analyzer
//!
//! Evaluates one exercise for one person over their most recent logs and
//! recommends progressing, regressing, or maintaining. Safety rules are
//! checked before any progression logic: a pain report forces an immediate
//! regression regardless of every other signal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ExerciseCatalog;
use crate::config::ProgressionConfig;
use crate::models::exercise::{Equipment, ExerciseDefinition};
use crate::models::user_profile::ExerciseMastery;
use crate::models::workout::{ExerciseLog, FormQuality};
use crate::physiological_constants::progression::{
    FAILED_COMPLETION_CONFIDENCE, HIGH_RIR_SESSIONS, LOAD_INCREMENT_KG, PAIN_CONFIDENCE,
    PAIN_FREE_SESSIONS, POOR_FORM_CONFIDENCE, PROGRESSION_CONFIDENCE, TOO_EASY_REPORTS,
    TOO_HARD_CONFIDENCE, ZERO_RIR_CONFIDENCE,
};
use crate::physiological_constants::rir::EASY_RIR_THRESHOLD;

/// Recommended change for one exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum ProgressionChange {
    /// Switch to the linked easier variation
    RegressVariation {
        /// Catalog id of the easier variation
        to: String,
    },
    /// Keep the exercise but lower the rep prescription
    ReduceReps {
        /// Reps to remove, respecting the prescription floor
        by: u32,
    },
    /// Switch to the linked harder variation
    ProgressVariation {
        /// Catalog id of the harder variation
        to: String,
    },
    /// Keep the exercise and raise the rep prescription
    AddReps {
        /// Reps to add
        by: u32,
    },
    /// Keep the exercise and add external load
    AddLoad {
        /// Load increment in kilograms
        kg: f64,
    },
    /// No change recommended
    Maintain,
}

/// One analysis result for one exercise and person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRecommendation {
    /// Exercise the recommendation applies to
    pub exercise_id: String,
    /// Recommended change
    #[serde(flatten)]
    pub change: ProgressionChange,
    /// Confidence in the recommendation, in [0, 1]
    pub confidence: f64,
    /// Human-readable justification
    pub reason: String,
}

/// Analyzer for per-exercise progression decisions
#[derive(Debug, Clone)]
pub struct ProgressionAnalyzer {
    catalog: Arc<ExerciseCatalog>,
    config: ProgressionConfig,
}

impl ProgressionAnalyzer {
    /// Create an analyzer over a catalog with the given configuration
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>, config: ProgressionConfig) -> Self {
        Self { catalog, config }
    }

    /// Analyze one exercise from its mastery record and recent logs
    ///
    /// `recent_logs` is ordered oldest first; only the most recent window is
    /// evaluated. An empty window yields a maintain recommendation.
    #[must_use]
    pub fn analyze(
        &self,
        mastery: Option<&ExerciseMastery>,
        recent_logs: &[ExerciseLog],
        exercise: &ExerciseDefinition,
        available_equipment: &[Equipment],
    ) -> ProgressionRecommendation {
        let window_start = recent_logs.len().saturating_sub(self.config.evaluation_window);
        let window = &recent_logs[window_start..];

        if let Some(recommendation) = self.check_regression(window, exercise) {
            debug!(exercise = %exercise.id, confidence = recommendation.confidence, "regression triggered");
            return recommendation;
        }

        if let Some(recommendation) =
            self.check_progression(mastery, window, exercise, available_equipment)
        {
            debug!(exercise = %exercise.id, "progression recommended");
            return recommendation;
        }

        ProgressionRecommendation {
            exercise_id: exercise.id.clone(),
            change: ProgressionChange::Maintain,
            confidence: 0.5,
            reason: format!("{} is at an appropriate level; keep current prescription", exercise.name),
        }
    }

    /// Regression triggers in priority order; the first hit wins
    fn check_regression(
        &self,
        window: &[ExerciseLog],
        exercise: &ExerciseDefinition,
    ) -> Option<ProgressionRecommendation> {
        if window.is_empty() {
            return None;
        }

        if window.iter().any(|log| log.felt_pain) {
            return Some(self.regress(
                exercise,
                window,
                PAIN_CONFIDENCE,
                format!("pain was reported during {}", exercise.name),
            ));
        }

        let failed = window.iter().filter(|l| !l.skipped && !l.completed).count();
        if failed >= 2 {
            return Some(self.regress(
                exercise,
                window,
                FAILED_COMPLETION_CONFIDENCE,
                format!("{failed} of the last {} sessions were not completed", window.len()),
            ));
        }

        let too_hard = window.iter().filter(|l| l.too_hard).count();
        if too_hard >= 2 {
            return Some(self.regress(
                exercise,
                window,
                TOO_HARD_CONFIDENCE,
                format!("{} was reported too hard {too_hard} times", exercise.name),
            ));
        }

        let poor_form = window
            .iter()
            .filter(|l| l.form_quality == FormQuality::Poor)
            .count();
        if poor_form >= 2 {
            return Some(self.regress(
                exercise,
                window,
                POOR_FORM_CONFIDENCE,
                format!("form broke down in {poor_form} recent sessions"),
            ));
        }

        let attempted: Vec<&ExerciseLog> = window.iter().filter(|l| !l.skipped).collect();
        if attempted.len() >= 3 {
            let average_rir = attempted.iter().map(|l| f64::from(l.rir)).sum::<f64>()
                / attempted.len() as f64;
            if average_rir <= 0.0 {
                return Some(self.regress(
                    exercise,
                    window,
                    ZERO_RIR_CONFIDENCE,
                    "every recent session was taken to failure".into(),
                ));
            }
        }

        None
    }

    /// Readiness gate followed by the progression preference order
    fn check_progression(
        &self,
        mastery: Option<&ExerciseMastery>,
        window: &[ExerciseLog],
        exercise: &ExerciseDefinition,
        available_equipment: &[Equipment],
    ) -> Option<ProgressionRecommendation> {
        let mastery = mastery?;
        if mastery.times_performed < self.config.min_sessions_for_progression
            || mastery.average_form < self.config.form_threshold
        {
            return None;
        }

        let attempted: Vec<&ExerciseLog> = window.iter().filter(|l| !l.skipped).collect();
        if attempted.is_empty() {
            return None;
        }
        let completion_rate = attempted.iter().filter(|l| l.completed).count() as f64
            / attempted.len() as f64;
        if completion_rate < self.config.completion_rate_threshold {
            return None;
        }

        let recent_pain = window
            .iter()
            .rev()
            .take(PAIN_FREE_SESSIONS)
            .any(|l| l.felt_pain);
        if recent_pain {
            return None;
        }

        let consecutive_high_rir = longest_consecutive(window, |l| {
            !l.skipped && f64::from(l.rir) > EASY_RIR_THRESHOLD
        });
        let too_easy = window.iter().filter(|l| l.too_easy).count();
        if consecutive_high_rir < HIGH_RIR_SESSIONS && too_easy < TOO_EASY_REPORTS {
            return None;
        }

        let change = self.progression_change(mastery, exercise, available_equipment);
        let reason = match &change {
            ProgressionChange::ProgressVariation { to } => {
                format!("form is solid; ready to attempt {to}")
            }
            ProgressionChange::AddReps { by } => {
                format!("{} has become easy; add {by} reps", exercise.name)
            }
            ProgressionChange::AddLoad { kg } => {
                format!("{} has become easy; add {kg} kg", exercise.name)
            }
            _ => format!("{} has become easy", exercise.name),
        };

        Some(ProgressionRecommendation {
            exercise_id: exercise.id.clone(),
            change,
            confidence: PROGRESSION_CONFIDENCE,
            reason,
        })
    }

    /// Harder variation only when form is progression-ready; otherwise reps,
    /// then external load when the equipment allows it
    fn progression_change(
        &self,
        mastery: &ExerciseMastery,
        exercise: &ExerciseDefinition,
        available_equipment: &[Equipment],
    ) -> ProgressionChange {
        if mastery.form_ready_for_progression {
            if let Some(harder) = self.catalog.harder_variation(&exercise.id) {
                return ProgressionChange::ProgressVariation {
                    to: harder.id.clone(),
                };
            }
        }

        if exercise.default_reps.is_some() {
            return ProgressionChange::AddReps {
                by: self.config.rep_increase,
            };
        }

        if exercise.is_loadable
            && available_equipment
                .iter()
                .any(|e| matches!(e, Equipment::Dumbbells | Equipment::Kettlebell))
        {
            return ProgressionChange::AddLoad {
                kg: LOAD_INCREMENT_KG,
            };
        }

        if let Some(harder) = self.catalog.harder_variation(&exercise.id) {
            return ProgressionChange::ProgressVariation {
                to: harder.id.clone(),
            };
        }

        ProgressionChange::Maintain
    }

    /// Easier variation when linked, otherwise a bounded rep reduction
    fn regress(
        &self,
        exercise: &ExerciseDefinition,
        window: &[ExerciseLog],
        confidence: f64,
        reason: String,
    ) -> ProgressionRecommendation {
        let change = if let Some(easier) = self.catalog.easier_variation(&exercise.id) {
            ProgressionChange::RegressVariation {
                to: easier.id.clone(),
            }
        } else {
            let current_reps = window
                .iter()
                .rev()
                .find_map(|l| l.prescribed_reps)
                .or(exercise.default_reps)
                .unwrap_or(self.config.min_reps);
            ProgressionChange::ReduceReps {
                by: current_reps
                    .saturating_sub(self.config.min_reps)
                    .min(self.config.rep_decrease),
            }
        };

        ProgressionRecommendation {
            exercise_id: exercise.id.clone(),
            change,
            confidence,
            reason,
        }
    }
}

/// Longest run of consecutive window entries matching the predicate
fn longest_consecutive(window: &[ExerciseLog], predicate: impl Fn(&ExerciseLog) -> bool) -> usize {
    let mut best = 0;
    let mut run = 0;
    for log in window {
        if predicate(log) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
