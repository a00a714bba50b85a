// ABOUTME: Fuses performance-derived and self-reported signals into concrete adjustments
// ABOUTME: Pain reports always surface as high-priority recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Feedback Processor
//!
//! Extracts implicit signals from a completed workout log, fuses them with
//! explicit post-workout feedback, and produces per-exercise progression
//! adjustments, preference updates, warnings, couple-level pairing
//! adjustments, and a prioritized recommendation list.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::ExerciseCatalog;
use crate::errors::{AppError, AppResult};
use crate::models::couple_profile::{CoupleProgressProfile, GapTrend};
use crate::models::exercise::Equipment;
use crate::models::feedback::{
    CouplePairingAdjustments, ExerciseAdjustment, FocusArea, FormTrend, ImplicitSignals,
    IntensityShift, PerceivedDifficulty, PerformanceVsPrescription, PrioritizedRecommendation,
    ProcessedFeedback, RecommendationPriority, WorkoutFeedback,
};
use crate::models::user_profile::{FatigueLevel, UserProgressProfile};
use crate::models::workout::{ExerciseLog, WorkoutLog};
use crate::progression::{ProgressionAnalyzer, ProgressionChange};

/// Rep margin treated as meaningfully over/under the prescription
const PERFORMANCE_MARGIN: f64 = 0.10;
/// Form drop below the mastery average that raises a warning
const FORM_DECLINE_WARNING: f64 = 0.5;
/// Form movement treated as a trend rather than noise
const FORM_TREND_MARGIN: f64 = 0.3;
/// Session enjoyment at or above which completed exercises become liked
const LIKED_ENJOYMENT: u8 = 4;
/// Session enjoyment at or below which the session counts against exercises
const DISLIKED_ENJOYMENT: u8 = 2;
/// Mean enjoyment below which a strategy lands on the avoid list
const AVOID_ENJOYMENT: f64 = 2.5;
/// Mean enjoyment at or above which a strategy lands on the prefer list
const PREFER_ENJOYMENT: f64 = 4.0;
/// Sessions of a strategy required before it is judged
const STRATEGY_SAMPLE: usize = 2;
/// Bound on the couple-level intensity adjustment
const INTENSITY_ADJUSTMENT_BOUND: f64 = 0.10;
/// Average RIR below which intensity should drop
const LOW_RIR: f64 = 1.0;
/// Average RIR above which intensity should rise
const HIGH_RIR: f64 = 3.5;
/// Absolute gap at or above which gap reduction becomes a focus area
const GAP_FOCUS_MAGNITUDE: f64 = 35.0;
/// Connection rating below which partner connection becomes a focus area
const CONNECTION_FOCUS_RATING: u8 = 3;

/// Input bundle for feedback processing
#[derive(Debug, Clone, Copy)]
pub struct FeedbackInput<'a> {
    /// Person's profile after the individual update for this session
    pub profile: &'a UserProgressProfile,
    /// Couple profile after the couple update for this session
    pub couple: &'a CoupleProgressProfile,
    /// The completed workout log
    pub workout: &'a WorkoutLog,
    /// Explicit post-workout feedback
    pub feedback: &'a WorkoutFeedback,
    /// Recent logs per exercise, oldest first, including this session's
    pub recent_exercise_logs: &'a HashMap<String, Vec<ExerciseLog>>,
    /// Equipment available where the couple trains
    pub available_equipment: &'a [Equipment],
}

/// Processor that turns raw and subjective feedback into adjustments
#[derive(Debug, Clone)]
pub struct FeedbackProcessor {
    catalog: Arc<ExerciseCatalog>,
    progression: ProgressionAnalyzer,
}

impl FeedbackProcessor {
    /// Create a processor over a catalog and progression analyzer
    #[must_use]
    pub fn new(catalog: Arc<ExerciseCatalog>, progression: ProgressionAnalyzer) -> Self {
        Self {
            catalog,
            progression,
        }
    }

    /// Process one person's workout feedback
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the feedback, workout, and
    /// profile do not all refer to the same person and session.
    pub fn process_workout_feedback(
        &self,
        input: &FeedbackInput<'_>,
    ) -> AppResult<ProcessedFeedback> {
        validate_ownership(input)?;

        let implicit = self.extract_implicit_signals(input);
        let exercise_adjustments = self.exercise_adjustments(input);
        let (new_liked, new_disliked) = preference_updates(input);
        let intensity_preference =
            infer_intensity_shift(&implicit, input.feedback.perceived_difficulty);
        let warnings = self.collect_warnings(input, &implicit);
        let couple_adjustments =
            couple_adjustments(input, intensity_preference);
        let recommendations = self.build_recommendations(
            input,
            &implicit,
            &exercise_adjustments,
            intensity_preference,
        );

        debug!(
            user = %input.workout.user_id,
            workout = %input.workout.workout_id,
            adjustments = exercise_adjustments.len(),
            warnings = warnings.len(),
            "feedback processed"
        );

        Ok(ProcessedFeedback {
            user_id: input.workout.user_id,
            workout_id: input.workout.workout_id,
            implicit,
            exercise_adjustments,
            new_liked,
            new_disliked,
            intensity_preference,
            warnings,
            couple_adjustments,
            recommendations,
        })
    }

    /// Performance-derived signals from the log alone
    fn extract_implicit_signals(&self, input: &FeedbackInput<'_>) -> ImplicitSignals {
        let workout = input.workout;
        let attempted: Vec<&ExerciseLog> =
            workout.entries.iter().filter(|e| !e.skipped).collect();

        let average_rir = if attempted.is_empty() {
            None
        } else {
            Some(
                attempted.iter().map(|e| f64::from(e.rir)).sum::<f64>() / attempted.len() as f64,
            )
        };

        ImplicitSignals {
            completion_rate: workout.completion_rate(),
            skip_rate: workout.skip_rate(),
            performance: classify_performance(&attempted),
            average_rir,
            form_trend: self.form_trend(input, &attempted),
        }
    }

    /// Form direction against historical mastery averages
    fn form_trend(
        &self,
        input: &FeedbackInput<'_>,
        attempted: &[&ExerciseLog],
    ) -> FormTrend {
        let deltas: Vec<f64> = attempted
            .iter()
            .filter_map(|entry| {
                input
                    .profile
                    .mastery(&entry.exercise_id)
                    .map(|m| entry.form_quality.score() - m.average_form)
            })
            .collect();
        if deltas.is_empty() {
            return FormTrend::Stable;
        }

        let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
        if mean >= FORM_TREND_MARGIN {
            FormTrend::Improving
        } else if mean <= -FORM_TREND_MARGIN {
            FormTrend::Declining
        } else {
            FormTrend::Stable
        }
    }

    /// Delegate each logged exercise to the progression analyzer
    fn exercise_adjustments(&self, input: &FeedbackInput<'_>) -> Vec<ExerciseAdjustment> {
        let mut seen: Vec<&str> = Vec::new();
        let mut adjustments = Vec::new();

        for entry in &input.workout.entries {
            if seen.contains(&entry.exercise_id.as_str()) {
                continue;
            }
            seen.push(&entry.exercise_id);

            let Some(exercise) = self.catalog.get(&entry.exercise_id) else {
                continue;
            };
            let fallback = std::slice::from_ref(entry);
            let history: &[ExerciseLog] = input
                .recent_exercise_logs
                .get(&entry.exercise_id)
                .map_or(fallback, Vec::as_slice);

            let recommendation = self.progression.analyze(
                input.profile.mastery(&entry.exercise_id),
                history,
                exercise,
                input.available_equipment,
            );
            if recommendation.change != ProgressionChange::Maintain {
                adjustments.push(ExerciseAdjustment {
                    exercise_id: entry.exercise_id.clone(),
                    recommendation,
                });
            }
        }

        adjustments
    }

    /// Fatigue and form warnings
    fn collect_warnings(
        &self,
        input: &FeedbackInput<'_>,
        implicit: &ImplicitSignals,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        for entry in &input.workout.entries {
            if entry.felt_pain {
                let name = self
                    .catalog
                    .get(&entry.exercise_id)
                    .map_or(entry.exercise_id.clone(), |e| e.name.clone());
                warnings.push(format!("pain reported during {name}"));
            }
        }

        if input.profile.recovery.overall == FatigueLevel::Exhausted {
            warnings.push("overall fatigue is at exhaustion; recovery is overdue".into());
        }

        if implicit.form_trend == FormTrend::Declining {
            for entry in input.workout.entries.iter().filter(|e| !e.skipped) {
                if let Some(mastery) = input.profile.mastery(&entry.exercise_id) {
                    if mastery.average_form - entry.form_quality.score() >= FORM_DECLINE_WARNING {
                        warnings.push(format!(
                            "form on {} fell well below your usual standard",
                            entry.exercise_id
                        ));
                    }
                }
            }
        }

        warnings
    }

    /// Prioritized human-readable list: pain high, form/intensity medium,
    /// gap/recovery low
    fn build_recommendations(
        &self,
        input: &FeedbackInput<'_>,
        implicit: &ImplicitSignals,
        adjustments: &[ExerciseAdjustment],
        intensity: IntensityShift,
    ) -> Vec<PrioritizedRecommendation> {
        let mut recommendations = Vec::new();

        for entry in input.workout.entries.iter().filter(|e| e.felt_pain) {
            let name = self
                .catalog
                .get(&entry.exercise_id)
                .map_or(entry.exercise_id.clone(), |e| e.name.clone());
            recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::High,
                message: format!(
                    "{name} caused pain; switch to an easier variation and stop if it recurs"
                ),
            });
        }

        for adjustment in adjustments {
            recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Medium,
                message: adjustment.recommendation.reason.clone(),
            });
        }

        match intensity {
            IntensityShift::Lower => recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Medium,
                message: "recent sessions ran too hot; ease the intensity next time".into(),
            }),
            IntensityShift::Higher => recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Medium,
                message: "recent sessions left plenty in reserve; nudge the intensity up".into(),
            }),
            IntensityShift::Same => {}
        }

        if implicit.form_trend == FormTrend::Declining {
            recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Medium,
                message: "form slipped this session; slow the tempo before adding difficulty"
                    .into(),
            });
        }

        if input.couple.gap_trend == GapTrend::Widening {
            recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Low,
                message: "the ability gap between you is widening; pairings will compensate"
                    .into(),
            });
        }

        if input.profile.recovery.overall >= FatigueLevel::Fatigued {
            recommendations.push(PrioritizedRecommendation {
                priority: RecommendationPriority::Low,
                message: "accumulated fatigue is high; favor lighter sessions this week".into(),
            });
        }

        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }
}

fn validate_ownership(input: &FeedbackInput<'_>) -> AppResult<()> {
    if input.feedback.user_id != input.workout.user_id
        || input.workout.user_id != input.profile.user_id
    {
        return Err(AppError::invalid_input(format!(
            "feedback from {} does not match workout {} owner {}",
            input.feedback.user_id, input.workout.workout_id, input.workout.user_id
        ))
        .with_user_id(input.workout.user_id));
    }
    if input.feedback.workout_id != input.workout.workout_id {
        return Err(AppError::invalid_input(format!(
            "feedback refers to workout {}, not {}",
            input.feedback.workout_id, input.workout.workout_id
        )));
    }
    Ok(())
}

/// Classify mean actual-vs-prescribed reps across rep-based entries
fn classify_performance(attempted: &[&ExerciseLog]) -> PerformanceVsPrescription {
    let ratios: Vec<f64> = attempted
        .iter()
        .filter_map(|e| match (e.actual_reps, e.prescribed_reps) {
            (Some(actual), Some(prescribed)) if prescribed > 0 => {
                Some(f64::from(actual) / f64::from(prescribed))
            }
            _ => None,
        })
        .collect();
    if ratios.is_empty() {
        return PerformanceVsPrescription::Met;
    }

    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    if mean > 1.0 + PERFORMANCE_MARGIN {
        PerformanceVsPrescription::Exceeded
    } else if mean < 1.0 - PERFORMANCE_MARGIN {
        PerformanceVsPrescription::Below
    } else {
        PerformanceVsPrescription::Met
    }
}

/// Liked: completed pain-free exercises in a well-rated session.
/// Disliked: exercises skipped in at least two recent sessions, or painful
/// during a session rated very poorly.
fn preference_updates(input: &FeedbackInput<'_>) -> (Vec<String>, Vec<String>) {
    let mut new_liked = Vec::new();
    let mut new_disliked = Vec::new();
    let preferences = &input.profile.preferences;

    for entry in &input.workout.entries {
        let id = &entry.exercise_id;
        let already_known = preferences.liked_exercises.contains(id)
            || preferences.disliked_exercises.contains(id)
            || new_liked.contains(id)
            || new_disliked.contains(id);
        if already_known {
            continue;
        }

        if input.feedback.enjoyment >= LIKED_ENJOYMENT && entry.completed && !entry.felt_pain {
            new_liked.push(id.clone());
            continue;
        }

        let skip_count = input
            .recent_exercise_logs
            .get(id)
            .map_or(usize::from(entry.skipped), |logs| {
                logs.iter().filter(|l| l.skipped).count()
            });
        if skip_count >= 2 || (input.feedback.enjoyment <= DISLIKED_ENJOYMENT && entry.felt_pain) {
            new_disliked.push(id.clone());
        }
    }

    (new_liked, new_disliked)
}

/// Explicit difficulty rating wins; otherwise the RIR average decides
fn infer_intensity_shift(
    implicit: &ImplicitSignals,
    perceived: PerceivedDifficulty,
) -> IntensityShift {
    match perceived {
        PerceivedDifficulty::TooHard => return IntensityShift::Lower,
        PerceivedDifficulty::TooEasy => return IntensityShift::Higher,
        PerceivedDifficulty::JustRight => {}
    }

    match implicit.average_rir {
        Some(rir) if rir < LOW_RIR => IntensityShift::Lower,
        Some(rir) if rir > HIGH_RIR => IntensityShift::Higher,
        _ => IntensityShift::Same,
    }
}

/// Couple-level pairing adjustments from strategy history and this session
fn couple_adjustments(
    input: &FeedbackInput<'_>,
    intensity: IntensityShift,
) -> CouplePairingAdjustments {
    let mut per_strategy: HashMap<crate::models::workout::PairingStrategy, Vec<f64>> =
        HashMap::new();
    for record in &input.couple.strategy_history {
        per_strategy
            .entry(record.strategy)
            .or_default()
            .push(record.enjoyment);
    }

    let mut avoid_strategies = Vec::new();
    let mut prefer_strategies = Vec::new();
    for (strategy, ratings) in &per_strategy {
        if ratings.len() < STRATEGY_SAMPLE {
            continue;
        }
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        if mean < AVOID_ENJOYMENT {
            avoid_strategies.push(*strategy);
        } else if mean >= PREFER_ENJOYMENT {
            prefer_strategies.push(*strategy);
        }
    }
    avoid_strategies.sort_by_key(|s| s.band());
    prefer_strategies.sort_by_key(|s| s.band());

    let intensity_adjustment = match intensity {
        IntensityShift::Lower => -INTENSITY_ADJUSTMENT_BOUND,
        IntensityShift::Same => 0.0,
        IntensityShift::Higher => INTENSITY_ADJUSTMENT_BOUND,
    };

    let mut focus_areas = Vec::new();
    let wide_gap = input
        .couple
        .latest_gap()
        .is_some_and(|gap| gap.abs() >= GAP_FOCUS_MAGNITUDE);
    if wide_gap && input.couple.gap_trend == GapTrend::Widening {
        focus_areas.push(FocusArea::GapReduction);
    }
    if input.feedback.partner_connection < CONNECTION_FOCUS_RATING {
        focus_areas.push(FocusArea::PartnerConnection);
    }

    CouplePairingAdjustments {
        avoid_strategies,
        prefer_strategies,
        intensity_adjustment,
        focus_areas,
    }
}
