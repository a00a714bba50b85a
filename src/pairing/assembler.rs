// ABOUTME: Selects top-scoring pairs into warm-up, main, and cooldown sections
// ABOUTME: Degrades to partial coverage or a flagged random fallback instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use chrono::Utc;
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::ExerciseCatalog;
use crate::config::PairingConfig;
use crate::models::exercise::{
    ExerciseCategory, ExerciseDefinition, IntensityLevel, InteractionType, MuscleGroup,
};
use crate::models::periodization::PhaseParameters;
use crate::models::user_profile::UserProgressProfile;
use crate::models::workout::{
    ExercisePair, GeneratedWorkout, PairingStrategy, Prescription, WorkoutDifficulty,
};
use crate::pairing::candidates::{CandidateGenerator, CandidatePair, PairingContext};
use crate::pairing::scoring::PairScorer;

/// Maximum warm-up exercise difficulty
const WARM_UP_MAX_DIFFICULTY: u8 = 2;

/// Assembles a complete workout from scored candidate pairs
#[derive(Debug, Clone)]
pub struct WorkoutAssembler {
    config: PairingConfig,
}

impl WorkoutAssembler {
    /// Create an assembler with the given pairing configuration
    #[must_use]
    pub const fn new(config: PairingConfig) -> Self {
        Self { config }
    }

    /// Assemble the three workout sections for the selected strategy
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn assemble(
        &self,
        catalog: &ExerciseCatalog,
        ctx: &PairingContext<'_>,
        strategy: PairingStrategy,
        target_muscle_groups: &[MuscleGroup],
        recent_exercise_ids: &[String],
        phase_parameters: PhaseParameters,
        intensity_adjustment: f64,
        rng: &mut impl Rng,
    ) -> GeneratedWorkout {
        let generator = CandidateGenerator::new(catalog, self.config.partner_comfort_threshold);
        let scorer = PairScorer::new(self.config.weights.clone());
        let volume = phase_parameters.volume_multiplier * (1.0 + intensity_adjustment);
        let mut warnings = Vec::new();

        let warm_up = self.warm_up_section(catalog, ctx, strategy, volume, &mut warnings);
        let main = self.main_section(
            &generator,
            &scorer,
            ctx,
            strategy,
            target_muscle_groups,
            recent_exercise_ids,
            volume,
            rng,
            &mut warnings,
        );
        let cool_down = self.cool_down_section(catalog, ctx, strategy, volume);

        let difficulty = overall_difficulty(&main);
        let estimated_duration_minutes =
            self.estimate_duration(&warm_up, &main, &cool_down);

        debug!(
            strategy = ?strategy,
            warm_up = warm_up.len(),
            main = main.len(),
            cool_down = cool_down.len(),
            minutes = estimated_duration_minutes,
            "workout assembled"
        );

        GeneratedWorkout {
            workout_id: Uuid::new_v4(),
            couple_id: ctx.couple.couple_id,
            strategy,
            warm_up,
            main,
            cool_down,
            estimated_duration_minutes,
            difficulty,
            warnings,
            generated_at: Utc::now(),
        }
    }

    /// Identical low-intensity dynamic pairs both partners can do
    fn warm_up_section(
        &self,
        catalog: &ExerciseCatalog,
        ctx: &PairingContext<'_>,
        strategy: PairingStrategy,
        volume: f64,
        warnings: &mut Vec<String>,
    ) -> Vec<ExercisePair> {
        let mut movements: Vec<&ExerciseDefinition> = catalog
            .by_category(ExerciseCategory::Cardio)
            .chain(catalog.by_category(ExerciseCategory::Strength))
            .filter(|e| e.intensity == IntensityLevel::Low)
            .filter(|e| e.difficulty <= WARM_UP_MAX_DIFFICULTY)
            .filter(|e| both_pass(e, ctx))
            .collect();
        movements.sort_by(|a, b| (a.difficulty, &a.id).cmp(&(b.difficulty, &b.id)));
        movements.dedup_by(|a, b| a.id == b.id);

        if movements.len() < self.config.warm_up_min {
            warnings.push(format!(
                "only {} safe warm-up movements available",
                movements.len()
            ));
        }

        movements
            .into_iter()
            .take(self.config.warm_up_max)
            .map(|exercise| {
                identical_pair(exercise, ctx, strategy, InteractionType::Independent, volume)
            })
            .collect()
    }

    /// Top-scoring pair per muscle group, two for the core group
    #[allow(clippy::too_many_arguments)]
    fn main_section(
        &self,
        generator: &CandidateGenerator<'_>,
        scorer: &PairScorer,
        ctx: &PairingContext<'_>,
        strategy: PairingStrategy,
        target_muscle_groups: &[MuscleGroup],
        recent_exercise_ids: &[String],
        volume: f64,
        rng: &mut impl Rng,
        warnings: &mut Vec<String>,
    ) -> Vec<ExercisePair> {
        let mut main = Vec::new();

        for &group in target_muscle_groups {
            let candidates = generator.generate(group, strategy, ctx);

            if candidates.is_empty() {
                match generator.fallback_pair(group, ctx, rng) {
                    Some(pair) => {
                        warn!(?group, "no strategy candidates; using random fallback pair");
                        warnings.push(format!(
                            "no {group:?} pair fit the {strategy:?} strategy; \
                             substituted an unscored fallback"
                        ));
                        main.push(build_pair(&pair, ctx, strategy, scorer.fallback_score(), volume));
                    }
                    None => {
                        warn!(?group, "no safe exercises for muscle group");
                        warnings.push(format!(
                            "no safe {group:?} exercise available for both partners"
                        ));
                    }
                }
                continue;
            }

            let mut scored: Vec<(CandidatePair<'_>, crate::models::workout::PairingScore)> =
                candidates
                    .into_iter()
                    .map(|c| {
                        let score = scorer.score(&c, ctx, recent_exercise_ids);
                        (c, score)
                    })
                    .collect();
            scored.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));

            let keep = if group == MuscleGroup::Core {
                self.config.pairs_for_core
            } else {
                self.config.pairs_per_group
            };

            for (candidate, score) in scored.into_iter().take(keep) {
                main.push(build_pair(&candidate, ctx, strategy, score, volume));
            }
        }

        main
    }

    /// Identical flexibility pairs for the cooldown
    fn cool_down_section(
        &self,
        catalog: &ExerciseCatalog,
        ctx: &PairingContext<'_>,
        strategy: PairingStrategy,
        volume: f64,
    ) -> Vec<ExercisePair> {
        let mut stretches: Vec<&ExerciseDefinition> = catalog
            .by_category(ExerciseCategory::Flexibility)
            .filter(|e| both_pass(e, ctx))
            .collect();
        stretches.sort_by(|a, b| a.id.cmp(&b.id));

        stretches
            .into_iter()
            .take(self.config.cool_down_max)
            .map(|exercise| {
                identical_pair(exercise, ctx, strategy, InteractionType::Independent, volume)
            })
            .collect()
    }

    /// Estimated total minutes for the session
    fn estimate_duration(
        &self,
        warm_up: &[ExercisePair],
        main: &[ExercisePair],
        cool_down: &[ExercisePair],
    ) -> u32 {
        let bookends =
            (warm_up.len() + cool_down.len()) as f64 * self.config.section_pair_minutes;

        let main_seconds: f64 = main
            .iter()
            .map(|pair| {
                let sets = pair.partner_a.sets.max(pair.partner_b.sets);
                let set_seconds = pair
                    .partner_a
                    .estimated_set_seconds
                    .max(pair.partner_b.estimated_set_seconds);
                f64::from(sets) * f64::from(set_seconds + self.config.rest_seconds)
            })
            .sum();

        (bookends + main_seconds / 60.0).round() as u32
    }
}

/// Rounded mean difficulty across main pairs, bucketed into five bands
fn overall_difficulty(main: &[ExercisePair]) -> WorkoutDifficulty {
    if main.is_empty() {
        return WorkoutDifficulty::Beginner;
    }
    let mean: f64 = main
        .iter()
        .map(|p| f64::from(p.partner_a.difficulty + p.partner_b.difficulty) / 2.0)
        .sum::<f64>()
        / main.len() as f64;
    WorkoutDifficulty::from_rounded_difficulty(mean.round() as u8)
}

fn both_pass(exercise: &ExerciseDefinition, ctx: &PairingContext<'_>) -> bool {
    use crate::pairing::constraints::check_exercise;
    check_exercise(
        exercise,
        ctx.profile_a,
        ctx.available_equipment,
        ctx.available_space,
    )
    .passed
        && check_exercise(
            exercise,
            ctx.profile_b,
            ctx.available_equipment,
            ctx.available_space,
        )
        .passed
}

fn identical_pair(
    exercise: &ExerciseDefinition,
    ctx: &PairingContext<'_>,
    strategy: PairingStrategy,
    interaction: InteractionType,
    volume: f64,
) -> ExercisePair {
    let candidate = CandidatePair {
        exercise_a: exercise,
        exercise_b: exercise,
        interaction,
        fallback: false,
    };
    // Section pairs are picked directly, not ranked; carry a neutral score
    // with the safety invariant intact.
    let score = crate::models::workout::PairingScore {
        safety: 1.0,
        ability_match: 0.0,
        hr_zone_match: 0.0,
        rir_match: 0.0,
        time_sync: 1.0,
        goal_alignment: 0.0,
        enjoyment: 0.0,
        variety: 0.0,
        connection: connection_value(interaction),
        total: 0.0,
    };
    build_pair(&candidate, ctx, strategy, score, volume)
}

const fn connection_value(interaction: InteractionType) -> f64 {
    match interaction {
        InteractionType::Assisted => 1.0,
        InteractionType::Mirrored => 0.8,
        InteractionType::Competitive => 0.7,
        InteractionType::Independent => 0.4,
    }
}

fn build_pair(
    candidate: &CandidatePair<'_>,
    ctx: &PairingContext<'_>,
    strategy: PairingStrategy,
    score: crate::models::workout::PairingScore,
    volume: f64,
) -> ExercisePair {
    ExercisePair {
        muscle_group: candidate.exercise_a.muscle_group,
        strategy,
        interaction: candidate.interaction,
        partner_a: prescribe(ctx.profile_a, candidate.exercise_a, volume),
        partner_b: prescribe(ctx.profile_b, candidate.exercise_b, volume),
        score,
    }
}

/// Build one partner's prescription, scaling volume for the training phase
fn prescribe(
    profile: &UserProgressProfile,
    exercise: &ExerciseDefinition,
    volume: f64,
) -> Prescription {
    let reps = exercise
        .default_reps
        .map(|r| ((f64::from(r) * volume).round() as u32).max(1));
    let duration_seconds = exercise
        .default_duration_seconds
        .map(|d| ((f64::from(d) * volume).round() as u32).max(5));

    Prescription {
        user_id: profile.user_id,
        exercise_id: exercise.id.clone(),
        exercise_name: exercise.name.clone(),
        difficulty: exercise.difficulty,
        sets: exercise.default_sets,
        reps,
        duration_seconds,
        weight_kg: None,
        intensity: exercise.intensity,
        estimated_set_seconds: exercise.estimated_set_seconds,
    }
}
