// ABOUTME: Weighted multi-factor scoring of candidate pairs
// ABOUTME: Safety is fixed at 1.0 here; unsafe candidates never reach this module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use crate::config::ScoringWeights;
use crate::models::exercise::{
    ExerciseCategory, ExerciseDefinition, IntensityLevel, InteractionType, MuscleGroup,
};
use crate::models::user_profile::{FitnessGoal, UserProgressProfile};
use crate::models::workout::PairingScore;
use crate::pairing::candidates::{target_difficulty, CandidatePair, PairingContext};

/// Computes the nine sub-scores and weighted total for candidate pairs
#[derive(Debug, Clone)]
pub struct PairScorer {
    weights: ScoringWeights,
}

impl PairScorer {
    /// Create a scorer with the given weights
    #[must_use]
    pub const fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score one candidate pair
    ///
    /// All sub-scores are in [0, 1]. The filter runs before generation, so
    /// safety is always exactly 1.0; its dominant weight only matters if a
    /// future code path ever lets an unscreened candidate through.
    #[must_use]
    pub fn score(
        &self,
        pair: &CandidatePair<'_>,
        ctx: &PairingContext<'_>,
        recent_exercise_ids: &[String],
    ) -> PairingScore {
        let safety = 1.0;

        let ability_a = ability_match(pair.exercise_a, ctx.profile_a);
        let ability_b = ability_match(pair.exercise_b, ctx.profile_b);
        let ability = (ability_a + ability_b) / 2.0;

        let hr_zone = zone_match(pair.exercise_a.intensity, pair.exercise_b.intensity);
        let rir = ability_a.min(ability_b);
        let time_sync = time_sync_score(pair.exercise_a, pair.exercise_b);
        let goal_alignment = goal_alignment_score(pair, ctx);
        let enjoyment = (enjoyment_for(ctx.profile_a, &pair.exercise_a.id)
            + enjoyment_for(ctx.profile_b, &pair.exercise_b.id))
            / 2.0;
        let variety = variety_score(pair, recent_exercise_ids);
        let connection = connection_score(pair.interaction);

        let w = &self.weights;
        let total = w.safety * safety
            + w.ability_match * ability
            + w.hr_zone_match * hr_zone
            + w.rir_match * rir
            + w.time_sync * time_sync
            + w.goal_alignment * goal_alignment
            + w.enjoyment * enjoyment
            + w.variety * variety
            + w.connection * connection;

        PairingScore {
            safety,
            ability_match: ability,
            hr_zone_match: hr_zone,
            rir_match: rir,
            time_sync,
            goal_alignment,
            enjoyment,
            variety,
            connection,
            total,
        }
    }

    /// Score assigned to an unscored fallback pair: safety only
    #[must_use]
    pub fn fallback_score(&self) -> PairingScore {
        PairingScore {
            safety: 1.0,
            ability_match: 0.0,
            hr_zone_match: 0.0,
            rir_match: 0.0,
            time_sync: 0.0,
            goal_alignment: 0.0,
            enjoyment: 0.0,
            variety: 0.0,
            connection: 0.0,
            total: self.weights.safety,
        }
    }
}

/// How well an exercise's difficulty fits one person's target
fn ability_match(exercise: &ExerciseDefinition, profile: &UserProgressProfile) -> f64 {
    let target = target_difficulty(profile, exercise.muscle_group);
    1.0 - f64::from(exercise.difficulty.abs_diff(target)) / 4.0
}

/// Ordinal intensity proximity over the four-level scale
fn zone_match(a: IntensityLevel, b: IntensityLevel) -> f64 {
    1.0 - f64::from(a.ordinal().abs_diff(b.ordinal())) / 3.0
}

/// Ratio of the shorter to the longer estimated work time
fn time_sync_score(a: &ExerciseDefinition, b: &ExerciseDefinition) -> f64 {
    let seconds_a = f64::from(a.estimated_work_seconds().max(1));
    let seconds_b = f64::from(b.estimated_work_seconds().max(1));
    seconds_a.min(seconds_b) / seconds_a.max(seconds_b)
}

/// Fraction of both partners' goals the pair serves; 0.5 with no goals set
fn goal_alignment_score(pair: &CandidatePair<'_>, ctx: &PairingContext<'_>) -> f64 {
    let goals: Vec<FitnessGoal> = ctx
        .profile_a
        .goals
        .iter()
        .chain(ctx.profile_b.goals.iter())
        .copied()
        .collect();
    if goals.is_empty() {
        return 0.5;
    }

    let served = goals
        .iter()
        .filter(|goal| goal_served(**goal, pair))
        .count();
    served as f64 / goals.len() as f64
}

fn goal_served(goal: FitnessGoal, pair: &CandidatePair<'_>) -> bool {
    let serves = |e: &ExerciseDefinition| match goal {
        FitnessGoal::BuildStrength => e.category == ExerciseCategory::Strength,
        FitnessGoal::LoseWeight => {
            matches!(
                e.category,
                ExerciseCategory::Cardio | ExerciseCategory::Plyometric
            ) || e.intensity >= IntensityLevel::High
        }
        FitnessGoal::ImproveEndurance => e.category == ExerciseCategory::Cardio,
        FitnessGoal::ImproveFlexibility => e.category == ExerciseCategory::Flexibility,
        FitnessGoal::ImproveBalance => {
            e.category == ExerciseCategory::Balance || e.muscle_group == MuscleGroup::Core
        }
        FitnessGoal::TrainTogether => false,
    };

    if goal == FitnessGoal::TrainTogether {
        return pair.interaction != InteractionType::Independent;
    }
    serves(pair.exercise_a) || serves(pair.exercise_b)
}

/// Learned-preference score for one person and one exercise
fn enjoyment_for(profile: &UserProgressProfile, exercise_id: &str) -> f64 {
    if profile
        .preferences
        .liked_exercises
        .iter()
        .any(|id| id == exercise_id)
    {
        1.0
    } else if profile
        .preferences
        .disliked_exercises
        .iter()
        .any(|id| id == exercise_id)
    {
        0.0
    } else {
        0.5
    }
}

/// Penalize recently used exercises
fn variety_score(pair: &CandidatePair<'_>, recent: &[String]) -> f64 {
    let recent_a = recent.iter().any(|id| id == &pair.exercise_a.id);
    let recent_b = recent.iter().any(|id| id == &pair.exercise_b.id);
    match (recent_a, recent_b) {
        (false, false) => 1.0,
        (true, true) => 0.2,
        _ => 0.5,
    }
}

/// Partner-connection value of the interaction type
const fn connection_score(interaction: InteractionType) -> f64 {
    match interaction {
        InteractionType::Assisted => 1.0,
        InteractionType::Mirrored => 0.8,
        InteractionType::Competitive => 0.7,
        InteractionType::Independent => 0.4,
    }
}
