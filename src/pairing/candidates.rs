// ABOUTME: Builds scoreable candidate pairs per muscle group for the selected strategy
// ABOUTME: Every emitted candidate has already passed the constraint filter for both partners
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::catalog::ExerciseCatalog;
use crate::models::couple_profile::CoupleProgressProfile;
use crate::models::exercise::{
    Equipment, ExerciseDefinition, InteractionType, MuscleGroup, SpaceRequirement,
};
use crate::models::user_profile::UserProgressProfile;
use crate::models::workout::PairingStrategy;
use crate::pairing::constraints::check_exercise;

/// Immutable per-request context shared by generation and scoring
#[derive(Debug, Clone, Copy)]
pub struct PairingContext<'a> {
    pub profile_a: &'a UserProgressProfile,
    pub profile_b: &'a UserProgressProfile,
    pub couple: &'a CoupleProgressProfile,
    pub available_equipment: &'a [Equipment],
    pub available_space: SpaceRequirement,
}

/// An unscored candidate pairing of two safe exercises
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'a> {
    pub exercise_a: &'a ExerciseDefinition,
    pub exercise_b: &'a ExerciseDefinition,
    pub interaction: InteractionType,
    /// Set when the pair came from the unscored random fallback
    pub fallback: bool,
}

/// Map an ability score (0-100) onto the catalog difficulty scale (1-5)
#[must_use]
pub fn target_difficulty(profile: &UserProgressProfile, group: MuscleGroup) -> u8 {
    let ability = profile.abilities.relevant_ability(group);
    let mapped = 1.0 + (ability / 25.0).round();
    mapped.clamp(1.0, 5.0) as u8
}

/// Candidate pair generator for one request
#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    catalog: &'a ExerciseCatalog,
    /// Mutual comfort required before contact-based partner exercises
    comfort_threshold: f64,
}

impl<'a> CandidateGenerator<'a> {
    /// Create a generator over the given catalog
    #[must_use]
    pub const fn new(catalog: &'a ExerciseCatalog, comfort_threshold: f64) -> Self {
        Self {
            catalog,
            comfort_threshold,
        }
    }

    /// Build candidates for a target muscle group under the session strategy
    ///
    /// Returns an empty vector when no safe combination exists; the caller
    /// decides between partial coverage and the random fallback.
    #[must_use]
    pub fn generate(
        &self,
        group: MuscleGroup,
        strategy: PairingStrategy,
        ctx: &PairingContext<'_>,
    ) -> Vec<CandidatePair<'a>> {
        let mut candidates = match strategy {
            PairingStrategy::SameExercise | PairingStrategy::Competitive => {
                self.identical_pairs(group, strategy, ctx)
            }
            PairingStrategy::ProgressionChainAdjacent
            | PairingStrategy::ProgressionChainDistant => self.chain_pairs(group, ctx),
            PairingStrategy::PartnerInteractive => self.partner_pairs(group, ctx),
            PairingStrategy::SameMuscleDifferentExercise => self.different_pairs(group, ctx),
        };

        // Catalog iteration order is arbitrary; fix it so equal scores rank stably.
        candidates.sort_by(|x, y| {
            (x.exercise_a.id.as_str(), x.exercise_b.id.as_str())
                .cmp(&(y.exercise_a.id.as_str(), y.exercise_b.id.as_str()))
        });
        debug!(?group, ?strategy, count = candidates.len(), "candidate pairs generated");
        candidates
    }

    /// Identical-exercise pairs over the intersection of both safe sets
    fn identical_pairs(
        &self,
        group: MuscleGroup,
        strategy: PairingStrategy,
        ctx: &PairingContext<'_>,
    ) -> Vec<CandidatePair<'a>> {
        let interaction = if strategy == PairingStrategy::Competitive {
            InteractionType::Competitive
        } else {
            InteractionType::Independent
        };

        self.safe_for_both(group, ctx)
            .into_iter()
            .map(|exercise| CandidatePair {
                exercise_a: exercise,
                exercise_b: exercise,
                interaction,
                fallback: false,
            })
            .collect()
    }

    /// Chain pairs: each partner gets the chain member closest to their target
    fn chain_pairs(
        &self,
        group: MuscleGroup,
        ctx: &PairingContext<'_>,
    ) -> Vec<CandidatePair<'a>> {
        let target_a = target_difficulty(ctx.profile_a, group);
        let target_b = target_difficulty(ctx.profile_b, group);

        let mut seen_heads: Vec<&str> = Vec::new();
        let mut pairs = Vec::new();

        for exercise in self.catalog.by_muscle_group(group) {
            if exercise.is_partner_exercise {
                continue;
            }
            let chain = self.catalog.progression_chain(&exercise.id);
            let Some(head) = chain.first() else { continue };
            if chain.len() < 2 || seen_heads.contains(&head.id.as_str()) {
                continue;
            }
            seen_heads.push(head.id.as_str());

            let member_a = Self::closest_member(&chain, target_a, ctx.profile_a, ctx);
            let member_b = Self::closest_member(&chain, target_b, ctx.profile_b, ctx);
            if let (Some(a), Some(b)) = (member_a, member_b) {
                pairs.push(CandidatePair {
                    exercise_a: a,
                    exercise_b: b,
                    interaction: InteractionType::Independent,
                    fallback: false,
                });
            }
        }

        pairs
    }

    /// Partner-flagged exercises both people can do, gated on mutual comfort
    /// when physical contact is required
    fn partner_pairs(
        &self,
        group: MuscleGroup,
        ctx: &PairingContext<'_>,
    ) -> Vec<CandidatePair<'a>> {
        self.catalog
            .partner_exercises()
            .filter(|e| e.muscle_group == group)
            .filter(|e| {
                !e.requires_contact || ctx.couple.partner_comfort.mutual() >= self.comfort_threshold
            })
            .filter(|e| self.passes_both(e, ctx))
            .map(|exercise| CandidatePair {
                exercise_a: exercise,
                exercise_b: exercise,
                interaction: if exercise.requires_contact {
                    InteractionType::Assisted
                } else {
                    InteractionType::Mirrored
                },
                fallback: false,
            })
            .collect()
    }

    /// Distinct exercises matched by difficulty proximity to each target
    fn different_pairs(
        &self,
        group: MuscleGroup,
        ctx: &PairingContext<'_>,
    ) -> Vec<CandidatePair<'a>> {
        let target_a = target_difficulty(ctx.profile_a, group);
        let target_b = target_difficulty(ctx.profile_b, group);

        let safe_a = self.safe_for(group, ctx.profile_a, ctx);
        let safe_b = self.safe_for(group, ctx.profile_b, ctx);

        let mut pairs = Vec::new();
        for exercise_a in &safe_a {
            if exercise_a.difficulty.abs_diff(target_a) > 1 {
                continue;
            }
            for exercise_b in &safe_b {
                if exercise_a.id == exercise_b.id || exercise_b.difficulty.abs_diff(target_b) > 1 {
                    continue;
                }
                pairs.push(CandidatePair {
                    exercise_a,
                    exercise_b,
                    interaction: InteractionType::Independent,
                    fallback: false,
                });
            }
        }

        pairs
    }

    /// Deliberately low-quality fallback: any safe pair, ignoring difficulty fit
    ///
    /// Preserved last-resort behavior; the assembler surfaces it as a warning
    /// rather than failing the slot.
    #[must_use]
    pub fn fallback_pair(
        &self,
        group: MuscleGroup,
        ctx: &PairingContext<'_>,
        rng: &mut impl Rng,
    ) -> Option<CandidatePair<'a>> {
        let mut safe_a = self.safe_for(group, ctx.profile_a, ctx);
        let mut safe_b = self.safe_for(group, ctx.profile_b, ctx);
        safe_a.sort_by(|x, y| x.id.cmp(&y.id));
        safe_b.sort_by(|x, y| x.id.cmp(&y.id));

        let exercise_a = *safe_a.choose(rng)?;
        let exercise_b = *safe_b.choose(rng)?;
        Some(CandidatePair {
            exercise_a,
            exercise_b,
            interaction: InteractionType::Independent,
            fallback: true,
        })
    }

    /// Chain member closest to the target difficulty that passes constraints;
    /// ties resolve toward the easier member
    fn closest_member(
        chain: &[&'a ExerciseDefinition],
        target: u8,
        profile: &UserProgressProfile,
        ctx: &PairingContext<'_>,
    ) -> Option<&'a ExerciseDefinition> {
        chain
            .iter()
            .filter(|e| {
                check_exercise(e, profile, ctx.available_equipment, ctx.available_space).passed
            })
            .min_by_key(|e| e.difficulty.abs_diff(target))
            .copied()
    }

    /// Safe non-partner exercises for one person; partner-flagged entries
    /// only surface under the partner-interactive strategy
    fn safe_for(
        &self,
        group: MuscleGroup,
        profile: &UserProgressProfile,
        ctx: &PairingContext<'_>,
    ) -> Vec<&'a ExerciseDefinition> {
        self.catalog
            .by_muscle_group(group)
            .filter(|e| !e.is_partner_exercise)
            .filter(|e| {
                check_exercise(e, profile, ctx.available_equipment, ctx.available_space).passed
            })
            .collect()
    }

    fn safe_for_both(
        &self,
        group: MuscleGroup,
        ctx: &PairingContext<'_>,
    ) -> Vec<&'a ExerciseDefinition> {
        self.catalog
            .by_muscle_group(group)
            .filter(|e| !e.is_partner_exercise)
            .filter(|e| self.passes_both(e, ctx))
            .collect()
    }

    fn passes_both(&self, exercise: &ExerciseDefinition, ctx: &PairingContext<'_>) -> bool {
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
}
