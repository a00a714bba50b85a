// ABOUTME: Safety and feasibility filter applied to every exercise before pairing
// ABOUTME: Hard rules checked in order; the first failure wins and carries a reason
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use tracing::debug;

use crate::models::exercise::{Equipment, ExerciseDefinition, SpaceRequirement};
use crate::models::user_profile::UserProgressProfile;

/// Outcome of a constraint check; deterministic for identical inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintVerdict {
    /// Whether the exercise is usable for this person
    pub passed: bool,
    /// Why the exercise was rejected; empty on pass
    pub reason: Option<String>,
}

impl ConstraintVerdict {
    const fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    fn fail(reason: String) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}

/// Check one exercise against one person's injuries, equipment, space, and
/// foundational ability
///
/// Rules are evaluated in order: injury contraindication, equipment,
/// space, foundational ability. The first failure wins.
#[must_use]
pub fn check_exercise(
    exercise: &ExerciseDefinition,
    profile: &UserProgressProfile,
    available_equipment: &[Equipment],
    available_space: SpaceRequirement,
) -> ConstraintVerdict {
    for injury in &profile.current_injuries {
        if exercise.contraindications.contains(injury) {
            let verdict = ConstraintVerdict::fail(format!(
                "{} is contraindicated for a {injury:?} injury",
                exercise.name
            ));
            debug!(exercise = %exercise.id, user = %profile.user_id, "constraint filter: injury");
            return verdict;
        }
    }

    if !equipment_satisfied(exercise, available_equipment) {
        debug!(exercise = %exercise.id, user = %profile.user_id, "constraint filter: equipment");
        return ConstraintVerdict::fail(format!(
            "{} requires equipment that is not available",
            exercise.name
        ));
    }

    if exercise.space > available_space {
        debug!(exercise = %exercise.id, user = %profile.user_id, "constraint filter: space");
        return ConstraintVerdict::fail(format!(
            "{} needs {:?} space but only {:?} is available",
            exercise.name, exercise.space, available_space
        ));
    }

    if let Some(movement) = exercise.foundational_requirement {
        if !profile.abilities.has_demonstrated(movement) {
            debug!(exercise = %exercise.id, user = %profile.user_id, "constraint filter: foundation");
            return ConstraintVerdict::fail(format!(
                "{} requires a demonstrated {movement:?} first",
                exercise.name
            ));
        }
    }

    ConstraintVerdict::pass()
}

/// Whether the required equipment, or any complete alternative set, is available
fn equipment_satisfied(exercise: &ExerciseDefinition, available: &[Equipment]) -> bool {
    let all_available =
        |set: &[Equipment]| set.iter().all(|needed| available.contains(needed));

    if exercise.required_equipment.is_empty() || all_available(&exercise.required_equipment) {
        return true;
    }

    exercise
        .equipment_alternatives
        .iter()
        .any(|alternative| !alternative.is_empty() && all_available(alternative))
}

/// A pair is usable only when both exercises pass for their respective person
#[must_use]
pub fn pair_is_usable(
    exercise_a: &ExerciseDefinition,
    profile_a: &UserProgressProfile,
    exercise_b: &ExerciseDefinition,
    profile_b: &UserProgressProfile,
    available_equipment: &[Equipment],
    available_space: SpaceRequirement,
) -> bool {
    check_exercise(exercise_a, profile_a, available_equipment, available_space).passed
        && check_exercise(exercise_b, profile_b, available_equipment, available_space).passed
}
