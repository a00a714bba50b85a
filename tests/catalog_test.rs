// ABOUTME: Unit tests for catalog lookups, variation chains, and load-time edge validation
// ABOUTME: Dangling variation edges are dropped at load, never followed at runtime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use tandem_engine::catalog::ExerciseCatalog;
use tandem_engine::models::exercise::{
    ExerciseCategory, ExerciseDefinition, IntensityLevel, MuscleGroup, SpaceRequirement,
};

fn minimal(id: &str, easier: Option<&str>, harder: Option<&str>) -> ExerciseDefinition {
    ExerciseDefinition {
        id: id.into(),
        name: id.into(),
        muscle_group: MuscleGroup::Chest,
        secondary_muscles: Vec::new(),
        category: ExerciseCategory::Strength,
        difficulty: 3,
        intensity: IntensityLevel::Moderate,
        required_equipment: Vec::new(),
        equipment_alternatives: Vec::new(),
        space: SpaceRequirement::Small,
        contraindications: Vec::new(),
        harder_variation: harder.map(Into::into),
        easier_variation: easier.map(Into::into),
        default_reps: Some(10),
        default_duration_seconds: None,
        default_sets: 3,
        estimated_set_seconds: 45,
        is_partner_exercise: false,
        requires_contact: false,
        is_loadable: false,
        foundational_requirement: None,
    }
}

#[test]
fn progression_chain_is_ordered_easiest_first() {
    let catalog = ExerciseCatalog::builtin();
    let chain = catalog.progression_chain("pushup");
    let ids: Vec<&str> = chain.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "wall_pushup",
            "knee_pushup",
            "pushup",
            "decline_pushup",
            "archer_pushup"
        ]
    );

    let difficulties: Vec<u8> = chain.iter().map(|e| e.difficulty).collect();
    let mut sorted = difficulties.clone();
    sorted.sort_unstable();
    assert_eq!(difficulties, sorted);
}

#[test]
fn chain_is_identical_from_any_member() {
    let catalog = ExerciseCatalog::builtin();
    let from_middle: Vec<&str> = catalog
        .progression_chain("pushup")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    let from_top: Vec<&str> = catalog
        .progression_chain("archer_pushup")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(from_middle, from_top);
}

#[test]
fn dangling_edges_are_dropped_at_load() {
    let catalog = ExerciseCatalog::new(vec![minimal("solo", Some("ghost"), Some("phantom"))]);
    let exercise = catalog.get("solo").unwrap();
    assert!(exercise.easier_variation.is_none());
    assert!(exercise.harder_variation.is_none());
    assert!(catalog.progression_chain("solo").len() == 1);
}

#[test]
fn variation_cycles_do_not_hang() {
    let catalog = ExerciseCatalog::new(vec![
        minimal("a", Some("b"), Some("b")),
        minimal("b", Some("a"), Some("a")),
    ]);
    let chain = catalog.progression_chain("a");
    assert!(chain.len() <= 2);
}

#[test]
fn builtin_catalog_edges_all_resolve() {
    let catalog = ExerciseCatalog::builtin();
    assert!(catalog.len() > 30);
    for group in [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Core,
        MuscleGroup::Legs,
        MuscleGroup::Glutes,
    ] {
        assert!(
            catalog.by_muscle_group(group).count() > 0,
            "no exercises for {group:?}"
        );
    }
    assert!(catalog.partner_exercises().count() >= 3);
    assert!(catalog.by_category(ExerciseCategory::Flexibility).count() >= 3);
}

#[test]
fn unknown_lookup_is_none_not_an_error() {
    let catalog = ExerciseCatalog::builtin();
    assert!(catalog.get("does_not_exist").is_none());
    assert!(catalog.progression_chain("does_not_exist").is_empty());
}
