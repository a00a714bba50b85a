// ABOUTME: Unit tests for the constraint filter's ordered hard rules
// ABOUTME: Covers injuries, equipment alternatives, space ordering, foundations, idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::catalog::ExerciseCatalog;
use tandem_engine::models::exercise::{Equipment, InjuryArea, SpaceRequirement};
use tandem_engine::pairing::check_exercise;

#[test]
fn injury_contraindication_fails_first() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();
    let mut profile = common::profile(Uuid::new_v4());
    profile.current_injuries.push(InjuryArea::Wrist);

    let verdict = check_exercise(pushup, &profile, &[], SpaceRequirement::Large);
    assert!(!verdict.passed);
    assert!(verdict.reason.unwrap().contains("Wrist"));
}

#[test]
fn past_injuries_do_not_block() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();
    let mut profile = common::profile(Uuid::new_v4());
    profile.past_injuries.push(InjuryArea::Wrist);

    assert!(check_exercise(pushup, &profile, &[], SpaceRequirement::Large).passed);
}

#[test]
fn missing_equipment_fails() {
    let catalog = ExerciseCatalog::builtin();
    let goblet = catalog.get("goblet_squat").unwrap();
    let profile = common::profile(Uuid::new_v4());

    let verdict = check_exercise(goblet, &profile, &[], SpaceRequirement::Large);
    assert!(!verdict.passed);
    assert!(verdict.reason.unwrap().contains("equipment"));
}

#[test]
fn equipment_alternative_satisfies() {
    let catalog = ExerciseCatalog::builtin();
    let goblet = catalog.get("goblet_squat").unwrap();
    let profile = common::profile(Uuid::new_v4());

    // Goblet squat wants dumbbells but accepts a kettlebell instead.
    let verdict = check_exercise(
        goblet,
        &profile,
        &[Equipment::Kettlebell],
        SpaceRequirement::Large,
    );
    assert!(verdict.passed);
}

#[test]
fn space_is_ordinal() {
    let catalog = ExerciseCatalog::builtin();
    let jump_squat = catalog.get("jump_squat").unwrap();
    let profile = common::profile(Uuid::new_v4());

    assert!(!check_exercise(jump_squat, &profile, &[], SpaceRequirement::Small).passed);
    assert!(check_exercise(jump_squat, &profile, &[], SpaceRequirement::Medium).passed);
    assert!(check_exercise(jump_squat, &profile, &[], SpaceRequirement::Large).passed);
}

#[test]
fn undemonstrated_foundation_fails() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();
    let mut profile = common::profile(Uuid::new_v4());
    profile.abilities.max_pushups = 0;

    let verdict = check_exercise(pushup, &profile, &[], SpaceRequirement::Large);
    assert!(!verdict.passed);
    assert!(verdict.reason.unwrap().contains("PushUp"));
}

#[test]
fn filter_is_idempotent() {
    let catalog = ExerciseCatalog::builtin();
    let pushup = catalog.get("pushup").unwrap();
    let mut profile = common::profile(Uuid::new_v4());
    profile.current_injuries.push(InjuryArea::Shoulder);

    let first = check_exercise(pushup, &profile, &[], SpaceRequirement::Small);
    let second = check_exercise(pushup, &profile, &[], SpaceRequirement::Small);
    assert_eq!(first, second);
}
