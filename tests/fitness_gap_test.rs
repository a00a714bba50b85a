// ABOUTME: Unit tests for the seven-dimension fitness gap calculator
// ABOUTME: Identical profiles yield zero; sign tracks the stronger partner; output is bounded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::calculate_fitness_gap;

#[test]
fn identical_profiles_yield_zero() {
    let a = common::profile(Uuid::new_v4());
    let b = common::profile(Uuid::new_v4());
    assert_eq!(calculate_fitness_gap(&a, &b), 0.0);
}

#[test]
fn stronger_partner_b_is_positive() {
    let a = common::profile(Uuid::new_v4());
    let b = common::stronger_profile(Uuid::new_v4());
    let gap = calculate_fitness_gap(&a, &b);
    assert!(gap > 0.0, "expected positive gap, got {gap}");
}

#[test]
fn gap_is_antisymmetric() {
    let a = common::profile(Uuid::new_v4());
    let b = common::stronger_profile(Uuid::new_v4());
    let forward = calculate_fitness_gap(&a, &b);
    let reverse = calculate_fitness_gap(&b, &a);
    assert!((forward + reverse).abs() < f64::EPSILON);
}

#[test]
fn gap_is_bounded_even_for_extreme_profiles() {
    let mut a = common::profile(Uuid::new_v4());
    a.abilities.max_pushups = 0;
    a.abilities.plank_hold_seconds = 0;
    a.abilities.max_squats = 0;
    a.abilities.cardio_endurance = 0.0;
    for value in a.abilities.strength.values_mut() {
        *value = 0.0;
    }

    let mut b = common::profile(Uuid::new_v4());
    b.abilities.max_pushups = 500;
    b.abilities.plank_hold_seconds = 3600;
    b.abilities.max_squats = 500;
    b.abilities.cardio_endurance = 100.0;
    for value in b.abilities.strength.values_mut() {
        *value = 100.0;
    }

    let gap = calculate_fitness_gap(&a, &b);
    assert!(gap <= 100.0);
    assert!(gap >= 95.0, "near-maximal difference should approach the bound, got {gap}");
}

#[test]
fn gap_is_rounded_to_whole_points() {
    let a = common::profile(Uuid::new_v4());
    let mut b = common::profile(Uuid::new_v4());
    b.abilities.max_pushups = 22;
    let gap = calculate_fitness_gap(&a, &b);
    assert!((gap - gap.round()).abs() < f64::EPSILON);
}
