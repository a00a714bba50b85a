// ABOUTME: Unit tests for gap-band strategy selection and couple-history variants
// ABOUTME: Bands are totally ordered; a larger gap never selects an earlier band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::config::PairingConfig;
use tandem_engine::models::workout::PairingStrategy;
use tandem_engine::pairing::StrategySelector;

fn selector() -> StrategySelector {
    StrategySelector::new(PairingConfig::default())
}

fn neutral_couple() -> tandem_engine::models::couple_profile::CoupleProgressProfile {
    let a = common::profile(Uuid::new_v4());
    let b = common::profile(Uuid::new_v4());
    common::couple(Uuid::new_v4(), &a, &b)
}

#[test]
fn small_gap_selects_same_exercise() {
    let couple = neutral_couple();
    assert_eq!(
        selector().select(10.0, &couple),
        PairingStrategy::SameExercise
    );
}

#[test]
fn competitive_variant_requires_high_mutual_competitiveness() {
    let mut couple = neutral_couple();
    couple.competitiveness.person_a = 4.5;
    couple.competitiveness.person_b = 4.0;
    assert_eq!(
        selector().select(5.0, &couple),
        PairingStrategy::Competitive
    );

    // Mutual competitiveness is the minimum; one reluctant partner disables it.
    couple.competitiveness.person_b = 2.0;
    assert_eq!(
        selector().select(5.0, &couple),
        PairingStrategy::SameExercise
    );
}

#[test]
fn avoided_competitive_falls_back_to_same_exercise() {
    let mut couple = neutral_couple();
    couple.competitiveness.person_a = 5.0;
    couple.competitiveness.person_b = 5.0;
    couple.avoided_strategies.push(PairingStrategy::Competitive);
    assert_eq!(
        selector().select(5.0, &couple),
        PairingStrategy::SameExercise
    );
}

#[test]
fn moderate_gap_selects_partner_work_when_comfortable() {
    let mut couple = neutral_couple();
    couple.partner_comfort.person_a = 3.5;
    couple.partner_comfort.person_b = 3.0;
    assert_eq!(
        selector().select(20.0, &couple),
        PairingStrategy::PartnerInteractive
    );

    couple.partner_comfort.person_b = 2.0;
    assert_eq!(
        selector().select(20.0, &couple),
        PairingStrategy::ProgressionChainAdjacent
    );
}

#[test]
fn large_gap_selects_distant_chain() {
    let couple = neutral_couple();
    assert_eq!(
        selector().select(-45.0, &couple),
        PairingStrategy::ProgressionChainDistant
    );
}

#[test]
fn extreme_gap_selects_different_exercise() {
    let couple = neutral_couple();
    assert_eq!(
        selector().select(75.0, &couple),
        PairingStrategy::SameMuscleDifferentExercise
    );
}

#[test]
fn band_is_monotonic_in_gap_magnitude() {
    let mut couple = neutral_couple();
    // Exercise both variants so preference flips cannot reorder bands.
    couple.competitiveness.person_a = 5.0;
    couple.competitiveness.person_b = 5.0;
    couple.partner_comfort.person_a = 5.0;
    couple.partner_comfort.person_b = 5.0;

    let selector = selector();
    let mut previous_band = 0;
    for gap in [0.0, 5.0, 14.9, 15.0, 25.0, 34.9, 35.0, 50.0, 59.9, 60.0, 80.0, 100.0] {
        let band = selector.select(gap, &couple).band();
        assert!(
            band >= previous_band,
            "band regressed from {previous_band} to {band} at gap {gap}"
        );
        previous_band = band;
    }
}
