// ABOUTME: Unit tests for engine configuration defaults, validation, and env overrides
// ABOUTME: Validates band ordering, weight dominance, and parse failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use tandem_engine::config::EngineConfig;

#[test]
fn default_config_validates() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn default_scoring_weights_keep_safety_dominant() {
    let weights = EngineConfig::default().pairing.weights;
    let non_safety = weights.ability_match
        + weights.hr_zone_match
        + weights.rir_match
        + weights.time_sync
        + weights.goal_alignment
        + weights.enjoyment
        + weights.variety
        + weights.connection;
    assert!(weights.safety > non_safety);
}

#[test]
fn misordered_bands_fail_validation() {
    let mut config = EngineConfig::default();
    config.pairing.bands.chain_adjacent_max = 10.0;
    assert!(config.validate().is_err());
}

#[test]
fn undersized_safety_weight_fails_validation() {
    let mut config = EngineConfig::default();
    config.pairing.weights.safety = 10.0;
    assert!(config.validate().is_err());
}

#[test]
fn out_of_range_retention_fails_validation() {
    let mut config = EngineConfig::default();
    config.tracker.daily_fatigue_retention = 1.5;
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn environment_overrides_apply() {
    std::env::set_var("TANDEM_MAX_WEEKS_WITHOUT_DELOAD", "8");
    let config = EngineConfig::load().unwrap();
    assert_eq!(config.periodization.max_weeks_without_deload, 8);
    std::env::remove_var("TANDEM_MAX_WEEKS_WITHOUT_DELOAD");
}

#[test]
#[serial]
fn unparsable_environment_value_is_an_error() {
    std::env::set_var("TANDEM_COMPETITIVE_THRESHOLD", "very high");
    assert!(EngineConfig::load().is_err());
    std::env::remove_var("TANDEM_COMPETITIVE_THRESHOLD");
}
