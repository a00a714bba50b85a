// ABOUTME: Pairing configuration: scoring weights, strategy gap bands, assembly shape
// ABOUTME: Defaults encode the documented engine behavior; validate() guards overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use serde::{Deserialize, Serialize};

/// Weights applied to the nine pair sub-scores
///
/// The safety weight dominates every other term combined so that an unsafe
/// pair, should one ever slip past filtering, can never outrank a safe one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub safety: f64,
    pub ability_match: f64,
    pub hr_zone_match: f64,
    pub rir_match: f64,
    pub time_sync: f64,
    pub goal_alignment: f64,
    pub enjoyment: f64,
    pub variety: f64,
    pub connection: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            safety: 1000.0,
            ability_match: 100.0,
            hr_zone_match: 50.0,
            rir_match: 40.0,
            time_sync: 30.0,
            goal_alignment: 25.0,
            enjoyment: 20.0,
            variety: 15.0,
            connection: 10.0,
        }
    }
}

/// Absolute-gap thresholds separating the four strategy bands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBands {
    /// Below this, both partners do the same exercise
    pub same_exercise_max: f64,
    /// Below this, adjacent progression-chain members
    pub chain_adjacent_max: f64,
    /// Below this, distant progression-chain members; at or above,
    /// different exercises matched by difficulty
    pub chain_distant_max: f64,
}

impl Default for StrategyBands {
    fn default() -> Self {
        Self {
            same_exercise_max: 15.0,
            chain_adjacent_max: 35.0,
            chain_distant_max: 60.0,
        }
    }
}

/// Configuration for strategy selection, scoring, and workout assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Sub-score weights
    pub weights: ScoringWeights,
    /// Strategy gap bands
    pub bands: StrategyBands,
    /// Mutual competitiveness above which same-exercise turns competitive
    pub competitive_threshold: f64,
    /// Mutual comfort at or above which partner-interactive pairs are offered
    pub partner_comfort_threshold: f64,
    /// Warm-up pair count bounds
    pub warm_up_min: usize,
    pub warm_up_max: usize,
    /// Maximum cooldown stretch pairs
    pub cool_down_max: usize,
    /// Main-section pairs kept per muscle group
    pub pairs_per_group: usize,
    /// Main-section pairs kept for the core group
    pub pairs_for_core: usize,
    /// Rest between main sets (seconds)
    pub rest_seconds: u32,
    /// Minutes budgeted per warm-up or cooldown pair
    pub section_pair_minutes: f64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            bands: StrategyBands::default(),
            competitive_threshold: 3.5,
            partner_comfort_threshold: 3.0,
            warm_up_min: 3,
            warm_up_max: 4,
            cool_down_max: 3,
            pairs_per_group: 1,
            pairs_for_core: 2,
            rest_seconds: 60,
            section_pair_minutes: 1.5,
        }
    }
}
