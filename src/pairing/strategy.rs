// ABOUTME: Maps the absolute fitness gap to a pairing strategy band
// ABOUTME: Couple history selects between a band's base strategy and its variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use tracing::debug;

use crate::config::PairingConfig;
use crate::models::couple_profile::CoupleProgressProfile;
use crate::models::workout::PairingStrategy;

/// Selects the pairing strategy for a session from the gap and couple history
///
/// The gap band is primary: couple preferred/avoided lists only switch
/// between a band's base strategy and its variant, never across bands, so a
/// larger absolute gap can never select an earlier band.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    config: PairingConfig,
}

impl StrategySelector {
    /// Create a selector with the given pairing configuration
    #[must_use]
    pub const fn new(config: PairingConfig) -> Self {
        Self { config }
    }

    /// Select the strategy for the given signed gap
    #[must_use]
    pub fn select(&self, gap: f64, couple: &CoupleProgressProfile) -> PairingStrategy {
        let magnitude = gap.abs();
        let bands = &self.config.bands;

        let strategy = if magnitude < bands.same_exercise_max {
            self.same_exercise_variant(couple)
        } else if magnitude < bands.chain_adjacent_max {
            self.adjacent_variant(couple)
        } else if magnitude < bands.chain_distant_max {
            PairingStrategy::ProgressionChainDistant
        } else {
            PairingStrategy::SameMuscleDifferentExercise
        };

        debug!(gap, ?strategy, couple = %couple.couple_id, "pairing strategy selected");
        strategy
    }

    fn same_exercise_variant(&self, couple: &CoupleProgressProfile) -> PairingStrategy {
        let variant_ok = !couple
            .avoided_strategies
            .contains(&PairingStrategy::Competitive);
        let wants_competition = couple.competitiveness.mutual() > self.config.competitive_threshold
            || couple
                .preferred_strategies
                .contains(&PairingStrategy::Competitive);

        if variant_ok && wants_competition {
            PairingStrategy::Competitive
        } else {
            PairingStrategy::SameExercise
        }
    }

    fn adjacent_variant(&self, couple: &CoupleProgressProfile) -> PairingStrategy {
        let variant_ok = !couple
            .avoided_strategies
            .contains(&PairingStrategy::PartnerInteractive);
        let comfortable =
            couple.partner_comfort.mutual() >= self.config.partner_comfort_threshold;

        if variant_ok && comfortable {
            PairingStrategy::PartnerInteractive
        } else {
            PairingStrategy::ProgressionChainAdjacent
        }
    }
}
