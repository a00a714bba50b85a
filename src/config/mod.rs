// ABOUTME: Engine configuration container with environment overrides and validation
// ABOUTME: Constructor-injected into engines; no global singleton is kept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Engine Configuration
//!
//! Type-safe configuration for every engine module. Defaults encode the
//! documented behavior; `EngineConfig::load` applies `TANDEM_*` environment
//! overrides and validates cross-field invariants. Engines receive their
//! config section by value at construction.

pub mod error;
pub mod pairing;
pub mod progression;

pub use error::ConfigError;
pub use pairing::{PairingConfig, ScoringWeights, StrategyBands};
pub use progression::{PeriodizationConfig, ProgressionConfig, TrackerConfig};

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::physiological_constants::gap;

/// Main engine configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Strategy selection, scoring, and assembly
    pub pairing: PairingConfig,
    /// Per-exercise progression analysis
    pub progression: ProgressionConfig,
    /// Post-workout profile updates
    pub tracker: TrackerConfig,
    /// Training-phase management
    pub periodization: PeriodizationConfig,
}

impl EngineConfig {
    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error when an environment variable holds an unparsable
    /// value or the final configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on failure
    #[must_use]
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!("failed to load engine config: {e}, using defaults");
            Self::default()
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        override_from_env(
            "TANDEM_SAME_EXERCISE_GAP_MAX",
            &mut self.pairing.bands.same_exercise_max,
        )?;
        override_from_env(
            "TANDEM_CHAIN_ADJACENT_GAP_MAX",
            &mut self.pairing.bands.chain_adjacent_max,
        )?;
        override_from_env(
            "TANDEM_CHAIN_DISTANT_GAP_MAX",
            &mut self.pairing.bands.chain_distant_max,
        )?;
        override_from_env(
            "TANDEM_COMPETITIVE_THRESHOLD",
            &mut self.pairing.competitive_threshold,
        )?;
        override_from_env(
            "TANDEM_PARTNER_COMFORT_THRESHOLD",
            &mut self.pairing.partner_comfort_threshold,
        )?;
        override_from_env(
            "TANDEM_STREAK_WINDOW_DAYS",
            &mut self.tracker.streak_window_days,
        )?;
        override_from_env(
            "TANDEM_MAX_WEEKS_WITHOUT_DELOAD",
            &mut self.periodization.max_weeks_without_deload,
        )?;
        override_from_env(
            "TANDEM_FATIGUE_RETENTION",
            &mut self.tracker.daily_fatigue_retention,
        )?;
        Ok(())
    }

    /// Validate cross-field invariants
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bands = &self.pairing.bands;
        if bands.same_exercise_max >= bands.chain_adjacent_max
            || bands.chain_adjacent_max >= bands.chain_distant_max
        {
            return Err(ConfigError::InvalidRange(
                "strategy band thresholds must be strictly increasing",
            ));
        }

        let w = &self.pairing.weights;
        let non_safety = w.ability_match
            + w.hr_zone_match
            + w.rir_match
            + w.time_sync
            + w.goal_alignment
            + w.enjoyment
            + w.variety
            + w.connection;
        if w.safety <= non_safety {
            return Err(ConfigError::InvalidWeights(
                "safety weight must exceed the sum of all other weights",
            ));
        }
        if [
            w.safety,
            w.ability_match,
            w.hr_zone_match,
            w.rir_match,
            w.time_sync,
            w.goal_alignment,
            w.enjoyment,
            w.variety,
            w.connection,
        ]
        .iter()
        .any(|v| *v < 0.0)
        {
            return Err(ConfigError::InvalidWeights(
                "scoring weights must be non-negative",
            ));
        }

        let gap_weight_sum = gap::PUSHUP_WEIGHT
            + gap::PLANK_WEIGHT
            + gap::SQUAT_WEIGHT
            + gap::CARDIO_WEIGHT
            + gap::UPPER_BODY_WEIGHT
            + gap::LOWER_BODY_WEIGHT
            + gap::CORE_WEIGHT;
        if (gap_weight_sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidWeights(
                "gap dimension weights must sum to 1.0",
            ));
        }

        if self.pairing.warm_up_min > self.pairing.warm_up_max {
            return Err(ConfigError::InvalidRange(
                "warm_up_min must not exceed warm_up_max",
            ));
        }

        if !(0.0..1.0).contains(&self.tracker.daily_fatigue_retention) {
            return Err(ConfigError::InvalidRange(
                "daily_fatigue_retention must be in [0, 1)",
            ));
        }

        if !(0.0..1.0).contains(&self.periodization.frequency_drop_ratio) {
            return Err(ConfigError::InvalidRange(
                "frequency_drop_ratio must be in [0, 1)",
            ));
        }

        Ok(())
    }
}

fn override_from_env<T: FromStr>(
    variable: &'static str,
    slot: &mut T,
) -> Result<(), ConfigError> {
    if let Ok(raw) = env::var(variable) {
        *slot = raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvValue {
                variable,
                value: raw,
            })?;
    }
    Ok(())
}
