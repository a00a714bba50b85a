// ABOUTME: Configuration error type for engine config loading and validation
// ABOUTME: Converted into AppError at the engine boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use thiserror::Error;

use crate::errors::AppError;

/// Errors raised while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A threshold pair is ordered incorrectly
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// A weight set violates its documented sum or sign constraints
    #[error("invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// An environment override could not be parsed
    #[error("invalid environment value for {variable}: {value}")]
    InvalidEnvValue {
        /// Variable that failed to parse
        variable: &'static str,
        /// Offending value
        value: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::config(err.to_string())
    }
}
