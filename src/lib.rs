// ABOUTME: Adaptive exercise-pairing and progression engine for two-person training
// ABOUTME: Library crate; session-management code outside this crate owns persistence and UI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![deny(unsafe_code)]

//! # Tandem Engine
//!
//! The pairing and progression core of the Tandem couples fitness platform.
//! Given two individual fitness profiles and a couple's shared history, it
//! selects, sizes, and sequences paired exercises into a complete workout;
//! it revises each person's estimated ability and the couple's training
//! phase as workouts are logged; and it turns raw and subjective workout
//! feedback into concrete adjustments for future pairings.
//!
//! ## Architecture
//!
//! - **Models**: the shared data model for profiles, logs, and workouts
//! - **Catalog**: read-only exercise reference data with variation chains
//! - **Pairing**: constraint filter, gap calculator, strategy selector,
//!   candidate generator, scorer, and assembler
//! - **Progression**: per-exercise progress/regress/maintain analysis
//! - **Trackers**: individual and couple post-workout state updates
//! - **Periodization**: the multi-week training-phase state machine
//! - **Feedback**: fusion of implicit and explicit workout feedback
//! - **Storage**: async contracts plus in-memory adapters for tests
//!
//! Every engine is stateless between invocations: it receives an immutable
//! profile snapshot and returns an updated copy. The caller persists the
//! result and must serialize updates for any one person's profile.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tandem_engine::catalog::ExerciseCatalog;
//! use tandem_engine::config::EngineConfig;
//! use tandem_engine::pairing::PairingEngine;
//!
//! let catalog = Arc::new(ExerciseCatalog::builtin());
//! let config = EngineConfig::load_or_default();
//! let engine = PairingEngine::new(catalog, config.pairing);
//! ```

/// Read-only exercise catalog with resolved variation chains
pub mod catalog;

/// Engine configuration with environment overrides and validation
pub mod config;

/// Couple-level post-workout updates: gap history, milestones, comfort
pub mod couple_progress;

/// Unified error handling
pub mod errors;

/// Feedback fusion into progression and pairing adjustments
pub mod feedback;

/// Shared data model
pub mod models;

/// Workout generation pipeline
pub mod pairing;

/// Training-phase state machine
pub mod periodization;

/// Sports-science constants
pub mod physiological_constants;

/// Per-exercise progression analysis
pub mod progression;

/// Storage-backed entry-point facade
pub mod session;

/// Storage contracts and in-memory adapters
pub mod storage;

/// Per-person post-workout updates
pub mod user_progress;

pub use catalog::ExerciseCatalog;
pub use config::EngineConfig;
pub use couple_progress::CoupleProgressTracker;
pub use errors::{AppError, AppResult, ErrorCode};
pub use feedback::{FeedbackInput, FeedbackProcessor};
pub use pairing::{calculate_fitness_gap, PairingEngine, PairingInput};
pub use periodization::{DeloadTrigger, PeriodizationManager};
pub use progression::{ProgressionAnalyzer, ProgressionChange, ProgressionRecommendation};
pub use session::{CompletedSession, SessionService};
pub use user_progress::UserProgressTracker;
