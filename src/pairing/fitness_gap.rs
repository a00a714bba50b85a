// ABOUTME: Normalized ability differential between two partners
// ABOUTME: Weighted sum over seven dimensions; positive means partner B is stronger
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use crate::models::user_profile::UserProgressProfile;
use crate::physiological_constants::gap;

/// Compute the signed fitness gap between two partners
///
/// Each dimension's raw difference is normalized by a fixed denominator,
/// clamped to [-1, 1], and weighted; the weighted sum is scaled to
/// [-100, 100] and rounded. Identical profiles yield exactly 0.
#[must_use]
pub fn calculate_fitness_gap(
    profile_a: &UserProgressProfile,
    profile_b: &UserProgressProfile,
) -> f64 {
    let a = &profile_a.abilities;
    let b = &profile_b.abilities;

    let dimensions = [
        (
            f64::from(b.max_pushups) - f64::from(a.max_pushups),
            gap::PUSHUP_DENOMINATOR,
            gap::PUSHUP_WEIGHT,
        ),
        (
            f64::from(b.plank_hold_seconds) - f64::from(a.plank_hold_seconds),
            gap::PLANK_DENOMINATOR,
            gap::PLANK_WEIGHT,
        ),
        (
            f64::from(b.max_squats) - f64::from(a.max_squats),
            gap::SQUAT_DENOMINATOR,
            gap::SQUAT_WEIGHT,
        ),
        (
            b.cardio_endurance - a.cardio_endurance,
            gap::CARDIO_DENOMINATOR,
            gap::CARDIO_WEIGHT,
        ),
        (
            b.upper_body_strength() - a.upper_body_strength(),
            gap::UPPER_BODY_DENOMINATOR,
            gap::UPPER_BODY_WEIGHT,
        ),
        (
            b.lower_body_strength() - a.lower_body_strength(),
            gap::LOWER_BODY_DENOMINATOR,
            gap::LOWER_BODY_WEIGHT,
        ),
        (
            b.core_strength() - a.core_strength(),
            gap::CORE_DENOMINATOR,
            gap::CORE_WEIGHT,
        ),
    ];

    let weighted: f64 = dimensions
        .iter()
        .map(|(diff, denominator, weight)| (diff / denominator).clamp(-1.0, 1.0) * weight)
        .sum();

    (weighted * gap::GAP_SCALE)
        .round()
        .clamp(-gap::GAP_MAX, gap::GAP_MAX)
}
