// ABOUTME: Unit tests for the training-phase state machine and deload triggers
// ABOUTME: Any single trigger forces a deload regardless of cycle position
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use uuid::Uuid;

use tandem_engine::config::PeriodizationConfig;
use tandem_engine::models::periodization::{PeriodizationPlan, PhaseRecord, TrainingPhase};
use tandem_engine::models::user_profile::{FatigueLevel, ProgressionRate};
use tandem_engine::periodization::PeriodizationManager;

fn manager() -> PeriodizationManager {
    PeriodizationManager::new(PeriodizationConfig::default())
}

fn improving_profile() -> tandem_engine::models::user_profile::UserProgressProfile {
    let mut profile = common::profile(Uuid::new_v4());
    profile.progression_rate = ProgressionRate::Improving;
    profile
}

#[test]
fn overdue_deload_fires_from_building() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    plan.week_in_phase = 5;
    plan.weeks_since_deload = 6;

    let updated = manager().update_plan_weekly(&plan, &improving_profile(), common::days_after(7));

    assert_eq!(updated.current_phase, TrainingPhase::Deload);
    assert_eq!(updated.weeks_since_deload, 0);
    assert_eq!(updated.week_in_phase, 0);
    assert!(updated.phase_history.last().unwrap().cut_short);
}

#[test]
fn adaptation_advances_to_building_after_three_weeks() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    let profile = improving_profile();
    let manager = manager();

    for week in 1..=3 {
        plan = manager.update_plan_weekly(&plan, &profile, common::days_after(week * 7));
    }

    assert_eq!(plan.current_phase, TrainingPhase::Building);
    assert_eq!(plan.week_in_phase, 0);
    assert_eq!(plan.phase_history.len(), 1);
    assert_eq!(plan.phase_history[0].phase, TrainingPhase::Adaptation);
    assert_eq!(plan.phase_history[0].completed_weeks, 3);
}

#[test]
fn second_consecutive_building_phase_leads_to_peak() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    plan.week_in_phase = 3;
    plan.weeks_since_deload = 0;
    plan.phase_history.push(PhaseRecord {
        phase: TrainingPhase::Building,
        started_at: common::t0(),
        completed_weeks: 4,
        cut_short: false,
    });

    let updated = manager().update_plan_weekly(&plan, &improving_profile(), common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Peak);
}

#[test]
fn first_building_phase_repeats() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    plan.week_in_phase = 3;
    plan.phase_history.push(PhaseRecord {
        phase: TrainingPhase::Adaptation,
        started_at: common::t0(),
        completed_weeks: 3,
        cut_short: false,
    });

    let updated = manager().update_plan_weekly(&plan, &improving_profile(), common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Building);
}

#[test]
fn peak_flows_into_deload_then_building() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Peak;
    plan.week_in_phase = 1;
    plan.weeks_since_deload = 4;
    let manager = manager();
    let profile = improving_profile();

    let plan = manager.update_plan_weekly(&plan, &profile, common::days_after(7));
    assert_eq!(plan.current_phase, TrainingPhase::Deload);
    assert_eq!(plan.weeks_since_deload, 0);

    let plan = manager.update_plan_weekly(&plan, &profile, common::days_after(14));
    assert_eq!(plan.current_phase, TrainingPhase::Building);
}

#[test]
fn deload_returns_to_adaptation_when_declining() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Deload;
    let mut profile = common::profile(Uuid::new_v4());
    profile.progression_rate = ProgressionRate::Declining;

    let updated = manager().update_plan_weekly(&plan, &profile, common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Adaptation);
}

#[test]
fn exhaustion_forces_deload_mid_phase() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    plan.week_in_phase = 1;
    let mut profile = improving_profile();
    profile.recovery.overall = FatigueLevel::Exhausted;

    let updated = manager().update_plan_weekly(&plan, &profile, common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Deload);
    assert!(updated.phase_history.last().unwrap().cut_short);
}

#[test]
fn plateau_forces_deload_after_three_weeks() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    plan.week_in_phase = 0;
    plan.plateau_weeks = 2;
    let mut profile = common::profile(Uuid::new_v4()); // Steady by default
    profile.consistency.last_workout_at = Some(common::days_after(6));

    let updated = manager().update_plan_weekly(&plan, &profile, common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Deload);
}

#[test]
fn frequency_collapse_forces_deload() {
    let mut plan = PeriodizationPlan::new(Uuid::new_v4(), common::t0());
    plan.current_phase = TrainingPhase::Building;
    let mut profile = improving_profile();
    profile.consistency.recent_weekly_counts = vec![4, 4, 4, 1];

    let updated = manager().update_plan_weekly(&plan, &profile, common::days_after(7));
    assert_eq!(updated.current_phase, TrainingPhase::Deload);
}

#[test]
fn phase_parameters_differ_by_phase() {
    let building = TrainingPhase::Building.parameters();
    let deload = TrainingPhase::Deload.parameters();
    assert!(building.volume_multiplier > deload.volume_multiplier);
    assert!(building.intensity_max > deload.intensity_max);
}
