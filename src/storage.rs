// ABOUTME: Async storage contracts for profiles, plans, and workout logs
// ABOUTME: In-memory adapters back tests; production adapters live outside this crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Storage Contracts
//!
//! One interchangeable storage interface per entity kind. The engine holds
//! no implicit global state: adapters are injected at construction, and the
//! in-memory implementations here serve tests and demos.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::couple_profile::CoupleProgressProfile;
use crate::models::periodization::PeriodizationPlan;
use crate::models::user_profile::UserProgressProfile;
use crate::models::workout::{ExerciseLog, WorkoutLog};

/// Storage contract for per-person progress profiles
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Persist a profile snapshot
    async fn save(&self, profile: &UserProgressProfile) -> AppResult<()>;

    /// Fetch a profile; absent is an expected condition, not an error
    async fn get(&self, user_id: Uuid) -> AppResult<Option<UserProgressProfile>>;

    /// Remove a profile
    async fn delete(&self, user_id: Uuid) -> AppResult<()>;
}

/// Storage contract for couple progress profiles
#[async_trait]
pub trait CoupleProfileStorage: Send + Sync {
    /// Persist a couple profile snapshot
    async fn save(&self, profile: &CoupleProgressProfile) -> AppResult<()>;

    /// Fetch a couple profile
    async fn get(&self, couple_id: Uuid) -> AppResult<Option<CoupleProgressProfile>>;

    /// Remove a couple profile
    async fn delete(&self, couple_id: Uuid) -> AppResult<()>;
}

/// Storage contract for periodization plans
#[async_trait]
pub trait PlanStorage: Send + Sync {
    /// Persist a plan snapshot
    async fn save(&self, plan: &PeriodizationPlan) -> AppResult<()>;

    /// Fetch a plan
    async fn get(&self, couple_id: Uuid) -> AppResult<Option<PeriodizationPlan>>;

    /// Remove a plan
    async fn delete(&self, couple_id: Uuid) -> AppResult<()>;
}

/// Storage contract for workout logs
#[async_trait]
pub trait WorkoutLogStorage: Send + Sync {
    /// Persist one person's log for a session
    async fn save(&self, log: &WorkoutLog) -> AppResult<()>;

    /// Fetch all logs recorded under one workout id (up to one per partner)
    async fn get(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutLog>>;

    /// Most recent logs for one person, newest first
    async fn list_by_user(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<WorkoutLog>>;

    /// Most recent logs for one couple, newest first
    async fn list_by_couple(&self, couple_id: Uuid, limit: usize) -> AppResult<Vec<WorkoutLog>>;

    /// Up to `limit` most recent entries of one exercise for one person,
    /// returned oldest first, ready for progression analysis
    async fn recent_exercise_logs(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        limit: usize,
    ) -> AppResult<Vec<ExerciseLog>>;

    /// Remove every log recorded under one workout id
    async fn delete(&self, workout_id: Uuid) -> AppResult<()>;
}

fn poisoned() -> AppError {
    AppError::storage("in-memory store lock poisoned")
}

/// In-memory profile storage for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryProfileStorage {
    inner: RwLock<HashMap<Uuid, UserProgressProfile>>,
}

impl InMemoryProfileStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStorage for InMemoryProfileStorage {
    async fn save(&self, profile: &UserProgressProfile) -> AppResult<()> {
        self.inner
            .write()
            .map_err(|_| poisoned())?
            .insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn get(&self, user_id: Uuid) -> AppResult<Option<UserProgressProfile>> {
        Ok(self.inner.read().map_err(|_| poisoned())?.get(&user_id).cloned())
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<()> {
        self.inner.write().map_err(|_| poisoned())?.remove(&user_id);
        Ok(())
    }
}

/// In-memory couple profile storage for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryCoupleStorage {
    inner: RwLock<HashMap<Uuid, CoupleProgressProfile>>,
}

impl InMemoryCoupleStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoupleProfileStorage for InMemoryCoupleStorage {
    async fn save(&self, profile: &CoupleProgressProfile) -> AppResult<()> {
        self.inner
            .write()
            .map_err(|_| poisoned())?
            .insert(profile.couple_id, profile.clone());
        Ok(())
    }

    async fn get(&self, couple_id: Uuid) -> AppResult<Option<CoupleProgressProfile>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .get(&couple_id)
            .cloned())
    }

    async fn delete(&self, couple_id: Uuid) -> AppResult<()> {
        self.inner.write().map_err(|_| poisoned())?.remove(&couple_id);
        Ok(())
    }
}

/// In-memory plan storage for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryPlanStorage {
    inner: RwLock<HashMap<Uuid, PeriodizationPlan>>,
}

impl InMemoryPlanStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStorage for InMemoryPlanStorage {
    async fn save(&self, plan: &PeriodizationPlan) -> AppResult<()> {
        self.inner
            .write()
            .map_err(|_| poisoned())?
            .insert(plan.couple_id, plan.clone());
        Ok(())
    }

    async fn get(&self, couple_id: Uuid) -> AppResult<Option<PeriodizationPlan>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .get(&couple_id)
            .cloned())
    }

    async fn delete(&self, couple_id: Uuid) -> AppResult<()> {
        self.inner.write().map_err(|_| poisoned())?.remove(&couple_id);
        Ok(())
    }
}

/// In-memory workout log storage for tests and demos
#[derive(Debug, Default)]
pub struct InMemoryWorkoutLogStorage {
    inner: RwLock<Vec<WorkoutLog>>,
}

impl InMemoryWorkoutLogStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkoutLogStorage for InMemoryWorkoutLogStorage {
    async fn save(&self, log: &WorkoutLog) -> AppResult<()> {
        let mut logs = self.inner.write().map_err(|_| poisoned())?;
        logs.retain(|l| !(l.workout_id == log.workout_id && l.user_id == log.user_id));
        logs.push(log.clone());
        Ok(())
    }

    async fn get(&self, workout_id: Uuid) -> AppResult<Vec<WorkoutLog>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|l| l.workout_id == workout_id)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<WorkoutLog>> {
        let mut logs: Vec<WorkoutLog> = self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        logs.truncate(limit);
        Ok(logs)
    }

    async fn list_by_couple(&self, couple_id: Uuid, limit: usize) -> AppResult<Vec<WorkoutLog>> {
        let mut logs: Vec<WorkoutLog> = self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|l| l.couple_id == couple_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        logs.truncate(limit);
        Ok(logs)
    }

    async fn recent_exercise_logs(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        limit: usize,
    ) -> AppResult<Vec<ExerciseLog>> {
        let mut logs: Vec<WorkoutLog> = self
            .inner
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| a.started_at.cmp(&b.started_at));

        let mut entries: Vec<ExerciseLog> = logs
            .iter()
            .flat_map(|l| l.entries.iter())
            .filter(|e| e.exercise_id == exercise_id)
            .cloned()
            .collect();
        let overflow = entries.len().saturating_sub(limit);
        entries.drain(..overflow);
        Ok(entries)
    }

    async fn delete(&self, workout_id: Uuid) -> AppResult<()> {
        self.inner
            .write()
            .map_err(|_| poisoned())?
            .retain(|l| l.workout_id != workout_id);
        Ok(())
    }
}
