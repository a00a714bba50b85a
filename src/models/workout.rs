// ABOUTME: Workout records: strategies, logs with builder, generated workouts and scored pairs
// ABOUTME: Logs are append-during-session and immutable once the session completes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::exercise::{IntensityLevel, InteractionType, MuscleGroup};
use crate::physiological_constants::rir::{DEFAULT_RIR, TOO_EASY_INFERRED_RIR};

/// Rule by which two exercises are assigned to the partners for one slot
///
/// Strategies are grouped into totally ordered bands by fitness-gap
/// thresholds; within a band, couple history selects between the base
/// strategy and its variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PairingStrategy {
    /// Both partners perform the identical exercise
    SameExercise,
    /// Identical exercise performed as a head-to-head contest
    Competitive,
    /// Adjacent members of one progression chain
    ProgressionChainAdjacent,
    /// Partner-interactive or mirrored exercise
    PartnerInteractive,
    /// Distant members of one progression chain
    ProgressionChainDistant,
    /// Different exercises for the same muscle, matched by difficulty
    SameMuscleDifferentExercise,
}

impl PairingStrategy {
    /// Gap band this strategy belongs to; bands are ordered 0..3
    #[must_use]
    pub const fn band(self) -> u8 {
        match self {
            Self::SameExercise | Self::Competitive => 0,
            Self::ProgressionChainAdjacent | Self::PartnerInteractive => 1,
            Self::ProgressionChainDistant => 2,
            Self::SameMuscleDifferentExercise => 3,
        }
    }
}

/// Subjective movement quality on a 1-4 scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl FormQuality {
    /// Numeric score used in running averages
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Poor => 1.0,
            Self::Fair => 2.0,
            Self::Good => 3.0,
            Self::Excellent => 4.0,
        }
    }
}

/// One exercise entry within a workout log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Catalog id of the exercise
    pub exercise_id: String,
    /// Prescribed repetitions, if rep-based
    pub prescribed_reps: Option<u32>,
    /// Prescribed duration in seconds, if time-based
    pub prescribed_duration_seconds: Option<u32>,
    /// Prescribed external load in kilograms
    pub prescribed_weight_kg: Option<f64>,
    /// Prescribed sets
    pub prescribed_sets: u32,
    /// Best actual repetitions in a set
    pub actual_reps: Option<u32>,
    /// Actual duration in seconds
    pub actual_duration_seconds: Option<u32>,
    /// Actual external load used
    pub actual_weight_kg: Option<f64>,
    /// Sets actually completed
    pub sets_completed: u32,
    /// Reported reps in reserve (0 = failure)
    pub rir: u8,
    /// Reported form quality
    pub form_quality: FormQuality,
    /// Whether the full prescription was completed
    pub completed: bool,
    /// Whether the exercise was skipped entirely
    pub skipped: bool,
    /// Pain reported during this exercise
    pub felt_pain: bool,
    /// Marked as too easy
    pub too_easy: bool,
    /// Marked as too hard
    pub too_hard: bool,
}

/// Incremental builder for [`ExerciseLog`]
///
/// Validation and defaulting are deferred to [`ExerciseLogBuilder::build`]:
/// an unset RIR is inferred from the too-easy/too-hard flags, and a skipped
/// exercise can never be marked completed.
#[derive(Debug, Clone, Default)]
pub struct ExerciseLogBuilder {
    exercise_id: Option<String>,
    prescribed_reps: Option<u32>,
    prescribed_duration_seconds: Option<u32>,
    prescribed_weight_kg: Option<f64>,
    prescribed_sets: Option<u32>,
    actual_reps: Option<u32>,
    actual_duration_seconds: Option<u32>,
    actual_weight_kg: Option<f64>,
    sets_completed: Option<u32>,
    rir: Option<u8>,
    form_quality: Option<FormQuality>,
    completed: Option<bool>,
    skipped: bool,
    felt_pain: bool,
    too_easy: bool,
    too_hard: bool,
}

impl ExerciseLogBuilder {
    /// Start a builder for the given exercise
    #[must_use]
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: Some(exercise_id.into()),
            ..Self::default()
        }
    }

    /// Record the prescription this log is measured against
    #[must_use]
    pub fn prescription(
        mut self,
        sets: u32,
        reps: Option<u32>,
        duration_seconds: Option<u32>,
        weight_kg: Option<f64>,
    ) -> Self {
        self.prescribed_sets = Some(sets);
        self.prescribed_reps = reps;
        self.prescribed_duration_seconds = duration_seconds;
        self.prescribed_weight_kg = weight_kg;
        self
    }

    /// Record what was actually performed
    #[must_use]
    pub fn performance(
        mut self,
        sets_completed: u32,
        reps: Option<u32>,
        duration_seconds: Option<u32>,
        weight_kg: Option<f64>,
    ) -> Self {
        self.sets_completed = Some(sets_completed);
        self.actual_reps = reps;
        self.actual_duration_seconds = duration_seconds;
        self.actual_weight_kg = weight_kg;
        self
    }

    /// Reported reps in reserve
    #[must_use]
    pub fn rir(mut self, rir: u8) -> Self {
        self.rir = Some(rir);
        self
    }

    /// Reported form quality
    #[must_use]
    pub fn form(mut self, form: FormQuality) -> Self {
        self.form_quality = Some(form);
        self
    }

    /// Whether the prescription was fully completed
    #[must_use]
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Mark the exercise as skipped
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }

    /// Flag pain during the exercise
    #[must_use]
    pub fn felt_pain(mut self) -> Self {
        self.felt_pain = true;
        self
    }

    /// Flag the exercise as too easy
    #[must_use]
    pub fn too_easy(mut self) -> Self {
        self.too_easy = true;
        self
    }

    /// Flag the exercise as too hard
    #[must_use]
    pub fn too_hard(mut self) -> Self {
        self.too_hard = true;
        self
    }

    /// Finalize the log, filling defaulted fields
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::MissingRequiredField`] when the
    /// exercise id is absent, and
    /// [`crate::errors::ErrorCode::ValueOutOfRange`] when the RIR exceeds
    /// the reporting scale.
    pub fn build(self) -> AppResult<ExerciseLog> {
        let exercise_id = self.exercise_id.ok_or_else(|| AppError::missing_field("exercise_id"))?;

        let rir = match self.rir {
            Some(r) if r > 10 => {
                return Err(AppError::out_of_range(format!(
                    "RIR {r} exceeds reporting scale for {exercise_id}"
                )));
            }
            Some(r) => r,
            None if self.too_easy => TOO_EASY_INFERRED_RIR,
            None if self.too_hard => 0,
            None => DEFAULT_RIR,
        };

        let completed = if self.skipped {
            false
        } else {
            self.completed.unwrap_or(false)
        };

        Ok(ExerciseLog {
            exercise_id,
            prescribed_reps: self.prescribed_reps,
            prescribed_duration_seconds: self.prescribed_duration_seconds,
            prescribed_weight_kg: self.prescribed_weight_kg,
            prescribed_sets: self.prescribed_sets.unwrap_or(1),
            actual_reps: self.actual_reps,
            actual_duration_seconds: self.actual_duration_seconds,
            actual_weight_kg: self.actual_weight_kg,
            sets_completed: self.sets_completed.unwrap_or(0),
            rir,
            form_quality: self.form_quality.unwrap_or(FormQuality::Good),
            completed,
            skipped: self.skipped,
            felt_pain: self.felt_pain,
            too_easy: self.too_easy,
            too_hard: self.too_hard,
        })
    }
}

/// One person's record of one training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// Workout identifier, shared by both partners' logs for a joint session
    pub workout_id: Uuid,
    /// Couple this session belongs to
    pub couple_id: Uuid,
    /// Person this log belongs to
    pub user_id: Uuid,
    /// Pairing strategy the session was generated with
    pub strategy: PairingStrategy,
    /// Session start
    pub started_at: DateTime<Utc>,
    /// Session end; set when the session is marked complete
    pub completed_at: Option<DateTime<Utc>>,
    /// Per-exercise entries in performed order
    pub entries: Vec<ExerciseLog>,
}

impl WorkoutLog {
    /// Open a log at session start
    #[must_use]
    pub fn begin(
        workout_id: Uuid,
        couple_id: Uuid,
        user_id: Uuid,
        strategy: PairingStrategy,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workout_id,
            couple_id,
            user_id,
            strategy,
            started_at,
            completed_at: None,
            entries: Vec::new(),
        }
    }

    /// Append an entry; rejected once the session is complete
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the log is already sealed.
    pub fn append(&mut self, entry: ExerciseLog) -> AppResult<()> {
        if self.completed_at.is_some() {
            return Err(AppError::invalid_input(format!(
                "workout {} is already complete",
                self.workout_id
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Seal the log; entries become immutable
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    /// Fraction of non-skipped entries that were completed
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        let attempted: Vec<_> = self.entries.iter().filter(|e| !e.skipped).collect();
        if attempted.is_empty() {
            return 0.0;
        }
        attempted.iter().filter(|e| e.completed).count() as f64 / attempted.len() as f64
    }

    /// Fraction of entries that were skipped
    #[must_use]
    pub fn skip_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().filter(|e| e.skipped).count() as f64 / self.entries.len() as f64
    }
}

/// Multi-factor score breakdown for a candidate pair
///
/// Sub-scores are in [0, 1]. `safety` is 1.0 for every pair that reaches
/// scoring; unsafe candidates are removed by the constraint filter first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingScore {
    pub safety: f64,
    pub ability_match: f64,
    pub hr_zone_match: f64,
    pub rir_match: f64,
    pub time_sync: f64,
    pub goal_alignment: f64,
    pub enjoyment: f64,
    pub variety: f64,
    pub connection: f64,
    /// Weighted total used for ranking
    pub total: f64,
}

/// One partner's prescription within a pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    /// Person this prescription is for
    pub user_id: Uuid,
    /// Catalog id of the assigned exercise
    pub exercise_id: String,
    /// Display name of the assigned exercise
    pub exercise_name: String,
    /// Exercise difficulty (1-5)
    pub difficulty: u8,
    /// Sets to perform
    pub sets: u32,
    /// Repetitions per set, if rep-based
    pub reps: Option<u32>,
    /// Work duration per set in seconds, if time-based
    pub duration_seconds: Option<u32>,
    /// External load in kilograms, if loaded
    pub weight_kg: Option<f64>,
    /// Intensity classification of the assigned exercise
    pub intensity: IntensityLevel,
    /// Estimated seconds per set
    pub estimated_set_seconds: u32,
}

/// A scored pairing of two exercises for one workout slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePair {
    /// Muscle group this slot targets
    pub muscle_group: MuscleGroup,
    /// Strategy that produced the pair
    pub strategy: PairingStrategy,
    /// How the partners interact during the slot
    pub interaction: InteractionType,
    /// Partner A's prescription
    pub partner_a: Prescription,
    /// Partner B's prescription
    pub partner_b: Prescription,
    /// Score breakdown
    pub score: PairingScore,
}

/// Overall workout difficulty label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutDifficulty {
    Beginner,
    Novice,
    Intermediate,
    Proficient,
    Advanced,
}

impl WorkoutDifficulty {
    /// Label for a rounded mean difficulty in 1..=5
    #[must_use]
    pub const fn from_rounded_difficulty(difficulty: u8) -> Self {
        match difficulty {
            0 | 1 => Self::Beginner,
            2 => Self::Novice,
            3 => Self::Intermediate,
            4 => Self::Proficient,
            _ => Self::Advanced,
        }
    }
}

/// Output of workout generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    /// Identifier for the generated session
    pub workout_id: Uuid,
    /// Couple the workout was generated for
    pub couple_id: Uuid,
    /// Session-level strategy selected from the fitness gap
    pub strategy: PairingStrategy,
    /// Warm-up section: identical low-intensity pairs
    pub warm_up: Vec<ExercisePair>,
    /// Main section: top-scoring pair(s) per target muscle group
    pub main: Vec<ExercisePair>,
    /// Cooldown section: identical flexibility pairs
    pub cool_down: Vec<ExercisePair>,
    /// Estimated total duration in minutes
    pub estimated_duration_minutes: u32,
    /// Overall difficulty label
    pub difficulty: WorkoutDifficulty,
    /// Degraded-path notes surfaced to the caller (fallback pairs, uncovered groups)
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl GeneratedWorkout {
    /// All pairs across the three sections, in session order
    pub fn all_pairs(&self) -> impl Iterator<Item = &ExercisePair> {
        self.warm_up
            .iter()
            .chain(self.main.iter())
            .chain(self.cool_down.iter())
    }

    /// Human-readable one-line description
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} pairs, ~{} min, {:?} ({:?})",
            self.warm_up.len() + self.main.len() + self.cool_down.len(),
            self.estimated_duration_minutes,
            self.difficulty,
            self.strategy,
        )
    }
}
