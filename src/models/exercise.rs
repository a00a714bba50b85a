// ABOUTME: Exercise reference types consumed from the read-only catalog
// ABOUTME: Defines muscle groups, equipment, space, intensity, and the ExerciseDefinition record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

use serde::{Deserialize, Serialize};

/// Primary muscle groups targeted by catalog exercises
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Chest (pectorals)
    Chest,
    /// Back (lats, rhomboids, traps)
    Back,
    /// Shoulders (deltoids)
    Shoulders,
    /// Arms (biceps, triceps, forearms)
    Arms,
    /// Core (abdominals, obliques, lower back stabilizers)
    Core,
    /// Legs (quadriceps, hamstrings, calves)
    Legs,
    /// Glutes
    Glutes,
    /// Whole-body movements
    FullBody,
}

impl MuscleGroup {
    /// Whether this group contributes to upper-body strength estimates
    #[must_use]
    pub const fn is_upper_body(self) -> bool {
        matches!(self, Self::Chest | Self::Back | Self::Shoulders | Self::Arms)
    }

    /// Whether this group contributes to lower-body strength estimates
    #[must_use]
    pub const fn is_lower_body(self) -> bool {
        matches!(self, Self::Legs | Self::Glutes)
    }
}

/// Broad exercise categories used for section assembly and goal alignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Resistance work (bodyweight or loaded)
    Strength,
    /// Sustained elevated-heart-rate work
    Cardio,
    /// Stretching and mobility
    Flexibility,
    /// Stability and proprioception work
    Balance,
    /// Explosive jump/throw movements
    Plyometric,
}

/// Equipment an exercise may require
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Pair of dumbbells
    Dumbbells,
    /// Single kettlebell
    Kettlebell,
    /// Resistance band
    ResistanceBand,
    /// Doorway or mounted pull-up bar
    PullUpBar,
    /// Flat bench or sturdy chair
    Bench,
    /// Exercise mat
    Mat,
    /// Jump rope
    JumpRope,
}

/// Floor space an exercise needs, ordered from least to most
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpaceRequirement {
    /// Standing room only
    Minimal,
    /// Arm's-length clearance
    Small,
    /// Room to lie down and extend
    Medium,
    /// Room for travel (lunges, jumps, partner drills)
    Large,
}

/// Body areas an injury can affect; used for contraindication checks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InjuryArea {
    Knee,
    LowerBack,
    Shoulder,
    Wrist,
    Elbow,
    Ankle,
    Hip,
    Neck,
}

/// Ordinal intensity classification of an exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntensityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl IntensityLevel {
    /// Ordinal position, used for zone-match scoring
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }
}

/// Foundational movement patterns a person must demonstrate before
/// attempting exercises built on them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoundationalMovement {
    PushUp,
    Plank,
    Squat,
}

/// How the two partners interact while performing a pair
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    /// Side by side, no interaction
    Independent,
    /// Facing each other, synchronized movement
    Mirrored,
    /// Same exercise, racing or counting against each other
    Competitive,
    /// True partner exercise where one assists or resists the other
    Assisted,
}

/// A single immutable exercise record from the reference catalog
///
/// Variation links are id-based graph edges resolved once at catalog load;
/// the engine never performs name-based lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Primary muscle group
    pub muscle_group: MuscleGroup,
    /// Secondary muscle groups that accumulate partial fatigue
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    /// Exercise category
    pub category: ExerciseCategory,
    /// Difficulty on a 1-5 scale
    pub difficulty: u8,
    /// Intensity classification
    pub intensity: IntensityLevel,
    /// Equipment that must all be available
    #[serde(default)]
    pub required_equipment: Vec<Equipment>,
    /// Alternative equipment sets, any one of which fully substitutes
    #[serde(default)]
    pub equipment_alternatives: Vec<Vec<Equipment>>,
    /// Floor space needed
    pub space: SpaceRequirement,
    /// Injury areas for which this exercise is contraindicated
    #[serde(default)]
    pub contraindications: Vec<InjuryArea>,
    /// Catalog id of the next-harder variation, if any
    #[serde(default)]
    pub harder_variation: Option<String>,
    /// Catalog id of the next-easier variation, if any
    #[serde(default)]
    pub easier_variation: Option<String>,
    /// Default rep prescription for rep-based exercises
    #[serde(default)]
    pub default_reps: Option<u32>,
    /// Default hold/work duration for time-based exercises (seconds)
    #[serde(default)]
    pub default_duration_seconds: Option<u32>,
    /// Default number of sets
    pub default_sets: u32,
    /// Estimated seconds to complete one set at the default prescription
    pub estimated_set_seconds: u32,
    /// Whether this is a true partner exercise
    #[serde(default)]
    pub is_partner_exercise: bool,
    /// Whether performing it requires physical contact between partners
    #[serde(default)]
    pub requires_contact: bool,
    /// Whether external load can be added
    #[serde(default)]
    pub is_loadable: bool,
    /// Foundational movement the person must have demonstrated
    #[serde(default)]
    pub foundational_requirement: Option<FoundationalMovement>,
}

impl ExerciseDefinition {
    /// Estimated time for one partner to work through the full prescription
    /// of this exercise, in seconds, excluding rest
    #[must_use]
    pub fn estimated_work_seconds(&self) -> u32 {
        self.default_sets * self.estimated_set_seconds
    }
}
