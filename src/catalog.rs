// ABOUTME: Read-only exercise catalog with id-resolved variation chains
// ABOUTME: Variation links are validated once at load; dangling edges are dropped with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tandem Fitness

//! # Exercise Catalog
//!
//! Immutable reference data consumed by every engine. Lookups are id-based;
//! harder/easier variation links form a directed graph resolved at load time
//! so the engines never perform name-normalization lookups.

use std::collections::HashMap;

use tracing::warn;

use crate::models::exercise::{
    Equipment, ExerciseCategory, ExerciseDefinition, FoundationalMovement, InjuryArea,
    IntensityLevel, MuscleGroup, SpaceRequirement,
};

/// Read-only collection of exercise definitions
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: HashMap<String, ExerciseDefinition>,
}

impl ExerciseCatalog {
    /// Build a catalog, resolving and validating variation edges
    ///
    /// An edge pointing at an id not present in the set is dropped and
    /// logged; the exercise itself is kept.
    #[must_use]
    pub fn new(definitions: Vec<ExerciseDefinition>) -> Self {
        let mut exercises: HashMap<String, ExerciseDefinition> = definitions
            .into_iter()
            .map(|def| (def.id.clone(), def))
            .collect();

        let known: Vec<String> = exercises.keys().cloned().collect();
        for def in exercises.values_mut() {
            if let Some(harder) = &def.harder_variation {
                if !known.contains(harder) {
                    warn!(
                        exercise = %def.id,
                        target = %harder,
                        "dropping dangling harder-variation edge"
                    );
                    def.harder_variation = None;
                }
            }
            if let Some(easier) = &def.easier_variation {
                if !known.contains(easier) {
                    warn!(
                        exercise = %def.id,
                        target = %easier,
                        "dropping dangling easier-variation edge"
                    );
                    def.easier_variation = None;
                }
            }
        }

        Self { exercises }
    }

    /// Look up an exercise by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.get(id)
    }

    /// Number of exercises in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// All exercises whose primary muscle group matches
    pub fn by_muscle_group(&self, group: MuscleGroup) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises
            .values()
            .filter(move |e| e.muscle_group == group)
    }

    /// All exercises in a category
    pub fn by_category(
        &self,
        category: ExerciseCategory,
    ) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises
            .values()
            .filter(move |e| e.category == category)
    }

    /// All true partner exercises
    pub fn partner_exercises(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.values().filter(|e| e.is_partner_exercise)
    }

    /// The next-harder variation of an exercise, if linked
    #[must_use]
    pub fn harder_variation(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.get(id)
            .and_then(|e| e.harder_variation.as_deref())
            .and_then(|h| self.get(h))
    }

    /// The next-easier variation of an exercise, if linked
    #[must_use]
    pub fn easier_variation(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.get(id)
            .and_then(|e| e.easier_variation.as_deref())
            .and_then(|h| self.get(h))
    }

    /// Full progression chain containing an exercise, ordered easiest first
    ///
    /// Walks easier links to the chain head, then harder links to the tail.
    /// Cycles are broken by refusing to revisit an id.
    #[must_use]
    pub fn progression_chain(&self, id: &str) -> Vec<&ExerciseDefinition> {
        let Some(start) = self.get(id) else {
            return Vec::new();
        };

        let mut visited = vec![start.id.as_str()];
        let mut head = start;
        while let Some(easier) = head
            .easier_variation
            .as_deref()
            .and_then(|e| self.get(e))
            .filter(|e| !visited.contains(&e.id.as_str()))
        {
            visited.push(easier.id.as_str());
            head = easier;
        }

        let mut chain = vec![head];
        let mut seen = vec![head.id.as_str()];
        let mut current = head;
        while let Some(harder) = current
            .harder_variation
            .as_deref()
            .and_then(|h| self.get(h))
            .filter(|h| !seen.contains(&h.id.as_str()))
        {
            seen.push(harder.id.as_str());
            chain.push(harder);
            current = harder;
        }

        chain
    }

    /// Built-in bodyweight/dumbbell seed catalog used by tests and demos
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        fn base(
            id: &str,
            name: &str,
            muscle_group: MuscleGroup,
            category: ExerciseCategory,
            difficulty: u8,
            intensity: IntensityLevel,
        ) -> ExerciseDefinition {
            ExerciseDefinition {
                id: id.into(),
                name: name.into(),
                muscle_group,
                secondary_muscles: Vec::new(),
                category,
                difficulty,
                intensity,
                required_equipment: Vec::new(),
                equipment_alternatives: Vec::new(),
                space: SpaceRequirement::Small,
                contraindications: Vec::new(),
                harder_variation: None,
                easier_variation: None,
                default_reps: Some(10),
                default_duration_seconds: None,
                default_sets: 3,
                estimated_set_seconds: 45,
                is_partner_exercise: false,
                requires_contact: false,
                is_loadable: false,
                foundational_requirement: None,
            }
        }

        let definitions = vec![
            // Push-up chain (chest)
            ExerciseDefinition {
                harder_variation: Some("knee_pushup".into()),
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                space: SpaceRequirement::Minimal,
                ..base(
                    "wall_pushup",
                    "Wall Push-Up",
                    MuscleGroup::Chest,
                    ExerciseCategory::Strength,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("wall_pushup".into()),
                harder_variation: Some("pushup".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                ..base(
                    "knee_pushup",
                    "Knee Push-Up",
                    MuscleGroup::Chest,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("knee_pushup".into()),
                harder_variation: Some("decline_pushup".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                foundational_requirement: Some(FoundationalMovement::PushUp),
                ..base(
                    "pushup",
                    "Push-Up",
                    MuscleGroup::Chest,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("pushup".into()),
                harder_variation: Some("archer_pushup".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                foundational_requirement: Some(FoundationalMovement::PushUp),
                required_equipment: vec![Equipment::Bench],
                equipment_alternatives: vec![vec![Equipment::Mat]],
                ..base(
                    "decline_pushup",
                    "Decline Push-Up",
                    MuscleGroup::Chest,
                    ExerciseCategory::Strength,
                    4,
                    IntensityLevel::High,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("decline_pushup".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                foundational_requirement: Some(FoundationalMovement::PushUp),
                ..base(
                    "archer_pushup",
                    "Archer Push-Up",
                    MuscleGroup::Chest,
                    ExerciseCategory::Strength,
                    5,
                    IntensityLevel::High,
                )
            },
            // Squat chain (legs)
            ExerciseDefinition {
                harder_variation: Some("bodyweight_squat".into()),
                required_equipment: vec![Equipment::Bench],
                contraindications: vec![InjuryArea::Knee],
                ..base(
                    "box_squat",
                    "Box Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Strength,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("box_squat".into()),
                harder_variation: Some("goblet_squat".into()),
                secondary_muscles: vec![MuscleGroup::Glutes, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Knee],
                foundational_requirement: Some(FoundationalMovement::Squat),
                default_reps: Some(15),
                ..base(
                    "bodyweight_squat",
                    "Bodyweight Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("bodyweight_squat".into()),
                harder_variation: Some("jump_squat".into()),
                secondary_muscles: vec![MuscleGroup::Glutes, MuscleGroup::Core],
                required_equipment: vec![Equipment::Dumbbells],
                equipment_alternatives: vec![vec![Equipment::Kettlebell]],
                contraindications: vec![InjuryArea::Knee, InjuryArea::LowerBack],
                foundational_requirement: Some(FoundationalMovement::Squat),
                is_loadable: true,
                ..base(
                    "goblet_squat",
                    "Goblet Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("goblet_squat".into()),
                harder_variation: Some("pistol_squat".into()),
                secondary_muscles: vec![MuscleGroup::Glutes],
                contraindications: vec![InjuryArea::Knee, InjuryArea::Ankle],
                foundational_requirement: Some(FoundationalMovement::Squat),
                space: SpaceRequirement::Medium,
                ..base(
                    "jump_squat",
                    "Jump Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Plyometric,
                    4,
                    IntensityLevel::VeryHigh,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("jump_squat".into()),
                secondary_muscles: vec![MuscleGroup::Glutes, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Knee, InjuryArea::Ankle],
                foundational_requirement: Some(FoundationalMovement::Squat),
                default_reps: Some(6),
                ..base(
                    "pistol_squat",
                    "Pistol Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Strength,
                    5,
                    IntensityLevel::High,
                )
            },
            // Plank chain (core)
            ExerciseDefinition {
                harder_variation: Some("plank".into()),
                default_reps: None,
                default_duration_seconds: Some(20),
                contraindications: vec![InjuryArea::Shoulder],
                ..base(
                    "incline_plank",
                    "Incline Plank",
                    MuscleGroup::Core,
                    ExerciseCategory::Strength,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("incline_plank".into()),
                harder_variation: Some("side_plank".into()),
                default_reps: None,
                default_duration_seconds: Some(40),
                contraindications: vec![InjuryArea::Shoulder, InjuryArea::LowerBack],
                foundational_requirement: Some(FoundationalMovement::Plank),
                ..base(
                    "plank",
                    "Plank",
                    MuscleGroup::Core,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("plank".into()),
                default_reps: None,
                default_duration_seconds: Some(30),
                contraindications: vec![InjuryArea::Shoulder, InjuryArea::LowerBack],
                foundational_requirement: Some(FoundationalMovement::Plank),
                ..base(
                    "side_plank",
                    "Side Plank",
                    MuscleGroup::Core,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                secondary_muscles: vec![MuscleGroup::Legs],
                contraindications: vec![InjuryArea::LowerBack, InjuryArea::Neck],
                default_reps: Some(12),
                ..base(
                    "bicycle_crunch",
                    "Bicycle Crunch",
                    MuscleGroup::Core,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            // Back
            ExerciseDefinition {
                harder_variation: Some("band_row".into()),
                contraindications: vec![InjuryArea::LowerBack],
                ..base(
                    "superman_hold",
                    "Superman Hold",
                    MuscleGroup::Back,
                    ExerciseCategory::Strength,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("superman_hold".into()),
                harder_variation: Some("pull_up".into()),
                secondary_muscles: vec![MuscleGroup::Arms],
                required_equipment: vec![Equipment::ResistanceBand],
                equipment_alternatives: vec![vec![Equipment::Dumbbells]],
                ..base(
                    "band_row",
                    "Band Row",
                    MuscleGroup::Back,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("band_row".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Shoulders],
                required_equipment: vec![Equipment::PullUpBar],
                contraindications: vec![InjuryArea::Shoulder, InjuryArea::Elbow],
                default_reps: Some(6),
                ..base(
                    "pull_up",
                    "Pull-Up",
                    MuscleGroup::Back,
                    ExerciseCategory::Strength,
                    4,
                    IntensityLevel::High,
                )
            },
            // Shoulders
            ExerciseDefinition {
                harder_variation: Some("pike_pushup".into()),
                required_equipment: vec![Equipment::Dumbbells],
                equipment_alternatives: vec![vec![Equipment::ResistanceBand]],
                contraindications: vec![InjuryArea::Shoulder, InjuryArea::Neck],
                is_loadable: true,
                ..base(
                    "overhead_press",
                    "Overhead Press",
                    MuscleGroup::Shoulders,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("overhead_press".into()),
                secondary_muscles: vec![MuscleGroup::Arms, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Shoulder, InjuryArea::Wrist],
                foundational_requirement: Some(FoundationalMovement::PushUp),
                default_reps: Some(8),
                ..base(
                    "pike_pushup",
                    "Pike Push-Up",
                    MuscleGroup::Shoulders,
                    ExerciseCategory::Strength,
                    4,
                    IntensityLevel::High,
                )
            },
            // Glutes
            ExerciseDefinition {
                harder_variation: Some("single_leg_bridge".into()),
                contraindications: vec![InjuryArea::LowerBack],
                default_reps: Some(15),
                ..base(
                    "glute_bridge",
                    "Glute Bridge",
                    MuscleGroup::Glutes,
                    ExerciseCategory::Strength,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                easier_variation: Some("glute_bridge".into()),
                secondary_muscles: vec![MuscleGroup::Core],
                contraindications: vec![InjuryArea::LowerBack, InjuryArea::Hip],
                ..base(
                    "single_leg_bridge",
                    "Single-Leg Bridge",
                    MuscleGroup::Glutes,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            // Arms
            ExerciseDefinition {
                required_equipment: vec![Equipment::Dumbbells],
                equipment_alternatives: vec![vec![Equipment::ResistanceBand]],
                contraindications: vec![InjuryArea::Elbow, InjuryArea::Wrist],
                is_loadable: true,
                ..base(
                    "bicep_curl",
                    "Bicep Curl",
                    MuscleGroup::Arms,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                required_equipment: vec![Equipment::Bench],
                contraindications: vec![InjuryArea::Elbow, InjuryArea::Shoulder, InjuryArea::Wrist],
                ..base(
                    "bench_dip",
                    "Bench Dip",
                    MuscleGroup::Arms,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            // Cardio / full body
            ExerciseDefinition {
                space: SpaceRequirement::Small,
                default_reps: Some(20),
                ..base(
                    "jumping_jacks",
                    "Jumping Jacks",
                    MuscleGroup::FullBody,
                    ExerciseCategory::Cardio,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                default_reps: None,
                default_duration_seconds: Some(30),
                ..base(
                    "high_knees",
                    "High Knees",
                    MuscleGroup::FullBody,
                    ExerciseCategory::Cardio,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                secondary_muscles: vec![MuscleGroup::Core, MuscleGroup::Shoulders],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                foundational_requirement: Some(FoundationalMovement::Plank),
                default_reps: Some(16),
                ..base(
                    "mountain_climbers",
                    "Mountain Climbers",
                    MuscleGroup::FullBody,
                    ExerciseCategory::Cardio,
                    3,
                    IntensityLevel::High,
                )
            },
            ExerciseDefinition {
                secondary_muscles: vec![MuscleGroup::Legs, MuscleGroup::Chest, MuscleGroup::Core],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Knee, InjuryArea::LowerBack],
                foundational_requirement: Some(FoundationalMovement::PushUp),
                space: SpaceRequirement::Medium,
                default_reps: Some(8),
                ..base(
                    "burpee",
                    "Burpee",
                    MuscleGroup::FullBody,
                    ExerciseCategory::Cardio,
                    4,
                    IntensityLevel::VeryHigh,
                )
            },
            // Warm-up movements
            ExerciseDefinition {
                space: SpaceRequirement::Minimal,
                default_reps: Some(12),
                contraindications: vec![InjuryArea::Shoulder],
                ..base(
                    "arm_circles",
                    "Arm Circles",
                    MuscleGroup::Shoulders,
                    ExerciseCategory::Cardio,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                space: SpaceRequirement::Minimal,
                default_reps: Some(10),
                ..base(
                    "torso_twist",
                    "Torso Twist",
                    MuscleGroup::Core,
                    ExerciseCategory::Cardio,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                default_reps: Some(10),
                contraindications: vec![InjuryArea::Hip],
                ..base(
                    "leg_swings",
                    "Leg Swings",
                    MuscleGroup::Legs,
                    ExerciseCategory::Cardio,
                    1,
                    IntensityLevel::Low,
                )
            },
            // Cooldown stretches
            ExerciseDefinition {
                default_reps: None,
                default_duration_seconds: Some(30),
                default_sets: 1,
                estimated_set_seconds: 30,
                ..base(
                    "child_pose",
                    "Child's Pose",
                    MuscleGroup::Back,
                    ExerciseCategory::Flexibility,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                default_reps: None,
                default_duration_seconds: Some(30),
                default_sets: 1,
                estimated_set_seconds: 30,
                contraindications: vec![InjuryArea::Hip, InjuryArea::Knee],
                ..base(
                    "quad_stretch",
                    "Standing Quad Stretch",
                    MuscleGroup::Legs,
                    ExerciseCategory::Flexibility,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                default_reps: None,
                default_duration_seconds: Some(30),
                default_sets: 1,
                estimated_set_seconds: 30,
                ..base(
                    "chest_doorway_stretch",
                    "Doorway Chest Stretch",
                    MuscleGroup::Chest,
                    ExerciseCategory::Flexibility,
                    1,
                    IntensityLevel::Low,
                )
            },
            ExerciseDefinition {
                default_reps: None,
                default_duration_seconds: Some(30),
                default_sets: 1,
                estimated_set_seconds: 30,
                contraindications: vec![InjuryArea::LowerBack],
                ..base(
                    "seated_forward_fold",
                    "Seated Forward Fold",
                    MuscleGroup::Legs,
                    ExerciseCategory::Flexibility,
                    1,
                    IntensityLevel::Low,
                )
            },
            // Partner exercises
            ExerciseDefinition {
                is_partner_exercise: true,
                requires_contact: false,
                secondary_muscles: vec![MuscleGroup::Core],
                space: SpaceRequirement::Medium,
                default_reps: Some(12),
                ..base(
                    "partner_squat_pulse",
                    "Partner Mirror Squat",
                    MuscleGroup::Legs,
                    ExerciseCategory::Strength,
                    2,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                is_partner_exercise: true,
                requires_contact: true,
                required_equipment: vec![Equipment::ResistanceBand],
                secondary_muscles: vec![MuscleGroup::Arms],
                space: SpaceRequirement::Medium,
                contraindications: vec![InjuryArea::LowerBack],
                ..base(
                    "partner_band_row",
                    "Partner Band Row",
                    MuscleGroup::Back,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
            ExerciseDefinition {
                is_partner_exercise: true,
                requires_contact: true,
                secondary_muscles: vec![MuscleGroup::Shoulders],
                contraindications: vec![InjuryArea::Wrist, InjuryArea::Shoulder],
                foundational_requirement: Some(FoundationalMovement::Plank),
                default_reps: Some(10),
                ..base(
                    "partner_plank_clap",
                    "Partner Plank Clap",
                    MuscleGroup::Core,
                    ExerciseCategory::Strength,
                    3,
                    IntensityLevel::Moderate,
                )
            },
        ];

        Self::new(definitions)
    }
}
