// ABOUTME: Core domain types for workout tracking
// ABOUTME: Defines Workout, Exercise, WorkoutSet, and PrefabExercise records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Domain Models
//!
//! Normalized in-memory representation of the workout log. The remote sheet
//! is the durable owner of this data; everything here is a transient,
//! fully-replaceable snapshot per fetch cycle.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One performed set: weight in kilograms and repetition count
///
/// Immutable value once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Weight lifted in kg
    pub weight: f64,
    /// Number of repetitions
    pub reps: u32,
}

impl WorkoutSet {
    /// Create a new set
    #[must_use]
    pub const fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }
}

/// One movement performed within a workout, with its set list
///
/// Set order is insertion order, which is performed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name; matches a library entry name when produced via extraction
    pub name: String,
    /// Sets in performed order
    pub sets: Vec<WorkoutSet>,
}

impl Exercise {
    /// Create an exercise with no sets yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: Vec::new(),
        }
    }
}

/// One logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Opaque unique identifier, generated at creation time
    pub id: String,
    /// Session date, `YYYY-MM-DD`
    pub date: String,
    /// Short session title (e.g. "Push")
    pub title: String,
    /// Muscle groups worked; presentation order is insertion order
    #[serde(rename = "muscleGroups")]
    pub muscle_groups: Vec<String>,
    /// Exercises in performed order
    pub exercises: Vec<Exercise>,
    /// Free-text session notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Workout {
    /// Generate a fresh opaque workout id: creation timestamp plus a random
    /// alphanumeric suffix, unique enough for a single-user sheet.
    #[must_use]
    pub fn generate_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(7)
            .map(char::from)
            .collect();
        format!("{}{}", Utc::now().to_rfc3339(), suffix.to_lowercase())
    }
}

/// A workout as captured before an id is assigned
///
/// Produced by manual entry or by the text extraction path; becomes a
/// [`Workout`] when the repository assigns a generated id on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    /// Session date, `YYYY-MM-DD`
    pub date: String,
    /// Short session title
    pub title: String,
    /// Muscle groups worked
    #[serde(rename = "muscleGroups")]
    pub muscle_groups: Vec<String>,
    /// Exercises in performed order
    pub exercises: Vec<Exercise>,
    /// Free-text session notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewWorkout {
    /// Promote to a full [`Workout`] with a freshly generated id
    #[must_use]
    pub fn into_workout(self) -> Workout {
        Workout {
            id: Workout::generate_id(),
            date: self.date,
            title: self.title,
            muscle_groups: self.muscle_groups,
            exercises: self.exercises,
            notes: self.notes,
        }
    }
}

/// Exercise-library entry
///
/// The library is the single source of truth for valid exercise names: the
/// extraction contract must resolve a free-text mention to exactly one
/// `name` or drop it, and `name` is the join key with logged exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabExercise {
    /// Unique identifier
    pub id: String,
    /// Unique name; match target for extraction
    pub name: String,
    /// Primary muscle worked
    #[serde(rename = "primaryMuscle")]
    pub primary_muscle: String,
    /// Secondary muscles, comma-joined free text
    #[serde(rename = "secondaryMuscles")]
    pub secondary_muscles: String,
    /// Implement used (barbell, dumbbell, machine, ...)
    pub equipment: String,
    /// Body position / form description
    pub form: String,
}

impl PrefabExercise {
    /// Generate a fresh library-entry id, same scheme as workout ids
    #[must_use]
    pub fn generate_id() -> String {
        Workout::generate_id()
    }
}

/// A library entry as captured before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPrefabExercise {
    /// Unique name; match target for extraction
    pub name: String,
    /// Primary muscle worked
    #[serde(rename = "primaryMuscle")]
    pub primary_muscle: String,
    /// Secondary muscles, comma-joined free text
    #[serde(rename = "secondaryMuscles")]
    pub secondary_muscles: String,
    /// Implement used
    pub equipment: String,
    /// Body position / form description
    pub form: String,
}

impl NewPrefabExercise {
    /// Promote to a full [`PrefabExercise`] with a freshly generated id
    #[must_use]
    pub fn with_id(self, id: String) -> PrefabExercise {
        PrefabExercise {
            id,
            name: self.name,
            primary_muscle: self.primary_muscle,
            secondary_muscles: self.secondary_muscles,
            equipment: self.equipment,
            form: self.form,
        }
    }
}
