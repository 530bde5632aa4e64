// ABOUTME: Derived workout metrics: volume, set counts, and estimated one-rep max
// ABOUTME: Pure functions over decoded records plus per-exercise history series for charting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Derived Metrics
//!
//! Aggregates computed from already-decoded workout data. Everything here is
//! a pure function: no error conditions, no side effects.

use serde::{Deserialize, Serialize};

use crate::models::{Exercise, Workout};

/// Per-session statistics for one exercise, used for charting progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Session date, `YYYY-MM-DD`
    pub date: String,
    /// Heaviest set of the session for this exercise
    pub max_weight: f64,
    /// Σ weight × reps over the session's sets for this exercise
    pub total_volume: f64,
    /// Best Epley estimate across the session's sets
    pub estimated_one_rm: f64,
}

/// Total volume of a workout: Σ weight × reps over all sets
#[must_use]
pub fn total_volume(workout: &Workout) -> f64 {
    workout.exercises.iter().map(exercise_volume).sum()
}

/// Total number of sets across all exercises of a workout
#[must_use]
pub fn total_sets(workout: &Workout) -> usize {
    workout.exercises.iter().map(|e| e.sets.len()).sum()
}

/// Estimated one-rep max via the Epley formula, rounded to the nearest
/// integer. A single rep is the exact-max special case and returns the
/// weight unrounded.
#[must_use]
pub fn estimated_one_rep_max(weight: f64, reps: u32) -> f64 {
    if reps == 1 {
        return weight;
    }
    (weight * (1.0 + f64::from(reps) / 30.0)).round()
}

/// Build the progression series for one exercise across workout history.
///
/// `workouts` is expected in display order (newest first, the codec's
/// output order); the returned series is oldest first, ready for a
/// left-to-right chart. Sessions not containing the exercise are skipped.
#[must_use]
pub fn exercise_history(workouts: &[Workout], exercise_name: &str) -> Vec<SessionStats> {
    let mut series: Vec<SessionStats> = workouts
        .iter()
        .filter_map(|workout| {
            let exercise = workout
                .exercises
                .iter()
                .find(|e| e.name == exercise_name)?;
            if exercise.sets.is_empty() {
                return None;
            }
            Some(SessionStats {
                date: workout.date.clone(),
                max_weight: exercise
                    .sets
                    .iter()
                    .map(|s| s.weight)
                    .fold(f64::MIN, f64::max),
                total_volume: exercise_volume(exercise),
                estimated_one_rm: exercise
                    .sets
                    .iter()
                    .map(|s| estimated_one_rep_max(s.weight, s.reps))
                    .fold(f64::MIN, f64::max),
            })
        })
        .collect();
    series.reverse();
    series
}

fn exercise_volume(exercise: &Exercise) -> f64 {
    exercise
        .sets
        .iter()
        .map(|s| s.weight * f64::from(s.reps))
        .sum()
}
