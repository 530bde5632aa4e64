// ABOUTME: Tabular codec between normalized workout records and flat sheet rows
// ABOUTME: Pure transformation layer with grouping, numeric coercion, and date ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Tabular Codec
//!
//! Bidirectional mapping between the normalized workout/exercise/set
//! hierarchy and the flat row format stored in the remote sheet. Pure
//! functions, no I/O.
//!
//! Workout rows carry one set each:
//! `[workoutId, date, title, muscleGroupsCSV, notes, exerciseName, weight, reps]`.
//! Library rows carry one entry each under a fixed six-column header.

use chrono::NaiveDate;

use crate::models::{Exercise, PrefabExercise, Workout, WorkoutSet};

/// Header row written ahead of library entries on every full replacement
pub const LIBRARY_HEADER: [&str; 6] = [
    "id",
    "name",
    "primaryMuscle",
    "secondaryMuscles",
    "equipment",
    "form",
];

/// Encode a workout into flat sheet rows, one row per (exercise, set) pair
/// in iteration order.
///
/// A workout with zero sets across all exercises encodes to zero rows and
/// therefore disappears on write. Known lossy case; callers that must keep
/// such a workout have to reject it before encoding.
#[must_use]
pub fn encode_workout(workout: &Workout) -> Vec<Vec<String>> {
    let muscle_groups = workout.muscle_groups.join(", ");
    let notes = workout.notes.clone().unwrap_or_default();

    let mut rows = Vec::new();
    for exercise in &workout.exercises {
        for set in &exercise.sets {
            rows.push(vec![
                workout.id.clone(),
                workout.date.clone(),
                workout.title.clone(),
                muscle_groups.clone(),
                notes.clone(),
                exercise.name.clone(),
                set.weight.to_string(),
                set.reps.to_string(),
            ]);
        }
    }
    rows
}

/// Decode a row matrix (header included) into workouts, newest first.
///
/// Rows are processed in order and grouped by the workout-id column; rows
/// with an empty id are skipped. Workout-level fields are taken from the
/// first row carrying each id; later rows with the same id only contribute
/// sets. Within a workout the exercise name is the join key, so a name
/// appearing in non-contiguous rows still accumulates into one exercise in
/// row order. Malformed numeric text coerces to zero rather than failing.
#[must_use]
pub fn decode_workouts(data: &[Vec<String>]) -> Vec<Workout> {
    if data.len() < 2 {
        return Vec::new();
    }

    let mut workouts: Vec<Workout> = Vec::new();

    // First row is the header.
    for row in &data[1..] {
        let id = cell(row, 0);
        if id.is_empty() {
            continue;
        }

        let position = workouts.iter().position(|w| w.id == id);
        let workout = match position {
            Some(index) => &mut workouts[index],
            None => {
                workouts.push(Workout {
                    id: id.to_owned(),
                    date: cell(row, 1).to_owned(),
                    title: cell(row, 2).to_owned(),
                    muscle_groups: split_muscle_groups(cell(row, 3)),
                    exercises: Vec::new(),
                    notes: optional_text(cell(row, 4)),
                });
                let last = workouts.len() - 1;
                &mut workouts[last]
            }
        };

        let exercise_name = cell(row, 5);
        let set = WorkoutSet {
            weight: cell(row, 6).parse::<f64>().unwrap_or(0.0),
            reps: cell(row, 7).parse::<u32>().unwrap_or(0),
        };

        match workout.exercises.iter_mut().find(|e| e.name == exercise_name) {
            Some(exercise) => exercise.sets.push(set),
            None => {
                let mut exercise = Exercise::new(exercise_name);
                exercise.sets.push(set);
                workout.exercises.push(exercise);
            }
        }
    }

    // Newest first for display; stable, so equal dates keep their relative
    // order and unparseable dates sink to the end.
    workouts.sort_by(|a, b| sort_date(&b.date).cmp(&sort_date(&a.date)));
    workouts
}

/// Encode the full exercise library, header row first.
///
/// The write path replaces the whole sheet range, so the header is part of
/// the payload on every update.
#[must_use]
pub fn encode_library(entries: &[PrefabExercise]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(entries.len() + 1);
    rows.push(LIBRARY_HEADER.iter().map(|&h| h.to_owned()).collect());
    for entry in entries {
        rows.push(vec![
            entry.id.clone(),
            entry.name.clone(),
            entry.primary_muscle.clone(),
            entry.secondary_muscles.clone(),
            entry.equipment.clone(),
            entry.form.clone(),
        ]);
    }
    rows
}

/// Decode library rows (header included), dropping rows without an id or
/// name. Missing trailing columns decode as empty strings.
#[must_use]
pub fn decode_library(data: &[Vec<String>]) -> Vec<PrefabExercise> {
    if data.len() < 2 {
        return Vec::new();
    }

    data[1..]
        .iter()
        .map(|row| PrefabExercise {
            id: cell(row, 0).to_owned(),
            name: cell(row, 1).to_owned(),
            primary_muscle: cell(row, 2).to_owned(),
            secondary_muscles: cell(row, 3).to_owned(),
            equipment: cell(row, 4).to_owned(),
            form: cell(row, 5).to_owned(),
        })
        .filter(|entry| !entry.id.is_empty() && !entry.name.is_empty())
        .collect()
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

fn split_muscle_groups(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|part| part.trim().to_owned()).collect()
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_owned())
    }
}

/// Date key for display ordering. Failures sort as the oldest possible value.
fn sort_date(date: &str) -> NaiveDate {
    date.parse::<NaiveDate>().unwrap_or(NaiveDate::MIN)
}
