// ABOUTME: Workout and exercise-library repositories over a remote store
// ABOUTME: Snapshot caching, validation, write-then-refetch, and optimistic library updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Repositories
//!
//! Explicit repository objects injected with a [`RemoteStore`]; no ambient
//! shared state. Each repository holds a transient, fully-replaceable
//! snapshot of its range that is rebuilt on every fetch cycle. Reads return
//! immutable snapshot views; mutations take `&mut self`, await completion,
//! and refresh the snapshot before returning, so only one operation per
//! resource is ever in flight.
//!
//! Write semantics differ deliberately between the two repositories:
//! workout writes always re-fetch the range rather than trusting the
//! optimistic local state, while library writes apply the optimistic
//! replacement and re-fetch only on failure to restore consistency with
//! the remote source of truth.

use tracing::{instrument, warn};

use crate::codec::{decode_library, decode_workouts, encode_library, encode_workout};
use crate::errors::{AppError, AppResult};
use crate::models::{NewPrefabExercise, NewWorkout, PrefabExercise, Workout};
use crate::sheets::{EXERCISES_RANGE, WORKOUTS_RANGE};
use crate::store::RemoteStore;

/// Repository for logged workouts
#[derive(Debug)]
pub struct WorkoutRepository<S: RemoteStore> {
    store: S,
    snapshot: Vec<Workout>,
}

impl<S: RemoteStore> WorkoutRepository<S> {
    /// Create a repository with an empty snapshot; call
    /// [`refresh`](Self::refresh) before reading.
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
        }
    }

    /// Current snapshot in display order (newest first)
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.snapshot
    }

    /// Look up one workout by id in the current snapshot
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.snapshot.iter().find(|w| w.id == id)
    }

    /// Replace the snapshot with a fresh decode of the remote range
    ///
    /// # Errors
    ///
    /// Propagates transport errors; the previous snapshot is kept on failure.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> AppResult<()> {
        let rows = self.store.read_range(WORKOUTS_RANGE).await?;
        self.snapshot = decode_workouts(&rows);
        Ok(())
    }

    /// Validate, save, and re-fetch. Returns the assigned workout id.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call when required
    /// fields are missing or an exercise has no sets; otherwise propagates
    /// transport errors from the save or the mandatory re-fetch.
    #[instrument(skip(self, new_workout), fields(title = %new_workout.title))]
    pub async fn add(&mut self, new_workout: NewWorkout) -> AppResult<String> {
        validate_new_workout(&new_workout)?;

        let workout = new_workout.into_workout();
        let rows = encode_workout(&workout);
        self.store.save_workout(&workout.id, &rows).await?;

        // Never trust the optimistic state for workouts.
        self.refresh().await?;
        Ok(workout.id)
    }

    /// Delete a workout by id, then re-fetch
    ///
    /// # Errors
    ///
    /// Propagates transport errors from the delete or the re-fetch.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        self.store.delete_workout(id).await?;
        self.refresh().await
    }
}

/// Repository for the prefab exercise library
#[derive(Debug)]
pub struct ExerciseLibrary<S: RemoteStore> {
    store: S,
    snapshot: Vec<PrefabExercise>,
}

impl<S: RemoteStore> ExerciseLibrary<S> {
    /// Create a library with an empty snapshot; call
    /// [`refresh`](Self::refresh) before reading.
    pub fn new(store: S) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
        }
    }

    /// Current library entries
    #[must_use]
    pub fn entries(&self) -> &[PrefabExercise] {
        &self.snapshot
    }

    /// Exact-name lookup; `name` is the join key with logged exercises
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PrefabExercise> {
        self.snapshot.iter().find(|e| e.name == name)
    }

    /// Replace the snapshot with a fresh decode of the remote range
    ///
    /// # Errors
    ///
    /// Propagates transport errors; the previous snapshot is kept on failure.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> AppResult<()> {
        let rows = self.store.read_range(EXERCISES_RANGE).await?;
        self.snapshot = decode_library(&rows);
        Ok(())
    }

    /// Add a new entry. Returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, or propagates the
    /// remote failure after rolling the snapshot back via re-fetch.
    #[instrument(skip(self, entry), fields(name = %entry.name))]
    pub async fn add(&mut self, entry: NewPrefabExercise) -> AppResult<String> {
        if entry.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let entry = entry.with_id(PrefabExercise::generate_id());
        let id = entry.id.clone();
        let mut desired = self.snapshot.clone();
        desired.push(entry);
        self.replace_with(desired).await?;
        Ok(id)
    }

    /// Update an existing entry in place
    ///
    /// # Errors
    ///
    /// Returns a validation error when the id is unknown or the name is
    /// empty; otherwise behaves like [`add`](Self::add).
    #[instrument(skip(self, fields))]
    pub async fn update(&mut self, id: &str, fields: NewPrefabExercise) -> AppResult<()> {
        if fields.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if !self.snapshot.iter().any(|e| e.id == id) {
            return Err(AppError::invalid_input(format!("no exercise with id {id}")));
        }

        let desired = self
            .snapshot
            .iter()
            .map(|existing| {
                if existing.id == id {
                    fields.clone().with_id(id.to_owned())
                } else {
                    existing.clone()
                }
            })
            .collect();
        self.replace_with(desired).await
    }

    /// Remove an entry by id
    ///
    /// # Errors
    ///
    /// Behaves like [`add`](Self::add); removing an unknown id is a no-op
    /// replacement.
    #[instrument(skip(self))]
    pub async fn remove(&mut self, id: &str) -> AppResult<()> {
        let desired = self
            .snapshot
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.replace_with(desired).await
    }

    /// Push the full desired library state, then apply it optimistically.
    /// On failure the snapshot is rolled back by re-fetching the remote
    /// state before the original error propagates.
    async fn replace_with(&mut self, desired: Vec<PrefabExercise>) -> AppResult<()> {
        let rows = encode_library(&desired);
        match self.store.replace_library(&rows).await {
            Ok(()) => {
                self.snapshot = desired;
                Ok(())
            }
            Err(error) => {
                if let Err(refetch_error) = self.refresh().await {
                    warn!(error = %refetch_error, "rollback re-fetch failed; snapshot may be stale");
                }
                Err(error)
            }
        }
    }
}

/// Client-side validation applied before any network call
fn validate_new_workout(workout: &NewWorkout) -> AppResult<()> {
    if workout.date.trim().is_empty() {
        return Err(AppError::missing_field("date"));
    }
    if workout.title.trim().is_empty() {
        return Err(AppError::missing_field("title"));
    }
    if workout.exercises.is_empty() {
        return Err(AppError::invalid_input("a workout needs at least one exercise"));
    }
    for exercise in &workout.exercises {
        if exercise.name.trim().is_empty() {
            return Err(AppError::missing_field("exercise name"));
        }
        if exercise.sets.is_empty() {
            return Err(AppError::invalid_input(format!(
                "exercise '{}' has no sets",
                exercise.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;

    fn valid_workout() -> NewWorkout {
        NewWorkout {
            date: "2024-05-01".into(),
            title: "Push".into(),
            muscle_groups: vec!["Chest".into()],
            exercises: vec![Exercise {
                name: "Flat Barbell Press".into(),
                sets: vec![crate::models::WorkoutSet::new(40.0, 10)],
            }],
            notes: None,
        }
    }

    #[test]
    fn test_validation_accepts_complete_workout() {
        assert!(validate_new_workout(&valid_workout()).is_ok());
    }

    #[test]
    fn test_validation_rejects_blank_title() {
        let mut workout = valid_workout();
        workout.title = "  ".into();
        assert!(validate_new_workout(&workout).is_err());
    }

    #[test]
    fn test_validation_rejects_exercise_without_sets() {
        let mut workout = valid_workout();
        workout.exercises[0].sets.clear();
        let err = validate_new_workout(&workout).unwrap_err();
        assert!(err.message.contains("has no sets"));
    }
}
