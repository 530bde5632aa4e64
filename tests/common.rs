// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides an in-memory RemoteStore, a stub interpreter, and sample data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors
#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

//! Shared test utilities for `gymlog` integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use gymlog::errors::{AppError, AppResult};
use gymlog::llm::{parse_interpretation, WorkoutInterpreter};
use gymlog::models::{Exercise, NewWorkout, PrefabExercise, Workout, WorkoutSet};
use gymlog::sheets::{EXERCISES_RANGE, WORKOUTS_RANGE};
use gymlog::store::{RemoteStore, RowMatrix};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber_init();
    });
}

fn tracing_subscriber_init() {
    // Default to WARN for quiet tests; TEST_LOG=DEBUG to see everything.
    let level = match std::env::var("TEST_LOG").as_deref() {
        Ok("TRACE") => tracing::Level::TRACE,
        Ok("DEBUG") => tracing::Level::DEBUG,
        Ok("INFO") => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };
    let _ = tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .finish(),
    );
}

/// Standard header row for the Workouts range
pub fn workouts_header() -> Vec<String> {
    [
        "workoutId",
        "date",
        "title",
        "muscleGroups",
        "notes",
        "exercise",
        "weight",
        "reps",
    ]
    .iter()
    .map(|&s| s.to_owned())
    .collect()
}

/// Build one workout row
pub fn workout_row(parts: [&str; 8]) -> Vec<String> {
    parts.iter().map(|&s| s.to_owned()).collect()
}

/// A small but realistic exercise library
pub fn sample_library() -> Vec<PrefabExercise> {
    vec![
        PrefabExercise {
            id: "e1".into(),
            name: "Flat Barbell Press".into(),
            primary_muscle: "Chest".into(),
            secondary_muscles: "Triceps, Front delts".into(),
            equipment: "barbell".into(),
            form: "flat bench".into(),
        },
        PrefabExercise {
            id: "e2".into(),
            name: "Incline Dumbbell Fly".into(),
            primary_muscle: "Chest".into(),
            secondary_muscles: "Front delts".into(),
            equipment: "dumbbell".into(),
            form: "incline bench".into(),
        },
        PrefabExercise {
            id: "e3".into(),
            name: "Cable Triceps Pushdown".into(),
            primary_muscle: "Triceps".into(),
            secondary_muscles: String::new(),
            equipment: "cable".into(),
            form: "standing".into(),
        },
    ]
}

/// A complete workout ready for saving
pub fn sample_new_workout() -> NewWorkout {
    NewWorkout {
        date: "2026-02-13".into(),
        title: "Push".into(),
        muscle_groups: vec!["Chest".into(), "Triceps".into()],
        exercises: vec![
            Exercise {
                name: "Flat Barbell Press".into(),
                sets: vec![WorkoutSet::new(25.0, 10), WorkoutSet::new(35.0, 8)],
            },
            Exercise {
                name: "Cable Triceps Pushdown".into(),
                sets: vec![WorkoutSet::new(20.0, 12)],
            },
        ],
        notes: Some("strong session".into()),
    }
}

/// In-memory `RemoteStore` mirroring the Apps Script endpoint's semantics
#[derive(Debug, Default)]
pub struct FakeStore {
    workouts: Mutex<RowMatrix>,
    library: Mutex<RowMatrix>,
    fail_writes: AtomicBool,
    /// Names of remote calls, in order
    pub calls: Mutex<Vec<String>>,
}

impl FakeStore {
    /// Empty store with header rows already in place
    pub fn new() -> Self {
        let store = Self::default();
        *store.workouts.lock().unwrap() = vec![workouts_header()];
        *store.library.lock().unwrap() =
            vec![gymlog::codec::LIBRARY_HEADER.iter().map(|&h| h.to_owned()).collect()];
        store
    }

    /// Pre-load workout rows (header included)
    pub fn with_workout_rows(self, rows: RowMatrix) -> Self {
        *self.workouts.lock().unwrap() = rows;
        self
    }

    /// Pre-load the library
    pub fn with_library(self, entries: &[PrefabExercise]) -> Self {
        *self.library.lock().unwrap() = gymlog::codec::encode_library(entries);
        self
    }

    /// Make every write fail with a transport error until cleared
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of remote calls with the given name
    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == name)
            .count()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_owned());
    }

    fn check_write(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::transport("script", "write failed (500): injected"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for &FakeStore {
    async fn read_range(&self, range: &str) -> AppResult<RowMatrix> {
        self.record(&format!("read:{range}"));
        match range {
            WORKOUTS_RANGE => Ok(self.workouts.lock().unwrap().clone()),
            EXERCISES_RANGE => Ok(self.library.lock().unwrap().clone()),
            other => Err(AppError::transport(
                "sheets",
                format!("read of {other} failed with status 400"),
            )),
        }
    }

    async fn save_workout(&self, workout_id: &str, rows: &[Vec<String>]) -> AppResult<()> {
        self.record("saveWorkout");
        self.check_write()?;
        let mut matrix = self.workouts.lock().unwrap();
        // Upsert-by-id, like the Apps Script side.
        matrix.retain(|row| row.first().map_or(true, |id| id != workout_id));
        matrix.extend(rows.iter().cloned());
        Ok(())
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<()> {
        self.record("deleteWorkout");
        self.check_write()?;
        let mut matrix = self.workouts.lock().unwrap();
        matrix.retain(|row| row.first().map_or(true, |id| id != workout_id));
        Ok(())
    }

    async fn replace_library(&self, rows: &[Vec<String>]) -> AppResult<()> {
        self.record("updateExercises");
        self.check_write()?;
        *self.library.lock().unwrap() = rows.to_vec();
        Ok(())
    }
}

/// Deterministic interpreter returning a canned backend response
///
/// Satisfies the same schema/normalization contract as the live backend so
/// extraction flows can be exercised without network access.
pub struct StubInterpreter {
    response: String,
}

impl StubInterpreter {
    /// Interpreter that replies with the given raw backend text
    pub fn replying(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl WorkoutInterpreter for StubInterpreter {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn interpret(
        &self,
        _log_text: &str,
        _library: &[PrefabExercise],
    ) -> AppResult<NewWorkout> {
        parse_interpretation(&self.response)
    }
}

/// Find a workout by title in a decoded snapshot
pub fn find_by_title<'a>(workouts: &'a [Workout], title: &str) -> Option<&'a Workout> {
    workouts.iter().find(|w| w.title == title)
}
