// ABOUTME: Text-to-workout extraction contract and interpreter abstraction
// ABOUTME: Defines the WorkoutInterpreter trait and response conformance parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Workout Extraction Contract
//!
//! Converts an unstructured free-text workout log into a normalized
//! [`NewWorkout`], given the caller's full exercise library as matching
//! context. The backend must honor the normalization rules encoded in the
//! instruction prompt (see [`prompts`]):
//!
//! 1. Output exercise names are copied verbatim from the best-matching
//!    library entry, never the user's raw phrasing; unmatched mentions are
//!    dropped.
//! 2. Warm-up, cardio, and stretching sections, and any parenthesized
//!    approach-set annotations, are excluded entirely.
//! 3. A drop-set annotation (`20x10(+10x10 no rest)`) expands into two
//!    independent sets in sequence.
//! 4. Weight is normalized by equipment class: barbell values are per-side
//!    and doubled (zero stays zero); dumbbell values are per-hand and used
//!    as-is; machine/cable/pulley values are total load; bodyweight values
//!    are the added external load, or zero.
//! 5. Narrative text that is not a worked set concatenates into `notes`.
//!
//! Extraction is all-or-nothing: the full structured result or an error,
//! no streaming, no partial application.

pub mod prompts;

mod gemini;

pub use gemini::GeminiInterpreter;

use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::models::{NewWorkout, PrefabExercise};

/// Structured text interpreter capability
///
/// Implementations call a generative backend; tests substitute a
/// deterministic stub satisfying the same schema and normalization
/// contract.
#[async_trait]
pub trait WorkoutInterpreter: Send + Sync {
    /// Unique interpreter identifier (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Convert a free-text workout log into a normalized workout record.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionFormat` when the backend output is empty or
    /// violates the schema, and a transport error when the backend call
    /// itself fails. Callers must perform no state mutation on error.
    async fn interpret(
        &self,
        log_text: &str,
        library: &[PrefabExercise],
    ) -> AppResult<NewWorkout>;
}

/// Parse and validate a backend response against the extraction schema.
///
/// Pure so conformance rules are testable without a live backend.
///
/// # Errors
///
/// Returns `ExtractionFormat` for empty text, invalid JSON, missing
/// required fields, or a result that carries neither exercises nor notes
/// (the all-or-nothing floor).
pub fn parse_interpretation(raw: &str) -> AppResult<NewWorkout> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::extraction_format("backend returned an empty response"));
    }

    let parsed: NewWorkout = serde_json::from_str(trimmed).map_err(|e| {
        AppError::extraction_format(format!("response does not match the workout schema: {e}"))
    })?;

    if parsed.date.is_empty() || parsed.title.is_empty() {
        return Err(AppError::extraction_format(
            "response is missing the session date or title",
        ));
    }

    let has_sets = parsed
        .exercises
        .iter()
        .any(|exercise| !exercise.sets.is_empty());
    let has_notes = parsed.notes.as_deref().is_some_and(|n| !n.trim().is_empty());
    if !has_sets && !has_notes {
        return Err(AppError::extraction_format(
            "response contains no recognizable workout content",
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_empty_response_is_rejected() {
        let err = parse_interpretation("  \n ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFormat);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = parse_interpretation("not json at all").unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFormat);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // No `exercises` array.
        let err = parse_interpretation(
            r#"{"date":"2024-01-01","title":"Push","muscleGroups":[]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFormat);
    }

    #[test]
    fn test_contentless_response_is_rejected() {
        let err = parse_interpretation(
            r#"{"date":"2024-01-01","title":"Push","muscleGroups":[],"exercises":[]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExtractionFormat);
    }

    #[test]
    fn test_conforming_response_parses() {
        let parsed = parse_interpretation(
            r#"{
                "date": "2026-02-13",
                "title": "Push",
                "muscleGroups": ["Chest", "Shoulders"],
                "exercises": [
                    {"name": "Flat Barbell Press", "sets": [
                        {"weight": 25, "reps": 10},
                        {"weight": 35, "reps": 10}
                    ]}
                ],
                "notes": "Next session tomorrow"
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.title, "Push");
        assert_eq!(parsed.exercises[0].sets.len(), 2);
        assert!((parsed.exercises[0].sets[0].weight - 25.0).abs() < f64::EPSILON);
    }
}
