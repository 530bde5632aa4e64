// ABOUTME: Integration tests for the text-to-workout extraction contract
// ABOUTME: Exercises drop-set expansion, barbell doubling, and all-or-nothing failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

mod common;

use common::{init_test_logging, sample_library, FakeStore, StubInterpreter};
use gymlog::errors::ErrorCode;
use gymlog::llm::WorkoutInterpreter;
use gymlog::models::WorkoutSet;
use gymlog::repository::WorkoutRepository;

const PUSH_LOG: &str = "13/02/2026 - Push (Chest, triceps)\n\
    - Chest\n\
    Flat press with straight bar 12.5x10, 20x10(+10x10 no rest)\n\
    * felt strong today\n";

/// What a conforming backend must return for `PUSH_LOG` given the sample
/// library: the barbell value doubled (12.5 per side -> 25 total), the
/// drop-set expanded into two sets in order, the date converted to ISO,
/// and the asterisked remark collected into notes.
const CONFORMING_RESPONSE: &str = r#"{
    "date": "2026-02-13",
    "title": "Push",
    "muscleGroups": ["Chest", "Triceps"],
    "exercises": [
        {"name": "Flat Barbell Press", "sets": [
            {"weight": 25, "reps": 10},
            {"weight": 40, "reps": 10},
            {"weight": 20, "reps": 10}
        ]}
    ],
    "notes": "felt strong today"
}"#;

#[tokio::test]
async fn conforming_backend_output_becomes_a_normalized_workout() {
    init_test_logging();
    let interpreter = StubInterpreter::replying(CONFORMING_RESPONSE);

    let parsed = interpreter
        .interpret(PUSH_LOG, &sample_library())
        .await
        .unwrap();

    assert_eq!(parsed.date, "2026-02-13");
    assert_eq!(parsed.title, "Push");
    // The name comes verbatim from the library, not the user's phrasing.
    assert_eq!(parsed.exercises[0].name, "Flat Barbell Press");
    assert_eq!(parsed.notes.as_deref(), Some("felt strong today"));
}

#[tokio::test]
async fn barbell_weights_are_doubled_per_side() {
    init_test_logging();
    let interpreter = StubInterpreter::replying(CONFORMING_RESPONSE);

    let parsed = interpreter
        .interpret(PUSH_LOG, &sample_library())
        .await
        .unwrap();

    // "12.5x10" on a barbell is 12.5 per side, stored as 25 total.
    assert_eq!(parsed.exercises[0].sets[0], WorkoutSet::new(25.0, 10));
}

#[tokio::test]
async fn drop_set_annotation_expands_to_two_sets_in_order() {
    init_test_logging();
    let interpreter = StubInterpreter::replying(CONFORMING_RESPONSE);

    let parsed = interpreter
        .interpret(PUSH_LOG, &sample_library())
        .await
        .unwrap();

    // "20x10(+10x10 no rest)" on a barbell: 40x10 then 20x10, in sequence.
    let sets = &parsed.exercises[0].sets;
    assert_eq!(sets[1], WorkoutSet::new(40.0, 10));
    assert_eq!(sets[2], WorkoutSet::new(20.0, 10));
}

#[tokio::test]
async fn zero_barbell_weight_stays_zero() {
    init_test_logging();
    let interpreter = StubInterpreter::replying(
        r#"{
            "date": "2026-02-13",
            "title": "Push",
            "muscleGroups": ["Chest"],
            "exercises": [
                {"name": "Flat Barbell Press", "sets": [{"weight": 0, "reps": 15}]}
            ]
        }"#,
    );

    let parsed = interpreter
        .interpret("Flat press with straight bar 0x15", &sample_library())
        .await
        .unwrap();
    assert_eq!(parsed.exercises[0].sets[0], WorkoutSet::new(0.0, 15));
}

#[tokio::test]
async fn non_conforming_output_fails_without_state_mutation() {
    init_test_logging();
    let store = FakeStore::new();
    let mut repository = WorkoutRepository::new(&store);

    let interpreter = StubInterpreter::replying("I could not parse that, sorry!");
    let result = interpreter.interpret(PUSH_LOG, &sample_library()).await;

    let err = result.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExtractionFormat);

    // All-or-nothing: nothing reached the remote store.
    assert!(store.calls.lock().unwrap().is_empty());
    repository.refresh().await.unwrap();
    assert!(repository.workouts().is_empty());
}

#[tokio::test]
async fn extracted_workout_follows_the_normal_save_path() {
    init_test_logging();
    let store = FakeStore::new();
    let mut repository = WorkoutRepository::new(&store);

    let interpreter = StubInterpreter::replying(CONFORMING_RESPONSE);
    let parsed = interpreter
        .interpret(PUSH_LOG, &sample_library())
        .await
        .unwrap();

    let id = repository.add(parsed).await.unwrap();
    let saved = repository.find(&id).unwrap();
    assert_eq!(saved.exercises[0].sets.len(), 3);
    assert_eq!(store.call_count("saveWorkout"), 1);
}
