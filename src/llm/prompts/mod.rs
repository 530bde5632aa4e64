// ABOUTME: Extraction instruction prompt loaded at compile time
// ABOUTME: Embeds the exercise library and raw log into the normalization-rule prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Extraction Prompt
//!
//! The instruction prompt encoding the normalization rules is kept in a
//! markdown file for easy maintenance and loaded at compile time.

/// Workout extraction instruction prompt with placeholders for the
/// serialized exercise library and the raw log text
pub const WORKOUT_EXTRACTION_PROMPT: &str = include_str!("workout_extraction.md");

const LIBRARY_PLACEHOLDER: &str = "{{EXERCISE_LIBRARY_JSON}}";
const LOG_PLACEHOLDER: &str = "{{WORKOUT_LOG_TEXT}}";

/// Render the extraction prompt for one request
#[must_use]
pub fn build_extraction_prompt(library_json: &str, log_text: &str) -> String {
    WORKOUT_EXTRACTION_PROMPT
        .replace(LIBRARY_PLACEHOLDER, library_json)
        .replace(LOG_PLACEHOLDER, log_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_library_and_log() {
        let rendered = build_extraction_prompt("[{\"name\":\"Press\"}]", "17/12 - Push");
        assert!(rendered.contains("[{\"name\":\"Press\"}]"));
        assert!(rendered.contains("17/12 - Push"));
        assert!(!rendered.contains(LIBRARY_PLACEHOLDER));
        assert!(!rendered.contains(LOG_PLACEHOLDER));
    }

    #[test]
    fn test_prompt_states_critical_rules() {
        assert!(WORKOUT_EXTRACTION_PROMPT.contains("per side"));
        assert!(WORKOUT_EXTRACTION_PROMPT.contains("Drop sets"));
        assert!(WORKOUT_EXTRACTION_PROMPT.contains("YYYY-MM-DD"));
    }
}
