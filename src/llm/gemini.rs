// ABOUTME: Google Gemini implementation of the workout interpreter
// ABOUTME: JSON-schema constrained generateContent calls via the Generative AI API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Gemini Interpreter
//!
//! Implementation of [`WorkoutInterpreter`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://makersuite.google.com/app/apikey>
//!
//! The request pins a JSON response schema matching the extraction contract
//! and a near-zero temperature, so the only variability left to the model
//! is the matching and normalization the prompt asks for.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use super::prompts::build_extraction_prompt;
use super::{parse_interpretation, WorkoutInterpreter};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{NewWorkout, PrefabExercise};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model to use
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Temperature for extraction calls; near-deterministic on purpose
const EXTRACTION_TEMPERATURE: f32 = 0.05;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

/// Response schema constraining the model to the extraction contract
fn workout_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": {
                "type": "STRING",
                "description": "The workout date in YYYY-MM-DD format."
            },
            "title": {
                "type": "STRING",
                "description": "A short title for the workout, e.g. 'Push'."
            },
            "muscleGroups": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Muscle groups worked, taken from the section headings."
            },
            "exercises": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "Exercise name; must match a library entry name EXACTLY."
                        },
                        "sets": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "weight": { "type": "NUMBER", "description": "Weight lifted in kg." },
                                    "reps": { "type": "NUMBER", "description": "Number of repetitions." }
                                },
                                "required": ["weight", "reps"]
                            }
                        }
                    },
                    "required": ["name", "sets"]
                }
            },
            "notes": {
                "type": "STRING",
                "description": "Additional commentary, warm-up summaries, or notes about future sessions."
            }
        },
        "required": ["date", "title", "muscleGroups", "exercises"]
    })
}

// ============================================================================
// Interpreter Implementation
// ============================================================================

/// Google Gemini workout interpreter
pub struct GeminiInterpreter {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiInterpreter {
    /// Create a new interpreter with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create an interpreter from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(api_key))
    }

    /// Use a different model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (tests point this at a local server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn build_request(prompt: String) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![ContentPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: EXTRACTION_TEMPERATURE,
                response_mime_type: "application/json",
                response_schema: workout_schema(),
            },
        }
    }

    fn extract_text(response: GeminiResponse) -> AppResult<String> {
        if let Some(error) = response.error {
            return Err(AppError::transport(
                "gemini",
                format!("API error: {}", error.message),
            ));
        }
        response
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|mut c| c.parts.drain(..).next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::extraction_format("backend returned an empty response"))
    }

    /// Map API error status to an error, exposing quota messages for 429s
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        if status == 429 {
            return AppError::new(
                ErrorCode::ExternalRateLimited,
                extract_quota_message(&message),
            );
        }
        AppError::transport("gemini", format!("API error ({status}): {message}"))
    }
}

#[async_trait]
impl WorkoutInterpreter for GeminiInterpreter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, log_text, library), fields(model = %self.model, library_entries = library.len()))]
    async fn interpret(
        &self,
        log_text: &str,
        library: &[PrefabExercise],
    ) -> AppResult<NewWorkout> {
        let library_json = serde_json::to_string_pretty(library)
            .map_err(|e| AppError::internal(format!("cannot serialize exercise library: {e}")))?;
        let prompt = build_extraction_prompt(&library_json, log_text);
        let request = Self::build_request(prompt);

        debug!("sending extraction request to Gemini");

        let response = self
            .client
            .post(self.request_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::transport("gemini", format!("request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::transport("gemini", format!("failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "failed to parse Gemini response envelope");
                AppError::transport("gemini", format!("invalid response body: {e}"))
            })?;

        let text = Self::extract_text(gemini_response)?;
        debug!("received structured extraction response");

        parse_interpretation(&text)
    }
}

/// Extract a user-friendly quota message from a Gemini rate-limit error
/// (e.g. "Please retry in 6.406453963s.")
fn extract_quota_message(message: &str) -> String {
    if let Some(retry_pos) = message.find("Please retry in ") {
        let after_prefix = &message[retry_pos + 16..];
        if let Some(s_pos) = after_prefix.find('s') {
            if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                let seconds_int = seconds.ceil() as u64;
                return format!(
                    "AI service quota exceeded. Please try again in {seconds_int} seconds."
                );
            }
        }
    }
    "AI service quota exceeded. Please wait a moment and try again.".to_owned()
}

impl Debug for GeminiInterpreter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiInterpreter")
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
