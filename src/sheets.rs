// ABOUTME: Google Sheets remote store adapter over the values API and Apps Script endpoint
// ABOUTME: Implements RemoteStore with reqwest; read per named range, write via action POSTs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Google Sheets Store
//!
//! Two independent transport paths:
//!
//! - **Read**: `GET {base}/v4/spreadsheets/{sheetId}/values/{range}?key={apiKey}`
//!   returning `{"values": [[...]]}`; a missing `values` field is an empty
//!   matrix.
//! - **Write**: `POST {scriptUrl}` with a JSON `{action, payload}` body. The
//!   Apps Script side owns transaction semantics; this client only reports
//!   success or failure.
//!
//! No retries, no pagination, no cancellation. Callers re-fetch after writes
//! rather than trusting optimistic state (except the library path, see
//! [`crate::repository`]).

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use crate::config::SheetsConfig;
use crate::errors::{AppError, AppResult};
use crate::store::{RemoteStore, RowMatrix};

/// Named range holding workout rows
pub const WORKOUTS_RANGE: &str = "Workouts";

/// Named range holding the exercise library
pub const EXERCISES_RANGE: &str = "Exercises";

/// Base URL for the Sheets values API
const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Values response from the Sheets read API
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    values: Option<RowMatrix>,
}

/// Request body for the Apps Script endpoint
#[derive(Debug, Serialize)]
struct ScriptRequest<'a> {
    action: &'a str,
    payload: serde_json::Value,
}

/// Remote store adapter backed by Google Sheets
pub struct SheetsStore {
    config: SheetsConfig,
    client: Client,
    base_url: String,
}

impl SheetsStore {
    /// Create a store from configuration
    #[must_use]
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            base_url: SHEETS_API_BASE_URL.to_owned(),
        }
    }

    /// Override the values API base URL (tests point this at a local server)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{range}?key={}",
            self.base_url, self.config.sheet_id, self.config.api_key
        )
    }

    async fn post_action(&self, action: &str, payload: serde_json::Value) -> AppResult<()> {
        let request = ScriptRequest { action, payload };

        debug!(action, "posting to script endpoint");

        let response = self
            .client
            .post(&self.config.script_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::transport("script", format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(action, status = %status, "script endpoint error");
            return Err(AppError::transport(
                "script",
                format!("{action} failed ({status}): {body}"),
            ));
        }

        // The script returns arbitrary JSON on success; nothing in it is
        // load-bearing for the client.
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for SheetsStore {
    #[instrument(skip(self))]
    async fn read_range(&self, range: &str) -> AppResult<RowMatrix> {
        let url = self.values_url(range);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::transport("sheets", format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            error!(range, status = %status, "sheets read error");
            return Err(AppError::transport(
                "sheets",
                format!("read of {range} failed with status {status}"),
            ));
        }

        let values: ValuesResponse = response
            .json()
            .await
            .map_err(|e| AppError::transport("sheets", format!("invalid response body: {e}")))?;

        let matrix = values.values.unwrap_or_default();
        debug!(range, rows = matrix.len(), "range fetched");
        Ok(matrix)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn save_workout(&self, workout_id: &str, rows: &[Vec<String>]) -> AppResult<()> {
        self.post_action(
            "saveWorkout",
            json!({ "workoutId": workout_id, "rows": rows }),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_workout(&self, workout_id: &str) -> AppResult<()> {
        self.post_action("deleteWorkout", json!({ "workoutId": workout_id }))
            .await
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn replace_library(&self, rows: &[Vec<String>]) -> AppResult<()> {
        self.post_action("updateExercises", json!({ "rows": rows }))
            .await
    }
}

impl Debug for SheetsStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SheetsStore")
            .field("sheet_id", &self.config.sheet_id)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
