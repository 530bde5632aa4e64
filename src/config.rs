// ABOUTME: Sheet and script endpoint configuration with env and settings-file loading
// ABOUTME: Explicitly constructed and passed in; no ambient global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Configuration
//!
//! The remote store needs three values: the public read-only Sheets API key,
//! the spreadsheet id, and the Apps Script web-app URL. They can come from
//! environment variables or from a single JSON settings file under the
//! platform config directory. Absence of any field signals that first-run
//! configuration is required.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{AppError, AppResult, ErrorCode};

/// Environment variable for the Sheets read API key
pub const API_KEY_ENV: &str = "GYMLOG_API_KEY";
/// Environment variable for the spreadsheet id
pub const SHEET_ID_ENV: &str = "GYMLOG_SHEET_ID";
/// Environment variable for the Apps Script web-app URL
pub const SCRIPT_URL_ENV: &str = "GYMLOG_SCRIPT_URL";

const SETTINGS_DIR: &str = "gymlog";
const SETTINGS_FILE: &str = "settings.json";

/// Remote store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Public read-only API key for the Sheets values endpoint
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Spreadsheet id
    #[serde(rename = "sheetId")]
    pub sheet_id: String,
    /// Apps Script web-app URL handling all writes
    #[serde(rename = "scriptUrl")]
    pub script_url: String,
}

impl SheetsConfig {
    /// Build configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` if any of the three variables is unset.
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            api_key: require_env(API_KEY_ENV)?,
            sheet_id: require_env(SHEET_ID_ENV)?,
            script_url: require_env(SCRIPT_URL_ENV)?,
        };
        Ok(config)
    }

    /// Load configuration from the settings file, falling back to an empty
    /// (incomplete) configuration when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file exists but cannot be read or
    /// parsed.
    pub fn load() -> AppResult<Self> {
        Self::load_from(settings_path()?)
    }

    /// Load configuration from an explicit path (used by tests)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the file exists but cannot be read or
    /// parsed.
    pub fn load_from(path: PathBuf) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file yet, starting unconfigured");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| AppError::config(format!("cannot read settings file: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::config(format!("settings file is not valid JSON: {e}")))
    }

    /// Persist configuration to the settings file, creating the config
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on any filesystem or serialization failure.
    pub fn save(&self) -> AppResult<()> {
        self.save_to(settings_path()?)
    }

    /// Persist configuration to an explicit path (used by tests)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on any filesystem or serialization failure.
    pub fn save_to(&self, path: PathBuf) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::config(format!("cannot create config directory: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::new(ErrorCode::SerializationError, e.to_string()))?;
        fs::write(&path, raw)
            .map_err(|e| AppError::config(format!("cannot write settings file: {e}")))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Whether all fields are present. False means first-run configuration
    /// is still required.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.sheet_id.is_empty() && !self.script_url.is_empty()
    }
}

fn require_env(key: &str) -> AppResult<String> {
    env::var(key)
        .map_err(|_| AppError::new(ErrorCode::ConfigMissing, format!("{key} is not set")))
}

fn settings_path() -> AppResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| AppError::config("no platform config directory available"))?;
    Ok(base.join(SETTINGS_DIR).join(SETTINGS_FILE))
}
