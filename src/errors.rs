// ABOUTME: Unified error handling for the gymlog client
// ABOUTME: Defines error codes, the AppError type, and convenience constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Unified Error Handling
//!
//! Centralized error types for every fallible path in the crate. Remote-call
//! failures are converted to a human-readable message at the call site and
//! surfaced to the caller; nothing is retried automatically. The only silent
//! fallback in the crate is the numeric-parse leniency in [`crate::codec`],
//! which is intentional and not an error path.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Client-side validation rejected the input before any network call
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required field is missing from the input
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,
    /// The remote sheet or script endpoint returned a non-success response
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// The AI backend is rate limited or out of quota
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited,
    /// The AI backend returned empty or schema-violating output
    #[serde(rename = "EXTRACTION_FORMAT")]
    ExtractionFormat,
    /// Configuration error
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Required configuration is missing (first-run signal)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// Data serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ExternalServiceError => "A remote service request failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ExtractionFormat => "The workout text could not be interpreted",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::SerializationError => "Data serialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Client-side validation failure (raised before any network call)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// A required field is missing
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("missing required field: {}", field.into()),
        )
    }

    /// Transport failure against a remote service
    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// The AI backend returned output that does not satisfy the contract
    pub fn extraction_format(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExtractionFormat, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
