// ABOUTME: Library entry point for the gymlog workout-tracking client
// ABOUTME: Exposes codec, remote store, extraction, metrics, and repository modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

#![deny(unsafe_code)]

//! # gymlog
//!
//! A client-side workout-tracking crate. Workouts and the exercise library
//! live in a remote Google Sheet; reads go through the public values API and
//! writes through an Apps Script web app. Free-text logs can be converted
//! into structured workouts by a Gemini-backed interpreter constrained to a
//! fixed extraction schema.
//!
//! ## Architecture
//!
//! - **`models`**: normalized workout / exercise / set records plus the
//!   prefab exercise library types
//! - **`codec`**: pure bidirectional mapping between records and the flat
//!   sheet row format
//! - **`store`** / **`sheets`**: the remote store seam and its Google
//!   Sheets implementation
//! - **`llm`**: the text-to-workout extraction contract and the Gemini
//!   interpreter
//! - **`metrics`**: derived aggregates (volume, sets, estimated 1RM)
//! - **`repository`**: snapshot-caching repositories with write-then-refetch
//!   semantics
//!
//! ## Example
//!
//! ```rust,no_run
//! use gymlog::config::SheetsConfig;
//! use gymlog::errors::AppResult;
//! use gymlog::repository::WorkoutRepository;
//! use gymlog::sheets::SheetsStore;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = SheetsConfig::from_env()?;
//!     let mut workouts = WorkoutRepository::new(SheetsStore::new(config));
//!     workouts.refresh().await?;
//!     for workout in workouts.workouts() {
//!         println!("{} {}", workout.date, workout.title);
//!     }
//!     Ok(())
//! }
//! ```

/// Tabular codec between records and flat sheet rows
pub mod codec;

/// Remote store and settings-file configuration
pub mod config;

/// Unified error types
pub mod errors;

/// Text-to-workout extraction contract and Gemini interpreter
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Derived workout metrics
pub mod metrics;

/// Core domain types
pub mod models;

/// Snapshot-caching repositories
pub mod repository;

/// Google Sheets remote store adapter
pub mod sheets;

/// Remote store trait
pub mod store;
