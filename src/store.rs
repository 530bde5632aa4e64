// ABOUTME: Remote store abstraction for the workout and exercise sheets
// ABOUTME: Defines the async trait implemented by the Google Sheets adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 gymlog contributors

//! # Remote Store Interface
//!
//! The narrow seam between the repositories and the remote spreadsheet.
//! Reads go through a per-range request returning a raw row matrix; writes
//! go through the scripted endpoint as `{action, payload}` requests. The
//! remote side owns upsert/delete semantics per workout id and treats
//! library updates as a full replacement, never a diff.
//!
//! Tests substitute an in-memory implementation; production code uses
//! [`crate::sheets::SheetsStore`].

use async_trait::async_trait;

use crate::errors::AppResult;

/// Raw row matrix as returned by the sheet read API (header row included)
pub type RowMatrix = Vec<Vec<String>>;

/// Remote store operations against the spreadsheet
///
/// Failure contract: any non-success response surfaces as an
/// [`crate::errors::AppError`] carrying the response text; callers must not
/// assume partial application, and no operation is retried automatically.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read a named range (e.g. `Workouts`, `Exercises`) as a row matrix.
    /// An absent range decodes as an empty matrix. No pagination; the
    /// requested range must be pre-sized server-side.
    async fn read_range(&self, range: &str) -> AppResult<RowMatrix>;

    /// Upsert all rows for one workout id. The endpoint replaces any
    /// existing rows sharing the id.
    async fn save_workout(&self, workout_id: &str, rows: &[Vec<String>]) -> AppResult<()>;

    /// Remove all rows sharing the workout id
    async fn delete_workout(&self, workout_id: &str) -> AppResult<()>;

    /// Replace the full exercise library, header row included
    async fn replace_library(&self, rows: &[Vec<String>]) -> AppResult<()>;
}
