//! Scrum Arena - play Scrum Chess matches and keep their results.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration for board size, database and retries
//! - [`storage`] - SQLite storage for finished game records
//! - [`retry`] - Bounded exponential backoff around storage calls
//! - [`recorder`] - Background task that persists records offered by a match
//! - [`command`] - Line commands for the interactive session
//! - [`console`] - Plain-text match driver

pub mod command;
pub mod config;
pub mod console;
pub mod recorder;
pub mod retry;
pub mod storage;
