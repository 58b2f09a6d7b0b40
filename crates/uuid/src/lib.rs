//! Record identifiers and sharded-path utilities.
//!
//! Triage records are stored under sharded directories derived from their identifier. To keep
//! path derivation deterministic, record ids use a *canonical* UUID representation:
//! **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides:
//! - [`ShardableUuid`], a wrapper that guarantees the canonical format once constructed and
//!   derives the sharded storage directory for a record.
//! - [`TimestampId`], a time-prefixed identifier used to order audit entries.
//!
//! ## Sharded directory layout
//! For a canonical UUID `u`, data lives under `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`.
//!
//! Example:
//! `triage_data/triages/55/0e/550e8400e29b41d4a716446655440000/`

mod service;

pub use service::{ShardableUuid, TimestampId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
