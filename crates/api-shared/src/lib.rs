//! # API Shared
//!
//! Shared utilities and definitions for the triage APIs.
//!
//! Contains:
//! - Request/response envelopes (`dto` module) wrapping the `triage-core` types
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the root `triage-run` binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
