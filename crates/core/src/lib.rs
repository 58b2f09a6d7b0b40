//! # Triage Core
//!
//! Core business logic for the emergency department triage system.
//!
//! This crate contains pure data operations and file/folder management:
//! - Boundary validation of patient observations
//! - Classification through [`triage_classifier`] with a configurable rule table
//! - Triage records in sharded YAML storage under `TRIAGE_DATA_DIR`
//! - An append-only audit trail of every create, update and delete
//! - Listing with search and filters, dashboard statistics and the waiting-room queue
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest`,
//! `api-shared` and `triage-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod queue;
pub mod record;
pub mod repositories;
pub mod service;
pub mod stats;
pub mod validation;

pub use config::{core_config_from_env, CoreConfig};
pub use error::{TriageError, TriageResult};
pub use input::ObservationInput;
pub use queue::{order_queue, QueueEntry};
pub use record::TriageRecord;
pub use repositories::history::{HistoryAction, HistoryEntry};
pub use repositories::triage::{TriagePage, TriageQuery};
pub use service::TriageService;
pub use stats::{AgeBracketCount, DailyCount, GenderCount, PriorityCount, TriageStats};

pub use triage_classifier::{ClassificationResult, Priority, RuleTable};
