//! Constants used throughout the triage core crate.
//!
//! Path and filename constants live here so the store, the audit log and the CLI agree on the
//! on-disk layout.

/// Default directory for triage data when no explicit directory is configured.
pub const DEFAULT_TRIAGE_DATA_DIR: &str = "triage_data";

/// Directory name for triage records storage.
pub const TRIAGE_DIR_NAME: &str = "triages";

/// Directory name for the audit trail. Kept apart from records so history survives deletion.
pub const HISTORY_DIR_NAME: &str = "history";

/// Filename for a stored triage record.
pub const TRIAGE_FILENAME: &str = "triage.yaml";

/// Filename for a record's audit trail.
pub const HISTORY_FILENAME: &str = "history.yaml";

/// User recorded on audit entries. There is no authentication model.
pub const SYSTEM_USER: &str = "system";

/// Default audit retention for `prune_history`.
pub const DEFAULT_HISTORY_RETENTION_DAYS: u32 = 365;

/// Default rolling window for the daily counts in statistics.
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 30;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Lower bounds of the age brackets used in statistics; each bracket is `[lo, next)`.
pub const AGE_BRACKET_BOUNDARIES: [u32; 11] = [0, 1, 2, 5, 12, 18, 30, 45, 60, 75, 200];
