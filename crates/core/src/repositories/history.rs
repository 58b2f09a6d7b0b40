//! Audit trail of triage record mutations.
//!
//! Every create, update and delete appends one [`HistoryEntry`] holding the record state before
//! and after the change. The trail lives outside the record directory:
//!
//! ```text
//! history/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         history.yaml    # entries, oldest first
//! ```
//!
//! so it survives deletion of the record itself. Old entries are removed by
//! [`HistoryLog::prune`].

use crate::config::CoreConfig;
use crate::constants::{HISTORY_FILENAME, SYSTEM_USER};
use crate::record::TriageRecord;
use crate::repositories::helpers::{remove_record_dir, sharded_files, write_atomic};
use crate::{TriageError, TriageResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use triage_uuid::{ShardableUuid, TimestampId};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    #[schema(value_type = String, example = "20260111T143522.045Z-550e8400e29b41d4a716446655440000")]
    pub id: TimestampId,
    #[schema(value_type = String)]
    pub record_id: ShardableUuid,
    pub action: HistoryAction,
    pub user: String,
    /// State before the change; `None` on create.
    pub previous: Option<TriageRecord>,
    /// State after the change; `None` on delete.
    pub new: Option<TriageRecord>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct HistoryLog {
    cfg: Arc<CoreConfig>,
}

impl HistoryLog {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    fn history_path(&self, record_id: &ShardableUuid) -> std::path::PathBuf {
        record_id
            .sharded_dir(&self.cfg.history_dir())
            .join(HISTORY_FILENAME)
    }

    /// Appends an entry for `record_id`.
    ///
    /// The entry id is strictly later than the previous entry of the same record. Callers must
    /// hold the store-wide write lock.
    pub fn append(
        &self,
        record_id: &ShardableUuid,
        action: HistoryAction,
        previous: Option<TriageRecord>,
        new: Option<TriageRecord>,
        now: DateTime<Utc>,
    ) -> TriageResult<HistoryEntry> {
        let path = self.history_path(record_id);
        let mut entries = if path.is_file() {
            read_entries(&path)?
        } else {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(TriageError::RecordDirCreation)?;
            }
            Vec::new()
        };

        let id = TimestampId::generate_at(now, entries.last().map(|e| &e.id));
        let entry = HistoryEntry {
            recorded_at: id.timestamp(),
            id,
            record_id: record_id.clone(),
            action,
            user: SYSTEM_USER.to_string(),
            previous,
            new,
        };
        entries.push(entry.clone());
        write_entries(&path, &entries)?;

        Ok(entry)
    }

    /// Entries for one record, newest first. Empty when the record has no history.
    pub fn entries(&self, record_id: &ShardableUuid) -> TriageResult<Vec<HistoryEntry>> {
        let path = self.history_path(record_id);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let mut entries = read_entries(&path)?;
        entries.reverse();
        Ok(entries)
    }

    /// Removes entries recorded before `now - retention_days` and returns how many were
    /// removed. Trails left empty are deleted. Unreadable trails are logged and skipped.
    pub fn prune(&self, retention_days: u32, now: DateTime<Utc>) -> TriageResult<usize> {
        let cutoff = now - Duration::days(i64::from(retention_days));
        let history_dir = self.cfg.history_dir();
        let mut removed = 0;

        for path in sharded_files(&history_dir, HISTORY_FILENAME) {
            let entries = match read_entries(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        "failed to parse {}: {} - {}",
                        HISTORY_FILENAME,
                        path.display(),
                        e
                    );
                    continue;
                }
            };

            let before = entries.len();
            let kept: Vec<HistoryEntry> = entries
                .into_iter()
                .filter(|e| e.recorded_at >= cutoff)
                .collect();
            if kept.len() == before {
                continue;
            }
            removed += before - kept.len();

            if kept.is_empty() {
                if let Some(dir) = path.parent() {
                    remove_record_dir(&history_dir, dir)?;
                }
            } else {
                write_entries(&path, &kept)?;
            }
        }

        Ok(removed)
    }
}

fn read_entries(path: &Path) -> TriageResult<Vec<HistoryEntry>> {
    let contents = fs::read_to_string(path).map_err(TriageError::FileRead)?;
    serde_yaml::from_str(&contents).map_err(TriageError::YamlDeserialization)
}

fn write_entries(path: &Path, entries: &[HistoryEntry]) -> TriageResult<()> {
    let yaml = serde_yaml::to_string(entries).map_err(TriageError::YamlSerialization)?;
    write_atomic(path, &yaml)
}
