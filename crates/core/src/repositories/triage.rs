//! Triage record storage.
//!
//! Each record is a single YAML file in a sharded directory:
//!
//! ```text
//! triages/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         triage.yaml
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the record id.
//!
//! The repository performs no locking of its own; [`TriageService`](crate::TriageService)
//! serialises all writers.

use crate::config::CoreConfig;
use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, TRIAGE_FILENAME};
use crate::record::TriageRecord;
use crate::repositories::helpers::{
    create_unique_sharded_dir, remove_record_dir, sharded_files, write_atomic,
};
use crate::{TriageError, TriageResult};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use triage_classifier::Priority;
use triage_uuid::ShardableUuid;

/// Filters and paging for [`TriageRepository::list`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriageQuery {
    /// Case-insensitive substring over patient name and chief complaint.
    pub search: Option<String>,
    pub priority: Option<Priority>,
    /// Inclusive, by UTC triage date.
    pub from: Option<NaiveDate>,
    /// Inclusive, by UTC triage date (the whole day counts).
    pub to: Option<NaiveDate>,
    /// 1-based; defaults to 1.
    pub page: Option<u32>,
    /// 1 to 100; defaults to 10.
    pub limit: Option<u32>,
}

impl TriageQuery {
    fn page_and_limit(&self) -> TriageResult<(u32, u32)> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(TriageError::InvalidInput("page must be at least 1".into()));
        }
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(TriageError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(TriageError::InvalidInput(
                    "start date must not be after end date".into(),
                ));
            }
        }
        Ok((page, limit))
    }

    fn matches(&self, record: &TriageRecord, needle: Option<&str>) -> bool {
        if let Some(priority) = self.priority {
            if record.classification.priority != priority {
                return false;
            }
        }

        let date = record.triaged_at.date_naive();
        if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
            return false;
        }

        match needle {
            Some(needle) => {
                record.observation.name.as_str().to_lowercase().contains(needle)
                    || record
                        .observation
                        .chief_complaint
                        .as_str()
                        .to_lowercase()
                        .contains(needle)
            }
            None => true,
        }
    }
}

/// One page of records, newest triage first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TriagePage {
    pub records: Vec<TriageRecord>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// File-backed triage record store.
#[derive(Clone, Debug)]
pub struct TriageRepository {
    cfg: Arc<CoreConfig>,
}

impl TriageRepository {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// True when the configured data directory exists.
    pub fn storage_available(&self) -> bool {
        self.cfg.triage_data_dir().is_dir()
    }

    fn record_dir(&self, id: &ShardableUuid) -> PathBuf {
        id.sharded_dir(&self.cfg.triages_dir())
    }

    /// Allocates a fresh id, builds the record with it and writes it.
    ///
    /// If the write fails the freshly created directory is removed again.
    pub fn insert(
        &self,
        build: impl FnOnce(ShardableUuid) -> TriageRecord,
    ) -> TriageResult<TriageRecord> {
        let triages_dir = self.cfg.triages_dir();
        let (id, dir) = create_unique_sharded_dir(&triages_dir, ShardableUuid::new)?;
        let record = build(id);

        if let Err(e) = write_record(&dir, &record) {
            if let Err(cleanup) = remove_record_dir(&triages_dir, &dir) {
                tracing::warn!(
                    "failed to clean up {} after write error: {}",
                    dir.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        Ok(record)
    }

    /// Reads one record.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::NotFound`] if no record with `id` exists.
    pub fn get(&self, id: &ShardableUuid) -> TriageResult<TriageRecord> {
        let path = self.record_dir(id).join(TRIAGE_FILENAME);
        if !path.is_file() {
            return Err(TriageError::NotFound(id.to_string()));
        }
        read_record(&path)
    }

    /// Overwrites an existing record in place.
    pub fn replace(&self, record: &TriageRecord) -> TriageResult<()> {
        let dir = self.record_dir(&record.id);
        if !dir.join(TRIAGE_FILENAME).is_file() {
            return Err(TriageError::NotFound(record.id.to_string()));
        }
        write_record(&dir, record)
    }

    /// Deletes a record and returns its last stored state.
    pub fn remove(&self, id: &ShardableUuid) -> TriageResult<TriageRecord> {
        let existing = self.get(id)?;
        remove_record_dir(&self.cfg.triages_dir(), &self.record_dir(id))?;
        Ok(existing)
    }

    /// Reads every record. Files that fail to parse are logged and skipped.
    pub fn load_all(&self) -> Vec<TriageRecord> {
        let mut records = Vec::new();

        for path in sharded_files(&self.cfg.triages_dir(), TRIAGE_FILENAME) {
            match read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        "failed to parse {}: {} - {}",
                        TRIAGE_FILENAME,
                        path.display(),
                        e
                    );
                }
            }
        }

        records
    }

    /// Filters, sorts (newest triage first) and pages the stored records.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] for an out-of-range page/limit or a reversed
    /// date range.
    pub fn list(&self, query: &TriageQuery) -> TriageResult<TriagePage> {
        let (page, limit) = query.page_and_limit()?;
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matching: Vec<TriageRecord> = self
            .load_all()
            .into_iter()
            .filter(|record| query.matches(record, needle.as_deref()))
            .collect();
        matching.sort_by(|a, b| {
            b.triaged_at
                .cmp(&a.triaged_at)
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });

        let total = matching.len();
        let pages = total.div_ceil(limit as usize) as u32;
        let skip = (page as usize - 1).saturating_mul(limit as usize);
        let records = matching
            .into_iter()
            .skip(skip)
            .take(limit as usize)
            .collect();

        Ok(TriagePage {
            records,
            total,
            page,
            limit,
            pages,
        })
    }
}

fn read_record(path: &Path) -> TriageResult<TriageRecord> {
    let contents = fs::read_to_string(path).map_err(TriageError::FileRead)?;
    serde_yaml::from_str(&contents).map_err(TriageError::YamlDeserialization)
}

fn write_record(dir: &Path, record: &TriageRecord) -> TriageResult<()> {
    let yaml = serde_yaml::to_string(record).map_err(TriageError::YamlSerialization)?;
    write_atomic(&dir.join(TRIAGE_FILENAME), &yaml)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::tests::sample_input;
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;
    use triage_classifier::classify;

    pub(crate) fn test_cfg(data_dir: &Path) -> Arc<CoreConfig> {
        Arc::new(CoreConfig::with_defaults(data_dir.to_path_buf()).unwrap())
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn insert_sample(
        repo: &TriageRepository,
        name: &str,
        complaint: &str,
        triaged_at: DateTime<Utc>,
        saturation: u32,
    ) -> TriageRecord {
        let mut input = sample_input();
        input.name = Some(name.into());
        input.chief_complaint = Some(complaint.into());
        input.oxygen_saturation = Some(saturation);
        let observation = input.into_observation().unwrap();
        let classification = classify(&observation);

        repo.insert(|id| TriageRecord {
            id,
            observation,
            classification,
            triaged_at,
            updated_at: triaged_at,
        })
        .unwrap()
    }

    #[test]
    fn test_insert_get_replace_remove() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));

        let record = insert_sample(&repo, "Ana", "Cough", at(1, 9), 98);
        let path = record
            .id
            .sharded_dir(&temp_dir.path().join("triages"))
            .join(TRIAGE_FILENAME);
        assert!(path.is_file());

        let loaded = repo.get(&record.id).unwrap();
        assert_eq!(loaded, record);

        let mut changed = loaded.clone();
        changed.observation.heart_rate = 99;
        repo.replace(&changed).unwrap();
        assert_eq!(repo.get(&record.id).unwrap().observation.heart_rate, 99);

        let removed = repo.remove(&record.id).unwrap();
        assert_eq!(removed.observation.heart_rate, 99);
        assert!(matches!(repo.get(&record.id), Err(TriageError::NotFound(_))));
        assert!(matches!(
            repo.remove(&record.id),
            Err(TriageError::NotFound(_))
        ));
    }

    #[test]
    fn test_replace_missing_record_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));
        let record = insert_sample(&repo, "Ana", "Cough", at(1, 9), 98);
        repo.remove(&record.id).unwrap();

        assert!(matches!(
            repo.replace(&record),
            Err(TriageError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_all_skips_unparsable_files() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));
        insert_sample(&repo, "Ana", "Cough", at(1, 9), 98);

        let junk = ShardableUuid::new().sharded_dir(&temp_dir.path().join("triages"));
        fs::create_dir_all(&junk).unwrap();
        fs::write(junk.join(TRIAGE_FILENAME), "not: [valid").unwrap();

        assert_eq!(repo.load_all().len(), 1);
    }

    #[test]
    fn test_list_sorts_newest_first_and_pages() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));
        for day in 1..=5 {
            insert_sample(&repo, &format!("Patient {day}"), "Cough", at(day, 9), 98);
        }

        let page = repo
            .list(&TriageQuery {
                page: Some(2),
                limit: Some(2),
                ..TriageQuery::default()
            })
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.pages, 3);
        let names: Vec<_> = page
            .records
            .iter()
            .map(|r| r.observation.name.as_str().to_string())
            .collect();
        assert_eq!(names, vec!["Patient 3", "Patient 2"]);
    }

    #[test]
    fn test_list_filters() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));
        insert_sample(&repo, "Ana Souza", "Headache", at(1, 9), 98);
        insert_sample(&repo, "Bruno Lima", "Chest pain", at(2, 23), 80);
        insert_sample(&repo, "Carla Dias", "Fall", at(3, 0), 98);

        let by_text = repo
            .list(&TriageQuery {
                search: Some("CHEST".into()),
                ..TriageQuery::default()
            })
            .unwrap();
        assert_eq!(by_text.total, 1);

        let by_name = repo
            .list(&TriageQuery {
                search: Some("souza".into()),
                ..TriageQuery::default()
            })
            .unwrap();
        assert_eq!(by_name.total, 1);

        let by_priority = repo
            .list(&TriageQuery {
                priority: Some(Priority::Emergency),
                ..TriageQuery::default()
            })
            .unwrap();
        assert_eq!(by_priority.total, 1);
        assert_eq!(by_priority.records[0].observation.name.as_str(), "Bruno Lima");

        // end date includes the whole day
        let by_date = repo
            .list(&TriageQuery {
                from: NaiveDate::from_ymd_opt(2026, 3, 2),
                to: NaiveDate::from_ymd_opt(2026, 3, 2),
                ..TriageQuery::default()
            })
            .unwrap();
        assert_eq!(by_date.total, 1);
    }

    #[test]
    fn test_list_rejects_bad_paging() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));

        for query in [
            TriageQuery {
                page: Some(0),
                ..TriageQuery::default()
            },
            TriageQuery {
                limit: Some(101),
                ..TriageQuery::default()
            },
            TriageQuery {
                from: NaiveDate::from_ymd_opt(2026, 3, 5),
                to: NaiveDate::from_ymd_opt(2026, 3, 1),
                ..TriageQuery::default()
            },
        ] {
            assert!(matches!(
                repo.list(&query),
                Err(TriageError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_empty_store_lists_zero_pages() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));

        let page = repo.list(&TriageQuery::default()).unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.pages, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn test_storage_available() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TriageRepository::new(test_cfg(temp_dir.path()));
        assert!(repo.storage_available());

        let missing = TriageRepository::new(test_cfg(&temp_dir.path().join("missing")));
        assert!(!missing.storage_available());
    }
}
