//! Triage operations used by the REST API and the CLI.
//!
//! [`TriageService`] ties together boundary validation, classification, the record store and
//! the audit log. Every operation first checks that the data directory exists and fails with
//! [`TriageError::StorageUnavailable`] before doing anything else when it does not.
//!
//! All mutations run under one store-wide lock, so there is at most one writer at a time and
//! the audit entry for a mutation is written before the next mutation starts.

use crate::config::CoreConfig;
use crate::input::ObservationInput;
use crate::queue::{order_queue, QueueEntry};
use crate::record::TriageRecord;
use crate::repositories::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::repositories::triage::{TriagePage, TriageQuery, TriageRepository};
use crate::stats::{compute_stats, TriageStats};
use crate::validation::validate_observation;
use crate::{TriageError, TriageResult};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard};
use triage_classifier::Classifier;
use triage_uuid::ShardableUuid;

#[derive(Clone, Debug)]
pub struct TriageService {
    cfg: Arc<CoreConfig>,
    classifier: Arc<Classifier>,
    records: TriageRepository,
    history: HistoryLog,
    write_lock: Arc<Mutex<()>>,
}

impl TriageService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            classifier: Arc::new(cfg.classifier()),
            records: TriageRepository::new(cfg.clone()),
            history: HistoryLog::new(cfg.clone()),
            write_lock: Arc::new(Mutex::new(())),
            cfg,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn storage_available(&self) -> bool {
        self.records.storage_available()
    }

    fn ensure_storage(&self) -> TriageResult<()> {
        if self.storage_available() {
            Ok(())
        } else {
            Err(TriageError::StorageUnavailable(
                self.cfg.triage_data_dir().to_path_buf(),
            ))
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock holds nothing inconsistent.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Validates, classifies and stores a new triage.
    ///
    /// # Errors
    ///
    /// - [`TriageError::StorageUnavailable`] if the data directory is missing.
    /// - [`TriageError::MissingField`] / [`TriageError::InvalidInput`] /
    ///   [`TriageError::OutOfRange`] for bad input.
    /// - Storage errors if the record or its audit entry cannot be written.
    pub fn create(&self, input: ObservationInput) -> TriageResult<TriageRecord> {
        self.ensure_storage()?;

        let observation = input.into_observation()?;
        validate_observation(&observation)?;
        let classification = self.classifier.classify(&observation);

        let _guard = self.lock();
        let now = Utc::now();
        let record = self.records.insert(|id| TriageRecord {
            id,
            observation,
            classification,
            triaged_at: now,
            updated_at: now,
        })?;
        self.history.append(
            &record.id,
            HistoryAction::Create,
            None,
            Some(record.clone()),
            now,
        )?;

        tracing::info!(
            "created triage {} priority={} score={}",
            record.id,
            record.classification.priority,
            record.classification.score
        );
        Ok(record)
    }

    pub fn get(&self, id: &str) -> TriageResult<TriageRecord> {
        self.ensure_storage()?;
        let id = ShardableUuid::parse(id)?;
        self.records.get(&id)
    }

    /// Applies a partial update and re-classifies the merged observation.
    ///
    /// The previous classification is discarded; `triaged_at` is kept.
    pub fn update(&self, id: &str, input: ObservationInput) -> TriageResult<TriageRecord> {
        self.ensure_storage()?;
        let id = ShardableUuid::parse(id)?;

        let _guard = self.lock();
        let previous = self.records.get(&id)?;
        let observation = input.merge_onto(&previous.observation)?;
        validate_observation(&observation)?;

        let now = Utc::now();
        let record = TriageRecord {
            id: id.clone(),
            classification: self.classifier.classify(&observation),
            observation,
            triaged_at: previous.triaged_at,
            updated_at: now,
        };
        self.records.replace(&record)?;
        self.history.append(
            &id,
            HistoryAction::Update,
            Some(previous),
            Some(record.clone()),
            now,
        )?;

        tracing::info!(
            "updated triage {} priority={} score={}",
            record.id,
            record.classification.priority,
            record.classification.score
        );
        Ok(record)
    }

    /// Deletes a record and returns its final state. Its audit trail is kept.
    pub fn delete(&self, id: &str) -> TriageResult<TriageRecord> {
        self.ensure_storage()?;
        let id = ShardableUuid::parse(id)?;

        let _guard = self.lock();
        let removed = self.records.remove(&id)?;
        self.history.append(
            &id,
            HistoryAction::Delete,
            Some(removed.clone()),
            None,
            Utc::now(),
        )?;

        tracing::info!("deleted triage {}", id);
        Ok(removed)
    }

    pub fn list(&self, query: &TriageQuery) -> TriageResult<TriagePage> {
        self.ensure_storage()?;
        self.records.list(query)
    }

    /// Audit entries for a record, newest first. Works for deleted records too.
    pub fn history(&self, id: &str) -> TriageResult<Vec<HistoryEntry>> {
        self.ensure_storage()?;
        let id = ShardableUuid::parse(id)?;
        self.history.entries(&id)
    }

    pub fn stats(&self) -> TriageResult<TriageStats> {
        self.ensure_storage()?;
        Ok(compute_stats(
            &self.records.load_all(),
            Utc::now(),
            self.cfg.stats_window_days(),
        ))
    }

    pub fn queue(&self) -> TriageResult<Vec<QueueEntry>> {
        self.ensure_storage()?;
        Ok(order_queue(self.records.load_all(), Utc::now()))
    }

    /// The patient to call next, if any. Does not modify the queue.
    pub fn next_in_queue(&self) -> TriageResult<Option<QueueEntry>> {
        Ok(self.queue()?.into_iter().next())
    }

    /// Removes audit entries older than `retention_days` (the configured retention when `None`).
    pub fn prune_history(&self, retention_days: Option<u32>) -> TriageResult<usize> {
        self.ensure_storage()?;
        let retention_days = retention_days.unwrap_or(self.cfg.history_retention_days());
        if retention_days == 0 {
            return Err(TriageError::InvalidInput(
                "retention must be at least one day".into(),
            ));
        }

        let _guard = self.lock();
        let removed = self.history.prune(retention_days, Utc::now())?;
        tracing::info!(
            "pruned {} history entries older than {} days",
            removed,
            retention_days
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::sample_input;
    use crate::repositories::triage::tests::test_cfg;
    use tempfile::TempDir;
    use triage_classifier::{ConsciousnessLevel, Priority};

    fn service(temp_dir: &TempDir) -> TriageService {
        TriageService::new(test_cfg(temp_dir.path()))
    }

    #[test]
    fn test_create_classifies_and_audits() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);

        let record = svc.create(sample_input()).unwrap();

        assert_eq!(record.classification.priority, Priority::NonUrgent);
        assert_eq!(record.triaged_at, record.updated_at);

        let history = svc.history(&record.id.to_string()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action, HistoryAction::Create);
        assert_eq!(history[0].new.as_ref(), Some(&record));
    }

    #[test]
    fn test_create_rejects_out_of_range_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);

        let mut input = sample_input();
        input.temperature = Some(50.0);

        assert!(matches!(
            svc.create(input),
            Err(TriageError::OutOfRange {
                field: "temperature",
                ..
            })
        ));
        assert_eq!(svc.list(&TriageQuery::default()).unwrap().total, 0);
    }

    #[test]
    fn test_update_reclassifies_and_keeps_triage_time() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);
        let created = svc.create(sample_input()).unwrap();
        let id = created.id.to_string();

        let updated = svc
            .update(
                &id,
                ObservationInput {
                    consciousness: Some(ConsciousnessLevel::Unconscious),
                    ..ObservationInput::default()
                },
            )
            .unwrap();

        assert_eq!(updated.classification.priority, Priority::Emergency);
        assert_eq!(updated.triaged_at, created.triaged_at);
        assert_eq!(updated.observation.name, created.observation.name);
        assert_eq!(svc.get(&id).unwrap(), updated);

        let history = svc.history(&id).unwrap();
        assert_eq!(history[0].action, HistoryAction::Update);
        assert_eq!(history[0].previous.as_ref(), Some(&created));
    }

    #[test]
    fn test_update_validates_merged_observation() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);
        let created = svc.create(sample_input()).unwrap();

        let result = svc.update(
            &created.id.to_string(),
            ObservationInput {
                pain_intensity: Some(11),
                ..ObservationInput::default()
            },
        );

        assert!(matches!(result, Err(TriageError::OutOfRange { .. })));
        assert_eq!(svc.get(&created.id.to_string()).unwrap(), created);
    }

    #[test]
    fn test_delete_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);
        let created = svc.create(sample_input()).unwrap();
        let id = created.id.to_string();

        let removed = svc.delete(&id).unwrap();
        assert_eq!(removed, created);
        assert!(matches!(svc.get(&id), Err(TriageError::NotFound(_))));
        assert!(matches!(svc.delete(&id), Err(TriageError::NotFound(_))));

        let history = svc.history(&id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, HistoryAction::Delete);
        assert!(history[0].new.is_none());
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);

        assert!(matches!(svc.get("not-an-id"), Err(TriageError::Uuid(_))));
    }

    #[test]
    fn test_missing_storage_fails_first() {
        let temp_dir = TempDir::new().unwrap();
        let svc = TriageService::new(test_cfg(&temp_dir.path().join("missing")));

        assert!(matches!(
            svc.create(ObservationInput::default()),
            Err(TriageError::StorageUnavailable(_))
        ));
        assert!(matches!(
            svc.get("not-an-id"),
            Err(TriageError::StorageUnavailable(_))
        ));
        assert!(matches!(svc.stats(), Err(TriageError::StorageUnavailable(_))));
    }

    #[test]
    fn test_queue_and_stats() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);

        assert!(svc.next_in_queue().unwrap().is_none());

        svc.create(sample_input()).unwrap();
        let mut urgent = sample_input();
        urgent.name = Some("Urgent Patient".into());
        urgent.oxygen_saturation = Some(82);
        svc.create(urgent).unwrap();

        let next = svc.next_in_queue().unwrap().unwrap();
        assert_eq!(next.name, "Urgent Patient");
        assert_eq!(svc.queue().unwrap().len(), 2);

        let stats = svc.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.daily.iter().map(|d| d.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_prune_history_keeps_recent_entries() {
        let temp_dir = TempDir::new().unwrap();
        let svc = service(&temp_dir);
        let created = svc.create(sample_input()).unwrap();

        assert_eq!(svc.prune_history(None).unwrap(), 0);
        assert_eq!(svc.history(&created.id.to_string()).unwrap().len(), 1);
        assert!(svc.prune_history(Some(0)).is_err());
    }
}
