//! The persisted triage record: observation, classification and server-assigned fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_classifier::{ClassificationResult, PatientObservation};
use triage_uuid::ShardableUuid;
use utoipa::ToSchema;

/// One stored triage. The observation and classification are flattened so the wire and file
/// formats are a single flat object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TriageRecord {
    #[schema(value_type = String, example = "550e8400e29b41d4a716446655440000")]
    pub id: ShardableUuid,
    #[serde(flatten)]
    pub observation: PatientObservation,
    #[serde(flatten)]
    pub classification: ClassificationResult,
    /// When the patient was first triaged. Never changes on update.
    pub triaged_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TriageRecord {
    /// Minutes the patient has been waiting since triage, never negative.
    pub fn waiting_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.triaged_at).num_minutes().max(0)
    }
}
