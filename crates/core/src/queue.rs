//! Waiting-room queue ordering.
//!
//! Patients are called by priority (most urgent first) and, within a priority, in the order they
//! were triaged. Reading the queue never changes it.

use crate::record::TriageRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use triage_classifier::Priority;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct QueueEntry {
    /// 1-based place in the queue.
    pub position: usize,
    #[schema(value_type = String)]
    pub id: triage_uuid::ShardableUuid,
    pub name: String,
    pub age: u32,
    pub chief_complaint: String,
    pub priority: Priority,
    pub score: u32,
    pub colour: String,
    pub target_minutes: u32,
    pub triaged_at: DateTime<Utc>,
    pub waiting_minutes: i64,
    /// Waiting longer than the priority's target window.
    pub overdue: bool,
}

/// Orders `records` for calling.
pub fn order_queue(mut records: Vec<TriageRecord>, now: DateTime<Utc>) -> Vec<QueueEntry> {
    records.sort_by(|a, b| {
        b.classification
            .priority
            .rank()
            .cmp(&a.classification.priority.rank())
            .then_with(|| a.triaged_at.cmp(&b.triaged_at))
    });

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let priority = record.classification.priority;
            let waiting_minutes = record.waiting_minutes(now);
            QueueEntry {
                position: index + 1,
                name: record.observation.name.into_inner(),
                age: record.observation.age,
                chief_complaint: record.observation.chief_complaint.into_inner(),
                priority,
                score: record.classification.score,
                colour: priority.colour().to_string(),
                target_minutes: priority.target_minutes(),
                triaged_at: record.triaged_at,
                waiting_minutes,
                overdue: waiting_minutes > i64::from(priority.target_minutes()),
                id: record.id,
            }
        })
        .collect()
}
