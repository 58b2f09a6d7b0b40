//! Request and response envelopes for the REST API.
//!
//! Record payloads are the `triage-core` types themselves; these types add paging, query
//! parameters and small status bodies around them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use triage_core::{
    HistoryEntry, Priority, QueueEntry, TriageError, TriagePage, TriageQuery, TriageRecord,
    TriageResult,
};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

/// Query string of `GET /api/triages`.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTriagesQuery {
    /// Case-insensitive text matched against patient name and chief complaint.
    pub search: Option<String>,
    /// Priority name, e.g. `URGENT` (case-insensitive).
    pub priority: Option<String>,
    /// First triage date to include (`YYYY-MM-DD`).
    #[param(value_type = Option<String>, example = "2026-03-01")]
    pub start_date: Option<NaiveDate>,
    /// Last triage date to include (`YYYY-MM-DD`).
    #[param(value_type = Option<String>, example = "2026-03-31")]
    pub end_date: Option<NaiveDate>,
    /// 1-based page number (default 1).
    pub page: Option<u32>,
    /// Page size, 1 to 100 (default 10).
    pub limit: Option<u32>,
}

impl TryFrom<ListTriagesQuery> for TriageQuery {
    type Error = TriageError;

    fn try_from(query: ListTriagesQuery) -> TriageResult<Self> {
        let priority = query
            .priority
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<Priority>().map_err(TriageError::InvalidInput))
            .transpose()?;

        Ok(TriageQuery {
            search: query.search,
            priority,
            from: query.start_date,
            to: query.end_date,
            page: query.page,
            limit: query.limit,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct Pagination {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct ListTriagesRes {
    pub triages: Vec<TriageRecord>,
    pub pagination: Pagination,
}

impl From<TriagePage> for ListTriagesRes {
    fn from(page: TriagePage) -> Self {
        Self {
            pagination: Pagination {
                total: page.total,
                page: page.page,
                limit: page.limit,
                pages: page.pages,
            },
            triages: page.records,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct DeleteTriageRes {
    pub message: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct HistoryRes {
    pub record_id: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct QueueRes {
    pub total: usize,
    pub overdue: usize,
    pub entries: Vec<QueueEntry>,
}

impl From<Vec<QueueEntry>> for QueueRes {
    fn from(entries: Vec<QueueEntry>) -> Self {
        Self {
            total: entries.len(),
            overdue: entries.iter().filter(|e| e.overdue).count(),
            entries,
        }
    }
}

/// `patient` is `None` when nobody is waiting.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct NextPatientRes {
    pub patient: Option<QueueEntry>,
}
