//! Dashboard statistics over stored triage records.

use crate::constants::AGE_BRACKET_BOUNDARIES;
use crate::record::TriageRecord;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use triage_classifier::{Gender, Priority};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct DailyCount {
    #[schema(value_type = String, example = "2026-03-01")]
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct GenderCount {
    pub gender: Gender,
    pub count: usize,
}

/// Patients with `min_age <= age < max_age`.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct AgeBracketCount {
    pub min_age: u32,
    pub max_age: u32,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct TriageStats {
    pub total: usize,
    /// Every priority, most urgent first, including zero counts.
    pub by_priority: Vec<PriorityCount>,
    /// 0 when there are no records.
    pub average_score: f64,
    /// 0 when there are no records.
    pub average_age: f64,
    /// Days inside the window that have at least one triage, newest first.
    pub daily: Vec<DailyCount>,
    pub by_gender: Vec<GenderCount>,
    pub by_age_bracket: Vec<AgeBracketCount>,
}

/// Aggregate `records` as of `now`, counting daily triages over the last `window_days` days.
pub fn compute_stats(
    records: &[TriageRecord],
    now: DateTime<Utc>,
    window_days: u32,
) -> TriageStats {
    let total = records.len();

    let by_priority = Priority::ALL
        .into_iter()
        .map(|priority| PriorityCount {
            priority,
            count: records
                .iter()
                .filter(|r| r.classification.priority == priority)
                .count(),
        })
        .collect();

    let (average_score, average_age) = if total == 0 {
        (0.0, 0.0)
    } else {
        let score: u64 = records
            .iter()
            .map(|r| u64::from(r.classification.score))
            .sum();
        let age: u64 = records.iter().map(|r| u64::from(r.observation.age)).sum();
        (score as f64 / total as f64, age as f64 / total as f64)
    };

    let window_start = now - Duration::days(i64::from(window_days));
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| r.triaged_at >= window_start) {
        *per_day.entry(record.triaged_at.date_naive()).or_default() += 1;
    }
    let daily = per_day
        .into_iter()
        .rev()
        .map(|(date, count)| DailyCount { date, count })
        .collect();

    let by_gender = [Gender::Male, Gender::Female, Gender::Other]
        .into_iter()
        .map(|gender| GenderCount {
            gender,
            count: records
                .iter()
                .filter(|r| r.observation.gender == gender)
                .count(),
        })
        .collect();

    let by_age_bracket = AGE_BRACKET_BOUNDARIES
        .windows(2)
        .map(|bounds| AgeBracketCount {
            min_age: bounds[0],
            max_age: bounds[1],
            count: records
                .iter()
                .filter(|r| r.observation.age >= bounds[0] && r.observation.age < bounds[1])
                .count(),
        })
        .collect();

    TriageStats {
        total,
        by_priority,
        average_score,
        average_age,
        daily,
        by_gender,
        by_age_bracket,
    }
}
