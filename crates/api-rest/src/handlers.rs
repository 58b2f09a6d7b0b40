use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    DeleteTriageRes, ErrorRes, HealthRes, HealthService, HistoryRes, ListTriagesQuery,
    ListTriagesRes, NextPatientRes, QueueRes,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use triage_core::{
    ObservationInput, TriageQuery, TriageRecord, TriageResult, TriageService, TriageStats,
};

/// Runs a `TriageService` call on the blocking pool.
///
/// Service calls read and write files and may wait on the store's writer lock, so they stay
/// off the async worker threads.
async fn run_blocking<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    F: FnOnce(TriageService) -> TriageResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    Ok(tokio::task::spawn_blocking(move || call(service)).await??)
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns `ok: false` when the triage data directory is missing. Always answers 200 so load
/// balancers can read the body.
#[axum::debug_handler]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.service.storage_available()))
}

#[utoipa::path(
    get,
    path = "/api/triages",
    params(ListTriagesQuery),
    responses(
        (status = 200, description = "One page of triages, newest first", body = ListTriagesRes),
        (status = 400, description = "Invalid filter or paging", body = ErrorRes),
        (status = 503, description = "Storage unavailable", body = ErrorRes)
    )
)]
/// List triages with free-text search, priority and date filters.
#[axum::debug_handler]
pub(crate) async fn list_triages(
    State(state): State<AppState>,
    query: Result<Query<ListTriagesQuery>, QueryRejection>,
) -> Result<Json<ListTriagesRes>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let query = TriageQuery::try_from(query)?;
    let page = run_blocking(&state, move |service| service.list(&query)).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/triages",
    request_body = ObservationInput,
    responses(
        (status = 201, description = "Triage classified and stored", body = TriageRecord),
        (status = 400, description = "Missing or out-of-range field", body = ErrorRes),
        (status = 503, description = "Storage unavailable", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Classify a patient and store the triage.
#[axum::debug_handler]
pub(crate) async fn create_triage(
    State(state): State<AppState>,
    body: Result<Json<ObservationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TriageRecord>), ApiError> {
    let input = json_body(body)?;
    let record = run_blocking(&state, move |service| service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/triages/{id}",
    params(("id" = String, Path, description = "Triage record id")),
    responses(
        (status = 200, description = "Triage record", body = TriageRecord),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "No such triage", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn get_triage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TriageRecord>, ApiError> {
    let record = run_blocking(&state, move |service| service.get(&id)).await?;
    Ok(Json(record))
}

#[utoipa::path(
    put,
    path = "/api/triages/{id}",
    params(("id" = String, Path, description = "Triage record id")),
    request_body = ObservationInput,
    responses(
        (status = 200, description = "Triage updated and re-classified", body = TriageRecord),
        (status = 400, description = "Invalid id or field", body = ErrorRes),
        (status = 404, description = "No such triage", body = ErrorRes)
    )
)]
/// Partially update a triage.
///
/// Present fields override the stored values, absent fields are kept, and the merged
/// observation is classified again.
#[axum::debug_handler]
pub(crate) async fn update_triage(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ObservationInput>, JsonRejection>,
) -> Result<Json<TriageRecord>, ApiError> {
    let input = json_body(body)?;
    let record = run_blocking(&state, move |service| service.update(&id, input)).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/triages/{id}",
    params(("id" = String, Path, description = "Triage record id")),
    responses(
        (status = 200, description = "Triage deleted", body = DeleteTriageRes),
        (status = 400, description = "Invalid id", body = ErrorRes),
        (status = 404, description = "No such triage", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn delete_triage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTriageRes>, ApiError> {
    let removed = run_blocking(&state, move |service| service.delete(&id)).await?;
    Ok(Json(DeleteTriageRes {
        message: "Triage deleted".into(),
        id: removed.id.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/triages/{id}/history",
    params(("id" = String, Path, description = "Triage record id")),
    responses(
        (status = 200, description = "Audit entries, newest first", body = HistoryRes),
        (status = 400, description = "Invalid id", body = ErrorRes)
    )
)]
/// Audit trail of a triage. Deleted records keep their trail.
#[axum::debug_handler]
pub(crate) async fn triage_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryRes>, ApiError> {
    let record_id = id.clone();
    let entries = run_blocking(&state, move |service| service.history(&id)).await?;
    Ok(Json(HistoryRes {
        record_id,
        entries,
    }))
}

#[utoipa::path(
    get,
    path = "/api/triages/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = TriageStats),
        (status = 503, description = "Storage unavailable", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn triage_stats(
    State(state): State<AppState>,
) -> Result<Json<TriageStats>, ApiError> {
    let stats = run_blocking(&state, |service| service.stats()).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/queue",
    responses(
        (status = 200, description = "Waiting-room queue, next patient first", body = QueueRes),
        (status = 503, description = "Storage unavailable", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub(crate) async fn queue(State(state): State<AppState>) -> Result<Json<QueueRes>, ApiError> {
    let entries = run_blocking(&state, |service| service.queue()).await?;
    Ok(Json(entries.into()))
}

#[utoipa::path(
    get,
    path = "/api/queue/next",
    responses(
        (status = 200, description = "Next patient to call, if any", body = NextPatientRes),
        (status = 503, description = "Storage unavailable", body = ErrorRes)
    )
)]
/// Next patient to call. Reading it does not remove anyone from the queue.
#[axum::debug_handler]
pub(crate) async fn next_patient(
    State(state): State<AppState>,
) -> Result<Json<NextPatientRes>, ApiError> {
    let patient = run_blocking(&state, |service| service.next_in_queue()).await?;
    Ok(Json(NextPatientRes { patient }))
}
