use api_shared::ErrorRes;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use triage_core::TriageError;

/// Error returned by every REST handler.
///
/// Rendered as the matching status code with an [`ErrorRes`] JSON body. Internal failures are
/// logged and reported with a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Triage(#[from] TriageError),
    #[error("{0}")]
    BadRequest(String),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Triage(TriageError::StorageUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Triage(TriageError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Triage(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Triage(_) | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {:?}", self);
            "Internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorRes { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(TriageError::MissingField("name")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(TriageError::NotFound("abc".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(TriageError::StorageUnavailable(PathBuf::from("/missing"))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::from(TriageError::FileRead(std::io::Error::other("disk"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::BadRequest("bad json".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status);
        }
    }

    #[tokio::test]
    async fn test_panicked_task_is_internal_error() {
        let join_error = tokio::task::spawn_blocking(|| -> u32 { panic!("worker died") })
            .await
            .unwrap_err();

        let response = ApiError::from(join_error).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let body: ErrorRes = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Internal error");
    }
}
