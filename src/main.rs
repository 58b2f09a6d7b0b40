use axum::Router;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use triage_core::{core_config_from_env, CoreConfig, TriageService};

const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Resolves the REST bind address, falling back to `0.0.0.0:3000`.
fn rest_addr_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.into())
}

fn build_app(cfg: Arc<CoreConfig>) -> Router {
    api_rest::router(AppState::new(TriageService::new(cfg)))
}

/// Main entry point for the triage service
///
/// Loads `.env`, resolves the configuration once and serves the REST API until Ctrl-C.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_DATA_DIR`: Directory for triage data storage (default: "triage_data")
/// - `TRIAGE_RULESET`, `TRIAGE_RULES_FILE`, `TRIAGE_CRITICAL_POLICY`: classification rules
/// - `TRIAGE_HISTORY_RETENTION_DAYS`, `TRIAGE_STATS_WINDOW_DAYS`: retention and statistics windows
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = rest_addr_from_env_value(std::env::var("TRIAGE_REST_ADDR").ok());
    let cfg = Arc::new(core_config_from_env()?);

    if !cfg.triage_data_dir().is_dir() {
        tracing::warn!(
            "triage data directory {} does not exist; /api requests will return 503",
            cfg.triage_data_dir().display()
        );
    }

    tracing::info!("++ Starting triage REST on {}", rest_addr);

    let app = build_app(cfg);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("-- Shutting down triage REST");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    #[test]
    fn test_rest_addr_defaults() {
        assert_eq!(rest_addr_from_env_value(None), "0.0.0.0:3000");
        assert_eq!(rest_addr_from_env_value(Some(" ".into())), "0.0.0.0:3000");
        assert_eq!(
            rest_addr_from_env_value(Some("127.0.0.1:8080".into())),
            "127.0.0.1:8080"
        );
    }

    #[tokio::test]
    async fn test_app_serves_health() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = Arc::new(CoreConfig::with_defaults(temp_dir.path().to_path_buf()).unwrap());

        let response = build_app(cfg)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("\"ok\":true"));
    }
}
