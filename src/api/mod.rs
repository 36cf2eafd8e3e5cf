//! HTTP surface for docbrain.
//!
//! This module exposes a compact Axum router covering three service areas:
//!
//! - `/qa/*` – upload documents, ask questions over them, list and delete them.
//! - `/summarize/*` – summarize raw text or an uploaded document.
//! - `/learning/*` – phased learning-path suggestions from the static catalog.
//!
//! Plus `GET /` (service info), `GET /health`, and `GET /metrics`. Handlers are
//! generic over [`PipelineApi`] so tests can drive the router with a stub service.

mod learning;
mod qa;
mod summarize;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::processing::{ExtractError, PipelineApi, PipelineError};
use crate::store::StoreError;

/// Maximum accepted upload size in bytes.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the HTTP router exposing the full API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: PipelineApi + 'static,
{
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/metrics", get(get_metrics::<S>))
        .route("/qa/upload", post(qa::upload_document::<S>))
        .route("/qa/ask", post(qa::ask_question::<S>))
        .route("/qa/documents", get(qa::list_documents::<S>))
        .route("/qa/documents/:document_id", delete(qa::delete_document::<S>))
        .route("/summarize/text", post(summarize::summarize_text::<S>))
        .route("/summarize/document", post(summarize::summarize_document::<S>))
        .route("/learning/suggest", post(learning::suggest_path))
        .route("/learning/subjects", get(learning::list_subjects))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(service)
}

/// Service descriptor returned at the root path.
async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "service": "docbrain",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "qa": ["/qa/upload", "/qa/ask", "/qa/documents"],
            "summarization": ["/summarize/text", "/summarize/document"],
            "learning": ["/learning/suggest", "/learning/subjects"],
            "diagnostics": ["/health", "/metrics"]
        }
    }))
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "docbrain" }))
}

/// Return the current activity counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<crate::metrics::MetricsSnapshot>
where
    S: PipelineApi,
{
    Json(service.metrics_snapshot())
}

/// Error wrapper translating pipeline failures into HTTP responses.
///
/// Client mistakes keep their descriptive message; anything else is logged with the
/// real error and answered with a generic 500 body so internal details never reach
/// clients.
pub(crate) enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            AppError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            AppError::Internal(logged) => {
                tracing::error!(error = %logged, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred. Please try again later.".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(error: PipelineError) -> Self {
        match &error {
            PipelineError::Extract(ExtractError::UnsupportedFormat { .. })
            | PipelineError::Extract(ExtractError::EmptyContent) => {
                AppError::BadRequest(error.to_string())
            }
            PipelineError::Store(StoreError::NotFound { .. }) => {
                AppError::NotFound(error.to_string())
            }
            // Everything else (parse failures, chunking misconfiguration) is not
            // something the client can fix.
            _ => AppError::Internal(error.to_string()),
        }
    }
}

/// Pull the `file` field out of a multipart upload.
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(format!("Malformed multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(ToString::to_string)
            .ok_or_else(|| AppError::BadRequest("Uploaded file must have a filename.".into()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(format!("Failed to read upload: {err}")))?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(AppError::BadRequest(
        "Missing multipart field 'file'.".into(),
    ))
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::create_router;
    use super::testing::{body_json, StubPipeline};

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn root_lists_endpoint_groups() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["service"], "docbrain");
        assert!(json["endpoints"]["qa"].is_array());
    }

    #[tokio::test]
    async fn metrics_exposes_counters() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["documents_ingested"], 3);
        assert_eq!(json["segments_stored"], 7);
    }
}
