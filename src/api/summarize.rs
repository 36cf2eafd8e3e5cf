//! Summarization endpoints for raw text and uploaded documents.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{read_file_field, AppError};
use crate::processing::summarize::SummaryStyle;
use crate::processing::{PipelineApi, SummaryOutcome};

/// Request body for `POST /summarize/text`.
#[derive(Deserialize)]
pub(crate) struct SummarizeTextRequest {
    text: String,
    #[serde(default)]
    summary_type: SummaryStyle,
    #[serde(default)]
    max_length: Option<usize>,
}

/// Query parameters for `POST /summarize/document`.
#[derive(Deserialize)]
pub(crate) struct SummarizeQuery {
    #[serde(default)]
    summary_type: SummaryStyle,
    #[serde(default)]
    max_length: Option<usize>,
}

/// Success response shared by both summarization endpoints.
#[derive(Serialize)]
pub(crate) struct SummarizeResponse {
    success: bool,
    summary: String,
    original_length: usize,
    summary_length: usize,
    compression_ratio: f64,
}

impl From<SummaryOutcome> for SummarizeResponse {
    fn from(outcome: SummaryOutcome) -> Self {
        Self {
            success: true,
            summary: outcome.summary,
            original_length: outcome.original_length,
            summary_length: outcome.summary_length,
            compression_ratio: outcome.compression_ratio,
        }
    }
}

/// Summarize raw text in the requested style.
pub(crate) async fn summarize_text<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<SummarizeTextRequest>,
) -> Json<SummarizeResponse>
where
    S: PipelineApi,
{
    // max_length is accepted for request compatibility; the extractive summarizer
    // targets a sentence count instead.
    tracing::debug!(
        style = ?request.summary_type,
        max_length = ?request.max_length,
        "Summarize text request"
    );
    let outcome = service.summarize(&request.text, request.summary_type).await;
    Json(outcome.into())
}

/// Extract an uploaded document's text and summarize it.
pub(crate) async fn summarize_document<S>(
    State(service): State<Arc<S>>,
    Query(query): Query<SummarizeQuery>,
    multipart: Multipart,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: PipelineApi,
{
    tracing::debug!(
        style = ?query.summary_type,
        max_length = ?query.max_length,
        "Summarize document request"
    );
    let (filename, bytes) = read_file_field(multipart).await?;
    let outcome = service
        .summarize_document(&filename, &bytes, query.summary_type)
        .await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::api::testing::{body_json, json_request, multipart_request, StubPipeline};
    use crate::processing::ExtractError;

    #[tokio::test]
    async fn summarize_text_reports_lengths_and_ratio() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/summarize/text",
                json!({ "text": "Some long text to shrink." }),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["summary"], "stub summary");
        assert_eq!(json["original_length"], 20);
        assert_eq!(json["summary_length"], 12);
        assert_eq!(json["compression_ratio"], 0.6);
    }

    #[tokio::test]
    async fn summary_type_accepts_bullet_points() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/summarize/text",
                json!({ "text": "Text.", "summary_type": "bullet_points", "max_length": 100 }),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn summarize_document_reads_style_from_query() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(multipart_request(
                "/summarize/document?summary_type=detailed",
                "report.txt",
                b"report body",
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["summary"], "stub summary");
    }

    #[tokio::test]
    async fn empty_document_is_a_bad_request() {
        let stub = StubPipeline::default();
        *stub.summarize_doc_error.lock().unwrap() = Some(ExtractError::EmptyContent.into());
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(multipart_request("/summarize/document", "blank.txt", b"  "))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert!(json["detail"].as_str().unwrap().contains("No text content"));
    }
}
