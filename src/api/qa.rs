//! Document Q&A endpoints: upload, ask, list, delete.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{read_file_field, AppError};
use crate::processing::{PipelineApi, SourcePreview};

/// Success response for `POST /qa/upload`.
#[derive(Serialize)]
pub(crate) struct UploadResponse {
    success: bool,
    message: &'static str,
    document_id: String,
    filename: String,
    pages_processed: usize,
}

/// Accept a multipart document upload and ingest it.
pub(crate) async fn upload_document<S>(
    State(service): State<Arc<S>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError>
where
    S: PipelineApi,
{
    let (filename, bytes) = read_file_field(multipart).await?;
    let outcome = service.ingest(&filename, &bytes).await?;
    Ok(Json(UploadResponse {
        success: true,
        message: "Document processed successfully",
        document_id: outcome.document_id,
        filename: outcome.filename,
        pages_processed: outcome.segments_stored,
    }))
}

/// Request body for `POST /qa/ask`.
#[derive(Deserialize)]
pub(crate) struct AskRequest {
    document_id: String,
    question: String,
    #[serde(default)]
    max_results: Option<usize>,
}

/// Success response for `POST /qa/ask`.
#[derive(Serialize)]
pub(crate) struct AskResponse {
    success: bool,
    answer: String,
    confidence: f64,
    source_documents: Vec<SourcePreview>,
    document_id: String,
}

/// Answer a question over a previously uploaded document.
pub(crate) async fn ask_question<S>(
    State(service): State<Arc<S>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError>
where
    S: PipelineApi,
{
    let outcome = service
        .ask(&request.document_id, &request.question, request.max_results)
        .await?;
    Ok(Json(AskResponse {
        success: true,
        answer: outcome.answer,
        confidence: outcome.confidence,
        source_documents: outcome.sources,
        document_id: request.document_id,
    }))
}

/// Success response for `GET /qa/documents`.
#[derive(Serialize)]
pub(crate) struct DocumentsResponse {
    success: bool,
    documents: Vec<String>,
    count: usize,
}

/// List the ids of all stored documents.
pub(crate) async fn list_documents<S>(State(service): State<Arc<S>>) -> Json<DocumentsResponse>
where
    S: PipelineApi,
{
    let documents = service.list_documents().await;
    let count = documents.len();
    Json(DocumentsResponse {
        success: true,
        documents,
        count,
    })
}

/// Success response for `DELETE /qa/documents/{id}`.
#[derive(Serialize)]
pub(crate) struct DeleteResponse {
    success: bool,
    message: &'static str,
}

/// Remove a stored document. Responds 200 even when the id is unknown.
pub(crate) async fn delete_document<S>(
    State(service): State<Arc<S>>,
    Path(document_id): Path<String>,
) -> Json<DeleteResponse>
where
    S: PipelineApi,
{
    let removed = service.delete_document(&document_id).await;
    Json(DeleteResponse {
        success: true,
        message: if removed {
            "Document deleted successfully"
        } else {
            "Document was already removed"
        },
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::api::testing::{body_json, json_request, multipart_request, StubPipeline};
    use crate::processing::{ChunkingError, ExtractError};
    use crate::store::StoreError;

    #[tokio::test]
    async fn upload_returns_document_metadata() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(multipart_request("/qa/upload", "notes.txt", b"hello world"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["document_id"], "doc-stub");
        assert_eq!(json["filename"], "notes.txt");
        assert_eq!(json["pages_processed"], 2);
    }

    #[tokio::test]
    async fn unsupported_upload_is_a_bad_request() {
        let stub = StubPipeline::default();
        *stub.ingest.lock().unwrap() = Some(Err(ExtractError::UnsupportedFormat {
            extension: "exe".into(),
        }
        .into()));
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(multipart_request("/qa/upload", "virus.exe", b"MZ"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.into_body()).await;
        assert!(json["detail"]
            .as_str()
            .unwrap()
            .contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn chunking_misconfiguration_is_an_internal_error() {
        let stub = StubPipeline::default();
        *stub.ingest.lock().unwrap() = Some(Err(ChunkingError::InvalidConfiguration {
            window: 100,
            overlap: 100,
        }
        .into()));
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(multipart_request("/qa/upload", "notes.txt", b"content"))
            .await
            .expect("router response");

        // Server misconfiguration, not a client mistake: generic 500, no internals.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response.into_body()).await;
        let detail = json["detail"].as_str().unwrap();
        assert!(!detail.contains("overlap"));
        assert!(detail.contains("internal error"));
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let boundary = "docbrain-test-boundary";
        let body = format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
        );
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/qa/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(axum::body::Body::from(body))
            .expect("request");

        let response = app.oneshot(request).await.expect("router response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ask_echoes_the_document_id() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/qa/ask",
                json!({ "document_id": "doc-42", "question": "what?" }),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["answer"], "stub answer");
        assert_eq!(json["document_id"], "doc-42");
        assert!(json["source_documents"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ask_unknown_document_is_not_found() {
        let stub = StubPipeline::default();
        *stub.ask.lock().unwrap() = Some(Err(StoreError::NotFound {
            document_id: "missing".into(),
        }
        .into()));
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/qa/ask",
                json!({ "document_id": "missing", "question": "what?" }),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response.into_body()).await;
        assert!(json["detail"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn documents_listing_includes_count() {
        let stub = StubPipeline {
            documents: vec!["a".into(), "b".into()],
            ..StubPipeline::default()
        };
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::GET)
                    .uri("/qa/documents")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["documents"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_succeeds_even_for_unknown_ids() {
        let stub = StubPipeline {
            delete_result: false,
            ..StubPipeline::default()
        };
        let app = create_router(Arc::new(stub));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::DELETE)
                    .uri("/qa/documents/no-such-id")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["success"], true);
    }
}
