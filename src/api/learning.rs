//! Learning-path endpoints backed by the static catalog.

use axum::{extract::rejection::JsonRejection, Json};
use serde::Serialize;

use super::AppError;
use crate::learning::{generate_learning_path, subjects, LearningPath, LearningPathRequest};

/// Success response for `POST /learning/suggest`.
#[derive(Serialize)]
pub(crate) struct SuggestResponse {
    success: bool,
    subject: String,
    personalized_path: LearningPath,
}

/// Generate a phased learning plan for the requested subject and skill range.
///
/// The JSON extractor is taken as a `Result` so enum parse failures come back as a
/// 400 with a `detail` body instead of the default rejection.
pub(crate) async fn suggest_path(
    request: Result<Json<LearningPathRequest>, JsonRejection>,
) -> Result<Json<SuggestResponse>, AppError> {
    let Json(request) =
        request.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let path = generate_learning_path(&request);
    tracing::info!(
        subject = %request.subject,
        phases = path.phases.len(),
        "Learning path generated"
    );
    Ok(Json(SuggestResponse {
        success: true,
        subject: request.subject,
        personalized_path: path,
    }))
}

/// Success response for `GET /learning/subjects`.
#[derive(Serialize)]
pub(crate) struct SubjectsResponse {
    success: bool,
    subjects: Vec<&'static str>,
    total_subjects: usize,
}

/// List the subjects available in the catalog.
pub(crate) async fn list_subjects() -> Json<SubjectsResponse> {
    let subjects = subjects();
    let total_subjects = subjects.len();
    Json(SubjectsResponse {
        success: true,
        subjects,
        total_subjects,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::api::create_router;
    use crate::api::testing::{body_json, json_request, StubPipeline};

    fn suggest_body(subject: &str) -> serde_json::Value {
        json!({
            "subject": subject,
            "current_skill_level": "beginner",
            "target_skill_level": "advanced",
            "learning_goals": ["career_change"],
            "learning_style": "visual",
            "time_commitment": "10 hours/week",
            "timeline": "6 months"
        })
    }

    #[tokio::test]
    async fn suggest_returns_a_phased_plan() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(json_request(
                Method::POST,
                "/learning/suggest",
                suggest_body("python"),
            ))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["subject"], "python");
        assert_eq!(
            json["personalized_path"]["phases"].as_array().unwrap().len(),
            3
        );
        assert!(json["personalized_path"]["estimated_timeline"]
            .as_str()
            .unwrap()
            .contains("weeks"));
    }

    #[tokio::test]
    async fn invalid_skill_level_is_a_bad_request() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let mut body = suggest_body("python");
        body["current_skill_level"] = json!("wizard");

        let response = app
            .oneshot(json_request(Method::POST, "/learning/suggest", body))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn subjects_lists_the_catalog() {
        let app = create_router(Arc::new(StubPipeline::default()));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method(Method::GET)
                    .uri("/learning/subjects")
                    .body(axum::body::Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.into_body()).await;
        assert_eq!(json["total_subjects"], 3);
        assert!(json["subjects"]
            .as_array()
            .unwrap()
            .contains(&json!("python")));
    }
}
