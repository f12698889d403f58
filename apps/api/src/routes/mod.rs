pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as documents;
use crate::rewriter::handlers as rewriter;
use crate::state::AppState;
use crate::template::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Documents API
        .route("/api/v1/documents/extract", post(documents::handle_extract))
        .route(
            "/api/v1/documents/validate",
            post(documents::handle_validate_document),
        )
        // Templates API
        .route(
            "/api/v1/templates/parse",
            post(templates::handle_parse_template),
        )
        .route(
            "/api/v1/templates/validate",
            post(templates::handle_validate_template),
        )
        .route(
            "/api/v1/templates/preview",
            post(templates::handle_preview_template),
        )
        .route(
            "/api/v1/templates/suggested-variables",
            get(templates::handle_suggested_variables),
        )
        // Rewrite API
        .route("/api/v1/rewrite", post(rewriter::handle_rewrite))
        .route("/api/v1/analysis", post(rewriter::handle_analysis))
        .route("/api/v1/export", post(rewriter::handle_export))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::rewriter::generator::stubs::{FailingGenerator, StubGenerator};
    use crate::rewriter::generator::ContentGenerator;
    use crate::state::test_support::test_state;

    fn router_with(generator: Arc<dyn ContentGenerator>) -> Router {
        build_router(test_state(generator))
    }

    fn router() -> Router {
        router_with(Arc::new(StubGenerator::new(json!({
            "sections": {
                "summary": "Experienced engineer.",
                "education": "B.S. Computer Science."
            },
            "cover_letter": "Dear Hiring Manager..."
        }))))
    }

    fn rewrite_body(template: &str) -> Value {
        json!({
            "original_resume": "Jane Doe, engineer",
            "job_description": "Rust engineer",
            "format_template": template,
            "candidate_statement": "Strong in Go, learning Rust"
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rewrite_returns_resume_and_cover_letter() {
        let (status, body) = post_json(
            router(),
            "/api/v1/rewrite",
            rewrite_body("HEADER\n---\n{summary}\n---\n{education}"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["resume"],
            "HEADER\n---\nExperienced engineer.\n---\nB.S. Computer Science."
        );
        assert_eq!(body["cover_letter"], "Dear Hiring Manager...");
        assert_eq!(body["missing_sections"], json!([]));
    }

    #[tokio::test]
    async fn test_rewrite_names_the_missing_input() {
        let mut body = rewrite_body("{summary}");
        body["job_description"] = json!("   ");

        let (status, body) = post_json(router(), "/api/v1/rewrite", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please provide a job description");
    }

    #[tokio::test]
    async fn test_rewrite_names_an_absent_input() {
        for (field, message) in [
            ("original_resume", "Please upload a resume"),
            ("job_description", "Please provide a job description"),
            (
                "candidate_statement",
                "Please describe your experience and limitations",
            ),
        ] {
            let mut body = rewrite_body("{summary}");
            body.as_object_mut().unwrap().remove(field);

            let (status, body) = post_json(router(), "/api/v1/rewrite", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "field {field}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
            assert_eq!(body["error"]["message"], message);
        }
    }

    #[tokio::test]
    async fn test_rewrite_without_template_reports_empty_template() {
        for template in [None, Some("   ")] {
            let mut body = rewrite_body("{summary}");
            match template {
                Some(text) => body["format_template"] = json!(text),
                None => {
                    body.as_object_mut().unwrap().remove("format_template");
                }
            }

            let (status, body) = post_json(router(), "/api/v1/rewrite", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "EMPTY_TEMPLATE");
        }
    }

    #[tokio::test]
    async fn test_analysis_names_an_absent_input() {
        let (status, body) = post_json(
            router(),
            "/api/v1/analysis",
            json!({"original_resume": "Jane Doe, engineer"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Please provide a job description");
    }

    #[tokio::test]
    async fn test_rewrite_reports_service_outage() {
        let app = router_with(Arc::new(FailingGenerator { timeout: false }));

        let (status, body) = post_json(app, "/api/v1/rewrite", rewrite_body("{summary}")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_ERROR");
    }

    #[tokio::test]
    async fn test_rewrite_reports_timeout() {
        let app = router_with(Arc::new(FailingGenerator { timeout: true }));

        let (status, body) = post_json(app, "/api/v1/rewrite", rewrite_body("{summary}")).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], "GENERATION_TIMEOUT");
    }

    #[tokio::test]
    async fn test_rewrite_reports_malformed_result() {
        let app = router_with(Arc::new(StubGenerator::new(json!({"cover_letter": "x"}))));

        let (status, body) = post_json(app, "/api/v1/rewrite", rewrite_body("{summary}")).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_GENERATION_RESULT");
        assert!(body.get("resume").is_none());
    }

    #[tokio::test]
    async fn test_strict_rewrite_rejects_missing_sections() {
        let mut body = rewrite_body("{summary}\n---\n{projects}");
        body["strict"] = json!(true);

        let (status, body) = post_json(router(), "/api/v1/rewrite", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("projects"));
    }

    #[tokio::test]
    async fn test_strict_rewrite_rejects_malformed_template() {
        let mut body = rewrite_body("{summary}\n---\n{education");
        body["strict"] = json!(true);

        let (status, body) = post_json(router(), "/api/v1/rewrite", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "MALFORMED_TEMPLATE");
    }

    #[tokio::test]
    async fn test_lenient_rewrite_keeps_unfilled_placeholders() {
        let (status, body) = post_json(
            router(),
            "/api/v1/rewrite",
            rewrite_body("{summary}\n---\n{projects}"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"], "Experienced engineer.\n---\n{projects}");
        assert_eq!(body["missing_sections"], json!(["projects"]));
    }

    #[tokio::test]
    async fn test_template_endpoints() {
        let (status, body) = post_json(
            router(),
            "/api/v1/templates/parse",
            json!({"template": "NAME\n---\n{job_history}"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["parsed"]["variables"], json!(["job_history"]));
        assert_eq!(body["section_names"], json!(["Job History"]));
        assert_eq!(body["literal_sections"], json!([0]));
        assert_eq!(body["generated_sections"], json!([1]));

        let (status, body) = post_json(
            router(),
            "/api/v1/templates/validate",
            json!({"template": "{unclosed"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_valid"], false);

        let (status, body) = post_json(
            router(),
            "/api/v1/templates/preview",
            json!({"template": "{summary}"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["preview"], "[Sample Summary Content]");
    }

    #[tokio::test]
    async fn test_blank_template_is_rejected() {
        let (status, body) = post_json(
            router(),
            "/api/v1/templates/validate",
            json!({"template": "  "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_TEMPLATE");
    }

    #[tokio::test]
    async fn test_export_package_is_a_text_attachment() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/export")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"resume": "R", "cover_letter": "C", "kind": "package"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"application_package.txt\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("RESUME\n"));
        assert!(text.ends_with(&format!("COVER LETTER\n{}\n\nC", "=".repeat(50))));
    }

    #[tokio::test]
    async fn test_extract_without_file_field_is_rejected() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents/extract")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_reports_unreadable_pdf() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\nnot a pdf\r\n--{boundary}--\r\n"
        );
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents/extract")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
