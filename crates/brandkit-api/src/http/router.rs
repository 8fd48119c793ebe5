//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, except `/health`.
//! Middleware: CORS, request tracing, gzip compression.

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::http::handlers;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Wizard sessions
        .route(
            "/sessions",
            post(handlers::session::create_session).get(handlers::session::list_sessions),
        )
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route("/sessions/{id}/turns", post(handlers::session::submit_turn))
        .route(
            "/sessions/{id}/snapshot",
            get(handlers::session::download_snapshot),
        )
        // Stateless collection turns
        .route("/chat/brand-name", post(handlers::chat::brand_name))
        .route(
            "/chat/brand-description",
            post(handlers::chat::brand_description),
        )
        // Assets
        .route("/assets/bundle", post(handlers::assets::bundle))
        .route("/assets/profile", post(handlers::assets::profile))
        .route("/assets/images/search", post(handlers::assets::search_images))
        .route("/assets/highlights", post(handlers::assets::highlights))
        .route("/assets/plans", post(handlers::assets::plans))
        .route(
            "/assets/images/generate",
            post(handlers::assets::generate_images),
        )
        .route("/assets/logo", post(handlers::assets::logo))
        .route("/assets/landing-copy", post(handlers::assets::landing_copy))
        .route("/extract", post(handlers::extract::extract))
        // Speech and upload
        .route("/speech", post(handlers::speech::speak))
        .route("/speech/transcribe", post(handlers::speech::transcribe))
        .route("/upload", post(handlers::upload::upload_image));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found() -> ApiResponse<()> {
    ApiResponse::error("NOT_FOUND", "No such route", Uuid::now_v7().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use brandkit_core::llm::box_provider::BoxLlmProvider;
    use brandkit_core::wizard::controller::{DESCRIPTION_QUESTION, OPENING_QUESTION};
    use brandkit_infra::config::ApiKeys;
    use brandkit_types::config::AppConfig;

    use crate::traced::tests::FixedProvider;

    /// Finalizes whichever field the current step asks for.
    const REPLY: &str =
        r#"{"brandName": "Acme Mobile", "brandDescription": "Prepaid plans for students"}"#;

    fn test_router() -> (Router, TempDir) {
        let tmp = TempDir::new().unwrap();
        let state = AppState::from_parts(
            AppConfig::default(),
            tmp.path().to_path_buf(),
            BoxLlmProvider::new(FixedProvider::new(REPLY)),
            ApiKeys::default(),
        );
        (build_router(state), tmp)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn create_session(router: &Router) -> String {
        let (status, json) = send(router, request("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::OK);
        json["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (router, _tmp) = test_router();
        let (status, json) = send(&router, request("GET", "/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn new_session_asks_the_opening_question() {
        let (router, _tmp) = test_router();
        let (status, json) = send(&router, request("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["turn"]["reply"], OPENING_QUESTION);
        assert_eq!(json["data"]["turn"]["step"], "awaiting_brand_name");

        let id = json["data"]["id"].as_str().unwrap();
        let (status, json) = send(&router, request("GET", &format!("/api/v1/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["transcript"][0]["speaker"], "bot");
        assert_eq!(json["data"]["transcript"][0]["text"], OPENING_QUESTION);
    }

    #[tokio::test]
    async fn wizard_runs_to_done_through_turns() {
        let (router, _tmp) = test_router();
        let id = create_session(&router).await;
        let turns = format!("/api/v1/sessions/{id}/turns");

        let (status, json) = send(&router, post_json(&turns, json!({"utterance": "Acme"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["step"], "awaiting_brand_description");
        assert_eq!(json["data"]["finalized"], "brand_name");
        assert!(json["data"]["reply"].as_str().unwrap().ends_with(DESCRIPTION_QUESTION));

        let (status, json) = send(
            &router,
            post_json(&turns, json!({"utterance": "prepaid plans for students"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["step"], "done");
        assert_eq!(json["data"]["bundle"]["brand_name"], "Acme Mobile");
        assert!(json["_links"]["snapshot"].is_string());

        // Image services have no keys, so their branches are reported failed.
        let reports = json["data"]["bundle"]["reports"].as_array().unwrap();
        assert!(reports.len() >= 5);

        let response = router
            .clone()
            .oneshot(request("GET", &format!("/api/v1/sessions/{id}/snapshot")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("landing_page.html"));
        let html = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&html).contains("Acme Mobile"));

        let (status, json) = send(&router, post_json(&turns, json!({"utterance": "more"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["errors"][0]["code"], "WIZARD_NOT_ACCEPTING_INPUT");
    }

    #[tokio::test]
    async fn snapshot_conflicts_until_done() {
        let (router, _tmp) = test_router();
        let id = create_session(&router).await;
        let (status, json) =
            send(&router, request("GET", &format!("/api/v1/sessions/{id}/snapshot"))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["errors"][0]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn blank_utterance_is_rejected() {
        let (router, _tmp) = test_router();
        let id = create_session(&router).await;
        let uri = format!("/api/v1/sessions/{id}/turns");

        let (status, json) = send(&router, post_json(&uri, json!({"utterance": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");

        let (status, _) = send(&router, post_json(&uri, json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let (router, _tmp) = test_router();
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/extract")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(&router, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_and_invalid_session_ids() {
        let (router, _tmp) = test_router();
        let missing = Uuid::now_v7();
        let (status, json) =
            send(&router, request("GET", &format!("/api/v1/sessions/{missing}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "SESSION_NOT_FOUND");

        let (status, json) = send(&router, request("GET", "/api/v1/sessions/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let (router, _tmp) = test_router();
        let id = create_session(&router).await;
        let uri = format!("/api/v1/sessions/{id}");

        let (status, json) = send(&router, request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["deleted"], true);

        let (status, _) = send(&router, request("GET", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&router, request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sessions_are_listed() {
        let (router, _tmp) = test_router();
        let first = create_session(&router).await;
        let second = create_session(&router).await;

        let (status, json) = send(&router, request("GET", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.as_str()));
        assert!(ids.contains(&second.as_str()));
    }

    #[tokio::test]
    async fn stateless_brand_name_turn() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json(
                "/api/v1/chat/brand-name",
                json!({
                    "utterance": "Acme",
                    "history": [{"speaker": "bot", "text": OPENING_QUESTION}]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["finalized"], true);
        assert_eq!(json["data"]["value"], "Acme Mobile");
    }

    #[tokio::test]
    async fn bundle_requires_both_brief_fields() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json("/api/v1/assets/bundle", json!({"brandName": "Acme"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["errors"][0]["message"]
                .as_str()
                .unwrap()
                .contains("brandDescription")
        );
    }

    #[tokio::test]
    async fn bundle_settles_with_failed_image_branches() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json(
                "/api/v1/assets/bundle",
                json!({"brandName": "Acme", "brandDescription": "Prepaid plans"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["brand_name"], "Acme");
        assert!(json["data"]["ai_images"].is_null());
        assert!(json["data"]["cover_image"].is_null());
    }

    #[tokio::test]
    async fn extract_requires_property() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json("/api/v1/extract", json!({"text": "We are Acme Mobile"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn extract_reads_the_named_property() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json(
                "/api/v1/extract",
                json!({"text": "We are Acme Mobile", "property": "brandName"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["value"], "Acme Mobile");
    }

    #[tokio::test]
    async fn unconfigured_services_are_unavailable() {
        let (router, _tmp) = test_router();
        let (status, json) =
            send(&router, post_json("/api/v1/speech", json!({"text": "Hello"}))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["errors"][0]["code"], "SERVICE_NOT_CONFIGURED");

        let (status, _) = send(
            &router,
            post_json(
                "/api/v1/assets/logo",
                json!({"brandName": "Acme", "brandDescription": "Prepaid plans"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn transcribe_rejects_bad_base64() {
        let (router, _tmp) = test_router();
        let (status, json) = send(
            &router,
            post_json("/api/v1/speech/transcribe", json!({"audio": "***"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn upload_requires_image() {
        let (router, _tmp) = test_router();
        let (status, _) = send(&router, post_json("/api/v1/upload", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_uses_the_envelope() {
        let (router, _tmp) = test_router();
        let (status, json) = send(&router, request("GET", "/api/v1/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["errors"][0]["code"], "NOT_FOUND");
    }
}
