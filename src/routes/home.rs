use axum::Json;

use crate::auth::dto::MessageResponse;

pub const BANNER: &str = "credential service online";

pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new(BANNER))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::BANNER;
    use crate::{app::build_app, state::AppState};

    #[tokio::test]
    async fn root_reports_online() {
        let app = build_app(AppState::for_tests().await);
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": BANNER }));
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let app = build_app(AppState::for_tests().await);
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/register")
                    .header("origin", "http://example.com")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
