//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
///
/// # Routes
/// - `POST /api/v1/user/` (and `/api/v1/user`) - create a user
/// - `GET /api/v1/user/{id}` (and `/api/v1/user/{id}/`) - fetch a user
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", handlers::users::user_routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::test_support::{FailingUserRepository, InMemoryUserRepository};

    fn router_with(repo: Arc<InMemoryUserRepository>) -> Router {
        create_router(AppState::from_repository(repo))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_create_then_get_returns_stored_user() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let (status, body) = send(
            &router,
            post_json("/api/v1/user/", r#"{"name":"Ada","phone":"123"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"message": "User created successfully"}));

        let (status, body) = send(&router, get("/api/v1/user/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Ada", "phone": "123"}));
    }

    #[tokio::test]
    async fn test_create_sets_location_header() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let response = router
            .oneshot(post_json("/api/v1/user", r#"{"name":"Ada"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/user/1");
    }

    #[tokio::test]
    async fn test_create_without_phone_reads_back_null() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let (status, _) = send(&router, post_json("/api/v1/user/", r#"{"name":"Grace"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&router, get("/api/v1/user/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Grace", "phone": null}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_repository() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let router = router_with(repo.clone());

        for body in ["{not json", r#"{"phone":"123"}"#, r#"{"name":42}"#, ""] {
            let (status, response) = send(&router, post_json("/api/v1/user/", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(response, json!({"error": "Invalid input"}));
        }

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_invalid_input() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let router = router_with(repo.clone());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/user/")
            .body(Body::from(r#"{"name":"Ada"}"#))
            .unwrap();

        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid input"}));
        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_failure_hides_cause() {
        let router = create_router(AppState::from_repository(Arc::new(FailingUserRepository)));

        let (status, body) = send(&router, post_json("/api/v1/user/", r#"{"name":"Ada"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Could not create user"}));
    }

    #[tokio::test]
    async fn test_non_integer_id_is_rejected_before_repository() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let router = router_with(repo.clone());

        for uri in [
            "/api/v1/user/abc",
            "/api/v1/user/1.5",
            "/api/v1/user/99999999999999999999",
        ] {
            let (status, body) = send(&router, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
            assert_eq!(body, json!({"error": "invalid user id"}));
        }

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let (status, body) = send(&router, get("/api/v1/user/9999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "user not found"}));
    }

    #[tokio::test]
    async fn test_id_beyond_key_range_is_not_found_without_repository_call() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let router = router_with(repo.clone());

        for uri in ["/api/v1/user/2147483648", "/api/v1/user/99999999999", "/api/v1/user/-2147483649"] {
            let (status, body) = send(&router, get(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}");
            assert_eq!(body, json!({"error": "user not found"}));
        }

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn test_get_accepts_trailing_slash() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));
        send(&router, post_json("/api/v1/user/", r#"{"name":"Ada","phone":"123"}"#)).await;

        let (status, body) = send(&router, get("/api/v1/user/1/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 1, "name": "Ada", "phone": "123"}));

        let (status, body) = send(&router, get("/api/v1/user/5/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "user not found"}));
    }

    #[tokio::test]
    async fn test_get_store_failure_echoes_message_as_not_found() {
        let router = create_router(AppState::from_repository(Arc::new(FailingUserRepository)));

        let (status, body) = send(&router, get("/api/v1/user/1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": "find user by id failed: connection refused"})
        );
    }

    #[tokio::test]
    async fn test_unrouted_methods_and_paths() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let response = router.clone().oneshot(get("/api/v1/users/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/api/v1/user/1")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let router = router_with(Arc::new(InMemoryUserRepository::new()));

        let response = router.oneshot(get("/api/v1/user/1")).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }

    proptest! {
        #[test]
        fn prop_create_then_get_round_trips(
            name in "[A-Za-z][A-Za-z .'-]{0,40}",
            phone in proptest::option::of("[0-9+ -]{1,20}"),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let (created, fetched) = runtime.block_on(async {
                let router = router_with(Arc::new(InMemoryUserRepository::new()));
                let body = json!({"name": name, "phone": phone}).to_string();
                let created = send(&router, post_json("/api/v1/user/", &body)).await;
                let fetched = send(&router, get("/api/v1/user/1")).await;
                (created, fetched)
            });

            prop_assert_eq!(created.0, StatusCode::CREATED);
            prop_assert_eq!(fetched.0, StatusCode::OK);
            prop_assert_eq!(fetched.1, json!({"id": 1, "name": name, "phone": phone}));
        }
    }
}
