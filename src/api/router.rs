use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt, catch_panic::CatchPanicLayer, request_id::MakeRequestUuid,
    trace::TraceLayer,
};

use super::health;
use super::middleware::{handle_panic, logging_middleware};
use super::state::AppState;
use super::teams;
use super::types::{ApiError, ErrorCode};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/team/add", post(teams::add_team))
        .route("/team/get", get(teams::get_team))
        .fallback(unknown_route)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .propagate_x_request_id()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(logging_middleware))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

async fn unknown_route() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::InvalidRequest,
        "method not allowed",
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::domain::team::MockTeamRepository;
    use crate::domain::DomainError;
    use crate::infrastructure::team::InMemoryTeamRepository;

    fn in_memory_app() -> Router {
        create_router(AppState::with_repository(
            Arc::new(InMemoryTeamRepository::new()),
            Duration::from_secs(10),
        ))
    }

    fn post_team(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/team/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_team(query: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/team/get{}", query))
            .body(Body::empty())
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn backend_team() -> Value {
        json!({
            "team": {
                "team_name": "backend",
                "members": [
                    {"user_id": "u1", "username": "Alice", "is_active": true},
                    {"user_id": "u2", "username": "Bob", "is_active": true}
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let app = in_memory_app();

        let (status, body) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Service 'team-registry' is online"));

        let (status, body) =
            send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_register_then_conflict_then_lookup() {
        let app = in_memory_app();

        let (status, body) = send(&app, post_team(backend_team())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, backend_team());

        let (status, body) = send(
            &app,
            post_team(json!({
                "team": {
                    "team_name": "backend",
                    "members": [{"user_id": "u3", "username": "Carol", "is_active": true}]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "TEAM_EXISTS");
        assert_eq!(body["error"]["message"], "backend already exists");

        let (status, body) = send(
            &app,
            post_team(json!({
                "team": {
                    "team_name": "payments",
                    "members": [{"user_id": "u1", "username": "Alice", "is_active": true}]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "USER_EXISTS");
        assert_eq!(body["error"]["message"], "one or more users are already in a team");

        let (status, _) = send(&app, get_team("?team_name=payments")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get_team("?team_name=backend")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team_name"], "backend");
        let mut ids: Vec<_> = body["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["user_id"].as_str().unwrap().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[tokio::test]
    async fn test_empty_team_is_invalid_request() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            post_team(json!({"team": {"team_name": "empty-team", "members": []}})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert_eq!(body["error"]["message"], "team is empty");
    }

    #[tokio::test]
    async fn test_malformed_and_invalid_bodies() {
        let app = in_memory_app();

        let malformed = Request::builder()
            .method("POST")
            .uri("/team/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"team\":"))
            .unwrap();
        let (status, body) = send(&app, malformed).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert_eq!(body["error"]["message"], "invalid json syntax");

        let (status, body) = send(
            &app,
            post_team(json!({
                "team": {
                    "team_name": "ab",
                    "members": [{"user_id": "u1", "username": "Alice", "is_active": true}]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "team.team_name: value is too short, min=3");
    }

    #[tokio::test]
    async fn test_lookup_name_validation() {
        let app = in_memory_app();

        let (status, body) = send(&app, get_team("")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "team_name query required");

        let (status, body) = send(&app, get_team("?team_name=ab")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert_eq!(body["error"]["message"], "team name is too short min length is 3");

        let (status, body) = send(&app, get_team("?team_name=abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "resource not found");
    }

    #[tokio::test]
    async fn test_infrastructure_error_is_opaque() {
        let mut repo = MockTeamRepository::new();
        repo.expect_register_team()
            .returning(|_, _| Err(DomainError::infrastructure("password authentication failed")));
        repo.expect_fetch_team()
            .returning(|_, _| Err(DomainError::infrastructure("connection reset")));
        let app = create_router(AppState::with_repository(
            Arc::new(repo),
            Duration::from_secs(10),
        ));

        let (status, body) = send(&app, post_team(backend_team())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "internal server error");

        let (status, body) = send(&app, get_team("?team_name=backend")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = in_memory_app();

        let request = Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "req-abc")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-abc");

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let generated = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(generated).is_ok());
    }

    #[tokio::test]
    async fn test_handler_context_carries_request_id() {
        let mut repo = MockTeamRepository::new();
        repo.expect_fetch_team()
            .withf(|ctx, name| ctx.request_id() == "trace-me" && name == "backend")
            .times(1)
            .returning(|_, _| Err(DomainError::not_found("missing")));
        let app = create_router(AppState::with_repository(
            Arc::new(repo),
            Duration::from_secs(10),
        ));

        let request = Request::builder()
            .uri("/team/get?team_name=backend")
            .header(REQUEST_ID_HEADER, "trace-me")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_query_parameter_uses_envelope() {
        let app = in_memory_app();

        let (status, body) = send(&app, get_team("?team_name=abc&team_name=def")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .starts_with("invalid query string")
        );
    }

    #[tokio::test]
    async fn test_unknown_route_uses_envelope() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            Request::builder().uri("/teams/list").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "resource not found");
    }

    #[tokio::test]
    async fn test_wrong_method_uses_envelope() {
        let app = in_memory_app();

        let (status, body) = send(
            &app,
            Request::builder().uri("/team/add").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert_eq!(body["error"]["message"], "method not allowed");
    }
}
