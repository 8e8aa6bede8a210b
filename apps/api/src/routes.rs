//! # HTTP Routes
//!
//! axum handlers for the users API. Each handler only decodes the request,
//! calls [`UserService`](crate::service::UserService) and encodes the
//! result.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    /api/users              list_users     200                      │
//! │  GET    /api/users/search       search_user    200 | 400 | 404          │
//! │  POST   /api/users              create_user    201 | 400 | 409          │
//! │  GET    /api/users/{id}         get_user       200 | 404                │
//! │  PUT    /api/users/{id}         update_user    200 | 400 | 404 | 409    │
//! │  DELETE /api/users/{id}         delete_user    204 | 404                │
//! │  GET    /health                 health         200 | 503                │
//! │  GET    /api-docs/openapi.json  openapi_json   200                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The OpenAPI document is derived from the `#[utoipa::path]` attributes on
//! the user handlers, so it cannot drift from the router.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::service::{
    parse_user_id, CreateUserRequest, SearchUserParams, UpdateUserRequest, INVALID_USER_DATA,
    SEARCH_NEEDS_FILTER,
};
use crate::state::AppState;
use swapdesk_core::User;

/// Builds the full application router, layers included.
pub fn build_router(state: AppState) -> Router {
    let cors_allow_any = state.config.cors_allow_any;

    let router = Router::new()
        .merge(user_routes())
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state);

    let router = if cors_allow_any {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/search", get(search_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// API Documentation
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(title = "swapdesk users API"),
    paths(list_users, search_user, create_user, get_user, update_user, delete_user),
    components(schemas(User, CreateUserRequest, UpdateUserRequest, ApiError, ErrorCode)),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;

async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!(
        "http://localhost:{}",
        state.config.port
    ))]);
    Json(doc)
}

// =============================================================================
// Handlers
// =============================================================================

/// Get all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = [User]),
        (status = 500, description = "Internal server error", body = ApiError)
    )
)]
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users().list().await?))
}

/// Find user by email and/or name
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "users",
    params(SearchUserParams),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Missing query parameters", body = ApiError),
        (status = 404, description = "User not found", body = ApiError)
    )
)]
async fn search_user(
    State(state): State<AppState>,
    params: Result<Query<SearchUserParams>, QueryRejection>,
) -> ApiResult<Json<User>> {
    let Query(params) = params.map_err(|e| {
        debug!(error = %e, "Rejected search query");
        ApiError::validation(SEARCH_NEEDS_FILTER)
    })?;

    Ok(Json(state.users().search(params).await?))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input", body = ApiError),
        (status = 409, description = "User already exists", body = ApiError)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(request) = body.map_err(rejected_body)?;

    let user = state.users().create(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ApiError)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_user_id(&id)?;
    Ok(Json(state.users().get(id).await?))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Blank field", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
        (status = 409, description = "Email taken by another user", body = ApiError)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let id = parse_user_id(&id)?;
    let Json(request) = body.map_err(rejected_body)?;

    Ok(Json(state.users().update(id, request).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ApiError)
    )
)]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_user_id(&id)?;
    state.users().delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Liveness plus a trivial database query.
async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    }
}

fn rejected_body(err: JsonRejection) -> ApiError {
    debug!(error = %err, "Rejected request body");
    ApiError::validation(INVALID_USER_DATA)
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use swapdesk_db::{Database, DbConfig};
    use tower::ServiceExt;

    async fn app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let router = build_router(AppState::new(db.clone(), ApiConfig::default()));
        (router, db)
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_raw(app, method, uri, body.map(|b| b.to_string())).await
    }

    async fn create(app: &Router, name: &str, email: &str) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/api/users",
            Some(json!({"name": name, "email": email})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (app, _db) = app().await;

        let created = create(&app, "John Doe", "john@example.com").await;
        assert_eq!(created["name"], "John Doe");
        let id = created["id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
    }

    #[tokio::test]
    async fn test_create_invalid() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "POST", "/api/users", Some(json!({"name": "Ada"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid user data", "code": "VALIDATION_ERROR"}));

        let (status, _) =
            send(&app, "POST", "/api/users", Some(json!({"name": " ", "email": "a@b.c"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) =
            send_raw(&app, "POST", "/api/users", Some("{not json".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid user data");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_and_keeps_row() {
        let (app, db) = app().await;
        let original = create(&app, "Ada", "ada@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            Some(json!({"name": "Eve", "email": "ada@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({"error": "User already exists", "code": "CONFLICT"}));

        assert_eq!(db.users().count().await.unwrap(), 1);
        let (_, stored) = send(&app, "GET", "/api/users/1", None).await;
        assert_eq!(stored, original);
    }

    #[tokio::test]
    async fn test_get_missing_and_non_integer_id() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "GET", "/api/users/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "User not found", "code": "NOT_FOUND"}));

        let (status, _) = send(&app, "GET", "/api/users/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_returns_all_in_id_order() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        create(&app, "Zed", "zed@example.com").await;
        create(&app, "Amy", "amy@example.com").await;

        let (_, body) = send(&app, "GET", "/api/users", None).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Zed", "Amy"]);
    }

    #[tokio::test]
    async fn test_search() {
        let (app, _db) = app().await;
        create(&app, "Ada", "ada@example.com").await;
        create(&app, "Bob", "bob@example.com").await;

        let (status, body) = send(&app, "GET", "/api/users/search?name=Bob", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "bob@example.com");

        let (status, _) = send(
            &app,
            "GET",
            "/api/users/search?name=Bob&email=ada%40example.com",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/api/users/search", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "At least email or name must be provided");

        let (status, _) = send(&app, "GET", "/api/users/search?name=&email=", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_partial_update_merges() {
        let (app, _db) = app().await;
        let user = create(&app, "John Doe", "john@example.com").await;
        let uri = format!("/api/users/{}", user["id"]);

        let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "X"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "X");
        assert_eq!(body["email"], "john@example.com");
        assert_eq!(body["id"], user["id"]);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (app, _db) = app().await;
        create(&app, "Ada", "ada@example.com").await;
        let bob = create(&app, "Bob", "bob@example.com").await;
        let uri = format!("/api/users/{}", bob["id"]);

        let (status, _) = send(&app, "PUT", "/api/users/99", Some(json!({"name": "X"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"email": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, "PUT", &uri, Some(json!({"email": "ada@example.com"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete() {
        let (app, db) = app().await;
        let user = create(&app, "Ada", "ada@example.com").await;
        let uri = format!("/api/users/{}", user["id"]);

        let (status, _) = send(&app, "DELETE", "/api/users/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(db.users().count().await.unwrap(), 1);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, db) = app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));

        db.close().await;
        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_openapi_document_lists_every_user_operation() {
        let (app, _db) = app().await;

        let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
        assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");

        let paths = doc["paths"].as_object().unwrap();
        let mut operations: Vec<String> = paths
            .iter()
            .flat_map(|(path, item)| {
                item.as_object()
                    .unwrap()
                    .keys()
                    .filter(|key| matches!(key.as_str(), "get" | "post" | "put" | "delete"))
                    .map(move |method| format!("{} {}", method, path))
            })
            .collect();
        operations.sort();
        assert_eq!(
            operations,
            vec![
                "delete /api/users/{id}",
                "get /api/users",
                "get /api/users/search",
                "get /api/users/{id}",
                "post /api/users",
                "put /api/users/{id}",
            ]
        );

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        for name in ["User", "CreateUserRequest", "UpdateUserRequest", "ApiError"] {
            assert!(schemas.contains_key(name), "missing schema {}", name);
        }
        assert!(schemas["ApiError"]["properties"].get("error").is_some());
    }

    #[tokio::test]
    async fn test_closed_database_is_internal_error() {
        let (app, db) = app().await;
        db.close().await;

        let (status, body) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error", "code": "INTERNAL"}));
    }
}
