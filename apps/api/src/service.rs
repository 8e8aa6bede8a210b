//! # User Service
//!
//! HTTP-agnostic user operations. Handlers decode the request into one of
//! the DTOs below and hand it here; the service validates it through
//! `swapdesk-core`, talks to the repository and returns a `User` or an
//! [`ApiError`] that already knows its status.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation  Input                  Ok           Err                     │
//! │  ─────────  ─────────────────────  ───────────  ─────────────────────   │
//! │  list       -                      Vec<User>    500                     │
//! │  get        id                     User         404                     │
//! │  search     SearchUserParams       User         400, 404                │
//! │  create     CreateUserRequest      User         400, 409                │
//! │  update     id, UpdateUserRequest  User         400, 404, 409           │
//! │  delete     id                     ()           404                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use tracing::{debug, info};
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult};
use swapdesk_core::{NewUser, User, UserChanges, UserQuery};
use swapdesk_db::{Database, DbError};

pub const INVALID_USER_DATA: &str = "Invalid user data";
pub const USER_NOT_FOUND: &str = "User not found";
pub const USER_EXISTS: &str = "User already exists";
pub const SEARCH_NEEDS_FILTER: &str = "At least email or name must be provided";

// =============================================================================
// Request DTOs
// =============================================================================

/// Body of `POST /api/users`.
///
/// Both fields are required; they are optional here so a missing field
/// and an empty one fail the same way.
#[derive(Debug, Clone, Default, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateUserRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
}

/// Body of `PUT /api/users/{id}`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Query of `GET /api/users/search`.
#[derive(Debug, Clone, Default, Deserialize, TS, IntoParams)]
#[into_params(parameter_in = Query)]
#[ts(export)]
pub struct SearchUserParams {
    /// Exact name to match
    pub name: Option<String>,
    /// Exact email to match
    pub email: Option<String>,
}

/// Path ids that are not integers match no user.
pub fn parse_user_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::not_found(USER_NOT_FOUND))
}

// =============================================================================
// Service
// =============================================================================

/// User operations over a [`Database`].
#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        UserService { db }
    }

    /// All users, ordered by id.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        Ok(self.db.users().list().await?)
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.db
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
    }

    /// First user (by id) matching every supplied filter.
    pub async fn search(&self, params: SearchUserParams) -> ApiResult<User> {
        let query = UserQuery::new(params.name.as_deref(), params.email.as_deref())
            .map_err(|_| ApiError::validation(SEARCH_NEEDS_FILTER))?;

        self.db
            .users()
            .find(&query)
            .await?
            .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
    }

    pub async fn create(&self, request: CreateUserRequest) -> ApiResult<User> {
        let new_user = NewUser::new(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
        )
        .map_err(invalid_user_data)?;

        let user = self
            .db
            .users()
            .insert(&new_user)
            .await
            .map_err(user_conflict)?;

        info!(id = user.id, "User created");
        Ok(user)
    }

    /// Validation runs before the existence check, so a blank field on a
    /// missing id is a 400.
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> ApiResult<User> {
        let changes = UserChanges::new(request.name.as_deref(), request.email.as_deref())
            .map_err(invalid_user_data)?;

        let user = self
            .db
            .users()
            .update(id, &changes)
            .await
            .map_err(user_conflict)?;

        info!(id = user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.db.users().delete(id).await?;

        info!(id, "User deleted");
        Ok(())
    }
}

fn invalid_user_data(err: swapdesk_core::ValidationError) -> ApiError {
    debug!(error = %err, "Rejected user data");
    ApiError::validation(INVALID_USER_DATA)
}

fn user_conflict(err: DbError) -> ApiError {
    if err.is_unique_violation() {
        ApiError::conflict(USER_EXISTS)
    } else {
        err.into()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use swapdesk_db::DbConfig;

    async fn service() -> UserService {
        UserService::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn create(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_assigns_id() {
        let service = service().await;
        let user = service.create(create(" Ada ", "ada@example.com ")).await.unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(service.get(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_create_missing_field() {
        let service = service().await;
        let request = CreateUserRequest {
            name: Some("Ada".to_string()),
            email: None,
        };

        let err = service.create(request).await.unwrap_err();
        assert_eq!(err, ApiError::validation(INVALID_USER_DATA));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let service = service().await;
        service.create(create("Ada", "ada@example.com")).await.unwrap();

        let err = service.create(create("Eve", "ada@example.com")).await.unwrap_err();
        assert_eq!(err, ApiError::conflict(USER_EXISTS));
    }

    #[tokio::test]
    async fn test_search_requires_a_filter() {
        let service = service().await;
        let params = SearchUserParams {
            name: Some(String::new()),
            email: None,
        };

        let err = service.search(params).await.unwrap_err();
        assert_eq!(err, ApiError::validation(SEARCH_NEEDS_FILTER));
    }

    #[tokio::test]
    async fn test_update_blank_field_before_existence() {
        let service = service().await;
        let request = UpdateUserRequest {
            name: Some("  ".to_string()),
            email: None,
        };

        let err = service.update(999, request).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service().await;
        let request = UpdateUserRequest {
            name: Some("X".to_string()),
            email: None,
        };

        let err = service.update(999, request).await.unwrap_err();
        assert_eq!(err, ApiError::not_found(USER_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service().await;
        let err = service.delete(1).await.unwrap_err();
        assert_eq!(err, ApiError::not_found(USER_NOT_FOUND));
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert_eq!(parse_user_id("abc").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(parse_user_id("1.5").unwrap_err().code, ErrorCode::NotFound);
    }
}
