//! # User Repository
//!
//! Database operations for users.
//!
//! ## Key Operations
//! - CRUD by integer id
//! - Exact-match search on name AND email
//! - Duplicate emails surface as `DbError::UniqueViolation`
//!
//! ## Partial Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE users                                                           │
//! │  SET name  = COALESCE(?1, name),    ← NULL keeps the stored value      │
//! │      email = COALESCE(?2, email)                                        │
//! │  WHERE id = ?3                                                          │
//! │       │                                                                 │
//! │       ├── rows_affected == 0 ──► NotFound                              │
//! │       └── otherwise ──► re-read the row and return it                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use swapdesk_core::{NewUser, User, UserChanges, UserQuery};

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// let user = repo.insert(&NewUser::new("Ada", "ada@example.com")?).await?;
/// let same = repo.get_by_id(user.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists every user ordered by id.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Gets a user by id.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No such id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Returns the lowest-id user matching every filter in `query`.
    ///
    /// Matching is exact. An absent filter matches any value.
    pub async fn find(&self, query: &UserQuery) -> DbResult<Option<User>> {
        debug!(name = ?query.name(), email = ?query.email(), "Searching users");

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE (?1 IS NULL OR name = ?1)
              AND (?2 IS NULL OR email = ?2)
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(query.name())
        .bind(query.email())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user and returns it with its assigned id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the email is already taken; nothing
    ///   is written
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        debug!(email = %new_user.email(), "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email)
            VALUES (?1, ?2)
            "#,
        )
        .bind(new_user.name())
        .bind(new_user.email())
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, new_user.email()))?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: new_user.name().to_string(),
            email: new_user.email().to_string(),
        })
    }

    /// Applies a partial update and returns the merged record.
    ///
    /// Empty `changes` leave the row as it is and still return it.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no user with this id
    /// * `DbError::UniqueViolation` - the new email belongs to another user
    pub async fn update(&self, id: i64, changes: &UserChanges) -> DbResult<User> {
        debug!(id = %id, name = ?changes.name(), email = ?changes.email(), "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                name = COALESCE(?1, name),
                email = COALESCE(?2, email)
            WHERE id = ?3
            "#,
        )
        .bind(changes.name())
        .bind(changes.email())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, changes.email().unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        // Deleted between the two statements
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Deletes a user.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no user with this id
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Counts users (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Attaches the offending email to a unique violation.
fn duplicate_email(err: sqlx::Error, email: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, email),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
