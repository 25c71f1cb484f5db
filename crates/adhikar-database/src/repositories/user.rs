//! PostgreSQL user repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use adhikar_core::error::{AppError, ErrorKind};
use adhikar_core::result::AppResult;
use adhikar_core::types::UserId;
use adhikar_entity::user::{CreateUser, User};

use crate::store::{ALREADY_INITIALIZED_MESSAGE, DUPLICATE_USER_MESSAGE, UserStore};

const INSERT_USER: &str = "INSERT INTO users \
     (id, username, email, password_hash, full_name, role, specialization, created_at, updated_at) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING *";

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map an insert failure, turning unique-index violations into conflicts.
fn map_insert_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if matches!(
                db_err.constraint(),
                Some("users_username_lower_key") | Some("users_email_lower_key")
            ) =>
        {
            AppError::conflict(DUPLICATE_USER_MESSAGE)
        }
        other => AppError::with_source(ErrorKind::Database, "Failed to create user", other),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(username) = LOWER($1)")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE LOWER(username) = LOWER($1) \
                OR ($2::TEXT IS NOT NULL AND LOWER(email) = LOWER($2)) \
             LIMIT 1",
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to find user by username or email",
                e,
            )
        })
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(UserId::new())
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.full_name)
            .bind(data.role)
            .bind(&data.specialization)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_insert_error)
    }

    async fn create_first(&self, data: CreateUser) -> AppResult<User> {
        let db_err = |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to bootstrap user", e);

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Blocks concurrent inserts until commit; readers are unaffected.
        sqlx::query("LOCK TABLE users IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
        if existing > 0 {
            return Err(AppError::conflict(ALREADY_INITIALIZED_MESSAGE));
        }

        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(INSERT_USER)
            .bind(UserId::new())
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(&data.full_name)
            .bind(data.role)
            .bind(&data.specialization)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit().await.map_err(db_err)?;
        Ok(user)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(total as u64)
    }
}
