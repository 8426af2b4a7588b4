// ==================== USER RECORD STORE ====================
// Persistence for the `users` table. Handlers only talk to the trait;
// the PostgreSQL implementation is injected at startup.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    models::{User, UserPayload, UserRow},
    utils::error::StoreError,
};

/// Persistence contract for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Inserts a new record and returns it with the id assigned by the store.
    async fn insert(&self, user: UserPayload) -> Result<User, StoreError>;

    /// Overwrites the record matching `user.id` with the given values.
    async fn replace(&self, user: &User) -> Result<User, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations are reported as `Constraint`, everything else as `Database`.
fn map_write_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Constraint(db_err.message().to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        sqlx::query_as::<_, UserRow>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::from)
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, user: UserPayload) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(&user.name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn replace(&self, user: &User) -> Result<User, StoreError> {
        let row = UserRow::from(user);

        sqlx::query_as::<_, UserRow>(
            "UPDATE users SET name = $2, email = $3 WHERE id = $1 RETURNING id, name, email",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .map(User::from)
        .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
