use sqlx::{postgres::PgPoolOptions, PgConnection, PgPool};
use std::error::Error;

/// Schema steps for the `users` table, applied in order on every start.
///
/// Each step is idempotent. A table left over from an older layout gets
/// its missing columns and the unique email index added.
const USERS_SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) NOT NULL,
        CONSTRAINT users_email_key UNIQUE (email)
    )
    "#,
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS name VARCHAR(100) NOT NULL DEFAULT ''",
    "ALTER TABLE users ADD COLUMN IF NOT EXISTS email VARCHAR(100) NOT NULL DEFAULT ''",
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)",
];

/// Runs every schema step on one connection.
pub async fn apply_schema(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for step in USERS_SCHEMA {
        sqlx::query(step).execute(&mut *conn).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects to PostgreSQL and brings the schema up to date.
    pub async fn new(url: &str) -> Result<Self, Box<dyn Error>> {
        let pool = PgPoolOptions::new().connect(url).await?;

        let database = Self { pool };
        database.ensure_schema().await?;

        Ok(database)
    }

    /// Creates or upgrades the `users` table
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        log::info!("🔧 Ensuring database schema...");

        let mut conn = self.pool.acquire().await?;
        apply_schema(&mut conn).await?;

        log::info!("✅ Database schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Hides the password of a connection URL so it can be logged.
pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let Some(at) = url.rfind('@') else {
        return url.to_string();
    };
    if at < scheme_end {
        return url.to_string();
    }

    let credentials = &url[scheme_end + 3..at];
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}{}:***{}", &url[..scheme_end + 3], user, &url[at..]),
        None => url.to_string(),
    }
}
