use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::AppError;

const TOKEN_KEY: &str = "token";

/// Single durable slot holding the current authentication token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn set(&self, token: &str) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
    async fn get(&self) -> Result<Option<String>, AppError>;
}

pub struct SqliteTokenStore {
    db: SqlitePool,
}

impl SqliteTokenStore {
    /// Opens (or creates) the session database at `database_url` and applies migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // one connection keeps `sqlite::memory:` pointing at a single database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::new(pool).await
    }

    pub async fn new(db: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self { db })
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn set(&self, token: &str) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"
            INSERT INTO session_slot (key, value, stored_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, stored_at = excluded.stored_at
            "#,
        )
        .bind(TOKEN_KEY)
        .bind(token)
        .bind(&now)
        .execute(&self.db)
        .await?;

        debug!("session token stored at {}", now);
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM session_slot WHERE key = ?1")
            .bind(TOKEN_KEY)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, AppError> {
        let token = sqlx::query_scalar::<_, String>("SELECT value FROM session_slot WHERE key = ?1")
            .bind(TOKEN_KEY)
            .fetch_optional(&self.db)
            .await?;
        Ok(token)
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn set(&self, token: &str) -> Result<(), AppError> {
        *self.slot.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.slot.lock().await = None;
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, AppError> {
        Ok(self.slot.lock().await.clone())
    }
}
