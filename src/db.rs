use crate::{error::StoreError, models::UrlMapping};
use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

/// Persistent, authoritative home of every URL mapping.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Persist a new mapping. A key that already has a row yields
    /// [`StoreError::Duplicate`].
    async fn insert(&self, short_key: &str, original_url: &str) -> Result<(), StoreError>;

    /// Fetch the original URL for an exact key, `None` when no row matches.
    async fn find(&self, short_key: &str) -> Result<Option<String>, StoreError>;

    /// Every stored mapping, ordered by key.
    async fn list(&self) -> Result<Vec<UrlMapping>, StoreError>;
}

#[derive(Clone, Debug)]
pub struct SqliteUrlStore {
    pool: SqlitePool,
}

impl SqliteUrlStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the file if it doesn't exist
    /// yet, and apply the embedded migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = database_url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Run embedded migrations (files in migrations/)
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn insert(&self, short_key: &str, original_url: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO urls (short_key, original_url) VALUES (?1, ?2)")
            .bind(short_key)
            .bind(original_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate(short_key.to_owned())
                } else {
                    StoreError::Database(e)
                }
            })?;

        Ok(())
    }

    async fn find(&self, short_key: &str) -> Result<Option<String>, StoreError> {
        let url: Option<String> =
            sqlx::query_scalar("SELECT original_url FROM urls WHERE short_key = ?1")
                .bind(short_key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(url)
    }

    async fn list(&self) -> Result<Vec<UrlMapping>, StoreError> {
        let rows: Vec<UrlMapping> =
            sqlx::query_as("SELECT short_key, original_url FROM urls ORDER BY short_key")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }
}

/// SQLite reports primary-key and UNIQUE collisions with the same message
/// prefix; either one means the key is taken.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() || db_err.message().contains("UNIQUE constraint failed")
}
