use crate::common::{
    describe_sqlx_error, map_fetch_error, map_save_error, parse_stored_id, PoolSettings,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
    Row, SqlitePool,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, TodoError},
    models::TodoItem,
    repository::TodoRepository,
};
use uuid::Uuid;

/// SQLite implementation of the TodoRepository trait
///
/// Identifiers are stored as canonical hyphenated text so rows stay readable
/// from the `sqlite3` shell.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with default pool settings
    ///
    /// # Arguments
    /// * `database_url` - `sqlite://path/to/file.db`, a bare file path, or
    ///   `sqlite::memory:`
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new("sqlite::memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite:///tmp/todo.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::connect(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite repository with explicit pool settings
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self> {
        let pool = if is_in_memory(database_url) {
            // Every connection to :memory: is a separate database, so the
            // pool is pinned to one connection that never gets recycled.
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(open_error)?
                .journal_mode(SqliteJournalMode::Memory)
                .busy_timeout(Duration::from_secs(5));

            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(options)
                .await
                .map_err(open_error)?
        } else {
            let options = SqliteConnectOptions::new()
                .filename(file_path(database_url))
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5));

            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(options)
                .await
                .map_err(open_error)?
        };

        tracing::info!(database_url = %database_url, "SQLite connection pool ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply all pending migrations from `migrations/sqlite`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::persistence("migration failed", e))?;

        tracing::info!("SQLite migrations completed successfully");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, todo: &TodoItem) -> Result<()> {
        sqlx::query("INSERT INTO todo_items (id, description, due_date) VALUES (?, ?, ?)")
            .bind(todo.id.to_string())
            .bind(&todo.description)
            .bind(todo.due_date)
            .execute(&self.pool)
            .await
            .map_err(map_save_error)?;

        tracing::debug!(id = %todo.id, "Todo item inserted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<TodoItem> {
        let row = sqlx::query("SELECT id, description, due_date FROM todo_items WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(map_fetch_error)?;

        row_to_todo(&row)
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<TodoItem> {
    let raw_id: String = row.try_get("id").map_err(map_fetch_error)?;
    let description: String = row.try_get("description").map_err(map_fetch_error)?;
    let due_date: DateTime<Utc> = row.try_get("due_date").map_err(map_fetch_error)?;

    Ok(TodoItem::with_id(
        parse_stored_id(&raw_id)?,
        description,
        due_date,
    ))
}

fn open_error(err: sqlx::Error) -> TodoError {
    TodoError::persistence("failed to open database", describe_sqlx_error(&err))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn file_path(database_url: &str) -> &str {
    database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
}
