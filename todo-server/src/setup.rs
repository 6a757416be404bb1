use anyhow::{Context, Result};
use database::{PostgresTodoRepository, SqliteTodoRepository};
use std::path::Path;
use std::sync::Arc;
use todo_api::{TodoHandler, TodoServer};
use todo_core::TodoRepository;
use tracing::info;

use crate::config::Config;

/// Storage technology selected by the database URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else {
            None
        }
    }
}

/// A connected repository, before it is type-erased for the handler
pub enum ConnectedRepository {
    Sqlite(SqliteTodoRepository),
    Postgres(PostgresTodoRepository),
}

impl ConnectedRepository {
    /// Apply pending migrations for whichever backend is connected
    pub async fn migrate(&self) -> Result<()> {
        let migrated = match self {
            Self::Sqlite(repo) => repo.migrate().await,
            Self::Postgres(repo) => repo.migrate().await,
        };
        migrated.context("Failed to run database migrations")
    }

    pub fn into_shared(self) -> Arc<dyn TodoRepository> {
        match self {
            Self::Sqlite(repo) => Arc::new(repo),
            Self::Postgres(repo) => Arc::new(repo),
        }
    }
}

/// Open a connection pool for the configured database
pub async fn connect_database(config: &Config) -> Result<ConnectedRepository> {
    let url = &config.database.url;
    let backend = DatabaseBackend::from_url(url)
        .with_context(|| format!("Unsupported database URL: {url}"))?;
    let settings = config.pool_settings();

    match backend {
        DatabaseBackend::Sqlite => {
            ensure_database_directory(url).context("Failed to create database directory")?;
            info!("Initializing SQLite repository");
            let repo = SqliteTodoRepository::connect(url, settings)
                .await
                .context("Failed to create SQLite repository")?;
            Ok(ConnectedRepository::Sqlite(repo))
        }
        DatabaseBackend::Postgres => {
            info!("Initializing PostgreSQL repository");
            let repo = PostgresTodoRepository::connect(url, settings)
                .await
                .context("Failed to create PostgreSQL repository")?;
            Ok(ConnectedRepository::Postgres(repo))
        }
    }
}

/// Create a todo repository based on the complete configuration
pub async fn create_repository(config: &Config) -> Result<Arc<dyn TodoRepository>> {
    info!("Creating todo repository");
    let connected = connect_database(config).await?;

    if config.database.auto_migrate {
        info!("Running database migrations");
        connected.migrate().await?;
    }

    info!("Todo repository created successfully");
    Ok(connected.into_shared())
}

/// Connect and apply migrations, without starting the server
pub async fn run_migrations(config: &Config) -> Result<()> {
    let connected = connect_database(config).await?;
    connected.migrate().await?;
    info!("Database migrations applied");
    Ok(())
}

/// Create the HTTP server around a repository
pub fn create_server(repository: Arc<dyn TodoRepository>) -> TodoServer {
    let handler = TodoHandler::new(repository, tracing::info_span!("todo_handler"));
    TodoServer::new(handler)
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<TodoServer> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository);

    info!("Application initialized successfully");
    Ok(server)
}

/// Ensure the parent directory of a file-backed SQLite database exists
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        return Ok(());
    }

    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let db_path = Path::new(db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            // Owner-only access on Unix
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            DatabaseBackend::from_url("sqlite://todo.sqlite"),
            Some(DatabaseBackend::Sqlite)
        );
        assert_eq!(
            DatabaseBackend::from_url("sqlite::memory:"),
            Some(DatabaseBackend::Sqlite)
        );
        assert_eq!(
            DatabaseBackend::from_url("postgres://localhost/todo"),
            Some(DatabaseBackend::Postgres)
        );
        assert_eq!(
            DatabaseBackend::from_url("postgresql://localhost/todo"),
            Some(DatabaseBackend::Postgres)
        );
        assert_eq!(DatabaseBackend::from_url("mysql://localhost/todo"), None);
    }

    #[test]
    fn test_ensure_database_directory_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("todo.sqlite");
        let url = format!("sqlite://{}", nested.display());

        ensure_database_directory(&url).unwrap();
        assert!(dir.path().join("data").is_dir());

        ensure_database_directory("sqlite::memory:").unwrap();
        ensure_database_directory("sqlite://todo.sqlite").unwrap();
    }

    #[tokio::test]
    async fn test_create_repository_in_memory() {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();

        let repository = create_repository(&config).await.unwrap();
        let error = repository.get_by_id(uuid::Uuid::nil()).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_create_repository_without_migrations() {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.auto_migrate = false;

        let repository = create_repository(&config).await.unwrap();
        let error = repository.get_by_id(uuid::Uuid::nil()).await.unwrap_err();
        assert!(error.is_persistence());
    }

    #[tokio::test]
    async fn test_unsupported_url_is_rejected() {
        let mut config = Config::default();
        config.database.url = "mysql://localhost/todo".to_string();
        assert!(connect_database(&config).await.is_err());
    }
}
