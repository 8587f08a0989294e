//! Repository construction from configuration.

use conway_core::config::{StorageBackend, StorageConfig};
use conway_db::{BoardRepository, DbError, MemoryBoardStore, PostgresBoardStore, PostgresConfig, postgres};
use tracing::{info, warn};

/// Build the board repository selected by `config`.
///
/// For `PostgreSQL` this connects the pool and, unless disabled, runs the
/// embedded migrations.
///
/// # Errors
///
/// Returns [`DbError`] if connecting or migrating fails.
pub async fn connect(config: &StorageConfig) -> Result<BoardRepository, DbError> {
    match config.backend {
        StorageBackend::Postgres => {
            let pg_config = PostgresConfig::new(&config.postgres_url)
                .with_max_connections(config.max_connections);
            let pool = postgres::connect(&pg_config).await?;
            if config.run_migrations {
                postgres::run_migrations(&pool).await?;
            } else {
                info!("Skipping database migrations");
            }
            Ok(BoardRepository::from(PostgresBoardStore::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory board storage, boards are lost on restart");
            Ok(BoardRepository::from(MemoryBoardStore::new()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_needs_no_database() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let repository = connect(&config).await.unwrap();
        assert_eq!(repository.backend_name(), "memory");
    }

    #[tokio::test]
    async fn malformed_postgres_url_is_a_config_error() {
        let config = StorageConfig {
            postgres_url: "not a url".to_owned(),
            ..StorageConfig::default()
        };
        assert!(matches!(connect(&config).await, Err(DbError::Config(_))));
    }
}
