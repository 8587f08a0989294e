//! Backend-agnostic board repository.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible.

use conway_types::{BoardId, BoardRecord};

use crate::board_store::PostgresBoardStore;
use crate::error::DbError;
use crate::memory::MemoryBoardStore;

/// A board store the service can load from and save to.
#[derive(Debug, Clone)]
pub enum BoardRepository {
    /// Boards in `PostgreSQL`.
    Postgres(PostgresBoardStore),
    /// Boards in process memory.
    Memory(MemoryBoardStore),
}

impl BoardRepository {
    /// Short backend name for logs.
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Fetch a board by id, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend fails.
    pub async fn load(&self, id: BoardId) -> Result<Option<BoardRecord>, DbError> {
        match self {
            Self::Postgres(store) => store.load(id).await,
            Self::Memory(store) => Ok(store.load(id).await),
        }
    }

    /// Insert or replace a board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the backend fails.
    pub async fn save(&self, record: &BoardRecord) -> Result<(), DbError> {
        match self {
            Self::Postgres(store) => store.save(record).await,
            Self::Memory(store) => {
                store.save(record).await;
                Ok(())
            }
        }
    }

    /// Replace a board that is still at generation `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Conflict`] if the board was written since it was
    /// loaded, or [`DbError`] if the backend fails.
    pub async fn update(&self, record: &BoardRecord, expected: u64) -> Result<(), DbError> {
        let applied = match self {
            Self::Postgres(store) => store.update(record, expected).await?,
            Self::Memory(store) => store.update(record, expected).await,
        };
        if applied {
            Ok(())
        } else {
            Err(DbError::Conflict {
                id: record.id,
                expected,
            })
        }
    }
}

impl From<PostgresBoardStore> for BoardRepository {
    fn from(store: PostgresBoardStore) -> Self {
        Self::Postgres(store)
    }
}

impl From<MemoryBoardStore> for BoardRepository {
    fn from(store: MemoryBoardStore) -> Self {
        Self::Memory(store)
    }
}
