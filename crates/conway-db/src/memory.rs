//! Process-local board storage.
//!
//! Backs the service in tests and in `storage.backend: memory` deployments.
//! Contents are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::Arc;

use conway_types::{BoardId, BoardRecord};
use tokio::sync::RwLock;

/// Boards held in a shared map. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBoardStore {
    boards: Arc<RwLock<BTreeMap<BoardId, BoardRecord>>>,
}

impl MemoryBoardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a copy of a board by id.
    pub async fn load(&self, id: BoardId) -> Option<BoardRecord> {
        self.boards.read().await.get(&id).cloned()
    }

    /// Insert or replace a board.
    pub async fn save(&self, record: &BoardRecord) {
        let mut boards = self.boards.write().await;
        let created_at = boards.get(&record.id).map(|existing| existing.created_at);
        let mut stored = record.clone();
        if let Some(created_at) = created_at {
            stored.created_at = created_at;
        }
        boards.insert(record.id, stored);
        tracing::debug!(board_id = %record.id, generation = record.generation, "Saved board");
    }

    /// Replace a board only if it is still at `expected` generation.
    ///
    /// The check and the write happen under one write lock. Returns
    /// `false`, leaving the store untouched, if the board is missing or has
    /// moved on.
    pub async fn update(&self, record: &BoardRecord, expected: u64) -> bool {
        let mut boards = self.boards.write().await;
        let Some(existing) = boards.get_mut(&record.id) else {
            return false;
        };
        if existing.generation != expected {
            return false;
        }

        let created_at = existing.created_at;
        *existing = record.clone();
        existing.created_at = created_at;
        tracing::debug!(board_id = %record.id, generation = record.generation, "Updated board");
        true
    }

    /// Number of stored boards.
    pub async fn len(&self) -> usize {
        self.boards.read().await.len()
    }

    /// Whether no boards are stored.
    pub async fn is_empty(&self) -> bool {
        self.boards.read().await.is_empty()
    }
}
