//! Shared application state for the HTTP API.

use conway_core::config::LimitsConfig;
use conway_db::{BoardRepository, MemoryBoardStore};

use crate::service::BoardService;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Board operations backed by the configured repository.
    pub service: BoardService,
}

impl AppState {
    /// Create application state around a service.
    pub const fn new(service: BoardService) -> Self {
        Self { service }
    }

    /// State backed by a fresh in-memory store and default limits.
    pub fn in_memory() -> Self {
        Self::new(BoardService::new(
            BoardRepository::from(MemoryBoardStore::new()),
            LimitsConfig::default(),
        ))
    }
}
