//! Data layer for the Conway board service.
//!
//! The service persists each board as a grid plus a generation counter.
//! This crate provides that persistence behind [`BoardRepository`], which
//! dispatches to one of two backends:
//!
//! ```text
//! BoardService
//!     |
//!     +-- load / save --> BoardRepository
//!                            |-- PostgresBoardStore  (table `boards`, JSONB grid)
//!                            +-- MemoryBoardStore    (tests, ephemeral runs)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool setup and embedded migrations
//! - [`board_store`] -- `boards` table queries
//! - [`memory`] -- In-process store
//! - [`repository`] -- Backend dispatch
//! - [`error`] -- Shared error types

pub mod board_store;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

// Re-export primary types for convenience.
pub use board_store::{BoardRow, PostgresBoardStore};
pub use error::DbError;
pub use memory::MemoryBoardStore;
pub use postgres::PostgresConfig;
pub use repository::BoardRepository;
