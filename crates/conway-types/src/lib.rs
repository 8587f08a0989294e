//! Shared type definitions for the Conway board service.
//!
//! This crate is the single source of truth for the values passed between
//! the simulation core, the storage layer and the HTTP API. API views flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for board identifiers
//! - [`grid`] -- The rectangular boolean [`Grid`] and its wire form
//! - [`structs`] -- Stored board records and API response views

pub mod grid;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use grid::{Grid, GridError};
pub use ids::BoardId;
pub use structs::{BoardRecord, BoardView, FinalStateView, GenerationsView, UploadResponse};
