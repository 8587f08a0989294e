//! HTTP API for the Conway board service.
//!
//! This crate provides an Axum HTTP server over [`BoardService`], which
//! loads boards from a [`BoardRepository`](conway_db::BoardRepository),
//! runs them through `conway_core`, and saves the results.
//!
//! # Architecture
//!
//! ```text
//! request --> handlers --> BoardService --> conway_core (validate / step)
//!                              |
//!                              +--> BoardRepository (load / save)
//! ```
//!
//! Failures are mapped to status codes in [`error`]: 404 for unknown
//! boards, 400 for rejected input, 409 when concurrent writers keep
//! beating a transition, 422 when no still life is reached.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod service;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use service::{BoardService, FinalState, ServiceError};
pub use state::AppState;
