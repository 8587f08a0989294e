//! Simulation core for the Conway board service.
//!
//! The simulation modules ([`validator`] and [`engine`]) are pure
//! computation: they validate candidate boards and run the Game of Life
//! over them, with no I/O and no state between calls. [`config`] is the
//! one module that touches the outside world, reading the YAML file and
//! environment overrides at startup.
//!
//! # Modules
//!
//! - [`validator`] -- Admission checks on board size and population
//! - [`engine`] -- Single-step, N-step and run-to-stability transitions
//! - [`config`] -- Typed service configuration loaded from YAML

pub mod config;
pub mod engine;
pub mod validator;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServiceConfig};
pub use engine::{advance, advance_until_stable, step, StabilityError, StableOutcome};
pub use validator::{validate, InvalidBoardError};
