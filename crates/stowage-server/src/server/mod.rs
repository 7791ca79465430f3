//! Server-side components of the `stowage` location service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/env configuration and validation.
//! - [`error`] - Mapping of library errors onto HTTP responses.
//! - [`service`] - The axum router and request handlers.
//! - [`telemetry`] - `tracing_subscriber` initialization.

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;
