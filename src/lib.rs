//! Library crate for color-repeat, exposing modules for binaries and integration tests.

/// Rules and host timings loaded at startup.
pub mod config;
/// Score persistence.
pub mod dao;
/// Wire types for REST and SSE.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Axum route trees.
pub mod routes;
/// Host orchestration around the game session.
pub mod services;
/// Game core and shared application state.
pub mod state;
