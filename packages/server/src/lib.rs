//! Game server for two-player m,n,k games.
//!
//! Games are created, joined and played over an HTTP API; every change is
//! pushed to websocket viewers of that game.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{run, serve, serve_with_state};
