//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{accept_game, create_game, get_game, health_check, list_games, play_turn};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
