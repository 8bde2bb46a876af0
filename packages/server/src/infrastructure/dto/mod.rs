//! Data transfer objects exchanged with HTTP and WebSocket clients.

pub mod http;
pub mod websocket;
