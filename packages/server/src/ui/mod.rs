//! HTTP / WebSocket server for the game API.

mod error;
mod handler;
mod runner;
pub mod signal;
pub mod state; // UseCase 層の型をハンドラへ渡すため public

pub use runner::{build_router, run, serve, serve_with_state};
