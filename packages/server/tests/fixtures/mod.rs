//! Test server fixture shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc};

use mnk_server::{ServerConfig, ui::state::AppState, usecase::GameBroadcaster};
use tokio::{net::TcpListener, task::JoinHandle};

/// Server running in the test runtime on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<AppState>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl TestServer {
    /// Start with default settings and eviction disabled.
    pub async fn start() -> Self {
        Self::start_with(ServerConfig {
            game_ttl: None,
            ..ServerConfig::default()
        })
        .await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let state = Arc::new(AppState::new(&config));
        let handle = tokio::spawn(mnk_server::serve_with_state(
            listener,
            state.clone(),
            config,
        ));
        Self {
            addr,
            state,
            handle,
        }
    }

    /// Broadcaster the running server publishes game events on
    pub fn broadcaster(&self) -> &GameBroadcaster {
        &self.state.broadcaster
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, game_id: &str) -> String {
        format!("ws://{}/api/games/{}/ws", self.addr, game_id)
    }

    /// POST /api/games and return the created game view.
    pub async fn create_game(&self, body: serde_json::Value) -> serde_json::Value {
        let response = reqwest::Client::new()
            .post(format!("{}/api/games", self.base_url()))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
        response.json().await.expect("Failed to parse JSON")
    }

    /// POST to a game action endpoint (`accept` / `turn`).
    pub async fn post_action(
        &self,
        game_id: &str,
        action: &str,
        body: serde_json::Value,
    ) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/games/{}/{}", self.base_url(), game_id, action))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
