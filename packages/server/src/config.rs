//! Runtime configuration of the game server.

use std::time::Duration;

use crate::{domain::GameSettings, infrastructure::pubsub::DEFAULT_SUBSCRIBER_CAPACITY};

/// Default listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Idle games older than this are evicted (one day)
pub const DEFAULT_GAME_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How often the sweeper looks for idle games
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Everything `ui::run` needs to start serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-viewer notification buffer
    pub subscriber_capacity: usize,
    /// `None` disables idle-game eviction
    pub game_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    /// Settings used when a create request leaves them out
    pub default_settings: GameSettings,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            subscriber_capacity: DEFAULT_SUBSCRIBER_CAPACITY,
            game_ttl: Some(DEFAULT_GAME_TTL),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            default_settings: GameSettings::default(),
        }
    }
}
