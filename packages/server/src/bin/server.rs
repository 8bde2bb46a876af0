//! m,n,k game server.
//!
//! Serves the game HTTP API and websocket streams of live game state.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mnk-server -- --port 8080 --width 15 --height 15 --win-run 5
//! ```

use std::time::Duration;

use clap::Parser;
use mnk_server::{
    ServerConfig,
    domain::{GameSettings, WinRule},
};
use mnk_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "mnk-server", version, about = "Two-player m,n,k game server")]
struct ServerArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Log level for this server (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Notifications buffered per websocket viewer before dropping
    #[arg(long, default_value_t = 10)]
    subscriber_capacity: usize,

    /// Evict games idle for this many seconds (0 disables eviction)
    #[arg(long, default_value_t = 86_400)]
    game_ttl_secs: u64,

    /// Seconds between idle-game sweeps
    #[arg(long, default_value_t = 60)]
    sweep_interval_secs: u64,

    /// Default board width
    #[arg(long, default_value_t = 3)]
    width: usize,

    /// Default board height
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Default run length needed to win
    #[arg(long, default_value_t = 3)]
    win_run: usize,

    /// Count diagonal runs by default
    #[arg(long)]
    diagonals: bool,
}

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let win_rule = if args.diagonals {
        WinRule::WithDiagonals
    } else {
        WinRule::Orthogonal
    };
    let default_settings = match GameSettings::new(args.width, args.height, args.win_run, win_rule)
    {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid default game settings: {}", e);
            std::process::exit(2);
        }
    };

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        subscriber_capacity: args.subscriber_capacity,
        game_ttl: (args.game_ttl_secs > 0).then(|| Duration::from_secs(args.game_ttl_secs)),
        sweep_interval: Duration::from_secs(args.sweep_interval_secs),
        default_settings,
    };

    // Run the server
    if let Err(e) = mnk_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
