//! Terminal client for the onair relay.
//!
//! Connects as an overlay to watch widget events, or as a controller to send
//! commands from a prompt. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval); a rejected token exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin onair-client -- --role overlay
//! cargo run --bin onair-client -- --role control --token secret
//! ```

use clap::Parser;
use onair_client::{Role, run_client};
use onair_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "onair-client")]
#[command(about = "Terminal client for the onair broadcast relay", long_about = None)]
struct Args {
    /// Relay base URL (the role's path is appended)
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080")]
    url: String,

    /// Connect as an overlay (watch) or a controller (send commands)
    #[arg(short = 'r', long, value_enum, default_value = "overlay")]
    role: Role,

    /// Admin token attached to every command
    #[arg(short = 't', long, env = "ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.role, args.token).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
