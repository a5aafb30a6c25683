//! Terminal client for the shared countdown timer.
//!
//! Declares its client id on connect, then turns REPL lines into timer commands
//! and prints the events pushed by the server.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sharetimer-client -- --client-id alice
//! cargo run --bin sharetimer-client -- -c bob -u ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;
use sharetimer_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sharetimer-client")]
#[command(about = "Terminal client for the shared countdown timer server", long_about = None)]
struct Args {
    /// Client ID declared to the server (stable across reconnects)
    #[arg(short = 'c', long, default_value_t = uuid::Uuid::new_v4().to_string())]
    client_id: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = sharetimer_client::run_client(args.url, args.client_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
