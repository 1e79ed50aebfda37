//! Hosting Server Binary
//!
//! Runs the HTTP server for landlord rooms.
//! Players connect over WebSocket and type their moves as text.

use clap::Parser;
use landlord::gameroom::Timeouts;
use landlord::*;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "hosting", about = "Host landlord card rooms over WebSocket")]
struct Args {
    /// Address to listen on. Falls back to BIND_ADDR, then 0.0.0.0:8080.
    #[arg(long)]
    bind: Option<String>,
    /// Seconds to answer the bidding question.
    #[arg(long, default_value_t = BID_TIMEOUT)]
    bid_timeout: u64,
    /// Seconds to play a turn.
    #[arg(long, default_value_t = PLAY_TIMEOUT)]
    play_timeout: u64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    log();
    kys();
    let bind = args
        .bind
        .or_else(|| std::env::var("BIND_ADDR").ok())
        .unwrap_or_else(|| "0.0.0.0:8080".to_string());
    let timeouts = Timeouts {
        bid: Duration::from_secs(args.bid_timeout),
        play: Duration::from_secs(args.play_timeout),
        ..Timeouts::default()
    };
    hosting::Server::run(bind, timeouts).await
}
