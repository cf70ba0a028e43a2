//! Count edge events on a digital input pin.
//!
//! A blocking task waits on the GPIO character device for both-edge events
//! and bumps a counter; the main loop prints the counter once a second.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::hal::gpio;

#[derive(Parser)]
#[command(about = "Count rising and falling edges on a digital input pin")]
struct Cli {
    /// Digital pin to watch (D4 connector by default)
    #[arg(long, default_value_t = 4)]
    pin: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let events = gpio::edge_events(&board, cli.pin).context("cannot watch pin for edges")?;

    let counter = Arc::new(AtomicU64::new(0));
    let edges = counter.clone();
    tokio::task::spawn_blocking(move || {
        for event in events {
            match event {
                Ok(_) => {
                    edges.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    tracing::error!("edge event error: {}", e);
                    break;
                }
            }
        }
    });

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        println!("counter value {}", counter.load(Ordering::Relaxed));
        if !shutdown.sleep(Duration::from_secs(1)).await {
            break;
        }
    }
    Ok(())
}
