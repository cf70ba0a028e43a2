//! Read an analog voltage value from an input pin every second.
//!
//! Any sensor that outputs a variable voltage works here: rotary angle,
//! light, sound, or temperature sensors on the A0 connector.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::hal::Aio;

#[derive(Parser)]
#[command(about = "Read raw values from an analog input channel")]
struct Cli {
    /// Analog channel to read (A0 by default)
    #[arg(long, default_value_t = 0)]
    channel: u32,

    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let pin = Aio::open(&board, cli.channel).context("open analog input")?;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let value = pin.read().context("cannot read analog value")?;
        println!("analog input value {}", value);
        if !shutdown.sleep(Duration::from_millis(cli.interval_ms)).await {
            break;
        }
    }
    Ok(())
}
