//! Blink an LED attached to a digital pin once a second.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::Led;

#[derive(Parser)]
#[command(about = "Blink an LED on a digital output pin")]
struct Cli {
    /// Digital pin the LED is on (D13 is the onboard LED on most boards)
    #[arg(long, default_value_t = 13)]
    pin: u32,

    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let led = Led::open(&board, cli.pin).context("open LED pin")?;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        led.toggle()?;
        if !shutdown.sleep(Duration::from_millis(cli.interval_ms)).await {
            break;
        }
    }

    led.off()?;
    Ok(())
}
