//! Read a digital input pin every second and print its value.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::hal::Gpio;

#[derive(Parser)]
#[command(about = "Read values from a digital input pin")]
struct Cli {
    /// Digital pin to read (D4 connector by default)
    #[arg(long, default_value_t = 4)]
    pin: u32,

    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let pin = Gpio::input(&board, cli.pin).context("set digital pin as input")?;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let value = pin.read().context("cannot read pin value")?;
        println!("value {}", value);
        if !shutdown.sleep(Duration::from_millis(cli.interval_ms)).await {
            break;
        }
    }
    Ok(())
}
