//! Write alternating values to a digital output pin.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::hal::Gpio;

#[derive(Parser)]
#[command(about = "Drive a digital output pin high and low")]
struct Cli {
    /// Digital pin to drive (D4 connector by default)
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
    let pin = Gpio::output(&board, cli.pin).context("set digital pin as output")?;

    let mut value = 0u8;
    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        pin.write(value).context("cannot write pin value")?;
        println!("writing {}", value);
        value ^= 1;
        if !shutdown.sleep(Duration::from_millis(cli.interval_ms)).await {
            break;
        }
    }
    Ok(())
}
