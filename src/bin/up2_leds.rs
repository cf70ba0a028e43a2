//! Sweep the UP Squared onboard color LEDs through their brightness range.

use std::time::Duration;

use anyhow::Context;
use grovekit::board::{Board, Platform};
use grovekit::hal::OnboardLed;

const LED_NAMES: [&str; 4] = ["red", "green", "yellow", "blue"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();

    let board = Board::open();
    if board.platform() != Platform::UpSquared {
        tracing::warn!(
            "This sample is meant for the UP Squared board; \
             running it elsewhere will likely require code changes"
        );
    }

    let mut leds = Vec::new();
    for name in LED_NAMES {
        leds.push(OnboardLed::open(name).with_context(|| format!("open onboard LED {}", name))?);
    }

    let mut shutdown = grovekit::shutdown::ctrl_c();
    'outer: loop {
        for led in &leds {
            let max = led.max_brightness();
            // Ramp up then back down
            for step in (0..=max).chain((0..max).rev()) {
                led.set_brightness(step)?;
                if !shutdown.sleep(Duration::from_millis(5)).await {
                    break 'outer;
                }
            }
        }
    }

    // Leave the board dark on exit
    for led in &leds {
        led.off()?;
    }
    Ok(())
}
