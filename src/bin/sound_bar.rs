//! Sound level meter: average a window of microphone samples, smooth it with
//! a running average, and show the result on the 10-segment LED bar.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::ledbar::level_for;
use grovekit::devices::{microphone, LedBar, Microphone};

const SOUND_MIN: u16 = 50;
const SOUND_MAX: u16 = 200;
const SAMPLE_WINDOW: usize = 50;
const SAMPLE_INTERVAL: Duration = Duration::from_micros(1);
const AVERAGED_OVER: u16 = 10;

#[derive(Parser)]
#[command(about = "Show the ambient sound level on the LED bar")]
struct Cli {
    /// Analog channel of the microphone
    #[arg(long, default_value_t = 0)]
    mic_channel: u32,

    /// Digital pin of the LED bar data line
    #[arg(long, default_value_t = 2)]
    data_pin: u32,

    /// Digital pin of the LED bar clock line
    #[arg(long, default_value_t = 3)]
    clock_pin: u32,
}

/// Smooth a new window average into the running average.
fn smooth(running: u16, window_avg: u16) -> u16 {
    // Same first-order filter the original threshold context used
    if running == 0 {
        return window_avg;
    }
    let running = running as i32;
    let delta = window_avg as i32 - running;
    (running + delta / AVERAGED_OVER as i32) as u16
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let mic = Microphone::open(&board, cli.mic_channel).context("open microphone")?;
    let mut bar =
        LedBar::open(&board, cli.data_pin, cli.clock_pin).context("open LED bar")?;

    let mut running_average = 0u16;
    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let samples = mic.sampled_window(SAMPLE_INTERVAL, SAMPLE_WINDOW).await?;
        let window_avg = microphone::average(&samples);
        running_average = smooth(running_average, window_avg);

        let level = level_for(running_average, SOUND_MIN, SOUND_MAX);
        bar.set_level(level)?;
        println!("sound level {} -> bar {}", running_average, level);

        if !shutdown.sleep(Duration::from_millis(100)).await {
            break;
        }
    }

    bar.set_level(0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_converges() {
        let mut running = 0u16;
        for _ in 0..100 {
            running = smooth(running, 150);
        }
        assert!((140..=150).contains(&running), "got {}", running);
    }

    #[test]
    fn test_first_sample_seeds_average() {
        assert_eq!(smooth(0, 120), 120);
    }

    #[test]
    fn test_quiet_to_loud_moves_up() {
        let s = smooth(60, 180);
        assert!(s > 60 && s < 180);
    }
}
