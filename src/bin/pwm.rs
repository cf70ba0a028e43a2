//! Sweep a PWM output from 0% to 100% duty cycle.
//!
//! Not every digital pin can do PWM; the capable ones are usually marked
//! with a ~ on the board's silk screen.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::hal::Pwm;

const DUTY_STEP: f64 = 0.01;

#[derive(Parser)]
#[command(about = "Ramp a PWM channel's duty cycle from 0 to 100%")]
struct Cli {
    /// PWM channel on the board's PWM controller
    #[arg(long, default_value_t = 0)]
    channel: u32,

    /// Pulse width period in milliseconds
    #[arg(long, default_value_t = 1)]
    period_ms: u64,
}

/// One sweep step: up by 1%, wrapping back to 0 past 100%.
fn advance_duty(duty: f64) -> f64 {
    let next = duty + DUTY_STEP;
    if next > 1.0 {
        0.0
    } else {
        next
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let mut pwm = Pwm::open(&board, cli.channel).context("open PWM channel")?;
    pwm.set_period_ms(cli.period_ms)?;
    pwm.enable(true).context("cannot enable PWM")?;

    // A full 0..100% sweep takes about 5 seconds
    let mut duty = 0.0;
    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        pwm.write(duty).context("cannot write duty cycle")?;
        duty = advance_duty(duty);
        if !shutdown.sleep(Duration::from_millis(50)).await {
            break;
        }
    }

    pwm.write(0.0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_wraps_past_full() {
        assert_eq!(advance_duty(1.0), 0.0);
        assert!((advance_duty(0.5) - 0.51).abs() < 1e-9);
    }

    #[test]
    fn test_sweep_stays_in_range_and_wraps() {
        let mut duty = 0.0;
        let mut wrapped = false;
        for _ in 0..205 {
            duty = advance_duty(duty);
            assert!((0.0..=1.0 + 1e-9).contains(&duty));
            if duty == 0.0 {
                wrapped = true;
            }
        }
        assert!(wrapped);
    }
}
