//! Solar tracker: two light sensors flank a photovoltaic panel on a stepper
//! mount. After a short calibration sweep to find each sensor's ambient
//! average, the panel turns toward whichever side reads brighter.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{Lcd, LightSensor, StepDirection, Stepper};

// Below this raw value on both sides there is nothing to track
const THRESHOLD: u16 = 2;
const STEPS_PER_REV: u32 = 4096;
// 1/32 revolution per adjustment
const TRACK_STEPS: u32 = 128;
const STEPPER_SPEED_RPM: u32 = 7;

#[derive(Parser)]
#[command(about = "Turn a PV panel toward the brighter light sensor")]
struct Cli {
    /// Analog channel of the left light sensor
    #[arg(long, default_value_t = 0)]
    left_channel: u32,

    /// Analog channel of the right light sensor
    #[arg(long, default_value_t = 1)]
    right_channel: u32,

    /// Digital pins of the four stepper coils
    #[arg(long, num_args = 4, default_values_t = [6, 7, 8, 9])]
    stepper_pins: Vec<u32>,
}

/// Which way to turn, if any, given current readings and the calibration
/// averages for each side.
fn track(
    left: u16,
    right: u16,
    left_avg: u16,
    right_avg: u16,
) -> Option<StepDirection> {
    if left < THRESHOLD && right < THRESHOLD {
        // Lightless, nothing to chase
        return None;
    }
    if left < left_avg {
        // Left side darker than usual: turn toward the brighter sensor
        if left < right {
            return Some(StepDirection::Clockwise);
        } else if left > right {
            return Some(StepDirection::CounterClockwise);
        }
    } else if right < right_avg {
        if right < left {
            return Some(StepDirection::CounterClockwise);
        } else if right > left {
            return Some(StepDirection::Clockwise);
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let left = LightSensor::open(&board, cli.left_channel).context("open left light sensor")?;
    let right =
        LightSensor::open(&board, cli.right_channel).context("open right light sensor")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    let pins: [u32; 4] = cli
        .stepper_pins
        .as_slice()
        .try_into()
        .context("exactly four stepper pins required")?;
    let mut stepper = Stepper::open(&board, STEPS_PER_REV, pins).context("open stepper")?;
    stepper.set_speed(STEPPER_SPEED_RPM);

    lcd.set_cursor(0, 0)?;
    lcd.write("Smart PV        ")?;
    lcd.set_cursor(1, 0)?;
    lcd.write("calibrating...  ")?;

    // Calibration: probe two panel positions and average each sensor
    stepper.set_direction(StepDirection::Clockwise);
    stepper.step(STEPS_PER_REV / 8).await?;
    let (l1, r1) = (left.raw()?, right.raw()?);
    tokio::time::sleep(Duration::from_secs(1)).await;

    stepper.set_direction(StepDirection::CounterClockwise);
    stepper.step(STEPS_PER_REV / 4).await?;
    let (l2, r2) = (left.raw()?, right.raw()?);
    tokio::time::sleep(Duration::from_secs(1)).await;

    let left_avg = (l1 + l2) / 2;
    let right_avg = (r1 + r2) / 2;
    tracing::info!(left_avg, right_avg, "calibration done");

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let left_now = left.raw()?;
        let right_now = right.raw()?;

        lcd.set_cursor(0, 0)?;
        lcd.write(&format!("Left:  {}     ", left_now))?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&format!("Right: {}     ", right_now))?;

        match track(left_now, right_now, left_avg, right_avg) {
            Some(direction) => {
                stepper.set_direction(direction);
                stepper.step(TRACK_STEPS).await?;
            }
            None if left_now < THRESHOLD && right_now < THRESHOLD => {
                lcd.set_cursor(0, 0)?;
                lcd.write("No sun          ")?;
            }
            None => {}
        }

        if !shutdown.sleep(Duration::from_secs(1)).await {
            break;
        }
    }

    stepper.release()?;
    lcd.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightless_state_parks() {
        assert_eq!(track(0, 1, 400, 400), None);
    }

    #[test]
    fn test_left_shadow_turns_toward_brighter_side() {
        // Left darker than its average and darker than right: turn clockwise
        assert_eq!(track(100, 500, 400, 400), Some(StepDirection::Clockwise));
        // Left below average but still brighter than right
        assert_eq!(
            track(300, 200, 400, 400),
            Some(StepDirection::CounterClockwise)
        );
    }

    #[test]
    fn test_right_shadow_mirrors() {
        assert_eq!(
            track(500, 100, 400, 400),
            Some(StepDirection::CounterClockwise)
        );
        assert_eq!(track(200, 300, 100, 400), Some(StepDirection::Clockwise));
    }

    #[test]
    fn test_balanced_light_holds_position() {
        assert_eq!(track(500, 500, 400, 400), None);
        assert_eq!(track(400, 400, 400, 400), None);
    }
}
