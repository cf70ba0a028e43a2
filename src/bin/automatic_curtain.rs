//! Automatic curtain: pick a lux target with the rotary knob, confirm with
//! the button, then keep the room near the target by drawing or opening a
//! stepper-driven curtain. A few lux of hysteresis keeps small fluctuations
//! from rattling the motor, and the position is clamped so the curtain never
//! runs past fully open or fully closed.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{Button, Lcd, LightSensor, RotaryAngle, StepDirection, Stepper};

const STEPPER_SPEED_RPM: u32 = 5;
const STEPS_FULL_REVOLUTION: u32 = 4096;
// Two full revolutions draw the curtain completely
const MAX_STEPS: u32 = 2 * STEPS_FULL_REVOLUTION;
// Quarter revolution per activation
const ACTIVATION_STEPS: u32 = 1024;
// Lux hysteresis around the target
const THRESHOLD: i32 = 5;

#[derive(Parser)]
#[command(about = "Keep room brightness near a target by moving a curtain")]
struct Cli {
    /// Analog channel of the rotary angle sensor
    #[arg(long, default_value_t = 1)]
    rotary_channel: u32,

    /// Analog channel of the light sensor
    #[arg(long, default_value_t = 2)]
    light_channel: u32,

    /// Digital pin of the confirm button
    #[arg(long, default_value_t = 4)]
    button_pin: u32,

    /// Digital pins of the four stepper coils
    #[arg(long, num_args = 4, default_values_t = [6, 7, 8, 9])]
    stepper_pins: Vec<u32>,
}

/// What the curtain should do for a lux reading: draw when too bright, open
/// when too dark, nothing inside the hysteresis band or at the travel limit.
fn plan_move(position: u32, lux: i32, target: i32) -> Option<(StepDirection, u32)> {
    if lux > target + THRESHOLD && position < MAX_STEPS {
        let steps = ACTIVATION_STEPS.min(MAX_STEPS - position);
        Some((StepDirection::Clockwise, steps))
    } else if lux < target - THRESHOLD && position > 0 {
        let steps = ACTIVATION_STEPS.min(position);
        Some((StepDirection::CounterClockwise, steps))
    } else {
        None
    }
}

/// Let the user dial in a lux target with the knob, confirmed by the button.
async fn setup_lux_target(
    rotary: &RotaryAngle,
    button: &Button,
    lcd: &mut Lcd,
    shutdown: &mut grovekit::shutdown::Shutdown,
) -> anyhow::Result<i32> {
    lcd.cursor_blink_on()?;
    let mut lux_target;
    loop {
        // 0..300 degrees maps to a 0..60 lux target
        lux_target = (rotary.abs_deg()? / 5.0) as i32;

        lcd.set_cursor(0, 0)?;
        lcd.write("Btn to confirm  ")?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&format!("Lux Target: {}   ", lux_target))?;

        if button.is_pressed()? {
            break;
        }
        if !shutdown.sleep(Duration::from_millis(250)).await {
            break;
        }
    }
    lcd.cursor_blink_off()?;
    Ok(lux_target)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let rotary = RotaryAngle::open(&board, cli.rotary_channel).context("open rotary sensor")?;
    let light = LightSensor::open(&board, cli.light_channel).context("open light sensor")?;
    let button = Button::open(&board, cli.button_pin).context("open button")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    let pins: [u32; 4] = cli
        .stepper_pins
        .as_slice()
        .try_into()
        .context("exactly four stepper pins required")?;
    let mut stepper =
        Stepper::open(&board, STEPS_FULL_REVOLUTION, pins).context("open stepper")?;
    stepper.set_speed(STEPPER_SPEED_RPM);

    let mut shutdown = grovekit::shutdown::ctrl_c();
    let lux_target = setup_lux_target(&rotary, &button, &mut lcd, &mut shutdown).await?;

    // Curtain starts fully open
    let mut position: u32 = 0;

    while !shutdown.is_shutdown() {
        let lux = light.value()?;

        lcd.set_cursor(0, 0)?;
        lcd.write(&format!("Lux Current: {}   ", lux))?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&format!("Lux Target:  {}   ", lux_target))?;

        if let Some((direction, steps)) = plan_move(position, lux, lux_target) {
            stepper.set_direction(direction);
            stepper.step(steps).await?;
            position = match direction {
                StepDirection::Clockwise => position + steps,
                StepDirection::CounterClockwise => position - steps,
            };
            tracing::debug!(position, "curtain moved");
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
    fn test_hysteresis_band_is_quiet() {
        let target = 30;
        for lux in (target - THRESHOLD)..=(target + THRESHOLD) {
            assert_eq!(plan_move(1024, lux, target), None);
        }
    }

    #[test]
    fn test_bright_draws_curtain() {
        assert_eq!(
            plan_move(0, 50, 30),
            Some((StepDirection::Clockwise, ACTIVATION_STEPS))
        );
    }

    #[test]
    fn test_dark_opens_curtain() {
        assert_eq!(
            plan_move(2048, 10, 30),
            Some((StepDirection::CounterClockwise, ACTIVATION_STEPS))
        );
    }

    #[test]
    fn test_position_clamps_at_travel_limits() {
        // Fully closed: no further draw
        assert_eq!(plan_move(MAX_STEPS, 100, 30), None);
        // Fully open: no further opening
        assert_eq!(plan_move(0, 0, 30), None);
        // Near the limit only the remaining steps are taken
        assert_eq!(
            plan_move(MAX_STEPS - 100, 100, 30),
            Some((StepDirection::Clockwise, 100))
        );
        assert_eq!(
            plan_move(100, 0, 30),
            Some((StepDirection::CounterClockwise, 100))
        );
    }
}
