//! Show the temperature on the RGB LCD, tracking the minimum and maximum
//! seen. The backlight fades from blue (cold) to red (warm) across the
//! configured comfort range; pressing the button resets min/max; the LED
//! blips for 50 ms each time a sample is taken.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{Button, Lcd, Led, TempSensor};

// The temperature range in degrees Celsius; adapt to your room temperature
// for a nicer effect.
const RANGE_MIN: i32 = 18;
const RANGE_MAX: i32 = 31;

#[derive(Parser)]
#[command(about = "Display temperature and min/max on the RGB LCD")]
struct Cli {
    /// Analog channel of the temperature sensor
    #[arg(long, default_value_t = 0)]
    temp_channel: u32,

    /// Digital pin of the reset button
    #[arg(long, default_value_t = 4)]
    button_pin: u32,

    /// Digital pin of the sample indicator LED
    #[arg(long, default_value_t = 3)]
    led_pin: u32,
}

/// Backlight color for a temperature: blue at the bottom of the range fading
/// to red at the top.
fn fade_color(temperature: i32) -> (u8, u8, u8) {
    let fade = if temperature <= RANGE_MIN {
        0.0
    } else if temperature >= RANGE_MAX {
        1.0
    } else {
        (temperature - RANGE_MIN) as f32 / (RANGE_MAX - RANGE_MIN) as f32
    };
    let r = (255.0 * fade) as u8;
    let g = (64.0 * fade) as u8;
    let b = (255.0 * (1.0 - fade)) as u8;
    (r, g, b)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let sensor = TempSensor::open(&board, cli.temp_channel).context("open temperature sensor")?;
    let button = Button::open(&board, cli.button_pin).context("open button")?;
    let led = Led::open(&board, cli.led_pin).context("open LED")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    // Replaced by the first sample
    let mut min_temperature = i32::MAX;
    let mut max_temperature = i32::MIN;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let temperature = sensor.value().context("cannot read temperature")?;

        if button.is_pressed()? {
            min_temperature = temperature;
            max_temperature = temperature;
        } else {
            min_temperature = min_temperature.min(temperature);
            max_temperature = max_temperature.max(temperature);
        }

        lcd.set_cursor(0, 0)?;
        lcd.write(&format!("Temp {}    ", temperature))?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&format!(
            "Min {} Max {}    ",
            min_temperature, max_temperature
        ))?;

        let (r, g, b) = fade_color(temperature);
        lcd.set_color(r, g, b)?;

        // Show the sample was actually taken
        led.blink(Duration::from_millis(50)).await?;

        if !shutdown.sleep(Duration::from_secs(1)).await {
            break;
        }
    }

    lcd.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        // At or below the range floor: pure blue
        assert_eq!(fade_color(RANGE_MIN), (0, 0, 255));
        assert_eq!(fade_color(-5), (0, 0, 255));
        // At or above the ceiling: full red component, no blue
        assert_eq!(fade_color(RANGE_MAX), (255, 64, 0));
        assert_eq!(fade_color(40), (255, 64, 0));
    }

    #[test]
    fn test_fade_midpoint_mixes() {
        let (r, _g, b) = fade_color((RANGE_MIN + RANGE_MAX) / 2);
        assert!(r > 0 && b > 0);
    }
}
