//! Plant monitor: soil moisture, temperature, and UV light against their
//! healthy ranges. Dry soil runs the water pump relay for a fixed time; any
//! out-of-range reading turns the LCD backlight red.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{Lcd, MoistureSensor, Relay, TempSensor, UvSensor};

const RAW_TO_INTENSITY_COEFF: f32 = 307.0;
const PLATFORM_VOLTAGE: f32 = 5.0;
const UV_SAMPLES_PER_QUERY: u32 = 100;

// Sensor in air or dry soil reads below this
const MOISTURE_MIN_THRESHOLD: u16 = 300;
const TEMP_MIN_THRESHOLD: i32 = 18;
const TEMP_MAX_THRESHOLD: i32 = 30;
const UV_MIN_THRESHOLD: f32 = 50.0; // mW/m^2
const PUMP_DURATION: Duration = Duration::from_secs(10);

const LIME_GREEN: (u8, u8, u8) = (50, 205, 50);
const RED: (u8, u8, u8) = (255, 0, 0);
const LIGHT_STEEL_BLUE: (u8, u8, u8) = (176, 196, 222);

#[derive(Parser)]
#[command(about = "Monitor plant health and water on dry soil")]
struct Cli {
    /// Analog channel of the moisture sensor
    #[arg(long, default_value_t = 0)]
    moisture_channel: u32,

    /// Analog channel of the temperature sensor
    #[arg(long, default_value_t = 1)]
    temp_channel: u32,

    /// Analog channel of the UV sensor
    #[arg(long, default_value_t = 2)]
    uv_channel: u32,

    /// Digital pin of the pump relay
    #[arg(long, default_value_t = 2)]
    relay_pin: u32,

    /// Seconds between checks
    #[arg(long, default_value_t = 15)]
    interval_s: u64,
}

/// Is any measured parameter outside the healthy range?
fn out_of_range(temperature: i32, intensity: f32) -> bool {
    temperature < TEMP_MIN_THRESHOLD || temperature > TEMP_MAX_THRESHOLD
        || intensity < UV_MIN_THRESHOLD
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let moisture_sensor =
        MoistureSensor::open(&board, cli.moisture_channel).context("open moisture sensor")?;
    let temp_sensor =
        TempSensor::open(&board, cli.temp_channel).context("open temperature sensor")?;
    let uv_sensor =
        UvSensor::open(&board, cli.uv_channel, PLATFORM_VOLTAGE).context("open UV sensor")?;
    let pump = Relay::open(&board, cli.relay_pin).context("open pump relay")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let moisture = moisture_sensor.value()?;
        let temperature = temp_sensor.value()?;
        let volts = uv_sensor.volts(UV_SAMPLES_PER_QUERY).await?;
        let intensity = volts * RAW_TO_INTENSITY_COEFF;

        if moisture < MOISTURE_MIN_THRESHOLD {
            let (r, g, b) = LIGHT_STEEL_BLUE;
            lcd.set_color(r, g, b)?;
            lcd.set_cursor(0, 0)?;
            lcd.write("Dry soil!       ")?;
            lcd.set_cursor(1, 0)?;
            lcd.write("Watering...     ")?;

            pump.on()?;
            shutdown.sleep(PUMP_DURATION).await;
            pump.off()?;
        }

        let (r, g, b) = if out_of_range(temperature, intensity) {
            RED
        } else {
            LIME_GREEN
        };
        lcd.set_color(r, g, b)?;

        lcd.set_cursor(0, 0)?;
        lcd.write(&format!("Temperature: {}  ", temperature))?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&format!("Light: {:.0}   ", intensity))?;

        if !shutdown.sleep(Duration::from_secs(cli.interval_s)).await {
            break;
        }
    }

    pump.off()?;
    lcd.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_range() {
        assert!(!out_of_range(25, 100.0));
        assert!(!out_of_range(TEMP_MIN_THRESHOLD, UV_MIN_THRESHOLD));
        assert!(!out_of_range(TEMP_MAX_THRESHOLD, 100.0));
    }

    #[test]
    fn test_out_of_range_flags() {
        assert!(out_of_range(17, 100.0)); // too cold
        assert!(out_of_range(31, 100.0)); // too hot
        assert!(out_of_range(25, 10.0)); // too dark
    }
}
