//! Sunburn warning station: UV intensity and temperature on the LCD, with
//! the backlight colored by UV index and a buzzer alarm when the index or
//! the temperature climbs into the danger zone.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{buzzer::notes, Buzzer, Lcd, TempSensor, UvSensor};

// GUVA-S12D output voltage to mW/m^2
const RAW_TO_INTENSITY_COEFF: f32 = 307.0;
// mW/m^2 per UV index step
const INTENSITY_TO_INDEX_COEFF: f32 = 200.0;

const PLATFORM_VOLTAGE: f32 = 5.0;
const UV_SAMPLES_PER_QUERY: u32 = 100;
const UV_INDEX_THRESHOLD: i32 = 8;
const TEMPERATURE_THRESHOLD: i32 = 30;

const LIME_GREEN: (u8, u8, u8) = (50, 205, 50);
const YELLOW: (u8, u8, u8) = (255, 255, 0);
const ORANGE: (u8, u8, u8) = (255, 165, 0);
const RED: (u8, u8, u8) = (255, 0, 0);
const VIOLET: (u8, u8, u8) = (238, 130, 238);

#[derive(Parser)]
#[command(about = "Warn about sunburn risk from UV and temperature readings")]
struct Cli {
    /// Analog channel of the UV sensor
    #[arg(long, default_value_t = 0)]
    uv_channel: u32,

    /// Analog channel of the temperature sensor
    #[arg(long, default_value_t = 1)]
    temp_channel: u32,

    /// PWM channel of the buzzer
    #[arg(long, default_value_t = 0)]
    buzzer_channel: u32,
}

/// Second LCD row for a UV reading: the raw numbers at low indices, a
/// time-to-sunburn reminder above that.
fn uv_row(intensity: f32, index: i32) -> String {
    if index <= 4 {
        format!("UV: {:.0}({})    ", intensity, index)
    } else if index <= 7 {
        "Sunburn in 30 m".to_string()
    } else if index <= 9 {
        "Sunburn in 20 m".to_string()
    } else {
        "Sunburn in 10 m".to_string()
    }
}

/// Backlight color for a UV index, following the WHO index color scale.
fn uv_color(index: i32) -> (u8, u8, u8) {
    if index <= 2 {
        LIME_GREEN
    } else if index <= 5 {
        YELLOW
    } else if index <= 7 {
        ORANGE
    } else if index <= 10 {
        RED
    } else {
        VIOLET
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let uv_sensor =
        UvSensor::open(&board, cli.uv_channel, PLATFORM_VOLTAGE).context("open UV sensor")?;
    let temp_sensor =
        TempSensor::open(&board, cli.temp_channel).context("open temperature sensor")?;
    let mut buzzer = Buzzer::open(&board, cli.buzzer_channel).context("open buzzer")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    buzzer.stop()?;

    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        let volts = uv_sensor.volts(UV_SAMPLES_PER_QUERY).await?;
        let temperature = temp_sensor.value()?;

        // See https://en.wikipedia.org/wiki/Ultraviolet_index
        let intensity = volts * RAW_TO_INTENSITY_COEFF;
        let index = (intensity / INTENSITY_TO_INDEX_COEFF) as i32;

        lcd.set_cursor(0, 0)?;
        lcd.write(&format!("Temp: {}    ", temperature))?;
        lcd.set_cursor(1, 0)?;
        lcd.write(&uv_row(intensity, index))?;

        let (r, g, b) = uv_color(index);
        lcd.set_color(r, g, b)?;

        if index >= UV_INDEX_THRESHOLD || temperature > TEMPERATURE_THRESHOLD {
            buzzer.play(notes::DO, Duration::from_secs(1)).await?;
        }

        if !shutdown.sleep(Duration::from_secs(1)).await {
            break;
        }
    }

    buzzer.stop()?;
    lcd.clear()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_strings_per_bucket() {
        assert!(uv_row(400.0, 2).starts_with("UV: 400(2)"));
        assert!(uv_row(850.0, 4).starts_with("UV: 850(4)"));
        assert_eq!(uv_row(1100.0, 5), "Sunburn in 30 m");
        assert_eq!(uv_row(1500.0, 7), "Sunburn in 30 m");
        assert_eq!(uv_row(1700.0, 8), "Sunburn in 20 m");
        assert_eq!(uv_row(1900.0, 9), "Sunburn in 20 m");
        assert_eq!(uv_row(2100.0, 10), "Sunburn in 10 m");
        assert_eq!(uv_row(3000.0, 14), "Sunburn in 10 m");
    }

    #[test]
    fn test_index_color_scale() {
        assert_eq!(uv_color(0), LIME_GREEN);
        assert_eq!(uv_color(2), LIME_GREEN);
        assert_eq!(uv_color(3), YELLOW);
        assert_eq!(uv_color(5), YELLOW);
        assert_eq!(uv_color(6), ORANGE);
        assert_eq!(uv_color(7), ORANGE);
        // Red covers the whole 8-10 "very high" band; extreme starts at 11
        assert_eq!(uv_color(8), RED);
        assert_eq!(uv_color(10), RED);
        assert_eq!(uv_color(11), VIOLET);
        assert_eq!(uv_color(12), VIOLET);
    }
}
