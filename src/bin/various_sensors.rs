//! Starter kit tour: each button press advances the LCD through the
//! temperature, rotary angle, light, touch, and accelerometer readings.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{
    accel, Accelerometer, Button, Lcd, LightSensor, RotaryAngle, TempSensor, TouchSensor,
};

#[derive(Parser)]
#[command(about = "Cycle sensor readings on the LCD at the push of a button")]
struct Cli {
    /// Analog channel of the rotary angle sensor
    #[arg(long, default_value_t = 0)]
    rotary_channel: u32,

    /// Analog channel of the temperature sensor
    #[arg(long, default_value_t = 1)]
    temp_channel: u32,

    /// Analog channel of the light sensor
    #[arg(long, default_value_t = 2)]
    light_channel: u32,

    /// Digital pin of the button
    #[arg(long, default_value_t = 2)]
    button_pin: u32,

    /// Digital pin of the touch sensor
    #[arg(long, default_value_t = 4)]
    touch_pin: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let temp = TempSensor::open(&board, cli.temp_channel).context("open temperature sensor")?;
    let knob = RotaryAngle::open(&board, cli.rotary_channel).context("open rotary sensor")?;
    let light = LightSensor::open(&board, cli.light_channel).context("open light sensor")?;
    let button = Button::open(&board, cli.button_pin).context("open button")?;
    let touch = TouchSensor::open(&board, cli.touch_pin).context("open touch sensor")?;
    let mut accelerometer =
        Accelerometer::open(&board, accel::DEFAULT_ADDR).context("open accelerometer")?;
    let mut lcd = Lcd::open(&board).context("open LCD")?;

    lcd.set_cursor(0, 0)?;
    lcd.write("welcome to      ")?;
    lcd.set_cursor(1, 0)?;
    lcd.write("Starter Kit!    ")?;
    tokio::time::sleep(Duration::from_secs(3)).await;
    lcd.clear()?;
    lcd.write("Press Button    ")?;

    let mut stop = 0u8;
    let mut shutdown = grovekit::shutdown::ctrl_c();
    while !shutdown.is_shutdown() {
        if button.is_pressed()? {
            let (title, reading) = match stop {
                0 => ("Temperature in".to_string(), format!("celsius: {}", temp.value()?)),
                1 => (
                    "Rotatory Angle".to_string(),
                    format!("in degree: {:.0}", knob.abs_deg()?),
                ),
                2 => ("Light sensor".to_string(), format!("in lux: {}", light.value()?)),
                3 => (
                    "Touch sensor".to_string(),
                    format!("touched: {}", touch.is_touched()?),
                ),
                _ => {
                    let (x, y, z) = accelerometer.acceleration()?;
                    (
                        "Accelerometer".to_string(),
                        format!("{:.1} {:.1} {:.1} g", x, y, z),
                    )
                }
            };
            stop = (stop + 1) % 5;

            lcd.clear()?;
            lcd.set_cursor(0, 0)?;
            lcd.write(&title)?;
            lcd.set_cursor(1, 2)?;
            lcd.write(&reading)?;

            tokio::time::sleep(Duration::from_secs(3)).await;
            lcd.clear()?;
            lcd.write("Press Button    ")?;
        }

        if !shutdown.sleep(Duration::from_millis(100)).await {
            break;
        }
    }

    lcd.clear()?;
    Ok(())
}
