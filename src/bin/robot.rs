//! Rover controller built from the robotics kit: compass heading and battery
//! voltage on the shared LCD, four IR distance interrupters watching for
//! collisions, and drive commands read from stdin.
//!
//! Commands are tuples of the form `<fwd|left|right|rev> <0-255>`, plus a
//! bare `stop`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use grovekit::board::Board;
use grovekit::devices::{
    compass, motors, Compass, DistanceInterrupter, Lcd, MotorDirection, MotorDriver,
    VoltageDivider,
};
use grovekit::shutdown::Shutdown;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

const BATTERY_THRESHOLD_VOLTS: f32 = 7.2;
const HEADING_BANNER: &str = "--|--N--|--|--E--|--|--S--|--|--W--|--|--N--|--";

#[derive(Parser)]
#[command(about = "Drive a 4WD rover with collision watch and status display")]
struct Cli {
    /// Analog channel of the battery voltage divider
    #[arg(long, default_value_t = 0)]
    battery_channel: u32,

    /// Digital pins of the front-left, front-right, rear-left, rear-right
    /// IR distance interrupters
    #[arg(long, num_args = 4, default_values_t = [2, 4, 6, 8])]
    ir_pins: Vec<u32>,
}

/// Which corners currently see an obstacle.
#[derive(Default)]
struct Blocked {
    fl: AtomicBool,
    fr: AtomicBool,
    rl: AtomicBool,
    rr: AtomicBool,
}

impl Blocked {
    fn any(&self) -> bool {
        self.fl.load(Ordering::Relaxed)
            || self.fr.load(Ordering::Relaxed)
            || self.rl.load(Ordering::Relaxed)
            || self.rr.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Forward,
    Left,
    Right,
    Reverse,
    Stop,
}

/// Parse a drive command line. `stop` takes no speed; everything else wants
/// a speed in 0-255.
fn parse_command(line: &str) -> Result<(Command, u8), String> {
    let mut parts = line.split_whitespace();
    let word = parts.next().unwrap_or("");
    if word.is_empty() || word == "stop" {
        return Ok((Command::Stop, 0));
    }
    let command = match word {
        "fwd" => Command::Forward,
        "left" => Command::Left,
        "right" => Command::Right,
        "rev" => Command::Reverse,
        other => return Err(format!("unknown command {:?}", other)),
    };
    let speed = parts
        .next()
        .ok_or_else(|| "missing speed".to_string())?
        .parse::<u16>()
        .map_err(|_| "Bad input! Please check your command and try again.".to_string())?;
    if speed > 255 {
        return Err("Speed needs to be between 0 to 255.".to_string());
    }
    Ok((command, speed as u8))
}

/// Wheel directions for a drive command.
fn wheel_directions(command: Command) -> (MotorDirection, MotorDirection) {
    use MotorDirection::*;
    match command {
        Command::Forward => (CounterClockwise, Clockwise),
        Command::Left => (CounterClockwise, CounterClockwise),
        Command::Right => (Clockwise, Clockwise),
        Command::Reverse | Command::Stop => (Clockwise, CounterClockwise),
    }
}

/// Window of the heading banner for a compass heading, if it is sane.
fn heading_window(heading_deg: f32) -> Option<&'static str> {
    let index = ((heading_deg + 0.5) as usize) / 10;
    if index <= 36 {
        Some(&HEADING_BANNER[index..index + 11])
    } else {
        None
    }
}

/// Is the command allowed given the blocked corners? Matches the original
/// rule: a direction is blocked only when both of its corners are.
fn command_allowed(command: Command, blocked: &Blocked) -> bool {
    let fl = blocked.fl.load(Ordering::Relaxed);
    let fr = blocked.fr.load(Ordering::Relaxed);
    let rl = blocked.rl.load(Ordering::Relaxed);
    let rr = blocked.rr.load(Ordering::Relaxed);
    match command {
        Command::Forward => !fl || !fr,
        Command::Left => !fl || !rl,
        Command::Right => !fr || !rr,
        Command::Reverse => !rl || !rr,
        Command::Stop => true,
    }
}

async fn display_heading(
    lcd: Arc<Mutex<Lcd>>,
    mut compass: Compass,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    while !shutdown.is_shutdown() {
        compass.update()?;
        if let Some(window) = heading_window(compass.heading()) {
            let mut lcd = lcd.lock().await;
            lcd.set_cursor(0, 0)?;
            if lcd.write(&format!("HDG: {}", window)).is_err() {
                tracing::error!("cannot display heading");
            }
        }
        shutdown.sleep(Duration::from_millis(250)).await;
    }
    Ok(())
}

async fn display_battery(
    lcd: Arc<Mutex<Lcd>>,
    divider: VoltageDivider,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    // Flashing red component while the battery is low
    let mut red: u8 = 0x3f;
    let mut battery_low = true;

    while !shutdown.is_shutdown() {
        // 50 samples, 2 ms apart
        let avg = divider.value(50).await?;
        // 3x gain, 5V reference
        let voltage = divider.computed_value(3, avg);

        {
            let mut lcd = lcd.lock().await;
            lcd.set_cursor(1, 0)?;
            if lcd.write(&format!("Batt: {:.2} V    ", voltage)).is_err() {
                tracing::error!("cannot display battery voltage");
            }
        }

        if voltage < BATTERY_THRESHOLD_VOLTS {
            battery_low = true;
            lcd.lock().await.set_color(red, 0x00, 0x00)?;
            red = !red;
            shutdown.sleep(Duration::from_secs(2)).await;
        } else {
            if battery_low {
                lcd.lock().await.set_color(0x00, 0xcf, 0x00)?;
            }
            battery_low = false;
            shutdown.sleep(Duration::from_secs(5)).await;
        }
    }
    Ok(())
}

async fn collision_watch(
    motors: Arc<Mutex<MotorDriver>>,
    sensors: [DistanceInterrupter; 4],
    blocked: Arc<Blocked>,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    let [fl, fr, rl, rr] = sensors;
    while !shutdown.is_shutdown() {
        blocked.fl.store(fl.object_detected()?, Ordering::Relaxed);
        blocked.fr.store(fr.object_detected()?, Ordering::Relaxed);
        blocked.rl.store(rl.object_detected()?, Ordering::Relaxed);
        blocked.rr.store(rr.object_detected()?, Ordering::Relaxed);

        if blocked.any() {
            motors.lock().await.stop()?;
        }
        shutdown.sleep(Duration::from_millis(10)).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let motors = Arc::new(Mutex::new(
        MotorDriver::open(&board, motors::DEFAULT_ADDR).context("initialize motor driver")?,
    ));
    let lcd = Arc::new(Mutex::new(Lcd::open(&board).context("initialize LCD")?));
    let compass =
        Compass::open(&board, compass::DEFAULT_ADDR).context("initialize compass")?;
    let divider = VoltageDivider::open(&board, cli.battery_channel)
        .context("initialize voltage divider")?;

    let pins: [u32; 4] = cli
        .ir_pins
        .as_slice()
        .try_into()
        .context("exactly four IR pins required")?;
    let sensors = [
        DistanceInterrupter::open(&board, pins[0]).context("open front-left IR sensor")?,
        DistanceInterrupter::open(&board, pins[1]).context("open front-right IR sensor")?,
        DistanceInterrupter::open(&board, pins[2]).context("open rear-left IR sensor")?,
        DistanceInterrupter::open(&board, pins[3]).context("open rear-right IR sensor")?,
    ];

    let blocked = Arc::new(Blocked::default());
    let shutdown = grovekit::shutdown::ctrl_c();

    let heading_task = tokio::spawn(display_heading(lcd.clone(), compass, shutdown.clone()));
    let battery_task = tokio::spawn(display_battery(lcd.clone(), divider, shutdown.clone()));
    let collision_task = tokio::spawn(collision_watch(
        motors.clone(),
        sensors,
        blocked.clone(),
        shutdown.clone(),
    ));

    // Main control loop: commands from stdin
    let mut control = shutdown.clone();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !control.is_shutdown() {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = control.recv() => break,
        };
        let Some(line) = line else { break };

        let (command, speed) = match parse_command(&line) {
            Ok(parsed) => parsed,
            Err(msg) => {
                tracing::error!("{}", msg);
                continue;
            }
        };

        if command == Command::Stop {
            motors.lock().await.stop()?;
            println!("Rover stopping!");
            continue;
        }

        if !command_allowed(command, &blocked) {
            motors.lock().await.stop()?;
            println!("Command not supported or direction blocked!");
            continue;
        }

        let (left, right) = wheel_directions(command);
        let mut motors = motors.lock().await;
        motors.set_directions(left, right)?;
        motors.set_speeds(speed, speed)?;
        println!("Rover moving ({:?}) at speed {}", command, speed);
    }

    let _ = tokio::join!(heading_task, battery_task, collision_task);
    motors.lock().await.stop()?;
    println!("Exiting...");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("stop"), Ok((Command::Stop, 0)));
        assert_eq!(parse_command(""), Ok((Command::Stop, 0)));
        assert_eq!(parse_command("fwd 150"), Ok((Command::Forward, 150)));
        assert_eq!(parse_command("rev 255"), Ok((Command::Reverse, 255)));
        assert!(parse_command("fwd 300").is_err());
        assert!(parse_command("fwd abc").is_err());
        assert!(parse_command("fly 10").is_err());
        assert!(parse_command("fwd").is_err());
    }

    #[test]
    fn test_heading_window() {
        assert_eq!(heading_window(0.0), Some(&HEADING_BANNER[0..11]));
        assert_eq!(heading_window(90.0), Some(&HEADING_BANNER[9..20]));
        assert_eq!(heading_window(360.0), Some(&HEADING_BANNER[36..47]));
        // Garbage heading from a disconnected compass is dropped
        assert_eq!(heading_window(800.0), None);
    }

    #[test]
    fn test_single_blocked_corner_still_drives() {
        let blocked = Blocked::default();
        blocked.fl.store(true, Ordering::Relaxed);
        assert!(command_allowed(Command::Forward, &blocked));
        blocked.fr.store(true, Ordering::Relaxed);
        assert!(!command_allowed(Command::Forward, &blocked));
        // Reverse only cares about the rear corners
        assert!(command_allowed(Command::Reverse, &blocked));
        assert!(command_allowed(Command::Stop, &blocked));
    }

    #[test]
    fn test_wheel_directions() {
        use MotorDirection::*;
        assert_eq!(wheel_directions(Command::Forward), (CounterClockwise, Clockwise));
        assert_eq!(wheel_directions(Command::Reverse), (Clockwise, CounterClockwise));
    }
}
