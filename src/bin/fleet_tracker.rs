//! Vehicle fleet tracker: streams GPS fixes to the local agent, warns the
//! driver while backing up too close to an obstacle, reports tailgate
//! openings, and otherwise shows a clock on the LCD.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use grovekit::agent::AgentClient;
use grovekit::board::Board;
use grovekit::devices::{gps, DistanceInterrupter, Gps, Lcd, Led, ReflectiveSensor};
use grovekit::shutdown::Shutdown;
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(about = "Track a fleet vehicle: GPS, backup warning, tailgate alarm")]
struct Cli {
    /// Serial device of the GPS receiver
    #[arg(long, default_value = "/dev/ttyS0")]
    gps_device: String,

    /// Digital pin of the backup distance interrupter
    #[arg(long, default_value_t = 2)]
    backup_pin: u32,

    /// Digital pin of the tailgate reflective sensor
    #[arg(long, default_value_t = 4)]
    tailgate_pin: u32,

    /// Digital pin of the tailgate warning LED
    #[arg(long, default_value_t = 6)]
    led_pin: u32,
}

async fn stream_fixes(
    mut gps: Gps,
    agent: Arc<AgentClient>,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    while !shutdown.is_shutdown() {
        let sentence = tokio::select! {
            sentence = gps.next_sentence() => sentence?,
            _ = shutdown.recv() => break,
        };
        let Some(sentence) = sentence else { break };

        if let Some(fix) = gps::parse_gga(&sentence) {
            let position = format!("{:.6}, {:.6}", fix.latitude, fix.longitude);
            if let Err(err) = agent.send("gpsv1", &position).await {
                tracing::error!("cannot notify agent of position: {}", err);
            }
            // One fix every ten seconds is plenty for a fleet map
            shutdown.sleep(Duration::from_secs(10)).await;
        }
    }
    Ok(())
}

async fn backup_watch(
    sensor: DistanceInterrupter,
    lcd: Arc<Mutex<Lcd>>,
    display_time: Arc<AtomicBool>,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    while !shutdown.is_shutdown() {
        if sensor.object_detected()? {
            display_time.store(false, Ordering::Relaxed);
            let mut lcd = lcd.lock().await;
            lcd.set_cursor(0, 0)?;
            lcd.write("Within 4\" - STOP!!!")?;
        } else {
            display_time.store(true, Ordering::Relaxed);
        }
        shutdown.sleep(Duration::from_millis(500)).await;
    }
    Ok(())
}

async fn tailgate_watch(
    sensor: ReflectiveSensor,
    led: Led,
    agent: Arc<AgentClient>,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    // The agent hears about an opening once until the tailgate closes again
    let mut reported = false;

    while !shutdown.is_shutdown() {
        if sensor.black_detected()? {
            led.on()?;
            if !reported {
                if let Err(err) = agent.send("reflectorv1", "true").await {
                    tracing::error!("cannot notify agent of tailgate: {}", err);
                } else {
                    reported = true;
                }
            }
        } else {
            led.off()?;
            reported = false;
        }
        shutdown.sleep(Duration::from_millis(500)).await;
    }
    led.off()?;
    Ok(())
}

async fn clock_display(
    lcd: Arc<Mutex<Lcd>>,
    display_time: Arc<AtomicBool>,
    mut shutdown: Shutdown,
) -> anyhow::Result<()> {
    while !shutdown.is_shutdown() {
        if display_time.load(Ordering::Relaxed) {
            let now = Local::now().format("%a %H:%M:%S").to_string();
            let mut lcd = lcd.lock().await;
            lcd.set_cursor(0, 0)?;
            lcd.write(&format!("{:<16}", now))?;
        }
        shutdown.sleep(Duration::from_millis(500)).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grovekit::init_tracing();
    let cli = Cli::parse();

    let board = Board::open();
    let lcd = Lcd::open(&board).context("initialize LCD")?;
    let backup =
        DistanceInterrupter::open(&board, cli.backup_pin).context("open backup sensor")?;
    let tailgate =
        ReflectiveSensor::open(&board, cli.tailgate_pin).context("open tailgate sensor")?;
    let led = Led::open(&board, cli.led_pin).context("open warning LED")?;
    let gps = Gps::open(&cli.gps_device)
        .await
        .with_context(|| format!("open GPS receiver {}", cli.gps_device))?;
    let agent = Arc::new(
        AgentClient::connect(&board.config().agent_addr)
            .await
            .context("connect to local agent")?,
    );

    let lcd = Arc::new(Mutex::new(lcd));
    let display_time = Arc::new(AtomicBool::new(true));
    let shutdown = grovekit::shutdown::ctrl_c();

    let tasks = [
        tokio::spawn(stream_fixes(gps, agent.clone(), shutdown.clone())),
        tokio::spawn(backup_watch(
            backup,
            lcd.clone(),
            display_time.clone(),
            shutdown.clone(),
        )),
        tokio::spawn(tailgate_watch(
            tailgate,
            led,
            agent.clone(),
            shutdown.clone(),
        )),
        tokio::spawn(clock_display(
            lcd.clone(),
            display_time.clone(),
            shutdown.clone(),
        )),
    ];

    for task in tasks {
        if let Err(err) = task.await? {
            tracing::error!("task exited with error: {}", err);
        }
    }

    lcd.lock().await.clear()?;
    println!("Exiting...");
    Ok(())
}
