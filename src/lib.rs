//! grovekit: Grove sensor and actuator samples for Linux single-board computers
//!
//! A small shared layer (board/platform resolution, GPIO / analog / PWM / I2C
//! access, Grove peripheral wrappers, a UDP iot-agent client) used by the
//! standalone sample programs under `src/bin/`. Each binary is a complete
//! program: open a board, open some peripherals, poll in a loop, print or
//! display, react with simple threshold logic.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod agent;
pub mod board;
pub mod config;
pub mod devices;
pub mod error;
pub mod hal;
pub mod shutdown;

pub use error::{Error, Result};

/// Install the tracing subscriber every sample uses: env-filtered fmt layer
/// to stderr, so stdout stays clean for sensor readings.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
