//! Error taxonomy for the hardware access layer

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the board, hal, and device layers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPIO operation failed: {0}")]
    Gpio(#[from] gpio_cdev::Error),

    #[error("I2C operation failed: {0}")]
    I2c(#[from] i2cdev::linux::LinuxI2CError),

    #[error("{}: {source}", path.display())]
    Sysfs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value from device: {0}")]
    InvalidValue(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach a sysfs path to an io error.
    pub(crate) fn sysfs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Sysfs {
            path: path.into(),
            source,
        }
    }
}
