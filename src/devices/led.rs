//! Grove LED (digital out)

use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct Led {
    pin: Gpio,
}

impl Led {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::output(board, pin)?,
        })
    }

    pub fn on(&self) -> Result<()> {
        self.pin.write(1)
    }

    pub fn off(&self) -> Result<()> {
        self.pin.write(0)
    }

    pub fn toggle(&self) -> Result<()> {
        self.pin.toggle()
    }

    /// Turn the LED on for `duration`, then off again.
    pub async fn blink(&self, duration: Duration) -> Result<()> {
        self.on()?;
        tokio::time::sleep(duration).await;
        self.off()
    }
}
