//! TTP223 capacitive touch sensor (digital in)

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct TouchSensor {
    pin: Gpio,
}

impl TouchSensor {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::input(board, pin)?,
        })
    }

    pub fn value(&self) -> Result<u8> {
        self.pin.read()
    }

    pub fn is_touched(&self) -> Result<bool> {
        Ok(self.value()? == 1)
    }
}
