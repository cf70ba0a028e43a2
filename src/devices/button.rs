//! Grove momentary button (digital in, active high)

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub struct Button {
    pin: Gpio,
}

impl Button {
    pub fn open(board: &Board, pin: u32) -> Result<Self> {
        Ok(Self {
            pin: Gpio::input(board, pin)?,
        })
    }

    pub fn value(&self) -> Result<u8> {
        self.pin.read()
    }

    pub fn is_pressed(&self) -> Result<bool> {
        Ok(self.value()? == 1)
    }
}
