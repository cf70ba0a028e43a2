//! Grove I2C motor driver (two DC motor channels at address 0x0F)

use crate::board::Board;
use crate::error::Result;
use crate::hal::I2c;

pub const DEFAULT_ADDR: u16 = 0x0f;

// Driver command registers
const REG_SET_SPEED: u8 = 0x82;
const REG_SET_PWM_FREQ: u8 = 0x84;
const REG_SET_DIRECTION: u8 = 0xaa;
const NOOP: u8 = 0x01;

// 3.921 kHz motor PWM
const PWM_FREQ_3921: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDirection {
    Clockwise,
    CounterClockwise,
}

impl MotorDirection {
    fn bits(self) -> u8 {
        match self {
            MotorDirection::Clockwise => 0b01,
            MotorDirection::CounterClockwise => 0b10,
        }
    }
}

pub struct MotorDriver {
    bus: I2c,
}

impl MotorDriver {
    pub fn open(board: &Board, addr: u16) -> Result<Self> {
        let bus = I2c::open(board, addr)?;
        let mut driver = Self { bus };
        driver.write_packet(REG_SET_PWM_FREQ, PWM_FREQ_3921, NOOP)?;
        Ok(driver)
    }

    /// Set both motor speeds, 0-255.
    pub fn set_speeds(&mut self, a: u8, b: u8) -> Result<()> {
        self.write_packet(REG_SET_SPEED, a, b)
    }

    /// Set both motor directions.
    pub fn set_directions(&mut self, a: MotorDirection, b: MotorDirection) -> Result<()> {
        let dir = (b.bits() << 2) | a.bits();
        self.write_packet(REG_SET_DIRECTION, dir, NOOP)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.set_speeds(0, 0)
    }

    fn write_packet(&mut self, register: u8, d1: u8, d2: u8) -> Result<()> {
        // The driver expects plain 3-byte writes, not SMBus block framing
        self.bus.write(&[register, d1, d2])
    }
}
