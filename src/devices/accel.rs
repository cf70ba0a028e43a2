//! MMA7660 3-axis accelerometer (I2C, address 0x4C)
//!
//! Fixed +-1.5 g range, 6-bit two's complement counts per axis.

use crate::board::Board;
use crate::error::{Error, Result};
use crate::hal::I2c;

pub const DEFAULT_ADDR: u16 = 0x4c;

const REG_XOUT: u8 = 0x00;
const REG_MODE: u8 = 0x07;
const REG_SR: u8 = 0x08;

const MODE_STANDBY: u8 = 0x00;
const MODE_ACTIVE: u8 = 0x01;
// 32 samples per second
const SR_32: u8 = 0x02;

// Set when the device overwrote the register mid-read
const ALERT_BIT: u8 = 0x40;

const COUNTS_PER_G: f32 = 21.33;

pub struct Accelerometer {
    bus: I2c,
}

impl Accelerometer {
    pub fn open(board: &Board, addr: u16) -> Result<Self> {
        let mut bus = I2c::open(board, addr)?;
        // Sample rate is only writable in standby
        bus.write_reg(REG_MODE, MODE_STANDBY)?;
        bus.write_reg(REG_SR, SR_32)?;
        bus.write_reg(REG_MODE, MODE_ACTIVE)?;
        Ok(Self { bus })
    }

    /// Read (x, y, z) acceleration in g.
    pub fn acceleration(&mut self) -> Result<(f32, f32, f32)> {
        let mut data = [0u8; 3];
        self.bus.write(&[REG_XOUT])?;
        self.bus.read(&mut data)?;
        if data.iter().any(|axis| axis & ALERT_BIT != 0) {
            return Err(Error::InvalidValue(
                "accelerometer sample overwritten during read".to_string(),
            ));
        }
        Ok((
            counts_to_g(data[0]),
            counts_to_g(data[1]),
            counts_to_g(data[2]),
        ))
    }
}

/// Sign-extend a 6-bit axis count and scale to g.
pub fn counts_to_g(raw: u8) -> f32 {
    let mut count = (raw & 0x3f) as i8;
    if count >= 32 {
        count -= 64;
    }
    count as f32 / COUNTS_PER_G
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sign_extend() {
        assert_eq!(counts_to_g(0), 0.0);
        // +21 counts is just under +1 g
        assert!((counts_to_g(21) - 21.0 / 21.33).abs() < 1e-6);
        // 63 is -1 in 6-bit two's complement
        assert!((counts_to_g(63) + 1.0 / 21.33).abs() < 1e-6);
        // Most negative count
        assert!((counts_to_g(32) + 32.0 / 21.33).abs() < 1e-6);
    }
}
