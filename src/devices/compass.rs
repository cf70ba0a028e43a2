//! HMC5883L 3-axis digital compass (I2C, address 0x1E)

use crate::board::Board;
use crate::error::Result;
use crate::hal::I2c;

pub const DEFAULT_ADDR: u16 = 0x1e;

const REG_MODE: u8 = 0x02;
const REG_DATA_START: u8 = 0x03;
const MODE_CONTINUOUS: u8 = 0x00;

pub struct Compass {
    bus: I2c,
    // Data registers read back X, Z, Y in that order
    x: i16,
    z: i16,
    y: i16,
    declination_rad: f32,
}

impl Compass {
    pub fn open(board: &Board, addr: u16) -> Result<Self> {
        let mut bus = I2c::open(board, addr)?;
        bus.write_reg(REG_MODE, MODE_CONTINUOUS)?;
        Ok(Self {
            bus,
            x: 0,
            z: 0,
            y: 0,
            declination_rad: 0.0,
        })
    }

    /// Set the local magnetic declination in radians for corrected headings.
    pub fn set_declination(&mut self, radians: f32) {
        self.declination_rad = radians;
    }

    /// Fetch a fresh measurement from the device.
    pub fn update(&mut self) -> Result<()> {
        let mut data = [0u8; 6];
        self.bus.write(&[REG_DATA_START])?;
        self.bus.read(&mut data)?;
        self.x = i16::from_be_bytes([data[0], data[1]]);
        self.z = i16::from_be_bytes([data[2], data[3]]);
        self.y = i16::from_be_bytes([data[4], data[5]]);
        Ok(())
    }

    /// Heading in degrees, 0..360, from the last update.
    pub fn heading(&self) -> f32 {
        heading_degrees(self.x, self.y, self.declination_rad)
    }
}

pub fn heading_degrees(x: i16, y: i16, declination_rad: f32) -> f32 {
    let mut heading = (y as f32).atan2(x as f32) + declination_rad;
    if heading < 0.0 {
        heading += 2.0 * std::f32::consts::PI;
    }
    heading.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_headings() {
        assert!((heading_degrees(100, 0, 0.0) - 0.0).abs() < 0.1);
        assert!((heading_degrees(0, 100, 0.0) - 90.0).abs() < 0.1);
        assert!((heading_degrees(-100, 0, 0.0) - 180.0).abs() < 0.1);
        assert!((heading_degrees(0, -100, 0.0) - 270.0).abs() < 0.1);
    }

    #[test]
    fn test_declination_shifts_heading() {
        let base = heading_degrees(100, 0, 0.0);
        let shifted = heading_degrees(100, 0, 0.2749);
        assert!(shifted > base);
    }
}
