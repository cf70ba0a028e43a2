//! Grove LED bar (MY9221 driver, 10 segments, bit-banged data/clock)

use std::thread;
use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::Gpio;

pub const SEGMENTS: u8 = 10;

// 8-bit greyscale mode
const CMD_MODE: u16 = 0x0000;
const CHANNELS: usize = 12; // the chip drives 12, the bar wires 10

pub struct LedBar {
    data: Gpio,
    clock: Gpio,
    clock_state: u8,
}

impl LedBar {
    pub fn open(board: &Board, data_pin: u32, clock_pin: u32) -> Result<Self> {
        Ok(Self {
            data: Gpio::output(board, data_pin)?,
            clock: Gpio::output(board, clock_pin)?,
            clock_state: 0,
        })
    }

    /// Light the first `level` segments (0..=10).
    pub fn set_level(&mut self, level: u8) -> Result<()> {
        let level = level.min(SEGMENTS);
        self.send_word(CMD_MODE)?;
        for segment in 0..CHANNELS as u8 {
            let word = if segment < level { 0x00ff } else { 0x0000 };
            self.send_word(word)?;
        }
        self.latch()
    }

    fn send_word(&mut self, word: u16) -> Result<()> {
        for bit in (0..16).rev() {
            self.data.write(((word >> bit) & 1) as u8)?;
            // Data is sampled on every clock transition
            self.clock_state ^= 1;
            self.clock.write(self.clock_state)?;
        }
        Ok(())
    }

    fn latch(&mut self) -> Result<()> {
        self.data.write(0)?;
        thread::sleep(Duration::from_micros(240));
        for _ in 0..4 {
            self.data.write(1)?;
            self.data.write(0)?;
        }
        Ok(())
    }
}

/// Map a sound reading onto the bar: `min..max` spans the 10 segments,
/// clamped at both ends.
pub fn level_for(reading: u16, min: u16, max: u16) -> u8 {
    if reading <= min {
        return 0;
    }
    if reading >= max {
        return SEGMENTS;
    }
    ((reading - min) as u32 * SEGMENTS as u32 / (max - min) as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_for(0, 50, 200), 0);
        assert_eq!(level_for(50, 50, 200), 0);
        assert_eq!(level_for(125, 50, 200), 5);
        assert_eq!(level_for(200, 50, 200), 10);
        assert_eq!(level_for(1023, 50, 200), 10);
    }
}
