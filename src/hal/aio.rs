//! Analog input over the Linux IIO sysfs interface
//!
//! Analog pins read as voltage-proportional raw integers from
//! /sys/bus/iio/devices/iio:deviceN/in_voltageC_raw, matching what the
//! original samples got from their AIO handles.

use std::fs;
use std::path::PathBuf;

use crate::board::Board;
use crate::error::{Error, Result};

/// One analog input channel.
pub struct Aio {
    path: PathBuf,
    full_scale: u16,
}

impl Aio {
    /// Open analog channel `channel` on the board's IIO device.
    pub fn open(board: &Board, channel: u32) -> Result<Self> {
        let config = board.config();
        if !(1..=16).contains(&config.adc_bits) {
            return Err(Error::Config(format!(
                "adc_bits must be between 1 and 16, got {}",
                config.adc_bits
            )));
        }
        let path = PathBuf::from(format!(
            "/sys/bus/iio/devices/iio:device{}/in_voltage{}_raw",
            config.aio_device, channel
        ));
        let full_scale = (1u32 << config.adc_bits) - 1;
        Ok(Self {
            path,
            full_scale: full_scale as u16,
        })
    }

    /// Raw ADC full scale, e.g. 1023 for a 10-bit converter.
    pub fn full_scale(&self) -> u16 {
        self.full_scale
    }

    /// Read the raw converter value.
    pub fn read(&self) -> Result<u16> {
        let text =
            fs::read_to_string(&self.path).map_err(|e| Error::sysfs(self.path.clone(), e))?;
        let raw: u32 = text
            .trim()
            .parse()
            .map_err(|_| Error::InvalidValue(format!("bad ADC reading {:?}", text.trim())))?;
        if raw > self.full_scale as u32 {
            return Err(Error::InvalidValue(format!(
                "ADC reading {} above full scale {}",
                raw, self.full_scale
            )));
        }
        Ok(raw as u16)
    }

    /// Read normalized to [0.0, 1.0].
    pub fn read_normalized(&self) -> Result<f32> {
        Ok(self.read()? as f32 / self.full_scale as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Platform};
    use crate::config::BoardConfig;

    #[test]
    fn test_adc_width_sets_full_scale() {
        let mut config = BoardConfig::default();
        config.adc_bits = 12;
        let board = Board::with_config(Platform::Unknown, config);
        assert_eq!(Aio::open(&board, 0).unwrap().full_scale(), 4095);
    }

    #[test]
    fn test_bad_adc_width_rejected() {
        // A hand-edited board.toml can carry any u8 here; widths that would
        // overflow the shift (or make no sense) must fail at open, not panic
        for bits in [0, 17, 32, 255] {
            let mut config = BoardConfig::default();
            config.adc_bits = bits;
            let board = Board::with_config(Platform::Unknown, config);
            assert!(matches!(Aio::open(&board, 0), Err(Error::Config(_))));
        }
    }
}
