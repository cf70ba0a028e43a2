//! I2C register access over the Linux i2c-dev interface

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use crate::board::Board;
use crate::error::Result;

/// A device on an I2C bus, addressed once at open.
pub struct I2c {
    dev: LinuxI2CDevice,
    addr: u16,
}

impl I2c {
    /// Open the device at `addr` on the board's I2C bus.
    pub fn open(board: &Board, addr: u16) -> Result<Self> {
        let path = format!("/dev/i2c-{}", board.config().i2c_bus);
        let dev = LinuxI2CDevice::new(&path, addr)?;
        tracing::debug!(bus = %path, addr = format_args!("0x{:02x}", addr), "opened I2C device");
        Ok(Self { dev, addr })
    }

    pub fn addr(&self) -> u16 {
        self.addr
    }

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.dev.smbus_write_byte(value)?;
        Ok(())
    }

    pub fn write_reg(&mut self, register: u8, value: u8) -> Result<()> {
        self.dev.smbus_write_byte_data(register, value)?;
        Ok(())
    }

    pub fn read_reg(&mut self, register: u8) -> Result<u8> {
        Ok(self.dev.smbus_read_byte_data(register)?)
    }

    pub fn write_block(&mut self, register: u8, values: &[u8]) -> Result<()> {
        self.dev.smbus_write_block_data(register, values)?;
        Ok(())
    }

    /// Raw write of `bytes` (no register framing).
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.dev.write(bytes)?;
        Ok(())
    }

    /// Raw read into `buf` (no register framing).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        self.dev.read(buf)?;
        Ok(())
    }
}
