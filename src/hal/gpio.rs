//! Digital I/O over the GPIO character device

use gpio_cdev::{Chip, EventRequestFlags, LineEventHandle, LineHandle, LineRequestFlags};

use crate::board::Board;
use crate::error::Result;

/// A single requested GPIO line, input or output.
///
/// The line stays requested for the lifetime of the handle; dropping it
/// releases the pin.
pub struct Gpio {
    handle: LineHandle,
    pin: u32,
}

impl Gpio {
    /// Request a line as input.
    pub fn input(board: &Board, pin: u32) -> Result<Self> {
        Self::request(board, pin, LineRequestFlags::INPUT, 0)
    }

    /// Request a line as output, driven low initially.
    pub fn output(board: &Board, pin: u32) -> Result<Self> {
        Self::request(board, pin, LineRequestFlags::OUTPUT, 0)
    }

    fn request(board: &Board, pin: u32, flags: LineRequestFlags, default: u8) -> Result<Self> {
        let line = board.resolve_pin(pin);
        let mut chip = Chip::new(&board.config().gpio_chip)?;
        let handle = chip.get_line(line)?.request(flags, default, "grovekit")?;
        tracing::debug!(pin, line, "requested GPIO line");
        Ok(Self { handle, pin: line })
    }

    /// The resolved line offset this handle drives.
    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn read(&self) -> Result<u8> {
        Ok(self.handle.get_value()?)
    }

    pub fn write(&self, value: u8) -> Result<()> {
        self.handle.set_value(value)?;
        Ok(())
    }

    pub fn toggle(&self) -> Result<()> {
        let value = self.read()?;
        self.write(if value == 0 { 1 } else { 0 })
    }
}

/// Request a line for both-edge events. The returned handle is a blocking
/// iterator over edges; callers poll it from a dedicated (blocking) task.
pub fn edge_events(board: &Board, pin: u32) -> Result<LineEventHandle> {
    let line = board.resolve_pin(pin);
    let mut chip = Chip::new(&board.config().gpio_chip)?;
    let events = chip.get_line(line)?.events(
        LineRequestFlags::INPUT,
        EventRequestFlags::BOTH_EDGES,
        "grovekit",
    )?;
    Ok(events)
}
