//! JHD1313M1 16x2 RGB backlit LCD (I2C)
//!
//! Two devices behind one connector: an HD44780-style text controller at 0x3E
//! and a PCA9633 backlight controller at 0x62.

use std::thread;
use std::time::Duration;

use crate::board::Board;
use crate::error::Result;
use crate::hal::I2c;

pub const LCD_ADDR: u16 = 0x3e;
pub const RGB_ADDR: u16 = 0x62;

// Text controller registers
const REG_CMD: u8 = 0x80;
const REG_DATA: u8 = 0x40;

// HD44780 commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM_ADDR: u8 = 0x80;

const ENTRY_LEFT_TO_RIGHT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const BLINK_ON: u8 = 0x01;
const TWO_LINES: u8 = 0x08;

// Backlight controller registers
const RGB_MODE1: u8 = 0x00;
const RGB_MODE2: u8 = 0x01;
const RGB_OUTPUT: u8 = 0x08;
const RGB_BLUE: u8 = 0x02;
const RGB_GREEN: u8 = 0x03;
const RGB_RED: u8 = 0x04;

pub struct Lcd {
    text: I2c,
    rgb: I2c,
    display_control: u8,
}

impl Lcd {
    /// Open and initialize the display on the board's I2C bus.
    pub fn open(board: &Board) -> Result<Self> {
        let text = I2c::open(board, LCD_ADDR)?;
        let rgb = I2c::open(board, RGB_ADDR)?;
        let mut lcd = Self {
            text,
            rgb,
            display_control: DISPLAY_ON,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<()> {
        // HD44780 power-on sequence wants >40ms before the first command
        thread::sleep(Duration::from_millis(50));
        for _ in 0..3 {
            self.command(CMD_FUNCTION_SET | TWO_LINES)?;
            thread::sleep(Duration::from_millis(5));
        }
        self.command(CMD_DISPLAY_CONTROL | self.display_control)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT_TO_RIGHT)?;

        // Wake the backlight controller and route all channels to PWM
        self.rgb.write_reg(RGB_MODE1, 0x00)?;
        self.rgb.write_reg(RGB_MODE2, 0x00)?;
        self.rgb.write_reg(RGB_OUTPUT, 0xaa)?;
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.text.write_reg(REG_CMD, cmd)
    }

    /// Blank the display and move the cursor home.
    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        thread::sleep(Duration::from_millis(2));
        Ok(())
    }

    /// Move the cursor; rows are 0/1, columns 0..16.
    pub fn set_cursor(&mut self, row: u8, column: u8) -> Result<()> {
        let row_addr = if row == 0 { 0x00 } else { 0x40 };
        self.command(CMD_SET_DDRAM_ADDR | (column + row_addr))
    }

    /// Write text at the cursor. Anything past the 16th column is ignored by
    /// the controller.
    pub fn write(&mut self, text: &str) -> Result<()> {
        for byte in text.bytes() {
            self.text.write_reg(REG_DATA, byte)?;
        }
        Ok(())
    }

    /// Set the backlight color.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.rgb.write_reg(RGB_RED, r)?;
        self.rgb.write_reg(RGB_GREEN, g)?;
        self.rgb.write_reg(RGB_BLUE, b)
    }

    pub fn cursor_blink_on(&mut self) -> Result<()> {
        self.display_control |= BLINK_ON;
        self.command(CMD_DISPLAY_CONTROL | self.display_control)
    }

    pub fn cursor_blink_off(&mut self) -> Result<()> {
        self.display_control &= !BLINK_ON;
        self.command(CMD_DISPLAY_CONTROL | self.display_control)
    }
}
