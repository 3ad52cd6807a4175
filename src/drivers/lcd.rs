//! 16×2 character LCD (HD44780) behind a PCF8574 I²C backpack.
//!
//! The expander drives the controller in 4-bit mode:
//!
//! | P7..P4 | P3        | P2 | P1 | P0 |
//! |--------|-----------|----|----|----|
//! | D7..D4 | backlight | EN | RW | RS |
//!
//! Every nibble is latched by pulsing EN high then low. RW stays low; the
//! busy flag is never read, fixed delays cover command execution time.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::display::LCD_WIDTH;
use crate::error::{Error, Result};

// HD44780 instruction set (subset)
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINES: u8 = 0x08;

// PCF8574 control bits
const BIT_RS: u8 = 0x01;
const BIT_EN: u8 = 0x04;
const BIT_BACKLIGHT: u8 = 0x08;

const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct I2cLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: u8,
}

impl<I2C: I2c, D: DelayNs> I2cLcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: BIT_BACKLIGHT,
        }
    }

    /// Power-on initialisation by instruction: three 8-bit function sets
    /// to resynchronise, switch to 4-bit, then configure 2 lines, display
    /// on with no cursor, clear, left-to-right entry.
    pub fn init(&mut self) -> Result<()> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(CMD_FUNCTION_SET | TWO_LINES)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_INCREMENT)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<()> {
        let offset = ROW_OFFSETS[usize::from(row.min(1))];
        self.command(CMD_SET_DDRAM | (offset + col))
    }

    /// Overwrite a whole row, padding with spaces so stale characters from
    /// a longer previous text are erased without a flickering clear.
    pub fn write_line(&mut self, row: u8, text: &str) -> Result<()> {
        self.set_cursor(0, row)?;
        let mut written = 0;
        for c in text.chars().take(LCD_WIDTH) {
            self.write_char(c)?;
            written += 1;
        }
        for _ in written..LCD_WIDTH {
            self.write_char(' ')?;
        }
        Ok(())
    }

    /// Draw both rows.
    pub fn render(&mut self, line1: &str, line2: &str) -> Result<()> {
        self.write_line(0, line1)?;
        self.write_line(1, line2)
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.backlight = if on { BIT_BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    pub fn backlight(&self) -> bool {
        self.backlight != 0
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        let byte = if c.is_ascii() { c as u8 } else { b'?' };
        self.send(byte, BIT_RS)
    }

    fn command(&mut self, value: u8) -> Result<()> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<()> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble((value << 4) | mode)
    }

    fn write_nibble(&mut self, data: u8) -> Result<()> {
        self.expander_write(data)?;
        self.expander_write(data | BIT_EN)?;
        self.delay.delay_us(1);
        self.expander_write(data & !BIT_EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[data | self.backlight])
            .map_err(Error::i2c)
    }
}
