//! Daisy-24: 16x2 character LCD on I2C
//!
//! The controller sits at address `0x3E`. Every transfer is two bytes: a
//! control byte selecting the command (`0x00`) or data (`0x40`) register,
//! then the payload.
//!
//! <http://www.acmesystems.it/?id=DAISY-24>

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::{HardwareError, Result};

/// 7-bit controller address
pub const LCD_ADDRESS: u8 = 0x3E;

/// Visible columns per row
pub const COLUMNS: u8 = 16;

/// Visible rows
pub const ROWS: u8 = 2;

const REG_COMMAND: u8 = 0x00;
const REG_DATA: u8 = 0x40;

mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x03;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_SET: u8 = 0x38;
    pub const FUNCTION_SET_EXT: u8 = 0x39;
    pub const OSC_FREQUENCY: u8 = 0x14;
    pub const CONTRAST: u8 = 0x70;
    pub const POWER_ICON_CONTRAST: u8 = 0x54;
    pub const FOLLOWER: u8 = 0x6F;
    pub const DOUBLE_FONT: u8 = 0x30 + 0x0C + 0x01;
    pub const SINGLE_FONT: u8 = 0x30 + 0x08 + 0x01;
    pub const DDRAM_ADDRESS: u8 = 0x80;
    pub const SECOND_ROW: u8 = 0x40;
}

/// Power-up sequence, sent before the first clear
const INIT_SEQUENCE: &[u8] = &[
    cmd::FUNCTION_SET,
    cmd::FUNCTION_SET_EXT,
    cmd::OSC_FREQUENCY,
    cmd::CONTRAST + 0x02,
    cmd::POWER_ICON_CONTRAST,
    cmd::FOLLOWER,
    cmd::DISPLAY_ON,
];

/// Execution time of clear and home
const SETTLE_US: u32 = 1000;

/// Daisy-24 character display
#[derive(Debug)]
pub struct Daisy24<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> Daisy24<I2C, D> {
    /// Initialise the controller and clear the screen
    pub fn new(i2c: I2C, delay: D) -> Result<Self> {
        let mut lcd = Self { i2c, delay };
        for &command in INIT_SEQUENCE {
            lcd.send_command(command)?;
        }
        lcd.clear()?;
        Ok(lcd)
    }

    pub fn send_command(&mut self, value: u8) -> Result<()> {
        self.write_register(REG_COMMAND, value)
    }

    pub fn send_data(&mut self, value: u8) -> Result<()> {
        self.write_register(REG_DATA, value)
    }

    /// Clear the display content
    pub fn clear(&mut self) -> Result<()> {
        self.send_command(cmd::CLEAR)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    /// Move the cursor to the top-left corner
    pub fn home(&mut self) -> Result<()> {
        self.send_command(cmd::HOME)?;
        self.delay.delay_us(SETTLE_US);
        Ok(())
    }

    /// Contrast from 0 to 15; larger values are ignored
    pub fn set_contrast(&mut self, value: u8) -> Result<()> {
        if value > 15 {
            return Ok(());
        }
        self.send_command(cmd::CONTRAST + value)
    }

    pub fn set_double_font(&mut self) -> Result<()> {
        self.send_command(cmd::DOUBLE_FONT)
    }

    pub fn set_single_font(&mut self) -> Result<()> {
        self.send_command(cmd::SINGLE_FONT)
    }

    /// Place the cursor. Positions outside the 16x2 grid are ignored.
    pub fn set_cursor(&mut self, x: u8, y: u8) -> Result<()> {
        if x >= COLUMNS || y >= ROWS {
            return Ok(());
        }
        let row_base = if y == 0 { 0x00 } else { cmd::SECOND_ROW };
        self.send_command(cmd::DDRAM_ADDRESS + row_base + x)
    }

    pub fn put_char(&mut self, value: u8) -> Result<()> {
        self.send_data(value)
    }

    /// Write up to 16 characters from the cursor; the rest is dropped.
    /// Characters outside Latin-1 are shown as `?`.
    pub fn put_string(&mut self, text: &str) -> Result<()> {
        for c in text.chars().take(COLUMNS as usize) {
            self.put_char(u8::try_from(c).unwrap_or(b'?'))?;
        }
        Ok(())
    }

    /// Give back the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(LCD_ADDRESS, &[register, value])
            .map_err(HardwareError::i2c)
    }
}

#[cfg(target_os = "linux")]
impl Daisy24<linux_embedded_hal::I2cdev, linux_embedded_hal::Delay> {
    /// Open `/dev/i2c-<bus>` and initialise the display
    pub fn open(bus: u8) -> Result<Self> {
        Self::new(super::open_i2c(bus)?, linux_embedded_hal::Delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[derive(Debug, Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn command(value: u8) -> I2cTransaction {
        I2cTransaction::write(LCD_ADDRESS, vec![0x00, value])
    }

    fn data(value: u8) -> I2cTransaction {
        I2cTransaction::write(LCD_ADDRESS, vec![0x40, value])
    }

    fn init_transactions() -> Vec<I2cTransaction> {
        vec![
            command(0x38),
            command(0x39),
            command(0x14),
            command(0x72),
            command(0x54),
            command(0x6F),
            command(0x0C),
            command(0x01),
        ]
    }

    fn lcd_with(extra: Vec<I2cTransaction>) -> (I2cMock, Daisy24<I2cMock, CountingDelay>) {
        let mut expectations = init_transactions();
        expectations.extend(extra);
        let i2c = I2cMock::new(&expectations);
        let lcd = Daisy24::new(i2c.clone(), CountingDelay::default()).unwrap();
        (i2c, lcd)
    }

    #[test]
    fn test_init_sequence_and_clear() {
        let (mut i2c, lcd) = lcd_with(vec![]);
        let (_, delay) = lcd.release();
        assert_eq!(delay.total_ns, 1_000_000);
        i2c.done();
    }

    #[test]
    fn test_cursor_rows() {
        let (mut i2c, mut lcd) = lcd_with(vec![command(0x80), command(0x80 + 0x40 + 15)]);
        lcd.set_cursor(0, 0).unwrap();
        lcd.set_cursor(15, 1).unwrap();
        i2c.done();
    }

    #[test]
    fn test_cursor_out_of_range_ignored() {
        let (mut i2c, mut lcd) = lcd_with(vec![]);
        lcd.set_cursor(16, 0).unwrap();
        lcd.set_cursor(0, 2).unwrap();
        i2c.done();
    }

    #[test]
    fn test_put_string_truncates_to_16() {
        let text = "ABCDEFGHIJKLMNOPQRST";
        let (mut i2c, mut lcd) = lcd_with(text.bytes().take(16).map(data).collect());
        lcd.put_string(text).unwrap();
        i2c.done();
    }

    #[test]
    fn test_put_empty_string() {
        let (mut i2c, mut lcd) = lcd_with(vec![]);
        lcd.put_string("").unwrap();
        i2c.done();
    }

    #[test]
    fn test_home_waits() {
        let (mut i2c, mut lcd) = lcd_with(vec![command(0x03)]);
        lcd.home().unwrap();
        let (_, delay) = lcd.release();
        assert_eq!(delay.total_ns, 2_000_000);
        i2c.done();
    }

    #[test]
    fn test_contrast_and_fonts() {
        let (mut i2c, mut lcd) =
            lcd_with(vec![command(0x7F), command(0x3D), command(0x39)]);
        lcd.set_contrast(15).unwrap();
        lcd.set_contrast(16).unwrap();
        lcd.set_double_font().unwrap();
        lcd.set_single_font().unwrap();
        i2c.done();
    }

    #[test]
    fn test_non_latin_character() {
        let (mut i2c, mut lcd) = lcd_with(vec![data(b'a'), data(0xE9), data(b'?')]);
        lcd.put_string("aé€").unwrap();
        i2c.done();
    }
}
