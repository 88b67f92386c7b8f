//! Daisy-22: 8-bit I2C I/O expander
//!
//! The expander has no registers: a one-byte read returns the state of all
//! eight lines and a one-byte write sets them. Single-line control is a
//! read-modify-write of that byte and is not atomic. Two handles on the
//! same device must not be used from different threads.
//!
//! <http://www.acmesystems.it/?id=DAISY-22>

use embedded_hal::i2c::I2c;

use crate::error::{HardwareError, Result};

/// Address with all address jumpers open
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// One line of a Daisy-22 expander
#[derive(Debug)]
pub struct Daisy22<I2C> {
    i2c: I2C,
    address: u8,
    line: u8,
}

impl<I2C: I2c> Daisy22<I2C> {
    /// Bind line `line` (0-7) of the expander at `address`
    pub fn new(i2c: I2C, address: u8, line: u8) -> Result<Self> {
        if line > 7 {
            return Err(HardwareError::UnknownTerminal {
                module: "Daisy-22",
                terminal: line.to_string(),
            });
        }
        Ok(Self { i2c, address, line })
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn line(&self) -> u8 {
        self.line
    }

    /// Write all eight lines
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[value])
            .map_err(HardwareError::i2c)
    }

    /// Read all eight lines
    pub fn read_byte(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .read(self.address, &mut buf)
            .map_err(HardwareError::i2c)?;
        Ok(buf[0])
    }

    pub fn on(&mut self) -> Result<()> {
        let current = self.read_byte()?;
        self.write_byte(current | self.mask())
    }

    pub fn off(&mut self) -> Result<()> {
        let current = self.read_byte()?;
        self.write_byte(current & !self.mask())
    }

    /// Level of this line, 0 or 1
    pub fn get(&mut self) -> Result<u8> {
        Ok((self.read_byte()? & self.mask()) >> self.line)
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn mask(&self) -> u8 {
        1 << self.line
    }
}

#[cfg(target_os = "linux")]
impl Daisy22<linux_embedded_hal::I2cdev> {
    /// Open `/dev/i2c-<bus>` and bind one expander line
    pub fn open(bus: u8, address: u8, line: u8) -> Result<Self> {
        Self::new(super::open_i2c(bus)?, address, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    #[test]
    fn test_on_sets_only_its_bit() {
        let expectations = [
            I2cTransaction::read(0x20, vec![0b1000_0001]),
            I2cTransaction::write(0x20, vec![0b1000_1001]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Daisy22::new(i2c.clone(), 0x20, 3).unwrap();
        dev.on().unwrap();
        i2c.done();
    }

    #[test]
    fn test_off_clears_only_its_bit() {
        let expectations = [
            I2cTransaction::read(0x21, vec![0xFF]),
            I2cTransaction::write(0x21, vec![0x7F]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Daisy22::new(i2c.clone(), 0x21, 7).unwrap();
        dev.off().unwrap();
        i2c.done();
    }

    #[test]
    fn test_get_masks_line() {
        let expectations = [
            I2cTransaction::read(0x20, vec![0b0000_0100]),
            I2cTransaction::read(0x20, vec![0b1111_1011]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Daisy22::new(i2c.clone(), 0x20, 2).unwrap();
        assert_eq!(dev.get().unwrap(), 1);
        assert_eq!(dev.get().unwrap(), 0);
        i2c.done();
    }

    #[test]
    fn test_raw_byte_access() {
        let expectations = [
            I2cTransaction::write(0x20, vec![0x5A]),
            I2cTransaction::read(0x20, vec![0x5A]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Daisy22::new(i2c.clone(), DEFAULT_ADDRESS, 0).unwrap();
        dev.write_byte(0x5A).unwrap();
        assert_eq!(dev.read_byte().unwrap(), 0x5A);
        i2c.done();
    }

    #[test]
    fn test_bus_error_aborts_write() {
        let expectations = [I2cTransaction::read(0x20, vec![0]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Daisy22::new(i2c.clone(), 0x20, 0).unwrap();
        assert!(matches!(dev.on(), Err(HardwareError::I2c(ErrorKind::Other))));
        i2c.done();
    }

    #[test]
    fn test_line_out_of_range() {
        let mut i2c = I2cMock::new(&[]);
        assert!(Daisy22::new(i2c.clone(), 0x20, 8).is_err());
        i2c.done();
    }
}
