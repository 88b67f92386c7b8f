//! Daisy-4: 8 relay outputs selected by DIP switch
//!
//! <http://www.acmesystems.it/?id=DAISY-4>

use super::resolve_terminal;
use crate::error::Result;
use crate::gpio::{Direction, GpioPin, Sysfs};
use crate::pins::Pin;

/// DIP switch to connector pin
pub const DIPS: &[(&str, &str)] = &[
    ("DIP1", "2"),
    ("DIP2", "3"),
    ("DIP3", "4"),
    ("DIP4", "5"),
    ("DIP5", "6"),
    ("DIP6", "7"),
    ("DIP7", "8"),
    ("DIP8", "9"),
];

/// One relay of a Daisy-4 module
#[derive(Debug, Clone)]
pub struct Daisy4 {
    line: GpioPin,
}

impl Daisy4 {
    /// Bind the relay selected by `dip`. The relay starts released.
    pub fn new(sysfs: Sysfs, connector: &str, dip: &str) -> Result<Self> {
        let pin = resolve_terminal("Daisy-4", DIPS, connector, dip)?;
        let line = GpioPin::open(sysfs, pin, Direction::Low)?;
        Ok(Self { line })
    }

    pub fn pin(&self) -> Pin {
        self.line.pin()
    }

    pub fn on(&self) -> Result<()> {
        self.line.on()
    }

    pub fn off(&self) -> Result<()> {
        self.line.off()
    }

    pub fn get(&self) -> Result<bool> {
        self.line.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HardwareError;
    use crate::gpio::sysfs::fake::FakeGpio;

    #[test]
    fn test_relay_switching() {
        let fake = FakeGpio::new().with_lines(&[77]);
        let relay = Daisy4::new(fake.sysfs(), "D5", "DIP2").unwrap();

        assert_eq!(relay.pin(), Pin::Id(77));
        assert_eq!(fake.direction(77), "low");

        relay.on().unwrap();
        assert_eq!(fake.value(77), "1");
        assert!(relay.get().unwrap());

        relay.off().unwrap();
        assert!(!relay.get().unwrap());
    }

    #[test]
    fn test_relay_on_unconnected_pin() {
        // D8 pin 4 is N.C.
        let fake = FakeGpio::new();
        let relay = Daisy4::new(fake.sysfs(), "D8", "DIP3").unwrap();
        assert_eq!(relay.pin(), Pin::Unconnected);
        relay.on().unwrap();
        relay.off().unwrap();
        assert!(!relay.get().unwrap());
        assert_eq!(fake.exported(), "");
    }

    #[test]
    fn test_unknown_dip() {
        let fake = FakeGpio::new();
        let err = Daisy4::new(fake.sysfs(), "D5", "DIP9").unwrap_err();
        assert!(matches!(err, HardwareError::UnknownTerminal { .. }));
    }
}
