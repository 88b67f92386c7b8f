//! Daisy-11: 8 LEDs
//!
//! <http://www.acmesystems.it/?id=DAISY-11>

use super::resolve_terminal;
use crate::error::Result;
use crate::gpio::{Direction, GpioPin, Sysfs};
use crate::pins::Pin;

pub const LEDS: &[(&str, &str)] = &[
    ("L1", "2"),
    ("L2", "3"),
    ("L3", "4"),
    ("L4", "5"),
    ("L5", "6"),
    ("L6", "7"),
    ("L7", "8"),
    ("L8", "9"),
];

/// One LED of a Daisy-11 module
#[derive(Debug, Clone)]
pub struct Daisy11 {
    line: GpioPin,
}

impl Daisy11 {
    /// Bind LED `led` (`L1`..`L8`); it starts switched off
    pub fn new(sysfs: Sysfs, connector: &str, led: &str) -> Result<Self> {
        let pin = resolve_terminal("Daisy-11", LEDS, connector, led)?;
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
    use crate::gpio::sysfs::fake::FakeGpio;

    #[test]
    fn test_led_on_off() {
        let fake = FakeGpio::new().with_lines(&[87]);
        let led = Daisy11::new(fake.sysfs(), "D3", "L8").unwrap();
        assert_eq!(led.pin(), Pin::Id(87));

        assert!(!led.get().unwrap());
        led.on().unwrap();
        assert!(led.get().unwrap());
        assert_eq!(fake.value(87), "1");
        led.off().unwrap();
        assert_eq!(fake.value(87), "0");
    }

    #[test]
    fn test_all_leds_resolve_on_d2() {
        let ids = [63, 62, 61, 60, 59, 58, 57, 94];
        let fake = FakeGpio::new().with_lines(&ids);
        for (i, (name, _)) in LEDS.iter().enumerate() {
            let led = Daisy11::new(fake.sysfs(), "D2", name).unwrap();
            assert_eq!(led.pin(), Pin::Id(ids[i]));
            assert_eq!(fake.direction(ids[i]), "low");
        }
    }
}
