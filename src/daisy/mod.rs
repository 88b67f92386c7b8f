//! Daisy module façades
//!
//! Each Daisy board plugs into a 10-pin Daisy connector and uses pins
//! `2`..`9`. The façades map the board's own terminal names (DIP3, P1,
//! L8, O2, ...) to connector pins and drive them through sysfs, or hold an
//! I2C/serial channel for the bus-attached boards.
//!
//! | Module   | Function             | Interface |
//! |----------|----------------------|-----------|
//! | Daisy-4  | 8 relays             | GPIO      |
//! | Daisy-5  | 8 push buttons       | GPIO      |
//! | Daisy-11 | 8 LEDs               | GPIO      |
//! | Daisy-15 | 4D Systems graphic LCD | serial  |
//! | Daisy-19 | 4 mosfet outputs     | GPIO      |
//! | Daisy-22 | 8-bit I/O expander   | I2C       |
//! | Daisy-24 | 16x2 character LCD   | I2C       |

pub mod buttons;
pub mod display;
pub mod expander;
pub mod lcd;
pub mod leds;
pub mod mosfet;
pub mod relay;

pub use buttons::Daisy5;
pub use display::Daisy15;
pub use expander::Daisy22;
pub use lcd::Daisy24;
pub use leds::Daisy11;
pub use mosfet::{Daisy19, Position};
pub use relay::Daisy4;

use crate::error::{HardwareError, Result};
use crate::pins::{self, Pin};

/// Resolve a module terminal to the pin it occupies on `connector`
pub(crate) fn resolve_terminal(
    module: &'static str,
    table: &[(&str, &str)],
    connector: &str,
    terminal: &str,
) -> Result<Pin> {
    let label = table
        .iter()
        .find(|(name, _)| *name == terminal)
        .map(|(_, label)| *label)
        .ok_or_else(|| HardwareError::UnknownTerminal {
            module,
            terminal: terminal.to_string(),
        })?;
    pins::lookup(connector, label)
}

/// Open the Linux I2C character device for `bus`
#[cfg(target_os = "linux")]
pub(crate) fn open_i2c(bus: u8) -> Result<linux_embedded_hal::I2cdev> {
    let path = std::path::PathBuf::from(format!("/dev/i2c-{}", bus));
    linux_embedded_hal::I2cdev::new(&path).map_err(|e| HardwareError::Io {
        path,
        source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
    })
}
