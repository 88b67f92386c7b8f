//! GPIO pin handle
//!
//! Resolves a connector pin once, exports it and configures its direction.
//! Pins without a GPIO line (power, ground, N.C.) produce a handle whose
//! operations never touch the filesystem.
//!
//! The line is not unexported on drop: sysfs entries outlive the process.

use log::debug;

use super::sysfs::{Direction, Level, Sysfs};
use crate::error::Result;
use crate::pins::{self, Pin};

/// One exported GPIO line
#[derive(Debug, Clone)]
pub struct GpioPin {
    sysfs: Sysfs,
    pin: Pin,
}

impl GpioPin {
    /// Resolve `connector`/`label`, export the line and set its direction
    pub fn new(sysfs: Sysfs, connector: &str, label: &str, direction: Direction) -> Result<Self> {
        let pin = pins::lookup(connector, label)?;
        Self::open(sysfs, pin, direction)
    }

    /// Export and configure an already resolved pin
    pub fn open(sysfs: Sysfs, pin: Pin, direction: Direction) -> Result<Self> {
        if let Some(id) = pin.kernel_id() {
            sysfs.export(id)?;
            sysfs.set_direction(id, direction)?;
        } else {
            debug!("{}: no GPIO line, skipping export", pin);
        }
        Ok(Self { sysfs, pin })
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    pub fn on(&self) -> Result<()> {
        self.set_value(Level::High)
    }

    pub fn off(&self) -> Result<()> {
        self.set_value(Level::Low)
    }

    pub fn set_value(&self, level: Level) -> Result<()> {
        match self.pin.kernel_id() {
            Some(id) => self.sysfs.set_value(id, level),
            None => Ok(()),
        }
    }

    /// Raw level, `None` for pins without a GPIO line
    pub fn get_value(&self) -> Result<Option<u8>> {
        self.sysfs.get_value(self.pin)
    }

    /// Level as a boolean; absent and `0` both read as low
    pub fn is_high(&self) -> Result<bool> {
        Ok(matches!(self.get_value()?, Some(v) if v != 0))
    }
}
