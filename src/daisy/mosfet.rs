//! Daisy-19: 4 mosfet outputs
//!
//! The board occupies either the first half (pins 2-5) or the second half
//! (pins 6-9) of a Daisy connector.
//!
//! <http://www.acmesystems.it/?id=DAISY-19>

use super::resolve_terminal;
use crate::error::Result;
use crate::gpio::{Direction, GpioPin, Sysfs};
use crate::pins::Pin;

pub const OUTPUTS_FIRST: &[(&str, &str)] = &[("O1", "2"), ("O2", "3"), ("O3", "4"), ("O4", "5")];

pub const OUTPUTS_SECOND: &[(&str, &str)] = &[("O1", "6"), ("O2", "7"), ("O3", "8"), ("O4", "9")];

/// Which half of the connector the module is plugged into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    First,
    Second,
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "first" => Ok(Position::First),
            "second" => Ok(Position::Second),
            other => Err(format!("unknown position: {}", other)),
        }
    }
}

/// One output of a Daisy-19 module
#[derive(Debug, Clone)]
pub struct Daisy19 {
    line: GpioPin,
}

impl Daisy19 {
    pub fn new(sysfs: Sysfs, connector: &str, position: Position, output: &str) -> Result<Self> {
        let table = match position {
            Position::First => OUTPUTS_FIRST,
            Position::Second => OUTPUTS_SECOND,
        };
        let pin = resolve_terminal("Daisy-19", table, connector, output)?;
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
