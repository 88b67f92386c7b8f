//! Daisy-5: 8 push buttons
//!
//! <http://www.acmesystems.it/?id=DAISY-5>

use super::resolve_terminal;
use crate::error::Result;
use crate::gpio::{Direction, GpioPin, Sysfs};
use crate::pins::Pin;

pub const BUTTONS: &[(&str, &str)] = &[
    ("P1", "2"),
    ("P2", "3"),
    ("P3", "4"),
    ("P4", "5"),
    ("P5", "6"),
    ("P6", "7"),
    ("P7", "8"),
    ("P8", "9"),
];

type Handler = Box<dyn FnMut() + Send>;

/// One button of a Daisy-5 module
pub struct Daisy5 {
    line: GpioPin,
    handler_on: Option<Handler>,
    handler_off: Option<Handler>,
}

impl Daisy5 {
    /// Bind button `button` (`P1`..`P8`) as an input
    pub fn new(sysfs: Sysfs, connector: &str, button: &str) -> Result<Self> {
        let pin = resolve_terminal("Daisy-5", BUTTONS, connector, button)?;
        let line = GpioPin::open(sysfs, pin, Direction::In)?;
        Ok(Self {
            line,
            handler_on: None,
            handler_off: None,
        })
    }

    pub fn pin(&self) -> Pin {
        self.line.pin()
    }

    /// True while the button is held. Unconnected pins never read pressed.
    pub fn pressed(&self) -> Result<bool> {
        self.line.is_high()
    }

    /// Callback run by [`Daisy5::on`]
    pub fn set_on_handler(&mut self, handler: impl FnMut() + Send + 'static) {
        self.handler_on = Some(Box::new(handler));
    }

    /// Callback run by [`Daisy5::off`]
    pub fn set_off_handler(&mut self, handler: impl FnMut() + Send + 'static) {
        self.handler_off = Some(Box::new(handler));
    }

    pub fn on(&mut self) {
        if let Some(handler) = self.handler_on.as_mut() {
            handler();
        }
    }

    pub fn off(&mut self) {
        if let Some(handler) = self.handler_off.as_mut() {
            handler();
        }
    }
}

impl std::fmt::Debug for Daisy5 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Daisy5")
            .field("line", &self.line)
            .field("handler_on", &self.handler_on.is_some())
            .field("handler_off", &self.handler_off.is_some())
            .finish()
    }
}
