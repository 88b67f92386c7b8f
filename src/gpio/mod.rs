//! GPIO access through the kernel sysfs interface
//!
//! - [`sysfs`]: stateless export/direction/value primitives keyed by kernel id
//! - [`pin`]: a pin handle resolved from a connector name and pin label

pub mod pin;
pub mod sysfs;

pub use pin::GpioPin;
pub use sysfs::{Direction, Level, Sysfs};
