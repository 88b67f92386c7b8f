//! FOX Board G20 hardware access
//!
//! Translates connector pin names into kernel GPIO ids and drives the
//! Daisy expansion modules through the Linux userspace interfaces:
//!
//! - **Pins**: static connector tables (`J6`, `J7`, `D1`..`D8`)
//! - **GPIO**: sysfs export/direction/value primitives
//! - **Daisy modules**: relays, buttons, LEDs, mosfet outputs (GPIO),
//!   I/O expander and character LCD (I2C), graphic LCD (serial)
//! - **One-wire**: DS18B20 and DS28EA00 temperature sensors
//!
//! # Example
//!
//! ```no_run
//! use fox_daisy::daisy::Daisy11;
//! use fox_daisy::gpio::Sysfs;
//!
//! let led = Daisy11::new(Sysfs::default(), "D2", "L1")?;
//! led.on()?;
//! # Ok::<(), fox_daisy::HardwareError>(())
//! ```
//!
//! Everything is synchronous and unlocked. Operations on the same line, I2C
//! device or serial channel must not run concurrently.

pub mod config;
pub mod daisy;
pub mod error;
pub mod gpio;
pub mod onewire;
pub mod pins;
#[cfg(feature = "serial")]
pub mod serial;

pub use config::FoxConfig;
pub use error::{HardwareError, Result};
pub use pins::{lookup, Pin};
