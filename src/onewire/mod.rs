//! One-wire temperature sensors
//!
//! The kernel `w1` subsystem exposes each device found on the bus as a
//! directory named `<family>-<serial>` under the bus master directory.
//! Family `28` is the DS18B20, family `42` the DS28EA00.

pub mod bus;
pub mod sensor;

pub use bus::W1Bus;
pub use sensor::{parse_reading, Ds18b20, Ds28ea00, SensorKind};
