//! Pin Registry
//!
//! Static mapping from a connector name and pin label to the kernel GPIO
//! id used by the sysfs interface, plus the connector to serial device
//! table used by the serial display module.

pub mod connector;
pub mod registry;

pub use connector::{Connector, Pin, PinEntry};
pub use registry::{connector, connector_names, lookup, serial_port_path, CONNECTORS, SERIAL_PORTS};
