//! Connector registry and pin lookup

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::connector::{self, Connector, Pin};
use crate::error::{HardwareError, Result};

/// Registry of board connectors
pub static CONNECTORS: Lazy<HashMap<&'static str, &'static Connector>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("J6", &connector::J6);
    m.insert("J7", &connector::J7);
    m.insert("D1", &connector::D1);
    m.insert("D2", &connector::D2);
    m.insert("D3", &connector::D3);
    m.insert("D4", &connector::D4);
    m.insert("D5", &connector::D5);
    m.insert("D6", &connector::D6);
    m.insert("D7", &connector::D7);
    m.insert("D8", &connector::D8);
    m
});

/// Serial device behind each Daisy connector that carries a UART
pub const SERIAL_PORTS: &[(&str, &str)] = &[
    ("D1", "/dev/ttyS2"),
    ("D2", "/dev/ttyS5"),
    ("D3", "/dev/ttyS1"),
    ("D5", "/dev/ttyS6"),
    ("D6", "/dev/ttyS4"),
    ("D8", "/dev/ttyS3"),
];

/// Get a connector by name
pub fn connector(name: &str) -> Result<&'static Connector> {
    CONNECTORS
        .get(name.to_uppercase().as_str())
        .copied()
        .ok_or_else(|| HardwareError::UnknownConnector(name.to_string()))
}

/// Resolve a connector name and pin label to a GPIO line
pub fn lookup(connector_name: &str, pin_label: &str) -> Result<Pin> {
    let conn = connector(connector_name)?;
    conn.entry(pin_label)
        .map(|entry| entry.pin())
        .ok_or_else(|| HardwareError::UnknownPin {
            connector: conn.name.to_string(),
            pin: pin_label.to_string(),
        })
}

/// Connector names in board order
pub fn connector_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = CONNECTORS.keys().copied().collect();
    names.sort_by_key(|n| (!n.starts_with('J'), *n));
    names
}

/// Serial device path for a connector
pub fn serial_port_path(connector_name: &str) -> Result<&'static str> {
    let wanted = connector_name.to_uppercase();
    SERIAL_PORTS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, path)| *path)
        .ok_or_else(|| HardwareError::UnknownConnector(connector_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_documented_ids() {
        assert_eq!(lookup("J7", "3").unwrap(), Pin::Id(82));
        assert_eq!(lookup("J7", "38").unwrap(), Pin::Id(57));
        assert_eq!(lookup("J6", "3").unwrap(), Pin::Id(92));
        assert_eq!(lookup("J6", "38").unwrap(), Pin::Id(43));
        assert_eq!(lookup("D2", "9").unwrap(), Pin::Id(94));
        assert_eq!(lookup("D6", "5").unwrap(), Pin::Id(106));
        assert_eq!(lookup("D7", "7").unwrap(), Pin::Id(100));
    }

    #[test]
    fn test_lookup_every_daisy_pin() {
        // Kernel ids for labels 1..10, 0 where no GPIO line is wired
        let table: [(&str, [u32; 10]); 8] = [
            ("D1", [0, 70, 71, 92, 93, 0, 55, 56, 0, 0]),
            ("D2", [0, 63, 62, 61, 60, 59, 58, 57, 94, 0]),
            ("D3", [0, 68, 69, 90, 91, 86, 88, 89, 87, 0]),
            ("D4", [0, 0, 0, 0, 96, 97, 98, 99, 0, 0]),
            ("D5", [0, 76, 77, 80, 81, 82, 83, 84, 85, 0]),
            ("D6", [0, 74, 75, 104, 106, 95, 55, 56, 0, 0]),
            ("D7", [0, 65, 64, 66, 67, 101, 100, 99, 0, 0]),
            ("D8", [0, 72, 73, 0, 0, 0, 55, 56, 0, 0]),
        ];

        for (name, ids) in table {
            assert_eq!(connector(name).unwrap().pins().len(), 10, "{}", name);
            for (i, id) in ids.iter().enumerate() {
                let label = (i + 1).to_string();
                assert_eq!(
                    lookup(name, &label).unwrap(),
                    Pin::from_kernel_id(*id),
                    "{} pin {}",
                    name,
                    label
                );
            }
        }
    }

    #[test]
    fn test_lookup_power_pins_unconnected() {
        assert_eq!(lookup("D1", "1").unwrap(), Pin::Unconnected);
        assert_eq!(lookup("D4", "2").unwrap(), Pin::Unconnected);
        assert_eq!(lookup("D8", "5").unwrap(), Pin::Unconnected);
    }

    #[test]
    fn test_lookup_unknown_pin() {
        let err = lookup("D1", "11").unwrap_err();
        assert!(matches!(err, HardwareError::UnknownPin { .. }));

        // J6 has no pin 1 or 23
        assert!(lookup("J6", "1").is_err());
        assert!(lookup("J6", "23").is_err());
    }

    #[test]
    fn test_lookup_unknown_connector() {
        let err = lookup("J9", "3").unwrap_err();
        assert!(matches!(err, HardwareError::UnknownConnector(ref c) if c == "J9"));
    }

    #[test]
    fn test_connector_names_case_insensitive() {
        assert_eq!(connector("d3").unwrap().name, "D3");
        assert_eq!(lookup("j7", "3").unwrap(), Pin::Id(82));
    }

    #[test]
    fn test_connector_names_order() {
        let names = connector_names();
        assert_eq!(names.len(), 10);
        assert_eq!(&names[..3], &["J6", "J7", "D1"]);
        assert_eq!(names.last(), Some(&"D8"));
    }

    #[test]
    fn test_serial_port_table() {
        assert_eq!(serial_port_path("D1").unwrap(), "/dev/ttyS2");
        assert_eq!(serial_port_path("D8").unwrap(), "/dev/ttyS3");
        assert!(matches!(
            serial_port_path("D4"),
            Err(HardwareError::UnknownConnector(_))
        ));
    }
}
