//! Connector pin tables for the FOX Board G20
//!
//! Each table lists the pin label printed on the board and the kernel GPIO
//! id behind it. Power, ground and unconnected pins carry id `0`.

use std::fmt;

/// A resolved GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pin {
    /// Handle never resolved to a connector pin
    #[default]
    Unset,
    /// Power, ground or N.C. pin: no GPIO line behind it
    Unconnected,
    /// Kernel GPIO id
    Id(u32),
}

impl Pin {
    /// Build from a raw table id, where `0` means "no GPIO"
    pub const fn from_kernel_id(id: u32) -> Self {
        if id == 0 {
            Pin::Unconnected
        } else {
            Pin::Id(id)
        }
    }

    /// Kernel id if this pin addresses a real line
    pub const fn kernel_id(&self) -> Option<u32> {
        match self {
            Pin::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// True if this pin addresses a real line
    pub const fn is_connected(&self) -> bool {
        matches!(self, Pin::Id(_))
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pin::Unset => write!(f, "unset"),
            Pin::Unconnected => write!(f, "n.c."),
            Pin::Id(id) => write!(f, "gpio{}", id),
        }
    }
}

/// One labelled pin on a connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEntry {
    /// Label printed next to the pin ("1".."40")
    pub label: &'static str,
    /// Kernel GPIO id, `0` for power/ground/N.C.
    pub kernel_id: u32,
    /// SoC signal or supply name, where documented
    pub signal: Option<&'static str>,
}

impl PinEntry {
    const fn gpio(label: &'static str, kernel_id: u32) -> Self {
        Self { label, kernel_id, signal: None }
    }

    const fn named(label: &'static str, kernel_id: u32, signal: &'static str) -> Self {
        Self { label, kernel_id, signal: Some(signal) }
    }

    /// The pin as a [`Pin`] value
    pub const fn pin(&self) -> Pin {
        Pin::from_kernel_id(self.kernel_id)
    }
}

/// A physical header on the board
#[derive(Debug, PartialEq, Eq)]
pub struct Connector {
    pub name: &'static str,
    pub description: &'static str,
    pins: &'static [PinEntry],
}

impl Connector {
    /// Find the entry for a pin label
    pub fn entry(&self, label: &str) -> Option<&'static PinEntry> {
        self.pins.iter().find(|p| p.label == label)
    }

    /// All pins in table order
    pub fn pins(&self) -> &'static [PinEntry] {
        self.pins
    }

    /// Pins backed by a GPIO line
    pub fn gpio_pins(&self) -> impl Iterator<Item = &'static PinEntry> {
        self.pins.iter().filter(|p| p.kernel_id != 0)
    }
}

pub const J6: Connector = Connector {
    name: "J6",
    description: "40-pin expansion header",
    pins: &[
        PinEntry::gpio("3", 92),
        PinEntry::gpio("4", 71),
        PinEntry::gpio("5", 70),
        PinEntry::gpio("6", 93),
        PinEntry::gpio("7", 90),
        PinEntry::gpio("8", 69),
        PinEntry::gpio("9", 68),
        PinEntry::gpio("10", 91),
        PinEntry::gpio("13", 75),
        PinEntry::gpio("14", 74),
        PinEntry::gpio("15", 77),
        PinEntry::gpio("16", 76),
        PinEntry::gpio("17", 85),
        PinEntry::gpio("18", 84),
        PinEntry::gpio("19", 95),
        PinEntry::gpio("20", 94),
        PinEntry::gpio("21", 63),
        PinEntry::gpio("22", 62),
        PinEntry::gpio("24", 38),
        PinEntry::gpio("25", 39),
        PinEntry::gpio("26", 41),
        PinEntry::gpio("27", 99),
        PinEntry::gpio("28", 98),
        PinEntry::gpio("29", 97),
        PinEntry::gpio("30", 96),
        PinEntry::gpio("31", 56),
        PinEntry::gpio("32", 55),
        PinEntry::gpio("36", 42),
        PinEntry::gpio("37", 54),
        PinEntry::gpio("38", 43),
    ],
};

pub const J7: Connector = Connector {
    name: "J7",
    description: "40-pin expansion header",
    pins: &[
        PinEntry::gpio("3", 82),
        PinEntry::gpio("4", 83),
        PinEntry::gpio("5", 80),
        PinEntry::gpio("6", 81),
        PinEntry::gpio("7", 66),
        PinEntry::gpio("8", 67),
        PinEntry::gpio("9", 64),
        PinEntry::gpio("10", 65),
        PinEntry::gpio("11", 110),
        PinEntry::gpio("12", 111),
        PinEntry::gpio("13", 108),
        PinEntry::gpio("14", 109),
        PinEntry::gpio("15", 105),
        PinEntry::gpio("16", 106),
        PinEntry::gpio("17", 103),
        PinEntry::gpio("18", 104),
        PinEntry::gpio("19", 101),
        PinEntry::gpio("20", 102),
        PinEntry::gpio("21", 73),
        PinEntry::gpio("22", 72),
        PinEntry::gpio("31", 87),
        PinEntry::gpio("32", 86),
        PinEntry::gpio("33", 89),
        PinEntry::gpio("34", 88),
        PinEntry::gpio("35", 60),
        PinEntry::gpio("36", 59),
        PinEntry::gpio("37", 58),
        PinEntry::gpio("38", 57),
    ],
};

pub const D1: Connector = Connector {
    name: "D1",
    description: "Daisy connector (ttyS2)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 70, "PB6"),
        PinEntry::named("3", 71, "PB7"),
        PinEntry::named("4", 92, "PB28"),
        PinEntry::named("5", 93, "PB29"),
        PinEntry::named("6", 0, "N.C."),
        PinEntry::named("7", 55, "PA23"),
        PinEntry::named("8", 56, "PA24"),
        PinEntry::named("9", 0, "5V0"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D2: Connector = Connector {
    name: "D2",
    description: "Daisy connector (ttyS5)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 63, "PA31"),
        PinEntry::named("3", 62, "PA30"),
        PinEntry::named("4", 61, "PA29"),
        PinEntry::named("5", 60, "PA28"),
        PinEntry::named("6", 59, "PA27"),
        PinEntry::named("7", 58, "PA26"),
        PinEntry::named("8", 57, "PA25"),
        PinEntry::named("9", 94, "PB30"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D3: Connector = Connector {
    name: "D3",
    description: "Daisy connector (ttyS1)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 68, "PB4"),
        PinEntry::named("3", 69, "PB5"),
        PinEntry::named("4", 90, "PB26"),
        PinEntry::named("5", 91, "PB27"),
        PinEntry::named("6", 86, "PB22"),
        PinEntry::named("7", 88, "PB24"),
        PinEntry::named("8", 89, "PB25"),
        PinEntry::named("9", 87, "PB23"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D4: Connector = Connector {
    name: "D4",
    description: "Daisy connector (analog)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 0, "AVDD"),
        PinEntry::named("3", 0, "VREF"),
        PinEntry::named("4", 0, "AGND"),
        PinEntry::named("5", 96, "PC0"),
        PinEntry::named("6", 97, "PC1"),
        PinEntry::named("7", 98, "PC2"),
        PinEntry::named("8", 99, "PC3"),
        PinEntry::named("9", 0, "5V0"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D5: Connector = Connector {
    name: "D5",
    description: "Daisy connector (ttyS6)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 76, "PB12"),
        PinEntry::named("3", 77, "PB13"),
        PinEntry::named("4", 80, "PB16"),
        PinEntry::named("5", 81, "PB17"),
        PinEntry::named("6", 82, "PB18"),
        PinEntry::named("7", 83, "PB19"),
        PinEntry::named("8", 84, "PB20"),
        PinEntry::named("9", 85, "PB21"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D6: Connector = Connector {
    name: "D6",
    description: "Daisy connector (ttyS4)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 74, "PB10"),
        PinEntry::named("3", 75, "PB11"),
        PinEntry::named("4", 104, "PC8"),
        PinEntry::named("5", 106, "PC10"),
        PinEntry::named("6", 95, "PB31"),
        PinEntry::named("7", 55, "PA23"),
        PinEntry::named("8", 56, "PA24"),
        PinEntry::named("9", 0, "5V0"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D7: Connector = Connector {
    name: "D7",
    description: "Daisy connector",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 65, "PB1"),
        PinEntry::named("3", 64, "PB0"),
        PinEntry::named("4", 66, "PB2"),
        PinEntry::named("5", 67, "PB3"),
        PinEntry::named("6", 101, "PC5"),
        PinEntry::named("7", 100, "PC4"),
        PinEntry::named("8", 99, "PC3"),
        PinEntry::named("9", 0, "5V0"),
        PinEntry::named("10", 0, "GND"),
    ],
};

pub const D8: Connector = Connector {
    name: "D8",
    description: "Daisy connector (ttyS3)",
    pins: &[
        PinEntry::named("1", 0, "3V3"),
        PinEntry::named("2", 72, "PB8"),
        PinEntry::named("3", 73, "PB9"),
        PinEntry::named("4", 0, "N.C."),
        PinEntry::named("5", 0, "N.C."),
        PinEntry::named("6", 0, "N.C."),
        PinEntry::named("7", 55, "PA23"),
        PinEntry::named("8", 56, "PA24"),
        PinEntry::named("9", 0, "5V0"),
        PinEntry::named("10", 0, "GND"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_from_kernel_id() {
        assert_eq!(Pin::from_kernel_id(0), Pin::Unconnected);
        assert_eq!(Pin::from_kernel_id(82), Pin::Id(82));
        assert_eq!(Pin::default(), Pin::Unset);
        assert_eq!(Pin::Unset.kernel_id(), None);
        assert!(!Pin::Unconnected.is_connected());
    }

    #[test]
    fn test_daisy_connectors_have_ten_pins() {
        for conn in [&D1, &D2, &D3, &D4, &D5, &D6, &D7, &D8] {
            assert_eq!(conn.pins().len(), 10, "{}", conn.name);
            assert_eq!(conn.entry("10").map(|p| p.signal), Some(Some("GND")));
        }
    }

    #[test]
    fn test_gpio_pins_skip_supplies() {
        let labels: Vec<&str> = D8.gpio_pins().map(|p| p.label).collect();
        assert_eq!(labels, vec!["2", "3", "7", "8"]);
    }

    #[test]
    fn test_labels_unique() {
        for conn in [&J6, &J7, &D1, &D2, &D3, &D4, &D5, &D6, &D7, &D8] {
            for (i, a) in conn.pins().iter().enumerate() {
                assert!(
                    conn.pins()[i + 1..].iter().all(|b| b.label != a.label),
                    "duplicate label {} on {}",
                    a.label,
                    conn.name
                );
            }
        }
    }
}
