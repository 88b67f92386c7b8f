//! Runtime configuration
//!
//! Paths to the kernel control surfaces, the I2C bus index and serial
//! settings. Defaults match a stock FOX Board G20 kernel; a TOML file can
//! override any of them.
//!
//! ```toml
//! gpio_root = "/sys/class/gpio"
//! i2c_bus = 0
//!
//! [serial_ports]
//! D1 = "/dev/ttyS2"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HardwareError, Result};

/// Default sysfs GPIO control directory
pub const DEFAULT_GPIO_ROOT: &str = "/sys/class/gpio";

/// Default one-wire bus master directory
pub const DEFAULT_W1_ROOT: &str = "/sys/bus/w1/devices/w1 bus master";

/// Default serial read timeout in milliseconds
pub const DEFAULT_SERIAL_TIMEOUT_MS: u64 = 1000;

/// Hardware access configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoxConfig {
    /// Root of the GPIO control surface (contains `export`, `gpioN/`)
    pub gpio_root: PathBuf,
    /// One-wire bus master directory
    pub w1_root: PathBuf,
    /// I2C bus index (`/dev/i2c-N`)
    pub i2c_bus: u8,
    /// Serial read timeout
    pub serial_timeout_ms: u64,
    /// Connector name to serial device overrides
    pub serial_ports: HashMap<String, String>,
}

impl Default for FoxConfig {
    fn default() -> Self {
        Self {
            gpio_root: PathBuf::from(DEFAULT_GPIO_ROOT),
            w1_root: PathBuf::from(DEFAULT_W1_ROOT),
            i2c_bus: 0,
            serial_timeout_ms: DEFAULT_SERIAL_TIMEOUT_MS,
            serial_ports: HashMap::new(),
        }
    }
}

impl FoxConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HardwareError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HardwareError::Config(e.to_string()))
    }

    /// Set the GPIO control root
    pub fn with_gpio_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.gpio_root = root.into();
        self
    }

    /// Set the one-wire bus directory
    pub fn with_w1_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.w1_root = root.into();
        self
    }

    /// Set the I2C bus index
    pub fn with_i2c_bus(mut self, bus: u8) -> Self {
        self.i2c_bus = bus;
        self
    }

    /// Serial read timeout as a `Duration`
    pub fn serial_timeout(&self) -> Duration {
        Duration::from_millis(self.serial_timeout_ms)
    }

    /// Resolve the serial device for a connector, honouring overrides
    pub fn serial_port_path(&self, connector: &str) -> Result<String> {
        if let Some(path) = self.serial_ports.get(connector) {
            return Ok(path.clone());
        }
        crate::pins::serial_port_path(connector).map(str::to_string)
    }

    /// Path of the I2C character device for the configured bus
    pub fn i2c_device_path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/i2c-{}", self.i2c_bus))
    }
}
