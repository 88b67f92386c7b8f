//! Error types for FOX Board hardware access
//!
//! Every fallible operation in the library returns [`HardwareError`]. Missing
//! hardware is reported rather than silently skipped, so callers decide
//! whether to ignore it or propagate it.

use std::io;
use std::path::PathBuf;

use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

/// Errors raised by pin lookups and device I/O
#[derive(Debug, Error)]
pub enum HardwareError {
    /// Connector name not present in the pin tables
    #[error("unknown connector: {0}")]
    UnknownConnector(String),

    /// Pin label not present on the given connector
    #[error("unknown pin {pin} on connector {connector}")]
    UnknownPin { connector: String, pin: String },

    /// Terminal name (DIP1, P3, L8, O2, ...) not present on a Daisy module
    #[error("unknown terminal {terminal} on {module}")]
    UnknownTerminal { module: &'static str, terminal: String },

    /// Control path missing (GPIO not exported, export file absent, ...)
    #[error("control path not available: {}", path.display())]
    IoUnavailable { path: PathBuf },

    /// Control path exists but the read or write failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One-wire bus or sensor device directory missing
    #[error("one-wire sensor not available: {}", path.display())]
    SensorUnavailable { path: PathBuf },

    /// One-wire reading flagged as failing its CRC check
    #[error("wrong CRC in one-wire reading from {sensor}")]
    CrcMismatch { sensor: String },

    /// Device content could not be parsed
    #[error("malformed reading: {0:?}")]
    MalformedReading(String),

    /// I2C bus transfer failed
    #[error("I2C error: {0:?}")]
    I2c(ErrorKind),

    /// Serial channel failed or the device did not acknowledge
    #[error("serial error: {0}")]
    Serial(String),

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl HardwareError {
    /// Wrap an `io::Error`, mapping `NotFound` to [`HardwareError::IoUnavailable`]
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            HardwareError::IoUnavailable { path }
        } else {
            HardwareError::Io { path, source }
        }
    }

    /// Convert any `embedded-hal` I2C error into its portable kind
    pub(crate) fn i2c<E: embedded_hal::i2c::Error>(err: E) -> Self {
        HardwareError::I2c(err.kind())
    }

    /// True when the error means the hardware is simply absent
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            HardwareError::IoUnavailable { .. } | HardwareError::SensorUnavailable { .. }
        )
    }
}

/// Library result type
pub type Result<T> = std::result::Result<T, HardwareError>;
