//! DS18B20 and DS28EA00 temperature sensors
//!
//! Both drivers publish a text reading that ends with `t=<value>`. When the
//! kernel's CRC check of the scratchpad fails, the first line carries `NO`
//! instead of `YES`:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! The DS18B20 value is in millidegrees and is scaled to °C. The DS28EA00
//! value is returned unscaled, exactly as the driver reports it. The two
//! sensors therefore do not return the same unit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use super::bus::{W1Bus, FAMILY_DS18B20, FAMILY_DS28EA00};
use crate::error::{HardwareError, Result};

/// Supported one-wire sensor families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Ds18b20,
    Ds28ea00,
}

impl SensorKind {
    pub fn family(&self) -> &'static str {
        match self {
            SensorKind::Ds18b20 => FAMILY_DS18B20,
            SensorKind::Ds28ea00 => FAMILY_DS28EA00,
        }
    }

    /// Name of the reading file inside the device directory
    pub fn reading_file(&self) -> &'static str {
        match self {
            SensorKind::Ds18b20 => "w1_slave",
            SensorKind::Ds28ea00 => "therm",
        }
    }

    fn scale(&self, raw: f64) -> f64 {
        match self {
            SensorKind::Ds18b20 => raw / 1000.0,
            SensorKind::Ds28ea00 => raw,
        }
    }
}

/// Extract the raw `t=` value from a reading.
///
/// Fails with [`HardwareError::CrcMismatch`] if the reading contains the
/// `NO` marker, and with [`HardwareError::MalformedReading`] if there is no
/// parsable `t=` field.
pub fn parse_reading(text: &str, sensor: &str) -> Result<f64> {
    if text.contains("NO") {
        return Err(HardwareError::CrcMismatch {
            sensor: sensor.to_string(),
        });
    }

    let start = text
        .find("t=")
        .ok_or_else(|| HardwareError::MalformedReading(text.to_string()))?;
    let value = text[start + 2..]
        .split_whitespace()
        .next()
        .unwrap_or_default();
    value
        .parse::<f64>()
        .map_err(|_| HardwareError::MalformedReading(text.to_string()))
}

/// Sensor state shared by both families
#[derive(Debug, Clone)]
struct W1Sensor {
    kind: SensorKind,
    id: String,
    path: PathBuf,
    available: bool,
}

impl W1Sensor {
    fn new(bus: &W1Bus, kind: SensorKind, id: &str) -> Self {
        let path = bus.device_path(kind.family(), id);
        let available = if !bus.exists() {
            warn!("1-wire bus not found");
            false
        } else if !path.exists() {
            warn!("Sensor {} not found", id);
            false
        } else {
            true
        };

        Self {
            kind,
            id: id.to_string(),
            path,
            available,
        }
    }

    fn try_new(bus: &W1Bus, kind: SensorKind, id: &str) -> Result<Self> {
        let sensor = Self::new(bus, kind, id);
        if !sensor.available {
            let path = if bus.exists() {
                sensor.path
            } else {
                bus.root().to_path_buf()
            };
            return Err(HardwareError::SensorUnavailable { path });
        }
        Ok(sensor)
    }

    fn read_raw(&self) -> Result<String> {
        if !self.available {
            return Err(HardwareError::SensorUnavailable {
                path: self.path.clone(),
            });
        }
        let file = self.path.join(self.kind.reading_file());
        fs::read_to_string(&file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => HardwareError::SensorUnavailable { path: file },
            _ => HardwareError::Io { path: file, source: e },
        })
    }

    fn get_temp(&self) -> Result<f64> {
        let text = self.read_raw()?;
        match parse_reading(&text, &self.id) {
            Ok(raw) => Ok(self.kind.scale(raw)),
            Err(err @ HardwareError::CrcMismatch { .. }) => {
                warn!("Wrong CRC");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

/// DS18B20 digital thermometer
#[derive(Debug, Clone)]
pub struct Ds18b20 {
    inner: W1Sensor,
}

impl Ds18b20 {
    /// Bind sensor `id`. A missing bus or device is logged; reads then
    /// fail with [`HardwareError::SensorUnavailable`].
    pub fn new(bus: &W1Bus, id: &str) -> Self {
        Self {
            inner: W1Sensor::new(bus, SensorKind::Ds18b20, id),
        }
    }

    /// Bind sensor `id`, failing if it is not on the bus
    pub fn try_new(bus: &W1Bus, id: &str) -> Result<Self> {
        W1Sensor::try_new(bus, SensorKind::Ds18b20, id).map(|inner| Self { inner })
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn is_available(&self) -> bool {
        self.inner.available
    }

    /// Temperature in °C
    pub fn get_temp(&self) -> Result<f64> {
        self.inner.get_temp()
    }
}

/// DS28EA00 digital thermometer with sequence detect
#[derive(Debug, Clone)]
pub struct Ds28ea00 {
    inner: W1Sensor,
}

impl Ds28ea00 {
    /// Bind sensor `id`. A missing bus or device is logged; reads then
    /// fail with [`HardwareError::SensorUnavailable`].
    pub fn new(bus: &W1Bus, id: &str) -> Self {
        Self {
            inner: W1Sensor::new(bus, SensorKind::Ds28ea00, id),
        }
    }

    /// Bind sensor `id`, failing if it is not on the bus
    pub fn try_new(bus: &W1Bus, id: &str) -> Result<Self> {
        W1Sensor::try_new(bus, SensorKind::Ds28ea00, id).map(|inner| Self { inner })
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    pub fn is_available(&self) -> bool {
        self.inner.available
    }

    /// Raw `t=` value as reported by the driver, not scaled
    pub fn get_temp(&self) -> Result<f64> {
        self.inner.get_temp()
    }
}
