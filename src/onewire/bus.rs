//! One-wire bus enumeration

use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::config::{FoxConfig, DEFAULT_W1_ROOT};
use crate::error::{HardwareError, Result};

/// DS18B20 family code
pub const FAMILY_DS18B20: &str = "28";

/// DS28EA00 family code
pub const FAMILY_DS28EA00: &str = "42";

/// Handle on the one-wire bus master directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct W1Bus {
    root: PathBuf,
}

impl Default for W1Bus {
    fn default() -> Self {
        Self::new(DEFAULT_W1_ROOT)
    }
}

impl W1Bus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &FoxConfig) -> Self {
        Self::new(&config.w1_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Directory of a device, e.g. `<root>/28-0000025a1b2c`
    pub fn device_path(&self, family: &str, id: &str) -> PathBuf {
        self.root.join(format!("{}-{}", family, id))
    }

    /// Serial ids of the DS18B20 sensors on the bus
    pub fn list_sensors(&self) -> Result<Vec<String>> {
        self.list_family(FAMILY_DS18B20)
    }

    /// Serial ids of all devices of one family, sorted. Entries are named
    /// `<family>-<id>`.
    pub fn list_family(&self, family: &str) -> Result<Vec<String>> {
        if !self.exists() {
            warn!("1-wire bus not found at {}", self.root.display());
            warn!("Check if the 1-wire bus is installed");
            return Err(HardwareError::SensorUnavailable {
                path: self.root.clone(),
            });
        }

        let prefix = format!("{}-", family);
        let ids = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                let id = name.strip_prefix(&prefix)?;
                (!id.is_empty()).then(|| id.to_string())
            })
            .collect();

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_list_sensors_filters_family() {
        let dir = tempdir().unwrap();
        for name in ["28-aabbcc", "42-ddeeff", "somethingelse"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let bus = W1Bus::new(dir.path());
        assert_eq!(bus.list_sensors().unwrap(), vec!["aabbcc".to_string()]);
        assert_eq!(bus.list_family("42").unwrap(), vec!["ddeeff".to_string()]);
    }

    #[test]
    fn test_list_family_needs_full_code() {
        let dir = tempdir().unwrap();
        for name in ["28-aabbcc", "281-x", "28", "28-"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let bus = W1Bus::new(dir.path());
        assert!(bus.list_family("2").unwrap().is_empty());
        assert_eq!(bus.list_family("28").unwrap(), vec!["aabbcc".to_string()]);
    }

    #[test]
    fn test_list_sorted() {
        let dir = tempdir().unwrap();
        for name in ["28-0003", "28-0001", "28-0002"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        let ids = W1Bus::new(dir.path()).list_sensors().unwrap();
        assert_eq!(ids, vec!["0001", "0002", "0003"]);
    }

    #[test]
    fn test_empty_bus() {
        let dir = tempdir().unwrap();
        assert!(W1Bus::new(dir.path()).list_sensors().unwrap().is_empty());
    }

    #[test]
    fn test_missing_bus() {
        let bus = W1Bus::new("/nonexistent/w1 bus master");
        assert!(!bus.exists());
        assert!(matches!(
            bus.list_sensors(),
            Err(HardwareError::SensorUnavailable { .. })
        ));
    }

    #[test]
    fn test_device_path() {
        let bus = W1Bus::new("/w1");
        assert_eq!(bus.device_path("28", "abc"), PathBuf::from("/w1/28-abc"));
    }
}
