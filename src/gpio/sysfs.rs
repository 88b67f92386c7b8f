//! Sysfs GPIO primitives
//!
//! The kernel exposes each exported line as `<root>/gpio<id>/` with a
//! `direction` file (`in`, `out`, `low`, `high`) and a `value` file (`0`,
//! `1`). Lines are exported by writing the decimal id to `<root>/export`.
//!
//! Every operation is a single open/write/close or open/read/close. There is
//! no caching and no locking: callers must not drive the same line from
//! several threads.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::{FoxConfig, DEFAULT_GPIO_ROOT};
use crate::error::{HardwareError, Result};
use crate::pins::Pin;

/// Line direction as written to the `direction` file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    /// Output, driven low on configuration
    Low,
    /// Output, driven high on configuration
    High,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Low => "low",
            Direction::High => "high",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = HardwareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "low" => Ok(Direction::Low),
            "high" => Ok(Direction::High),
            other => Err(HardwareError::MalformedReading(other.to_string())),
        }
    }
}

/// Logic level of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "0",
            Level::High => "1",
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Handle on a sysfs GPIO control directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sysfs {
    root: PathBuf,
}

impl Default for Sysfs {
    fn default() -> Self {
        Self::new(DEFAULT_GPIO_ROOT)
    }
}

impl Sysfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &FoxConfig) -> Self {
        Self::new(&config.gpio_root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Control directory of one line
    pub fn gpio_path(&self, id: u32) -> PathBuf {
        self.root.join(format!("gpio{}", id))
    }

    /// True if the line is already exported
    pub fn is_exported(&self, id: u32) -> bool {
        self.gpio_path(id).exists()
    }

    /// Export a line. No-op if its control directory already exists.
    pub fn export(&self, id: u32) -> Result<()> {
        if self.is_exported(id) {
            return Ok(());
        }
        debug!("exporting gpio{}", id);
        write_control(&self.root.join("export"), &id.to_string())
    }

    /// Release a line. No-op if it is not exported.
    pub fn unexport(&self, id: u32) -> Result<()> {
        if !self.is_exported(id) {
            return Ok(());
        }
        debug!("unexporting gpio{}", id);
        write_control(&self.root.join("unexport"), &id.to_string())
    }

    /// Write the direction (and initial level, for `low`/`high`)
    pub fn set_direction(&self, id: u32, direction: Direction) -> Result<()> {
        let dir = self.exported_path(id)?;
        debug!("gpio{}: direction {}", id, direction);
        write_control(&dir.join("direction"), direction.as_str())
    }

    /// Read back the configured direction
    pub fn get_direction(&self, id: u32) -> Result<Direction> {
        let path = self.exported_path(id)?.join("direction");
        read_control(&path)?.parse()
    }

    /// Drive an output line
    pub fn set_value(&self, id: u32, level: Level) -> Result<()> {
        let dir = self.exported_path(id)?;
        debug!("gpio{}: value {}", id, level.as_str());
        write_control(&dir.join("value"), level.as_str())
    }

    /// Read a line. `None` for pins without a GPIO line behind them.
    pub fn get_value(&self, pin: Pin) -> Result<Option<u8>> {
        let Some(id) = pin.kernel_id() else {
            return Ok(None);
        };
        let path = self.exported_path(id)?.join("value");
        let raw = read_control(&path)?;
        raw.parse::<u8>()
            .map(Some)
            .map_err(|_| HardwareError::MalformedReading(raw))
    }

    fn exported_path(&self, id: u32) -> Result<PathBuf> {
        let dir = self.gpio_path(id);
        if dir.exists() {
            Ok(dir)
        } else {
            Err(HardwareError::IoUnavailable { path: dir })
        }
    }
}

/// Write to an existing control file; sysfs files are never created
fn write_control(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| HardwareError::from_io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| HardwareError::from_io(path, e))
}

fn read_control(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| HardwareError::from_io(path, e))
}

/// Fake sysfs tree for unit tests
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use tempfile::TempDir;

    pub struct FakeGpio {
        dir: TempDir,
    }

    impl FakeGpio {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("export"), "").unwrap();
            fs::write(dir.path().join("unexport"), "").unwrap();
            Self { dir }
        }

        /// Create the control directory the kernel would create on export
        pub fn with_lines(self, ids: &[u32]) -> Self {
            for id in ids {
                let line = self.dir.path().join(format!("gpio{}", id));
                fs::create_dir(&line).unwrap();
                fs::write(line.join("direction"), "in\n").unwrap();
                fs::write(line.join("value"), "0\n").unwrap();
            }
            self
        }

        pub fn sysfs(&self) -> Sysfs {
            Sysfs::new(self.dir.path())
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn exported(&self) -> String {
            fs::read_to_string(self.dir.path().join("export")).unwrap()
        }

        pub fn direction(&self, id: u32) -> String {
            self.read(id, "direction")
        }

        pub fn value(&self, id: u32) -> String {
            self.read(id, "value")
        }

        pub fn set_input(&self, id: u32, value: &str) {
            let path = self.dir.path().join(format!("gpio{}/value", id));
            fs::write(path, value).unwrap();
        }

        fn read(&self, id: u32, file: &str) -> String {
            let path = self.dir.path().join(format!("gpio{}/{}", id, file));
            fs::read_to_string(path).unwrap().trim().to_string()
        }
    }
}
