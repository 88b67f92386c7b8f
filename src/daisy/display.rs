//! Daisy-15: 4D Systems serial graphic LCD
//!
//! The display speaks a byte-oriented command protocol at 9600 baud 8N1 and
//! answers every command with exactly one byte (`0x06` ACK, `0x15` NAK).
//! The reply must be consumed before the next command is sent.
//!
//! <http://www.acmesystems.it/?id=DAISY-15>

use std::io::{Read, Write};

use log::{debug, warn};

use crate::error::{HardwareError, Result};

/// Display baud rate
pub const BAUD_RATE: u32 = 9600;

const AUTOBAUD: u8 = b'U';
const CLEAR_SCREEN: u8 = b'E';
const STRING_TEXT: u8 = b's';
const FONT_8X12: u8 = 0x02;
const COLOR_WHITE: [u8; 2] = [0xFF, 0xFF];

const ACK: u8 = 0x06;

/// Daisy-15 display on a serial channel
#[derive(Debug)]
pub struct Daisy15<T> {
    channel: T,
}

impl<T: Read + Write> Daisy15<T> {
    /// Synchronise the baud rate and clear the screen
    pub fn new(channel: T) -> Result<Self> {
        let mut display = Self { channel };
        display.command(&[AUTOBAUD])?;
        display.command(&[CLEAR_SCREEN])?;
        Ok(display)
    }

    /// Print `text` at text position `col`/`row`
    pub fn send(&mut self, col: u8, row: u8, text: &str) -> Result<()> {
        let mut frame = Vec::with_capacity(text.len() + 7);
        frame.extend_from_slice(&[STRING_TEXT, row, col, FONT_8X12]);
        frame.extend_from_slice(&COLOR_WHITE);
        frame.extend_from_slice(text.as_bytes());
        frame.push(0x00);
        self.command(&frame)
    }

    /// Give back the channel
    pub fn release(self) -> T {
        self.channel
    }

    fn command(&mut self, frame: &[u8]) -> Result<()> {
        debug!("daisy-15: sending {} bytes", frame.len());
        self.channel
            .write_all(frame)
            .and_then(|_| self.channel.flush())
            .map_err(|e| HardwareError::Serial(format!("write failed: {}", e)))?;

        let mut reply = [0u8; 1];
        match self.channel.read(&mut reply) {
            Ok(1) => {
                if reply[0] != ACK {
                    warn!("daisy-15: command {:#04x} answered {:#04x}", frame[0], reply[0]);
                }
                Ok(())
            }
            Ok(_) => Err(HardwareError::Serial("no reply from display".to_string())),
            Err(e) => Err(HardwareError::Serial(format!("read failed: {}", e))),
        }
    }
}

#[cfg(feature = "serial")]
impl Daisy15<crate::serial::SerialConnection> {
    /// Open the UART behind `connector` and initialise the display
    pub fn open(connector: &str, config: &crate::config::FoxConfig) -> Result<Self> {
        let path = config.serial_port_path(connector)?;
        let port = crate::serial::PortConfig::new(&path)
            .with_baud_rate(BAUD_RATE)
            .with_timeout(config.serial_timeout());
        Self::new(crate::serial::SerialConnection::open(port)?)
    }
}
