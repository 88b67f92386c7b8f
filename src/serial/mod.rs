//! Serial channels for UART-attached Daisy modules
//!
//! The Daisy connectors D1, D2, D3, D5, D6 and D8 each carry one of the
//! SoC UARTs. This module opens them with fixed framing for the modules
//! that talk over serial (the Daisy-15 display).

pub mod port;

pub use port::{PortConfig, SerialConnection};
