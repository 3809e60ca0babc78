//! Blocking AT command driver for SIM800 series GSM modems.
//!
//! ```no_run
//! use sim800x::{Config, Modem, SerialTransport};
//! # fn run<S>(serial: S, ticks: fn() -> u32) -> sim800x::Result<()>
//! # where S: embedded_io::Read + embedded_io::Write + embedded_io::ReadReady {
//! let mut modem = Modem::new(SerialTransport::new(serial, ticks), ticks, Config::default());
//! modem.setup()?;
//! let quality = modem.get_signal_quality()?;
//! modem.handle_urcs(|urc| log::info!("URC: {}", urc.as_str()));
//! # Ok(()) }
//! ```

#![no_std]

extern crate alloc;

pub mod at;
mod config;
mod error;
pub mod modem;

pub use config::Config;
pub use error::{Error, Result};
pub use modem::{Clock, Modem, SerialTransport, Transport, Urc, UrcKind, UrcQueue};
pub use modem_types as types;
