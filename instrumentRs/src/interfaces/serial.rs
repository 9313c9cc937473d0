//! This module provides shortcuts to create an [`Instrument`] controlled via a serial port.
//!
//! It uses the blocking implementation of the [`serialport`] crate.

use std::time::Duration;

use serialport::{SerialPort, SerialPortBuilder};

use crate::{Instrument, InstrumentError};

/// Create blocking serial port instruments using the `serialport` crate.
#[derive(Debug)]
pub struct SerialInterface {}

impl SerialInterface {
    /// Try to create a new serial [`Instrument`] with the given port and baud rate.
    ///
    /// All other settings are the `serialport` defaults (8N1, no flow control). The timeout is
    /// set to three seconds. The terminator is by default set to `"\n"`; drivers set their own
    /// terminator when they are created.
    ///
    /// # Arguments
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    /// * `baud` - The baud rate.
    pub fn simple(port: &str, baud: u32) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        let spb = serialport::new(port, baud).timeout(timeout);
        Self::full(spb)
    }

    /// Try to create a new serial [`Instrument`] from a fully configured `SerialPortBuilder`.
    ///
    /// The timeout of the builder is used as the timeout of the instrument.
    ///
    /// # Arguments
    /// * `spb` - A `SerialPortBuilder` to configure the serial port. See
    ///   [`serialport::SerialPortBuilder`] and the [`serialport::new`] function for more details.
    pub fn full(spb: SerialPortBuilder) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let port = spb.open()?;
        let timeout = port.timeout();
        Ok(Instrument::new(port, timeout))
    }
}
