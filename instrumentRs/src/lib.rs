//! InstrumentRs: Talk to your laboratory test equipment from Rust
//!
//! The InstrumentRs library provides the standardized interfaces that all drivers in this
//! workspace are written against. It provides the [`InstrumentInterface`] trait and its
//! implementations, the [`InstrumentError`] error type that instrument drivers return, and a few
//! helpers for host-side validation of values before they are sent to an instrument.
//!
//! # Currently implemented interfaces are:
//! - Serial (blocking) using the [`serialport`] crate, enable with the `serial` feature.
//! - TCP/IP (blocking) using [`std::net::TcpStream`].
//! - Any other type that implements [`std::io::Read`] and [`std::io::Write`] via [`Instrument`].
//!
//! For testing, the [`LoopbackInterfaceString`] and [`LoopbackInterfaceBytes`] interfaces allow
//! you to script the exact traffic between host and instrument.
//!
//! # Goals and non-goals of this project
//!
//! The drivers only map named parameters of an instrument to the command strings it understands
//! and parse the answers into typed values. Session management (VISA, GPIB, USB-HID backends) is
//! not part of this project: any transport that can be expressed as an [`InstrumentInterface`]
//! can be used with every driver.
//!
//! # License
//!
//! Licensed under either of
//!
//! - Apache License, Version 2.0 ([LICENSE-APACHE](http://www.apache.org/licenses/LICENSE-2.0))
//! - MIT license ([LICENSE-MIT](http://opensource.org/licenses/MIT))
//!
//! at your option.

#![warn(missing_docs)]

mod instrument;
mod interfaces;
mod loopback;
mod on_off;
pub mod validate;

pub use instrument::{Instrument, InstrumentError};
#[cfg(feature = "serial")]
pub use interfaces::serial::SerialInterface;
pub use interfaces::tcp_ip::TcpIpInterface;
pub use loopback::{LoopbackInterfaceBytes, LoopbackInterfaceString};
pub use on_off::OnOff;

use std::{
    io::ErrorKind,
    time::{Duration, Instant},
};

/// The `InstrumentInterface` trait defines the interface for controlling instruments.
///
/// Only reading an exact number of bytes and writing raw bytes must be provided by an
/// implementation. Everything else, i.e., sending commands with terminators, reading answers,
/// and reading binary blocks, is built on top of these two methods.
pub trait InstrumentInterface {
    /// Read exactly as many bytes from the instrument as the buffer can hold.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError>;

    /// Write raw bytes to the instrument and flush the interface.
    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError>;

    /// Get the terminator of the interface. Defaults to `"\n"`.
    fn get_terminator(&self) -> &str {
        "\n"
    }

    /// Set the terminator of an interface from a `&str`.
    ///
    /// # Arguments:
    /// - `_terminator` - A string slice that will be used as the terminator for commands
    fn set_terminator(&mut self, _terminator: &str) {}

    /// Get the timeout of the interface. Defaults to three seconds.
    fn get_timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Write a string to the instrument without appending the terminator.
    fn write(&mut self, data: &str) -> Result<(), InstrumentError> {
        self.write_raw(data.as_bytes())
    }

    /// Send a command to the instrument.
    ///
    /// This function takes the command, appends the terminator, and writes it to the instrument.
    ///
    /// # Arguments:
    /// - `cmd` - A string slice that will be sent to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let cmd = format!("{cmd}{}", self.get_terminator());
        self.write_raw(cmd.as_bytes())
    }

    /// Read from the instrument until the terminator is received.
    ///
    /// Bytes are read one by one until the response ends with the terminator. The terminator and
    /// surrounding whitespace are stripped from the returned string. If the terminator does not
    /// arrive within the timeout, a [`InstrumentError::Timeout`] is returned. Invalid UTF-8
    /// sequences are replaced.
    fn read_until_terminator(&mut self) -> Result<String, InstrumentError> {
        let terminator = self.get_terminator().as_bytes().to_vec();
        let timeout = self.get_timeout();
        let mut response = Vec::new();
        let mut single_buf = [0u8];

        let tic = Instant::now();
        while tic.elapsed() < timeout {
            self.read_exact(&mut single_buf)?;
            response.push(single_buf[0]);
            if response.ends_with(&terminator) {
                response.truncate(response.len() - terminator.len());
                return Ok(String::from_utf8_lossy(&response).trim().to_string());
            }
        }
        Err(InstrumentError::Timeout(timeout))
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// # Arguments
    /// * `cmd` - The command to send to the instrument for which we expect a response.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.sendcmd(cmd)?;
        match self.read_until_terminator() {
            Err(InstrumentError::Timeout(timeout)) => Err(InstrumentError::TimeoutQuery {
                query: cmd.to_string(),
                timeout,
            }),
            other => other,
        }
    }

    /// Read a binary block in IEEE 488.2 definite-length form from the instrument.
    ///
    /// The header `#N` followed by `N` length digits is read first, then the declared number of
    /// body bytes, then everything up to and including the terminator. The returned vector holds
    /// all of these bytes unmodified, such that the caller can validate the framing.
    ///
    /// If the interface runs dry or times out before the declared body length was received, the
    /// block is malformed and a [`InstrumentError::CommunicationError`] is returned.
    fn read_block(&mut self) -> Result<Vec<u8>, InstrumentError> {
        let mut head = [0u8; 2];
        self.read_exact(&mut head)?;
        let ndigits = match head {
            [b'#', d @ b'1'..=b'9'] => usize::from(d - b'0'),
            _ => {
                return Err(InstrumentError::CommunicationError(format!(
                    "Block header must start with '#' and a digit, got {head:?}"
                )));
            }
        };

        let mut len_digits = vec![0u8; ndigits];
        self.read_exact(&mut len_digits)?;
        let len = std::str::from_utf8(&len_digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                InstrumentError::CommunicationError(format!(
                    "Block length field is not numeric: {len_digits:?}"
                ))
            })?;

        let mut block = Vec::with_capacity(2 + ndigits + len + 1);
        block.extend_from_slice(&head);
        block.extend_from_slice(&len_digits);
        let body_start = block.len();
        block.resize(body_start + len, 0);
        match self.read_exact(&mut block[body_start..]) {
            Err(InstrumentError::Timeout(_)) => return Err(short_body(len)),
            Err(InstrumentError::Io(e))
                if matches!(
                    e.kind(),
                    ErrorKind::UnexpectedEof | ErrorKind::TimedOut | ErrorKind::WouldBlock
                ) =>
            {
                return Err(short_body(len));
            }
            other => other?,
        }

        // The body may itself end in terminator bytes, so only look at what follows it.
        let terminator = self.get_terminator().as_bytes().to_vec();
        let timeout = self.get_timeout();
        let tic = Instant::now();
        let mut trailing = Vec::new();
        let mut single_buf = [0u8];
        while !terminator.is_empty() && !trailing.ends_with(&terminator) {
            if tic.elapsed() >= timeout {
                return Err(InstrumentError::Timeout(timeout));
            }
            self.read_exact(&mut single_buf)?;
            trailing.push(single_buf[0]);
        }
        block.extend_from_slice(&trailing);
        Ok(block)
    }
}

/// Error for a block whose body ended before the declared length.
fn short_body(len: usize) -> InstrumentError {
    InstrumentError::CommunicationError(format!(
        "Block body ended before the declared {len} bytes were received"
    ))
}
