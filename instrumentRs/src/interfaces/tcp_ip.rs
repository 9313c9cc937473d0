//! This module provides shortcuts to create an [`Instrument`] controlled via TCP/IP.
//!
//! It includes a blocking implementation using the [`std::net::TcpStream`] struct. Most SCPI
//! instruments with a LAN port accept raw socket connections, e.g., on port 5025 (Keithley,
//! Tektronix) or port 5555 (Rigol).

use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use crate::{Instrument, InstrumentError};

/// Create blocking TCP/IP instruments using the [`std::net::TcpStream`] struct.
#[derive(Debug)]
pub struct TcpIpInterface {}

impl TcpIpInterface {
    /// Try to create a new TCP/IP [`Instrument`] with a timeout of three seconds.
    ///
    /// We always set a read and write timeout, as we do not want to block infinitely on a
    /// blocking instrument connection. Use [`TcpIpInterface::full`] to pick another timeout, e.g.,
    /// for instruments that take long to answer large data requests.
    ///
    /// # Arguments
    /// * `sock_addr` - Socket address.
    pub fn simple<A: ToSocketAddrs>(sock_addr: A) -> Result<Instrument<TcpStream>, InstrumentError> {
        Self::full(sock_addr, Duration::from_secs(3))
    }

    /// Try to create a new TCP/IP [`Instrument`] with a given timeout.
    ///
    /// # Arguments
    /// * `sock_addr` - Socket address.
    /// * `timeout` - Read and write timeout of the socket and the instrument.
    pub fn full<A: ToSocketAddrs>(
        sock_addr: A,
        timeout: Duration,
    ) -> Result<Instrument<TcpStream>, InstrumentError> {
        let stream = TcpStream::connect(sock_addr)?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_read_timeout(Some(timeout))?;
        Ok(Instrument::new(stream, timeout))
    }
}
