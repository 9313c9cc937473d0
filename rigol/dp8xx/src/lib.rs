//! A rust driver for the Rigol DP800 series power supplies.
//!
//! The ranges of a model are given by a [`ModelRanges`] structure. The DP831 is supported out
//! of the box through [`RigolDp8xx::dp831`]. If the `DP8-ACCURACY` option is installed, the
//! finer protection ranges are used automatically.
//!
//! # Example
//!
//! This example shows the usage via the serial interface.
//! ```no_run
//! use measurements::{Current, Voltage};
//! use rigol_dp8xx::{RigolDp8xx, SerialInterfaceDp8xx};
//!
//! let serial_inst = SerialInterfaceDp8xx::simple("/dev/ttyUSB0").expect("Failed to open serial port");
//! let mut inst = RigolDp8xx::dp831(serial_inst).unwrap();
//!
//! // Set channel 2 (zero-indexed 1) to 12 V with a current limit of 100 mA.
//! let mut ch2 = inst.get_channel(1).unwrap();
//! ch2.set_voltage_level(Voltage::from_volts(12.0)).unwrap();
//! ch2.set_current_level(Current::from_milliamperes(100.0)).unwrap();
//! ch2.set_output_enabled(true).unwrap();
//!
//! println!("Output voltage: {}", ch2.get_voltage().unwrap());
//! ```

#![deny(warnings, missing_docs)]

mod channel;
mod ranges;

pub use channel::{Channel, OutputMode};
pub use ranges::{ChannelRanges, ModelRanges, Range};

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use instrumentrs::{Instrument, InstrumentError, InstrumentInterface, SerialInterface};
use log::debug;
use serialport::SerialPort;

/// Option that enables the finer protection ranges.
const PRECISION_OPTION: &str = "DP8-ACCURACY";

/// A SerialInterface for the DP800 series.
///
/// Builds an InstrumentRs SerialInterface with the default baud rate of the DP800 series.
#[derive(Debug)]
pub struct SerialInterfaceDp8xx {}

impl SerialInterfaceDp8xx {
    /// Try to create an Instrument interface with a simple serial port configuration.
    ///
    /// This is analog to the `simple` method of the `SerialInterface` struct in `InstrumentRs`
    /// with the baud rate set to 9600. The default timeout is set to 3 seconds.
    ///
    /// Arguments:
    /// * `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    pub fn simple(port: &str) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        let port = serialport::new(port, 9600).timeout(timeout);
        SerialInterface::full(port)
    }
}

/// A rust driver for the Rigol DP800 series.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct RigolDp8xx<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    ranges: ModelRanges,
    options: Vec<String>,
}

impl<T: InstrumentInterface> RigolDp8xx<T> {
    /// Create a new DP800 instance with the given interface and model ranges.
    ///
    /// The installed options are queried upon initialization to select the protection ranges.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    /// * `ranges` - The output and protection ranges of the model.
    ///
    /// Returns [`InstrumentError::InvalidArgument`] before any communication if a protection
    /// table does not have exactly one entry per channel.
    pub fn try_new(interface: T, ranges: ModelRanges) -> Result<Self, InstrumentError> {
        ranges.validate()?;
        let mut intf = interface;
        intf.set_terminator("\n");
        let mut inst = RigolDp8xx {
            interface: Arc::new(Mutex::new(intf)),
            ranges,
            options: Vec::new(),
        };
        inst.options = inst.query_installed_options()?;
        debug!("Installed options: {:?}", inst.options);
        Ok(inst)
    }

    /// Create a new driver for the DP831.
    pub fn dp831(interface: T) -> Result<Self, InstrumentError> {
        Self::try_new(interface, ModelRanges::dp831())
    }

    /// Get a new channel with a given index.
    ///
    /// Please note that channels are zero indexed, i.e., index 0 is channel 1 of the supply.
    pub fn get_channel(&mut self, idx: usize) -> Result<Channel<T>, InstrumentError> {
        let nof_channels = self.ranges.num_channels();
        if idx >= nof_channels {
            return Err(InstrumentError::ChannelIndexOutOfRange { idx, nof_channels });
        }
        Ok(Channel::new(
            idx,
            self.ranges.channel(idx, self.has_precision_option()),
            Arc::clone(&self.interface),
        ))
    }

    /// Options that were installed when the driver was created.
    pub fn get_installed_options(&self) -> &[String] {
        &self.options
    }

    /// Check if the precision option is installed.
    pub fn has_precision_option(&self) -> bool {
        self.options.iter().any(|opt| opt == PRECISION_OPTION)
    }

    /// Query the name of the instrument.
    ///
    /// Returns a comma-separated string of vendor, model, serial number, and firmware version.
    pub fn get_idn(&mut self) -> Result<String, InstrumentError> {
        self.query("*IDN?")
    }

    /// Query the installed options, an uninstalled option is reported as "0" and skipped.
    fn query_installed_options(&mut self) -> Result<Vec<String>, InstrumentError> {
        let resp = self.query("*OPT?")?;
        Ok(resp
            .split(',')
            .map(str::trim)
            .filter(|opt| !opt.is_empty() && *opt != "0")
            .map(String::from)
            .collect())
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for RigolDp8xx<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            ranges: self.ranges.clone(),
            options: self.options.clone(),
        }
    }
}
