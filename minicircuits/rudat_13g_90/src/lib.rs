//! A rust driver for the Mini-Circuits RUDAT-13G-90 programmable attenuator.
//!
//! The attenuator is controlled over USB HID. Commands and answers are SCPI strings that travel
//! inside 64 byte reports, see [`CommandReport`] and [`ReadReport`]. The HID transport itself is
//! not part of this crate: any interface that implements [`InstrumentInterface`] and moves whole
//! reports with `write_raw` and `read_exact` can be used. The USB ids of the device are exported
//! as [`VENDOR_ID`] and [`PRODUCT_ID`] to open the device with the HID library of your choice.
//!
//! # Example
//!
//! ```no_run
//! use instrumentrs::LoopbackInterfaceBytes;
//! use minicircuits_rudat::RudatAttenuator;
//!
//! // Replace the loopback with the HID interface of the device.
//! let interface = LoopbackInterfaceBytes::new(vec![], vec![]);
//! let mut inst = RudatAttenuator::try_new(interface).unwrap();
//!
//! inst.set_attenuation(30.25).unwrap();
//! println!("Attenuation: {} dB", inst.get_attenuation().unwrap());
//! ```

#![deny(warnings, missing_docs)]

mod report;

pub use report::{CommandReport, REPORT_LEN, ReadReport};

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface, validate};
use log::info;

/// USB vendor id of Mini-Circuits.
pub const VENDOR_ID: u16 = 0x20CE;

/// USB product id of the RUDAT-13G-90.
pub const PRODUCT_ID: u16 = 0x0023;

/// Largest attenuation in dB.
const MAX_ATTENUATION: f64 = 90.0;

/// Resolution of the attenuation in dB.
const ATTENUATION_STEP: f64 = 0.25;

/// Identification of the attenuator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    /// Vendor name, always "Mini-Circuits".
    pub vendor: String,
    /// Model name.
    pub model: String,
    /// Serial number.
    pub serial: String,
    /// Firmware version.
    pub firmware: String,
}

/// A rust driver for the RUDAT-13G-90.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct RudatAttenuator<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> RudatAttenuator<T> {
    /// Create a new attenuator instance with the given instrument interface.
    ///
    /// # Arguments
    /// * `interface` - An interface that exchanges whole HID reports.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        Ok(RudatAttenuator {
            interface: Arc::new(Mutex::new(interface)),
        })
    }

    /// Log the identification of the attenuator.
    pub fn connect_message(&mut self) -> Result<(), InstrumentError> {
        let idn = self.get_idn()?;
        info!(
            "Connected to: {} {} (serial:{}, firmware:{})",
            idn.vendor, idn.model, idn.serial, idn.firmware
        );
        Ok(())
    }

    /// Query the identification, which is assembled from the model, serial, and firmware queries.
    pub fn get_idn(&mut self) -> Result<Idn, InstrumentError> {
        Ok(Idn {
            vendor: "Mini-Circuits".to_string(),
            model: self.get_model_name()?,
            serial: self.get_serial_number()?,
            firmware: self.get_firmware()?,
        })
    }

    /// Get the model name.
    pub fn get_model_name(&mut self) -> Result<String, InstrumentError> {
        self.query(":MN?")
    }

    /// Get the serial number.
    pub fn get_serial_number(&mut self) -> Result<String, InstrumentError> {
        self.query(":SN?")
    }

    /// Get the firmware version.
    pub fn get_firmware(&mut self) -> Result<String, InstrumentError> {
        self.query(":FIRMWARE?")
    }

    /// Get the attenuation in dB.
    pub fn get_attenuation(&mut self) -> Result<f64, InstrumentError> {
        self.query_f64(":ATT?")
    }

    /// Set the attenuation in dB.
    ///
    /// The value must be between 0 and 90 dB and a multiple of 0.25 dB.
    pub fn set_attenuation(&mut self, value: f64) -> Result<(), InstrumentError> {
        validate_attenuation(value)?;
        self.sendcmd(&format!(":SETATT={value}"))
    }

    /// Get the attenuation in dB that is set when the device powers up.
    pub fn get_startup_attenuation(&mut self) -> Result<f64, InstrumentError> {
        self.query_f64(":STARTUPATT:VALUE?")
    }

    /// Set the attenuation in dB that is set when the device powers up.
    ///
    /// The same limits as for [`RudatAttenuator::set_attenuation`] apply.
    pub fn set_startup_attenuation(&mut self, value: f64) -> Result<(), InstrumentError> {
        validate_attenuation(value)?;
        self.sendcmd(&format!(":STARTUPATT:VALUE:{value}"))
    }

    /// Get the number of points in the hop sequence.
    pub fn get_hop_points(&mut self) -> Result<i64, InstrumentError> {
        let resp = self.query("HOP:POINTS?")?;
        resp.parse::<i64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Send a command report, the device does not answer it.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let report = CommandReport::try_from(cmd)?;
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.write_raw(report.as_bytes())
    }

    /// Send a command report and read the answer report.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let report = CommandReport::try_from(cmd)?;
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.write_raw(report.as_bytes())?;
        let mut buf = [0u8; REPORT_LEN];
        intf.read_exact(&mut buf)?;
        Ok(ReadReport::try_new(&buf)?.answer().to_string())
    }

    fn query_f64(&mut self, cmd: &str) -> Result<f64, InstrumentError> {
        let resp = self.query(cmd)?;
        resp.parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }
}

impl<T: InstrumentInterface> Clone for RudatAttenuator<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}

/// Check that an attenuation is in range and on the 0.25 dB grid.
fn validate_attenuation(value: f64) -> Result<(), InstrumentError> {
    validate::float_in_range(value, 0.0, MAX_ATTENUATION)?;
    if (value / ATTENUATION_STEP).fract() != 0.0 {
        return Err(InstrumentError::InvalidValue(format!(
            "Attenuation {value} dB is not a multiple of {ATTENUATION_STEP} dB"
        )));
    }
    Ok(())
}
