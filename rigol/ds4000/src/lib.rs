//! A rust driver for the Rigol DS4000 series oscilloscopes.
//!
//! Besides the general acquisition and trigger settings, this driver reads waveforms from the
//! four input channels, either as displayed on the screen or from the internal memory.
//!
//! # Example
//!
//! The DS4000 answers raw SCPI on port 5555. Reading the internal memory takes a while, so pick
//! a generous timeout.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use instrumentrs::TcpIpInterface;
//! use rigol_ds4000::RigolDs4000;
//!
//! let interface = TcpIpInterface::full("192.168.1.60:5555", Duration::from_secs(20)).unwrap();
//! let mut inst = RigolDs4000::try_new(interface).unwrap();
//!
//! // Channel 1 of the scope is zero-indexed.
//! let ch1 = inst.get_channel(0).unwrap();
//! let mut trace = ch1.curvedata_raw();
//!
//! trace.prepare_curvedata().unwrap();
//! let volts = trace.get_curvedata().unwrap();
//! let times = trace.get_setpoints();
//! println!("Read {} points, first at {} s: {} V", volts.len(), times[0], volts[0]);
//! ```

#![deny(warnings, missing_docs)]

mod block;
mod capture;
mod channel;
mod preamble;
mod trigger;

pub use capture::{ReadMode, ScopeArray};
pub use channel::Channel;
pub use preamble::{MAX_POINTS, Preamble};
pub use trigger::{TriggerMode, TriggerType};

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface, OnOff, validate};
use log::warn;

/// Oldest firmware that transfers waveform data correctly.
const MIN_FIRMWARE: [u32; 3] = [0, 2, 3];

/// Identification of the oscilloscope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    /// Vendor name.
    pub vendor: String,
    /// Model, e.g., "DS4024".
    pub model: String,
    /// Serial number.
    pub serial: String,
    /// Firmware version, e.g., "00.02.03.SP4".
    pub firmware: String,
}

/// A rust driver for the Rigol DS4000.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct RigolDs4000<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    num_channels: usize,
}

impl<T: InstrumentInterface> RigolDs4000<T> {
    /// Create a new DS4000 instance with the given instrument interface.
    ///
    /// The firmware version is checked upon initialization. Firmware older than 00.02.03 does
    /// not transfer waveforms reliably, which is logged as a warning.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let mut intf = interface;
        intf.set_terminator("\n");
        let mut inst = RigolDs4000 {
            interface: Arc::new(Mutex::new(intf)),
            num_channels: 4,
        };
        inst.check_firmware_version()?;
        Ok(inst)
    }

    /// Get a new channel with a given index.
    ///
    /// Please note that channels are zero indexed, i.e., index 0 is CHAN1 of the oscilloscope.
    pub fn get_channel(&mut self, idx: usize) -> Result<Channel<T>, InstrumentError> {
        if idx >= self.num_channels {
            return Err(InstrumentError::ChannelIndexOutOfRange {
                idx,
                nof_channels: self.num_channels,
            });
        }
        Ok(Channel::new(idx, Arc::clone(&self.interface)))
    }

    /// Query the identification of the instrument.
    pub fn get_idn(&mut self) -> Result<Idn, InstrumentError> {
        let resp = self.query("*IDN?")?;
        let fields: Vec<&str> = resp.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [vendor, model, serial, firmware] => Ok(Idn {
                vendor: vendor.to_string(),
                model: model.to_string(),
                serial: serial.to_string(),
                firmware: firmware.to_string(),
            }),
            _ => Err(InstrumentError::ResponseParseError(resp)),
        }
    }

    /// Start the acquisition.
    pub fn run(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd(":RUN")
    }

    /// Stop the acquisition.
    pub fn stop(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd(":STOP")
    }

    /// Acquire a single trace.
    pub fn single(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd(":SINGle")
    }

    /// Force a trigger event.
    pub fn force_trigger(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("TFORce")
    }

    /// Perform an autoscale.
    pub fn auto_scale(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd(":AUToscale")
    }

    /// Get the trigger type.
    pub fn get_trigger_type(&mut self) -> Result<TriggerType, InstrumentError> {
        let resp = self.query(":TRIGger:MODE?")?;
        TriggerType::from_cmd_str(&resp)
    }

    /// Set the trigger type.
    pub fn set_trigger_type(&mut self, trigger_type: TriggerType) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(":TRIGger:MODE {}", trigger_type.to_cmd_str()))
    }

    /// Get the sweep mode of the trigger.
    pub fn get_trigger_mode(&mut self) -> Result<TriggerMode, InstrumentError> {
        let resp = self.query(":TRIGger:SWEep?")?;
        TriggerMode::from_cmd_str(&resp)
    }

    /// Set the sweep mode of the trigger.
    pub fn set_trigger_mode(&mut self, mode: TriggerMode) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(":TRIGger:SWEep {}", mode.to_cmd_str()))
    }

    /// Get the horizontal time base in seconds per division.
    pub fn get_time_base(&mut self) -> Result<f64, InstrumentError> {
        let resp = self.query(":TIMebase:MAIN:SCALe?")?;
        resp.parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Set the horizontal time base in seconds per division.
    pub fn set_time_base(&mut self, time_base: f64) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(":TIMebase:MAIN:SCALe {time_base}"))
    }

    /// Get the number of waveform points that are read.
    pub fn get_sample_point_count(&mut self) -> Result<usize, InstrumentError> {
        let resp = self.query(":WAVeform:POINts?")?;
        resp.parse::<usize>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Set the number of waveform points that are read, at least one.
    pub fn set_sample_point_count(&mut self, count: usize) -> Result<(), InstrumentError> {
        validate::int_in_range(count as i64, 1, i64::MAX)?;
        self.sendcmd(&format!(":WAVeform:POINts {count}"))
    }

    /// Check if the autoscale function is enabled.
    pub fn get_enable_auto_scale(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query(":SYSTem:AUToscale?")?;
        OnOff::SCPI.from_cmd_str(&resp)
    }

    /// Enable or disable the autoscale function.
    pub fn set_enable_auto_scale(&mut self, enable: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            ":SYSTem:AUToscale {}",
            OnOff::SCPI.to_cmd_str(enable)
        ))
    }

    /// Warn if the firmware is older than 00.02.03 or cannot be determined.
    fn check_firmware_version(&mut self) -> Result<(), InstrumentError> {
        let idn = self.get_idn()?;
        match parse_version(&idn.firmware) {
            Some(ver) if ver < MIN_FIRMWARE => warn!(
                "Firmware version should be at least 00.02.03, data transfer may not work correctly. Found {}.",
                idn.firmware
            ),
            Some(_) => {}
            None => warn!(
                "Could not determine firmware version of DS4000 from {}",
                idn.firmware
            ),
        }
        Ok(())
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for RigolDs4000<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            num_channels: self.num_channels,
        }
    }
}

/// Parse the first three numeric fields of a firmware version like "00.02.03.SP4".
fn parse_version(firmware: &str) -> Option<[u32; 3]> {
    let mut parts = firmware.split('.').map(|p| p.trim().parse::<u32>().ok());
    Some([parts.next()??, parts.next()??, parts.next()??])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("00.02.03", Some([0, 2, 3]))]
    #[case("00.02.03.SP4", Some([0, 2, 3]))]
    #[case("01.00.00", Some([1, 0, 0]))]
    #[case("00.02", None)]
    #[case("SP4.00.02", None)]
    fn version_parsing(#[case] firmware: &str, #[case] exp: Option<[u32; 3]>) {
        assert_eq!(parse_version(firmware), exp);
    }

    #[rstest]
    fn version_ordering() {
        assert!(parse_version("00.02.01").unwrap() < MIN_FIRMWARE);
        assert!(parse_version("00.01.09").unwrap() < MIN_FIRMWARE);
        assert!(parse_version("00.02.03").unwrap() >= MIN_FIRMWARE);
        assert!(parse_version("00.03.00").unwrap() >= MIN_FIRMWARE);
    }
}
