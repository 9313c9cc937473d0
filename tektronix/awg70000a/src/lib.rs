//! A rust driver for the Tektronix AWG70002A arbitrary waveform generator.
//!
//! The instrument can run as arbitrary waveform generator or as function generator, see
//! [`AwgMode`]. Waveforms are uploaded into the waveform list with
//! [`TektronixAwg70002a::send_waveform`] and then assigned to one of the two outputs.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use instrumentrs::TcpIpInterface;
//! use tektronix_awg70000a::{AwgMode, TektronixAwg70002a};
//!
//! let interface = TcpIpInterface::full("192.168.1.70:4000", Duration::from_secs(10)).unwrap();
//! let mut inst = TektronixAwg70002a::try_new(interface).unwrap();
//! inst.set_mode(AwgMode::Awg).unwrap();
//!
//! // One period of a sine with 1000 samples.
//! let samples: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 1000.0).sin())
//!     .collect();
//! inst.send_waveform("sine", &samples).unwrap();
//!
//! let mut ch1 = inst.get_channel(0).unwrap();
//! ch1.assign_waveform("sine").unwrap();
//! ch1.set_state(true).unwrap();
//! inst.play().unwrap();
//! ```

#![deny(warnings, missing_docs)]

mod block;
mod channel;
mod settings;

pub use channel::Channel;
pub use settings::{AwgMode, ClockSource, FgenType, RunState, SignalPath};

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface, OnOff, validate};
use log::{debug, info};
use measurements::Frequency;

use crate::block::{definite_block_header, encode_samples};

/// Range of the sample rate in samples per second.
const SAMPLE_RATE_RANGE: (f64, f64) = (1.49e3, 25e9);

/// A rust driver for the AWG70002A.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct TektronixAwg70002a<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    num_channels: usize,
}

impl<T: InstrumentInterface> TektronixAwg70002a<T> {
    /// Create a new AWG70002A instance with the given instrument interface.
    ///
    /// Uploading long waveforms takes a while, pick an interface with a generous timeout.
    ///
    /// # Arguments
    /// * `interface` - An instrument interface that implements the [`InstrumentInterface`] trait.
    pub fn try_new(interface: T) -> Result<Self, InstrumentError> {
        let mut intf = interface;
        intf.set_terminator("\n");
        Ok(TektronixAwg70002a {
            interface: Arc::new(Mutex::new(intf)),
            num_channels: 2,
        })
    }

    /// Get a new channel with a given index.
    ///
    /// Please note that channels are zero indexed, i.e., index 0 is output 1 of the AWG.
    pub fn get_channel(&mut self, idx: usize) -> Result<Channel<T>, InstrumentError> {
        if idx >= self.num_channels {
            return Err(InstrumentError::ChannelIndexOutOfRange {
                idx,
                nof_channels: self.num_channels,
            });
        }
        Ok(Channel::new(idx, Arc::clone(&self.interface)))
    }

    /// Query the name of the instrument.
    pub fn get_idn(&mut self) -> Result<String, InstrumentError> {
        self.query("*IDN?")
    }

    /// Get the operating mode.
    pub fn get_mode(&mut self) -> Result<AwgMode, InstrumentError> {
        let resp = self.query("INSTrument:MODE?")?;
        AwgMode::from_cmd_str(&resp)
    }

    /// Set the operating mode.
    pub fn set_mode(&mut self, mode: AwgMode) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("INSTrument:MODE {}", mode.to_cmd_str()))
    }

    /// Get the sample rate.
    pub fn get_sample_rate(&mut self) -> Result<Frequency, InstrumentError> {
        let val = self.query_f64("CLOCk:SRATe?")?;
        Ok(Frequency::from_hertz(val))
    }

    /// Set the sample rate, between 1.49 kSa/s and 25 GSa/s.
    pub fn set_sample_rate(&mut self, rate: Frequency) -> Result<(), InstrumentError> {
        let (min, max) = SAMPLE_RATE_RANGE;
        let val = validate::float_in_range(rate.as_hertz(), min, max)?;
        self.sendcmd(&format!("CLOCk:SRATe {val}"))
    }

    /// Get the source of the sample clock.
    pub fn get_clock_source(&mut self) -> Result<ClockSource, InstrumentError> {
        let resp = self.query("CLOCk:SOURce?")?;
        ClockSource::from_cmd_str(&resp)
    }

    /// Set the source of the sample clock.
    pub fn set_clock_source(&mut self, source: ClockSource) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("CLOCk:SOURce {}", source.to_cmd_str()))
    }

    /// Get the state of the waveform playback.
    pub fn get_run_state(&mut self) -> Result<RunState, InstrumentError> {
        let resp = self.query("AWGControl:RSTate?")?;
        RunState::from_cmd_str(&resp)
    }

    /// Start the playback of the assigned waveforms.
    pub fn play(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("AWGControl:RUN")
    }

    /// Stop the playback.
    pub fn stop(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("AWGControl:STOP")
    }

    /// Force a trigger event on trigger A.
    pub fn force_trigger(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("TRIGger:IMMediate ATRigger")
    }

    /// Block until all pending operations of the instrument are complete.
    pub fn wait_for_operation_to_complete(&mut self) -> Result<(), InstrumentError> {
        let resp = self.query("*OPC?")?;
        if resp != "1" {
            return Err(InstrumentError::ResponseParseError(resp));
        }
        Ok(())
    }

    /// Delete all waveforms from the waveform list.
    pub fn clear_waveform_list(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("WLISt:WAVeform:DELete ALL")
    }

    /// Delete all sequences from the sequence list.
    pub fn clear_sequence_list(&mut self) -> Result<(), InstrumentError> {
        self.sendcmd("SLISt:SEQuence:DELete ALL")
    }

    /// Check if all outputs are switched off, overriding their individual states.
    pub fn get_all_output_off(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query("OUTPut:OFF?")?;
        OnOff::NUMERIC.from_cmd_str(&resp)
    }

    /// Switch all outputs off or give control back to the individual output states.
    pub fn set_all_output_off(&mut self, off: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("OUTPut:OFF {}", OnOff::NUMERIC.to_cmd_str(off)))
    }

    /// Get the current directory of the mass memory, without quotes.
    pub fn get_current_directory(&mut self) -> Result<String, InstrumentError> {
        let resp = self.query("MMEMory:CDIRectory?")?;
        Ok(resp.trim_matches('"').to_string())
    }

    /// Set the current directory of the mass memory.
    pub fn set_current_directory(&mut self, path: &str) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("MMEMory:CDIRectory \"{path}\""))
    }

    /// Get the names of all waveforms in the waveform list.
    pub fn get_waveform_list(&mut self) -> Result<Vec<String>, InstrumentError> {
        let resp = self.query("WLISt:LIST?")?;
        Ok(resp
            .split(',')
            .map(|name| name.trim().trim_matches('"'))
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }

    /// Create a waveform in the waveform list and upload its samples.
    ///
    /// The samples are normalized to the amplitude of the output and must lie within [-1, 1].
    /// They are transferred as little-endian 32 bit floats in a definite-length block. All
    /// samples are validated before anything is sent.
    pub fn send_waveform(&mut self, name: &str, samples: &[f64]) -> Result<(), InstrumentError> {
        if name.is_empty() || name.contains('"') {
            return Err(InstrumentError::InvalidValue(format!(
                "Invalid waveform name {name:?}"
            )));
        }
        if samples.is_empty() {
            return Err(InstrumentError::InvalidValue(
                "A waveform needs at least one sample".to_string(),
            ));
        }
        let body = encode_samples(samples)?;

        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(&format!("WLISt:WAVeform:NEW \"{name}\", {}", samples.len()))?;

        let mut data = format!(
            "WLISt:WAVeform:DATA \"{name}\",{}",
            definite_block_header(body.len())
        )
        .into_bytes();
        debug!("Block header: {}", String::from_utf8_lossy(&data));
        data.extend_from_slice(&body);
        data.extend_from_slice(intf.get_terminator().as_bytes());
        intf.write_raw(&data)?;
        info!("Waveform {name} with {} samples sent", samples.len());
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

    fn query_f64(&mut self, cmd: &str) -> Result<f64, InstrumentError> {
        let resp = self.query(cmd)?;
        resp.parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }
}

impl<T: InstrumentInterface> Clone for TektronixAwg70002a<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            num_channels: self.num_channels,
        }
    }
}
