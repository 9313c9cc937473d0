//! A single input channel of the oscilloscope.

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface};
use measurements::Voltage;

use crate::capture::{ReadMode, ScopeArray};

/// Channel structure representing a single input channel of the DS4000.
///
/// **This structure can only be created through the [`crate::RigolDs4000`] struct.**
pub struct Channel<T: InstrumentInterface> {
    idx: usize,
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Channel<T> {
    /// Get a new channel for the given instrument interface.
    pub(crate) fn new(idx: usize, interface: Arc<Mutex<T>>) -> Self {
        Channel { idx, interface }
    }

    /// Peak-to-peak amplitude of the signal on this channel.
    pub fn get_amplitude(&mut self) -> Result<Voltage, InstrumentError> {
        let resp = self.query(&format!(":MEASure:VAMP? chan{}", self.number()))?;
        let val = resp
            .parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))?;
        Ok(Voltage::from_volts(val))
    }

    /// Vertical scale of this channel in volts per division.
    pub fn get_vertical_scale(&mut self) -> Result<f64, InstrumentError> {
        let resp = self.query(&format!(":CHANnel{}:SCALe?", self.number()))?;
        resp.parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Set the vertical scale of this channel in volts per division.
    pub fn set_vertical_scale(&mut self, scale: f64) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(":CHANnel{}:SCALe {scale}", self.number()))
    }

    /// Waveform as displayed on the screen.
    pub fn curvedata(&self) -> ScopeArray<T> {
        ScopeArray::new(self.number(), ReadMode::Display, Arc::clone(&self.interface))
    }

    /// Waveform from the internal memory of the instrument.
    pub fn curvedata_raw(&self) -> ScopeArray<T> {
        ScopeArray::new(self.number(), ReadMode::Raw, Arc::clone(&self.interface))
    }

    /// Channel number as used in commands, which is one-indexed.
    fn number(&self) -> usize {
        self.idx + 1
    }

    /// Send a command for this channel to the interface.
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

impl<T: InstrumentInterface> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            interface: Arc::clone(&self.interface),
        }
    }
}
