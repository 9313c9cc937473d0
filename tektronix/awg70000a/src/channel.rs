//! Output channel of the AWG.

use std::sync::{Arc, Mutex};

use instrumentrs::{InstrumentError, InstrumentInterface, OnOff, validate};
use measurements::{Frequency, Voltage};

use crate::settings::{FgenType, SignalPath};

/// Largest peak-to-peak amplitude of an output in volts.
const MAX_AMPLITUDE: f64 = 0.5;

/// Range of the AWG amplitude in volts peak-to-peak.
const AWG_AMPLITUDE_RANGE: (f64, f64) = (0.25, MAX_AMPLITUDE);

/// Range of the function generator offset in volts.
const FGEN_OFFSET_RANGE: (f64, f64) = (0.0, 0.25);

/// Range of the function generator DC level in volts.
const FGEN_DCLEVEL_RANGE: (f64, f64) = (-0.25, 0.25);

/// Range of the function generator frequency in Hz.
const FGEN_FREQUENCY_RANGE: (f64, f64) = (1.0, 50e6);

/// DAC resolutions in bits that the outputs support.
const DAC_RESOLUTIONS: [u8; 3] = [8, 9, 10];

/// Channel structure representing a single output of the AWG.
///
/// **This structure can only be created through the [`crate::TektronixAwg70002a`] struct.**
pub struct Channel<T: InstrumentInterface> {
    idx: usize,
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Channel<T> {
    pub(crate) fn new(idx: usize, interface: Arc<Mutex<T>>) -> Self {
        Channel { idx, interface }
    }

    /// Number of the channel on the instrument, which is one-based.
    pub fn number(&self) -> usize {
        self.idx + 1
    }

    /// Check if the output is enabled.
    pub fn get_state(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query(&format!("OUTPut{}:STATe?", self.number()))?;
        OnOff::NUMERIC.from_cmd_str(&resp)
    }

    /// Enable or disable the output.
    pub fn set_state(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "OUTPut{}:STATe {}",
            self.number(),
            OnOff::NUMERIC.to_cmd_str(enabled)
        ))
    }

    /// Get the waveform type of the function generator.
    pub fn get_fgen_type(&mut self) -> Result<FgenType, InstrumentError> {
        let resp = self.query(&format!("FGEN:CHANnel{}:TYPE?", self.number()))?;
        FgenType::from_cmd_str(&resp)
    }

    /// Set the waveform type of the function generator.
    pub fn set_fgen_type(&mut self, fgen_type: FgenType) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "FGEN:CHANnel{}:TYPE {}",
            self.number(),
            fgen_type.to_cmd_str()
        ))
    }

    /// Get the peak-to-peak amplitude of the function generator.
    pub fn get_fgen_amplitude(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(&format!("FGEN:CHANnel{}:AMPLitude?", self.number()))?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the peak-to-peak amplitude of the function generator, at most 0.5 V.
    pub fn set_fgen_amplitude(&mut self, amplitude: Voltage) -> Result<(), InstrumentError> {
        let val = validate::float_in_range(amplitude.as_volts(), 0.0, MAX_AMPLITUDE)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:AMPLitude {val}", self.number()))
    }

    /// Get the offset of the function generator.
    pub fn get_fgen_offset(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(&format!("FGEN:CHANnel{}:OFFSet?", self.number()))?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the offset of the function generator, between 0 and 0.25 V.
    pub fn set_fgen_offset(&mut self, offset: Voltage) -> Result<(), InstrumentError> {
        let (min, max) = FGEN_OFFSET_RANGE;
        let val = validate::float_in_range(offset.as_volts(), min, max)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:OFFSet {val}", self.number()))
    }

    /// Get the frequency of the function generator.
    pub fn get_fgen_frequency(&mut self) -> Result<Frequency, InstrumentError> {
        let val = self.query_f64(&format!("FGEN:CHANnel{}:FREQuency?", self.number()))?;
        Ok(Frequency::from_hertz(val))
    }

    /// Set the frequency of the function generator, between 1 Hz and 50 MHz.
    pub fn set_fgen_frequency(&mut self, frequency: Frequency) -> Result<(), InstrumentError> {
        let (min, max) = FGEN_FREQUENCY_RANGE;
        let val = validate::float_in_range(frequency.as_hertz(), min, max)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:FREQuency {val}", self.number()))
    }

    /// Get the period of the function generator waveform.
    pub fn get_fgen_period(&mut self) -> Result<f64, InstrumentError> {
        self.query_f64(&format!("FGEN:CHANnel{}:PERiod?", self.number()))
    }

    /// Get the DC level of the function generator.
    pub fn get_fgen_dclevel(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(&format!("FGEN:CHANnel{}:DCLevel?", self.number()))?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the DC level of the function generator, between -0.25 V and 0.25 V.
    pub fn set_fgen_dclevel(&mut self, level: Voltage) -> Result<(), InstrumentError> {
        let (min, max) = FGEN_DCLEVEL_RANGE;
        let val = validate::float_in_range(level.as_volts(), min, max)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:DCLevel {val}", self.number()))
    }

    /// Get the phase of the function generator in degrees.
    pub fn get_fgen_phase(&mut self) -> Result<f64, InstrumentError> {
        self.query_f64(&format!("FGEN:CHANnel{}:PHASe?", self.number()))
    }

    /// Set the phase of the function generator in degrees, between -180 and 180.
    pub fn set_fgen_phase(&mut self, phase: f64) -> Result<(), InstrumentError> {
        let val = validate::float_in_range(phase, -180.0, 180.0)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:PHASe {val}", self.number()))
    }

    /// Get the symmetry of the function generator in percent.
    pub fn get_fgen_symmetry(&mut self) -> Result<f64, InstrumentError> {
        self.query_f64(&format!("FGEN:CHANnel{}:SYMMetry?", self.number()))
    }

    /// Set the symmetry of the function generator in percent.
    pub fn set_fgen_symmetry(&mut self, symmetry: f64) -> Result<(), InstrumentError> {
        let val = validate::float_in_range(symmetry, 0.0, 100.0)?;
        self.sendcmd(&format!("FGEN:CHANnel{}:SYMMetry {val}", self.number()))
    }

    /// Get the signal path of the function generator.
    pub fn get_fgen_signal_path(&mut self) -> Result<SignalPath, InstrumentError> {
        let resp = self.query(&format!("FGEN:CHANnel{}:PATH?", self.number()))?;
        SignalPath::from_cmd_str(&resp)
    }

    /// Set the signal path of the function generator.
    pub fn set_fgen_signal_path(&mut self, path: SignalPath) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "FGEN:CHANnel{}:PATH {}",
            self.number(),
            path.to_cmd_str()
        ))
    }

    /// Get the peak-to-peak amplitude in AWG mode.
    pub fn get_awg_amplitude(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(&format!("SOURce{}:VOLTage?", self.number()))?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the peak-to-peak amplitude in AWG mode, between 0.25 V and 0.5 V.
    pub fn set_awg_amplitude(&mut self, amplitude: Voltage) -> Result<(), InstrumentError> {
        let (min, max) = AWG_AMPLITUDE_RANGE;
        let val = validate::float_in_range(amplitude.as_volts(), min, max)?;
        self.sendcmd(&format!("SOURce{}:VOLTage {val}", self.number()))
    }

    /// Get the DAC resolution in bits.
    pub fn get_resolution(&mut self) -> Result<u8, InstrumentError> {
        let resp = self.query(&format!("SOURce{}:DAC:RESolution?", self.number()))?;
        resp.parse::<u8>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }

    /// Set the DAC resolution in bits, one of 8, 9, or 10.
    pub fn set_resolution(&mut self, bits: u8) -> Result<(), InstrumentError> {
        validate::one_of(bits, &DAC_RESOLUTIONS)?;
        self.sendcmd(&format!("SOURce{}:DAC:RESolution {bits}", self.number()))
    }

    /// Assign a waveform of the waveform list to this output.
    pub fn assign_waveform(&mut self, name: &str) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "SOURce{}:CASSet:WAVeform \"{name}\"",
            self.number()
        ))
    }

    /// Get the asset that is assigned to this output, without quotes.
    pub fn get_assigned_asset(&mut self) -> Result<String, InstrumentError> {
        let resp = self.query(&format!("SOURce{}:CASSet?", self.number()))?;
        Ok(resp.trim_matches('"').to_string())
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

    fn query_f64(&mut self, cmd: &str) -> Result<f64, InstrumentError> {
        let resp = self.query(cmd)?;
        resp.parse::<f64>()
            .map_err(|_| InstrumentError::ResponseParseError(resp))
    }
}

impl<T: InstrumentInterface> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            interface: self.interface.clone(),
        }
    }
}
