//! A single output channel of the DP800.

use std::{
    fmt::Display,
    sync::{Arc, Mutex},
};

use instrumentrs::{InstrumentError, InstrumentInterface, OnOff, validate};
use measurements::{Current, Power, Voltage};

use crate::ranges::ChannelRanges;

/// Regulation mode that an output is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Constant voltage.
    ConstantVoltage,
    /// Constant current.
    ConstantCurrent,
    /// Unregulated.
    Unregulated,
}

impl OutputMode {
    /// Parse the answer of `:OUTPut:MODE?`.
    pub fn from_cmd_str(s: &str) -> Result<Self, InstrumentError> {
        match s.trim() {
            "CV" => Ok(OutputMode::ConstantVoltage),
            "CC" => Ok(OutputMode::ConstantCurrent),
            "UR" => Ok(OutputMode::Unregulated),
            _ => Err(InstrumentError::ResponseParseError(s.to_string())),
        }
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::ConstantVoltage => write!(f, "CV"),
            OutputMode::ConstantCurrent => write!(f, "CC"),
            OutputMode::Unregulated => write!(f, "UR"),
        }
    }
}

/// Channel structure representing a single output of the DP800.
///
/// **This structure can only be created through the [`crate::RigolDp8xx`] struct.**
///
/// Every command is sent with a prefix that selects this channel first.
pub struct Channel<T: InstrumentInterface> {
    idx: usize,
    ranges: ChannelRanges,
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Channel<T> {
    pub(crate) fn new(idx: usize, ranges: ChannelRanges, interface: Arc<Mutex<T>>) -> Self {
        Channel {
            idx,
            ranges,
            interface,
        }
    }

    /// Ranges that values of this channel are validated against.
    pub fn get_ranges(&self) -> ChannelRanges {
        self.ranges
    }

    /// Get the voltage setpoint.
    pub fn get_voltage_level(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(":SOURce:VOLTage:LEVel:IMMediate:AMPLitude?")?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the voltage setpoint.
    ///
    /// The negative channel of a DP831 takes negative voltages only.
    pub fn set_voltage_level(&mut self, voltage: Voltage) -> Result<(), InstrumentError> {
        let val = voltage.as_volts();
        let (min, max) = self.ranges.voltage;
        validate::float_in_range(val, min, max)?;
        self.sendcmd(&format!(":SOURce:VOLTage:LEVel:IMMediate:AMPLitude {val}"))
    }

    /// Get the current setpoint.
    pub fn get_current_level(&mut self) -> Result<Current, InstrumentError> {
        let val = self.query_f64(":SOURce:CURRent:LEVel:IMMediate:AMPLitude?")?;
        Ok(Current::from_amperes(val))
    }

    /// Set the current setpoint.
    pub fn set_current_level(&mut self, current: Current) -> Result<(), InstrumentError> {
        let val = current.as_amperes();
        let (min, max) = self.ranges.current;
        validate::float_in_range(val, min, max)?;
        self.sendcmd(&format!(":SOURce:CURRent:LEVel:IMMediate:AMPLitude {val}"))
    }

    /// Check if the output is enabled.
    pub fn get_output_enabled(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query(":OUTPut:STATe?")?;
        OnOff::SCPI.from_cmd_str(&resp)
    }

    /// Enable or disable the output.
    pub fn set_output_enabled(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(":OUTPut:STATe {}", OnOff::SCPI.to_cmd_str(enabled)))
    }

    /// Get the regulation mode of the output.
    pub fn get_mode(&mut self) -> Result<OutputMode, InstrumentError> {
        let resp = self.query(":OUTPut:MODE?")?;
        OutputMode::from_cmd_str(&resp)
    }

    /// Measure the output voltage.
    pub fn get_voltage(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(":MEASure:VOLTage:DC?")?;
        Ok(Voltage::from_volts(val))
    }

    /// Measure the output current.
    pub fn get_current(&mut self) -> Result<Current, InstrumentError> {
        let val = self.query_f64(":MEASure:CURRent:DC?")?;
        Ok(Current::from_amperes(val))
    }

    /// Measure the output power.
    pub fn get_power(&mut self) -> Result<Power, InstrumentError> {
        let val = self.query_f64(":MEASure:POWEr?")?;
        Ok(Power::from_watts(val))
    }

    /// Get the over-voltage protection level.
    pub fn get_ovp_value(&mut self) -> Result<Voltage, InstrumentError> {
        let val = self.query_f64(":VOLTage:PROTection:LEVel?")?;
        Ok(Voltage::from_volts(val))
    }

    /// Set the over-voltage protection level.
    pub fn set_ovp_value(&mut self, voltage: Voltage) -> Result<(), InstrumentError> {
        let val = voltage.as_volts();
        let (min, max) = self.ranges.ovp;
        validate::float_in_range(val, min, max)?;
        self.sendcmd(&format!(":VOLTage:PROTection:LEVel {val}"))
    }

    /// Check if the over-voltage protection is enabled.
    pub fn get_ovp_state(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query(":VOLTage:PROTection:STATe?")?;
        OnOff::SCPI.from_cmd_str(&resp)
    }

    /// Enable or disable the over-voltage protection.
    pub fn set_ovp_state(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            ":VOLTage:PROTection:STATe {}",
            OnOff::SCPI.to_cmd_str(enabled)
        ))
    }

    /// Get the over-current protection level.
    pub fn get_ocp_value(&mut self) -> Result<Current, InstrumentError> {
        let val = self.query_f64(":CURRent:PROTection:LEVel?")?;
        Ok(Current::from_amperes(val))
    }

    /// Set the over-current protection level.
    pub fn set_ocp_value(&mut self, current: Current) -> Result<(), InstrumentError> {
        let val = current.as_amperes();
        let (min, max) = self.ranges.ocp;
        validate::float_in_range(val, min, max)?;
        self.sendcmd(&format!(":CURRent:PROTection:LEVel {val}"))
    }

    /// Check if the over-current protection is enabled.
    pub fn get_ocp_state(&mut self) -> Result<bool, InstrumentError> {
        let resp = self.query(":CURRent:PROTection:STATe?")?;
        OnOff::SCPI.from_cmd_str(&resp)
    }

    /// Enable or disable the over-current protection.
    pub fn set_ocp_state(&mut self, enabled: bool) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            ":CURRent:PROTection:STATe {}",
            OnOff::SCPI.to_cmd_str(enabled)
        ))
    }

    /// Prefix that selects this channel, channels are one-based on the instrument.
    fn select(&self, cmd: &str) -> String {
        format!(":INSTrument:NSELect {};{cmd}", self.idx + 1)
    }

    /// Send a command for this channel to the interface.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let cmd = self.select(cmd);
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(&cmd)
    }

    /// Query the instrument for this channel and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let cmd = self.select(cmd);
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(&cmd)
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
            ranges: self.ranges,
            interface: self.interface.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("CV", OutputMode::ConstantVoltage)]
    #[case("CC\n", OutputMode::ConstantCurrent)]
    #[case("UR", OutputMode::Unregulated)]
    fn output_mode_parse(#[case] s: &str, #[case] exp: OutputMode) {
        assert_eq!(OutputMode::from_cmd_str(s).unwrap(), exp);
    }

    #[rstest]
    fn output_mode_parse_invalid() {
        assert!(matches!(
            OutputMode::from_cmd_str("XX"),
            Err(InstrumentError::ResponseParseError(_))
        ));
    }
}
