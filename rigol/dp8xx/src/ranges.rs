//! Output and protection ranges of the DP800 models.

use instrumentrs::InstrumentError;

/// A closed range of values, the bounds can be given in any order.
pub type Range = (f64, f64);

/// Ranges of all channels of a DP800 model.
///
/// The over-voltage (OVP) and over-current (OCP) protection ranges are finer if the precision
/// option `DP8-ACCURACY` is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRanges {
    /// Maximum voltage and current of every channel. A negative voltage denotes a negative
    /// output.
    pub channels: Vec<(f64, f64)>,
    /// OVP ranges of every channel in volts without the precision option.
    pub ovp_standard: Vec<Range>,
    /// OVP ranges of every channel in volts with the precision option.
    pub ovp_precision: Vec<Range>,
    /// OCP ranges of every channel in amperes without the precision option.
    pub ocp_standard: Vec<Range>,
    /// OCP ranges of every channel in amperes with the precision option.
    pub ocp_precision: Vec<Range>,
}

impl ModelRanges {
    /// Ranges of the DP831(A): 8 V / 5 A, 30 V / 2 A, and -30 V / 2 A.
    pub fn dp831() -> Self {
        ModelRanges {
            channels: vec![(8.0, 5.0), (30.0, 2.0), (-30.0, 2.0)],
            ovp_standard: vec![(0.01, 8.8), (0.01, 33.0), (-0.01, -33.0)],
            ovp_precision: vec![(0.001, 8.8), (0.001, 33.0), (-0.001, -33.0)],
            ocp_standard: vec![(0.001, 5.5), (0.001, 2.2), (0.001, 2.2)],
            ocp_precision: vec![(0.0001, 5.5), (0.0001, 2.2), (0.0001, 2.2)],
        }
    }

    /// Number of channels of the model.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Check that every protection table has one entry per channel.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        let nof_channels = self.num_channels();
        let tables = [
            ("ovp_standard", self.ovp_standard.len()),
            ("ovp_precision", self.ovp_precision.len()),
            ("ocp_standard", self.ocp_standard.len()),
            ("ocp_precision", self.ocp_precision.len()),
        ];
        for (name, len) in tables {
            if len != nof_channels {
                return Err(InstrumentError::InvalidArgument(format!(
                    "{name} has {len} entries, expected one for each of the {nof_channels} channels"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the ranges of one channel.
    pub(crate) fn channel(&self, idx: usize, precision: bool) -> ChannelRanges {
        let (vmax, imax) = self.channels[idx];
        let (ovp, ocp) = if precision {
            (&self.ovp_precision, &self.ocp_precision)
        } else {
            (&self.ovp_standard, &self.ocp_standard)
        };
        ChannelRanges {
            voltage: (0.0, vmax),
            current: (0.0, imax),
            ovp: ovp[idx],
            ocp: ocp[idx],
        }
    }
}

/// Ranges of a single channel after the precision option was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRanges {
    /// Voltage setpoint range in volts.
    pub voltage: Range,
    /// Current setpoint range in amperes.
    pub current: Range,
    /// OVP level range in volts.
    pub ovp: Range,
    /// OCP level range in amperes.
    pub ocp: Range,
}
