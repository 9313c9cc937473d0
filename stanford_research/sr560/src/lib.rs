//! A virtual driver for the Stanford Research Systems SR560 voltage preamplifier.
//!
//! The SR560 is set up by hand on its front panel and has no remote interface that is used here.
//! This driver only keeps track of the settings you made, such that voltages that were measured
//! behind the preamplifier can be converted back into the voltage at its input.
//!
//! # Example
//!
//! ```
//! use measurements::Voltage;
//! use srs_sr560::{Cutoff, Sr560};
//!
//! let mut amp = Sr560::new();
//! amp.set_gain(100).unwrap();
//! amp.set_invert(false);
//! amp.set_cutoff_hi(Cutoff::Hertz(10_000.0)).unwrap();
//!
//! // A voltmeter behind the preamplifier reads 0.5 V.
//! let (raw, input) = amp.amplified_voltage(Voltage::from_volts(0.5));
//! assert_eq!(raw.as_volts(), 0.5);
//! assert_eq!(input.as_volts(), 0.005);
//! ```

#![deny(warnings, missing_docs)]

use std::fmt::Display;

use instrumentrs::{InstrumentError, validate};
use log::warn;
use measurements::Voltage;

/// Cutoff frequencies in Hz of the high pass and low pass filters, besides DC.
pub const CUTOFF_FREQUENCIES: [f64; 16] = [
    0.03, 0.1, 0.3, 1.0, 3.0, 10.0, 30.0, 100.0, 300.0, 1e3, 3e3, 10e3, 30e3, 100e3, 300e3, 1e6,
];

/// Gains that can be selected without the vernier.
pub const GAINS: [u32; 15] = [
    1, 2, 5, 10, 20, 50, 100, 200, 500, 1000, 2000, 5000, 10000, 20000, 50000,
];

/// Cutoff setting of a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    /// No filtering, i.e., DC coupled for the high pass.
    Dc,
    /// Cutoff frequency in Hz, must be one of [`CUTOFF_FREQUENCIES`].
    Hertz(f64),
}

impl Cutoff {
    /// Frequency in Hz, where DC is zero.
    pub fn as_hertz(&self) -> f64 {
        match self {
            Cutoff::Dc => 0.0,
            Cutoff::Hertz(f) => *f,
        }
    }

    fn validate(self) -> Result<Self, InstrumentError> {
        if let Cutoff::Hertz(f) = self {
            validate::one_of(f, &CUTOFF_FREQUENCIES)?;
        }
        Ok(self)
    }
}

impl Display for Cutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cutoff::Dc => write!(f, "DC"),
            Cutoff::Hertz(hz) => write!(f, "{hz} Hz"),
        }
    }
}

/// Identification of the preamplifier. Serial number and firmware are unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idn {
    /// Vendor name.
    pub vendor: String,
    /// Model name.
    pub model: String,
    /// Serial number.
    pub serial: Option<String>,
    /// Firmware version.
    pub firmware: Option<String>,
}

/// Virtual SR560 that holds the front panel settings.
///
/// Defaults to a DC coupled input, a 1 MHz low pass, an inverted output, and a gain of 10.
#[derive(Debug, Clone, PartialEq)]
pub struct Sr560 {
    cutoff_lo: Cutoff,
    cutoff_hi: Cutoff,
    invert: bool,
    gain: u32,
}

impl Default for Sr560 {
    fn default() -> Self {
        Sr560 {
            cutoff_lo: Cutoff::Dc,
            cutoff_hi: Cutoff::Hertz(1e6),
            invert: true,
            gain: 10,
        }
    }
}

impl Sr560 {
    /// Create a new virtual preamplifier with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identification of the preamplifier.
    pub fn get_idn(&self) -> Idn {
        Idn {
            vendor: "Stanford Research Systems".to_string(),
            model: "SR560".to_string(),
            serial: None,
            firmware: None,
        }
    }

    /// Get the cutoff of the high pass filter.
    pub fn get_cutoff_lo(&self) -> Cutoff {
        self.cutoff_lo
    }

    /// Set the cutoff of the high pass filter.
    ///
    /// The instrument requires the low pass cutoff to be above the high pass cutoff. This is
    /// not enforced here, a violation is only logged.
    pub fn set_cutoff_lo(&mut self, cutoff: Cutoff) -> Result<(), InstrumentError> {
        self.cutoff_lo = cutoff.validate()?;
        self.check_cutoffs();
        Ok(())
    }

    /// Get the cutoff of the low pass filter.
    pub fn get_cutoff_hi(&self) -> Cutoff {
        self.cutoff_hi
    }

    /// Set the cutoff of the low pass filter.
    ///
    /// See [`Sr560::set_cutoff_lo`] for the interplay of both cutoffs.
    pub fn set_cutoff_hi(&mut self, cutoff: Cutoff) -> Result<(), InstrumentError> {
        self.cutoff_hi = cutoff.validate()?;
        self.check_cutoffs();
        Ok(())
    }

    /// Check if the output is inverted.
    pub fn get_invert(&self) -> bool {
        self.invert
    }

    /// Set if the output is inverted.
    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    /// Get the gain.
    pub fn get_gain(&self) -> u32 {
        self.gain
    }

    /// Set the gain, one of [`GAINS`]. Vernier settings are not supported.
    pub fn set_gain(&mut self, gain: u32) -> Result<(), InstrumentError> {
        self.gain = validate::one_of(gain, &GAINS)?;
        Ok(())
    }

    /// Convert a voltage measured at the output into the voltage at the input.
    ///
    /// Returns the measured voltage and the input voltage.
    pub fn amplified_voltage(&self, measured: Voltage) -> (Voltage, Voltage) {
        let sign = if self.invert { -1.0 } else { 1.0 };
        let input = measured.as_volts() / self.gain as f64 * sign;
        (measured, Voltage::from_volts(input))
    }

    /// Measure the output voltage with the given function and convert it like
    /// [`Sr560::amplified_voltage`].
    ///
    /// Use this with the voltage reading of the instrument behind the preamplifier.
    pub fn measure_amplified_voltage<F>(
        &self,
        mut measure: F,
    ) -> Result<(Voltage, Voltage), InstrumentError>
    where
        F: FnMut() -> Result<Voltage, InstrumentError>,
    {
        let measured = measure()?;
        Ok(self.amplified_voltage(measured))
    }

    fn check_cutoffs(&self) {
        if self.cutoff_hi.as_hertz() <= self.cutoff_lo.as_hertz() {
            warn!(
                "Low pass cutoff {} must be above high pass cutoff {}",
                self.cutoff_hi, self.cutoff_lo
            );
        }
    }
}
