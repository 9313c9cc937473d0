//! Waveform preamble of the oscilloscope.

use instrumentrs::InstrumentError;

/// Largest memory depth of the DS4000 series in points.
pub const MAX_POINTS: usize = 140_000_000;

/// Acquisition parameters that describe a waveform, as returned by `:WAVeform:PREamble?`.
///
/// The preamble must be fetched right before every capture, since it changes with the time base,
/// vertical scale, and read mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preamble {
    /// Data format: 0 for WORD, 1 for BYTE, 2 for ASCii.
    pub format: u8,
    /// Read mode: 0 for NORMal, 1 for MAXimum, 2 for RAW.
    pub mode: u8,
    /// Number of waveform points.
    pub points: usize,
    /// Number of averages in average acquisition mode, otherwise 1.
    pub count: usize,
    /// Time difference between two neighboring points in seconds.
    pub xincrement: f64,
    /// Time of the first point relative to the trigger in seconds.
    pub xorigin: f64,
    /// Reference time of the data point.
    pub xreference: f64,
    /// Voltage of one raw unit in volts.
    pub yincrement: f64,
    /// Vertical offset relative to the reference position.
    pub yorigin: f64,
    /// Vertical reference position of the raw data.
    pub yreference: f64,
}

impl Preamble {
    /// Parse the ten comma-separated fields of the preamble answer.
    ///
    /// Integer fields may be reported in float notation by some firmware versions. They must be
    /// whole, non-negative numbers, and the point and average counts at most [`MAX_POINTS`].
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, InstrumentError> {
        let err = || InstrumentError::ResponseParseError(value.to_string());
        let fields = value
            .trim()
            .split(',')
            .map(|s| s.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| err())?;

        match fields.as_slice() {
            [
                format,
                mode,
                points,
                count,
                xincrement,
                xorigin,
                xreference,
                yincrement,
                yorigin,
                yreference,
            ] => Ok(Preamble {
                format: whole_number(*format, u8::MAX as usize).ok_or_else(err)? as u8,
                mode: whole_number(*mode, u8::MAX as usize).ok_or_else(err)? as u8,
                points: whole_number(*points, MAX_POINTS).ok_or_else(err)?,
                count: whole_number(*count, MAX_POINTS).ok_or_else(err)?,
                xincrement: *xincrement,
                xorigin: *xorigin,
                xreference: *xreference,
                yincrement: *yincrement,
                yorigin: *yorigin,
                yreference: *yreference,
            }),
            _ => Err(err()),
        }
    }

    /// Time of every point, evenly spaced from `xorigin` to `xorigin + xincrement * points`.
    pub fn time_axis(&self) -> Vec<f64> {
        let start = self.xorigin;
        let stop = self.xorigin + self.xincrement * self.points as f64;
        match self.points {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n).map(|i| start + step * i as f64).collect()
            }
        }
    }

    /// Convert raw byte samples into volts with the calibration constants of this preamble.
    pub fn to_volts(&self, raw: &[u8]) -> Vec<f64> {
        raw.iter()
            .map(|b| (*b as f64 - self.yreference - self.yorigin) * self.yincrement)
            .collect()
    }
}

/// Convert a float field into an integer if it is whole and within `[0, max]`.
fn whole_number(value: f64, max: usize) -> Option<usize> {
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= max as f64 {
        Some(value as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    const PREAMBLE: &str = "1,2,1400,1,1.000000e-09,-7.000000e-07,0,4.000000e-02,-2.000000e+00,127";

    #[fixture]
    fn preamble() -> Preamble {
        Preamble::from_cmd_str(PREAMBLE).unwrap()
    }

    #[rstest]
    fn parse(preamble: Preamble) {
        assert_eq!(preamble.format, 1);
        assert_eq!(preamble.mode, 2);
        assert_eq!(preamble.points, 1400);
        assert_eq!(preamble.count, 1);
        assert_eq!(preamble.xincrement, 1e-9);
        assert_eq!(preamble.xorigin, -7e-7);
        assert_eq!(preamble.xreference, 0.0);
        assert_eq!(preamble.yincrement, 0.04);
        assert_eq!(preamble.yorigin, -2.0);
        assert_eq!(preamble.yreference, 127.0);
    }

    #[rstest]
    #[case("1,2,1400")]
    #[case("1,2,1400,1,1e-9,-7e-7,0,0.04,0,127,5")]
    #[case("1,2,many,1,1e-9,-7e-7,0,0.04,0,127")]
    #[case("1,0,1e30,1,1e-9,0,0,0.04,0,127")]
    #[case("1,0,inf,1,1e-9,0,0,0.04,0,127")]
    #[case("1,0,-5,1,1e-9,0,0,0.04,0,127")]
    #[case("1,0,14.5,1,1e-9,0,0,0.04,0,127")]
    #[case("1,0,1400,1e30,1e-9,0,0,0.04,0,127")]
    #[case("1,0,1400,-1,1e-9,0,0,0.04,0,127")]
    #[case("300,0,1400,1,1e-9,0,0,0.04,0,127")]
    fn parse_invalid(#[case] resp: &str) {
        assert!(Preamble::from_cmd_str(resp).is_err());
    }

    #[rstest]
    fn time_axis(mut preamble: Preamble) {
        preamble.points = 5;
        preamble.xorigin = 0.0;
        preamble.xincrement = 1.0;
        assert_eq!(preamble.time_axis(), vec![0.0, 1.25, 2.5, 3.75, 5.0]);

        preamble.points = 1;
        assert_eq!(preamble.time_axis(), vec![0.0]);
    }

    /// Conversion is `(raw - yreference - yorigin) * yincrement` for every byte.
    #[rstest]
    fn to_volts(preamble: Preamble) {
        let volts = preamble.to_volts(&[0, 125, 127, 255]);
        let exp: Vec<f64> = [0.0_f64, 125.0, 127.0, 255.0]
            .iter()
            .map(|r| (r - 127.0 + 2.0) * 0.04)
            .collect();
        assert_eq!(volts, exp);
        assert_eq!(volts, preamble.to_volts(&[0, 125, 127, 255]));
    }
}
