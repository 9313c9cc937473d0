//! Tests for the virtual SR560 preamplifier.

use rstest::*;

use instrumentrs::InstrumentError;
use measurements::Voltage;

use srs_sr560::{Cutoff, Sr560};

#[fixture]
fn amp() -> Sr560 {
    Sr560::new()
}

#[rstest]
fn defaults(amp: Sr560) {
    assert_eq!(amp.get_cutoff_lo(), Cutoff::Dc);
    assert_eq!(amp.get_cutoff_hi(), Cutoff::Hertz(1e6));
    assert!(amp.get_invert());
    assert_eq!(amp.get_gain(), 10);
}

#[rstest]
fn get_idn(amp: Sr560) {
    let idn = amp.get_idn();
    assert_eq!(idn.vendor, "Stanford Research Systems");
    assert_eq!(idn.model, "SR560");
    assert_eq!(idn.serial, None);
    assert_eq!(idn.firmware, None);
}

#[rstest]
#[case(Cutoff::Dc)]
#[case(Cutoff::Hertz(0.03))]
#[case(Cutoff::Hertz(300.0))]
#[case(Cutoff::Hertz(1e6))]
fn cutoffs_valid(mut amp: Sr560, #[case] cutoff: Cutoff) {
    amp.set_cutoff_lo(cutoff).unwrap();
    amp.set_cutoff_hi(cutoff).unwrap();
    assert_eq!(amp.get_cutoff_lo(), cutoff);
    assert_eq!(amp.get_cutoff_hi(), cutoff);
}

#[rstest]
#[case(0.05)]
#[case(2e6)]
#[case(0.0)]
fn cutoffs_invalid(mut amp: Sr560, #[case] hz: f64) {
    assert!(matches!(
        amp.set_cutoff_hi(Cutoff::Hertz(hz)),
        Err(InstrumentError::InvalidValue(_))
    ));
    assert_eq!(amp.get_cutoff_hi(), Cutoff::Hertz(1e6));
}

#[rstest]
#[case(1)]
#[case(500)]
#[case(50000)]
fn gain_valid(mut amp: Sr560, #[case] gain: u32) {
    amp.set_gain(gain).unwrap();
    assert_eq!(amp.get_gain(), gain);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(100000)]
fn gain_invalid(mut amp: Sr560, #[case] gain: u32) {
    assert!(matches!(
        amp.set_gain(gain),
        Err(InstrumentError::InvalidValue(_))
    ));
    assert_eq!(amp.get_gain(), 10);
}

#[rstest]
#[case(true, 10, 2.0, -0.2)]
#[case(false, 10, 2.0, 0.2)]
#[case(false, 1000, -0.5, -0.0005)]
#[case(true, 1, 0.25, -0.25)]
fn amplified_voltage(
    mut amp: Sr560,
    #[case] invert: bool,
    #[case] gain: u32,
    #[case] measured: f64,
    #[case] exp: f64,
) {
    amp.set_invert(invert);
    amp.set_gain(gain).unwrap();
    let (raw, input) = amp.amplified_voltage(Voltage::from_volts(measured));
    assert_eq!(raw.as_volts(), measured);
    assert!((input.as_volts() - exp).abs() < 1e-12);
}

#[rstest]
fn measure_amplified_voltage(amp: Sr560) {
    let (raw, input) = amp
        .measure_amplified_voltage(|| Ok(Voltage::from_volts(1.0)))
        .unwrap();
    assert_eq!(raw.as_volts(), 1.0);
    assert_eq!(input.as_volts(), -0.1);
}

#[rstest]
fn measure_amplified_voltage_error(amp: Sr560) {
    let res = amp.measure_amplified_voltage(|| {
        Err(InstrumentError::ResponseParseError("overload".to_string()))
    });
    assert!(matches!(res, Err(InstrumentError::ResponseParseError(_))));
}
