//! Tests for the Rigol DP800 series driver with a DP831 model.

use rstest::*;

use instrumentrs::{InstrumentError, LoopbackInterfaceString};
use measurements::{Current, Voltage};

use rigol_dp8xx::{ModelRanges, OutputMode, RigolDp8xx};

type Dp831Lbk = RigolDp8xx<LoopbackInterfaceString>;

/// Create a new DP831 that reports the given options and exchanges the given traffic.
fn crt_inst_opt(options: &str, host2inst: Vec<&str>, inst2host: Vec<&str>) -> Dp831Lbk {
    let mut h2i = vec!["*OPT?".to_string()];
    h2i.extend(host2inst.iter().map(|s| s.to_string()));
    let mut i2h = vec![options.to_string()];
    i2h.extend(inst2host.iter().map(|s| s.to_string()));

    let interface = LoopbackInterfaceString::new(h2i, i2h, "\n");
    RigolDp8xx::dp831(interface).unwrap()
}

/// Create a new DP831 without any options installed.
fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> Dp831Lbk {
    crt_inst_opt("0,0,0", host2inst, inst2host)
}

#[fixture]
fn emp_inst() -> Dp831Lbk {
    crt_inst(vec![], vec![])
}

/// Protection tables that do not cover every channel are refused before any traffic.
#[rstest]
#[case(|r: &mut ModelRanges| r.ovp_standard.truncate(2))]
#[case(|r: &mut ModelRanges| r.ovp_precision.truncate(1))]
#[case(|r: &mut ModelRanges| r.ocp_standard.clear())]
#[case(|r: &mut ModelRanges| r.ocp_precision.push((0.0001, 1.0)))]
fn ranges_mismatched_tables(#[case] modify: fn(&mut ModelRanges)) {
    let mut ranges = ModelRanges::dp831();
    modify(&mut ranges);
    let interface = LoopbackInterfaceString::new(vec![], vec![], "\n");
    assert!(matches!(
        RigolDp8xx::try_new(interface, ranges),
        Err(InstrumentError::InvalidArgument(_))
    ));
}

#[rstest]
fn options_none(emp_inst: Dp831Lbk) {
    assert!(emp_inst.get_installed_options().is_empty());
    assert!(!emp_inst.has_precision_option());
}

#[rstest]
fn options_precision() {
    let inst = crt_inst_opt("DP8-ACCURACY,0,0", vec![], vec![]);
    assert_eq!(inst.get_installed_options(), ["DP8-ACCURACY".to_string()]);
    assert!(inst.has_precision_option());
}

#[rstest]
fn get_idn() {
    let mut inst = crt_inst(
        vec!["*IDN?"],
        vec!["RIGOL TECHNOLOGIES,DP831A,DP8A000000001,00.01.14"],
    );
    assert_eq!(
        inst.get_idn().unwrap(),
        "RIGOL TECHNOLOGIES,DP831A,DP8A000000001,00.01.14"
    );
}

#[rstest]
fn get_channel_out_of_range(mut emp_inst: Dp831Lbk) {
    assert!(matches!(
        emp_inst.get_channel(3),
        Err(InstrumentError::ChannelIndexOutOfRange {
            idx: 3,
            nof_channels: 3
        })
    ));
}

#[rstest]
#[case(0, "1")]
#[case(1, "2")]
#[case(2, "3")]
fn voltage_level(#[case] idx: usize, #[case] num: &str) {
    let cmd = format!(":INSTrument:NSELect {num};:SOURce:VOLTage:LEVel:IMMediate:AMPLitude?");
    let mut inst = crt_inst(vec![&cmd], vec!["1.500"]);
    let mut ch = inst.get_channel(idx).unwrap();
    assert_eq!(ch.get_voltage_level().unwrap().as_volts(), 1.5);
}

#[rstest]
#[case(0, 5.0, ":INSTrument:NSELect 1;:SOURce:VOLTage:LEVel:IMMediate:AMPLitude 5")]
#[case(1, 30.0, ":INSTrument:NSELect 2;:SOURce:VOLTage:LEVel:IMMediate:AMPLitude 30")]
#[case(2, -12.5, ":INSTrument:NSELect 3;:SOURce:VOLTage:LEVel:IMMediate:AMPLitude -12.5")]
fn set_voltage_level(#[case] idx: usize, #[case] volts: f64, #[case] cmd: &str) {
    let mut inst = crt_inst(vec![cmd], vec![]);
    let mut ch = inst.get_channel(idx).unwrap();
    ch.set_voltage_level(Voltage::from_volts(volts)).unwrap();
}

#[rstest]
#[case(0, 8.5)]
#[case(0, -1.0)]
#[case(1, 31.0)]
#[case(2, 12.0)]
#[case(2, -30.5)]
fn set_voltage_level_out_of_range(
    mut emp_inst: Dp831Lbk,
    #[case] idx: usize,
    #[case] volts: f64,
) {
    let mut ch = emp_inst.get_channel(idx).unwrap();
    assert!(matches!(
        ch.set_voltage_level(Voltage::from_volts(volts)),
        Err(InstrumentError::FloatValueOutOfRange { .. })
    ));
}

#[rstest]
fn current_level() {
    let mut inst = crt_inst(
        vec![
            ":INSTrument:NSELect 1;:SOURce:CURRent:LEVel:IMMediate:AMPLitude?",
            ":INSTrument:NSELect 1;:SOURce:CURRent:LEVel:IMMediate:AMPLitude 2.5",
        ],
        vec!["0.250"],
    );
    let mut ch = inst.get_channel(0).unwrap();
    assert_eq!(ch.get_current_level().unwrap().as_amperes(), 0.25);
    ch.set_current_level(Current::from_amperes(2.5)).unwrap();
}

#[rstest]
fn set_current_level_out_of_range(mut emp_inst: Dp831Lbk) {
    let mut ch = emp_inst.get_channel(1).unwrap();
    assert!(
        ch.set_current_level(Current::from_amperes(2.5))
            .is_err()
    );
}

#[rstest]
fn output_enabled() {
    let mut inst = crt_inst(
        vec![
            ":INSTrument:NSELect 2;:OUTPut:STATe?",
            ":INSTrument:NSELect 2;:OUTPut:STATe ON",
            ":INSTrument:NSELect 2;:OUTPut:STATe OFF",
        ],
        vec!["OFF"],
    );
    let mut ch = inst.get_channel(1).unwrap();
    assert!(!ch.get_output_enabled().unwrap());
    ch.set_output_enabled(true).unwrap();
    ch.set_output_enabled(false).unwrap();
}

#[rstest]
#[case("CV", OutputMode::ConstantVoltage)]
#[case("CC", OutputMode::ConstantCurrent)]
#[case("UR", OutputMode::Unregulated)]
fn get_mode(#[case] resp: &str, #[case] exp: OutputMode) {
    let mut inst = crt_inst(vec![":INSTrument:NSELect 3;:OUTPut:MODE?"], vec![resp]);
    let mut ch = inst.get_channel(2).unwrap();
    assert_eq!(ch.get_mode().unwrap(), exp);
}

#[rstest]
fn measure_output() {
    let mut inst = crt_inst(
        vec![
            ":INSTrument:NSELect 1;:MEASure:VOLTage:DC?",
            ":INSTrument:NSELect 1;:MEASure:CURRent:DC?",
            ":INSTrument:NSELect 1;:MEASure:POWEr?",
        ],
        vec!["4.9990", "0.5000", "2.500"],
    );
    let mut ch = inst.get_channel(0).unwrap();
    assert_eq!(ch.get_voltage().unwrap().as_volts(), 4.999);
    assert_eq!(ch.get_current().unwrap().as_amperes(), 0.5);
    assert_eq!(ch.get_power().unwrap().as_watts(), 2.5);
}

#[rstest]
fn measurement_parse_error() {
    let mut inst = crt_inst(vec![":INSTrument:NSELect 1;:MEASure:VOLTage:DC?"], vec!["ERR"]);
    let mut ch = inst.get_channel(0).unwrap();
    assert!(matches!(
        ch.get_voltage(),
        Err(InstrumentError::ResponseParseError(_))
    ));
}

#[rstest]
fn ovp() {
    let mut inst = crt_inst(
        vec![
            ":INSTrument:NSELect 2;:VOLTage:PROTection:LEVel?",
            ":INSTrument:NSELect 2;:VOLTage:PROTection:LEVel 32",
            ":INSTrument:NSELect 2;:VOLTage:PROTection:STATe?",
            ":INSTrument:NSELect 2;:VOLTage:PROTection:STATe ON",
        ],
        vec!["33.000", "ON"],
    );
    let mut ch = inst.get_channel(1).unwrap();
    assert_eq!(ch.get_ovp_value().unwrap().as_volts(), 33.0);
    ch.set_ovp_value(Voltage::from_volts(32.0)).unwrap();
    assert!(ch.get_ovp_state().unwrap());
    ch.set_ovp_state(true).unwrap();
}

#[rstest]
fn ocp() {
    let mut inst = crt_inst(
        vec![
            ":INSTrument:NSELect 3;:CURRent:PROTection:LEVel?",
            ":INSTrument:NSELect 3;:CURRent:PROTection:LEVel 1.5",
            ":INSTrument:NSELect 3;:CURRent:PROTection:STATe?",
            ":INSTrument:NSELect 3;:CURRent:PROTection:STATe OFF",
        ],
        vec!["2.200", "0"],
    );
    let mut ch = inst.get_channel(2).unwrap();
    assert_eq!(ch.get_ocp_value().unwrap().as_amperes(), 2.2);
    ch.set_ocp_value(Current::from_amperes(1.5)).unwrap();
    assert!(!ch.get_ocp_state().unwrap());
    ch.set_ocp_state(false).unwrap();
}

#[rstest]
#[case("0,0,0", false)]
#[case("DP8-ACCURACY,0,0", true)]
fn ocp_resolution_follows_option(#[case] options: &str, #[case] allowed: bool) {
    // 0.0005 A is only above the lower OCP bound with the precision option.
    let cmd = ":INSTrument:NSELect 1;:CURRent:PROTection:LEVel 0.0005";
    let h2i = if allowed { vec![cmd] } else { vec![] };
    let mut inst = crt_inst_opt(options, h2i, vec![]);
    let mut ch = inst.get_channel(0).unwrap();
    let res = ch.set_ocp_value(Current::from_amperes(0.0005));
    assert_eq!(res.is_ok(), allowed);
}

#[rstest]
fn negative_channel_ovp(mut emp_inst: Dp831Lbk) {
    let mut ch = emp_inst.get_channel(2).unwrap();
    assert_eq!(ch.get_ranges().ovp, (-0.01, -33.0));
    assert!(ch.set_ovp_value(Voltage::from_volts(10.0)).is_err());
}
