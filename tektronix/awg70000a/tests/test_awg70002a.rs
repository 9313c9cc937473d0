//! Tests for the Tektronix AWG70002A driver.

use rstest::*;

use instrumentrs::{InstrumentError, LoopbackInterfaceBytes, LoopbackInterfaceString};
use measurements::{Frequency, Voltage};

use tektronix_awg70000a::{
    AwgMode, ClockSource, FgenType, RunState, SignalPath, TektronixAwg70002a,
};

type AwgLbk = TektronixAwg70002a<LoopbackInterfaceString>;

fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> AwgLbk {
    let h2i = host2inst.iter().map(|s| s.to_string()).collect();
    let i2h = inst2host.iter().map(|s| s.to_string()).collect();
    let interface = LoopbackInterfaceString::new(h2i, i2h, "\n");
    TektronixAwg70002a::try_new(interface).unwrap()
}

#[fixture]
fn emp_inst() -> AwgLbk {
    crt_inst(vec![], vec![])
}

#[rstest]
fn get_channel_out_of_range(mut emp_inst: AwgLbk) {
    assert!(emp_inst.get_channel(1).is_ok());
    assert!(matches!(
        emp_inst.get_channel(2),
        Err(InstrumentError::ChannelIndexOutOfRange {
            idx: 2,
            nof_channels: 2
        })
    ));
}

#[rstest]
fn mode() {
    let mut inst = crt_inst(
        vec!["INSTrument:MODE?", "INSTrument:MODE FGEN"],
        vec!["AWG"],
    );
    assert_eq!(inst.get_mode().unwrap(), AwgMode::Awg);
    inst.set_mode(AwgMode::Fgen).unwrap();
}

#[rstest]
fn sample_rate() {
    let mut inst = crt_inst(
        vec!["CLOCk:SRATe?", "CLOCk:SRATe 12500000000"],
        vec!["2.5E+10"],
    );
    assert_eq!(inst.get_sample_rate().unwrap().as_hertz(), 25e9);
    inst.set_sample_rate(Frequency::from_hertz(12.5e9)).unwrap();
}

#[rstest]
#[case(1.0e3)]
#[case(26.0e9)]
fn sample_rate_out_of_range(mut emp_inst: AwgLbk, #[case] rate: f64) {
    assert!(matches!(
        emp_inst.set_sample_rate(Frequency::from_hertz(rate)),
        Err(InstrumentError::FloatValueOutOfRange { .. })
    ));
}

#[rstest]
fn clock_source() {
    let mut inst = crt_inst(
        vec!["CLOCk:SOURce?", "CLOCk:SOURce EVAR"],
        vec!["INT"],
    );
    assert_eq!(inst.get_clock_source().unwrap(), ClockSource::Internal);
    inst.set_clock_source(ClockSource::InternalVariableReference)
        .unwrap();
}

#[rstest]
#[case("0", RunState::Stopped)]
#[case("2", RunState::Running)]
fn run_state(#[case] resp: &str, #[case] exp: RunState) {
    let mut inst = crt_inst(vec!["AWGControl:RSTate?"], vec![resp]);
    assert_eq!(inst.get_run_state().unwrap(), exp);
}

#[rstest]
fn playback_commands() {
    let mut inst = crt_inst(
        vec![
            "AWGControl:RUN",
            "TRIGger:IMMediate ATRigger",
            "AWGControl:STOP",
            "WLISt:WAVeform:DELete ALL",
            "SLISt:SEQuence:DELete ALL",
        ],
        vec![],
    );
    inst.play().unwrap();
    inst.force_trigger().unwrap();
    inst.stop().unwrap();
    inst.clear_waveform_list().unwrap();
    inst.clear_sequence_list().unwrap();
}

#[rstest]
fn wait_for_operation_to_complete() {
    let mut inst = crt_inst(vec!["*OPC?"], vec!["1"]);
    inst.wait_for_operation_to_complete().unwrap();
}

#[rstest]
fn all_output_off() {
    let mut inst = crt_inst(vec!["OUTPut:OFF?", "OUTPut:OFF 1"], vec!["0"]);
    assert!(!inst.get_all_output_off().unwrap());
    inst.set_all_output_off(true).unwrap();
}

#[rstest]
fn current_directory() {
    let mut inst = crt_inst(
        vec![
            "MMEMory:CDIRectory?",
            "MMEMory:CDIRectory \"C:\\Users\\OEM\\Documents\"",
        ],
        vec!["\"C:\\Program Files\\Tektronix\\AWG70000\""],
    );
    assert_eq!(
        inst.get_current_directory().unwrap(),
        "C:\\Program Files\\Tektronix\\AWG70000"
    );
    inst.set_current_directory("C:\\Users\\OEM\\Documents")
        .unwrap();
}

#[rstest]
#[case("\"sine\",\"ramp\"", vec!["sine", "ramp"])]
#[case("\"\"", vec![])]
fn waveform_list(#[case] resp: &str, #[case] exp: Vec<&str>) {
    let mut inst = crt_inst(vec!["WLISt:LIST?"], vec![resp]);
    assert_eq!(inst.get_waveform_list().unwrap(), exp);
}

#[rstest]
fn send_waveform() {
    let mut data = b"WLISt:WAVeform:DATA \"ramp\",#212".to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x80, 0xbf]);
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    data.extend_from_slice(&[0x00, 0x00, 0x80, 0x3f]);
    data.push(b'\n');

    let interface = LoopbackInterfaceBytes::new(
        vec![b"WLISt:WAVeform:NEW \"ramp\", 3\n".to_vec(), data],
        vec![],
    );
    let mut inst = TektronixAwg70002a::try_new(interface).unwrap();
    inst.send_waveform("ramp", &[-1.0, 0.0, 1.0]).unwrap();
}

#[rstest]
#[case("sine", vec![0.0, 1.5])]
#[case("", vec![0.0])]
#[case("a\"b", vec![0.0])]
#[case("empty", vec![])]
fn send_waveform_invalid(mut emp_inst: AwgLbk, #[case] name: &str, #[case] samples: Vec<f64>) {
    assert!(matches!(
        emp_inst.send_waveform(name, &samples),
        Err(InstrumentError::InvalidValue(_))
    ));
}

#[rstest]
fn channel_state() {
    let mut inst = crt_inst(vec!["OUTPut2:STATe?", "OUTPut2:STATe 1"], vec!["0"]);
    let mut ch = inst.get_channel(1).unwrap();
    assert_eq!(ch.number(), 2);
    assert!(!ch.get_state().unwrap());
    ch.set_state(true).unwrap();
}

#[rstest]
fn channel_fgen() {
    let mut inst = crt_inst(
        vec![
            "FGEN:CHANnel1:TYPE?",
            "FGEN:CHANnel1:TYPE SQUARE",
            "FGEN:CHANnel1:AMPLitude 0.4",
            "FGEN:CHANnel1:OFFSet 0.1",
            "FGEN:CHANnel1:FREQuency 1000000",
            "FGEN:CHANnel1:DCLevel -0.2",
            "FGEN:CHANnel1:PHASe -90",
            "FGEN:CHANnel1:SYMMetry 50",
            "FGEN:CHANnel1:PATH?",
            "FGEN:CHANnel1:PATH DCHV",
            "FGEN:CHANnel1:PERiod?",
        ],
        vec!["SINE", "DCHB", "1.0E-6"],
    );
    let mut ch = inst.get_channel(0).unwrap();
    assert_eq!(ch.get_fgen_type().unwrap(), FgenType::Sine);
    ch.set_fgen_type(FgenType::Square).unwrap();
    ch.set_fgen_amplitude(Voltage::from_volts(0.4)).unwrap();
    ch.set_fgen_offset(Voltage::from_volts(0.1)).unwrap();
    ch.set_fgen_frequency(Frequency::from_hertz(1e6)).unwrap();
    ch.set_fgen_dclevel(Voltage::from_volts(-0.2)).unwrap();
    ch.set_fgen_phase(-90.0).unwrap();
    ch.set_fgen_symmetry(50.0).unwrap();
    assert_eq!(
        ch.get_fgen_signal_path().unwrap(),
        SignalPath::DcHighBandwidth
    );
    ch.set_fgen_signal_path(SignalPath::DcHighVoltage).unwrap();
    assert_eq!(ch.get_fgen_period().unwrap(), 1.0e-6);
}

#[rstest]
fn channel_fgen_getters() {
    let mut inst = crt_inst(
        vec![
            "FGEN:CHANnel2:AMPLitude?",
            "FGEN:CHANnel2:OFFSet?",
            "FGEN:CHANnel2:FREQuency?",
            "FGEN:CHANnel2:DCLevel?",
            "FGEN:CHANnel2:PHASe?",
            "FGEN:CHANnel2:SYMMetry?",
        ],
        vec!["0.5", "0", "1.0E+6", "0.25", "45", "100"],
    );
    let mut ch = inst.get_channel(1).unwrap();
    assert_eq!(ch.get_fgen_amplitude().unwrap().as_volts(), 0.5);
    assert_eq!(ch.get_fgen_offset().unwrap().as_volts(), 0.0);
    assert_eq!(ch.get_fgen_frequency().unwrap().as_hertz(), 1e6);
    assert_eq!(ch.get_fgen_dclevel().unwrap().as_volts(), 0.25);
    assert_eq!(ch.get_fgen_phase().unwrap(), 45.0);
    assert_eq!(ch.get_fgen_symmetry().unwrap(), 100.0);
}

#[rstest]
fn channel_fgen_out_of_range(mut emp_inst: AwgLbk) {
    let mut ch = emp_inst.get_channel(0).unwrap();
    assert!(ch.set_fgen_amplitude(Voltage::from_volts(0.6)).is_err());
    assert!(ch.set_fgen_offset(Voltage::from_volts(-0.1)).is_err());
    assert!(ch.set_fgen_frequency(Frequency::from_hertz(0.5)).is_err());
    assert!(ch.set_fgen_dclevel(Voltage::from_volts(0.3)).is_err());
    assert!(ch.set_fgen_phase(181.0).is_err());
    assert!(ch.set_fgen_symmetry(101.0).is_err());
    assert!(ch.set_awg_amplitude(Voltage::from_volts(0.2)).is_err());
}

#[rstest]
fn channel_awg_amplitude() {
    let mut inst = crt_inst(
        vec!["SOURce1:VOLTage?", "SOURce1:VOLTage 0.3"],
        vec!["0.5"],
    );
    let mut ch = inst.get_channel(0).unwrap();
    assert_eq!(ch.get_awg_amplitude().unwrap().as_volts(), 0.5);
    ch.set_awg_amplitude(Voltage::from_volts(0.3)).unwrap();
}

#[rstest]
fn channel_resolution() {
    let mut inst = crt_inst(
        vec!["SOURce2:DAC:RESolution?", "SOURce2:DAC:RESolution 8"],
        vec!["10"],
    );
    let mut ch = inst.get_channel(1).unwrap();
    assert_eq!(ch.get_resolution().unwrap(), 10);
    ch.set_resolution(8).unwrap();
    assert!(matches!(
        ch.set_resolution(12),
        Err(InstrumentError::InvalidValue(_))
    ));
}

#[rstest]
fn channel_assign_waveform() {
    let mut inst = crt_inst(
        vec!["SOURce1:CASSet:WAVeform \"sine\"", "SOURce1:CASSet?"],
        vec!["\"sine\""],
    );
    let mut ch = inst.get_channel(0).unwrap();
    ch.assign_waveform("sine").unwrap();
    assert_eq!(ch.get_assigned_asset().unwrap(), "sine");
}
