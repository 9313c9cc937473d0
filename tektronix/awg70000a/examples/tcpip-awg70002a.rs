//! Upload a sine to an AWG70002A and play it on output 1.

use std::{f64::consts::PI, time::Duration};

use instrumentrs::TcpIpInterface;
use measurements::{Frequency, Voltage};
use tektronix_awg70000a::{AwgMode, TektronixAwg70002a};

fn main() {
    env_logger::init();

    let interface = TcpIpInterface::full("192.168.1.70:4000", Duration::from_secs(10)).unwrap();
    let mut inst = TektronixAwg70002a::try_new(interface).unwrap();
    println!("{}", inst.get_idn().unwrap());

    inst.set_mode(AwgMode::Awg).unwrap();
    inst.set_sample_rate(Frequency::from_hertz(10e9)).unwrap();

    let samples: Vec<f64> = (0..2400)
        .map(|i| (2.0 * PI * i as f64 / 2400.0).sin())
        .collect();
    inst.clear_waveform_list().unwrap();
    inst.send_waveform("sine", &samples).unwrap();
    inst.wait_for_operation_to_complete().unwrap();
    println!("Waveforms: {:?}", inst.get_waveform_list().unwrap());

    let mut ch1 = inst.get_channel(0).unwrap();
    ch1.assign_waveform("sine").unwrap();
    ch1.set_awg_amplitude(Voltage::from_volts(0.5)).unwrap();
    ch1.set_state(true).unwrap();

    inst.play().unwrap();
    println!("Run state: {}", inst.get_run_state().unwrap());
}
