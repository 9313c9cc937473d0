//! Read the amplitude of a signal behind an SR560 with a DS4000 and refer it to the input.

use std::time::Duration;

use instrumentrs::TcpIpInterface;
use rigol_ds4000::RigolDs4000;
use srs_sr560::{Cutoff, Sr560};

fn main() {
    env_logger::init();

    let mut amp = Sr560::new();
    amp.set_gain(1000).unwrap();
    amp.set_invert(false);
    amp.set_cutoff_lo(Cutoff::Hertz(10.0)).unwrap();
    amp.set_cutoff_hi(Cutoff::Hertz(100e3)).unwrap();

    let interface = TcpIpInterface::full("192.168.1.60:5555", Duration::from_secs(5)).unwrap();
    let mut scope = RigolDs4000::try_new(interface).unwrap();
    let mut ch1 = scope.get_channel(0).unwrap();

    let (raw, input) = amp
        .measure_amplified_voltage(|| ch1.get_amplitude())
        .unwrap();
    println!("Amplitude at the scope: {raw}, at the SR560 input: {input}");
}
