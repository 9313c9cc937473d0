//! Print the identification and sweep the attenuation of a RUDAT-13G-90.
//!
//! A USB HID transport is not part of `instrumentrs`. This example scripts the traffic of a
//! device with a loopback interface so that it runs without hardware.

use instrumentrs::LoopbackInterfaceBytes;
use minicircuits_rudat::{REPORT_LEN, RudatAttenuator};

fn report(s: &str) -> Vec<u8> {
    let mut data = vec![0u8; REPORT_LEN];
    data[0] = 0x01;
    data[1..=s.len()].copy_from_slice(s.as_bytes());
    data
}

fn main() {
    env_logger::init();

    let values = [0.0, 10.5, 45.25];

    let mut host2inst: Vec<Vec<u8>> = [":MN?", ":SN?", ":FIRMWARE?"]
        .iter()
        .map(|s| report(s))
        .collect();
    let mut inst2host = vec![report("RUDAT-13G-90"), report("12004160036"), report("A7")];
    for val in values {
        host2inst.push(report(&format!(":SETATT={val}")));
        host2inst.push(report(":ATT?"));
        inst2host.push(report(&format!("{val}")));
    }

    let interface = LoopbackInterfaceBytes::new(host2inst, inst2host);
    let mut inst = RudatAttenuator::try_new(interface).unwrap();

    inst.connect_message().unwrap();
    for val in values {
        inst.set_attenuation(val).unwrap();
        println!("Attenuation: {} dB", inst.get_attenuation().unwrap());
    }
}
