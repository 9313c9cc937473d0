//! Ramp channel 1 of a DP831 and print the measured output.

use std::{thread, time::Duration};

use measurements::{Current, Voltage};
use rigol_dp8xx::{RigolDp8xx, SerialInterfaceDp8xx};

fn main() {
    env_logger::init();

    let port = "/dev/ttyUSB0";
    let serial_inst = SerialInterfaceDp8xx::simple(port).expect("Failed to open serial port");
    let mut inst = RigolDp8xx::dp831(serial_inst).unwrap();

    println!("{}", inst.get_idn().unwrap());
    println!("Installed options: {:?}", inst.get_installed_options());

    let mut ch1 = inst.get_channel(0).unwrap();
    ch1.set_current_level(Current::from_amperes(0.1)).unwrap();
    ch1.set_output_enabled(true).unwrap();

    for step in 0..=5 {
        ch1.set_voltage_level(Voltage::from_volts(step as f64)).unwrap();
        thread::sleep(Duration::from_millis(500));
        println!(
            "{} V set, {} measured in {} mode",
            step,
            ch1.get_voltage().unwrap(),
            ch1.get_mode().unwrap()
        );
    }

    ch1.set_output_enabled(false).unwrap();
}
