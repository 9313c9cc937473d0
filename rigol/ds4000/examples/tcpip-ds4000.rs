use std::time::Duration;

use instrumentrs::TcpIpInterface;

use rigol_ds4000::{RigolDs4000, TriggerMode};

fn main() {
    env_logger::init();

    // Reading the internal memory can take several seconds per chunk.
    let interface = TcpIpInterface::full("192.168.1.60:5555", Duration::from_secs(20))
        .expect("Failed to connect");
    let mut inst = RigolDs4000::try_new(interface).unwrap();
    println!("Connected to {:?}", inst.get_idn().unwrap());

    inst.set_trigger_mode(TriggerMode::Single).unwrap();
    inst.single().unwrap();
    inst.force_trigger().unwrap();

    // Read the screen and the internal memory of channel 1.
    let mut ch1 = inst.get_channel(0).unwrap();
    println!("Amplitude: {}", ch1.get_amplitude().unwrap());

    let mut screen = ch1.curvedata();
    screen.prepare_curvedata().unwrap();
    let volts = screen.get_curvedata().unwrap();
    println!("Screen: {} points", volts.len());

    let mut memory = ch1.curvedata_raw();
    memory.prepare_curvedata().unwrap();
    let volts = memory.get_curvedata().unwrap();
    let times = memory.get_setpoints();
    println!(
        "Memory: {} points from {} s to {} s",
        volts.len(),
        times.first().unwrap_or(&0.0),
        times.last().unwrap_or(&0.0)
    );
}
