use instrumentrs::TcpIpInterface;

use keithley_3706a::{ConnectRule, Keithley3706A};

fn main() {
    env_logger::init();

    // The 3706A listens for raw TSP commands on port 5025.
    let interface = TcpIpInterface::simple("192.168.1.50:5025").expect("Failed to connect");

    // Creating the driver queries the installed cards.
    let mut inst = Keithley3706A::try_new(interface).unwrap();
    inst.connect_message().unwrap();

    inst.set_channel_connect_rule(ConnectRule::BreakBeforeMake)
        .unwrap();

    // Close the channels between row 1 and the first four columns of slot 1.
    let channels = inst.disconnect_row_from_columns(1, 1, &[1, 2, 3, 4]).unwrap();
    println!("Switched channels: {channels:?}");
    println!("Closed: {:?}", inst.get_closed_channels("slot1").unwrap());

    inst.open_channel("allslots").unwrap();
}
