//! Built-in fleet: the installed Just Add Power devices.
//!
//! Used whenever the configuration does not declare its own `[[devices]]`.
//! Order matters: it is the order devices are rendered and dispatched in.

use std::net::{IpAddr, Ipv4Addr};

use crate::device::{Device, DeviceKind, DeviceStatus, Location};

/// An address on the venue's `192.168.8.0/24` AV LAN.
const fn lan(host: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 168, 8, host))
}

const FLEET: &[(IpAddr, &str, &str, &str, DeviceKind, Location)] = &[
    // Transmitters
    (lan(30), "Apple TV TX", "3G TX", "TX2", DeviceKind::Tx, Location::Other),
    (lan(10), "Cable Box 1 TX", "3G-S TX", "TX7", DeviceKind::Tx, Location::Other),
    (lan(18), "Cable Box 2 TX", "3G TX", "TX3", DeviceKind::Tx, Location::Other),
    (lan(19), "Cable Box 3 TX", "3G TX", "TX4", DeviceKind::Tx, Location::Other),
    (lan(26), "Office Unifi TX", "3G-S TX", "TX5", DeviceKind::Tx, Location::Other),
    (lan(80), "Wireless Mic TX", "2G/3G SX-TX", "TX8", DeviceKind::Tx, Location::Other),
    (lan(11), "Mobile Video TX", "3G TX", "TX9", DeviceKind::Tx, Location::Other),
    (lan(17), "RockBot Audio TX", "2G/3G SX-TX", "TX10", DeviceKind::Tx, Location::Other),
    (lan(16), "Mobile Audio TX", "2G/3G SX-TX", "TX1", DeviceKind::Tx, Location::Other),
    // Attic receivers
    (lan(12), "Jesters Left TV RX 2", "3G RX", "RX12", DeviceKind::Rx, Location::Attic),
    (lan(20), "Jesters Right TV RX 4", "3G RX", "RX20", DeviceKind::Rx, Location::Attic),
    // Bowling receivers
    (lan(25), "Bowling Music RX", "2G/3G SX-RX", "RX25", DeviceKind::Rx, Location::Bowling),
    (lan(28), "Bowling Bar Music RX", "2G/3G SX-RX", "RX27", DeviceKind::Rx, Location::Bowling),
    (lan(60), "Bowling Bar TV 1", "3G RX", "RX60", DeviceKind::Rx, Location::Bowling),
    (lan(61), "Bowling Bar TV 2", "3G RX", "RX61", DeviceKind::Rx, Location::Bowling),
    (lan(62), "Bowling Bar TV 3", "3G RX", "RX62", DeviceKind::Rx, Location::Bowling),
    (lan(63), "Bowling Bar TV 4", "3G RX", "RX63", DeviceKind::Rx, Location::Bowling),
    // NeoVerse receivers
    (lan(50), "NeoVerse 1", "3G RX", "RX50", DeviceKind::Rx, Location::Neoverse),
    (lan(51), "NeoVerse 2", "3G RX", "RX51", DeviceKind::Rx, Location::Neoverse),
    (lan(52), "NeoVerse 3", "3G RX", "RX52", DeviceKind::Rx, Location::Neoverse),
    (lan(53), "NeoVerse 4", "3G RX", "RX53", DeviceKind::Rx, Location::Neoverse),
    (lan(54), "NeoVerse 5", "3G RX", "RX54", DeviceKind::Rx, Location::Neoverse),
    (lan(55), "NeoVerse 6", "3G RX", "RX55", DeviceKind::Rx, Location::Neoverse),
    // Other receivers
    (lan(13), "Rink Video RX", "3G RX", "RX13", DeviceKind::Rx, Location::Other),
    (lan(15), "Rink Music RX", "2G/3G SX-RX", "RX15", DeviceKind::Rx, Location::Other),
    (lan(27), "Axe Billiards Music RX", "2G/3G SX-RX", "RX27", DeviceKind::Rx, Location::Other),
    (lan(70), "Dining Area TV", "3G RX", "RX70", DeviceKind::Rx, Location::Other),
    (lan(81), "Facility Zone Pro Rx", "2G/3G SX-RX", "RX81", DeviceKind::Rx, Location::Other),
];

/// The built-in device list, every entry starting `online`.
#[must_use]
pub fn builtin() -> Vec<Device> {
    FLEET
        .iter()
        .map(|&(ip, name, model, device_id, kind, location)| Device {
            ip,
            name: name.to_string(),
            model: model.to_string(),
            device_id: device_id.to_string(),
            kind,
            location,
            status: DeviceStatus::Online,
        })
        .collect()
}
