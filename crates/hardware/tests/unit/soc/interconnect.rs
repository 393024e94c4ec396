use pretty_assertions::assert_eq;

use rvooo_core::common::BusFault;
use rvooo_core::config::Config;
use rvooo_core::soc::System;

#[test]
fn default_system_maps_ram_and_console() {
    let config = Config::default();
    let mut bus = System::new(&config).bus;

    assert!(bus.is_valid_address(config.memory.ram_base));
    assert!(bus.is_valid_address(config.memory.console_addr));
    assert!(!bus.is_valid_address(0));
    assert!(bus.console().is_some());

    bus.write_u32(0x8000_0010, 0x0102_0304).unwrap();
    assert_eq!(bus.read_u16(0x8000_0012), Ok(0x0102));
    assert_eq!(bus.read_u8(0x8000_0010), Ok(0x04));
}

#[test]
fn access_straddling_end_of_ram_faults() {
    let mut config = Config::default();
    config.memory.ram_size = 16;
    let mut bus = System::new(&config).bus;
    assert_eq!(bus.read_u32(0x8000_000C), Ok(0));
    assert_eq!(bus.read_u32(0x8000_000E), Err(BusFault(0x8000_000E)));
    assert_eq!(bus.write_u8(0x8000_0010, 1), Err(BusFault(0x8000_0010)));
}

#[test]
fn blob_must_fit_in_one_device() {
    let mut config = Config::default();
    config.memory.ram_size = 8;
    let mut bus = System::new(&config).bus;
    assert!(bus.load_binary_at(&[1; 8], 0x8000_0000).is_ok());
    assert_eq!(bus.load_binary_at(&[1; 8], 0x8000_0004), Err(BusFault(0x8000_0004)));
}

#[test]
fn console_reads_as_zero() {
    let config = Config::default();
    let mut bus = System::new(&config).bus;
    assert_eq!(bus.read_u32(config.memory.console_addr), Ok(0));
}
