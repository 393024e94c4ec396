//! System-on-Chip construction and top-level `System` type.
//!
//! Builds the bus from configuration: RAM at `memory.ram_base` and the console
//! at `memory.console_addr`.

use crate::config::Config;
use crate::soc::devices::Console;
use crate::soc::interconnect::Bus;
use crate::soc::memory::Ram;

/// Top-level system instance holding the interconnect.
#[derive(Debug)]
pub struct System {
    /// System interconnect; routes accesses to RAM and MMIO devices.
    pub bus: Bus,
}

impl System {
    /// Builds a new system from configuration.
    pub fn new(config: &Config) -> Self {
        let mut bus = Bus::new();
        bus.add_device(Box::new(Ram::new(
            config.memory.ram_base,
            config.memory.ram_size,
        )));
        bus.add_device(Box::new(Console::new(
            config.memory.console_addr,
            config.memory.console_echo,
        )));
        Self { bus }
    }
}
