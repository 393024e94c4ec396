//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the bus that routes physical address accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Read/write by address with a last-device hint for throughput.
//! 3. **Faults:** Accesses no device fully covers return a [`BusFault`].
//! 4. **Loading:** Binary loading into whichever device claims the target range.

use super::devices::{Console, Device};
use crate::common::error::BusFault;

/// System bus connecting the core and devices; routes accesses by physical address.
pub struct Bus {
    /// Registered MMIO and memory devices.
    devices: Vec<Box<dyn Device>>,
    last_device_idx: usize,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.devices.iter().map(|d| d.name()).collect();
        f.debug_struct("Bus").field("devices", &names).finish()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Writes a binary blob into memory at the given physical address.
    ///
    /// The whole blob must fit inside one device.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) -> Result<(), BusFault> {
        if data.is_empty() {
            return Ok(());
        }
        let (dev, offset) = self.find_device(addr, data.len() as u64)?;
        dev.write_bytes(offset, data);
        Ok(())
    }

    /// Returns whether the given physical address is backed by any device.
    pub fn is_valid_address(&self, paddr: u32) -> bool {
        self.devices.iter().any(|d| covers(d.address_range(), paddr, 1))
    }

    /// Returns the console device, if one is attached.
    pub fn console(&self) -> Option<&Console> {
        self.devices.iter().find_map(|d| d.as_console())
    }

    fn find_device(&mut self, paddr: u32, len: u64) -> Result<(&mut Box<dyn Device>, u32), BusFault> {
        let hint = self.last_device_idx;
        let idx = match self.devices.get(hint) {
            Some(d) if covers(d.address_range(), paddr, len) => Some(hint),
            _ => self
                .devices
                .iter()
                .position(|d| covers(d.address_range(), paddr, len)),
        };
        let idx = idx.ok_or(BusFault(paddr))?;
        self.last_device_idx = idx;
        let dev = &mut self.devices[idx];
        let offset = paddr - dev.address_range().0;
        Ok((dev, offset))
    }

    /// Reads one byte at the given physical address.
    pub fn read_u8(&mut self, paddr: u32) -> Result<u8, BusFault> {
        let (dev, offset) = self.find_device(paddr, 1)?;
        Ok(dev.read_u8(offset))
    }
    /// Reads two bytes (little-endian) at the given physical address.
    pub fn read_u16(&mut self, paddr: u32) -> Result<u16, BusFault> {
        let (dev, offset) = self.find_device(paddr, 2)?;
        Ok(dev.read_u16(offset))
    }
    /// Reads four bytes (little-endian) at the given physical address.
    pub fn read_u32(&mut self, paddr: u32) -> Result<u32, BusFault> {
        let (dev, offset) = self.find_device(paddr, 4)?;
        Ok(dev.read_u32(offset))
    }
    /// Writes one byte at the given physical address.
    pub fn write_u8(&mut self, paddr: u32, val: u8) -> Result<(), BusFault> {
        let (dev, offset) = self.find_device(paddr, 1)?;
        dev.write_u8(offset, val);
        Ok(())
    }
    /// Writes two bytes (little-endian) at the given physical address.
    pub fn write_u16(&mut self, paddr: u32, val: u16) -> Result<(), BusFault> {
        let (dev, offset) = self.find_device(paddr, 2)?;
        dev.write_u16(offset, val);
        Ok(())
    }
    /// Writes four bytes (little-endian) at the given physical address.
    pub fn write_u32(&mut self, paddr: u32, val: u32) -> Result<(), BusFault> {
        let (dev, offset) = self.find_device(paddr, 4)?;
        dev.write_u32(offset, val);
        Ok(())
    }
}

/// True if `[paddr, paddr + len)` lies within `(base, size)`.
fn covers((base, size): (u32, u32), paddr: u32, len: u64) -> bool {
    let (base, size, paddr) = (base as u64, size as u64, paddr as u64);
    paddr >= base && paddr + len <= base + size
}
