//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte, half and word read/write at device-relative offsets.
//! 3. **Downcasting:** An optional cast to `Console` for inspecting program output.
//!
//! The bus checks that an access lies entirely inside a device's range before
//! calling into it, so implementors may index their storage directly.

use crate::soc::devices::Console;

/// Trait for memory-mapped I/O devices attached to the system bus.
pub trait Device {
    /// Returns a short name for this device (e.g., `"RAM"`, `"CONSOLE"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's region.
    fn address_range(&self) -> (u32, u32);
    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u32) -> u8;
    /// Reads two bytes (little-endian) at the given offset.
    fn read_u16(&mut self, offset: u32) -> u16;
    /// Reads four bytes (little-endian) at the given offset.
    fn read_u32(&mut self, offset: u32) -> u32;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u32, val: u8);
    /// Writes two bytes (little-endian) at the given offset.
    fn write_u16(&mut self, offset: u32, val: u16);
    /// Writes four bytes (little-endian) at the given offset.
    fn write_u32(&mut self, offset: u32, val: u32);

    /// Writes a contiguous byte slice at the given offset (default: byte-by-byte).
    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        for (i, byte) in data.iter().enumerate() {
            self.write_u8(offset + i as u32, *byte);
        }
    }

    /// Returns a reference as `Console` if this device is the console; otherwise `None`.
    fn as_console(&self) -> Option<&Console> {
        None
    }
}
