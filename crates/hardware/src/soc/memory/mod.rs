//! Physical System Memory (RAM).
//!
//! A zero-initialised byte buffer mapped at a fixed physical base address.
//! Multi-byte accesses are little-endian.

use std::fmt;

use crate::soc::devices::Device;

/// System Memory structure.
pub struct Ram {
    /// Backing storage.
    data: Vec<u8>,
    /// The base physical address where this memory is mapped.
    base_addr: u32,
}

impl fmt::Debug for Ram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ram")
            .field("base_addr", &format_args!("{:#010x}", self.base_addr))
            .field("size", &self.data.len())
            .finish()
    }
}

impl Ram {
    /// Creates `size` bytes of zeroed memory mapped at `base_addr`.
    pub fn new(base_addr: u32, size: usize) -> Self {
        Self {
            data: vec![0; size],
            base_addr,
        }
    }

    /// Copies `data` into memory at a byte offset relative to the base.
    ///
    /// Returns false (and writes nothing) if the slice does not fit.
    pub fn load(&mut self, data: &[u8], offset: usize) -> bool {
        match self.data.get_mut(offset..offset + data.len()) {
            Some(dst) => {
                dst.copy_from_slice(data);
                true
            }
            None => false,
        }
    }

    fn bytes<const N: usize>(&self, offset: u32) -> [u8; N] {
        let mut out = [0; N];
        let start = offset as usize;
        out.copy_from_slice(&self.data[start..start + N]);
        out
    }
}

impl Device for Ram {
    fn name(&self) -> &str {
        "RAM"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.data.len() as u32)
    }

    fn read_u8(&mut self, offset: u32) -> u8 {
        self.data[offset as usize]
    }

    fn read_u16(&mut self, offset: u32) -> u16 {
        u16::from_le_bytes(self.bytes(offset))
    }

    fn read_u32(&mut self, offset: u32) -> u32 {
        u32::from_le_bytes(self.bytes(offset))
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        self.data[offset as usize] = val;
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        let start = offset as usize;
        self.data[start..start + 2].copy_from_slice(&val.to_le_bytes());
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        let start = offset as usize;
        self.data[start..start + 4].copy_from_slice(&val.to_le_bytes());
    }

    fn write_bytes(&mut self, offset: u32, data: &[u8]) {
        let _ = self.load(data, offset as usize);
    }
}
