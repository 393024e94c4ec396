//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct holding the 32 RV32 integer
//! registers. It provides:
//! 1. **Storage:** A flat array indexed by architectural register id.
//! 2. **x0 semantics:** Register 0 always reads as zero and ignores writes.
//! 3. **Observability:** Debugging utilities for dumping register state.

use crate::common::constants::NUM_REGS;
use crate::isa::abi;

/// The architectural integer register file.
///
/// Read on issue (only when no in-flight producer exists) and written on commit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    #[inline(always)]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are ignored.
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers, `x0` included.
    pub fn snapshot(&self) -> [u32; NUM_REGS] {
        self.regs
    }

    /// Dumps all registers to stderr, four per line, with ABI names.
    pub fn dump(&self) {
        for row in 0..NUM_REGS / 4 {
            let line: Vec<String> = (0..4)
                .map(|col| {
                    let idx = row * 4 + col;
                    format!("{:>4}(x{:<2}) = {:#010x}", abi::name(idx), idx, self.read(idx))
                })
                .collect();
            eprintln!("{}", line.join("  "));
        }
    }
}
