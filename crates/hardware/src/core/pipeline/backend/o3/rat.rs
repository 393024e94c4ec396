//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or `None` if the architectural register file holds the current
//! value. Issue overwrites the mapping (last writer wins); commit clears it
//! only if it still names the committing slot.

use crate::common::constants::NUM_REGS;

/// Register alias table indexed by architectural register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rat {
    /// Producer slot per register (x0 always `None`).
    map: [Option<usize>; NUM_REGS],
}

impl Rat {
    /// Creates a table with no pending writers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rob_slot` as the latest producer of `reg`. No-op for x0.
    pub fn set(&mut self, reg: usize, rob_slot: usize) {
        if reg != 0 {
            self.map[reg] = Some(rob_slot);
        }
    }

    /// Latest in-flight producer of `reg`, if any.
    #[inline]
    pub fn get(&self, reg: usize) -> Option<usize> {
        self.map[reg]
    }

    /// Clears `reg`'s mapping only if it still points at `rob_slot`.
    ///
    /// A younger instruction may already have renamed the register; its
    /// mapping must survive the older instruction's commit.
    pub fn clear_if_match(&mut self, reg: usize, rob_slot: usize) {
        if self.map[reg] == Some(rob_slot) {
            self.map[reg] = None;
        }
    }

    /// True when no register has an in-flight producer.
    pub fn is_clear(&self) -> bool {
        self.map.iter().all(Option::is_none)
    }
}
