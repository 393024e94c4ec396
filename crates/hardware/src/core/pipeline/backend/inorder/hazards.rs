//! Data hazard detection and forwarding.
//!
//! 1. **Hazard Detection:** A load in EX/MEM cannot forward its data in time for
//!    the instruction directly behind it, which must wait one cycle in ID.
//! 2. **Operand Forwarding:** EX takes source values from EX/MEM, then MEM/WB,
//!    before falling back to the values read in ID.

use super::latches::{ExMemEntry, MemWbEntry};
use crate::isa::instruction::Instr;

/// Checks if `next` must stall in ID because of a load-use hazard.
///
/// # Arguments
///
/// * `ex_mem` - The EX/MEM latch after this cycle's EX stage ran.
/// * `next` - The instruction waiting to enter ID/EX.
pub fn load_use_hazard(ex_mem: Option<&ExMemEntry>, next: &Instr) -> bool {
    ex_mem.is_some_and(|em| {
        em.instr.ctrl.is_load && em.instr.dest().is_some_and(|rd| next.reads(rd))
    })
}

/// Returns the freshest value of `reg`.
///
/// `ex_mem` and `mem_wb` are the latches as they stood at the start of the
/// cycle. A load in EX/MEM holds an address, not data, so it never forwards;
/// [`load_use_hazard`] guarantees no consumer needs it.
pub fn forward(
    reg: usize,
    read_val: u32,
    ex_mem: Option<&ExMemEntry>,
    mem_wb: Option<&MemWbEntry>,
) -> u32 {
    if reg == 0 {
        return 0;
    }
    if let Some(em) = ex_mem.filter(|em| em.instr.dest() == Some(reg)) {
        if !em.instr.ctrl.is_load {
            return em.result;
        }
    }
    mem_wb
        .filter(|mw| mw.instr.dest() == Some(reg))
        .map_or(read_val, |mw| mw.result)
}
