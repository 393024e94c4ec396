//! Inter-stage latches of the in-order backend.
//!
//! Each latch holds at most one instruction. An empty latch is a bubble.

use std::rc::Rc;

use crate::isa::instruction::Instr;

/// Entry in the ID/EX latch.
///
/// Carries the decoded instruction and the register values read in ID, which
/// EX may still replace with forwarded results.
#[derive(Clone, Debug)]
pub struct IdExEntry {
    /// The instruction.
    pub instr: Rc<Instr>,
    /// Value of `rs1` read from the register file.
    pub rs1_val: u32,
    /// Value of `rs2` read from the register file.
    pub rs2_val: u32,
}

/// Entry in the EX/MEM latch.
#[derive(Clone, Debug)]
pub struct ExMemEntry {
    /// The instruction.
    pub instr: Rc<Instr>,
    /// ALU/branch/CSR result, or the effective address for loads and stores.
    pub result: u32,
    /// Value to store (stores only).
    pub store_data: u32,
}

/// Entry in the MEM/WB latch.
#[derive(Clone, Debug)]
pub struct MemWbEntry {
    /// The instruction.
    pub instr: Rc<Instr>,
    /// Final value destined for `rd`.
    pub result: u32,
}
