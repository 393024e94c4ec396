//! Instruction encoding and the decoded instruction record.
//!
//! Provides bit extraction functions for 32-bit RISC-V encodings and the
//! `Instr` record the decoder produces. An `Instr` is immutable once it leaves
//! the front end and is shared between its reservation-station and reorder-buffer
//! entries through an `Rc`.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::core::pipeline::signals::{ControlSignals, FuType};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting the destination register field (bits 7-11).
pub const RD_MASK: u32 = 0x1F;
/// Bit mask for extracting the first source register field (bits 15-19).
pub const RS1_MASK: u32 = 0x1F;
/// Bit mask for extracting the second source register field (bits 20-24).
pub const RS2_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Bit mask for extracting the CSR address field (bits 20-31).
pub const CSR_MASK: u32 = 0xFFF;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Provides methods to extract all standard RISC-V instruction fields
/// from a 32-bit instruction encoding.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    ///
    /// The opcode determines the instruction format and operation category.
    /// Returns the 7-bit opcode value.
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    ///
    /// Returns the 5-bit register index (0-31) for the destination register.
    /// Register 0 (x0) is hardwired to zero and writes are ignored.
    fn rd(&self) -> usize;

    /// Extracts the first source register field (bits 15-19).
    ///
    /// Returns the 5-bit register index (0-31) for the first source operand.
    fn rs1(&self) -> usize;

    /// Extracts the second source register field (bits 20-24).
    ///
    /// Returns the 5-bit register index (0-31) for the second source operand.
    fn rs2(&self) -> usize;

    /// Extracts the funct3 field (bits 12-14).
    ///
    /// Used to distinguish between different operations within the same opcode.
    /// Returns the 3-bit funct3 value.
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    ///
    /// Distinguishes standard and alternate encodings (ADD vs SUB) and selects
    /// the M extension.
    fn funct7(&self) -> u32;

    /// Extracts the CSR address field (bits 20-31).
    ///
    /// Returns the 12-bit CSR address used for CSR read/write operations.
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & RD_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & RS1_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & RS2_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & CSR_MASK
    }
}

/// Major opcode class of a decoded instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Opcode {
    /// Load upper immediate.
    Lui,
    /// Add upper immediate to PC.
    Auipc,
    /// Jump and link.
    Jal,
    /// Jump and link register.
    Jalr,
    /// Conditional branch.
    Branch,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Register-immediate arithmetic.
    #[default]
    OpImm,
    /// Register-register arithmetic (including multiply/divide).
    Op,
    /// Memory fence.
    Fence,
    /// CSR access and environment calls.
    System,
}

/// A decoded instruction.
///
/// Produced by [`crate::isa::decode::decode`]. The front end fills in `pc` and
/// `pred_next` before handing the record to an execution engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instr {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Next PC the front end predicted when fetching this instruction.
    pub pred_next: u32,
    /// Major opcode class.
    pub opcode: Opcode,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate (the zero-extended `zimm` for CSR immediate forms).
    pub imm: u32,
    /// CSR address for CSR instructions.
    pub csr: u32,
    /// Decoded control signals.
    pub ctrl: ControlSignals,
    /// Functional-unit class that executes this instruction.
    pub fu: FuType,
}

impl Instr {
    /// Address of the sequentially next instruction.
    #[inline]
    pub fn fallthrough(&self) -> u32 {
        self.pc.wrapping_add(INSTRUCTION_BYTES)
    }

    /// Returns true if this instruction reads architectural register `reg` (other than `x0`).
    pub fn reads(&self, reg: usize) -> bool {
        reg != 0
            && ((self.ctrl.use_rs1 && self.rs1 == reg) || (self.ctrl.use_rs2 && self.rs2 == reg))
    }

    /// Destination register, if the instruction writes one.
    #[inline]
    pub fn dest(&self) -> Option<usize> {
        self.ctrl.use_rd.then_some(self.rd)
    }
}
