//! Simulator error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Simulation faults:** Conditions that stop the simulated program (illegal
//!    instructions, access faults, cycle limits).
//! 2. **Decode errors:** Encodings the decoder refuses to turn into an instruction record.
//! 3. **Bus faults:** Accesses to physical addresses no device claims.
//!
//! Structural hazards (full ROB, full RS, busy functional unit) are not errors; they
//! are stalls handled inside the pipeline and never reach these types.

use thiserror::Error;

/// Errors raised while decoding a 32-bit instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The encoding does not name an instruction this core implements.
    ///
    /// The associated value is the raw instruction word.
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),
}

/// An access to an address that no device on the bus claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no device mapped at {0:#010x}")]
pub struct BusFault(pub u32);

/// Fatal conditions that terminate a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// An instruction on the committed path could not be decoded.
    #[error("illegal instruction {inst:#010x} at pc {pc:#010x}")]
    IllegalInstruction {
        /// Address of the offending instruction.
        pc: u32,
        /// Raw instruction word.
        inst: u32,
    },

    /// Instruction fetch from an unmapped address.
    #[error("instruction access fault at {0:#010x}")]
    FetchFault(u32),

    /// Load from an unmapped address.
    #[error("load access fault at {0:#010x}")]
    LoadFault(u32),

    /// Store to an unmapped address.
    #[error("store access fault at {0:#010x}")]
    StoreFault(u32),

    /// The program did not exit within the configured number of cycles.
    #[error("cycle limit of {0} reached before program exit")]
    CycleLimit(u64),

    /// A pipeline invariant was violated. Indicates a simulator bug.
    #[error("internal pipeline invariant violated: {0}")]
    Internal(&'static str),
}
