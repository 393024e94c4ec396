//! ALU shift operations.
//!
//! Shift amounts are masked to 5 bits (0–31); only the low bits of the
//! second operand are consulted.

use crate::core::pipeline::signals::AluOp;

/// Bit mask for shift amount on RV32 (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift operation.
///
/// Returns `0` for non-shift opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sh = b & SHAMT_MASK;
    match op {
        AluOp::Sll => a << sh,
        AluOp::Srl => a >> sh,
        AluOp::Sra => ((a as i32) >> sh) as u32,
        _ => 0,
    }
}
