//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer datapath shared by both backends: the
//! out-of-order ALU functional unit and the in-order EX stage. It handles
//! arithmetic, logical operations and shifts on 32-bit operands, plus the
//! Multiply/Divide (M) extension.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::AluOp;
use crate::isa::instruction::Instr;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvooo_core::core::units::alu::Alu;
    /// use rvooo_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, u32::MAX, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::Divu, 100, 7), 14);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => arithmetic::execute(op, a, b),

            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }

            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }

    /// Selects the operands of `instr` and runs its ALU operation.
    ///
    /// Operand A is the PC for AUIPC, zero for LUI and `rs1` otherwise; operand
    /// B is the immediate when the instruction uses one, `rs2` otherwise.
    pub fn compute(instr: &Instr, rs1: u32, rs2: u32) -> u32 {
        let a = if instr.ctrl.use_pc {
            instr.pc
        } else if instr.ctrl.use_rs1 {
            rs1
        } else {
            0
        };
        let b = if instr.ctrl.use_imm { instr.imm } else { rs2 };
        Self::execute(instr.ctrl.alu, a, b)
    }
}
