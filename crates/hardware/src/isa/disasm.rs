//! Instruction Disassembler.
//!
//! Renders a decoded [`Instr`] as assembly text with ABI register names
//! (`add a0, a1, a2`, `lw t0, -4(sp)`) for trace output and test diagnostics.
//! Works from the decoded control signals, so every record the decoder accepts
//! has a mnemonic.

use std::fmt;

use crate::core::pipeline::signals::{AluOp, BrOp, CsrOp, MemWidth};
use crate::isa::abi::name as xreg;
use crate::isa::instruction::{Instr, Opcode};
use crate::isa::privileged::opcodes::EBREAK;

fn alu_mnemonic(op: AluOp) -> &'static str {
    match op {
        AluOp::Add => "add",
        AluOp::Sub => "sub",
        AluOp::Sll => "sll",
        AluOp::Slt => "slt",
        AluOp::Sltu => "sltu",
        AluOp::Xor => "xor",
        AluOp::Srl => "srl",
        AluOp::Sra => "sra",
        AluOp::Or => "or",
        AluOp::And => "and",
        AluOp::Mul => "mul",
        AluOp::Mulh => "mulh",
        AluOp::Mulhsu => "mulhsu",
        AluOp::Mulhu => "mulhu",
        AluOp::Div => "div",
        AluOp::Divu => "divu",
        AluOp::Rem => "rem",
        AluOp::Remu => "remu",
    }
}

fn branch_mnemonic(op: BrOp) -> &'static str {
    match op {
        BrOp::Beq => "beq",
        BrOp::Bne => "bne",
        BrOp::Blt => "blt",
        BrOp::Bge => "bge",
        BrOp::Bltu => "bltu",
        BrOp::Bgeu => "bgeu",
        BrOp::Jal => "jal",
        BrOp::Jalr => "jalr",
        BrOp::None => "b??",
    }
}

fn mem_suffix(width: MemWidth, signed: bool) -> &'static str {
    match (width, signed) {
        (MemWidth::Byte, true) => "b",
        (MemWidth::Byte, false) => "bu",
        (MemWidth::Half, true) => "h",
        (MemWidth::Half, false) => "hu",
        (MemWidth::Word, _) => "w",
        (MemWidth::Nop, _) => "?",
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imm = self.imm as i32;
        match self.opcode {
            Opcode::Lui => write!(f, "lui {}, {:#x}", xreg(self.rd), self.imm >> 12),
            Opcode::Auipc => write!(f, "auipc {}, {:#x}", xreg(self.rd), self.imm >> 12),
            Opcode::Jal => write!(f, "jal {}, {imm}", xreg(self.rd)),
            Opcode::Jalr => write!(f, "jalr {}, {imm}({})", xreg(self.rd), xreg(self.rs1)),
            Opcode::Branch => write!(
                f,
                "{} {}, {}, {imm}",
                branch_mnemonic(self.ctrl.br),
                xreg(self.rs1),
                xreg(self.rs2)
            ),
            Opcode::Load => write!(
                f,
                "l{} {}, {imm}({})",
                mem_suffix(self.ctrl.width, self.ctrl.signed_load),
                xreg(self.rd),
                xreg(self.rs1)
            ),
            Opcode::Store => write!(
                f,
                "s{} {}, {imm}({})",
                mem_suffix(self.ctrl.width, true),
                xreg(self.rs2),
                xreg(self.rs1)
            ),
            Opcode::OpImm => {
                if self.raw == crate::common::constants::NOP {
                    return write!(f, "nop");
                }
                write!(
                    f,
                    "{}i {}, {}, {imm}",
                    alu_mnemonic(self.ctrl.alu),
                    xreg(self.rd),
                    xreg(self.rs1)
                )
            }
            Opcode::Op => write!(
                f,
                "{} {}, {}, {}",
                alu_mnemonic(self.ctrl.alu),
                xreg(self.rd),
                xreg(self.rs1),
                xreg(self.rs2)
            ),
            Opcode::Fence => write!(f, "fence"),
            Opcode::System => {
                if self.ctrl.is_exit {
                    return write!(f, "{}", if self.raw == EBREAK { "ebreak" } else { "ecall" });
                }
                let op = match self.ctrl.csr_op {
                    CsrOp::Rw => "csrrw",
                    CsrOp::Rs => "csrrs",
                    CsrOp::Rc => "csrrc",
                    CsrOp::None => "csr??",
                };
                if self.ctrl.use_rs1 {
                    write!(f, "{op} {}, {:#x}, {}", xreg(self.rd), self.csr, xreg(self.rs1))
                } else {
                    write!(f, "{op}i {}, {:#x}, {}", xreg(self.rd), self.csr, self.imm)
                }
            }
        }
    }
}
