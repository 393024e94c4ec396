//! RISC-V Instruction Decoder.
//!
//! Turns a 32-bit RV32IM/Zicsr encoding into an [`Instr`] record. Decoding
//! performs three jobs:
//! 1. **Field extraction:** opcode, register indices and function codes.
//! 2. **Immediates:** reassembly and sign extension for the I, S, B, U and J formats.
//! 3. **Control signals:** the operand-usage flags, operation selectors and
//!    functional-unit class that drive execution.
//!
//! Encodings the core does not implement are rejected with
//! [`DecodeError::IllegalInstruction`] rather than being given a flag set.

use crate::common::error::DecodeError;
use crate::core::pipeline::signals::{AluOp, BrOp, ControlSignals, CsrOp, FuType, MemWidth};
use crate::isa::instruction::{InstructionBits, Instr, Opcode};
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{funct3 as m_f3, opcodes as m_op};

/// Total width of a RISC-V instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Bit shift for the I-Type immediate (bits 20-31).
const I_IMM_SHIFT: u32 = 20;

/// Bit mask selecting the U-Type immediate (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Shift amount field of the shift-immediate instructions (5 bits on RV32).
const SHAMT_MASK: u32 = 0x1F;

/// Decodes a 32-bit instruction word.
///
/// The returned record has `pc` and `pred_next` set to zero; the front end
/// fills them in.
///
/// # Errors
///
/// Returns [`DecodeError::IllegalInstruction`] for unknown opcodes and for
/// unsupported `funct3`/`funct7` combinations.
pub fn decode(inst: u32) -> Result<Instr, DecodeError> {
    let illegal = DecodeError::IllegalInstruction(inst);
    let rd = inst.rd();
    let rs1 = inst.rs1();
    let rs2 = inst.rs2();
    let funct3 = inst.funct3();
    let funct7 = inst.funct7();

    let mut ctrl = ControlSignals::default();
    let mut imm = 0;
    let mut csr = 0;

    let (opcode, fu) = match inst.opcode() {
        i_op::OP_LUI => {
            imm = inst & U_IMM_MASK;
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            (Opcode::Lui, FuType::Alu)
        }
        i_op::OP_AUIPC => {
            imm = inst & U_IMM_MASK;
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            ctrl.use_pc = true;
            (Opcode::Auipc, FuType::Alu)
        }
        i_op::OP_JAL => {
            imm = j_type_imm(inst);
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            ctrl.use_pc = true;
            ctrl.is_branch = true;
            ctrl.br = BrOp::Jal;
            (Opcode::Jal, FuType::Branch)
        }
        i_op::OP_JALR => {
            if funct3 != 0 {
                return Err(illegal);
            }
            imm = i_type_imm(inst);
            ctrl.use_rs1 = true;
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            ctrl.is_branch = true;
            ctrl.br = BrOp::Jalr;
            (Opcode::Jalr, FuType::Branch)
        }
        i_op::OP_BRANCH => {
            imm = b_type_imm(inst);
            ctrl.use_rs1 = true;
            ctrl.use_rs2 = true;
            ctrl.is_branch = true;
            ctrl.br = match funct3 {
                i_f3::BEQ => BrOp::Beq,
                i_f3::BNE => BrOp::Bne,
                i_f3::BLT => BrOp::Blt,
                i_f3::BGE => BrOp::Bge,
                i_f3::BLTU => BrOp::Bltu,
                i_f3::BGEU => BrOp::Bgeu,
                _ => return Err(illegal),
            };
            (Opcode::Branch, FuType::Branch)
        }
        i_op::OP_LOAD => {
            imm = i_type_imm(inst);
            ctrl.use_rs1 = true;
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            ctrl.is_load = true;
            (ctrl.width, ctrl.signed_load) = match funct3 {
                i_f3::LB => (MemWidth::Byte, true),
                i_f3::LH => (MemWidth::Half, true),
                i_f3::LW => (MemWidth::Word, true),
                i_f3::LBU => (MemWidth::Byte, false),
                i_f3::LHU => (MemWidth::Half, false),
                _ => return Err(illegal),
            };
            (Opcode::Load, FuType::Lsu)
        }
        i_op::OP_STORE => {
            imm = s_type_imm(inst);
            ctrl.use_rs1 = true;
            ctrl.use_rs2 = true;
            ctrl.use_imm = true;
            ctrl.is_store = true;
            ctrl.width = match funct3 {
                i_f3::SB => MemWidth::Byte,
                i_f3::SH => MemWidth::Half,
                i_f3::SW => MemWidth::Word,
                _ => return Err(illegal),
            };
            (Opcode::Store, FuType::Lsu)
        }
        i_op::OP_IMM => {
            imm = i_type_imm(inst);
            ctrl.use_rs1 = true;
            ctrl.use_rd = true;
            ctrl.use_imm = true;
            ctrl.alu = match funct3 {
                i_f3::ADD_SUB => AluOp::Add,
                i_f3::SLT => AluOp::Slt,
                i_f3::SLTU => AluOp::Sltu,
                i_f3::XOR => AluOp::Xor,
                i_f3::OR => AluOp::Or,
                i_f3::AND => AluOp::And,
                i_f3::SLL if funct7 == i_f7::DEFAULT => AluOp::Sll,
                i_f3::SRL_SRA if funct7 == i_f7::DEFAULT => AluOp::Srl,
                i_f3::SRL_SRA if funct7 == i_f7::SRA => AluOp::Sra,
                _ => return Err(illegal),
            };
            if matches!(ctrl.alu, AluOp::Sll | AluOp::Srl | AluOp::Sra) {
                imm &= SHAMT_MASK;
            }
            (Opcode::OpImm, FuType::Alu)
        }
        i_op::OP_REG => {
            ctrl.use_rs1 = true;
            ctrl.use_rs2 = true;
            ctrl.use_rd = true;
            ctrl.alu = match (funct7, funct3) {
                (i_f7::DEFAULT, i_f3::ADD_SUB) => AluOp::Add,
                (i_f7::SUB, i_f3::ADD_SUB) => AluOp::Sub,
                (i_f7::DEFAULT, i_f3::SLL) => AluOp::Sll,
                (i_f7::DEFAULT, i_f3::SLT) => AluOp::Slt,
                (i_f7::DEFAULT, i_f3::SLTU) => AluOp::Sltu,
                (i_f7::DEFAULT, i_f3::XOR) => AluOp::Xor,
                (i_f7::DEFAULT, i_f3::SRL_SRA) => AluOp::Srl,
                (i_f7::SRA, i_f3::SRL_SRA) => AluOp::Sra,
                (i_f7::DEFAULT, i_f3::OR) => AluOp::Or,
                (i_f7::DEFAULT, i_f3::AND) => AluOp::And,
                (m_op::M_EXTENSION, m_f3::MUL) => AluOp::Mul,
                (m_op::M_EXTENSION, m_f3::MULH) => AluOp::Mulh,
                (m_op::M_EXTENSION, m_f3::MULHSU) => AluOp::Mulhsu,
                (m_op::M_EXTENSION, m_f3::MULHU) => AluOp::Mulhu,
                (m_op::M_EXTENSION, m_f3::DIV) => AluOp::Div,
                (m_op::M_EXTENSION, m_f3::DIVU) => AluOp::Divu,
                (m_op::M_EXTENSION, m_f3::REM) => AluOp::Rem,
                (m_op::M_EXTENSION, m_f3::REMU) => AluOp::Remu,
                _ => return Err(illegal),
            };
            (Opcode::Op, FuType::Alu)
        }
        i_op::OP_MISC_MEM => {
            if funct3 != i_f3::FENCE && funct3 != i_f3::FENCE_I {
                return Err(illegal);
            }
            (Opcode::Fence, FuType::Sfu)
        }
        sys_op::OP_SYSTEM => {
            match funct3 {
                sys_op::PRIV => {
                    if inst != sys_op::ECALL && inst != sys_op::EBREAK {
                        return Err(illegal);
                    }
                    ctrl.is_exit = true;
                }
                sys_op::CSRRW | sys_op::CSRRS | sys_op::CSRRC => {
                    ctrl.use_rs1 = true;
                }
                sys_op::CSRRWI | sys_op::CSRRSI | sys_op::CSRRCI => {
                    ctrl.use_imm = true;
                    imm = rs1 as u32;
                }
                _ => return Err(illegal),
            }
            if !ctrl.is_exit {
                csr = inst.csr();
                ctrl.is_csr = true;
                ctrl.use_rd = true;
                ctrl.csr_op = match funct3 {
                    sys_op::CSRRW | sys_op::CSRRWI => CsrOp::Rw,
                    sys_op::CSRRS | sys_op::CSRRSI => CsrOp::Rs,
                    _ => CsrOp::Rc,
                };
            }
            (Opcode::System, FuType::Sfu)
        }
        _ => return Err(illegal),
    };

    ctrl.use_rd &= rd != 0;

    Ok(Instr {
        raw: inst,
        pc: 0,
        pred_next: 0,
        opcode,
        rd,
        rs1,
        rs2,
        imm,
        csr,
        ctrl,
        fu,
    })
}

/// I-Type: `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn i_type_imm(inst: u32) -> u32 {
    ((inst as i32) >> I_IMM_SHIFT) as u32
}

/// S-Type: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn s_type_imm(inst: u32) -> u32 {
    let low = (inst >> 7) & 0x1F;
    let high = (inst >> 25) & 0x7F;
    sign_extend((high << 5) | low, 12)
}

/// B-Type: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
fn b_type_imm(inst: u32) -> u32 {
    let bit_11 = (inst >> 7) & 0x1;
    let bits_4_1 = (inst >> 8) & 0xF;
    let bits_10_5 = (inst >> 25) & 0x3F;
    let bit_12 = (inst >> 31) & 0x1;
    sign_extend(
        (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1),
        13,
    )
}

/// J-Type: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
fn j_type_imm(inst: u32) -> u32 {
    let bits_19_12 = (inst >> 12) & 0xFF;
    let bit_11 = (inst >> 20) & 0x1;
    let bits_10_1 = (inst >> 21) & 0x3FF;
    let bit_20 = (inst >> 31) & 0x1;
    sign_extend(
        (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1),
        21,
    )
}

/// Sign extends the low `bits` bits of `val` to a full 32-bit word.
fn sign_extend(val: u32, bits: u32) -> u32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (((val << shift) as i32) >> shift) as u32
}
