use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use rvooo_core::common::DecodeError;
use rvooo_core::core::pipeline::signals::{AluOp, BrOp, CsrOp, FuType, MemWidth};
use rvooo_core::isa::decode::decode;
use rvooo_core::isa::instruction::Opcode;

use crate::common::builder::instruction::{ebreak, ecall};
use crate::common::InstructionBuilder as I;

#[test]
fn fields_of_a_register_op() {
    let instr = decode(I::new().sub(7, 8, 9).build()).unwrap();
    assert_eq!(instr.opcode, Opcode::Op);
    assert_eq!((instr.rd, instr.rs1, instr.rs2), (7, 8, 9));
    assert_eq!(instr.ctrl.alu, AluOp::Sub);
    assert_eq!(instr.fu, FuType::Alu);
    assert!(instr.ctrl.use_rs1 && instr.ctrl.use_rs2 && instr.ctrl.use_rd);
    assert!(!instr.ctrl.use_imm);
}

#[rstest]
#[case::i_type(I::new().addi(1, 1, -2048).build(), (-2048i32) as u32)]
#[case::s_type(I::new().sw(1, 2, -4).build(), (-4i32) as u32)]
#[case::b_type(I::new().beq(1, 2, -4096).build(), (-4096i32) as u32)]
#[case::j_type(I::new().jal(1, 0x000F_FFFE).build(), 0x000F_FFFE)]
#[case::j_type_negative(I::new().jal(1, -2).build(), (-2i32) as u32)]
#[case::u_type(I::new().lui(1, 0xFFFFF).build(), 0xFFFF_F000)]
#[case::shamt(I::new().slli(1, 1, 31).build(), 31)]
fn immediates_are_sign_extended(#[case] raw: u32, #[case] imm: u32) {
    assert_eq!(decode(raw).unwrap().imm, imm);
}

#[test]
fn loads_and_stores_go_to_the_lsu() {
    let lb = decode(I::new().lb(5, 6, 0).build()).unwrap();
    assert_eq!((lb.ctrl.width, lb.ctrl.signed_load), (MemWidth::Byte, true));
    let lbu = decode(I::new().lbu(5, 6, 0).build()).unwrap();
    assert_eq!((lbu.ctrl.width, lbu.ctrl.signed_load), (MemWidth::Byte, false));
    let sb = decode(I::new().sb(6, 5, 0).build()).unwrap();
    assert!(sb.ctrl.is_store && !sb.ctrl.use_rd);
    for instr in [lb, lbu, sb] {
        assert_eq!(instr.fu, FuType::Lsu);
    }
}

#[test]
fn control_flow_goes_to_the_branch_unit() {
    let jal = decode(I::new().jal(1, 8).build()).unwrap();
    assert_eq!((jal.ctrl.br, jal.fu), (BrOp::Jal, FuType::Branch));
    let bgeu = decode(I::new().bgeu(1, 2, 8).build()).unwrap();
    assert_eq!(bgeu.ctrl.br, BrOp::Bgeu);
    assert!(bgeu.ctrl.is_branch && !bgeu.ctrl.use_rd);
}

#[test]
fn system_instructions_go_to_the_sfu() {
    let csr = decode(I::new().csrrs(5, 0xC00, 0).build()).unwrap();
    assert_eq!((csr.csr, csr.ctrl.csr_op, csr.fu), (0xC00, CsrOp::Rs, FuType::Sfu));
    assert!(csr.ctrl.is_csr);

    for raw in [ecall(), ebreak()] {
        let exit = decode(raw).unwrap();
        assert!(exit.ctrl.is_exit);
        assert_eq!(exit.fu, FuType::Sfu);
    }
    assert_eq!(decode(0x0FF0_000F).unwrap().opcode, Opcode::Fence);
}

#[test]
fn rd_zero_never_writes() {
    let instr = decode(I::new().add(0, 1, 2).build()).unwrap();
    assert_eq!(instr.dest(), None);
    assert!(instr.reads(1) && instr.reads(2) && !instr.reads(0));
}

#[rstest]
#[case::all_zero(0x0000_0000)]
#[case::all_ones(0xFFFF_FFFF)]
#[case::compressed_space(0x0000_4501)]
#[case::bad_funct7(0x4000_C0B3)]
#[case::jalr_funct3(0x0000_10E7)]
#[case::mret(0x3020_0073)]
#[case::amo(0x0000_202F)]
fn unsupported_words_are_illegal(#[case] raw: u32) {
    assert_eq!(decode(raw), Err(DecodeError::IllegalInstruction(raw)));
}

proptest! {
    #[test]
    fn decode_is_total_and_consistent(raw in any::<u32>()) {
        match decode(raw) {
            Err(DecodeError::IllegalInstruction(word)) => prop_assert_eq!(word, raw),
            Ok(instr) => {
                prop_assert_eq!(instr.raw, raw);
                prop_assert!(instr.rd < 32 && instr.rs1 < 32 && instr.rs2 < 32);
                prop_assert!(instr.dest().is_none_or(|rd| rd != 0));
                if instr.ctrl.is_load || instr.ctrl.is_store {
                    prop_assert_eq!(instr.fu, FuType::Lsu);
                }
                if instr.ctrl.is_branch {
                    prop_assert_eq!(instr.fu, FuType::Branch);
                }
                prop_assert!(!(instr.ctrl.is_load && instr.ctrl.is_store));
            }
        }
    }
}
