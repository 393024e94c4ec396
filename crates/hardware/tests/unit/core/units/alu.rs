use proptest::prelude::*;
use rstest::rstest;

use rvooo_core::core::pipeline::signals::AluOp;
use rvooo_core::core::units::alu::Alu;
use rvooo_core::isa::decode::decode;

use crate::common::InstructionBuilder as I;

const NEG_ONE: u32 = u32::MAX;
const INT_MIN: u32 = 0x8000_0000;

#[rstest]
#[case::add_wraps(AluOp::Add, u32::MAX, 2, 1)]
#[case::sub_wraps(AluOp::Sub, 0, 1, NEG_ONE)]
#[case::sra_keeps_sign(AluOp::Sra, INT_MIN, 4, 0xF800_0000)]
#[case::srl_zero_fills(AluOp::Srl, INT_MIN, 4, 0x0800_0000)]
#[case::shift_amount_masked(AluOp::Sll, 1, 33, 2)]
#[case::slt_signed(AluOp::Slt, NEG_ONE, 0, 1)]
#[case::sltu_unsigned(AluOp::Sltu, NEG_ONE, 0, 0)]
#[case::mulh_signed(AluOp::Mulh, NEG_ONE, NEG_ONE, 0)]
#[case::mulhu_unsigned(AluOp::Mulhu, NEG_ONE, NEG_ONE, 0xFFFF_FFFE)]
#[case::mulhsu_mixed(AluOp::Mulhsu, NEG_ONE, NEG_ONE, NEG_ONE)]
#[case::div_by_zero(AluOp::Div, 7, 0, NEG_ONE)]
#[case::divu_by_zero(AluOp::Divu, 7, 0, u32::MAX)]
#[case::rem_by_zero(AluOp::Rem, 7, 0, 7)]
#[case::remu_by_zero(AluOp::Remu, 7, 0, 7)]
#[case::div_overflow(AluOp::Div, INT_MIN, NEG_ONE, INT_MIN)]
#[case::rem_overflow(AluOp::Rem, INT_MIN, NEG_ONE, 0)]
#[case::div_truncates_toward_zero(AluOp::Div, (-7i32) as u32, 2, (-3i32) as u32)]
#[case::rem_takes_dividend_sign(AluOp::Rem, (-7i32) as u32, 2, NEG_ONE)]
fn alu_results(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::execute(op, a, b), expected);
}

#[test]
fn compute_selects_pc_for_auipc() {
    let mut instr = decode(I::new().auipc(5, 0x1).build()).unwrap();
    instr.pc = 0x8000_0010;
    assert_eq!(Alu::compute(&instr, 0xDEAD, 0xBEEF), 0x8000_1010);
}

#[test]
fn compute_ignores_rs1_for_lui() {
    let instr = decode(I::new().lui(5, 0x12345).build()).unwrap();
    assert_eq!(Alu::compute(&instr, 0xFFFF_FFFF, 0), 0x1234_5000);
}

#[test]
fn compute_uses_sign_extended_immediate() {
    let instr = decode(I::new().addi(5, 6, -1).build()).unwrap();
    assert_eq!(Alu::compute(&instr, 10, 0), 9);
}

proptest! {
    #[test]
    fn sub_undoes_add(a in any::<u32>(), b in any::<u32>()) {
        let sum = Alu::execute(AluOp::Add, a, b);
        prop_assert_eq!(Alu::execute(AluOp::Sub, sum, b), a);
    }

    #[test]
    fn signed_division_identity(a in any::<u32>(), b in any::<u32>()) {
        let q = Alu::execute(AluOp::Div, a, b);
        let r = Alu::execute(AluOp::Rem, a, b);
        prop_assert_eq!(Alu::execute(AluOp::Add, Alu::execute(AluOp::Mul, q, b), r), a);
    }

    #[test]
    fn unsigned_division_identity(a in any::<u32>(), b in 1u32..) {
        let q = Alu::execute(AluOp::Divu, a, b);
        let r = Alu::execute(AluOp::Remu, a, b);
        prop_assert!(r < b);
        prop_assert_eq!(q.wrapping_mul(b).wrapping_add(r), a);
    }
}
