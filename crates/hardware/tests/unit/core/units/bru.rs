use pretty_assertions::assert_eq;
use rstest::rstest;

use rvooo_core::config::{BranchPredictor as BpType, Config};
use rvooo_core::core::units::bru::{BranchPredictor, Bru};
use rvooo_core::isa::decode::decode;

use crate::common::InstructionBuilder as I;

const PC: u32 = 0x8000_0100;

fn at_pc(raw: u32, pred_next: u32) -> rvooo_core::isa::instruction::Instr {
    let mut instr = decode(raw).unwrap();
    instr.pc = PC;
    instr.pred_next = pred_next;
    instr
}

#[rstest]
#[case::beq_taken(I::new().beq(1, 2, 16).build(), 5, 5, true)]
#[case::beq_not_taken(I::new().beq(1, 2, 16).build(), 5, 6, false)]
#[case::bne_taken(I::new().bne(1, 2, 16).build(), 5, 6, true)]
#[case::blt_signed(I::new().blt(1, 2, 16).build(), (-1i32) as u32, 0, true)]
#[case::bgeu_unsigned(I::new().bgeu(1, 2, 16).build(), (-1i32) as u32, 0, true)]
fn conditional_outcomes(#[case] raw: u32, #[case] rs1: u32, #[case] rs2: u32, #[case] taken: bool) {
    let (link, outcome) = Bru::resolve(&at_pc(raw, PC + 4), rs1, rs2);
    assert_eq!(link, PC + 4);
    assert_eq!(outcome.taken, taken);
    assert_eq!(outcome.next_pc, if taken { PC + 16 } else { PC + 4 });
    assert_eq!(outcome.mispredicted(), taken);
}

#[test]
fn jal_links_and_jumps_backwards() {
    let (link, outcome) = Bru::resolve(&at_pc(I::new().jal(1, -256).build(), PC - 256), 0, 0);
    assert_eq!(link, PC + 4);
    assert_eq!(outcome.next_pc, PC - 256);
    assert!(!outcome.mispredicted());
}

#[test]
fn jalr_clears_low_bit_of_target() {
    let (_, outcome) = Bru::resolve(&at_pc(I::new().jalr(0, 5, 3).build(), PC + 4), 0x8000_0200, 0);
    assert_eq!(outcome.next_pc, 0x8000_0202);
    assert!(outcome.mispredicted());
}

fn predictor(kind: BpType) -> BranchPredictor {
    let mut config = Config::default();
    config.pipeline.branch_predictor = kind;
    BranchPredictor::new(&config)
}

#[test]
fn static_always_falls_through() {
    let mut bp = predictor(BpType::Static);
    for _ in 0..4 {
        bp.update(PC, PC - 8, true);
    }
    assert_eq!(bp.predict(PC), PC + 4);
}

#[rstest]
#[case(BpType::GShare)]
#[case(BpType::GSharePlus)]
fn gshare_needs_btb_target_before_predicting_taken(#[case] kind: BpType) {
    let bp = predictor(kind);
    assert_eq!(bp.predict(PC), PC + 4);
}

#[test]
fn gshare_plus_predicts_taken_after_one_taken_outcome() {
    let mut bp = predictor(BpType::GSharePlus);
    bp.update(PC, PC - 8, true);
    // History moved on, but the fresh counter also starts weakly taken.
    assert_eq!(bp.predict(PC), PC - 8);
}

#[test]
fn gshare_stays_not_taken_after_one_taken_outcome() {
    let mut bp = predictor(BpType::GShare);
    bp.update(PC, PC - 8, true);
    assert_eq!(bp.predict(PC), PC + 4);
}
