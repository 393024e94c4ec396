//! Control Flow Tests.
//!
//! Branches, calls and held fetch faults under every backend and predictor.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvooo_core::common::SimError;
use rvooo_core::config::{Backend, BranchPredictor, Config};

use crate::common::builder::instruction::{ebreak, ecall};
use crate::common::harness::PROGRAM_BASE;
use crate::common::{InstructionBuilder as I, TestContext};

fn context(backend: Backend, predictor: BranchPredictor) -> TestContext {
    let mut config = Config::default();
    config.pipeline.backend = backend;
    config.pipeline.branch_predictor = predictor;
    TestContext::with_config(config)
}

/// Sums 10 down to 1 into `gp`.
fn sum_loop() -> Vec<u32> {
    vec![
        I::new().addi(5, 0, 10).build(),
        I::new().addi(3, 0, 0).build(),
        I::new().add(3, 3, 5).build(),
        I::new().addi(5, 5, -1).build(),
        I::new().bne(5, 0, -8).build(),
        ecall(),
    ]
}

#[rstest]
fn loop_sum_exits_with_55(
    #[values(Backend::InOrder, Backend::OutOfOrder)] backend: Backend,
    #[values(
        BranchPredictor::Static,
        BranchPredictor::GShare,
        BranchPredictor::GSharePlus
    )]
    predictor: BranchPredictor,
) {
    let mut ctx = context(backend, predictor).load_program(&sum_loop());
    assert_eq!(ctx.run_to_exit(), 55);

    let stats = ctx.stats();
    assert_eq!(stats.inst_branch, 10);
    assert_eq!(stats.branches_resolved(), 10);
    assert_eq!(stats.instructions_retired, 2 + 3 * 10 + 1);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn static_predictor_mispredicts_every_taken_branch(#[case] backend: Backend) {
    let mut ctx = context(backend, BranchPredictor::Static).load_program(&sum_loop());
    assert_eq!(ctx.run_to_exit(), 55);
    assert_eq!(ctx.stats().branch_mispredictions, 9);
    assert_eq!(ctx.stats().branch_predictions, 1);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn weakly_taken_gshare_misses_only_loop_entry_and_exit(#[case] backend: Backend) {
    let mut ctx = context(backend, BranchPredictor::GSharePlus).load_program(&sum_loop());
    assert_eq!(ctx.run_to_exit(), 55);
    assert_eq!(ctx.stats().branch_mispredictions, 2);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn call_and_return(#[case] backend: Backend) {
    let program = [
        I::new().addi(10, 0, 7).build(),
        I::new().jal(1, 12).build(),
        I::new().addi(3, 10, 0).build(),
        ecall(),
        I::new().add(10, 10, 10).build(),
        I::new().jalr(0, 1, 0).build(),
    ];
    let mut ctx = TestContext::with_backend(backend).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 14);
    assert_eq!(ctx.get_reg(1), PROGRAM_BASE + 8);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn illegal_word_on_wrong_path_is_discarded(#[case] backend: Backend) {
    let program = [
        I::new().addi(3, 0, 5).build(),
        I::new().jal(0, 8).build(),
        0x0000_0000,
        ecall(),
    ];
    let mut ctx = TestContext::with_backend(backend).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 5);
    assert_eq!(ctx.stats().branch_mispredictions, 1);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn illegal_word_on_committed_path_is_fatal(#[case] backend: Backend) {
    let program = [I::new().addi(3, 0, 1).build(), 0x0000_0000, ecall()];
    let mut ctx = TestContext::with_backend(backend).load_program(&program);
    assert_eq!(
        ctx.run(),
        Err(SimError::IllegalInstruction {
            pc: PROGRAM_BASE + 4,
            inst: 0
        })
    );
    assert_eq!(ctx.get_reg(3), 1);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn running_off_the_end_of_ram_is_a_fetch_fault(#[case] backend: Backend) {
    let mut config = Config::default();
    config.pipeline.backend = backend;
    config.memory.ram_size = 8;
    let program = [I::new().nop().build(), I::new().nop().build()];
    let mut ctx = TestContext::with_config(config).load_program(&program);
    assert_eq!(ctx.run(), Err(SimError::FetchFault(PROGRAM_BASE + 8)));
    assert_eq!(ctx.stats().instructions_retired, 2);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn infinite_loop_hits_cycle_limit(#[case] backend: Backend) {
    let mut config = Config::default();
    config.pipeline.backend = backend;
    config.general.max_cycles = 500;
    let mut ctx = TestContext::with_config(config).load_program(&[I::new().jal(0, 0).build()]);
    assert_eq!(ctx.run(), Err(SimError::CycleLimit(500)));
    assert_eq!(ctx.stats().cycles, 500);
}

#[rstest]
#[case(Backend::InOrder)]
#[case(Backend::OutOfOrder)]
fn ebreak_also_exits(#[case] backend: Backend) {
    let program = [I::new().addi(3, 0, 3).build(), ebreak()];
    let mut ctx = TestContext::with_backend(backend).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 3);
}

#[test]
fn nothing_past_exit_is_retired() {
    let program = [
        I::new().addi(3, 0, 1).build(),
        ecall(),
        I::new().addi(3, 0, 2).build(),
    ];
    let mut ctx = TestContext::with_backend(Backend::OutOfOrder).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 1);
    assert_eq!(ctx.stats().instructions_retired, 2);
    ctx.step(10);
    assert_eq!(ctx.get_reg(3), 1);
}

#[test]
fn riscv_test_mode_inverts_gp() {
    let mut config = Config::default();
    config.general.riscv_test = true;
    let program = [I::new().addi(3, 0, 1).build(), ecall()];
    let mut ctx = TestContext::with_config(config).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 0);
}
