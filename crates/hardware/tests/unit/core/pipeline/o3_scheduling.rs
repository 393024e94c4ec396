//! Tomasulo Engine Scheduling Tests.
//!
//! Drives `O3Engine` directly with pre-decoded instructions so the rename
//! tables and reservation stations can be inspected between ticks.

use pretty_assertions::assert_eq;

use rvooo_core::Cpu;
use rvooo_core::config::{Backend, Config};
use rvooo_core::core::pipeline::backend::o3::O3Engine;
use rvooo_core::core::pipeline::backend::o3::rs::Operand;
use rvooo_core::core::pipeline::{ExecutionEngine, Frontend};
use rvooo_core::isa::decode::decode;
use rvooo_core::soc::System;

use crate::common::builder::instruction::ecall;
use crate::common::{InstructionBuilder as I, TestContext};

fn setup(config: &Config) -> (Cpu, Frontend, O3Engine) {
    (
        Cpu::new(System::new(config), config),
        Frontend::new(config, config.memory.ram_base),
        O3Engine::new(config),
    )
}

fn enqueue(fe: &mut Frontend, raw: u32) {
    assert!(fe.enqueue(decode(raw).unwrap()), "issue queue full");
}

// ══════════════════════════════════════════════════════════
// 1. RAW through a reservation station, WAW through the RAT
// ══════════════════════════════════════════════════════════

#[test]
fn raw_resolves_via_producer_station_and_waw_keeps_youngest_value() {
    let mut config = Config::default();
    config.pipeline.latencies.alu = 2;
    let (mut cpu, mut fe, mut engine) = setup(&config);
    for (reg, val) in [(2, 10), (3, 20), (5, 1), (6, 100), (7, 200)] {
        cpu.regs.write(reg, val);
    }

    enqueue(&mut fe, I::new().add(1, 2, 3).build());
    enqueue(&mut fe, I::new().add(4, 1, 5).build());
    enqueue(&mut fe, I::new().add(1, 6, 7).build());

    engine.tick(&mut cpu, &mut fe).unwrap();
    engine.tick(&mut cpu, &mut fe).unwrap();
    let consumer = engine.rs().get(1).unwrap();
    assert_eq!(consumer.op1, Operand::Pending(0));
    assert_eq!(consumer.op2, Operand::Ready(1));

    engine.tick(&mut cpu, &mut fe).unwrap();
    assert_eq!(engine.rat().get(1), Some(2));

    while cpu.stats.instructions_retired < 1 {
        engine.tick(&mut cpu, &mut fe).unwrap();
    }
    // The first writer committed, but the younger mapping for x1 survives.
    assert_eq!(cpu.regs.read(1), 30);
    assert_eq!(engine.rat().get(1), Some(2));

    for _ in 0..20 {
        engine.tick(&mut cpu, &mut fe).unwrap();
    }
    assert_eq!(cpu.stats.instructions_retired, 3);
    assert_eq!(cpu.regs.read(4), 31);
    assert_eq!(cpu.regs.read(1), 300);
    assert_eq!(engine.rat().get(1), None);
    assert!(engine.is_idle());
}

#[test]
fn operand_of_completed_producer_is_read_from_rob() {
    let mut config = Config::default();
    config.pipeline.latencies.lsu = 12;
    let (mut cpu, mut fe, mut engine) = setup(&config);
    cpu.regs.write(4, 0x8001_0000);

    // The slow load holds the ROB head so the addi completes without committing.
    enqueue(&mut fe, I::new().lw(8, 4, 0).build());
    enqueue(&mut fe, I::new().addi(1, 0, 9).build());
    for _ in 0..10 {
        if engine.rob().get(1).is_some_and(|e| e.ready) {
            break;
        }
        engine.tick(&mut cpu, &mut fe).unwrap();
    }
    assert!(engine.rob().get(1).is_some_and(|e| e.ready));
    assert_eq!(engine.rob().len(), 2);
    assert_eq!(cpu.regs.read(1), 0);

    enqueue(&mut fe, I::new().add(5, 1, 1).build());
    engine.tick(&mut cpu, &mut fe).unwrap();
    let consumer = engine.rs().get(1).unwrap();
    assert_eq!(consumer.op1, Operand::Ready(9));
    assert_eq!(consumer.op2, Operand::Ready(9));

    for _ in 0..30 {
        engine.tick(&mut cpu, &mut fe).unwrap();
    }
    assert_eq!(cpu.regs.read(5), 18);
    assert!(engine.is_idle());
}

// ══════════════════════════════════════════════════════════
// 2. Structural hazards
// ══════════════════════════════════════════════════════════

fn independent_adds() -> Vec<u32> {
    let mut program: Vec<u32> = (1..=6).map(|r| I::new().addi(r + 4, 0, r as i32).build()).collect();
    program.push(I::new().add(3, 5, 10).build());
    program.push(ecall());
    program
}

#[test]
fn single_reservation_station_still_runs_to_completion() {
    let mut config = Config::default();
    config.pipeline.rs_size = 1;
    let mut ctx = TestContext::with_config(config).load_program(&independent_adds());
    assert_eq!(ctx.run_to_exit(), 7);
    assert!(ctx.stats().stalls_rs_full > 0);
}

#[test]
fn small_rob_stalls_issue() {
    let mut config = Config::default();
    config.pipeline.rob_size = 2;
    config.pipeline.latencies.alu = 4;
    let mut ctx = TestContext::with_config(config).load_program(&independent_adds());
    assert_eq!(ctx.run_to_exit(), 7);
    assert!(ctx.stats().stalls_rob_full > 0);
    assert_eq!(ctx.stats().instructions_retired, 8);
}

// ══════════════════════════════════════════════════════════
// 3. Memory ordering
// ══════════════════════════════════════════════════════════

#[test]
fn load_after_store_to_same_address_sees_stored_value() {
    let program = [
        I::new().lui(4, 0x80010).build(),
        I::new().addi(5, 0, 77).build(),
        I::new().sw(4, 5, 0).build(),
        I::new().lw(6, 4, 0).build(),
        I::new().addi(3, 6, 1).build(),
        ecall(),
    ];
    let mut ctx = TestContext::with_backend(Backend::OutOfOrder).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 78);
    assert_eq!(ctx.stats().inst_load, 1);
    assert_eq!(ctx.stats().inst_store, 1);
}

#[test]
fn store_waits_for_older_load_of_same_word() {
    let program = [
        I::new().lui(4, 0x80010).build(),
        I::new().lw(5, 4, 0).build(),
        I::new().addi(6, 0, 9).build(),
        I::new().sw(4, 6, 0).build(),
        I::new().addi(3, 5, 0).build(),
        ecall(),
    ];
    let mut ctx = TestContext::with_backend(Backend::OutOfOrder)
        .poke(0x8001_0000, 5)
        .load_program(&program);
    assert_eq!(ctx.run_to_exit(), 5);
}

#[test]
fn csr_scratch_round_trip() {
    let program = [
        I::new().addi(5, 0, 42).build(),
        I::new().csrrw(0, 0x340, 5).build(),
        I::new().csrrs(3, 0x340, 0).build(),
        I::new().csrrs(6, 0xC00, 0).build(),
        ecall(),
    ];
    let mut ctx = TestContext::with_backend(Backend::OutOfOrder).load_program(&program);
    assert_eq!(ctx.run_to_exit(), 42);
    assert!(ctx.get_reg(6) > 0);
}

#[test]
fn load_fault_reported_at_commit() {
    let program = [I::new().lw(5, 0, 0).build(), ecall()];
    let mut ctx = TestContext::with_backend(Backend::OutOfOrder).load_program(&program);
    assert_eq!(ctx.run(), Err(rvooo_core::common::SimError::LoadFault(0)));
}
