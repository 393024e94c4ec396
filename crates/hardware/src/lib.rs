//! Cycle-accurate RV32IM processor simulator.
//!
//! This crate models a single RISC-V hart with two interchangeable backends:
//! 1. **Core:** A shared front end with branch prediction, an in-order five-stage
//!    backend and a Tomasulo out-of-order backend (RS, ROB, RAT, CDB).
//! 2. **ISA:** Decoding and disassembly for RV32I, the M extension and Zicsr.
//! 3. **SoC:** Bus, RAM and a console output device.
//! 4. **Simulation:** Program loading, the cycle driver, configuration and statistics.

/// Common types and constants (errors, register file).
pub mod common;
/// Simulator configuration (defaults, enums, JSON-backed structures).
pub mod config;
/// CPU core (state, pipelines, execution units).
pub mod core;
/// Instruction set (decode, instruction record, ABI names, disassembly).
pub mod isa;
/// Program loader and cycle driver.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural CPU state shared by both pipelines.
pub use crate::core::Cpu;
/// Cycle driver owning the CPU and its pipeline.
pub use crate::sim::Simulator;
/// Top-level system (bus and devices); construct with `System::new`.
pub use crate::soc::System;
