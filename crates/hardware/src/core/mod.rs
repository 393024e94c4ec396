//! Core processor implementation.
//!
//! This module contains the CPU state, the instruction pipelines and the
//! execution units they share.

/// CPU state, execution and retirement.
pub mod cpu;

/// Instruction pipeline implementation (front end, backends, signals).
pub mod pipeline;

/// Execution units (ALU, branch unit and predictors, LSU).
pub mod units;

pub use self::cpu::Cpu;
