//! Simulator: owns the CPU and the pipeline side by side.
//!
//! Keeping them as sibling fields lets the pipeline borrow the CPU mutably
//! each tick without interior mutability.

use std::path::Path;

use tracing::info;

use super::loader::{LoadError, load_program};
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::PipelineDispatch;
use crate::soc::System;

/// Top-level simulator: CPU architectural state plus pipeline.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, CSRs, bus, stats).
    pub cpu: Cpu,
    /// Pipeline implementation (front end plus backend engine).
    pub pipeline: PipelineDispatch,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator that starts fetching at `config.general.start_pc`.
    pub fn new(system: System, config: &Config) -> Self {
        Self::with_entry(system, config, config.general.start_pc)
    }

    /// Creates a simulator that starts fetching at `entry`.
    pub fn with_entry(system: System, config: &Config, entry: u32) -> Self {
        Self {
            cpu: Cpu::new(system, config),
            pipeline: PipelineDispatch::new(config, entry),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Builds a system from `config`, loads the program at `path` and returns
    /// a simulator positioned at its entry point.
    ///
    /// # Errors
    ///
    /// Propagates loader failures.
    pub fn from_program(config: &Config, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let mut cpu = Cpu::new(System::new(config), config);
        let entry = load_program(&mut cpu, path, config)?;
        info!(
            entry = format_args!("{entry:#010x}"),
            backend = ?config.pipeline.backend,
            "program loaded"
        );
        Ok(Self {
            cpu,
            pipeline: PipelineDispatch::new(config, entry),
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Returns the fault that stopped the pipeline.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.pipeline.tick(&mut self.cpu)
    }

    /// True once the exit instruction has retired.
    pub fn exited(&self) -> bool {
        self.cpu.exited
    }

    /// Program exit code (see [`Cpu::exit_code`]).
    pub fn exit_code(&self) -> i32 {
        self.cpu.exit_code()
    }

    /// Ticks until the program exits and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] when the configured cycle budget runs
    /// out first, or any fault raised by the pipeline.
    pub fn run(&mut self) -> Result<i32, SimError> {
        while !self.cpu.exited {
            if self.cpu.stats.cycles >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            self.tick()?;
        }
        Ok(self.exit_code())
    }
}
