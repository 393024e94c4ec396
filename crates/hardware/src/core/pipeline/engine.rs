//! Execution engine trait and pipeline composition.
//!
//! This module defines how a backend plugs into the shared front end:
//! 1. **`ExecutionEngine`:** One backend cycle plus an idleness query.
//! 2. **`Pipeline`:** A front end paired with an engine, ticked as a unit.
//! 3. **`PipelineDispatch`:** Enum dispatch over the two concrete pipelines.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::backend::inorder::InOrderEngine;
use crate::core::pipeline::backend::o3::O3Engine;
use crate::core::pipeline::frontend::Frontend;

/// Backend type selection.
pub use crate::config::Backend as BackendType;

/// A backend that consumes the front end's issue queue.
pub trait ExecutionEngine {
    /// Runs one cycle of every backend phase (reverse pipeline order internally).
    ///
    /// # Errors
    ///
    /// Returns a fault that reached the retirement point, or an internal
    /// invariant violation.
    fn tick(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) -> Result<(), SimError>;

    /// True when no instruction is in flight inside the backend.
    fn is_idle(&self) -> bool;
}

/// A front end and a backend ticked together.
#[derive(Debug)]
pub struct Pipeline<E: ExecutionEngine> {
    /// Fetch, prediction and the issue queue.
    pub frontend: Frontend,
    /// The backend.
    pub engine: E,
}

impl<E: ExecutionEngine> Pipeline<E> {
    /// Pairs `engine` with a front end starting at `start_pc`.
    pub fn new(config: &Config, start_pc: u32, engine: E) -> Self {
        Self {
            frontend: Frontend::new(config, start_pc),
            engine,
        }
    }

    /// Runs one cycle of the entire pipeline.
    ///
    /// # Errors
    ///
    /// Propagates backend faults. A held fetch fault is raised once every
    /// older instruction has drained, since only then is it on the correct path.
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<(), SimError> {
        self.engine.tick(cpu, &mut self.frontend)?;

        if !cpu.exited {
            self.frontend.fetch(cpu);
        }
        let drained = !cpu.exited && self.frontend.is_empty() && self.engine.is_idle();
        if let Some(fault) = drained.then(|| self.frontend.take_fault()).flatten() {
            return Err(fault);
        }

        cpu.stats.cycles += 1;
        Ok(())
    }
}

/// Type-erased pipeline selected by configuration.
#[derive(Debug)]
pub enum PipelineDispatch {
    /// Five-stage in-order pipeline.
    InOrder(Box<Pipeline<InOrderEngine>>),
    /// Tomasulo out-of-order pipeline.
    OutOfOrder(Box<Pipeline<O3Engine>>),
}

impl PipelineDispatch {
    /// Builds the pipeline named by `config.pipeline.backend`.
    pub fn new(config: &Config, start_pc: u32) -> Self {
        match config.pipeline.backend {
            BackendType::InOrder => Self::InOrder(Box::new(Pipeline::new(
                config,
                start_pc,
                InOrderEngine::new(),
            ))),
            BackendType::OutOfOrder => Self::OutOfOrder(Box::new(Pipeline::new(
                config,
                start_pc,
                O3Engine::new(config),
            ))),
        }
    }

    /// Runs one cycle.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::tick`].
    pub fn tick(&mut self, cpu: &mut Cpu) -> Result<(), SimError> {
        match self {
            Self::InOrder(p) => p.tick(cpu),
            Self::OutOfOrder(p) => p.tick(cpu),
        }
    }

    /// The shared front end.
    pub fn frontend(&self) -> &Frontend {
        match self {
            Self::InOrder(p) => &p.frontend,
            Self::OutOfOrder(p) => &p.frontend,
        }
    }

    /// Which backend is running.
    pub fn backend(&self) -> BackendType {
        match self {
            Self::InOrder(_) => BackendType::InOrder,
            Self::OutOfOrder(_) => BackendType::OutOfOrder,
        }
    }
}
