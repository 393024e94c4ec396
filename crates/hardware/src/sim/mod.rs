//! Simulation driver and program loading.
//!
//! Provides the cycle loop that owns the CPU and pipeline, plus utilities for
//! placing a program image in memory.

/// Program image loading (ELF32 or raw binary).
pub mod loader;

/// Cycle driver owning the CPU and the pipeline.
pub mod simulator;

pub use self::loader::{LoadError, load_binary, load_program};
pub use self::simulator::Simulator;
