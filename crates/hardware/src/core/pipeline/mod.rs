//! Instruction pipeline implementation.
//!
//! This module contains the pipeline organisations the simulator can run.
//! It includes the following components:
//! 1. **Signals:** Control signals generated during instruction decoding.
//! 2. **Frontend:** Fetch, branch prediction and the issue queue.
//! 3. **Backend:** The in-order five-stage and the out-of-order Tomasulo engines.
//! 4. **Engine:** The trait both backends implement and the pipeline wrapper.

/// Backend pipelines (in-order and out-of-order).
pub mod backend;

/// Execution engine trait and pipeline composition.
pub mod engine;

/// Shared front end.
pub mod frontend;

/// Control signals generated during instruction decode.
pub mod signals;

pub use self::engine::{BackendType, ExecutionEngine, Pipeline, PipelineDispatch};
pub use self::frontend::Frontend;
