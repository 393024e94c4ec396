//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared across all components:
//! 1. **Constants:** Register counts, instruction size, exit-code register.
//! 2. **Error Handling:** Simulation faults, decode errors and bus faults.
//! 3. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{BusFault, DecodeError, SimError};
pub use reg::RegisterFile;
