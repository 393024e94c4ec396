//! Execution units and functional components.
//!
//! The datapaths shared by both backends (ALU, branch resolution, load/store)
//! and the branch predictors used by the front end.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch resolution and branch predictors.
pub mod bru;

/// Load/Store Unit for memory access operations.
pub mod lsu;
