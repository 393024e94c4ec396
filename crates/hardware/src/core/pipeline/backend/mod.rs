//! Backend pipelines.
//!
//! Both backends consume the shared front end's issue queue and retire through
//! [`crate::core::Cpu::retire`]:
//! 1. **In-order:** ID -> EX -> MEM -> WB with forwarding and load-use stalls.
//! 2. **Out-of-order:** Tomasulo issue, execute, writeback and in-order commit.

/// Five-stage in-order backend.
pub mod inorder;

/// Tomasulo out-of-order backend.
pub mod o3;
