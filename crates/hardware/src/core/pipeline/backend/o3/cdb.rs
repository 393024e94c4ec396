//! Common Data Bus (CDB).
//!
//! A single-slot broadcast channel. Execute posts at most one completed result
//! per cycle; writeback consumes it in the following cycle.

use crate::common::error::SimError;
use crate::core::units::bru::BranchOutcome;

/// One broadcast result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdbMessage {
    /// Result value.
    pub result: u32,
    /// ROB slot of the producing instruction.
    pub rob_index: usize,
    /// RS slot that computed the value (the tag waiting operands hold).
    pub rs_index: usize,
    /// Resolved control flow, if the producer was a branch or jump.
    pub branch: Option<BranchOutcome>,
    /// Access fault raised by the producer.
    pub fault: Option<SimError>,
}

/// The single-slot bus.
#[derive(Debug, Default)]
pub struct Cdb {
    slot: Option<CdbMessage>,
}

impl Cdb {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing is waiting to be broadcast.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Places `msg` on the bus. Returns the message back if the slot is taken.
    pub fn post(&mut self, msg: CdbMessage) -> Result<(), CdbMessage> {
        if self.slot.is_some() {
            return Err(msg);
        }
        self.slot = Some(msg);
        Ok(())
    }

    /// The pending message, if any.
    pub fn peek(&self) -> Option<&CdbMessage> {
        self.slot.as_ref()
    }

    /// Removes the pending message, emptying the bus.
    pub fn take(&mut self) -> Option<CdbMessage> {
        self.slot.take()
    }
}
