//! Functional units.
//!
//! One unit per [`FuType`] class. A unit accepts a single operation, counts
//! down its configured latency, then computes the result through
//! [`Cpu::execute`] (which performs any memory or CSR side effect) and holds it
//! until the CDB arbiter takes it.

use std::rc::Rc;

use crate::common::error::SimError;
use crate::config::LatencyConfig;
use crate::core::Cpu;
use crate::core::pipeline::signals::FuType;
use crate::core::units::bru::BranchOutcome;
use crate::isa::instruction::Instr;

/// A completed result waiting for the CDB.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuOutput {
    /// Result value.
    pub result: u32,
    /// ROB slot of the operation.
    pub rob_index: usize,
    /// RS slot of the operation.
    pub rs_index: usize,
    /// Resolved control flow for branches and jumps.
    pub branch: Option<BranchOutcome>,
    /// Fault raised by a memory access.
    pub fault: Option<SimError>,
}

/// Interface between the scheduler and an execution resource.
#[cfg_attr(test, mockall::automock)]
pub trait FunctionalUnit {
    /// The operation class served by this unit.
    fn kind(&self) -> FuType;

    /// Starts an operation with resolved operand values.
    fn issue(&mut self, instr: Rc<Instr>, rob_index: usize, rs_index: usize, op1: u32, op2: u32);

    /// True from `issue` until `clear`.
    fn busy(&self) -> bool;

    /// Advances one cycle.
    fn execute(&mut self, cpu: &mut Cpu);

    /// True once the result is available.
    fn done(&self) -> bool;

    /// The finished result, if `done`.
    fn output(&self) -> Option<FuOutput>;

    /// Frees the unit after its result was broadcast.
    fn clear(&mut self);
}

#[derive(Debug)]
struct InFlight {
    instr: Rc<Instr>,
    rob_index: usize,
    rs_index: usize,
    op1: u32,
    op2: u32,
}

/// Fixed-latency unit backed by the shared execution routines.
#[derive(Debug)]
pub struct ExecUnit {
    kind: FuType,
    latency: u32,
    remaining: u32,
    op: Option<InFlight>,
    output: Option<FuOutput>,
}

impl ExecUnit {
    /// Creates an idle unit of class `kind` with a latency of at least one cycle.
    pub fn new(kind: FuType, latency: u32) -> Self {
        Self {
            kind,
            latency: latency.max(1),
            remaining: 0,
            op: None,
            output: None,
        }
    }

    /// One unit per class, in [`FuType::ALL`] order.
    pub fn pool(latencies: &LatencyConfig) -> Vec<Box<dyn FunctionalUnit>> {
        FuType::ALL
            .iter()
            .map(|&kind| {
                let latency = match kind {
                    FuType::Alu => latencies.alu,
                    FuType::Branch => latencies.branch,
                    FuType::Lsu => latencies.lsu,
                    FuType::Sfu => latencies.sfu,
                };
                Box::new(Self::new(kind, latency)) as Box<dyn FunctionalUnit>
            })
            .collect()
    }
}

impl FunctionalUnit for ExecUnit {
    fn kind(&self) -> FuType {
        self.kind
    }

    fn issue(&mut self, instr: Rc<Instr>, rob_index: usize, rs_index: usize, op1: u32, op2: u32) {
        self.op = Some(InFlight {
            instr,
            rob_index,
            rs_index,
            op1,
            op2,
        });
        self.remaining = self.latency;
        self.output = None;
    }

    fn busy(&self) -> bool {
        self.op.is_some() || self.output.is_some()
    }

    fn execute(&mut self, cpu: &mut Cpu) {
        if self.output.is_some() {
            return;
        }
        let Some(op) = self.op.take() else {
            return;
        };
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            self.op = Some(op);
            return;
        }

        let output = match cpu.execute(&op.instr, op.op1, op.op2) {
            Ok(out) => FuOutput {
                result: out.result,
                rob_index: op.rob_index,
                rs_index: op.rs_index,
                branch: out.branch,
                fault: None,
            },
            Err(fault) => FuOutput {
                result: 0,
                rob_index: op.rob_index,
                rs_index: op.rs_index,
                branch: None,
                fault: Some(fault),
            },
        };
        self.output = Some(output);
    }

    fn done(&self) -> bool {
        self.output.is_some()
    }

    fn output(&self) -> Option<FuOutput> {
        self.output.clone()
    }

    fn clear(&mut self) {
        self.op = None;
        self.output = None;
        self.remaining = 0;
    }
}
