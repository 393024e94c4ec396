//! Front end shared by both backends.
//!
//! The front end owns the fetch PC, the branch predictor and the issue queue.
//! It performs:
//! 1. **Fetch:** One 32-bit instruction per cycle, decoded and pushed to the queue.
//! 2. **Prediction:** Control-flow instructions take their next PC from the predictor.
//! 3. **Redirect:** [`Frontend::resolve`] trains the predictor and, on a
//!    misprediction, discards the wrong-path queue contents.
//!
//! Fetch and decode faults are held rather than raised, because the faulting
//! address may lie on a wrong path that a pending branch will squash.

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::units::bru::{BranchOutcome, BranchPredictor};
use crate::isa::decode::decode;
use crate::isa::instruction::Instr;
use crate::stats::SimStats;

/// Fetch unit and issue queue.
#[derive(Debug)]
pub struct Frontend {
    pc: u32,
    predictor: BranchPredictor,
    queue: VecDeque<Rc<Instr>>,
    capacity: usize,
    /// An exit instruction has been fetched; stop until redirected.
    halted: bool,
    /// First fetch or decode failure on the current path.
    fault: Option<SimError>,
}

impl Frontend {
    /// Creates a front end fetching from `start_pc`.
    pub fn new(config: &Config, start_pc: u32) -> Self {
        let capacity = config.pipeline.issue_queue_size.max(1);
        Self {
            pc: start_pc,
            predictor: BranchPredictor::new(config),
            queue: VecDeque::with_capacity(capacity),
            capacity,
            halted: false,
            fault: None,
        }
    }

    /// Address of the next fetch.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Number of queued instructions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when the issue queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Oldest queued instruction.
    pub fn peek(&self) -> Option<&Rc<Instr>> {
        self.queue.front()
    }

    /// Removes the oldest queued instruction.
    pub fn pop(&mut self) -> Option<Rc<Instr>> {
        self.queue.pop_front()
    }

    /// Queues an already-decoded instruction, bypassing fetch.
    ///
    /// Returns false if the queue is full.
    pub fn enqueue(&mut self, instr: Instr) -> bool {
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_back(Rc::new(instr));
        true
    }

    /// Held fetch fault, if any.
    pub fn fault(&self) -> Option<&SimError> {
        self.fault.as_ref()
    }

    /// Removes and returns the held fetch fault.
    pub fn take_fault(&mut self) -> Option<SimError> {
        self.fault.take()
    }

    /// Fetches one instruction into the queue.
    pub fn fetch(&mut self, cpu: &mut Cpu) {
        if self.halted || self.fault.is_some() {
            return;
        }
        if self.queue.len() >= self.capacity {
            cpu.stats.stalls_fetch += 1;
            return;
        }

        let pc = self.pc;
        let Ok(raw) = cpu.bus.read_u32(pc) else {
            debug!(pc = format_args!("{pc:#010x}"), "fetch fault");
            self.fault = Some(SimError::FetchFault(pc));
            return;
        };
        let Ok(mut instr) = decode(raw) else {
            debug!(pc = format_args!("{pc:#010x}"), raw = format_args!("{raw:#010x}"), "illegal instruction");
            self.fault = Some(SimError::IllegalInstruction { pc, inst: raw });
            return;
        };

        instr.pc = pc;
        instr.pred_next = if instr.ctrl.is_branch {
            self.predictor.predict(pc)
        } else {
            instr.fallthrough()
        };
        self.halted = instr.ctrl.is_exit;
        self.pc = instr.pred_next;
        cpu.stats.instructions_fetched += 1;
        trace!(pc = format_args!("{pc:#010x}"), "fetch {instr}");
        self.queue.push_back(Rc::new(instr));
    }

    /// Applies a resolved branch outcome.
    ///
    /// Everything still queued is younger than the branch, so a misprediction
    /// discards the whole queue along with any fault or exit seen on that path.
    pub fn resolve(&mut self, outcome: &BranchOutcome, stats: &mut SimStats) {
        self.predictor
            .update(outcome.pc, outcome.next_pc, outcome.taken);

        if outcome.mispredicted() {
            stats.branch_mispredictions += 1;
            debug!(
                pc = format_args!("{:#010x}", outcome.pc),
                target = format_args!("{:#010x}", outcome.next_pc),
                squashed = self.queue.len(),
                "branch mispredicted, redirecting fetch"
            );
            self.queue.clear();
            self.fault = None;
            self.halted = false;
            self.pc = outcome.next_pc;
        } else {
            stats.branch_predictions += 1;
        }
    }
}
