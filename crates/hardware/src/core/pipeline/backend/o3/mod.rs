//! Out-of-order (Tomasulo) backend.
//!
//! The engine renames registers through the RAT, holds pending operations in
//! reservation stations, executes them on one functional unit per class and
//! commits through the reorder buffer. Each tick runs four phases in reverse
//! pipeline order:
//! 1. **Commit:** Retire the ROB head if its result is ready.
//! 2. **Writeback:** Broadcast the CDB message to the RS pool and the ROB.
//! 3. **Execute:** Advance functional units, grant the CDB to one finished
//!    unit, then dispatch ready RS entries to free units.
//! 4. **Issue:** Move the head of the issue queue into the ROB and the RS pool.
//!
//! Branches block issue until resolved, so nothing in the engine is ever
//! speculative and no flush path exists.

/// Single-slot result broadcast.
pub mod cdb;
/// Functional unit trait and the fixed-latency implementation.
pub mod fu;
/// Register alias table.
pub mod rat;
/// Reorder buffer.
pub mod rob;
/// Reservation station pool.
pub mod rs;
/// ROB slot to RS slot table.
pub mod rst;

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use self::cdb::{Cdb, CdbMessage};
use self::fu::{ExecUnit, FunctionalUnit};
use self::rat::Rat;
use self::rob::Rob;
use self::rs::{Operand, ReservationStations};
use self::rst::Rst;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::engine::ExecutionEngine;
use crate::core::pipeline::frontend::Frontend;

/// The out-of-order execution engine.
pub struct O3Engine {
    rob: Rob,
    rs: ReservationStations,
    rat: Rat,
    rst: Rst,
    cdb: Cdb,
    /// Indexed by [`crate::core::pipeline::signals::FuType::index`].
    units: Vec<Box<dyn FunctionalUnit>>,
    /// A branch has issued and not yet broadcast its outcome.
    branch_pending: bool,
    /// A faulting result was broadcast. Younger ordered operations stay in
    /// their stations so no side effect lands after the fault.
    faulted: bool,
}

impl fmt::Debug for O3Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("O3Engine")
            .field("rob", &self.rob)
            .field("rs", &self.rs)
            .field("rat", &self.rat)
            .field("rst", &self.rst)
            .field("cdb", &self.cdb)
            .field(
                "units",
                &self.units.iter().map(|u| u.kind()).collect::<Vec<_>>(),
            )
            .field("branch_pending", &self.branch_pending)
            .field("faulted", &self.faulted)
            .finish()
    }
}

impl O3Engine {
    /// Builds an engine sized by `config` with fixed-latency units.
    pub fn new(config: &Config) -> Self {
        Self::with_units(config, ExecUnit::pool(&config.pipeline.latencies))
    }

    /// Builds an engine around caller-supplied units.
    ///
    /// `units[i]` serves `FuType::ALL[i]`.
    pub fn with_units(config: &Config, units: Vec<Box<dyn FunctionalUnit>>) -> Self {
        let rob_size = config.pipeline.rob_size.max(1);
        Self {
            rob: Rob::new(rob_size),
            rs: ReservationStations::new(config.pipeline.rs_size.max(1)),
            rat: Rat::new(),
            rst: Rst::new(rob_size),
            cdb: Cdb::new(),
            units,
            branch_pending: false,
            faulted: false,
        }
    }

    /// The reorder buffer.
    pub fn rob(&self) -> &Rob {
        &self.rob
    }

    /// The reservation station pool.
    pub fn rs(&self) -> &ReservationStations {
        &self.rs
    }

    /// The register alias table.
    pub fn rat(&self) -> &Rat {
        &self.rat
    }

    /// True while an issued branch awaits resolution.
    pub fn branch_pending(&self) -> bool {
        self.branch_pending
    }

    fn commit(&mut self, cpu: &mut Cpu) -> Result<(), SimError> {
        let Some(head) = self.rob.head_index() else {
            return Ok(());
        };
        if !self.rob.peek_head().is_some_and(|e| e.ready) {
            return Ok(());
        }
        let Some(entry) = self.rob.pop() else {
            return Ok(());
        };
        if let Some(fault) = entry.fault {
            return Err(fault);
        }

        cpu.retire(&entry.instr, entry.result);
        if let Some(rd) = entry.instr.dest() {
            self.rat.clear_if_match(rd, head);
        }
        trace!(rob = head, pc = format_args!("{:#010x}", entry.instr.pc), "commit");
        Ok(())
    }

    fn writeback(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) -> Result<(), SimError> {
        let Some(msg) = self.cdb.take() else {
            return Ok(());
        };
        trace!(rob = msg.rob_index, rs = msg.rs_index, value = msg.result, "broadcast");

        if msg.fault.is_some() {
            self.faulted = true;
        }
        if !self.rob.complete(msg.rob_index, msg.result, msg.fault) {
            return Err(SimError::Internal("CDB names a free ROB slot"));
        }
        self.rs.update_operands(msg.rs_index, msg.result);
        self.rs.release(msg.rs_index);
        self.rst.clear(msg.rob_index);

        if let Some(outcome) = msg.branch {
            self.branch_pending = false;
            frontend.resolve(&outcome, &mut cpu.stats);
        }
        Ok(())
    }

    fn execute(&mut self, cpu: &mut Cpu) {
        for unit in &mut self.units {
            if unit.busy() {
                unit.execute(cpu);
            }
        }

        // One broadcast per cycle; the first finished unit in pool order wins.
        if let Some(unit) = self.units.iter_mut().find(|u| u.done()) {
            if let Some(out) = unit.output() {
                let msg = CdbMessage {
                    result: out.result,
                    rob_index: out.rob_index,
                    rs_index: out.rs_index,
                    branch: out.branch,
                    fault: out.fault,
                };
                if self.cdb.post(msg).is_ok() {
                    unit.clear();
                }
            }
        }

        for slot in self.rs.dispatchable() {
            let Some(entry) = self.rs.get(slot) else {
                continue;
            };
            // Older ordered work has already left the pool; anything still
            // waiting is younger than the fault.
            if self.faulted && entry.instr.ctrl.is_ordered() {
                continue;
            }
            let (Some(op1), Some(op2)) = (entry.op1.value(), entry.op2.value()) else {
                continue;
            };
            let Some(unit) = self.units.get_mut(entry.instr.fu.index()) else {
                continue;
            };
            if unit.busy() {
                continue;
            }
            trace!(rs = slot, rob = entry.rob_index, fu = ?entry.instr.fu, "dispatch");
            unit.issue(Rc::clone(&entry.instr), entry.rob_index, slot, op1, op2);
            self.rs.mark_running(slot);
        }
    }

    fn resolve_operand(&self, cpu: &Cpu, used: bool, reg: usize) -> Result<Operand, SimError> {
        if !used {
            return Ok(Operand::Ready(0));
        }
        let Some(producer) = self.rat.get(reg) else {
            return Ok(Operand::Ready(cpu.regs.read(reg)));
        };
        match self.rob.get(producer) {
            Some(entry) if entry.ready => Ok(Operand::Ready(entry.result)),
            Some(_) => self
                .rst
                .get(producer)
                .map(Operand::Pending)
                .ok_or(SimError::Internal("in-flight producer has no reservation station")),
            None => Err(SimError::Internal("RAT names a free ROB slot")),
        }
    }

    fn issue(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) -> Result<(), SimError> {
        let Some(instr) = frontend.peek().map(Rc::clone) else {
            return Ok(());
        };
        if self.branch_pending {
            cpu.stats.stalls_control += 1;
            return Ok(());
        }
        if self.rob.is_full() {
            cpu.stats.stalls_rob_full += 1;
            debug!(pc = format_args!("{:#010x}", instr.pc), "issue stall: ROB full");
            return Ok(());
        }
        if self.rs.is_full() {
            cpu.stats.stalls_rs_full += 1;
            debug!(pc = format_args!("{:#010x}", instr.pc), "issue stall: RS full");
            return Ok(());
        }

        // Operands are resolved before this instruction's own RAT update.
        let op1 = self.resolve_operand(cpu, instr.ctrl.use_rs1, instr.rs1)?;
        let op2 = self.resolve_operand(cpu, instr.ctrl.use_rs2, instr.rs2)?;

        let rob_index = self
            .rob
            .allocate(Rc::clone(&instr))
            .ok_or(SimError::Internal("ROB allocation failed after capacity check"))?;
        if let Some(rd) = instr.dest() {
            self.rat.set(rd, rob_index);
        }
        let rs_index = self
            .rs
            .issue(Rc::clone(&instr), rob_index, op1, op2)
            .ok_or(SimError::Internal("RS allocation failed after capacity check"))?;
        self.rst.set(rob_index, rs_index);
        let _ = frontend.pop();

        if instr.ctrl.is_branch {
            self.branch_pending = true;
        }
        trace!(
            pc = format_args!("{:#010x}", instr.pc),
            rob = rob_index,
            rs = rs_index,
            "issue {instr}"
        );
        Ok(())
    }
}

impl ExecutionEngine for O3Engine {
    fn tick(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) -> Result<(), SimError> {
        self.commit(cpu)?;
        if cpu.exited {
            return Ok(());
        }
        self.writeback(cpu, frontend)?;
        self.execute(cpu);
        self.issue(cpu, frontend)
    }

    fn is_idle(&self) -> bool {
        self.rob.is_empty() && self.cdb.is_empty() && !self.units.iter().any(|u| u.busy())
    }
}
