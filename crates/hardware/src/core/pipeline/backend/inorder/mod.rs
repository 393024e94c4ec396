//! In-order backend: the ID, EX, MEM and WB stages of a classic five-stage pipeline.
//!
//! The shared front end plays the role of IF. Stages are evaluated in reverse
//! order each tick so every latch is consumed before it is refilled:
//! 1. **WB:** Retire the MEM/WB entry (the single retirement point).
//! 2. **MEM:** Perform the load or store of the EX/MEM entry.
//! 3. **EX:** Forward operands, compute, and resolve branches.
//! 4. **ID:** Read registers for the next queued instruction, unless a branch
//!    is unresolved or a load-use hazard forces a bubble.

/// Load-use detection and operand forwarding.
pub mod hazards;
/// Inter-stage latches.
pub mod latches;

use std::rc::Rc;

use tracing::{debug, trace};

use self::hazards::{forward, load_use_hazard};
use self::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::pipeline::engine::ExecutionEngine;
use crate::core::pipeline::frontend::Frontend;
use crate::core::pipeline::signals::FuType;
use crate::core::units::lsu::Lsu;

/// In-order execution engine.
#[derive(Debug, Default)]
pub struct InOrderEngine {
    /// ID -> EX latch.
    pub id_ex: Option<IdExEntry>,
    /// EX -> MEM latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM -> WB latch.
    pub mem_wb: Option<MemWbEntry>,
    branch_pending: bool,
}

impl InOrderEngine {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    fn memory(cpu: &mut Cpu, em: ExMemEntry) -> Result<MemWbEntry, SimError> {
        let ctrl = &em.instr.ctrl;
        let result = if ctrl.is_load {
            Lsu::load(&mut cpu.bus, em.result, ctrl.width, ctrl.signed_load)?
        } else if ctrl.is_store {
            Lsu::store(&mut cpu.bus, em.result, ctrl.width, em.store_data)?;
            0
        } else {
            em.result
        };
        Ok(MemWbEntry {
            instr: em.instr,
            result,
        })
    }

    fn execute(
        &mut self,
        cpu: &mut Cpu,
        frontend: &mut Frontend,
        entry: IdExEntry,
        fwd_mem: Option<&ExMemEntry>,
        fwd_wb: Option<&MemWbEntry>,
    ) -> Result<ExMemEntry, SimError> {
        let instr = entry.instr;
        let rs1 = forward(instr.rs1, entry.rs1_val, fwd_mem, fwd_wb);
        let rs2 = forward(instr.rs2, entry.rs2_val, fwd_mem, fwd_wb);

        if instr.fu == FuType::Lsu {
            return Ok(ExMemEntry {
                result: Lsu::address(&instr, rs1),
                store_data: rs2,
                instr,
            });
        }

        let out = cpu.execute(&instr, rs1, rs2)?;
        if let Some(outcome) = out.branch {
            self.branch_pending = false;
            frontend.resolve(&outcome, &mut cpu.stats);
        }
        Ok(ExMemEntry {
            instr,
            result: out.result,
            store_data: 0,
        })
    }

    fn decode(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) {
        let Some(next) = frontend.peek() else {
            return;
        };
        if self.branch_pending {
            cpu.stats.stalls_control += 1;
            return;
        }
        if load_use_hazard(self.ex_mem.as_ref(), next) {
            cpu.stats.stalls_data += 1;
            debug!(pc = format_args!("{:#010x}", next.pc), "load-use stall");
            return;
        }
        let Some(instr) = frontend.pop() else {
            return;
        };

        if instr.ctrl.is_branch {
            self.branch_pending = true;
        }
        trace!(pc = format_args!("{:#010x}", instr.pc), "decode {instr}");
        self.id_ex = Some(IdExEntry {
            rs1_val: cpu.regs.read(instr.rs1),
            rs2_val: cpu.regs.read(instr.rs2),
            instr: Rc::clone(&instr),
        });
    }
}

impl ExecutionEngine for InOrderEngine {
    fn tick(&mut self, cpu: &mut Cpu, frontend: &mut Frontend) -> Result<(), SimError> {
        // Forwarding sees the latches as they were at the start of the cycle.
        let fwd_mem = self.ex_mem.clone();
        let fwd_wb = self.mem_wb.clone();

        if let Some(wb) = self.mem_wb.take() {
            cpu.retire(&wb.instr, wb.result);
            if cpu.exited {
                return Ok(());
            }
        }

        if let Some(em) = self.ex_mem.take() {
            self.mem_wb = Some(Self::memory(cpu, em)?);
        }

        if let Some(entry) = self.id_ex.take() {
            let em = self.execute(cpu, frontend, entry, fwd_mem.as_ref(), fwd_wb.as_ref())?;
            self.ex_mem = Some(em);
        }

        self.decode(cpu, frontend);
        Ok(())
    }

    fn is_idle(&self) -> bool {
        self.id_ex.is_none() && self.ex_mem.is_none() && self.mem_wb.is_none()
    }
}
