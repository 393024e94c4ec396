//! Instruction execution and retirement.
//!
//! Both backends funnel work through the two entry points defined here:
//! 1. **Execution:** [`Cpu::execute`] computes an instruction's result on its
//!    functional-unit class, performing memory and CSR side effects.
//! 2. **Retirement:** [`Cpu::retire`] makes a result architectural: register
//!    write, statistics and the exit flag.

use tracing::{info, trace};

use super::Cpu;
use crate::common::error::SimError;
use crate::core::pipeline::signals::FuType;
use crate::core::units::alu::Alu;
use crate::core::units::bru::{BranchOutcome, Bru};
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::Instr;

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Value destined for `rd` (0 when the instruction writes no register).
    pub result: u32,
    /// Resolved control flow, for branches and jumps.
    pub branch: Option<BranchOutcome>,
}

impl ExecOutput {
    fn value(result: u32) -> Self {
        Self {
            result,
            branch: None,
        }
    }
}

impl Cpu {
    /// Executes `instr` with the given source operand values.
    ///
    /// # Errors
    ///
    /// Returns a load or store access fault for unmapped data addresses.
    pub fn execute(&mut self, instr: &Instr, rs1: u32, rs2: u32) -> Result<ExecOutput, SimError> {
        match instr.fu {
            FuType::Alu => Ok(ExecOutput::value(Alu::compute(instr, rs1, rs2))),
            FuType::Branch => {
                let (link, outcome) = Bru::resolve(instr, rs1, rs2);
                Ok(ExecOutput {
                    result: link,
                    branch: Some(outcome),
                })
            }
            FuType::Lsu => Lsu::execute(&mut self.bus, instr, rs1, rs2).map(ExecOutput::value),
            FuType::Sfu => {
                let result = if instr.ctrl.is_csr {
                    self.execute_csr(instr, rs1)
                } else {
                    0
                };
                Ok(ExecOutput::value(result))
            }
        }
    }

    /// Retires `instr` with its final `result`.
    pub fn retire(&mut self, instr: &Instr, result: u32) {
        if let Some(rd) = instr.dest() {
            self.regs.write(rd, result);
        }
        self.stats.record_retire(instr);
        trace!(pc = format_args!("{:#010x}", instr.pc), "retire {instr} -> {result:#x}");

        if instr.ctrl.is_exit {
            self.exited = true;
            info!(
                pc = format_args!("{:#010x}", instr.pc),
                code = self.exit_code(),
                "program exited"
            );
        }
    }
}
