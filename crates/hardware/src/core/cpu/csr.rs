//! CSR Access Logic.
//!
//! Implements the Zicsr instructions against a sparse CSR file:
//! 1. **Counters:** `cycle`, `instret` and their machine aliases and high halves
//!    are read-only views of the statistics.
//! 2. **Storage:** Every other address reads back the last value written (0 initially).
//! 3. **Semantics:** `CSRRS`/`CSRRC` with a zero source do not write.

use std::collections::HashMap;

use super::Cpu;
use crate::core::pipeline::signals::CsrOp;
use crate::isa::instruction::Instr;
use crate::isa::privileged::csr;

/// Backing storage for CSRs without architectural side effects.
#[derive(Clone, Debug, Default)]
pub struct Csrs {
    regs: HashMap<u32, u32>,
}

impl Cpu {
    /// Reads a CSR.
    pub fn csr_read(&self, addr: u32) -> u32 {
        match addr {
            csr::CYCLE | csr::MCYCLE => self.stats.cycles as u32,
            csr::CYCLEH | csr::MCYCLEH => (self.stats.cycles >> 32) as u32,
            csr::INSTRET | csr::MINSTRET => self.stats.instructions_retired as u32,
            csr::INSTRETH | csr::MINSTRETH => (self.stats.instructions_retired >> 32) as u32,
            csr::MHARTID => 0,
            _ => self.csrs.regs.get(&addr).copied().unwrap_or(0),
        }
    }

    /// Writes a CSR. Writes to counters and the hart id are ignored.
    pub fn csr_write(&mut self, addr: u32, val: u32) {
        match addr {
            csr::CYCLE
            | csr::MCYCLE
            | csr::CYCLEH
            | csr::MCYCLEH
            | csr::INSTRET
            | csr::MINSTRET
            | csr::INSTRETH
            | csr::MINSTRETH
            | csr::MHARTID => {}
            _ => {
                let _ = self.csrs.regs.insert(addr, val);
            }
        }
    }

    /// Executes a CSR instruction, returning the old CSR value for `rd`.
    ///
    /// The source is `rs1` for register forms and the 5-bit `zimm` for
    /// immediate forms.
    pub fn execute_csr(&mut self, instr: &Instr, rs1: u32) -> u32 {
        let old = self.csr_read(instr.csr);
        let src = if instr.ctrl.use_imm { instr.imm } else { rs1 };
        let source_is_zero = if instr.ctrl.use_imm {
            instr.imm == 0
        } else {
            instr.rs1 == 0
        };

        let new = match instr.ctrl.csr_op {
            CsrOp::Rw => Some(src),
            CsrOp::Rs if !source_is_zero => Some(old | src),
            CsrOp::Rc if !source_is_zero => Some(old & !src),
            _ => None,
        };
        if let Some(val) = new {
            self.csr_write(instr.csr, val);
        }
        old
    }
}
