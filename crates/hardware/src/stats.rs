//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, fetched and retired instructions, derived CPI/MIPS.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch, system).
//! 3. **Branch prediction:** Correct predictions, mispredictions, and accuracy.
//! 4. **Stalls:** Cycles lost to a full ROB, full reservation stations, control
//!    hazards, load-use data hazards and a full issue queue.

use std::time::Instant;

use crate::isa::instruction::Instr;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions placed in the issue queue.
    pub instructions_fetched: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of ALU (arithmetic, logic, LUI/AUIPC) instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of system (CSR, FENCE, ECALL, EBREAK) instructions retired.
    pub inst_system: u64,

    /// Number of branch predictions that were correct.
    pub branch_predictions: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,

    /// Issue cycles blocked because the reorder buffer was full.
    pub stalls_rob_full: u64,
    /// Issue cycles blocked because every reservation station was occupied.
    pub stalls_rs_full: u64,
    /// Issue cycles blocked behind an unresolved branch.
    pub stalls_control: u64,
    /// Decode cycles lost to load-use hazards (in-order backend).
    pub stalls_data: u64,
    /// Fetch cycles skipped because the issue queue was full.
    pub stalls_fetch: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_fetched: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_rob_full: 0,
            stalls_rs_full: 0,
            stalls_control: 0,
            stalls_data: 0,
            stalls_fetch: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch"];

const RULE: &str = "----------------------------------------------------------";

fn percent_line(label: &str, value: u64, total: u64) {
    println!(
        "  {:<22} {} ({:.2}%)",
        label,
        value,
        (value as f64 / total.max(1) as f64) * 100.0
    );
}

impl SimStats {
    /// Records one retired instruction in the totals and the instruction mix.
    pub fn record_retire(&mut self, instr: &Instr) {
        self.instructions_retired += 1;
        let c = &instr.ctrl;
        if c.is_load {
            self.inst_load += 1;
        } else if c.is_store {
            self.inst_store += 1;
        } else if c.is_branch {
            self.inst_branch += 1;
        } else if c.is_csr || c.is_exit || instr.opcode == crate::isa::instruction::Opcode::Fence {
            self.inst_system += 1;
        } else {
            self.inst_alu += 1;
        }
    }

    /// Total resolved branches (correct plus mispredicted).
    pub fn branches_resolved(&self) -> u64 {
        self.branch_predictions + self.branch_mispredictions
    }

    /// Instructions retired per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// One-line summary: `PERF: instrs=…, cycles=…, bpred=hits/total`.
    pub fn perf_line(&self) -> String {
        format!(
            "PERF: instrs={}, cycles={}, bpred={}/{}",
            self.instructions_retired,
            self.cycles,
            self.branch_predictions,
            self.branches_resolved()
        )
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            println!("\n==========================================================");
            println!("RISC-V CORE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_fetched              {}", self.instructions_fetched);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc as f64 / instr as f64);
            println!(
                "sim_mips                 {:.2}",
                (self.instructions_retired as f64 / seconds) / 1_000_000.0
            );
            println!("{RULE}");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            percent_line("stalls.rob_full", self.stalls_rob_full, cyc);
            percent_line("stalls.rs_full", self.stalls_rs_full, cyc);
            percent_line("stalls.control", self.stalls_control, cyc);
            percent_line("stalls.data", self.stalls_data, cyc);
            percent_line("stalls.fetch", self.stalls_fetch, cyc);
            println!("{RULE}");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            percent_line("op.alu", self.inst_alu, instr);
            percent_line("op.load", self.inst_load, instr);
            percent_line("op.store", self.inst_store, instr);
            percent_line("op.branch", self.inst_branch, instr);
            percent_line("op.system", self.inst_system, instr);
            println!("{RULE}");
        }
        if want("branch") {
            let total = self.branches_resolved();
            let acc = if total > 0 {
                100.0 * (self.branch_predictions as f64 / total as f64)
            } else {
                0.0
            };
            println!("BRANCH PREDICTION");
            println!("  bp.resolved            {}", total);
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {:.2}%", acc);
            println!("{RULE}");
        }
    }

    /// Prints every section.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
