//! Branch resolution and prediction.
//!
//! This module contains the branch predictors used by the front end and the
//! branch-resolution datapath shared by both backends:
//! 1. **Prediction:** A closed set of predictor variants selected once from
//!    configuration (`Static`, `GShare`, `GShare+`).
//! 2. **Resolution:** Condition evaluation and target computation for
//!    conditional branches, `JAL` and `JALR`, producing a [`BranchOutcome`].

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

use self::gshare::GSharePredictor;
use crate::config::{BranchPredictor as BpType, Config};
use crate::core::pipeline::signals::BrOp;
use crate::isa::instruction::Instr;

/// Initial PHT counter for plain GShare (strongly not taken).
const GSHARE_INIT: u8 = 0;

/// Initial PHT counter for GShare+ (weakly taken).
const GSHARE_PLUS_INIT: u8 = 2;

/// The resolved behaviour of one control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Address of the branch or jump.
    pub pc: u32,
    /// Architecturally correct next PC.
    pub next_pc: u32,
    /// Whether control left the fall-through path.
    pub taken: bool,
    /// Next PC the front end predicted at fetch.
    pub predicted_next: u32,
}

impl BranchOutcome {
    /// Returns true if the front end fetched down the wrong path.
    #[inline]
    pub fn mispredicted(&self) -> bool {
        self.next_pc != self.predicted_next
    }
}

/// Enum wrapper for static dispatch of branch predictors.
#[derive(Clone, Debug)]
pub enum BranchPredictor {
    /// Always predicts fall-through (`pc + 4`).
    Static,
    /// GShare with counters initialised to strongly not-taken.
    GShare(GSharePredictor),
    /// GShare with counters initialised to weakly taken.
    GSharePlus(GSharePredictor),
}

impl BranchPredictor {
    /// Builds the predictor selected by configuration.
    pub fn new(config: &Config) -> Self {
        let btb_size = config.pipeline.btb_size;
        let bits = config.pipeline.bhr_size;

        match config.pipeline.branch_predictor {
            BpType::Static => Self::Static,
            BpType::GShare => Self::GShare(GSharePredictor::new(bits, btb_size, GSHARE_INIT)),
            BpType::GSharePlus => {
                Self::GSharePlus(GSharePredictor::new(bits, btb_size, GSHARE_PLUS_INIT))
            }
        }
    }

    /// Predicts the next PC for the control-flow instruction at `pc`.
    #[inline(always)]
    pub fn predict(&self, pc: u32) -> u32 {
        match self {
            Self::Static => pc.wrapping_add(4),
            Self::GShare(bp) | Self::GSharePlus(bp) => bp.predict(pc),
        }
    }

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    #[inline(always)]
    pub fn update(&mut self, pc: u32, next_pc: u32, taken: bool) {
        match self {
            Self::Static => {}
            Self::GShare(bp) | Self::GSharePlus(bp) => bp.update(pc, next_pc, taken),
        }
    }
}

/// Branch resolution datapath.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Resolves a branch or jump given its source operand values.
    ///
    /// Returns the link value written to `rd` (`pc + 4`) and the outcome. The
    /// target of `JALR` has bit 0 cleared.
    pub fn resolve(instr: &Instr, rs1: u32, rs2: u32) -> (u32, BranchOutcome) {
        let fallthrough = instr.fallthrough();
        let relative = instr.pc.wrapping_add(instr.imm);

        let (taken, target) = match instr.ctrl.br {
            BrOp::Beq => (rs1 == rs2, relative),
            BrOp::Bne => (rs1 != rs2, relative),
            BrOp::Blt => ((rs1 as i32) < (rs2 as i32), relative),
            BrOp::Bge => ((rs1 as i32) >= (rs2 as i32), relative),
            BrOp::Bltu => (rs1 < rs2, relative),
            BrOp::Bgeu => (rs1 >= rs2, relative),
            BrOp::Jal => (true, relative),
            BrOp::Jalr => (true, rs1.wrapping_add(instr.imm) & !1),
            BrOp::None => (false, fallthrough),
        };

        let outcome = BranchOutcome {
            pc: instr.pc,
            next_pc: if taken { target } else { fallthrough },
            taken,
            predicted_next: instr.pred_next,
        };
        (fallthrough, outcome)
    }
}
