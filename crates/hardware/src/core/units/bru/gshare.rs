//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! The Pattern History Table holds `2^history_bits` 2-bit saturating counters,
//! indexed by `((pc >> 2) ^ bhr) & mask`. The same structure backs both the
//! plain GShare variant (counters start strongly not-taken) and the GShare+
//! variant (counters start weakly taken).

use super::btb::Btb;

/// Counter value at and above which a branch is predicted taken.
const TAKEN_THRESHOLD: u8 = 2;
/// Saturation limit of the 2-bit counters.
const COUNTER_MAX: u8 = 3;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Branch History Register storing recent branch outcomes.
    bhr: u32,
    /// Mask selecting `history_bits` low bits.
    mask: u32,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
    /// Branch Target Buffer.
    btb: Btb,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor.
    ///
    /// # Arguments
    ///
    /// * `history_bits` - Width of the branch history register; the PHT has
    ///   `2^history_bits` entries.
    /// * `btb_size` - Number of BTB entries (power of two).
    /// * `initial_counter` - Starting value of every PHT counter (0..=3).
    pub fn new(history_bits: u32, btb_size: usize, initial_counter: u8) -> Self {
        let entries = 1usize << history_bits;
        Self {
            bhr: 0,
            mask: (entries - 1) as u32,
            pht: vec![initial_counter.min(COUNTER_MAX); entries],
            btb: Btb::new(btb_size),
        }
    }

    /// Calculates the index into the Pattern History Table.
    fn index(&self, pc: u32) -> usize {
        (((pc >> 2) ^ self.bhr) & self.mask) as usize
    }

    /// Predicts the next PC for the control-flow instruction at `pc`.
    ///
    /// Predicts taken when the counter is 2 or 3 and the BTB holds a target;
    /// otherwise falls through.
    pub fn predict(&self, pc: u32) -> u32 {
        let fallthrough = pc.wrapping_add(4);
        if self.pht[self.index(pc)] >= TAKEN_THRESHOLD {
            self.btb.lookup(pc).unwrap_or(fallthrough)
        } else {
            fallthrough
        }
    }

    /// Trains the predictor with a resolved outcome.
    ///
    /// Saturates the counter, shifts the outcome into the history register and
    /// records the target of taken branches in the BTB.
    pub fn update(&mut self, pc: u32, next_pc: u32, taken: bool) {
        let idx = self.index(pc);
        let counter = &mut self.pht[idx];
        if taken && *counter < COUNTER_MAX {
            *counter += 1;
        } else if !taken && *counter > 0 {
            *counter -= 1;
        }

        self.bhr = ((self.bhr << 1) | taken as u32) & self.mask;

        if taken {
            self.btb.update(pc, next_pc);
        }
    }

    /// Current history register value.
    pub fn history(&self) -> u32 {
        self.bhr
    }
}
