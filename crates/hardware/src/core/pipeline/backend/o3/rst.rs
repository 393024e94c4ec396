//! Register Scoreboard Table (RST).
//!
//! Maps a ROB slot to the reservation station computing its value. An entry
//! is valid from issue until the value is broadcast; consumers only consult it
//! after finding the ROB slot not yet ready.

/// ROB slot to RS slot mapping.
#[derive(Clone, Debug)]
pub struct Rst {
    map: Vec<Option<usize>>,
}

impl Rst {
    /// Creates a table with one entry per ROB slot.
    pub fn new(rob_size: usize) -> Self {
        Self {
            map: vec![None; rob_size],
        }
    }

    /// Records that `rs_slot` computes the value of `rob_slot`.
    pub fn set(&mut self, rob_slot: usize, rs_slot: usize) {
        if let Some(e) = self.map.get_mut(rob_slot) {
            *e = Some(rs_slot);
        }
    }

    /// RS slot computing `rob_slot`'s value, if not yet broadcast.
    pub fn get(&self, rob_slot: usize) -> Option<usize> {
        self.map.get(rob_slot).copied().flatten()
    }

    /// Invalidates the mapping for `rob_slot` once its value is broadcast.
    pub fn clear(&mut self, rob_slot: usize) {
        if let Some(e) = self.map.get_mut(rob_slot) {
            *e = None;
        }
    }
}
