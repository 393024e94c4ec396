//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table that stores target addresses for taken
//! control-flow instructions, so the fetch stage can redirect before the
//! instruction executes.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default)]
struct BtbEntry {
    /// Upper PC bits identifying which branch owns this entry.
    tag: u32,
    /// The predicted target address.
    target: u32,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// `log2(table.len())`, the number of word-address bits used as index.
    index_bits: u32,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Must be a power of 2
    ///   (enforced by `Config::validate`).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            table: vec![BtbEntry::default(); size],
            index_bits: size.trailing_zeros(),
        }
    }

    /// Index: word address masked to the table size.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.table.len() - 1)
    }

    /// Tag: word address bits above the index.
    fn tag(&self, pc: u32) -> u32 {
        (pc >> 2).checked_shr(self.index_bits).unwrap_or(0)
    }

    /// Looks up a target address for the given program counter.
    ///
    /// Returns the target if a valid entry exists and the tag matches.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        let e = self.table[self.index(pc)];
        (e.valid && e.tag == self.tag(pc)).then_some(e.target)
    }

    /// Writes (or overwrites) the entry for `pc`.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.table[idx] = BtbEntry {
            tag: self.tag(pc),
            target,
            valid: true,
        };
    }
}
