//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Assigns a slot at the tail to each instruction entering the backend.
//! 2. **Completion:** Marks slots ready when their result is broadcast.
//! 3. **In-order Commit:** Only the head slot may retire; slots are freed strictly in FIFO order.
//!
//! Slot indices double as the rename tags held by the RAT and RST, so a slot
//! index stays stable for the lifetime of its instruction.

use std::rc::Rc;

use crate::common::error::SimError;
use crate::isa::instruction::Instr;

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug)]
pub struct RobEntry {
    /// The in-flight instruction (shared with its reservation station).
    pub instr: Rc<Instr>,
    /// The result has been broadcast on the CDB.
    pub ready: bool,
    /// Computed result value (ALU output, load data, link address or CSR value).
    pub result: u32,
    /// Access fault raised while executing; reported when the entry commits.
    pub fault: Option<SimError>,
}

/// Reorder Buffer: circular buffer for in-order commit.
#[derive(Debug)]
pub struct Rob {
    /// Fixed-size slot array.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of valid entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Allocates a slot at the tail for `instr`, not yet ready.
    ///
    /// Returns `None` if the ROB is full.
    pub fn allocate(&mut self, instr: Rc<Instr>) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let idx = self.tail;
        self.entries[idx] = Some(RobEntry {
            instr,
            ready: false,
            result: 0,
            fault: None,
        });
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(idx)
    }

    /// Returns the entry in slot `idx`, if occupied.
    pub fn get(&self, idx: usize) -> Option<&RobEntry> {
        self.entries.get(idx).and_then(Option::as_ref)
    }

    /// Marks slot `idx` ready with its result (and any fault raised producing it).
    ///
    /// Returns false if the slot is not occupied.
    pub fn complete(&mut self, idx: usize, result: u32, fault: Option<SimError>) -> bool {
        match self.entries.get_mut(idx).and_then(Option::as_mut) {
            Some(entry) => {
                entry.ready = true;
                entry.result = result;
                entry.fault = fault;
                true
            }
            None => false,
        }
    }

    /// Slot index of the oldest entry.
    pub fn head_index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.head)
    }

    /// Returns the oldest entry without removing it.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        self.head_index().and_then(|idx| self.get(idx))
    }

    /// Removes and returns the oldest entry, freeing its slot.
    pub fn pop(&mut self) -> Option<RobEntry> {
        if self.is_empty() {
            return None;
        }
        let entry = self.entries[self.head].take();
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        entry
    }

    /// Iterates over occupied slots from oldest to youngest as `(slot, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RobEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).filter_map(move |i| {
            let idx = (self.head + i) % cap;
            self.entries[idx].as_ref().map(|e| (idx, e))
        })
    }
}
