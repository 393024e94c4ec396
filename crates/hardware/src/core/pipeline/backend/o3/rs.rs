//! Reservation Station pool.
//!
//! A fixed-capacity table of issued operations waiting for their operands and
//! a free functional unit. Each operand is either a concrete value or the tag
//! (RS slot index) of the entry that will produce it.
//!
//! Ordered operations (loads, stores, CSR accesses) are serialised with the
//! `locked` bit: only the oldest valid ordered entry is unlocked, so memory
//! and CSR side effects happen in program order.

use std::rc::Rc;

use crate::isa::instruction::Instr;

/// A source operand held by a reservation station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// The value is known.
    Ready(u32),
    /// Waiting for the result of the entry in this RS slot.
    Pending(usize),
}

impl Operand {
    /// The concrete value, if resolved.
    pub const fn value(self) -> Option<u32> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }
}

/// One occupied reservation station.
#[derive(Clone, Debug)]
pub struct RsEntry {
    /// The operation (shared with its ROB entry).
    pub instr: Rc<Instr>,
    /// ROB slot that receives the result.
    pub rob_index: usize,
    /// First source operand.
    pub op1: Operand,
    /// Second source operand.
    pub op2: Operand,
    /// Dispatched to a functional unit, waiting for broadcast.
    pub running: bool,
    /// Held back behind an older ordered operation.
    pub locked: bool,
    /// Issue sequence number (program order).
    pub seq: u64,
}

impl RsEntry {
    /// True when neither operand waits on a producer.
    pub const fn operands_ready(&self) -> bool {
        matches!(
            (self.op1, self.op2),
            (Operand::Ready(_), Operand::Ready(_))
        )
    }
}

/// The reservation station pool.
#[derive(Debug)]
pub struct ReservationStations {
    slots: Vec<Option<RsEntry>>,
    next_seq: u64,
}

impl ReservationStations {
    /// Creates a pool with `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, next_seq: 0 }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The entry in slot `idx`, if occupied.
    pub fn get(&self, idx: usize) -> Option<&RsEntry> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Places an operation into the lowest free slot.
    ///
    /// Returns `None` if the pool is full.
    pub fn issue(
        &mut self,
        instr: Rc<Instr>,
        rob_index: usize,
        op1: Operand,
        op2: Operand,
    ) -> Option<usize> {
        let idx = self.slots.iter().position(Option::is_none)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[idx] = Some(RsEntry {
            instr,
            rob_index,
            op1,
            op2,
            running: false,
            locked: false,
            seq,
        });
        self.refresh_locks();
        Some(idx)
    }

    /// Frees slot `idx` after its result has been broadcast.
    pub fn release(&mut self, idx: usize) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = None;
        }
        self.refresh_locks();
    }

    /// Replaces every operand waiting on `producer` with `value`.
    pub fn update_operands(&mut self, producer: usize, value: u32) {
        for entry in self.slots.iter_mut().flatten() {
            if entry.op1 == Operand::Pending(producer) {
                entry.op1 = Operand::Ready(value);
            }
            if entry.op2 == Operand::Pending(producer) {
                entry.op2 = Operand::Ready(value);
            }
        }
    }

    /// Slots eligible for dispatch, in slot-index order.
    pub fn dispatchable(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .filter(|e| !e.running && !e.locked && e.operands_ready())
                    .map(|_| idx)
            })
            .collect()
    }

    /// Marks slot `idx` as dispatched.
    pub fn mark_running(&mut self, idx: usize) {
        if let Some(entry) = self.slots.get_mut(idx).and_then(Option::as_mut) {
            entry.running = true;
        }
    }

    fn refresh_locks(&mut self) {
        let oldest = self
            .slots
            .iter()
            .flatten()
            .filter(|e| e.instr.ctrl.is_ordered())
            .map(|e| e.seq)
            .min();
        for entry in self.slots.iter_mut().flatten() {
            entry.locked = entry.instr.ctrl.is_ordered() && Some(entry.seq) != oldest;
        }
    }
}
