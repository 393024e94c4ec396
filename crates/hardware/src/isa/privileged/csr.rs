//! CSR Addresses.
//!
//! Only the performance counters have architectural meaning in this core; every
//! other address is backed by plain read/write storage.

/// Cycle counter, low word (user read-only).
pub const CYCLE: u32 = 0xC00;
/// Retired-instruction counter, low word (user read-only).
pub const INSTRET: u32 = 0xC02;
/// Cycle counter, high word.
pub const CYCLEH: u32 = 0xC80;
/// Retired-instruction counter, high word.
pub const INSTRETH: u32 = 0xC82;
/// Machine cycle counter, low word.
pub const MCYCLE: u32 = 0xB00;
/// Machine retired-instruction counter, low word.
pub const MINSTRET: u32 = 0xB02;
/// Machine cycle counter, high word.
pub const MCYCLEH: u32 = 0xB80;
/// Machine retired-instruction counter, high word.
pub const MINSTRETH: u32 = 0xB82;
/// Machine scratch register.
pub const MSCRATCH: u32 = 0x340;
/// Hart ID (always 0).
pub const MHARTID: u32 = 0xF14;
