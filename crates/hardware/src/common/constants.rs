//! System-wide constants.

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Size of every instruction in bytes (no compressed encodings).
pub const INSTRUCTION_BYTES: u32 = 4;

/// Register holding the program exit code when the exit instruction commits (`gp`).
pub const EXIT_CODE_REG: usize = 3;

/// The encoding of `addi x0, x0, 0`.
pub const NOP: u32 = 0x0000_0013;
