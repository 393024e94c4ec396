//! RV32M encoding fields. Multiply/divide shares `OP_REG` and is selected by `funct7`.

/// `funct7` selector.
pub mod opcodes {
    /// `funct7` value marking an `OP_REG` word as multiply/divide.
    pub const M_EXTENSION: u32 = 0x01;
}

/// Operation selector within the M extension.
pub mod funct3 {
    /// Low 32 bits of `rs1 * rs2`.
    pub const MUL: u32 = 0;
    /// High 32 bits, signed by signed.
    pub const MULH: u32 = 1;
    /// High 32 bits, signed by unsigned.
    pub const MULHSU: u32 = 2;
    /// High 32 bits, unsigned by unsigned.
    pub const MULHU: u32 = 3;
    /// Signed quotient.
    pub const DIV: u32 = 4;
    /// Unsigned quotient.
    pub const DIVU: u32 = 5;
    /// Signed remainder.
    pub const REM: u32 = 6;
    /// Unsigned remainder.
    pub const REMU: u32 = 7;
}
