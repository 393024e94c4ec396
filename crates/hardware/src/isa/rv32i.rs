//! RV32I encoding fields: major opcodes, `funct3` and `funct7`.

/// Major opcodes, bits `[6:0]`.
pub mod opcodes {
    /// LB, LH, LW, LBU, LHU.
    pub const OP_LOAD: u32 = 0x03;
    /// FENCE, FENCE.I.
    pub const OP_MISC_MEM: u32 = 0x0F;
    /// Register-immediate ALU operations.
    pub const OP_IMM: u32 = 0x13;
    /// AUIPC.
    pub const OP_AUIPC: u32 = 0x17;
    /// SB, SH, SW.
    pub const OP_STORE: u32 = 0x23;
    /// Register-register ALU operations, including the M extension.
    pub const OP_REG: u32 = 0x33;
    /// LUI.
    pub const OP_LUI: u32 = 0x37;
    /// Conditional branches.
    pub const OP_BRANCH: u32 = 0x63;
    /// JALR.
    pub const OP_JALR: u32 = 0x67;
    /// JAL.
    pub const OP_JAL: u32 = 0x6F;
}

/// Minor opcodes, bits `[14:12]`. Values repeat across major opcodes.
pub mod funct3 {
    // Loads
    /// `lb`
    pub const LB: u32 = 0;
    /// `lh`
    pub const LH: u32 = 1;
    /// `lw`
    pub const LW: u32 = 2;
    /// `lbu`
    pub const LBU: u32 = 4;
    /// `lhu`
    pub const LHU: u32 = 5;

    // Stores
    /// `sb`
    pub const SB: u32 = 0;
    /// `sh`
    pub const SH: u32 = 1;
    /// `sw`
    pub const SW: u32 = 2;

    // Branches
    /// `beq`
    pub const BEQ: u32 = 0;
    /// `bne`
    pub const BNE: u32 = 1;
    /// `blt`
    pub const BLT: u32 = 4;
    /// `bge`
    pub const BGE: u32 = 5;
    /// `bltu`
    pub const BLTU: u32 = 6;
    /// `bgeu`
    pub const BGEU: u32 = 7;

    // ALU, shared by OP and OP-IMM
    /// `add`/`sub`/`addi`
    pub const ADD_SUB: u32 = 0;
    /// `sll`/`slli`
    pub const SLL: u32 = 1;
    /// `slt`/`slti`
    pub const SLT: u32 = 2;
    /// `sltu`/`sltiu`
    pub const SLTU: u32 = 3;
    /// `xor`/`xori`
    pub const XOR: u32 = 4;
    /// `srl`/`sra` and their immediate forms, split by `funct7`.
    pub const SRL_SRA: u32 = 5;
    /// `or`/`ori`
    pub const OR: u32 = 6;
    /// `and`/`andi`
    pub const AND: u32 = 7;

    // MISC-MEM
    /// `fence`
    pub const FENCE: u32 = 0;
    /// `fence.i`
    pub const FENCE_I: u32 = 1;
}

/// Bits `[31:25]` of R-type words and of immediate shifts.
pub mod funct7 {
    /// Base encoding (`add`, `srl`, `slli`...).
    pub const DEFAULT: u32 = 0x00;
    /// Selects `sub`.
    pub const SUB: u32 = 0x20;
    /// Selects `sra`/`srai`; same bit as [`SUB`].
    pub const SRA: u32 = SUB;
}
