//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution. It performs:
//! 1. **Operation Classification:** Categorizes ALU, branch, and CSR operations.
//! 2. **Unit Selection:** Names the functional-unit class an instruction executes on.
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Operand Usage:** Records which registers and immediates an instruction reads or writes.

/// ALU operation types for base integer and multiply/divide instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also LUI, AUIPC and address generation).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Integer multiply (low bits).
    Mul,

    /// Integer multiply (high bits, signed × signed).
    Mulh,

    /// Integer multiply (high bits, signed × unsigned).
    Mulhsu,

    /// Integer multiply (high bits, unsigned × unsigned).
    Mulhu,

    /// Integer divide (signed).
    Div,

    /// Integer divide (unsigned).
    Divu,

    /// Integer remainder (signed).
    Rem,

    /// Integer remainder (unsigned).
    Remu,
}

/// Branch conditions and jump kinds evaluated by the branch unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrOp {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Branch if less than (signed).
    Blt,
    /// Branch if greater or equal (signed).
    Bge,
    /// Branch if less than (unsigned).
    Bltu,
    /// Branch if greater or equal (unsigned).
    Bgeu,
    /// PC-relative jump and link.
    Jal,
    /// Register-indirect jump and link.
    Jalr,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,

    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Number of bytes moved by an access of this width.
    pub fn bytes(self) -> u32 {
        match self {
            Self::Nop => 0,
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// CSR (Control and Status Register) operation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CsrOp {
    /// No CSR operation.
    #[default]
    None,

    /// CSR read-write (`CSRRW`, `CSRRWI`).
    Rw,

    /// CSR read-set (`CSRRS`, `CSRRSI`).
    Rs,

    /// CSR read-clear (`CSRRC`, `CSRRCI`).
    Rc,
}

/// Functional-unit class an instruction is dispatched to.
///
/// There is exactly one unit per class in the out-of-order engine; the
/// discriminant doubles as the index into the unit pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FuType {
    /// Integer arithmetic, logic, shifts, multiply/divide, LUI, AUIPC.
    #[default]
    Alu,
    /// Conditional branches and jumps.
    Branch,
    /// Loads and stores.
    Lsu,
    /// CSR access, fences and environment calls.
    Sfu,
}

impl FuType {
    /// Number of functional-unit classes.
    pub const COUNT: usize = 4;

    /// All classes in unit-pool order.
    pub const ALL: [FuType; Self::COUNT] = [Self::Alu, Self::Branch, Self::Lsu, Self::Sfu];

    /// Index of this class in the unit pool.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Control signals for pipeline stage execution.
///
/// Generated once during decode and never modified afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Reads `rs1`.
    pub use_rs1: bool,
    /// Reads `rs2`.
    pub use_rs2: bool,
    /// Writes `rd`. Always false when `rd` is `x0`.
    pub use_rd: bool,
    /// ALU operand B is the immediate instead of `rs2`.
    pub use_imm: bool,
    /// ALU operand A is the instruction's PC instead of `rs1`.
    pub use_pc: bool,
    /// Instruction reads memory.
    pub is_load: bool,
    /// Instruction writes memory.
    pub is_store: bool,
    /// Instruction accesses a CSR.
    pub is_csr: bool,
    /// Instruction may redirect control flow (branch or jump).
    pub is_branch: bool,
    /// Instruction terminates the program when it retires (`ECALL`/`EBREAK`).
    pub is_exit: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Branch condition or jump kind.
    pub br: BrOp,
    /// CSR operation type.
    pub csr_op: CsrOp,
}

impl ControlSignals {
    /// Returns true for operations that must run one at a time in program order.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.is_load || self.is_store || self.is_csr
    }
}
