//! System Instruction Definitions.
//!
//! - `opcodes`: SYSTEM opcode, ECALL/EBREAK encodings, CSR funct3 codes.
//! - `csr`: Addresses of the CSRs this core models.

/// CSR address constants.
pub mod csr;

/// System instruction opcodes (ECALL, EBREAK, CSR access).
pub mod opcodes;
