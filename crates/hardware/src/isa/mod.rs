//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic, organized
//! by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `privileged`: CSR access and environment calls.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for all RISC-V instruction formats.
pub mod decode;

/// `Display` implementation for decoded instructions.
pub mod disasm;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// System instruction and CSR definitions.
pub mod privileged;

/// Base integer instruction set.
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;
