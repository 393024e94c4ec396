//! Program Loader Tests.
//!
//! ELF images are assembled by hand: one ELF32 header followed by a single
//! `PT_LOAD` program header and the segment bytes.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use rvooo_core::config::Config;
use rvooo_core::sim::{LoadError, load_binary, load_program};
use rvooo_core::soc::System;
use rvooo_core::Cpu;

use crate::common::builder::instruction::ecall;
use crate::common::InstructionBuilder as I;

const EM_ARM: u16 = 40;
const EM_RISCV: u16 = 0xF3;
const EHDR_SIZE: u32 = 52;
const PHDR_SIZE: u32 = 32;

/// Builds an ELF32 executable with one loadable segment at `vaddr`.
pub fn elf32(machine: u16, entry: u32, vaddr: u32, words: &[u32]) -> Vec<u8> {
    let payload: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    let size = payload.len() as u32;
    let mut out = Vec::new();

    out.extend_from_slice(b"\x7fELF");
    out.extend_from_slice(&[1, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    out.extend_from_slice(&machine.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&entry.to_le_bytes());
    out.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
    out.extend_from_slice(&40u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    let fields = [1, EHDR_SIZE + PHDR_SIZE, vaddr, vaddr, size, size, 5, 4];
    for field in fields {
        out.extend_from_slice(&field.to_le_bytes());
    }
    out.extend_from_slice(&payload);
    out
}

pub fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn cpu(config: &Config) -> Cpu {
    Cpu::new(System::new(config), config)
}

#[test]
fn elf_segment_is_placed_at_its_address() {
    let config = Config::default();
    let mut cpu = cpu(&config);
    let program = [I::new().addi(3, 0, 9).build(), ecall()];
    let file = write_temp(&elf32(EM_RISCV, 0x8000_0104, 0x8000_0100, &program));

    let entry = load_program(&mut cpu, file.path(), &config).unwrap();
    assert_eq!(entry, 0x8000_0104);
    assert_eq!(cpu.bus.read_u32(0x8000_0100), Ok(program[0]));
    assert_eq!(cpu.bus.read_u32(0x8000_0104), Ok(program[1]));
    assert_eq!(cpu.bus.read_u32(0x8000_0000), Ok(0));
}

#[test]
fn elf_for_another_machine_is_rejected() {
    let config = Config::default();
    let mut cpu = cpu(&config);
    let file = write_temp(&elf32(EM_ARM, 0x8000_0000, 0x8000_0000, &[ecall()]));
    let err = load_program(&mut cpu, file.path(), &config).unwrap_err();
    assert!(matches!(err, LoadError::Architecture(_)), "{err}");
}

#[test]
fn elf_segment_outside_memory_is_a_placement_error() {
    let config = Config::default();
    let mut cpu = cpu(&config);
    let file = write_temp(&elf32(EM_RISCV, 0x2000_0000, 0x2000_0000, &[ecall()]));
    let err = load_program(&mut cpu, file.path(), &config).unwrap_err();
    assert!(matches!(err, LoadError::Placement(_)), "{err}");
}

#[test]
fn raw_image_uses_configured_base_and_start_pc() {
    let mut config = Config::default();
    config.general.start_pc = 0x8000_0008;
    let mut cpu = cpu(&config);
    let file = write_temp(&[0xAA, 0xBB, 0xCC, 0xDD, 0x11]);

    assert_eq!(load_program(&mut cpu, file.path(), &config).unwrap(), 0x8000_0008);
    assert_eq!(cpu.bus.read_u32(0x8000_0000), Ok(0xDDCC_BBAA));
    assert_eq!(cpu.bus.read_u8(0x8000_0004), Ok(0x11));
}

#[test]
fn raw_image_larger_than_ram_is_rejected() {
    let mut config = Config::default();
    config.memory.ram_size = 4;
    let mut cpu = cpu(&config);
    let file = write_temp(&[0; 8]);
    let err = load_program(&mut cpu, file.path(), &config).unwrap_err();
    assert!(matches!(err, LoadError::Placement(_)));
}

#[test]
fn load_binary_returns_file_contents() {
    let file = write_temp(b"rv32");
    assert_eq!(load_binary(file.path()).unwrap(), b"rv32");
}
