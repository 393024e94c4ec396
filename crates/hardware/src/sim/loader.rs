//! Program Loader.
//!
//! This module places a program image in simulated memory. It performs:
//! 1. **Binary loading:** Reads the file from disk into a byte buffer.
//! 2. **ELF loading:** Copies every loadable segment of an RV32 ELF file to its
//!    physical address and reports the entry point.
//! 3. **Raw fallback:** Anything else is copied verbatim to the start of RAM and
//!    starts at the configured PC.

use std::fs;
use std::path::{Path, PathBuf};

use object::{Architecture, Object, ObjectSegment};
use thiserror::Error;
use tracing::debug;

use crate::common::error::BusFault;
use crate::config::Config;
use crate::core::Cpu;

const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Failures while reading or placing a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not read {}: {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file looks like ELF but could not be parsed.
    #[error("malformed ELF file: {0}")]
    Elf(String),

    /// The ELF file is not an RV32 executable.
    #[error("ELF file targets {0:?}, expected 32-bit RISC-V")]
    Architecture(Architecture),

    /// Part of the image falls outside mapped memory.
    #[error("program image does not fit in memory: {0}")]
    Placement(#[from] BusFault),
}

/// Reads a binary file from disk into a byte vector.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read.
pub fn load_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the program at `path` into `cpu`'s memory and returns its entry PC.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is a malformed or non-RV32 ELF
/// file, or does not fit in the configured memory map.
pub fn load_program(cpu: &mut Cpu, path: impl AsRef<Path>, config: &Config) -> Result<u32, LoadError> {
    let data = load_binary(path)?;
    if data.starts_with(ELF_MAGIC) {
        load_elf(cpu, &data)
    } else {
        debug!(
            bytes = data.len(),
            base = format_args!("{:#010x}", config.memory.ram_base),
            "loading raw binary"
        );
        cpu.bus.load_binary_at(&data, config.memory.ram_base)?;
        Ok(config.general.start_pc)
    }
}

fn load_elf(cpu: &mut Cpu, data: &[u8]) -> Result<u32, LoadError> {
    let file = object::File::parse(data).map_err(|e| LoadError::Elf(e.to_string()))?;
    if file.architecture() != Architecture::Riscv32 {
        return Err(LoadError::Architecture(file.architecture()));
    }

    for segment in file.segments() {
        let bytes = segment.data().map_err(|e| LoadError::Elf(e.to_string()))?;
        if bytes.is_empty() {
            continue;
        }
        let addr = segment.address() as u32;
        debug!(
            addr = format_args!("{addr:#010x}"),
            size = bytes.len(),
            "loading ELF segment"
        );
        cpu.bus.load_binary_at(bytes, addr)?;
    }
    Ok(file.entry() as u32)
}
