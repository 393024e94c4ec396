//! Configuration system for the simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (RAM, console, queue and buffer capacities).
//! 2. **Structures:** Hierarchical config for general, memory and pipeline settings.
//! 3. **Enums:** Backend and branch predictor selection.
//! 4. **Loading:** JSON parsing and validation.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with
//! `Config::default()`. Every field is optional in JSON and falls back to the
//! value in `defaults`.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of main system RAM and the default reset PC.
    pub const RAM_BASE: u32 = 0x8000_0000;

    /// Total size of main system RAM (16 MiB).
    pub const RAM_SIZE: usize = 16 * 1024 * 1024;

    /// Address of the console transmit register.
    pub const CONSOLE_ADDR: u32 = 0x1000_0000;

    /// Upper bound on simulated cycles before the run is abandoned.
    pub const MAX_CYCLES: u64 = 100_000_000;

    /// Decoded-instruction queue between fetch and issue.
    pub const ISSUE_QUEUE_SIZE: usize = 4;

    /// Reorder buffer entries.
    pub const ROB_SIZE: usize = 16;

    /// Reservation station entries.
    pub const RS_SIZE: usize = 8;

    /// Default Branch Target Buffer size (64 entries).
    pub const BTB_SIZE: usize = 64;

    /// Default branch history register width in bits.
    pub const BHR_SIZE: u32 = 8;

    /// Widest supported branch history register.
    pub const BHR_MAX: u32 = 16;

    /// Functional-unit latencies in cycles.
    pub const ALU_LATENCY: u32 = 2;
    pub const BRANCH_LATENCY: u32 = 1;
    pub const LSU_LATENCY: u32 = 3;
    pub const SFU_LATENCY: u32 = 1;
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The JSON was malformed or had the wrong shape.
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its permitted range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Execution backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Backend {
    /// Classic five-stage in-order pipeline with forwarding.
    #[serde(alias = "inorder", alias = "in-order")]
    InOrder,
    /// Tomasulo-style out-of-order engine with a reorder buffer.
    #[default]
    #[serde(alias = "o3", alias = "O3", alias = "ooo")]
    OutOfOrder,
}

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predict fall-through.
    #[default]
    Static,
    /// Global history branch predictor (gshare), counters start strongly not-taken.
    #[serde(alias = "Gshare")]
    GShare,
    /// GShare with counters starting weakly taken.
    #[serde(alias = "GShare+", alias = "GsharePlus")]
    GSharePlus,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use rvooo_core::config::{Backend, BranchPredictor, Config};
///
/// let config = Config::from_json_str(r#"{
///     "general": { "max_cycles": 5000 },
///     "pipeline": { "backend": "InOrder", "branch_predictor": "GShare", "rob_size": 32 }
/// }"#).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.pipeline.backend, Backend::InOrder);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
/// assert_eq!(config.pipeline.rs_size, 8);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map settings.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline structure settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks capacities, latencies and predictor geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        let nonzero = [
            ("pipeline.issue_queue_size", p.issue_queue_size),
            ("pipeline.rob_size", p.rob_size),
            ("pipeline.rs_size", p.rs_size),
            ("memory.ram_size", self.memory.ram_size),
        ];
        for (name, value) in nonzero {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-zero")));
            }
        }
        if !p.btb_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "pipeline.btb_size must be a power of two, got {}",
                p.btb_size
            )));
        }
        if p.bhr_size == 0 || p.bhr_size > defaults::BHR_MAX {
            return Err(ConfigError::Invalid(format!(
                "pipeline.bhr_size must be in 1..={}, got {}",
                defaults::BHR_MAX,
                p.bhr_size
            )));
        }
        let l = &p.latencies;
        if l.alu == 0 || l.branch == 0 || l.lsu == 0 || l.sfu == 0 {
            return Err(ConfigError::Invalid(
                "functional-unit latencies must be at least 1 cycle".into(),
            ));
        }
        let ram_end = self.memory.ram_base as u64 + self.memory.ram_size as u64;
        if ram_end > 1 << 32 {
            return Err(ConfigError::Invalid(
                "RAM must fit in the 32-bit address space".into(),
            ));
        }
        let console = self.memory.console_addr as u64;
        if console >= self.memory.ram_base as u64 && console < ram_end {
            return Err(ConfigError::Invalid(
                "memory.console_addr overlaps RAM".into(),
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log every pipeline event at `trace` level.
    #[serde(default)]
    pub trace_instructions: bool,

    /// PC used for raw binaries (ELF files supply their own entry point).
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycle budget; exceeding it ends the run with an error.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// riscv-tests convention: exit code is `1 - gp`, so a pass reports 0.
    #[serde(default)]
    pub riscv_test: bool,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::RAM_BASE
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_pc: defaults::RAM_BASE,
            max_cycles: defaults::MAX_CYCLES,
            riscv_test: false,
        }
    }
}

/// Memory map settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Physical base address of RAM.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,

    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,

    /// Address of the console transmit register.
    #[serde(default = "MemoryConfig::default_console_addr")]
    pub console_addr: u32,

    /// Print console output to stdout as it is produced.
    #[serde(default = "MemoryConfig::default_console_echo")]
    pub console_echo: bool,
}

impl MemoryConfig {
    fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }

    fn default_console_addr() -> u32 {
        defaults::CONSOLE_ADDR
    }

    fn default_console_echo() -> bool {
        true
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            console_addr: defaults::CONSOLE_ADDR,
            console_echo: true,
        }
    }
}

/// Pipeline structure settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Execution backend.
    #[serde(default)]
    pub backend: Backend,

    /// Capacity of the decoded-instruction queue.
    #[serde(default = "PipelineConfig::default_issue_queue_size")]
    pub issue_queue_size: usize,

    /// Reorder buffer entries.
    #[serde(default = "PipelineConfig::default_rob_size")]
    pub rob_size: usize,

    /// Reservation station entries.
    #[serde(default = "PipelineConfig::default_rs_size")]
    pub rs_size: usize,

    /// Branch predictor algorithm.
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// BTB entries (power of two).
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,

    /// Branch history register width in bits.
    #[serde(default = "PipelineConfig::default_bhr_size")]
    pub bhr_size: u32,

    /// Functional-unit latencies.
    #[serde(default)]
    pub latencies: LatencyConfig,
}

impl PipelineConfig {
    fn default_issue_queue_size() -> usize {
        defaults::ISSUE_QUEUE_SIZE
    }

    fn default_rob_size() -> usize {
        defaults::ROB_SIZE
    }

    fn default_rs_size() -> usize {
        defaults::RS_SIZE
    }

    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }

    fn default_bhr_size() -> u32 {
        defaults::BHR_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            issue_queue_size: defaults::ISSUE_QUEUE_SIZE,
            rob_size: defaults::ROB_SIZE,
            rs_size: defaults::RS_SIZE,
            branch_predictor: BranchPredictor::default(),
            btb_size: defaults::BTB_SIZE,
            bhr_size: defaults::BHR_SIZE,
            latencies: LatencyConfig::default(),
        }
    }
}

/// Cycles each functional-unit class takes from dispatch to result.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatencyConfig {
    /// Integer ALU (including multiply/divide).
    #[serde(default = "LatencyConfig::default_alu")]
    pub alu: u32,
    /// Branch unit.
    #[serde(default = "LatencyConfig::default_branch")]
    pub branch: u32,
    /// Load/store unit.
    #[serde(default = "LatencyConfig::default_lsu")]
    pub lsu: u32,
    /// System unit (CSR, fence, environment calls).
    #[serde(default = "LatencyConfig::default_sfu")]
    pub sfu: u32,
}

impl LatencyConfig {
    fn default_alu() -> u32 {
        defaults::ALU_LATENCY
    }

    fn default_branch() -> u32 {
        defaults::BRANCH_LATENCY
    }

    fn default_lsu() -> u32 {
        defaults::LSU_LATENCY
    }

    fn default_sfu() -> u32 {
        defaults::SFU_LATENCY
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_LATENCY,
            branch: defaults::BRANCH_LATENCY,
            lsu: defaults::LSU_LATENCY,
            sfu: defaults::SFU_LATENCY,
        }
    }
}
