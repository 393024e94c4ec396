use rvooo_core::Simulator;
use rvooo_core::common::SimError;
use rvooo_core::config::{Backend, Config};
use rvooo_core::soc::System;
use rvooo_core::stats::SimStats;
use tracing_subscriber::EnvFilter;

/// Base address programs are loaded at (the default RAM base and start PC).
pub const PROGRAM_BASE: u32 = 0x8000_0000;

/// Default cycle budget for `run_to_exit`.
const DEFAULT_BUDGET: u64 = 100_000;

/// Owns a simulator built from a test configuration.
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_backend(backend: Backend) -> Self {
        let mut config = Config::default();
        config.pipeline.backend = backend;
        Self::with_config(config)
    }

    pub fn with_config(mut config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();

        config.memory.console_echo = false;
        config.general.max_cycles = config.general.max_cycles.min(DEFAULT_BUDGET);
        let system = System::new(&config);
        Self {
            sim: Simulator::new(system, &config),
        }
    }

    /// Writes `instructions` to memory starting at [`PROGRAM_BASE`].
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        let bytes: Vec<u8> = instructions.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.sim
            .cpu
            .bus
            .load_binary_at(&bytes, PROGRAM_BASE)
            .expect("program fits in RAM");
        self
    }

    /// Writes a data word before the run starts.
    pub fn poke(mut self, addr: u32, val: u32) -> Self {
        self.sim.cpu.bus.write_u32(addr, val).expect("address is mapped");
        self
    }

    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    pub fn stats(&self) -> &SimStats {
        &self.sim.cpu.stats
    }

    /// Runs until exit, a fault, or the configured cycle budget.
    pub fn run(&mut self) -> Result<i32, SimError> {
        self.sim.run()
    }

    /// Runs until exit and panics on any fault.
    pub fn run_to_exit(&mut self) -> i32 {
        match self.sim.run() {
            Ok(code) => code,
            Err(e) => {
                self.sim.cpu.regs.dump();
                panic!("simulation failed: {e}");
            }
        }
    }

    /// Runs exactly `cycles` ticks, stopping early on exit.
    pub fn step(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.sim.exited() {
                break;
            }
            self.sim.tick().expect("tick succeeds");
        }
    }
}
