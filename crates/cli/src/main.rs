//! RISC-V out-of-order simulator CLI.
//!
//! This binary loads a bare-metal RV32IM program and runs it on the selected
//! pipeline. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then flag overrides.
//! 2. **Run:** Loads an ELF or raw binary and ticks until the program exits.
//! 3. **Report:** Prints the requested statistics sections and exits with the program's code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use rvooo_core::config::{Backend, BranchPredictor, Config};
use rvooo_core::sim::Simulator;
use rvooo_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "rvooo",
    author,
    version,
    about = "Cycle-accurate RV32IM simulator with in-order and Tomasulo backends",
    long_about = "Run a bare-metal RV32IM program on the in-order or out-of-order pipeline.\n\nExamples:\n  rvooo run -f tests/fib.elf\n  rvooo run -f prog.bin --backend in-order --predictor gshare --stats summary,branch"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single program to completion.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Program to execute (ELF32 or raw binary loaded at RAM base).
    #[arg(short, long)]
    file: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipeline backend.
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Branch predictor.
    #[arg(long, value_enum)]
    predictor: Option<PredictorArg>,

    /// Abort after this many cycles.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// riscv-tests exit convention (exit code is `1 - gp`).
    #[arg(long)]
    riscv_test: bool,

    /// Log every pipeline event.
    #[arg(long)]
    trace: bool,

    /// Comma-separated statistics sections to print (default: all).
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,

    /// Print only the one-line PERF summary.
    #[arg(long)]
    perf: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    InOrder,
    OutOfOrder,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PredictorArg {
    Static,
    Gshare,
    GsharePlus,
}

fn init_tracing(trace: bool) {
    let default = if trace { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &RunArgs) -> Result<Config, String> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    if let Some(backend) = args.backend {
        config.pipeline.backend = match backend {
            BackendArg::InOrder => Backend::InOrder,
            BackendArg::OutOfOrder => Backend::OutOfOrder,
        };
    }
    if let Some(predictor) = args.predictor {
        config.pipeline.branch_predictor = match predictor {
            PredictorArg::Static => BranchPredictor::Static,
            PredictorArg::Gshare => BranchPredictor::GShare,
            PredictorArg::GsharePlus => BranchPredictor::GSharePlus,
        };
    }
    if let Some(max) = args.max_cycles {
        config.general.max_cycles = max;
    }
    config.general.riscv_test |= args.riscv_test;
    config.general.trace_instructions |= args.trace;
    config.validate().map_err(|e| e.to_string())?;

    if let Some(bad) = args
        .stats
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        return Err(format!(
            "unknown stats section '{bad}' (expected one of: {})",
            STATS_SECTIONS.join(", ")
        ));
    }
    Ok(config)
}

fn cmd_run(args: &RunArgs) -> ExitCode {
    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    init_tracing(config.general.trace_instructions);

    let mut sim = match Simulator::from_program(&config, &args.file) {
        Ok(sim) => sim,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let outcome = sim.run();
    if args.perf {
        println!("{}", sim.cpu.stats.perf_line());
    } else {
        sim.cpu.stats.print_sections(&args.stats);
    }

    match outcome {
        Ok(code) => {
            println!("[*] Exit code {code}");
            ExitCode::from(code as u8)
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {e}");
            sim.cpu.regs.dump();
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Run(args) => cmd_run(args),
    }
}
