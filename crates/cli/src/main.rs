//! Memory-system simulation CLI.
//!
//! This binary assembles the simulated system and launches a run. It performs:
//! 1. **Configuration:** Loads system settings (defaults, or `--config <json>`), then applies
//!    `--cpu` and `--l2`.
//! 2. **Overrides:** Forwards the cache options (`--l1i_size`, `--l1d_size`, ...) to the
//!    override resolver.
//! 3. **Assembly:** Builds and validates the component graph; prints it with `--dump-graph`.
//! 4. **Run:** Hands the graph and workload to the runtime and reports the exit event.

use std::path::PathBuf;
use std::process;

use clap::{
    Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, Parser, value_parser,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

use memsys_core::config::CpuModel;
use memsys_core::sim::{DryRunRuntime, Simulator, Workload};
use memsys_core::soc::{OptionSpec, OverrideResolver, Overrides, ParamType, ParameterSet};
use memsys_core::{Assembly, AssemblyDriver, AssemblyError, SystemConfig};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Assemble a CPU / L1 / bus / DRAM system and run a workload on it",
    long_about = "Assemble a CPU / L1 / bus / DRAM system and run a workload on it.\n\nCache parameters default to the built-in tables and can be overridden per option.\n\nExamples:\n  sim tests/bin/hello\n  sim --l1d_size 128KiB --l1d_assoc 2 tests/bin/hello\n  sim --l2 --l2_size 1MiB --cpu o3 tests/bin/hello"
)]
struct Cli {
    /// Executable run by the simulated CPU.
    workload: PathBuf,

    /// System configuration file (JSON).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CPU model: minor, timing-simple or o3.
    #[arg(long)]
    cpu: Option<CpuModel>,

    /// Insert an L2 cache between the L1 caches and memory.
    #[arg(long)]
    l2: bool,

    /// Print the assembled graph as JSON before running.
    #[arg(long)]
    dump_graph: bool,

    #[command(flatten)]
    caches: CacheOpts,
}

/// Cache overrides, one long option per entry of the override schema.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CacheOpts {
    overrides: Overrides,
}

impl CacheOpts {
    fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}

/// Placeholder shown in `--help` for an option's declared parameter type.
fn value_name(spec: &OptionSpec) -> &'static str {
    match ParameterSet::with_defaults(spec.kind).declared_type(spec.param) {
        Some(ParamType::Size) => "SIZE",
        Some(ParamType::Cycles) => "CYCLES",
        Some(ParamType::Count) | None => "N",
    }
}

impl Args for CacheOpts {
    fn augment_args(cmd: Command) -> Command {
        OverrideResolver::new()
            .schema()
            .iter()
            .fold(cmd, |cmd, spec| {
                cmd.arg(
                    Arg::new(spec.option)
                        .long(spec.option)
                        .value_name(value_name(spec))
                        .value_parser(value_parser!(String))
                        .action(ArgAction::Set)
                        .help(spec.help),
                )
            })
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

impl FromArgMatches for CacheOpts {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut opts = Self::default();
        opts.update_from_arg_matches(matches)?;
        Ok(opts)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        for spec in OverrideResolver::new().schema() {
            if let Some(raw) = matches.get_one::<String>(spec.option) {
                let _ = self
                    .overrides
                    .insert(spec.option.to_string(), raw.clone());
            }
        }
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "run failed");
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads configuration, assembles the system, and runs the workload.
fn run(cli: &Cli) -> Result<(), AssemblyError> {
    let mut config = match &cli.config {
        Some(path) => SystemConfig::from_file(path)?,
        None => SystemConfig::default(),
    };
    if let Some(cpu) = cli.cpu {
        config.cpu_model = cpu;
    }
    config.two_level |= cli.l2;

    let assembly = AssemblyDriver::new(config).assemble(cli.caches.overrides())?;
    print_summary(&assembly);

    if cli.dump_graph {
        let json = serde_json::to_string_pretty(&assembly)
            .map_err(|e| AssemblyError::Runtime(e.to_string()))?;
        println!("{json}");
    }

    let workload = Workload::locate(&cli.workload)?;
    let simulator = Simulator::new(assembly, workload);
    let mut runtime = DryRunRuntime;

    println!("Beginning simulation!");
    let exit = simulator.run(&mut runtime)?;
    println!("{exit}");
    Ok(())
}

/// Prints the system settings and every component's resolved parameters.
fn print_summary(assembly: &Assembly) {
    let config = &assembly.config;
    println!("System Configuration");
    println!("--------------------");
    println!(
        "  Clock:     {} MHz ({} ticks/cycle)",
        config.clock_hz / 1_000_000,
        config.clock_period_ticks()
    );
    println!("  Mem Mode:  {:?}", config.mem_mode);
    println!("  CPU:       {}", config.cpu_model);
    println!("  DRAM:      {}", config.dram);
    println!(
        "  Hierarchy: {}",
        if config.two_level {
            "L1 + L2"
        } else {
            "L1 only"
        }
    );
    println!("Components:");
    for component in assembly.graph.iter() {
        let params: Vec<String> = component
            .params()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        println!(
            "  {:<9} {:<19} {}",
            component.name(),
            component.kind().name(),
            params.join(" ")
        );
    }
    println!("--------------------");
}
