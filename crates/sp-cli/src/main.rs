use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sp_core::{
    ArityOrder, DEFAULT_RATE, PRESETS_ENV, PlanRequest, PresetTable, export_json,
    export_no_solution_json, plan, render_no_solution, render_report,
};

#[derive(Parser)]
#[command(
    name = "splitplan",
    about = "Plan a chain of 2-way and 3-way splitters that carves a target share out of a power stream"
)]
struct Cli {
    /// Battery output power (W)
    #[arg(long)]
    energy: Option<u64>,

    /// Battery duration (s)
    #[arg(long)]
    time: Option<u64>,

    /// Target power (W)
    #[arg(long, default_value_t = 0)]
    target: u64,

    /// Maximum number of gates
    #[arg(long = "max", default_value_t = 0)]
    max_gates: u32,

    /// Battery generation rate (batteries/s), rational like 0.5 or 1/2
    #[arg(short = 't', long = "t", default_value = DEFAULT_RATE)]
    rate: String,

    /// Take energy and time from a named preset
    #[arg(long)]
    preset: Option<String>,

    /// Extra presets file (TOML)
    #[arg(long, env = PRESETS_ENV)]
    presets: Option<PathBuf>,

    /// Gate ordering along the chain: ternary-first or binary-first
    #[arg(long, default_value_t = ArityOrder::default())]
    arity_order: ArityOrder,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,

    /// List available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Enable verbose debug output
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let presets = load_presets(cli.presets.as_deref())?;

    if cli.list_presets {
        cmd_list_presets(&presets);
        return Ok(());
    }

    let request = build_request(cli, &presets)?;
    cmd_plan(&request, cli.json)
}

fn load_presets(path: Option<&Path>) -> Result<PresetTable> {
    let mut table = PresetTable::builtin();
    if let Some(path) = path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read presets file {}", path.display()))?;
        let count = table
            .merge_toml(&content)
            .with_context(|| format!("failed to load presets from {}", path.display()))?;
        tracing::info!("loaded {count} presets from {}", path.display());
    }
    Ok(table)
}

/// Explicit --energy/--time win over the preset's values.
fn build_request(cli: &Cli, presets: &PresetTable) -> Result<PlanRequest> {
    let preset = cli
        .preset
        .as_deref()
        .map(|name| presets.get(name))
        .transpose()?;

    let energy = cli.energy.or(preset.map(|p| p.energy)).unwrap_or(0);
    let time = cli.time.or(preset.map(|p| p.time)).unwrap_or(0);

    Ok(PlanRequest {
        energy,
        time,
        rate: cli.rate.clone(),
        target: cli.target,
        max_gates: cli.max_gates,
        arity_order: cli.arity_order,
    })
}

fn cmd_plan(request: &PlanRequest, json: bool) -> Result<()> {
    match plan(request) {
        Ok(plan) => {
            if json {
                let out = export_json(&plan).context("failed to serialize plan")?;
                println!("{out}");
            } else {
                print!("{}", render_report(&plan));
            }
            Ok(())
        }
        Err(e) if e.is_informational() => {
            tracing::debug!("no solution: {}", e.detail());
            if json {
                let out = export_no_solution_json(&e).context("failed to serialize outcome")?;
                println!("{out}");
            } else {
                print!("{}", render_no_solution(&e));
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_list_presets(presets: &PresetTable) {
    println!("{:<16} {:>8} {:>6}", "preset", "energy", "time");
    for (name, preset) in presets.iter() {
        println!("{name:<16} {:>8} {:>6}", preset.energy, preset.time);
    }
}
