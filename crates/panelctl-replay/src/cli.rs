use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use panelctl_core::{PanelConfig, PanelController};

use crate::error::{ReplayError, Result};
use crate::replay::{ReplayOptions, replay};
use crate::trace::parse_trace;

#[derive(Debug, Parser)]
#[command(
    name = "panelctl-replay",
    about = "Replay panel input traces headlessly and print per-frame state as JSON lines",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSON-lines trace.
    Run(RunArgs),

    /// Print built-in preset configurations.
    Presets,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Trace file, one input per line. `-` reads stdin.
    #[arg(long, default_value = "-")]
    pub trace: PathBuf,

    /// Panel config file (`.json`, anything else is read as TOML).
    #[arg(long, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in config preset.
    #[arg(long, default_value = "bottom-sheet")]
    pub preset: String,

    /// Frame time for settle frames.
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Stop at the end of the trace instead of ticking until idle.
    #[arg(long)]
    pub no_settle: bool,

    /// Only print the final summary line.
    #[arg(long)]
    pub summary_only: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_replay(&args, out),
        Commands::Presets => print_presets(out),
    }
}

fn load_config(args: &RunArgs) -> Result<PanelConfig> {
    match &args.config {
        Some(path) => load_config_file(path),
        None => PanelConfig::preset(&args.preset).ok_or_else(|| ReplayError::UnknownPreset {
            name: args.preset.clone(),
        }),
    }
}

fn load_config_file(path: &Path) -> Result<PanelConfig> {
    if !path.exists() {
        return Err(ReplayError::MissingConfig {
            path: path.to_path_buf(),
        });
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        PanelConfig::from_json_file(path)?
    } else {
        PanelConfig::from_toml_file(path)?
    };
    Ok(config)
}

fn run_replay(args: &RunArgs, out: &mut impl Write) -> Result<()> {
    let config = load_config(args)?;
    let mut controller = PanelController::new(config)?;

    let inputs = if args.trace.as_os_str() == "-" {
        parse_trace(io::stdin().lock())?
    } else {
        parse_trace(BufReader::new(File::open(&args.trace)?))?
    };

    let options = ReplayOptions {
        settle: !args.no_settle,
        frame_ms: args.frame_ms,
        ..ReplayOptions::default()
    };
    let summary_only = args.summary_only;
    let summary = replay(&mut controller, &inputs, &options, |sample| {
        if !summary_only {
            serde_json::to_writer(&mut *out, sample)?;
            writeln!(out)?;
        }
        Ok(())
    })?;

    serde_json::to_writer(&mut *out, &serde_json::json!({ "summary": summary }))?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn print_presets(out: &mut impl Write) -> Result<()> {
    for name in PanelConfig::PRESETS {
        if let Some(config) = PanelConfig::preset(name) {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "name": name, "config": config }))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
