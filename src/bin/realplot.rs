//! realplot - real-time braille bar graph of integers piped on stdin.
//!
//! Run: `seq 1 100 | realplot 0 100`

use anyhow::{bail, Context, Result};
use clap::Parser;
use realplot::app::App;
use realplot::color::color_names;
use realplot::config::{Config, Overrides, PlotConfig};
use realplot::mapping::Bounds;
use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// A simple terminal-based bar graph plotter
#[derive(Parser, Debug)]
#[command(name = "realplot")]
#[command(version)]
#[command(about = "A simple terminal-based bar graph plotter", long_about = None)]
#[command(after_help = color_help())]
struct Cli {
    /// Lower bound
    #[arg(allow_negative_numbers = true)]
    min: i64,

    /// Upper bound
    #[arg(allow_negative_numbers = true)]
    max: i64,

    /// Disable the border
    #[arg(long)]
    no_border: bool,

    /// Color of the border
    #[arg(long, value_name = "COLOR")]
    border_color: Option<String>,

    /// Gradient color stop, top of the screen first (repeatable)
    #[arg(short, long = "color", value_name = "COLOR")]
    colors: Vec<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            no_border: self.no_border,
            border_color: self.border_color.clone(),
            colors: self.colors.clone(),
        }
    }
}

fn color_help() -> String {
    format!(
        "Option COLOR:\n  - Any HEX color (e.g. #ffffff)\n  - Named color: {}",
        color_names()
    )
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<PlotConfig> {
    let bounds = Bounds::new(cli.min, cli.max)?;
    let file = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(path)?,
            None => Config::default(),
        },
    };

    Ok(PlotConfig::resolve(bounds, &file, &cli.overrides())?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    if std::io::stdin().is_terminal() {
        bail!("requires stdin from pipe to function");
    }

    let config = load_config(&cli)?;
    let mut app = App::new(config)?;
    tracing::info!(min = cli.min, max = cli.max, "starting");

    let result = app.run();

    for err in app.drain_errors() {
        eprintln!("realplot: {err}");
    }

    if let Err(e) = result {
        tracing::error!(%e, "terminated");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
