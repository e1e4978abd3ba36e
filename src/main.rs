use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use clockpick::config::{load_picker_config, validate_dial_radius};
use clockpick::{diagnostics, ui};

#[derive(Parser, Debug)]
#[command(
    name = "clockpick",
    version,
    about = "Clock-face time picker bound to a single HH:MM AM|PM field"
)]
struct Cli {
    #[arg(long, default_value = "timepicker.json")]
    config: PathBuf,

    /// Field value to start from instead of the persisted one.
    #[arg(long)]
    value: Option<String>,

    #[arg(long)]
    dial_radius: Option<f32>,

    /// Print the rendered state and clock geometry, then exit.
    #[arg(long)]
    check: bool,

    #[arg(long)]
    no_persist: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_picker_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(value) = cli.value {
        config.value = value;
    }
    if let Some(radius) = cli.dial_radius {
        validate_dial_radius(radius).context("invalid --dial-radius")?;
        config.dial_radius = radius;
    }
    if cli.no_persist {
        config.persist = false;
    }

    if cli.check {
        return diagnostics::run_check(&config);
    }

    ui::app::run_gui(config, cli.config)
}
