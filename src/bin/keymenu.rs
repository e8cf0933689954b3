// Keymenu CLI
// Terminal host for the settings overlay and its keybinds

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use keymenu::tui::{self, App};
use keymenu_core::{ConfigStore, KeybindContext, PassThroughKeys, ScanCode};

/// Keybind settings overlay
#[derive(Parser, Debug)]
#[command(name = "keymenu")]
#[command(version)]
#[command(about = "Keybind settings overlay", long_about = None)]
struct Args {
    /// TOML configuration file (defaults to ~/.config/keymenu/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Write log output to this file while the terminal UI runs
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Key let through the focused menu while Alt is held (name or scan code)
    #[arg(long, value_name = "KEY")]
    allow_through_alt: Option<ScanCode>,

    /// Key let through the focused menu while Shift is held (name or scan code)
    #[arg(long, value_name = "KEY")]
    allow_through_shift: Option<ScanCode>,

    /// Print the resolved keybinds and exit
    #[arg(long)]
    check_config: bool,
}

impl Args {
    /// `[Menu]` values from the config, overridden by the command line
    fn pass_through(&self, store: &ConfigStore) -> PassThroughKeys {
        let mut keys = store.pass_through_keys();
        if let Some(code) = self.allow_through_alt {
            keys.allow_through_alt = code;
        }
        if let Some(code) = self.allow_through_shift {
            keys.allow_through_shift = code;
        }
        keys
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !args.check_config {
        // stderr would garble the terminal UI
        builder.filter_level(LevelFilter::Off);
    }
    builder.init();
    Ok(())
}

fn check_config(app: &App, pass_through: PassThroughKeys) {
    println!("Configuration is valid");
    for info in app.context.registry.snapshot() {
        let chord = if info.display_string.is_empty() {
            "unset"
        } else {
            info.display_string.as_str()
        };
        println!("  [{}] {} ({}): {}", info.category, info.display_name, info.nickname, chord);
    }
    println!(
        "  allow through: alt={} shift={}",
        pass_through.allow_through_alt, pass_through.allow_through_shift
    );
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let path = match args.config.clone() {
        Some(path) => path,
        None => ConfigStore::default_path().context("no config directory available, pass --config")?,
    };
    let store = ConfigStore::load(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    let pass_through = args.pass_through(&store);
    log::debug!("loaded config from {}", path.display());

    let context = KeybindContext::new(store.into_shared());
    let mut app = App::new(context, pass_through).context("failed to set up keybinds")?;

    if args.check_config {
        check_config(&app, pass_through);
        return Ok(());
    }

    tui::run(&mut app).context("terminal UI failed")
}
