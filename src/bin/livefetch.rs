//! livefetch - Neofetch-style system dashboard with live updates.
//!
//! Usage:
//!   livefetch                  # refresh every second
//!   livefetch -r 0.5           # refresh every half second
//!   livefetch -a ./logo.txt    # custom ASCII art
//!   livefetch -c config.json   # load/save configuration here
//!   livefetch -s 80            # resize the terminal to 80x80 first

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::SetSize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use livefetch::art;
use livefetch::collector::Collector;
use livefetch::config::DisplayConfig;
use livefetch::tui::App;

/// Neofetch-style system dashboard with live updates.
#[derive(Parser)]
#[command(name = "livefetch", about = "Live system dashboard", version)]
struct Args {
    /// Refresh rate in seconds. Overrides the config file value.
    #[arg(short, long, value_name = "SECONDS")]
    refresh: Option<f64>,

    /// Path to a custom ASCII art file.
    #[arg(short, long, value_name = "PATH")]
    ascii: Option<PathBuf>,

    /// Path to a configuration file (JSON).
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Resize the terminal to a square of this many cells before starting.
    #[arg(short, long, value_name = "CELLS")]
    square: Option<u16>,
}

fn main() {
    let args = Args::parse();
    init_tracing();

    if !sysinfo::IS_SUPPORTED_SYSTEM {
        eprintln!("Error: this platform is not supported by the metrics backend");
        std::process::exit(1);
    }

    if let Some(cells) = args.square {
        if let Err(e) = execute!(std::io::stdout(), SetSize(cells, cells)) {
            eprintln!("Warning: could not resize terminal to {0}x{0}: {1}", cells, e);
            eprintln!("The program will continue with the current terminal size.");
            thread::sleep(Duration::from_secs(2));
        }
    }

    let mut config = match &args.config {
        Some(path) => DisplayConfig::load(path),
        None => DisplayConfig::default(),
    };
    if let Some(refresh) = args.refresh {
        config.refresh_rate = refresh;
    }

    let collector = Collector::new();
    if !collector.gpu_available() {
        eprintln!("Warning: no GPU source responded. GPU monitoring is disabled.");
        thread::sleep(Duration::from_secs(2));
    }

    let art = art::art_for(args.ascii.as_deref());

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
        warn!(error = %e, "could not install interrupt handler");
    }

    let app = App::new(collector, config, art, args.config, interrupted);
    if let Err(e) = app.run() {
        eprintln!("Error running livefetch: {}", e);
        std::process::exit(1);
    }
}

/// Sends logs to a file in the temp directory so raw-mode terminal
/// output stays clean. Active only when `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let path = std::env::temp_dir().join("livefetch.log");
    let Ok(file) = File::create(&path) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}
