use anyhow::{Context, Result};
use blockdrop::theme::Theme;
use blockdrop::{App, GameConfig};
use clap::Parser;
use log::warn;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = Theme::load(args.theme.as_deref()).unwrap_or_else(|e| {
        warn!("theme not loaded, using defaults: {}", e);
        Theme::default()
    });
    let config = GameConfig {
        seed: args.seed,
        drop_interval: Duration::from_millis(args.drop_interval_ms),
    };
    let mut app = App::new(&config, theme);
    app.run()?;
    Ok(())
}

/// The TUI owns the terminal, so logs only ever go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_module_path(false)
        .init();
    Ok(())
}

/// Classic falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockdrop",
    version,
    about = "Classic falling-block puzzle in the terminal. Fill whole rows to clear them; 100 points per row.",
    long_about = "blockdrop is a terminal falling-block puzzle on a 10x20 board.\n\n\
        Pieces fall one row every 500 ms. Complete a horizontal row to clear it for 100 points. \
        The game ends when a new piece cannot be placed.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move     Up, k or Space  Rotate\n  Down or j          Soft drop\n  \
        P / Esc            Pause    R               Restart    Q / Ctrl-C  Quit"
)]
struct Args {
    /// Seed for piece generation (same seed, same sequence of pieces).
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Milliseconds between automatic one-row drops.
    #[arg(long, default_value = "500", value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    drop_interval_ms: u64,

    /// Path to theme file (btop-style theme[key]="value"; keys piece0..piece6, bg, grid, main_fg, title).
    #[arg(short, long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}
