//! digital-prefs - color scheme and key-binding tool for Digital
//!
//! Lists, inspects and edits the color schemes and key bindings used by the
//! circuit editor, from scripts or a terminal.

use clap::{Parser, Subcommand};
use digital_prefs::cli::{KeybindsArgs, SchemeArgs};
use digital_prefs::constants::{APP_BINARY_NAME, APP_NAME};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Color schemes and key bindings for Digital
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect and select color schemes
    Scheme(SchemeArgs),
    /// Inspect and edit key bindings
    Keybinds(KeybindsArgs),
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Scheme(args) => args.execute(),
        Command::Keybinds(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code().code());
    }
}
