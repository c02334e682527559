//! libcat-manager binary entry point.
//!
//! Parses startup flags, initializes logging, seeds the bootstrap
//! administrator and runs the interactive loop on stdin/stdout.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use libcat_manager::app::{self, AppState};
use libcat_manager::catalog::Catalog;
use libcat_manager::ui::Console;

/// Startup options. State is memory-only; these only shape the initial
/// catalog.
#[derive(Debug, Parser)]
#[command(name = "libcat-manager", version, about)]
struct Cli {
    /// Username of the bootstrap administrator account.
    #[arg(long, env = "LIBCAT_ADMIN_USER", default_value = "admin")]
    admin_user: String,

    /// Seed the catalog with a few sample books.
    #[arg(long)]
    sample_data: bool,
}

/// Program entry point: run the console loop and report any top-level
/// error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the console UI.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut catalog = Catalog::new();
    catalog.add_user(&cli.admin_user, true);
    if cli.sample_data {
        catalog.add_book("The Trial", "Franz Kafka", 1925);
        catalog.add_book("Dune", "Frank Herbert", 1965);
        catalog.add_book("The Left Hand of Darkness", "Ursula K. Le Guin", 1969);
    }
    tracing::info!(admin = %cli.admin_user, sample_data = cli.sample_data, "starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    let mut state = AppState::new(catalog);

    let res = app::run(&mut console, &mut state);

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
