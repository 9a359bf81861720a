mod cli;
mod config;
mod db;
mod error;
mod export;
mod insights;
mod ledger;
mod models;
mod report;
mod store;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_logging();

    let (config, args) = config::Config::from_args(std::env::args().collect())?;
    config.ensure_data_dir()?;
    let db = db::Database::open(&config.db_path())?;
    let mut ledger = ledger::Ledger::open(db)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut session = cli::Session {
        ledger: &mut ledger,
        now: chrono::Local::now().fixed_offset(),
        out: &mut out,
    };
    cli::run(args.get(1..).unwrap_or(&[]), &mut session)
}

/// Diagnostics go to stderr so command output stays clean. `RUST_LOG`
/// overrides the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
