//! Command-line entry point: parse flags, run the harness, map errors to the exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use upsert_bench::{BackendChoice, Config, LogProgress, MissingKeyPolicy, harness};

/// Time idempotent SQLite upserts through hand-written SQL and a statement builder.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of synthetic records to generate.
    #[arg(long, alias = "rowCount", default_value_t = 10_000)]
    row_count: usize,

    /// Update budget: the first N-1 records are updated; 0 disables the update phase.
    #[arg(long, alias = "updateCount", default_value_t = 1_000)]
    update_count: usize,

    /// Backend(s) to run.
    #[arg(long, value_enum, default_value_t = BackendChoice::DirectSql)]
    backend: BackendChoice,

    /// Run the statement-builder backend (same as `--backend builder`).
    #[arg(long, alias = "useJet", conflicts_with_all = ["backend", "use_both"])]
    use_jet: bool,

    /// Run both backends, wiping the store in between (same as `--backend both`).
    #[arg(long, alias = "useBoth", conflicts_with = "backend")]
    use_both: bool,

    /// Wrap each phase in a single transaction.
    #[arg(long, alias = "useTransaction")]
    use_transaction: bool,

    /// Accepted for compatibility; has no effect on generation.
    #[arg(long, alias = "flipYearBirth")]
    flip_year_birth: bool,

    /// Write a CPU profile (flamegraph SVG) of the run to this file.
    #[arg(long)]
    cpuprofile: Option<PathBuf>,

    /// SQLite store file.
    #[arg(long, default_value = "./data/wl.sqlite")]
    database: PathBuf,

    /// Remove the store file before opening it.
    #[arg(long)]
    recreate: bool,

    /// Seed for reproducible record generation.
    #[arg(long)]
    seed: Option<u64>,

    /// What verification does when a key is missing.
    #[arg(long, value_enum, default_value_t = MissingKeyPolicy::Fatal)]
    on_missing: MissingKeyPolicy,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let backend = if cli.use_jet {
            BackendChoice::Builder
        } else if cli.use_both {
            BackendChoice::Both
        } else {
            cli.backend
        };
        Config {
            row_count: cli.row_count,
            update_count: cli.update_count,
            backend,
            use_transaction: cli.use_transaction,
            flip_year_birth: cli.flip_year_birth,
            cpuprofile: cli.cpuprofile,
            database: cli.database,
            recreate: cli.recreate,
            seed: cli.seed,
            on_missing: cli.on_missing,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from(Cli::parse());
    info!(?config, "execution starting");

    match harness::run(&config, &mut LogProgress::default()) {
        Ok(_) => {
            info!("execution completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("execution failed: {e}");
            ExitCode::FAILURE
        }
    }
}
