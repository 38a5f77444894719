use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use pg_catalog_diff::config::{self, ConfigBuilder};
use pg_catalog_diff::db::connection::connect_with_retry;
use pg_catalog_diff::pipeline;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Computes an executable migration script that transforms `main`'s
/// catalog into `branch`'s catalog.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Connection string for the database to migrate from
    main_dsn: String,

    /// Connection string for the database to migrate to
    branch_dsn: String,

    /// Path to a configuration file describing filter/masking overrides
    #[arg(long, default_value = "pgmt.yaml")]
    config: String,

    /// Write the generated script to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    let result = tokio::select! {
        result = run(&cli) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, aborting before any output was written");
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }

    result
}

async fn run(cli: &Cli) -> Result<()> {
    let config_input = config::load_config(&cli.config)
        .with_context(|| format!("failed to read config file {}", cli.config))?;
    let config = ConfigBuilder::new().with_file(config_input).build();

    info!("Connecting to main database");
    let main_pool = connect_with_retry(&cli.main_dsn)
        .await
        .context("failed to connect to main database")?;

    info!("Connecting to branch database");
    let branch_pool = connect_with_retry(&cli.branch_dsn)
        .await
        .context("failed to connect to branch database")?;

    let script = pipeline::run(&main_pool, &branch_pool, &config).await?;

    match &cli.out {
        Some(path) => {
            std::fs::write(path, script).with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => println!("{}", script),
    }

    Ok(())
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt().with_env_filter(filter).with_target(false).init();
}
