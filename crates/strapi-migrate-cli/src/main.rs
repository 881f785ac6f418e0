//! strapi-migrate CLI - copy published entries between two content APIs.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use strapi_migrate::config::{DEFAULT_ENV_FILE, DEFAULT_PAGE_SIZE, DEFAULT_REPORT_FILE};
use strapi_migrate::{Config, MigrateError, MigrationConfig, Orchestrator};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "strapi-migrate")]
#[command(about = "Migrate published entries between two Strapi-style content APIs")]
#[command(version)]
struct Cli {
    /// Collection to migrate (API id, e.g. agenda-formats)
    #[arg(long)]
    collection: String,

    /// Field used to match source entries to existing destination entries
    #[arg(long)]
    match_field: String,

    /// Dry run: compute actions without creating or updating entries
    #[arg(long)]
    dry_run: bool,

    /// Optional dotenv file with the API variables (skipped if missing; the
    /// process environment is used instead)
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Path of the CSV report
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,

    /// Field to copy into the destination payload (repeatable)
    #[arg(long = "field", value_name = "FIELD")]
    fields: Vec<String>,

    /// Entries requested per source page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), MigrateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    Config::load_env_file(&cli.env_file)?;

    let migration = MigrationConfig {
        collection: cli.collection,
        match_field: cli.match_field,
        dry_run: cli.dry_run,
        page_size: Some(cli.page_size),
        payload_fields: if cli.fields.is_empty() {
            None
        } else {
            Some(cli.fields)
        },
        report_path: Some(cli.report),
    };
    let config = Config::from_env(migration)?;
    info!(
        "Migrating {} from {} to {}",
        config.migration.collection, config.source.base_url, config.destination.base_url
    );

    let orchestrator = Orchestrator::new(config)?;
    let result = orchestrator.run().await?;

    if cli.output_json {
        println!("{}", result.to_json()?);
    } else {
        let status_msg = if result.dry_run {
            "Dry run completed!"
        } else {
            "Migration completed!"
        };
        println!("\n{}", status_msg);
        println!("  Run ID: {}", result.run_id);
        println!("  Collection: {}", result.collection);
        println!("  Duration: {:.2}s", result.duration_seconds);
        println!("  Entries: {}", result.entries_total);
        println!("  Created: {}", result.created);
        println!("  Updated: {}", result.updated);
        println!("  Failed: {}", result.failed);
        println!("  Report: {}", result.report_path.display());
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
