//! Command implementation for the customer loader CLI
//!
//! Sets up logging, resolves configuration, runs the load pipeline against
//! SQLite (or an in-memory store for dry runs) and prints the final report.

use crate::app::services::pipeline::{LoadPipeline, RunSummary};
use crate::app::services::table_store::{Connector, MemoryConnector, SqliteConnector};
use crate::cli::args::Args;
use crate::config::Config;
use crate::Result;
use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging and configuration
/// 2. Pick the destination store
/// 3. Load the extract
/// 4. Report what was loaded
pub fn run(args: Args) -> Result<RunSummary> {
    setup_logging(&args)?;

    info!("Starting customer loader");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let summary = if args.dry_run {
        info!("Dry run - nothing will be written to {}", config.database.url);
        let connector = MemoryConnector::new();
        run_with(connector, &config, &args)?
    } else {
        let connector = SqliteConnector::from_config(&config.database);
        run_with(connector, &config, &args)?
    };

    if !args.quiet {
        generate_final_report(&summary, args.dry_run);
    }

    Ok(summary)
}

fn run_with<C: Connector>(connector: C, config: &Config, args: &Args) -> Result<RunSummary> {
    info!("Destination: {}", connector.describe());
    LoadPipeline::new(connector, config)
        .with_progress(args.show_progress())
        .run(&args.input)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("customer_loader={}", log_level)));

    // A subscriber may already be installed when run more than once in-process
    let installed = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(database) = &args.database {
        config.database.url = database.clone();
    }
    if let Some(policy) = args.malformed_lines {
        config.processing.malformed_lines = policy;
    }
    if let Some(date) = args.reference_date {
        config.processing.reference_date = Some(date);
    }
}

/// Print the human-readable run report
fn generate_final_report(summary: &RunSummary, dry_run: bool) {
    let title = if dry_run {
        "Dry Run Complete (nothing written)"
    } else {
        "Customer Load Complete"
    };

    println!("\n{}", title.bright_green().bold());
    println!("{}", "=".repeat(40));
    println!(
        "  {} {}",
        "Reference date:".bright_cyan(),
        summary.reference_date
    );
    println!(
        "  {} {} ({} skipped as malformed)",
        "Lines read:".bright_cyan(),
        summary.parse.total_lines.to_string().bright_white().bold(),
        summary.parse.lines_skipped
    );

    let processing = &summary.processing;
    println!(
        "  {} {}",
        "Detail records:".bright_cyan(),
        processing.detail_records()
    );
    if processing.validation_dropped() > 0 {
        println!(
            "  {} {}",
            "Missing mandatory fields:".bright_yellow(),
            processing.validation_dropped().to_string().bright_red().bold()
        );
        for (field, count) in &processing.missing_field_dropped {
            println!("      {}: {}", field, count);
        }
    }
    if processing.unroutable > 0 {
        println!(
            "  {} {}",
            "Without country:".bright_yellow(),
            processing.unroutable.to_string().bright_red().bold()
        );
    }

    println!("\n{}", "Tables".bright_green().bold());
    if summary.tables.is_empty() {
        println!("  (no records to load)");
    }
    for table in &summary.tables {
        let marker = if table.created { " (new)" } else { "" };
        println!(
            "  {} {} rows{}",
            format!("{}:", table.table_name).bright_cyan(),
            table.rows_written.to_string().bright_white().bold(),
            marker
        );
    }

    println!(
        "\n  {} {} rows in {}",
        "Total:".bright_cyan(),
        summary.rows_written().to_string().bright_white().bold(),
        HumanDuration(summary.duration)
    );
    println!();
}
