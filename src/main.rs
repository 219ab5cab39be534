//! Entry point for the RuHdfConv application.
//! Handles CLI parsing and logging setup, then either inspects one file or
//! converts a range of years.

use chrono::{Datelike, Utc};
use clap::Parser;
use ru_hdf_conv::metadata::{inspect_table, list_tables, print_table_schema, print_tables};
use ru_hdf_conv::BatchDriver;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.list_tables {
        let tables = list_tables(path)?;
        print_tables(path, &tables);
        return Ok(());
    }

    if let Some(path) = &args.describe {
        let schema = inspect_table(path, &args.table)?;
        print_table_schema(&schema);
        return Ok(());
    }

    let (Some(directory), Some(prefix), Some(start_year)) =
        (&args.directory, &args.prefix, args.start_year)
    else {
        return Err("--directory, --prefix and --start-year are required".into());
    };
    let end_year = args.end_year.unwrap_or_else(|| Utc::now().year());

    let driver = BatchDriver::from_config(args.conversion_config());
    let report = driver.run(directory, prefix, start_year, end_year)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "✅ {} converted, {} skipped, {} failed",
            report.converted.len(),
            report.skipped.len(),
            report.failed.len()
        );
        for failed in &report.failed {
            println!("   ❌ {}: {}", failed.year, failed.message);
        }
    }

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} year(s) failed to convert", report.failed.len()).into())
    }
}
