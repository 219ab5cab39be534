//! Defines command-line interface options using `clap` for the RuHdfConv application.

use clap::{Parser, ValueEnum};
use ru_hdf_conv::{ConversionConfig, ErrorPolicy, DEFAULT_TABLE_NAME};
use std::path::PathBuf;

/// A CLI tool for converting yearly HDF4 tables to HDF5
#[derive(Parser, Debug)]
#[command(
    version,
    name = "RuHdfConv",
    about = "Convert yearly HDF4 Vdata files into HDF5, one dataset per field"
)]
pub struct Args {
    /// Directory the file names are appended to (include the trailing separator)
    #[arg(short, long, required_unless_present_any = ["list_tables", "describe"])]
    pub directory: Option<PathBuf>,

    /// File name prefix preceding the year, e.g. MAGSWE_data_64sec_
    #[arg(short, long, required_unless_present_any = ["list_tables", "describe"])]
    pub prefix: Option<String>,

    /// First year to convert (inclusive)
    #[arg(short, long, required_unless_present_any = ["list_tables", "describe"])]
    pub start_year: Option<i32>,

    /// Last year to convert (inclusive). Defaults to the current year.
    #[arg(short, long)]
    pub end_year: Option<i32>,

    /// Name of the table to read from every input file
    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// What to do when one year fails to convert
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    pub on_error: OnError,

    /// List the tables of one HDF4 file and exit
    #[arg(long, value_name = "FILE")]
    pub list_tables: Option<PathBuf>,

    /// Describe the fields of the table in one HDF4 file and exit
    #[arg(long, value_name = "FILE")]
    pub describe: Option<PathBuf>,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Stop at the first failed year
    Abort,
    /// Record the failure and go on with the next year
    Continue,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Abort => ErrorPolicy::Abort,
            OnError::Continue => ErrorPolicy::Continue,
        }
    }
}

impl Args {
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::new(self.table.clone()).with_error_policy(self.on_error.into())
    }
}
