//! Year-range batch driver
//!
//! For every year of an inclusive range, in ascending order, the driver
//! derives `<directory><prefix><year><input extension>` and its sibling
//! output `<input path><output extension>`, skips the year if a regular file
//! already exists at the output path, and otherwise hands both paths to a
//! [`FileConverter`].

use crate::config::{ConversionConfig, ErrorPolicy};
use crate::converter::{FileConverter, Hdf4ToHdf5Converter};
use crate::errors::Result;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// One year's conversion request, derived per iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source_directory: PathBuf,
    pub name_prefix: String,
    pub year: i32,
}

impl ConversionJob {
    pub fn new(source_directory: &Path, name_prefix: &str, year: i32) -> Self {
        Self {
            source_directory: source_directory.to_path_buf(),
            name_prefix: name_prefix.to_string(),
            year,
        }
    }

    /// `<directory><prefix><year><extension>`, concatenated without a separator
    pub fn input_path(&self, input_extension: &str) -> PathBuf {
        let mut path = OsString::from(self.source_directory.as_os_str());
        path.push(format!("{}{}{}", self.name_prefix, self.year, input_extension));
        PathBuf::from(path)
    }

    /// Input path with the output extension appended
    pub fn output_path(&self, input_extension: &str, output_extension: &str) -> PathBuf {
        let mut path = self.input_path(input_extension).into_os_string();
        path.push(output_extension);
        PathBuf::from(path)
    }
}

/// A year whose output was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedYear {
    pub year: i32,
    pub output_path: PathBuf,
    pub field_count: usize,
    pub record_count: usize,
}

/// A year left alone because its output already existed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedYear {
    pub year: i32,
    pub output_path: PathBuf,
}

/// A year that failed under [`ErrorPolicy::Continue`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedYear {
    pub year: i32,
    pub kind: String,
    pub message: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub converted: Vec<ConvertedYear>,
    pub skipped: Vec<SkippedYear>,
    pub failed: Vec<FailedYear>,
}

impl BatchReport {
    /// Years handled in any way, in processing order
    pub fn years_processed(&self) -> usize {
        self.converted.len() + self.skipped.len() + self.failed.len()
    }
}

/// Drives a [`FileConverter`] over a year range
pub struct BatchDriver<C> {
    converter: C,
    config: ConversionConfig,
}

impl<C: FileConverter> BatchDriver<C> {
    pub fn new(converter: C, config: ConversionConfig) -> Self {
        Self { converter, config }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert every year in `start_year..=end_year`
    ///
    /// An empty range (`start_year > end_year`) does nothing. Under
    /// [`ErrorPolicy::Abort`] the first conversion error is returned and
    /// later years are not attempted.
    pub fn run(
        &self,
        source_directory: &Path,
        name_prefix: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for year in start_year..=end_year {
            let job = ConversionJob::new(source_directory, name_prefix, year);
            let input_path = job.input_path(&self.config.input_extension);
            let output_path =
                job.output_path(&self.config.input_extension, &self.config.output_extension);

            if output_path.is_file() {
                warn!(
                    year,
                    path = %output_path.display(),
                    "output file already exists, skipping"
                );
                report.skipped.push(SkippedYear { year, output_path });
                continue;
            }

            match self.converter.convert_file(&input_path, &output_path) {
                Ok(summary) => report.converted.push(ConvertedYear {
                    year,
                    output_path: summary.output_path,
                    field_count: summary.field_count,
                    record_count: summary.record_count,
                }),
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Continue => {
                        error!(year, error = %e, "conversion failed, continuing");
                        report.failed.push(FailedYear {
                            year,
                            kind: e.kind().to_string(),
                            message: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(report)
    }
}

impl BatchDriver<Hdf4ToHdf5Converter> {
    /// Driver using the HDF4 → HDF5 converter for the configured table
    pub fn from_config(config: ConversionConfig) -> Self {
        Self::new(Hdf4ToHdf5Converter::from_config(&config), config)
    }
}

/// Convert a year range with the default table, extensions and policy
///
/// # Arguments
///
/// * `source_directory` - Directory string the file names are appended to
/// * `name_prefix` - File name prefix, e.g. `MAGSWE_data_64sec_`
/// * `start_year` - First year, inclusive
/// * `end_year` - Last year, inclusive
///
/// # Errors
///
/// Returns the first error raised by the file converter; years after it are
/// not processed.
pub fn convert_range(
    source_directory: &Path,
    name_prefix: &str,
    start_year: i32,
    end_year: i32,
) -> Result<BatchReport> {
    BatchDriver::from_config(ConversionConfig::default()).run(
        source_directory,
        name_prefix,
        start_year,
        end_year,
    )
}
