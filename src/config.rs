//! Conversion configuration
//!
//! The fixed table name and the file extensions are named constants carried
//! by [`ConversionConfig`], which is passed explicitly to the converter and
//! the batch driver.

/// Name of the Vdata table holding the 64-second merged MAG/SWEPAM records
pub const DEFAULT_TABLE_NAME: &str = "MAGSWE_data_64sec";

/// Extension of the yearly HDF4 input files
pub const HDF4_EXTENSION: &str = ".hdf";

/// Extension appended to the input file name to form the output name
pub const HDF5_EXTENSION: &str = ".h5";

/// What the batch driver does when converting one year fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the batch and return the error
    #[default]
    Abort,
    /// Log the error, record the year as failed and go on
    Continue,
}

/// Configuration shared by the converter and the batch driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    pub table_name: String,
    pub input_extension: String,
    pub output_extension: String,
    pub error_policy: ErrorPolicy,
}

impl ConversionConfig {
    /// Create a configuration reading the given table, default extensions
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Replace the error policy
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Replace the input and output extensions
    pub fn with_extensions(
        mut self,
        input_extension: impl Into<String>,
        output_extension: impl Into<String>,
    ) -> Self {
        self.input_extension = input_extension.into();
        self.output_extension = output_extension.into();
        self
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            input_extension: HDF4_EXTENSION.to_string(),
            output_extension: HDF5_EXTENSION.to_string(),
            error_policy: ErrorPolicy::Abort,
        }
    }
}
