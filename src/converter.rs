//! Conversion of one HDF4 table into one HDF5 file
//!
//! The conversion is a linear sequence: discover the schema, read the whole
//! table into memory, release the input, then create the output and write
//! one dataset per field in discovery order. The first failure stops the
//! conversion and any partially written output is left on disk.

use crate::config::{ConversionConfig, DEFAULT_TABLE_NAME};
use crate::errors::{ConvertError, Hdf4Error, Result};
use crate::hdf4::Hdf4File;
use crate::hdf5_io::Hdf5Writer;
use crate::table::{discover_fields, FieldDescriptor, FieldTable};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What one successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub output_path: PathBuf,
    pub field_count: usize,
    pub record_count: usize,
}

/// Anything that can turn one input file into one output file
pub trait FileConverter {
    fn convert_file(&self, input_path: &Path, output_path: &Path) -> Result<FileSummary>;
}

/// HDF4 Vdata → HDF5 converter for a single fixed table name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hdf4ToHdf5Converter {
    table_name: String,
}

impl Hdf4ToHdf5Converter {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
        }
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        Self::new(config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Steps 1 and 2: schema and data, with the input closed on return
    fn read_source(&self, input_path: &Path) -> Result<(Vec<FieldDescriptor>, FieldTable)> {
        let schema_error = |source: Hdf4Error| ConvertError::SchemaRead {
            path: input_path.to_path_buf(),
            table: self.table_name.clone(),
            source,
        };
        let data_error = |source: Hdf4Error| ConvertError::DataRead {
            path: input_path.to_path_buf(),
            table: self.table_name.clone(),
            source,
        };

        let mut source = Hdf4File::open(input_path).map_err(schema_error)?;
        let header = source.find_vdata(&self.table_name).map_err(schema_error)?;
        let fields = discover_fields(&header);

        let records = source.read_vdata_records(&header).map_err(data_error)?;
        let table = FieldTable::from_records(&header, &fields, &records).map_err(data_error)?;

        Ok((fields, table))
    }
}

impl Default for Hdf4ToHdf5Converter {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_NAME)
    }
}

impl FileConverter for Hdf4ToHdf5Converter {
    fn convert_file(&self, input_path: &Path, output_path: &Path) -> Result<FileSummary> {
        let (fields, table) = self.read_source(input_path)?;

        let writer = Hdf5Writer::create(output_path)?;
        for (field, values) in fields.iter().zip(table.rows()) {
            writer.write_field(field, values)?;
        }
        drop(writer);

        debug!(
            input = %input_path.display(),
            output = %output_path.display(),
            fields = fields.len(),
            records = table.record_count(),
            "converted file"
        );

        Ok(FileSummary {
            output_path: output_path.to_path_buf(),
            field_count: fields.len(),
            record_count: table.record_count(),
        })
    }
}

/// Convert one file reading the default table
///
/// # Arguments
///
/// * `input_path` - Existing HDF4 file containing the table
/// * `output_path` - Path of the HDF5 file to create; must not exist
///
/// # Errors
///
/// Returns [`ConvertError::SchemaRead`] or [`ConvertError::DataRead`] when
/// the input cannot be understood, [`ConvertError::OutputCreate`] when the
/// output cannot be created and [`ConvertError::DatasetWrite`] naming the
/// first field that could not be written.
pub fn convert_file(input_path: &Path, output_path: &Path) -> Result<FileSummary> {
    Hdf4ToHdf5Converter::default().convert_file(input_path, output_path)
}
