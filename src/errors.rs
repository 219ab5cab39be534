//! Centralized error handling for the converter
//!
//! Two layers of errors live here: [`Hdf4Error`] describes what is wrong with
//! an HDF4 file at the format level, and [`ConvertError`] is the taxonomy the
//! converter and the batch driver report to callers.

use std::path::PathBuf;
use thiserror::Error;

/// Format-level errors raised by the HDF4 reader
#[derive(Debug, Error)]
pub enum Hdf4Error {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not start with the HDF4 magic number
    #[error("not an HDF4 file (magic number {0:02x?})")]
    BadMagic([u8; 4]),

    /// An element runs past the end of the file
    #[error("element at offset {offset} with length {length} runs past the end of the file")]
    Truncated { offset: u64, length: u64 },

    /// No data descriptor exists for a tag/ref pair
    #[error("no element with tag {tag} and ref {reference}")]
    MissingElement { tag: u16, reference: u16 },

    /// No Vdata with the requested name
    #[error("table '{name}' not found")]
    TableNotFound { name: String },

    /// Number type code not understood
    #[error("unknown HDF4 number type {0}")]
    UnknownNumberType(i16),

    /// Special element kind not supported (compressed, external, chunked...)
    #[error("unsupported special element code {0}")]
    UnsupportedSpecial(i16),

    /// Table storage does not match the row count implied by its header
    #[error("table has {rows} rows but {fields} fields were discovered")]
    FieldCountMismatch { rows: usize, fields: usize },

    /// Structure that parses but makes no sense
    #[error("malformed {what}: {message}")]
    Malformed { what: &'static str, message: String },

    /// Array shape error while assembling a field
    #[error("array error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Result type alias for the HDF4 reader
pub type Hdf4Result<T> = std::result::Result<T, Hdf4Error>;

/// Main error type for conversion operations
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input metadata is unreadable or the table is absent
    #[error("cannot read schema of table '{table}' in {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        table: String,
        #[source]
        source: Hdf4Error,
    },

    /// Table storage is missing, malformed or disagrees with the schema
    #[error("cannot read data of table '{table}' in {}: {source}", path.display())]
    DataRead {
        path: PathBuf,
        table: String,
        #[source]
        source: Hdf4Error,
    },

    /// Output file could not be created
    #[error("cannot create output file {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: hdf5::Error,
    },

    /// A field's dataset could not be created or written
    #[error("cannot write dataset for field '{field}' in {}: {source}", path.display())]
    DatasetWrite {
        path: PathBuf,
        field: String,
        #[source]
        source: hdf5::Error,
    },
}

impl ConvertError {
    /// Short name of the error class, as used in batch reports
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::SchemaRead { .. } => "SchemaReadError",
            ConvertError::DataRead { .. } => "DataReadError",
            ConvertError::OutputCreate { .. } => "OutputCreateError",
            ConvertError::DatasetWrite { .. } => "DatasetWriteError",
        }
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
