//! RuHdfConv: yearly HDF4 → HDF5 batch conversion
//!
//! A Rust library and command-line tool that converts a series of yearly
//! HDF4 files, each holding one Vdata table, into flat HDF5 files with one
//! dataset per table field.
//!
//! ## Key Features
//!
//! - **Schema discovery**: field names, types and orders read from the Vdata header
//! - **Verbatim transcription**: every field becomes `/<field name>` with its stored type and shape
//! - **Native HDF4 reader**: descriptor blocks, linked-block storage, both byte orders
//! - **Skip on existing output**: already converted years are left untouched
//!
//! ## Module Organization
//!
//! - [`batch`]: year-range driver and batch report
//! - [`converter`]: single-file conversion
//! - [`table`]: field descriptors and the in-memory field table
//! - [`hdf4`]: HDF4 file and Vdata reader
//! - [`hdf5_io`]: HDF5 output
//! - [`metadata`]: table listing and description
//! - [`config`]: conversion constants and configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! // Converts /data/MAGSWE_data_64sec_2000.hdf ... _2002.hdf
//! let report = ru_hdf_conv::convert_range(Path::new("/data/"), "MAGSWE_data_64sec_", 2000, 2002).unwrap();
//! println!("{} converted, {} skipped", report.converted.len(), report.skipped.len());
//! ```

pub mod batch;
pub mod config;
pub mod converter;
pub mod errors;
pub mod hdf4;
pub mod hdf5_io;
pub mod metadata;
pub mod table;

pub use batch::{convert_range, BatchDriver, BatchReport, ConversionJob};
pub use config::{ConversionConfig, ErrorPolicy, DEFAULT_TABLE_NAME, HDF4_EXTENSION, HDF5_EXTENSION};
pub use converter::{convert_file, FileConverter, FileSummary, Hdf4ToHdf5Converter};
pub use errors::{ConvertError, Hdf4Error, Result};
pub use table::{FieldDescriptor, FieldTable, FieldValues};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::batch::{convert_range, BatchDriver, BatchReport, ConversionJob};
    pub use crate::config::{ConversionConfig, ErrorPolicy};
    pub use crate::converter::{convert_file, FileConverter, FileSummary, Hdf4ToHdf5Converter};
    pub use crate::errors::{ConvertError, Result};
    pub use crate::metadata::{inspect_table, list_tables, TableSchema};
}
