//! HDF4 metadata inspection
//!
//! This module provides functions for listing the Vdata tables of an HDF4
//! file and describing the fields of one table, without reading its records.

use crate::errors::{ConvertError, Hdf4Error, Result};
use crate::hdf4::{Hdf4File, Interlace, VdataHeader};
use crate::table::field_shape;
use std::path::{Path, PathBuf};

/// Short description of one Vdata table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub class: String,
    pub record_count: usize,
    pub field_count: usize,
}

/// Description of one field as it will be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub data_type: String,
    pub order: usize,
    pub shape: Vec<usize>,
}

/// Structured schema of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub path: PathBuf,
    pub name: String,
    pub class: String,
    pub interlace: Interlace,
    pub record_count: usize,
    pub record_size: usize,
    pub fields: Vec<FieldInfo>,
}

impl TableSchema {
    fn from_header(path: &Path, header: &VdataHeader) -> Self {
        let fields = header
            .fields
            .iter()
            .map(|field| FieldInfo {
                name: field.name.clone(),
                data_type: field.number_type.name().to_string(),
                order: field.order,
                shape: field_shape(header.record_count, field.order),
            })
            .collect();

        Self {
            path: path.to_path_buf(),
            name: header.name.clone(),
            class: header.class.clone(),
            interlace: header.interlace,
            record_count: header.record_count,
            record_size: header.record_size,
            fields,
        }
    }
}

fn schema_error(path: &Path, table: &str, source: Hdf4Error) -> ConvertError {
    ConvertError::SchemaRead {
        path: path.to_path_buf(),
        table: table.to_string(),
        source,
    }
}

/// Lists every Vdata table in an HDF4 file, in file order.
pub fn list_tables(path: &Path) -> Result<Vec<TableSummary>> {
    let headers = Hdf4File::open(path)
        .and_then(|mut file| file.vdata_headers())
        .map_err(|e| schema_error(path, "*", e))?;

    Ok(headers
        .into_iter()
        .map(|header| TableSummary {
            record_count: header.record_count,
            field_count: header.fields.len(),
            name: header.name,
            class: header.class,
        })
        .collect())
}

/// Reads the schema of the named table.
pub fn inspect_table(path: &Path, table: &str) -> Result<TableSchema> {
    let header = Hdf4File::open(path)
        .and_then(|mut file| file.find_vdata(table))
        .map_err(|e| schema_error(path, table, e))?;
    Ok(TableSchema::from_header(path, &header))
}

/// Prints the tables of a file in a clean, organized format.
pub fn print_tables(path: &Path, tables: &[TableSummary]) {
    println!("\n Tables in {}", path.display());
    println!("==============");

    if tables.is_empty() {
        println!("   (No tables found)");
        return;
    }

    for table in tables {
        let class = if table.class.is_empty() {
            String::new()
        } else {
            format!(" [{}]", table.class)
        };
        println!(
            "    {}{}: {} records, {} fields",
            table.name, class, table.record_count, table.field_count
        );
    }
}

/// Prints a table schema with one line per field.
pub fn print_table_schema(schema: &TableSchema) {
    println!("\n Table Description: {}", schema.name);
    println!("={}", "=".repeat(schema.name.len() + 20));
    println!("   File: {}", schema.path.display());
    if !schema.class.is_empty() {
        println!("   Class: {}", schema.class);
    }
    println!("   Records: {}", schema.record_count);
    println!("   Record size: {} bytes", schema.record_size);
    println!("   Interlace: {:?}", schema.interlace);

    println!("\n Fields");
    println!("==========");
    for (position, field) in schema.fields.iter().enumerate() {
        let shape: Vec<String> = field.shape.iter().map(|s| s.to_string()).collect();
        println!(
            "    [{}] {} ({}): ({})",
            position,
            field.name,
            field.data_type,
            shape.join(" × ")
        );
    }
}
