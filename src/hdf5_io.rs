//! HDF5 output: exclusive file creation and one dataset per field
//!
//! Datasets are written at the root of the file with their source element
//! type and shape. No attributes, groups, chunking or filters are added.

use crate::errors::{ConvertError, Result};
use crate::table::{with_field_values, FieldDescriptor, FieldValues};
use hdf5::{File, H5Type};
use ndarray::ArrayD;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer for a freshly created HDF5 output file
///
/// The file is closed when the writer is dropped, whether or not every
/// field was written.
pub struct Hdf5Writer {
    file: File,
    path: PathBuf,
}

impl Hdf5Writer {
    /// Create the output file, failing if anything already exists at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create_excl(path).map_err(|source| ConvertError::OutputCreate {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Create `/<field name>` and write the values verbatim
    ///
    /// A name containing `/` would create intermediate groups, so it is
    /// rejected before anything is written.
    pub fn write_field(&self, field: &FieldDescriptor, values: &FieldValues) -> Result<()> {
        let write_error = |source: hdf5::Error| ConvertError::DatasetWrite {
            path: self.path.clone(),
            field: field.name.clone(),
            source,
        };
        if field.name.contains('/') {
            return Err(write_error(hdf5::Error::Internal(format!(
                "field name '{}' contains '/'",
                field.name
            ))));
        }

        let dataset_path = field.dataset_path();
        with_field_values!(values, array => write_array(&self.file, &dataset_path, array))
            .map_err(write_error)?;

        debug!(
            dataset = %dataset_path,
            dtype = values.type_name(),
            shape = ?values.shape(),
            "wrote dataset"
        );
        Ok(())
    }
}

fn write_array<T: H5Type>(file: &File, dataset_path: &str, array: &ArrayD<T>) -> hdf5::Result<()> {
    file.new_dataset_builder()
        .with_data(array)
        .create(dataset_path)?;
    Ok(())
}
