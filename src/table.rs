//! Field descriptors and the in-memory field table
//!
//! The table is stored transposed relative to the file: row `k` holds every
//! value of field `k`, so rows correspond one to one with the discovered
//! [`FieldDescriptor`]s.

use crate::errors::{Hdf4Error, Hdf4Result};
use crate::hdf4::{ByteOrder, Interlace, NumberType, VdataField, VdataHeader};
use ndarray::{ArrayD, IxDyn};

/// A named field and its position in the table metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ordinal_position: usize,
}

impl FieldDescriptor {
    /// HDF5 path of the dataset this field becomes
    pub fn dataset_path(&self) -> String {
        format!("/{}", self.name)
    }
}

/// Ordered field descriptors of a Vdata
pub fn discover_fields(header: &VdataHeader) -> Vec<FieldDescriptor> {
    header
        .fields
        .iter()
        .enumerate()
        .map(|(ordinal_position, field)| FieldDescriptor {
            name: field.name.clone(),
            ordinal_position,
        })
        .collect()
}

/// Values of one field with their stored element type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValues {
    U8(ArrayD<u8>),
    I8(ArrayD<i8>),
    U16(ArrayD<u16>),
    I16(ArrayD<i16>),
    U32(ArrayD<u32>),
    I32(ArrayD<i32>),
    U64(ArrayD<u64>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

/// Apply an expression to the array inside any `FieldValues` variant
macro_rules! with_field_values {
    ($values:expr, $array:ident => $body:expr) => {
        match $values {
            $crate::table::FieldValues::U8($array) => $body,
            $crate::table::FieldValues::I8($array) => $body,
            $crate::table::FieldValues::U16($array) => $body,
            $crate::table::FieldValues::I16($array) => $body,
            $crate::table::FieldValues::U32($array) => $body,
            $crate::table::FieldValues::I32($array) => $body,
            $crate::table::FieldValues::U64($array) => $body,
            $crate::table::FieldValues::I64($array) => $body,
            $crate::table::FieldValues::F32($array) => $body,
            $crate::table::FieldValues::F64($array) => $body,
        }
    };
}

pub(crate) use with_field_values;

impl FieldValues {
    pub fn shape(&self) -> &[usize] {
        with_field_values!(self, array => array.shape())
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        with_field_values!(self, array => array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the element type
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValues::U8(_) => "u8",
            FieldValues::I8(_) => "i8",
            FieldValues::U16(_) => "u16",
            FieldValues::I16(_) => "i16",
            FieldValues::U32(_) => "u32",
            FieldValues::I32(_) => "i32",
            FieldValues::U64(_) => "u64",
            FieldValues::I64(_) => "i64",
            FieldValues::F32(_) => "f32",
            FieldValues::F64(_) => "f64",
        }
    }
}

/// Fixed-size values that can be decoded from either byte order
trait FromStoredBytes: Sized {
    const SIZE: usize;
    fn from_be(bytes: &[u8]) -> Self;
    fn from_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_from_stored_bytes {
    ($($t:ty),*) => {
        $(
            impl FromStoredBytes for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn from_be(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_be_bytes(raw)
                }

                fn from_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_from_stored_bytes!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Shape of a field's array: `[records]` for scalar fields,
/// `[records, order]` otherwise
pub fn field_shape(record_count: usize, order: usize) -> Vec<usize> {
    if order == 1 {
        vec![record_count]
    } else {
        vec![record_count, order]
    }
}

fn decode_field<T: FromStoredBytes>(
    records: &[u8],
    header: &VdataHeader,
    field: &VdataField,
) -> Hdf4Result<ArrayD<T>> {
    let record_count = header.record_count;
    let mut values = Vec::with_capacity(record_count * field.order);

    for record in 0..record_count {
        let base = match header.interlace {
            Interlace::Full => record * header.record_size + field.offset,
            Interlace::None => field.offset * record_count + record * field.size,
        };
        for element in 0..field.order {
            let start = base + element * T::SIZE;
            let bytes = records
                .get(start..start + T::SIZE)
                .ok_or_else(|| Hdf4Error::Malformed {
                    what: "vdata storage",
                    message: format!(
                        "field '{}' record {} lies outside {} bytes of storage",
                        field.name,
                        record,
                        records.len()
                    ),
                })?;
            values.push(match field.byte_order {
                ByteOrder::Big => T::from_be(bytes),
                ByteOrder::Little => T::from_le(bytes),
            });
        }
    }

    let shape = field_shape(record_count, field.order);
    Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
}

fn decode_values(records: &[u8], header: &VdataHeader, field: &VdataField) -> Hdf4Result<FieldValues> {
    let values = match field.number_type {
        NumberType::UChar8 | NumberType::Char8 | NumberType::UInt8 => {
            FieldValues::U8(decode_field(records, header, field)?)
        }
        NumberType::Int8 => FieldValues::I8(decode_field(records, header, field)?),
        NumberType::UInt16 => FieldValues::U16(decode_field(records, header, field)?),
        NumberType::Int16 => FieldValues::I16(decode_field(records, header, field)?),
        NumberType::UInt32 => FieldValues::U32(decode_field(records, header, field)?),
        NumberType::Int32 => FieldValues::I32(decode_field(records, header, field)?),
        NumberType::UInt64 => FieldValues::U64(decode_field(records, header, field)?),
        NumberType::Int64 => FieldValues::I64(decode_field(records, header, field)?),
        NumberType::Float32 => FieldValues::F32(decode_field(records, header, field)?),
        NumberType::Float64 => FieldValues::F64(decode_field(records, header, field)?),
    };
    Ok(values)
}

/// Every field of one table, fully decoded
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTable {
    record_count: usize,
    rows: Vec<FieldValues>,
}

impl FieldTable {
    /// Decode packed records into one row per discovered field, in
    /// descriptor order
    pub fn from_records(
        header: &VdataHeader,
        fields: &[FieldDescriptor],
        records: &[u8],
    ) -> Hdf4Result<Self> {
        if fields.len() != header.fields.len() {
            return Err(Hdf4Error::FieldCountMismatch {
                rows: header.fields.len(),
                fields: fields.len(),
            });
        }
        let rows = fields
            .iter()
            .map(|descriptor| {
                let field = header
                    .fields
                    .get(descriptor.ordinal_position)
                    .filter(|field| field.name == descriptor.name)
                    .ok_or_else(|| Hdf4Error::Malformed {
                        what: "field table",
                        message: format!(
                            "no field '{}' at position {} of '{}'",
                            descriptor.name, descriptor.ordinal_position, header.name
                        ),
                    })?;
                decode_values(records, header, field)
            })
            .collect::<Hdf4Result<Vec<_>>>()?;
        Ok(Self {
            record_count: header.record_count,
            rows,
        })
    }

    /// Number of rows, i.e. fields
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of records each row was decoded from
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn row(&self, index: usize) -> Option<&FieldValues> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[FieldValues] {
        &self.rows
    }
}
