//! HDF4 number types
//!
//! A number type code is a base type in the low byte plus flag bits for the
//! storage byte order. Without flags the value is big-endian.

use crate::errors::{Hdf4Error, Hdf4Result};

const NT_NATIVE: i16 = 0x1000;
const NT_LITEND: i16 = 0x4000;

/// Byte order of stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Element type of a Vdata field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    UChar8,
    Char8,
    Float32,
    Float64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl NumberType {
    /// Decode a number type code, returning the type and its byte order
    pub fn from_code(code: i16) -> Hdf4Result<(Self, ByteOrder)> {
        let number_type = match code & 0xff {
            3 => NumberType::UChar8,
            4 => NumberType::Char8,
            5 => NumberType::Float32,
            6 => NumberType::Float64,
            20 => NumberType::Int8,
            21 => NumberType::UInt8,
            22 => NumberType::Int16,
            23 => NumberType::UInt16,
            24 => NumberType::Int32,
            25 => NumberType::UInt32,
            26 => NumberType::Int64,
            27 => NumberType::UInt64,
            _ => return Err(Hdf4Error::UnknownNumberType(code)),
        };
        // Native types are taken to be little-endian, the layout of every
        // platform the legacy archives were produced on.
        let byte_order = if code & (NT_LITEND | NT_NATIVE) != 0 {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        };
        Ok((number_type, byte_order))
    }

    /// Big-endian code of this type
    pub fn code(self) -> i16 {
        match self {
            NumberType::UChar8 => 3,
            NumberType::Char8 => 4,
            NumberType::Float32 => 5,
            NumberType::Float64 => 6,
            NumberType::Int8 => 20,
            NumberType::UInt8 => 21,
            NumberType::Int16 => 22,
            NumberType::UInt16 => 23,
            NumberType::Int32 => 24,
            NumberType::UInt32 => 25,
            NumberType::Int64 => 26,
            NumberType::UInt64 => 27,
        }
    }

    /// Size of one element in bytes
    pub fn size(self) -> usize {
        match self {
            NumberType::UChar8 | NumberType::Char8 | NumberType::Int8 | NumberType::UInt8 => 1,
            NumberType::Int16 | NumberType::UInt16 => 2,
            NumberType::Float32 | NumberType::Int32 | NumberType::UInt32 => 4,
            NumberType::Float64 | NumberType::Int64 | NumberType::UInt64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NumberType::UChar8 => "uchar8",
            NumberType::Char8 => "char8",
            NumberType::Float32 => "float32",
            NumberType::Float64 => "float64",
            NumberType::Int8 => "int8",
            NumberType::UInt8 => "uint8",
            NumberType::Int16 => "int16",
            NumberType::UInt16 => "uint16",
            NumberType::Int32 => "int32",
            NumberType::UInt32 => "uint32",
            NumberType::Int64 => "int64",
            NumberType::UInt64 => "uint64",
        }
    }
}
