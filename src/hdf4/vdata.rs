//! Vdata headers and record storage
//!
//! A `VH` element describes one table: its name and class, the number of
//! records, the size of one packed record, and for every field the number
//! type, order (elements per record), byte size and offset in the record.

use super::cursor::ByteCursor;
use super::file::Hdf4File;
use super::number_type::{ByteOrder, NumberType};
use super::{TAG_VH, TAG_VS};
use crate::errors::{Hdf4Error, Hdf4Result};
use std::io::{Read, Seek};

/// How records are laid out in the `VS` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlace {
    /// Record after record, every record holding all fields
    Full,
    /// Field after field, every field holding all records
    None,
}

/// One field of a Vdata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdataField {
    pub name: String,
    pub number_type: NumberType,
    pub byte_order: ByteOrder,
    /// Elements per record
    pub order: usize,
    /// Byte offset inside one record
    pub offset: usize,
    /// Bytes per record
    pub size: usize,
}

/// Decoded `VH` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdataHeader {
    pub reference: u16,
    pub name: String,
    pub class: String,
    pub interlace: Interlace,
    pub record_count: usize,
    pub record_size: usize,
    pub fields: Vec<VdataField>,
}

impl VdataHeader {
    /// Parse the body of a `VH` element
    pub fn parse(reference: u16, bytes: &[u8]) -> Hdf4Result<Self> {
        let malformed = |message: String| Hdf4Error::Malformed {
            what: "vdata header",
            message,
        };
        let mut cursor = ByteCursor::new(bytes, "vdata header");

        let interlace = match cursor.i16()? {
            0 => Interlace::Full,
            1 => Interlace::None,
            other => return Err(malformed(format!("interlace mode {}", other))),
        };
        let record_count = cursor.i32()?;
        if record_count < 0 {
            return Err(malformed(format!("record count {}", record_count)));
        }
        let record_size = cursor.u16()? as usize;
        let nfields = cursor.i16()?;
        if nfields < 0 {
            return Err(malformed(format!("field count {}", nfields)));
        }
        let nfields = nfields as usize;

        let mut types = Vec::with_capacity(nfields);
        for _ in 0..nfields {
            types.push(cursor.i16()?);
        }
        let mut sizes = Vec::with_capacity(nfields);
        for _ in 0..nfields {
            sizes.push(cursor.u16()? as usize);
        }
        let mut offsets = Vec::with_capacity(nfields);
        for _ in 0..nfields {
            offsets.push(cursor.u16()? as usize);
        }
        let mut orders = Vec::with_capacity(nfields);
        for _ in 0..nfields {
            orders.push(cursor.u16()? as usize);
        }
        let mut names = Vec::with_capacity(nfields);
        for _ in 0..nfields {
            names.push(cursor.string()?);
        }
        let name = cursor.string()?;
        let class = cursor.string()?;
        // Expansion tag/ref, version and attribute data follow; nothing in
        // them affects how records are decoded.

        let mut fields = Vec::with_capacity(nfields);
        for (i, field_name) in names.into_iter().enumerate() {
            let (number_type, byte_order) = NumberType::from_code(types[i])?;
            let field = VdataField {
                name: field_name,
                number_type,
                byte_order,
                order: orders[i],
                offset: offsets[i],
                size: sizes[i],
            };
            if field.size != field.order * number_type.size() {
                return Err(malformed(format!(
                    "field '{}' is {} bytes, order {} of {} needs {}",
                    field.name,
                    field.size,
                    field.order,
                    number_type.name(),
                    field.order * number_type.size()
                )));
            }
            if field.offset + field.size > record_size {
                return Err(malformed(format!(
                    "field '{}' ends at byte {} of a {}-byte record",
                    field.name,
                    field.offset + field.size,
                    record_size
                )));
            }
            fields.push(field);
        }

        Ok(Self {
            reference,
            name,
            class,
            interlace,
            record_count: record_count as usize,
            record_size,
            fields,
        })
    }

    /// Read only the table name of a `VH` element, skipping the field
    /// descriptions without interpreting them
    pub fn peek_name(bytes: &[u8]) -> Hdf4Result<String> {
        let mut cursor = ByteCursor::new(bytes, "vdata header");
        cursor.bytes(2 + 4 + 2)?;
        let nfields = cursor.i16()?.max(0) as usize;
        // type, size, offset and order: four u16-wide arrays
        cursor.bytes(nfields * 4 * 2)?;
        for _ in 0..nfields {
            cursor.string()?;
        }
        cursor.string()
    }

    /// Bytes the `VS` element must hold
    pub fn storage_len(&self) -> usize {
        self.record_count * self.record_size
    }
}

impl<R: Read + Seek> Hdf4File<R> {
    /// Parse every Vdata header in the file, in descriptor order
    pub fn vdata_headers(&mut self) -> Hdf4Result<Vec<VdataHeader>> {
        let refs: Vec<u16> = self
            .descriptors_with_tag(TAG_VH)
            .map(|dd| dd.reference)
            .collect();
        refs.into_iter()
            .map(|reference| {
                let bytes = self.read_element(TAG_VH, reference)?;
                VdataHeader::parse(reference, &bytes)
            })
            .collect()
    }

    /// Header of the first Vdata with the given name
    ///
    /// Only the matching header is fully parsed, so other tables with
    /// unknown number types or inconsistent layouts do not get in the way.
    pub fn find_vdata(&mut self, name: &str) -> Hdf4Result<VdataHeader> {
        let refs: Vec<u16> = self
            .descriptors_with_tag(TAG_VH)
            .map(|dd| dd.reference)
            .collect();
        for reference in refs {
            let bytes = self.read_element(TAG_VH, reference)?;
            // A header too short to name itself cannot be the one we want
            if VdataHeader::peek_name(&bytes).is_ok_and(|found| found == name) {
                return VdataHeader::parse(reference, &bytes);
            }
        }
        Err(Hdf4Error::TableNotFound {
            name: name.to_string(),
        })
    }

    /// Packed records of a Vdata, exactly `storage_len()` bytes
    pub fn read_vdata_records(&mut self, header: &VdataHeader) -> Hdf4Result<Vec<u8>> {
        let expected = header.storage_len();
        if expected == 0 && self.find(TAG_VS, header.reference).is_none() {
            return Ok(Vec::new());
        }

        let mut records = self.read_element(TAG_VS, header.reference)?;
        if records.len() < expected {
            return Err(Hdf4Error::Malformed {
                what: "vdata storage",
                message: format!(
                    "'{}' declares {} records of {} bytes but storage holds {} bytes",
                    header.name,
                    header.record_count,
                    header.record_size,
                    records.len()
                ),
            });
        }
        records.truncate(expected);
        Ok(records)
    }
}
