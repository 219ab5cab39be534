//! HDF4 fixture writer shared by the integration tests
//!
//! Produces minimal but well-formed HDF4 files holding Vdata tables:
//! magic number, descriptor block(s), `VH` headers and `VS` storage, the
//! latter optionally as a linked-block special element.

#![allow(dead_code)]

use std::path::Path;

const TAG_LINKED: u16 = 20;
const TAG_VH: u16 = 1962;
const TAG_VS: u16 = 1963;
const SPECIAL_TAG_FLAG: u16 = 0x4000;
const NT_LITEND: i16 = 0x4000;

/// Values of one fixture field, flattened record-major
#[derive(Debug, Clone)]
pub enum Column {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl Column {
    fn code(&self) -> i16 {
        match self {
            Column::U8(_) => 21,
            Column::I8(_) => 20,
            Column::U16(_) => 23,
            Column::I16(_) => 22,
            Column::I32(_) => 24,
            Column::U32(_) => 25,
            Column::I64(_) => 26,
            Column::F32(_) => 5,
            Column::F64(_) => 6,
        }
    }

    fn type_size(&self) -> usize {
        match self {
            Column::U8(_) | Column::I8(_) => 1,
            Column::U16(_) | Column::I16(_) => 2,
            Column::I32(_) | Column::U32(_) | Column::F32(_) => 4,
            Column::I64(_) | Column::F64(_) => 8,
        }
    }

    fn len(&self) -> usize {
        match self {
            Column::U8(v) => v.len(),
            Column::I8(v) => v.len(),
            Column::U16(v) => v.len(),
            Column::I16(v) => v.len(),
            Column::I32(v) => v.len(),
            Column::U32(v) => v.len(),
            Column::I64(v) => v.len(),
            Column::F32(v) => v.len(),
            Column::F64(v) => v.len(),
        }
    }

    fn element(&self, index: usize, little_endian: bool) -> Vec<u8> {
        macro_rules! encode {
            ($v:expr) => {
                if little_endian {
                    $v[index].to_le_bytes().to_vec()
                } else {
                    $v[index].to_be_bytes().to_vec()
                }
            };
        }
        match self {
            Column::U8(v) => encode!(v),
            Column::I8(v) => encode!(v),
            Column::U16(v) => encode!(v),
            Column::I16(v) => encode!(v),
            Column::I32(v) => encode!(v),
            Column::U32(v) => encode!(v),
            Column::I64(v) => encode!(v),
            Column::F32(v) => encode!(v),
            Column::F64(v) => encode!(v),
        }
    }
}

/// One fixture field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub order: usize,
    pub column: Column,
}

impl FieldSpec {
    pub fn scalar(name: &str, column: Column) -> Self {
        Self {
            name: name.to_string(),
            order: 1,
            column,
        }
    }

    pub fn vector(name: &str, order: usize, column: Column) -> Self {
        Self {
            name: name.to_string(),
            order,
            column,
        }
    }

    fn size(&self) -> usize {
        self.order * self.column.type_size()
    }
}

/// One fixture Vdata table
#[derive(Debug, Clone)]
pub struct VdataSpec {
    pub name: String,
    pub class: String,
    pub fields: Vec<FieldSpec>,
    pub no_interlace: bool,
    pub little_endian: bool,
    /// Store records as linked blocks of this many bytes
    pub linked_block_size: Option<usize>,
    /// Drop this many bytes from the end of the stored records
    pub truncate_storage: usize,
    /// Write this number type code for every field instead of the real one
    pub type_code: Option<i16>,
}

impl VdataSpec {
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_string(),
            class: String::new(),
            fields,
            no_interlace: false,
            little_endian: false,
            linked_block_size: None,
            truncate_storage: 0,
            type_code: None,
        }
    }

    pub fn record_count(&self) -> usize {
        self.fields
            .first()
            .map(|f| f.column.len() / f.order)
            .unwrap_or(0)
    }

    fn record_size(&self) -> usize {
        self.fields.iter().map(FieldSpec::size).sum()
    }

    fn header_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(self.no_interlace as i16).to_be_bytes());
        out.extend_from_slice(&(self.record_count() as i32).to_be_bytes());
        out.extend_from_slice(&(self.record_size() as u16).to_be_bytes());
        out.extend_from_slice(&(self.fields.len() as i16).to_be_bytes());
        for field in &self.fields {
            let mut code = self.type_code.unwrap_or_else(|| field.column.code());
            if self.little_endian {
                code |= NT_LITEND;
            }
            out.extend_from_slice(&code.to_be_bytes());
        }
        for field in &self.fields {
            out.extend_from_slice(&(field.size() as u16).to_be_bytes());
        }
        let mut offset = 0usize;
        for field in &self.fields {
            out.extend_from_slice(&(offset as u16).to_be_bytes());
            offset += field.size();
        }
        for field in &self.fields {
            out.extend_from_slice(&(field.order as u16).to_be_bytes());
        }
        for field in &self.fields {
            push_string(&mut out, &field.name);
        }
        push_string(&mut out, &self.name);
        push_string(&mut out, &self.class);
        // extension tag/ref, version 3, more
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&3i16.to_be_bytes());
        out.extend_from_slice(&0i16.to_be_bytes());
        out
    }

    fn record_bytes(&self) -> Vec<u8> {
        let records = self.record_count();
        let mut out = Vec::with_capacity(records * self.record_size());
        if self.no_interlace {
            for field in &self.fields {
                for i in 0..records * field.order {
                    out.extend(field.column.element(i, self.little_endian));
                }
            }
        } else {
            for record in 0..records {
                for field in &self.fields {
                    for j in 0..field.order {
                        out.extend(
                            field
                                .column
                                .element(record * field.order + j, self.little_endian),
                        );
                    }
                }
            }
        }
        out.truncate(out.len().saturating_sub(self.truncate_storage));
        out
    }
}

fn push_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u16).to_be_bytes());
    out.extend_from_slice(s.as_bytes());
}

struct Element {
    tag: u16,
    reference: u16,
    data: Vec<u8>,
}

/// Builds an HDF4 file out of Vdata specs
#[derive(Default)]
pub struct Hdf4Builder {
    vdatas: Vec<VdataSpec>,
    split_descriptor_blocks: bool,
    omit_storage: Vec<String>,
}

impl Hdf4Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vdata(mut self, spec: VdataSpec) -> Self {
        self.vdatas.push(spec);
        self
    }

    /// Spread descriptors over two chained descriptor blocks
    pub fn split_descriptor_blocks(mut self) -> Self {
        self.split_descriptor_blocks = true;
        self
    }

    /// Write the header of the named table but no `VS` element
    pub fn omit_storage(mut self, name: &str) -> Self {
        self.omit_storage.push(name.to_string());
        self
    }

    fn elements(&self) -> Vec<Element> {
        let mut elements = Vec::new();
        let mut next_linked_ref = 1000u16;

        for (i, vdata) in self.vdatas.iter().enumerate() {
            let reference = 2 + i as u16;
            elements.push(Element {
                tag: TAG_VH,
                reference,
                data: vdata.header_bytes(),
            });
            if self.omit_storage.contains(&vdata.name) {
                continue;
            }

            let records = vdata.record_bytes();
            match vdata.linked_block_size {
                None => elements.push(Element {
                    tag: TAG_VS,
                    reference,
                    data: records,
                }),
                Some(block_size) => {
                    let blocks: Vec<&[u8]> = records.chunks(block_size).collect();
                    let link_ref = next_linked_ref;
                    next_linked_ref += 1;

                    let mut special = Vec::new();
                    special.extend_from_slice(&1i16.to_be_bytes());
                    special.extend_from_slice(&(records.len() as i32).to_be_bytes());
                    special.extend_from_slice(&(block_size as i32).to_be_bytes());
                    special.extend_from_slice(&(blocks.len() as i32).to_be_bytes());
                    special.extend_from_slice(&link_ref.to_be_bytes());
                    elements.push(Element {
                        tag: TAG_VS | SPECIAL_TAG_FLAG,
                        reference,
                        data: special,
                    });

                    let mut table = Vec::new();
                    table.extend_from_slice(&0u16.to_be_bytes());
                    let mut block_elements = Vec::new();
                    for block in blocks {
                        let block_ref = next_linked_ref;
                        next_linked_ref += 1;
                        table.extend_from_slice(&block_ref.to_be_bytes());
                        block_elements.push(Element {
                            tag: TAG_LINKED,
                            reference: block_ref,
                            data: block.to_vec(),
                        });
                    }
                    elements.push(Element {
                        tag: TAG_LINKED,
                        reference: link_ref,
                        data: table,
                    });
                    elements.extend(block_elements);
                }
            }
        }
        elements
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let elements = self.elements();
        let groups: Vec<&[Element]> = if self.split_descriptor_blocks && elements.len() > 1 {
            let mid = elements.len() / 2;
            vec![&elements[..mid], &elements[mid..]]
        } else {
            vec![&elements[..]]
        };

        // Layout: magic, every descriptor block, then element data
        let mut block_offsets = Vec::new();
        let mut offset = 4usize;
        for group in &groups {
            block_offsets.push(offset);
            offset += 6 + 12 * group.len();
        }

        let mut data_offsets = Vec::new();
        for element in &elements {
            data_offsets.push(offset);
            offset += element.data.len();
        }

        let mut out = vec![0x0e, 0x03, 0x13, 0x01];
        let mut index = 0;
        for (g, group) in groups.iter().enumerate() {
            let next = block_offsets.get(g + 1).copied().unwrap_or(0);
            out.extend_from_slice(&(group.len() as u16).to_be_bytes());
            out.extend_from_slice(&(next as u32).to_be_bytes());
            for element in group.iter() {
                out.extend_from_slice(&element.tag.to_be_bytes());
                out.extend_from_slice(&element.reference.to_be_bytes());
                out.extend_from_slice(&(data_offsets[index] as u32).to_be_bytes());
                out.extend_from_slice(&(element.data.len() as u32).to_be_bytes());
                index += 1;
            }
        }
        for element in &elements {
            out.extend_from_slice(&element.data);
        }
        out
    }

    pub fn write(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).expect("Failed to write HDF4 fixture");
    }
}

/// A small MAG/SWEPAM-like table: time columns, a 3-vector field and plasma values
pub fn magswe_table(name: &str, records: usize) -> VdataSpec {
    let year: Vec<i32> = (0..records).map(|_| 2000).collect();
    let day: Vec<i32> = (0..records).map(|r| 1 + r as i32).collect();
    let fp_year: Vec<f64> = (0..records).map(|r| 2000.0 + r as f64 / 1000.0).collect();
    let b_gse: Vec<f32> = (0..records * 3).map(|i| i as f32 * 0.5 - 3.25).collect();
    let proton_density: Vec<f32> = (0..records).map(|r| 4.0 + r as f32 * 0.125).collect();
    let flag: Vec<u8> = (0..records).map(|r| (r % 3) as u8).collect();

    VdataSpec::new(
        name,
        vec![
            FieldSpec::scalar("year", Column::I32(year)),
            FieldSpec::scalar("day", Column::I32(day)),
            FieldSpec::scalar("fp_year", Column::F64(fp_year)),
            FieldSpec::vector("Bgse", 3, Column::F32(b_gse)),
            FieldSpec::scalar("proton_density", Column::F32(proton_density)),
            FieldSpec::scalar("quality_flag", Column::U8(flag)),
        ],
    )
}

/// Write a MAGSWE fixture file holding the default table
pub fn write_magswe_file(path: &Path, records: usize) {
    Hdf4Builder::new()
        .vdata(magswe_table("MAGSWE_data_64sec", records))
        .write(path);
}
