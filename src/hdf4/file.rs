//! HDF4 file access: magic check, descriptor blocks and element reads

use super::cursor::ByteCursor;
use super::{HDF4_MAGIC, SPECIAL_LINKED, SPECIAL_TAG_FLAG, TAG_LINKED, TAG_NULL};
use crate::errors::{Hdf4Error, Hdf4Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

const DD_BLOCK_HEADER_LEN: usize = 6;
const DD_LEN: usize = 12;

/// One data descriptor: where the element with a given tag/ref lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataDescriptor {
    pub tag: u16,
    pub reference: u16,
    pub offset: u32,
    pub length: u32,
}

impl DataDescriptor {
    fn parse(cursor: &mut ByteCursor<'_>) -> Hdf4Result<Self> {
        Ok(Self {
            tag: cursor.u16()?,
            reference: cursor.u16()?,
            offset: cursor.u32()?,
            length: cursor.u32()?,
        })
    }

    /// Whether the element is a special element (linked, compressed, ...)
    pub fn is_special(&self) -> bool {
        self.tag & 0x8000 == 0 && self.tag & SPECIAL_TAG_FLAG != 0
    }

    /// Tag with the special-element flag cleared
    pub fn base_tag(&self) -> u16 {
        if self.is_special() {
            self.tag & !SPECIAL_TAG_FLAG
        } else {
            self.tag
        }
    }
}

/// Header of a linked-block special element
#[derive(Debug)]
struct LinkedBlockInfo {
    length: usize,
    number_blocks: usize,
    link_ref: u16,
}

impl LinkedBlockInfo {
    fn parse(cursor: &mut ByteCursor<'_>) -> Hdf4Result<Self> {
        let length = cursor.i32()?;
        let _block_length = cursor.i32()?;
        let number_blocks = cursor.i32()?;
        let link_ref = cursor.u16()?;
        if length < 0 || number_blocks < 0 {
            return Err(Hdf4Error::Malformed {
                what: "linked block header",
                message: format!("length {} with {} blocks", length, number_blocks),
            });
        }
        Ok(Self {
            length: length as usize,
            number_blocks: number_blocks as usize,
            link_ref,
        })
    }
}

/// An open HDF4 file with its descriptor list loaded
///
/// The underlying handle is released when the value is dropped.
pub struct Hdf4File<R = BufReader<File>> {
    reader: R,
    len: u64,
    descriptors: Vec<DataDescriptor>,
}

impl Hdf4File<BufReader<File>> {
    /// Open an HDF4 file from disk
    pub fn open(path: impl AsRef<Path>) -> Hdf4Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Hdf4File<R> {
    /// Read the magic number and every descriptor block
    pub fn from_reader(mut reader: R) -> Hdf4Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        let mut magic = [0u8; 4];
        reader.seek(SeekFrom::Start(0))?;
        match reader.read_exact(&mut magic) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(Hdf4Error::BadMagic(magic));
            }
            Err(e) => return Err(e.into()),
        }
        if magic != HDF4_MAGIC {
            return Err(Hdf4Error::BadMagic(magic));
        }

        let mut file = Self {
            reader,
            len,
            descriptors: Vec::new(),
        };
        file.load_descriptors()?;
        Ok(file)
    }

    fn load_descriptors(&mut self) -> Hdf4Result<()> {
        let mut offset = HDF4_MAGIC.len() as u64;
        let mut visited = HashSet::new();

        loop {
            if !visited.insert(offset) {
                return Err(Hdf4Error::Malformed {
                    what: "descriptor block chain",
                    message: format!("block at offset {} visited twice", offset),
                });
            }

            let header = self.read_at(offset, DD_BLOCK_HEADER_LEN as u64)?;
            let mut cursor = ByteCursor::new(&header, "descriptor block header");
            let ndds = cursor.u16()? as usize;
            let next = cursor.u32()?;

            let body = self.read_at(
                offset + DD_BLOCK_HEADER_LEN as u64,
                (ndds * DD_LEN) as u64,
            )?;
            let mut cursor = ByteCursor::new(&body, "descriptor block");
            for _ in 0..ndds {
                let dd = DataDescriptor::parse(&mut cursor)?;
                if dd.tag != TAG_NULL {
                    self.descriptors.push(dd);
                }
            }

            if next == 0 {
                return Ok(());
            }
            offset = next as u64;
        }
    }

    /// All non-empty descriptors, in file order
    pub fn descriptors(&self) -> &[DataDescriptor] {
        &self.descriptors
    }

    /// Descriptors whose base tag matches, in file order
    pub fn descriptors_with_tag(&self, tag: u16) -> impl Iterator<Item = &DataDescriptor> {
        self.descriptors.iter().filter(move |dd| dd.base_tag() == tag)
    }

    /// Find the descriptor of an element, special or not
    pub fn find(&self, tag: u16, reference: u16) -> Option<DataDescriptor> {
        self.descriptors
            .iter()
            .find(|dd| dd.base_tag() == tag && dd.reference == reference)
            .copied()
    }

    /// Read the full contents of an element, following linked blocks
    pub fn read_element(&mut self, tag: u16, reference: u16) -> Hdf4Result<Vec<u8>> {
        let dd = self
            .find(tag, reference)
            .ok_or(Hdf4Error::MissingElement { tag, reference })?;

        let raw = self.read_at(dd.offset as u64, dd.length as u64)?;
        if !dd.is_special() {
            return Ok(raw);
        }

        let mut cursor = ByteCursor::new(&raw, "special element header");
        match cursor.i16()? {
            SPECIAL_LINKED => {
                let info = LinkedBlockInfo::parse(&mut cursor)?;
                self.read_linked(&info)
            }
            code => Err(Hdf4Error::UnsupportedSpecial(code)),
        }
    }

    fn read_linked(&mut self, info: &LinkedBlockInfo) -> Hdf4Result<Vec<u8>> {
        let mut data = Vec::with_capacity(info.length.min(self.len as usize));
        let mut table_ref = info.link_ref;
        let mut visited = HashSet::new();

        while table_ref != 0 && data.len() < info.length {
            if !visited.insert(table_ref) {
                return Err(Hdf4Error::Malformed {
                    what: "linked block table chain",
                    message: format!("table ref {} visited twice", table_ref),
                });
            }

            let table = self.read_element(TAG_LINKED, table_ref)?;
            let mut cursor = ByteCursor::new(&table, "linked block table");
            let next_ref = cursor.u16()?;

            for _ in 0..info.number_blocks {
                let block_ref = cursor.u16()?;
                if block_ref == 0 || data.len() >= info.length {
                    break;
                }
                let block = self.read_element(TAG_LINKED, block_ref)?;
                let take = block.len().min(info.length - data.len());
                data.extend_from_slice(&block[..take]);
            }

            table_ref = next_ref;
        }

        if data.len() < info.length {
            return Err(Hdf4Error::Malformed {
                what: "linked block element",
                message: format!("expected {} bytes, blocks hold {}", info.length, data.len()),
            });
        }
        Ok(data)
    }

    fn read_at(&mut self, offset: u64, length: u64) -> Hdf4Result<Vec<u8>> {
        let truncated = || Hdf4Error::Truncated { offset, length };
        if offset.checked_add(length).map_or(true, |end| end > self.len) {
            return Err(truncated());
        }
        let len = usize::try_from(length).map_err(|_| truncated())?;
        let mut buf = vec![0u8; len];
        self.reader.seek(SeekFrom::Start(offset))?;
        match self.reader.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(truncated()),
            Err(e) => Err(e.into()),
        }
    }
}
