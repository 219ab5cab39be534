//! Native reader for the subset of HDF4 the converter needs
//!
//! An HDF4 file is a magic number followed by a linked list of data
//! descriptor (DD) blocks. Each DD points at one element by tag/ref pair.
//! Tables are stored as Vdata: a `VH` element holding the header (field
//! names, number types, orders, record layout) and a `VS` element with the
//! same ref holding the packed records, either contiguous or as a
//! linked-block special element.
//!
//! All integers in the structural metadata are big-endian.

mod cursor;
pub mod file;
pub mod number_type;
pub mod vdata;

pub use file::{DataDescriptor, Hdf4File};
pub use number_type::{ByteOrder, NumberType};
pub use vdata::{Interlace, VdataField, VdataHeader};

/// Magic number at offset 0 of every HDF4 file
pub const HDF4_MAGIC: [u8; 4] = [0x0e, 0x03, 0x13, 0x01];

/// Empty descriptor slot
pub const TAG_NULL: u16 = 1;
/// Linked-block table or data block
pub const TAG_LINKED: u16 = 20;
/// Vdata header
pub const TAG_VH: u16 = 1962;
/// Vdata storage
pub const TAG_VS: u16 = 1963;

/// Bit marking a tag as a special element
pub const SPECIAL_TAG_FLAG: u16 = 0x4000;
/// Special element stored as a chain of linked blocks
pub const SPECIAL_LINKED: i16 = 1;
