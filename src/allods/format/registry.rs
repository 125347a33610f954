//! Registry (hierarchical configuration tree) parsing.
//!
//! # File Structure
//! ```text
//! [4 bytes]  Magic 0x31415926 (u32 LE)
//! [4 bytes]  Root entry index
//! [4 bytes]  Root entry count
//! [4 bytes]  Flags (unused)
//! [4 bytes]  Entry area size, in entries
//! [4 bytes]  Reserved
//! [32 * n]   Index area, entry i at 0x18 + 32 * i
//! [...]      Data area, starting at 0x1C + 32 * entry_area_size
//! ```
//!
//! # Entry Structure (32 bytes)
//! ```text
//! [4 bytes]  Unused
//! [4 bytes]  Offset (data offset, child index, or the int value itself)
//! [4 bytes]  Count (byte length or child count)
//! [4 bytes]  Type
//! [16 bytes] Name, null-padded legacy codepage text
//! ```
//!
//! Float entries store an `f64` across the Offset and Count fields (bytes 4..12).

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;
use log::{debug, info, trace, warn};

use crate::allods::types::error::{AssetError, Result};
use crate::allods::types::registry::{RegistryNode, RegistryTree, RegistryValue};
use crate::allods::utils;

pub const REGISTRY_MAGIC: u32 = 0x3141_5926;

/// Start of the index area.
pub const INDEX_ORIGIN: u64 = 0x18;

/// Data offsets are relative to `DATA_ORIGIN_BASE + ENTRY_SIZE * entry_area_size`.
pub const DATA_ORIGIN_BASE: u64 = 0x1C;

pub const ENTRY_SIZE: u64 = 0x20;

/// Maximum directory nesting accepted before the file is considered cyclic.
pub const MAX_DEPTH: usize = 64;

/// Type codes of index entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    String,
    Directory,
    Int,
    Float,
    IntArray,
}

impl TryFrom<u32> for EntryType {
    type Error = AssetError;
    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::String),
            1 => Ok(Self::Directory),
            2 => Ok(Self::Int),
            4 => Ok(Self::Float),
            6 => Ok(Self::IntArray),
            _ => Err(AssetError::InvalidFormat(format!("Unknown registry entry type: {}", value))),
        }
    }
}

/// One raw 32-byte index entry.
#[derive(Debug, Clone, Copy)]
struct RawEntry {
    bytes: [u8; ENTRY_SIZE as usize],
}

impl RawEntry {
    fn offset(&self) -> u32 {
        LittleEndian::read_u32(&self.bytes[4..8])
    }

    fn count(&self) -> u32 {
        LittleEndian::read_u32(&self.bytes[8..12])
    }

    fn type_code(&self) -> u32 {
        LittleEndian::read_u32(&self.bytes[12..16])
    }

    fn name_bytes(&self) -> &[u8] {
        &self.bytes[16..32]
    }

    /// Offset and Count reinterpreted as one float, for type-4 entries.
    fn float_value(&self) -> f64 {
        LittleEndian::read_f64(&self.bytes[4..12])
    }
}

/// Header fields following the magic number.
#[derive(Debug, Clone, Copy)]
pub struct RegistryHeader {
    pub root_offset: u32,
    pub root_size: u32,
    pub flags: u32,
    pub entry_area_size: u32,
}

impl RegistryHeader {
    pub fn data_origin(&self) -> u64 {
        DATA_ORIGIN_BASE + ENTRY_SIZE * self.entry_area_size as u64
    }
}

/// Decodes a registry file into an immutable tree.
///
/// # Errors
/// - `InvalidFormat` if the magic number is missing, an int array length is not a
///   multiple of 4, or directories nest deeper than [`MAX_DEPTH`]
/// - `Truncated` if an entry or data range lies outside the stream
pub fn decode<R: Read + Seek>(reader: &mut R, encoding: &'static Encoding) -> Result<RegistryTree> {
    let total = utils::stream_len(reader)?;

    let magic = if total >= 4 { reader.read_u32::<LittleEndian>()? } else { 0 };
    if magic != REGISTRY_MAGIC {
        return Err(AssetError::InvalidFormat(format!(
            "Not a registry file: magic {:#010x}, expected {:#010x}",
            magic, REGISTRY_MAGIC
        )));
    }

    let header = RegistryHeader {
        root_offset: reader.read_u32::<LittleEndian>()?,
        root_size: reader.read_u32::<LittleEndian>()?,
        flags: reader.read_u32::<LittleEndian>()?,
        entry_area_size: reader.read_u32::<LittleEndian>()?,
    };
    let _reserved = reader.read_u32::<LittleEndian>()?;

    info!(
        "Decoding registry: root=[{}..+{}), {} index entries, data origin {:#x}",
        header.root_offset,
        header.root_size,
        header.entry_area_size,
        header.data_origin()
    );

    let mut tree_reader = TreeReader {
        reader,
        total,
        data_origin: header.data_origin(),
        encoding,
    };
    let children = tree_reader.read_directory(header.root_offset, header.root_size, 0)?;
    let tree = RegistryTree::new(children);

    info!("Registry decoded: {} nodes", tree.node_count());
    Ok(tree)
}

struct TreeReader<'a, R> {
    reader: &'a mut R,
    total: u64,
    data_origin: u64,
    encoding: &'static Encoding,
}

impl<R: Read + Seek> TreeReader<'_, R> {
    /// Decodes entries `[first, first + count)` as the children of one directory.
    fn read_directory(&mut self, first: u32, count: u32, depth: usize) -> Result<Vec<RegistryNode>> {
        if depth > MAX_DEPTH {
            return Err(AssetError::InvalidFormat(format!(
                "Registry directories nest deeper than {} levels",
                MAX_DEPTH
            )));
        }
        debug!("Registry directory: entries [{}..+{}) at depth {}", first, count, depth);

        let first = first as u64;
        let last = first + count as u64;
        let available = self.total.saturating_sub(INDEX_ORIGIN) / ENTRY_SIZE;
        let mut children = Vec::with_capacity((count as u64).min(available) as usize);

        for index in first..last {
            let entry = self.read_entry(index)?;
            if let Some(node) = self.read_node(index, &entry, depth)? {
                children.push(node);
            }
        }
        Ok(children)
    }

    fn read_entry(&mut self, index: u64) -> Result<RawEntry> {
        let position = INDEX_ORIGIN + ENTRY_SIZE * index;
        utils::ensure_range(position, ENTRY_SIZE, self.total, &format!("Registry entry #{}", index))?;
        self.reader.seek(SeekFrom::Start(position))?;
        let mut entry = RawEntry {
            bytes: [0u8; ENTRY_SIZE as usize],
        };
        self.reader.read_exact(&mut entry.bytes)?;
        Ok(entry)
    }

    fn read_node(&mut self, index: u64, entry: &RawEntry, depth: usize) -> Result<Option<RegistryNode>> {
        let name = utils::decode_fixed_string(entry.name_bytes(), self.encoding);

        let entry_type = match EntryType::try_from(entry.type_code()) {
            Ok(t) => t,
            Err(_) => {
                warn!(
                    "Skipping registry entry #{} '{}' with unknown type {}",
                    index,
                    name,
                    entry.type_code()
                );
                return Ok(None);
            }
        };
        trace!("Registry entry #{} '{}': {:?}", index, name, entry_type);

        let value = match entry_type {
            EntryType::String => {
                let bytes = self.read_data(entry, &name)?;
                RegistryValue::String(utils::decode_text(&bytes, self.encoding))
            }
            EntryType::Directory => RegistryValue::Directory(self.read_directory(
                entry.offset(),
                entry.count(),
                depth + 1,
            )?),
            EntryType::Int => RegistryValue::Int(entry.offset() as i32),
            EntryType::Float => RegistryValue::Float(entry.float_value()),
            EntryType::IntArray => {
                if entry.count() % 4 != 0 {
                    return Err(AssetError::InvalidFormat(format!(
                        "Registry array '{}' has length {}, not a multiple of 4",
                        name,
                        entry.count()
                    )));
                }
                let bytes = self.read_data(entry, &name)?;
                let mut values = vec![0i32; bytes.len() / 4];
                LittleEndian::read_i32_into(&bytes, &mut values);
                RegistryValue::IntArray(values)
            }
        };

        Ok(Some(RegistryNode::new(name, value)))
    }

    /// Reads the `count` bytes an entry references in the data area.
    fn read_data(&mut self, entry: &RawEntry, name: &str) -> Result<Vec<u8>> {
        let start = self.data_origin + entry.offset() as u64;
        let len = entry.count() as u64;
        utils::ensure_range(start, len, self.total, &format!("Registry value '{}'", name))?;
        self.reader.seek(SeekFrom::Start(start))?;
        utils::read_bytes(&mut *self.reader, len as usize)
    }
}
