//! Builders for synthetic sprite and registry containers.
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

/// Palette whose entry `i` is `0xFF000000 | i * 0x010101`.
pub fn grey_palette() -> Vec<u32> {
    (0..256u32).map(|i| 0xFF00_0000 | (i * 0x0001_0101)).collect()
}

/// One frame record: width, height, data length and the raw control stream.
pub struct FrameRecord {
    pub width: u32,
    pub height: u32,
    pub data_length: u32,
    pub data: Vec<u8>,
}

impl FrameRecord {
    /// A record whose declared length matches its data.
    pub fn new(width: u32, height: u32, data: &[u8]) -> Self {
        Self {
            width,
            height,
            data_length: data.len() as u32,
            data: data.to_vec(),
        }
    }
}

/// Assembles a sprite container. `frame_count` is written verbatim into the trailer.
pub fn sprite_file(palette: Option<&[u32]>, frames: &[FrameRecord], frame_count: u32) -> Vec<u8> {
    let mut out = Vec::new();
    if let Some(colors) = palette {
        for i in 0..256 {
            out.write_u32::<LittleEndian>(colors.get(i).copied().unwrap_or(0)).unwrap();
        }
    }
    for frame in frames {
        out.write_u32::<LittleEndian>(frame.width).unwrap();
        out.write_u32::<LittleEndian>(frame.height).unwrap();
        out.write_u32::<LittleEndian>(frame.data_length).unwrap();
        out.extend_from_slice(&frame.data);
    }
    out.write_u32::<LittleEndian>(frame_count).unwrap();
    out
}

pub const TYPE_STRING: u32 = 0;
pub const TYPE_DIRECTORY: u32 = 1;
pub const TYPE_INT: u32 = 2;
pub const TYPE_FLOAT: u32 = 4;
pub const TYPE_ARRAY: u32 = 6;

/// Builds registry containers entry by entry.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<[u8; 32]>,
    data: Vec<u8>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw entry and returns its index.
    pub fn entry(&mut self, offset: u32, count: u32, type_code: u32, name: &[u8]) -> u32 {
        let mut raw = [0u8; 32];
        raw[4..8].copy_from_slice(&offset.to_le_bytes());
        raw[8..12].copy_from_slice(&count.to_le_bytes());
        raw[12..16].copy_from_slice(&type_code.to_le_bytes());
        raw[16..16 + name.len()].copy_from_slice(name);
        self.entries.push(raw);
        (self.entries.len() - 1) as u32
    }

    pub fn directory(&mut self, name: &str, first_child: u32, child_count: u32) -> u32 {
        self.entry(first_child, child_count, TYPE_DIRECTORY, name.as_bytes())
    }

    pub fn int(&mut self, name: &str, value: i32) -> u32 {
        self.entry(value as u32, 0, TYPE_INT, name.as_bytes())
    }

    /// A float entry: the value's bits span the offset and count fields.
    pub fn float(&mut self, name: &str, value: f64) -> u32 {
        let bits = value.to_bits();
        self.entry(bits as u32, (bits >> 32) as u32, TYPE_FLOAT, name.as_bytes())
    }

    /// Overwrites the leading unused field of an entry.
    pub fn set_unused(&mut self, index: u32, value: u32) {
        self.entries[index as usize][0..4].copy_from_slice(&value.to_le_bytes());
    }

    /// Adds raw bytes to the data area and returns their offset.
    pub fn data(&mut self, bytes: &[u8]) -> u32 {
        let offset = self.data.len() as u32;
        self.data.extend_from_slice(bytes);
        offset
    }

    pub fn string_bytes(&mut self, name: &[u8], text: &[u8]) -> u32 {
        let offset = self.data(text);
        self.entry(offset, text.len() as u32, TYPE_STRING, name)
    }

    pub fn string(&mut self, name: &str, text: &str) -> u32 {
        self.string_bytes(name.as_bytes(), text.as_bytes())
    }

    pub fn int_array(&mut self, name: &str, values: &[i32]) -> u32 {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let offset = self.data(&bytes);
        self.entry(offset, bytes.len() as u32, TYPE_ARRAY, name.as_bytes())
    }

    /// Serialises the container with the given root range.
    pub fn build(&self, root_offset: u32, root_size: u32) -> Vec<u8> {
        self.build_with_magic(0x3141_5926, root_offset, root_size)
    }

    pub fn build_with_magic(&self, magic: u32, root_offset: u32, root_size: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(magic).unwrap();
        out.write_u32::<LittleEndian>(root_offset).unwrap();
        out.write_u32::<LittleEndian>(root_size).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap(); // flags
        out.write_u32::<LittleEndian>(self.entries.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(0).unwrap(); // reserved
        for raw in &self.entries {
            out.extend_from_slice(raw);
        }
        // The data area starts four bytes past the end of the index area.
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&self.data);
        out
    }
}
