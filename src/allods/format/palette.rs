//! Palette block parsing.
//!
//! A palette is 256 little-endian `0xAARRGGBB` words. Standalone palette files
//! are bitmaps whose colour table starts at [`DEFAULT_PALETTE_OFFSET`]; sprite
//! containers carry theirs at offset 0.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;

use crate::allods::types::error::Result;
use crate::allods::types::models::{Palette, PALETTE_SIZE};

/// Offset of the colour table in a legacy bitmap palette file.
pub const DEFAULT_PALETTE_OFFSET: u64 = 0x36;

/// Seeks to `offset` and reads a full palette.
///
/// # Errors
/// Returns `Truncated` if the stream ends before all 256 entries are read.
pub fn decode<R: Read + Seek>(reader: &mut R, offset: u64) -> Result<Palette> {
    reader.seek(SeekFrom::Start(offset))?;
    read_entries(reader)
}

/// Reads 256 entries from the current position.
pub fn read_entries<R: Read>(reader: &mut R) -> Result<Palette> {
    let mut words = [0u32; PALETTE_SIZE];
    reader.read_u32_into::<LittleEndian>(&mut words)?;
    trace!("Palette read: entry[0]={:#010x}, entry[255]={:#010x}", words[0], words[PALETTE_SIZE - 1]);
    Ok(Palette::from_colors(&words))
}
