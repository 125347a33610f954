//! Font metric table parsing.
//!
//! A font is a sprite file (one frame per glyph) plus a sibling `.dat` file
//! holding one little-endian `i32` advance width per glyph, starting at 0x20.

use std::io::{Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::allods::types::error::Result;
use crate::allods::types::models::{GlyphWidths, GLYPH_COUNT};
use crate::allods::utils;

/// Reads up to [`GLYPH_COUNT`] widths; glyphs past the end of the table get width 0.
pub fn decode_glyph_widths<R: Read + Seek>(reader: &mut R) -> Result<GlyphWidths> {
    let available = (utils::stream_len(reader)? / 4) as usize;
    let mut widths = [0i32; GLYPH_COUNT];
    let present = available.min(GLYPH_COUNT);
    reader.read_i32_into::<LittleEndian>(&mut widths[..present])?;
    debug!("Font metrics: {} widths in table, {} used", available, present);
    Ok(GlyphWidths(widths))
}

/// Path of the metric table belonging to a font sprite: same stem, `.dat` extension.
pub fn widths_path(sprite_path: &str) -> String {
    match sprite_path.rfind('.') {
        Some(dot) if !sprite_path[dot..].contains('/') => format!("{}.dat", &sprite_path[..dot]),
        _ => format!("{}.dat", sprite_path),
    }
}
