//! Sprite container parsing.
//!
//! # Container Structure
//! ```text
//! [1024 bytes]  Palette (256 x u32 LE)      .256 and .16a only
//! frame records, each:
//!   [4 bytes]   width (u32 LE)
//!   [4 bytes]   height (u32 LE)
//!   [4 bytes]   data length (u32 LE)
//!   [N bytes]   control stream
//! [4 bytes]     frame count (u32 LE, top bit reserved)
//! ```

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info, warn};

use super::palette;
use crate::allods::codec::rle;
use crate::allods::types::error::{AssetError, Result};
use crate::allods::types::models::{SpriteFormat, SpriteSet};
use crate::allods::types::pixel_format::{AlphaMask4, Indexed8, IndexedAlpha16, PixelFormat};

/// The top bit of the trailing frame count is a flag with no known meaning.
const FRAME_COUNT_MASK: u32 = 0x7FFF_FFFF;

/// Decodes a sprite container whose encoding is only known at runtime.
pub fn decode_as<R: Read + Seek>(reader: &mut R, format: SpriteFormat) -> Result<SpriteSet> {
    match format {
        SpriteFormat::Indexed8 => decode::<Indexed8, R>(reader),
        SpriteFormat::IndexedAlpha16 => decode::<IndexedAlpha16, R>(reader),
        SpriteFormat::AlphaMask4 => decode::<AlphaMask4, R>(reader),
    }
}

/// Decodes a complete sprite container of encoding `F`.
///
/// # Errors
/// - `InvalidFormat` if any frame has a zero width, height or data length
/// - `Truncated` if the stream ends before the declared frames are read
pub fn decode<F: PixelFormat, R: Read + Seek>(reader: &mut R) -> Result<SpriteSet> {
    // Step 1: Frame count lives in the last four bytes
    let stream_len = reader.seek(SeekFrom::End(0))?;
    if stream_len < 4 {
        return Err(AssetError::Truncated(format!(
            "{} sprite is {} bytes, too short for a frame count",
            F::DEBUG_NAME,
            stream_len
        )));
    }
    reader.seek(SeekFrom::End(-4))?;
    let raw_count = reader.read_u32::<LittleEndian>()?;
    let count = raw_count & FRAME_COUNT_MASK;
    if raw_count != count {
        debug!("{} sprite frame count has reserved bit set ({:#010x})", F::DEBUG_NAME, raw_count);
    }

    // Step 2: Palette block, if this encoding has one
    reader.seek(SeekFrom::Start(0))?;
    let palette = if F::HAS_PALETTE {
        Some(palette::read_entries(reader)?)
    } else {
        None
    };

    info!("Decoding {} sprite: {} frames, palette={}", F::DEBUG_NAME, count, palette.is_some());

    // Step 3: Frame records. Capacity is bounded by what the stream could hold.
    let mut frames = Vec::with_capacity(count.min((stream_len / 12) as u32) as usize);
    for index in 0..count {
        let width = reader.read_u32::<LittleEndian>()?;
        let height = reader.read_u32::<LittleEndian>()?;
        let data_length = reader.read_u32::<LittleEndian>()?;
        let frame_start = reader.stream_position()?;

        if width == 0 || height == 0 || data_length == 0 {
            return Err(AssetError::InvalidFormat(format!(
                "Invalid {} sprite: null frame #{} ({}x{}, {} bytes)",
                F::DEBUG_NAME,
                index,
                width,
                height,
                data_length
            )));
        }

        debug!("Frame #{}: {}x{}, {} bytes at {:#x}", index, width, height, data_length, frame_start);
        let frame = rle::decode_frame::<F, R>(reader, width, height, data_length)?;

        // Resynchronise with the frame table regardless of how far the decoder read
        let next = frame_start + data_length as u64;
        let consumed = reader.stream_position()? - frame_start;
        if consumed != data_length as u64 {
            warn!(
                "Frame #{} consumed {} bytes but declares {}; resyncing",
                index, consumed, data_length
            );
        }
        reader.seek(SeekFrom::Start(next))?;
        frames.push(frame);
    }

    info!("{} sprite decoded: {} frames", F::DEBUG_NAME, frames.len());
    Ok(SpriteSet { palette, frames })
}
