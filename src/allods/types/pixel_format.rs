//! Specialization logic for the three sprite stream encodings (.256, .16a, .16).
//!
//! All three share one control-stream algorithm (see [`crate::allods::codec::rle`]);
//! they differ only in control unit width, palette presence and how a literal
//! run turns source bytes into pixels.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use super::error::Result;
use super::models::{Pixel, Rgba, SpriteFormat};
use crate::allods::codec::rle::Canvas;

/// A trait that defines the behavior of one sprite stream encoding.
pub trait PixelFormat {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// The runtime identifier of this encoding.
    const FORMAT: SpriteFormat;

    /// Whether the container starts with a 256-entry palette block.
    const HAS_PALETTE: bool;

    /// Size in bytes of one control unit.
    const CONTROL_WIDTH: i64;

    /// Reads one control unit and returns it as a 16-bit value.
    fn read_control<R: Read>(reader: &mut R) -> Result<u16>;

    /// Decodes a literal run of `count` source units onto `canvas`.
    ///
    /// Returns the number of bytes consumed from the frame's budget.
    fn decode_run<R: Read>(reader: &mut R, count: u16, canvas: &mut Canvas) -> Result<i64>;
}

/// Widens a single control byte by duplicating it into both halves of a word.
///
/// The legacy loader did this for every 1-byte control stream, which is what
/// lets bits 14-15 act as the class tag.
pub fn widen_control(byte: u8) -> u16 {
    let v = byte as u16;
    v | (v << 8)
}

/// `.256` literal: index carried opaque.
pub fn decode_indexed8(v: u8) -> Pixel {
    Pixel::Indexed { index: v, alpha: 0xFF }
}

/// `.16a` literal: averaged index plus the high nibble of the upper byte as alpha.
pub fn decode_indexed_alpha16(v: u16) -> Pixel {
    let hi = v >> 8;
    let lo = v & 0xFF;
    let index = ((hi + lo) >> 1) & 0xFF;
    let nibble = hi & 0xF0;
    let alpha = nibble | (nibble >> 4);
    Pixel::Indexed {
        index: index as u8,
        alpha: alpha as u8,
    }
}

/// `.16` literal: a 4-bit alpha value over white.
pub fn decode_alpha_nibble(nibble: u8) -> Pixel {
    let n = nibble & 0x0F;
    Pixel::Color(Rgba::new(0xFF, 0xFF, 0xFF, n | (n << 4)))
}

/// Zero-cost marker struct for `.256` sprites.
#[derive(Debug)]
pub struct Indexed8;

impl PixelFormat for Indexed8 {
    const DEBUG_NAME: &'static str = "256";
    const FORMAT: SpriteFormat = SpriteFormat::Indexed8;
    const HAS_PALETTE: bool = true;
    const CONTROL_WIDTH: i64 = 1;

    fn read_control<R: Read>(reader: &mut R) -> Result<u16> {
        Ok(widen_control(reader.read_u8()?))
    }

    fn decode_run<R: Read>(reader: &mut R, count: u16, canvas: &mut Canvas) -> Result<i64> {
        for _ in 0..count {
            canvas.put(decode_indexed8(reader.read_u8()?))?;
        }
        Ok(count as i64)
    }
}

/// Zero-cost marker struct for `.16a` sprites.
#[derive(Debug)]
pub struct IndexedAlpha16;

impl PixelFormat for IndexedAlpha16 {
    const DEBUG_NAME: &'static str = "16A";
    const FORMAT: SpriteFormat = SpriteFormat::IndexedAlpha16;
    const HAS_PALETTE: bool = true;
    const CONTROL_WIDTH: i64 = 2;

    fn read_control<R: Read>(reader: &mut R) -> Result<u16> {
        Ok(reader.read_u16::<LittleEndian>()?)
    }

    fn decode_run<R: Read>(reader: &mut R, count: u16, canvas: &mut Canvas) -> Result<i64> {
        for _ in 0..count {
            canvas.put(decode_indexed_alpha16(reader.read_u16::<LittleEndian>()?))?;
        }
        Ok(count as i64 * 2)
    }
}

/// Zero-cost marker struct for `.16` alpha-mask sprites.
#[derive(Debug)]
pub struct AlphaMask4;

impl PixelFormat for AlphaMask4 {
    const DEBUG_NAME: &'static str = "16";
    const FORMAT: SpriteFormat = SpriteFormat::AlphaMask4;
    const HAS_PALETTE: bool = false;
    const CONTROL_WIDTH: i64 = 1;

    fn read_control<R: Read>(reader: &mut R) -> Result<u16> {
        Ok(widen_control(reader.read_u8()?))
    }

    fn decode_run<R: Read>(reader: &mut R, count: u16, canvas: &mut Canvas) -> Result<i64> {
        let mut bytes = vec![0u8; count as usize];
        reader.read_exact(&mut bytes)?;

        // An odd pixel count is encoded as an empty high nibble in the run's last byte.
        let last_has_second = bytes.last().is_some_and(|b| b & 0xF0 != 0);
        for (j, &byte) in bytes.iter().enumerate() {
            canvas.put(decode_alpha_nibble(byte))?;
            if j + 1 != bytes.len() || last_has_second {
                canvas.put(decode_alpha_nibble(byte >> 4))?;
            }
        }
        Ok(count as i64)
    }
}
