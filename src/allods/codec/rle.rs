//! Run-length control stream shared by every sprite encoding.
//!
//! A frame's data is a sequence of control units. After widening to 16 bits and
//! masking with `0xC03F`, bits 14-15 select the operation and bits 0-5 carry a
//! count (0-63):
//!
//! ```text
//! class 0x0000  literal run   decode `count` source units at the cursor
//! class 0x4000  row skip      advance `count * width` pixels
//! other         pixel skip    advance `count` pixels
//! ```
//!
//! Skips never write, so skipped pixels keep their zero value (transparent).

use std::io::Read;

use log::trace;

use crate::allods::types::error::{AssetError, Result};
use crate::allods::types::models::{Frame, Pixel};
use crate::allods::types::pixel_format::PixelFormat;

pub const CONTROL_MASK: u16 = 0xC03F;
pub const CLASS_MASK: u16 = 0xC000;
pub const COUNT_MASK: u16 = 0x003F;
pub const ROW_SKIP: u16 = 0x4000;

/// A zero-initialised pixel buffer with a row-major write cursor.
#[derive(Debug)]
pub struct Canvas {
    width: usize,
    pixels: Vec<Pixel>,
    cursor: usize,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let total = usize::try_from(width as u64 * height as u64).map_err(|_| {
            AssetError::InvalidFormat(format!("Frame {}x{} is not addressable", width, height))
        })?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(total).map_err(|e| {
            AssetError::InvalidFormat(format!("Cannot allocate a {}x{} frame: {}", width, height, e))
        })?;
        pixels.resize(total, Pixel::TRANSPARENT);
        Ok(Self {
            width: width as usize,
            pixels,
            cursor: 0,
        })
    }

    /// Advances the cursor without writing. Skipping past the end is allowed;
    /// only a later write fails.
    pub fn skip(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_add(count);
    }

    pub fn skip_rows(&mut self, rows: usize) {
        self.skip(rows.saturating_mul(self.width));
    }

    /// Writes `pixel` at the cursor and advances by one.
    pub fn put(&mut self, pixel: Pixel) -> Result<()> {
        let len = self.pixels.len();
        let cursor = self.cursor;
        let slot = self.pixels.get_mut(cursor).ok_or_else(|| {
            AssetError::InvalidFormat(format!(
                "Literal run writes pixel {} past the end of a {}-pixel frame",
                cursor, len
            ))
        })?;
        *slot = pixel;
        self.cursor += 1;
        Ok(())
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }
}

/// Decodes one frame's control stream.
///
/// `data_length` is the frame's declared byte budget. The loop stops once the
/// budget is spent; it may overshoot by a partial run, and the caller is
/// responsible for re-seeking to the next frame record.
///
/// # Errors
/// - `Truncated` if the stream ends mid-frame
/// - `InvalidFormat` if a literal run writes past the end of the frame, or if
///   the `width * height` buffer cannot be allocated
pub fn decode_frame<F: PixelFormat, R: Read>(
    reader: &mut R,
    width: u32,
    height: u32,
    data_length: u32,
) -> Result<Frame> {
    let mut canvas = Canvas::new(width, height)?;
    let mut remaining = data_length as i64;

    while remaining > 0 {
        let control = F::read_control(reader)? & CONTROL_MASK;
        remaining -= F::CONTROL_WIDTH;

        let count = control & COUNT_MASK;
        match control & CLASS_MASK {
            0 => {
                trace!("{} literal run of {} at pixel {}", F::DEBUG_NAME, count, canvas.cursor());
                remaining -= F::decode_run(reader, count, &mut canvas)?;
            }
            ROW_SKIP => canvas.skip_rows(count as usize),
            _ => canvas.skip(count as usize),
        }
    }

    Frame::new(width, height, canvas.into_pixels())
}
