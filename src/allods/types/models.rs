//! Core data structures for decoded sprite assets.
//!
//! This module defines the in-memory results of the sprite decoders:
//! - Colours and pixels
//! - Palettes, frames and sprite sets
//! - Sprite encoding identifiers and font metrics

use std::fmt;
use std::path::Path;

use super::error::{AssetError, Result};

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

/// Number of glyph widths kept from a font metric table.
pub const GLYPH_COUNT: usize = 224;

/// A straight (non-premultiplied) 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a legacy `0xAARRGGBB` word, the layout palette entries are stored in.
    pub const fn from_argb(word: u32) -> Self {
        Self {
            a: (word >> 24) as u8,
            r: (word >> 16) as u8,
            g: (word >> 8) as u8,
            b: word as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// A single decoded sprite pixel.
///
/// Palette-indexed encodings keep the index unresolved; the colour is looked up
/// only when a consumer calls [`Pixel::resolve`] with the sprite's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    Indexed { index: u8, alpha: u8 },
    Color(Rgba),
}

impl Pixel {
    /// The value of every pixel the decode stream never writes.
    pub const TRANSPARENT: Pixel = Pixel::Color(Rgba::TRANSPARENT);

    /// The legacy carried form: an index is replicated into the RGB channels.
    pub fn to_rgba(self) -> Rgba {
        match self {
            Pixel::Indexed { index, alpha } => Rgba::new(index, index, index, alpha),
            Pixel::Color(color) => color,
        }
    }

    /// Resolves an indexed pixel through `palette`, keeping the pixel's own alpha.
    ///
    /// Without a palette the carried form from [`Pixel::to_rgba`] is returned.
    pub fn resolve(self, palette: Option<&Palette>) -> Rgba {
        match (self, palette) {
            (Pixel::Indexed { index, alpha }, Some(palette)) => {
                palette.color_at(index as i32).with_alpha(alpha)
            }
            _ => self.to_rgba(),
        }
    }

    pub fn is_transparent(self) -> bool {
        self == Pixel::TRANSPARENT
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Pixel::TRANSPARENT
    }
}

/// A fixed 256-entry colour table.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgba; PALETTE_SIZE],
}

impl Palette {
    /// Builds a palette from packed `0xAARRGGBB` words.
    ///
    /// Missing entries are zero; words past the 256th are ignored.
    pub fn from_colors(words: &[u32]) -> Self {
        let mut colors = [Rgba::TRANSPARENT; PALETTE_SIZE];
        for (slot, &word) in colors.iter_mut().zip(words) {
            *slot = Rgba::from_argb(word);
        }
        Self { colors }
    }

    /// Colour at `index`, or transparent black outside `0..=255`.
    pub fn color_at(&self, index: i32) -> Rgba {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i))
            .copied()
            .unwrap_or(Rgba::TRANSPARENT)
    }

    pub fn colors(&self) -> &[Rgba; PALETTE_SIZE] {
        &self.colors
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("first", &self.colors[0])
            .field("last", &self.colors[PALETTE_SIZE - 1])
            .finish()
    }
}

/// One raster image of a sprite set, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Frame {
    /// Wraps a decoded pixel buffer.
    ///
    /// # Errors
    /// Returns `InvalidFormat` if a dimension is zero or the buffer length is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidFormat(format!(
                "Frame dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(AssetError::InvalidFormat(format!(
                "Frame {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Resolves every pixel through `palette` into a flat RGBA buffer.
    pub fn resolve(&self, palette: Option<&Palette>) -> Vec<Rgba> {
        self.pixels.iter().map(|p| p.resolve(palette)).collect()
    }
}

/// A decoded sprite file: frames in file order and the palette they share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSet {
    pub palette: Option<Palette>,
    pub frames: Vec<Frame>,
}

impl SpriteSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Largest width and largest height over all frames (zero for an empty set).
    pub fn max_frame_size(&self) -> (u32, u32) {
        self.frames.iter().fold((0, 0), |(w, h), frame| {
            (w.max(frame.width()), h.max(frame.height()))
        })
    }

    /// Total number of pixels allocated across all frames.
    pub fn pixel_count(&self) -> usize {
        self.frames.iter().map(|f| f.pixels().len()).sum()
    }
}

/// The three sprite stream encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteFormat {
    /// `.256`: 8-bit palette index per pixel, fully opaque.
    Indexed8,
    /// `.16a`: 16-bit palette index plus 4-bit alpha per pixel.
    IndexedAlpha16,
    /// `.16`: two 4-bit alpha values per byte, white, no palette.
    AlphaMask4,
}

impl SpriteFormat {
    /// Picks the encoding from a file name's extension (case-insensitive).
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "256" => Ok(Self::Indexed8),
            "16a" => Ok(Self::IndexedAlpha16),
            "16" => Ok(Self::AlphaMask4),
            _ => Err(AssetError::UnsupportedFormat(format!(
                "Couldn't guess the sprite type of \"{}\"",
                path
            ))),
        }
    }

    pub fn has_palette(&self) -> bool {
        !matches!(self, Self::AlphaMask4)
    }
}

impl fmt::Display for SpriteFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SpriteFormat::Indexed8 => write!(f, "256"),
            SpriteFormat::IndexedAlpha16 => write!(f, "16a"),
            SpriteFormat::AlphaMask4 => write!(f, "16"),
        }
    }
}

/// Per-glyph advance widths of a bitmap font, starting at character 0x20.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphWidths(pub [i32; GLYPH_COUNT]);

impl GlyphWidths {
    pub fn get(&self, glyph: usize) -> i32 {
        self.0.get(glyph).copied().unwrap_or(0)
    }
}

/// A bitmap font: glyph sprites plus their metric table.
#[derive(Debug, Clone)]
pub struct Font {
    pub widths: GlyphWidths,
    pub glyphs: SpriteSet,
}

impl Font {
    /// Size of one glyph cell: the largest frame width and height.
    pub fn cell_size(&self) -> (u32, u32) {
        self.glyphs.max_frame_size()
    }
}
