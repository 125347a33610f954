use encoding_rs::Encoding;
use log::info;

use super::format::{font, palette, registry, sprite};
use super::source::ByteSource;
use super::types::error::Result;
use super::types::models::{Font, Palette, SpriteFormat, SpriteSet};
use super::types::registry::RegistryTree;
use super::utils;

/// Decoding settings shared by every asset a loader reads.
#[derive(Debug, Clone, Copy)]
pub struct LoaderOptions {
    /// Codepage of registry names and strings.
    pub encoding: &'static Encoding,
    /// Offset of the colour table in standalone palette files.
    pub palette_offset: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            encoding: utils::DEFAULT_ENCODING,
            palette_offset: palette::DEFAULT_PALETTE_OFFSET,
        }
    }
}

/// Loads assets by logical path from a [`ByteSource`].
///
/// Every load opens its own stream, decodes the whole asset eagerly and drops
/// the stream before returning, on success and on failure alike. The results
/// are plain owned values that can be shared across threads.
#[derive(Debug, Clone)]
pub struct AssetLoader<S: ByteSource> {
    source: S,
    options: LoaderOptions,
}

impl<S: ByteSource> AssetLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, LoaderOptions::default())
    }

    pub fn with_options(source: S, options: LoaderOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads a sprite, choosing the encoding from the file extension.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The extension is not `.256`, `.16a` or `.16`
    /// - The path cannot be opened
    /// - The container is malformed or truncated
    pub fn load_sprite(&self, path: &str) -> Result<SpriteSet> {
        let format = SpriteFormat::from_path(path)?;
        info!("Loading sprite '{}' as {}", path, format);
        let mut stream = self.source.open(path)?;
        sprite::decode_as(&mut stream, format)
    }

    /// Loads a standalone palette at the configured offset.
    pub fn load_palette(&self, path: &str) -> Result<Palette> {
        info!("Loading palette '{}' at {:#x}", path, self.options.palette_offset);
        let mut stream = self.source.open(path)?;
        palette::decode(&mut stream, self.options.palette_offset)
    }

    pub fn load_registry(&self, path: &str) -> Result<RegistryTree> {
        info!("Loading registry '{}'", path);
        let mut stream = self.source.open(path)?;
        registry::decode(&mut stream, self.options.encoding)
    }

    /// Loads a font: the glyph sprite at `path` and its sibling `.dat` width table.
    pub fn load_font(&self, path: &str) -> Result<Font> {
        let widths_path = font::widths_path(path);
        info!("Loading font '{}' with metrics '{}'", path, widths_path);
        let widths = {
            let mut stream = self.source.open(&widths_path)?;
            font::decode_glyph_widths(&mut stream)?
        };
        let glyphs = self.load_sprite(path)?;
        Ok(Font { widths, glyphs })
    }
}
