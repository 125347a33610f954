//! # allods-assets
//!
//! Decoders for the binary assets of the Allods game client:
//! run-length encoded sprite streams (`.256`, `.16a`, `.16`), their palettes,
//! font metric tables, and the offset-addressed registry configuration trees.
//!
//! All decoders read a complete stream eagerly and return immutable, owned
//! structures. Nothing holds on to the stream after a call returns.
pub mod allods;

// Re-export the main types for convenience
pub use allods::{
    AssetError,
    AssetLoader,
    ByteSource,
    DirectorySource,
    LoaderOptions,
    MemorySource,
    Result,
    types::{
        models::{Font, Frame, GlyphWidths, Palette, Pixel, Rgba, SpriteFormat, SpriteSet},
        pixel_format::{AlphaMask4, Indexed8, IndexedAlpha16, PixelFormat},
        registry::{RegistryNode, RegistryTree, RegistryValue},
    },
};
