//! Codec layer for pixel stream decoding.
//!
//! This module provides the pure data transformations used by the sprite
//! container parser in [`crate::allods::format`].
//!
//! # Submodules
//!
//! - [`rle`][]: Run-length control stream shared by all sprite encodings

pub mod rle;
