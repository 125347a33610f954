//! File format parsing layer for Allods asset containers.
//!
//! This module provides the mid-level parsing layer that bridges between
//! raw streams and the high-level [`AssetLoader`](crate::allods::loader::AssetLoader).
//!
//! # Module Organization
//!
//! - [`palette`]: 256-entry colour tables, standalone or embedded
//! - [`sprite`]: Frame tables of `.256`, `.16a` and `.16` sprite containers
//! - [`registry`]: Index/data-area configuration trees
//! - [`font`]: Glyph width tables accompanying font sprites
//!
//! # Architecture
//!
//! ```text
//! Sprite container:            Registry:
//! ┌─────────────────┐          ┌─────────────────┐
//! │  Palette        │ ←palette │  Header         │ ← registry::decode()
//! ├─────────────────┤          ├─────────────────┤
//! │  Frame records  │ ←sprite  │  Index area     │
//! │  (RLE streams)  │  + rle   ├─────────────────┤
//! ├─────────────────┤          │  Data area      │
//! │  Frame count    │          └─────────────────┘
//! └─────────────────┘
//! ```

pub mod font;
pub mod palette;
pub mod registry;
pub mod sprite;
