//! Foundational data structures, error types, and pixel format definitions.

pub mod error;
pub mod models;
pub mod pixel_format;
pub mod registry;
