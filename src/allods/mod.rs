//! Core Allods asset decoding module

pub mod codec;
pub mod format;
pub mod loader;
pub mod registry;
pub mod source;
pub mod types;
pub mod utils;

pub use loader::{AssetLoader, LoaderOptions};
pub use source::{ByteSource, DirectorySource, MemorySource};
pub use types::error::{AssetError, Result};
