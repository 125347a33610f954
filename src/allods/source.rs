//! Byte sources that resolve logical asset paths to seekable streams.
//!
//! Logical paths use `/` separators (`graphics/cursors/default/sprites.16a`)
//! and are matched case-insensitively, as on the filesystem the game shipped for.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use log::trace;

use super::types::error::{AssetError, Result};

/// Something that can open an asset by logical path.
pub trait ByteSource {
    type Stream: Read + Seek;

    /// Opens `path` for reading.
    ///
    /// # Errors
    /// Returns `NotFound` if nothing exists at `path`.
    fn open(&self, path: &str) -> Result<Self::Stream>;
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
        .to_lowercase()
}

/// Assets laid out as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a logical path to a file, falling back to a case-insensitive match
    /// for every component that does not exist verbatim.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut current = self.root.clone();
        for part in path.split(['/', '\\']).filter(|p| !p.is_empty() && *p != ".") {
            if part == ".." {
                return None;
            }
            let exact = current.join(part);
            if exact.exists() {
                current = exact;
                continue;
            }
            let wanted = part.to_lowercase();
            let found = fs::read_dir(&current)
                .ok()?
                .filter_map(|entry| entry.ok())
                .find(|entry| entry.file_name().to_string_lossy().to_lowercase() == wanted)?;
            current = found.path();
        }
        current.is_file().then_some(current)
    }
}

impl ByteSource for DirectorySource {
    type Stream = BufReader<File>;

    fn open(&self, path: &str) -> Result<Self::Stream> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        trace!("Resolved '{}' to {}", path, resolved.display());
        match File::open(&resolved) {
            Ok(file) => Ok(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AssetError::NotFound(path.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Assets held in memory, e.g. after extraction from an archive.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the file at `path`.
    pub fn insert(&mut self, path: &str, data: impl Into<Vec<u8>>) {
        self.files.insert(normalize(path), data.into());
    }

    pub fn with_file(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize(path))
    }
}

impl ByteSource for MemorySource {
    type Stream = Cursor<Vec<u8>>;

    fn open(&self, path: &str) -> Result<Self::Stream> {
        self.files
            .get(&normalize(path))
            .map(|data| Cursor::new(data.clone()))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}
