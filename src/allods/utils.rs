//! Low-level byte reading and text decoding utilities

use std::io::{Read, Seek, SeekFrom};

use encoding_rs::{Encoding, IBM866_INIT};
use log::warn;

use super::types::error::{AssetError, Result};

/// The codepage the game's data files are authored in.
pub static DEFAULT_ENCODING: &Encoding = &IBM866_INIT;

/// Resolves an encoding label, falling back to [`DEFAULT_ENCODING`].
///
/// Accepts WHATWG labels ("ibm866", "cp866", "windows-1251", ...).
pub fn parse_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        warn!("Unknown encoding label '{}', using {}", label, DEFAULT_ENCODING.name());
        DEFAULT_ENCODING
    })
}

/// Total length of a seekable stream. Leaves the position at the start.
pub fn stream_len<R: Seek>(reader: &mut R) -> Result<u64> {
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(len)
}

/// Fails with `Truncated` unless `[start, start + len)` lies inside a stream of `total` bytes.
pub fn ensure_range(start: u64, len: u64, total: u64, context: &str) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= total => Ok(()),
        _ => Err(AssetError::Truncated(format!(
            "{} [{:#x}..{:#x}) exceeds stream length {:#x}",
            context,
            start,
            start.saturating_add(len),
            total
        ))),
    }
}

/// Reads exactly `len` bytes.
pub fn read_bytes<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Decodes a whole byte run in the given codepage.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Decodes a fixed-width, null-padded field: text stops at the first NUL.
pub fn decode_fixed_string(bytes: &[u8], encoding: &'static Encoding) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    decode_text(&bytes[..end], encoding)
}
