use crate::config::{Decoding, FilterConfig};
use crate::error::LoadError;
use crate::walker::PathEntry;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One included file: its header path and trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    pub display_path: String,
    pub content: String,
}

impl FormattedBlock {
    pub fn new(display_path: impl Into<String>, text: &str) -> Self {
        Self {
            display_path: display_path.into(),
            content: text.trim().to_string(),
        }
    }

    /// `//{display_path}` on its own line, then the content, then a newline.
    pub fn render(&self) -> String {
        format!("//{}\n{}\n", self.display_path, self.content)
    }
}

pub struct Loader {
    max_file_size_bytes: Option<u64>,
    decoding: Decoding,
}

impl Loader {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes,
            decoding: config.decoding,
        }
    }

    pub fn load(&self, entry: &PathEntry) -> Result<FormattedBlock, LoadError> {
        let path = &entry.absolute_path;
        let file = File::open(path).map_err(|e| LoadError::from_io(path.clone(), e))?;

        let size = file
            .metadata()
            .map_err(|e| LoadError::from_io(path.clone(), e))?
            .len();
        if let Some(limit) = self.max_file_size_bytes {
            if size > limit {
                return Err(LoadError::TooLarge { size, limit });
            }
        }

        let bytes = read_bounded(file, path, self.max_file_size_bytes, size)?;

        let text = match self.decoding {
            Decoding::Lossy => decode_dropping_invalid(&bytes),
            Decoding::Strict => {
                String::from_utf8(bytes).map_err(|_| LoadError::DecodeFailure(path.clone()))?
            }
        };

        Ok(FormattedBlock::new(entry.display_path.clone(), &text))
    }
}

/// Reads at most `limit + 1` bytes so a file that grew after its size was checked
/// still cannot get past the ceiling.
fn read_bounded<R: Read>(
    mut reader: R,
    path: &Path,
    limit: Option<u64>,
    size_hint: u64,
) -> Result<Vec<u8>, LoadError> {
    let mut bytes = Vec::with_capacity(size_hint as usize);
    let read = match limit {
        Some(limit) => reader
            .by_ref()
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes),
        None => reader.read_to_end(&mut bytes),
    };
    read.map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;

    if let Some(limit) = limit {
        let size = bytes.len() as u64;
        if size > limit {
            return Err(LoadError::TooLarge { size, limit });
        }
    }
    Ok(bytes)
}

/// UTF-8 decode that skips invalid sequences instead of substituting U+FFFD.
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
