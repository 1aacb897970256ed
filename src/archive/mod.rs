//! Zip archive inspection and extraction with progress reporting.

mod zip;

pub use zip::ZipExtractor;

/// One file record inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    pub is_dir: bool,
}

/// Sum of the uncompressed sizes of `entries`.
pub fn total_size(entries: &[ArchiveEntry]) -> u64 {
    entries.iter().map(|e| e.size).sum()
}
