use crate::progress::Progress;
use crate::runtime::{ReadSeek, Runtime};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::io::Write;
use std::path::Path;
use zip::ZipArchive;

use super::{ArchiveEntry, total_size};

/// Extractor for .zip archives
pub struct ZipExtractor;

impl ZipExtractor {
    /// Lists every entry of the archive in central directory order.
    #[tracing::instrument(skip(self, runtime))]
    pub fn entries<R: Runtime>(
        &self,
        runtime: &R,
        archive_path: &Path,
    ) -> Result<Vec<ArchiveEntry>> {
        let mut archive = open_archive(runtime, archive_path)?;
        list_entries(&mut archive)
    }

    /// Extracts every entry of the archive below `extract_to`, in listing order.
    ///
    /// `on_progress` is called after each entry with the cumulative
    /// uncompressed size processed so far, measured against the sum of all
    /// entry sizes. Existing files are overwritten. Entries whose names would
    /// land outside `extract_to` are skipped but still counted, so the final
    /// report is always 100%.
    #[tracing::instrument(skip(self, runtime, on_progress))]
    pub fn extract<R, P>(
        &self,
        runtime: &R,
        archive_path: &Path,
        extract_to: &Path,
        mut on_progress: P,
    ) -> Result<Progress>
    where
        R: Runtime,
        P: FnMut(Progress) -> Result<()>,
    {
        debug!("Extracting zip archive to {:?}...", extract_to);
        let mut archive = open_archive(runtime, archive_path)?;

        let entries = list_entries(&mut archive)?;
        let total = total_size(&entries);
        debug!(
            "{} entries ({} directories), {} bytes uncompressed",
            entries.len(),
            entries.iter().filter(|e| e.is_dir).count(),
            total
        );
        let mut progress = Progress::new(Some(total));

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .with_context(|| format!("Failed to read ZIP entry {}", i))?;
            let size = entry.size();

            match entry.enclosed_name() {
                Some(entry_path) => {
                    let full_path = extract_to.join(&entry_path);

                    if entry.is_dir() {
                        runtime.create_dir_all(&full_path)?;
                    } else {
                        if let Some(parent) = full_path.parent() {
                            runtime.create_dir_all(parent)?;
                        }
                        // A previous run may have left a read-only copy
                        if runtime.exists(&full_path) {
                            runtime.remove_file(&full_path).with_context(|| {
                                format!("Failed to replace existing {:?}", full_path)
                            })?;
                        }
                        let mut dest_file = runtime
                            .create_file(&full_path)
                            .with_context(|| format!("Failed to create {:?}", full_path))?;
                        std::io::copy(&mut entry, &mut dest_file)
                            .with_context(|| format!("Failed to extract file {:?}", full_path))?;
                        dest_file
                            .flush()
                            .with_context(|| format!("Failed to write file {:?}", full_path))?;

                        #[cfg(unix)]
                        if let Some(mode) = entry.unix_mode()
                            && let Err(e) = runtime.set_permissions(&full_path, mode)
                        {
                            debug!("Failed to set permissions on {:?}: {}", full_path, e);
                        }
                    }
                }
                None => {
                    warn!("Skipping entry with unsafe path: {}", entry.name());
                }
            }

            progress = progress.advance(size);
            on_progress(progress)?;
        }

        info!("Extraction complete.");
        Ok(progress)
    }
}

fn open_archive<R: Runtime>(
    runtime: &R,
    archive_path: &Path,
) -> Result<ZipArchive<Box<dyn ReadSeek + Send>>> {
    let file = runtime
        .open(archive_path)
        .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

    ZipArchive::new(file)
        .with_context(|| format!("Failed to parse ZIP archive {:?}", archive_path))
}

fn list_entries<A: ReadSeek>(archive: &mut ZipArchive<A>) -> Result<Vec<ArchiveEntry>> {
    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let entry = archive
            .by_index_raw(i)
            .with_context(|| format!("Failed to read ZIP entry {}", i))?;
        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            size: entry.size(),
            is_dir: entry.is_dir(),
        });
    }
    Ok(entries)
}
