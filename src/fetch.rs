//! Contest data fetcher: download the data archive, then unpack it.

use crate::archive::ZipExtractor;
use crate::download::download_file;
use crate::http::HttpClient;
use crate::progress::ProgressPrinter;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Location of the published contest data archive.
pub const DEFAULT_URL: &str = "https://www.dropbox.com/s/s1uxgs3vj3tgvr7/data.zip?dl=1";

/// File name the archive is saved under.
pub const DEFAULT_ARCHIVE: &str = "data.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    /// Where the downloaded archive is stored. It is kept after extraction.
    pub archive_path: PathBuf,
    /// Directory the archive entries are extracted into.
    pub extract_to: PathBuf,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            archive_path: PathBuf::from(DEFAULT_ARCHIVE),
            extract_to: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub downloaded_bytes: u64,
    pub extracted_bytes: u64,
}

/// Downloads the archive and extracts it, reporting both phases to `out`.
#[tracing::instrument(skip(runtime, http_client, out))]
pub async fn fetch<R: Runtime, W: Write>(
    runtime: &R,
    http_client: &HttpClient,
    options: &FetchOptions,
    out: W,
) -> Result<FetchSummary> {
    let mut printer = ProgressPrinter::new(out);

    let downloaded_bytes = download_file(
        runtime,
        http_client,
        &options.url,
        &options.archive_path,
        &mut printer,
    )
    .await?;

    let extracted_bytes = unarchive(
        runtime,
        &options.archive_path,
        &options.extract_to,
        &mut printer,
    )?;

    Ok(FetchSummary {
        downloaded_bytes,
        extracted_bytes,
    })
}

/// Extracts every entry of `archive_path` into `extract_to`, printing the
/// cumulative percentage after each entry.
pub fn unarchive<R: Runtime, W: Write>(
    runtime: &R,
    archive_path: &Path,
    extract_to: &Path,
    printer: &mut ProgressPrinter<W>,
) -> Result<u64> {
    debug!("Unarchiving {:?} into {:?}", archive_path, extract_to);
    printer
        .begin(&format!("Unarchiving {}:", archive_path.display()))
        .context("Failed to write progress")?;

    let progress = ZipExtractor.extract(runtime, archive_path, extract_to, |progress| {
        printer.report(progress).context("Failed to write progress")
    })?;

    printer.finish().context("Failed to write progress")?;
    Ok(progress.done)
}
