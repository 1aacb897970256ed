use crate::http::HttpClient;
use crate::progress::ProgressPrinter;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::Path;

/// Downloads `url` to `dest`, printing the percentage after every chunk.
///
/// Returns the number of bytes written.
#[tracing::instrument(skip(runtime, http_client, printer))]
pub async fn download_file<R: Runtime, W: Write>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    dest: &Path,
    printer: &mut ProgressPrinter<W>,
) -> Result<u64> {
    info!("Downloading file from {}...", url);
    printer
        .begin(&format!("Downloading {} from {}:", dest.display(), url))
        .context("Failed to write progress")?;

    let bytes = http_client
        .download_file(
            url,
            || {
                runtime
                    .create_file(dest)
                    .with_context(|| format!("Failed to create file at {:?}", dest))
            },
            |progress| printer.report(progress).context("Failed to write progress"),
        )
        .await?;

    printer.finish().context("Failed to write progress")?;
    info!("Download complete.");
    Ok(bytes)
}
