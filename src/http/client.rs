//! Streaming HTTP download client.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::io::Write;

use super::status::check_status;
use crate::progress::Progress;

/// Thin wrapper around a reqwest `Client` for file downloads.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Downloads `url` into the writer produced by `create_writer`.
    ///
    /// The writer is only created once the server has answered with a success
    /// status, so a failed request leaves nothing behind. `on_progress` is
    /// called after every chunk with the accumulated progress; the total is the
    /// response's content length when the server sends one.
    ///
    /// A single attempt is made. Returns the number of bytes written.
    #[tracing::instrument(skip(self, create_writer, on_progress))]
    pub async fn download_file<W, F, P>(
        &self,
        url: &str,
        create_writer: F,
        mut on_progress: P,
    ) -> Result<u64>
    where
        W: Write,
        F: FnOnce() -> Result<W>,
        P: FnMut(Progress) -> Result<()>,
    {
        debug!("Downloading file from {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to start download request")?;

        let mut response = response.error_for_status().map_err(check_status)?;

        let mut writer = create_writer()?;
        let mut progress = Progress::new(response.content_length());

        while let Some(chunk) = response
            .chunk()
            .await
            .context("Failed to read chunk from download stream")?
        {
            writer
                .write_all(&chunk)
                .context("Failed to write chunk to file")?;
            progress = progress.advance(chunk.len() as u64);
            on_progress(progress)?;
        }

        writer.flush().context("Failed to flush downloaded file")?;

        debug!(
            "Downloaded {:.2} MB",
            progress.done as f64 / (1024.0 * 1024.0)
        );

        Ok(progress.done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpStatusError;

    #[tokio::test]
    async fn test_download_file_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(200)
            .with_body("test content")
            .create_async()
            .await;

        let client = HttpClient::default();
        let mut sink = Vec::new();
        let bytes = client
            .download_file(&format!("{}/file.txt", url), || Ok(&mut sink), |_| Ok(()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, 12); // "test content" is 12 bytes
        assert_eq!(sink, b"test content");
    }

    #[tokio::test]
    async fn test_download_file_reports_progress() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = vec![7u8; 64 * 1024];

        let _mock = server
            .mock("GET", "/data.zip")
            .with_status(200)
            .with_body(&body)
            .create_async()
            .await;

        let client = HttpClient::default();
        let mut reports = Vec::new();
        client
            .download_file(
                &format!("{}/data.zip", url),
                || Ok(std::io::sink()),
                |p| {
                    reports.push(p);
                    Ok(())
                },
            )
            .await
            .unwrap();

        assert!(!reports.is_empty());
        let last = reports.last().unwrap();
        assert_eq!(last.done, body.len() as u64);
        assert_eq!(last.total, Some(body.len() as u64));
        assert_eq!(last.percent(), Some(100));

        let percents: Vec<u8> = reports.iter().filter_map(|p| p.percent()).collect();
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_download_file_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::default();
        let mut writer_created = false;
        let result = client
            .download_file(
                &format!("{}/file.txt", url),
                || {
                    writer_created = true;
                    Ok(std::io::sink())
                },
                |_| Ok(()),
            )
            .await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HttpStatusError>(),
            Some(HttpStatusError::NotFound(_))
        ));
        assert!(!writer_created);
    }

    #[tokio::test]
    async fn test_download_file_is_attempted_once() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/file.txt")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = HttpClient::default();
        let result = client
            .download_file(
                &format!("{}/file.txt", url),
                || Ok(std::io::sink()),
                |_| Ok(()),
            )
            .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_download_file_progress_error_aborts() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/file.txt")
            .with_status(200)
            .with_body("abc")
            .create_async()
            .await;

        let client = HttpClient::default();
        let result = client
            .download_file(
                &format!("{}/file.txt", url),
                || Ok(std::io::sink()),
                |_| Err(anyhow::anyhow!("stdout closed")),
            )
            .await;

        assert!(result.unwrap_err().to_string().contains("stdout closed"));
    }

    #[tokio::test]
    async fn test_download_file_connection_refused() {
        // Bind and drop a listener to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::default();
        let result = client
            .download_file(
                &format!("http://{}/file.txt", addr),
                || Ok(std::io::sink()),
                |_| Ok(()),
            )
            .await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to start download request")
        );
    }
}
