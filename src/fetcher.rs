//! Network retrieval and download-to-cache.
//!
//! A [`DocumentFetcher`] performs exactly one attempt per call. Retrying is
//! the caller's decision, made by issuing a fresh call.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::{AcquireError, Result};

/// Extension given to every cached document.
pub const CACHE_EXTENSION: &str = "pdf";

/// Source of document bytes.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// GET the full body of `url`. Non-2xx statuses are errors.
    async fn fetch_remote(&self, url: &str) -> Result<Bytes>;

    /// Write the body of `url` to `<cache-root>/<filename>.pdf`, replacing
    /// any file already there.
    async fn download_to_cache(&self, url: &str, filename: &str) -> Result<PathBuf>;
}

/// Path a download of `filename` lands at under `cache_root`.
pub fn cache_path(cache_root: &Path, filename: &str) -> Result<PathBuf> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
        || filename.contains('\0');
    if invalid {
        return Err(AcquireError::InvalidFilename(filename.to_string()));
    }
    Ok(cache_root.join(format!("{filename}.{CACHE_EXTENSION}")))
}

/// HTTP fetcher backed by a pooled `reqwest` client.
pub struct HttpFetcher {
    client: Client,
    cache_root: PathBuf,
}

impl HttpFetcher {
    pub fn new(cache_root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_timeouts(cache_root, Duration::from_secs(10), Duration::from_secs(30))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeouts(config.cache_root(), config.connect_timeout(), config.timeout())
    }

    pub fn with_timeouts(
        cache_root: impl Into<PathBuf>,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            // Let the server negotiate HTTP/2 over ALPN
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .gzip(true)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| AcquireError::network("<client>", e))?;

        Ok(Self {
            client,
            cache_root: cache_root.into(),
        })
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Send a GET and reject non-success statuses.
    async fn get(&self, url: &str) -> Result<Response> {
        debug!("Sending request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AcquireError::network(url, e))?;

        info!(
            status = %response.status(),
            version = ?response.version(),
            content_length = ?response.content_length(),
            "Response received"
        );

        response
            .error_for_status()
            .map_err(|e| AcquireError::network(url, e))
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_remote(&self, url: &str) -> Result<Bytes> {
        let body = self
            .get(url)
            .await?
            .bytes()
            .await
            .map_err(|e| AcquireError::network(url, e))?;
        debug!(bytes = body.len(), "Body read");
        Ok(body)
    }

    #[instrument(skip(self), fields(url = %url, filename = %filename))]
    async fn download_to_cache(&self, url: &str, filename: &str) -> Result<PathBuf> {
        let target = cache_path(&self.cache_root, filename)?;
        let response = self.get(url).await?;

        fs::create_dir_all(&self.cache_root).await?;
        let partial = target.with_extension(format!("{CACHE_EXTENSION}.part"));
        let written = match stream_into(response, url, &partial, &target).await {
            Ok(written) => written,
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        info!(bytes = written, path = %target.display(), "Cached download");
        Ok(target)
    }
}

/// Write the body into `partial`, then move it over `target`.
async fn stream_into(response: Response, url: &str, partial: &Path, target: &Path) -> Result<u64> {
    let mut file = fs::File::create(partial).await?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| AcquireError::network(url, e))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    fs::rename(partial, target).await?;
    Ok(written)
}
