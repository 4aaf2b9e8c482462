//! HTTP retrieval of renderer images.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{AppError, ErrorCode, Result};

use super::convert::to_png;

/// User agent sent to the renderer.
pub const USER_AGENT: &str = concat!("alg-to-img/", env!("CARGO_PKG_VERSION"));

/// A source of PNG images addressed by URL.
///
/// Implementations must be stateless per call and safe to call concurrently.
pub trait ImageSource: Send + Sync + 'static {
    /// Retrieves the image at `url` and returns it as PNG bytes.
    fn fetch_png(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Fetches renderer images over HTTP and converts them to PNG.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::internal("Failed to create HTTP client", e))?;
        Ok(Self { client })
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Retrieves the raw response body for `url`.
    pub async fn fetch_raw(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch_failed(url, format!("HTTP {}", status)));
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        debug!(url, bytes = body.len(), "fetched image");
        Ok(body.to_vec())
    }
}

impl ImageSource for ImageFetcher {
    async fn fetch_png(&self, url: &str) -> Result<Vec<u8>> {
        let raw = self.fetch_raw(url).await?;

        // Rasterizing is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || to_png(&raw))
            .await
            .map_err(|e| AppError::decode_failed(format!("conversion task failed: {}", e)))?
    }
}

/// Maps a transport error to an error code.
fn classify(url: &str, e: reqwest::Error) -> AppError {
    if e.is_connect() || e.is_timeout() {
        AppError::upstream_unavailable(url, e)
    } else {
        AppError::with_source(ErrorCode::FetchFailed, format!("Failed to fetch {}", url), e)
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Loopback HTTP server answering every request with one canned response.

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub async fn serve(status: &'static str, content_type: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let mut read = 0;
                    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                        if read == buf.len() {
                            break;
                        }
                    }
                    let head = format!(
                        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        status,
                        content_type,
                        body.len()
                    );
                    let _ = socket.write_all(head.as_bytes()).await;
                    let _ = socket.write_all(&body).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    /// Returns a URL on a port nothing listens on.
    pub async fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/visualcube.php", addr)
    }

    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{client, closed_port_url, serve};
    use super::*;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="6" height="6"><rect width="6" height="6" fill="yellow"/></svg>"#;

    #[tokio::test]
    async fn svg_response_becomes_png() {
        let base = serve("200 OK", "image/svg+xml", SVG.as_bytes().to_vec()).await;
        let fetcher = ImageFetcher::with_client(client());

        let png = fetcher.fetch_png(&format!("{}/visualcube.php?fmt=svg", base)).await.unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 6));
    }

    #[tokio::test]
    async fn non_success_status_is_fetch_failure() {
        let base = serve("404 Not Found", "text/plain", b"missing".to_vec()).await;
        let fetcher = ImageFetcher::with_client(client());

        let err = fetcher.fetch_png(&base).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed);
        assert!(err.message.contains("404"));
    }

    #[tokio::test]
    async fn non_image_body_is_decode_failure() {
        let base = serve("200 OK", "text/html", b"<html>oops</html>".to_vec()).await;
        let fetcher = ImageFetcher::with_client(client());

        let err = fetcher.fetch_png(&base).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DecodeFailed);
    }

    #[tokio::test]
    async fn refused_connection_is_upstream_unavailable() {
        let url = closed_port_url().await;
        let fetcher = ImageFetcher::with_client(client());

        let err = fetcher.fetch_png(&url).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamUnavailable);
    }

    #[tokio::test]
    async fn malformed_url_is_fetch_failure() {
        let fetcher = ImageFetcher::with_client(client());
        let err = fetcher.fetch_png("not a url").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FetchFailed);
    }

    #[test]
    fn fetcher_builds_with_timeout() {
        assert!(ImageFetcher::new(Duration::from_secs(5)).is_ok());
    }
}
