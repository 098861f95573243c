//! Raw byte fetches over HTTP.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, RANGE};
use takeshi_core::{error::TakeshiError, logger::Logger};
use tracing::debug;

/// Per-request options for [`get_buffer`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra headers, applied after the defaults (same name replaces).
    pub headers: Vec<(String, String)>,
    /// Proxy URL. `None` disables proxying, including environment proxies.
    pub proxy: Option<String>,
}

impl FetchOptions {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn proxy(mut self, url: &str) -> Self {
        self.proxy = Some(url.to_string());
        self
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));
    headers.insert(RANGE, HeaderValue::from_static("bytes=0-"));
    headers
}

fn build_client(options: &FetchOptions) -> Result<reqwest::Client, TakeshiError> {
    let builder = reqwest::Client::builder();
    let builder = match options.proxy.as_deref() {
        Some(url) => builder.proxy(
            reqwest::Proxy::all(url)
                .map_err(|e| TakeshiError::Http(format!("invalid proxy '{url}': {e}")))?,
        ),
        None => builder.no_proxy(),
    };
    builder
        .build()
        .map_err(|e| TakeshiError::Http(format!("client build failed: {e}")))
}

fn merge_headers(base: &mut HeaderMap, extra: &[(String, String)]) -> Result<(), TakeshiError> {
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TakeshiError::Http(format!("invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TakeshiError::Http(format!("invalid header value for {name}: {e}")))?;
        base.insert(name, value);
    }
    Ok(())
}

async fn fetch(url: &str, headers: HeaderMap, options: &FetchOptions) -> Result<Vec<u8>, TakeshiError> {
    let client = build_client(options)?;
    let resp = client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| TakeshiError::Http(format!("request to {url} failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(TakeshiError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| TakeshiError::Http(format!("reading body from {url} failed: {e}")))?;
    debug!("http: fetched {} bytes from {url}", bytes.len());
    Ok(bytes.to_vec())
}

/// GET `url` and return the raw body.
///
/// Sends `DNT`, `Upgrade-Insecure-Requests` and `Range: bytes=0-` by default.
/// Non-2xx responses become [`TakeshiError::HttpStatus`].
pub async fn get_buffer(url: &str, options: &FetchOptions) -> Result<Vec<u8>, TakeshiError> {
    let mut headers = default_headers();
    merge_headers(&mut headers, &options.headers)?;
    fetch(url, headers, options).await
}

/// GET an image and return its bytes. Failures are reported to `logger`
/// before being returned.
pub async fn get_image_buffer(
    url: &str,
    options: &FetchOptions,
    logger: &dyn Logger,
) -> Result<Vec<u8>, TakeshiError> {
    let result: Result<Vec<u8>, TakeshiError> = async {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("image/*"));
        merge_headers(&mut headers, &options.headers)?;
        fetch(url, headers, options).await
    }
    .await;

    if let Err(ref e) = result {
        logger.error(&format!("failed to fetch image buffer: {e}"));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeshi_core::logger::{LogKind, MemoryLogger};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&buf[..n]).to_lowercase()
        });
        (format!("http://{addr}/file"), handle)
    }

    #[tokio::test]
    async fn test_get_buffer_returns_body_and_sends_defaults() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        )
        .await;

        let options = FetchOptions::default().header("x-trace", "abc");
        let body = get_buffer(&url, &options).await.unwrap();
        assert_eq!(body, b"hello");

        let request = server.await.unwrap();
        assert!(request.contains("dnt: 1"));
        assert!(request.contains("range: bytes=0-"));
        assert!(request.contains("x-trace: abc"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (url, _server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let err = get_buffer(&url, &FetchOptions::default()).await.unwrap_err();
        match err {
            TakeshiError::HttpStatus { status, reason } => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_image_failure_is_logged() {
        let (url, _server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let logger = MemoryLogger::new();

        let result = get_image_buffer(&url, &FetchOptions::default(), &logger).await;
        assert!(result.is_err());
        let errors = logger.of_kind(LogKind::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_header_name_is_error() {
        let options = FetchOptions::default().header("bad header", "x");
        let err = get_buffer("http://127.0.0.1:9/", &options).await.unwrap_err();
        assert!(matches!(err, TakeshiError::Http(_)));
    }
}
