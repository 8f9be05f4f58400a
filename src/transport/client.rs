//! HTTP client for submitting registrations
//!
//! Posts the payload as JSON to a single endpoint. Any non-2xx status and
//! any failure to complete the request become a [`TransportError`].

use super::traits::{RegistrationPayload, Transport, TransportError};
use crate::config::AppConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;

/// JSON-over-HTTP registration transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`, giving up after `timeout`
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a transport from the resolved configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.endpoint(), config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, payload: RegistrationPayload) -> std::result::Result<(), TransportError> {
        tracing::debug!(endpoint = %self.endpoint, "posting registration");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%status, "registration accepted");
            Ok(())
        } else {
            tracing::warn!(%status, "registration rejected");
            Err(status_error(status))
        }
    }
}

/// Error for a non-2xx response, derived from the status text
fn status_error(status: StatusCode) -> TransportError {
    let text = match status.canonical_reason() {
        Some(reason) => reason,
        None => status.as_str(),
    };
    TransportError::new(format!("API Error: {text}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldName, FormValues};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn payload() -> RegistrationPayload {
        let mut values = FormValues::new();
        values.set(FieldName::Name, "Maxime");
        values.set(FieldName::Email, "maxime@example.com");
        values.set(FieldName::Age, "25");
        values.set(FieldName::Password, "abc123");
        RegistrationPayload::from_values(&values).unwrap()
    }

    /// Serve exactly one request with `status_line`, returning the raw request
    async fn serve_once(status_line: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}/api/users"), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    #[test]
    fn test_status_error_uses_reason_phrase() {
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "API Error: Internal Server Error");
        let err = status_error(StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "API Error: Not Found");
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let transport = HttpTransport::new("http://localhost/api/users", Duration::from_secs(5)).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost/api/users");
    }

    #[tokio::test]
    async fn test_submit_posts_json() {
        let (url, server) = serve_once("200 OK").await;
        let transport = HttpTransport::new(url, Duration::from_secs(5)).unwrap();

        transport.submit(payload()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/users"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#""age":25"#));
        assert!(request.contains(r#""name":"Maxime""#));
    }

    #[tokio::test]
    async fn test_submit_maps_server_error() {
        let (url, server) = serve_once("500 Internal Server Error").await;
        let transport = HttpTransport::new(url, Duration::from_secs(5)).unwrap();

        let err = transport.submit(payload()).await.unwrap_err();
        assert_eq!(err.message(), "API Error: Internal Server Error");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_maps_connection_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport =
            HttpTransport::new(format!("http://{addr}/api/users"), Duration::from_secs(5)).unwrap();
        let err = transport.submit(payload()).await.unwrap_err();
        assert!(!err.message().is_empty());
    }
}
