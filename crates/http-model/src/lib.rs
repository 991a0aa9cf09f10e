//! A prediction provider for the car-price estimation HTTP service.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, header};
use vroomy_model::{
    ErrorKind, PredictionProvider, PredictionProviderError, PredictionRequest,
    PredictionResponse,
};

pub use config::{HttpConfig, HttpConfigBuilder};

/// Error type for [`HttpProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    status: Option<u16>,
    detail: Option<String>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            status: None,
            detail: None,
        }
    }

    fn from_transport(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() || err.is_timeout() || err.is_request()
        {
            ErrorKind::TransportUnavailable
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }

    fn rejected(status: u16, detail: Option<String>) -> Self {
        let message = match &detail {
            Some(detail) => format!("service rejected the request: {detail}"),
            None => format!("service rejected the request ({status})"),
        };
        Self {
            message,
            kind: ErrorKind::UpstreamRejected,
            status: Some(status),
            detail,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl PredictionProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[inline]
    fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Provider backed by the remote estimation service.
///
/// Every call performs exactly one `POST` with the user text as
/// `{"text": ...}`. No timeout is set beyond the transport's default.
#[derive(Clone, Debug)]
pub struct HttpProvider {
    client: Client,
    config: Arc<HttpConfig>,
}

impl HttpProvider {
    /// Creates a new `HttpProvider` with the given configuration.
    #[inline]
    pub fn new(config: HttpConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl PredictionProvider for HttpProvider {
    type Error = Error;

    fn predict(
        &self,
        req: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResponse, Self::Error>> + Send + 'static
    {
        let body = proto::create_request(req);
        let url = self.config.endpoint_url();
        trace!("posting prediction request to {url}");
        let resp_fut = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .header(header::ACCEPT, mime::APPLICATION_JSON.as_ref())
            .json(&body)
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    error!("could not reach the prediction service: {err}");
                    return Err(Error::from_transport(err));
                }
            };

            let status = resp.status();
            if !status.is_success() {
                let detail = resp
                    .bytes()
                    .await
                    .ok()
                    .and_then(|body| proto::parse_error_detail(&body));
                error!("prediction service answered {status}: {detail:?}");
                return Err(Error::rejected(status.as_u16(), detail));
            }

            // Here we got a successful response.
            let body = resp.bytes().await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::MalformedResponse)
            })?;
            trace!("got prediction body: {} bytes", body.len());
            proto::parse_reply(&body).map_err(|err| {
                error!("unexpected prediction body: {err}");
                Error::new(format!("{err}"), ErrorKind::MalformedResponse)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Answers exactly one request with the given status line and body, and
    /// hands back the raw request it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 content-type: application/json\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_lowercase();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn provider_for(base_url: String) -> HttpProvider {
        HttpProvider::new(HttpConfigBuilder::with_base_url(base_url).build())
    }

    #[tokio::test]
    async fn test_successful_prediction() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"generated_text": "Price: £14500"}"#)
                .await;
        let provider = provider_for(base_url);

        let resp = provider
            .predict(&PredictionRequest::new("Ford Fiesta 2023"))
            .await
            .unwrap();
        assert_eq!(resp.generated_text.as_deref(), Some("Price: £14500"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /predict HTTP/1.1"));
        let lowered = request.to_lowercase();
        assert!(lowered.contains("content-type: application/json"));
        assert!(lowered.contains("accept: application/json"));
        assert!(request.ends_with(r#"{"text":"Ford Fiesta 2023"}"#));
    }

    #[tokio::test]
    async fn test_missing_generated_text() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"model": "v2"}"#).await;
        let provider = provider_for(base_url);

        let resp = provider
            .predict(&PredictionRequest::new("Golf 2020"))
            .await
            .unwrap();
        assert_eq!(resp.generated_text, None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_with_detail() {
        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"detail": "rate limited"}"#,
        )
        .await;
        let provider = provider_for(base_url);

        let err = provider
            .predict(&PredictionRequest::new("Golf 2020"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.detail(), Some("rate limited"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_without_detail() {
        let (base_url, server) =
            serve_once("502 Bad Gateway", "<html>ngrok</html>").await;
        let provider = provider_for(base_url);

        let err = provider
            .predict(&PredictionRequest::new("Golf 2020"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamRejected);
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.detail(), None);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (base_url, server) = serve_once("200 OK", "not json").await;
        let provider = provider_for(base_url);

        let err = provider
            .predict(&PredictionRequest::new("Golf 2020"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = provider_for(format!("http://{addr}"));

        let err = provider
            .predict(&PredictionRequest::new("Ford Fiesta 2023"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportUnavailable);
        assert_eq!(err.status(), None);
    }
}
