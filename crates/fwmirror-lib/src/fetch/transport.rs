use super::error::FetchError;
use crate::config::HttpConfig;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::future::Future;
use std::time::Duration;

pub type ByteStream = BoxStream<'static, Result<Bytes, FetchError>>;

pub struct TransportResponse {
    /// Declared body size, when the server sent one.
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

/// Issues the GET requests for both the index and the images.
///
/// A non-success status must surface as an error from `get`, so callers only
/// ever see bodies of successful responses.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<TransportResponse, FetchError>>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(http_config: &HttpConfig) -> Result<Self, FetchError> {
        let header_name = HeaderName::from_bytes(http_config.user_agent_header.as_bytes())
            .map_err(|e| FetchError::InvalidHeader {
                reason: format!("{}: {}", http_config.user_agent_header, e),
            })?;
        let header_value =
            HeaderValue::from_str(&http_config.user_agent).map_err(|e| {
                FetchError::InvalidHeader {
                    reason: format!("{}: {}", http_config.user_agent, e),
                }
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(header_name, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(http_config.timeout_secs))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let http_error = |source: reqwest::Error| FetchError::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                url: url.to_string(),
                reason: format!("server responded with {status}"),
            });
        }

        let content_length = response.content_length();
        let stream_url = url.to_string();
        let body = response
            .bytes_stream()
            .map(move |chunk| {
                chunk.map_err(|source| FetchError::Http {
                    url: stream_url.clone(),
                    source,
                })
            })
            .boxed();

        Ok(TransportResponse {
            content_length,
            body,
        })
    }
}
