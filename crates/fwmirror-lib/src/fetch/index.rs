use super::error::FetchError;
use super::transport::Transport;
use futures::StreamExt;

/// Downloads the index document and decodes it as UTF-8. Any transport error
/// is returned as is; there is no retry.
pub async fn fetch_index<T: Transport>(transport: &T, url: &str) -> Result<String, FetchError> {
    tracing::info!(url = %url, "Downloading firmware index");

    let response = transport.get(url).await?;
    let capacity = response
        .content_length
        .and_then(|length| usize::try_from(length).ok())
        .unwrap_or_default();
    let mut bytes = Vec::with_capacity(capacity);

    let mut body = response.body;
    while let Some(chunk) = body.next().await {
        bytes.extend_from_slice(&chunk?);
    }

    String::from_utf8(bytes).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
