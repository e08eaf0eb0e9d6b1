use super::error::FetchError;
use super::transport::{Transport, TransportResponse};
use bytes::Bytes;
use futures::StreamExt;
use futures::stream;
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) enum Scripted {
    /// Served in two chunks with a declared length.
    Body(Vec<u8>),
    /// The body breaks after the given bytes.
    BrokenBody(Vec<u8>),
    Refused,
}

/// In-memory transport that answers from a fixed script and records every
/// requested URL.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: HashMap<String, Scripted>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn with(mut self, url: &str, response: Scripted) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        match self.responses.get(url) {
            Some(Scripted::Body(content)) => {
                let (head, tail) = content.split_at(content.len() / 2);
                let chunks = vec![
                    Ok(Bytes::copy_from_slice(head)),
                    Ok(Bytes::copy_from_slice(tail)),
                ];
                Ok(TransportResponse {
                    content_length: Some(content.len() as u64),
                    body: stream::iter(chunks).boxed(),
                })
            }
            Some(Scripted::BrokenBody(prefix)) => {
                let chunks = vec![
                    Ok(Bytes::copy_from_slice(prefix)),
                    Err(FetchError::Transport {
                        url: url.to_string(),
                        reason: "connection reset by peer".to_string(),
                    }),
                ];
                Ok(TransportResponse {
                    content_length: Some(prefix.len() as u64 * 2),
                    body: stream::iter(chunks).boxed(),
                })
            }
            Some(Scripted::Refused) => Err(FetchError::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
            None => Err(FetchError::Transport {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            }),
        }
    }
}
