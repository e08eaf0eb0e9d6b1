use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered but the transfer cannot be used, e.g. a non-success
    /// status. Also the error of transports that are not backed by reqwest.
    #[error("Transfer from {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Invalid HTTP header configuration: {reason}")]
    InvalidHeader { reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Response from {url} is not valid UTF-8: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
