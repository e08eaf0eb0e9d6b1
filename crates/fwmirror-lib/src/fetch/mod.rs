mod error;
mod fetcher;
mod index;
mod layout;
mod observer;
#[cfg(test)]
pub(crate) mod testing;
mod transport;
mod types;

pub use error::FetchError;
pub use fetcher::{FetchOptions, Fetcher};
pub use index::fetch_index;
pub use layout::{ImageTarget, destination_path, image_url};
pub use observer::{FetchObserver, NoopObserver, TracingObserver};
pub use transport::{ByteStream, HttpTransport, Transport, TransportResponse};
pub use types::{FetchSummary, ImageOutcome, ImageReport};
