use crate::config::HttpConfig;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the index document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Url(Url),
    File(PathBuf),
}

impl IndexSource {
    /// Anything that parses as an `http` or `https` URL is fetched; every
    /// other value is treated as a path on disk.
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(value)),
        }
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MirrorParams {
    pub index_source: IndexSource,
    pub output_dir: PathBuf,
    pub http: HttpConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_urls_are_fetched() {
        assert!(matches!(
            IndexSource::parse("https://releases.example.com/index.xml"),
            IndexSource::Url(_)
        ));
        assert!(matches!(
            IndexSource::parse("http://127.0.0.1:8080/index.xml"),
            IndexSource::Url(_)
        ));
    }

    #[test]
    fn test_other_values_are_paths() {
        assert_eq!(
            IndexSource::parse("./index.xml"),
            IndexSource::File(PathBuf::from("./index.xml"))
        );
        assert_eq!(
            IndexSource::parse("/srv/index.xml"),
            IndexSource::File(PathBuf::from("/srv/index.xml"))
        );
        assert!(matches!(
            IndexSource::parse("ftp://example.com/index.xml"),
            IndexSource::File(_)
        ));
    }
}
