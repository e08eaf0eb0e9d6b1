use crate::error::FwMirrorError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INDEX_URL: &str = "https://releases.firmware.ozloapp.co/dd/sleepbuds3/index.xml";
pub const DEFAULT_OUTPUT_DIR: &str = "./firmware_downloads";
pub const DEFAULT_USER_AGENT_HEADER: &str = "X-User-Agent";
pub const DEFAULT_USER_AGENT: &str = "OzloSleep/1.0.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_SCHEME: &str = "https";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Index location, either an http(s) URL or a local file path.
    pub index_url: String,
    pub output_dir: PathBuf,
    pub http: HttpConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct HttpConfig {
    /// Name of the identifying header sent with every request.
    pub user_agent_header: String,
    pub user_agent: String,
    /// Applies to the whole request, body included.
    pub timeout_secs: u64,
    /// Scheme used when building image URLs from a release's host and path.
    pub scheme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent_header: DEFAULT_USER_AGENT_HEADER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), FwMirrorError> {
        if self.index_url.trim().is_empty() {
            return Err(FwMirrorError::ConfigValidation {
                details: "index_url must not be empty".to_string(),
            });
        }
        self.http.validate()
    }
}

impl HttpConfig {
    pub fn validate(&self) -> Result<(), FwMirrorError> {
        if self.timeout_secs == 0 {
            return Err(FwMirrorError::ConfigValidation {
                details: "http.timeout_secs must be greater than 0".to_string(),
            });
        }
        if self.user_agent_header.trim().is_empty() {
            return Err(FwMirrorError::ConfigValidation {
                details: "http.user_agent_header must not be empty".to_string(),
            });
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(FwMirrorError::ConfigValidation {
                details: format!(
                    "http.scheme must be \"http\" or \"https\", got \"{}\"",
                    self.scheme
                ),
            });
        }
        Ok(())
    }
}
