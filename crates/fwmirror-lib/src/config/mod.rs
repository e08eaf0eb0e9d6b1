mod loader;
mod model;

pub use loader::load_config;
pub use model::{
    Config, DEFAULT_INDEX_URL, DEFAULT_OUTPUT_DIR, DEFAULT_SCHEME, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, DEFAULT_USER_AGENT_HEADER, HttpConfig,
};
