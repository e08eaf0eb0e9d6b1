pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod verification;

pub use config::Config;
pub use error::FwMirrorError;
pub use index::{Device, HardwareRevision, Image, Index, Release};
