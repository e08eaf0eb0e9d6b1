mod args;
mod mirror;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use mirror::{mirror_index, run_mirror};
pub use params::{IndexSource, MirrorParams};
pub use resolved_command::resolve_command;
