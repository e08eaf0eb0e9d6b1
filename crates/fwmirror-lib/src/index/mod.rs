mod model;
mod parser;

pub use model::{Device, HardwareRevision, Image, Index, Release};
pub use parser::{IndexParseError, parse, parse_file};
