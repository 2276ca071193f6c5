//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig, is_null_value};
pub use source::SourceMetadata;
