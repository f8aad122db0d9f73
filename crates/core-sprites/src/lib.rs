//! Parser for the ASCII-art sprite-definition textual format (spec.md §6).

mod error;
mod parser;

pub use error::ParseError;
pub use parser::ArtParser;
