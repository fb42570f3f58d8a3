//! Markdown frontmatter as a record source.
//!
//! A markdown document with YAML frontmatter holds exactly one record:
//! each top-level frontmatter key is a field. Field order and the
//! document body survive a parse/serialize round trip.

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{FrontmatterParseError, parse};
pub use serializer::serialize;
pub use types::{Frontmatter, ParsedDocument};
