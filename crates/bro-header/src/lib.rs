//! Bro log header reading and parsing.
//!
//! Bro (Zeek) logs describe themselves in a block of `#` directives at the
//! top of each file. This crate reads that block and turns it into a
//! [`HeaderDescriptor`]: the decoded separator, the empty/unset markers, the
//! record path, and every column with its capture position and value kind.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use bro_header::{FieldKind, load_header};
//!
//! let header = load_header(Path::new("conn.log")).unwrap();
//! for field in header.all_fields() {
//!     println!("{} -> {}", field.name, field.kind);
//! }
//! assert_eq!(bro_header::FieldKind::classify("count"), FieldKind::Numeric);
//! ```

use std::path::Path;

mod descriptor;
mod error;
pub mod literal;
pub mod parser;
mod reader;
mod types;

pub use descriptor::{FIRST_FIELD_POSITION, FieldDescriptor, HeaderDescriptor};
pub use error::{HeaderError, Result};
pub use literal::quote_literal;
pub use parser::{decode_separator, parse_header};
pub use reader::{HEADER_LINE_COUNT, read_header_lines};
pub use types::{BroType, FieldKind};

/// Read and parse the header of the log file at `path`.
pub fn load_header(path: &Path) -> Result<HeaderDescriptor> {
    let lines = read_header_lines(path)?;
    parse_header(&lines)
}
