//! Entity-tag precondition lists: data model, errors, and the parser.
//!
//! Foundation crate -- no I/O. Callers strip the header name and act on the
//! parsed list themselves; tag comparison is not done here.

pub mod error;
pub mod parser;
pub mod types;

pub use error::{EndOfInput, ParseError, ParseErrorKind, PreconError, PreconResult};
pub use parser::{is_etag_char, parse, parse_bytes};
pub use types::{PreconditionEntry, PreconditionList};
