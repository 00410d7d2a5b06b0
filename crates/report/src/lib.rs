//! Batch parsing of header values, summary report generator, and data sinks.

pub mod reporter;
pub mod sink;

pub use reporter::{parse_batch, parse_byte_batch, HeaderOutcome, Report};
