//! Data sinks for parsed header batches.
//!
//! Two row schemas:
//! - [`BatchSummaryRow`] — one per batch
//! - [`OutcomeRow`] — one per header value, with either its entries or its error
//!
//! Backend: **NDJSON stream** — newline-delimited JSON rows to any `Write` impl.

pub mod json_stream;

use crate::reporter::{HeaderOutcome, Report};
use precon_core::{ParseError, PreconditionList};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Serializable row types
// ---------------------------------------------------------------------------

/// One row per header value, fully denormalized.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRow {
    pub line: usize,
    pub input: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<PreconditionList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Why a header value was rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Always `PARSE_ERROR`.
    pub code: &'static str,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl From<&ParseError> for ErrorDetail {
    fn from(e: &ParseError) -> Self {
        Self {
            code: e.code(),
            kind: e.kind().label(),
            message: e.to_string(),
            offset: e.offset(),
        }
    }
}

/// One row per batch — summary statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummaryRow {
    pub total_values: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub wildcard_lists: usize,
    pub strong_tags: usize,
    pub weak_tags: usize,
    pub failure_kinds: usize,
    /// Saturates at `u64::MAX`.
    pub elapsed_us: u64,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

impl HeaderOutcome {
    pub fn to_row(&self) -> OutcomeRow {
        let (entries, error) = match &self.result {
            Ok(list) => (Some(list.clone()), None),
            Err(e) => (None, Some(ErrorDetail::from(e))),
        };
        OutcomeRow {
            line: self.line,
            input: self.input.clone(),
            accepted: entries.is_some(),
            entries,
            error,
        }
    }
}

impl Report {
    pub fn to_summary_row(&self) -> BatchSummaryRow {
        BatchSummaryRow {
            total_values: self.total_values,
            accepted: self.accepted,
            rejected: self.rejected,
            wildcard_lists: self.wildcard_lists,
            strong_tags: self.strong_tags,
            weak_tags: self.weak_tags,
            failure_kinds: self.failures.len(),
            elapsed_us: u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX),
        }
    }
}

/// Rows for every outcome, in batch order.
pub fn to_rows(outcomes: &[HeaderOutcome]) -> Vec<OutcomeRow> {
    outcomes.iter().map(HeaderOutcome::to_row).collect()
}
