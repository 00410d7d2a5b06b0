//! Batch outcome collection and summary report generator.
//!
//! Takes the parse results for a batch of header values and produces a
//! human-readable report with acceptance counts and rejections grouped by
//! error kind.

use precon_core::{ParseError, PreconditionEntry, PreconditionList};
use std::collections::HashMap;
use std::time::Duration;

/// Longest input excerpt shown per failure group.
const EXAMPLE_WIDTH: usize = 40;

/// One header value and what the parser made of it.
#[derive(Debug, Clone)]
pub struct HeaderOutcome {
    /// 1-based position in the batch.
    pub line: usize,
    pub input: String,
    pub result: Result<PreconditionList, ParseError>,
}

impl HeaderOutcome {
    pub fn parse(line: usize, input: impl Into<String>) -> Self {
        let input = input.into();
        let result = precon_core::parse(&input);
        Self {
            line,
            input,
            result,
        }
    }

    /// Parses raw bytes; `input` keeps them decoded as Latin-1.
    pub fn parse_bytes(line: usize, input: &[u8]) -> Self {
        Self {
            line,
            input: input.iter().map(|&b| char::from(b)).collect(),
            result: precon_core::parse_bytes(input),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parses every value, numbering them from 1.
pub fn parse_batch<I, S>(values: I) -> Vec<HeaderOutcome>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| HeaderOutcome::parse(i + 1, v))
        .collect()
}

/// Byte-input counterpart of [`parse_batch`].
pub fn parse_byte_batch<I, B>(values: I) -> Vec<HeaderOutcome>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| HeaderOutcome::parse_bytes(i + 1, v.as_ref()))
        .collect()
}

/// Summary of one batch.
#[derive(Debug)]
pub struct Report {
    pub total_values: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub wildcard_lists: usize,
    pub strong_tags: usize,
    pub weak_tags: usize,
    pub failures: Vec<FailureGroup>,
    pub elapsed: Duration,
}

/// Rejections sharing one error kind.
#[derive(Debug)]
pub struct FailureGroup {
    pub label: &'static str,
    pub count: usize,
    pub first_line: usize,
    pub first_error: String,
    pub example: String,
}

impl Report {
    pub fn build(outcomes: &[HeaderOutcome], elapsed: Duration) -> Self {
        let mut wildcard_lists = 0;
        let mut strong_tags = 0;
        let mut weak_tags = 0;
        let mut by_label: HashMap<&'static str, FailureGroup> = HashMap::new();

        for outcome in outcomes {
            match &outcome.result {
                Ok(list) if list.is_wildcard() => wildcard_lists += 1,
                Ok(list) => {
                    for entry in list {
                        match entry {
                            PreconditionEntry::Tag { weak: true, .. } => weak_tags += 1,
                            PreconditionEntry::Tag { weak: false, .. } => strong_tags += 1,
                            PreconditionEntry::Wildcard => {}
                        }
                    }
                }
                Err(e) => {
                    let label = e.kind().label();
                    by_label
                        .entry(label)
                        .or_insert_with(|| FailureGroup {
                            label,
                            count: 0,
                            first_line: outcome.line,
                            first_error: e.to_string(),
                            example: excerpt(&outcome.input),
                        })
                        .count += 1;
                }
            }
        }

        let mut failures: Vec<FailureGroup> = by_label.into_values().collect();
        // Most frequent first; label breaks ties so output is stable.
        failures.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(b.label)));

        let rejected: usize = failures.iter().map(|g| g.count).sum();
        tracing::debug!(
            values = outcomes.len(),
            rejected,
            groups = failures.len(),
            "built batch report"
        );

        Report {
            total_values: outcomes.len(),
            accepted: outcomes.len() - rejected,
            rejected,
            wildcard_lists,
            strong_tags,
            weak_tags,
            failures,
            elapsed,
        }
    }

    /// Render the report as a formatted string.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push('\n');
        out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
        out.push_str("║                 PRECONDITION HEADER REPORT                   ║\n");
        out.push_str("╠══════════════════════════════════════════════════════════════╣\n");
        out.push_str(&format!(
            "║  Header values:      {:>38} ║\n",
            self.total_values
        ));
        out.push_str(&format!("║  Accepted:           {:>38} ║\n", self.accepted));
        out.push_str(&format!("║  Rejected:           {:>38} ║\n", self.rejected));
        out.push_str(&format!(
            "║  Wildcard lists:     {:>38} ║\n",
            self.wildcard_lists
        ));
        out.push_str(&format!(
            "║  Strong tags:        {:>38} ║\n",
            self.strong_tags
        ));
        out.push_str(&format!("║  Weak tags:          {:>38} ║\n", self.weak_tags));
        out.push_str(&format!("║  Elapsed:            {:>35?} ║\n", self.elapsed));
        out.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        if self.failures.is_empty() {
            out.push_str("║  All header values are well-formed.                          ║\n");
        } else {
            out.push_str("║  REJECTIONS                                                  ║\n");
            out.push_str("╠══════════════════════════════════════════════════════════════╣\n");

            for (i, group) in self.failures.iter().enumerate() {
                out.push_str("║                                                              ║\n");
                out.push_str(&format!(
                    "║  {}. [{}] x{}\n",
                    i + 1,
                    group.label,
                    group.count
                ));
                out.push_str(&format!(
                    "║     first at line {}: {}\n",
                    group.first_line, group.example
                ));
                out.push_str(&format!("║     {}\n", group.first_error));
            }
        }

        out.push_str("╚══════════════════════════════════════════════════════════════╝\n");
        out
    }
}

/// Debug-quoted input, cut to `EXAMPLE_WIDTH` characters.
fn excerpt(input: &str) -> String {
    if input.chars().count() <= EXAMPLE_WIDTH {
        format!("{input:?}")
    } else {
        let head: String = input.chars().take(EXAMPLE_WIDTH).collect();
        format!("{head:?}…")
    }
}
