//! Error types for the precondition parser and the workspace.

use std::fmt;
use thiserror::Error;

/// A rejected precondition header value.
///
/// Every violation is fatal to the parse call; no partial list is produced.
/// `offset` is the byte offset of the offending character, or `None` when
/// the problem was only detectable at end of input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", at_offset(.offset))]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: Option<usize>,
}

impl ParseError {
    /// Stable discriminator shared by every parse failure.
    pub const CODE: &'static str = "PARSE_ERROR";

    pub(crate) fn at(kind: ParseErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset: Some(offset),
        }
    }

    pub(crate) fn at_end(kind: ParseErrorKind) -> Self {
        Self { kind, offset: None }
    }

    pub fn code(&self) -> &'static str {
        Self::CODE
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

fn at_offset(offset: &Option<usize>) -> String {
    match offset {
        Some(o) => format!(" (at offset {o})"),
        None => String::new(),
    }
}

fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

/// What went wrong. One variant per distinguishable violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// An entry started with something other than `"`, `W`, or `*`.
    #[error("expected '\"', \"W\", or \"*\", found {found:?}")]
    UnexpectedToken { found: char },

    /// Leading comma, or a comma directly after another comma.
    #[error("expected '\"', \"W\", or \"*\", found ','")]
    UnexpectedComma,

    /// Two entries with no comma between them.
    #[error("expected ',', found {found:?}")]
    MissingComma { found: char },

    /// `W` not followed by `/`, or `W/` not followed by `"`.
    #[error("expected {expected:?} after weak tag indicator, found {found:?}")]
    MalformedWeakPrefix { expected: char, found: char },

    #[error(
        "unexpected character inside quoted entity tag: {found:?} (U+{:04X})",
        code_point(.found)
    )]
    UnexpectedCharacterInQuotedTag { found: char },

    #[error("unclosed quoted entity tag")]
    UnclosedQuotedTag,

    #[error("\"*\" precondition may not be flagged weak")]
    WeakWildcard,

    #[error("if the \"*\" precondition is present, it must be alone")]
    WildcardMustBeAlone,

    #[error("unexpected end of input: {0}")]
    UnexpectedEndOfInput(EndOfInput),
}

impl ParseErrorKind {
    /// Short stable name used in reports and NDJSON rows.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::UnexpectedComma => "unexpected_comma",
            Self::MissingComma { .. } => "missing_comma",
            Self::MalformedWeakPrefix { .. } => "malformed_weak_prefix",
            Self::UnexpectedCharacterInQuotedTag { .. } => "unexpected_character_in_quoted_tag",
            Self::UnclosedQuotedTag => "unclosed_quoted_tag",
            Self::WeakWildcard => "weak_wildcard",
            Self::WildcardMustBeAlone => "wildcard_must_be_alone",
            Self::UnexpectedEndOfInput(EndOfInput::NoEntries) => "empty_input",
            Self::UnexpectedEndOfInput(EndOfInput::IncompleteWeakPrefix) => {
                "incomplete_weak_prefix"
            }
            Self::UnexpectedEndOfInput(EndOfInput::TrailingComma) => "trailing_comma",
        }
    }
}

/// Why the input ended too early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndOfInput {
    /// Empty, or only spaces and tabs.
    NoEntries,
    /// Input stopped after `W` or `W/`.
    IncompleteWeakPrefix,
    /// A comma with no entry after it.
    TrailingComma,
}

impl fmt::Display for EndOfInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoEntries => "no preconditions",
            Self::IncompleteWeakPrefix => "incomplete weak tag prefix",
            Self::TrailingComma => "trailing comma",
        })
    }
}

/// Top-level error enum for the binary and batch tooling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreconError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{rejected} of {total} header values were rejected")]
    Rejected { rejected: usize, total: usize },
}

pub type PreconResult<T> = Result<T, PreconError>;
