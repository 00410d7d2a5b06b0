//! Parsed precondition entries and lists.

use crate::error::{EndOfInput, ParseError, ParseErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One precondition from an `If-Match` / `If-None-Match` value.
///
/// Serializes as `{"star": true}` or `{"eTag": "...", "weak": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EntryRepr", into = "EntryRepr")]
pub enum PreconditionEntry {
    /// The literal `*`.
    Wildcard,
    /// A quoted entity tag. `value` excludes the quotes and is verbatim.
    Tag { value: String, weak: bool },
}

impl PreconditionEntry {
    pub fn strong(value: impl Into<String>) -> Self {
        Self::Tag {
            value: value.into(),
            weak: false,
        }
    }

    pub fn weak(value: impl Into<String>) -> Self {
        Self::Tag {
            value: value.into(),
            weak: true,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// `true` only for `W/"..."` tags.
    pub fn is_weak(&self) -> bool {
        matches!(self, Self::Tag { weak: true, .. })
    }

    /// The tag value, if this is a tag.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Tag { value, .. } => Some(value),
            Self::Wildcard => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum EntryRepr {
    Star {
        star: bool,
    },
    Tag {
        #[serde(rename = "eTag")]
        e_tag: String,
        weak: bool,
    },
}

impl TryFrom<EntryRepr> for PreconditionEntry {
    type Error = &'static str;

    fn try_from(repr: EntryRepr) -> Result<Self, Self::Error> {
        match repr {
            EntryRepr::Star { star: true } => Ok(Self::Wildcard),
            EntryRepr::Star { star: false } => Err("\"star\" must be true when present"),
            EntryRepr::Tag { e_tag, weak } => Ok(Self::Tag { value: e_tag, weak }),
        }
    }
}

impl From<PreconditionEntry> for EntryRepr {
    fn from(entry: PreconditionEntry) -> Self {
        match entry {
            PreconditionEntry::Wildcard => Self::Star { star: true },
            PreconditionEntry::Tag { value, weak } => Self::Tag { e_tag: value, weak },
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Ordered, non-empty list of preconditions in input order.
///
/// A wildcard entry is always the only entry. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PreconditionEntry>", into = "Vec<PreconditionEntry>")]
pub struct PreconditionList(Vec<PreconditionEntry>);

impl PreconditionList {
    /// Wraps entries already known to satisfy the list invariants.
    pub(crate) fn from_checked(entries: Vec<PreconditionEntry>) -> Self {
        debug_assert!(!entries.is_empty());
        Self(entries)
    }

    pub fn entries(&self) -> &[PreconditionEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<PreconditionEntry> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a parsed list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PreconditionEntry> {
        self.0.iter()
    }

    /// `true` when the list is the single `*` precondition.
    pub fn is_wildcard(&self) -> bool {
        matches!(self.0.as_slice(), [PreconditionEntry::Wildcard])
    }

    /// `(value, weak)` for every tag, in order.
    pub fn tags(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0.iter().filter_map(|e| match e {
            PreconditionEntry::Tag { value, weak } => Some((value.as_str(), *weak)),
            PreconditionEntry::Wildcard => None,
        })
    }
}

impl TryFrom<Vec<PreconditionEntry>> for PreconditionList {
    type Error = ParseError;

    fn try_from(entries: Vec<PreconditionEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(ParseError::at_end(ParseErrorKind::UnexpectedEndOfInput(
                EndOfInput::NoEntries,
            )));
        }
        if entries.len() > 1 && entries.iter().any(PreconditionEntry::is_wildcard) {
            return Err(ParseError::at_end(ParseErrorKind::WildcardMustBeAlone));
        }
        Ok(Self(entries))
    }
}

impl From<PreconditionList> for Vec<PreconditionEntry> {
    fn from(list: PreconditionList) -> Self {
        list.0
    }
}

impl FromStr for PreconditionList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl IntoIterator for PreconditionList {
    type Item = PreconditionEntry;
    type IntoIter = std::vec::IntoIter<PreconditionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PreconditionList {
    type Item = &'a PreconditionEntry;
    type IntoIter = std::slice::Iter<'a, PreconditionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
