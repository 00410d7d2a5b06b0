//! Single-pass recognizer for entity-tag precondition lists.
//!
//! ```text
//! list        = entry *( OWS "," OWS entry )
//! entry       = "*" / [ "W/" ] DQUOTE *etagc DQUOTE
//! etagc       = %x21 / %x23-7E / %x80-FF
//! OWS         = *( SP / HTAB )
//! ```
//!
//! Optional whitespace is allowed around the whole list and around commas,
//! nowhere else. Tag values are sliced from the input on close, never
//! rebuilt character by character.

use crate::error::{EndOfInput, ParseError, ParseErrorKind};
use crate::types::{PreconditionEntry, PreconditionList};

/// Parses an `If-Match` / `If-None-Match` field value.
///
/// The header name and colon must already be stripped.
pub fn parse(input: &str) -> Result<PreconditionList, ParseError> {
    run(input.char_indices(), |start, end| input[start..end].to_owned())
}

/// Parses a raw field value, reading each byte as one Latin-1 character.
pub fn parse_bytes(input: &[u8]) -> Result<PreconditionList, ParseError> {
    run(
        input.iter().map(|&b| char::from(b)).enumerate(),
        |start, end| input[start..end].iter().map(|&b| char::from(b)).collect(),
    )
}

/// `%x21 / %x23-7E / %x80-FF`.
#[inline]
pub fn is_etag_char(c: char) -> bool {
    matches!(c, '\u{21}' | '\u{23}'..='\u{7E}' | '\u{80}'..='\u{FF}')
}

#[inline]
fn is_optional_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn run<I, F>(mut chars: I, slice: F) -> Result<PreconditionList, ParseError>
where
    I: Iterator<Item = (usize, char)>,
    F: Fn(usize, usize) -> String,
{
    let mut scanner = Scanner::default();
    let result = chars
        .try_for_each(|(offset, c)| scanner.step(offset, c, &slice))
        .and_then(|()| scanner.finish());

    match &result {
        Ok(list) => tracing::trace!(entries = list.len(), "parsed precondition list"),
        Err(e) => tracing::debug!(
            kind = e.kind().label(),
            offset = ?e.offset(),
            "rejected precondition list"
        ),
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Inside `"..."`; `start` is the offset just past the opening quote.
    InQuotedTag { start: usize },
    /// Saw `W`.
    AwaitingSlash,
    /// Saw `W/`.
    AwaitingQuoteAfterSlash,
}

#[derive(Debug)]
struct Scanner {
    state: State,
    entries: Vec<PreconditionEntry>,
    weak: bool,
    comma_pending: bool,
    wildcard_seen: bool,
}

impl Default for Scanner {
    fn default() -> Self {
        Self {
            state: State::Idle,
            entries: Vec::new(),
            weak: false,
            comma_pending: false,
            wildcard_seen: false,
        }
    }
}

impl Scanner {
    fn step<F>(&mut self, offset: usize, c: char, slice: &F) -> Result<(), ParseError>
    where
        F: Fn(usize, usize) -> String,
    {
        match self.state {
            State::InQuotedTag { start } => {
                if c == '"' {
                    self.entries.push(PreconditionEntry::Tag {
                        value: slice(start, offset),
                        weak: self.weak,
                    });
                    self.weak = false;
                    self.state = State::Idle;
                } else if !is_etag_char(c) {
                    return Err(ParseError::at(
                        ParseErrorKind::UnexpectedCharacterInQuotedTag { found: c },
                        offset,
                    ));
                }
            }
            // No whitespace is skipped inside `W/"`, unlike around commas.
            State::AwaitingSlash => {
                if c != '/' {
                    return Err(ParseError::at(
                        ParseErrorKind::MalformedWeakPrefix {
                            expected: '/',
                            found: c,
                        },
                        offset,
                    ));
                }
                self.state = State::AwaitingQuoteAfterSlash;
            }
            State::AwaitingQuoteAfterSlash => match c {
                '"' => self.state = State::InQuotedTag { start: offset + 1 },
                // `W/*`
                '*' => return Err(ParseError::at(ParseErrorKind::WeakWildcard, offset)),
                _ => {
                    return Err(ParseError::at(
                        ParseErrorKind::MalformedWeakPrefix {
                            expected: '"',
                            found: c,
                        },
                        offset,
                    ))
                }
            },
            State::Idle if is_optional_whitespace(c) => {}
            State::Idle => match c {
                ',' => {
                    if self.entries.is_empty() || self.comma_pending {
                        return Err(ParseError::at(ParseErrorKind::UnexpectedComma, offset));
                    }
                    self.comma_pending = true;
                }
                '*' => {
                    self.begin_entry(offset, c)?;
                    self.entries.push(PreconditionEntry::Wildcard);
                    self.wildcard_seen = true;
                }
                '"' => {
                    self.begin_entry(offset, c)?;
                    self.state = State::InQuotedTag { start: offset + 1 };
                }
                'W' => {
                    self.begin_entry(offset, c)?;
                    self.weak = true;
                    self.state = State::AwaitingSlash;
                }
                _ => {
                    return Err(ParseError::at(
                        ParseErrorKind::UnexpectedToken { found: c },
                        offset,
                    ))
                }
            },
        }
        Ok(())
    }

    /// Every entry after the first must be preceded by exactly one comma.
    fn begin_entry(&mut self, offset: usize, found: char) -> Result<(), ParseError> {
        if !self.entries.is_empty() && !self.comma_pending {
            return Err(ParseError::at(ParseErrorKind::MissingComma { found }, offset));
        }
        self.comma_pending = false;
        Ok(())
    }

    fn finish(self) -> Result<PreconditionList, ParseError> {
        match self.state {
            State::Idle => {}
            State::InQuotedTag { .. } => {
                return Err(ParseError::at_end(ParseErrorKind::UnclosedQuotedTag))
            }
            State::AwaitingSlash | State::AwaitingQuoteAfterSlash => {
                return Err(end_of_input(EndOfInput::IncompleteWeakPrefix))
            }
        }
        if self.entries.is_empty() {
            return Err(end_of_input(EndOfInput::NoEntries));
        }
        if self.comma_pending {
            return Err(end_of_input(EndOfInput::TrailingComma));
        }
        // Only decidable once the whole list is known.
        if self.wildcard_seen && self.entries.len() > 1 {
            return Err(ParseError::at_end(ParseErrorKind::WildcardMustBeAlone));
        }
        Ok(PreconditionList::from_checked(self.entries))
    }
}

fn end_of_input(reason: EndOfInput) -> ParseError {
    ParseError::at_end(ParseErrorKind::UnexpectedEndOfInput(reason))
}
