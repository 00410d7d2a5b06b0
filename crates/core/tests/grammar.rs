//! Grammar acceptance and rejection tests against the public API.
//!
//! Run: `cargo test -p precon-core --test grammar`

use precon_core::{
    parse, parse_bytes, EndOfInput, ParseErrorKind, PreconditionEntry, PreconditionList,
};

/// Every internal ETag character, 0x21 / 0x23-0x7E / 0x80-0xFF.
fn all_etag_chars() -> String {
    std::iter::once(0x21u8)
        .chain(0x23..=0x7E)
        .chain(0x80..=0xFF)
        .map(char::from)
        .collect()
}

fn strong(v: &str) -> PreconditionEntry {
    PreconditionEntry::strong(v)
}

fn weak(v: &str) -> PreconditionEntry {
    PreconditionEntry::weak(v)
}

// ---------------------------------------------------------------------------
// Accepted inputs
// ---------------------------------------------------------------------------

#[test]
fn accepts_valid_lists() {
    let cases: Vec<(&str, Vec<PreconditionEntry>)> = vec![
        (r#""""#, vec![strong("")]),
        (r#"W/"""#, vec![weak("")]),
        (r#""abc""#, vec![strong("abc")]),
        (r#""abc","bcd""#, vec![strong("abc"), strong("bcd")]),
        (r#""abc", "bcd""#, vec![strong("abc"), strong("bcd")]),
        (
            r#""abc", "bcd", "cde""#,
            vec![strong("abc"), strong("bcd"), strong("cde")],
        ),
        (
            r#" "abc", "bcd", "cde" "#,
            vec![strong("abc"), strong("bcd"), strong("cde")],
        ),
        (
            "\t\"abc\", \"bcd\", \"cde\"\t",
            vec![strong("abc"), strong("bcd"), strong("cde")],
        ),
        (
            r#"W/"abc", "bcd", "cde""#,
            vec![weak("abc"), strong("bcd"), strong("cde")],
        ),
        (
            r#""abc", W/"bcd", "cde""#,
            vec![strong("abc"), weak("bcd"), strong("cde")],
        ),
        (
            r#""abc", "bcd", W/"cde""#,
            vec![strong("abc"), strong("bcd"), weak("cde")],
        ),
        (
            r#"W/"abc", W/"bcd", W/"cde""#,
            vec![weak("abc"), weak("bcd"), weak("cde")],
        ),
        ("*", vec![PreconditionEntry::Wildcard]),
        (" * ", vec![PreconditionEntry::Wildcard]),
        (r#""*""#, vec![strong("*")]),
        (r#"W/"*""#, vec![weak("*")]),
        (r#""a", "a""#, vec![strong("a"), strong("a")]),
    ];

    for (input, expected) in cases {
        let list = parse(input).unwrap_or_else(|e| panic!("{input:?} rejected: {e}"));
        assert_eq!(list.entries(), expected.as_slice(), "input {input:?}");
    }
}

#[test]
fn quoted_content_passes_through_verbatim() {
    let chars = all_etag_chars();
    let list = parse(&format!("\"{chars}\"")).unwrap();
    assert_eq!(list.entries(), [strong(&chars)]);
}

#[test]
fn byte_input_matches_str_input_for_latin1() {
    let chars = all_etag_chars();
    let bytes: Vec<u8> = std::iter::once(b'"')
        .chain(chars.chars().map(|c| c as u8))
        .chain(*br#"", W/"x""#)
        .collect();

    let from_bytes = parse_bytes(&bytes).unwrap();
    let from_str = parse(&format!("\"{chars}\", W/\"x\"")).unwrap();
    assert_eq!(from_bytes, from_str);
}

#[test]
fn reparsing_is_deterministic() {
    let input = r#"W/"abc", "def""#;
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

#[test]
fn whitespace_around_commas_and_ends_is_insignificant() {
    let baseline = parse(r#""a",W/"b","c""#).unwrap();
    for input in [
        " \"a\",W/\"b\",\"c\"",
        "\"a\" ,W/\"b\",\"c\"",
        "\"a\", W/\"b\",\"c\"",
        "\"a\"\t,\tW/\"b\" , \"c\"",
        "\t \"a\",W/\"b\",\"c\" \t",
    ] {
        assert_eq!(parse(input).unwrap(), baseline, "input {input:?}");
    }
}

#[test]
fn wildcard_lists_have_exactly_one_entry() {
    let list = parse("*").unwrap();
    assert!(list.is_wildcard());
    assert_eq!(list.len(), 1);
    assert_eq!(list.tags().count(), 0);
}

#[test]
fn from_str_delegates_to_parser() {
    let list: PreconditionList = r#"W/"x""#.parse().unwrap();
    assert_eq!(list.into_entries(), vec![weak("x")]);
}

#[test]
fn json_output_contract() {
    let list = parse(r#""abc", W/"bcd""#).unwrap();
    assert_eq!(
        serde_json::to_value(&list).unwrap(),
        serde_json::json!([
            { "eTag": "abc", "weak": false },
            { "eTag": "bcd", "weak": true },
        ])
    );
    assert_eq!(
        serde_json::to_value(parse("*").unwrap()).unwrap(),
        serde_json::json!([{ "star": true }])
    );
}

// ---------------------------------------------------------------------------
// Rejected inputs
// ---------------------------------------------------------------------------

#[test]
fn rejects_malformed_lists() {
    use ParseErrorKind::*;

    let cases: Vec<(&str, ParseErrorKind)> = vec![
        ("", UnexpectedEndOfInput(EndOfInput::NoEntries)),
        (" ", UnexpectedEndOfInput(EndOfInput::NoEntries)),
        ("\t", UnexpectedEndOfInput(EndOfInput::NoEntries)),
        ("abc", UnexpectedToken { found: 'a' }),
        (r#""abc"#, UnclosedQuotedTag),
        ("\"abc\",\n\"bce\"", UnexpectedToken { found: '\n' }),
        // A quote ends the tag; there is no escaping.
        (r#""a"bc""#, UnexpectedToken { found: 'b' }),
        (r#""a\"bc""#, UnexpectedToken { found: 'b' }),
        (r#""a c""#, UnexpectedCharacterInQuotedTag { found: ' ' }),
        ("\"a\tc\"", UnexpectedCharacterInQuotedTag { found: '\t' }),
        (r#""abc" "def""#, MissingComma { found: '"' }),
        (r#""abc",,"def""#, UnexpectedComma),
        (r#""abc", ,"def""#, UnexpectedComma),
        ("W/*", WeakWildcard),
        (r#"*, "abc""#, WildcardMustBeAlone),
        (r#""abc", *"#, WildcardMustBeAlone),
        ("*, *", WildcardMustBeAlone),
        (r#"* "abc""#, MissingComma { found: '"' }),
        (r#"W/*, "abc""#, WeakWildcard),
        (r#""abc", W/*"#, WeakWildcard),
        (r#","abc""#, UnexpectedComma),
        (r#""abc","#, UnexpectedEndOfInput(EndOfInput::TrailingComma)),
        (r#""abc", "#, UnexpectedEndOfInput(EndOfInput::TrailingComma)),
        ("W", UnexpectedEndOfInput(EndOfInput::IncompleteWeakPrefix)),
        (r#"w/"abc""#, UnexpectedToken { found: 'w' }),
        (r#"W\"abc""#, MalformedWeakPrefix { expected: '/', found: '\\' }),
        (r#"W /"abc""#, MalformedWeakPrefix { expected: '/', found: ' ' }),
    ];

    for (input, expected) in cases {
        match parse(input) {
            Ok(list) => panic!("{input:?} accepted as {list:?}"),
            Err(e) => {
                assert_eq!(e.code(), "PARSE_ERROR");
                assert_eq!(e.kind(), expected, "input {input:?}");
            }
        }
    }
}

#[test]
fn every_excluded_character_is_rejected_inside_quotes() {
    for b in (0x00u8..=0x20).chain([0x7F]) {
        let err = parse_bytes(&[b'"', b'a', b, b'"']).unwrap_err();
        assert_eq!(
            err.kind(),
            ParseErrorKind::UnexpectedCharacterInQuotedTag {
                found: char::from(b)
            },
            "byte {b:#04x}"
        );
        assert_eq!(err.offset(), Some(2));
    }
}
