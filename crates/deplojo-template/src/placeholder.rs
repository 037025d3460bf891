//! Placeholder lexing using `nom`.
//!
//! Splits a string value into literal text and `${name}` placeholders.
//! A `$` that is not followed by `{` is plain text. A `${` that does not
//! open a well-formed placeholder is an error.

use deplojo_common::error::{DeplojoError, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till1, take_while, take_while1},
    character::complete::char,
    combinator::{map, not, recognize},
    sequence::{delimited, pair, terminated},
};

/// Longest slice of source text echoed back in an `InvalidPlaceholder` error.
const MAX_FRAGMENT_CHARS: usize = 64;

/// A piece of a lexed string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output unchanged.
    Literal(&'a str),
    /// Name of a variable referenced as `${name}`.
    Placeholder(&'a str),
}

const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Parses `${name}`.
fn placeholder(input: &str) -> IResult<&str, Segment<'_>> {
    let (input, name) = delimited(
        tag("${"),
        recognize(pair(take_while1(is_ident_start), take_while(is_ident_continue))),
        char('}'),
    )
    .parse(input)?;
    Ok((input, Segment::Placeholder(name)))
}

/// Parses a run of text containing no `$`.
fn literal(input: &str) -> IResult<&str, Segment<'_>> {
    map(take_till1(|c: char| c == '$'), Segment::Literal).parse(input)
}

/// Parses a `$` that does not start a placeholder.
fn lone_dollar(input: &str) -> IResult<&str, Segment<'_>> {
    map(recognize(terminated(char('$'), not(char('{')))), Segment::Literal).parse(input)
}

fn invalid_fragment(rest: &str) -> String {
    let end = rest.find('}').map_or(rest.len(), |idx| idx + 1);
    rest[..end].chars().take(MAX_FRAGMENT_CHARS).collect()
}

/// Splits `input` into literal and placeholder segments, in source order.
///
/// # Errors
///
/// Returns `DeplojoError::InvalidPlaceholder` if a `${` is not followed by a
/// valid name and a closing `}`.
pub fn segments(input: &str) -> Result<Vec<Segment<'_>>> {
    let mut rest = input;
    let mut out = Vec::new();

    while !rest.is_empty() {
        match alt((placeholder, literal, lone_dollar)).parse(rest) {
            Ok((remaining, segment)) => {
                out.push(segment);
                rest = remaining;
            }
            Err(_) => {
                return Err(DeplojoError::InvalidPlaceholder {
                    fragment: invalid_fragment(rest),
                });
            }
        }
    }

    Ok(out)
}
