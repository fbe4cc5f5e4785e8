//! Parse number and string literals.
//!
//! Numbers are either base 16 (prefixed by `0x`, unsigned, up to 32 bits) or base 10 (optionally
//! signed, within the `i32` range). Both yield the raw 32-bit pattern.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{digit1, one_of},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::pair,
    Finish, IResult,
};
use thiserror::Error;

use crate::constants::Word;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid numeric literal {token:?}")]
pub struct ParseNumberError {
    pub token: String,
}

/// Extract a hexadecimal literal
fn take_hexadecimal_literal(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag_no_case("0x")(input)?;
    take_while1(|c: char| c.is_ascii_hexdigit())(input)
}

/// Parse a hexadecimal number
fn parse_hexadecimal(input: &str) -> IResult<&str, Word> {
    map_res(take_hexadecimal_literal, |digits| {
        Word::from_str_radix(digits, 16)
    })(input)
}

/// Parse a signed decimal number
fn parse_decimal(input: &str) -> IResult<&str, Word> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), |literal: &str| {
        literal.parse::<i32>().map(|value| value as Word)
    })(input)
}

/// Parse a whole token as a number literal
///
/// # Errors
///
/// Fails if the token is not entirely a number literal, or if it does not fit in 32 bits.
pub fn parse_number(token: &str) -> Result<Word, ParseNumberError> {
    all_consuming(alt((parse_hexadecimal, parse_decimal)))(token)
        .finish()
        .map(|(_, value)| value)
        .map_err(|_: nom::error::Error<&str>| ParseNumberError {
            token: token.to_owned(),
        })
}

/// Extract the bytes of a string literal
///
/// The literal spans from the first to the last double quote of the text. The `\n`, `\t` and
/// `\0` escapes are translated, every other character is copied verbatim. Returns `None` if the
/// text has no pair of quotes.
pub fn parse_string_literal(text: &str) -> Option<Vec<u8>> {
    let start = text.find('"')?;
    let end = text.rfind('"')?;
    if start >= end {
        return None;
    }

    let mut bytes = Vec::with_capacity(end - start);
    let mut input = text[start + 1..end].bytes().peekable();
    while let Some(byte) = input.next() {
        if byte == b'\\' {
            let escaped = match input.peek() {
                Some(b'n') => Some(b'\n'),
                Some(b't') => Some(b'\t'),
                Some(b'0') => Some(0),
                _ => None,
            };

            if let Some(escaped) = escaped {
                input.next();
                bytes.push(escaped);
                continue;
            }
        }

        bytes.push(byte);
    }

    Some(bytes)
}
