//! Primitive parsers over a remaining-input cursor.
//!
//! Every parser takes the unconsumed input (`&str`) and returns the value it
//! recognized together with whatever input is left:
//!
//! ```text
//! parser(cursor) -> Ok((value, rest)) | Err(ParseError)
//! ```
//!
//! Parsers never look behind their starting position and never backtrack.
//! A decoder is just a sequence of these calls threaded through `?`, so the
//! first mismatch aborts the whole decode.
//!
//! `take` and `skip_whitespace` cannot fail and return plain values instead
//! of a `Result`.

use crate::error::{Expected, ParseError};

/// Result of a primitive parser: the recognized value and the remainder.
pub type PResult<'a, T> = Result<(T, &'a str), ParseError>;

/// Returns `true` for `0`-`9`.
pub fn is_ascii_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Returns `true` for `a`-`z` and `A`-`Z`.
pub fn is_ascii_letter(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Returns `true` for the whitespace the server emits: space, tab, CR, LF.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Length of the longest prefix of `input` whose bytes satisfy `pred`.
///
/// All predicates used here only accept ASCII, so the returned length is
/// always a character boundary.
fn span(input: &str, pred: impl Fn(u8) -> bool) -> usize {
    input.bytes().take_while(|&b| pred(b)).count()
}

/// Matches `literal` at the start of `input`.
pub fn tag<'a>(input: &'a str, literal: &str) -> PResult<'a, &'a str> {
    match input.strip_prefix(literal) {
        Some(rest) => Ok((&input[..literal.len()], rest)),
        None => Err(ParseError::new(Expected::Tag(literal.to_string()), input)),
    }
}

/// Matches one or more ASCII digits.
pub fn digits(input: &str) -> PResult<'_, &str> {
    let n = span(input, is_ascii_digit);
    if n == 0 {
        return Err(ParseError::new(Expected::Digits, input));
    }
    Ok((&input[..n], &input[n..]))
}

/// Matches one or more ASCII letters.
pub fn letters1(input: &str) -> PResult<'_, &str> {
    let n = span(input, is_ascii_letter);
    if n == 0 {
        return Err(ParseError::new(Expected::Key, input));
    }
    Ok((&input[..n], &input[n..]))
}

/// Matches one or more ASCII letters or underscores.
pub fn class_token(input: &str) -> PResult<'_, &str> {
    let n = span(input, |b| b == b'_' || is_ascii_letter(b));
    if n == 0 {
        return Err(ParseError::new(Expected::ClassName, input));
    }
    Ok((&input[..n], &input[n..]))
}

/// Matches an optional `-` followed by digits, as text.
fn signed_digits(input: &str) -> PResult<'_, &str> {
    let sign = usize::from(input.starts_with('-'));
    let (run, _) = digits(&input[sign..]).map_err(|_| ParseError::new(Expected::Integer, input))?;
    let n = sign + run.len();
    Ok((&input[..n], &input[n..]))
}

/// Parses a decimal integer into an `i32`.
pub fn int(input: &str) -> PResult<'_, i32> {
    let (text, rest) = signed_digits(input)?;
    let value = text
        .parse()
        .map_err(|_| ParseError::new(Expected::Overflow, input))?;
    Ok((value, rest))
}

/// Parses a decimal integer into an `i64`.
pub fn int64(input: &str) -> PResult<'_, i64> {
    let (text, rest) = signed_digits(input)?;
    let value = text
        .parse()
        .map_err(|_| ParseError::new(Expected::Overflow, input))?;
    Ok((value, rest))
}

/// Parses `-?[0-9]*(\.[0-9]*)?` as an `f64`.
///
/// At least one digit must appear on either side of the decimal point, so a
/// lone `-` or `.` is rejected. Exponents are not part of the grammar.
pub fn float64(input: &str) -> PResult<'_, f64> {
    let bytes = input.as_bytes();
    let mut pos = usize::from(input.starts_with('-'));
    let int_digits = span(&input[pos..], is_ascii_digit);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = span(&input[pos..], is_ascii_digit);
        pos += frac_digits;
    }

    if int_digits + frac_digits == 0 {
        return Err(ParseError::new(Expected::Float, input));
    }

    let value = input[..pos]
        .parse()
        .map_err(|_| ParseError::new(Expected::Float, input))?;
    Ok((value, &input[pos..]))
}

/// Splits off up to `n` bytes of `input`. Never fails.
///
/// If `n` exceeds the input it is clamped to the input length. If it lands
/// inside a multi-byte character, the cut moves back to the previous
/// character boundary.
pub fn take(input: &str, n: usize) -> (&str, &str) {
    let mut n = n.min(input.len());
    while !input.is_char_boundary(n) {
        n -= 1;
    }
    input.split_at(n)
}

/// Skips spaces, tabs, carriage returns and line feeds. Never fails.
pub fn skip_whitespace(input: &str) -> &str {
    &input[span(input, is_whitespace)..]
}
