//! The server's `YYYY.MM.DD-hh.mm.ss` timestamp.

use crate::parser::{PResult, digits, tag};

/// Parses a timestamp and returns it in canonical `YYYY.MM.DD-hh.mm.ss` form.
///
/// Only the structure is checked. `2025.13.40-99.99.99` is accepted; the
/// server is trusted to send real dates.
pub fn timestamp(input: &str) -> PResult<'_, String> {
    let (year, rest) = digits(input)?;
    let (_, rest) = tag(rest, ".")?;
    let (month, rest) = digits(rest)?;
    let (_, rest) = tag(rest, ".")?;
    let (day, rest) = digits(rest)?;
    let (_, rest) = tag(rest, "-")?;
    let (hour, rest) = digits(rest)?;
    let (_, rest) = tag(rest, ".")?;
    let (minute, rest) = digits(rest)?;
    let (_, rest) = tag(rest, ".")?;
    let (second, rest) = digits(rest)?;

    Ok((format!("{year}.{month}.{day}-{hour}.{minute}.{second}"), rest))
}
