//! `PlayerData` decoder.
//!
//! One record per line, fields in a fixed order:
//!
//! ```text
//! Name: <text>, PlayerID: <digits>, Location: X=<f> Y=<f> Z=<f>, Class: <id>,
//!     Growth: <f>, Health: <f>, Stamina: <f>, Hunger: <f>, Thirst: <f>
//! ```
//!
//! Decoding is all or nothing: the first malformed record fails the whole
//! reply and records decoded before it are dropped.

use crate::envelope::{ResponseType, decode_envelope};
use crate::error::{Expected, ParseError, ProtocolError};
use crate::parser::{PResult, class_token, digits, float64, skip_whitespace, tag, take};
use crate::types::{ClassName, Location, Player};

/// Ends the free-text name. Names may contain commas, so the decoder looks
/// for the last occurrence of this marker instead of the first comma.
const NAME_TERMINATOR: &str = ", PlayerID:";

/// Characters of server decoration around a class id (`BP_` ... `_C`).
///
/// The protocol does not document this wrapping; if the server ever changes
/// it, decoded class names will be off by the difference.
const CLASS_PREFIX_LEN: usize = 3;
const CLASS_SUFFIX_LEN: usize = 2;

/// Decodes a raw `PlayerData` response.
///
/// Blank lines are skipped.
///
/// # Errors
/// - [`ProtocolError::MalformedEnvelope`] if the reply is not `PlayerData`.
/// - [`ProtocolError::IncompleteRecord`] if a record line ends early.
/// - [`ProtocolError::MalformedField`] if a field does not match its grammar.
pub fn decode_player_data(raw: &str) -> Result<Vec<Player>, ProtocolError> {
    let envelope = decode_envelope(raw, ResponseType::PlayerData.as_str())?;
    let mut players = Vec::new();
    let mut record = 0;

    for line in envelope.content.split('\n') {
        let line = skip_whitespace(line);
        if line.is_empty() {
            continue;
        }
        record += 1;

        let player = parse_record(line).map_err(|err| {
            if err.is_end_of_input() {
                ProtocolError::IncompleteRecord {
                    line: record,
                    missing: err.expected,
                }
            } else {
                ProtocolError::MalformedField(err)
            }
        })?;
        players.push(player);
    }

    Ok(players)
}

fn parse_record(input: &str) -> Result<Player, ParseError> {
    let (_, rest) = tag(input, "Name:")?;
    let rest = skip_whitespace(rest);

    let name_len = rest.rfind(NAME_TERMINATOR).ok_or_else(|| {
        // A line holding only the name ended early; one with later fields
        // is missing the separator.
        let context = if rest.contains(':') { rest } else { "" };
        ParseError::new(Expected::Tag(NAME_TERMINATOR.into()), context)
    })?;
    let (name, rest) = take(rest, name_len);
    let (_, rest) = take(rest, 1);

    let rest = skip_whitespace(rest);
    let (_, rest) = tag(rest, "PlayerID:")?;
    let rest = skip_whitespace(rest);
    let (id, rest) = digits(rest)?;
    let rest = separator(rest)?;

    let (_, rest) = tag(rest, "Location:")?;
    let (x, rest) = coordinate(rest, "X")?;
    let (y, rest) = coordinate(rest, "Y")?;
    let (z, rest) = coordinate(rest, "Z")?;
    let rest = separator(rest)?;

    let (_, rest) = tag(rest, "Class:")?;
    let rest = skip_whitespace(rest);
    let (class, rest) = class_name(rest)?;
    let (_, rest) = tag(rest, ",")?;

    let (growth, rest) = percentage(rest, "Growth")?;
    let (_, rest) = tag(rest, ",")?;
    let (health, rest) = percentage(rest, "Health")?;
    let (_, rest) = tag(rest, ",")?;
    let (stamina, rest) = percentage(rest, "Stamina")?;
    let (_, rest) = tag(rest, ",")?;
    let (hunger, rest) = percentage(rest, "Hunger")?;
    let (_, rest) = tag(rest, ",")?;
    let (thirst, _) = percentage(rest, "Thirst")?;

    Ok(Player {
        id: id.to_string(),
        name: name.to_string(),
        location: Location { x, y, z },
        class,
        growth,
        health,
        stamina,
        hunger,
        thirst,
    })
}

/// `<ws>,<ws>`
fn separator(input: &str) -> Result<&str, ParseError> {
    let rest = skip_whitespace(input);
    let (_, rest) = tag(rest, ",")?;
    Ok(skip_whitespace(rest))
}

/// `<ws><axis>=<float>`
fn coordinate<'a>(input: &'a str, axis: &str) -> PResult<'a, f64> {
    let rest = skip_whitespace(input);
    let (_, rest) = tag(rest, axis)?;
    let (_, rest) = tag(rest, "=")?;
    float64(rest)
}

/// `<ws><label>:<ws><float>`, scaled to a percentage.
fn percentage<'a>(input: &'a str, label: &str) -> PResult<'a, i8> {
    let rest = skip_whitespace(input);
    let (_, rest) = tag(rest, label)?;
    let (_, rest) = tag(rest, ":")?;
    let rest = skip_whitespace(rest);
    let (fraction, rest) = float64(rest)?;
    Ok((fraction_to_percent(fraction), rest))
}

/// Scales a `[0, 1]` fraction to a whole percentage.
///
/// Truncates toward zero, then narrows to `i8` with two's-complement
/// wrap-around: `1.27 -> 127`, `1.28 -> -128`, `2.0 -> -56`. No rounding and
/// no clamping.
fn fraction_to_percent(fraction: f64) -> i8 {
    (fraction * 100.0).trunc() as i64 as i8
}

/// A decorated class token (`BP_Carnotaurus_C`) with the decoration removed.
fn class_name(input: &str) -> PResult<'_, ClassName> {
    let (token, rest) = class_token(input)?;
    let bare = token
        .get(CLASS_PREFIX_LEN..token.len().saturating_sub(CLASS_SUFFIX_LEN))
        .map(|s| s.trim_matches('_'))
        .unwrap_or_default();
    if bare.is_empty() {
        return Err(ParseError::new(Expected::ClassName, input));
    }
    Ok((ClassName::from(bare), rest))
}
