//! The response envelope shared by every typed reply.
//!
//! ```text
//! [2025.01.02-03.04.05] PlayerList<content...>
//! └──── optional ─────┘ └─ tag ──┘└─ opaque ─┘
//! ```
//!
//! Two replies are not enveloped at all: the authentication outcome and the
//! `On`/`Off` result of toggle commands. Their helpers live here too.

use crate::error::ProtocolError;
use crate::parser::{skip_whitespace, tag};
use crate::timestamp::timestamp;

/// What the server answers to a correct password.
pub const PASSWORD_ACCEPTED: &str = "Password Accepted";

/// Response type tags this crate knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Reply to `GetPlayerList` (0x40).
    PlayerList,
    /// Reply to `GetPlayerData` (0x77).
    PlayerData,
    /// Reply to `GetServerDetails` (0x12).
    ServerDetails,
}

impl ResponseType {
    /// The literal tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlayerList => "PlayerList",
            Self::PlayerData => "PlayerData",
            Self::ServerDetails => "ServerDetails",
        }
    }
}

/// A response split into its timestamp, type tag and untyped content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Canonical timestamp, if the server sent one.
    pub timestamp: Option<String>,
    /// The type tag, always equal to the one requested.
    pub type_tag: &'a str,
    /// Everything after the tag, untouched.
    pub content: &'a str,
}

/// Strips the optional timestamp and the expected type tag from `raw`.
///
/// # Errors
/// Returns [`ProtocolError::MalformedEnvelope`] if the bracketed timestamp is
/// malformed or the tag at the cursor is not `expected_tag`. There is no
/// fallback to other tags: a `PlayerData` reply to a `PlayerList` request is
/// an error, not a different variant.
pub fn decode_envelope<'a>(
    raw: &'a str,
    expected_tag: &str,
) -> Result<Envelope<'a>, ProtocolError> {
    let malformed = |source| ProtocolError::MalformedEnvelope {
        tag: expected_tag.to_string(),
        source,
    };

    let mut rest = raw;
    let mut stamp = None;

    if rest.starts_with('[') {
        let (_, r) = tag(rest, "[").map_err(malformed)?;
        let (ts, r) = timestamp(r).map_err(malformed)?;
        let (_, r) = tag(r, "]").map_err(malformed)?;
        rest = skip_whitespace(r);
        stamp = Some(ts);
    }

    let (type_tag, content) = tag(rest, expected_tag).map_err(malformed)?;

    Ok(Envelope {
        timestamp: stamp,
        type_tag,
        content,
    })
}

/// Trailing bytes the transport may leave on an un-enveloped reply.
fn trim_trailer(raw: &str) -> &str {
    raw.trim_end_matches(|c: char| c.is_control() || c.is_whitespace())
}

/// Returns `true` if `raw` is the server's password-accepted reply.
pub fn is_password_accepted(raw: &str) -> bool {
    trim_trailer(raw) == PASSWORD_ACCEPTED
}

/// Reads the new state from a toggle reply such as `Whitelist is now On`.
///
/// Only the last two characters matter: `On` means enabled, anything else
/// (including `Off` or a reply too short to hold a state) means disabled.
pub fn toggle_state(raw: &str) -> bool {
    trim_trailer(raw).ends_with("On")
}
