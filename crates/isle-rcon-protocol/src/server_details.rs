//! `ServerDetails` decoder.
//!
//! The content is one line of `Key: value` pairs separated by commas, in no
//! particular order:
//!
//! ```text
//! ServerDetails ServerName: Island1, ServerMaxPlayers: 64, bSpawnAI: true
//! ```
//!
//! The key table is closed. A key this module does not know aborts the
//! decode with [`ProtocolError::UnknownKey`], which is how a server update
//! that adds settings gets noticed.

use crate::envelope::{ResponseType, decode_envelope};
use crate::error::{Expected, ParseError, ProtocolError};
use crate::parser::{PResult, int, letters1, skip_whitespace, tag};
use crate::types::ServerDetails;

/// Every key the server is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKey {
    ServerName,
    ServerPassword,
    ServerMap,
    ServerMaxPlayers,
    ServerCurrentPlayers,
    EnableMutations,
    EnableHumans,
    HasPassword,
    QueueEnabled,
    Whitelist,
    SpawnAi,
    AllowRecordingReplay,
    UseRegionSpawning,
    UseRegionSpawnCooldown,
    RegionSpawnCooldownTimeSeconds,
    DayLengthMinutes,
    NightLengthMinutes,
    EnableGlobalChat,
}

impl DetailKey {
    /// All keys, in the order the server usually sends them.
    pub const ALL: [DetailKey; 18] = [
        Self::ServerName,
        Self::ServerPassword,
        Self::ServerMap,
        Self::ServerMaxPlayers,
        Self::ServerCurrentPlayers,
        Self::EnableMutations,
        Self::EnableHumans,
        Self::HasPassword,
        Self::QueueEnabled,
        Self::Whitelist,
        Self::SpawnAi,
        Self::AllowRecordingReplay,
        Self::UseRegionSpawning,
        Self::UseRegionSpawnCooldown,
        Self::RegionSpawnCooldownTimeSeconds,
        Self::DayLengthMinutes,
        Self::NightLengthMinutes,
        Self::EnableGlobalChat,
    ];

    /// The key as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerName => "ServerName",
            Self::ServerPassword => "ServerPassword",
            Self::ServerMap => "ServerMap",
            Self::ServerMaxPlayers => "ServerMaxPlayers",
            Self::ServerCurrentPlayers => "ServerCurrentPlayers",
            Self::EnableMutations => "bEnableMutations",
            Self::EnableHumans => "bEnableHumans",
            Self::HasPassword => "bServerPassword",
            Self::QueueEnabled => "bQueueEnabled",
            Self::Whitelist => "bServerWhitelist",
            Self::SpawnAi => "bSpawnAI",
            Self::AllowRecordingReplay => "bAllowRecordingReplay",
            Self::UseRegionSpawning => "bUseRegionSpawning",
            Self::UseRegionSpawnCooldown => "bUseRegionSpawnCooldown",
            Self::RegionSpawnCooldownTimeSeconds => "RegionSpawnCooldownTimeSeconds",
            Self::DayLengthMinutes => "ServerDayLengthMinutes",
            Self::NightLengthMinutes => "ServerNightLengthMinutes",
            Self::EnableGlobalChat => "bEnableGlobalChat",
        }
    }

    /// Looks up a wire key. `None` means the key is outside the table.
    pub fn from_key(key: &str) -> Option<DetailKey> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Parses this key's value from `input` and stores it in `details`.
    fn apply<'a>(self, details: &mut ServerDetails, input: &'a str) -> Result<&'a str, ParseError> {
        let rest = match self {
            Self::ServerName => assign(&mut details.name, string_value(input)),
            Self::ServerPassword => assign(&mut details.password, string_value(input)),
            Self::ServerMap => assign(&mut details.map, string_value(input)),
            Self::ServerMaxPlayers => assign(&mut details.max_players, int(input)?),
            Self::ServerCurrentPlayers => assign(&mut details.current_players, int(input)?),
            Self::EnableMutations => assign(&mut details.enable_mutations, bool_value(input)?),
            Self::EnableHumans => assign(&mut details.enable_humans, bool_value(input)?),
            Self::HasPassword => assign(&mut details.has_password, bool_value(input)?),
            Self::QueueEnabled => assign(&mut details.queue_enabled, bool_value(input)?),
            Self::Whitelist => assign(&mut details.whitelist, bool_value(input)?),
            Self::SpawnAi => assign(&mut details.spawn_ai, bool_value(input)?),
            Self::AllowRecordingReplay => {
                assign(&mut details.allow_recording_replay, bool_value(input)?)
            }
            Self::UseRegionSpawning => {
                assign(&mut details.use_region_spawning, bool_value(input)?)
            }
            Self::UseRegionSpawnCooldown => {
                assign(&mut details.use_region_spawn_cooldown, bool_value(input)?)
            }
            Self::RegionSpawnCooldownTimeSeconds => {
                assign(&mut details.region_spawn_cooldown_secs, int(input)?)
            }
            Self::DayLengthMinutes => assign(&mut details.day_length_minutes, int(input)?),
            Self::NightLengthMinutes => assign(&mut details.night_length_minutes, int(input)?),
            Self::EnableGlobalChat => {
                assign(&mut details.enable_global_chat, bool_value(input)?)
            }
        };
        Ok(rest)
    }
}

fn assign<'a, T>(field: &mut T, (value, rest): (T, &'a str)) -> &'a str {
    *field = value;
    rest
}

/// Everything up to the next comma (or the end). Never fails.
fn string_value(input: &str) -> (String, &str) {
    let end = input.find(',').unwrap_or(input.len());
    (input[..end].to_string(), &input[end..])
}

/// The literal `true` or `false`.
fn bool_value(input: &str) -> PResult<'_, bool> {
    if let Ok((_, rest)) = tag(input, "true") {
        return Ok((true, rest));
    }
    if let Ok((_, rest)) = tag(input, "false") {
        return Ok((false, rest));
    }
    Err(ParseError::new(Expected::Bool, input))
}

/// Decodes a raw `ServerDetails` response.
///
/// Keys may come in any order and any subset; missing keys keep the
/// [`ServerDetails::default`] value and a repeated key overwrites the
/// earlier one.
///
/// # Errors
/// - [`ProtocolError::MalformedEnvelope`] if the reply is not `ServerDetails`.
/// - [`ProtocolError::UnknownKey`] for a key outside [`DetailKey::ALL`].
/// - [`ProtocolError::MalformedField`] if a key or value does not parse.
pub fn decode_server_details(raw: &str) -> Result<ServerDetails, ProtocolError> {
    let envelope = decode_envelope(raw, ResponseType::ServerDetails.as_str())?;
    let mut details = ServerDetails::default();
    let mut rest = skip_whitespace(envelope.content);

    while !rest.is_empty() {
        let (key, r) = letters1(rest)?;
        let (_, r) = tag(r, ":")?;
        let r = skip_whitespace(r);

        let detail = DetailKey::from_key(key)
            .ok_or_else(|| ProtocolError::UnknownKey(key.to_string()))?;
        let r = skip_whitespace(detail.apply(&mut details, r)?);

        let r = r.strip_prefix(',').unwrap_or(r);
        rest = skip_whitespace(r);
    }

    Ok(details)
}
