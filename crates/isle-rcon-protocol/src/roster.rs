//! `PlayerList` decoder.
//!
//! The content is one flat comma-separated list, three fields per player:
//!
//! ```text
//! PlayerList
//! 76561198000000001,Alice,<unused>,76561198000000002,Bob,<unused>,
//! ```
//!
//! The first group whose id is blank ends the list, whatever follows it.

use crate::envelope::{ResponseType, decode_envelope};
use crate::error::{Expected, ProtocolError};
use crate::types::RosterEntry;

/// Fields per roster record: id, name, and one the server leaves unused.
const FIELDS_PER_ENTRY: usize = 3;

/// Decodes a raw `PlayerList` response.
///
/// # Errors
/// [`ProtocolError::MalformedEnvelope`] if the reply is not a `PlayerList`;
/// [`ProtocolError::IncompleteRecord`] if a non-blank id has no name field.
pub fn decode_player_list(raw: &str) -> Result<Vec<RosterEntry>, ProtocolError> {
    let envelope = decode_envelope(raw, ResponseType::PlayerList.as_str())?;
    let fields: Vec<&str> = envelope.content.split(',').collect();
    let mut entries = Vec::with_capacity(fields.len() / FIELDS_PER_ENTRY);

    for (index, group) in fields.chunks(FIELDS_PER_ENTRY).enumerate() {
        let id = group[0].trim();
        if id.is_empty() {
            break;
        }
        let name = group.get(1).ok_or_else(|| ProtocolError::IncompleteRecord {
            line: index + 1,
            missing: Expected::Tag(",".into()),
        })?;
        entries.push(RosterEntry {
            id: id.to_string(),
            name: name.trim().to_string(),
        });
    }

    Ok(entries)
}
