//! Outgoing command frames.
//!
//! Every request is a single write with no length prefix:
//!
//! ```text
//! auth:     [0x01][password bytes]
//! command:  [0x02][code][param0],[param1],...
//! ```
//!
//! Parameters are joined with `,` and nothing is escaped. A parameter that
//! itself contains a comma (a kick reason like `"spam, again"`) shifts every
//! following field on the server side. That is how the server reads frames,
//! so the encoder leaves it alone; callers that need commas must avoid them.

use crate::types::ClassName;

/// Outer message type: authenticate with a password.
pub const AUTH: u8 = 0x01;
/// Outer message type: execute a sub-command.
pub const EXEC_COMMAND: u8 = 0x02;
/// Outer message type the server uses for value replies.
pub const RESPONSE_VALUE: u8 = 0x03;

/// Parameter separator inside an `EXEC_COMMAND` frame.
pub const PARAM_SEPARATOR: u8 = b',';

/// Known sub-command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandCode {
    Announce = 0x10,
    DirectMessage = 0x11,
    GetServerDetails = 0x12,
    WipeCorpses = 0x13,
    UpdatePlayables = 0x15,
    BanPlayer = 0x20,
    KickPlayer = 0x30,
    GetPlayerList = 0x40,
    Save = 0x50,
    GetPlayerData = 0x77,
    ToggleWhitelist = 0x81,
    AddWhitelistId = 0x82,
    RemoveWhitelistId = 0x83,
    ToggleGlobalChat = 0x84,
    ToggleHumans = 0x86,
    ToggleAi = 0x90,
    DisableAiClasses = 0x91,
    SetAiDensity = 0x92,
}

impl CommandCode {
    /// The octet sent on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a code by its wire value.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x10 => Some(Self::Announce),
            0x11 => Some(Self::DirectMessage),
            0x12 => Some(Self::GetServerDetails),
            0x13 => Some(Self::WipeCorpses),
            0x15 => Some(Self::UpdatePlayables),
            0x20 => Some(Self::BanPlayer),
            0x30 => Some(Self::KickPlayer),
            0x40 => Some(Self::GetPlayerList),
            0x50 => Some(Self::Save),
            0x77 => Some(Self::GetPlayerData),
            0x81 => Some(Self::ToggleWhitelist),
            0x82 => Some(Self::AddWhitelistId),
            0x83 => Some(Self::RemoveWhitelistId),
            0x84 => Some(Self::ToggleGlobalChat),
            0x86 => Some(Self::ToggleHumans),
            0x90 => Some(Self::ToggleAi),
            0x91 => Some(Self::DisableAiClasses),
            0x92 => Some(Self::SetAiDensity),
            _ => None,
        }
    }
}

/// Builds an authentication frame: `[0x01][password]`.
pub fn encode_auth(password: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + password.len());
    buf.push(AUTH);
    buf.extend_from_slice(password.as_bytes());
    buf
}

/// Builds a command frame: `[0x02][code][p0],[p1],...`.
pub fn encode_command<S: AsRef<str>>(code: u8, params: &[S]) -> Vec<u8> {
    let payload: usize = params.iter().map(|p| p.as_ref().len() + 1).sum();
    let mut buf = Vec::with_capacity(2 + payload);
    buf.push(EXEC_COMMAND);
    buf.push(code);
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            buf.push(PARAM_SEPARATOR);
        }
        buf.extend_from_slice(param.as_ref().as_bytes());
    }
    buf
}

/// A typed request.
///
/// [`Command::encode`] produces the exact bytes to write to the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in. Must be the first request on a connection.
    Auth { password: String },

    /// Show a message to everyone at the top of the screen.
    Announce { message: String },

    /// Show an announcement to a single player.
    DirectMessage { player_id: String, message: String },

    GetServerDetails,

    /// Remove all dead bodies from the map.
    WipeCorpses,

    /// Replace the list of classes players may pick.
    UpdatePlayables { classes: Vec<ClassName> },

    KickPlayer { player_id: String, reason: String },

    /// IDs and names of everyone connected, spawned or not.
    GetPlayerList,

    /// Persist the current world state.
    Save,

    /// Full records of every spawned player.
    GetPlayerData,

    ToggleWhitelist,
    AddWhitelistIds { player_ids: Vec<String> },
    RemoveWhitelistIds { player_ids: Vec<String> },
    ToggleGlobalChat,
    ToggleHumans,
    ToggleAi,

    /// Forbid the listed AI creatures from spawning.
    DisableAiClasses { classes: Vec<String> },

    /// Same setting as the AI density in `Game.ini`.
    SetAiDensity { density: f32 },

    /// Any sub-command, including ones this crate does not model.
    Raw { code: u8, params: Vec<String> },
}

impl Command {
    /// The sub-command code, or `None` for [`Command::Auth`].
    pub fn code(&self) -> Option<u8> {
        match self {
            Self::Auth { .. } => None,
            _ => Some(self.wire_code()),
        }
    }

    /// The byte that follows the message type. For [`Command::Auth`] this is
    /// the message type itself.
    fn wire_code(&self) -> u8 {
        let code = match self {
            Self::Auth { .. } => return AUTH,
            Self::Raw { code, .. } => return *code,
            Self::Announce { .. } => CommandCode::Announce,
            Self::DirectMessage { .. } => CommandCode::DirectMessage,
            Self::GetServerDetails => CommandCode::GetServerDetails,
            Self::WipeCorpses => CommandCode::WipeCorpses,
            Self::UpdatePlayables { .. } => CommandCode::UpdatePlayables,
            Self::KickPlayer { .. } => CommandCode::KickPlayer,
            Self::GetPlayerList => CommandCode::GetPlayerList,
            Self::Save => CommandCode::Save,
            Self::GetPlayerData => CommandCode::GetPlayerData,
            Self::ToggleWhitelist => CommandCode::ToggleWhitelist,
            Self::AddWhitelistIds { .. } => CommandCode::AddWhitelistId,
            Self::RemoveWhitelistIds { .. } => CommandCode::RemoveWhitelistId,
            Self::ToggleGlobalChat => CommandCode::ToggleGlobalChat,
            Self::ToggleHumans => CommandCode::ToggleHumans,
            Self::ToggleAi => CommandCode::ToggleAi,
            Self::DisableAiClasses { .. } => CommandCode::DisableAiClasses,
            Self::SetAiDensity { .. } => CommandCode::SetAiDensity,
        };
        code.code()
    }

    /// The comma-joined parameters, in wire order.
    pub fn params(&self) -> Vec<String> {
        match self {
            Self::Auth { .. }
            | Self::GetServerDetails
            | Self::WipeCorpses
            | Self::GetPlayerList
            | Self::Save
            | Self::GetPlayerData
            | Self::ToggleWhitelist
            | Self::ToggleGlobalChat
            | Self::ToggleHumans
            | Self::ToggleAi => Vec::new(),
            Self::Announce { message } => vec![message.clone()],
            Self::DirectMessage { player_id, message } => {
                vec![player_id.clone(), message.clone()]
            }
            Self::UpdatePlayables { classes } => {
                classes.iter().map(|c| c.as_str().to_string()).collect()
            }
            Self::KickPlayer { player_id, reason } => {
                vec![player_id.clone(), reason.clone()]
            }
            Self::AddWhitelistIds { player_ids }
            | Self::RemoveWhitelistIds { player_ids } => player_ids.clone(),
            Self::DisableAiClasses { classes } => classes.clone(),
            Self::SetAiDensity { density } => vec![format!("{density:.3}")],
            Self::Raw { params, .. } => params.clone(),
        }
    }

    /// Encodes the command into its wire frame.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Auth { password } => encode_auth(password),
            _ => encode_command(self.wire_code(), &self.params()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_kick() {
        let cmd = Command::KickPlayer {
            player_id: "7".into(),
            reason: "cheating".into(),
        };
        assert_eq!(
            cmd.encode(),
            [&[0x02u8, 0x30][..], &b"7,cheating"[..]].concat()
        );
    }

    #[test]
    fn test_encode_auth_has_no_separator() {
        let cmd = Command::Auth {
            password: "hunter2".into(),
        };
        assert_eq!(cmd.encode(), b"\x01hunter2");
        assert_eq!(cmd.code(), None);
    }

    #[test]
    fn test_every_typed_command_encodes_with_its_code() {
        let commands = [
            Command::Announce { message: "m".into() },
            Command::GetServerDetails,
            Command::ToggleAi,
            Command::SetAiDensity { density: 1.0 },
            Command::Raw { code: 0x7e, params: Vec::new() },
        ];
        for cmd in commands {
            let frame = cmd.encode();
            assert_eq!(frame[0], EXEC_COMMAND);
            assert_eq!(Some(frame[1]), cmd.code());
        }
    }

    #[test]
    fn test_encode_without_params() {
        assert_eq!(Command::GetPlayerList.encode(), vec![0x02, 0x40]);
        assert_eq!(Command::Save.encode(), vec![0x02, 0x50]);
    }

    #[test]
    fn test_comma_in_param_is_not_escaped() {
        let cmd = Command::KickPlayer {
            player_id: "7".into(),
            reason: "spam, again".into(),
        };
        assert_eq!(&cmd.encode()[2..], b"7,spam, again");
    }

    #[test]
    fn test_set_ai_density_three_decimals() {
        let cmd = Command::SetAiDensity { density: 0.5 };
        assert_eq!(&cmd.encode()[..], b"\x02\x920.500");
    }

    #[test]
    fn test_update_playables_joins_class_names() {
        let cmd = Command::UpdatePlayables {
            classes: vec![
                ClassName::from_static("Carnotaurus"),
                ClassName::from_static("Troodon"),
            ],
        };
        assert_eq!(&cmd.encode()[2..], b"Carnotaurus,Troodon");
        assert_eq!(cmd.code(), Some(0x15));
    }

    #[test]
    fn test_raw_passthrough() {
        let cmd = Command::Raw {
            code: 0x20,
            params: vec!["76561198000000000".into()],
        };
        assert_eq!(cmd.encode()[..2], [0x02, 0x20]);
    }

    #[test]
    fn test_encode_command_empty_params() {
        let empty: [&str; 0] = [];
        assert_eq!(encode_command(0x13, &empty), vec![0x02, 0x13]);
    }

    #[test]
    fn test_command_code_roundtrip_table() {
        for byte in 0..=u8::MAX {
            if let Some(code) = CommandCode::from_u8(byte) {
                assert_eq!(code.code(), byte);
            }
        }
        assert_eq!(CommandCode::from_u8(0x14), None);
    }
}
