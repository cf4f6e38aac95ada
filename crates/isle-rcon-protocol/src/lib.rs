//! Wire protocol for The Isle RCON.
//!
//! This crate defines what travels between an RCON client and the game
//! server, without knowing anything about sockets:
//!
//! - **Commands** ([`Command`], [`encode_auth`], [`encode_command`]): the
//!   request frames a client writes.
//! - **Decoders** ([`decode_player_list`], [`decode_player_data`],
//!   [`decode_server_details`]): turn the server's text replies into the
//!   records in [`types`].
//! - **Primitives** ([`parser`], [`timestamp()`]): the small parsers the
//!   decoders are built from.
//! - **Errors** ([`ProtocolError`], [`ParseError`]): what can go wrong
//!   when a reply does not match its grammar.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (Command / typed records) → Client
//! ```
//!
//! Requests are binary (a one-byte message type, a one-byte command code,
//! comma-joined parameters). Replies are text: an optional bracketed
//! timestamp, a type tag such as `PlayerList`, then content whose shape
//! depends on the tag. Every decoder is a pure function of one complete
//! reply.

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod command;
mod envelope;
mod error;
pub mod parser;
mod player_data;
mod roster;
mod server_details;
mod timestamp;
pub mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use command::{
    AUTH, Command, CommandCode, EXEC_COMMAND, PARAM_SEPARATOR, RESPONSE_VALUE, encode_auth,
    encode_command,
};
pub use envelope::{
    Envelope, PASSWORD_ACCEPTED, ResponseType, decode_envelope, is_password_accepted,
    toggle_state,
};
pub use error::{Expected, ParseError, ProtocolError};
pub use player_data::decode_player_data;
pub use roster::decode_player_list;
pub use server_details::{DetailKey, decode_server_details};
pub use timestamp::timestamp;
pub use types::{ClassName, Location, Player, RosterEntry, ServerDetails};
