//! Unified error type for the RCON client.

use isle_rcon_protocol::ProtocolError;
use isle_rcon_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RconError {
    /// A transport-level error (connect, send, recv, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server replied with something the decoders do not understand.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server rejected the password.
    #[error("incorrect password")]
    IncorrectPassword,
}

impl RconError {
    /// Returns `true` if the server answered but the reply did not match
    /// the expected grammar.
    ///
    /// This usually means the game server was updated and speaks a format
    /// this crate does not know yet. Retrying will not help.
    pub fn is_protocol_drift(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}
