//! # isle-rcon
//!
//! Async RCON client for The Isle game servers.
//!
//! The [`Client`] connects over TCP, authenticates, and exposes one method
//! per server command. Replies that carry data are decoded into the typed
//! records re-exported from [`isle_rcon_protocol`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use isle_rcon::prelude::*;
//!
//! # async fn run() -> Result<(), RconError> {
//! let client = Client::connect("127.0.0.1:8888").await?;
//! client.auth("secret").await?;
//!
//! for player in client.get_player_list().await? {
//!     println!("{} {}", player.id, player.name);
//! }
//! client.update_playables(&[classes::CARNOTAURUS, classes::TROODON]).await?;
//! client.close().await
//! # }
//! ```

pub mod classes;
mod client;
mod error;

pub use client::Client;
pub use error::RconError;

pub use isle_rcon_protocol as protocol;
pub use isle_rcon_transport as transport;

/// Everything needed to drive a server, in one import.
pub mod prelude {
    pub use crate::classes::{self, AiClass};
    pub use crate::{Client, RconError};
    pub use isle_rcon_protocol::{
        ClassName, Command, CommandCode, Location, Player, ProtocolError, RosterEntry,
        ServerDetails,
    };
    pub use isle_rcon_transport::{TransportConfig, TransportError};
}
