//! The RCON client.
//!
//! A [`Client`] owns one connection and runs one request at a time: every
//! method writes a single frame and waits for a single reply while holding
//! the connection lock, so replies can never be paired with the wrong
//! request even when the client is shared between tasks.

use isle_rcon_protocol::{
    ClassName, Command, PASSWORD_ACCEPTED, Player, ProtocolError, RosterEntry, ServerDetails,
    decode_player_data, decode_player_list, decode_server_details, encode_auth,
    is_password_accepted, toggle_state,
};
use isle_rcon_transport::{
    Connection, ConnectionId, TcpConnection, TcpTransport, Transport, TransportConfig,
    TransportError,
};
use tokio::sync::Mutex;

use crate::RconError;
use crate::classes::AiClass;

/// Characters of an undecodable reply included in the warning log.
const LOG_PREVIEW_CHARS: usize = 64;

/// An authenticated (or about to be) RCON session with one game server.
///
/// The type parameter is the connection the client talks through. Real
/// code uses the default [`TcpConnection`]; tests can plug in anything that
/// implements [`Connection`].
pub struct Client<C: Connection = TcpConnection> {
    id: ConnectionId,
    conn: Mutex<C>,
}

impl Client<TcpConnection> {
    /// Connects to `addr` (`host:port`) with the default transport limits.
    ///
    /// The connection is not authenticated yet; call [`Client::auth`]
    /// before anything else.
    pub async fn connect(addr: &str) -> Result<Self, RconError> {
        Self::connect_with(addr, TransportConfig::default()).await
    }

    /// Connects to `addr` with custom timeouts and buffer size.
    pub async fn connect_with(addr: &str, config: TransportConfig) -> Result<Self, RconError> {
        let conn = TcpTransport::new(config).connect(addr).await?;
        Ok(Self::from_connection(conn))
    }
}

impl<C> Client<C>
where
    C: Connection<Error = TransportError>,
{
    /// Wraps an already open connection.
    pub fn from_connection(conn: C) -> Self {
        Self {
            id: conn.id(),
            conn: Mutex::new(conn),
        }
    }

    /// Returns the identifier of the underlying connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Closes the connection. Requests after this fail with a transport
    /// error.
    pub async fn close(&self) -> Result<(), RconError> {
        self.conn.lock().await.close().await?;
        Ok(())
    }

    /// Logs in with `password`.
    ///
    /// # Errors
    /// [`RconError::IncorrectPassword`] if the server answers anything but
    /// `Password Accepted`.
    pub async fn auth(&self, password: &str) -> Result<(), RconError> {
        tracing::debug!(id = %self.id, "authenticating");
        let reply = self.round_trip(&encode_auth(password)).await?;
        if is_password_accepted(&reply) {
            tracing::info!(id = %self.id, "authenticated");
            Ok(())
        } else {
            tracing::warn!(id = %self.id, "server rejected the password");
            Err(RconError::IncorrectPassword)
        }
    }

    /// Sends any sub-command and returns the raw reply.
    ///
    /// Every command has its own method below; this is for codes the client
    /// does not cover, such as undocumented ones.
    pub async fn exec_command<S: AsRef<str>>(
        &self,
        code: u8,
        params: &[S],
    ) -> Result<String, RconError> {
        let params = params.iter().map(|p| p.as_ref().to_string()).collect();
        self.execute(&Command::Raw { code, params }).await
    }

    /// Sends a typed [`Command`] and returns the raw reply.
    ///
    /// [`Command::Auth`] runs the login exchange and answers
    /// `Password Accepted` on success.
    pub async fn execute(&self, command: &Command) -> Result<String, RconError> {
        let Some(code) = command.code() else {
            if let Command::Auth { password } = command {
                self.auth(password).await?;
            }
            return Ok(PASSWORD_ACCEPTED.to_string());
        };
        tracing::debug!(
            id = %self.id,
            code = format_args!("{code:#04x}"),
            params = command.params().len(),
            "executing command"
        );
        self.round_trip(&command.encode()).await
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    /// Everyone connected, including players still choosing a class.
    /// Only ids and names are available this way.
    pub async fn get_player_list(&self) -> Result<Vec<RosterEntry>, RconError> {
        let reply = self.execute(&Command::GetPlayerList).await?;
        self.decode(&reply, decode_player_list)
    }

    /// Full records of every spawned player. Players on the class
    /// selection screen are not included.
    pub async fn get_player_data(&self) -> Result<Vec<Player>, RconError> {
        let reply = self.execute(&Command::GetPlayerData).await?;
        self.decode(&reply, decode_player_data)
    }

    pub async fn get_server_details(&self) -> Result<ServerDetails, RconError> {
        let reply = self.execute(&Command::GetServerDetails).await?;
        self.decode(&reply, decode_server_details)
    }

    // -----------------------------------------------------------------
    // Messaging and moderation
    // -----------------------------------------------------------------

    /// Shows `message` to everyone in a large box at the top of the screen.
    pub async fn announce(&self, message: &str) -> Result<(), RconError> {
        self.run(Command::Announce {
            message: message.to_string(),
        })
        .await
    }

    /// Shows `message` to one player, styled like an announcement.
    pub async fn send_direct_message(
        &self,
        player_id: &str,
        message: &str,
    ) -> Result<(), RconError> {
        self.run(Command::DirectMessage {
            player_id: player_id.to_string(),
            message: message.to_string(),
        })
        .await
    }

    /// Kicks a player. A comma in `reason` is sent as is and splits the
    /// reason on the server side.
    pub async fn kick_player(&self, player_id: &str, reason: &str) -> Result<(), RconError> {
        self.run(Command::KickPlayer {
            player_id: player_id.to_string(),
            reason: reason.to_string(),
        })
        .await
    }

    // -----------------------------------------------------------------
    // World
    // -----------------------------------------------------------------

    /// Removes all dead bodies from the map.
    pub async fn wipe_corpses(&self) -> Result<(), RconError> {
        self.run(Command::WipeCorpses).await
    }

    /// Saves the current state of the map.
    pub async fn save(&self) -> Result<(), RconError> {
        self.run(Command::Save).await
    }

    /// Replaces the set of classes players may choose.
    pub async fn update_playables(&self, classes: &[ClassName]) -> Result<(), RconError> {
        self.run(Command::UpdatePlayables {
            classes: classes.to_vec(),
        })
        .await
    }

    // -----------------------------------------------------------------
    // Toggles. Each returns the state after the toggle.
    // -----------------------------------------------------------------

    pub async fn toggle_whitelist(&self) -> Result<bool, RconError> {
        self.toggle(Command::ToggleWhitelist).await
    }

    /// Turns global chat on or off. Use [`Client::get_server_details`] to
    /// read the current state without changing it.
    pub async fn toggle_global_chat(&self) -> Result<bool, RconError> {
        self.toggle(Command::ToggleGlobalChat).await
    }

    pub async fn toggle_humans(&self) -> Result<bool, RconError> {
        self.toggle(Command::ToggleHumans).await
    }

    /// Turns AI spawning on or off.
    pub async fn toggle_ai(&self) -> Result<bool, RconError> {
        self.toggle(Command::ToggleAi).await
    }

    // -----------------------------------------------------------------
    // Whitelist and AI settings
    // -----------------------------------------------------------------

    /// Adds ids to the whitelist. Does nothing for an empty slice.
    pub async fn add_whitelist_ids(&self, player_ids: &[&str]) -> Result<(), RconError> {
        if player_ids.is_empty() {
            return Ok(());
        }
        self.run(Command::AddWhitelistIds {
            player_ids: owned(player_ids),
        })
        .await
    }

    /// Removes ids from the whitelist. Does nothing for an empty slice.
    pub async fn remove_whitelist_ids(&self, player_ids: &[&str]) -> Result<(), RconError> {
        if player_ids.is_empty() {
            return Ok(());
        }
        self.run(Command::RemoveWhitelistIds {
            player_ids: owned(player_ids),
        })
        .await
    }

    /// Replaces the set of AI creatures that may not spawn.
    pub async fn disable_ai_classes(&self, classes: &[AiClass]) -> Result<(), RconError> {
        let names: Vec<&str> = classes.iter().map(AiClass::as_str).collect();
        self.run(Command::DisableAiClasses {
            classes: owned(&names),
        })
        .await
    }

    /// Sets the AI density, the same value as in `Game.ini`.
    pub async fn set_ai_density(&self, density: f32) -> Result<(), RconError> {
        self.run(Command::SetAiDensity { density }).await
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Sends a command whose reply carries nothing.
    async fn run(&self, command: Command) -> Result<(), RconError> {
        self.execute(&command).await?;
        Ok(())
    }

    async fn toggle(&self, command: Command) -> Result<bool, RconError> {
        let reply = self.execute(&command).await?;
        Ok(toggle_state(&reply))
    }

    /// Writes one frame and reads one reply under the connection lock.
    async fn round_trip(&self, frame: &[u8]) -> Result<String, RconError> {
        let conn = self.conn.lock().await;
        conn.send(frame).await?;
        let reply = conn.recv().await?.ok_or_else(|| {
            TransportError::ConnectionClosed("server closed the connection before replying".into())
        })?;
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    fn decode<T>(
        &self,
        reply: &str,
        decoder: impl FnOnce(&str) -> Result<T, ProtocolError>,
    ) -> Result<T, RconError> {
        decoder(reply).map_err(|error| {
            let preview: String = reply.chars().take(LOG_PREVIEW_CHARS).collect();
            tracing::warn!(id = %self.id, %error, response = %preview, "failed to decode reply");
            RconError::Protocol(error)
        })
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
