//! Transport configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits applied to every TCP connection.
///
/// Missing fields fall back to [`TransportConfig::default`] when
/// deserialized, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// How long to wait for the TCP handshake.
    pub connect_timeout: Duration,

    /// How long a single read may wait for the server to answer.
    pub read_timeout: Duration,

    /// Size of the buffer for one read. Replies longer than this are cut
    /// off, since the protocol has no length prefix to read the rest by.
    pub recv_buffer_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(5),
            recv_buffer_size: 10 * 1024,
        }
    }
}
