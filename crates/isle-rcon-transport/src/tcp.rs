//! TCP transport implementation using `tokio::net`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, Transport, TransportConfig, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A TCP [`Transport`] that opens connections to an RCON server.
#[derive(Debug, Clone, Default)]
pub struct TcpTransport {
    config: TransportConfig,
}

impl TcpTransport {
    /// Creates a transport that applies `config` to every connection.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;
    type Error = TransportError;

    async fn connect(&self, addr: &str) -> Result<Self::Connection, Self::Error> {
        let limit = self.config.connect_timeout;
        let stream = tokio::time::timeout(limit, TcpStream::connect(addr))
            .await
            .map_err(|_| TransportError::Timeout {
                operation: "connect",
                after: limit,
            })?
            .map_err(|source| TransportError::ConnectFailed {
                addr: addr.to_string(),
                source,
            })?;

        let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        tracing::info!(%id, addr, "connected to RCON server");

        Ok(TcpConnection {
            id,
            stream: Mutex::new(stream),
            read_timeout: self.config.read_timeout,
            recv_buffer_size: self.config.recv_buffer_size,
        })
    }
}

/// A single TCP connection.
#[derive(Debug)]
pub struct TcpConnection {
    id: ConnectionId,
    stream: Mutex<TcpStream>,
    read_timeout: Duration,
    recv_buffer_size: usize,
}

impl Connection for TcpConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        self.stream
            .lock()
            .await
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        tracing::trace!(id = %self.id, bytes = data.len(), "sent");
        Ok(())
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        let mut buf = vec![0u8; self.recv_buffer_size];
        let mut stream = self.stream.lock().await;

        let read = tokio::time::timeout(self.read_timeout, stream.read(&mut buf))
            .await
            .map_err(|_| TransportError::Timeout {
                operation: "read",
                after: self.read_timeout,
            })?
            .map_err(TransportError::ReceiveFailed)?;

        if read == 0 {
            tracing::debug!(id = %self.id, "server closed the connection");
            return Ok(None);
        }
        tracing::trace!(id = %self.id, bytes = read, "received");
        buf.truncate(read);
        Ok(Some(buf))
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.stream
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)?;
        tracing::debug!(id = %self.id, "connection closed");
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
