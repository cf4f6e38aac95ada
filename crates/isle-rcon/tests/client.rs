//! Integration tests for the client.
//!
//! Most tests drive the client through an in-memory connection whose
//! replies are computed from the frame just sent. The last section runs a
//! fake game server on a real TCP socket.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use isle_rcon::prelude::*;
use isle_rcon::transport::{Connection, ConnectionId};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// =========================================================================
// Scripted connection
// =========================================================================

type Responder = dyn Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync;

static NEXT_ID: AtomicU64 = AtomicU64::new(1000);

/// Answers every frame with `respond(frame)`. `None` means the server
/// hangs up instead of replying.
struct ScriptedConnection {
    id: ConnectionId,
    respond: Box<Responder>,
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    pending: Mutex<VecDeque<Option<Vec<u8>>>>,
}

impl ScriptedConnection {
    fn new(
        respond: impl Fn(&[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    ) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let conn = Self {
            id: ConnectionId::new(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
            respond: Box::new(respond),
            sent: Arc::clone(&sent),
            pending: Mutex::new(VecDeque::new()),
        };
        (conn, sent)
    }

    /// Always answers `reply`.
    fn replying(reply: &'static str) -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
        Self::new(move |_| Some(reply.as_bytes().to_vec()))
    }
}

impl Connection for ScriptedConnection {
    type Error = TransportError;

    async fn send(&self, data: &[u8]) -> Result<(), Self::Error> {
        self.sent.lock().unwrap().push(data.to_vec());
        let reply = (self.respond)(data);
        // Yield so concurrent callers get a chance to interleave.
        tokio::task::yield_now().await;
        self.pending.lock().unwrap().push_back(reply);
        Ok(())
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error> {
        tokio::task::yield_now().await;
        Ok(self.pending.lock().unwrap().pop_front().flatten())
    }

    async fn close(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}

const PLAYER_DATA: &str = "PlayerData\n\
    Name: Alice, PlayerID: 42, Location: X=1.0 Y=2.0 Z=3.0, Class: BP_Carnotaurus_C, \
    Growth: 0.5, Health: 1.0, Stamina: 0.9, Hunger: 0.1, Thirst: 0.2\n";

// =========================================================================
// Authentication
// =========================================================================

#[tokio::test]
async fn test_auth_accepted() {
    let (conn, sent) = ScriptedConnection::replying("Password Accepted\0");
    let client = Client::from_connection(conn);

    client.auth("hunter2").await.expect("auth should succeed");
    assert_eq!(sent.lock().unwrap()[0], b"\x01hunter2");
}

#[tokio::test]
async fn test_auth_rejected() {
    let (conn, _) = ScriptedConnection::replying("Password Incorrect");
    let client = Client::from_connection(conn);

    let err = client.auth("wrong").await.unwrap_err();
    assert!(matches!(err, RconError::IncorrectPassword));
}

#[tokio::test]
async fn test_auth_through_typed_command() {
    let (conn, _) = ScriptedConnection::replying("Password Accepted");
    let client = Client::from_connection(conn);

    let reply = client
        .execute(&Command::Auth {
            password: "pw".into(),
        })
        .await
        .expect("auth should succeed");
    assert_eq!(reply, "Password Accepted");
}

// =========================================================================
// Queries
// =========================================================================

#[tokio::test]
async fn test_get_player_list() {
    let (conn, sent) = ScriptedConnection::replying("PlayerList\n1,Alice,,2,Bob,,");
    let client = Client::from_connection(conn);

    let roster = client.get_player_list().await.expect("roster");
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[1].name, "Bob");
    assert_eq!(sent.lock().unwrap()[0], vec![0x02, 0x40]);
}

#[tokio::test]
async fn test_get_player_data() {
    let (conn, sent) = ScriptedConnection::replying(PLAYER_DATA);
    let client = Client::from_connection(conn);

    let players = client.get_player_data().await.expect("player data");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].class, classes::CARNOTAURUS);
    assert_eq!(players[0].health, 100);
    assert_eq!(sent.lock().unwrap()[0], vec![0x02, 0x77]);
}

#[tokio::test]
async fn test_get_server_details() {
    let (conn, _) = ScriptedConnection::replying(
        "[2025.01.02-03.04.05] ServerDetails ServerName: Island1, ServerMaxPlayers: 64, bSpawnAI: true",
    );
    let client = Client::from_connection(conn);

    let details = client.get_server_details().await.expect("details");
    assert_eq!(details.name, "Island1");
    assert_eq!(details.max_players, 64);
    assert!(details.spawn_ai);
    assert!(!details.whitelist);
}

#[tokio::test]
async fn test_unknown_server_detail_is_protocol_drift() {
    let (conn, _) = ScriptedConnection::replying("ServerDetails bBrandNewSetting: true");
    let client = Client::from_connection(conn);

    let err = client.get_server_details().await.unwrap_err();
    assert!(err.is_protocol_drift());
    assert!(matches!(
        err,
        RconError::Protocol(ProtocolError::UnknownKey(ref key)) if key == "bBrandNewSetting"
    ));
}

#[tokio::test]
async fn test_wrong_reply_type_is_malformed_envelope() {
    let (conn, _) = ScriptedConnection::replying(PLAYER_DATA);
    let client = Client::from_connection(conn);

    let err = client.get_player_list().await.unwrap_err();
    assert!(matches!(
        err,
        RconError::Protocol(ProtocolError::MalformedEnvelope { .. })
    ));
}

// =========================================================================
// Commands
// =========================================================================

#[tokio::test]
async fn test_command_frames() {
    let (conn, sent) = ScriptedConnection::replying("ok");
    let client = Client::from_connection(conn);

    client.announce("hello").await.unwrap();
    client.send_direct_message("42", "hi").await.unwrap();
    client.kick_player("7", "cheating").await.unwrap();
    client.wipe_corpses().await.unwrap();
    client.save().await.unwrap();
    client
        .update_playables(&[classes::STEGOSAURUS, ClassName::from("Spinosaurus")])
        .await
        .unwrap();
    client
        .disable_ai_classes(&[AiClass::Boar, AiClass::Deer])
        .await
        .unwrap();
    client.set_ai_density(0.25).await.unwrap();

    let sent = sent.lock().unwrap();
    let frames: Vec<&[u8]> = sent.iter().map(Vec::as_slice).collect();
    assert_eq!(
        frames,
        vec![
            &b"\x02\x10hello"[..],
            b"\x02\x1142,hi",
            b"\x02\x307,cheating",
            b"\x02\x13",
            b"\x02\x50",
            b"\x02\x15Stegosaurus,Spinosaurus",
            b"\x02\x91Boar,Deer",
            b"\x02\x920.250",
        ]
    );
}

#[tokio::test]
async fn test_methods_and_typed_commands_send_the_same_frame() {
    let (conn, sent) = ScriptedConnection::replying("ok");
    let client = Client::from_connection(conn);

    client.set_ai_density(0.5).await.unwrap();
    client
        .execute(&Command::SetAiDensity { density: 0.5 })
        .await
        .unwrap();
    client.kick_player("7", "afk").await.unwrap();
    client
        .execute(&Command::KickPlayer {
            player_id: "7".into(),
            reason: "afk".into(),
        })
        .await
        .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent[0], b"\x02\x920.500");
    assert_eq!(sent[0], sent[1]);
    assert_eq!(sent[2], sent[3]);
}

#[tokio::test]
async fn test_whitelist_ids_empty_is_noop() {
    let (conn, sent) = ScriptedConnection::replying("ok");
    let client = Client::from_connection(conn);

    client.add_whitelist_ids(&[]).await.unwrap();
    client.remove_whitelist_ids(&[]).await.unwrap();
    assert!(sent.lock().unwrap().is_empty());

    client.add_whitelist_ids(&["1", "2"]).await.unwrap();
    client.remove_whitelist_ids(&["3"]).await.unwrap();
    assert_eq!(
        *sent.lock().unwrap(),
        vec![b"\x02\x821,2".to_vec(), b"\x02\x833".to_vec()]
    );
}

#[tokio::test]
async fn test_toggles_report_new_state() {
    let (conn, _) = ScriptedConnection::new(|frame| {
        let reply: &[u8] = match frame[1] {
            0x81 => b"Whitelist is now On",
            0x84 => b"Global chat is now Off",
            0x86 => b"Humans On\r\n",
            _ => b"",
        };
        Some(reply.to_vec())
    });
    let client = Client::from_connection(conn);

    assert!(client.toggle_whitelist().await.unwrap());
    assert!(!client.toggle_global_chat().await.unwrap());
    assert!(client.toggle_humans().await.unwrap());
    assert!(!client.toggle_ai().await.unwrap());
}

#[tokio::test]
async fn test_exec_command_passes_unknown_codes_through() {
    let (conn, sent) = ScriptedConnection::replying("banned");
    let client = Client::from_connection(conn);

    let reply = client
        .exec_command(CommandCode::BanPlayer.code(), &["76561198000000000"])
        .await
        .unwrap();
    assert_eq!(reply, "banned");
    assert_eq!(sent.lock().unwrap()[0], b"\x02\x2076561198000000000");
}

#[tokio::test]
async fn test_closed_before_reply_is_transport_error() {
    let (conn, _) = ScriptedConnection::new(|_| None);
    let client = Client::from_connection(conn);

    let err = client.save().await.unwrap_err();
    assert!(matches!(
        err,
        RconError::Transport(TransportError::ConnectionClosed(_))
    ));
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_replies() {
    // Echo the parameter back so each caller can check it got its answer.
    let (conn, _) = ScriptedConnection::new(|frame| Some(frame[2..].to_vec()));
    let client = Arc::new(Client::from_connection(conn));

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = Arc::clone(&client);
        tasks.push(tokio::spawn(async move {
            let param = i.to_string();
            let reply = client.exec_command(0x10, &[param.as_str()]).await.unwrap();
            assert_eq!(reply, param);
        }));
    }
    for task in tasks {
        task.await.expect("task should not panic");
    }
}

// =========================================================================
// Real TCP
// =========================================================================

/// A fake game server: checks the password, then answers a fixed script.
async fn fake_server(listener: TcpListener, replies: Vec<&'static [u8]>) -> Vec<Vec<u8>> {
    let (mut socket, _) = listener.accept().await.expect("should accept");
    let mut received = Vec::new();
    let mut buf = [0u8; 1024];

    for reply in replies {
        let n = socket.read(&mut buf).await.expect("server read");
        received.push(buf[..n].to_vec());
        socket.write_all(reply).await.expect("server write");
    }
    received
}

#[tokio::test]
async fn test_full_session_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(fake_server(
        listener,
        vec![
            &b"Password Accepted"[..],
            b"PlayerList\n76561198000000001,Alice,,",
            b"Announced",
        ],
    ));

    let client = Client::connect(&addr).await.expect("should connect");
    client.auth("secret").await.expect("auth");
    let roster = client.get_player_list().await.expect("roster");
    assert_eq!(roster[0].id, "76561198000000001");
    client.announce("restart in 5").await.expect("announce");
    client.close().await.expect("close");

    let received = server.await.expect("server task");
    assert_eq!(received[0], b"\x01secret");
    assert_eq!(received[1], vec![0x02, 0x40]);
    assert_eq!(received[2], b"\x02\x10restart in 5");
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
    let addr = listener.local_addr().unwrap().to_string();

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("should accept");
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(socket);
    });

    let config = TransportConfig {
        read_timeout: Duration::from_millis(50),
        ..TransportConfig::default()
    };
    let client = Client::connect_with(&addr, config).await.expect("connect");

    let err = client.auth("secret").await.unwrap_err();
    assert!(matches!(
        err,
        RconError::Transport(TransportError::Timeout { .. })
    ));
    server.await.expect("server task");
}
