//! TCP server for the lane feed
//!
//! Handles incoming connections and manages client lifecycle.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, trace, warn};

use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_MAX_PENDING: usize = 10;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_pending_commands: DEFAULT_MAX_PENDING,
        }
    }
}

impl ServerConfig {
    /// Read `BOWLING_FEED_HOST`, `BOWLING_FEED_PORT` and
    /// `BOWLING_FEED_MAX_PENDING`, falling back to defaults on missing or
    /// unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("BOWLING_FEED_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("BOWLING_FEED_PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_pending_commands = lookup("BOWLING_FEED_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_PENDING);

        Self {
            host,
            port,
            max_pending_commands,
        }
    }

    /// `BOWLING_FEED_DISABLED` set to `1` or `true`.
    pub fn is_disabled() -> bool {
        std::env::var("BOWLING_FEED_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Connection counters readable from the game loop without touching tokio.
#[derive(Debug, Default)]
pub struct FeedStatus {
    clients: AtomicU16,
    // 0 means no controller; client ids start at 1.
    controller: AtomicUsize,
}

impl FeedStatus {
    pub fn client_count(&self) -> u16 {
        self.clients.load(Ordering::Relaxed)
    }

    pub fn controller_id(&self) -> Option<usize> {
        match self.controller.load(Ordering::Relaxed) {
            0 => None,
            id => Some(id),
        }
    }

    fn set_clients(&self, n: usize) {
        self.clients
            .store(u16::try_from(n).unwrap_or(u16::MAX), Ordering::Relaxed);
    }

    fn set_controller(&self, id: Option<usize>) {
        self.controller.store(id.unwrap_or(0), Ordering::Relaxed);
    }
}

/// Handle to a connected client
struct ClientHandle {
    id: usize,
    handshaken: bool,
    stream_observations: bool,
    last_seq: Option<u64>,
    tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
enum ClientOutbound {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

struct ServerState {
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>,
    status: Arc<FeedStatus>,
}

impl ServerState {
    fn new(status: Arc<FeedStatus>) -> Self {
        Self {
            clients: RwLock::new(Vec::new()),
            controller: RwLock::new(None),
            status,
        }
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .is_some_and(|c| c.handshaken)
    }

    /// Record `seq` if it is strictly greater than the client's last one.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn send_to(&self, client_id: usize, msg: ClientOutbound) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(msg);
        }
    }

    async fn broadcast(&self, obs: ObservationMessage) {
        let clients = self.clients.read().await;
        for c in clients.iter().filter(|c| c.stream_observations) {
            let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
        }
    }
}

/// Start the TCP server with a private status block.
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    run_server_with_status(
        config,
        Arc::new(FeedStatus::default()),
        command_tx,
        out_rx,
        ready_tx,
    )
    .await
}

/// Start the TCP server, publishing connection counts into `status`.
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind port 0.
pub async fn run_server_with_status(
    config: ServerConfig,
    status: Arc<FeedStatus>,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "lane feed listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(status));

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        state.send_to(client_id, ClientOutbound::Ack(ack)).await;
                    }
                    OutboundMessage::ToClientError { client_id, err } => {
                        state.send_to(client_id, ClientOutbound::Error(err)).await;
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        state
                            .send_to(client_id, ClientOutbound::Observation(obs))
                            .await;
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        state.broadcast(obs).await;
                    }
                }
            }
        });
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, state, command_tx).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    {
        let mut clients = state.clients.write().await;
        clients.push(ClientHandle {
            id: client_id,
            handshaken: false,
            stream_observations: false,
            last_seq: None,
            tx: tx.clone(),
        });
        state.status.set_clients(clients.len());
    }

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(2048);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            let encoded = match &msg {
                ClientOutbound::Welcome(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Ack(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Error(m) => serde_json::to_writer(&mut buf, m),
                ClientOutbound::Observation(m) => serde_json::to_writer(&mut buf, m),
            };
            if encoded.is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() || writer.flush().await.is_err() {
                break;
            }
        }
    });

    let result = read_loop(&mut reader, client_id, &state, &command_tx, &tx).await;

    // Once the client list forgets us, `tx` is the last sender and the writer
    // drains what is queued before stopping.
    remove_client(&state, client_id).await;
    drop(tx);
    let _ = write_task.await;
    result
}

async fn read_loop(
    reader: &mut BufReader<OwnedReadHalf>,
    client_id: usize,
    state: &ServerState,
    command_tx: &mpsc::Sender<InboundCommand>,
    tx: &mpsc::UnboundedSender<ClientOutbound>,
) -> anyhow::Result<()> {
    let reply = |err: ErrorMessage| {
        let _ = tx.send(ClientOutbound::Error(err));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        trace!(client_id, line = trimmed, "recv");

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    reply(seq_error(hello.seq));
                    continue;
                }

                if !is_compatible_version(&hello.protocol_version) {
                    reply(create_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!(
                            "protocol version {} not supported (server speaks {})",
                            hello.protocol_version, PROTOCOL_VERSION
                        ),
                    ));
                    break;
                }

                let (role, controller_id) = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    if let Some(c) = clients.iter_mut().find(|c| c.id == client_id) {
                        c.handshaken = true;
                        c.last_seq = Some(hello.seq);
                        c.stream_observations = hello.requested.stream_observations;
                    }
                    if controller.is_none() {
                        *controller = Some(client_id);
                        state.status.set_controller(*controller);
                        info!(client_id, "client is now controller");
                    }
                    let role = if *controller == Some(client_id) {
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    };
                    (role, controller.map(|id| id as u64))
                };

                debug!(client_id, name = %hello.client.name, ?role, "handshake");
                let welcome = create_welcome(hello.seq, client_id as u64, role, controller_id);
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                if hello.requested.stream_observations {
                    let request = InboundCommand {
                        client_id,
                        seq: hello.seq,
                        payload: InboundPayload::SnapshotRequest,
                    };
                    if command_tx.try_send(request).is_err() {
                        warn!(
                            client_id,
                            seq = hello.seq,
                            "initial snapshot dropped, command queue full"
                        );
                    }
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !state.is_handshaken(client_id).await {
                    reply(create_error(
                        cmd.seq,
                        ErrorCode::HandshakeRequired,
                        "send hello before command",
                    ));
                    continue;
                }
                if !state.check_and_update_seq(client_id, cmd.seq).await {
                    reply(seq_error(cmd.seq));
                    continue;
                }
                if *state.controller.read().await != Some(client_id) {
                    reply(create_error(
                        cmd.seq,
                        ErrorCode::NotController,
                        "only the controller may send commands",
                    ));
                    continue;
                }
                if cmd.actions.as_slice().is_empty() {
                    reply(create_error(cmd.seq, ErrorCode::InvalidCommand, "no actions"));
                    continue;
                }

                let inbound = InboundCommand {
                    client_id,
                    seq: cmd.seq,
                    payload: InboundPayload::Command(ClientCommand::Actions(
                        cmd.actions.as_slice().to_vec(),
                    )),
                };
                // Ack or error comes from the game loop once applied.
                if command_tx.try_send(inbound).is_err() {
                    reply(create_error(
                        cmd.seq,
                        ErrorCode::Backpressure,
                        "command queue is full",
                    ));
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, unknown.seq).await
                {
                    reply(seq_error(unknown.seq));
                    continue;
                }
                reply(create_error(
                    unknown.seq,
                    ErrorCode::InvalidCommand,
                    "unknown message type",
                ));
            }

            Err(e) => {
                let seq = extract_seq(trimmed).unwrap_or(0);
                reply(create_error(
                    seq,
                    ErrorCode::InvalidCommand,
                    &format!("invalid message: {e}"),
                ));
            }
        }
    }

    Ok(())
}

fn seq_error(seq: u64) -> ErrorMessage {
    create_error(seq, ErrorCode::InvalidCommand, "seq must be strictly increasing")
}

/// Drop the client and hand control to the lowest remaining id if needed.
async fn remove_client(state: &ServerState, client_id: usize) {
    let mut controller = state.controller.write().await;
    let mut clients = state.clients.write().await;

    clients.retain(|c| c.id != client_id);
    state.status.set_clients(clients.len());

    if *controller == Some(client_id) {
        *controller = clients
            .iter()
            .filter(|c| c.handshaken)
            .map(|c| c.id)
            .min();
        state.status.set_controller(*controller);
        match *controller {
            Some(new_id) => info!(client_id = new_id, "controller promoted"),
            None => info!(client_id, "controller released"),
        }
    }
}
