use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use tui_bowling::adapter::{
    create_command, create_hello, run_server, ClientCommand, FeedSession, InboundCommand,
    InboundPayload, OutboundMessage, ServerConfig,
};
use tui_bowling::core::GameLedger;
use tui_bowling::types::ScoreAction;

const T: &str = "2024-05-04T19:00:00Z";

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send_raw(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();
    }

    async fn send<M: serde::Serialize>(&mut self, msg: &M) {
        self.send_raw(&serde_json::to_string(msg).unwrap()).await;
    }

    async fn recv(&mut self) -> Value {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("timeout waiting for line")
            .expect("io error")
            .expect("expected line");
        serde_json::from_str(&line).unwrap()
    }

    /// Hello and return the welcome.
    async fn hello(&mut self, seq: u64, stream: bool) -> Value {
        self.send(&create_hello(seq, "lane-test", stream)).await;
        let welcome = self.recv().await;
        assert_eq!(welcome["type"], "welcome");
        welcome
    }
}

fn config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_pending_commands: 8,
    }
}

/// Server with no game loop attached; the test reads `cmd_rx` directly.
async fn start_bare(
    queue: usize,
) -> (
    SocketAddr,
    mpsc::Receiver<InboundCommand>,
    mpsc::UnboundedSender<OutboundMessage>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(queue);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config(), cmd_tx, out_rx, Some(ready_tx)).await;
    });

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .unwrap()
        .unwrap();
    (addr, cmd_rx, out_tx)
}

/// Server plus a game loop that owns a ledger with one game started.
async fn start_with_game_loop() -> SocketAddr {
    let (addr, mut cmd_rx, out_tx) = start_bare(8).await;

    tokio::spawn(async move {
        let mut ledger = GameLedger::new();
        ledger.start_new_game(T).unwrap();
        let mut session = FeedSession::new();
        while let Some(inbound) = cmd_rx.recv().await {
            for msg in session.handle(&mut ledger, inbound, T) {
                let _ = out_tx.send(msg);
            }
        }
    });

    addr
}

async fn recv_inbound(rx: &mut mpsc::Receiver<InboundCommand>) -> InboundCommand {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timeout waiting for inbound command")
        .expect("channel closed")
}

#[tokio::test]
async fn first_client_becomes_controller() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;

    let mut first = Client::connect(addr).await;
    let welcome = first.hello(1, false).await;
    assert_eq!(welcome["seq"], 1);
    assert_eq!(welcome["protocol_version"], "1.0.0");
    assert_eq!(welcome["role"], "controller");
    assert_eq!(welcome["controller_id"], welcome["client_id"]);

    let mut second = Client::connect(addr).await;
    let welcome = second.hello(1, false).await;
    assert_eq!(welcome["role"], "observer");
}

#[tokio::test]
async fn commands_reach_the_game_loop() {
    let (addr, mut cmd_rx, _out_tx) = start_bare(8).await;
    let mut client = Client::connect(addr).await;

    client.hello(1, true).await;
    let snapshot = recv_inbound(&mut cmd_rx).await;
    assert!(matches!(snapshot.payload, InboundPayload::SnapshotRequest));

    client.send_raw(r#"{"type":"command","seq":2,"ts":0,"actions":["x",7,"/"]}"#).await;
    let inbound = recv_inbound(&mut cmd_rx).await;
    assert_eq!(inbound.seq, 2);
    match inbound.payload {
        InboundPayload::Command(ClientCommand::Actions(actions)) => assert_eq!(
            actions,
            vec![ScoreAction::Strike, ScoreAction::Pins(7), ScoreAction::Spare]
        ),
        other => panic!("expected actions, got {other:?}"),
    }
}

#[tokio::test]
async fn closed_loop_scores_and_streams() {
    let addr = start_with_game_loop().await;
    let mut client = Client::connect(addr).await;

    client.hello(1, true).await;
    let first = client.recv().await;
    assert_eq!(first["type"], "observation");
    assert_eq!(first["total"], 0);
    assert_eq!(first["pins_standing"], 10);

    client
        .send(&create_command(
            2,
            &[ScoreAction::Strike, ScoreAction::Pins(7), ScoreAction::Spare],
        ))
        .await;

    let ack = client.recv().await;
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["seq"], 2);

    let obs = client.recv().await;
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["frames"][0]["marks"], "X");
    assert_eq!(obs["frames"][0]["score"], 20);
    assert_eq!(obs["frames"][1]["marks"], "7/");
    assert_eq!(obs["frames"][1]["score"], Value::Null);
    assert_eq!(obs["cursor"]["frame"], 2);
    assert_eq!(obs["total"], 20);
}

#[tokio::test]
async fn rejected_roll_keeps_earlier_actions() {
    let addr = start_with_game_loop().await;
    let mut client = Client::connect(addr).await;
    client.hello(1, true).await;
    client.recv().await;

    client
        .send(&create_command(2, &[ScoreAction::Pins(8), ScoreAction::Pins(5)]))
        .await;

    let err = client.recv().await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "rejected_roll");
    assert_eq!(err["seq"], 2);

    let obs = client.recv().await;
    assert_eq!(obs["frames"][0]["marks"], "8");
    assert_eq!(obs["pins_standing"], 2);
}

#[tokio::test]
async fn command_before_hello_requires_handshake() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;
    let mut client = Client::connect(addr).await;

    client.send(&create_command(1, &[ScoreAction::Pins(3)])).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "handshake_required");
    assert_eq!(err["seq"], 1);
}

#[tokio::test]
async fn observer_commands_are_refused() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;
    let mut controller = Client::connect(addr).await;
    controller.hello(1, false).await;

    let mut observer = Client::connect(addr).await;
    observer.hello(1, false).await;
    observer.send(&create_command(2, &[ScoreAction::Pins(3)])).await;
    let err = observer.recv().await;
    assert_eq!(err["code"], "not_controller");
}

#[tokio::test]
async fn repeated_seq_is_rejected() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;
    let mut client = Client::connect(addr).await;
    client.hello(5, false).await;

    client.send(&create_command(5, &[ScoreAction::Pins(3)])).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 5);
}

#[tokio::test]
async fn garbage_lines_get_invalid_command() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;
    let mut client = Client::connect(addr).await;
    client.hello(1, false).await;

    client.send_raw(r#"{"type":"command","seq":9,"actions":["bogus"]}"#).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 9);

    client.send_raw(r#"{"type":"teleport","seq":10}"#).await;
    let err = client.recv().await;
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 10);
}

#[tokio::test]
async fn major_version_mismatch_closes_connection() {
    let (addr, _cmd_rx, _out_tx) = start_bare(8).await;
    let mut client = Client::connect(addr).await;

    let mut hello = create_hello(1, "future", false);
    hello.protocol_version = "2.0.0".to_string();
    client.send(&hello).await;

    let err = client.recv().await;
    assert_eq!(err["code"], "protocol_mismatch");

    let next = tokio::time::timeout(Duration::from_secs(2), client.lines.next_line())
        .await
        .expect("timeout waiting for close");
    assert!(matches!(next, Ok(None) | Err(_)));
}

#[tokio::test]
async fn full_queue_answers_backpressure() {
    // Nothing drains the queue, so the second command overflows it.
    let (addr, _cmd_rx, _out_tx) = start_bare(1).await;
    let mut client = Client::connect(addr).await;
    client.hello(1, false).await;

    client.send(&create_command(2, &[ScoreAction::Pins(1)])).await;
    client.send(&create_command(3, &[ScoreAction::Pins(1)])).await;

    let err = client.recv().await;
    assert_eq!(err["code"], "backpressure");
    assert_eq!(err["seq"], 3);
}

#[tokio::test]
async fn controller_disconnect_promotes_next_client() {
    let (addr, mut cmd_rx, _out_tx) = start_bare(8).await;

    let mut first = Client::connect(addr).await;
    first.hello(1, false).await;
    let mut second = Client::connect(addr).await;
    let welcome = second.hello(1, false).await;
    assert_eq!(welcome["role"], "observer");
    let second_id = welcome["client_id"].as_u64().unwrap() as usize;

    drop(first);
    tokio::time::sleep(Duration::from_millis(50)).await;

    second.send(&create_command(2, &[ScoreAction::Pins(4)])).await;
    let inbound = recv_inbound(&mut cmd_rx).await;
    assert_eq!(inbound.client_id, second_id);
    assert_eq!(inbound.seq, 2);
}

#[tokio::test]
async fn streaming_hello_on_full_queue_still_welcomes() {
    let (addr, mut cmd_rx, _out_tx) = start_bare(1).await;
    let mut controller = Client::connect(addr).await;
    controller.hello(1, false).await;
    controller.send(&create_command(2, &[ScoreAction::Pins(1)])).await;

    // Give the command time to land in the queue.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut observer = Client::connect(addr).await;
    let welcome = observer.hello(1, true).await;
    assert_eq!(welcome["role"], "observer");

    // Only the queued command made it; the snapshot request was dropped.
    let inbound = recv_inbound(&mut cmd_rx).await;
    assert_eq!(inbound.seq, 2);
    assert!(matches!(inbound.payload, InboundPayload::Command(_)));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(cmd_rx.try_recv().is_err());
}
