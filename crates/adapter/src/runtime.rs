//! Adapter runtime integration.
//!
//! Bridges the sync scorekeeping loop with the async TCP server.

use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::core::{ActionOutcome, GameLedger, LedgerError};
use crate::protocol::{
    build_observation, create_ack, create_error, AckMessage, ErrorCode, ErrorMessage,
    ObservationMessage,
};
use crate::server::{run_server_with_status, FeedStatus, ServerConfig};
use crate::types::ScoreAction;

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub payload: InboundPayload,
}

#[derive(Debug, Clone)]
pub enum InboundPayload {
    Command(ClientCommand),
    /// A client asked for the current scorecard (sent after a streaming hello).
    SnapshotRequest,
}

/// Command payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    Actions(Vec<ScoreAction>),
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClientAck { client_id: usize, ack: AckMessage },
    ToClientError { client_id: usize, err: ErrorMessage },
    ToClientObservation { client_id: usize, obs: ObservationMessage },
    BroadcastObservation { obs: ObservationMessage },
}

/// Game-loop side of the feed: applies commands to a ledger and numbers the
/// observations it emits.
#[derive(Debug, Default)]
pub struct FeedSession {
    obs_seq: u64,
}

impl FeedSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&mut self) -> u64 {
        self.obs_seq += 1;
        self.obs_seq
    }

    /// Observation of the ledger's active card for every streaming client.
    pub fn broadcast(&mut self, ledger: &GameLedger) -> OutboundMessage {
        OutboundMessage::BroadcastObservation {
            obs: build_observation(&ledger.snapshot(), self.next_seq()),
        }
    }

    /// Apply one inbound command and produce the replies, in send order.
    ///
    /// Actions run in order and stop at the first failure; actions before it
    /// stay applied. Any change to the ledger is followed by a broadcast.
    pub fn handle(
        &mut self,
        ledger: &mut GameLedger,
        inbound: InboundCommand,
        started_at: &str,
    ) -> Vec<OutboundMessage> {
        let client_id = inbound.client_id;
        let seq = inbound.seq;
        let mut out = Vec::with_capacity(2);

        let actions = match inbound.payload {
            InboundPayload::SnapshotRequest => {
                out.push(OutboundMessage::ToClientObservation {
                    client_id,
                    obs: build_observation(&ledger.snapshot(), self.next_seq()),
                });
                return out;
            }
            InboundPayload::Command(ClientCommand::Actions(actions)) => actions,
        };

        let mut changed = false;
        let mut failure = None;
        for action in actions {
            match ledger.apply_action(action, started_at) {
                Ok(ActionOutcome::Unchanged) => {}
                Ok(outcome) => {
                    debug!(client_id, seq, ?outcome, "feed action applied");
                    changed = true;
                }
                Err(e) => {
                    failure = Some((action, e));
                    break;
                }
            }
        }

        match failure {
            None => out.push(OutboundMessage::ToClientAck {
                client_id,
                ack: create_ack(seq),
            }),
            Some((action, e)) => {
                debug!(client_id, seq, ?action, error = %e, "feed action rejected");
                let code = match e {
                    LedgerError::Game(_) => ErrorCode::RejectedRoll,
                    _ => ErrorCode::InvalidCommand,
                };
                out.push(OutboundMessage::ToClientError {
                    client_id,
                    err: create_error(seq, code, &e.to_string()),
                });
            }
        }

        if changed {
            out.push(self.broadcast(ledger));
        }
        out
    }
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    status: Arc<FeedStatus>,
}

impl Adapter {
    /// Start the feed from environment variables.
    ///
    /// Returns `Ok(None)` if `BOWLING_FEED_DISABLED` is set.
    pub fn start_from_env() -> anyhow::Result<Option<Self>> {
        if ServerConfig::is_disabled() {
            return Ok(None);
        }
        Self::start(ServerConfig::from_env()).map(Some)
    }

    pub fn start(config: ServerConfig) -> anyhow::Result<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
        let status = Arc::new(FeedStatus::default());

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let server_status = Arc::clone(&status);
        rt.spawn(async move {
            if let Err(e) = run_server_with_status(config, server_status, cmd_tx, out_rx, None).await
            {
                error!(error = %e, "lane feed stopped");
            }
        });

        Ok(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
            status,
        })
    }

    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }
}
