//! Terminal bowling scorekeeper (default binary).
//!
//! Keys record balls on the active scorecard; the optional lane feed streams
//! the card over TCP and accepts balls from one remote controller.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tui_bowling::adapter::{Adapter, FeedSession};
use tui_bowling::core::{ActionOutcome, GameLedger, ScorecardSnapshot};
use tui_bowling::input::{handle_key_event, should_quit};
use tui_bowling::term::{FeedStatusView, FrameBuffer, ScorecardView, TerminalRenderer, Viewport};

/// How long to wait for a key before checking the feed again.
const POLL_MS: u64 = 50;

fn main() -> Result<()> {
    init_logging()?;

    let mut adapter = match Adapter::start_from_env() {
        Ok(adapter) => adapter,
        Err(e) => {
            warn!(error = %e, "lane feed unavailable");
            None
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, adapter.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to `BOWLING_LOG_PATH` when set; the alternate screen owns stdout and
/// stderr, so without a path nothing is logged.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("BOWLING_LOG_PATH").filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.to_string_lossy()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok();
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn run(term: &mut TerminalRenderer, mut adapter: Option<&mut Adapter>) -> Result<()> {
    let mut ledger = GameLedger::new();
    ledger.start_new_game(now_rfc3339())?;
    info!(feed = adapter.is_some(), "scorekeeper started");

    let view = ScorecardView::new();
    let mut session = FeedSession::new();
    let mut snap = ScorecardSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let poll = Duration::from_millis(POLL_MS);

    loop {
        // Render.
        ledger.snapshot_into(&mut snap);
        let feed = adapter.as_deref().map(|a| FeedStatusView {
            enabled: true,
            client_count: a.status().client_count(),
            controller_id: a.status().controller_id(),
        });
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, feed.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Keyboard.
        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(games = ledger.len(), "scorekeeper exiting");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match ledger.apply_action(action, &now_rfc3339()) {
                            Ok(ActionOutcome::Unchanged) => {}
                            Ok(outcome) => {
                                debug!(?outcome, "key action applied");
                                if let Some(a) = adapter.as_deref() {
                                    a.send(session.broadcast(&ledger));
                                }
                            }
                            Err(e) => debug!(?action, error = %e, "key action rejected"),
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Lane feed.
        if let Some(a) = adapter.as_deref_mut() {
            while let Some(inbound) = a.try_recv() {
                for msg in session.handle(&mut ledger, inbound, &now_rfc3339()) {
                    a.send(msg);
                }
            }
        }
    }
}
