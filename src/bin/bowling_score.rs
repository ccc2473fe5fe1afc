//! Score a list of balls from the command line.
//!
//! ```text
//! bowling-score X 7/ 9- X X X 8 1 X X 9/X
//! bowling-score --json 10 10 10 10 10 10 10 10 10 10 10 10
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tui_bowling::core::{marks_string, Game, GameId, ScorecardSnapshot};
use tui_bowling::types::{ScoreAction, FRAME_COUNT};

#[derive(Parser)]
#[command(name = "bowling-score")]
#[command(about = "Score a ten-pin bowling game from a list of balls")]
struct Args {
    /// Balls in order: pin counts or scorecard marks (X, /, -). Marks may be
    /// run together, e.g. `X 7/ 9-`.
    #[arg(required = true)]
    balls: Vec<String>,

    /// Print the scorecard as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let actions = parse_balls(&args.balls)?;
    let mut game = Game::new(GameId(1), "");
    for (n, action) in actions.iter().enumerate() {
        let pos = game
            .record_action(*action)
            .with_context(|| format!("ball {} ({})", n + 1, describe(*action)))?;
        debug!(ball = n + 1, frame = pos.frame + 1, roll = pos.roll + 1, "recorded");
    }

    let snap = game.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&snap))?);
    } else {
        print!("{}", render_text(&snap));
    }
    Ok(())
}

/// Expand arguments into ball actions. A whole argument is tried first so that
/// `10` stays one ball; otherwise each character is read as its own mark.
/// All-digit arguments are never split, so `256` is an error rather than three
/// balls.
fn parse_balls(args: &[String]) -> Result<Vec<ScoreAction>> {
    let mut out = Vec::new();
    for arg in args {
        let trimmed = arg.trim();
        if trimmed.is_empty() {
            bail!("empty ball argument");
        }
        if let Some(action) = ScoreAction::from_str(trimmed) {
            out.push(roll_only(action, arg)?);
            continue;
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            bail!("{arg:?} is not a pin count");
        }
        for ch in trimmed.chars() {
            let mut buf = [0u8; 4];
            let token = ch.encode_utf8(&mut buf);
            match ScoreAction::from_str(token) {
                Some(action) => out.push(roll_only(action, arg)?),
                None => bail!("cannot read {arg:?} as balls"),
            }
        }
    }
    Ok(out)
}

fn roll_only(action: ScoreAction, arg: &str) -> Result<ScoreAction> {
    if !action.is_roll() {
        bail!("{arg:?} is not a ball");
    }
    Ok(action)
}

fn describe(action: ScoreAction) -> String {
    match action {
        ScoreAction::Pins(n) => format!("{n} pins"),
        other => other.as_str().to_string(),
    }
}

fn render_text(snap: &ScorecardSnapshot) -> String {
    let mut frames = String::from("Frame ");
    let mut marks = String::from("Marks ");
    let mut scores = String::from("Score ");
    for (i, frame) in snap.frames.iter().enumerate() {
        frames.push_str(&format!("{:>5}", i + 1));
        marks.push_str(&format!("{:>5}", marks_string(&frame.marks)));
        let score = frame.score.map(|s| s.to_string()).unwrap_or_default();
        scores.push_str(&format!("{score:>5}"));
    }

    let status = if snap.complete { "final" } else { "in progress" };
    format!(
        "{frames}\n{marks}\n{scores}\nTotal {} ({status})\n",
        snap.total
    )
}

fn to_json(snap: &ScorecardSnapshot) -> serde_json::Value {
    let frames: Vec<_> = snap
        .frames
        .iter()
        .take(FRAME_COUNT)
        .map(|f| {
            json!({
                "marks": marks_string(&f.marks),
                "score": f.score,
                "complete": f.complete,
            })
        })
        .collect();
    json!({
        "frames": frames,
        "total": snap.total,
        "complete": snap.complete,
        "pins_standing": snap.pins_standing,
    })
}
