//! Lane Runner entry point
//!
//! Headless terminal host: one line per tick, Enter to start or jump, `q` to quit.
//!
//! Usage: `lane-runner [settings.json]`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use lane_runner::platform::{SharedSession, SnapshotSink, Ticker};
use lane_runner::settings::DEFAULT_SETTINGS_PATH;
use lane_runner::sim::{
    CharacterState, LaneContent, SeededRng, Session, SessionMessage, SessionState, Snapshot,
    TickOutcome,
};
use lane_runner::{FileBestScore, Settings};

/// Draws each frame as a single text line on stdout
struct TerminalSink {
    out: io::Stdout,
}

impl TerminalSink {
    fn lane_glyph(lane: LaneContent) -> char {
        match lane {
            LaneContent::Flat => '_',
            LaneContent::Hill => '^',
            LaneContent::Crater => 'u',
            LaneContent::Obstacle => '#',
        }
    }

    fn render(snapshot: &Snapshot) -> String {
        let ground: String = snapshot.lanes.iter().copied().map(Self::lane_glyph).collect();
        let pose = match snapshot.character {
            CharacterState::Running(_) => "run ",
            CharacterState::Jumping(_) => "jump",
        };
        let status = match (snapshot.state, snapshot.message) {
            (SessionState::Playing, _) => String::new(),
            (_, Some(SessionMessage::NewRecord)) => "  NEW RECORD!! press Enter".to_string(),
            (_, Some(SessionMessage::GameOver)) => "  GAME OVER - press Enter".to_string(),
            (_, None) => "  press Enter to play".to_string(),
        };
        format!(
            "{ground} {pose} {:<10} score {:>4}  best {:>4}{status}",
            snapshot.character.to_string(),
            snapshot.score,
            snapshot.best_score
        )
    }
}

impl SnapshotSink for TerminalSink {
    fn present(&mut self, snapshot: &Snapshot, outcome: TickOutcome) {
        // Only redraw while something changes, plus the frame that ends a run
        if matches!(outcome, TickOutcome::Idle) {
            return;
        }
        let mut out = self.out.lock();
        let _ = writeln!(out, "{}", Self::render(snapshot));
        let _ = out.flush();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path);

    let rng = match settings.seed {
        Some(seed) => SeededRng::new(seed),
        None => SeededRng::from_entropy(),
    };
    log::info!("Lane seed: {}", rng.seed());

    let session = Session::new(
        Box::new(FileBestScore::new(&settings.best_score_path)),
        Box::new(rng),
    )
    .with_auto_play(settings.auto_play);
    let shared = SharedSession::new(session);

    println!("{}", TerminalSink::render(&shared.snapshot()));

    let mut ticker = Ticker::spawn(
        shared.clone(),
        Duration::from_millis(settings.tick_interval_ms),
        TerminalSink { out: io::stdout() },
    );

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        shared.press();
    }

    ticker.stop();
    log::info!("Final best score: {}", shared.snapshot().best_score);
    Ok(())
}
