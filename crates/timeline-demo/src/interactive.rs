// File: crates/timeline-demo/src/interactive.rs
// Summary: Terminal stepping: space advances the timeline, transitions run on wall-clock time.

use std::io::{self, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use timeline_core::TimelineChart;
use tracing::debug;

use crate::write_frame;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Forward key presses from a reader thread.
fn key_events() -> Receiver<KeyEvent> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
    rx
}

enum Action {
    Advance,
    Quit,
    Ignore,
}

fn action_for(key: &KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }
    match key.code {
        KeyCode::Char(' ') => Action::Advance,
        KeyCode::Esc | KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        _ => Action::Ignore,
    }
}

fn show_status(text: &str) -> io::Result<()> {
    let mut out = io::stdout();
    // raw mode: move to column 0 and clear the line ourselves
    write!(out, "\r\x1b[2K{text}")?;
    out.flush()
}

pub fn run(chart: &mut TimelineChart, out_dir: &Path) -> Result<()> {
    let frame_path = out_dir.join("timeline_current.svg");
    write_frame(chart, &frame_path)?;
    println!("Writing frames to {} (space: next step, q: quit)", frame_path.display());

    enable_raw_mode()?;
    let result = event_loop(chart, &frame_path);
    disable_raw_mode()?;
    println!();
    result
}

fn event_loop(chart: &mut TimelineChart, frame_path: &Path) -> Result<()> {
    let keys = key_events();
    let mut last = Instant::now();
    show_status(chart.status())?;

    loop {
        let key = match keys.recv_timeout(FRAME_INTERVAL) {
            Ok(key) => Some(key),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        };

        let now = Instant::now();
        let was_idle = chart.scene().is_idle();
        chart.tick(now - last);
        last = now;

        let mut dirty = !was_idle;
        if let Some(key) = key {
            match action_for(&key) {
                Action::Advance => {
                    let outcome = chart.advance();
                    debug!(?outcome, "space");
                    show_status(chart.status())?;
                    dirty = true;
                }
                Action::Quit => return Ok(()),
                Action::Ignore => {}
            }
        }
        if dirty {
            write_frame(chart, frame_path)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn space_advances_and_q_quits() {
        assert!(matches!(action_for(&key(KeyCode::Char(' '), KeyModifiers::NONE)), Action::Advance));
        assert!(matches!(action_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit));
        assert!(matches!(action_for(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit));
        assert!(matches!(action_for(&key(KeyCode::Enter, KeyModifiers::NONE)), Action::Ignore));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut k = key(KeyCode::Char(' '), KeyModifiers::NONE);
        k.kind = KeyEventKind::Release;
        assert!(matches!(action_for(&k), Action::Ignore));
    }
}
