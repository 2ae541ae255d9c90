// File: crates/timeline-core/src/animation.rs
// Summary: Step-wise reveal driver: advances a cursor through the series and issues renderer requests.
//
// States: `Idle(cursor)` for cursor in [0, N-2], `Complete` at N-1. `advance` is the only
// transition; in `Complete` it only re-announces the completion message.
//
// Milestone visibility is evaluated against both the old and the new cursor: a flag whose
// date falls in (data[cursor], data[next]] is shown, a flag dated at or before data[cursor]
// is hidden. A flag therefore stays up for exactly one step.

use std::time::Duration;

use tracing::{debug, warn};

use crate::data::{DataPoint, Milestone};
use crate::geometry::{cumulative_lengths, polyline_length, Point};
use crate::renderer::{ElementRef, Renderer};

pub const START_MESSAGE: &str = "Press the spacebar to start!";
pub const COMPLETE_MESSAGE: &str = "Animation complete!";

/// Status line shown after revealing `point`.
pub fn status_text(point: &DataPoint) -> String {
    use chrono::Datelike;
    format!("Pisa results for {}: {}", point.date.year(), point.score)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepTiming {
    /// Line reveal, point fade-in and milestone rise.
    pub reveal: Duration,
    pub milestone_fade_out: Duration,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self { reveal: Duration::from_millis(1000), milestone_fade_out: Duration::from_millis(500) }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub cursor: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Advanced {
        from: usize,
        to: usize,
        target_length: f64,
        /// Milestone indices asked to fade in.
        shown: Vec<usize>,
        /// Milestone indices asked to fade out.
        hidden: Vec<usize>,
    },
    /// Nothing left to reveal; only the completion message was issued.
    Complete,
    /// `data` does not match the series the driver was built from. Nothing was dispatched
    /// and the cursor did not move.
    Rejected,
}

pub struct AnimationDriver {
    state: AnimationState,
    len: usize,
    cumulative: Vec<f64>,
    total_length: f64,
    timing: StepTiming,
}

impl AnimationDriver {
    /// Precompute arc lengths of the series as mapped by `renderer`.
    pub fn new<R: Renderer + ?Sized>(data: &[DataPoint], renderer: &R, timing: StepTiming) -> Self {
        let points: Vec<Point> = data
            .iter()
            .map(|d| Point::new(renderer.map_date_to_x(d.date), renderer.map_score_to_y(d.score)))
            .collect();
        Self {
            state: AnimationState::default(),
            len: data.len(),
            cumulative: cumulative_lengths(&points),
            total_length: polyline_length(&points),
            timing,
        }
    }

    pub fn state(&self) -> AnimationState { self.state }
    pub fn cursor(&self) -> usize { self.state.cursor }
    pub fn cumulative_lengths(&self) -> &[f64] { &self.cumulative }
    pub fn total_length(&self) -> f64 { self.total_length }
    pub fn timing(&self) -> StepTiming { self.timing }

    /// True once the cursor sits on the last point (or the series has at most one point).
    pub fn is_complete(&self) -> bool {
        self.state.cursor + 1 >= self.len
    }

    /// Dash offset that reveals the line up to `index`.
    pub fn reveal_target(&self, index: usize) -> f64 {
        self.total_length - self.cumulative.get(index).copied().unwrap_or(self.total_length)
    }

    /// Advance one step. `data` and `milestones` must be the date-sorted sequences the driver
    /// was built from; requests are dispatched without waiting on `renderer`.
    pub fn advance<R: Renderer + ?Sized>(
        &mut self,
        data: &[DataPoint],
        milestones: &[Milestone],
        renderer: &mut R,
    ) -> StepOutcome {
        if data.len() != self.len {
            warn!(expected = self.len, got = data.len(), "advance called with a different series");
            return StepOutcome::Rejected;
        }
        if self.is_complete() {
            renderer.set_status_text(COMPLETE_MESSAGE);
            debug!(cursor = self.state.cursor, "advance requested on completed animation");
            return StepOutcome::Complete;
        }

        let cursor = self.state.cursor;
        let next = cursor + 1;
        let target_length = self.reveal_target(next);

        renderer.animate_reveal(target_length, self.timing.reveal);
        renderer.fade_in(ElementRef::Point(next), self.timing.reveal);

        let (prev_date, next_date) = (data[cursor].date, data[next].date);
        let mut shown = Vec::new();
        let mut hidden = Vec::new();
        for (i, m) in milestones.iter().enumerate() {
            if m.date <= next_date && m.date > prev_date {
                renderer.fade_in(ElementRef::Milestone(i), self.timing.reveal);
                shown.push(i);
            }
            if m.date <= prev_date {
                renderer.fade_out(ElementRef::Milestone(i), self.timing.milestone_fade_out);
                hidden.push(i);
            }
        }

        renderer.set_status_text(&status_text(&data[next]));
        self.state.cursor = next;

        debug!(from = cursor, to = next, target_length, shown = shown.len(), hidden = hidden.len(), "advanced");
        StepOutcome::Advanced { from: cursor, to: next, target_length, shown, hidden }
    }
}
