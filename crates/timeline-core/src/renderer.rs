// File: crates/timeline-core/src/renderer.rs
// Summary: Renderer collaborator trait consumed by the animation driver, plus a recording implementation.
// Notes:
// - Every request is fire-and-forget: implementations must return immediately and never
//   wait for a transition to finish.

use std::time::Duration;

use chrono::NaiveDate;

/// Handle to an element the driver can ask the renderer to animate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// Marker circle of the data point at this index.
    Point(usize),
    /// Flag group of the milestone at this index (date-sorted order).
    Milestone(usize),
}

pub trait Renderer {
    fn map_date_to_x(&self, date: NaiveDate) -> f64;
    fn map_score_to_y(&self, score: f64) -> f64;
    /// Animate the line's dash offset to `target_length`.
    fn animate_reveal(&mut self, target_length: f64, duration: Duration);
    /// Fade `element` in. Milestone flags also rise to their laid-out offset.
    fn fade_in(&mut self, element: ElementRef, duration: Duration);
    fn fade_out(&mut self, element: ElementRef, duration: Duration);
    fn set_status_text(&mut self, text: &str);
}

/// One logical request issued to a [`Renderer`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    AnimateReveal { target_length: f64, duration: Duration },
    FadeIn { element: ElementRef, duration: Duration },
    FadeOut { element: ElementRef, duration: Duration },
    SetStatusText(String),
}

/// Renderer that records every request; mapping goes through caller-supplied scales.
pub struct RecordingRenderer<X, Y> {
    x: X,
    y: Y,
    pub commands: Vec<RenderCommand>,
}

impl<X, Y> RecordingRenderer<X, Y>
where
    X: Fn(NaiveDate) -> f64,
    Y: Fn(f64) -> f64,
{
    pub fn new(x: X, y: Y) -> Self {
        Self { x, y, commands: Vec::new() }
    }

    /// Drain the commands recorded so far.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Last status text requested, if any.
    pub fn status(&self) -> Option<&str> {
        self.commands.iter().rev().find_map(|c| match c {
            RenderCommand::SetStatusText(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl<X, Y> Renderer for RecordingRenderer<X, Y>
where
    X: Fn(NaiveDate) -> f64,
    Y: Fn(f64) -> f64,
{
    fn map_date_to_x(&self, date: NaiveDate) -> f64 { (self.x)(date) }
    fn map_score_to_y(&self, score: f64) -> f64 { (self.y)(score) }

    fn animate_reveal(&mut self, target_length: f64, duration: Duration) {
        self.commands.push(RenderCommand::AnimateReveal { target_length, duration });
    }
    fn fade_in(&mut self, element: ElementRef, duration: Duration) {
        self.commands.push(RenderCommand::FadeIn { element, duration });
    }
    fn fade_out(&mut self, element: ElementRef, duration: Duration) {
        self.commands.push(RenderCommand::FadeOut { element, duration });
    }
    fn set_status_text(&mut self, text: &str) {
        self.commands.push(RenderCommand::SetStatusText(text.to_string()));
    }
}
