// File: crates/timeline-core/src/scene.rs
// Summary: SVG-backed Renderer for the timeline: static geometry plus tweened visual state.
//
// The scene owns every element the driver can refer to. Renderer requests only start tweens;
// nothing moves until the clock is advanced with `tick`/`settle`, so a new step may be
// requested while earlier transitions are still running.

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::data::{DataPoint, Milestone};
use crate::geometry::{polyline_length, Point};
use crate::renderer::{ElementRef, Renderer};
use crate::scale::{TimeScale, ValueScale};
use crate::svg::{num, SvgWriter};
use crate::text::{wrap_text, TextMeasure};
use crate::theme::Theme;
use crate::transition::Transitions;
use crate::types::Insets;

/// Milestone flag box and label metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlagStyle {
    pub text_width: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub box_width: f64,
    pub corner_radius: f64,
    /// Horizontal padding of the label inside the box.
    pub text_inset: f64,
    /// Gap between the top of the connector and the flag offset.
    pub connector_gap: f64,
}

impl Default for FlagStyle {
    fn default() -> Self {
        Self {
            text_width: 140.0,
            font_size: 10.0,
            line_height: 15.0,
            box_width: 150.0,
            corner_radius: 10.0,
            text_inset: 15.0,
            connector_gap: 7.5,
        }
    }
}

/// Animated property of a scene element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Prop {
    DashOffset,
    Opacity(ElementRef),
    /// Vertical position of a milestone flag relative to the axis.
    Lift(usize),
}

#[derive(Clone, Debug)]
struct Flag {
    x: f64,
    offset: f64,
    lines: Vec<String>,
}

/// Resolved state of one milestone flag at the current clock time.
#[derive(Clone, Debug, PartialEq)]
pub struct FlagFrame {
    pub x: f64,
    pub lift: f64,
    pub opacity: f64,
    pub lines: Vec<String>,
}

/// Everything needed to draw the timeline at the current clock time.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub plot_width: f64,
    pub plot_height: f64,
    pub points: Vec<Point>,
    pub point_opacity: Vec<f64>,
    pub point_radius: f64,
    pub total_length: f64,
    pub dash_offset: f64,
    pub flags: Vec<FlagFrame>,
    pub flag_style: FlagStyle,
    pub x_ticks: Vec<(f64, String)>,
    pub y_ticks: Vec<(f64, String)>,
    pub status: String,
    pub theme: Theme,
}

pub struct TimelineScene {
    width: f64,
    height: f64,
    insets: Insets,
    plot_width: f64,
    plot_height: f64,
    x: TimeScale,
    y: ValueScale,
    points: Vec<Point>,
    total_length: f64,
    flags: Vec<Flag>,
    point_radius: f64,
    flag_style: FlagStyle,
    theme: Theme,
    status: String,
    tweens: Transitions<Prop>,
}

/// Static configuration of a [`TimelineScene`].
#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
    pub insets: Insets,
    pub point_radius: f64,
    pub flag_style: FlagStyle,
    pub theme: Theme,
}

impl TimelineScene {
    /// Build the scene. `milestones` must already be laid out (offsets assigned) and sorted.
    pub fn new(
        config: SceneConfig,
        x: TimeScale,
        y: ValueScale,
        data: &[DataPoint],
        milestones: &[Milestone],
        measure: &dyn TextMeasure,
        initial_status: &str,
    ) -> Self {
        let plot_width = (config.width - config.insets.hsum() as f64).max(0.0);
        let plot_height = (config.height - config.insets.vsum() as f64).max(0.0);
        let points: Vec<Point> = data.iter().map(|d| Point::new(x.to_px(d.date), y.to_px(d.score))).collect();
        let total_length = polyline_length(&points);
        let style = config.flag_style;
        let flags: Vec<Flag> = milestones
            .iter()
            .map(|m| Flag {
                x: x.to_px(m.date),
                offset: m.vertical_offset,
                lines: wrap_text(&m.description, style.text_width, style.font_size, measure),
            })
            .collect();

        let mut tweens = Transitions::new();
        tweens.set(Prop::DashOffset, total_length);
        for i in 0..points.len() {
            tweens.set(Prop::Opacity(ElementRef::Point(i)), 0.0);
        }
        for i in 0..flags.len() {
            tweens.set(Prop::Opacity(ElementRef::Milestone(i)), 0.0);
            tweens.set(Prop::Lift(i), 0.0);
        }

        Self {
            width: config.width,
            height: config.height,
            insets: config.insets,
            plot_width,
            plot_height,
            x,
            y,
            points,
            total_length,
            flags,
            point_radius: config.point_radius,
            flag_style: style,
            theme: config.theme,
            status: initial_status.to_string(),
            tweens,
        }
    }

    pub fn status(&self) -> &str { &self.status }
    pub fn total_length(&self) -> f64 { self.total_length }
    pub fn dash_offset(&self) -> f64 { self.tweens.value(Prop::DashOffset).unwrap_or(self.total_length) }

    pub fn opacity(&self, element: ElementRef) -> f64 {
        self.tweens.value(Prop::Opacity(element)).unwrap_or(0.0)
    }

    /// Current vertical position of milestone flag `i` relative to the axis (0 = on the axis).
    pub fn lift(&self, i: usize) -> f64 {
        self.tweens.value(Prop::Lift(i)).unwrap_or(0.0)
    }

    /// Wrapped label lines of milestone flag `i`.
    pub fn flag_lines(&self, i: usize) -> Option<&[String]> {
        self.flags.get(i).map(|f| f.lines.as_slice())
    }

    /// Milestones whose flags are (at least partly) visible right now.
    pub fn visible_milestones(&self) -> Vec<usize> {
        (0..self.flags.len()).filter(|i| self.opacity(ElementRef::Milestone(*i)) > 0.0).collect()
    }

    pub fn tick(&mut self, dt: Duration) { self.tweens.tick(dt); }
    pub fn settle(&mut self) { self.tweens.settle(); }
    pub fn is_idle(&self) -> bool { self.tweens.is_idle() }
    pub fn now_ms(&self) -> f64 { self.tweens.now_ms() }

    /// Resolve the current visual state.
    pub fn frame(&self) -> Frame {
        let x_ticks = self
            .x
            .year_ticks()
            .into_iter()
            .map(|d| (self.x.to_px(d), d.year().to_string()))
            .collect();
        let y_ticks = self.y.ticks(9).into_iter().map(|v| (self.y.to_px(v), num(v))).collect();
        Frame {
            width: self.width,
            height: self.height,
            insets: self.insets,
            plot_width: self.plot_width,
            plot_height: self.plot_height,
            points: self.points.clone(),
            point_opacity: (0..self.points.len()).map(|i| self.opacity(ElementRef::Point(i))).collect(),
            point_radius: self.point_radius,
            total_length: self.total_length,
            dash_offset: self.dash_offset(),
            flags: self
                .flags
                .iter()
                .enumerate()
                .map(|(i, f)| FlagFrame {
                    x: f.x,
                    lift: self.lift(i),
                    opacity: self.opacity(ElementRef::Milestone(i)),
                    lines: f.lines.clone(),
                })
                .collect(),
            flag_style: self.flag_style,
            x_ticks,
            y_ticks,
            status: self.status.clone(),
            theme: self.theme,
        }
    }

    /// Serialize the current frame as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        frame_to_svg(&self.frame())
    }
}

impl Renderer for TimelineScene {
    fn map_date_to_x(&self, date: NaiveDate) -> f64 { self.x.to_px(date) }
    fn map_score_to_y(&self, score: f64) -> f64 { self.y.to_px(score) }

    fn animate_reveal(&mut self, target_length: f64, duration: Duration) {
        self.tweens.start(Prop::DashOffset, target_length, duration);
    }

    fn fade_in(&mut self, element: ElementRef, duration: Duration) {
        self.tweens.start(Prop::Opacity(element), 1.0, duration);
        if let ElementRef::Milestone(i) = element {
            if let Some(f) = self.flags.get(i) {
                self.tweens.start(Prop::Lift(i), f.offset, duration);
            }
        }
    }

    fn fade_out(&mut self, element: ElementRef, duration: Duration) {
        self.tweens.start(Prop::Opacity(element), 0.0, duration);
    }

    fn set_status_text(&mut self, text: &str) {
        trace!(text, "status");
        self.status = text.to_string();
    }
}

fn flag_label_top(lift: f64, lines: usize, line_height: f64) -> f64 {
    if lines == 1 { lift - line_height } else { lift - (lines as f64 * line_height - 2.0) }
}

/// Render a frame as a standalone SVG document.
///
/// Flag geometry is axis-relative: each milestone group is translated onto the axis at the
/// flag's x, and its box, connector and label are placed from the animated lift, so the
/// offset is applied once and the connector always ends on the axis.
pub fn frame_to_svg(f: &Frame) -> String {
    let t = &f.theme;
    let mut w = SvgWriter::new(f.width, f.height);
    w.empty(
        "rect",
        &[("width", num(f.width)), ("height", num(f.height)), ("fill", t.background.hex())],
    );
    w.open(
        "g",
        &[("transform", format!("translate({},{})", f.insets.left, f.insets.top))],
    );

    // x axis
    w.open("g", &[("class", "axis x".into()), ("transform", format!("translate(0,{})", num(f.plot_height)))]);
    w.empty("line", &[("x1", "0".into()), ("x2", num(f.plot_width)), ("stroke", t.axis_line.hex())]);
    for (px, label) in &f.x_ticks {
        w.empty("line", &[("x1", num(*px)), ("x2", num(*px)), ("y2", "6".into()), ("stroke", t.axis_line.hex())]);
        w.text(
            "text",
            &[("x", num(*px)), ("y", "18".into()), ("text-anchor", "middle".into()), ("font-size", "10".into()), ("fill", t.axis_label.hex())],
            label,
        );
    }
    w.close("g");

    // y axis
    w.open("g", &[("class", "axis y".into())]);
    w.empty("line", &[("y1", "0".into()), ("y2", num(f.plot_height)), ("stroke", t.axis_line.hex())]);
    for (py, label) in &f.y_ticks {
        w.empty("line", &[("x1", "-6".into()), ("y1", num(*py)), ("y2", num(*py)), ("stroke", t.axis_line.hex())]);
        w.text(
            "text",
            &[("x", "-9".into()), ("y", num(py + 3.0)), ("text-anchor", "end".into()), ("font-size", "10".into()), ("fill", t.axis_label.hex())],
            label,
        );
    }
    w.close("g");

    if !f.points.is_empty() {
        let d = f
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}{},{}", if i == 0 { "M" } else { "L" }, num(p.x), num(p.y)))
            .collect::<String>();
        w.empty(
            "path",
            &[
                ("class", "line".into()),
                ("d", d),
                ("fill", "none".into()),
                ("stroke", t.line_stroke.hex()),
                ("stroke-width", "2".into()),
                ("stroke-dasharray", format!("{} {}", num(f.total_length), num(f.total_length))),
                ("stroke-dashoffset", num(f.dash_offset)),
            ],
        );
    }

    for (p, o) in f.points.iter().zip(&f.point_opacity) {
        w.empty(
            "circle",
            &[("cx", num(p.x)), ("cy", num(p.y)), ("r", num(f.point_radius)), ("fill", t.point_fill.hex()), ("opacity", num(*o))],
        );
    }

    let s = &f.flag_style;
    for flag in &f.flags {
        let n = flag.lines.len();
        let box_h = n as f64 * s.line_height;
        w.open(
            "g",
            &[
                ("class", "milestone".into()),
                ("transform", format!("translate({},{})", num(flag.x), num(f.plot_height))),
                ("opacity", num(flag.opacity)),
            ],
        );
        w.empty(
            "line",
            &[("y1", num(flag.lift - s.connector_gap)), ("y2", "0".into()), ("stroke", t.flag_stroke.hex()), ("stroke-width", "1".into())],
        );
        w.empty(
            "rect",
            &[
                ("x", num(-s.box_width)),
                ("y", num(flag.lift - box_h)),
                ("width", num(s.box_width)),
                ("height", num(box_h)),
                ("rx", num(s.corner_radius)),
                ("ry", num(s.corner_radius)),
                ("fill", t.flag_fill.hex()),
                ("stroke", t.flag_stroke.hex()),
            ],
        );
        let tx = num(-s.box_width + s.text_inset);
        w.open(
            "text",
            &[
                ("x", tx.clone()),
                ("y", num(flag_label_top(flag.lift, n, s.line_height))),
                ("font-size", num(s.font_size)),
                ("fill", t.flag_text.hex()),
            ],
        );
        for line in &flag.lines {
            w.text("tspan", &[("x", tx.clone()), ("dy", "1.2em".into())], line);
        }
        w.close("text");
        w.close("g");
    }

    w.text(
        "text",
        &[
            ("class", "status".into()),
            ("x", num(f.plot_width)),
            ("y", "-6".into()),
            ("text-anchor", "end".into()),
            ("font-size", "12".into()),
            ("fill", t.axis_label.hex()),
        ],
        &f.status,
    );

    w.close("g");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ApproxMeasure;

    fn d(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn scene() -> TimelineScene {
        let config = SceneConfig {
            width: 1200.0,
            height: 400.0,
            insets: Insets::default(),
            point_radius: 3.0,
            flag_style: FlagStyle::default(),
            theme: Theme::light(),
        };
        let x = TimeScale::new(d(2000), d(2006), 0.0, 1130.0);
        let y = ValueScale::new_linear(0.0, 350.0, 470.0, 560.0);
        let data = vec![
            DataPoint { date: d(2000), score: 546.0 },
            DataPoint { date: d(2003), score: 543.0 },
            DataPoint { date: d(2006), score: 547.0 },
        ];
        let mut m = Milestone::new(d(2002), "Curriculum reform & staff training");
        m.vertical_offset = -50.0;
        TimelineScene::new(config, x, y, &data, &[m], &ApproxMeasure, "start")
    }

    #[test]
    fn initial_state_is_hidden() {
        let s = scene();
        assert_eq!(s.dash_offset(), s.total_length());
        assert_eq!(s.opacity(ElementRef::Point(1)), 0.0);
        assert_eq!(s.lift(0), 0.0);
        assert!(s.visible_milestones().is_empty());
        assert_eq!(s.status(), "start");
    }

    #[test]
    fn requests_only_take_effect_as_clock_advances() {
        let mut s = scene();
        s.animate_reveal(100.0, Duration::from_millis(1000));
        s.fade_in(ElementRef::Milestone(0), Duration::from_millis(1000));
        assert_eq!(s.opacity(ElementRef::Milestone(0)), 0.0);
        assert!(!s.is_idle());

        s.tick(Duration::from_millis(500));
        assert!((s.opacity(ElementRef::Milestone(0)) - 0.5).abs() < 1e-9);
        assert!((s.lift(0) + 25.0).abs() < 1e-9);

        s.settle();
        assert_eq!(s.dash_offset(), 100.0);
        assert_eq!(s.lift(0), -50.0);
        assert_eq!(s.visible_milestones(), vec![0]);
    }

    #[test]
    fn fade_out_keeps_flag_raised() {
        let mut s = scene();
        s.fade_in(ElementRef::Milestone(0), Duration::from_millis(1000));
        s.settle();
        s.fade_out(ElementRef::Milestone(0), Duration::from_millis(500));
        s.settle();
        assert_eq!(s.opacity(ElementRef::Milestone(0)), 0.0);
        assert_eq!(s.lift(0), -50.0);
    }

    #[test]
    fn svg_contains_dash_state_and_escaped_labels() {
        let mut s = scene();
        s.set_status_text("Pisa results for 2003: 543");
        let svg = s.to_svg();
        assert!(svg.contains(&format!("stroke-dashoffset=\"{}\"", num(s.total_length()))));
        assert!(svg.contains("&amp; staff"));
        assert!(svg.contains(">Pisa results for 2003: 543</text>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("class=\"milestone\"").count(), 1);
        assert!(svg.contains(">2003</text>"));
        assert!(svg.contains(">470</text>") && svg.contains(">560</text>"));
    }

    #[test]
    fn flag_geometry_follows_lift() {
        let mut s = scene();
        assert_eq!(s.flag_lines(0).map(<[String]>::len), Some(2));
        s.fade_in(ElementRef::Milestone(0), Duration::from_millis(1000));
        s.tick(Duration::from_millis(500));
        // lift -25, two lines of 15px
        let svg = s.to_svg();
        assert!(svg.contains("<line y1=\"-32.5\" y2=\"0\""));
        assert!(svg.contains("<rect x=\"-150\" y=\"-55\" width=\"150\" height=\"30\""));
        assert!(svg.contains("<text x=\"-135\" y=\"-53\""));

        s.settle();
        let svg = s.to_svg();
        assert!(svg.contains("<line y1=\"-57.5\" y2=\"0\""));
        assert!(svg.contains("<rect x=\"-150\" y=\"-80\" width=\"150\" height=\"30\""));
        assert!(svg.contains("<text x=\"-135\" y=\"-78\""));
    }

    #[test]
    fn unknown_milestone_index_is_ignored() {
        let mut s = scene();
        s.fade_in(ElementRef::Milestone(7), Duration::from_millis(10));
        s.settle();
        assert!(s.visible_milestones().is_empty());
    }
}
