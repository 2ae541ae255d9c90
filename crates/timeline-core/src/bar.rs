// File: crates/timeline-core/src/bar.rs
// Summary: Static bar chart of yearly percentages (band X axis, 0-100% Y axis, value labels).

use std::path::Path;

use crate::data::UsageRow;
use crate::scale::{BandScale, ValueScale};
use crate::svg::{num, SvgWriter};
use crate::theme::Theme;
use crate::types::Insets;

pub const DEFAULT_TITLE: &str = "Percentage of smartphone users aged 16-24.";

pub struct BarChartOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub band_padding: f64,
    pub corner_radius: f64,
    pub title: String,
    pub theme: Theme,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            insets: Insets::new(60, 30, 40, 40),
            band_padding: 0.2,
            corner_radius: 4.0,
            title: DEFAULT_TITLE.to_string(),
            theme: Theme::light(),
        }
    }
}

/// One laid-out bar, in plot coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub year: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
}

pub struct BarChart {
    opts: BarChartOptions,
    plot_width: f64,
    plot_height: f64,
    x: BandScale<i32>,
    y: ValueScale,
    bars: Vec<Bar>,
}

/// Percentage label, e.g. `61%` or `61.5%`.
pub fn percent_label(v: f64) -> String {
    format!("{}%", v)
}

impl BarChart {
    pub fn new(rows: &[UsageRow], opts: BarChartOptions) -> Self {
        let (plot_width, plot_height) = opts.insets.inner(opts.width, opts.height);
        let x = BandScale::new(rows.iter().map(|r| r.year).collect(), plot_width, opts.band_padding);
        let y = ValueScale::new_linear(0.0, plot_height, 0.0, 100.0);
        let bars = rows
            .iter()
            .map(|r| {
                let top = y.to_px(r.percentage);
                Bar {
                    year: r.year,
                    x: x.to_px(&r.year).unwrap_or(0.0),
                    y: top,
                    width: x.bandwidth(),
                    height: plot_height - top,
                    label: percent_label(r.percentage),
                }
            })
            .collect();
        Self { opts, plot_width, plot_height, x, y, bars }
    }

    pub fn bars(&self) -> &[Bar] { &self.bars }

    pub fn to_svg(&self) -> String {
        let o = &self.opts;
        let t = &o.theme;
        let (w_px, h_px) = (o.width as f64, o.height as f64);
        let mut w = SvgWriter::new(w_px, h_px);
        w.empty("rect", &[("width", num(w_px)), ("height", num(h_px)), ("fill", t.background.hex())]);
        w.text(
            "text",
            &[
                ("x", num(w_px / 2.0)),
                ("y", num(o.insets.top as f64 / 2.0)),
                ("text-anchor", "middle".into()),
                ("font-size", "16".into()),
                ("font-weight", "bold".into()),
                ("fill", t.axis_label.hex()),
            ],
            &o.title,
        );
        w.open("g", &[("transform", format!("translate({},{})", o.insets.left, o.insets.top))]);

        w.open("g", &[("class", "axis x".into()), ("transform", format!("translate(0,{})", num(self.plot_height)))]);
        w.empty("line", &[("x1", "0".into()), ("x2", num(self.plot_width)), ("stroke", t.axis_line.hex())]);
        for year in &self.x.domain {
            let cx = self.x.to_px(year).unwrap_or(0.0) + self.x.bandwidth() / 2.0;
            w.empty("line", &[("x1", num(cx)), ("x2", num(cx)), ("y2", "6".into()), ("stroke", t.axis_line.hex())]);
            w.text(
                "text",
                &[("x", num(cx)), ("y", "18".into()), ("text-anchor", "middle".into()), ("font-size", "10".into()), ("fill", t.axis_label.hex())],
                &year.to_string(),
            );
        }
        w.close("g");

        w.open("g", &[("class", "axis y".into())]);
        w.empty("line", &[("y1", "0".into()), ("y2", num(self.plot_height)), ("stroke", t.axis_line.hex())]);
        for v in self.y.ticks(10) {
            let py = self.y.to_px(v);
            w.empty("line", &[("x1", "-6".into()), ("y1", num(py)), ("y2", num(py)), ("stroke", t.axis_line.hex())]);
            w.text(
                "text",
                &[("x", "-9".into()), ("y", num(py + 3.0)), ("text-anchor", "end".into()), ("font-size", "10".into()), ("fill", t.axis_label.hex())],
                &percent_label(v),
            );
        }
        w.close("g");

        for b in &self.bars {
            w.empty(
                "rect",
                &[
                    ("class", "bar".into()),
                    ("x", num(b.x)),
                    ("y", num(b.y)),
                    ("width", num(b.width)),
                    ("height", num(b.height)),
                    ("fill", t.bar_fill.hex()),
                    ("rx", num(o.corner_radius)),
                    ("ry", num(o.corner_radius)),
                ],
            );
        }
        for b in &self.bars {
            w.text(
                "text",
                &[
                    ("class", "label".into()),
                    ("x", num(b.x + b.width / 2.0)),
                    ("y", num(b.y - 5.0)),
                    ("text-anchor", "middle".into()),
                    ("font-size", "10".into()),
                    ("fill", t.axis_label.hex()),
                ],
                &b.label,
            );
        }
        w.close("g");
        w.finish()
    }

    pub fn render_to_svg(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())
    }
}
