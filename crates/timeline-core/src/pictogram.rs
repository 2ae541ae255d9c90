// File: crates/timeline-core/src/pictogram.rs
// Summary: Pictogram rows: each yearly percentage drawn as ten human figures, filled proportionally.

use std::path::Path;

use crate::data::UsageRow;
use crate::svg::{num, SvgWriter};
use crate::theme::Theme;

/// Head + body outline of one figure, in a 30x63 box.
pub const FIGURE_PATH: &str = "M15 0C9 0 5 4 5 10C5 16 9 20 15 20C21 20 25 16 25 10C25 4 21 0 15 0Z\
M5 22C2 22 0 24 0 27L0 58C0 61 2 63 5 63L25 63C28 63 30 61 30 58L30 27C30 24 28 22 25 22L5 22Z";

pub struct PictogramOptions {
    /// Figures per row; each stands for `100 / total_figures` percent.
    pub total_figures: usize,
    pub figure_width: f64,
    pub figure_height: f64,
    pub label_width: f64,
    pub row_gap: f64,
    pub theme: Theme,
}

impl Default for PictogramOptions {
    fn default() -> Self {
        Self {
            total_figures: 10,
            figure_width: 30.0,
            figure_height: 60.0,
            label_width: 60.0,
            row_gap: 10.0,
            theme: Theme::light(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PictogramRow {
    pub year: i32,
    pub active: usize,
}

/// Number of filled figures for `percentage`, rounded half up and clamped to `[0, total]`.
/// NaN fills nothing.
pub fn active_figures(percentage: f64, total: usize) -> usize {
    let raw = (percentage / 100.0 * total as f64).round().max(0.0);
    (raw as usize).min(total)
}

pub struct Pictogram {
    opts: PictogramOptions,
    rows: Vec<PictogramRow>,
}

impl Pictogram {
    pub fn new(rows: &[UsageRow], opts: PictogramOptions) -> Self {
        let rows = rows
            .iter()
            .map(|r| PictogramRow { year: r.year, active: active_figures(r.percentage, opts.total_figures) })
            .collect();
        Self { opts, rows }
    }

    pub fn rows(&self) -> &[PictogramRow] { &self.rows }

    pub fn to_svg(&self) -> String {
        let o = &self.opts;
        let t = &o.theme;
        let row_h = o.figure_height + o.row_gap;
        let width = o.label_width + o.figure_width * o.total_figures as f64;
        let height = row_h * self.rows.len() as f64;
        let mut w = SvgWriter::new(width, height);
        for (ri, row) in self.rows.iter().enumerate() {
            let y0 = ri as f64 * row_h;
            w.open("g", &[("class", "row".into()), ("transform", format!("translate(0,{})", num(y0)))]);
            w.text(
                "text",
                &[("x", "0".into()), ("y", num(o.figure_height / 2.0)), ("font-size", "14".into()), ("fill", t.axis_label.hex())],
                &format!("{}: ", row.year),
            );
            for i in 0..o.total_figures {
                let active = i < row.active;
                let x = o.label_width + i as f64 * o.figure_width;
                w.empty(
                    "path",
                    &[
                        ("class", String::from(if active { "figure active" } else { "figure" })),
                        ("transform", format!("translate({},0)", num(x))),
                        ("d", FIGURE_PATH.to_string()),
                        ("fill", if active { t.figure_active.hex() } else { t.figure_inactive.hex() }),
                    ],
                );
            }
            w.close("g");
        }
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
