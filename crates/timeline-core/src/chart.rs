// File: crates/timeline-core/src/chart.rs
// Summary: TimelineChart: wires data, scales, milestone layout, animation driver and SVG scene together.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::info;

use crate::animation::{AnimationDriver, StepOutcome, StepTiming, START_MESSAGE};
use crate::data::{self, DataPoint, Milestone};
use crate::error::LoadError;
use crate::layout::{layout_milestones, LayoutParams};
use crate::scale::{TimeScale, ValueScale};
use crate::scene::{FlagStyle, SceneConfig, TimelineScene};
use crate::text::{ApproxMeasure, TextMeasure};
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, WIDTH};

pub struct TimelineOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    /// Fixed score axis domain (min, max).
    pub score_domain: (f64, f64),
    pub timing: StepTiming,
    pub layout: LayoutParams,
    pub point_radius: f64,
    pub flag_style: FlagStyle,
    pub theme: Theme,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            score_domain: (470.0, 560.0),
            timing: StepTiming::default(),
            layout: LayoutParams::default(),
            point_radius: 3.0,
            flag_style: FlagStyle::default(),
            theme: Theme::light(),
        }
    }
}

pub struct TimelineChart {
    data: Vec<DataPoint>,
    milestones: Vec<Milestone>,
    driver: AnimationDriver,
    scene: TimelineScene,
}

impl TimelineChart {
    pub fn new(data: Vec<DataPoint>, milestones: Vec<Milestone>, opts: &TimelineOptions) -> Self {
        Self::with_measure(data, milestones, opts, &ApproxMeasure)
    }

    /// Build the chart, wrapping flag labels with `measure`.
    pub fn with_measure(
        mut data: Vec<DataPoint>,
        mut milestones: Vec<Milestone>,
        opts: &TimelineOptions,
        measure: &dyn TextMeasure,
    ) -> Self {
        data.sort_by_key(|d| d.date);
        milestones.sort_by_key(|m| m.date);

        let (plot_w, plot_h) = opts.insets.inner(opts.width, opts.height);
        let x = TimeScale::from_extent(data.iter().map(|d| d.date), 0.0, plot_w)
            .or_else(|| TimeScale::from_extent(milestones.iter().map(|m| m.date), 0.0, plot_w))
            .unwrap_or_else(|| TimeScale::new(NaiveDate::MIN, NaiveDate::MIN, 0.0, plot_w));
        let (lo, hi) = opts.score_domain;
        let y = ValueScale::new_linear(0.0, plot_h, lo, hi);

        layout_milestones(&mut milestones, |d| x.to_px(d), plot_h, &opts.layout);

        let config = SceneConfig {
            width: opts.width as f64,
            height: opts.height as f64,
            insets: opts.insets,
            point_radius: opts.point_radius,
            flag_style: opts.flag_style,
            theme: opts.theme,
        };
        let scene = TimelineScene::new(config, x, y, &data, &milestones, measure, START_MESSAGE);
        let driver = AnimationDriver::new(&data, &scene, opts.timing);
        info!(
            points = data.len(),
            milestones = milestones.len(),
            total_length = driver.total_length(),
            "timeline chart ready"
        );
        Self { data, milestones, driver, scene }
    }

    /// Load both CSV files and build the chart.
    pub fn from_csv(
        series_path: impl AsRef<Path>,
        milestones_path: impl AsRef<Path>,
        opts: &TimelineOptions,
    ) -> Result<Self, LoadError> {
        let data = data::load_series(series_path)?;
        let milestones = data::load_milestones(milestones_path)?;
        Ok(Self::new(data, milestones, opts))
    }

    /// One external trigger: advance the driver against the scene. Does not wait for
    /// transitions started by earlier steps.
    pub fn advance(&mut self) -> StepOutcome {
        self.driver.advance(&self.data, &self.milestones, &mut self.scene)
    }

    pub fn tick(&mut self, dt: Duration) { self.scene.tick(dt); }
    pub fn settle(&mut self) { self.scene.settle(); }

    pub fn data(&self) -> &[DataPoint] { &self.data }
    pub fn milestones(&self) -> &[Milestone] { &self.milestones }
    pub fn driver(&self) -> &AnimationDriver { &self.driver }
    pub fn scene(&self) -> &TimelineScene { &self.scene }
    pub fn cursor(&self) -> usize { self.driver.cursor() }
    pub fn is_complete(&self) -> bool { self.driver.is_complete() }
    pub fn status(&self) -> &str { self.scene.status() }

    pub fn to_svg(&self) -> String { self.scene.to_svg() }

    /// Write the current frame as SVG to `path`, creating parent directories.
    pub fn render_to_svg(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())
    }
}
