// File: crates/timeline-demo/src/main.rs
// Summary: Demo loads the score series and milestones, steps through the reveal and writes SVG frames.
//          Optionally renders the usage bar chart and pictogram, or steps interactively on space.

mod interactive;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use timeline_core::data::{load_usage, DEFAULT_PERCENTAGE_COLUMN};
use timeline_core::{
    BarChart, BarChartOptions, Pictogram, PictogramOptions, StepOutcome, TimelineChart, TimelineOptions,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Step-by-step PISA reading timeline with milestone flags
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// score series CSV (Date, Reading)
    #[clap(long, default_value = "data/Finnish_PISA_Reading_Results.csv")]
    series: PathBuf,

    /// milestones CSV (Date, Description)
    #[clap(long, default_value = "data/Milestones.csv")]
    milestones: PathBuf,

    /// usage CSV (Year, percentage column) for the bar chart and pictogram
    #[clap(long)]
    usage: Option<PathBuf>,

    /// name of the percentage column in the usage CSV
    #[clap(long, default_value = DEFAULT_PERCENTAGE_COLUMN)]
    percentage_column: String,

    /// directory for the rendered SVG files
    #[clap(short = 'o', long, default_value = "target/out")]
    out_dir: PathBuf,

    /// number of steps to run in headless mode (defaults to the whole series)
    #[clap(short = 'n', long)]
    steps: Option<usize>,

    /// step with the space bar in the terminal instead of running headless
    #[clap(short = 'i', long)]
    interactive: bool,

    /// surface width in pixels
    #[clap(long, default_value_t = 1200)]
    width: u32,

    /// surface height in pixels
    #[clap(long, default_value_t = 400)]
    height: u32,

    /// colour theme (light, dark)
    #[clap(long, default_value = "light")]
    theme: String,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "timeline_core=info,milestone_timeline=info,warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let opts = TimelineOptions {
        width: cli.width,
        height: cli.height,
        theme: timeline_core::theme::find(&cli.theme),
        ..TimelineOptions::default()
    };
    let mut chart = TimelineChart::from_csv(&cli.series, &cli.milestones, &opts).with_context(|| {
        format!("failed to load '{}' / '{}'", cli.series.display(), cli.milestones.display())
    })?;
    if chart.data().is_empty() {
        warn!("score series is empty; nothing to animate");
    }

    if let Some(usage) = &cli.usage {
        render_usage(usage, &cli.percentage_column, &cli.out_dir)?;
    }

    if cli.interactive {
        return interactive::run(&mut chart, &cli.out_dir);
    }
    run_headless(&mut chart, &cli.out_dir, cli.steps)
}

/// Advance `steps` times (or to completion), writing the settled frame after each step.
fn run_headless(chart: &mut TimelineChart, out_dir: &Path, steps: Option<usize>) -> Result<()> {
    write_frame(chart, &out_dir.join("timeline_00.svg"))?;
    println!("{}", chart.status());

    let steps = steps.unwrap_or_else(|| chart.data().len().saturating_sub(1));
    for step in 1..=steps {
        let outcome = chart.advance();
        chart.settle();
        println!("{}", chart.status());
        if !matches!(outcome, StepOutcome::Advanced { .. }) {
            break;
        }
        write_frame(chart, &out_dir.join(format!("timeline_{step:02}.svg")))?;
    }
    Ok(())
}

pub(crate) fn write_frame(chart: &TimelineChart, path: &Path) -> Result<()> {
    chart
        .render_to_svg(path)
        .with_context(|| format!("writing {}", path.display()))?;
    #[cfg(feature = "png")]
    timeline_core::raster::render_frame_to_png(&chart.scene().frame(), path.with_extension("png"))?;
    info!(path = %path.display(), cursor = chart.cursor(), "wrote frame");
    Ok(())
}

fn render_usage(path: &Path, column: &str, out_dir: &Path) -> Result<()> {
    let rows = load_usage(path, column).with_context(|| format!("failed to load '{}'", path.display()))?;

    let bars = BarChart::new(&rows, BarChartOptions::default());
    let out_bars = out_dir.join("usage_bars.svg");
    bars.render_to_svg(&out_bars).with_context(|| format!("writing {}", out_bars.display()))?;
    println!("Wrote {}", out_bars.display());

    let figures = Pictogram::new(&rows, PictogramOptions::default());
    let out_figures = out_dir.join("usage_figures.svg");
    figures
        .render_to_svg(&out_figures)
        .with_context(|| format!("writing {}", out_figures.display()))?;
    println!("Wrote {}", out_figures.display());
    Ok(())
}
