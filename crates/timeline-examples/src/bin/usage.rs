// File: crates/timeline-examples/src/bin/usage.rs
// Summary: Minimal example that renders the usage bar chart and pictogram to SVG.

use timeline_core::{BarChart, BarChartOptions, Pictogram, PictogramOptions, UsageRow};

fn main() {
    let rows: Vec<UsageRow> = [(2012, 61.0), (2014, 88.0), (2016, 97.0), (2018, 99.0), (2020, 100.0)]
        .into_iter()
        .map(|(year, percentage)| UsageRow { year, percentage })
        .collect();

    let out = std::path::PathBuf::from("target/out/example_usage_bars.svg");
    BarChart::new(&rows, BarChartOptions::default())
        .render_to_svg(&out)
        .expect("render bars to svg");
    println!("Wrote {}", out.display());

    let out = std::path::PathBuf::from("target/out/example_usage_figures.svg");
    Pictogram::new(&rows, PictogramOptions::default())
        .render_to_svg(&out)
        .expect("render pictogram to svg");
    println!("Wrote {}", out.display());
}
