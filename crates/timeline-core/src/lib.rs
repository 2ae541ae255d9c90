// File: crates/timeline-core/src/lib.rs
// Summary: Core library entry point; exports data loading, layout, animation and SVG rendering APIs.

pub mod animation;
pub mod bar;
pub mod chart;
pub mod data;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pictogram;
pub mod renderer;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod text;
pub mod theme;
pub mod transition;
pub mod types;
#[cfg(feature = "skia")]
pub mod raster;

pub use animation::{AnimationDriver, AnimationState, StepOutcome};
pub use bar::{BarChart, BarChartOptions};
pub use chart::{TimelineChart, TimelineOptions};
pub use data::{DataPoint, Milestone, UsageRow};
pub use error::LoadError;
pub use layout::{layout_milestones, LayoutParams};
pub use pictogram::{Pictogram, PictogramOptions};
pub use renderer::{ElementRef, Renderer};
pub use scene::TimelineScene;
pub use theme::Theme;
