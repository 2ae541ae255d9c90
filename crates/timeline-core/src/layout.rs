// File: crates/timeline-core/src/layout.rs
// Summary: Milestone flag layout; stacks flags that fall close together on the time axis.

use chrono::NaiveDate;

use crate::data::Milestone;

/// Offset of a lone flag above the axis baseline, in pixels (negative is up).
pub const BASE_OFFSET: f64 = -30.0;
/// Extra lift applied to each flag stacked on top of its predecessor.
pub const STACK_STEP: f64 = 20.0;
/// Horizontal distance below which two consecutive flags are considered overlapping.
pub const PROXIMITY_THRESHOLD: f64 = 100.0;
/// Space kept free between the highest flag and the top of the track.
pub const TOP_MARGIN: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub base_offset: f64,
    pub stack_step: f64,
    pub proximity_threshold: f64,
    pub top_margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            base_offset: BASE_OFFSET,
            stack_step: STACK_STEP,
            proximity_threshold: PROXIMITY_THRESHOLD,
            top_margin: TOP_MARGIN,
        }
    }
}

impl LayoutParams {
    /// Lowest (most negative) offset allowed for a track of `track_height` pixels.
    /// Never above `base_offset`, so flags never end up below the baseline.
    pub fn floor(&self, track_height: f64) -> f64 {
        (-(track_height - self.top_margin)).min(self.base_offset)
    }
}

/// Assign `vertical_offset` to each milestone. `milestones` must be sorted by date.
///
/// Each flag is compared with its immediate predecessor only: a run of close flags
/// climbs by `stack_step` per flag, a distant flag drops back to `base_offset`.
/// The running offset is not clamped; only the value written to a milestone is.
pub fn layout_milestones<F>(milestones: &mut [Milestone], x_of: F, track_height: f64, params: &LayoutParams)
where
    F: Fn(NaiveDate) -> f64,
{
    let floor = params.floor(track_height);
    let mut running = params.base_offset;
    let mut prev_x: Option<f64> = None;
    for m in milestones.iter_mut() {
        let x = x_of(m.date);
        if let Some(px) = prev_x {
            if (x - px).abs() < params.proximity_threshold {
                running -= params.stack_step;
            } else {
                running = params.base_offset;
            }
        }
        m.vertical_offset = running.max(floor);
        prev_x = Some(x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(days: &[i64]) -> Vec<Milestone> {
        let origin = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        days.iter()
            .map(|d| Milestone::new(origin + chrono::Duration::days(*d), "m"))
            .collect()
    }

    // one pixel per day since 2000-01-01
    fn x(d: NaiveDate) -> f64 {
        (d - NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).num_days() as f64
    }

    fn offsets(m: &[Milestone]) -> Vec<f64> {
        m.iter().map(|m| m.vertical_offset).collect()
    }

    #[test]
    fn single_milestone_gets_base_offset() {
        let mut m = ms(&[10]);
        layout_milestones(&mut m, x, 350.0, &LayoutParams::default());
        assert_eq!(offsets(&m), vec![-30.0]);
    }

    #[test]
    fn close_flags_stack_and_distant_flags_reset() {
        let mut m = ms(&[0, 50, 99, 400, 400]);
        layout_milestones(&mut m, x, 350.0, &LayoutParams::default());
        assert_eq!(offsets(&m), vec![-30.0, -50.0, -70.0, -30.0, -50.0]);
    }

    #[test]
    fn exactly_threshold_apart_resets() {
        let mut m = ms(&[0, 100]);
        layout_milestones(&mut m, x, 350.0, &LayoutParams::default());
        assert_eq!(offsets(&m), vec![-30.0, -30.0]);
    }

    #[test]
    fn only_immediate_predecessor_is_compared() {
        // 120 is far from 0 so it resets, even though its box would reach back over the first flag
        let mut m = ms(&[0, 120, 200]);
        layout_milestones(&mut m, x, 350.0, &LayoutParams::default());
        assert_eq!(offsets(&m), vec![-30.0, -30.0, -50.0]);
    }

    #[test]
    fn offsets_are_clamped_to_track() {
        let mut m = ms(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let h = 150.0;
        layout_milestones(&mut m, x, h, &LayoutParams::default());
        for o in offsets(&m) {
            assert!(o <= -30.0 && o >= -(h - 50.0), "offset {o} out of bounds");
        }
        assert_eq!(m[9].vertical_offset, -100.0);
    }

    #[test]
    fn running_offset_keeps_climbing_under_the_clamp() {
        // clamp only bounds what is assigned; a reset still goes back to base
        let mut m = ms(&[0, 1, 2, 3, 4, 5, 500]);
        layout_milestones(&mut m, x, 100.0, &LayoutParams::default());
        assert_eq!(offsets(&m), vec![-30.0, -50.0, -50.0, -50.0, -50.0, -50.0, -30.0]);
    }

    #[test]
    fn tiny_track_never_pushes_flags_below_baseline() {
        let mut m = ms(&[0, 1]);
        layout_milestones(&mut m, x, 40.0, &LayoutParams::default());
        assert!(offsets(&m).iter().all(|o| *o <= -30.0));
    }
}
