// File: crates/timeline-core/tests/scenario.rs
// Purpose: Step-by-step behaviour of the reveal driver against a recording renderer and the SVG scene.

use std::time::Duration;

use chrono::NaiveDate;
use timeline_core::animation::{StepTiming, COMPLETE_MESSAGE};
use timeline_core::renderer::{RecordingRenderer, RenderCommand};
use timeline_core::{
    AnimationDriver, DataPoint, ElementRef, Milestone, StepOutcome, TimelineChart, TimelineOptions,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn point(y: i32, score: f64) -> DataPoint {
    DataPoint { date: d(y, 1, 1), score }
}

#[test]
fn milestone_between_two_points_is_shown_by_the_crossing_step() {
    let data = vec![point(2000, 530.0), point(2003, 525.0)];
    let milestones = vec![Milestone::new(d(2001, 6, 1), "between")];
    let mut r = RecordingRenderer::new(|date: NaiveDate| (date - d(2000, 1, 1)).num_days() as f64, |s: f64| s);
    let mut drv = AnimationDriver::new(&data, &r, StepTiming::default());

    let out = drv.advance(&data, &milestones, &mut r);
    match out {
        StepOutcome::Advanced { from, to, shown, hidden, .. } => {
            assert_eq!((from, to), (0, 1));
            assert_eq!(shown, vec![0]);
            assert!(hidden.is_empty());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(r.commands.contains(&RenderCommand::FadeIn {
        element: ElementRef::Milestone(0),
        duration: Duration::from_millis(1000),
    }));
    assert!(drv.is_complete());
}

#[test]
fn milestone_flashes_for_one_step_then_hides() {
    let data = vec![point(2000, 530.0), point(2003, 525.0), point(2006, 520.0)];
    let milestones = vec![Milestone::new(d(2001, 6, 1), "between")];
    let mut chart = TimelineChart::new(data, milestones, &TimelineOptions::default());

    chart.advance();
    chart.settle();
    assert_eq!(chart.scene().visible_milestones(), vec![0]);
    assert_eq!(chart.scene().lift(0), chart.milestones()[0].vertical_offset);

    chart.advance();
    chart.settle();
    assert!(chart.scene().visible_milestones().is_empty());
}

#[test]
fn n_minus_one_steps_reach_the_end() {
    let data: Vec<DataPoint> = (0..6).map(|i| point(2000 + 3 * i, 500.0 + i as f64)).collect();
    let n = data.len();
    let mut chart = TimelineChart::new(data, vec![], &TimelineOptions::default());

    for step in 1..n {
        assert!(matches!(chart.advance(), StepOutcome::Advanced { to, .. } if to == step));
    }
    assert_eq!(chart.cursor(), n - 1);
    assert!(chart.is_complete());

    for _ in 0..3 {
        assert_eq!(chart.advance(), StepOutcome::Complete);
        assert_eq!(chart.cursor(), n - 1);
        assert_eq!(chart.status(), COMPLETE_MESSAGE);
    }
}

#[test]
fn rapid_triggers_interrupt_running_transitions() {
    let data = vec![point(2000, 546.0), point(2003, 543.0), point(2006, 547.0)];
    let mut chart = TimelineChart::new(data, vec![], &TimelineOptions::default());
    let total = chart.driver().total_length();

    chart.advance();
    chart.tick(Duration::from_millis(300));
    let mid = chart.scene().dash_offset();
    assert!(mid < total && mid > chart.driver().reveal_target(1));

    // second trigger before the first transition settles is processed immediately
    assert!(matches!(chart.advance(), StepOutcome::Advanced { to: 2, .. }));
    assert_eq!(chart.status(), "Pisa results for 2006: 547");
    assert!((chart.scene().dash_offset() - mid).abs() < 1e-9);

    chart.settle();
    assert!(chart.scene().dash_offset().abs() < 1e-9);
    assert_eq!(chart.scene().opacity(ElementRef::Point(1)), 1.0);
    assert_eq!(chart.scene().opacity(ElementRef::Point(2)), 1.0);
}

#[test]
fn close_milestones_stack_and_far_ones_reset() {
    let data = vec![point(2000, 500.0), point(2020, 500.0)];
    // 20 years over 1130px: ~56px per year
    let milestones = vec![
        Milestone::new(d(2002, 1, 1), "a"),
        Milestone::new(d(2002, 6, 1), "b"),
        Milestone::new(d(2003, 1, 1), "c"),
        Milestone::new(d(2010, 1, 1), "d"),
    ];
    let chart = TimelineChart::new(data, milestones, &TimelineOptions::default());
    let offsets: Vec<f64> = chart.milestones().iter().map(|m| m.vertical_offset).collect();
    assert_eq!(offsets, vec![-30.0, -50.0, -70.0, -30.0]);
    assert!(offsets[1] < offsets[0]);
}

#[test]
fn cumulative_lengths_start_at_zero_and_grow() {
    let data: Vec<DataPoint> = [546.0, 543.0, 547.0, 536.0, 524.0, 526.0, 520.0, 490.0]
        .iter()
        .enumerate()
        .map(|(i, s)| point(2000 + 3 * i as i32, *s))
        .collect();
    let chart = TimelineChart::new(data, vec![], &TimelineOptions::default());
    let c = chart.driver().cumulative_lengths();
    assert_eq!(c[0], 0.0);
    assert!(c.windows(2).all(|w| w[1] >= w[0]));
    assert!((c[c.len() - 1] - chart.driver().total_length()).abs() < 1e-9);
}
