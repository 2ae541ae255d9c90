// File: crates/timeline-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math (points, polyline arc lengths).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Running arc length along the polyline through `points`.
/// `out[0] == 0.0` and `out[i]` is the length from `points[0]` to `points[i]`.
pub fn cumulative_lengths(points: &[Point]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    let mut acc = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            acc += points[i - 1].distance(p);
        }
        out.push(acc);
    }
    out
}

/// Total length of the polyline through `points`.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_starts_at_zero_and_accumulates() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
        let c = cumulative_lengths(&pts);
        assert_eq!(c, vec![0.0, 5.0, 11.0]);
        assert_eq!(polyline_length(&pts), 11.0);
    }

    #[test]
    fn cumulative_is_non_decreasing() {
        let pts: Vec<Point> = (0..50)
            .map(|i| Point::new(i as f64 * 7.0, ((i * 37) % 11) as f64 * 13.0))
            .collect();
        let c = cumulative_lengths(&pts);
        assert_eq!(c[0], 0.0);
        assert!(c.windows(2).all(|w| w[1] >= w[0]));
        assert!((c[c.len() - 1] - polyline_length(&pts)).abs() < 1e-9);
    }

    #[test]
    fn empty_and_single_point_paths() {
        assert!(cumulative_lengths(&[]).is_empty());
        assert_eq!(cumulative_lengths(&[Point::new(1.0, 1.0)]), vec![0.0]);
        assert_eq!(polyline_length(&[Point::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }
}
