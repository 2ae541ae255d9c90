// File: crates/timeline-core/src/scale.rs
// Summary: Time (X), value (Y) and band scale transforms from data space to plot pixels.

use chrono::NaiveDate;

/// Continuous date scale mapping a `[start, end]` date domain onto `[left_px, right_px]`.
/// Dates outside the domain extrapolate linearly (no clamping).
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub left_px: f64,
    pub right_px: f64,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, left_px: f64, right_px: f64) -> Self {
        Self { start, end, left_px, right_px }
    }

    /// Build from the extent of `dates`; `None` when `dates` is empty.
    pub fn from_extent<I>(dates: I, left_px: f64, right_px: f64) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut it = dates.into_iter();
        let first = it.next()?;
        let (lo, hi) = it.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self::new(lo, hi, left_px, right_px))
    }

    #[inline]
    pub fn to_px(&self, date: NaiveDate) -> f64 {
        let span = (self.end - self.start).num_days() as f64;
        if span.abs() < 1e-12 {
            // Degenerate domain: everything sits at the middle of the range.
            return (self.left_px + self.right_px) * 0.5;
        }
        let t = (date - self.start).num_days() as f64 / span;
        self.left_px + t * (self.right_px - self.left_px)
    }

    /// January 1st of every year inside the domain, for yearly ticks.
    pub fn year_ticks(&self) -> Vec<NaiveDate> {
        use chrono::Datelike;
        (self.start.year()..=self.end.year())
            .filter_map(|y| NaiveDate::from_ymd_opt(y, 1, 1))
            .filter(|d| *d >= self.start && *d <= self.end)
            .collect()
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f64 {
        let span = self.vmax - self.vmin;
        self.bottom_px - ((y - self.vmin) / span) * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> f64 {
        let span = self.vmax - self.vmin;
        self.vmin + ((self.bottom_px - py) / (self.bottom_px - self.top_px)) * span
    }

    /// Evenly spaced tick values, `count` intervals across the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        let step = (self.vmax - self.vmin) / count as f64;
        (0..=count).map(|i| self.vmin + step * i as f64).collect()
    }
}

/// Ordinal band scale: splits `[0, range_px]` into equal bands with inner/outer padding.
#[derive(Clone, Debug)]
pub struct BandScale<K> {
    pub domain: Vec<K>,
    pub range_px: f64,
    pub padding: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl<K: PartialEq + Clone> BandScale<K> {
    pub fn new(domain: Vec<K>, range_px: f64, padding: f64) -> Self {
        let n = domain.len() as f64;
        let padding = padding.clamp(0.0, 1.0);
        // step * (n - padding + 2 * padding) == range
        let step = if n > 0.0 { range_px / (n - padding + 2.0 * padding).max(1.0) } else { 0.0 };
        let bandwidth = step * (1.0 - padding);
        let offset = step * padding;
        Self { domain, range_px, padding, step, bandwidth, offset }
    }

    /// Left edge of the band for `key`, or `None` if the key is not in the domain.
    pub fn to_px(&self, key: &K) -> Option<f64> {
        let i = self.domain.iter().position(|k| k == key)?;
        Some(self.offset + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 { self.bandwidth }
    pub fn step(&self) -> f64 { self.step }
}
