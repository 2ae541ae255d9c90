// File: crates/timeline-core/src/types.rs
// Summary: Shared types and constants (sizes, margins).

/// Default timeline surface width in pixels (including margins).
pub const WIDTH: u32 = 1200;
/// Default timeline surface height in pixels (including margins).
pub const HEIGHT: u32 = 400;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Plot area left after removing the insets from a `width` x `height` surface.
    pub fn inner(&self, width: u32, height: u32) -> (f64, f64) {
        (
            width.saturating_sub(self.hsum()) as f64,
            height.saturating_sub(self.vsum()) as f64,
        )
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(40, 30, 20, 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_inner_area_matches_timeline_plot() {
        let (w, h) = Insets::default().inner(WIDTH, HEIGHT);
        assert_eq!(w, 1130.0);
        assert_eq!(h, 350.0);
    }

    #[test]
    fn inner_saturates_on_tiny_surfaces() {
        let (w, h) = Insets::new(100, 100, 100, 100).inner(50, 50);
        assert_eq!((w, h), (0.0, 0.0));
    }
}
