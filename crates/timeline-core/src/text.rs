// File: crates/timeline-core/src/text.rs
// Summary: Text measurement and greedy word wrapping for milestone flag labels.

/// Measures the rendered width of a string, in pixels.
pub trait TextMeasure {
    fn measure_width(&self, text: &str, font_size: f64) -> f64;
}

/// Font-free measurer using per-glyph advance estimates for a proportional sans-serif face.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

impl ApproxMeasure {
    fn advance_em(c: char) -> f64 {
        match c {
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 0.25,
            ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '-' => 0.33,
            'm' | 'w' | 'M' | 'W' => 0.83,
            '0'..='9' => 0.56,
            c if c.is_uppercase() => 0.67,
            _ => 0.5,
        }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(Self::advance_em).sum::<f64>() * font_size
    }
}

/// Break `text` into lines no wider than `max_width` (except single over-long words).
///
/// Words are separated by single spaces; each candidate line is measured with its
/// trailing space, a line is only broken once it already holds a word.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, max_width: f64, font_size: f64, measure: &M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = format!("{line}{word} ");
        if measure.measure_width(&candidate, font_size) > max_width && !line.is_empty() {
            lines.push(line.trim().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line.trim().to_string());
    }
    lines
}

#[cfg(feature = "skia")]
pub use skia_text::SkiaMeasure;

#[cfg(feature = "skia")]
mod skia_text {
    use skia_safe as skia;
    use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

    /// Skia textlayout-backed measurer using the system font manager.
    pub struct SkiaMeasure {
        fonts: FontCollection,
    }

    impl SkiaMeasure {
        pub fn new() -> Self {
            let mut fc = FontCollection::new();
            fc.set_default_font_manager(skia::FontMgr::default(), None);
            Self { fonts: fc }
        }

        pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
            let mut pstyle = ParagraphStyle::new();
            pstyle.set_text_align(skia::textlayout::TextAlign::Left);
            let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
            let mut style = TextStyle::new();
            style.set_font_size(size.max(1.0));
            style.set_color(color);
            style.set_font_families(&["Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"]);
            builder.push_style(&style);
            builder.add_text(text);
            let mut paragraph = builder.build();
            paragraph.layout(10_000.0);
            paragraph
        }
    }

    impl Default for SkiaMeasure {
        fn default() -> Self { Self::new() }
    }

    impl super::TextMeasure for SkiaMeasure {
        fn measure_width(&self, text: &str, font_size: f64) -> f64 {
            // max_intrinsic_width keeps trailing spaces, longest_line does not
            let p = self.layout(text, font_size as f32, skia::Color::TRANSPARENT);
            p.max_intrinsic_width() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is exactly `font_size` wide.
    struct Mono;
    impl TextMeasure for Mono {
        fn measure_width(&self, text: &str, font_size: f64) -> f64 {
            text.chars().count() as f64 * font_size
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // "aaa bbb " is 8 chars -> 80px, fits in 80; adding "ccc " overflows
        let lines = wrap_text("aaa bbb ccc", 80.0, 10.0, &Mono);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn long_word_stays_on_its_own_line() {
        let lines = wrap_text("supercalifragilistic x", 50.0, 10.0, &Mono);
        assert_eq!(lines, vec!["supercalifragilistic", "x"]);
    }

    #[test]
    fn short_text_is_single_line() {
        assert_eq!(wrap_text("Hello", 140.0, 10.0, &ApproxMeasure), vec!["Hello"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", 140.0, 10.0, &ApproxMeasure), vec![""]);
    }

    #[test]
    fn approx_measure_scales_with_font_size() {
        let a = ApproxMeasure.measure_width("Milestone", 10.0);
        let b = ApproxMeasure.measure_width("Milestone", 20.0);
        assert!((b - 2.0 * a).abs() < 1e-9);
        assert!(ApproxMeasure.measure_width("WWW", 10.0) > ApproxMeasure.measure_width("iii", 10.0));
    }

    #[test]
    fn realistic_description_wraps_within_width() {
        let text = "Finland introduces a new national core curriculum for basic education";
        let lines = wrap_text(text, 140.0, 10.0, &ApproxMeasure);
        assert!(lines.len() > 1);
        for l in &lines {
            assert!(ApproxMeasure.measure_width(l, 10.0) <= 140.0, "line too wide: {l}");
        }
        assert_eq!(lines.join(" "), text);
    }
}
