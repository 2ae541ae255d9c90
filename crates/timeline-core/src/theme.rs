// File: crates/timeline-core/src/theme.rs
// Summary: Light/Dark palettes for the timeline, bar chart and pictogram output.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` for SVG attributes (alpha goes into separate opacity attributes).
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "skia")]
impl From<Color> for skia_safe::Color {
    fn from(c: Color) -> Self {
        skia_safe::Color::from_argb(c.a, c.r, c.g, c.b)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub line_stroke: Color,
    pub point_fill: Color,
    pub flag_fill: Color,
    pub flag_stroke: Color,
    pub flag_text: Color,
    pub bar_fill: Color,
    pub figure_active: Color,
    pub figure_inactive: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(255, 255, 255),
            axis_line: Color::rgb(0, 0, 0),
            axis_label: Color::rgb(0x34, 0x49, 0x5e),
            line_stroke: Color::rgb(70, 130, 180), // steelblue
            point_fill: Color::rgb(0xe6, 0x3a, 0x20),
            flag_fill: Color::rgb(0xec, 0xf0, 0xf1),
            flag_stroke: Color::rgb(0x34, 0x49, 0x5e),
            flag_text: Color::rgb(0x34, 0x49, 0x5e),
            bar_fill: Color::rgb(0x1e, 0x90, 0xff),
            figure_active: Color::rgb(0x1e, 0x90, 0xff),
            figure_inactive: Color::rgb(0xc3, 0xcf, 0xe2),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            line_stroke: Color::rgb(64, 160, 255),
            point_fill: Color::rgb(255, 110, 80),
            flag_fill: Color::rgb(40, 40, 45),
            flag_stroke: Color::rgb(150, 150, 160),
            flag_text: Color::rgb(235, 235, 245),
            bar_fill: Color::rgb(64, 160, 255),
            figure_active: Color::rgb(64, 160, 255),
            figure_inactive: Color::rgb(60, 66, 80),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::light)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(Theme::light().line_stroke.hex(), "#4682b4");
        assert_eq!(Theme::light().point_fill.hex(), "#e63a20");
    }

    #[test]
    fn find_is_case_insensitive_with_fallback() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("neon").name, "light");
    }
}
