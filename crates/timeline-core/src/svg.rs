// File: crates/timeline-core/src/svg.rs
// Summary: Minimal SVG document writer shared by the timeline scene, bar chart and pictogram.

/// Format a coordinate with at most two decimals, trimming trailing zeros.
pub fn num(v: f64) -> String {
    if !v.is_finite() {
        return "NaN".to_string();
    }
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// Escape text content / attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Indenting element writer. Attribute values are escaped, text content too.
pub struct SvgWriter {
    buf: String,
    depth: usize,
}

impl SvgWriter {
    /// Start a document with the root `<svg>` element open.
    pub fn new(width: f64, height: f64) -> Self {
        let mut w = Self { buf: String::new(), depth: 0 };
        w.open(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
                ("width", num(width)),
                ("height", num(height)),
                ("viewBox", format!("0 0 {} {}", num(width), num(height))),
            ],
        );
        w
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn tag(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.buf.push('<');
        self.buf.push_str(name);
        for (k, v) in attrs {
            self.buf.push_str(&format!(" {}=\"{}\"", k, escape(v)));
        }
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.indent();
        self.tag(name, attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    pub fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str(&format!("</{}>\n", name));
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.indent();
        self.tag(name, attrs);
        self.buf.push_str("/>\n");
    }

    pub fn text(&mut self, name: &str, attrs: &[(&str, String)], content: &str) {
        self.indent();
        self.tag(name, attrs);
        self.buf.push_str(&format!(">{}</{}>\n", escape(content), name));
    }

    /// Close the root element and return the document.
    pub fn finish(mut self) -> String {
        self.close("svg");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_trims() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.5), "1.5");
        assert_eq!(num(1.256), "1.26");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f64::NAN), "NaN");
    }

    #[test]
    fn escape_markup() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn writer_nests_and_closes() {
        let mut w = SvgWriter::new(10.0, 20.0);
        w.open("g", &[("id", "x".into())]);
        w.empty("circle", &[("r", num(3.0))]);
        w.text("text", &[], "R&D");
        w.close("g");
        let doc = w.finish();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"20\""));
        assert!(doc.contains("    <circle r=\"3\"/>\n"));
        assert!(doc.contains("<text>R&amp;D</text>"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
