// File: crates/timeline-core/src/raster.rs
// Summary: Headless PNG rasterisation of a timeline frame using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::scene::Frame;
use crate::text::SkiaMeasure;

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Stroke);
    p.set_stroke_width(width);
    p.set_color(color);
    p
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut p = skia::Paint::default();
    p.set_anti_alias(true);
    p.set_style(skia::paint::Style::Fill);
    p.set_color(color);
    p
}

fn draw_text(canvas: &skia::Canvas, shaper: &SkiaMeasure, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
    let p = shaper.layout(text, size, color);
    // Paragraph draws from top-left; shift by an approximate ascent
    p.paint(canvas, (x, y - size * 0.8));
}

/// Render `frame` to PNG bytes.
pub fn render_frame_png(frame: &Frame) -> Result<Vec<u8>> {
    let mut surface = skia::surfaces::raster_n32_premul((frame.width as i32, frame.height as i32))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let shaper = SkiaMeasure::new();
    let t = &frame.theme;
    let canvas = surface.canvas();
    canvas.clear(skia::Color::from(t.background));
    canvas.save();
    canvas.translate((frame.insets.left as f32, frame.insets.top as f32));

    let (pw, ph) = (frame.plot_width as f32, frame.plot_height as f32);
    let axis = stroke(t.axis_line.into(), 1.0);
    canvas.draw_line((0.0, ph), (pw, ph), &axis);
    canvas.draw_line((0.0, 0.0), (0.0, ph), &axis);
    for (px, label) in &frame.x_ticks {
        let x = *px as f32;
        canvas.draw_line((x, ph), (x, ph + 6.0), &axis);
        draw_text(canvas, &shaper, label, x - 12.0, ph + 18.0, 10.0, t.axis_label.into());
    }
    for (py, label) in &frame.y_ticks {
        let y = *py as f32;
        canvas.draw_line((-6.0, y), (0.0, y), &axis);
        let w = shaper.layout(label, 10.0, t.axis_label.into()).max_intrinsic_width();
        draw_text(canvas, &shaper, label, -9.0 - w, y + 3.0, 10.0, t.axis_label.into());
    }

    if frame.points.len() >= 2 {
        let mut path = skia::Path::new();
        path.move_to((frame.points[0].x as f32, frame.points[0].y as f32));
        for p in frame.points.iter().skip(1) {
            path.line_to((p.x as f32, p.y as f32));
        }
        let mut line = stroke(t.line_stroke.into(), 2.0);
        let len = frame.total_length as f32;
        if let Some(effect) = skia::PathEffect::dash(&[len, len], frame.dash_offset as f32) {
            line.set_path_effect(effect);
        }
        canvas.draw_path(&path, &line);
    }

    for (p, o) in frame.points.iter().zip(&frame.point_opacity) {
        let mut dot = fill(t.point_fill.into());
        dot.set_alpha_f(*o as f32);
        canvas.draw_circle((p.x as f32, p.y as f32), frame.point_radius as f32, &dot);
    }

    let s = &frame.flag_style;
    for flag in &frame.flags {
        if flag.opacity <= 0.0 {
            continue;
        }
        let alpha = flag.opacity as f32;
        let x = flag.x as f32;
        let lift = flag.lift as f32;
        let box_h = flag.lines.len() as f32 * s.line_height as f32;

        let mut connector = stroke(t.flag_stroke.into(), 1.0);
        connector.set_alpha_f(alpha);
        canvas.draw_line((x, ph + lift - s.connector_gap as f32), (x, ph), &connector);

        let rect = skia::Rect::from_xywh(x - s.box_width as f32, ph + lift - box_h, s.box_width as f32, box_h);
        let rrect = skia::RRect::new_rect_xy(rect, s.corner_radius as f32, s.corner_radius as f32);
        let mut body = fill(t.flag_fill.into());
        body.set_alpha_f(alpha);
        canvas.draw_rrect(rrect, &body);
        let mut border = stroke(t.flag_stroke.into(), 1.0);
        border.set_alpha_f(alpha);
        canvas.draw_rrect(rrect, &border);

        let mut text_color: skia::Color = t.flag_text.into();
        text_color = text_color.with_a((alpha * 255.0) as u8);
        let tx = x - s.box_width as f32 + s.text_inset as f32;
        for (i, line) in flag.lines.iter().enumerate() {
            let baseline = ph + lift - box_h + (i as f32 + 1.0) * s.line_height as f32 - 3.0;
            draw_text(canvas, &shaper, line, tx, baseline, s.font_size as f32, text_color);
        }
    }

    let status_w = shaper.layout(&frame.status, 12.0, t.axis_label.into()).max_intrinsic_width();
    draw_text(canvas, &shaper, &frame.status, pw - status_w, -6.0, 12.0, t.axis_label.into());
    canvas.restore();

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Render `frame` to a PNG file at `path`, creating parent directories.
pub fn render_frame_to_png(frame: &Frame, path: impl AsRef<std::path::Path>) -> Result<()> {
    let bytes = render_frame_png(frame)?;
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
