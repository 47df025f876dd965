use cairo::Context;
use standkit::Argb;
use standkit::canvas::{ArcPath, Canvas, Font, FontWeight, Paint, Path, TextMetrics};
use standkit::geometry::{Point, Rect};
use std::f64::consts::{FRAC_PI_2, PI};

const FONT_FAMILY: &str = "Sans";

/// Draws on a cairo context. Every call leaves the context state as it found it.
pub struct CairoCanvas<'a> {
    cr: &'a Context,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_color(&self, color: Argb) {
        let (r, g, b, a) = color.to_srgba().into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }

    fn set_font(&self, font: &Font) {
        let weight = match font.weight {
            FontWeight::Normal => cairo::FontWeight::Normal,
            FontWeight::Bold => cairo::FontWeight::Bold,
        };
        self.cr
            .select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, weight);
        self.cr.set_font_size(font.size);
    }

    fn stroke_with(&self, paint: &Paint) -> Result<(), cairo::Error> {
        self.set_color(paint.color);
        self.cr.set_line_width(paint.stroke_width);
        self.cr.stroke()
    }

    fn fill_with(&self, paint: &Paint) -> Result<(), cairo::Error> {
        self.set_color(paint.color);
        self.cr.fill()
    }
}

impl Canvas for CairoCanvas<'_> {
    type Error = cairo::Error;

    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), Self::Error> {
        self.cr.new_sub_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.stroke_with(paint)
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) -> Result<(), Self::Error> {
        self.cr.new_sub_path();
        self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        self.fill_with(paint)
    }

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_degrees: f64,
        sweep_degrees: f64,
        paint: &Paint,
    ) -> Result<(), Self::Error> {
        let start = start_degrees.to_radians();
        let end = (start_degrees + sweep_degrees).to_radians();
        self.cr.new_sub_path();
        if sweep_degrees >= 0.0 {
            self.cr.arc(center.x, center.y, radius, start, end);
        } else {
            self.cr.arc_negative(center.x, center.y, radius, start, end);
        }
        self.stroke_with(paint)
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) -> Result<(), Self::Error> {
        self.cr.move_to(from.x, from.y);
        self.cr.line_to(to.x, to.y);
        self.stroke_with(paint)
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Self::Error> {
        self.cr
            .rectangle(rect.left, rect.top, rect.width(), rect.height());
        self.fill_with(paint)
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) -> Result<(), Self::Error> {
        let mut points = path.points().iter();
        let Some(first) = points.next() else {
            return Ok(());
        };
        self.cr.move_to(first.x, first.y);
        for p in points {
            self.cr.line_to(p.x, p.y);
        }
        if path.is_closed() {
            self.cr.close_path();
        }
        self.fill_with(paint)
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> TextMetrics {
        self.set_font(font);
        match self.cr.text_extents(text) {
            Ok(ext) => TextMetrics {
                width: ext.x_advance(),
                height: ext.height(),
            },
            Err(e) => {
                log::warn!("Failed to measure '{}': {}", text, e);
                TextMetrics::default()
            }
        }
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        paint: &Paint,
    ) -> Result<(), Self::Error> {
        self.set_font(font);
        self.set_color(paint.color);
        self.cr.move_to(origin.x, origin.y);
        self.cr.show_text(text)
    }

    /// Places one glyph at a time, each rotated to the tangent at its middle.
    fn fill_text_on_arc(
        &mut self,
        text: &str,
        arc: &ArcPath,
        font: &Font,
        paint: &Paint,
    ) -> Result<(), Self::Error> {
        if arc.radius <= 0.0 {
            return Ok(());
        }
        self.set_font(font);
        self.set_color(paint.color);

        let direction = if arc.sweep_degrees < 0.0 { -1.0 } else { 1.0 };
        let mut travelled = 0.0;
        let mut buf = [0u8; 4];

        for c in text.chars() {
            let glyph: &str = c.encode_utf8(&mut buf);
            let advance = self.cr.text_extents(glyph)?.x_advance();

            let angle = arc.start_degrees.to_radians()
                + direction * (travelled + advance / 2.0) / arc.radius;
            let x = arc.center.x + arc.radius * angle.cos();
            let y = arc.center.y + arc.radius * angle.sin();

            self.cr.save()?;
            self.cr.translate(x, y);
            self.cr.rotate(angle + direction * FRAC_PI_2);
            self.cr.move_to(-advance / 2.0, 0.0);
            self.cr.show_text(glyph)?;
            self.cr.restore()?;

            travelled += advance;
        }
        Ok(())
    }
}
