//! The drawing surface the renderers talk to.
//!
//! Front ends implement [`Canvas`] for their 2D backend. Angles are degrees,
//! 0° to the right, positive sweeps clockwise on screen.

use crate::color::Argb;
use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Argb,
    pub stroke_width: f64,
}

impl Paint {
    pub fn fill(color: Argb) -> Self {
        Self {
            color,
            stroke_width: 0.0,
        }
    }

    pub fn stroke(color: Argb, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub weight: FontWeight,
}

impl Font {
    pub fn normal(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
        }
    }

    pub fn bold(size: f64) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Horizontal advance of the whole string.
    pub width: f64,
    /// Height of the inked glyph bounds.
    pub height: f64,
}

/// A circular arc used as a text baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center: Point,
    pub radius: f64,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
}

/// A reusable polygon buffer. Renderers keep one per instance and
/// [`rewind`](Path::rewind) it before every use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rewind(&mut self) {
        self.points.clear();
        self.closed = false;
    }

    /// Starts the contour on the first call, extends it afterwards.
    pub fn line_to_or_move(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

pub trait Canvas {
    type Error;

    fn stroke_circle(&mut self, center: Point, radius: f64, paint: &Paint)
    -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint)
    -> Result<(), Self::Error>;

    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_degrees: f64,
        sweep_degrees: f64,
        paint: &Paint,
    ) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<(), Self::Error>;

    fn fill_path(&mut self, path: &Path, paint: &Paint) -> Result<(), Self::Error>;

    fn measure_text(&mut self, text: &str, font: &Font) -> TextMetrics;

    /// Draws `text` with its baseline starting at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        paint: &Paint,
    ) -> Result<(), Self::Error>;

    /// Lays `text` along `arc` in the sweep direction. The baseline follows
    /// the arc and glyph tops face left of the travel direction.
    fn fill_text_on_arc(
        &mut self,
        text: &str,
        arc: &ArcPath,
        font: &Font,
        paint: &Paint,
    ) -> Result<(), Self::Error>;
}
