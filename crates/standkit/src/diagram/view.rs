use super::{
    BIG_BORDER_NOTCH_ANGLE, BIG_BORDER_NOTCH_COUNT, POLYGON_ALPHA, SMALL_BORDER_NOTCH_ANGLE,
    SMALL_BORDER_NOTCH_COUNT,
};
use crate::canvas::{ArcPath, Canvas, Font, Paint, Path};
use crate::color::Argb;
use crate::geometry::{Point, arc_degrees};
use crate::layout::DiagramLayout;
use crate::rating::{CategoryName, RatingLevel, Ratings};
use strum::{EnumCount, IntoEnumIterator};

pub(crate) struct DiagramRenderer<'a> {
    layout: &'a DiagramLayout,
    ratings: &'a Ratings,
    marks: &'a [f64],
    fill_color: Argb,
    ink: Argb,
}

impl<'a> DiagramRenderer<'a> {
    pub(crate) fn new(
        layout: &'a DiagramLayout,
        ratings: &'a Ratings,
        marks: &'a [f64],
        fill_color: Argb,
        ink: Argb,
    ) -> Self {
        Self {
            layout,
            ratings,
            marks,
            fill_color,
            ink,
        }
    }

    pub(crate) fn draw<C: Canvas>(&self, cr: &mut C, polygon: &mut Path) -> Result<(), C::Error> {
        if self.layout.is_degenerate() {
            return Ok(());
        }

        self.draw_border_circles(cr)?;
        self.draw_border_notches(cr)?;
        self.draw_stats_circle(cr)?;
        self.draw_axes(cr)?;
        self.draw_rating_legend(cr)?;
        self.draw_category_labels(cr)?;
        self.draw_rating_letters(cr)?;
        self.draw_rating_polygon(cr, polygon)
    }

    fn draw_border_circles<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        cr.stroke_circle(
            l.center,
            l.outer_radius,
            &Paint::stroke(self.ink, l.outer_border_stroke),
        )?;
        cr.stroke_circle(
            l.center,
            l.inner_radius,
            &Paint::stroke(self.ink, l.inner_border_stroke),
        )
    }

    fn draw_border_notches<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        let paint = Paint::stroke(self.ink, l.border_notch_stroke);

        let big_start = 270.0 - BIG_BORDER_NOTCH_ANGLE / 2.0;
        let big_step = 360.0 / BIG_BORDER_NOTCH_COUNT as f64;
        for i in 0..BIG_BORDER_NOTCH_COUNT {
            cr.stroke_arc(
                l.center,
                l.border_notch_arc_radius,
                big_start + i as f64 * big_step,
                BIG_BORDER_NOTCH_ANGLE,
                &paint,
            )?;
        }

        // each half of the ring, between the two big notches
        let per_half = SMALL_BORDER_NOTCH_COUNT / 2;
        let spacing = (180.0 - BIG_BORDER_NOTCH_ANGLE) / (per_half + 1) as f64;
        let small_start =
            270.0 + (BIG_BORDER_NOTCH_ANGLE - SMALL_BORDER_NOTCH_ANGLE) / 2.0 + spacing;
        for i in 0..per_half {
            let start = small_start + i as f64 * spacing;
            for half in [0.0, 180.0] {
                cr.stroke_arc(
                    l.center,
                    l.border_notch_arc_radius,
                    start + half,
                    SMALL_BORDER_NOTCH_ANGLE,
                    &paint,
                )?;
            }
        }
        Ok(())
    }

    fn draw_stats_circle<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        cr.stroke_circle(
            l.center,
            l.stats_circle_radius,
            &Paint::stroke(self.ink, l.stats_line_stroke),
        )
    }

    /// Spokes plus a perpendicular tick at every letter-rating radius.
    fn draw_axes<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        let paint = Paint::stroke(self.ink, l.stats_line_stroke);
        let half_notch = l.rating_notch_len / 2.0;

        for i in 0..CategoryName::COUNT {
            let angle = l.axis_angle(i);
            let edge = Point::on_circle(l.center, l.stats_circle_radius, angle);
            cr.stroke_line(l.center, edge, &paint)?;

            for step in 1..=RatingLevel::LETTERS.len() {
                let on_axis = Point::on_circle(
                    l.center,
                    l.space_between_rating_levels * step as f64,
                    angle,
                );
                cr.stroke_line(
                    Point::on_circle(on_axis, half_notch, angle - 90.0),
                    Point::on_circle(on_axis, half_notch, angle + 90.0),
                    &paint,
                )?;
            }
        }
        Ok(())
    }

    /// E..A next to the ticks of the top axis, innermost first.
    fn draw_rating_legend<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        let font = Font::bold(l.space_between_rating_levels);
        let paint = Paint::fill(self.ink);
        let x = l.rating_notch_right + l.rating_notch_len / 2.0;

        for (j, level) in RatingLevel::LETTERS.iter().enumerate() {
            let y = l.center.y - l.space_between_rating_levels * (j + 1) as f64;
            cr.fill_text(
                level.glyph(),
                Point::new(x, y + l.stats_line_stroke / 2.0),
                &font,
                &paint,
            )?;
        }
        Ok(())
    }

    /// Category names curved along the ring. The first half of the list reads
    /// clockwise on the label circle; the second half reads counter-clockwise
    /// one text height further out so both halves sit in the same band.
    fn draw_category_labels<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        let font = Font::bold(l.category_label_text_size);
        let paint = Paint::fill(self.ink);

        for category in CategoryName::iter() {
            let i = category.index();
            let name = category.label();
            let metrics = cr.measure_text(name, &font);
            let text_arc = arc_degrees(metrics.width, l.category_label_arc_radius);

            let (radius, sweep) = if i < CategoryName::COUNT / 2 {
                (l.category_label_arc_radius, text_arc)
            } else {
                (l.category_label_arc_radius + metrics.height, -text_arc)
            };

            let arc = ArcPath {
                center: l.center,
                radius,
                start_degrees: l.axis_angle(i) - sweep / 2.0,
                sweep_degrees: sweep,
            };
            cr.fill_text_on_arc(name, &arc, &font, &paint)?;
        }
        Ok(())
    }

    fn draw_rating_letters<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let l = self.layout;
        let font = Font::normal(l.category_label_text_size);
        let paint = Paint::fill(self.ink);

        for (category, level) in self.ratings.entries() {
            let glyph = level.glyph();
            let metrics = cr.measure_text(glyph, &font);
            let anchor = Point::on_circle(
                l.center,
                l.rating_letter_circle_radius,
                l.axis_angle(category.index()),
            );
            cr.fill_text(
                glyph,
                anchor.offset(-metrics.width / 2.0, metrics.height / 2.0),
                &font,
                &paint,
            )?;
        }
        Ok(())
    }

    fn draw_rating_polygon<C: Canvas>(&self, cr: &mut C, polygon: &mut Path) -> Result<(), C::Error> {
        let l = self.layout;
        polygon.rewind();

        for (i, mark) in self.marks.iter().enumerate() {
            let radius = l.space_between_rating_levels * mark;
            polygon.line_to_or_move(Point::on_circle(l.center, radius, l.axis_angle(i)));
        }
        polygon.close();

        cr.fill_path(polygon, &Paint::fill(self.fill_color.with_alpha(POLYGON_ALPHA)))
    }
}
