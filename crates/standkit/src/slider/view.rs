use super::model::DiscreteSliderBar;
use crate::canvas::{Canvas, Font, Paint};
use crate::color::Argb;
use crate::geometry::{Insets, Point, Rect};
use crate::rating::RatingLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    pub bar_height: f64,
    pub thumb_radius: f64,
    pub notch_radius: f64,
    pub text_size: f64,
    /// Gap between the tallest bar element and the glyph row.
    pub text_offset: f64,
    pub padding: Insets,
    pub unselected: Argb,
    pub selected: Argb,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            bar_height: 4.0,
            thumb_radius: 10.0,
            notch_radius: 5.0,
            text_size: 14.0,
            text_offset: 6.0,
            padding: Insets::default(),
            unselected: Argb::new(0xFFBD_BDBD),
            selected: Argb::BLACK,
        }
    }
}

impl SliderStyle {
    /// Height of the bar row: whichever of thumb, notch or bar is tallest.
    pub fn occupied_height(&self) -> f64 {
        (2.0 * self.thumb_radius)
            .max(2.0 * self.notch_radius)
            .max(self.bar_height)
    }

    pub fn preferred_height(&self) -> f64 {
        self.occupied_height()
            + self.text_offset
            + self.text_size
            + self.padding.top
            + self.padding.bottom
    }
}

/// Where the bar and the glyph row go inside a given widget size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderMetrics {
    pub track: Rect,
    pub notch_spacing: f64,
    pub text_top: f64,
}

impl SliderMetrics {
    pub fn measure<C: Canvas>(
        cr: &mut C,
        style: &SliderStyle,
        levels: &[RatingLevel],
        width: f64,
        height: f64,
    ) -> Self {
        let font = Font::bold(style.text_size);
        let half_glyph = levels
            .iter()
            .map(|level| cr.measure_text(level.glyph(), &font).width / 2.0)
            .fold(0.0, f64::max);
        let side = style.thumb_radius.max(style.notch_radius).max(half_glyph);

        let pad = style.padding;
        let left = pad.left + side;
        let right = (width - pad.right - side).max(left);

        // bar sits centered in whatever is left above the glyph row
        let free = height - pad.top - pad.bottom - style.text_size - style.text_offset;
        let top = pad.top + ((free - style.bar_height) / 2.0).max(0.0);
        let track = Rect::new(left, top, right, top + style.bar_height);

        let notch_spacing = match levels.len() {
            0 | 1 => 0.0,
            n => track.width() / (n - 1) as f64,
        };

        Self {
            track,
            notch_spacing,
            text_top: pad.top + style.occupied_height() + style.text_offset,
        }
    }

    pub fn notch_x(&self, index: usize) -> f64 {
        self.track.left + self.notch_spacing * index as f64
    }
}

pub(crate) struct SliderRenderer<'a> {
    bar: &'a DiscreteSliderBar,
    metrics: &'a SliderMetrics,
}

impl<'a> SliderRenderer<'a> {
    pub(crate) fn new(bar: &'a DiscreteSliderBar, metrics: &'a SliderMetrics) -> Self {
        Self { bar, metrics }
    }

    fn thumb_x(&self) -> f64 {
        let track = self.metrics.track;
        track.left + self.bar.position() * track.width()
    }

    pub(crate) fn draw<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let style = self.bar.style();
        let track = self.metrics.track;
        let thumb_x = self.thumb_x();
        let selected = Paint::fill(style.selected);
        let unselected = Paint::fill(style.unselected);

        cr.fill_rect(track, &unselected)?;
        cr.fill_rect(track.with_right(thumb_x), &selected)?;

        let cy = track.center_y();
        for i in 0..self.bar.levels().len() {
            let x = self.metrics.notch_x(i);
            let paint = if x > thumb_x { &unselected } else { &selected };
            cr.fill_circle(Point::new(x, cy), style.notch_radius, paint)?;
        }

        cr.fill_circle(Point::new(thumb_x, cy), style.thumb_radius, &selected)?;
        self.draw_glyphs(cr)
    }

    fn draw_glyphs<C: Canvas>(&self, cr: &mut C) -> Result<(), C::Error> {
        let style = self.bar.style();
        let current = self.bar.preview_index();

        for (i, level) in self.bar.levels().iter().enumerate() {
            let (font, paint) = if i == current {
                (Font::bold(style.text_size), Paint::fill(style.selected))
            } else {
                (Font::normal(style.text_size), Paint::fill(style.unselected))
            };
            let glyph = level.glyph();
            let size = cr.measure_text(glyph, &font);
            let origin = Point::new(
                self.metrics.notch_x(i) - size.width / 2.0,
                self.metrics.text_top + (style.text_size + size.height) / 2.0,
            );
            cr.fill_text(glyph, origin, &font, &paint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FontWeight;
    use crate::canvas::recording::{Command, RecordingCanvas};
    use std::time::Instant;

    #[test]
    fn test_preferred_height() {
        let style = SliderStyle {
            padding: Insets::uniform(2.0),
            ..Default::default()
        };
        // thumb diameter 20 + offset 6 + text 14 + padding 4
        assert_eq!(style.preferred_height(), 44.0);
    }

    #[test]
    fn test_track_is_inset_by_the_widest_element() {
        let style = SliderStyle {
            text_size: 40.0,
            ..Default::default()
        };
        let mut canvas = RecordingCanvas::default();
        let metrics = SliderMetrics::measure(
            &mut canvas,
            &style,
            &RatingLevel::LETTERS,
            300.0,
            style.preferred_height(),
        );
        // half a glyph is 40 * 0.6 / 2 = 12, wider than the thumb
        assert_eq!(metrics.track.left, 12.0);
        assert_eq!(metrics.track.right, 288.0);
        assert_eq!(metrics.notch_spacing, 69.0);
        assert_eq!(metrics.track.height(), style.bar_height);
    }

    #[test]
    fn test_narrow_widget_collapses_track() {
        let style = SliderStyle::default();
        let mut canvas = RecordingCanvas::default();
        let metrics = SliderMetrics::measure(&mut canvas, &style, &RatingLevel::LETTERS, 5.0, 40.0);
        assert_eq!(metrics.track.width(), 0.0);

        let mut bar = DiscreteSliderBar::letters();
        let mut canvas = RecordingCanvas::default();
        bar.draw(&mut canvas, 5.0, 40.0).unwrap();
        assert!(canvas.commands.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least two notches")]
    fn test_single_notch_is_rejected() {
        DiscreteSliderBar::new(vec![RatingLevel::C]);
    }

    #[test]
    fn test_draw_colors_by_thumb_side() {
        let mut bar = DiscreteSliderBar::letters();
        let style = *bar.style();
        bar.set_rating_at(RatingLevel::C, false, Instant::now());

        let mut canvas = RecordingCanvas::default();
        bar.draw(&mut canvas, 220.0, style.preferred_height()).unwrap();
        let track = bar.track().unwrap();
        let thumb_x = bar.thumb_x().unwrap();
        assert!((thumb_x - (track.left + track.width() / 2.0)).abs() < 1e-9);

        let Command::FillRect { rect, .. } = &canvas.commands[1] else {
            panic!("selected overlay");
        };
        assert_eq!(rect.right, thumb_x);

        let notches: Vec<_> = canvas
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::FillCircle { radius, paint, .. } if *radius == style.notch_radius => {
                    Some(paint.color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            notches,
            [
                style.selected,
                style.selected,
                style.selected,
                style.unselected,
                style.unselected
            ]
        );

        let glyphs = canvas.texts();
        assert_eq!(glyphs.len(), 5);
        let (text, _, font, paint) = glyphs[2];
        assert_eq!(text, "C");
        assert_eq!(font.weight, FontWeight::Bold);
        assert_eq!(paint.color, style.selected);
        assert!(glyphs
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .all(|(_, g)| g.2.weight == FontWeight::Normal && g.3.color == style.unselected));
    }

    #[test]
    fn test_first_paint_puts_thumb_on_leftmost_notch() {
        let mut bar = DiscreteSliderBar::letters();
        let mut canvas = RecordingCanvas::default();
        bar.draw(&mut canvas, 220.0, 44.0).unwrap();
        assert_eq!(bar.thumb_x(), Some(bar.track().unwrap().left));
    }
}
