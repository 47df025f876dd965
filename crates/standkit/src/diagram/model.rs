use super::view::DiagramRenderer;
use super::{FILL_COLOR_ANIMATION, RATINGS_ANIMATION};
use crate::canvas::{Canvas, Path};
use crate::color::Argb;
use crate::geometry::Insets;
use crate::layout::DiagramLayout;
use crate::rating::{CategoryName, RatingLevel, Ratings};
use crate::tween::Animated;
use std::time::Instant;
use strum::EnumCount;

type Marks = [f64; CategoryName::COUNT];

/// The radar diagram: displayed ratings, fill color and their transitions.
///
/// Axis radii are animated as marks (multiples of the space between rating
/// levels) so a resize during a transition keeps the polygon proportional.
pub struct RadialStatsDiagram {
    ratings: Ratings,
    marks: Animated<Marks>,
    fill_color: Animated<Argb>,
    ink: Argb,
    padding: Insets,
    polygon: Path,
}

impl RadialStatsDiagram {
    pub fn new(ratings: Ratings, fill_color: Argb) -> Self {
        Self {
            ratings,
            marks: Animated::new(ratings.marks(), RATINGS_ANIMATION),
            fill_color: Animated::new(fill_color, FILL_COLOR_ANIMATION),
            ink: Argb::BLACK,
            padding: Insets::default(),
            polygon: Path::new(),
        }
    }

    pub fn ratings(&self) -> Ratings {
        self.ratings
    }

    /// The color currently on screen, mid-transition included.
    pub fn fill_color(&self) -> Argb {
        self.fill_color.value()
    }

    /// The most recently requested fill color.
    pub fn target_fill_color(&self) -> Argb {
        self.fill_color.target()
    }

    pub fn marks(&self) -> Marks {
        self.marks.value()
    }

    pub fn set_ink(&mut self, ink: Argb) {
        self.ink = ink;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn set_ratings(&mut self, ratings: Ratings, animated: bool) {
        self.set_ratings_at(ratings, animated, Instant::now());
    }

    pub fn set_ratings_at(&mut self, ratings: Ratings, animated: bool, now: Instant) {
        log::debug!("ratings {} -> {} (animated: {})", self.ratings, ratings, animated);
        self.ratings = ratings;
        self.marks.set(ratings.marks(), animated, now);
    }

    pub fn set_fill_color(&mut self, color: Argb, animated: bool) {
        self.set_fill_color_at(color, animated, Instant::now());
    }

    pub fn set_fill_color_at(&mut self, color: Argb, animated: bool, now: Instant) {
        log::debug!("fill color -> {} (animated: {})", color, animated);
        self.fill_color.set(color, animated, now);
    }

    pub fn is_animating(&self) -> bool {
        self.marks.is_running() || self.fill_color.is_running()
    }

    /// Advances both transitions; returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let marks = self.marks.tick(now);
        let color = self.fill_color.tick(now);
        marks || color
    }

    pub fn layout(&self, width: f64, height: f64) -> DiagramLayout {
        DiagramLayout::calculate(
            width,
            height,
            self.padding,
            CategoryName::COUNT,
            RatingLevel::LETTERS.len(),
        )
    }

    /// Current on-screen radius of every axis for the given layout.
    pub fn radii(&self, layout: &DiagramLayout) -> Marks {
        self.marks
            .value()
            .map(|mark| mark * layout.space_between_rating_levels)
    }

    pub fn draw<C: Canvas>(&mut self, cr: &mut C, width: f64, height: f64) -> Result<(), C::Error> {
        let layout = self.layout(width, height);
        let marks = self.marks.value();
        DiagramRenderer::new(
            &layout,
            &self.ratings,
            &marks,
            self.fill_color.value(),
            self.ink,
        )
        .draw(cr, &mut self.polygon)
    }
}

impl Default for RadialStatsDiagram {
    fn default() -> Self {
        Self::new(Ratings::UNKNOWN, Argb::MAGENTA)
    }
}
