use crate::geometry::{Insets, Point};

const INNER_BORDER_TO_OUTER: f64 = 0.9;
const STATS_CIRCLE_TO_OUTER: f64 = 0.575;
const OUTER_BORDER_STROKE_TO_OUTER: f64 = 0.02;
const INNER_BORDER_STROKE_TO_OUTER: f64 = 0.015;
const STATS_LINE_STROKE_TO_OUTER: f64 = 0.01;
const RATING_NOTCH_TO_STATS_CIRCLE: f64 = 0.075;

/// Every absolute measurement of the diagram for one draw pass.
///
/// Cheap to build and never cached: recompute it whenever the drawing area
/// may have changed size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiagramLayout {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub outer_border_stroke: f64,
    pub inner_border_stroke: f64,
    pub stats_circle_radius: f64,
    pub stats_line_stroke: f64,
    pub border_notch_stroke: f64,
    pub border_notch_arc_radius: f64,
    pub angle_between_categories: f64,
    pub space_between_rating_levels: f64,
    pub rating_notch_len: f64,
    pub rating_notch_left: f64,
    pub rating_notch_right: f64,
    pub category_label_text_size: f64,
    pub category_label_arc_radius: f64,
    pub rating_letter_circle_radius: f64,
}

impl DiagramLayout {
    pub fn calculate(
        width: f64,
        height: f64,
        padding: Insets,
        category_count: usize,
        letter_rating_count: usize,
    ) -> Self {
        let available_width = (width - padding.left - padding.right).max(0.0);
        let available_height = (height - padding.top - padding.bottom).max(0.0);

        let center = Point::new(
            available_width / 2.0 + padding.left,
            available_height / 2.0 + padding.top,
        );

        let outer_radius = available_width.min(available_height) / 2.0;
        let inner_radius = outer_radius * INNER_BORDER_TO_OUTER;
        let stats_circle_radius = outer_radius * STATS_CIRCLE_TO_OUTER;
        let border_notch_stroke = outer_radius - inner_radius;

        let angle_between_categories = if category_count == 0 {
            0.0
        } else {
            360.0 / category_count as f64
        };

        let rating_notch_len = stats_circle_radius * RATING_NOTCH_TO_STATS_CIRCLE;
        let rating_notch_left = center.x - rating_notch_len / 2.0;
        let category_label_text_size = (inner_radius - stats_circle_radius) / 3.0;

        Self {
            center,
            outer_radius,
            inner_radius,
            outer_border_stroke: outer_radius * OUTER_BORDER_STROKE_TO_OUTER,
            inner_border_stroke: outer_radius * INNER_BORDER_STROKE_TO_OUTER,
            stats_circle_radius,
            stats_line_stroke: outer_radius * STATS_LINE_STROKE_TO_OUTER,
            border_notch_stroke,
            border_notch_arc_radius: inner_radius + border_notch_stroke / 2.0,
            angle_between_categories,
            space_between_rating_levels: stats_circle_radius / (letter_rating_count + 1) as f64,
            rating_notch_len,
            rating_notch_left,
            rating_notch_right: rating_notch_left + rating_notch_len,
            category_label_text_size,
            category_label_arc_radius: inner_radius - category_label_text_size,
            rating_letter_circle_radius: inner_radius - category_label_text_size * 2.0,
        }
    }

    /// True when there is nothing to draw.
    pub fn is_degenerate(&self) -> bool {
        self.outer_radius <= 0.0 || self.angle_between_categories <= 0.0
    }

    /// Screen angle of axis `index`; axis 0 points straight up.
    pub fn axis_angle(&self, index: usize) -> f64 {
        crate::geometry::normalize_degrees(270.0 + index as f64 * self.angle_between_categories)
    }
}
