use std::time::Duration;

pub mod model;
pub mod view;

pub use model::RadialStatsDiagram;

pub const RATINGS_ANIMATION: Duration = Duration::from_millis(1000);
pub const FILL_COLOR_ANIMATION: Duration = Duration::from_millis(750);
pub const POLYGON_ALPHA: u8 = 64;

// Decorative dial ring
pub const BIG_BORDER_NOTCH_COUNT: usize = 2; // top and bottom
pub const SMALL_BORDER_NOTCH_COUNT: usize = 20; // split evenly between both halves
pub const BIG_BORDER_NOTCH_ANGLE: f64 = 3.5;
pub const SMALL_BORDER_NOTCH_ANGLE: f64 = 2.5;
