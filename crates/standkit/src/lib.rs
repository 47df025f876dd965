//! Rating model, geometry and renderers for the stand stats diagram.
//!
//! Nothing here knows about a windowing toolkit. Front ends implement
//! [`canvas::Canvas`] and drive animations by calling `tick` once per frame.

pub mod canvas;
pub mod color;
pub mod diagram;
pub mod geometry;
pub mod layout;
pub mod rating;
pub mod slider;
pub mod tween;

pub use color::Argb;
pub use diagram::RadialStatsDiagram;
pub use layout::DiagramLayout;
pub use rating::{CategoryName, RatingLevel, Ratings};
pub use slider::DiscreteSliderBar;
