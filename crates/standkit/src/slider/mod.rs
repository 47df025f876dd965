use std::time::Duration;

pub mod model;
pub mod view;

pub use model::{DiscreteSliderBar, PointerEvent, PointerPhase, SliderAction};
pub use view::{SliderMetrics, SliderStyle};

pub const SNAP_ANIMATION: Duration = Duration::from_millis(200);
pub const DEFAULT_TAP_TIMEOUT: Duration = Duration::from_millis(100);
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0; // px
