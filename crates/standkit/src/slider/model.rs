use super::view::{SliderMetrics, SliderRenderer, SliderStyle};
use super::{DEFAULT_TAP_TIMEOUT, DEFAULT_TOUCH_SLOP, SNAP_ANIMATION};
use crate::canvas::Canvas;
use crate::geometry::Rect;
use crate::rating::RatingLevel;
use crate::tween::Animated;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, time: Instant) -> Self {
        Self { phase, x, time }
    }
}

/// What the host should do after feeding an event to the slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderAction {
    pub redraw: bool,
    /// Set when a gesture settled on a different rating.
    pub rating_changed: Option<RatingLevel>,
    pub tapped: bool,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    down_x: f64,
    down_at: Instant,
    travel: f64,
}

/// A horizontal bar with one notch per rating level.
///
/// The thumb position is kept normalized to `[0, 1]` along the track. The
/// committed rating only changes when a gesture settles or when
/// [`set_rating`](Self::set_rating) is called; dragging just moves the thumb.
pub struct DiscreteSliderBar {
    levels: Vec<RatingLevel>,
    rating: RatingLevel,
    position: Animated<f64>,
    gesture: Option<Gesture>,
    track: Option<Rect>,
    style: SliderStyle,
    tap_timeout: Duration,
    touch_slop: f64,
}

impl DiscreteSliderBar {
    /// Panics in debug builds when fewer than two levels are given; release
    /// builds render nothing for such a bar.
    pub fn new(levels: Vec<RatingLevel>) -> Self {
        debug_assert!(levels.len() >= 2, "a slider needs at least two notches");
        let rating = levels.first().copied().unwrap_or_default();
        Self {
            levels,
            rating,
            position: Animated::new(0.0, SNAP_ANIMATION),
            gesture: None,
            track: None,
            style: SliderStyle::default(),
            tap_timeout: DEFAULT_TAP_TIMEOUT,
            touch_slop: DEFAULT_TOUCH_SLOP,
        }
    }

    /// E through A, left to right.
    pub fn letters() -> Self {
        Self::new(RatingLevel::LETTERS.to_vec())
    }

    pub fn with_style(mut self, style: SliderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_tap_detection(mut self, tap_timeout: Duration, touch_slop: f64) -> Self {
        self.set_tap_detection(tap_timeout, touch_slop);
        self
    }

    pub fn set_tap_detection(&mut self, tap_timeout: Duration, touch_slop: f64) {
        self.tap_timeout = tap_timeout;
        self.touch_slop = touch_slop;
    }

    pub fn set_style(&mut self, style: SliderStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &SliderStyle {
        &self.style
    }

    pub fn levels(&self) -> &[RatingLevel] {
        &self.levels
    }

    pub fn rating(&self) -> RatingLevel {
        self.rating
    }

    /// Normalized thumb position as currently drawn.
    pub fn position(&self) -> f64 {
        self.position.value()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_running()
    }

    pub fn track(&self) -> Option<Rect> {
        self.track
    }

    /// Pins the track rectangle used to map pointer x to thumb position.
    /// Drawing updates it as well.
    pub fn set_track(&mut self, track: Rect) {
        self.track = Some(track);
    }

    fn notch_spacing(&self) -> f64 {
        match self.levels.len() {
            0 | 1 => 0.0,
            n => 1.0 / (n - 1) as f64,
        }
    }

    pub fn notch_position(&self, index: usize) -> f64 {
        index as f64 * self.notch_spacing()
    }

    pub fn nearest_notch(&self, position: f64) -> usize {
        let spacing = self.notch_spacing();
        if spacing <= 0.0 {
            return 0;
        }
        let last = self.levels.len() - 1;
        ((position / spacing).round().max(0.0) as usize).min(last)
    }

    /// Notch the thumb is closest to right now, used for previews mid-drag.
    pub fn preview_index(&self) -> usize {
        self.nearest_notch(self.position.value())
    }

    /// Index of `level`, or of the level with the closest mark when the bar
    /// does not offer it (a loaded `Unknown` lands on the first notch).
    fn index_of(&self, level: RatingLevel) -> usize {
        self.levels
            .iter()
            .position(|&l| l == level)
            .or_else(|| {
                self.levels
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, l)| l.mark().abs_diff(level.mark()))
                    .map(|(i, _)| i)
            })
            .unwrap_or(0)
    }

    pub fn set_rating(&mut self, level: RatingLevel, animate: bool) {
        self.set_rating_at(level, animate, Instant::now());
    }

    pub fn set_rating_at(&mut self, level: RatingLevel, animate: bool, now: Instant) {
        let index = self.index_of(level);
        if let Some(&settled) = self.levels.get(index) {
            self.rating = settled;
        }
        self.gesture = None;
        self.position.set(self.notch_position(index), animate, now);
    }

    fn normalize(&self, x: f64) -> Option<f64> {
        let track = self.track?;
        if track.width() <= 0.0 {
            return Some(0.0);
        }
        Some((x.clamp(track.left, track.right) - track.left) / track.width())
    }

    pub fn on_pointer(&mut self, event: PointerEvent) -> SliderAction {
        let Some(position) = self.normalize(event.x) else {
            log::trace!("pointer event before first layout ignored");
            return SliderAction::default();
        };

        match event.phase {
            PointerPhase::Down => {
                self.gesture = Some(Gesture {
                    down_x: event.x,
                    down_at: event.time,
                    travel: 0.0,
                });
                self.position.snap_to(position);
                SliderAction {
                    redraw: true,
                    ..Default::default()
                }
            }
            PointerPhase::Move => match self.gesture.as_mut() {
                Some(gesture) => {
                    gesture.travel = gesture.travel.max((event.x - gesture.down_x).abs());
                    self.position.snap_to(position);
                    SliderAction {
                        redraw: true,
                        ..Default::default()
                    }
                }
                None => SliderAction::default(),
            },
            PointerPhase::Up | PointerPhase::Cancel => {
                let Some(mut gesture) = self.gesture.take() else {
                    return SliderAction::default();
                };
                gesture.travel = gesture.travel.max((event.x - gesture.down_x).abs());
                self.position.snap_to(position);

                let mut action = self.settle(event.time);
                action.tapped = event.phase == PointerPhase::Up
                    && event.time.saturating_duration_since(gesture.down_at) < self.tap_timeout
                    && gesture.travel < self.touch_slop;
                action
            }
        }
    }

    /// Commits the notch nearest to the thumb and snaps the thumb onto it.
    fn settle(&mut self, now: Instant) -> SliderAction {
        let index = self.preview_index();
        let previous = self.rating;
        if let Some(&level) = self.levels.get(index) {
            self.rating = level;
        }
        self.position.animate_to(self.notch_position(index), now);

        SliderAction {
            redraw: true,
            rating_changed: (self.rating != previous).then_some(self.rating),
            tapped: false,
        }
    }

    /// Advances the snap animation; returns whether it is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.position.tick(now)
    }

    pub fn thumb_x(&self) -> Option<f64> {
        self.track
            .map(|track| track.left + self.position.value() * track.width())
    }

    pub fn metrics<C: Canvas>(&self, cr: &mut C, width: f64, height: f64) -> SliderMetrics {
        SliderMetrics::measure(cr, &self.style, &self.levels, width, height)
    }

    pub fn preferred_height(&self) -> f64 {
        self.style.preferred_height()
    }

    pub fn draw<C: Canvas>(&mut self, cr: &mut C, width: f64, height: f64) -> Result<(), C::Error> {
        let metrics = self.metrics(cr, width, height);
        self.track = Some(metrics.track);
        if self.levels.len() < 2 || metrics.track.width() <= 0.0 {
            return Ok(());
        }
        SliderRenderer::new(self, &metrics).draw(cr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn bar_over(left: f64, right: f64) -> DiscreteSliderBar {
        let mut bar = DiscreteSliderBar::letters();
        bar.set_track(Rect::new(left, 0.0, right, 4.0));
        bar
    }

    fn event(phase: PointerPhase, x: f64, time: Instant) -> PointerEvent {
        PointerEvent::new(phase, x, time)
    }

    #[test]
    fn test_starts_at_leftmost_notch() {
        let bar = bar_over(10.0, 210.0);
        assert_eq!(bar.rating(), RatingLevel::E);
        assert_eq!(bar.thumb_x(), Some(10.0));
    }

    #[test]
    fn test_press_in_middle_commits_c() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 100.0, t0));
        let action = bar.on_pointer(event(PointerPhase::Up, 100.0, t0 + 50 * MS));
        assert_eq!(bar.rating(), RatingLevel::C);
        assert_eq!(action.rating_changed, Some(RatingLevel::C));
    }

    #[test]
    fn test_drag_only_previews_until_release() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 0.0, t0));
        let action = bar.on_pointer(event(PointerPhase::Move, 190.0, t0 + 100 * MS));

        assert!(action.redraw);
        assert_eq!(action.rating_changed, None);
        assert_eq!(bar.rating(), RatingLevel::E);
        assert_eq!(bar.preview_index(), 4);
        assert!(bar.is_dragging());
    }

    #[test]
    fn test_release_snaps_to_nearest_notch() {
        let t0 = Instant::now();
        let mut bar = bar_over(20.0, 220.0);
        for p in [20.0, 44.0, 71.0, 126.0, 170.0, 219.0, 300.0, -5.0] {
            bar.on_pointer(event(PointerPhase::Down, 20.0, t0));
            bar.on_pointer(event(PointerPhase::Move, p, t0 + 10 * MS));
            bar.on_pointer(event(PointerPhase::Up, p, t0 + 400 * MS));
            assert!(bar.is_animating());
            assert!(!bar.tick(t0 + 400 * MS + SNAP_ANIMATION));

            let clamped = p.clamp(20.0, 220.0);
            let nearest = ((clamped - 20.0) / 50.0).round() * 50.0 + 20.0;
            let thumb = bar.thumb_x().unwrap();
            assert!((thumb - nearest).abs() < 1.0, "released at {p}, thumb {thumb}");
            assert_eq!(bar.rating(), RatingLevel::LETTERS[((nearest - 20.0) / 50.0) as usize]);
        }
    }

    #[test]
    fn test_quick_still_press_is_a_tap() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 100.0, t0));
        bar.on_pointer(event(PointerPhase::Move, 103.0, t0 + 20 * MS));
        let action = bar.on_pointer(event(PointerPhase::Up, 102.0, t0 + 60 * MS));
        assert!(action.tapped);

        // a second release without a press is ignored
        let action = bar.on_pointer(event(PointerPhase::Up, 102.0, t0 + 70 * MS));
        assert!(!action.tapped);
        assert!(!action.redraw);
    }

    #[test]
    fn test_drag_beyond_slop_is_not_a_tap() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 100.0, t0));
        bar.on_pointer(event(PointerPhase::Move, 120.0, t0 + 20 * MS));
        let action = bar.on_pointer(event(PointerPhase::Up, 101.0, t0 + 60 * MS));
        assert!(!action.tapped);
    }

    #[test]
    fn test_slow_press_is_not_a_tap() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 100.0, t0));
        let action = bar.on_pointer(event(PointerPhase::Up, 100.0, t0 + DEFAULT_TAP_TIMEOUT));
        assert!(!action.tapped);
    }

    #[test]
    fn test_cancel_settles_without_tap() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 150.0, t0));
        let action = bar.on_pointer(event(PointerPhase::Cancel, 150.0, t0 + 10 * MS));
        assert!(!action.tapped);
        assert_eq!(bar.rating(), RatingLevel::B);
        assert_eq!(action.rating_changed, Some(RatingLevel::B));
    }

    #[test]
    fn test_settling_on_same_rating_reports_no_change() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.on_pointer(event(PointerPhase::Down, 10.0, t0));
        let action = bar.on_pointer(event(PointerPhase::Up, 10.0, t0 + 300 * MS));
        assert_eq!(action.rating_changed, None);
        assert_eq!(bar.rating(), RatingLevel::E);
    }

    #[test]
    fn test_press_cancels_snap_animation() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.set_rating_at(RatingLevel::A, true, t0);
        assert!(bar.is_animating());
        bar.on_pointer(event(PointerPhase::Down, 50.0, t0 + 50 * MS));
        assert!(!bar.is_animating());
        assert_eq!(bar.thumb_x(), Some(50.0));
    }

    #[test]
    fn test_set_rating() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.set_rating_at(RatingLevel::B, false, t0);
        assert_eq!(bar.thumb_x(), Some(150.0));
        assert!(!bar.is_animating());

        bar.set_rating_at(RatingLevel::D, true, t0);
        assert_eq!(bar.rating(), RatingLevel::D);
        assert!(bar.tick(t0 + 100 * MS));
        assert!((bar.thumb_x().unwrap() - 100.0).abs() < 1e-9);
        assert!(!bar.tick(t0 + SNAP_ANIMATION));
        assert!((bar.thumb_x().unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentinel_ratings_map_to_closest_notch() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        bar.set_rating_at(RatingLevel::Infinite, false, t0);
        assert_eq!(bar.rating(), RatingLevel::A);
        bar.set_rating_at(RatingLevel::Unknown, false, t0);
        assert_eq!(bar.rating(), RatingLevel::E);
        assert_eq!(bar.position(), 0.0);
    }

    #[test]
    fn test_letter_bar_settles_on_nearest_letter() {
        let t0 = Instant::now();
        let mut bar = bar_over(0.0, 200.0);
        for level in [
            RatingLevel::None,
            RatingLevel::Unknown,
            RatingLevel::C,
            RatingLevel::Infinite,
        ] {
            bar.set_rating_at(level, false, t0);
            assert_eq!(bar.rating(), level.nearest_letter());
        }
    }

    #[test]
    fn test_events_before_layout_are_ignored() {
        let mut bar = DiscreteSliderBar::letters();
        let action = bar.on_pointer(event(PointerPhase::Down, 10.0, Instant::now()));
        assert_eq!(action, SliderAction::default());
        assert!(!bar.is_dragging());
    }
}
