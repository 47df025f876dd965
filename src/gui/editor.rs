use crate::config::SliderConfig;
use crate::gui::animation::FrameDriver;
use crate::gui::canvas::CairoCanvas;
use crate::gui::theme::ThemeColors;
use gtk::prelude::*;
use gtk4 as gtk;
use rand::Rng;
use standkit::slider::{PointerEvent, PointerPhase};
use standkit::{CategoryName, DiscreteSliderBar, RatingLevel, Ratings};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    RatingChanged(CategoryName, RatingLevel),
    Tapped(CategoryName),
}

type EventSink = Rc<dyn Fn(EditorEvent)>;

#[derive(Clone)]
struct SliderRow {
    category: CategoryName,
    bar: Rc<RefCell<DiscreteSliderBar>>,
    area: gtk::DrawingArea,
    driver: FrameDriver,
    on_event: EventSink,
}

impl SliderRow {
    fn new(category: CategoryName, config: &SliderConfig, on_event: EventSink) -> Self {
        let bar = DiscreteSliderBar::letters()
            .with_style(config.style(Default::default()))
            .with_tap_detection(config.tap_timeout, config.touch_slop);
        let row = Self {
            category,
            bar: Rc::new(RefCell::new(bar)),
            area: gtk::DrawingArea::builder().hexpand(true).build(),
            driver: FrameDriver::default(),
            on_event,
        };
        row.fit_height();
        row.connect_draw();
        row.connect_gestures();
        row
    }

    fn fit_height(&self) {
        let height = self.bar.borrow().preferred_height().ceil() as i32;
        self.area.set_content_height(height);
    }

    fn connect_draw(&self) {
        let bar = self.bar.clone();
        self.area.set_draw_func(move |area, cr, width, height| {
            let colors = ThemeColors::from_widget(area);
            let mut bar = bar.borrow_mut();
            let style = colors.slider_style(*bar.style());
            bar.set_style(style);
            if let Err(e) = bar.draw(&mut CairoCanvas::new(cr), width as f64, height as f64) {
                log::error!("Drawing error: {}", e);
            }
        });
    }

    fn connect_gestures(&self) {
        let drag = gtk::GestureDrag::new();

        let row = self.clone();
        drag.connect_drag_begin(move |_, x, _| row.feed(PointerPhase::Down, x));

        let row = self.clone();
        drag.connect_drag_update(move |gesture, _, _| {
            if let Some(x) = current_x(gesture) {
                row.feed(PointerPhase::Move, x);
            }
        });

        let row = self.clone();
        drag.connect_drag_end(move |gesture, _, _| {
            if let Some(x) = current_x(gesture) {
                row.feed(PointerPhase::Up, x);
            }
        });

        let row = self.clone();
        drag.connect_cancel(move |gesture, _| {
            if let Some(x) = current_x(gesture) {
                row.feed(PointerPhase::Cancel, x);
            }
        });

        self.area.add_controller(drag);
    }

    fn feed(&self, phase: PointerPhase, x: f64) {
        let action = self
            .bar
            .borrow_mut()
            .on_pointer(PointerEvent::new(phase, x, Instant::now()));

        if action.redraw {
            self.area.queue_draw();
        }
        self.animate();
        if let Some(level) = action.rating_changed {
            (self.on_event)(EditorEvent::RatingChanged(self.category, level));
        }
        if action.tapped {
            (self.on_event)(EditorEvent::Tapped(self.category));
        }
    }

    fn animate(&self) {
        if !self.bar.borrow().is_animating() {
            return;
        }
        let bar = self.bar.clone();
        self.driver
            .ensure_running(&self.area, move |now| bar.borrow_mut().tick(now));
    }

    fn set_rating(&self, level: RatingLevel, animate: bool) {
        self.bar.borrow_mut().set_rating(level, animate);
        self.area.queue_draw();
        self.animate();
    }

    fn apply_config(&self, config: &SliderConfig) {
        {
            let mut bar = self.bar.borrow_mut();
            let style = config.style(*bar.style());
            bar.set_style(style);
            bar.set_tap_detection(config.tap_timeout, config.touch_slop);
        }
        self.fit_height();
        self.area.queue_draw();
    }

    fn widget(&self) -> gtk::Box {
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        let label = gtk::Label::builder()
            .label(self.category.label())
            .xalign(0.0)
            .width_chars(11)
            .build();
        label.add_css_class("stand-rating-label");
        row.append(&label);
        row.append(&self.area);
        row
    }
}

fn current_x(gesture: &gtk::GestureDrag) -> Option<f64> {
    let (start_x, _) = gesture.start_point()?;
    let (dx, _) = gesture.offset()?;
    Some(start_x + dx)
}

/// One slider per category, stacked vertically.
pub struct RatingEditor {
    rows: Vec<SliderRow>,
    container: gtk::Box,
}

impl RatingEditor {
    pub fn new(config: &SliderConfig, on_event: impl Fn(EditorEvent) + 'static) -> Self {
        let on_event: EventSink = Rc::new(on_event);
        let container = gtk::Box::new(gtk::Orientation::Vertical, 4);
        let rows: Vec<_> = CategoryName::iter()
            .map(|category| SliderRow::new(category, config, on_event.clone()))
            .collect();
        for row in &rows {
            container.append(&row.widget());
        }
        Self { rows, container }
    }

    pub fn widget(&self) -> &gtk::Box {
        &self.container
    }

    /// The committed rating of every slider.
    pub fn ratings(&self) -> Ratings {
        let mut ratings = Ratings::UNKNOWN;
        for row in &self.rows {
            ratings = ratings.with(row.category, row.bar.borrow().rating());
        }
        ratings
    }

    pub fn set_ratings(&self, ratings: Ratings, animate: bool) {
        for row in &self.rows {
            row.set_rating(ratings.get(row.category), animate);
        }
    }

    pub fn randomize<R: Rng + ?Sized>(&self, rng: &mut R, animate: bool) -> Ratings {
        let ratings = Ratings::random(rng);
        self.set_ratings(ratings, animate);
        log::debug!("randomized sliders to {}", ratings);
        ratings
    }

    pub fn apply_config(&self, config: &SliderConfig) {
        for row in &self.rows {
            row.apply_config(config);
        }
    }
}
