use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Keeps at most one frame-clock callback alive per widget.
///
/// `tick` advances the model to the frame time and returns whether another
/// frame is needed; the widget is redrawn after every tick.
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    active: Rc<Cell<bool>>,
}

impl FrameDriver {
    pub fn ensure_running<W, F>(&self, widget: &W, tick: F)
    where
        W: IsA<gtk::Widget>,
        F: Fn(Instant) -> bool + 'static,
    {
        if self.active.replace(true) {
            return;
        }

        let active = self.active.clone();
        widget.add_tick_callback(move |widget, _clock| {
            let running = tick(Instant::now());
            widget.queue_draw();
            if running {
                glib::ControlFlow::Continue
            } else {
                active.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}
