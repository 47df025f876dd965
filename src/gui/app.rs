use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::animation::FrameDriver;
use crate::gui::canvas::CairoCanvas;
use crate::gui::editor::{EditorEvent, RatingEditor};
use crate::gui::theme::{self, ThemeColors};
use crate::storage::{self, SavedState};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use standkit::{Argb, CategoryName, RadialStatsDiagram, RatingLevel, Ratings};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the window needs at startup.
pub struct AppInit {
    pub config: Config,
    pub state: SavedState,
    /// `Some(false)` when animations are disabled on the command line.
    pub animate_override: Option<bool>,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    config: Config,
    animate_override: Option<bool>,
    diagram: Rc<RefCell<RadialStatsDiagram>>,
    diagram_area: gtk::DrawingArea,
    diagram_driver: FrameDriver,
    editor: RatingEditor,
    color_button: gtk::ColorDialogButton,
    /// Set once a color was picked; until then the config default is followed.
    color_pinned: bool,
}

#[derive(Debug)]
pub enum AppMsg {
    Apply,
    Randomize,
    ColorPicked(Argb),
    RatingPicked(CategoryName, RatingLevel),
    SliderTapped(CategoryName),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl From<EditorEvent> for AppMsg {
    fn from(event: EditorEvent) -> Self {
        match event {
            EditorEvent::RatingChanged(category, level) => AppMsg::RatingPicked(category, level),
            EditorEvent::Tapped(category) => AppMsg::SliderTapped(category),
        }
    }
}

impl AppModel {
    fn animate(&self) -> bool {
        self.animate_override.unwrap_or(self.config.animate)
    }

    fn has_changes(&self) -> bool {
        needs_apply(self.diagram.borrow().ratings(), self.editor.ratings())
    }

    fn set_fill_color(&self, color: Argb) {
        self.diagram
            .borrow_mut()
            .set_fill_color(color, self.animate());
        self.color_button.set_rgba(&theme::rgba_from_argb(color));
        self.drive_diagram();
    }

    fn drive_diagram(&self) {
        if !self.diagram.borrow().is_animating() {
            self.diagram_area.queue_draw();
            return;
        }
        let diagram = self.diagram.clone();
        self.diagram_driver
            .ensure_running(&self.diagram_area, move |now| diagram.borrow_mut().tick(now));
    }

    fn persist(&self) {
        let diagram = self.diagram.borrow();
        let color = self.color_pinned.then(|| diagram.target_fill_color());
        let state = SavedState::new(diagram.ratings(), color);
        if let Err(e) = storage::save(&state) {
            log::error!("Failed to save ratings: {:#}", e);
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Stand Stats"),
            set_default_width: 440,
            set_default_height: 820,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,
                set_margin_all: 12,

                #[name = "diagram_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    set_content_width: 360,
                    set_content_height: 360,
                    add_css_class: "stand-diagram",
                },

                #[name = "editor_slot"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_spacing: 8,
                    set_halign: gtk::Align::End,

                    #[name = "color_button"]
                    gtk::ColorDialogButton {
                        set_dialog: &gtk::ColorDialog::new(),
                        set_tooltip_text: Some("Fill color"),
                    },

                    gtk::Button {
                        set_label: "Randomize",
                        connect_clicked => AppMsg::Randomize,
                    },

                    gtk::Button {
                        set_label: "Apply",
                        add_css_class: "suggested-action",
                        #[watch]
                        set_sensitive: model.has_changes(),
                        connect_clicked => AppMsg::Apply,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            state,
            animate_override,
            events,
        } = init;

        theme::load_css();

        let fill_color = state.fill_color_or(config.default_color);
        let mut diagram = RadialStatsDiagram::new(Ratings::UNKNOWN, fill_color);
        diagram.set_padding(config.diagram_padding());

        let editor_sender = sender.clone();
        let editor = RatingEditor::new(&config.slider, move |event| {
            editor_sender.input(AppMsg::from(event));
        });

        let model = AppModel {
            config,
            animate_override,
            diagram: Rc::new(RefCell::new(diagram)),
            diagram_area: gtk::DrawingArea::default(),
            diagram_driver: FrameDriver::default(),
            editor,
            color_button: gtk::ColorDialogButton::default(),
            color_pinned: state.fill_color.is_some(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.diagram_area = widgets.diagram_area.clone();
        model.color_button = widgets.color_button.clone();
        model
            .color_button
            .set_rgba(&theme::rgba_from_argb(fill_color));
        let color_sender = sender.clone();
        model.color_button.connect_rgba_notify(move |button| {
            color_sender.input(AppMsg::ColorPicked(theme::argb_from_rgba(&button.rgba())));
        });
        widgets.editor_slot.append(model.editor.widget());

        let diagram = model.diagram.clone();
        widgets
            .diagram_area
            .set_draw_func(move |area, cr, width, height| {
                let colors = ThemeColors::from_widget(area);
                let mut diagram = diagram.borrow_mut();
                diagram.set_ink(colors.ink);
                if let Err(e) = diagram.draw(&mut CairoCanvas::new(cr), width as f64, height as f64)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        // the saved ratings grow out of the center on startup
        let animate = model.animate();
        model.editor.set_ratings(state.ratings, animate);
        model
            .diagram
            .borrow_mut()
            .set_ratings(state.ratings, animate);
        model.drive_diagram();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Apply => {
                let ratings = self.editor.ratings();
                self.diagram
                    .borrow_mut()
                    .set_ratings(ratings, self.animate());
                self.drive_diagram();
                self.persist();
            }
            AppMsg::Randomize => {
                self.editor.randomize(&mut rand::rng(), self.animate());
            }
            AppMsg::ColorPicked(color) => {
                // set_rgba echoes back through the notify handler
                if color == self.diagram.borrow().target_fill_color() {
                    return;
                }
                log::debug!("Fill color picked: {}", color);
                self.color_pinned = true;
                self.set_fill_color(color);
                self.persist();
            }
            AppMsg::RatingPicked(category, level) => {
                log::debug!("{} set to {}", category.label(), level);
            }
            AppMsg::SliderTapped(category) => {
                log::debug!("{} slider tapped", category.label());
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let followed = reload_fill_color(
                        self.color_pinned,
                        self.config.default_color,
                        new_config.default_color,
                    );
                    self.editor.apply_config(&new_config.slider);
                    self.diagram
                        .borrow_mut()
                        .set_padding(new_config.diagram_padding());
                    self.config = new_config;
                    self.diagram_area.queue_draw();
                    if let Some(color) = followed {
                        self.set_fill_color(color);
                    }
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

/// Apply is offered while the sliders show something the diagram does not.
fn needs_apply(shown: Ratings, sliders: Ratings) -> bool {
    shown != sliders
}

/// The new default fill color, when it changed and no color was picked.
fn reload_fill_color(pinned: bool, old_default: Argb, new_default: Argb) -> Option<Argb> {
    (!pinned && old_default != new_default).then_some(new_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_ratings_offer_apply_until_committed() {
        let shown = Ratings::UNKNOWN.with(CategoryName::Range, RatingLevel::Infinite);
        // sliders can only show letters
        let sliders = shown.to_letters();
        assert!(needs_apply(shown, sliders));
        // apply pushes the slider ratings, which is what the diagram then shows
        assert!(!needs_apply(sliders, sliders));
    }

    #[test]
    fn test_reload_follows_default_color_until_picked() {
        let old = Argb::MAGENTA;
        let new = Argb::new(0xFF00_80FF);
        assert_eq!(reload_fill_color(false, old, new), Some(new));
        assert_eq!(reload_fill_color(false, old, old), None);
        assert_eq!(reload_fill_color(true, old, new), None);
    }
}
