use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use standkit::Argb;
use standkit::slider::SliderStyle;

/// A theme color name with what to use when the theme does not define it.
#[derive(Debug, Clone, Copy)]
struct ThemeColor {
    name: &'static str,
    fallback: Argb,
    /// Replaces the theme's alpha; the fallback keeps its own.
    alpha: Option<u8>,
}

impl ThemeColor {
    const INK: ThemeColor = ThemeColor {
        name: "theme_fg_color",
        fallback: Argb::BLACK,
        alpha: None,
    };
    const TRACK: ThemeColor = ThemeColor {
        name: "theme_fg_color",
        fallback: Argb::new(0xFFBD_BDBD),
        alpha: Some(77),
    };
    const ACCENT: ThemeColor = ThemeColor {
        name: "theme_selected_bg_color",
        fallback: Argb::new(0xFF35_84E4),
        alpha: None,
    };

    fn resolve(&self, context: &gtk::StyleContext) -> Argb {
        match context.lookup_color(self.name) {
            Some(rgba) => {
                let color = argb_from_rgba(&rgba);
                self.alpha.map_or(color, |alpha| color.with_alpha(alpha))
            }
            None => self.fallback,
        }
    }
}

/// Colors pulled from the active GTK theme so the diagram follows dark mode.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub ink: Argb,
    pub track: Argb,
    pub accent: Argb,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            ink: ThemeColor::INK.resolve(context),
            track: ThemeColor::TRACK.resolve(context),
            accent: ThemeColor::ACCENT.resolve(context),
        }
    }

    pub fn from_widget(widget: &impl IsA<gtk::Widget>) -> Self {
        Self::from_context(&widget.style_context())
    }

    pub fn slider_style(&self, base: SliderStyle) -> SliderStyle {
        SliderStyle {
            unselected: self.track,
            selected: self.accent,
            ..base
        }
    }
}

pub fn argb_from_rgba(rgba: &gdk::RGBA) -> Argb {
    Argb::from_srgba(Srgba::new(
        rgba.red() as f64,
        rgba.green() as f64,
        rgba.blue() as f64,
        rgba.alpha() as f64,
    ))
}

pub fn rgba_from_argb(color: Argb) -> gdk::RGBA {
    let (r, g, b, a) = color.to_srgba().into_components();
    gdk::RGBA::new(r as f32, g as f32, b as f32, a as f32)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(
        ".stand-diagram { background: none; }
         .stand-rating-label { font-weight: bold; }",
    );

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_color_converts_to_argb() {
        let picked = gdk::RGBA::new(1.0, 0.0, 0.0, 0.2);
        assert_eq!(argb_from_rgba(&picked), Argb::new(0x33FF_0000));
    }

    #[test]
    fn test_argb_survives_the_color_button() {
        let color = Argb::new(0xFF12_3456);
        assert_eq!(argb_from_rgba(&rgba_from_argb(color)), color);
    }

    #[test]
    fn test_track_fallback_matches_default_slider() {
        assert_eq!(ThemeColor::TRACK.fallback, SliderStyle::default().unselected);
        assert_eq!(ThemeColor::INK.alpha, None);
    }
}
