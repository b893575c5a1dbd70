use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub scrim: Srgba<f64>,
    pub tile_text: Srgba<f64>,
    pub slot_highlighted: Srgba<f64>,
    pub slot_outline: Srgba<f64>,
    pub label_bg: Srgba<f64>,
    pub label_fg: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            scrim: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.0, 0.0, 0.0, 0.35),
                Some(0.35),
            ),
            tile_text: Self::lookup_color(
                context,
                "theme_selected_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            slot_highlighted: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.95),
                Some(0.95),
            ),
            slot_outline: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.2, 0.2, 0.2, 0.6),
                Some(0.6),
            ),
            label_bg: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.9),
                Some(0.9),
            ),
            label_fg: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcmenu-status {
    padding: 6px 12px;
    font-size: smaller;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
