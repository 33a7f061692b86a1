use std::str::FromStr;

use eframe::egui::{self, Color32};
use palette::{FromColor, Hsl, Lighten, Srgb};

use collection_dash::config::{Theme, ThemeKind};

// ---------------------------------------------------------------------------
// Hex colours from the config
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` (or `rrggbb`) into a [`Color32`].
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(hex.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Lighten a colour in HSL space; `amount` is in `[0, 1]`.
pub fn lighten(color: Color32, amount: f32) -> Color32 {
    let rgb: Srgb = Srgb::new(color.r(), color.g(), color.b()).into_format();
    let hsl: Hsl = Hsl::from_color(rgb);
    let hsl = hsl.lighten(amount);
    let out: Srgb = Srgb::from_color(hsl);
    let out: Srgb<u8> = out.into_format();
    Color32::from_rgb(out.red, out.green, out.blue)
}

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// Colours of the AM/PM series. The weight chart uses lighter shades of the
/// count colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    pub am: Color32,
    pub pm: Color32,
    pub am_weight: Color32,
    pub pm_weight: Color32,
}

impl SeriesColors {
    pub fn from_theme(theme: &Theme) -> Self {
        let pick = |hex: &str, fallback: Color32| {
            parse_hex(hex).unwrap_or_else(|| {
                log::warn!("invalid colour '{hex}' in theme, using default");
                fallback
            })
        };
        let am = pick(&theme.am_color, Color32::from_rgb(0, 123, 255));
        let pm = pick(&theme.pm_color, Color32::from_rgb(255, 140, 0));
        SeriesColors {
            am,
            pm,
            am_weight: lighten(am, 0.15),
            pm_weight: lighten(pm, 0.15),
        }
    }
}

/// egui visuals for the configured theme.
pub fn visuals(theme: &Theme) -> egui::Visuals {
    match theme.kind {
        ThemeKind::Dark => {
            let bg = Color32::from_rgb(0x0f, 0x0f, 0x0f);
            let mut v = egui::Visuals::dark();
            v.panel_fill = bg;
            v.window_fill = bg;
            v.extreme_bg_color = Color32::from_rgb(0x1a, 0x1a, 0x1a);
            v.override_text_color = Some(Color32::from_rgb(0xf0, 0xf0, 0xf0));
            v
        }
        ThemeKind::Light => egui::Visuals::light(),
    }
}
