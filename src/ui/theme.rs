use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

pub const BG_OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(168, 168, 171);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 107, 112);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(220, 220, 225);

pub const ACCENT_BLUE: Color32 = Color32::from_rgb(84, 102, 206);
pub const ACCENT_RED: Color32 = Color32::from_rgb(206, 102, 102);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(50, 51, 113, 77);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = Visuals {
        override_text_color: Some(TEXT_PRIMARY),
        window_fill: BG_OVERLAY,
        window_stroke: Stroke::new(1.0, BORDER_SUBTLE),
        window_rounding: Rounding::same(6.0),
        hyperlink_color: ACCENT_BLUE,
        ..Visuals::dark()
    };

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(11.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
