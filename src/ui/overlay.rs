use egui::{Context, RichText};

use crate::renderer::transform::RotationState;
use crate::ui::theme::*;

/// Read-only figures shown in the corner overlay.
pub struct OverlayStats {
    pub field: &'static str,
    pub grid: (u32, u32),
    pub vertices: usize,
    pub triangles: usize,
    pub z_range: (f32, f32),
    pub fps: f32,
    pub frames: u64,
    pub rotation: RotationState,
}

pub fn draw_stats_overlay(ctx: &Context, stats: &OverlayStats) {
    egui::Area::new(egui::Id::new("stats_overlay"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(BG_OVERLAY)
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(stats.field.to_uppercase()).color(TEXT_BRIGHT).strong());
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

                    ui.label(
                        RichText::new(format!(
                            "Grid {}x{} | {} verts | {} tris",
                            stats.grid.0,
                            stats.grid.1,
                            fmt_num(stats.vertices),
                            fmt_num(stats.triangles)
                        ))
                        .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!(
                            "z in [{:.3}, {:.3}]",
                            stats.z_range.0, stats.z_range.1
                        ))
                        .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!(
                            "rx {:.1} deg | ry {:.1} deg",
                            stats.rotation.rx, stats.rotation.ry
                        ))
                        .color(TEXT_MUTED),
                    );

                    let fps_color = if stats.fps < 30.0 { ACCENT_RED } else { ACCENT_BLUE };
                    ui.label(
                        RichText::new(format!("{:.0} FPS | frame {}", stats.fps, stats.frames))
                            .color(fps_color),
                    );
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_num;

    #[test]
    fn counts_are_abbreviated() {
        assert_eq!(fmt_num(999), "999");
        assert_eq!(fmt_num(2601), "2.6K");
        assert_eq!(fmt_num(5_000), "5.0K");
        assert_eq!(fmt_num(1_250_000), "1.25M");
    }
}
