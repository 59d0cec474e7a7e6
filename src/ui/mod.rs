pub mod overlay;
pub mod theme;

pub use overlay::{OverlayStats, draw_stats_overlay};
pub use theme::apply_theme;
