use bon::Builder;

use crate::color::Color;
use crate::symbol::Symbol;

/// Smallest stroke width the ring renders with; thinner values are
/// widened to this.
pub const MIN_LINE_WIDTH: f64 = 2.0;

/// Style and window configuration for a [`Ring`](crate::Ring).
///
/// A config is immutable for the duration of one frame; supplying a new
/// one per frame (e.g. to animate colors) is expected and cheap.
#[derive(Debug, Clone, Builder)]
pub struct RingConfig {
    /// Stroke thickness of the ring. Values below 2 render as 2.
    #[builder(default = 8.0)]
    pub line_width: f64,
    /// Gradient color at 0% of a lap.
    #[builder(default = Color::new(0x00, 0x7f, 0xff))]
    pub start_color: Color,
    /// Gradient color at 100% of a lap.
    #[builder(default = Color::new(0x30, 0xd1, 0x58))]
    pub end_color: Color,
    /// Background track color. No track is drawn when unset, and none is
    /// drawn once progress completes a full lap.
    pub placeholder_color: Option<Color>,
    /// Blur radius of the drop shadow trailing the head. No shadow when unset.
    pub head_shadow_radius: Option<f64>,
    /// Rigid rotation of the whole ring, in degrees. The default of -90
    /// starts the sweep at 12 o'clock.
    #[builder(default = -90.0)]
    pub rotation_degrees: f64,
    /// Whether the symbol spins with the head instead of staying upright.
    #[builder(default = false)]
    pub symbol_rotates: bool,
    /// Decorative marker stamped at the head of the sweep.
    pub symbol: Option<Symbol>,

    // Window configuration, used by the built-in runtime only
    #[builder(default = "".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    /// Per-frame easing factor pulling displayed progress toward its target.
    #[builder(default = 0.15)]
    pub progress_lerp_factor: f64,
    pub background_color: Option<Color>,
}

impl RingConfig {
    /// Effective stroke width with the minimum applied.
    pub fn stroke_width(&self) -> f64 {
        if self.line_width.is_finite() {
            self.line_width.max(MIN_LINE_WIDTH)
        } else {
            MIN_LINE_WIDTH
        }
    }
}
