//! Per-frame scene composition: a progress value in, a paint command list out.

use crate::color::{resolve_or_black, ColorResolver, Components, Environment};
use crate::config::RingConfig;

/// Angular distance between stamps, in degrees. This is the sampling
/// resolution of the stamped-circle gradient technique.
pub const STEP_DEGREES: f64 = 2.0;

/// Surfaces whose smaller side is at or below this render nothing.
const MIN_SURFACE: f64 = 10.0;

/// Lap angle where the head shadow starts ramping in.
const SHADOW_RAMP_START: f64 = 335.0;
/// Angular span over which the shadow ramps to full strength.
const SHADOW_RAMP_SPAN: f64 = 25.0;
/// Shadow opacity at the end of the ramp.
const SHADOW_MAX_ALPHA: f32 = 0.33;

/// One primitive paint operation of a frame.
///
/// Geometry is stored unrotated; the rigid rotation carried on the
/// [`Scene`] is applied when the ops are rasterized.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Full-circle background stroke behind the sweep.
    Track {
        cx: f64,
        cy: f64,
        radius: f64,
        width: f64,
        color: Components,
    },
    /// One filled circle of the sweep.
    Stamp {
        cx: f64,
        cy: f64,
        diameter: f64,
        color: Components,
    },
    /// Soft black disc behind the head stamp.
    Shadow {
        cx: f64,
        cy: f64,
        diameter: f64,
        blur: f64,
        alpha: f32,
    },
    /// The decorative head marker. Rotation is relative to the mask's
    /// own axes; the scene rotation is added on top at raster time.
    Symbol {
        cx: f64,
        cy: f64,
        rotation_degrees: f64,
    },
}

/// Paint command list for one frame.
#[derive(Debug, Clone)]
pub struct Scene {
    pub ops: Vec<PaintOp>,
    /// Ring center the rigid rotation pivots around.
    pub cx: f64,
    pub cy: f64,
    /// Rigid rotation of the whole frame, applied at raster time.
    pub rotation_degrees: f64,
}

/// Cursor start for the stamp walk. Sweeps past one lap draw only the
/// current lap as the head region; earlier laps sit underneath as
/// full-color fill. An exact multiple of 360 counts as a closed lap,
/// not a fresh empty one.
fn start_cursor(total: f64) -> f64 {
    if total > 360.0 {
        let wrapped = total % 360.0;
        if wrapped == 0.0 {
            360.0
        } else {
            wrapped
        }
    } else {
        0.0
    }
}

/// Builds the paint command list for one frame.
///
/// Pure and deterministic: the output depends only on the arguments.
/// Degenerate surfaces yield an empty scene, never an error.
pub fn compose(
    width: f64,
    height: f64,
    config: &RingConfig,
    progress: f64,
    resolver: &dyn ColorResolver,
    env: &Environment,
) -> Scene {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let mut scene = Scene {
        ops: Vec::new(),
        cx,
        cy,
        rotation_degrees: config.rotation_degrees,
    };

    let line_width = config.stroke_width();
    let min_size = width.min(height);
    let radius = (min_size - line_width) / 2.0;
    if min_size <= MIN_SURFACE || radius <= 0.0 {
        log::debug!("ring frame skipped: surface {width}x{height} too small");
        return scene;
    }

    let progress = if progress.is_finite() {
        progress.max(0.0)
    } else {
        log::warn!("non-finite progress treated as 0");
        0.0
    };
    let total = progress * 360.0;

    let start = resolve_or_black(resolver, config.start_color, env);
    let end = resolve_or_black(resolver, config.end_color, env);

    if total < 360.0 {
        if let Some(track) = config.placeholder_color {
            scene.ops.push(PaintOp::Track {
                cx,
                cy,
                radius,
                width: line_width,
                color: resolve_or_black(resolver, track, env),
            });
        }
    }

    let mut a = start_cursor(total);
    loop {
        let rad = a.to_radians();
        let sx = cx + radius * rad.cos();
        let sy = cy + radius * rad.sin();
        // Past one lap the gradient is spread over the whole accumulated
        // angle, compressing it across laps.
        let fraction = if total > 360.0 { a / total } else { a / 360.0 };
        let color = start.lerp(end, fraction);
        let is_head = a + STEP_DEGREES > total;

        if is_head && a + STEP_DEGREES > SHADOW_RAMP_START {
            if let Some(blur) = config.head_shadow_radius {
                let ramp = ((a - SHADOW_RAMP_START) / SHADOW_RAMP_SPAN).clamp(0.0, 1.0);
                scene.ops.push(PaintOp::Shadow {
                    cx: sx,
                    cy: sy,
                    diameter: line_width,
                    blur,
                    alpha: SHADOW_MAX_ALPHA * ramp as f32,
                });
            }
        }

        scene.ops.push(PaintOp::Stamp {
            cx: sx,
            cy: sy,
            diameter: line_width,
            color,
        });

        if is_head {
            if config.symbol.is_some() {
                let spin = if config.symbol_rotates { a } else { 0.0 };
                scene.ops.push(PaintOp::Symbol {
                    cx: sx,
                    cy: sy,
                    rotation_degrees: spin - config.rotation_degrees,
                });
            }
            break;
        }
        a += STEP_DEGREES;
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_at_zero_through_the_first_lap() {
        assert_eq!(start_cursor(0.0), 0.0);
        assert_eq!(start_cursor(180.0), 0.0);
        assert_eq!(start_cursor(360.0), 0.0);
    }

    #[test]
    fn cursor_wraps_past_one_lap() {
        assert_eq!(start_cursor(540.0), 180.0);
        assert_eq!(start_cursor(400.0), 40.0);
    }

    #[test]
    fn exact_lap_multiples_count_as_a_closed_lap() {
        assert_eq!(start_cursor(720.0), 360.0);
        assert_eq!(start_cursor(1080.0), 360.0);
    }
}
