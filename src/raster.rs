//! Software rasterizer executing a scene into an RGBA8 frame.

use crate::color::{Color, Components};
use crate::config::RingConfig;
use crate::scene::{PaintOp, Scene};
use crate::symbol::Symbol;

/// RGBA8 framebuffer view a scene is rasterized into.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Color) {
        let (r, g, b) = color.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Components, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = (color.a * alpha).clamp(0.0, 1.0);
        let src = [color.r * 255.0, color.g * 255.0, color.b * 255.0];
        for c in 0..3 {
            let dst = self.frame[idx + c] as f32;
            self.frame[idx + c] = (src[c] * a + dst * (1.0 - a)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }
}

/// Rasterizes one frame's scene.
///
/// The scene's rigid rotation is applied to every op center about the
/// ring center; circles are rotation-invariant beyond that, and symbol
/// masks additionally rotate about their own center.
pub fn render_scene(canvas: &mut Canvas, scene: &Scene, config: &RingConfig) {
    let rot = scene.rotation_degrees.to_radians();
    let (sin_r, cos_r) = rot.sin_cos();
    let place = |x: f64, y: f64| {
        let (dx, dy) = (x - scene.cx, y - scene.cy);
        (
            scene.cx + dx * cos_r - dy * sin_r,
            scene.cy + dx * sin_r + dy * cos_r,
        )
    };

    for op in &scene.ops {
        match op {
            PaintOp::Track {
                cx,
                cy,
                radius,
                width,
                color,
            } => {
                let (cx, cy) = place(*cx, *cy);
                stroke_circle(canvas, cx, cy, *radius, *width, *color);
            }
            PaintOp::Stamp {
                cx,
                cy,
                diameter,
                color,
            } => {
                let (cx, cy) = place(*cx, *cy);
                fill_circle(canvas, cx, cy, diameter / 2.0, *color);
            }
            PaintOp::Shadow {
                cx,
                cy,
                diameter,
                blur,
                alpha,
            } => {
                let (cx, cy) = place(*cx, *cy);
                shadow_disc(canvas, cx, cy, diameter / 2.0, *blur, *alpha);
            }
            PaintOp::Symbol {
                cx,
                cy,
                rotation_degrees,
            } => {
                if let Some(symbol) = &config.symbol {
                    let (cx, cy) = place(*cx, *cy);
                    let rotation = (rotation_degrees + scene.rotation_degrees).to_radians();
                    draw_symbol(canvas, symbol, cx, cy, rotation);
                }
            }
        }
    }
}

fn fill_circle(canvas: &mut Canvas, cx: f64, cy: f64, radius: f64, color: Components) {
    let reach = radius.ceil() as i32 + 1;
    let (icx, icy) = (cx.round() as i32, cy.round() as i32);
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (px, py) = (icx + dx, icy + dy);
            let dist = ((px as f64 - cx).powi(2) + (py as f64 - cy).powi(2)).sqrt();
            let aa = (radius + 0.5 - dist).clamp(0.0, 1.0);
            if aa > 0.004 {
                canvas.set_pixel(px, py, color, aa as f32);
            }
        }
    }
}

fn stroke_circle(canvas: &mut Canvas, cx: f64, cy: f64, radius: f64, width: f64, color: Components) {
    let outer = radius + width / 2.0;
    let inner = (radius - width / 2.0).max(0.0);
    let reach = outer.ceil() as i32 + 1;
    let (icx, icy) = (cx.round() as i32, cy.round() as i32);
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (px, py) = (icx + dx, icy + dy);
            let dist = ((px as f64 - cx).powi(2) + (py as f64 - cy).powi(2)).sqrt();
            let aa = (outer + 0.5 - dist).clamp(0.0, 1.0) * (dist - inner + 0.5).clamp(0.0, 1.0);
            if aa > 0.004 {
                canvas.set_pixel(px, py, color, aa as f32);
            }
        }
    }
}

fn shadow_disc(canvas: &mut Canvas, cx: f64, cy: f64, radius: f64, blur: f64, alpha: f32) {
    let blur = blur.max(0.0);
    let outer = radius + blur;
    let reach = outer.ceil() as i32 + 1;
    let (icx, icy) = (cx.round() as i32, cy.round() as i32);
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (px, py) = (icx + dx, icy + dy);
            let dist = ((px as f64 - cx).powi(2) + (py as f64 - cy).powi(2)).sqrt();
            let falloff = if dist <= radius {
                1.0
            } else if blur > 0.0 {
                (1.0 - (dist - radius) / blur).clamp(0.0, 1.0)
            } else {
                (radius + 0.5 - dist).clamp(0.0, 1.0)
            };
            let a = alpha * falloff as f32;
            if a > 0.004 {
                canvas.set_pixel(px, py, Components::BLACK, a);
            }
        }
    }
}

fn draw_symbol(canvas: &mut Canvas, symbol: &Symbol, cx: f64, cy: f64, rotation: f64) {
    let (sin_r, cos_r) = rotation.sin_cos();
    let half_w = symbol.width() as f64 / 2.0;
    let half_h = symbol.height() as f64 / 2.0;
    let color = Components::from(symbol.color());
    for my in 0..symbol.height() {
        for mx in 0..symbol.width() {
            let coverage = symbol.coverage(mx, my);
            if coverage <= 0.004 {
                continue;
            }
            let lx = mx as f64 + 0.5 - half_w;
            let ly = my as f64 + 0.5 - half_h;
            let fx = cx + lx * cos_r - ly * sin_r;
            let fy = cy + lx * sin_r + ly * cos_r;
            splat(canvas, fx, fy, color, coverage);
        }
    }
}

// Bilinear sub-pixel splat across the four nearest pixels.
fn splat(canvas: &mut Canvas, x: f64, y: f64, color: Components, alpha: f32) {
    let (x0, y0) = (x.floor() as i32, y.floor() as i32);
    let (fx, fy) = (x - x0 as f64, y - y0 as f64);
    let samples = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];
    for (px, py, weight) in samples {
        let a = alpha * weight as f32;
        if a > 0.004 {
            canvas.set_pixel(px, py, color, a);
        }
    }
}
