use std::fmt;

use rusttype::{point, Font, Scale};

use crate::color::Color;

/// Decorative marker stamped at the head of the ring.
///
/// A symbol is a fixed coverage mask plus a tint; the rasterizer only ever
/// translates and rotates it.
#[derive(Clone)]
pub struct Symbol {
    width: usize,
    height: usize,
    mask: Vec<u8>,
    color: Color,
}

impl Symbol {
    /// Filled disc of the given diameter.
    pub fn dot(diameter: f64, color: Color) -> Self {
        let diameter = diameter.max(1.0);
        let size = diameter.ceil() as usize + 2;
        let radius = diameter / 2.0;
        let center = size as f64 / 2.0;
        let mut mask = vec![0u8; size * size];
        for y in 0..size {
            for x in 0..size {
                let dx = x as f64 + 0.5 - center;
                let dy = y as f64 + 0.5 - center;
                let dist = (dx * dx + dy * dy).sqrt();
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                mask[y * size + x] = (coverage * 255.0).round() as u8;
            }
        }
        Self {
            width: size,
            height: size,
            mask,
            color,
        }
    }

    /// Triangle pointing along the mask's +x axis.
    pub fn arrow(size: f64, color: Color) -> Self {
        let size = size.max(2.0);
        let w = size.ceil() as usize + 2;
        let h = w;
        let (ax, ay) = (1.0, 1.0);
        let (bx, by) = (w as f64 - 1.0, h as f64 / 2.0);
        let (cx, cy) = (1.0, h as f64 - 1.0);
        // Signed distance to an edge, positive on the interior side.
        let edge = |px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64| {
            let (dx, dy) = (x1 - x0, y1 - y0);
            ((dx * (py - y0)) - (dy * (px - x0))) / (dx * dx + dy * dy).sqrt()
        };
        let mut mask = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let d = edge(px, py, ax, ay, bx, by)
                    .min(edge(px, py, bx, by, cx, cy))
                    .min(edge(px, py, cx, cy, ax, ay));
                let coverage = (d + 0.5).clamp(0.0, 1.0);
                mask[y * w + x] = (coverage * 255.0).round() as u8;
            }
        }
        Self {
            width: w,
            height: h,
            mask,
            color,
        }
    }

    /// Rasterizes one glyph from host-supplied font bytes into a symbol.
    /// Returns `None` if the font fails to parse or the glyph has no outline.
    pub fn from_glyph(font_data: &[u8], ch: char, size_px: f32, color: Color) -> Option<Self> {
        let font = Font::try_from_vec(font_data.to_vec())?;
        let glyph = font
            .glyph(ch)
            .scaled(Scale::uniform(size_px))
            .positioned(point(0.0, 0.0));
        let bb = glyph.pixel_bounding_box()?;
        let width = (bb.max.x - bb.min.x).max(0) as usize;
        let height = (bb.max.y - bb.min.y).max(0) as usize;
        if width == 0 || height == 0 {
            return None;
        }
        let mut mask = vec![0u8; width * height];
        glyph.draw(|x, y, v| {
            mask[y as usize * width + x as usize] = (v * 255.0).round() as u8;
        });
        Some(Self {
            width,
            height,
            mask,
            color,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Coverage at a mask cell, in `[0, 1]`.
    pub fn coverage(&self, x: usize, y: usize) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.mask[y * self.width + x] as f32 / 255.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color", &self.color)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_opaque_in_the_middle_and_empty_in_corners() {
        let dot = Symbol::dot(10.0, Color::new(255, 255, 255));
        let mid = (dot.width() / 2, dot.height() / 2);
        assert!(dot.coverage(mid.0, mid.1) > 0.99);
        assert_eq!(dot.coverage(0, 0), 0.0);
    }

    #[test]
    fn arrow_points_along_positive_x() {
        let arrow = Symbol::arrow(12.0, Color::new(255, 255, 255));
        let tip = (arrow.width() - 3, arrow.height() / 2);
        let behind_tip = (arrow.width() - 3, 1);
        assert!(arrow.coverage(tip.0, tip.1) > 0.5);
        assert_eq!(arrow.coverage(behind_tip.0, behind_tip.1), 0.0);
    }

    #[test]
    fn from_glyph_rejects_garbage_font_data() {
        assert!(Symbol::from_glyph(&[0u8; 16], 'x', 24.0, Color::new(0, 0, 0)).is_none());
    }

    #[test]
    fn coverage_out_of_bounds_is_zero() {
        let dot = Symbol::dot(4.0, Color::new(0, 0, 0));
        assert_eq!(dot.coverage(1000, 0), 0.0);
    }
}
