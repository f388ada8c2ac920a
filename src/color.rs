/// Color representation for ring elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Host appearance a resolver may adapt colors to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

/// Context handed to the color resolver once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    pub appearance: Appearance,
}

/// Resolved, interpolable RGBA channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Components {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Components {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel linear blend. The fraction is clamped to `[0, 1]`
    /// before use, so out-of-range fractions land on the nearest endpoint.
    pub fn lerp(self, other: Self, fraction: f64) -> Self {
        let t = fraction.clamp(0.0, 1.0) as f32;
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl From<Color> for Components {
    fn from(color: Color) -> Self {
        Self::new(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
            1.0,
        )
    }
}

/// Converts an abstract color plus appearance context into concrete
/// channel components. Hosts with their own color management implement
/// this; the blending core only ever sees [`Components`].
pub trait ColorResolver {
    /// `None` means the color has no representation in this environment;
    /// the renderer then falls back to opaque black.
    fn resolve(&self, color: Color, env: &Environment) -> Option<Components>;
}

/// Default resolver: 8-bit sRGB mapped straight onto unit channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srgb;

impl ColorResolver for Srgb {
    fn resolve(&self, color: Color, _env: &Environment) -> Option<Components> {
        Some(Components::from(color))
    }
}

pub(crate) fn resolve_or_black(
    resolver: &dyn ColorResolver,
    color: Color,
    env: &Environment,
) -> Components {
    resolver.resolve(color, env).unwrap_or(Components::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        let a = Components::new(0.0, 0.2, 1.0, 1.0);
        let b = Components::new(1.0, 0.8, 0.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_clamps_out_of_range_fractions() {
        let a = Components::new(0.0, 0.0, 0.0, 1.0);
        let b = Components::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a.lerp(b, -3.5), a.lerp(b, 0.0));
        assert_eq!(a.lerp(b, 42.0), a.lerp(b, 1.0));
    }

    #[test]
    fn lerp_is_linear_per_channel() {
        let a = Components::new(0.0, 1.0, 0.5, 1.0);
        let b = Components::new(1.0, 0.0, 0.5, 1.0);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn srgb_resolver_maps_eight_bit_channels() {
        let resolved = Srgb
            .resolve(Color::new(255, 0, 51), &Environment::default())
            .unwrap();
        assert!((resolved.r - 1.0).abs() < 1e-6);
        assert!((resolved.g - 0.0).abs() < 1e-6);
        assert!((resolved.b - 0.2).abs() < 1e-6);
        assert!((resolved.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn resolvers_may_adapt_to_appearance() {
        struct Dimming;
        impl ColorResolver for Dimming {
            fn resolve(&self, color: Color, env: &Environment) -> Option<Components> {
                let mut c = Components::from(color);
                if env.appearance == Appearance::Dark {
                    c.r *= 0.5;
                    c.g *= 0.5;
                    c.b *= 0.5;
                }
                Some(c)
            }
        }
        let color = Color::new(200, 100, 50);
        let lit = Dimming.resolve(color, &Environment::default()).unwrap();
        let dark = Environment {
            appearance: Appearance::Dark,
        };
        let dim = Dimming.resolve(color, &dark).unwrap();
        assert!(dim.r < lit.r);
    }

    #[test]
    fn unresolvable_color_falls_back_to_black() {
        struct Nothing;
        impl ColorResolver for Nothing {
            fn resolve(&self, _color: Color, _env: &Environment) -> Option<Components> {
                None
            }
        }
        let out = resolve_or_black(&Nothing, Color::new(10, 20, 30), &Environment::default());
        assert_eq!(out, Components::BLACK);
    }
}
