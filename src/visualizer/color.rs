//! CSS-style colours.

/// Straight (non-premultiplied) RGBA colour, channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from a `0xRRGGBB` literal
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
            1.0,
        )
    }

    /// `rgba(r, g, b, a)` with byte channels; alpha is clamped to `[0, 1]`
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a.clamp(0.0, 1.0),
        )
    }

    /// `hsla(h, s%, l%, a)`; saturation, lightness and alpha are clamped
    pub fn hsla(hue_deg: f32, saturation_pct: f32, lightness_pct: f32, alpha: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0);
        let s = (saturation_pct / 100.0).clamp(0.0, 1.0);
        let l = (lightness_pct / 100.0).clamp(0.0, 1.0);
        let chroma = s * l.min(1.0 - l);

        let channel = |n: f32| {
            let k = (n + h / 30.0) % 12.0;
            l - chroma * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
        };

        Self::new(channel(0.0), channel(8.0), channel(4.0), alpha.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied `[r·a, g·a, b·a, a]`
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array())
            .all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsla_primaries() {
        assert!(close(Rgba::hsla(0.0, 100.0, 50.0, 1.0), Rgba::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(Rgba::hsla(120.0, 100.0, 50.0, 1.0), Rgba::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(Rgba::hsla(240.0, 100.0, 50.0, 0.5), Rgba::new(0.0, 0.0, 1.0, 0.5)));
        assert!(close(Rgba::hsla(360.0, 100.0, 50.0, 1.0), Rgba::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsla_muted_purple() {
        // The outer glow colour
        let purple = Rgba::hsla(270.0, 40.0, 40.0, 0.1);
        assert!(close(purple, Rgba::new(0.4, 0.24, 0.56, 0.1)));
    }

    #[test]
    fn test_hsla_clamps_out_of_range() {
        let white = Rgba::hsla(30.0, 100.0, 120.0, 1.7);
        assert!(close(white, Rgba::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_hex() {
        let pink = Rgba::from_hex(0xff2e89);
        assert_eq!(pink.r, 1.0);
        assert!((pink.g - 46.0 / 255.0).abs() < 1e-6);
        assert!((pink.b - 137.0 / 255.0).abs() < 1e-6);
        assert_eq!(pink.a, 1.0);
    }

    #[test]
    fn test_premultiplied() {
        let c = Rgba::new(1.0, 0.5, 0.0, 0.5).premultiplied();
        assert_eq!(c, [0.5, 0.25, 0.0, 0.5]);
    }
}
