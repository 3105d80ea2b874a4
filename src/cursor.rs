//! Spring-damped glow that trails the pointer.

use glam::Vec2;

use crate::params::CursorParams;
use crate::reactive::Intensity;
use crate::visualizer::Rgba;

/// Glow tint (`#ffb366`)
const GLOW_RGB: (u8, u8, u8) = (255, 179, 102);

/// Pointer follower state (physical pixels)
pub struct CursorGlow {
    params: CursorParams,
    target: Vec2,
    position: Vec2,
    velocity: Vec2,
}

/// What to draw for the glow this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    pub center: Vec2,
    /// Disk radius (physical pixels)
    pub radius: f32,
    /// Gradient colour at the center
    pub core: Rgba,
    /// Box-shadow blur (physical pixels)
    pub shadow_blur: f32,
    pub shadow: Rgba,
}

impl CursorGlow {
    pub fn new(params: CursorParams) -> Self {
        Self {
            params,
            target: Vec2::ZERO,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }

    pub fn set_target(&mut self, pointer: Vec2) {
        self.target = pointer;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Integrate the spring over `dt_s` seconds in fixed sub-steps
    pub fn step(&mut self, dt_s: f32) {
        if dt_s <= 0.0 {
            return;
        }
        let p = &self.params;
        let steps = (dt_s / p.substep_s).ceil().max(1.0) as usize;
        let h = dt_s / steps as f32;

        for _ in 0..steps {
            let force = -p.stiffness * (self.position - self.target) - p.damping * self.velocity;
            self.velocity += force / p.mass * h;
            self.position += self.velocity * h;
        }
    }

    /// Style for the current position and intensity; `scale` converts logical to physical pixels
    pub fn style(&self, intensity: Intensity, scale: f32) -> GlowStyle {
        let n = intensity.normalized();
        let (r, g, b) = GLOW_RGB;
        GlowStyle {
            center: self.position,
            radius: self.params.diameter_px * 0.5 * scale,
            core: Rgba::from_rgb8(r, g, b, 0.5 + n * 5.0),
            shadow_blur: (10.0 + n * 20.0) * scale,
            shadow: Rgba::from_rgb8(r, g, b, 0.4 + n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settles_on_target() {
        let mut glow = CursorGlow::new(CursorParams::default());
        glow.set_target(Vec2::new(300.0, 200.0));

        for _ in 0..120 {
            glow.step(1.0 / 60.0);
        }
        assert!(glow.position().distance(Vec2::new(300.0, 200.0)) < 0.5);
    }

    #[test]
    fn test_lags_behind_pointer() {
        let mut glow = CursorGlow::new(CursorParams::default());
        glow.set_target(Vec2::new(100.0, 0.0));
        glow.step(1.0 / 60.0);

        let x = glow.position().x;
        assert!(x > 0.0 && x < 100.0);
    }

    #[test]
    fn test_overdamped_spring_does_not_overshoot() {
        let mut glow = CursorGlow::new(CursorParams::default());
        glow.set_target(Vec2::new(100.0, 0.0));

        for _ in 0..200 {
            glow.step(1.0 / 60.0);
            assert!(glow.position().x <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_large_frame_gap_is_stable() {
        let mut glow = CursorGlow::new(CursorParams::default());
        glow.set_target(Vec2::new(50.0, 50.0));
        glow.step(2.0);
        assert!(glow.position().is_finite());
        assert!(glow.position().distance(Vec2::new(50.0, 50.0)) < 0.5);
    }

    #[test]
    fn test_style_scales_with_intensity() {
        let glow = CursorGlow::new(CursorParams::default());

        let quiet = glow.style(Intensity::SILENT, 1.0);
        assert_eq!(quiet.radius, 12.0);
        assert!((quiet.core.a - 0.5).abs() < 1e-6);
        assert!((quiet.shadow_blur - 10.0).abs() < 1e-6);
        assert!((quiet.shadow.a - 0.4).abs() < 1e-6);

        let loud = glow.style(Intensity::new(255.0), 2.0);
        assert_eq!(loud.radius, 24.0);
        assert_eq!(loud.core.a, 1.0);
        assert!((loud.shadow_blur - 60.0).abs() < 1e-4);
        assert_eq!(loud.shadow.a, 1.0);
    }
}
