//! The intensity feed shared by every audio-reactive effect.

/// Mean byte-frequency level of the latest analysis, in `[0, 255]`
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Intensity(f32);

impl Intensity {
    pub const MAX: f32 = 255.0;

    pub const SILENT: Intensity = Intensity(0.0);

    /// Wrap a raw level, clamping into `[0, 255]` (NaN maps to silence)
    pub fn new(raw: f32) -> Self {
        if raw.is_nan() {
            return Self::SILENT;
        }
        Self(raw.clamp(0.0, Self::MAX))
    }

    pub fn raw(self) -> f32 {
        self.0
    }

    /// Level in `[0, 1]`
    pub fn normalized(self) -> f32 {
        self.0 / Self::MAX
    }
}

/// Page-level styling derived from intensity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageEffects {
    /// Backdrop Gaussian blur (pixels)
    pub blur_px: f32,

    /// Backdrop brightness multiplier
    pub brightness: f32,

    /// Black overlay alpha at the top, middle and bottom of the window
    pub overlay_alphas: [f32; 3],

    /// Logo scale factor
    pub pulse_scale: f32,

    /// Box-shadow blur of the countdown panels (whole pixels, 0..=30)
    pub glow_px: f32,
}

impl PageEffects {
    pub fn from_intensity(intensity: Intensity, max_blur_px: f32) -> Self {
        let n = intensity.normalized();
        Self {
            blur_px: n * max_blur_px,
            brightness: 0.8 + n,
            overlay_alphas: [0.6 - n * 0.3, 0.4 - n * 0.2, 0.7 - n * 0.3],
            pulse_scale: 1.0 + n * 0.5,
            glow_px: (n * 30.0).floor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_is_clamped() {
        assert_eq!(Intensity::new(-4.0).raw(), 0.0);
        assert_eq!(Intensity::new(300.0).raw(), 255.0);
        assert_eq!(Intensity::new(f32::NAN), Intensity::SILENT);
        assert!((Intensity::new(127.5).normalized() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silent_page_effects() {
        let fx = PageEffects::from_intensity(Intensity::SILENT, 10.0);
        assert_eq!(fx.blur_px, 0.0);
        assert!((fx.brightness - 0.8).abs() < 1e-6);
        assert_eq!(fx.overlay_alphas, [0.6, 0.4, 0.7]);
        assert_eq!(fx.pulse_scale, 1.0);
        assert_eq!(fx.glow_px, 0.0);
    }

    #[test]
    fn test_panel_glow_is_floored() {
        let glow = |raw: f32| PageEffects::from_intensity(Intensity::new(raw), 10.0).glow_px;
        assert_eq!(glow(0.0), 0.0);
        assert_eq!(glow(127.5), 15.0);
        assert_eq!(glow(255.0), 30.0);
        // 100 / 255 * 30 = 11.76
        assert_eq!(glow(100.0), 11.0);
    }

    #[test]
    fn test_full_page_effects() {
        let fx = PageEffects::from_intensity(Intensity::new(255.0), 10.0);
        assert!((fx.blur_px - 10.0).abs() < 1e-5);
        assert!((fx.brightness - 1.8).abs() < 1e-5);
        assert!((fx.overlay_alphas[0] - 0.3).abs() < 1e-5);
        assert!((fx.overlay_alphas[1] - 0.2).abs() < 1e-5);
        assert!((fx.overlay_alphas[2] - 0.4).abs() < 1e-5);
        assert!((fx.pulse_scale - 1.5).abs() < 1e-5);
        assert_eq!(fx.glow_px, 30.0);
    }
}
