//! Radial visualizer and cursor glow parameters.

/// Radial bar visualizer parameters
#[derive(Debug, Clone)]
pub struct VisualizerParams {
    /// Number of bars around the ring
    pub bar_count: usize,

    /// Scene time advanced per drawn frame (radians of rotation)
    pub time_step: f32,

    /// Alpha of the black wash drawn over the previous frame (trail length)
    pub fade_alpha: f32,

    /// Ring radius as a fraction of the shorter viewport side
    pub max_radius_fraction: f32,

    /// Bar shadow blur (pixels)
    pub shadow_blur_px: f32,

    /// Base bar stroke width (pixels); intensity adds up to `line_width_gain_px`
    pub line_width_px: f32,

    /// Extra stroke width at full intensity (pixels)
    pub line_width_gain_px: f32,

    /// Canvas fade in/out duration on play/pause (seconds)
    pub fade_duration_s: f32,
}

impl Default for VisualizerParams {
    fn default() -> Self {
        Self {
            bar_count: 150,
            time_step: 0.01,
            fade_alpha: 0.2,
            max_radius_fraction: 0.35,
            shadow_blur_px: 15.0,
            line_width_px: 3.0,
            line_width_gain_px: 4.0,
            fade_duration_s: 0.5,
        }
    }
}

/// Spring-damped cursor glow parameters
#[derive(Debug, Clone)]
pub struct CursorParams {
    /// Spring damping coefficient
    pub damping: f32,

    /// Spring stiffness
    pub stiffness: f32,

    /// Simulated mass
    pub mass: f32,

    /// Glow diameter (logical pixels)
    pub diameter_px: f32,

    /// Integration sub-step (seconds)
    /// The spring is stiff (c/m = 150/s), so steps stay well under 2m/c
    pub substep_s: f32,
}

impl Default for CursorParams {
    fn default() -> Self {
        Self {
            damping: 15.0,
            stiffness: 150.0,
            mass: 0.1,
            diameter_px: 24.0,
            substep_s: 0.001,
        }
    }
}
