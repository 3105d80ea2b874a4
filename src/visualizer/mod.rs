//! Radial audio-reactive visualizer.
//!
//! Holds scene time and the play state, and turns the current intensity into a
//! `CanvasFrame` for every frame drawn while playing.

mod color;
mod scene;

pub use color::Rgba;
pub use scene::{build_frame, Band, Bar, CanvasFrame, RadialGradient};

use crate::params::VisualizerParams;
use crate::reactive::Intensity;

/// Eased transition of a scalar between two values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start_s: f32,
    duration_s: f32,
}

impl Tween {
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start_s: 0.0,
            duration_s: 0.0,
        }
    }

    /// Value at time `now_s` (ease-in-out)
    pub fn value(&self, now_s: f32) -> f32 {
        if self.duration_s <= 0.0 {
            return self.to;
        }
        let t = ((now_s - self.start_s) / self.duration_s).clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);
        self.from + (self.to - self.from) * eased
    }

    /// Retarget from wherever the tween currently is
    pub fn retarget(&mut self, to: f32, now_s: f32, duration_s: f32) {
        *self = Self {
            from: self.value(now_s),
            to,
            start_s: now_s,
            duration_s,
        };
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Visualizer state between frames
pub struct Visualizer {
    params: VisualizerParams,
    time: f32,
    playing: bool,
    opacity: Tween,
}

impl Visualizer {
    pub fn new(params: VisualizerParams) -> Self {
        Self {
            params,
            time: 0.0,
            playing: false,
            opacity: Tween::settled(0.0),
        }
    }

    pub fn params(&self) -> &VisualizerParams {
        &self.params
    }

    /// Scene time (advances only on drawn frames)
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start or stop drawing; the canvas fades in or out
    pub fn set_playing(&mut self, playing: bool, now_s: f32) {
        if playing == self.playing {
            return;
        }
        self.playing = playing;
        let target = if playing { 1.0 } else { 0.0 };
        self.opacity
            .retarget(target, now_s, self.params.fade_duration_s);
    }

    /// Canvas layer opacity at `now_s`
    pub fn canvas_opacity(&self, now_s: f32) -> f32 {
        self.opacity.value(now_s)
    }

    /// Advance one frame. Returns nothing while paused or for an empty viewport.
    pub fn advance(
        &mut self,
        intensity: Intensity,
        width: u32,
        height: u32,
        scale: f32,
    ) -> Option<CanvasFrame> {
        if !self.playing || width == 0 || height == 0 {
            return None;
        }
        self.time += self.params.time_step;
        Some(build_frame(
            &self.params,
            self.time,
            intensity,
            width as f32,
            height as f32,
            scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_visualizer_draws_nothing() {
        let mut vis = Visualizer::new(VisualizerParams::default());
        assert!(vis.advance(Intensity::SILENT, 800, 600, 1.0).is_none());
        assert_eq!(vis.time(), 0.0);
    }

    #[test]
    fn test_time_advances_per_drawn_frame() {
        let mut vis = Visualizer::new(VisualizerParams::default());
        vis.set_playing(true, 0.0);
        for _ in 0..10 {
            assert!(vis.advance(Intensity::SILENT, 800, 600, 1.0).is_some());
        }
        assert!((vis.time() - 0.1).abs() < 1e-5);

        // Pause holds scene time, resume continues from it
        vis.set_playing(false, 1.0);
        assert!(vis.advance(Intensity::SILENT, 800, 600, 1.0).is_none());
        vis.set_playing(true, 2.0);
        vis.advance(Intensity::SILENT, 800, 600, 1.0);
        assert!((vis.time() - 0.11).abs() < 1e-5);
    }

    #[test]
    fn test_zero_sized_viewport_is_skipped() {
        let mut vis = Visualizer::new(VisualizerParams::default());
        vis.set_playing(true, 0.0);
        assert!(vis.advance(Intensity::SILENT, 0, 600, 1.0).is_none());
        assert_eq!(vis.time(), 0.0);
    }

    #[test]
    fn test_canvas_fades_in_and_out() {
        let mut vis = Visualizer::new(VisualizerParams::default());
        assert_eq!(vis.canvas_opacity(0.0), 0.0);

        vis.set_playing(true, 1.0);
        assert_eq!(vis.canvas_opacity(1.0), 0.0);
        assert!((vis.canvas_opacity(1.25) - 0.5).abs() < 1e-5);
        assert_eq!(vis.canvas_opacity(1.5), 1.0);

        vis.set_playing(false, 2.0);
        assert_eq!(vis.canvas_opacity(2.5), 0.0);
    }

    #[test]
    fn test_retarget_mid_fade_starts_from_current_value() {
        let mut tween = Tween::settled(0.0);
        tween.retarget(1.0, 0.0, 1.0);
        let halfway = tween.value(0.5);
        tween.retarget(0.0, 0.5, 1.0);
        assert!((tween.value(0.5) - halfway).abs() < 1e-6);
        assert_eq!(tween.target(), 0.0);
    }
}
