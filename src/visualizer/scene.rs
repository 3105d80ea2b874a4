//! Per-frame radial scene geometry and colours.
//!
//! Everything here is in canvas pixels with the origin at the top-left and y
//! pointing down. The GPU layer only rasterises what this module produces.

use glam::Vec2;
use std::f32::consts::TAU;

use super::color::Rgba;
use crate::params::VisualizerParams;
use crate::reactive::Intensity;

/// Concentric radial gradient with up to three stops.
///
/// Inside `inner_radius` the first stop colour applies, beyond `outer_radius` the last.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub stops: [(f32, Rgba); 3],
}

impl RadialGradient {
    /// Uniform fill over the whole canvas
    pub fn flat(color: Rgba) -> Self {
        Self {
            center: Vec2::ZERO,
            inner_radius: 0.0,
            outer_radius: 1.0,
            stops: [(0.0, color), (1.0, color), (1.0, color)],
        }
    }

    pub fn two_stop(center: Vec2, radii: (f32, f32), from: Rgba, to: Rgba) -> Self {
        Self {
            center,
            inner_radius: radii.0,
            outer_radius: radii.1,
            stops: [(0.0, from), (1.0, to), (1.0, to)],
        }
    }

    /// Premultiplied colour at a point
    pub fn color_at(&self, point: Vec2) -> [f32; 4] {
        let span = self.outer_radius - self.inner_radius;
        let t = if span > 0.0 {
            ((point.distance(self.center) - self.inner_radius) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let [(o0, c0), (o1, c1), (o2, c2)] = self.stops;
        let (from, to, local) = if t <= o0 {
            (c0, c0, 0.0)
        } else if t <= o1 {
            (c0, c1, segment(t, o0, o1))
        } else {
            (c1, c2, segment(t, o1, o2))
        };
        mix(from.premultiplied(), to.premultiplied(), local)
    }
}

fn segment(t: f32, start: f32, end: f32) -> f32 {
    if end > start {
        ((t - start) / (end - start)).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t)
}

/// Colour band a bar falls into, by its position along the rotating ring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    PurpleToPink,
    PinkToOrange,
    OrangeToPurple,
}

impl Band {
    pub fn from_progress(progress: f32) -> Self {
        if progress < 0.33 {
            Band::PurpleToPink
        } else if progress < 0.66 {
            Band::PinkToOrange
        } else {
            Band::OrangeToPurple
        }
    }

    /// Gradient colours from the outer end of the bar to the inner end
    pub fn gradient(self, n: f32) -> [Rgba; 2] {
        let lift = n * 20.0;
        match self {
            Band::PurpleToPink => [
                Rgba::hsla(260.0, 100.0, 60.0 + lift, 0.5 + n * 0.5),
                Rgba::hsla(340.0, 100.0, 70.0 + lift, 0.4 + n * 0.4),
            ],
            Band::PinkToOrange => [
                Rgba::hsla(340.0, 100.0, 50.0 + lift, 0.4 + n * 0.6),
                Rgba::hsla(30.0, 100.0, 60.0 + lift, 0.3 + n * 0.4),
            ],
            Band::OrangeToPurple => [
                Rgba::hsla(30.0, 100.0, 60.0 + lift, 0.4 + n * 0.6),
                Rgba::hsla(270.0, 40.0, 40.0 + lift, 0.3 + n * 0.4),
            ],
        }
    }

    /// Shadow glow colour
    pub fn glow(self) -> Rgba {
        match self {
            Band::PurpleToPink => Rgba::from_hex(0x6d4dff),
            Band::PinkToOrange => Rgba::from_hex(0xff2e89),
            Band::OrangeToPurple => Rgba::from_hex(0xffb366),
        }
    }
}

/// One round-capped stroke of the ring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    /// Outer end (gradient start)
    pub start: Vec2,
    /// Inner end (gradient end)
    pub end: Vec2,
    pub width: f32,
    pub colors: [Rgba; 2],
    /// Shadow colour, if the bar casts one
    pub shadow: Option<Rgba>,
}

/// Everything drawn onto the trail canvas in one frame, in paint order
#[derive(Clone, Debug)]
pub struct CanvasFrame {
    pub width: f32,
    pub height: f32,
    pub fade: RadialGradient,
    pub outer_glow: RadialGradient,
    pub bars: Vec<Bar>,
    pub shadow_blur: f32,
    pub center_glow: RadialGradient,
}

/// Build the scene for scene time `time` on a `width` x `height` pixel canvas.
///
/// `scale` converts the stroke width and shadow blur from logical to physical pixels.
pub fn build_frame(
    params: &VisualizerParams,
    time: f32,
    intensity: Intensity,
    width: f32,
    height: f32,
    scale: f32,
) -> CanvasFrame {
    let n = intensity.normalized();
    let center = Vec2::new(width / 2.0, height / 2.0);
    let max_radius = width.min(height) * params.max_radius_fraction;

    let outer_glow = RadialGradient::two_stop(
        center,
        (max_radius * 0.5, max_radius * 1.2),
        Rgba::hsla(270.0, 40.0, 40.0, 0.1 + n * 0.15),
        Rgba::TRANSPARENT,
    );

    let center_glow = RadialGradient {
        center,
        inner_radius: 0.0,
        outer_radius: max_radius * 0.5,
        stops: [
            (0.0, Rgba::hsla(340.0, 100.0, 50.0, 0.2 + n * 0.3)),
            (0.5, Rgba::hsla(30.0, 100.0, 50.0, 0.1 + n * 0.2)),
            (1.0, Rgba::TRANSPARENT),
        ],
    };

    CanvasFrame {
        width,
        height,
        fade: RadialGradient::flat(Rgba::new(0.0, 0.0, 0.0, params.fade_alpha)),
        outer_glow,
        bars: build_bars(params, time, n, center, max_radius, scale),
        shadow_blur: params.shadow_blur_px * scale,
        center_glow,
    }
}

fn build_bars(
    params: &VisualizerParams,
    time: f32,
    n: f32,
    center: Vec2,
    max_radius: f32,
    scale: f32,
) -> Vec<Bar> {
    let count = params.bar_count;
    let step = TAU / count as f32;
    let rotation = Vec2::from_angle(time);
    let width = (params.line_width_px + n * params.line_width_gain_px) * scale;

    // The shadow set after a stroke applies to the next one
    let mut pending_shadow: Option<Rgba> = None;

    (0..count)
        .map(|i| {
            let fi = i as f32;
            let direction = rotation.rotate(Vec2::from_angle(fi * step));

            let wave = (time * 2.0 + fi * 0.2).sin() * 0.2;
            let bar_height = max_radius * 0.15 + max_radius * 0.4 * n * (1.0 + wave);
            let start_radius = max_radius * (0.8 + (time + fi * 0.1).sin() * 0.1);

            let band = Band::from_progress((fi / count as f32 + time * 0.1).rem_euclid(1.0));

            let bar = Bar {
                start: center + direction * start_radius,
                end: center + direction * (start_radius - bar_height),
                width,
                colors: band.gradient(n),
                shadow: pending_shadow,
            };
            pending_shadow = Some(band.glow());
            bar
        })
        .collect()
}
