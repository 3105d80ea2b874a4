//! GPU-side layouts for the scene and compose passes.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::cursor::GlowStyle;
use crate::panels::Panel;
use crate::reactive::PageEffects;
use crate::visualizer::{Bar, RadialGradient};

/// Radial fill (fade wash, outer glow, center glow)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RadialUniforms {
    pub center: [f32; 2],
    pub radii: [f32; 2],
    pub offsets: [f32; 4],
    /// Premultiplied stop colours
    pub colors: [[f32; 4]; 3],
}

impl From<&RadialGradient> for RadialUniforms {
    fn from(gradient: &RadialGradient) -> Self {
        let [(o0, c0), (o1, c1), (o2, c2)] = gradient.stops;
        Self {
            center: gradient.center.to_array(),
            radii: [gradient.inner_radius, gradient.outer_radius],
            offsets: [o0, o1, o2, 0.0],
            colors: [c0.premultiplied(), c1.premultiplied(), c2.premultiplied()],
        }
    }
}

/// Viewport size for pixel-space vertex shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ViewportUniforms {
    pub size: [f32; 2],
    pub _padding: [f32; 2],
}

impl ViewportUniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            _padding: [0.0; 2],
        }
    }
}

/// Per-instance bar data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BarInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    /// Half stroke width, shadow sigma, unused, unused
    pub params: [f32; 4],
    /// Premultiplied gradient colour at `start`
    pub color0: [f32; 4],
    /// Premultiplied gradient colour at `end`
    pub color1: [f32; 4],
    /// Straight shadow colour; alpha 0 disables the shadow
    pub shadow: [f32; 4],
}

impl BarInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    /// Canvas shadows use a Gaussian with sigma = blur / 2
    pub fn new(bar: &Bar, shadow_blur: f32) -> Self {
        Self {
            start: bar.start.to_array(),
            end: bar.end.to_array(),
            params: [bar.width * 0.5, shadow_blur * 0.5, 0.0, 0.0],
            color0: bar.colors[0].premultiplied(),
            color1: bar.colors[1].premultiplied(),
            shadow: bar.shadow.map(|c| c.to_array()).unwrap_or([0.0; 4]),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BarInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Error function, Abramowitz & Stegun 7.1.26 (same approximation as the shaders)
pub fn erf_approx(x: f32) -> f32 {
    let a = x.abs();
    let t = 1.0 / (1.0 + 0.327_591_1 * a);
    let poly = ((((1.061_405_4 * t - 1.453_152) * t + 1.421_413_8) * t - 0.284_496_74) * t
        + 0.254_829_6)
        * t;
    x.signum() * (1.0 - poly * (-a * a).exp())
}

/// Shadow coverage `dist` pixels from a stroke's axis: a strip of half width
/// `half_width` convolved with a Gaussian of `sigma`. Mirrors `bars.wgsl`.
pub fn stroke_shadow_spread(dist: f32, half_width: f32, sigma: f32) -> f32 {
    let k = 1.0 / (sigma * std::f32::consts::SQRT_2);
    0.5 * (erf_approx((dist + half_width) * k) - erf_approx((dist - half_width) * k))
}

/// Blurred box shadow of the rectangle `[min, max]` at `p`. Mirrors `panel.wgsl`.
pub fn box_shadow_spread(p: Vec2, min: Vec2, max: Vec2, sigma: f32) -> f32 {
    let k = 1.0 / (sigma * std::f32::consts::SQRT_2);
    let along = |p: f32, lo: f32, hi: f32| 0.5 * (erf_approx((p - lo) * k) - erf_approx((p - hi) * k));
    along(p.x, min.x, max.x) * along(p.y, min.y, max.y)
}

/// Per-instance countdown panel data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PanelInstance {
    /// Left, top, right, bottom (pixels)
    pub rect: [f32; 4],
    /// Corner radius, shadow sigma, unused, unused
    pub params: [f32; 4],
    /// Premultiplied fill
    pub fill: [f32; 4],
    /// Straight shadow colour
    pub shadow: [f32; 4],
}

impl PanelInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x4,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4
    ];

    /// CSS box-shadow blur maps to a Gaussian with sigma = blur / 2
    pub fn new(panel: &Panel) -> Self {
        Self {
            rect: [panel.min.x, panel.min.y, panel.max.x, panel.max.y],
            params: [panel.radius, panel.shadow_blur * 0.5, 0.0, 0.0],
            fill: panel.fill.premultiplied(),
            shadow: panel.shadow.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PanelInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Backdrop image fit, filters and overlay gradient
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BackdropUniforms {
    pub uv_scale: [f32; 2],
    pub uv_offset: [f32; 2],
    /// Blur sigma in texture coordinates, per axis
    pub blur_uv: [f32; 2],
    pub brightness: f32,
    pub _padding: f32,
    /// Overlay alpha at top, middle, bottom (w unused)
    pub overlay: [f32; 4],
}

impl BackdropUniforms {
    pub fn new(effects: &PageEffects, image_size: (u32, u32), viewport: (u32, u32)) -> Self {
        let (uv_scale, uv_offset) = cover_uv_transform(image_size, viewport);
        let (vw, vh) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
        let [top, middle, bottom] = effects.overlay_alphas;
        Self {
            uv_scale,
            uv_offset,
            blur_uv: [
                effects.blur_px / vw * uv_scale[0],
                effects.blur_px / vh * uv_scale[1],
            ],
            brightness: effects.brightness,
            _padding: 0.0,
            overlay: [top, middle, bottom, 0.0],
        }
    }
}

/// Object-cover fit: scale the image to fill the viewport and crop the overflow evenly.
///
/// Returns `(uv_scale, uv_offset)` mapping screen UV to image UV.
pub fn cover_uv_transform(image_size: (u32, u32), viewport: (u32, u32)) -> ([f32; 2], [f32; 2]) {
    let image_aspect = image_size.0.max(1) as f32 / image_size.1.max(1) as f32;
    let view_aspect = viewport.0.max(1) as f32 / viewport.1.max(1) as f32;

    if view_aspect > image_aspect {
        // Viewport is wider: fit width, crop top and bottom
        let sy = image_aspect / view_aspect;
        ([1.0, sy], [0.0, (1.0 - sy) / 2.0])
    } else {
        let sx = view_aspect / image_aspect;
        ([sx, 1.0], [(1.0 - sx) / 2.0, 0.0])
    }
}

/// Textured quad (trail canvas, logo)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LayerUniforms {
    /// Clip-space left, top, right, bottom
    pub rect: [f32; 4],
    pub opacity: f32,
    /// 1.0 when the texture holds straight alpha
    pub premultiply: f32,
    pub _padding: [f32; 2],
}

impl LayerUniforms {
    /// Whole viewport, texture already premultiplied
    pub fn fullscreen(opacity: f32) -> Self {
        Self {
            rect: [-1.0, 1.0, 1.0, -1.0],
            opacity,
            premultiply: 0.0,
            _padding: [0.0; 2],
        }
    }

    /// Straight-alpha image of `size` pixels centered on `center`
    pub fn centered(center: Vec2, size: Vec2, viewport: Vec2, opacity: f32) -> Self {
        let min = center - size * 0.5;
        let max = center + size * 0.5;
        let to_clip = |p: Vec2| Vec2::new(p.x / viewport.x * 2.0 - 1.0, 1.0 - p.y / viewport.y * 2.0);
        let top_left = to_clip(min);
        let bottom_right = to_clip(max);
        Self {
            rect: [top_left.x, top_left.y, bottom_right.x, bottom_right.y],
            opacity,
            premultiply: 1.0,
            _padding: [0.0; 2],
        }
    }
}

/// Cursor glow disk and its box shadow
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlowUniforms {
    pub center: [f32; 2],
    pub viewport: [f32; 2],
    pub radius: f32,
    pub shadow_sigma: f32,
    pub _padding: [f32; 2],
    /// Straight colour at the disk center
    pub core: [f32; 4],
    /// Straight box-shadow colour
    pub shadow: [f32; 4],
}

impl GlowUniforms {
    /// CSS box-shadow blur maps to a Gaussian with sigma = blur / 2
    pub fn new(style: &GlowStyle, viewport: (u32, u32)) -> Self {
        Self {
            center: style.center.to_array(),
            viewport: [viewport.0 as f32, viewport.1 as f32],
            radius: style.radius,
            shadow_sigma: style.shadow_blur * 0.5,
            _padding: [0.0; 2],
            core: style.core.to_array(),
            shadow: style.shadow.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Intensity;
    use crate::visualizer::Rgba;

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<RadialUniforms>(), 80);
        assert_eq!(std::mem::size_of::<ViewportUniforms>(), 16);
        assert_eq!(std::mem::size_of::<BarInstance>(), 80);
        assert_eq!(std::mem::size_of::<BackdropUniforms>(), 48);
        assert_eq!(std::mem::size_of::<LayerUniforms>(), 32);
        assert_eq!(std::mem::size_of::<GlowUniforms>(), 64);
        assert_eq!(std::mem::size_of::<PanelInstance>(), 64);
    }

    #[test]
    fn test_cover_wide_viewport_crops_vertically() {
        // 1:1 image on a 2:1 viewport shows the middle half of the image
        let (scale, offset) = cover_uv_transform((100, 100), (200, 100));
        assert_eq!(scale, [1.0, 0.5]);
        assert_eq!(offset, [0.0, 0.25]);
    }

    #[test]
    fn test_cover_tall_viewport_crops_horizontally() {
        let (scale, offset) = cover_uv_transform((200, 100), (100, 100));
        assert_eq!(scale, [0.5, 1.0]);
        assert_eq!(offset, [0.25, 0.0]);
    }

    #[test]
    fn test_cover_matching_aspect_is_identity() {
        let (scale, offset) = cover_uv_transform((1920, 1080), (1280, 720));
        assert!((scale[0] - 1.0).abs() < 1e-6 && (scale[1] - 1.0).abs() < 1e-6);
        assert!(offset[0].abs() < 1e-6 && offset[1].abs() < 1e-6);
    }

    #[test]
    fn test_backdrop_blur_in_texture_units() {
        let effects = PageEffects::from_intensity(Intensity::new(255.0), 10.0);
        let uniforms = BackdropUniforms::new(&effects, (100, 100), (200, 100));
        assert!((uniforms.blur_uv[0] - 10.0 / 200.0).abs() < 1e-6);
        assert!((uniforms.blur_uv[1] - 10.0 / 100.0 * 0.5).abs() < 1e-6);
        assert!((uniforms.brightness - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_centered_layer_rect() {
        let layer = LayerUniforms::centered(
            Vec2::new(100.0, 50.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(200.0, 100.0),
            1.0,
        );
        assert_eq!(layer.rect, [-0.5, 0.5, 0.5, -0.5]);
        assert_eq!(layer.premultiply, 1.0);
    }

    #[test]
    fn test_bar_instance_without_shadow() {
        let bar = Bar {
            start: Vec2::new(10.0, 0.0),
            end: Vec2::new(5.0, 0.0),
            width: 4.0,
            colors: [Rgba::new(1.0, 0.0, 0.0, 0.5), Rgba::TRANSPARENT],
            shadow: None,
        };
        let instance = BarInstance::new(&bar, 15.0);
        assert_eq!(instance.params[0], 2.0);
        assert_eq!(instance.params[1], 7.5);
        assert_eq!(instance.color0, [0.5, 0.0, 0.0, 0.5]);
        assert_eq!(instance.shadow[3], 0.0);
    }

    #[test]
    fn test_erf_approx() {
        assert!(erf_approx(0.0).abs() < 1e-6);
        assert!((erf_approx(0.5) - 0.520_499_9).abs() < 1e-5);
        assert!((erf_approx(-1.0) + 0.842_700_8).abs() < 1e-5);
        assert!((erf_approx(4.0) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stroke_shadow_blurs_the_strip() {
        // Default stroke: half width 1.5, blur 15 -> sigma 7.5
        let center = stroke_shadow_spread(0.0, 1.5, 7.5);
        let edge = stroke_shadow_spread(1.5, 1.5, 7.5);
        assert!((center - 0.1585).abs() < 1e-3, "center {}", center);
        assert!((edge - 0.1554).abs() < 1e-3, "edge {}", edge);

        // Fades out well past three sigma
        assert!(stroke_shadow_spread(30.0, 1.5, 7.5) < 1e-3);
        assert!(stroke_shadow_spread(10.0, 1.5, 7.5) < edge);
    }

    #[test]
    fn test_wide_stroke_shadow_approaches_half_plane() {
        // Near the edge of a very wide strip the shadow is the half-plane value of 0.5
        let spread = stroke_shadow_spread(100.0, 100.0, 2.0);
        assert!((spread - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_box_shadow_spread() {
        let min = Vec2::new(0.0, 0.0);
        let max = Vec2::new(100.0, 50.0);
        let inside = box_shadow_spread(Vec2::new(50.0, 25.0), min, max, 2.0);
        let corner = box_shadow_spread(max, min, max, 2.0);
        let edge = box_shadow_spread(Vec2::new(50.0, 50.0), min, max, 2.0);
        assert!((inside - 1.0).abs() < 1e-3);
        assert!((edge - 0.5).abs() < 1e-3);
        assert!((corner - 0.25).abs() < 1e-3);
        assert!(box_shadow_spread(Vec2::new(50.0, 60.0), min, max, 2.0) < 1e-3);
    }

    #[test]
    fn test_panel_instance_sigma() {
        let panels = crate::panels::countdown_panels(Vec2::new(1280.0, 720.0), 1.0, 30.0);
        let instance = PanelInstance::new(&panels[0]);
        assert_eq!(instance.params[1], 15.0);
        assert_eq!(instance.fill, [0.1, 0.1, 0.1, 0.1]);
    }
}
