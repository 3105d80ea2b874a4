//! Rendering system: the trail canvas and the compose pass.
//!
//! Each frame the visualizer scene is painted onto a persistent canvas texture
//! (faded rather than cleared, which leaves trails). The surface is then built
//! from the backdrop, the canvas at its current opacity, the optional logo, the
//! countdown panels and the cursor glow.

mod pipelines;
mod textures;
mod uniforms;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::sync::Arc;
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::cursor::GlowStyle;
use crate::panels::{countdown_panels, PANEL_COUNT};
use crate::params::{RecordingConfig, RenderConfig};
use crate::reactive::PageEffects;
use crate::visualizer::CanvasFrame;
use pipelines::{create_pipeline, textured_layout, uniform_layout, SCREEN_BLEND};
use textures::{ImageTexture, CANVAS_FORMAT};

pub use uniforms::{
    box_shadow_spread, cover_uv_transform, erf_approx, stroke_shadow_spread, BackdropUniforms,
    BarInstance, GlowUniforms, LayerUniforms, PanelInstance, RadialUniforms, ViewportUniforms,
};

/// Rendering failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Backdrop colour when no image is given
const FALLBACK_BACKDROP: [u8; 4] = [24, 10, 40, 255];

/// Outcome of one `render` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame reached the surface (and was captured when recording)
    Presented,
    /// The surface was lost or outdated and has been reconfigured; nothing was drawn
    Skipped,
}

/// Index of the next presented frame.
///
/// Skipped frames do not advance it, so captured frame files stay contiguous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCounter {
    presented: usize,
}

impl FrameCounter {
    pub fn next_index(&self) -> usize {
        self.presented
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn record(&mut self, status: FrameStatus) {
        if status == FrameStatus::Presented {
            self.presented += 1;
        }
    }
}

/// Everything the compose pass needs for one frame
pub struct FrameInputs<'a> {
    /// Scene to paint onto the canvas, `None` while paused
    pub canvas: Option<&'a CanvasFrame>,
    pub canvas_opacity: f32,
    pub effects: PageEffects,
    pub glow: GlowStyle,
    /// Logical to physical pixel factor
    pub scale_factor: f32,
}

/// Uniform buffer with its bind group
struct Binding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Binding {
    fn new<T: Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        value: &T,
    ) -> Self {
        let buffer = uniform_buffer(device, label, value);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn textured<T: Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        value: &T,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let buffer = uniform_buffer(device, label, value);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self { buffer, bind_group }
    }

    fn write<T: Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

fn uniform_buffer<T: Pod>(device: &wgpu::Device, label: &str, value: &T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(value),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn bar_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Bar Instance Buffer"),
        size: (capacity.max(1) * std::mem::size_of::<BarInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sampler: wgpu::Sampler,
    textured_layout: wgpu::BindGroupLayout,

    radial_pipeline: wgpu::RenderPipeline,
    bar_pipeline: wgpu::RenderPipeline,
    backdrop_pipeline: wgpu::RenderPipeline,
    layer_pipeline: wgpu::RenderPipeline,
    panel_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,

    // Trail canvas
    canvas: ImageTexture,
    canvas_needs_clear: bool,
    canvas_layer: Binding,
    fade: Binding,
    outer_glow: Binding,
    center_glow: Binding,
    viewport: Binding,
    bar_buffer: wgpu::Buffer,
    bar_capacity: usize,

    // Compose pass
    backdrop_image: ImageTexture,
    backdrop: Binding,
    logo: Option<(ImageTexture, Binding)>,
    logo_width_px: f32,
    max_blur_px: f32,
    panel_buffer: wgpu::Buffer,
    glow: Binding,

    recording_config: Option<RecordingConfig>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<Window>,
        render_config: &RenderConfig,
        bar_capacity: usize,
        recording_config: Option<RecordingConfig>,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        log::info!("GPU: {}", adapter.get_info().name);

        // Blend on gamma-encoded values like a browser compositor
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;

        // Add COPY_SRC if recording (needed for frame capture)
        if recording_config.is_some() {
            usage |= wgpu::TextureUsages::COPY_SRC;
        }

        let config = wgpu::SurfaceConfiguration {
            usage,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Linear Clamp Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_layout = uniform_layout(&device, "Uniform Bind Group Layout");
        let textured_layout = textured_layout(&device, "Textured Bind Group Layout");

        let premultiplied = Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING);
        let radial_pipeline = create_pipeline(
            &device,
            "Radial Fill Pipeline",
            include_str!("radial.wgsl"),
            &uniform_layout,
            &[],
            CANVAS_FORMAT,
            premultiplied,
        );
        let bar_pipeline = create_pipeline(
            &device,
            "Bar Pipeline",
            include_str!("bars.wgsl"),
            &uniform_layout,
            &[BarInstance::layout()],
            CANVAS_FORMAT,
            premultiplied,
        );
        let backdrop_pipeline = create_pipeline(
            &device,
            "Backdrop Pipeline",
            include_str!("backdrop.wgsl"),
            &textured_layout,
            &[],
            surface_format,
            None,
        );
        let layer_pipeline = create_pipeline(
            &device,
            "Layer Pipeline",
            include_str!("layer.wgsl"),
            &textured_layout,
            &[],
            surface_format,
            premultiplied,
        );
        let panel_pipeline = create_pipeline(
            &device,
            "Panel Pipeline",
            include_str!("panel.wgsl"),
            &uniform_layout,
            &[PanelInstance::layout()],
            surface_format,
            premultiplied,
        );
        let glow_pipeline = create_pipeline(
            &device,
            "Cursor Glow Pipeline",
            include_str!("glow.wgsl"),
            &uniform_layout,
            &[],
            surface_format,
            Some(SCREEN_BLEND),
        );

        // Trail canvas and its scene uniforms
        let canvas = ImageTexture::canvas(&device, config.width, config.height);
        let canvas_layer = Binding::textured(
            &device,
            &textured_layout,
            "Canvas Layer",
            &LayerUniforms::fullscreen(0.0),
            &canvas.view,
            &sampler,
        );
        let empty_fill = RadialUniforms::zeroed();
        let fade = Binding::new(&device, &uniform_layout, "Fade Fill", &empty_fill);
        let outer_glow = Binding::new(&device, &uniform_layout, "Outer Glow Fill", &empty_fill);
        let center_glow = Binding::new(&device, &uniform_layout, "Center Glow Fill", &empty_fill);
        let viewport = Binding::new(
            &device,
            &uniform_layout,
            "Viewport",
            &ViewportUniforms::new(config.width as f32, config.height as f32),
        );

        // Backdrop and logo images
        let backdrop_image = match &render_config.background_path {
            Some(path) => ImageTexture::load(&device, &queue, path, "Backdrop")?,
            None => ImageTexture::solid(&device, &queue, "Backdrop", FALLBACK_BACKDROP),
        };
        let backdrop = Binding::textured(
            &device,
            &textured_layout,
            "Backdrop",
            &BackdropUniforms::zeroed(),
            &backdrop_image.view,
            &sampler,
        );

        let logo = match &render_config.logo_path {
            Some(path) => {
                let image = ImageTexture::load(&device, &queue, path, "Logo")?;
                let binding = Binding::textured(
                    &device,
                    &textured_layout,
                    "Logo",
                    &LayerUniforms::fullscreen(0.0),
                    &image.view,
                    &sampler,
                );
                Some((image, binding))
            }
            None => None,
        };

        let panel_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Panel Instance Buffer"),
            size: (PANEL_COUNT * std::mem::size_of::<PanelInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let glow = Binding::new(&device, &uniform_layout, "Cursor Glow", &GlowUniforms::zeroed());

        Ok(Self {
            bar_buffer: bar_buffer(&device, bar_capacity),
            bar_capacity: bar_capacity.max(1),
            surface,
            device,
            queue,
            config,
            sampler,
            textured_layout,
            radial_pipeline,
            bar_pipeline,
            backdrop_pipeline,
            layer_pipeline,
            panel_pipeline,
            glow_pipeline,
            canvas,
            canvas_needs_clear: true,
            canvas_layer,
            fade,
            outer_glow,
            center_glow,
            viewport,
            backdrop_image,
            backdrop,
            logo,
            logo_width_px: render_config.logo_width_px,
            max_blur_px: render_config.max_blur_px,
            panel_buffer,
            glow,
            recording_config,
        })
    }

    /// Current surface size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn max_blur_px(&self) -> f32 {
        self.max_blur_px
    }

    /// Reconfigure the surface and start a fresh (cleared) canvas
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.canvas = ImageTexture::canvas(&self.device, width, height);
        self.canvas_layer = Binding::textured(
            &self.device,
            &self.textured_layout,
            "Canvas Layer",
            &LayerUniforms::fullscreen(0.0),
            &self.canvas.view,
            &self.sampler,
        );
        self.canvas_needs_clear = true;
        log::debug!("Resized to {}x{}", width, height);
    }

    /// Render a frame (and optionally capture if recording)
    pub fn render(
        &mut self,
        frame: &FrameInputs,
        frame_num: usize,
    ) -> Result<FrameStatus, RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (width, height) = self.size();
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Canvas and surface share the same size
        self.viewport
            .write(&self.queue, &ViewportUniforms::new(width as f32, height as f32));

        if let Some(scene) = frame.canvas {
            self.paint_canvas(&mut encoder, scene);
        }

        self.write_compose_uniforms(frame, width, height);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Compose Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Backdrop with filters and overlay
            render_pass.set_pipeline(&self.backdrop_pipeline);
            render_pass.set_bind_group(0, &self.backdrop.bind_group, &[]);
            render_pass.draw(0..3, 0..1);

            render_pass.set_pipeline(&self.layer_pipeline);
            if frame.canvas_opacity > 0.0 {
                render_pass.set_bind_group(0, &self.canvas_layer.bind_group, &[]);
                render_pass.draw(0..6, 0..1);
            }
            if let Some((_, ref logo)) = self.logo {
                render_pass.set_bind_group(0, &logo.bind_group, &[]);
                render_pass.draw(0..6, 0..1);
            }

            render_pass.set_pipeline(&self.panel_pipeline);
            render_pass.set_bind_group(0, &self.viewport.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.panel_buffer.slice(..));
            render_pass.draw(0..6, 0..PANEL_COUNT as u32);

            render_pass.set_pipeline(&self.glow_pipeline);
            render_pass.set_bind_group(0, &self.glow.bind_group, &[]);
            render_pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        // Capture frame if recording
        if let Some(ref config) = self.recording_config {
            if let Err(e) = self.capture_frame(frame_num, config, &output) {
                log::error!("Failed to save frame {}: {}", frame_num, e);
            }
        }

        output.present();

        Ok(FrameStatus::Presented)
    }

    /// Paint one scene onto the trail canvas on top of what is already there
    fn paint_canvas(&mut self, encoder: &mut wgpu::CommandEncoder, scene: &CanvasFrame) {
        self.fade.write(&self.queue, &RadialUniforms::from(&scene.fade));
        self.outer_glow
            .write(&self.queue, &RadialUniforms::from(&scene.outer_glow));
        self.center_glow
            .write(&self.queue, &RadialUniforms::from(&scene.center_glow));

        let instances: Vec<BarInstance> = scene
            .bars
            .iter()
            .map(|bar| BarInstance::new(bar, scene.shadow_blur))
            .collect();
        if instances.len() > self.bar_capacity {
            self.bar_capacity = instances.len();
            self.bar_buffer = bar_buffer(&self.device, self.bar_capacity);
        }
        self.queue
            .write_buffer(&self.bar_buffer, 0, bytemuck::cast_slice(&instances[..]));

        let load = if self.canvas_needs_clear {
            wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT)
        } else {
            wgpu::LoadOp::Load
        };
        self.canvas_needs_clear = false;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.canvas.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.radial_pipeline);
        pass.set_bind_group(0, &self.fade.bind_group, &[]);
        pass.draw(0..3, 0..1);
        pass.set_bind_group(0, &self.outer_glow.bind_group, &[]);
        pass.draw(0..3, 0..1);

        if !instances.is_empty() {
            pass.set_pipeline(&self.bar_pipeline);
            pass.set_bind_group(0, &self.viewport.bind_group, &[]);
            pass.set_vertex_buffer(0, self.bar_buffer.slice(..));
            pass.draw(0..6, 0..instances.len() as u32);
        }

        pass.set_pipeline(&self.radial_pipeline);
        pass.set_bind_group(0, &self.center_glow.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn write_compose_uniforms(&self, frame: &FrameInputs, width: u32, height: u32) {
        self.backdrop.write(
            &self.queue,
            &BackdropUniforms::new(&frame.effects, self.backdrop_image.size, (width, height)),
        );

        self.canvas_layer
            .write(&self.queue, &LayerUniforms::fullscreen(frame.canvas_opacity));

        if let Some((ref image, ref binding)) = self.logo {
            let viewport = Vec2::new(width as f32, height as f32);
            let logo_width = self.logo_width_px * frame.scale_factor * frame.effects.pulse_scale;
            let aspect = image.size.1 as f32 / image.size.0.max(1) as f32;
            binding.write(
                &self.queue,
                &LayerUniforms::centered(
                    viewport * 0.5,
                    Vec2::new(logo_width, logo_width * aspect),
                    viewport,
                    1.0,
                ),
            );
        }

        let panels = countdown_panels(
            Vec2::new(width as f32, height as f32),
            frame.scale_factor,
            frame.effects.glow_px,
        );
        let instances = panels.map(|panel| PanelInstance::new(&panel));
        self.queue
            .write_buffer(&self.panel_buffer, 0, bytemuck::cast_slice(&instances[..]));

        self.glow
            .write(&self.queue, &GlowUniforms::new(&frame.glow, (width, height)));
    }

    /// Capture a frame to disk (recording mode only)
    fn capture_frame(
        &self,
        frame_num: usize,
        config: &RecordingConfig,
        texture: &wgpu::SurfaceTexture,
    ) -> Result<(), image::ImageError> {
        let (width, height) = self.size();
        let bytes_per_pixel = 4; // RGBA8 / BGRA8
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        // Create buffer to read texture data
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Capture Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Capture Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        // Map buffer and save to PNG
        let buffer_slice = buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, |_| {});
        self.device.poll(wgpu::Maintain::Wait);

        let data = buffer_slice.get_mapped_range();
        let mut image_data = vec![0u8; (width * height * bytes_per_pixel) as usize];

        // Remove padding
        for y in 0..height {
            let padded_offset = (y * padded_bytes_per_row) as usize;
            let unpadded_offset = (y * unpadded_bytes_per_row) as usize;
            image_data[unpadded_offset..unpadded_offset + unpadded_bytes_per_row as usize]
                .copy_from_slice(
                    &data[padded_offset..padded_offset + unpadded_bytes_per_row as usize],
                );
        }

        drop(data);
        buffer.unmap();

        let bgra = matches!(
            self.config.format,
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb
        );
        if bgra {
            image_data.chunks_exact_mut(4).for_each(|px| px.swap(0, 2));
        }

        image::save_buffer(
            config.frame_path(frame_num),
            &image_data,
            width,
            height,
            image::ColorType::Rgba8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_frames_keep_numbering_contiguous() {
        let config = RecordingConfig::new(1.0);
        let mut counter = FrameCounter::default();
        let mut written = Vec::new();

        for status in [
            FrameStatus::Presented,
            FrameStatus::Skipped,
            FrameStatus::Presented,
            FrameStatus::Skipped,
            FrameStatus::Presented,
        ] {
            if status == FrameStatus::Presented {
                written.push(config.frame_path(counter.next_index()));
            }
            counter.record(status);
        }

        assert_eq!(counter.presented(), 3);
        assert_eq!(
            written,
            (0..3).map(|n| config.frame_path(n)).collect::<Vec<_>>()
        );
    }
}
