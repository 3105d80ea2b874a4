//! Neonpulse - an audio-reactive radial visualizer with a countdown clock
//!
//! Bars radiate from the center and pulse with the music, leaving glowing trails,
//! while a soft glow follows the pointer.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use neonpulse::audio::{AudioSystem, TrackSource};
use neonpulse::cli::Args;
use neonpulse::countdown::Countdown;
use neonpulse::cursor::CursorGlow;
use neonpulse::params::*;
use neonpulse::reactive::{Intensity, PageEffects};
use neonpulse::rendering::{FrameCounter, FrameInputs, RenderSystem};
use neonpulse::visualizer::Visualizer;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Components
    audio: Option<AudioSystem>,
    visualizer: Visualizer,
    cursor: CursorGlow,
    countdown: Countdown,

    // Configuration
    track_source: TrackSource,
    autoplay: bool,
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
    last_title_second: Option<i64>,
    frames: FrameCounter,

    /// Fatal error raised inside the event loop, returned from `main`
    error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let recording_config = args
            .create_recording_config()
            .context("Failed to create recording directories")?;

        if let Some(ref config) = recording_config {
            log::info!(
                "Recording {}s at {} fps ({} frames) to {}",
                config.duration_secs,
                config.fps,
                config.total_frames(),
                config.output_dir.display()
            );
        }

        let now = Instant::now();
        Ok(Self {
            window: None,
            render_system: None,
            audio: None,
            visualizer: Visualizer::new(args.visualizer_params()),
            cursor: CursorGlow::new(CursorParams::default()),
            countdown: Countdown::new(args.countdown_config()),
            track_source: args.track_source(),
            autoplay: args.autoplay,
            render_config: args.render_config(),
            recording_config,
            start_time: now,
            last_frame: now,
            last_title_second: None,
            frames: FrameCounter::default(),
            error: None,
        })
    }

    /// Seconds since start; frame-locked while recording
    fn now_s(&self) -> f32 {
        match self.recording_config {
            Some(ref config) => self.frames.presented() as f32 / config.fps as f32,
            None => self.start_time.elapsed().as_secs_f32(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Neonpulse")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.render_config,
            self.visualizer.params().bar_count,
            self.recording_config.clone(),
        ))?;

        // Without audio the page still renders; play/pause becomes a no-op
        match AudioSystem::new(
            self.track_source.clone(),
            AnalyzerConfig::default(),
            self.recording_config.as_ref(),
        ) {
            Ok(audio) => {
                if self.autoplay || self.recording_config.is_some() {
                    let now_s = self.now_s();
                    audio.transport().play();
                    self.visualizer.set_playing(true, now_s);
                }
                self.audio = Some(audio);
            }
            Err(e) => log::warn!("Audio unavailable: {}", e),
        }

        log::info!("Neonpulse is running. Space: play/pause, Esc: quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn toggle_playback(&mut self) {
        let now_s = self.now_s();
        let Some(ref audio) = self.audio else {
            log::debug!("No audio, ignoring play/pause");
            return;
        };
        let transport = audio.transport();
        if transport.is_locked() {
            log::debug!("Recording, ignoring play/pause");
            return;
        }
        let playing = transport.toggle();
        self.visualizer.set_playing(playing, now_s);
        log::info!("{}", if playing { "Playing" } else { "Paused" });
    }

    /// Refresh the countdown in the title once per wall-clock second
    fn update_title(&mut self) {
        let Some(ref window) = self.window else {
            return;
        };
        let now = Local::now();
        let second = now.timestamp();
        if self.last_title_second == Some(second) {
            return;
        }
        self.last_title_second = Some(second);
        let reading = self.countdown.read(&now);
        window.set_title(&self.countdown.title(&reading));
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now_s = self.now_s();
        let (Some(window), Some(render_system)) = (&self.window, &mut self.render_system) else {
            return;
        };

        let dt_s = match self.recording_config {
            Some(ref config) => 1.0 / config.fps as f32,
            None => self.last_frame.elapsed().as_secs_f32(),
        };
        self.last_frame = Instant::now();
        self.cursor.step(dt_s);

        let intensity = self
            .audio
            .as_ref()
            .map_or(Intensity::SILENT, AudioSystem::intensity);
        let scale_factor = window.scale_factor() as f32;
        let (width, height) = render_system.size();

        let scene = self.visualizer.advance(intensity, width, height, scale_factor);
        let inputs = FrameInputs {
            canvas: scene.as_ref(),
            canvas_opacity: self.visualizer.canvas_opacity(now_s),
            effects: PageEffects::from_intensity(intensity, render_system.max_blur_px()),
            glow: self.cursor.style(intensity, scale_factor),
            scale_factor,
        };

        match render_system.render(&inputs, self.frames.next_index()) {
            Ok(status) => self.frames.record(status),
            Err(e) => log::error!("Render error: {}", e),
        }

        if let Some(ref config) = self.recording_config {
            if self.frames.presented() >= config.total_frames() {
                log::info!(
                    "Recording complete: {} frames in {}",
                    self.frames.presented(),
                    config.frames_dir().display()
                );
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.update_title();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        repeat: false,
                        ..
                    },
                ..
            } => self.toggle_playback(),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor
                    .set_target(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::Resized(size) => {
                if let Some(ref mut render_system) = self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    // Drop audio before returning so the sampler thread is joined
    app.audio = None;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
