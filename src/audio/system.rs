//! Audio system managing playback, the analysis tap and the sampling loop.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use super::analyzer::FrequencyAnalyzer;
use super::track::{DecodedTrack, SynthTrack, Track};
use super::AudioError;
use crate::params::{audio_constants::OUTPUT_CLIP, AnalyzerConfig, RecordingConfig};
use crate::reactive::Intensity;

type WavWriter = hound::WavWriter<BufWriter<File>>;

/// What to play
#[derive(Debug, Clone)]
pub enum TrackSource {
    /// Decode this file and loop it
    File(PathBuf),

    /// Built-in procedural composition
    Synth,
}

/// Play/pause gate shared with the output callback and the sampler
#[derive(Debug, Clone, Default)]
pub struct Transport {
    playing: Arc<AtomicBool>,

    /// Set while recording: playback runs until the recording ends
    locked: bool,
}

impl Transport {
    /// Playing transport that ignores pause and toggle
    pub fn locked() -> Self {
        Self {
            playing: Arc::new(AtomicBool::new(true)),
            locked: true,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn play(&self) {
        self.playing.store(true, Ordering::Relaxed);
    }

    pub fn pause(&self) {
        if !self.locked {
            self.playing.store(false, Ordering::Relaxed);
        }
    }

    /// Flip play state, returning the new state
    pub fn toggle(&self) -> bool {
        if self.locked {
            return self.is_playing();
        }
        !self.playing.fetch_xor(true, Ordering::Relaxed)
    }

    /// Stop regardless of the lock (shutdown)
    fn halt(&self) {
        self.playing.store(false, Ordering::Relaxed);
    }
}

/// Audio system: looping playback plus the intensity sampling loop
pub struct AudioSystem {
    /// Latest intensity published by the sampling loop
    intensity: Arc<Mutex<Intensity>>,

    transport: Transport,

    /// Cleared on drop to stop the sampler
    running: Arc<AtomicBool>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,

    /// Sampling thread handle, joined on drop
    sampler: Option<thread::JoinHandle<()>>,
}

impl AudioSystem {
    /// Open the default output device and start the pipeline, paused unless recording
    pub fn new(
        source: TrackSource,
        analyzer_config: AnalyzerConfig,
        recording_config: Option<&RecordingConfig>,
    ) -> Result<Self, AudioError> {
        let analyzer = FrequencyAnalyzer::new(analyzer_config.clone())?;

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} ch",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate,
            channels
        );

        let mut track: Box<dyn Track> = match source {
            TrackSource::File(path) => {
                let mut decoded = DecodedTrack::load(&path)?;
                decoded.set_output_rate(sample_rate);
                Box::new(decoded)
            }
            TrackSource::Synth => Box::new(SynthTrack::new(sample_rate)?),
        };

        // Create WAV writer if recording
        let mut wav_writer: Option<WavWriter> = match recording_config {
            Some(recording) => {
                let spec = hound::WavSpec {
                    channels: channels as u16,
                    sample_rate,
                    bits_per_sample: 32,
                    sample_format: hound::SampleFormat::Float,
                };
                Some(hound::WavWriter::create(recording.audio_path(), spec)?)
            }
            None => None,
        };

        let analysis_buffer = Arc::new(Mutex::new(VecDeque::<f32>::with_capacity(
            analyzer_config.fft_size,
        )));
        let intensity = Arc::new(Mutex::new(Intensity::SILENT));
        let transport = match recording_config {
            Some(_) => Transport::locked(),
            None => Transport::default(),
        };
        let running = Arc::new(AtomicBool::new(true));

        let buffer_tap = Arc::clone(&analysis_buffer);
        let transport_tap = transport.clone();
        let capacity = analyzer_config.fft_size;

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                if !transport_tap.is_playing() {
                    data.fill(0.0);
                    return;
                }

                track.fill(data, channels);

                let mut tap = buffer_tap.lock().unwrap_or_else(PoisonError::into_inner);
                for frame in data.chunks_mut(channels.max(1)) {
                    // Safety limiter: hard clip to prevent ear damage
                    for sample in frame.iter_mut() {
                        *sample = sample.clamp(-OUTPUT_CLIP, OUTPUT_CLIP);
                    }
                    tap.push_back(frame.iter().sum::<f32>() / frame.len() as f32);

                    if let Some(ref mut writer) = wav_writer {
                        for &sample in frame.iter() {
                            let _ = writer.write_sample(sample);
                        }
                    }
                }
                let excess = tap.len().saturating_sub(capacity);
                tap.drain(..excess);
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        let sampler = spawn_sampler(
            analyzer,
            analysis_buffer,
            Arc::clone(&intensity),
            transport.clone(),
            Arc::clone(&running),
        );

        Ok(Self {
            intensity,
            transport,
            running,
            _stream: stream,
            sampler: Some(sampler),
        })
    }

    /// Latest intensity (held at its last value while paused)
    pub fn intensity(&self) -> Intensity {
        *self.intensity.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

impl Drop for AudioSystem {
    fn drop(&mut self) {
        self.transport.halt();
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.sampler.take() {
            if handle.join().is_err() {
                log::warn!("Audio sampling thread panicked");
            }
        }
    }
}

/// Spawn the intensity sampling loop
fn spawn_sampler(
    analyzer: FrequencyAnalyzer,
    analysis_buffer: Arc<Mutex<VecDeque<f32>>>,
    intensity: Arc<Mutex<Intensity>>,
    transport: Transport,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        run_sampler(analyzer, &analysis_buffer, &intensity, &transport, &running)
    })
}

/// Sample until `running` is cleared. While paused nothing is analyzed and the
/// published intensity keeps its last value.
fn run_sampler(
    mut analyzer: FrequencyAnalyzer,
    analysis_buffer: &Mutex<VecDeque<f32>>,
    intensity: &Mutex<Intensity>,
    transport: &Transport,
    running: &AtomicBool,
) {
    let interval = Duration::from_millis(analyzer.config().update_interval_ms);
    let mut window = Vec::with_capacity(analyzer.config().fft_size);

    while running.load(Ordering::Relaxed) {
        thread::sleep(interval);

        if !transport.is_playing() {
            continue;
        }

        window.clear();
        window.extend(
            analysis_buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .copied(),
        );

        let level = analyzer.mean_level(&window);
        *intensity.lock().unwrap_or_else(PoisonError::into_inner) = level;
    }
}
