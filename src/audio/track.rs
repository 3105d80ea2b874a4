//! Playable sources: decoded files and the procedural composition.

use glicol::Engine;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::synthesis::GLICOL_COMPOSITION;
use super::AudioError;
use crate::params::audio_constants::BLOCK_SIZE;

/// A looping source rendered straight into the device buffer
pub trait Track: Send {
    /// Fill interleaved `out` holding `channels` channels per frame
    fn fill(&mut self, out: &mut [f32], channels: usize);
}

/// Fully decoded file, looped, resampled on the fly by linear interpolation
pub struct DecodedTrack {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
    /// Read position in source frames
    cursor: f64,
    /// Source frames advanced per output frame
    step: f64,
}

impl DecodedTrack {
    /// Decode an entire audio file into memory
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension() {
            hint.with_extension(&ext.to_string_lossy());
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::Decode("no audio track found".to_string()))?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
        let mut channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(2);

        let mut decoder =
            symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

        let mut samples: Vec<f32> = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(_)) => break, // end of stream
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(e.into()),
            };
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    sample_rate = spec.rate;
                    channels = spec.channels.count();

                    let mut buffer = SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    samples.extend_from_slice(buffer.samples());
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    log::debug!("Skipping corrupt packet: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        if samples.is_empty() {
            return Err(AudioError::Decode(format!(
                "{} contains no audio",
                path.display()
            )));
        }

        let track = Self::from_samples(samples, channels, sample_rate);
        log::info!(
            "Track: {} ({} ch @ {}Hz, {:.1}s)",
            path.display(),
            track.channels,
            track.sample_rate,
            track.duration_secs()
        );

        Ok(track)
    }

    /// Wrap interleaved samples
    pub fn from_samples(samples: Vec<f32>, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
            cursor: 0.0,
            step: 1.0,
        }
    }

    /// Match playback speed to the output device rate
    pub fn set_output_rate(&mut self, output_rate: u32) {
        if output_rate > 0 {
            self.step = self.sample_rate as f64 / output_rate as f64;
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate.max(1) as f32
    }

    fn sample(&self, frame: usize, channel: usize) -> f32 {
        self.samples[frame * self.channels + channel.min(self.channels - 1)]
    }
}

impl Track for DecodedTrack {
    fn fill(&mut self, out: &mut [f32], channels: usize) {
        let frames = self.frames();
        if frames == 0 || channels == 0 {
            out.fill(0.0);
            return;
        }

        for frame in out.chunks_mut(channels) {
            let index = self.cursor.floor() as usize % frames;
            let next = (index + 1) % frames;
            let frac = (self.cursor - self.cursor.floor()) as f32;

            for (channel, slot) in frame.iter_mut().enumerate() {
                let a = self.sample(index, channel);
                let b = self.sample(next, channel);
                *slot = a + (b - a) * frac;
            }

            self.cursor += self.step;
            if self.cursor >= frames as f64 {
                self.cursor -= frames as f64;
            }
        }
    }
}

/// Procedural composition rendered block by block with Glicol
pub struct SynthTrack {
    engine: Engine<BLOCK_SIZE>,
    pending: [[f32; 2]; BLOCK_SIZE],
    pending_pos: usize,
}

impl SynthTrack {
    pub fn new(sample_rate: u32) -> Result<Self, AudioError> {
        let mut engine = Engine::<BLOCK_SIZE>::new();
        engine.set_sr(sample_rate as usize);
        engine.update_with_code(GLICOL_COMPOSITION);
        engine
            .update()
            .map_err(|e| AudioError::Synth(format!("{:?}", e)))?;

        Ok(Self {
            engine,
            pending: [[0.0; 2]; BLOCK_SIZE],
            pending_pos: BLOCK_SIZE,
        })
    }

    fn refill(&mut self) {
        let (buffers, _) = self.engine.next_block(vec![]);
        match buffers {
            [left, right, ..] => {
                for i in 0..BLOCK_SIZE {
                    self.pending[i] = [left[i], right[i]];
                }
            }
            [mono] => {
                for i in 0..BLOCK_SIZE {
                    self.pending[i] = [mono[i], mono[i]];
                }
            }
            [] => self.pending = [[0.0; 2]; BLOCK_SIZE],
        }
        self.pending_pos = 0;
    }
}

impl Track for SynthTrack {
    fn fill(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            if self.pending_pos >= BLOCK_SIZE {
                self.refill();
            }
            let [left, right] = self.pending[self.pending_pos];
            self.pending_pos += 1;

            for (channel, slot) in frame.iter_mut().enumerate() {
                *slot = if channel % 2 == 0 { left } else { right };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_track_loops() {
        let mut track = DecodedTrack::from_samples(vec![0.1, 0.2, 0.3], 1, 48000);
        track.set_output_rate(48000);

        let mut out = [0.0; 7];
        track.fill(&mut out, 1);
        assert_eq!(out, [0.1, 0.2, 0.3, 0.1, 0.2, 0.3, 0.1]);
    }

    #[test]
    fn test_decoded_track_upmixes_mono() {
        let mut track = DecodedTrack::from_samples(vec![0.25, -0.25], 1, 44100);
        track.set_output_rate(44100);

        let mut out = [0.0; 4];
        track.fill(&mut out, 2);
        assert_eq!(out, [0.25, 0.25, -0.25, -0.25]);
    }

    #[test]
    fn test_decoded_track_interpolates_when_resampling() {
        // Output at twice the source rate yields midpoints
        let mut track = DecodedTrack::from_samples(vec![0.0, 1.0, 0.0, 1.0], 1, 22050);
        track.set_output_rate(44100);

        let mut out = [0.0; 4];
        track.fill(&mut out, 1);
        assert_eq!(out, [0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_empty_track_is_silent() {
        let mut track = DecodedTrack::from_samples(Vec::new(), 2, 44100);
        let mut out = [1.0; 8];
        track.fill(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(track.duration_secs(), 0.0);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(DecodedTrack::load(Path::new("does/not/exist.mp3")).is_err());
    }
}
