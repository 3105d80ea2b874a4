//! Byte frequency analysis and the per-frame loudness scalar.
//!
//! Follows the browser analyser node pipeline: Blackman window, FFT, magnitude
//! normalised by the window size, exponential smoothing across calls, conversion
//! to decibels and a linear map of `[min_db, max_db]` onto `0..=255`.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use super::AudioError;
use crate::params::AnalyzerConfig;
use crate::reactive::Intensity;

/// Stateful analyzer (smoothing carries over between calls)
pub struct FrequencyAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl FrequencyAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AudioError> {
        config.validate().map_err(AudioError::InvalidConfig)?;

        let size = config.fft_size;
        let bins = config.frequency_bin_count();
        let fft = FftPlanner::new().plan_fft_forward(size);

        Ok(Self {
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            spectrum: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
            fft,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze the most recent `fft_size` samples and return byte frequency data.
    ///
    /// Shorter input is treated as preceded by silence.
    pub fn byte_frequency_data(&mut self, samples: &[f32]) -> &[u8] {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        for (i, slot) in self.spectrum.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let tau = self.config.smoothing_time_constant;
        let scale = 1.0 / size as f32;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.spectrum[k].norm() * scale;
            let previous = if smoothed.is_finite() { *smoothed } else { 0.0 };
            *smoothed = tau * previous + (1.0 - tau) * magnitude;
        }

        let (min_db, max_db) = (self.config.min_decibels, self.config.max_decibels);
        for (byte, &level) in self.bytes.iter_mut().zip(&self.smoothed) {
            *byte = magnitude_to_byte(level, min_db, max_db);
        }

        &self.bytes
    }

    /// Mean of the byte frequency data: one coarse loudness value per call
    pub fn mean_level(&mut self, samples: &[f32]) -> Intensity {
        let bytes = self.byte_frequency_data(samples);
        if bytes.is_empty() {
            return Intensity::SILENT;
        }
        let sum: u32 = bytes.iter().map(|&b| b as u32).sum();
        Intensity::new(sum as f32 / bytes.len() as f32)
    }
}

/// Blackman window (alpha = 0.16) over `size` samples
pub fn blackman_window(index: usize, size: usize) -> f32 {
    const ALPHA: f32 = 0.16;
    let a0 = 0.5 * (1.0 - ALPHA);
    let a1 = 0.5;
    let a2 = 0.5 * ALPHA;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}

/// Map a linear magnitude to a byte through the decibel range
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = (255.0 / (max_db - min_db)) * (db - min_db);
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_bin: usize, size: usize, amplitude: f32) -> Vec<f32> {
        (0..size)
            .map(|i| amplitude * (2.0 * PI * freq_bin as f32 * i as f32 / size as f32).sin())
            .collect()
    }

    fn noise(len: usize, amplitude: f32) -> Vec<f32> {
        let mut state: u32 = 0x1234_5678;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let unit = (state >> 8) as f32 / (1u32 << 24) as f32;
                (unit * 2.0 - 1.0) * amplitude
            })
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        let size = 2048;

        // Zero at the start, peak of 1 at the center
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_magnitude_to_byte_range() {
        assert_eq!(magnitude_to_byte(0.0, -100.0, -30.0), 0);
        assert_eq!(magnitude_to_byte(1e-6, -100.0, -30.0), 0); // -120 dB
        assert_eq!(magnitude_to_byte(1.0, -100.0, -30.0), 255); // 0 dB clamps
        assert_eq!(magnitude_to_byte(10f32.powf(-65.0 / 20.0), -100.0, -30.0), 127);
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let level = analyzer.mean_level(&vec![0.0; 2048]);
        assert_eq!(level, Intensity::SILENT);
    }

    #[test]
    fn test_bin_count_matches_config() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();
        assert_eq!(analyzer.byte_frequency_data(&[]).len(), 1024);
    }

    #[test]
    fn test_sine_peaks_in_its_bin() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig {
            smoothing_time_constant: 0.0,
            ..AnalyzerConfig::default()
        })
        .unwrap();

        let bytes = analyzer.byte_frequency_data(&sine(64, 2048, 0.5));
        assert_eq!(bytes[64], 255);
        assert!(bytes[300] < bytes[64]);
    }

    #[test]
    fn test_loud_noise_scores_high() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let level = analyzer.mean_level(&noise(2048, 0.5));
        assert!(level.raw() > 120.0, "level was {}", level.raw());
        assert!(level.raw() <= 255.0);
    }

    #[test]
    fn test_smoothing_decays_gradually() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let loud = analyzer.mean_level(&noise(2048, 0.5));
        let after = analyzer.mean_level(&vec![0.0; 2048]);

        // 0.2 * previous magnitude survives one silent analysis (about -14 dB)
        assert!(after.raw() > 0.0);
        assert!(after < loud);
    }

    #[test]
    fn test_short_input_is_padded() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let level = analyzer.mean_level(&noise(100, 0.5));
        assert!(level.raw() >= 0.0);
    }

    #[test]
    fn test_uses_most_recent_samples() {
        let mut analyzer = FrequencyAnalyzer::new(AnalyzerConfig::default()).unwrap();

        // Loud history followed by a full window of silence
        let mut samples = noise(4096, 0.5);
        samples.extend(std::iter::repeat(0.0).take(2048));
        assert_eq!(analyzer.mean_level(&samples), Intensity::SILENT);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalyzerConfig {
            fft_size: 1000,
            ..AnalyzerConfig::default()
        };
        assert!(FrequencyAnalyzer::new(config).is_err());
    }
}
