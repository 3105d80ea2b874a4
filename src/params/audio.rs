//! Audio analysis configuration and constants.

/// Frequency analyzer configuration (mirrors the browser analyser node settings)
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT window size in samples (power of 2, 32..=32768)
    pub fft_size: usize,

    /// Temporal smoothing between successive analyses (0 = none, 1 = frozen)
    pub smoothing_time_constant: f32,

    /// Level mapped to byte value 0 (dBFS)
    pub min_decibels: f32,

    /// Level mapped to byte value 255 (dBFS)
    pub max_decibels: f32,

    /// Sampling loop interval (milliseconds)
    /// 16 ≈ one analysis per 60 Hz animation frame
    pub update_interval_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing_time_constant: 0.2,
            min_decibels: -100.0,
            max_decibels: -30.0,
            update_interval_ms: 16,
        }
    }
}

impl AnalyzerConfig {
    /// Number of frequency bins produced per analysis
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(format!(
                "FFT size must be a power of 2 between 32 and 32768, got {}",
                self.fft_size
            ));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "Smoothing time constant must be within [0, 1], got {}",
                self.smoothing_time_constant
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        if self.update_interval_ms == 0 {
            return Err("Update interval must be > 0".to_string());
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer)
    /// 128 = 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;

    /// Hard limit applied to every output sample
    pub const OUTPUT_CLIP: f32 = 0.5;
}
