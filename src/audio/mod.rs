//! Audio playback and loudness analysis.
//!
//! Plays a decoded file (or the built-in Glicol composition) through cpal and
//! runs a sampling loop that turns the most recent output into one intensity
//! value for the visuals.

mod analyzer;
mod synthesis;
mod system;
mod track;

use thiserror::Error;

// Re-export public types
pub use analyzer::{blackman_window, magnitude_to_byte, FrequencyAnalyzer};
pub use system::{AudioSystem, TrackSource, Transport};
pub use track::{DecodedTrack, SynthTrack, Track};

/// Audio subsystem failures
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No audio output device found")]
    NoDevice,

    #[error("Failed to query output config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Invalid analyzer config: {0}")]
    InvalidConfig(String),

    #[error("Failed to open track: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode track: {0}")]
    Decode(String),

    #[error("Glicol engine init failed: {0}")]
    Synth(String),

    #[error("Failed to create WAV writer: {0}")]
    Recording(#[from] hound::Error),
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(e: symphonia::core::errors::Error) -> Self {
        match e {
            symphonia::core::errors::Error::IoError(io) => AudioError::Io(io),
            other => AudioError::Decode(other.to_string()),
        }
    }
}
