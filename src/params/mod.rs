//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (pixels, seconds, decibels, etc.)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the pipeline

mod audio;
mod countdown;
mod render;
mod visualizer;

// Re-export all types
pub use audio::{audio_constants, AnalyzerConfig};
pub use countdown::{utc_midnight, CountdownConfig};
pub use render::{RecordingConfig, RenderConfig};
pub use visualizer::{CursorParams, VisualizerParams};
