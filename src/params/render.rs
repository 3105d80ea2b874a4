//! Window, backdrop and recording configuration.

use std::path::PathBuf;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Backdrop image drawn behind the visualizer (object-cover fit)
    pub background_path: Option<PathBuf>,

    /// Logo image drawn at the center, pulsing with intensity
    pub logo_path: Option<PathBuf>,

    /// Logo width before pulse scaling (logical pixels)
    pub logo_width_px: f32,

    /// Maximum backdrop blur at full intensity (pixels)
    pub max_blur_px: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            background_path: None,
            logo_path: None,
            logo_width_px: 176.0,
            max_blur_px: 10.0,
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames and audio
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Audio file path
    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join("audio.wav")
    }

    /// Path of a single captured frame
    pub fn frame_path(&self, frame_num: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame_num))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_frames_rounds_up() {
        let config = RecordingConfig::new(1.01);
        assert_eq!(config.total_frames(), 61);
    }

    #[test]
    fn test_recording_paths() {
        let config = RecordingConfig::new(2.0);
        assert_eq!(config.frames_dir(), PathBuf::from("recording/frames"));
        assert_eq!(config.audio_path(), PathBuf::from("recording/audio.wav"));
        assert_eq!(
            config.frame_path(7),
            PathBuf::from("recording/frames/frame_00007.png")
        );
    }
}
