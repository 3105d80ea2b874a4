//! Command-line argument parsing.

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::audio::TrackSource;
use crate::params::{utc_midnight, CountdownConfig, RecordingConfig, RenderConfig, VisualizerParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Neonpulse")]
#[command(about = "Audio-reactive radial visualizer with a countdown", long_about = None)]
pub struct Args {
    /// Audio file to loop (wav, mp3, flac, ogg); the built-in synth plays when omitted
    #[arg(value_name = "TRACK")]
    pub track: Option<PathBuf>,

    /// Play the built-in procedural track even when a file is given
    #[arg(long)]
    pub synth: bool,

    /// Backdrop image
    #[arg(long, value_name = "IMAGE")]
    pub background: Option<PathBuf>,

    /// Logo image drawn at the center
    #[arg(long, value_name = "IMAGE")]
    pub logo: Option<PathBuf>,

    /// Countdown target date (midnight UTC)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub target: Option<NaiveDate>,

    /// Reference date for the "days since" counter (midnight UTC)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub since: Option<NaiveDate>,

    /// Name of the awaited event
    #[arg(long)]
    pub label: Option<String>,

    /// Number of radial bars
    #[arg(long, value_name = "COUNT", default_value = "150")]
    pub bars: usize,

    /// Record frames and audio (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Start playing without waiting for Space
    #[arg(long)]
    pub autoplay: bool,

    /// Initial window width (logical pixels)
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Initial window height (logical pixels)
    #[arg(long, default_value = "720")]
    pub height: u32,
}

impl Args {
    pub fn track_source(&self) -> TrackSource {
        match (&self.track, self.synth) {
            (Some(path), false) => TrackSource::File(path.clone()),
            _ => TrackSource::Synth,
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            background_path: self.background.clone(),
            logo_path: self.logo.clone(),
            ..RenderConfig::default()
        }
    }

    pub fn visualizer_params(&self) -> VisualizerParams {
        VisualizerParams {
            bar_count: self.bars,
            ..VisualizerParams::default()
        }
    }

    pub fn countdown_config(&self) -> CountdownConfig {
        let mut config = CountdownConfig::default();
        if let Some(label) = &self.label {
            config.label = label.clone();
        }
        if let Some(target) = self.target {
            config.target = utc_midnight(Some(target));
        }
        if let Some(since) = self.since {
            config.since = utc_midnight(Some(since));
        }
        config
    }

    /// Create recording configuration (and its output directories) if recording mode is enabled
    pub fn create_recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);
        std::fs::create_dir_all(config.frames_dir())?;
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("neonpulse").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(matches!(args.track_source(), TrackSource::Synth));
        assert_eq!(args.visualizer_params().bar_count, 150);
        assert!(!args.autoplay);
        assert_eq!(args.render_config().window_width, 1280);
        assert_eq!(args.countdown_config().label, "GTA VI");
    }

    #[test]
    fn test_track_and_synth_override() {
        let args = parse(&["song.mp3"]);
        assert!(matches!(args.track_source(), TrackSource::File(ref p) if p.ends_with("song.mp3")));

        let args = parse(&["song.mp3", "--synth"]);
        assert!(matches!(args.track_source(), TrackSource::Synth));
    }

    #[test]
    fn test_countdown_dates() {
        let args = parse(&["--target", "2026-05-26", "--since", "2023-12-05", "--label", "Launch"]);
        let config = args.countdown_config();
        assert_eq!(config.label, "Launch");
        assert_eq!(config.target.to_rfc3339(), "2026-05-26T00:00:00+00:00");
        assert_eq!(config.since.to_rfc3339(), "2023-12-05T00:00:00+00:00");
    }

    #[test]
    fn test_rejects_bad_date() {
        let result = Args::try_parse_from(["neonpulse", "--target", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_visual_options() {
        let args = parse(&["--bars", "64", "--width", "800", "--height", "600", "--logo", "l.png"]);
        assert_eq!(args.visualizer_params().bar_count, 64);
        let render = args.render_config();
        assert_eq!((render.window_width, render.window_height), (800, 600));
        assert!(render.logo_path.is_some());
        assert!(render.background_path.is_none());
    }
}
