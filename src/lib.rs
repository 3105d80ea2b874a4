//! Neonpulse library - audio-reactive radial visualizer

pub mod audio;
pub mod cli;
pub mod countdown;
pub mod cursor;
pub mod panels;
pub mod params;
pub mod reactive;
pub mod rendering;
pub mod visualizer;
