//! Countdown panels drawn below the logo.
//!
//! Four timer boxes (days, hours, minutes, seconds) sit above two glass panels
//! (days since the reference date and the local clock). Their box shadow grows
//! with the intensity.

use glam::Vec2;

use crate::visualizer::Rgba;

const TIMER_SIZE: Vec2 = Vec2::new(120.0, 110.0);
const INFO_SIZE: Vec2 = Vec2::new(264.0, 120.0);
const GAP: f32 = 24.0;
/// Distance from the window center to the top of the timer row
const ROW_OFFSET: f32 = 110.0;
const CORNER_RADIUS: f32 = 8.0;
const GLASS: Rgba = Rgba::new(1.0, 1.0, 1.0, 0.1);

pub const PANEL_COUNT: usize = 6;

/// One rounded panel with an outer box shadow (physical pixels)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panel {
    pub min: Vec2,
    pub max: Vec2,
    pub radius: f32,
    pub fill: Rgba,
    pub shadow: Rgba,
    pub shadow_blur: f32,
}

impl Panel {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Lay out the panels for a viewport; `scale` converts logical to physical pixels
pub fn countdown_panels(viewport: Vec2, scale: f32, glow_px: f32) -> [Panel; PANEL_COUNT] {
    let center_x = viewport.x * 0.5;
    let timer_top = viewport.y * 0.5 + ROW_OFFSET * scale;
    let info_top = timer_top + (TIMER_SIZE.y + GAP) * scale;
    let blur = glow_px * scale;

    let row = |size: Vec2, count: usize, top: f32, shadow: Rgba| {
        let size = size * scale;
        let row_width = size.x * count as f32 + GAP * scale * (count - 1) as f32;
        let left = center_x - row_width * 0.5;
        move |i: usize| {
            let min = Vec2::new(left + i as f32 * (size.x + GAP * scale), top);
            Panel {
                min,
                max: min + size,
                radius: CORNER_RADIUS * scale,
                fill: GLASS,
                shadow,
                shadow_blur: blur,
            }
        }
    };

    let timer = row(TIMER_SIZE, 4, timer_top, Rgba::from_rgb8(220, 20, 60, 0.5));
    let info = row(INFO_SIZE, 2, info_top, Rgba::from_rgb8(255, 255, 255, 0.2));

    [timer(0), timer(1), timer(2), timer(3), info(0), info(1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_centered() {
        let panels = countdown_panels(Vec2::new(1280.0, 720.0), 1.0, 0.0);
        let timers = &panels[..4];
        let infos = &panels[4..];

        let span = |row: &[Panel]| (row[0].min.x, row[row.len() - 1].max.x);
        let (left, right) = span(timers);
        assert!((left + right - 1280.0).abs() < 1e-3);
        let (left, right) = span(infos);
        assert!((left + right - 1280.0).abs() < 1e-3);

        // Both rows are 552 px wide
        assert!((right - left - 552.0).abs() < 1e-3);
        assert!(infos[0].min.y >= timers[0].max.y + GAP - 1e-3);
    }

    #[test]
    fn test_panels_do_not_overlap() {
        let panels = countdown_panels(Vec2::new(1280.0, 720.0), 1.0, 10.0);
        for pair in panels[..4].windows(2) {
            assert!((pair[1].min.x - pair[0].max.x - GAP).abs() < 1e-3);
        }
        assert!(panels.iter().all(|p| p.size().x > 0.0 && p.size().y > 0.0));
    }

    #[test]
    fn test_shadow_follows_glow_and_scale() {
        let panels = countdown_panels(Vec2::new(2560.0, 1440.0), 2.0, 15.0);
        assert!(panels.iter().all(|p| p.shadow_blur == 30.0));
        assert_eq!(panels[0].size(), TIMER_SIZE * 2.0);
        assert_eq!(panels[0].radius, 16.0);

        // Timer boxes glow crimson, glass panels white
        assert_eq!(panels[0].shadow, Rgba::from_rgb8(220, 20, 60, 0.5));
        assert_eq!(panels[5].shadow, Rgba::from_rgb8(255, 255, 255, 0.2));
    }
}
