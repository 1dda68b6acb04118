use glam::Vec2;

use crate::config::FieldConfig;

/// Logical viewport size plus the device pixel ratio used for the backing store.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Builds a viewport, clamping the pixel ratio to the configured bounds.
    ///
    /// Non-finite or negative sizes collapse to zero and an unusable pixel
    /// ratio (zero, negative, NaN) falls back to 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32, config: &FieldConfig) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };

        Viewport {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pixel_ratio: pixel_ratio.clamp(config.min_pixel_ratio, config.max_pixel_ratio),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Size of the backing store in device pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio) as u32,
            (self.height * self.pixel_ratio) as u32,
        )
    }

    /// Number of particles the field should hold for this viewport.
    pub fn target_population(&self, config: &FieldConfig) -> usize {
        let raw = (self.width as f64 * self.height as f64 * config.density).floor() as usize;
        raw.clamp(config.min_particles, config.max_particles)
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
