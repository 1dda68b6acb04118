use std::fmt;

use glam::Vec2;

use crate::viewport::Viewport;

/// Straight (non-premultiplied) colour in CSS `rgba()` terms.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Drawing target of the particle field. All coordinates are logical pixels.
pub trait Surface {
    /// Resizes the backing store to the physical size of `viewport` and scales
    /// drawing so that logical coordinates keep spanning `viewport.size()`.
    fn resize(&mut self, viewport: &Viewport);

    fn clear(&mut self, size: Vec2);

    /// Fills `[0, size]` with a linear gradient running from the top-left to the bottom-right corner.
    fn fill_diagonal_gradient(&mut self, size: Vec2, from: Rgba, to: Rgba);

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css() {
        assert_eq!(Rgba::new(120, 119, 198, 0.2).to_string(), "rgba(120,119,198,0.2)");
        assert_eq!(Rgba::new(255, 255, 255, 1.0).with_alpha(0.09).to_string(), "rgba(255,255,255,0.09)");
    }
}
