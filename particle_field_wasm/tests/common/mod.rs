#![allow(dead_code)]

use glam::Vec2;
use particle_field_wasm::scheduler::{FrameError, FrameScheduler};
use particle_field_wasm::surface::{Rgba, Surface};
use particle_field_wasm::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { physical: (u32, u32), ratio: f32 },
    Clear(Vec2),
    Gradient { size: Vec2, from: Rgba, to: Rgba },
    Disc { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba },
}

/// Surface that records every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn discs(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Disc { .. })).count()
    }

    pub fn lines(&self) -> Vec<&DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Line { .. })).collect()
    }

    /// Calls other than clears and resizes, i.e. anything that paints pixels.
    pub fn paint_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, DrawCall::Clear(_) | DrawCall::Resize { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: &Viewport) {
        self.calls.push(DrawCall::Resize {
            physical: viewport.physical_size(),
            ratio: viewport.pixel_ratio(),
        });
    }

    fn clear(&mut self, size: Vec2) {
        self.calls.push(DrawCall::Clear(size));
    }

    fn fill_diagonal_gradient(&mut self, size: Vec2, from: Rgba, to: Rgba) {
        self.calls.push(DrawCall::Gradient { size, from, to });
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Disc { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Line { from, to, color });
    }
}

/// Scheduler that hands out increasing handles and remembers what happened.
#[derive(Debug, Default)]
pub struct FakeFrames {
    pub next: u32,
    pub requested: Vec<u32>,
    pub cancelled: Vec<u32>,
    pub fail: bool,
}

impl FrameScheduler for FakeFrames {
    type Handle = u32;

    fn request(&mut self) -> Result<u32, FrameError> {
        if self.fail {
            return Err(FrameError::Request("refused".to_owned()));
        }

        self.next += 1;
        self.requested.push(self.next);
        Ok(self.next)
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}
