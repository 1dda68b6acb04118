use std::f64::consts::TAU;

use glam::Vec2;
use log::debug;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::surface::{Rgba, Surface};
use crate::viewport::Viewport;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no browser window is available")]
    NoWindow,

    #[error("the canvas has no 2d rendering context")]
    ContextUnavailable,

    #[error("the 2d context has an unexpected type")]
    NotCanvas2d,

    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        SurfaceError::Js(format!("{:?}", value))
    }
}

/// Full-viewport decorative canvas drawn through the 2d context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the 2d context, failing if the browser cannot provide one.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let context = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::NotCanvas2d)?;

        let surface = CanvasSurface { canvas, context };
        surface.pin_behind_content()?;

        Ok(surface)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Fixes the canvas behind the page and keeps it out of hit testing and
    /// the accessibility tree.
    fn pin_behind_content(&self) -> Result<(), SurfaceError> {
        let style = self.canvas.style();

        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("z-index", "-10")?;
        style.set_property("pointer-events", "none")?;
        self.canvas.set_attribute("aria-hidden", "true")?;

        Ok(())
    }

    #[allow(deprecated)]
    fn set_fill(&self, color: Rgba) {
        self.context.set_fill_style(&JsValue::from_str(&color.to_string()));
    }

    #[allow(deprecated)]
    fn set_stroke(&self, color: Rgba) {
        self.context.set_stroke_style(&JsValue::from_str(&color.to_string()));
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.physical_size();
        let ratio = viewport.pixel_ratio() as f64;

        debug!("New canvas size: [{}, {}] (ratio {})", width, height, ratio);

        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width()));
        let _ = style.set_property("height", &format!("{}px", viewport.height()));

        // Resizing resets the context state, so the scale is reapplied every time.
        let _ = self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn clear(&mut self, size: Vec2) {
        self.context.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    #[allow(deprecated)]
    fn fill_diagonal_gradient(&mut self, size: Vec2, from: Rgba, to: Rgba) {
        let (width, height) = (size.x as f64, size.y as f64);
        let gradient = self.context.create_linear_gradient(0.0, 0.0, width, height);

        let _ = gradient.add_color_stop(0.0, &from.to_string());
        let _ = gradient.add_color_stop(1.0, &to.to_string());

        self.context.set_fill_style(&gradient);
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.context.begin_path();
        let _ = self.context.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.set_fill(color);
        self.context.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.set_stroke(color);
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
    }
}
