use glam::Vec2;
use log::{error, info};
use rand::Rng;

use crate::config::FieldConfig;
use crate::field::ParticleField;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// The animated background layer: a particle field bound to a drawing surface
/// and driven by a self-rescheduling frame loop.
///
/// Frames are requested one at a time. The handle of the frame in flight is
/// kept so that disabling the layer can cancel it before anything else is
/// released.
pub struct Background<S, F: FrameScheduler, R> {
    surface: S,
    scheduler: F,
    field: ParticleField<R>,
    viewport: Viewport,
    sized: bool,
    pending: Option<F::Handle>,
    enabled: bool,
}

impl<S: Surface, F: FrameScheduler, R: Rng> Background<S, F, R> {
    /// Sizes the surface and populates the field for `viewport` when enabled;
    /// a disabled layer only remembers the viewport until it is enabled. No
    /// frame is drawn or scheduled until [`Background::start`] is called.
    pub fn new(surface: S, scheduler: F, viewport: Viewport, config: FieldConfig, rng: R, enabled: bool) -> Self {
        let mut background = Background {
            surface,
            scheduler,
            field: ParticleField::new(config, rng),
            viewport,
            sized: false,
            pending: None,
            enabled,
        };

        background.resize(viewport);
        background
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Builds a viewport with this layer's pixel ratio bounds.
    pub fn viewport(&self, width: f32, height: f32, pixel_ratio: f32) -> Viewport {
        Viewport::new(width, height, pixel_ratio, self.field.config())
    }

    /// Adopts `viewport`. While disabled the surface and population are left
    /// alone and brought up to date on the next start.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.sized = false;

        if self.enabled {
            self.apply_viewport();
        }
    }

    fn apply_viewport(&mut self) {
        if self.sized {
            return;
        }

        self.surface.resize(&self.viewport);
        self.field.resize(self.viewport);
        self.sized = true;
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.field.set_pointer(position);
    }

    pub fn pointer_left(&mut self) {
        self.field.clear_pointer();
    }

    /// Draws the first frame right away and schedules the next one.
    /// Does nothing when disabled or already running.
    pub fn start(&mut self) {
        if !self.enabled || self.pending.is_some() {
            return;
        }

        self.apply_viewport();
        info!("Starting particle background ({} particles)", self.field.particles().len());
        self.on_frame();
    }

    /// Frame callback body. The frame that invoked this is spent, so the
    /// stored handle is dropped before the step runs.
    pub fn on_frame(&mut self) {
        self.pending = None;

        if !self.enabled {
            return;
        }

        self.field.frame(&mut self.surface);

        match self.scheduler.request() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => error!("Particle background stopped: {}", err),
        }
    }

    /// Stops the loop. The pending frame is cancelled first and the surface
    /// is wiped so a disabled layer shows nothing.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }

        if self.enabled {
            info!("Stopping particle background");
        }

        self.enabled = false;
        self.surface.clear(self.field.viewport().size());
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enabled = true;
            self.start();
        } else {
            self.stop();
        }
    }
}
