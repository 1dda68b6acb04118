use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// A drifting set of particles linked by proximity lines and drawn toward the pointer.
pub struct ParticleField<R> {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Creates an empty field. Call [`ParticleField::resize`] to populate it.
    pub fn new(config: FieldConfig, rng: R) -> Self {
        let viewport = Viewport::new(0.0, 0.0, 1.0, &config);

        ParticleField {
            config,
            viewport,
            particles: Vec::new(),
            pointer: None,
            rng,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Adopts a new viewport and grows or shrinks the population to match it.
    ///
    /// Surviving particles keep their state; new ones are appended and excess
    /// ones are dropped from the end.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;

        let target = viewport.target_population(&self.config);
        let bounds = viewport.size();
        let max_speed = self.config.max_initial_speed;

        if self.particles.len() < target {
            let rng = &mut self.rng;
            let missing = target - self.particles.len();
            self.particles.extend((0..missing).map(|_| Particle::random(&mut *rng, bounds, max_speed)));
        } else {
            self.particles.truncate(target);
        }

        debug!(
            "Particle field resized to {}x{} @{}x: {} particles",
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio(),
            self.particles.len(),
        );
    }

    /// Runs one animation frame: paints the backdrop, advances and draws every
    /// particle, links close pairs and finally applies pointer attraction.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let size = self.viewport.size();
        surface.clear(size);

        if self.viewport.is_empty() {
            return;
        }

        surface.fill_diagonal_gradient(size, self.config.gradient_from, self.config.gradient_to);

        for particle in self.particles.iter_mut() {
            particle.advance(size);
            surface.fill_disc(particle.position, self.config.particle_radius, self.config.particle_color);
        }

        self.draw_links(surface);

        if let Some(pointer) = self.pointer {
            for particle in self.particles.iter_mut() {
                particle.attract(pointer, &self.config);
            }
        }
    }

    fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let d2 = a.position.distance_squared(b.position);

                if let Some(alpha) = link_opacity(d2, &self.config) {
                    surface.stroke_line(a.position, b.position, self.config.link_color.with_alpha(alpha));
                }
            }
        }
    }
}

/// Opacity of the line joining two particles `sqrt(distance_sq)` apart, or
/// `None` when they are too far apart to be linked.
pub fn link_opacity(distance_sq: f32, config: &FieldConfig) -> Option<f32> {
    let max_sq = config.link_distance_sq();

    if distance_sq < max_sq {
        Some(config.link_opacity * (1.0 - distance_sq / max_sq))
    } else {
        None
    }
}
