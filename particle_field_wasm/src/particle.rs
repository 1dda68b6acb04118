use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;

use crate::config::FieldConfig;

#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Particle { position, velocity }
    }

    /// Spawns a particle anywhere in `[0, bounds)` with a small random drift.
    pub fn random<R: Rng>(rng: &mut R, bounds: Vec2, max_speed: f32) -> Self {
        Particle {
            position: Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
            velocity: range_random_v2(rng, Vec2::splat(-max_speed), Vec2::splat(max_speed)),
        }
    }

    /// Moves by one velocity step and bounces off the `[0, bounds]` rectangle.
    ///
    /// The position is not pulled back inside, so a particle overshoots the
    /// edge for one frame before the flipped velocity brings it back.
    pub fn advance(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Pulls the particle toward `pointer` and damps its velocity.
    pub fn attract(&mut self, pointer: Vec2, config: &FieldConfig) {
        let delta = pointer - self.position;
        let force = attraction_force(delta.length(), config);

        self.velocity += delta * force;
        self.velocity *= config.pointer_damping;
    }
}

/// Inverse-square attraction, capped, with the distance floored at one unit.
pub fn attraction_force(distance: f32, config: &FieldConfig) -> f32 {
    let distance = distance.max(1.0);
    (config.attraction_strength / (distance * distance)).min(config.attraction_cap)
}

#[inline]
fn range_random_v2<R: Rng>(rng: &mut R, min: Vec2, max: Vec2) -> Vec2 {
    Vec2 {
        x: range_random(rng, min.x, max.x),
        y: range_random(rng, min.y, max.y),
    }
}

#[inline]
fn range_random<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.gen::<f32>() * (max - min) + min
}
