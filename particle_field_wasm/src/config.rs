use crate::surface::Rgba;

/// Tunables of the particle background.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Particles per square logical pixel.
    pub density: f64,
    pub min_particles: usize,
    pub max_particles: usize,
    /// Initial velocity components are drawn from `[-max_initial_speed, max_initial_speed]`.
    pub max_initial_speed: f32,
    pub particle_radius: f32,
    pub particle_color: Rgba,
    /// Pairs closer than this are connected by a line.
    pub link_distance: f32,
    /// Line opacity for coincident particles, falling off linearly to zero at `link_distance`.
    pub link_opacity: f32,
    pub link_color: Rgba,
    pub attraction_strength: f32,
    pub attraction_cap: f32,
    /// Velocity multiplier applied in frames where a pointer is known.
    pub pointer_damping: f32,
    pub gradient_from: Rgba,
    pub gradient_to: Rgba,
    pub min_pixel_ratio: f32,
    pub max_pixel_ratio: f32,
}

impl FieldConfig {
    #[inline]
    pub fn link_distance_sq(&self) -> f32 {
        self.link_distance * self.link_distance
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 0.00012,
            min_particles: 60,
            max_particles: 220,
            max_initial_speed: 0.3,
            particle_radius: 1.2,
            particle_color: Rgba::new(255, 255, 255, 0.7),
            link_distance: 140.0,
            link_opacity: 0.12,
            link_color: Rgba::new(255, 255, 255, 1.0),
            attraction_strength: 20.0,
            attraction_cap: 0.04,
            pointer_damping: 0.98,
            gradient_from: Rgba::new(120, 119, 198, 0.20),
            gradient_to: Rgba::new(99, 102, 241, 0.08),
            min_pixel_ratio: 1.0,
            max_pixel_ratio: 2.0,
        }
    }
}
