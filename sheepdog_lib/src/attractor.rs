use glam::Vec2;
use rand::Rng;

use crate::error::{finite, non_negative, GeometryError};

/// A disk calm sheep pick wandering targets from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub position: Vec2,
    radius: f32,
}

impl Attractor {
    pub fn new(position: Vec2, radius: f32) -> Result<Self, GeometryError> {
        Ok(Attractor {
            position: Vec2::new(finite("x", position.x)?, finite("y", position.y)?),
            radius: non_negative("radius", radius)?,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Random point inside the disk, rounded to whole coordinates.
    ///
    /// The magnitude is drawn linearly in [0, radius], not area uniform, so points
    /// bunch up towards the centre. Attraction tuning relies on that.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let angle = rng.gen::<f32>() * 360.;
        let magnitude = rng.gen::<f32>() * self.radius;
        let rad = angle.to_radians();

        let point = self.position + Vec2::new(rad.cos(), rad.sin()) * magnitude;
        Vec2::new(point.x.round(), point.y.round())
    }
}
