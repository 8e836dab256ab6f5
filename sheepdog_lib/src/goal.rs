use glam::Vec2;

use crate::{error::GeometryError, math_helpers::Rect};

/// Pen the sheep have to be herded into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goal {
    rect: Rect,
}

impl Goal {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Goal {
            rect: Rect::new(left, top, width, height)?,
        })
    }

    /// True when `position` is strictly inside, edges do not count.
    pub fn contains(&self, position: Vec2) -> bool {
        self.rect.contains(position)
    }
}
