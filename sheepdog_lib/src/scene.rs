use glam::Vec2;

use crate::error::{non_negative, GeometryError};

/// How close, per axis, the sheepdogs must stay inside the view for a single shared
/// camera.
const SPLIT_MARGIN: f32 = 50.;

/// Top left corners of the cameras framing the two sheepdogs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraLayout {
    /// One camera of the full view size, between both sheepdogs.
    Single(Vec2),
    /// Two cameras of half the view width, one per sheepdog.
    Split(Vec2, Vec2),
}

/// The world bounds of a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    width: f32,
    height: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            width: 500.,
            height: 500.,
        }
    }
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Scene {
            width: non_negative("scene width", width)?,
            height: non_negative("scene height", height)?,
        })
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Keeps a camera of `size` from looking past the scene's edges. A camera larger
    /// than the scene sticks to the top left corner.
    pub fn bound_camera_position(&self, position: Vec2, size: Vec2) -> Vec2 {
        position.min(self.size() - size).max(Vec2::ZERO)
    }

    /// Frames both sheepdogs with a `view` sized camera, splitting the screen once they
    /// drift too far apart.
    pub fn frame_cameras(&self, a: Vec2, b: Vec2, view: Vec2) -> CameraLayout {
        let gap = (a - b).abs();

        if gap.x < view.x - SPLIT_MARGIN && gap.y < view.y - SPLIT_MARGIN {
            let centre = (a + b) / 2.;
            CameraLayout::Single(self.bound_camera_position(centre - view / 2., view))
        } else {
            let half = Vec2::new(view.x / 2., view.y);
            CameraLayout::Split(
                self.bound_camera_position(a - half / 2., half),
                self.bound_camera_position(b - half / 2., half),
            )
        }
    }
}
