use glam::Vec2;

use crate::{
    error::GeometryError,
    math_helpers::{distance_sq, segment_intersection, Rect},
};

/// Outcome of testing a circle against a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub colliding: bool,
    /// the circle pushed into a vertical edge
    pub x_axis: bool,
    /// the circle pushed into a horizontal edge
    pub y_axis: bool,
    /// the circle position nudged one unit away from every edge it overlaps
    pub position: Vec2,
}

/// An impassable axis aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    rect: Rect,
}

impl Wall {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Result<Self, GeometryError> {
        Ok(Wall {
            rect: Rect::new(left, top, width, height)?,
        })
    }

    /// Tests the bounding box of a circle against the wall, one axis at a time.
    ///
    /// An axis counts towards a collision either when the circle's edge crosses the
    /// wall's edge or when its center already sits between the wall's edges. Only
    /// both axes together make a collision. Every crossed edge moves the returned
    /// position a single unit outwards, so a circle is pushed out over several ticks.
    pub fn collide_circle(&self, position: Vec2, radius: f32) -> Collision {
        let mut corrected = position;
        let mut x_axis = false;
        let mut y_axis = false;
        let mut conditions_met = 0;

        if position.x < self.rect.left {
            if position.x + radius > self.rect.left {
                corrected.x -= 1.;
                x_axis = true;
                conditions_met += 1;
            }
        } else if position.x > self.rect.right() {
            if position.x - radius < self.rect.right() {
                corrected.x += 1.;
                x_axis = true;
                conditions_met += 1;
            }
        } else {
            conditions_met += 1;
        }

        if position.y < self.rect.top {
            if position.y + radius > self.rect.top {
                corrected.y -= 1.;
                y_axis = true;
                conditions_met += 1;
            }
        } else if position.y > self.rect.bottom() {
            if position.y - radius < self.rect.bottom() {
                corrected.y += 1.;
                y_axis = true;
                conditions_met += 1;
            }
        } else {
            conditions_met += 1;
        }

        Collision {
            colliding: conditions_met == 2,
            x_axis,
            y_axis,
            position: corrected,
        }
    }

    /// Closest point to `p1` where the segment `p1 p2` crosses one of the wall's edges.
    pub fn intersect_segment(&self, p1: Vec2, p2: Vec2) -> Option<Vec2> {
        self.rect
            .edges()
            .iter()
            .filter_map(|(e1, e2)| segment_intersection(p1, p2, *e1, *e2))
            .fold(None, |closest: Option<Vec2>, poi| match closest {
                Some(c) if distance_sq(p1, c) <= distance_sq(p1, poi) => Some(c),
                _ => Some(poi),
            })
    }
}
