use glam::Vec2;

use crate::{
    math_helpers::{heading_vector, wrap_degrees},
    options::KinematicOptions,
    wall::Wall,
};

/// Per tick output of a controller, consumed by [`Moveable::steer`].
///
/// `throttle` is the acceleration direction (-1 back, 0 coast to a stop, 1 forward),
/// `turn` the rotation direction as a multiple of the turn rate.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Command {
    pub throttle: f32,
    pub turn: f32,
}

impl Command {
    pub fn new(throttle: f32, turn: f32) -> Self {
        Command { throttle, turn }
    }
}

/// Anything that carries a kinematic body other agents can look at.
pub trait Agent {
    fn body(&self) -> &Moveable;

    fn position(&self) -> Vec2 {
        self.body().position
    }

    fn heading(&self) -> f32 {
        self.body().heading()
    }
}

/// A forward facing vehicle: a heading in degrees and a signed speed along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moveable {
    pub position: Vec2,
    /// degrees in [0, 360), 0 along +x, 90 up the screen
    heading: f32,
    speed: f32,
    max_speed: f32,
    pub acceleration: f32,
    /// degrees per second
    pub turn_rate: f32,
    pub radius: f32,
}

impl Agent for Moveable {
    fn body(&self) -> &Moveable {
        self
    }
}

impl Moveable {
    /// Creates a new [`Moveable`] at rest, facing along +x.
    pub fn new(position: Vec2, kinematics: &KinematicOptions) -> Self {
        Moveable {
            position,
            heading: 0.,
            speed: 0.,
            max_speed: kinematics.max_speed,
            acceleration: kinematics.acceleration,
            turn_rate: kinematics.turn_rate,
            radius: kinematics.radius,
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = wrap_degrees(heading);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Changes the speed limit, pulling the current speed back inside it.
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.);
        self.speed = self.speed.clamp(-self.max_speed, self.max_speed);
    }

    /// Moves the speed towards `direction * max_speed`, or towards 0 when `direction`
    /// is 0 without crossing it.
    pub fn accelerate(&mut self, direction: f32, dt: f32) {
        let step = self.acceleration * dt;

        if direction == 0. {
            if self.speed < 0. {
                self.speed = (self.speed + step).min(0.);
            } else if self.speed > 0. {
                self.speed = (self.speed - step).max(0.);
            }
        } else {
            self.speed = (self.speed + step * direction).clamp(-self.max_speed, self.max_speed);
        }
    }

    /// Positive directions turn counterclockwise on screen.
    pub fn rotate(&mut self, direction: f32, dt: f32) {
        self.set_heading(self.heading + direction * self.turn_rate * dt);
    }

    pub fn move_forward(&mut self, dt: f32) {
        // dead zone, keeps agents at rest from drifting
        if self.speed > -1. && self.speed < 1. {
            return;
        }

        self.position += heading_vector(self.heading) * self.speed * dt;
    }

    /// Bounces off every wall the body overlaps, in order. Each collision mirrors the
    /// heading across the hit axes and takes the wall's corrected position.
    pub fn resolve_collisions(&mut self, walls: &[Wall]) {
        for wall in walls {
            let hit = wall.collide_circle(self.position, self.radius);
            if !hit.colliding {
                continue;
            }

            let rad = self.heading.to_radians();
            let y = if hit.y_axis { -rad.sin() } else { rad.sin() };
            let x = if hit.x_axis { -rad.cos() } else { rad.cos() };

            self.set_heading(y.atan2(x).to_degrees());
            self.position = hit.position;
        }
    }

    /// Applies a controller's decision for this tick.
    pub fn steer(&mut self, command: Command, dt: f32) {
        self.accelerate(command.throttle, dt);
        self.rotate(command.turn, dt);
    }

    pub fn update(&mut self, walls: &[Wall], dt: f32) {
        self.move_forward(dt);
        self.resolve_collisions(walls);
    }
}
