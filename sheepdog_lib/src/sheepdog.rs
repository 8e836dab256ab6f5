use glam::Vec2;

use crate::{
    moveable::{Agent, Command, Moveable},
    options::KinematicOptions,
    wall::Wall,
};

/// Held movement keys of a player.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl From<PlayerInput> for Command {
    fn from(input: PlayerInput) -> Self {
        let turn = if input.left {
            1.
        } else if input.right {
            -1.
        } else {
            0.
        };

        let throttle = if input.forward {
            1.
        } else if input.backward {
            -1.
        } else {
            0.
        };

        Command { throttle, turn }
    }
}

/// Squashes raw tilt sensor readings to -1, 0 or 1 per axis.
pub fn normalize_gyro(gyro_x: f32, gyro_y: f32, threshold: f32) -> (i8, i8) {
    let axis = |value: f32| {
        if value > threshold {
            1
        } else if value < -threshold {
            -1
        } else {
            0
        }
    };

    (axis(gyro_x), axis(gyro_y))
}

/// Command for a sheepdog steered by tilting: tilt right turns clockwise, tilt
/// forward speeds up.
pub fn gyro_command(gyro_x: f32, gyro_y: f32, threshold: f32) -> Command {
    let (x, y) = normalize_gyro(gyro_x, gyro_y, threshold);
    Command {
        throttle: -f32::from(y),
        turn: -f32::from(x),
    }
}

/// A player controlled agent the herd is afraid of.
#[derive(Debug, Clone)]
pub struct Sheepdog {
    pub body: Moveable,
    pub sprite: String,
}

impl Agent for Sheepdog {
    fn body(&self) -> &Moveable {
        &self.body
    }
}

impl Sheepdog {
    pub fn new(position: Vec2, sprite: String, kinematics: &KinematicOptions) -> Self {
        Sheepdog {
            body: Moveable::new(position, kinematics),
            sprite,
        }
    }

    /// Applies the player's command, then moves and resolves wall collisions.
    pub fn update(&mut self, command: Command, walls: &[Wall], dt: f32) {
        self.body.steer(command, dt);
        self.body.update(walls, dt);
    }
}
