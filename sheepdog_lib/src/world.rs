use glam::Vec2;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::{
    attractor::Attractor,
    error::LevelError,
    goal::Goal,
    level::Level,
    moveable::Command,
    options::RunOptions,
    scene::{CameraLayout, Scene},
    sheep::{Peers, Sheep, Surroundings},
    sheepdog::Sheepdog,
    wall::Wall,
};

/// Below this much time left the round is lost.
const TIME_EPSILON: f32 = 0.000001;
const SHEEPDOG_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Running,
    /// every sheep is penned
    Won { time_left: f32 },
    TimeUp { sheep_left: usize },
}

impl Status {
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// One round of the game: owns every entity of a level and steps them together.
pub struct World {
    scene: Scene,
    sheepdogs: Vec<Sheepdog>,
    herd: Vec<Sheep>,
    walls: Vec<Wall>,
    attractors: Vec<Attractor>,
    goals: Vec<Goal>,
    time_left: f32,
    penned: usize,
    tick: u64,
    status: Status,
    rng: Xoshiro256PlusPlus,
}

impl World {
    pub fn new(level: Level, run_options: &RunOptions) -> Result<Self, LevelError> {
        if level.sheepdogs.len() != SHEEPDOG_COUNT {
            return Err(LevelError::SheepdogCount(level.sheepdogs.len()));
        }

        let seed = run_options
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        info!("starting world with seed {seed}");

        let sheepdogs = level
            .sheepdogs
            .into_iter()
            .map(|spawn| Sheepdog::new(spawn.position, spawn.sprite, &run_options.kinematics))
            .collect();

        let herd = level
            .herd
            .into_iter()
            .enumerate()
            .map(|(id, spawn)| Sheep::new(id, spawn.position, spawn.sprite, run_options))
            .collect();

        Ok(World {
            scene: level.scene,
            sheepdogs,
            herd,
            walls: level.walls,
            attractors: level.attractors,
            goals: level.goals,
            time_left: level.time_to_complete,
            penned: 0,
            tick: 0,
            status: Status::Running,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }

    /// Advances the round by `elapsed` seconds, capped at `max_dt`. A non-finite
    /// `elapsed` counts as no time at all.
    ///
    /// `commands[i]` drives sheepdog `i`; a missing command lets it coast. Sheep are
    /// updated in a fixed order, each one seeing the already moved sheep before it.
    /// Once the round is over nothing changes any more.
    pub fn update(&mut self, elapsed: f32, commands: &[Command], run_options: &RunOptions) -> Status {
        if self.status.is_over() {
            return self.status;
        }

        let dt = if elapsed.is_finite() {
            elapsed.clamp(0., run_options.max_dt)
        } else {
            0.
        };
        trace!("tick {} dt {dt}", self.tick);

        for (i, sheepdog) in self.sheepdogs.iter_mut().enumerate() {
            let command = commands.get(i).copied().unwrap_or_default();
            sheepdog.update(command, &self.walls, dt);
        }

        for i in 0..self.herd.len() {
            let (before, rest) = self.herd.split_at_mut(i);
            if let Some((sheep, after)) = rest.split_first_mut() {
                let surroundings = Surroundings {
                    herd: Peers::new(before, after),
                    sheepdogs: &self.sheepdogs,
                    attractors: &self.attractors,
                    walls: &self.walls,
                };
                sheep.update(&surroundings, dt, run_options, &mut self.rng);
            }
        }

        self.pen_sheep();
        self.time_left -= dt;
        self.tick += 1;

        self.status = if self.herd.is_empty() {
            Status::Won {
                time_left: self.time_left,
            }
        } else if self.time_left < TIME_EPSILON {
            Status::TimeUp {
                sheep_left: self.herd.len(),
            }
        } else {
            Status::Running
        };

        if self.status.is_over() {
            info!("round over after {} ticks: {:?}", self.tick, self.status);
        }

        self.status
    }

    fn pen_sheep(&mut self) {
        let goals = &self.goals;
        let before = self.herd.len();

        self.herd.retain(|sheep| {
            let penned = goals.iter().any(|goal| goal.contains(sheep.body.position));
            if penned {
                debug!("sheep {} penned at {:?}", sheep.id, sheep.body.position);
            }
            !penned
        });

        self.penned += before - self.herd.len();
    }

    /// Frames the two sheepdogs for a `view` sized screen.
    pub fn cameras(&self, view: Vec2) -> CameraLayout {
        self.scene.frame_cameras(
            self.sheepdogs[0].body.position,
            self.sheepdogs[1].body.position,
            view,
        )
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn herd(&self) -> &[Sheep] {
        &self.herd
    }

    pub fn sheepdogs(&self) -> &[Sheepdog] {
        &self.sheepdogs
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Sheep removed by reaching a goal so far.
    pub fn penned(&self) -> usize {
        self.penned
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
