use glam::Vec2;
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    attractor::Attractor,
    math_helpers::{bearing_relative_to, direction, distance, heading_vector, relative_angle},
    moveable::{Agent, Command, Moveable},
    options::{FlockingOptions, RunOptions, Temperament},
    wall::Wall,
};

/// Below this the fear timer counts as run out.
const FEAR_EPSILON: f32 = 0.000001;
/// Peers closer than this are taken to be the sheep itself.
const SELF_EPSILON: f32 = 0.000001;

/// Switches for the individual parts of the movement algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleToggles {
    pub sheepdog_avoidance: bool,
    pub attraction: bool,
    pub cohesion: bool,
    pub separation: bool,
    pub alignment: bool,
    pub wall_avoidance: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        RuleToggles {
            sheepdog_avoidance: true,
            attraction: true,
            cohesion: true,
            separation: true,
            alignment: true,
            wall_avoidance: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleWeights {
    pub fear: f32,
    pub attraction: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub alignment: f32,
    pub avoidance: f32,
}

impl RuleWeights {
    fn new(options: &FlockingOptions, temperament: &Temperament) -> Self {
        RuleWeights {
            fear: options.fear,
            attraction: options.attraction,
            cohesion: temperament.cohesion,
            separation: temperament.separation,
            alignment: temperament.alignment,
            avoidance: options.avoidance,
        }
    }
}

/// Running weighted mean of turn angles, one `(angle * weight, weight)` pair per rule.
#[derive(Debug, Default, Clone, Copy)]
struct HeadingBlend {
    weighted_sum: f32,
    total_weight: f32,
}

impl HeadingBlend {
    fn add(&mut self, angle: f32, weight: f32) {
        self.weighted_sum += angle * weight;
        self.total_weight += weight;
    }

    /// Blended angle as a fraction of a half turn, `None` when no rule fired.
    fn turn(&self) -> Option<f32> {
        if self.total_weight == 0. {
            None
        } else {
            Some((self.weighted_sum / self.total_weight) / 180.)
        }
    }
}

/// The rest of the herd as seen from one sheep: everyone before and after it in the
/// herd's order.
#[derive(Debug, Clone, Copy)]
pub struct Peers<'a> {
    before: &'a [Sheep],
    after: &'a [Sheep],
}

impl<'a> Peers<'a> {
    pub fn new(before: &'a [Sheep], after: &'a [Sheep]) -> Self {
        Peers { before, after }
    }

    /// Every sheep in `herd` is a peer.
    pub fn all(herd: &'a [Sheep]) -> Self {
        Peers {
            before: herd,
            after: &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Sheep> {
        self.before.iter().chain(self.after.iter())
    }
}

/// Everything a sheep reads, never writes, during its update.
pub struct Surroundings<'a, T: Agent> {
    pub herd: Peers<'a>,
    pub sheepdogs: &'a [T],
    pub attractors: &'a [Attractor],
    pub walls: &'a [Wall],
}

/// A flocking agent. Calm sheep wander towards a point picked from an attractor while
/// keeping with the herd; sheep with a sheepdog close by bolt away from it.
#[derive(Debug, Clone)]
pub struct Sheep {
    pub id: usize,
    pub body: Moveable,
    pub sprite: String,
    pub rules: RuleToggles,
    weights: RuleWeights,
    is_fleeing: bool,
    fear_timer: f32,
    attraction_target: Option<Vec2>,
}

impl Agent for Sheep {
    fn body(&self) -> &Moveable {
        &self.body
    }
}

impl Sheep {
    /// Creates a calm [`Sheep`] with no wandering target yet.
    pub fn new(id: usize, position: Vec2, sprite: String, run_options: &RunOptions) -> Self {
        let flocking = &run_options.flocking;
        let mut body = Moveable::new(position, &run_options.kinematics);
        body.set_max_speed(flocking.calm.max_speed);

        Sheep {
            id,
            body,
            sprite,
            rules: Default::default(),
            weights: RuleWeights::new(flocking, &flocking.calm),
            is_fleeing: false,
            fear_timer: 0.,
            attraction_target: None,
        }
    }

    pub fn is_fleeing(&self) -> bool {
        self.is_fleeing
    }

    pub fn fear_timer(&self) -> f32 {
        self.fear_timer
    }

    pub fn attraction_target(&self) -> Option<Vec2> {
        self.attraction_target
    }

    pub fn weights(&self) -> &RuleWeights {
        &self.weights
    }

    /// Moves the sheep along its current heading, then decides where to head next.
    pub fn update<T: Agent, R: Rng + ?Sized>(
        &mut self,
        surroundings: &Surroundings<T>,
        dt: f32,
        run_options: &RunOptions,
        rng: &mut R,
    ) {
        self.body.update(surroundings.walls, dt);

        let command = self.run_rules(surroundings, dt, &run_options.flocking, rng);
        self.body.steer(command, dt);
    }

    // TODO: the fear bearing is absolute while every other rule is relative to the
    // heading; check with level design before wrapping it like the rest.
    pub fn run_rules<T: Agent, R: Rng + ?Sized>(
        &mut self,
        surroundings: &Surroundings<T>,
        dt: f32,
        options: &FlockingOptions,
        rng: &mut R,
    ) -> Command {
        let threat = self.nearest_threat(surroundings.sheepdogs);
        self.update_fear(threat, dt, surroundings.attractors, options, rng);

        let mut blend = HeadingBlend::default();
        let position = self.body.position;

        // conditional forces
        if self.is_fleeing {
            if let (true, Some((threat_position, _))) = (self.rules.sheepdog_avoidance, threat) {
                blend.add(-direction(position, threat_position), self.weights.fear);
                self.attraction_target = None;
            }
        } else if let Some(target) = self.attraction_target {
            let to_target = distance(position, target);

            if to_target < options.arrival_distance {
                self.body.set_max_speed(0.);
            } else {
                self.body.set_max_speed(options.calm.max_speed);
            }

            if self.rules.attraction && to_target < options.visual_range {
                let heading = self.body.heading();
                blend.add(
                    bearing_relative_to(direction(position, target), heading),
                    self.weights.attraction,
                );
            }
        }

        // constant forces
        self.flock(&surroundings.herd, options, &mut blend);

        if self.rules.wall_avoidance {
            self.avoid_walls(surroundings.walls, options, &mut blend);
        }

        Command {
            throttle: 1.,
            turn: blend.turn().unwrap_or(0.),
        }
    }

    fn nearest_threat<T: Agent>(&self, sheepdogs: &[T]) -> Option<(Vec2, f32)> {
        sheepdogs
            .iter()
            .map(|dog| (dog.position(), distance(dog.position(), self.body.position)))
            .fold(None, |nearest, (position, d)| match nearest {
                Some((_, nearest_d)) if nearest_d <= d => nearest,
                _ => Some((position, d)),
            })
    }

    fn update_fear<R: Rng + ?Sized>(
        &mut self,
        threat: Option<(Vec2, f32)>,
        dt: f32,
        attractors: &[Attractor],
        options: &FlockingOptions,
        rng: &mut R,
    ) {
        match threat {
            Some((threat_position, d)) if d < options.fear_distance => {
                if !self.is_fleeing {
                    self.start_fleeing(threat_position, options);
                }
                self.fear_timer = options.fear_timer_default;
            }
            _ if self.fear_timer < FEAR_EPSILON => {
                if self.is_fleeing {
                    self.calm_down(options);
                    self.attraction_target = Self::pick_target(attractors, rng);
                }
            }
            _ => self.fear_timer -= dt,
        }

        // freshly spawned sheep have not picked anything to wander to yet
        if !self.is_fleeing && self.attraction_target.is_none() {
            self.attraction_target = Self::pick_target(attractors, rng);
        }
    }

    fn start_fleeing(&mut self, threat_position: Vec2, options: &FlockingOptions) {
        debug!("sheep {} spooked at {:?}", self.id, self.body.position);

        self.is_fleeing = true;
        self.apply_temperament(&options.fleeing);
        self.attraction_target = None;

        // bolt straight away from the sheepdog
        self.body
            .set_heading(direction(threat_position, self.body.position));
    }

    fn calm_down(&mut self, options: &FlockingOptions) {
        debug!("sheep {} calmed down at {:?}", self.id, self.body.position);

        self.is_fleeing = false;
        self.apply_temperament(&options.calm);
    }

    fn apply_temperament(&mut self, temperament: &Temperament) {
        self.body.set_max_speed(temperament.max_speed);
        self.weights.cohesion = temperament.cohesion;
        self.weights.alignment = temperament.alignment;
        self.weights.separation = temperament.separation;
    }

    fn pick_target<R: Rng + ?Sized>(attractors: &[Attractor], rng: &mut R) -> Option<Vec2> {
        attractors
            .choose(rng)
            .map(|attractor| attractor.sample_point(&mut *rng))
    }

    /// Cohesion towards the midpoint of visible peers, separation from the closest
    /// crowding one and alignment with their average heading.
    fn flock(&self, herd: &Peers, options: &FlockingOptions, blend: &mut HeadingBlend) {
        let position = self.body.position;
        let heading = self.body.heading();

        let mut midpoint = Vec2::ZERO;
        let mut heading_sum = 0.;
        let mut nearby = 0;
        let mut closest: Option<(Vec2, f32)> = None;

        for other in herd.iter() {
            let d = distance(other.body.position, position);
            if d < SELF_EPSILON {
                continue;
            }

            if d < options.visual_range {
                midpoint += other.body.position;
                heading_sum += other.body.heading();
                nearby += 1;
            }

            if d < options.separation_distance && closest.map_or(true, |(_, cd)| d < cd) {
                closest = Some((other.body.position, d));
            }
        }

        if self.rules.cohesion && nearby > 0 {
            let midpoint = midpoint / nearby as f32;
            blend.add(
                bearing_relative_to(direction(position, midpoint), heading),
                self.weights.cohesion,
            );
        }

        if let (true, Some((closest_position, _))) = (self.rules.separation, closest) {
            blend.add(
                -bearing_relative_to(direction(position, closest_position), heading),
                self.weights.separation,
            );
        }

        if self.rules.alignment && nearby > 0 {
            blend.add(
                relative_angle(heading_sum / nearby as f32 - heading),
                self.weights.alignment,
            );
        }
    }

    /// Casts the perception rays and turns away from walls they hit, harder the
    /// closer the hit.
    fn avoid_walls(&self, walls: &[Wall], options: &FlockingOptions, blend: &mut HeadingBlend) {
        let position = self.body.position;
        let heading = self.body.heading();

        let (rotation_sum, rays_hit) = options
            .avoidance_rays
            .iter()
            .filter_map(|angle| {
                // positive ray angles sweep clockwise, to the sheep's right
                let ray_end = position + heading_vector(heading - angle) * options.avoidance_range;

                walls
                    .iter()
                    .filter_map(|wall| wall.intersect_segment(position, ray_end))
                    .map(|hit| distance(position, hit))
                    .fold(None, |nearest: Option<f32>, d| {
                        Some(nearest.map_or(d, |n| n.min(d)))
                    })
                    .map(|hit_distance| {
                        angle.signum() * 180. - (hit_distance / options.visual_range) * 180.
                    })
            })
            .fold((0., 0), |(sum, n), rotation| (sum + rotation, n + 1));

        if rays_hit > 0 {
            blend.add(rotation_sum / rays_hit as f32, self.weights.avoidance);
        }
    }
}
