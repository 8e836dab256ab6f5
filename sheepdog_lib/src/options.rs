use serde::{Deserialize, Serialize};

/// Everything tunable about a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub kinematics: KinematicOptions,
    pub flocking: FlockingOptions,

    /// upper bound for a single tick's elapsed time, in seconds
    pub max_dt: f32,
    /// tilt sensor readings within ±threshold count as centred
    pub gyro_threshold: f32,
    /// seeds the world's random source, `None` draws a fresh seed
    pub seed: Option<u64>,

    pub sample_rate: u64,
    pub save_options: SaveOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            kinematics: Default::default(),
            flocking: Default::default(),
            max_dt: 0.1,
            gyro_threshold: 100.,
            seed: None,
            sample_rate: 1,
            save_options: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicOptions {
    pub max_speed: f32,
    pub acceleration: f32,
    /// degrees per second
    pub turn_rate: f32,
    /// collision radius
    pub radius: f32,
}

impl Default for KinematicOptions {
    fn default() -> Self {
        KinematicOptions {
            max_speed: 150.,
            acceleration: 300.,
            turn_rate: 100.,
            radius: 20.,
        }
    }
}

/// Speed limit and rule weights a sheep switches between when it gets scared or calms
/// down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperament {
    pub max_speed: f32,
    pub cohesion: f32,
    pub alignment: f32,
    pub separation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockingOptions {
    pub visual_range: f32,
    pub separation_distance: f32,

    pub avoidance_range: f32,
    pub avoidance: f32,
    /// perception ray angles relative to the heading, positive rays on the right
    pub avoidance_rays: [f32; 4],

    pub fear_distance: f32,
    pub fear: f32,
    /// seconds a sheep stays scared once no sheepdog is within `fear_distance`
    pub fear_timer_default: f32,

    pub attraction: f32,
    /// a calm sheep this close to its target stops
    pub arrival_distance: f32,

    pub calm: Temperament,
    pub fleeing: Temperament,
}

impl Default for FlockingOptions {
    fn default() -> Self {
        FlockingOptions {
            visual_range: 200.,
            separation_distance: 30.,
            avoidance_range: 50.,
            avoidance: 15.,
            avoidance_rays: [60., 30., -30., -60.],
            fear_distance: 70.,
            fear: 15.,
            fear_timer_default: 0.5,
            attraction: 15.,
            arrival_distance: 30.,
            calm: Temperament {
                max_speed: 30.,
                cohesion: 1.,
                alignment: 2.,
                separation: 8.,
            },
            fleeing: Temperament {
                max_speed: 150.,
                cohesion: 1.,
                alignment: 6.,
                separation: 7.,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptions {
            save_locations: false,
            save_locations_path: Some("./".to_owned()),
            save_locations_timestamp: true,
        }
    }
}
