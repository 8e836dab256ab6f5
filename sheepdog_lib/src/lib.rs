use flockwatcher::{FlockWatcher, SheepData};
use level::Level;
use moveable::Command;
use options::RunOptions;
use world::World;

pub mod attractor;
pub mod error;
pub mod goal;
pub mod level;
pub mod moveable;
pub mod scene;
pub mod sheep;
pub mod sheepdog;
pub mod wall;
pub mod world;

pub mod flockwatcher;
pub mod math_helpers;
pub mod options;

/// Runs a level for `no_iter` fixed steps with idle sheepdogs and returns the sampled
/// herd, saving it when the options say so.
pub fn herd_base(
    level: Level,
    no_iter: u64,
    dt: f32,
    run_options: &RunOptions,
) -> Result<Vec<SheepData>, Box<dyn std::error::Error>> {
    let mut world = World::new(level, run_options)?;
    let mut flock_watcher = FlockWatcher::new(run_options.sample_rate);
    let idle = [Command::default(); 2];

    for _ in 0..no_iter {
        if world.update(dt, &idle, run_options).is_over() {
            break;
        }
        flock_watcher.watch(&world);
    }

    let data = flock_watcher.pop_data_save(&run_options.save_options)?;

    Ok(data)
}
