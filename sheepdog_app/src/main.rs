use std::{fs::File, io::BufReader};

use anyhow::{Context, Result};
use clap_serde_derive::{clap::Parser, ClapSerde};
use glam::Vec2;
use log::{debug, info};
use sheepdog_lib::{
    flockwatcher::FlockWatcher,
    level::Level,
    options::{RunOptions, SaveOptions},
    world::{Status, World},
};

mod cliargs;
mod script;

use cliargs::{Args, Config};
use script::InputScript;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse whole args with clap
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(f) = File::open(&args.config_path) {
        // Parse config with serde, then merge what clap already parsed on top
        let config = serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f))
            .with_context(|| format!("error in configuration file {}", args.config_path.display()))?;
        Config::from(config).merge(&mut args.config)
    } else {
        // If there is not config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    let run_options = run_options(&config);

    let level = Level::from_path(&config.level)?;
    let mut world = World::new(level, &run_options).context("level is not playable")?;

    let mut script = if config.script.is_empty() {
        InputScript::default()
    } else {
        InputScript::from_path(&config.script)?
    };

    let mut flock_watcher = FlockWatcher::new(run_options.sample_rate);
    let view = Vec2::new(config.view_width, config.view_height);

    for tick in 0..config.ticks {
        let commands = script.commands(tick, run_options.gyro_threshold);
        let status = world.update(config.dt, &commands, &run_options);
        flock_watcher.watch(&world);

        if tick % 60 == 0 {
            debug!("tick {tick}: cameras {:?}", world.cameras(view));
        }

        if status.is_over() {
            break;
        }
    }

    match world.status() {
        Status::Won { time_left } => info!("YOU WIN! Time left: {}", time_left as i32),
        Status::TimeUp { sheep_left } => info!("YOU LOSE! Sheep left: {sheep_left}"),
        Status::Running => info!(
            "stopped after {} ticks with {:.1}s left: {} sheep penned, {} to go",
            world.tick(),
            world.time_left(),
            world.penned(),
            world.herd().len()
        ),
    }

    let data = flock_watcher
        .pop_data_save(&run_options.save_options)
        .context("could not save herd data")?;
    info!("collected {} herd samples", data.len());

    Ok(())
}

fn run_options(config: &Config) -> RunOptions {
    let defaults = RunOptions::default();

    RunOptions {
        max_dt: config.max_dt,
        seed: (config.seed != 0).then_some(config.seed),
        sample_rate: config.sample_rate,
        save_options: SaveOptions {
            save_locations: config.save,
            save_locations_path: Some(config.save_path.clone()),
            save_locations_timestamp: config.save_timestamp,
        },
        ..defaults
    }
}
