use std::mem;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::{options::SaveOptions, world::World};

/// One sheep at one sample.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SheepData {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub fleeing: bool,
    pub time: u64,
}

/// Accumulates herd positions every `sample_rate` ticks.
pub struct FlockWatcher {
    locations: Vec<SheepData>,
    tick_counter: u64,
    sample_rate: u64,
}

const PREFIX: &str = "sheepdog-data";

impl FlockWatcher {
    pub fn new(sample_rate: u64) -> Self {
        FlockWatcher {
            locations: Vec::new(),
            tick_counter: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection
    pub fn watch(&mut self, world: &World) {
        if !self.should_sample() {
            return;
        }

        let time = self.tick_counter / self.sample_rate;
        self.locations.extend(world.herd().iter().map(|sheep| SheepData {
            id: sheep.id,
            x: sheep.body.position.x,
            y: sheep.body.position.y,
            heading: sheep.body.heading(),
            fleeing: sheep.is_fleeing(),
            time,
        }));
    }

    pub fn pop_data(&mut self) -> Vec<SheepData> {
        mem::take(&mut self.locations)
    }

    /// Returns the collected data, emptying the watcher, after writing it as CSV when
    /// saving is on.
    ///
    /// Depending on save options, either overwrites the same file on every run or
    /// writes a new timestamped one.
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<SheepData>, csv::Error> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = FlockWatcher::get_dataset_name(save_options, Utc::now())
            );

            let mut wtr = csv::Writer::from_path(&file_path)?;
            for row in &data {
                wtr.serialize(row)?;
            }
            wtr.flush()?;

            info!("saved {} samples to {file_path}", data.len());
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.tick_counter += 1;
        self.tick_counter % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::FlockWatcher;
    use crate::{level::Level, options::{RunOptions, SaveOptions}, world::World};

    fn save_options(save_locations_timestamp: bool) -> SaveOptions {
        SaveOptions {
            save_locations: true,
            save_locations_path: Some("".to_owned()),
            save_locations_timestamp,
        }
    }

    #[test]
    fn test_name_timestamped() {
        let now = Utc.with_ymd_and_hms(2022, 11, 9, 23, 54, 19).unwrap();
        let actual = FlockWatcher::get_dataset_name(&save_options(true), now);

        assert_eq!(actual, "sheepdog-data_1668038059000.csv")
    }

    #[test]
    fn test_name_overwrite() {
        let now = Utc.with_ymd_and_hms(2022, 11, 9, 23, 54, 19).unwrap();
        let actual = FlockWatcher::get_dataset_name(&save_options(false), now);

        assert_eq!(actual, "sheepdog-data.csv")
    }

    #[test]
    fn samples_every_nth_tick() {
        let run_options = RunOptions {
            seed: Some(3),
            ..Default::default()
        };
        let level = Level::parse("sheep img/sheep.png 250 250\nsheep img/sheep.png 300 250");
        let mut world = World::new(level, &run_options).unwrap();
        let mut watcher = FlockWatcher::new(2);

        for _ in 0..5 {
            world.update(0.1, &[], &run_options);
            watcher.watch(&world);
        }

        let data = watcher.pop_data();
        // ticks 2 and 4, two sheep each
        assert_eq!(data.len(), 4);
        assert_eq!(data[0].time, 1);
        assert_eq!(data[3].time, 2);
        assert_eq!(data[3].id, 1);
        assert!(watcher.pop_data().is_empty());
    }

    #[test]
    fn nothing_is_written_when_saving_is_off() {
        let mut watcher = FlockWatcher::new(1);
        let options = SaveOptions {
            save_locations: false,
            ..Default::default()
        };

        assert!(watcher.pop_data_save(&options).unwrap().is_empty());
    }
}
