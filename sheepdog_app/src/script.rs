use std::{io, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use sheepdog_lib::{
    moveable::Command,
    sheepdog::{gyro_command, PlayerInput},
};

const SHEEPDOGS: usize = 2;

/// A change of one sheepdog's controls: held keys, `0` released and anything else
/// pressed, or a raw tilt sensor reading when both gyro columns are filled in.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
struct ScriptRow {
    tick: u64,
    dog: usize,
    forward: u8,
    backward: u8,
    left: u8,
    right: u8,
    #[serde(default)]
    gyro_x: Option<f32>,
    #[serde(default)]
    gyro_y: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Control {
    Keys(PlayerInput),
    Tilt { x: f32, y: f32 },
}

impl Default for Control {
    fn default() -> Self {
        Control::Keys(PlayerInput::default())
    }
}

impl Control {
    fn command(&self, gyro_threshold: f32) -> Command {
        match *self {
            Control::Keys(input) => input.into(),
            Control::Tilt { x, y } => gyro_command(x, y, gyro_threshold),
        }
    }
}

impl ScriptRow {
    fn control(&self) -> Control {
        match (self.gyro_x, self.gyro_y) {
            (Some(x), Some(y)) => Control::Tilt { x, y },
            _ => Control::Keys(PlayerInput {
                forward: self.forward != 0,
                backward: self.backward != 0,
                left: self.left != 0,
                right: self.right != 0,
            }),
        }
    }
}

/// Replays recorded controls. Keys and tilts stay held until a later row for the
/// same sheepdog changes them.
#[derive(Debug, Default)]
pub struct InputScript {
    rows: Vec<ScriptRow>,
    next: usize,
    held: [Control; SHEEPDOGS],
}

impl InputScript {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("could not open input script {}", path.display()))?;

        InputScript::from_reader(file)
            .with_context(|| format!("bad input script {}", path.display()))
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rows = Vec::new();

        for (i, row) in csv::Reader::from_reader(reader).deserialize().enumerate() {
            let row: ScriptRow = row?;
            if row.dog >= SHEEPDOGS {
                bail!("row {}: there is no sheepdog {}", i + 1, row.dog);
            }
            rows.push(row);
        }

        // stable, rows for the same tick keep their file order
        rows.sort_by_key(|row| row.tick);

        Ok(InputScript {
            rows,
            ..Default::default()
        })
    }

    /// Commands for `tick`. Ticks must be asked for in increasing order.
    pub fn commands(&mut self, tick: u64, gyro_threshold: f32) -> [Command; SHEEPDOGS] {
        while let Some(row) = self.rows.get(self.next).filter(|row| row.tick <= tick) {
            self.held[row.dog] = row.control();
            self.next += 1;
        }

        self.held.map(|control| control.command(gyro_threshold))
    }
}
