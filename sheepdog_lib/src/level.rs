use std::{fs, path::Path};

use glam::Vec2;
use log::{info, warn};

use crate::{
    attractor::Attractor,
    error::{non_negative, LevelError},
    goal::Goal,
    scene::Scene,
    wall::Wall,
};

const DEFAULT_TIME_TO_COMPLETE: f32 = 40.;
const DEFAULT_SHEEPDOG_SPRITES: [&str; 2] = ["img/dog1.png", "img/dog2.png"];

/// Where an agent starts and what it looks like. Sprites are opaque to the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    pub sprite: String,
    pub position: Vec2,
}

/// Scenery drawn under everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Decal {
    pub sprite: String,
    pub position: Vec2,
    pub size: Vec2,
}

/// Everything a level file describes.
///
/// A level file is plain text, one game object per line, fields separated by spaces:
///
/// ```text
/// scene 1000 800
/// timeToComplete 60
/// sheepdog img/dog1.png 100 100
/// sheep img/sheep.png 400 300
/// wall 0 0 1000 20
/// attractor 500 400 80
/// goal 850 650 100 100
/// decal img/grass.png 0 0 1000 800
/// ```
///
/// Lines that cannot be read are skipped and kept in [`Level::skipped`].
#[derive(Debug)]
pub struct Level {
    pub scene: Scene,
    /// seconds
    pub time_to_complete: f32,
    pub sheepdogs: Vec<Spawn>,
    pub herd: Vec<Spawn>,
    pub walls: Vec<Wall>,
    pub attractors: Vec<Attractor>,
    pub goals: Vec<Goal>,
    pub decals: Vec<Decal>,
    /// 1-based line numbers of the lines that were left out, and why
    pub skipped: Vec<(usize, LevelError)>,
}

impl Default for Level {
    fn default() -> Self {
        Level {
            scene: Scene::default(),
            time_to_complete: DEFAULT_TIME_TO_COMPLETE,
            sheepdogs: Vec::new(),
            herd: Vec::new(),
            walls: Vec::new(),
            attractors: Vec::new(),
            goals: Vec::new(),
            decals: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl Level {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let path = path.as_ref();
        info!("loading level {}", path.display());

        let source = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Level::parse(&source))
    }

    /// Reads a level, skipping every malformed line. Never fails.
    pub fn parse(source: &str) -> Self {
        let mut level = Level::default();

        for (index, line) in source.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            if let Err(e) = level.read_line(&fields) {
                warn!("line {} skipped: {}", index + 1, e);
                level.skipped.push((index + 1, e));
            }
        }

        if level.sheepdogs.len() < 2 {
            warn!(
                "level has {} sheepdogs, falling back to two at the origin",
                level.sheepdogs.len()
            );
            level.sheepdogs = DEFAULT_SHEEPDOG_SPRITES
                .iter()
                .map(|sprite| Spawn {
                    sprite: (*sprite).to_owned(),
                    position: Vec2::ZERO,
                })
                .collect();
        }

        info!(
            "level loaded: {} sheep, {} walls, {} attractors, {} goals, {} lines skipped",
            level.herd.len(),
            level.walls.len(),
            level.attractors.len(),
            level.goals.len(),
            level.skipped.len()
        );

        level
    }

    fn read_line(&mut self, fields: &[&str]) -> Result<(), LevelError> {
        match fields[0] {
            "scene" => {
                field_count(fields, 3)?;
                self.scene = Scene::new(number(fields[1])?, number(fields[2])?)?;
            }
            "timeToComplete" => {
                field_count(fields, 2)?;
                self.time_to_complete = non_negative("time to complete", number(fields[1])?)?;
            }
            "sheepdog" => {
                field_count(fields, 4)?;
                self.sheepdogs.push(spawn(fields)?);
            }
            "sheep" => {
                field_count(fields, 4)?;
                self.herd.push(spawn(fields)?);
            }
            "wall" => {
                field_count(fields, 5)?;
                let [l, t, w, h] = rect(fields)?;
                self.walls.push(Wall::new(l, t, w, h)?);
            }
            "attractor" => {
                field_count(fields, 4)?;
                let position = Vec2::new(number(fields[1])?, number(fields[2])?);
                self.attractors
                    .push(Attractor::new(position, number(fields[3])?)?);
            }
            "goal" => {
                field_count(fields, 5)?;
                let [l, t, w, h] = rect(fields)?;
                self.goals.push(Goal::new(l, t, w, h)?);
            }
            "decal" => {
                field_count(fields, 6)?;
                self.decals.push(Decal {
                    sprite: fields[1].to_owned(),
                    position: Vec2::new(number(fields[2])?, number(fields[3])?),
                    size: Vec2::new(
                        non_negative("decal width", number(fields[4])?)?,
                        non_negative("decal height", number(fields[5])?)?,
                    ),
                });
            }
            other => return Err(LevelError::UnknownDirective(other.to_owned())),
        }

        Ok(())
    }
}

/// Counts the directive itself, as level authors see it on the line.
fn field_count(fields: &[&str], expected: usize) -> Result<(), LevelError> {
    if fields.len() == expected {
        Ok(())
    } else {
        Err(LevelError::FieldCount {
            directive: fields[0].to_owned(),
            expected,
            found: fields.len(),
        })
    }
}

fn number(field: &str) -> Result<f32, LevelError> {
    field
        .parse::<i32>()
        .map(|n| n as f32)
        .map_err(|source| LevelError::NotANumber {
            field: field.to_owned(),
            source,
        })
}

fn spawn(fields: &[&str]) -> Result<Spawn, LevelError> {
    Ok(Spawn {
        sprite: fields[1].to_owned(),
        position: Vec2::new(number(fields[2])?, number(fields[3])?),
    })
}

fn rect(fields: &[&str]) -> Result<[f32; 4], LevelError> {
    Ok([
        number(fields[1])?,
        number(fields[2])?,
        number(fields[3])?,
        number(fields[4])?,
    ])
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rstest::rstest;

    use super::Level;
    use crate::{error::LevelError, scene::Scene};

    const LEVEL: &str = "\
scene 1000 800
timeToComplete 60
sheepdog img/dog1.png 100 100
sheepdog img/dog2.png 200 100

sheep img/sheep.png 400 300
sheep img/sheep.png 420 310
wall 0 0 1000 20
attractor 500 400 80
goal 850 650 100 100
decal img/grass.png 0 0 1000 800
";

    #[test]
    fn reads_every_directive() {
        let level = Level::parse(LEVEL);

        assert_eq!(level.scene, Scene::new(1000., 800.).unwrap());
        assert_eq!(level.time_to_complete, 60.);
        assert_eq!(level.sheepdogs.len(), 2);
        assert_eq!(level.sheepdogs[1].position, Vec2::new(200., 100.));
        assert_eq!(level.herd.len(), 2);
        assert_eq!(level.herd[0].sprite, "img/sheep.png");
        assert_eq!(level.walls.len(), 1);
        assert_eq!(level.attractors[0].radius(), 80.);
        assert!(level.goals[0].contains(Vec2::new(900., 700.)));
        assert_eq!(level.decals[0].size, Vec2::new(1000., 800.));
        assert!(level.skipped.is_empty());
    }

    #[test]
    fn empty_level_uses_defaults() {
        let level = Level::parse("");

        assert_eq!(level.scene, Scene::default());
        assert_eq!(level.time_to_complete, 40.);
        assert!(level.herd.is_empty());
        // two stand-in sheepdogs at the origin
        assert_eq!(level.sheepdogs.len(), 2);
        assert!(level.sheepdogs.iter().all(|s| s.position == Vec2::ZERO));
    }

    #[test]
    fn a_single_sheepdog_is_replaced() {
        let level = Level::parse("sheepdog img/dog1.png 300 300");

        assert_eq!(level.sheepdogs.len(), 2);
        assert_eq!(level.sheepdogs[0].position, Vec2::ZERO);
    }

    #[rstest]
    #[case("sheep img/sheep.png 10", "sheep must have 4 parameters not 3")]
    #[case("wall 0 0 ten 10", "`ten` is not a whole number")]
    #[case("wall 0 0 10.5 10", "`10.5` is not a whole number")]
    #[case("tree img/tree.png 1 1", "tree is not a valid game object type")]
    #[case("goal 0 0 -10 10", "width must not be negative, got -10")]
    fn malformed_lines_are_skipped(#[case] line: &str, #[case] message: &str) {
        let source = format!("sheep img/sheep.png 1 1\n{line}\nsheep img/sheep.png 2 2");
        let level = Level::parse(&source);

        assert_eq!(level.herd.len(), 2);
        assert_eq!(level.skipped.len(), 1);

        let (line_number, e) = &level.skipped[0];
        assert_eq!(*line_number, 2);
        assert_eq!(e.to_string(), message);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res = Level::from_path("no/such/level.txt");
        assert!(matches!(res, Err(LevelError::Io { .. })));
    }
}
