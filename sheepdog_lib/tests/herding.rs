use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sheepdog_lib::{
    attractor::Attractor,
    goal::Goal,
    herd_base,
    level::Level,
    moveable::{Command, Moveable},
    options::RunOptions,
    sheep::{Peers, Sheep, Surroundings},
    world::{Status, World},
};

const DT: f32 = 1. / 60.;

fn run_options() -> RunOptions {
    RunOptions {
        seed: Some(2023),
        ..Default::default()
    }
}

#[test]
fn calm_sheep_wanders_into_the_goal() {
    let run_options = run_options();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    let attractors = [Attractor::new(Vec2::new(100., 100.), 0.).unwrap()];
    let goal = Goal::new(60., 60., 80., 80.).unwrap();
    let nobody: &[Moveable] = &[];

    let mut sheep = Sheep::new(0, Vec2::new(100., 250.), "sheep.png".to_owned(), &run_options);
    assert!(!goal.contains(sheep.body.position));

    let mut ticks = 0;
    while !goal.contains(sheep.body.position) {
        let surroundings = Surroundings {
            herd: Peers::all(&[]),
            sheepdogs: nobody,
            attractors: &attractors,
            walls: &[],
        };
        sheep.update(&surroundings, DT, &run_options, &mut rng);

        ticks += 1;
        assert!(ticks < 3600, "sheep never reached the goal, last at {:?}", sheep.body.position);
    }

    assert!(!sheep.is_fleeing());
    assert_eq!(sheep.attraction_target(), Some(Vec2::new(100., 100.)));
}

#[test]
fn sheep_on_its_target_stays_in_the_goal() {
    let run_options = run_options();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let attractors = [Attractor::new(Vec2::new(100., 100.), 0.).unwrap()];
    let goal = Goal::new(90., 90., 20., 20.).unwrap();
    let nobody: &[Moveable] = &[];

    let mut sheep = Sheep::new(0, Vec2::new(100., 100.), "sheep.png".to_owned(), &run_options);

    for _ in 0..600 {
        let surroundings = Surroundings {
            herd: Peers::all(&[]),
            sheepdogs: nobody,
            attractors: &attractors,
            walls: &[],
        };
        sheep.update(&surroundings, DT, &run_options, &mut rng);
        assert!(goal.contains(sheep.body.position));
    }

    assert_eq!(sheep.body.speed(), 0.);
}

#[test]
fn level_is_won_without_touching_the_controls() {
    let level = Level::parse(
        "\
scene 400 400
timeToComplete 60
sheepdog img/dog1.png 380 380
sheepdog img/dog2.png 20 380
sheep img/sheep.png 100 250
attractor 100 100 0
goal 60 60 80 80
wall 0 0 400 10
",
    );
    let run_options = run_options();
    let mut world = World::new(level, &run_options).unwrap();

    let mut status = Status::Running;
    while !status.is_over() {
        status = world.update(DT, &[], &run_options);
    }

    assert!(matches!(status, Status::Won { .. }), "{status:?}");
    assert_eq!(world.penned(), 1);
}

#[test]
fn sheepdog_drives_the_herd_away() {
    let level = Level::parse(
        "\
sheepdog img/dog1.png 150 250
sheepdog img/dog2.png 480 480
sheep img/sheep.png 200 250
sheep img/sheep.png 200 270
",
    );
    let run_options = run_options();
    let mut world = World::new(level, &run_options).unwrap();
    let forward = [Command::new(1., 0.)];

    world.update(DT, &forward, &run_options);
    assert!(world.herd().iter().all(|sheep| sheep.is_fleeing()));

    for _ in 0..30 {
        world.update(DT, &forward, &run_options);
    }

    // bolting east, away from the sheepdog
    assert!(world.herd().iter().all(|sheep| sheep.body.position.x > 200.));
}

#[test]
fn herd_base_samples_every_tick() {
    let level = Level::parse("sheep img/sheep.png 250 250\nsheep img/sheep.png 260 250\nsheep img/sheep.png 250 265");
    let data = herd_base(level, 20, DT, &run_options()).unwrap();

    assert_eq!(data.len(), 60);
    assert_eq!(data.last().map(|d| d.time), Some(20));
}
