use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sheepdog_lib::{level::Level, moveable::Command, options::RunOptions, world::World};

/// A walled paddock with `n` sheep on a grid, both sheepdogs in a corner.
fn paddock(n: usize) -> Level {
    let mut source = String::from(
        "\
scene 1200 1200
timeToComplete 100000
sheepdog img/dog1.png 60 60
sheepdog img/dog2.png 1140 60
wall 0 0 1200 20
wall 0 1180 1200 20
wall 0 0 20 1200
wall 1180 0 20 1200
attractor 600 600 300
",
    );

    for i in 0..n {
        let x = 200 + (i % 16) * 50;
        let y = 200 + (i / 16) * 50;
        source.push_str(&format!("sheep img/sheep.png {x} {y}\n"));
    }

    Level::parse(&source)
}

fn criterion_benchmark(c: &mut Criterion) {
    let run_options = RunOptions {
        seed: Some(1),
        ..Default::default()
    };
    let commands = [Command::new(1., 0.5), Command::new(1., -0.5)];

    for n in [32, 128] {
        let mut world = World::new(paddock(n), &run_options).unwrap();

        c.bench_function(&format!("world tick {n} sheep"), |b| {
            b.iter(|| world.update(black_box(1. / 60.), &commands, &run_options))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
