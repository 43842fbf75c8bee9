use arbor_core::{Condition, Selector, Tree};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default)]
struct World {
    checks: u64,
}

fn never(world: &mut World) -> bool {
    world.checks += 1;
    false
}

fn bench_step(c: &mut Criterion) {
    let mut tree = Tree::with_object(World::default());
    let root = tree.insert(Selector::new());
    tree.add_root(root).unwrap();
    for _ in 0..32 {
        let child = tree.insert(Condition::new(never));
        tree.add_child(root, child).unwrap();
    }

    c.bench_function("arbor-core/step(conditions=32)", |b| {
        b.iter(|| {
            let status = tree.step().unwrap();
            black_box(status);
        })
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
