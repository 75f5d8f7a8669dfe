use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use avl_tree::{AvlTree, InsertBalance};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen()).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    c.bench_function("tree_insert_double_rotation", |b| {
        b.iter(|| {
            let mut tree = AvlTree::with_insert_balance(InsertBalance::DoubleRotation);
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    let tree: AvlTree<i32> = values.iter().copied().collect();

    c.bench_function("tree_contains", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.contains(value));
            }
        })
    });

    c.bench_function("tree_iter", |b| {
        b.iter(|| {
            for value in &tree {
                black_box(value);
            }
        })
    });

    c.bench_function("tree_remove_one", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            for value in &values {
                let _ = black_box(tree.remove_one(value));
            }
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
