use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::prelude::*;
use rbtree::RBTree;
use redwood::Redwood;
use std::collections::BTreeMap;
use std::ops::Range;

const TREE_SIZE: usize = 100000;

fn random_insertion_order() -> Vec<usize> {
    let mut rng = rand::thread_rng();
    let mut indices: Vec<usize> = (0..TREE_SIZE).collect();

    indices.shuffle(&mut rng);

    indices
}

fn init_random_data(count: usize, range_opt: Option<Range<usize>>) -> Vec<usize> {
    let mut rng = rand::thread_rng();
    let range = range_opt.unwrap_or(0..TREE_SIZE);
    let range = rand::distributions::Uniform::new(range.start, range.end);

    (0..count).map(|_| rng.sample(&range)).collect()
}

fn init_large_btree() -> BTreeMap<usize, usize> {
    random_insertion_order().into_iter().map(|i| (i, i)).collect()
}

fn init_large_rbtree() -> RBTree<usize, usize> {
    let mut tree = RBTree::new();

    for i in random_insertion_order() {
        tree.insert(i, i);
    }

    tree
}

fn init_large_redwood_tree() -> Redwood<usize, usize> {
    let mut tree = Redwood::new();

    for i in random_insertion_order() {
        tree.insert(i, i);
    }

    tree
}

fn bench_baseline_multi_insertions(data: Vec<usize>) {
    let mut tree = BTreeMap::new();

    for i in data {
        tree.insert(i, i);
    }
}

fn bench_rbtree_multi_insertions(data: Vec<usize>) {
    let mut tree = RBTree::new();

    for i in data {
        tree.insert(i, i);
    }
}

fn bench_multi_insertions(data: Vec<usize>) {
    let mut tree = Redwood::new();

    for i in data {
        tree.insert(i, i);
    }
}

fn bench_multi_insertions_hint(data: Vec<usize>) {
    let mut tree = Redwood::with_capacity(data.len());

    for i in data {
        tree.insert(i, i);
    }
}

fn bench_baseline_random_lookups(tree: BTreeMap<usize, usize>, indices: Vec<usize>) {
    for idx in indices {
        assert_eq!(tree.get(&idx), Some(&idx));
    }
}

fn bench_rbtree_random_lookups(tree: RBTree<usize, usize>, indices: Vec<usize>) {
    for idx in indices {
        assert_eq!(tree.get(&idx), Some(&idx));
    }
}

fn bench_random_lookups(tree: Redwood<usize, usize>, indices: Vec<usize>) {
    for idx in indices {
        assert_eq!(tree.get(&idx), Some(&idx));
    }
}

fn bench_baseline_random_deletions(mut tree: BTreeMap<usize, usize>, indices: Vec<usize>) {
    for idx in indices {
        tree.remove(&idx);
    }
}

fn bench_random_deletions(mut tree: Redwood<usize, usize>, indices: Vec<usize>) {
    for idx in indices {
        tree.remove(&idx);
    }
}

fn bench_baseline_drain_min(mut tree: BTreeMap<usize, usize>) {
    while tree.pop_first().is_some() {}
}

fn bench_rbtree_drain_min(mut tree: RBTree<usize, usize>) {
    while tree.pop_first().is_some() {}
}

fn bench_drain_min(mut tree: Redwood<usize, usize>) {
    while tree.poll_min().is_ok() {}
}

fn inorder_iteration_btree(tree: BTreeMap<usize, usize>) {
    for (i, (&key, _)) in tree.iter().enumerate() {
        assert_eq!(i, key);
    }
}

fn inorder_iteration(tree: Redwood<usize, usize>) {
    for (i, (&key, _)) in tree.iter().enumerate() {
        assert_eq!(i, key);
    }
}

mod insert_delete {
    use super::*;

    pub fn bench_insert_delete(
        mut tree: Redwood<usize, usize>,
        insertions: &[usize],
        deletions: &[usize],
    ) {
        for idx in deletions {
            tree.remove(idx);
        }
        for &idx in insertions {
            tree.insert(idx, idx);
        }
    }

    pub fn bench_baseline_insert_delete(
        mut tree: BTreeMap<usize, usize>,
        insertions: &[usize],
        deletions: &[usize],
    ) {
        for idx in deletions {
            tree.remove(idx);
        }
        for &idx in insertions {
            tree.insert(idx, idx);
        }
    }
}

fn redwood_tree_benchmark(c: &mut Criterion) {
    c.bench_function("baseline tree insert delete", |b| {
        b.iter_batched(
            || {
                (
                    init_large_btree(),
                    init_random_data(2000, Some(100000..300000)),
                    init_random_data(2000, Some(0..100000)),
                )
            },
            |(tree, holes, to_insert)| {
                insert_delete::bench_baseline_insert_delete(tree, &holes, &to_insert)
            },
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree insert delete", |b| {
        b.iter_batched(
            || {
                (
                    init_large_redwood_tree(),
                    init_random_data(2000, Some(100000..300000)),
                    init_random_data(2000, Some(0..100000)),
                )
            },
            |(tree, holes, to_insert)| insert_delete::bench_insert_delete(tree, &holes, &to_insert),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree 100K insertions", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_baseline_multi_insertions,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("rbtree 100K insertions", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_rbtree_multi_insertions,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree 100K insertions", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_multi_insertions,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree 100K insertions with size hint", |b| {
        b.iter_batched(
            random_insertion_order,
            bench_multi_insertions_hint,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree random lookups", |b| {
        b.iter_batched(
            || (init_large_btree(), init_random_data(5000, None)),
            |(tree, indices)| bench_baseline_random_lookups(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("rbtree random lookups", |b| {
        b.iter_batched(
            || (init_large_rbtree(), init_random_data(5000, None)),
            |(tree, indices)| bench_rbtree_random_lookups(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree random lookups", |b| {
        b.iter_batched(
            || (init_large_redwood_tree(), init_random_data(5000, None)),
            |(tree, indices)| bench_random_lookups(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree random deletions", |b| {
        b.iter_batched(
            || (init_large_btree(), init_random_data(5000, None)),
            |(tree, indices)| bench_baseline_random_deletions(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("tree random deletions", |b| {
        b.iter_batched(
            || (init_large_redwood_tree(), init_random_data(5000, None)),
            |(tree, indices)| bench_random_deletions(tree, indices),
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree drain min", |b| {
        b.iter_batched(init_large_btree, bench_baseline_drain_min, BatchSize::LargeInput)
    });

    c.bench_function("rbtree drain min", |b| {
        b.iter_batched(init_large_rbtree, bench_rbtree_drain_min, BatchSize::LargeInput)
    });

    c.bench_function("tree drain min", |b| {
        b.iter_batched(init_large_redwood_tree, bench_drain_min, BatchSize::LargeInput)
    });

    c.bench_function("tree inorder iteration", |b| {
        b.iter_batched(
            init_large_redwood_tree,
            inorder_iteration,
            BatchSize::LargeInput,
        )
    });

    c.bench_function("baseline tree inorder iteration", |b| {
        b.iter_batched(
            init_large_btree,
            inorder_iteration_btree,
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, redwood_tree_benchmark);
criterion_main!(benches);
