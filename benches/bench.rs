use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use balanced_bst::{AvlTree, OrderedTree, Outcome, RedBlackTree, SplayTree, Treap};

#[derive(Clone)]
enum TreeEnum<T> {
    Avl(AvlTree<T>),
    RedBlack(RedBlackTree<T>),
    Splay(SplayTree<T>),
    Treap(Treap<T>),
}

impl<T: Ord> TreeEnum<T> {
    fn contains(&mut self, x: &T) -> bool {
        match self {
            Self::Avl(t) => t.contains(x),
            Self::RedBlack(t) => t.contains(x),
            Self::Splay(t) => t.contains(x),
            Self::Treap(t) => t.contains(x),
        }
    }

    fn insert(&mut self, x: T) -> Outcome {
        match self {
            Self::Avl(t) => t.insert(x),
            Self::RedBlack(t) => t.insert(x),
            Self::Splay(t) => t.insert(x),
            Self::Treap(t) => t.insert(x),
        }
    }

    fn remove(&mut self, x: &T) -> Outcome {
        match self {
            Self::Avl(t) => t.remove(x),
            Self::RedBlack(t) => t.remove(x),
            Self::Splay(t) => t.remove(x),
            Self::Treap(t) => t.remove(x),
        }
    }
}

/// Fills a tree with `0..num_nodes`, in ascending order, which would give an unbalanced tree a
/// height of `num_nodes - 1`.
fn ascending<T: OrderedTree<i32>>(mut tree: T, num_nodes: usize) -> T {
    for x in 0..num_nodes {
        tree.insert(x as i32);
    }
    tree
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of BSTs before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;

        let tree_tests = [
            ("avl", TreeEnum::Avl(ascending(AvlTree::new(), num_nodes))),
            (
                "red-black",
                TreeEnum::RedBlack(ascending(RedBlackTree::new(), num_nodes)),
            ),
            ("splay", TreeEnum::Splay(ascending(SplayTree::new(), num_nodes))),
            (
                "treap",
                TreeEnum::Treap(ascending(Treap::with_seed(0x5eed), num_nodes)),
            ),
        ];
        for (name, tree) in tree_tests {
            let largest_element_in_tree = match &tree {
                TreeEnum::Avl(t) => t.find_max(),
                TreeEnum::RedBlack(t) => t.find_max(),
                TreeEnum::Splay(t) => t.find_max(),
                TreeEnum::Treap(t) => t.find_max(),
            }
            .copied()
            .expect("Filled tree => maximum");
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |tree, i| {
        let _found = black_box(tree.contains(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        let _outcome = black_box(tree.remove(&i));
    });

    bench_helper(c, "insert", |tree, i| {
        let _outcome = black_box(tree.insert(i + 1));
    });

    bench_helper(c, "contains-miss", |tree, i| {
        let _found = black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        let _outcome = black_box(tree.remove(&(i + 1)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
