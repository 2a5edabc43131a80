use balanced_bst::{
    AvlTree, Extreme, Notice, OrderedTree, Outcome, RedBlackTree, SplayTree, Treap, UnderflowError,
};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::{init_logging, Op};

fn sorted_set(xs: &[i16]) -> Vec<i16> {
    let mut xs = xs.to_vec();
    xs.sort_unstable();
    xs.dedup();
    xs
}

fn elements<T: OrderedTree<i16>>(tree: &T) -> Vec<i16> {
    tree.traverse().copied().collect()
}

/// Applies a set of operations to a tree and a `BTreeSet`, checking that both
/// report the same changes and end up holding the same elements.
fn agrees_with_btreeset<T: OrderedTree<i16>>(mut tree: T, ops: Vec<Op<i16>>) -> bool {
    init_logging();
    let mut set = BTreeSet::new();
    for op in &ops {
        let agreed = match op {
            Op::Insert(x) => tree.insert(*x).is_changed() == set.insert(*x),
            Op::Remove(x) => tree.remove(x).is_changed() == set.remove(x),
        };
        if !agreed || tree.len() != set.len() {
            return false;
        }
    }
    tree.traverse().eq(set.iter())
}

fn traversal_is_sorted<T: OrderedTree<i16>>(mut tree: T, xs: Vec<i16>) -> bool {
    for x in &xs {
        tree.insert(*x);
    }
    let expected = sorted_set(&xs);
    tree.len() == expected.len() && elements(&tree) == expected
}

fn insert_is_idempotent<T: OrderedTree<i16>>(mut tree: T, xs: Vec<i16>) -> bool {
    init_logging();
    for x in &xs {
        tree.insert(*x);
    }
    let before = elements(&tree);
    let repeats_ignored = xs
        .iter()
        .all(|x| tree.insert(*x) == Outcome::Unchanged(Notice::DuplicateKey));
    repeats_ignored && elements(&tree) == before
}

fn contains_exactly_what_was_inserted<T: OrderedTree<i16>>(
    mut tree: T,
    xs: Vec<i16>,
    others: Vec<i16>,
) -> bool {
    for x in &xs {
        tree.insert(*x);
    }
    let inserted: BTreeSet<_> = xs.iter().copied().collect();
    xs.iter().all(|x| tree.contains(x))
        && others
            .iter()
            .filter(|y| !inserted.contains(y))
            .all(|y| !tree.contains(y))
}

fn removing_everything_underflows<T: OrderedTree<i16>>(mut tree: T, xs: Vec<i16>) -> bool {
    init_logging();
    for x in &xs {
        tree.insert(*x);
    }
    for x in sorted_set(&xs) {
        if tree.remove(&x) != Outcome::Removed {
            return false;
        }
        if tree.remove(&x) != Outcome::Unchanged(Notice::KeyNotFound) {
            return false;
        }
    }
    tree.is_empty()
        && tree.len() == 0
        && tree.traverse().next().is_none()
        && tree.find_min() == Err(UnderflowError(Extreme::Min))
        && tree.find_max() == Err(UnderflowError(Extreme::Max))
}

fn extremes_match<T: OrderedTree<i16>>(mut tree: T, xs: Vec<i16>) -> bool {
    for x in &xs {
        tree.insert(*x);
    }
    match (xs.iter().min(), xs.iter().max()) {
        (Some(min), Some(max)) => tree.find_min() == Ok(min) && tree.find_max() == Ok(max),
        _ => tree.find_min().is_err() && tree.find_max().is_err(),
    }
}

fn clear_empties<T: OrderedTree<i16>>(mut tree: T, xs: Vec<i16>, x: i16) -> bool {
    for y in &xs {
        tree.insert(*y);
    }
    tree.clear();
    if !tree.is_empty() || tree.len() != 0 || tree.traverse().next().is_some() {
        return false;
    }
    tree.insert(x) == Outcome::Inserted && elements(&tree) == [x]
}

/// Generates one module of properties per tree.
macro_rules! properties {
    ($($name:ident => $new:expr),* $(,)?) => {$(
        mod $name {
            use super::*;

            #[quickcheck]
            fn fuzz_multiple_operations_i16(ops: Vec<Op<i16>>) -> bool {
                agrees_with_btreeset($new, ops)
            }

            #[quickcheck]
            fn traversal(xs: Vec<i16>) -> bool {
                traversal_is_sorted($new, xs)
            }

            #[quickcheck]
            fn idempotent_insert(xs: Vec<i16>) -> bool {
                insert_is_idempotent($new, xs)
            }

            #[quickcheck]
            fn contains(xs: Vec<i16>, others: Vec<i16>) -> bool {
                contains_exactly_what_was_inserted($new, xs, others)
            }

            #[quickcheck]
            fn round_trip(xs: Vec<i16>) -> bool {
                removing_everything_underflows($new, xs)
            }

            #[quickcheck]
            fn extremes(xs: Vec<i16>) -> bool {
                extremes_match($new, xs)
            }

            #[quickcheck]
            fn clear(xs: Vec<i16>, x: i16) -> bool {
                clear_empties($new, xs, x)
            }
        }
    )*};
}

properties! {
    avl => AvlTree::<i16>::new(),
    red_black => RedBlackTree::<i16>::new(),
    splay => SplayTree::<i16>::new(),
    treap => Treap::<i16>::with_seed(0x5eed),
}

#[test]
fn every_tree_formats_as_a_set() {
    let xs = [3, 1, 2, 3];
    let expected = "{1, 2, 3}";
    assert_eq!(format!("{:?}", xs.into_iter().collect::<AvlTree<_>>()), expected);
    assert_eq!(format!("{:?}", xs.into_iter().collect::<RedBlackTree<_>>()), expected);
    assert_eq!(format!("{:?}", xs.into_iter().collect::<SplayTree<_>>()), expected);
    assert_eq!(format!("{:?}", xs.into_iter().collect::<Treap<_>>()), expected);
}

#[test]
fn notices_and_errors_read_well() {
    assert_eq!(
        Notice::DuplicateKey.to_string(),
        "element already present, insert ignored"
    );
    assert_eq!(
        UnderflowError(Extreme::Max).to_string(),
        "underflow: cannot take the maximum of an empty tree"
    );
    assert_eq!(Outcome::Unchanged(Notice::KeyNotFound).notice(), Some(Notice::KeyNotFound));
    assert_eq!(Outcome::Removed.notice(), None);
}

#[test]
fn borrowed_trees_iterate_in_order() {
    let tree: RedBlackTree<_> = [5, 1, 4].into_iter().collect();
    let mut seen = Vec::new();
    for x in &tree {
        seen.push(*x);
    }
    assert_eq!(seen, [1, 4, 5]);
}
