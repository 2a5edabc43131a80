use std::collections::BTreeSet;

use quickcheck::{Arbitrary, Gen};

use crate::OrderedTree;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the T into the data structure
    Insert(T),
    /// Remove the T from the data structure
    Remove(T),
    /// Look the T up
    Contains(T),
    /// Compare traversals
    Traverse,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Contains(T::arbitrary(g)),
            3 => Op::Traverse,
            _ => unreachable!(),
        }
    }
}

/// Applies a set of operations to a tree and a `BTreeSet`, checking after every step that they
/// agree and that `check` (the tree's own structural invariant) holds.
pub(crate) fn apply_ops<X, T>(ops: &[Op<X>], tree: &mut T, check: impl Fn(&T))
where
    X: Ord + Copy + std::fmt::Debug,
    T: OrderedTree<X>,
{
    init_logging();
    let mut set = BTreeSet::new();
    for op in ops {
        match op {
            Op::Insert(x) => assert_eq!(tree.insert(*x).is_changed(), set.insert(*x)),
            Op::Remove(x) => assert_eq!(tree.remove(x).is_changed(), set.remove(x)),
            Op::Contains(x) => assert_eq!(tree.contains(x), set.contains(x)),
            Op::Traverse => assert!(tree.traverse().eq(set.iter())),
        }
        check(tree);
        assert_eq!(tree.len(), set.len());
    }
    assert!(tree.traverse().eq(set.iter()));
    assert_eq!(tree.find_min().ok(), set.iter().next());
    assert_eq!(tree.find_max().ok(), set.iter().next_back());
}

/// Sends the trees' notices and rotations to the captured test output. Only the first call in
/// the test binary installs the logger.
pub(crate) fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}

#[test]
fn logging_initializes_more_than_once() {
    init_logging();
    init_logging();
    log::trace!("logger installed");
}
