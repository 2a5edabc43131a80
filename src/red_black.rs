//! A red-black tree that rebalances top down: insertion and deletion each make a single pass from
//! the root, fixing colors and rotating on the way down, so nothing has to be revisited on the
//! way back up.
//!
//! Every node is red or black, the root is black, a red node never has a red child, and every
//! path from a node down to an absent child crosses the same number of black nodes.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Notice, Outcome, RedBlackTree};
//!
//! let mut tree: RedBlackTree<_> = (1..=100).collect();
//! assert_eq!(tree.len(), 100);
//!
//! assert_eq!(tree.remove(&50), Outcome::Removed);
//! assert_eq!(tree.remove(&50), Outcome::Unchanged(Notice::KeyNotFound));
//! assert_eq!(tree.find_min(), Ok(&1));
//! assert_eq!(tree.find_max(), Ok(&100));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{self, Arena, Dir, NodeId, HEADER, NIL};
use crate::{Extreme, Notice, OrderedTree, Outcome, UnderflowError};

const TARGET: &str = module_path!();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// A top-down red-black tree storing a set of `T`.
#[derive(Clone)]
pub struct RedBlackTree<T> {
    /// The root hangs off the header's right link. The sentinel and the header are black.
    arena: Arena<T, Color>,
    len: usize,
}

/// What an insertion compares against while it rebalances. The element being inserted is
/// borrowed until it is moved into its node, after which the node stands in for it.
enum Key<'a, T> {
    Pending(&'a T),
    Stored(NodeId),
}

// Manual impls so we don't require `T: Copy`.
impl<T> Clone for Key<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Key<'_, T> {}

/// The node an insertion is looking at and its three nearest ancestors.
struct Cursor {
    current: NodeId,
    parent: NodeId,
    grand: NodeId,
    great: NodeId,
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.traverse()).finish()
    }
}

impl<T> RedBlackTree<T> {
    /// Generate a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(Color::Black),
            len: 0,
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.len = 0;
    }

    /// Whether the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.root() == NIL
    }

    /// How many elements the tree stores.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The smallest element.
    pub fn find_min(&self) -> Result<&T, UnderflowError> {
        self.arena
            .extreme(self.root(), Dir::Left)
            .ok_or(UnderflowError(Extreme::Min))
    }

    /// The largest element.
    pub fn find_max(&self) -> Result<&T, UnderflowError> {
        self.arena
            .extreme(self.root(), Dir::Right)
            .ok_or(UnderflowError(Extreme::Max))
    }

    /// Iterates over the elements in ascending order.
    pub fn traverse(&self) -> Iter<'_, T> {
        Iter {
            inner: self.arena.iter(self.root()),
        }
    }

    /// Whether an element equal to `x` is stored.
    pub fn contains(&self, x: &T) -> bool
    where
        T: Ord,
    {
        self.arena.contains(self.root(), x)
    }

    /// Inserts `x`. If an equal element is already stored the tree is left as it is and
    /// [`Notice::DuplicateKey`] is reported.
    ///
    /// Any node seen on the way down with two red children is recolored red (its children
    /// black), and a resulting red-red pair is removed with a single or double rotation at the
    /// grandparent. By the time the descent falls off the tree the new red leaf's parent is
    /// black, unless it needs one last rotation.
    pub fn insert(&mut self, x: T) -> Outcome
    where
        T: Ord,
    {
        let mut cursor = Cursor {
            current: HEADER,
            parent: HEADER,
            grand: HEADER,
            great: HEADER,
        };

        // The sentinel compares equal to everything, so this stops at `x` or off the tree.
        while self.arena.compare(&x, cursor.current) != Ordering::Equal {
            cursor.great = cursor.grand;
            cursor.grand = cursor.parent;
            cursor.parent = cursor.current;
            cursor.current = match self.arena.compare(&x, cursor.current) {
                Ordering::Less => self.arena.left(cursor.current),
                _ => self.arena.right(cursor.current),
            };

            if self.is_red(self.arena.left(cursor.current))
                && self.is_red(self.arena.right(cursor.current))
            {
                self.reorient(Key::Pending(&x), &mut cursor);
            }
        }

        if cursor.current != NIL {
            return Outcome::Unchanged(Notice::DuplicateKey).report(TARGET);
        }

        let node = self.arena.alloc(x, Color::Black);
        let dir = self.direction(Key::Stored(node), cursor.parent);
        self.arena.set_link(cursor.parent, dir, node);
        cursor.current = node;
        self.reorient(Key::Stored(node), &mut cursor);

        self.len += 1;
        Outcome::Inserted.report(TARGET)
    }

    /// Removes the element equal to `x`. If there is none, [`Notice::KeyNotFound`] is reported.
    ///
    /// The descent keeps the node it is looking at red (recoloring, or rotating a red node or
    /// sibling into place) so that whatever node it finally unlinks is red and its removal
    /// leaves every black height untouched. When `x` has two children the descent carries on to
    /// its in-order successor, whose element then replaces `x`.
    pub fn remove(&mut self, x: &T) -> Outcome
    where
        T: Ord,
    {
        if !self.contains(x) {
            return Outcome::Unchanged(Notice::KeyNotFound).report(TARGET);
        }

        let root = self.root();
        // Only when both children are black: a red root over a red child is a red-red pair the
        // descent never revisits.
        if !self.is_red(self.arena.left(root)) && !self.is_red(self.arena.right(root)) {
            self.paint(root, Color::Red);
        }

        let mut grand: NodeId;
        let (mut parent, mut current) = (NIL, HEADER);
        let mut found = NIL;
        let mut dir = Dir::Right;

        while self.arena.link(current, dir) != NIL {
            let last = dir;
            grand = parent;
            parent = current;
            current = self.arena.link(current, dir);

            let ordering = self.arena.compare(x, current);
            dir = match ordering {
                Ordering::Less => Dir::Left,
                _ => Dir::Right,
            };
            if ordering == Ordering::Equal {
                found = current;
            }

            if self.is_red(current) || self.is_red(self.arena.link(current, dir)) {
                continue;
            }

            if self.is_red(self.arena.link(current, dir.flip())) {
                // Lift the red child on the other side above `current`.
                let top = self.single(current, dir);
                self.arena.set_link(parent, last, top);
                parent = top;
                continue;
            }

            let sibling = self.arena.link(parent, last.flip());
            if sibling == NIL {
                continue;
            }
            if !self.is_red(self.arena.left(sibling)) && !self.is_red(self.arena.right(sibling)) {
                log::trace!(target: TARGET, "color flip");
                self.paint(parent, Color::Black);
                self.paint(sibling, Color::Red);
                self.paint(current, Color::Red);
            } else {
                let side = if self.arena.right(grand) == parent {
                    Dir::Right
                } else {
                    Dir::Left
                };
                let top = if self.is_red(self.arena.link(sibling, last)) {
                    self.double(parent, last)
                } else {
                    self.single(parent, last)
                };
                self.arena.set_link(grand, side, top);

                self.paint(current, Color::Red);
                self.paint(top, Color::Red);
                self.paint(self.arena.left(top), Color::Black);
                self.paint(self.arena.right(top), Color::Black);
            }
        }

        // `current` is `x` itself or its successor, and has at most one child.
        let child = match self.arena.left(current) {
            NIL => self.arena.right(current),
            left => left,
        };
        let side = if self.arena.right(parent) == current {
            Dir::Right
        } else {
            Dir::Left
        };
        self.arena.set_link(parent, side, child);

        let element = self.arena.release(current);
        if found != current {
            let successor = element.expect("Released node => element");
            self.arena.set_element(found, successor);
        }
        self.paint(self.root(), Color::Black);

        if cfg!(debug_assertions) {
            assert!(!self.is_red(self.root()));
        }

        self.len -= 1;
        Outcome::Removed.report(TARGET)
    }

    fn root(&self) -> NodeId {
        self.arena.right(HEADER)
    }

    fn is_red(&self, id: NodeId) -> bool {
        self.arena.meta(id) == Color::Red
    }

    fn paint(&mut self, id: NodeId, color: Color) {
        self.arena.set_meta(id, color);
    }

    /// Rotates `root` toward `dir`. The old root turns red and the lifted node black.
    fn single(&mut self, root: NodeId, dir: Dir) -> NodeId {
        log::trace!(target: TARGET, "single rotation toward {dir:?}");
        let lifted = self.arena.rotate(root, dir);
        self.paint(root, Color::Red);
        self.paint(lifted, Color::Black);
        lifted
    }

    /// Lifts `root`'s inner grandchild on the side opposite `dir` up two levels.
    fn double(&mut self, root: NodeId, dir: Dir) -> NodeId {
        let child = self.arena.link(root, dir.flip());
        let lifted = self.single(child, dir.flip());
        self.arena.set_link(root, dir.flip(), lifted);
        self.single(root, dir)
    }
}

impl<T: Ord> RedBlackTree<T> {
    fn compare(&self, key: Key<'_, T>, id: NodeId) -> Ordering {
        match key {
            Key::Pending(x) => self.arena.compare(x, id),
            Key::Stored(node) => {
                let x = self.arena.element(node).expect("Stored key => element");
                self.arena.compare(x, id)
            }
        }
    }

    fn direction(&self, key: Key<'_, T>, id: NodeId) -> Dir {
        match self.compare(key, id) {
            Ordering::Less => Dir::Left,
            _ => Dir::Right,
        }
    }

    /// Color flip at `cursor.current`, then a rotation if that left two reds in a row.
    fn reorient(&mut self, key: Key<'_, T>, cursor: &mut Cursor) {
        self.paint(cursor.current, Color::Red);
        self.paint(self.arena.left(cursor.current), Color::Black);
        self.paint(self.arena.right(cursor.current), Color::Black);

        if self.is_red(cursor.parent) {
            self.paint(cursor.grand, Color::Red);
            if self.direction(key, cursor.grand) != self.direction(key, cursor.parent) {
                log::trace!(target: TARGET, "double rotation");
                cursor.parent = self.rotate(key, cursor.grand);
            }
            cursor.current = self.rotate(key, cursor.great);
            self.paint(cursor.current, Color::Black);
        }
        self.paint(self.root(), Color::Black);
    }

    /// Rotates the child of `parent` on `key`'s side with its own child on `key`'s side, and
    /// links the result back into `parent`.
    fn rotate(&mut self, key: Key<'_, T>, parent: NodeId) -> NodeId {
        let dir = self.direction(key, parent);
        let child = self.arena.link(parent, dir);
        log::trace!(target: TARGET, "rotation below {parent}");
        let top = match self.direction(key, child) {
            Dir::Left => self.arena.rotate_with_left_child(child),
            Dir::Right => self.arena.rotate_with_right_child(child),
        };
        self.arena.set_link(parent, dir, top);
        top
    }
}

impl<T: Ord> OrderedTree<T> for RedBlackTree<T> {
    type Iter<'a> = Iter<'a, T> where T: 'a;

    fn clear(&mut self) {
        RedBlackTree::clear(self)
    }

    fn is_empty(&self) -> bool {
        RedBlackTree::is_empty(self)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn contains(&mut self, x: &T) -> bool {
        RedBlackTree::contains(self, x)
    }

    fn find_min(&self) -> Result<&T, UnderflowError> {
        RedBlackTree::find_min(self)
    }

    fn find_max(&self) -> Result<&T, UnderflowError> {
        RedBlackTree::find_max(self)
    }

    fn insert(&mut self, x: T) -> Outcome {
        RedBlackTree::insert(self, x)
    }

    fn remove(&mut self, x: &T) -> Outcome {
        RedBlackTree::remove(self, x)
    }

    fn traverse(&self) -> Self::Iter<'_> {
        RedBlackTree::traverse(self)
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            let _ = self.insert(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

/// In-order iterator over a [`RedBlackTree`].
pub struct Iter<'a, T> {
    inner: arena::Iter<'a, T, Color>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}


#[cfg(test)]
mod quicktests {
    use super::tests::assert_invariants;
    use super::*;
    use crate::test::quick::{apply_ops, Op};

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = RedBlackTree::<i8>::new();
            apply_ops(&ops, &mut tree, assert_invariants);
            true
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_u16(ops: Vec<Op<u16>>) -> bool {
            let mut tree = RedBlackTree::<u16>::new();
            apply_ops(&ops, &mut tree, assert_invariants);
            true
        }
    }

    quickcheck::quickcheck! {
        fn removing_everything_empties_the_tree(xs: Vec<i8>) -> bool {
            let mut tree: RedBlackTree<_> = xs.iter().copied().collect();
            for x in &xs {
                tree.remove(x);
                assert_invariants(&tree);
            }
            tree.is_empty() && tree.len() == 0
        }
    }
}
