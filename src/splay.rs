//! A top-down splay tree. Every `insert`, `remove` and `contains` moves the element it looked
//! for (or, on a miss, the last element it passed) to the root, splitting the tree into the
//! pieces left and right of the search path on the way down and putting them back together
//! under the new root at the end.
//!
//! There is no balance condition to maintain, but any sequence of `m` operations on a tree of
//! at most `n` elements takes `O(m lg n)` time.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Outcome, SplayTree};
//!
//! let mut tree: SplayTree<_> = (1..=10).collect();
//! assert_eq!(tree.root(), Some(&10));
//!
//! assert!(tree.contains(&3));
//! assert_eq!(tree.root(), Some(&3));
//!
//! assert_eq!(tree.remove(&3), Outcome::Removed);
//! assert_eq!(tree.root(), Some(&2));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{self, Arena, Dir, NodeId, HEADER, NIL};
use crate::{Extreme, Notice, OrderedTree, Outcome, UnderflowError};

const TARGET: &str = module_path!();

/// A top-down splay tree storing a set of `T`.
#[derive(Clone)]
pub struct SplayTree<T> {
    /// The header's links are scratch space for [`SplayTree::splay`].
    arena: Arena<T, ()>,
    root: NodeId,
    len: usize,
}

impl<T> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SplayTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.traverse()).finish()
    }
}

impl<T> SplayTree<T> {
    /// Generate a new, empty `SplayTree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(()),
            root: NIL,
            len: 0,
        }
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NIL;
        self.len = 0;
    }

    /// Whether the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// How many elements the tree stores.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The element at the root: the one most recently inserted or looked up, or a neighbor of
    /// the last element that was looked up but missing.
    pub fn root(&self) -> Option<&T> {
        self.arena.element(self.root)
    }

    /// The smallest element. Does not splay.
    pub fn find_min(&self) -> Result<&T, UnderflowError> {
        self.arena
            .extreme(self.root, Dir::Left)
            .ok_or(UnderflowError(Extreme::Min))
    }

    /// The largest element. Does not splay.
    pub fn find_max(&self) -> Result<&T, UnderflowError> {
        self.arena
            .extreme(self.root, Dir::Right)
            .ok_or(UnderflowError(Extreme::Max))
    }

    /// Iterates over the elements in ascending order. Does not splay.
    pub fn traverse(&self) -> Iter<'_, T> {
        Iter {
            inner: self.arena.iter(self.root),
        }
    }
}

impl<T: Ord> SplayTree<T> {
    /// Whether an element equal to `x` is stored. Splays `x`, or its neighbor if it is missing,
    /// to the root.
    pub fn contains(&mut self, x: &T) -> bool {
        self.root = self.splay(x, self.root);
        self.root != NIL && self.arena.compare(x, self.root) == Ordering::Equal
    }

    /// Inserts `x`, which ends up at the root. If an equal element is already stored the tree is
    /// left as it is (apart from that element being splayed to the root) and
    /// [`Notice::DuplicateKey`] is reported.
    pub fn insert(&mut self, x: T) -> Outcome {
        if self.root == NIL {
            self.root = self.arena.alloc(x, ());
            self.len += 1;
            return Outcome::Inserted.report(TARGET);
        }

        let root = self.splay(&x, self.root);
        self.root = root;
        let ordering = self.arena.compare(&x, root);
        if ordering == Ordering::Equal {
            return Outcome::Unchanged(Notice::DuplicateKey).report(TARGET);
        }

        // The old root becomes a child of the new node, giving up the subtree on the new node's
        // side of it.
        let node = self.arena.alloc(x, ());
        let side = match ordering {
            Ordering::Less => Dir::Left,
            _ => Dir::Right,
        };
        self.arena.set_link(node, side, self.arena.link(root, side));
        self.arena.set_link(node, side.flip(), root);
        self.arena.set_link(root, side, NIL);
        self.root = node;

        self.len += 1;
        Outcome::Inserted.report(TARGET)
    }

    /// Removes the element equal to `x`. If there is none, [`Notice::KeyNotFound`] is reported,
    /// though the search still splays.
    ///
    /// The largest element left of `x` replaces it at the root, or, if there is none, the root of
    /// its right subtree does.
    pub fn remove(&mut self, x: &T) -> Outcome {
        self.root = self.splay(x, self.root);
        if self.root == NIL || self.arena.compare(x, self.root) != Ordering::Equal {
            return Outcome::Unchanged(Notice::KeyNotFound).report(TARGET);
        }

        let old = self.root;
        self.root = match self.arena.left(old) {
            NIL => self.arena.right(old),
            left => {
                // Everything on the left is smaller than `x`, so this brings up the largest,
                // which has no right child.
                let top = self.splay(x, left);
                self.arena.set_right(top, self.arena.right(old));
                top
            }
        };
        self.arena.release(old);

        self.len -= 1;
        Outcome::Removed.report(TARGET)
    }

    /// Splays `x` (or the last node before falling off the tree) to the top of the subtree at `t`
    /// and returns it.
    ///
    /// Nodes passed on the way down are hung off two chains: those greater than `x` under the
    /// header's left link and those smaller under its right link. At the end they become the
    /// new top's subtrees.
    fn splay(&mut self, x: &T, mut t: NodeId) -> NodeId {
        if t == NIL {
            return NIL;
        }
        self.arena.set_left(HEADER, NIL);
        self.arena.set_right(HEADER, NIL);
        let mut left_max = HEADER;
        let mut right_min = HEADER;

        loop {
            match self.arena.compare(x, t) {
                Ordering::Less => {
                    if self.arena.compare(x, self.arena.left(t)) == Ordering::Less {
                        log::trace!(target: TARGET, "zig-zig rotation with left child");
                        t = self.arena.rotate_with_left_child(t);
                    }
                    if self.arena.left(t) == NIL {
                        break;
                    }
                    // Link right.
                    self.arena.set_left(right_min, t);
                    right_min = t;
                    t = self.arena.left(t);
                }
                Ordering::Greater => {
                    if self.arena.compare(x, self.arena.right(t)) == Ordering::Greater {
                        log::trace!(target: TARGET, "zig-zig rotation with right child");
                        t = self.arena.rotate_with_right_child(t);
                    }
                    if self.arena.right(t) == NIL {
                        break;
                    }
                    // Link left.
                    self.arena.set_right(left_max, t);
                    left_max = t;
                    t = self.arena.right(t);
                }
                Ordering::Equal => break,
            }
        }

        // Reassemble.
        self.arena.set_right(left_max, self.arena.left(t));
        self.arena.set_left(right_min, self.arena.right(t));
        self.arena.set_left(t, self.arena.right(HEADER));
        self.arena.set_right(t, self.arena.left(HEADER));
        t
    }
}

impl<T: Ord> OrderedTree<T> for SplayTree<T> {
    type Iter<'a> = Iter<'a, T> where T: 'a;

    fn clear(&mut self) {
        SplayTree::clear(self)
    }

    fn is_empty(&self) -> bool {
        SplayTree::is_empty(self)
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }

    fn contains(&mut self, x: &T) -> bool {
        SplayTree::contains(self, x)
    }

    fn find_min(&self) -> Result<&T, UnderflowError> {
        SplayTree::find_min(self)
    }

    fn find_max(&self) -> Result<&T, UnderflowError> {
        SplayTree::find_max(self)
    }

    fn insert(&mut self, x: T) -> Outcome {
        SplayTree::insert(self, x)
    }

    fn remove(&mut self, x: &T) -> Outcome {
        SplayTree::remove(self, x)
    }

    fn traverse(&self) -> Self::Iter<'_> {
        SplayTree::traverse(self)
    }
}

impl<T: Ord> Extend<T> for SplayTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            let _ = self.insert(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for SplayTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a SplayTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

/// In-order iterator over a [`SplayTree`].
pub struct Iter<'a, T> {
    inner: arena::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
