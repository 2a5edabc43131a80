//! A treap: a Binary Search Tree by element and, at the same time, a min-heap by a random
//! priority drawn for each node when it is created. Because the priorities are independent of
//! the elements, the shape is that of a plain BST built from a random insertion order, which has
//! an expected height of `O(lg N)`.
//!
//! The random source is injected, so a treap built with a seeded (or mock) generator always
//! takes the same shape for the same operations.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{Outcome, Treap};
//!
//! let mut tree = Treap::with_seed(7);
//! for x in 0..100 {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(tree.remove(&42), Outcome::Removed);
//! assert_eq!(tree.len(), 99);
//! assert!(!tree.contains(&42));
//! ```

use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::util::{self, Link};
use crate::{Extreme, Notice, OrderedTree, Outcome, UnderflowError};

const TARGET: &str = module_path!();

/// A treap storing a set of `T`, drawing node priorities from `R`.
#[derive(Clone)]
pub struct Treap<T, R = StdRng> {
    root: Link<Node<T>>,
    len: usize,
    rng: R,
}

impl<T> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> fmt::Debug for Treap<T, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.traverse()).finish()
    }
}

impl<T> Treap<T> {
    /// Generate a new, empty `Treap` whose priorities come from an entropy-seeded [`StdRng`].
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Generate a new, empty `Treap` whose priorities come from a [`StdRng`] seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<T, R> Treap<T, R> {
    /// Generate a new, empty `Treap` drawing its priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::Treap;
    /// use rand::rngs::mock::StepRng;
    ///
    /// // Ever increasing priorities never rotate, so this is a plain BST.
    /// let mut tree = Treap::with_rng(StepRng::new(0, 1));
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.traverse().copied().collect::<Vec<_>>(), [1, 2]);
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self {
            root: None,
            len: 0,
            rng,
        }
    }

    /// Drops every element. The random source carries on where it was.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Whether the tree stores no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// How many elements the tree stores.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The smallest element.
    pub fn find_min(&self) -> Result<&T, UnderflowError> {
        util::leftmost(&self.root).ok_or(UnderflowError(Extreme::Min))
    }

    /// The largest element.
    pub fn find_max(&self) -> Result<&T, UnderflowError> {
        util::rightmost(&self.root).ok_or(UnderflowError(Extreme::Max))
    }

    /// Iterates over the elements in ascending order.
    pub fn traverse(&self) -> Iter<'_, T> {
        Iter {
            inner: util::Iter::new(&self.root),
        }
    }

    /// Whether an element equal to `x` is stored.
    pub fn contains(&self, x: &T) -> bool
    where
        T: Ord,
    {
        util::contains(&self.root, x)
    }
}

impl<T: Ord, R: RngCore> Treap<T, R> {
    /// Inserts `x` with a freshly drawn priority. If an equal element is already stored the tree
    /// is left as it is, no priority is drawn, and [`Notice::DuplicateKey`] is reported.
    pub fn insert(&mut self, x: T) -> Outcome {
        let outcome = insert(&mut self.root, x, &mut self.rng);
        if outcome == Outcome::Inserted {
            self.len += 1;
        }
        outcome.report(TARGET)
    }

    /// Removes the element equal to `x`. If there is none, [`Notice::KeyNotFound`] is reported.
    pub fn remove(&mut self, x: &T) -> Outcome {
        let outcome = remove(&mut self.root, x);
        if outcome == Outcome::Removed {
            self.len -= 1;
        }
        outcome.report(TARGET)
    }
}

impl<T: Ord, R: RngCore> OrderedTree<T> for Treap<T, R> {
    type Iter<'a> = Iter<'a, T> where T: 'a, R: 'a;

    fn clear(&mut self) {
        Treap::clear(self)
    }

    fn is_empty(&self) -> bool {
        Treap::is_empty(self)
    }

    fn len(&self) -> usize {
        Treap::len(self)
    }

    fn contains(&mut self, x: &T) -> bool {
        Treap::contains(self, x)
    }

    fn find_min(&self) -> Result<&T, UnderflowError> {
        Treap::find_min(self)
    }

    fn find_max(&self) -> Result<&T, UnderflowError> {
        Treap::find_max(self)
    }

    fn insert(&mut self, x: T) -> Outcome {
        Treap::insert(self, x)
    }

    fn remove(&mut self, x: &T) -> Outcome {
        Treap::remove(self, x)
    }

    fn traverse(&self) -> Self::Iter<'_> {
        Treap::traverse(self)
    }
}

impl<T: Ord, R: RngCore> Extend<T> for Treap<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            let _ = self.insert(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, R> IntoIterator for &'a Treap<T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

/// In-order iterator over a [`Treap`].
pub struct Iter<'a, T> {
    inner: util::Iter<'a, Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[derive(Clone)]
struct Node<T> {
    element: T,
    left: Link<Node<T>>,
    right: Link<Node<T>>,
    priority: u32,
}

impl<T> Node<T> {
    fn new_boxed(element: T, priority: u32) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
            priority,
        })
    }
}

impl<T> util::Node for Node<T> {
    type Element = T;

    fn element(&self) -> &T {
        &self.element
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }
}

/// Priority of a possibly empty subtree's root. Absent children lose every comparison.
fn priority<T>(link: &Link<Node<T>>) -> u32 {
    link.as_ref().map_or(u32::MAX, |n| n.priority)
}

fn insert<T: Ord, R: RngCore>(link: &mut Link<Node<T>>, x: T, rng: &mut R) -> Outcome {
    let Some(node) = link.as_mut() else {
        *link = Some(Node::new_boxed(x, rng.gen()));
        return Outcome::Inserted;
    };
    match x.cmp(&node.element) {
        Ordering::Less => {
            let outcome = insert(&mut node.left, x, rng);
            if priority(&node.left) < node.priority {
                log::trace!(target: TARGET, "rotation with left child");
                *link = link.take().map(util::rotate_with_left_child);
            }
            outcome
        }
        Ordering::Equal => Outcome::Unchanged(Notice::DuplicateKey),
        Ordering::Greater => {
            let outcome = insert(&mut node.right, x, rng);
            if priority(&node.right) < node.priority {
                log::trace!(target: TARGET, "rotation with right child");
                *link = link.take().map(util::rotate_with_right_child);
            }
            outcome
        }
    }
}

fn remove<T: Ord>(link: &mut Link<Node<T>>, x: &T) -> Outcome {
    let Some(node) = link.as_mut() else {
        return Outcome::Unchanged(Notice::KeyNotFound);
    };
    match x.cmp(&node.element) {
        Ordering::Less => remove(&mut node.left, x),
        Ordering::Greater => remove(&mut node.right, x),
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            // Push the node down below whichever child should sit above the other, and carry on
            // after it.
            let lift_left = priority(&node.left) < priority(&node.right);
            let target = link.take().expect("Matched => node");
            let mut top = if lift_left {
                log::trace!(target: TARGET, "rotation with left child");
                util::rotate_with_left_child(target)
            } else {
                log::trace!(target: TARGET, "rotation with right child");
                util::rotate_with_right_child(target)
            };
            let outcome = if lift_left {
                remove(&mut top.right, x)
            } else {
                remove(&mut top.left, x)
            };
            *link = Some(top);
            outcome
        }
        Ordering::Equal => {
            let removed = *link.take().expect("Matched => node");
            *link = removed.left.or(removed.right);
            Outcome::Removed
        }
    }
}
