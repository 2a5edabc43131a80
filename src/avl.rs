//! An AVL tree. After every insert and remove each node on the path back up to the root is
//! rebalanced so that its two subtrees differ in height by at most one.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, Extreme, Notice, Outcome, UnderflowError};
//!
//! let mut tree = AvlTree::new();
//! assert_eq!(tree.find_min(), Err(UnderflowError(Extreme::Min)));
//!
//! // Sorted input would give a plain BST a height of 9.
//! for x in 0..10 {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.height(), 3);
//!
//! assert_eq!(tree.remove(&4), Outcome::Removed);
//! assert_eq!(tree.remove(&4), Outcome::Unchanged(Notice::KeyNotFound));
//! assert!(!tree.contains(&4));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::util::{self, Link};
use crate::{Extreme, Notice, OrderedTree, Outcome, UnderflowError};

const TARGET: &str = module_path!();

/// How much taller one subtree of a node may be than the other.
const ALLOWED_IMBALANCE: i32 = 1;

/// A self-balancing Binary Search Tree (specifically, an AVL tree) storing a set of `T`.
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<Node<T>>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.traverse()).finish()
    }
}

impl<T> AvlTree<T> {
    /// Generate a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Drops every element.
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

    /// Length of the longest path from the root to a leaf. An empty tree has height -1 and a
    /// single node has height 0.
    pub fn height(&self) -> i32 {
        height(&self.root)
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

    /// Inserts `x`. If an equal element is already stored the tree is left as it is and
    /// [`Notice::DuplicateKey`] is reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::{AvlTree, Notice, Outcome};
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert_eq!(tree.insert(1), Outcome::Inserted);
    /// assert_eq!(tree.insert(1), Outcome::Unchanged(Notice::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, x: T) -> Outcome
    where
        T: Ord,
    {
        let outcome = insert(&mut self.root, x);
        if outcome == Outcome::Inserted {
            self.len += 1;
        }
        outcome.report(TARGET)
    }

    /// Removes the element equal to `x`. If there is none, [`Notice::KeyNotFound`] is reported.
    pub fn remove(&mut self, x: &T) -> Outcome
    where
        T: Ord,
    {
        let outcome = remove(&mut self.root, x);
        if outcome == Outcome::Removed {
            self.len -= 1;
        }
        outcome.report(TARGET)
    }
}

impl<T: Ord> OrderedTree<T> for AvlTree<T> {
    type Iter<'a> = Iter<'a, T> where T: 'a;

    fn clear(&mut self) {
        AvlTree::clear(self)
    }

    fn is_empty(&self) -> bool {
        AvlTree::is_empty(self)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn contains(&mut self, x: &T) -> bool {
        AvlTree::contains(self, x)
    }

    fn find_min(&self) -> Result<&T, UnderflowError> {
        AvlTree::find_min(self)
    }

    fn find_max(&self) -> Result<&T, UnderflowError> {
        AvlTree::find_max(self)
    }

    fn insert(&mut self, x: T) -> Outcome {
        AvlTree::insert(self, x)
    }

    fn remove(&mut self, x: &T) -> Outcome {
        AvlTree::remove(self, x)
    }

    fn traverse(&self) -> Self::Iter<'_> {
        AvlTree::traverse(self)
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            let _ = self.insert(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

/// In-order iterator over an [`AvlTree`].
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
    height: i32,
}

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Self {
            element,
            left: None,
            right: None,
            height: 0,
        })
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
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

    fn refresh(&mut self) {
        self.fix_height();
    }
}

/// Height of a possibly empty subtree. Empty subtrees have height -1.
fn height<T>(link: &Link<Node<T>>) -> i32 {
    link.as_ref().map_or(-1, |n| n.height)
}

fn insert<T: Ord>(link: &mut Link<Node<T>>, x: T) -> Outcome {
    let Some(node) = link.as_mut() else {
        *link = Some(Node::new_boxed(x));
        return Outcome::Inserted;
    };
    let outcome = match x.cmp(&node.element) {
        Ordering::Less => insert(&mut node.left, x),
        Ordering::Equal => return Outcome::Unchanged(Notice::DuplicateKey),
        Ordering::Greater => insert(&mut node.right, x),
    };
    balance(link);
    outcome
}

fn remove<T: Ord>(link: &mut Link<Node<T>>, x: &T) -> Outcome {
    let Some(node) = link.as_mut() else {
        return Outcome::Unchanged(Notice::KeyNotFound);
    };
    let outcome = match x.cmp(&node.element) {
        Ordering::Less => remove(&mut node.left, x),
        Ordering::Greater => remove(&mut node.right, x),
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            // Two children: the successor takes this node's place.
            node.element = remove_min(&mut node.right).expect("Two children => right child");
            Outcome::Removed
        }
        Ordering::Equal => {
            let removed = *link.take().expect("Matched => node");
            *link = removed.left.or(removed.right);
            Outcome::Removed
        }
    };
    balance(link);
    outcome
}

/// Unlinks the smallest node of the subtree and returns its element, rebalancing on the way up.
fn remove_min<T>(link: &mut Link<Node<T>>) -> Option<T> {
    let node = link.as_mut()?;
    if node.left.is_some() {
        let min = remove_min(&mut node.left);
        balance(link);
        return min;
    }
    let removed = *link.take()?;
    *link = removed.right;
    Some(removed.element)
}

/// Restores the AVL invariant at the root of `link`, assuming it holds in both subtrees and
/// their heights differ by at most two.
fn balance<T>(link: &mut Link<Node<T>>) {
    let Some(mut node) = link.take() else {
        return;
    };

    if height(&node.left) - height(&node.right) > ALLOWED_IMBALANCE {
        let outer_is_taller = node
            .left
            .as_ref()
            .map_or(false, |left| height(&left.left) >= height(&left.right));
        node = if outer_is_taller {
            log::trace!(target: TARGET, "single rotation with left child");
            util::rotate_with_left_child(node)
        } else {
            log::trace!(target: TARGET, "double rotation with left child");
            double_with_left_child(node)
        };
    } else if height(&node.right) - height(&node.left) > ALLOWED_IMBALANCE {
        let outer_is_taller = node
            .right
            .as_ref()
            .map_or(false, |right| height(&right.right) >= height(&right.left));
        node = if outer_is_taller {
            log::trace!(target: TARGET, "single rotation with right child");
            util::rotate_with_right_child(node)
        } else {
            log::trace!(target: TARGET, "double rotation with right child");
            double_with_right_child(node)
        };
    }
    node.fix_height();

    if cfg!(debug_assertions) {
        let left_height = height(&node.left);
        let right_height = height(&node.right);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!((left_height - right_height).abs() <= ALLOWED_IMBALANCE);
    }
    *link = Some(node);
}

/// Rotates the left child's right child up two levels.
fn double_with_left_child<T>(mut k3: Box<Node<T>>) -> Box<Node<T>> {
    k3.left = k3.left.take().map(util::rotate_with_right_child);
    util::rotate_with_left_child(k3)
}

/// Rotates the right child's left child up two levels.
fn double_with_right_child<T>(mut k3: Box<Node<T>>) -> Box<Node<T>> {
    k3.right = k3.right.take().map(util::rotate_with_left_child);
    util::rotate_with_right_child(k3)
}
