//! This crate exposes various self-balancing Binary Search Trees (BSTs) behind one ordered-set
//! contract, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! Searching for a value takes `O(height)`. Left alone, an unlucky insertion order (sorted input,
//! for example) grows the height to `O(N)`. Each tree in this crate restructures itself with
//! rotations so the height stays logarithmic:
//!
//! | Tree | Discipline | Height bound |
//! |------|------------|--------------|
//! | [`AvlTree`] | bottom-up, recursive, rebalanced by subtree heights | worst-case `O(lg N)` |
//! | [`RedBlackTree`] | top-down, single pass, rebalanced by node colors | worst-case `O(lg N)` |
//! | [`SplayTree`] | every access moves the touched node to the root | amortized `O(lg N)` |
//! | [`Treap`] | random priorities kept in heap order | expected `O(lg N)` |
//!
//! All of them implement [`OrderedTree`].
//!
//! # Examples
//!
//! ```
//! use balanced_bst::{AvlTree, Notice, Outcome};
//!
//! let mut tree = AvlTree::new();
//! for x in [7, 5, 9, 3, 4] {
//!     tree.insert(x);
//! }
//!
//! assert_eq!(tree.traverse().copied().collect::<Vec<_>>(), [3, 4, 5, 7, 9]);
//! assert_eq!(tree.insert(4), Outcome::Unchanged(Notice::DuplicateKey));
//! assert_eq!(tree.find_max(), Ok(&9));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod avl;
mod error;
pub mod red_black;
pub mod splay;
#[cfg(test)]
mod test;
pub mod treap;
mod util;

pub use avl::AvlTree;
pub use error::{Extreme, Notice, UnderflowError};
pub use red_black::RedBlackTree;
pub use splay::SplayTree;
pub use treap::Treap;

/// What an `insert` or `remove` did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new element was stored.
    Inserted,
    /// An element was removed.
    Removed,
    /// Nothing changed. The [`Notice`] says why.
    Unchanged(Notice),
}

impl Outcome {
    /// Whether the set of stored elements changed.
    pub fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// The notice attached to a no-op, if any.
    pub fn notice(self) -> Option<Notice> {
        match self {
            Self::Unchanged(notice) => Some(notice),
            _ => None,
        }
    }

    /// Logs the outcome under `target` and hands it back.
    pub(crate) fn report(self, target: &'static str) -> Self {
        match self {
            Self::Unchanged(notice) => log::debug!(target: target, "{notice}"),
            Self::Inserted => log::trace!(target: target, "inserted"),
            Self::Removed => log::trace!(target: target, "removed"),
        }
        self
    }
}

/// The operations every tree in this crate supports. The trees store a set: at most one element
/// per equivalence class of `T`'s ordering.
///
/// Each tree also has inherent methods with the same names. Those are what you get when calling
/// them on a concrete type. This trait exists so code can be written once for all of them.
///
/// # Examples
///
/// ```
/// use balanced_bst::{OrderedTree, RedBlackTree, SplayTree};
///
/// fn fill<T: OrderedTree<u32>>(tree: &mut T) -> Vec<u32> {
///     for x in [4, 1, 3, 2] {
///         tree.insert(x);
///     }
///     tree.remove(&3);
///     tree.traverse().copied().collect()
/// }
///
/// assert_eq!(fill(&mut RedBlackTree::new()), [1, 2, 4]);
/// assert_eq!(fill(&mut SplayTree::new()), [1, 2, 4]);
/// ```
pub trait OrderedTree<T: Ord> {
    /// In-order iterator returned by [`OrderedTree::traverse`].
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Drops every element. The tree is empty afterwards.
    fn clear(&mut self);

    /// Whether the tree stores no elements.
    fn is_empty(&self) -> bool;

    /// How many elements the tree stores.
    fn len(&self) -> usize;

    /// Whether an element equal to `x` is stored. Takes `&mut self` because a [`SplayTree`]
    /// restructures itself on every lookup.
    fn contains(&mut self, x: &T) -> bool;

    /// The smallest element.
    fn find_min(&self) -> Result<&T, UnderflowError>;

    /// The largest element.
    fn find_max(&self) -> Result<&T, UnderflowError>;

    /// Stores `x` unless an equal element is already present.
    fn insert(&mut self, x: T) -> Outcome;

    /// Removes the element equal to `x`, if present.
    fn remove(&mut self, x: &T) -> Outcome;

    /// Visits every element in ascending order. Each call starts a fresh traversal.
    fn traverse(&self) -> Self::Iter<'_>;
}
