//! Helpers for the trees whose nodes own their children through `Box`es ([`crate::avl`] and
//! [`crate::treap`]).

use std::cmp::Ordering;

/// An owned, possibly empty, subtree.
pub(crate) type Link<N> = Option<Box<N>>;

/// A node that owns both of its children.
pub(crate) trait Node: Sized {
    type Element;

    fn element(&self) -> &Self::Element;
    fn left(&self) -> &Link<Self>;
    fn right(&self) -> &Link<Self>;
    fn left_mut(&mut self) -> &mut Link<Self>;
    fn right_mut(&mut self) -> &mut Link<Self>;

    /// Recomputes whatever the node caches about its children. Rotations call this on both nodes
    /// whose children changed, lower node first.
    fn refresh(&mut self) {}
}

/// Rotates `k2`'s left child up to take its place and returns the new subtree root. `k2` must
/// have a left child.
///
/// ```text
///      k2            k1
///     /  \          /  \
///    k1   z  ->    x    k2
///   /  \               /  \
///  x    y             y    z
/// ```
pub(crate) fn rotate_with_left_child<N: Node>(mut k2: Box<N>) -> Box<N> {
    let mut k1 = k2.left_mut().take().expect("Rotate right => left child");
    *k2.left_mut() = k1.right_mut().take();
    k2.refresh();
    *k1.right_mut() = Some(k2);
    k1.refresh();
    k1
}

/// Mirror image of [`rotate_with_left_child`]. `k1` must have a right child.
pub(crate) fn rotate_with_right_child<N: Node>(mut k1: Box<N>) -> Box<N> {
    let mut k2 = k1.right_mut().take().expect("Rotate left => right child");
    *k1.right_mut() = k2.left_mut().take();
    k1.refresh();
    *k2.left_mut() = Some(k1);
    k2.refresh();
    k2
}

pub(crate) fn contains<N>(mut link: &Link<N>, x: &N::Element) -> bool
where
    N: Node,
    N::Element: Ord,
{
    while let Some(node) = link.as_deref() {
        link = match x.cmp(node.element()) {
            Ordering::Less => node.left(),
            Ordering::Equal => return true,
            Ordering::Greater => node.right(),
        };
    }
    false
}

pub(crate) fn leftmost<N: Node>(link: &Link<N>) -> Option<&N::Element> {
    let mut node = link.as_deref()?;
    while let Some(left) = node.left().as_deref() {
        node = left;
    }
    Some(node.element())
}

pub(crate) fn rightmost<N: Node>(link: &Link<N>) -> Option<&N::Element> {
    let mut node = link.as_deref()?;
    while let Some(right) = node.right().as_deref() {
        node = right;
    }
    Some(node.element())
}

/// Stack based in-order traversal. Holds at most `height` nodes at a time.
pub(crate) struct Iter<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: Node> Iter<'a, N> {
    pub(crate) fn new(root: &'a Link<N>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left().as_deref();
        }
    }
}

impl<'a, N: Node> Iterator for Iter<'a, N> {
    type Item = &'a N::Element;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right().as_deref());
        Some(node.element())
    }
}
