//! Node storage for the trees built around a shared terminal sentinel and a header node
//! ([`crate::red_black`] and [`crate::splay`]).
//!
//! Nodes live in a `Vec` and refer to each other by index, so a rotation that briefly splits the
//! tree into fragments never leaves anything dangling. Two slots are reserved:
//!
//! * [`NIL`] stands in for every absent child. Its links point back at itself and it never holds
//!   an element.
//! * [`HEADER`] is a permanent node owned by the tree. The red-black tree hangs its root off the
//!   header's right link; the splay tree uses it to collect the pieces of a splay.
//!
//! Neither slot's metadata can be changed, so a red-black sentinel stays black forever.

use std::cmp::Ordering;

pub(crate) type NodeId = usize;

pub(crate) const NIL: NodeId = 0;
pub(crate) const HEADER: NodeId = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    pub(crate) fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot<T, M> {
    element: Option<T>,
    links: [NodeId; 2],
    meta: M,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T, M> {
    slots: Vec<Slot<T, M>>,
    /// Released slots, reused before the `Vec` grows.
    free: Vec<NodeId>,
    sentinel_meta: M,
}

impl<T, M: Copy> Arena<T, M> {
    /// An arena holding only the sentinel and the header, both carrying `sentinel_meta`.
    pub(crate) fn new(sentinel_meta: M) -> Self {
        let sentinel = || Slot {
            element: None,
            links: [NIL, NIL],
            meta: sentinel_meta,
        };
        Self {
            slots: vec![sentinel(), sentinel()],
            free: Vec::new(),
            sentinel_meta,
        }
    }

    /// Drops every node, leaving the sentinel and a header with no children.
    pub(crate) fn clear(&mut self) {
        *self = Self::new(self.sentinel_meta);
    }

    pub(crate) fn alloc(&mut self, element: T, meta: M) -> NodeId {
        let slot = Slot {
            element: Some(element),
            links: [NIL, NIL],
            meta,
        };
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = slot;
                id
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    /// Frees a node that nothing links to any more and hands back its element.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<T> {
        debug_assert!(id > HEADER, "the sentinel and header are never released");
        let slot = &mut self.slots[id];
        slot.links = [NIL, NIL];
        self.free.push(id);
        slot.element.take()
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&T> {
        self.slots[id].element.as_ref()
    }

    pub(crate) fn set_element(&mut self, id: NodeId, element: T) -> Option<T> {
        self.slots[id].element.replace(element)
    }

    pub(crate) fn link(&self, id: NodeId, dir: Dir) -> NodeId {
        self.slots[id].links[dir as usize]
    }

    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.link(id, Dir::Left)
    }

    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.link(id, Dir::Right)
    }

    pub(crate) fn set_link(&mut self, id: NodeId, dir: Dir, child: NodeId) {
        debug_assert_ne!(id, NIL, "the sentinel's links never change");
        self.slots[id].links[dir as usize] = child;
    }

    pub(crate) fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.set_link(id, Dir::Left, child);
    }

    pub(crate) fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.set_link(id, Dir::Right, child);
    }

    pub(crate) fn meta(&self, id: NodeId) -> M {
        self.slots[id].meta
    }

    /// Updates a node's metadata. Writes to the sentinel or the header are ignored.
    pub(crate) fn set_meta(&mut self, id: NodeId, meta: M) {
        if id > HEADER {
            self.slots[id].meta = meta;
        }
    }

    /// Compares `x` with the element stored at `id`.
    ///
    /// The sentinel compares equal to everything, so a descent looking for `x` always stops at
    /// the latest when it falls off the tree. The header compares less than everything (`x` is
    /// greater), so a descent starting at the header always continues into its right link.
    pub(crate) fn compare(&self, x: &T, id: NodeId) -> Ordering
    where
        T: Ord,
    {
        match id {
            NIL => Ordering::Equal,
            HEADER => Ordering::Greater,
            _ => x.cmp(self.element(id).expect("Linked node => element")),
        }
    }

    /// Moves `root` down in direction `dir`, lifting its child on the other side into its place.
    /// Returns the new subtree root. The caller re-attaches it to `root`'s former parent.
    pub(crate) fn rotate(&mut self, root: NodeId, dir: Dir) -> NodeId {
        let save = self.link(root, dir.flip());
        debug_assert_ne!(save, NIL, "rotating toward a missing child");
        self.set_link(root, dir.flip(), self.link(save, dir));
        self.set_link(save, dir, root);
        save
    }

    /// Single rotation lifting `k2`'s left child.
    pub(crate) fn rotate_with_left_child(&mut self, k2: NodeId) -> NodeId {
        self.rotate(k2, Dir::Right)
    }

    /// Single rotation lifting `k1`'s right child.
    pub(crate) fn rotate_with_right_child(&mut self, k1: NodeId) -> NodeId {
        self.rotate(k1, Dir::Left)
    }

    /// The element found by following `dir` links from `root` as far as they go.
    pub(crate) fn extreme(&self, root: NodeId, dir: Dir) -> Option<&T> {
        if root == NIL {
            return None;
        }
        let mut id = root;
        while self.link(id, dir) != NIL {
            id = self.link(id, dir);
        }
        self.element(id)
    }

    /// Whether `x` is stored in the subtree under `root`.
    pub(crate) fn contains(&self, root: NodeId, x: &T) -> bool
    where
        T: Ord,
    {
        let mut id = root;
        while id != NIL {
            id = match self.compare(x, id) {
                Ordering::Less => self.left(id),
                Ordering::Equal => return true,
                Ordering::Greater => self.right(id),
            };
        }
        false
    }

    pub(crate) fn iter(&self, root: NodeId) -> Iter<'_, T, M> {
        let mut iter = Iter {
            arena: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }
}

/// Stack based in-order traversal of one subtree of an [`Arena`].
pub(crate) struct Iter<'a, T, M> {
    arena: &'a Arena<T, M>,
    stack: Vec<NodeId>,
}

impl<'a, T, M: Copy> Iter<'a, T, M> {
    fn push_left_spine(&mut self, mut id: NodeId) {
        while id != NIL {
            self.stack.push(id);
            id = self.arena.left(id);
        }
    }
}

impl<'a, T, M: Copy> Iterator for Iter<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.arena.right(id));
        self.arena.element(id)
    }
}
