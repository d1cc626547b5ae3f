use crate::arena::Handle;
use crate::entry::Entry;

/// A link from one node to another inside the arena of the same tree.
pub type Link = Option<Handle>;

/// Per-node data that a tree variant carries on top of the plain search tree links.
pub trait Augment: Default {
    /// Whether the data belongs to the node's position in the tree rather than to its entry. Data
    /// that follows the position is exchanged whenever two nodes trade places.
    const FOLLOWS_POSITION: bool;
}

impl Augment for () {
    const FOLLOWS_POSITION: bool = false;
}

/// A struct representing an internal node of a search tree.
///
/// The parent link is a back-reference only; every node is owned by the arena of its tree.
pub struct Node<K, V, A> {
    pub entry: Entry<K, V>,
    pub aux: A,
    pub parent: Link,
    pub left: Link,
    pub right: Link,
}

impl<K, V, A> Node<K, V, A>
where
    A: Augment,
{
    pub fn new(key: K, value: V, parent: Link) -> Self {
        Node {
            entry: Entry::new(key, value),
            aux: A::default(),
            parent,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.entry.key
    }

    pub fn value(&self) -> &V {
        &self.entry.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.entry.value
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
