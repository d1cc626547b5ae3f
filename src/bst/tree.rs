use crate::arena::{Handle, TypedArena};
use crate::bst::node::{Augment, Link, Node};
use crate::entry::Entry;
use std::cmp::{self, Ordering};
use std::mem;

/// The outcome of placing a key into the tree.
pub enum Insertion<V> {
    /// A new node was linked in at the returned position.
    Created(Handle),
    /// The key was already present; its old value is returned and the shape is unchanged.
    Replaced(V),
}

/// A node that was structurally removed from the tree.
pub struct Removal<K, V> {
    pub entry: Entry<K, V>,
    /// The surviving parent of the vacated position.
    pub parent: Link,
    /// `1` if the vacated position was the left child of `parent`, `-1` if it was the right
    /// child, and `0` if the removed node was the root.
    pub diff: i8,
}

/// An unbalanced binary search tree whose nodes live in a typed arena.
///
/// The tree is the sole owner of its nodes. Parent, left, and right links are handles into the
/// arena, so relinking nodes never moves them and releasing the arena releases every node once.
pub struct Tree<K, V, A> {
    arena: TypedArena<Node<K, V, A>>,
    root: Link,
}

impl<K, V, A> Tree<K, V, A>
where
    A: Augment,
{
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn root(&self) -> Link {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node(&self, handle: Handle) -> &Node<K, V, A> {
        &self.arena[handle]
    }

    pub fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V, A> {
        &mut self.arena[handle]
    }

    pub fn parent(&self, handle: Handle) -> Link {
        self.arena[handle].parent
    }

    pub fn left(&self, handle: Handle) -> Link {
        self.arena[handle].left
    }

    pub fn right(&self, handle: Handle) -> Link {
        self.arena[handle].right
    }

    pub fn set_parent(&mut self, handle: Handle, parent: Link) {
        self.arena[handle].parent = parent;
    }

    pub fn set_left(&mut self, handle: Handle, left: Link) {
        self.arena[handle].left = left;
    }

    pub fn set_right(&mut self, handle: Handle, right: Link) {
        self.arena[handle].right = right;
    }

    /// Points the slot of `parent` that currently holds `old` at `new`. An absent parent means
    /// `old` is the root.
    pub fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
    }

    pub fn is_left_child(&self, handle: Handle) -> bool {
        match self.parent(handle) {
            Some(parent) => self.left(parent) == Some(handle),
            None => false,
        }
    }

    fn leftmost(&self, mut curr: Handle) -> Handle {
        while let Some(left) = self.left(curr) {
            curr = left;
        }
        curr
    }

    fn rightmost(&self, mut curr: Handle) -> Handle {
        while let Some(right) = self.right(curr) {
            curr = right;
        }
        curr
    }

    /// Returns the node with the smallest key.
    pub fn first(&self) -> Link {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node with the largest key.
    pub fn last(&self) -> Link {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the node holding the largest key less than the key of `curr`.
    pub fn predecessor(&self, mut curr: Handle) -> Link {
        if let Some(left) = self.left(curr) {
            return Some(self.rightmost(left));
        }

        let mut parent = self.parent(curr);
        while let Some(node) = parent {
            if self.left(node) != Some(curr) {
                break;
            }
            curr = node;
            parent = self.parent(node);
        }
        parent
    }

    /// Returns the node holding the smallest key greater than the key of `curr`.
    pub fn successor(&self, mut curr: Handle) -> Link {
        if let Some(right) = self.right(curr) {
            return Some(self.leftmost(right));
        }

        let mut parent = self.parent(curr);
        while let Some(node) = parent {
            if self.right(node) != Some(curr) {
                break;
            }
            curr = node;
            parent = self.parent(node);
        }
        parent
    }

    /// Returns the handles of every node using in-order traversal.
    pub fn in_order(&self) -> Vec<Handle> {
        let mut ret = Vec::with_capacity(self.len());
        let mut curr = self.first();
        while let Some(handle) = curr {
            ret.push(handle);
            curr = self.successor(handle);
        }
        ret
    }

    /// Exchanges the positions of two nodes without touching their entries.
    ///
    /// Every link into and out of both positions is rewired, including the case where one node
    /// is the parent of the other. The root is updated if either node was the root. Augmented
    /// data that follows the position is exchanged as well.
    pub fn node_swap(&mut self, n1: Handle, n2: Handle) {
        if n1 == n2 {
            return;
        }

        let (p1, l1, r1) = {
            let node = &self.arena[n1];
            (node.parent, node.left, node.right)
        };
        let (p2, l2, r2) = {
            let node = &self.arena[n2];
            (node.parent, node.left, node.right)
        };
        let n1_is_left = self.is_left_child(n1);
        let n2_is_left = self.is_left_child(n2);

        // a link that pointed at one of the swapped nodes now points at the other
        let exchange = |link: Link| {
            if link == Some(n1) {
                Some(n2)
            } else if link == Some(n2) {
                Some(n1)
            } else {
                link
            }
        };

        {
            let node = &mut self.arena[n1];
            node.parent = exchange(p2);
            node.left = exchange(l2);
            node.right = exchange(r2);
        }
        {
            let node = &mut self.arena[n2];
            node.parent = exchange(p1);
            node.left = exchange(l1);
            node.right = exchange(r1);
        }

        for &(handle, is_left, old_parent) in &[(n1, n2_is_left, p2), (n2, n1_is_left, p1)] {
            let Node { left, right, .. } = self.arena[handle];
            for child in left.into_iter().chain(right) {
                self.arena[child].parent = Some(handle);
            }

            match old_parent {
                Some(parent) if parent != n1 && parent != n2 => {
                    if is_left {
                        self.arena[parent].left = Some(handle);
                    } else {
                        self.arena[parent].right = Some(handle);
                    }
                },
                _ => {},
            }
        }

        if self.root == Some(n1) {
            self.root = Some(n2);
        } else if self.root == Some(n2) {
            self.root = Some(n1);
        }

        if A::FOLLOWS_POSITION {
            let first = mem::take(&mut self.arena[n1].aux);
            let second = mem::replace(&mut self.arena[n2].aux, first);
            self.arena[n1].aux = second;
        }
    }

    /// Structurally removes a node and releases it.
    ///
    /// A node with two children first trades places with its predecessor, so the node that is
    /// finally unlinked has at most one child, which is spliced into its position.
    pub fn detach(&mut self, handle: Handle) -> Removal<K, V> {
        if self.left(handle).is_some() && self.right(handle).is_some() {
            if let Some(pred) = self.predecessor(handle) {
                debug!("swapping {:?} with predecessor {:?} before removal", handle, pred);
                self.node_swap(handle, pred);
            }
        }

        let Node { parent, left, right, .. } = self.arena[handle];
        let child = left.or(right);
        let diff = match parent {
            None => 0,
            Some(parent) if self.left(parent) == Some(handle) => 1,
            Some(_) => -1,
        };

        if let Some(child) = child {
            self.set_parent(child, parent);
        }
        self.replace_child(parent, handle, child);

        let Node { entry, .. } = self.arena.free(&handle);
        Removal { entry, parent, diff }
    }

    /// Releases a node without unlinking it. Links that point at the node are left dangling, so
    /// this is only used while tearing the whole tree down.
    pub fn release(&mut self, handle: Handle) -> Node<K, V, A> {
        if self.root == Some(handle) {
            self.root = None;
        }
        self.arena.free(&handle)
    }

    /// Releases every node and resets the tree to empty.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Visits every node with its depth, counting the root as depth one.
    fn for_each_depth<F>(&self, mut f: F)
    where
        F: FnMut(&Node<K, V, A>, usize),
    {
        let mut stack: Vec<(Handle, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            let node = &self.arena[handle];
            f(node, depth);
            for child in node.left.into_iter().chain(node.right) {
                stack.push((child, depth + 1));
            }
        }
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut ret = 0;
        self.for_each_depth(|_, depth| ret = cmp::max(ret, depth));
        ret
    }

    /// Returns `true` if every node has subtrees whose heights differ by at most one.
    pub fn is_balanced(&self) -> bool {
        // post-order walk; finished subtrees leave their heights on `heights`
        let mut stack: Vec<(Handle, bool)> = self.root.into_iter().map(|root| (root, false)).collect();
        let mut heights: Vec<usize> = Vec::new();

        while let Some((handle, visited)) = stack.pop() {
            let node = &self.arena[handle];
            if !visited {
                stack.push((handle, true));
                stack.extend(node.right.map(|right| (right, false)));
                stack.extend(node.left.map(|left| (left, false)));
                continue;
            }

            let right = node.right.and_then(|_| heights.pop()).unwrap_or(0);
            let left = node.left.and_then(|_| heights.pop()).unwrap_or(0);
            if cmp::max(left, right) - cmp::min(left, right) > 1 {
                return false;
            }
            heights.push(cmp::max(left, right) + 1);
        }
        true
    }

    /// Returns `true` if every leaf is at the same depth.
    pub fn has_equal_leaf_depths(&self) -> bool {
        let mut leaf_depth = None;
        let mut ret = true;
        self.for_each_depth(|node, depth| {
            if node.is_leaf() && *leaf_depth.get_or_insert(depth) != depth {
                ret = false;
            }
        });
        ret
    }
}

impl<K, V, A> Tree<K, V, A>
where
    K: Ord,
    A: Augment,
{
    pub fn find(&self, key: &K) -> Link {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Places a key into the tree without any rebalancing. An existing key has its value
    /// overwritten in place.
    pub fn insert(&mut self, key: K, value: V) -> Insertion<V> {
        let mut parent = None;
        let mut curr = self.root;
        let mut ordering = Ordering::Equal;

        while let Some(handle) = curr {
            let node = &mut self.arena[handle];
            ordering = key.cmp(node.key());
            curr = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => {
                    return Insertion::Replaced(mem::replace(node.value_mut(), value));
                },
            };
            parent = Some(handle);
        }

        let handle = self.arena.allocate(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                if ordering == Ordering::Less {
                    self.set_left(parent, Some(handle));
                } else {
                    self.set_right(parent, Some(handle));
                }
            },
        }
        Insertion::Created(handle)
    }

    pub fn remove(&mut self, key: &K) -> Option<Removal<K, V>> {
        self.find(key).map(|handle| self.detach(handle))
    }

    /// Returns the node with the largest key less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Link {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    ret = Some(handle);
                    node.right
                },
                Ordering::Equal => return Some(handle),
            };
        }
        ret
    }

    /// Returns the node with the smallest key greater than or equal to `key`.
    pub fn ceil(&self, key: &K) -> Link {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match key.cmp(node.key()) {
                Ordering::Less => {
                    ret = Some(handle);
                    node.left
                },
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        ret
    }
}
