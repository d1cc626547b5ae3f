use crate::arena::Handle;
use crate::bst::node::{Augment, Link};
use crate::bst::tree::Tree;
use std::ptr;
use std::vec;

/// An in-order iterator that advances through successor links.
///
/// Two iterators are equal when they walk the same tree and sit at the same node, so an
/// exhausted iterator plays the role of the end position.
pub struct Iter<'a, K, V, A> {
    tree: &'a Tree<K, V, A>,
    current: Link,
}

impl<'a, K, V, A> Iter<'a, K, V, A>
where
    A: Augment,
{
    pub fn new(tree: &'a Tree<K, V, A>, current: Link) -> Self {
        Iter { tree, current }
    }
}

impl<'a, K, V, A> Iterator for Iter<'a, K, V, A>
where
    A: Augment,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.current?;
        self.current = tree.successor(handle);
        let node = tree.node(handle);
        Some((node.key(), node.value()))
    }
}

impl<'a, K, V, A> Clone for Iter<'a, K, V, A> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            current: self.current,
        }
    }
}

impl<'a, K, V, A> PartialEq for Iter<'a, K, V, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

/// An owning in-order iterator. The visiting order is fixed up front because releasing a node
/// leaves the links that pointed at it dangling.
pub struct IntoIter<K, V, A> {
    tree: Tree<K, V, A>,
    order: vec::IntoIter<Handle>,
}

impl<K, V, A> IntoIter<K, V, A>
where
    A: Augment,
{
    pub fn new(tree: Tree<K, V, A>) -> Self {
        let order = tree.in_order().into_iter();
        IntoIter { tree, order }
    }
}

impl<K, V, A> Iterator for IntoIter<K, V, A>
where
    A: Augment,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let IntoIter { ref mut tree, ref mut order } = *self;
        order.next().map(|handle| tree.release(handle).entry.into_pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}
