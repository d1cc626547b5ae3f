use crate::arena::DEFAULT_CHUNK_SIZE;
use crate::bst::iter::{IntoIter, Iter};
use crate::bst::tree::{Insertion, Tree};
use crate::error::{Error, KeyError, Result};
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::result;

/// An ordered map implemented by an unbalanced binary search tree.
///
/// Keys are placed by a plain comparison walk from the root and the tree never restructures
/// itself, so inserting keys in sorted order degrades it into a chain. Removing a node with two
/// children swaps it with its in-order predecessor first.
///
/// # Examples
/// ```
/// use search_trees::bst::BstMap;
///
/// let mut map = BstMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map.get(&0), Some(&1));
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// *map.get_mut(&0).unwrap() = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct BstMap<K, V> {
    tree: Tree<K, V, ()>,
}

impl<K, V> BstMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `BstMap<K, V>`.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `BstMap<K, V>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        BstMap {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value
    /// is overwritten in place and the old value is returned.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert(key, value) {
            Insertion::Created(_) => None,
            Insertion::Replaced(old) => Some(old),
        }
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove(key).map(|removal| removal.entry.into_pair())
    }

    /// Removes a key-value pair that must be in the map.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    /// use search_trees::error::KeyError;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.try_remove(&1), Ok((1, 1)));
    /// assert_eq!(map.try_remove(&1), Err(KeyError));
    /// ```
    pub fn try_remove(&mut self, key: &K) -> result::Result<(K, V), KeyError> {
        self.remove(key).ok_or(KeyError)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|handle| self.tree.node(handle).value())
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let tree = &mut self.tree;
        match tree.find(key) {
            Some(handle) => Some(tree.node_mut(handle).value_mut()),
            None => None,
        }
    }

    /// Returns the value associated with a key that must be in the map.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    /// use search_trees::error::Error;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.try_get(&1), Ok(&1));
    /// assert_eq!(map.try_get(&2), Err(Error::OutOfRange));
    /// ```
    pub fn try_get(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::OutOfRange)
    }

    /// Returns a mutable reference to the value associated with a key that must be in the map.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if the key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// *map.try_get_mut(&1).unwrap() += 1;
    /// assert_eq!(map[&1], 2);
    /// assert!(map.try_get_mut(&2).is_err());
    /// ```
    pub fn try_get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::OutOfRange)
    }

    /// Returns an iterator that starts at a particular key and continues in order. If the key
    /// does not exist, the iterator is already exhausted.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// map.insert(3, 'c');
    ///
    /// let mut iterator = map.find(&2);
    /// assert_eq!(iterator.next(), Some((&2, &'b')));
    /// assert_eq!(iterator.next(), Some((&3, &'c')));
    /// assert_eq!(map.find(&4).next(), None);
    /// ```
    pub fn find(&self, key: &K) -> BstMapIter<K, V> {
        BstMapIter {
            inner: Iter::new(&self.tree, self.tree.find(key)),
        }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let map: BstMap<u32, u32> = BstMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values. The map can be used again afterwards.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.tree.floor(key).map(|handle| self.tree.node(handle).key())
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &K) -> Option<&K> {
        self.tree.ceil(key).map(|handle| self.tree.node(handle).key())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.tree.first().map(|handle| self.tree.node(handle).key())
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        self.tree.last().map(|handle| self.tree.node(handle).key())
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// for key in 0..4 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns `true` if the heights of the two subtrees of every node differ by at most one.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// for key in 1..8 {
    ///     map.insert(key, ());
    /// }
    /// assert!(!map.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    /// Returns `true` if every leaf of the tree is at the same depth.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// for &key in &[2, 1, 3] {
    ///     map.insert(key, ());
    /// }
    /// assert!(map.has_equal_leaf_depths());
    ///
    /// map.insert(4, ());
    /// assert!(!map.has_equal_leaf_depths());
    /// ```
    pub fn has_equal_leaf_depths(&self) -> bool {
        self.tree.has_equal_leaf_depths()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use search_trees::bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> BstMapIter<K, V> {
        BstMapIter {
            inner: Iter::new(&self.tree, self.tree.first()),
        }
    }
}

impl<K, V> IntoIterator for BstMap<K, V>
where
    K: Ord,
{
    type Item = (K, V);
    type IntoIter = BstMapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        BstMapIntoIter {
            inner: IntoIter::new(self.tree),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V>
where
    K: 'a + Ord,
    V: 'a,
{
    type Item = (&'a K, &'a V);
    type IntoIter = BstMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `BstMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct BstMapIntoIter<K, V> {
    inner: IntoIter<K, V, ()>,
}

impl<K, V> Iterator for BstMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// An iterator for `BstMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
/// Iterators compare equal when they are at the same position of the same map.
pub struct BstMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    inner: Iter<'a, K, V, ()>,
}

impl<'a, K, V> Iterator for BstMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<'a, K, V> Clone for BstMapIter<'a, K, V> {
    fn clone(&self) -> Self {
        BstMapIter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> PartialEq for BstMapIter<'a, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Default for BstMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<&K> for BstMap<K, V>
where
    K: Ord,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("Error: key does not exist in the map.")
    }
}

impl<K, V> FromIterator<(K, V)> for BstMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for BstMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> PartialEq for BstMap<K, V>
where
    K: Ord,
    V: PartialEq,
{
    fn eq(&self, other: &BstMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for BstMap<K, V>
where
    K: Ord,
    V: Eq,
{
}

impl<K, V> fmt::Debug for BstMap<K, V>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::BstMap;
    use crate::error::{Error, KeyError};

    #[test]
    fn test_len_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: BstMap<u32, u32> = BstMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_replace() {
        let mut map = BstMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some(1));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut map = BstMap::new();
        map.insert(2, 2);
        map.insert(1, 1);
        assert_eq!(map.remove(&3), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &1), (&2, &2)]);
    }

    #[test]
    fn test_try_remove() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.try_remove(&1), Ok((1, 1)));
        assert_eq!(map.try_remove(&1), Err(KeyError));
    }

    #[test]
    fn test_try_get() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        assert_eq!(map.try_get(&1), Ok(&1));
        assert_eq!(map.try_get(&0), Err(Error::OutOfRange));
        *map.try_get_mut(&1).unwrap() = 5;
        assert_eq!(map[&1], 5);
    }

    #[test]
    #[should_panic]
    fn test_index_missing() {
        let map: BstMap<u32, u32> = BstMap::new();
        let _value = map[&0];
    }

    #[test]
    fn test_get_mut() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_ascending_inserts_are_unbalanced() {
        let mut map = BstMap::new();
        for key in 1..8 {
            map.insert(key, key);
        }
        assert_eq!(map.height(), 7);
        assert!(!map.is_balanced());
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut map = BstMap::new();
        map.insert(1, 1);
        map.insert(2, 2);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        map.insert(3, 3);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_find_and_iter_eq() {
        let mut map = BstMap::new();
        map.insert(2, 2);
        map.insert(1, 1);
        assert!(map.find(&1) == map.iter());
        assert!(map.find(&2) != map.iter());
        assert!(map.find(&7) == map.find(&8));
    }

    #[test]
    fn test_into_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = BstMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_from_iter_and_debug() {
        let map: BstMap<u32, char> = vec![(2, 'b'), (1, 'a')].into_iter().collect();
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
        assert_eq!(map, vec![(1, 'a'), (2, 'b')].into_iter().collect::<BstMap<u32, char>>());
    }
}
