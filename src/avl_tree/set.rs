use crate::avl_tree::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set of keys kept in an AVL tree.
///
/// Every key is stored as an `AvlMap<T, ()>` entry, so inserts and removals rebalance the
/// same way the map does and iteration always yields keys in ascending order.
///
/// # Examples
/// ```
/// use search_trees::avl_tree::AvlSet;
///
/// let mut primes: AvlSet<u32> = vec![7, 2, 5].into_iter().collect();
/// assert!(primes.insert(3));
/// assert!(!primes.insert(5));
///
/// assert_eq!(primes.iter().collect::<Vec<_>>(), vec![&2, &3, &5, &7]);
/// assert_eq!(primes.floor(&6), Some(&5));
/// assert_eq!(primes.remove(&2), Some(2));
/// assert!(primes.is_balanced());
/// ```
pub struct AvlSet<T> {
    map: AvlMap<T, ()>,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Creates an empty set using the default arena chunk size.
    pub fn new() -> Self {
        AvlSet {
            map: AvlMap::new(),
        }
    }

    /// Creates an empty set whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_chunk_size(4);
    /// set.extend(0..10);
    /// assert_eq!(set.len(), 10);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlSet {
            map: AvlMap::with_chunk_size(chunk_size),
        }
    }

    /// Adds `key` to the set and rebalances. Returns `false` and keeps the stored key if an
    /// equal key was already present.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert('x'));
    /// assert!(!set.insert('x'));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        self.map.insert(key, ()).is_none()
    }

    /// Takes `key` out of the set, handing back the stored key. A missing key leaves the set as
    /// it was and yields `None`.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let mut set: AvlSet<u32> = (1..4).collect();
    /// assert_eq!(set.remove(&2), Some(2));
    /// assert_eq!(set.remove(&2), None);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.map.remove(key).map(|(key, _)| key)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drops every key and releases the arena.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Greatest key that is not greater than `key`.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![10, 20].into_iter().collect();
    /// assert_eq!(set.floor(&9), None);
    /// assert_eq!(set.floor(&20), Some(&20));
    /// assert_eq!(set.floor(&25), Some(&20));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        self.map.floor(key)
    }

    /// Smallest key that is not less than `key`.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = vec![10, 20].into_iter().collect();
    /// assert_eq!(set.ceil(&10), Some(&10));
    /// assert_eq!(set.ceil(&11), Some(&20));
    /// assert_eq!(set.ceil(&21), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.map.ceil(key)
    }

    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Recomputes subtree heights and checks that no two siblings differ by more than one.
    pub fn is_balanced(&self) -> bool {
        self.map.is_balanced()
    }

    /// Returns `true` if every leaf sits at the same depth. Always `true` for an empty set.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let full: AvlSet<u32> = (0..7).collect();
    /// assert!(full.has_equal_leaf_depths());
    ///
    /// let ragged: AvlSet<u32> = (0..5).collect();
    /// assert!(!ragged.has_equal_leaf_depths());
    /// ```
    pub fn has_equal_leaf_depths(&self) -> bool {
        self.map.has_equal_leaf_depths()
    }

    /// Number of nodes on the longest root-to-leaf path; `0` when empty.
    ///
    /// # Examples
    /// ```
    /// use search_trees::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = (0..15).collect();
    /// assert_eq!(set.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Borrowing iterator over the keys in ascending order.
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            inner: self.map.iter(),
        }
    }
}

impl<T> IntoIterator for AvlSet<T>
where
    T: Ord,
{
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        AvlSetIntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consumes an `AvlSet<T>`, yielding its keys in ascending order.
pub struct AvlSetIntoIter<T> {
    inner: AvlMapIntoIter<T, ()>,
}

impl<T> Iterator for AvlSetIntoIter<T>
where
    T: Ord,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Borrows the keys of an `AvlSet<T>` in ascending order.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    inner: AvlMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a + Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AvlSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for AvlSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for AvlSet<T> where T: Ord {}

impl<T> fmt::Debug for AvlSet<T>
where
    T: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
