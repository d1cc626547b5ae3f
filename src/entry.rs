use std::cmp::Ordering;

/// A key-value pair stored in a tree node. Entries are ordered and compared by key only.
#[derive(Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        let Entry { key, value } = self;
        (key, value)
    }
}

impl<K, V> Ord for Entry<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Entry<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Entry<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Entry<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Entry<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Entry<K, V> where K: Ord {}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn test_compares_by_key_only() {
        assert_eq!(Entry::new(1, "a"), Entry::new(1, "b"));
        assert!(Entry::new(1, "z") < Entry::new(2, "a"));
    }

    #[test]
    fn test_into_pair() {
        assert_eq!(Entry::new(3, 'c').into_pair(), (3, 'c'));
    }
}
