//! Serde support. Maps serialize as serde maps and sets as sequences, both in key order.
//! Deserializing inserts every entry in turn, so a later duplicate key overwrites an earlier one.

use crate::avl_tree::{AvlMap, AvlSet};
use crate::bst::BstMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

struct MapVisitor<M> {
    marker: PhantomData<M>,
}

struct SetVisitor<S> {
    marker: PhantomData<S>,
}

macro_rules! map_serde_impls {
    ($($map:ident,)*) => {
        $(
            impl<K, V> Serialize for $map<K, V>
            where
                K: Ord + Serialize,
                V: Serialize,
            {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: Serializer,
                {
                    let mut map = serializer.serialize_map(Some(self.len()))?;
                    for (key, value) in self {
                        map.serialize_entry(key, value)?;
                    }
                    map.end()
                }
            }

            impl<'de, K, V> Visitor<'de> for MapVisitor<$map<K, V>>
            where
                K: Ord + Deserialize<'de>,
                V: Deserialize<'de>,
            {
                type Value = $map<K, V>;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a map")
                }

                fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let mut map = $map::new();
                    while let Some((key, value)) = access.next_entry()? {
                        map.insert(key, value);
                    }
                    Ok(map)
                }
            }

            impl<'de, K, V> Deserialize<'de> for $map<K, V>
            where
                K: Ord + Deserialize<'de>,
                V: Deserialize<'de>,
            {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: Deserializer<'de>,
                {
                    deserializer.deserialize_map(MapVisitor::<$map<K, V>> {
                        marker: PhantomData,
                    })
                }
            }
        )*
    };
}

map_serde_impls!(AvlMap, BstMap,);

impl<T> Serialize for AvlSet<T>
where
    T: Ord + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de, T> Visitor<'de> for SetVisitor<AvlSet<T>>
where
    T: Ord + Deserialize<'de>,
{
    type Value = AvlSet<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = AvlSet::new();
        while let Some(key) = access.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor::<AvlSet<T>> { marker: PhantomData })
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::{AvlMap, AvlSet};
    use crate::bst::BstMap;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_avl_map_tokens() {
        let mut map = AvlMap::new();
        map.insert(2u32, 'b');
        map.insert(1u32, 'a');

        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Char('a'),
                Token::U32(2),
                Token::Char('b'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_bst_map_tokens() {
        let mut map = BstMap::new();
        map.insert(3u32, 'c');

        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(1) },
                Token::U32(3),
                Token::Char('c'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_duplicate_keys_overwrite() {
        let mut map = AvlMap::new();
        map.insert(1u32, 'z');

        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::Char('a'),
                Token::U32(1),
                Token::Char('z'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_avl_map_de_tokens_unordered() {
        let map: AvlMap<u32, char> = vec![(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();

        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(3) },
                Token::U32(3),
                Token::Char('c'),
                Token::U32(1),
                Token::Char('a'),
                Token::U32(2),
                Token::Char('b'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_bst_map_de_tokens_unordered() {
        let map: BstMap<u32, char> = vec![(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();

        assert_de_tokens(
            &map,
            &[
                Token::Map { len: None },
                Token::U32(2),
                Token::Char('b'),
                Token::U32(3),
                Token::Char('c'),
                Token::U32(1),
                Token::Char('a'),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_empty_map_tokens() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_tokens(&map, &[Token::Map { len: Some(0) }, Token::MapEnd]);
    }

    #[test]
    fn test_avl_set_tokens() {
        let set: AvlSet<u32> = vec![3, 1, 2].into_iter().collect();

        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(3) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }
}
