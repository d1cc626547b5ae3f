use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100_000;

macro_rules! bst_map_tests {
    ($($module_name:ident: $type_name:ident,)*) => {
        $(
            mod $module_name {
                use search_trees::error::{Error, KeyError};
                use search_trees::$module_name::$type_name;
                use rand::Rng;
                use std::collections::BTreeMap;
                use super::NUM_OF_OPERATIONS;

                #[test]
                fn int_test_map() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut map = $type_name::new();
                    let mut expected = BTreeMap::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key = rng.gen::<u32>();
                        let val = rng.gen::<u32>();

                        map.insert(key, val);
                        expected.insert(key, val);
                    }

                    let mut expected_vec: Vec<(u32, u32)> = expected.into_iter().collect();
                    assert_eq!(map.len(), expected_vec.len());
                    assert_eq!(map.min(), expected_vec.first().map(|pair| &pair.0));
                    assert_eq!(map.max(), expected_vec.last().map(|pair| &pair.0));

                    for entry in &expected_vec {
                        assert!(map.contains_key(&entry.0));
                        assert_eq!(map.get(&entry.0), Some(&entry.1));
                        assert_eq!(map.try_get(&entry.0), Ok(&entry.1));
                        assert_eq!(map[&entry.0], entry.1);
                    }

                    for entry in &mut expected_vec {
                        let val_1 = rng.gen::<u32>();
                        let val_2 = rng.gen::<u32>();

                        let old_entry = map.insert(entry.0, val_1);
                        assert_eq!(old_entry, Some(entry.1));
                        {
                            let old_val = map.get_mut(&entry.0);
                            *old_val.unwrap() = val_2;
                        }
                        entry.1 = val_2;
                        assert_eq!(map.get(&entry.0), Some(&val_2));
                    }

                    rng.shuffle(&mut expected_vec);

                    let mut expected_len = expected_vec.len();
                    for entry in expected_vec {
                        let old_entry = map.remove(&entry.0);
                        expected_len -= 1;
                        assert_eq!(old_entry, Some((entry.0, entry.1)));
                        assert_eq!(map.len(), expected_len);
                        assert_eq!(map.try_get(&entry.0), Err(Error::OutOfRange));
                        assert_eq!(map.try_remove(&entry.0), Err(KeyError));
                    }

                    assert!(map.is_empty());
                    assert_eq!(map.iter().next(), None);
                }

                #[test]
                fn int_test_map_mixed_operations() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut map = $type_name::new();
                    let mut expected = BTreeMap::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let key: u32 = rng.gen_range(0, 1000);
                        if rng.gen::<bool>() {
                            let val = rng.gen::<u32>();
                            assert_eq!(map.insert(key, val), expected.insert(key, val));
                        } else {
                            assert_eq!(map.remove(&key), expected.remove(&key).map(|val| (key, val)));
                        }
                    }

                    assert_eq!(map.len(), expected.len());
                    assert_eq!(
                        map.iter().collect::<Vec<(&u32, &u32)>>(),
                        expected.iter().collect::<Vec<(&u32, &u32)>>(),
                    );

                    for key in 0..1001 {
                        assert_eq!(map.floor(&key), expected.range(..=key).next_back().map(|pair| pair.0));
                        assert_eq!(map.ceil(&key), expected.range(key..).next().map(|pair| pair.0));
                    }
                }

                #[test]
                fn int_test_find() {
                    let map: $type_name<u32, u32> = (0..100).map(|key| (key * 2, key)).collect();

                    for key in 0..200 {
                        let found = map.find(&key);
                        if key % 2 == 0 {
                            assert_eq!(found.clone().next(), Some((&key, &(key / 2))));
                            assert_eq!(found.count(), (200 - key as usize) / 2);
                        } else {
                            assert!(found == map.find(&201));
                        }
                    }
                }

                #[test]
                fn int_test_into_iter() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut map = $type_name::new();
                    let mut expected = BTreeMap::new();

                    for _ in 0..1000 {
                        let key = rng.gen::<u32>();
                        let val = rng.gen::<u32>();

                        map.insert(key, val);
                        expected.insert(key, val);
                    }

                    assert_eq!(
                        map.into_iter().collect::<Vec<(u32, u32)>>(),
                        expected.into_iter().collect::<Vec<(u32, u32)>>(),
                    );
                }
            }
        )*
    }
}

bst_map_tests!(
    avl_tree: AvlMap,
    bst: BstMap,
);

#[test]
fn int_test_maps_agree() {
    use rand::Rng;
    use search_trees::avl_tree::AvlMap;
    use search_trees::bst::BstMap;

    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut avl_map = AvlMap::new();
    let mut bst_map = BstMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..10_000 {
        let key: u32 = rng.gen_range(0, 500);
        let val = rng.gen::<u32>();
        if rng.gen_weighted_bool(3) {
            avl_map.remove(&key);
            bst_map.remove(&key);
            expected.remove(&key);
        } else {
            avl_map.insert(key, val);
            bst_map.insert(key, val);
            expected.insert(key, val);
        }
    }

    assert!(avl_map.iter().eq(bst_map.iter()));
    assert!(avl_map.iter().eq(expected.iter()));
    assert!(avl_map.height() <= bst_map.height());
}
