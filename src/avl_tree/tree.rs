use crate::arena::Handle;
use crate::avl_tree::node::Balance;
use crate::bst::node::Link;
use crate::bst::tree::{self, Insertion, Removal};
use crate::entry::Entry;
use std::cmp;

pub type Tree<K, V> = tree::Tree<K, V, Balance>;

pub fn balance<K, V>(tree: &Tree<K, V>, handle: Handle) -> i8 {
    tree.node(handle).aux.get()
}

fn set_balance<K, V>(tree: &mut Tree<K, V>, handle: Handle, balance: i8) {
    tree.node_mut(handle).aux.set(balance);
}

/// Promotes the right child of `node` into its position. Does nothing if there is no right child.
///
/// Both balance factors are derived from their values before the rotation, so the heights of the
/// subtrees are never recounted.
pub fn rotate_left<K, V>(tree: &mut Tree<K, V>, node: Handle) {
    let child = match tree.right(node) {
        Some(child) => child,
        None => return,
    };
    trace!("rotating left at {:?}", node);

    let parent = tree.parent(node);
    let inner = tree.left(child);

    tree.set_right(node, inner);
    if let Some(inner) = inner {
        tree.set_parent(inner, Some(node));
    }
    tree.replace_child(parent, node, Some(child));
    tree.set_parent(child, parent);
    tree.set_left(child, Some(node));
    tree.set_parent(node, Some(child));

    let node_balance = balance(tree, node) - 1 - cmp::max(balance(tree, child), 0);
    let child_balance = balance(tree, child) - 1 + cmp::min(node_balance, 0);
    set_balance(tree, node, node_balance);
    set_balance(tree, child, child_balance);
}

/// Promotes the left child of `node` into its position. Does nothing if there is no left child.
pub fn rotate_right<K, V>(tree: &mut Tree<K, V>, node: Handle) {
    let child = match tree.left(node) {
        Some(child) => child,
        None => return,
    };
    trace!("rotating right at {:?}", node);

    let parent = tree.parent(node);
    let inner = tree.right(child);

    tree.set_left(node, inner);
    if let Some(inner) = inner {
        tree.set_parent(inner, Some(node));
    }
    tree.replace_child(parent, node, Some(child));
    tree.set_parent(child, parent);
    tree.set_right(child, Some(node));
    tree.set_parent(node, Some(child));

    let node_balance = balance(tree, node) + 1 - cmp::min(balance(tree, child), 0);
    let child_balance = balance(tree, child) + 1 + cmp::max(node_balance, 0);
    set_balance(tree, node, node_balance);
    set_balance(tree, child, child_balance);
}

// Restores `parent`, whose factor just reached -2 or 2 because `child`'s subtree grew. The
// rotation formulas leave both nodes at 0 in the single rotation cases. In the double rotation
// cases the middle node ends at 0 and the outer nodes split its old imbalance between them.
fn insert_fix<K, V>(tree: &mut Tree<K, V>, parent: Handle, child: Handle) {
    if balance(tree, parent) < 0 {
        if balance(tree, child) > 0 {
            rotate_left(tree, child);
        }
        rotate_right(tree, parent);
    } else {
        if balance(tree, child) < 0 {
            rotate_right(tree, child);
        }
        rotate_left(tree, parent);
    }
}

/// Inserts a key-value pair and rebalances the path above the new node. Returns the old value if
/// the key already existed, in which case the shape of the tree does not change.
pub fn insert<K, V>(tree: &mut Tree<K, V>, key: K, value: V) -> Option<V>
where
    K: Ord,
{
    let mut child = match tree.insert(key, value) {
        Insertion::Created(handle) => handle,
        Insertion::Replaced(old) => return Some(old),
    };

    let mut parent = tree.parent(child);
    while let Some(node) = parent {
        let diff = if tree.left(node) == Some(child) { -1 } else { 1 };
        tree.node_mut(node).aux.update(diff);

        match balance(tree, node) {
            0 => break,
            -2 | 2 => {
                insert_fix(tree, node, child);
                break;
            },
            _ => {},
        }

        child = node;
        parent = tree.parent(node);
    }
    None
}

// Walks up from the parent of a removed position. `diff` is 1 if the left subtree of `current`
// lost height and -1 if the right subtree did. The walk stops at the first node whose subtree
// height is unchanged, which may be after a rotation or at the root.
fn remove_fix<K, V>(tree: &mut Tree<K, V>, mut current: Link, mut diff: i8) {
    while let Some(node) = current {
        let parent = tree.parent(node);
        let parent_diff = if tree.is_left_child(node) { 1 } else { -1 };
        let spread = balance(tree, node) + diff;
        trace!("fixing {:?} after removal with balance {}", node, spread);
        set_balance(tree, node, spread);

        let shrank = match spread {
            -2 => {
                let child = match tree.left(node) {
                    Some(child) => child,
                    None => return,
                };
                match balance(tree, child) {
                    0 => {
                        rotate_right(tree, node);
                        false
                    },
                    1 => {
                        rotate_left(tree, child);
                        rotate_right(tree, node);
                        true
                    },
                    _ => {
                        rotate_right(tree, node);
                        true
                    },
                }
            },
            2 => {
                let child = match tree.right(node) {
                    Some(child) => child,
                    None => return,
                };
                match balance(tree, child) {
                    0 => {
                        rotate_left(tree, node);
                        false
                    },
                    -1 => {
                        rotate_right(tree, child);
                        rotate_left(tree, node);
                        true
                    },
                    _ => {
                        rotate_left(tree, node);
                        true
                    },
                }
            },
            0 => true,
            _ => false,
        };

        if !shrank {
            return;
        }
        current = parent;
        diff = parent_diff;
    }
}

/// Removes a key and rebalances every ancestor whose subtree lost height.
pub fn remove<K, V>(tree: &mut Tree<K, V>, key: &K) -> Option<Entry<K, V>>
where
    K: Ord,
{
    let Removal { entry, parent, diff } = tree.remove(key)?;
    remove_fix(tree, parent, diff);
    Some(entry)
}

#[cfg(test)]
pub mod tests {
    use super::{balance, insert, remove, rotate_left, rotate_right, Tree};
    use crate::arena::Handle;
    use crate::bst::node::Link;
    use crate::bst::tree::tests::assert_consistent;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::cmp;
    use std::collections::BTreeMap;

    /// Checks the search tree links and that every stored balance factor equals the real
    /// difference in subtree heights and lies in `-1..=1`.
    pub fn assert_avl<V>(tree: &Tree<u32, V>) {
        fn height<V>(tree: &Tree<u32, V>, link: Link) -> i32 {
            let handle = match link {
                Some(handle) => handle,
                None => return 0,
            };
            let left = height(tree, tree.left(handle));
            let right = height(tree, tree.right(handle));
            assert_eq!(i32::from(balance(tree, handle)), right - left);
            assert!((right - left).abs() <= 1);
            cmp::max(left, right) + 1
        }

        assert_consistent(tree);
        height(tree, tree.root());
        assert!(tree.is_balanced());
    }

    fn build(keys: &[u32]) -> Tree<u32, u32> {
        let mut tree = Tree::new(8);
        for &key in keys {
            insert(&mut tree, key, key);
        }
        tree
    }

    fn handle_of(tree: &Tree<u32, u32>, key: u32) -> Handle {
        match tree.find(&key) {
            Some(handle) => handle,
            None => panic!("missing key {}", key),
        }
    }

    fn key_of(tree: &Tree<u32, u32>, link: Link) -> Option<u32> {
        link.map(|handle| *tree.node(handle).key())
    }

    #[test]
    fn test_rotate_without_child_is_noop() {
        let mut tree = build(&[1]);
        let root = handle_of(&tree, 1);
        rotate_left(&mut tree, root);
        rotate_right(&mut tree, root);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(balance(&tree, root), 0);
    }

    #[test]
    fn test_ascending_inserts() {
        let tree = build(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(key_of(&tree, tree.root()), Some(4));
        assert_eq!(tree.height(), 3);
        assert_avl(&tree);
    }

    #[test]
    fn test_single_left_rotation() {
        let tree = build(&[10, 20, 30]);
        let root = handle_of(&tree, 20);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(key_of(&tree, tree.left(root)), Some(10));
        assert_eq!(key_of(&tree, tree.right(root)), Some(30));
        for &key in &[10, 20, 30] {
            assert_eq!(balance(&tree, handle_of(&tree, key)), 0);
        }
        assert_avl(&tree);
    }

    #[test]
    fn test_single_right_rotation() {
        let tree = build(&[30, 20, 10]);
        assert_eq!(key_of(&tree, tree.root()), Some(20));
        assert_avl(&tree);
    }

    #[test]
    fn test_left_right_rotation() {
        let tree = build(&[30, 10, 20]);
        assert_eq!(key_of(&tree, tree.root()), Some(20));
        assert_avl(&tree);
    }

    #[test]
    fn test_right_left_rotation() {
        let tree = build(&[10, 30, 20]);
        assert_eq!(key_of(&tree, tree.root()), Some(20));
        assert_avl(&tree);
    }

    #[test]
    fn test_left_right_rotation_left_heavy_middle() {
        let tree = build(&[50, 30, 70, 20, 40, 35]);
        assert_eq!(key_of(&tree, tree.root()), Some(40));
        assert_eq!(balance(&tree, handle_of(&tree, 40)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 30)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 50)), 1);
        assert_avl(&tree);
    }

    #[test]
    fn test_left_right_rotation_right_heavy_middle() {
        let tree = build(&[50, 30, 70, 20, 40, 45]);
        assert_eq!(key_of(&tree, tree.root()), Some(40));
        assert_eq!(balance(&tree, handle_of(&tree, 40)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 30)), -1);
        assert_eq!(balance(&tree, handle_of(&tree, 50)), 0);
        assert_avl(&tree);
    }

    #[test]
    fn test_right_left_rotation_right_heavy_middle() {
        let tree = build(&[50, 30, 70, 60, 80, 65]);
        assert_eq!(key_of(&tree, tree.root()), Some(60));
        assert_eq!(balance(&tree, handle_of(&tree, 60)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 70)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 50)), -1);
        assert_avl(&tree);
    }

    #[test]
    fn test_right_left_rotation_left_heavy_middle() {
        let tree = build(&[50, 30, 70, 60, 80, 55]);
        let root = handle_of(&tree, 60);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(key_of(&tree, tree.left(root)), Some(50));
        assert_eq!(key_of(&tree, tree.right(root)), Some(70));
        assert_eq!(key_of(&tree, tree.right(handle_of(&tree, 50))), Some(55));
        assert_eq!(tree.left(handle_of(&tree, 70)), None);
        assert_eq!(balance(&tree, root), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 50)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 70)), 1);
        assert_avl(&tree);
    }

    #[test]
    fn test_overwrite_keeps_shape() {
        let mut tree = build(&[1, 2, 3, 4, 5]);
        let before = tree.in_order();
        assert_eq!(insert(&mut tree, 3, 30), Some(3));
        assert_eq!(tree.in_order(), before);
        assert_eq!(*tree.node(handle_of(&tree, 3)).value(), 30);
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_root_of_three() {
        let mut tree = build(&[10, 20, 30]);
        let entry = remove(&mut tree, &20).unwrap();
        assert_eq!(entry.key, 20);

        let root = match tree.root() {
            Some(root) => root,
            None => panic!("tree should not be empty"),
        };
        assert_eq!(tree.len(), 2);
        assert_ne!(balance(&tree, root), 0);
        assert_eq!(key_of(&tree, tree.root()), Some(10));
        assert_eq!(key_of(&tree, tree.right(root)), Some(30));
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_single_rotation_balanced_child() {
        let mut tree = build(&[20, 10, 30, 25, 35]);
        remove(&mut tree, &10);
        let root = handle_of(&tree, 30);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(balance(&tree, root), -1);
        assert_eq!(balance(&tree, handle_of(&tree, 20)), 1);
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_double_rotation() {
        let mut tree = build(&[20, 10, 30, 25]);
        remove(&mut tree, &10);
        assert_eq!(key_of(&tree, tree.root()), Some(25));
        assert_eq!(tree.height(), 2);
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_cascades_to_root() {
        let mut tree = build(&[5, 3, 8, 2, 4, 7, 10, 1, 6, 9, 11, 12]);
        assert_eq!(key_of(&tree, tree.root()), Some(5));
        assert_avl(&tree);

        remove(&mut tree, &4);
        assert_eq!(key_of(&tree, tree.root()), Some(8));
        assert_eq!(balance(&tree, handle_of(&tree, 8)), 0);
        assert_eq!(balance(&tree, handle_of(&tree, 5)), 0);
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tree = build(&[2, 1, 3]);
        let before = tree.in_order();
        assert!(remove(&mut tree, &4).is_none());
        assert_eq!(tree.in_order(), before);
        assert_avl(&tree);
    }

    #[test]
    fn test_remove_all() {
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        for key in 1..8 {
            assert_eq!(remove(&mut tree, &key).map(|entry| entry.value), Some(key));
            assert_avl(&tree);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_random_operations() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([3, 1, 4, 1]);
        let mut tree = Tree::new(16);
        let mut expected = BTreeMap::new();

        for _ in 0..2_000 {
            let key: u32 = rng.gen_range(0, 200);
            if rng.gen::<bool>() {
                assert_eq!(insert(&mut tree, key, key), expected.insert(key, key));
            } else {
                assert_eq!(
                    remove(&mut tree, &key).map(|entry| entry.into_pair()),
                    expected.remove(&key).map(|value| (key, value)),
                );
            }
            assert_avl(&tree);
        }
        assert_eq!(tree.len(), expected.len());
    }
}
