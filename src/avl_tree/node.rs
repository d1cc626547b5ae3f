use crate::bst::node::Augment;

/// The height of a node's right subtree minus the height of its left subtree.
///
/// Outside of an insert or remove the factor is always `-1`, `0`, or `1`. It reaches `-2` or `2`
/// only while a fix-up is in progress.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Balance(i8);

impl Balance {
    pub fn get(self) -> i8 {
        self.0
    }

    pub fn set(&mut self, balance: i8) {
        self.0 = balance;
    }

    pub fn update(&mut self, diff: i8) {
        self.0 += diff;
    }
}

// The factor describes the subtrees below a position, so it stays put when two nodes trade places.
impl Augment for Balance {
    const FOLLOWS_POSITION: bool = true;
}
