//! Hash table whose collision chains are AVL trees.
//!
//! Every slot holds an independent tree of the distinct keys whose low bits
//! select that slot. A bucket node's payload is the [`Id`] of the key tree
//! node for the same key, so a hit jumps straight to the counter.

use crate::TUNED_PARAMS;

use super::avl::{AvlArena, Id, Search};

/// Slot count used for a range of `len` elements: the smallest power of two
/// not below `len`. Sized by element count, not by distinct keys.
pub(crate) fn bucket_capacity(len: usize) -> usize {
    len.max(TUNED_PARAMS.min_bucket_capacity).next_power_of_two()
}

#[derive(Clone, Debug)]
pub(crate) struct BucketIndex {
    table: Vec<Id>,
    nodes: AvlArena<Id>,
    mask: usize,
    comparisons: u64,
    hits: u64,
}

impl Default for BucketIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl BucketIndex {
    pub(crate) fn new() -> Self {
        let mut index = Self {
            table: Vec::new(),
            nodes: AvlArena::new(),
            mask: 0,
            comparisons: 0,
            hits: 0,
        };
        index.reset(0);
        index
    }

    /// Empties every bucket and resizes the table for a range of `len` elements.
    pub(crate) fn reset(&mut self, len: usize) {
        let capacity = bucket_capacity(len);
        self.table.clear();
        self.table.resize(capacity, Id::NIL);
        self.nodes.clear();
        self.mask = capacity - 1;
        self.comparisons = 0;
        self.hits = 0;
    }

    pub(crate) fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Number of keys across all buckets.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub(crate) fn hits(&self) -> u64 {
        self.hits
    }

    /// Home slot of `value`, taken from its two's-complement bit pattern.
    #[inline(always)]
    pub(crate) fn index_of(&self, value: i32) -> usize {
        (value as u32 as usize) & self.mask
    }

    /// Key tree node registered for `value`, if any.
    pub(crate) fn find(&mut self, value: i32) -> Option<Id> {
        let root = self.table[self.index_of(value)];
        match self.nodes.search(root, value, &mut self.comparisons) {
            Search::Found(x) => {
                self.hits += 1;
                Some(self.nodes.node(x).payload)
            }
            Search::Vacant { .. } => None,
        }
    }

    /// Registers `value` as owned by `key_node`.
    ///
    /// The caller must have seen `find(value)` miss; meeting the key again here
    /// means the two trees went out of sync.
    pub(crate) fn insert(&mut self, value: i32, key_node: Id) {
        let slot = self.index_of(value);
        let root = self.table[slot];
        let x = self.nodes.alloc(value, key_node);
        if root.is_nil() {
            self.table[slot] = x;
            return;
        }

        match self.nodes.search(root, value, &mut self.comparisons) {
            Search::Found(_) => {
                panic!("bucket index invariant broken: key {value} inserted twice into slot {slot}")
            }
            Search::Vacant { parent, side } => {
                self.nodes.link(parent, side, x);
                if let Some(new_root) = self.nodes.rebalance_after_insertion(x) {
                    self.table[slot] = new_root;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_valid(&self, keys: &super::KeyTree) {
        let mut reached = 0;
        for (slot, &root) in self.table.iter().enumerate() {
            reached += self.nodes.assert_valid(root);
            let mut x = self.nodes.minimum(root);
            while !x.is_nil() {
                let nx = self.nodes.node(x);
                assert_eq!(self.index_of(nx.key), slot, "key {} in wrong slot", nx.key);
                assert_eq!(keys.key(nx.payload), nx.key, "back-reference mismatch");
                x = self.nodes.successor(x);
            }
        }
        assert_eq!(reached, self.nodes.len(), "unreachable bucket nodes");
    }

    #[cfg(test)]
    pub(crate) fn bucket_height(&self, slot: usize) -> i32 {
        self.nodes.height(self.table[slot])
    }
}
