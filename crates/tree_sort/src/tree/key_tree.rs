use super::avl::{AvlArena, Id, Search, Side};
use super::bucket_index::BucketIndex;

/// AVL tree holding each distinct key once, with its occurrence count as
/// payload.
#[derive(Clone, Debug)]
pub(crate) struct KeyTree {
    nodes: AvlArena<usize>,
    root: Id,
    comparisons: u64,
}

impl Default for KeyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTree {
    pub(crate) fn new() -> Self {
        Self {
            nodes: AvlArena::new(),
            root: Id::NIL,
            comparisons: 0,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = Id::NIL;
        self.comparisons = 0;
    }

    /// Number of distinct keys.
    pub(crate) fn distinct(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn comparisons(&self) -> u64 {
        self.comparisons
    }

    #[cfg(test)]
    pub(crate) fn key(&self, x: Id) -> i32 {
        self.nodes.node(x).key
    }

    #[cfg(test)]
    pub(crate) fn count(&self, x: Id) -> usize {
        self.nodes.node(x).payload
    }

    /// Makes `value` the root of an empty tree.
    pub(crate) fn seed(&mut self, value: i32) -> Id {
        assert!(self.root.is_nil(), "key tree already seeded");
        self.root = self.nodes.alloc(value, 1);
        self.root
    }

    pub(crate) fn increment(&mut self, x: Id) {
        self.nodes.node_mut(x).payload += 1;
    }

    /// Counts one more occurrence of `value`, using `buckets` to spot repeats.
    ///
    /// Only a bucket miss pays for a descent of the key tree.
    pub(crate) fn insert_or_increment(&mut self, buckets: &mut BucketIndex, value: i32) -> Id {
        if self.root.is_nil() {
            let x = self.seed(value);
            buckets.insert(value, x);
            return x;
        }
        if let Some(x) = buckets.find(value) {
            self.increment(x);
            return x;
        }
        let x = self.insert_new(value);
        buckets.insert(value, x);
        x
    }

    /// Inserts a key known to be absent.
    pub(crate) fn insert_new(&mut self, value: i32) -> Id {
        match self.nodes.search(self.root, value, &mut self.comparisons) {
            Search::Found(_) => {
                panic!("key tree invariant broken: {value} already present after a bucket miss")
            }
            Search::Vacant { parent, side } => self.attach(value, parent, side),
        }
    }

    /// Counts one more occurrence of `value` by descending the key tree alone.
    pub(crate) fn insert_or_increment_by_descent(&mut self, value: i32) -> Id {
        match self.nodes.search(self.root, value, &mut self.comparisons) {
            Search::Found(x) => {
                self.increment(x);
                x
            }
            Search::Vacant { parent, side } => self.attach(value, parent, side),
        }
    }

    fn attach(&mut self, value: i32, parent: Id, side: Side) -> Id {
        if parent.is_nil() {
            return self.seed(value);
        }
        let x = self.nodes.alloc(value, 1);
        self.nodes.link(parent, side, x);
        if let Some(new_root) = self.nodes.rebalance_after_insertion(x) {
            self.root = new_root;
        }
        x
    }

    pub(crate) fn minimum(&self) -> Id {
        self.nodes.minimum(self.root)
    }

    pub(crate) fn successor(&self, x: Id) -> Id {
        self.nodes.successor(x)
    }

    /// Writes every key `count` times, in ascending order, to the front of
    /// `dst`. Returns the number of slots written.
    pub(crate) fn emit(&self, dst: &mut [i32]) -> usize {
        let mut out = 0usize;
        let mut x = self.minimum();
        while !x.is_nil() {
            let nx = self.nodes.node(x);
            let end = out + nx.payload;
            dst[out..end].fill(nx.key);
            out = end;
            x = self.successor(x);
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn assert_valid(&self) {
        assert_eq!(self.nodes.assert_valid(self.root), self.nodes.len());
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> i32 {
        self.nodes.height(self.root)
    }
}
