use std::cmp::Ordering;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(u32::MAX);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Outcome of a BST descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Search {
    Found(Id),
    /// The key is absent; a new node belongs on `side` of `parent`.
    /// `parent` is `NIL` when the tree is empty.
    Vacant { parent: Id, side: Side },
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Node<T> {
    pub(crate) key: i32,
    /// Height of the subtree rooted here; a leaf is `0`, an absent node `-1`.
    pub(crate) height: i32,
    pub(crate) left: Id,
    pub(crate) right: Id,
    pub(crate) parent: Id,
    pub(crate) payload: T,
}

impl<T> Node<T> {
    fn new(key: i32, payload: T) -> Self {
        Self {
            key,
            height: 0,
            left: Id::NIL,
            right: Id::NIL,
            parent: Id::NIL,
            payload,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct AvlArena<T> {
    nodes: Vec<Node<T>>,
}

impl<T> AvlArena<T> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Allocates a detached leaf.
    pub(crate) fn alloc(&mut self, key: i32, payload: T) -> Id {
        let idx = self.nodes.len();
        assert!(
            idx < u32::MAX as usize,
            "AvlArena::alloc: node ids exhausted"
        );
        self.nodes.push(Node::new(key, payload));
        Id(idx as u32)
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: Id) -> &Node<T> {
        debug_assert!(!x.is_nil());
        debug_assert!(x.idx() < self.nodes.len());
        if cfg!(debug_assertions) {
            &self.nodes[x.idx()]
        } else {
            // SAFETY: `Id` values are only handed out by `alloc` and `NIL` is checked by callers.
            unsafe { self.nodes.get_unchecked(x.idx()) }
        }
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, x: Id) -> &mut Node<T> {
        debug_assert!(!x.is_nil());
        debug_assert!(x.idx() < self.nodes.len());
        if cfg!(debug_assertions) {
            &mut self.nodes[x.idx()]
        } else {
            // SAFETY: `Id` values are only handed out by `alloc` and `NIL` is checked by callers.
            unsafe { self.nodes.get_unchecked_mut(x.idx()) }
        }
    }

    #[inline(always)]
    pub(crate) fn height(&self, x: Id) -> i32 {
        if x.is_nil() { -1 } else { self.node(x).height }
    }

    #[inline(always)]
    fn update_height(&mut self, x: Id) {
        let (l, r) = {
            let nx = self.node(x);
            (nx.left, nx.right)
        };
        let height = 1 + self.height(l).max(self.height(r));
        self.node_mut(x).height = height;
    }

    /// Descends from `root` looking for `key`, adding one to `comparisons`
    /// per node visited.
    pub(crate) fn search(&self, root: Id, key: i32, comparisons: &mut u64) -> Search {
        let mut parent = Id::NIL;
        let mut side = Side::Left;
        let mut x = root;
        while !x.is_nil() {
            *comparisons += 1;
            let nx = self.node(x);
            match key.cmp(&nx.key) {
                Ordering::Less => {
                    parent = x;
                    side = Side::Left;
                    x = nx.left;
                }
                Ordering::Greater => {
                    parent = x;
                    side = Side::Right;
                    x = nx.right;
                }
                Ordering::Equal => return Search::Found(x),
            }
        }
        Search::Vacant { parent, side }
    }

    /// Hangs the detached leaf `child` on `side` of `parent`.
    pub(crate) fn link(&mut self, parent: Id, side: Side, child: Id) {
        match side {
            Side::Left => self.node_mut(parent).left = child,
            Side::Right => self.node_mut(parent).right = child,
        }
        self.node_mut(child).parent = parent;
    }

    pub(crate) fn rotate_left(&mut self, p: Id) -> Id {
        let r = self.node(p).right;
        debug_assert!(!r.is_nil(), "rotate_left needs right");
        let inner = self.node(r).left;
        let up = self.node(p).parent;

        self.node_mut(r).parent = up;
        self.node_mut(p).parent = r;
        self.node_mut(p).right = inner;
        self.node_mut(r).left = p;
        if !inner.is_nil() {
            self.node_mut(inner).parent = p;
        }

        self.update_height(p);
        self.update_height(r);
        r
    }

    pub(crate) fn rotate_right(&mut self, p: Id) -> Id {
        let l = self.node(p).left;
        debug_assert!(!l.is_nil(), "rotate_right needs left");
        let inner = self.node(l).right;
        let up = self.node(p).parent;

        self.node_mut(l).parent = up;
        self.node_mut(p).parent = l;
        self.node_mut(p).left = inner;
        self.node_mut(l).right = p;
        if !inner.is_nil() {
            self.node_mut(inner).parent = p;
        }

        self.update_height(p);
        self.update_height(l);
        l
    }

    pub(crate) fn rotate_left_right(&mut self, p: Id) -> Id {
        let l = self.node(p).left;
        let l = self.rotate_left(l);
        self.node_mut(p).left = l;
        self.rotate_right(p)
    }

    pub(crate) fn rotate_right_left(&mut self, p: Id) -> Id {
        let r = self.node(p).right;
        let r = self.rotate_right(r);
        self.node_mut(p).right = r;
        self.rotate_left(p)
    }

    /// Restores AVL balance on the path above a freshly linked leaf.
    ///
    /// At most one (single or double) rotation happens. Returns the new root
    /// when that rotation replaced the root of the whole tree.
    pub(crate) fn rebalance_after_insertion(&mut self, new: Id) -> Option<Id> {
        let mut p = self.node(new).parent;
        while !p.is_nil() {
            let (l, r) = {
                let np = self.node(p);
                (np.left, np.right)
            };
            let balance = self.height(l) - self.height(r);

            let sub = if balance == 2 {
                let nl = self.node(l);
                if self.height(nl.left) >= self.height(nl.right) {
                    self.rotate_right(p)
                } else {
                    self.rotate_left_right(p)
                }
            } else if balance == -2 {
                let nr = self.node(r);
                if self.height(nr.right) >= self.height(nr.left) {
                    self.rotate_left(p)
                } else {
                    self.rotate_right_left(p)
                }
            } else {
                self.update_height(p);
                p = self.node(p).parent;
                continue;
            };

            let g = self.node(sub).parent;
            if g.is_nil() {
                return Some(sub);
            }
            if self.node(g).left == p {
                self.node_mut(g).left = sub;
            } else {
                self.node_mut(g).right = sub;
            }
            self.update_height(g);
            return None;
        }
        None
    }

    /// Leftmost node below `x`, or `NIL` for an empty subtree.
    pub(crate) fn minimum(&self, mut x: Id) -> Id {
        if x.is_nil() {
            return x;
        }
        loop {
            let l = self.node(x).left;
            if l.is_nil() {
                return x;
            }
            x = l;
        }
    }

    pub(crate) fn successor(&self, mut x: Id) -> Id {
        let r = self.node(x).right;
        if !r.is_nil() {
            return self.minimum(r);
        }
        let mut p = self.node(x).parent;
        while !p.is_nil() && self.node(p).right == x {
            x = p;
            p = self.node(p).parent;
        }
        p
    }
}

#[cfg(test)]
impl<T> AvlArena<T> {
    /// Asserts BST order, parent links, stored heights and AVL balance of the
    /// tree rooted at `root`. Returns the number of nodes reached.
    pub(crate) fn assert_valid(&self, root: Id) -> usize {
        if root.is_nil() {
            return 0;
        }
        assert!(self.node(root).parent.is_nil(), "root has a parent");
        let mut count = 0;
        self.check_subtree(root, None, None, &mut count);
        count
    }

    fn check_subtree(&self, x: Id, lo: Option<i32>, hi: Option<i32>, count: &mut usize) -> i32 {
        if x.is_nil() {
            return -1;
        }
        *count += 1;
        let nx = self.node(x);
        if let Some(lo) = lo {
            assert!(nx.key > lo, "key {} not above {lo}", nx.key);
        }
        if let Some(hi) = hi {
            assert!(nx.key < hi, "key {} not below {hi}", nx.key);
        }
        for child in [nx.left, nx.right] {
            if !child.is_nil() {
                assert_eq!(self.node(child).parent, x, "broken parent link");
            }
        }
        let hl = self.check_subtree(nx.left, lo, Some(nx.key), count);
        let hr = self.check_subtree(nx.right, Some(nx.key), hi, count);
        assert_eq!(nx.height, 1 + hl.max(hr), "stale height at key {}", nx.key);
        assert!((hl - hr).abs() <= 1, "unbalanced at key {}", nx.key);
        nx.height
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn insert(arena: &mut AvlArena<()>, root: &mut Id, key: i32) -> bool {
        let mut comparisons = 0;
        match arena.search(*root, key, &mut comparisons) {
            Search::Found(_) => false,
            Search::Vacant { parent, side } => {
                let x = arena.alloc(key, ());
                if parent.is_nil() {
                    *root = x;
                } else {
                    arena.link(parent, side, x);
                    if let Some(new_root) = arena.rebalance_after_insertion(x) {
                        *root = new_root;
                    }
                }
                true
            }
        }
    }

    fn in_order(arena: &AvlArena<()>, root: Id) -> Vec<i32> {
        let mut out = Vec::new();
        let mut x = arena.minimum(root);
        while !x.is_nil() {
            out.push(arena.node(x).key);
            x = arena.successor(x);
        }
        out
    }

    fn build(keys: &[i32]) -> (AvlArena<()>, Id) {
        let mut arena = AvlArena::new();
        let mut root = Id::NIL;
        for &key in keys {
            insert(&mut arena, &mut root, key);
            arena.assert_valid(root);
        }
        (arena, root)
    }

    #[test]
    fn absent_height_is_minus_one() {
        let arena = AvlArena::<()>::new();
        assert_eq!(arena.height(Id::NIL), -1);
        assert_eq!(arena.minimum(Id::NIL), Id::NIL);
    }

    #[test]
    fn every_rotation_case_yields_middle_root() {
        for keys in [[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
            let (arena, root) = build(&keys);
            assert_eq!(arena.node(root).key, 2, "keys={keys:?}");
            assert_eq!(arena.node(root).height, 1);
            assert_eq!(in_order(&arena, root), vec![1, 2, 3]);
        }
    }

    #[test]
    fn rotation_below_root_reattaches_to_grandparent() {
        let (arena, root) = build(&[10, 5, 20, 30, 40]);
        assert_eq!(arena.node(root).key, 10);
        let right = arena.node(root).right;
        assert_eq!(arena.node(right).key, 30);
        assert_eq!(arena.node(right).parent, root);
        assert_eq!(arena.node(root).height, 2);
    }

    #[test]
    fn search_counts_visited_nodes() {
        let (arena, root) = build(&[2, 1, 3]);
        let mut comparisons = 0;
        assert!(matches!(arena.search(root, 3, &mut comparisons), Search::Found(_)));
        assert_eq!(comparisons, 2);

        comparisons = 0;
        let miss = arena.search(root, 4, &mut comparisons);
        assert_eq!(comparisons, 2);
        let Search::Vacant { parent, side } = miss else {
            panic!("4 should be absent");
        };
        assert_eq!(arena.node(parent).key, 3);
        assert_eq!(side, Side::Right);
    }

    #[test]
    fn ascending_run_stays_logarithmic() {
        let keys: Vec<i32> = (0..1024).collect();
        let (arena, root) = build(&keys);
        assert_eq!(arena.assert_valid(root), 1024);
        // the shortest possible tree over 1024 keys has height 10
        assert!(arena.height(root) <= 11);
        assert_eq!(in_order(&arena, root), keys);
    }

    #[test]
    fn random_inserts_keep_avl_shape() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut arena = AvlArena::new();
        let mut root = Id::NIL;
        let mut expected = Vec::new();
        for _ in 0..2000 {
            let key = rng.random_range(-500..=500);
            if insert(&mut arena, &mut root, key) {
                expected.push(key);
            }
            arena.assert_valid(root);
        }
        expected.sort_unstable();
        assert_eq!(arena.len(), expected.len());
        assert_eq!(in_order(&arena, root), expected);
    }
}
