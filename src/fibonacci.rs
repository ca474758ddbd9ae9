//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized push and decrease_key
//! - O(log n) amortized pop_min
//!
//! The structure is a forest of heap-ordered trees. Roots are kept in
//! *degree buckets* (degree → set of roots with that many children), and a
//! separate name index finds any element in O(1) expected time.
//!
//! `decrease_key` is lazy: it cuts nodes into the root list but never merges
//! trees. All consolidation is deferred to `pop_min`, which is where the cuts
//! are paid for.
//!
//! Nodes live in a [`slotmap`] arena. Children lists own the tree structure;
//! parent links are plain arena keys and are only used to walk up during cuts.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::fibonacci::FibonacciHeap;
//! use fibonacci_sssp::NamedHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let node = heap.insert("item", 5).unwrap();
//! heap.decrease_key(&"item", 1).unwrap();
//! assert_eq!(heap.get(node), Some((&"item", &1)));
//! assert_eq!(heap.get_min(), Some((&"item", &1)));
//! ```

use crate::traits::{precedes, HeapError, NamedHeap};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

new_key_type! {
    /// Handle to a node of a [`FibonacciHeap`]
    ///
    /// Handles are generational: once the element is popped the handle stops
    /// resolving, even if the arena slot is reused by a later push.
    pub struct NodeRef;
}

struct Node<N, K> {
    name: N,
    key: K,
    parent: Option<NodeRef>,
    children: SmallVec<[NodeRef; 4]>,
    lost_a_child: bool,
    /// Always equal to `children.len()`
    degree: usize,
}

/// Fibonacci Heap addressed by element name
///
/// Keys only ever decrease. On equal keys the smaller name is treated as the
/// smaller element, both for the reported minimum and when consolidation
/// decides which of two roots becomes the parent.
pub struct FibonacciHeap<N, K> {
    nodes: SlotMap<NodeRef, Node<N, K>>,
    index: FxHashMap<N, NodeRef>,
    roots: BTreeMap<usize, FxHashSet<NodeRef>>,
    min: Option<NodeRef>,
}

impl<N, K> NamedHeap<N, K> for FibonacciHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            index: FxHashMap::default(),
            roots: BTreeMap::new(),
            min: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn contains(&self, name: &N) -> bool {
        self.index.contains_key(name)
    }

    fn key_of(&self, name: &N) -> Option<&K> {
        self.index.get(name).map(|&id| &self.nodes[id].key)
    }

    fn push(&mut self, name: N, key: K) -> Result<(), HeapError> {
        self.insert(name, key).map(|_| ())
    }

    fn get_min(&self) -> Option<(&N, &K)> {
        self.min.map(|id| {
            let node = &self.nodes[id];
            (&node.name, &node.key)
        })
    }

    fn pop_min(&mut self) -> Option<(N, K)> {
        let id = self.min.take()?;
        self.remove_root(id);
        let node = self.nodes.remove(id)?;
        self.index.remove(&node.name);

        for &child in &node.children {
            self.add_root(child);
        }

        self.consolidate();
        self.rescan_min();
        Some((node.name, node.key))
    }

    fn decrease_key(&mut self, name: &N, new_key: K) -> Result<(), HeapError> {
        let id = *self.index.get(name).ok_or(HeapError::UnknownName)?;
        let node = &mut self.nodes[id];
        if new_key > node.key {
            return Err(HeapError::KeyIncreased);
        }
        node.key = new_key;

        let Some(parent) = node.parent else {
            self.offer_min(id);
            return Ok(());
        };

        if self.node_precedes(parent, id) {
            // Heap order still holds
            return Ok(());
        }

        self.cut(id, parent);
        self.cascading_cut(parent);
        Ok(())
    }
}

impl<N, K> FibonacciHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    /// Inserts a new element and returns a handle to its node
    ///
    /// This is [`NamedHeap::push`] with the node handle kept.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateName`] if `name` is already present.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn insert(&mut self, name: N, key: K) -> Result<NodeRef, HeapError> {
        if self.index.contains_key(&name) {
            return Err(HeapError::DuplicateName);
        }

        let id = self.nodes.insert(Node {
            name: name.clone(),
            key,
            parent: None,
            children: SmallVec::new(),
            lost_a_child: false,
            degree: 0,
        });
        self.index.insert(name, id);
        self.add_root(id);
        self.offer_min(id);
        Ok(id)
    }

    /// Resolves a node handle to its current name and key
    ///
    /// Returns `None` once the element has been popped.
    pub fn get(&self, node: NodeRef) -> Option<(&N, &K)> {
        self.nodes.get(node).map(|n| (&n.name, &n.key))
    }

    /// Number of trees in the root list
    pub fn root_count(&self) -> usize {
        self.roots.values().map(FxHashSet::len).sum()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.roots.clear();
        self.min = None;
    }

    /// Moves every element of `other` into this heap
    ///
    /// The trees of `other` join the root list as they are; nothing is
    /// consolidated until the next `pop_min`.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateName`] if the two heaps share a name.
    /// Neither heap is modified in that case.
    pub fn meld(&mut self, other: Self) -> Result<(), HeapError> {
        if other.index.keys().any(|name| self.index.contains_key(name)) {
            return Err(HeapError::DuplicateName);
        }

        let FibonacciHeap { nodes, roots, .. } = other;
        let mut remap: FxHashMap<NodeRef, NodeRef> = FxHashMap::default();
        remap.reserve(nodes.len());
        let mut moved = Vec::with_capacity(nodes.len());

        for (old, node) in nodes {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }

        for &id in &moved {
            let node = &mut self.nodes[id];
            node.parent = node.parent.map(|p| remap[&p]);
            for child in node.children.iter_mut() {
                *child = remap[&*child];
            }
            self.index.insert(node.name.clone(), id);
        }

        for old in roots.values().flatten() {
            let id = remap[old];
            self.add_root(id);
            self.offer_min(id);
        }

        debug!(moved = moved.len(), len = self.nodes.len(), "melded heaps");
        Ok(())
    }

    /// Checks every structural invariant of the heap
    ///
    /// - the name index and the arena agree
    /// - `degree == children.len()` and parent/child links are symmetric
    /// - every child comes after its parent in (key, name) order
    /// - exactly the roots sit in the degree buckets, under their own degree,
    ///   with no empty bucket and no marked root
    /// - `min` is the first root in (key, name) order
    pub fn verify_internal_structure(&self) -> bool {
        if self.index.len() != self.nodes.len() {
            return false;
        }

        let mut root_total = 0usize;
        for (id, node) in &self.nodes {
            if self.index.get(&node.name) != Some(&id) {
                return false;
            }
            if node.degree != node.children.len() {
                return false;
            }

            for &child in &node.children {
                let Some(c) = self.nodes.get(child) else {
                    return false;
                };
                if c.parent != Some(id) || precedes(&c.key, &c.name, &node.key, &node.name) {
                    return false;
                }
            }

            match node.parent {
                None => {
                    root_total += 1;
                    let bucketed = self
                        .roots
                        .get(&node.degree)
                        .is_some_and(|bucket| bucket.contains(&id));
                    if node.lost_a_child || !bucketed {
                        return false;
                    }
                }
                Some(parent) => match self.nodes.get(parent) {
                    Some(p) if p.children.contains(&id) => {}
                    _ => return false,
                },
            }
        }

        if self.roots.values().any(FxHashSet::is_empty) || self.root_count() != root_total {
            return false;
        }

        match self.min {
            None => self.nodes.is_empty(),
            Some(min) => {
                self.nodes.get(min).is_some_and(|n| n.parent.is_none())
                    && self
                        .roots
                        .values()
                        .flatten()
                        .all(|&id| !self.node_precedes(id, min))
            }
        }
    }

    fn node_precedes(&self, a: NodeRef, b: NodeRef) -> bool {
        let (a, b) = (&self.nodes[a], &self.nodes[b]);
        precedes(&a.key, &a.name, &b.key, &b.name)
    }

    fn offer_min(&mut self, id: NodeRef) {
        let better = match self.min {
            None => true,
            Some(current) => self.node_precedes(id, current),
        };
        if better {
            self.min = Some(id);
        }
    }

    fn rescan_min(&mut self) {
        self.min = self
            .roots
            .values()
            .flatten()
            .copied()
            .reduce(|best, id| if self.node_precedes(id, best) { id } else { best });
    }

    /// Puts a node into the root list under its current degree
    fn add_root(&mut self, id: NodeRef) {
        let node = &mut self.nodes[id];
        node.parent = None;
        node.lost_a_child = false;
        self.roots.entry(node.degree).or_default().insert(id);
    }

    fn remove_root(&mut self, id: NodeRef) {
        let degree = self.nodes[id].degree;
        if let Some(bucket) = self.roots.get_mut(&degree) {
            bucket.remove(&id);
            if bucket.is_empty() {
                self.roots.remove(&degree);
            }
        }
    }

    /// Removes two roots of the given degree from their bucket
    fn take_pair(&mut self, degree: usize) -> Option<(NodeRef, NodeRef)> {
        let bucket = self.roots.get_mut(&degree)?;
        let mut members = bucket.iter().copied();
        let (a, b) = (members.next()?, members.next()?);
        bucket.remove(&a);
        bucket.remove(&b);
        if bucket.is_empty() {
            self.roots.remove(&degree);
        }
        Some((a, b))
    }

    /// Links equal-degree roots until every bucket holds at most one tree
    fn consolidate(&mut self) {
        let roots_before = self.root_count();
        let mut links = 0usize;

        while let Some(degree) = self
            .roots
            .iter()
            .find(|(_, bucket)| bucket.len() >= 2)
            .map(|(&degree, _)| degree)
        {
            let Some((a, b)) = self.take_pair(degree) else {
                break;
            };
            let (parent, child) = if self.node_precedes(a, b) { (a, b) } else { (b, a) };
            self.link(child, parent);
            self.add_root(parent);
            links += 1;
        }

        debug!(
            roots_before,
            roots_after = self.root_count(),
            links,
            "consolidated root list"
        );
    }

    /// Makes `child` a child of `parent`; neither is in a bucket
    fn link(&mut self, child: NodeRef, parent: NodeRef) {
        let c = &mut self.nodes[child];
        c.parent = Some(parent);
        c.lost_a_child = false;

        let p = &mut self.nodes[parent];
        p.children.push(child);
        p.degree += 1;
    }

    /// Cuts `id` (with its subtree) from `parent` into the root list
    fn cut(&mut self, id: NodeRef, parent: NodeRef) {
        let parent_is_root = self.nodes[parent].parent.is_none();
        if parent_is_root {
            self.remove_root(parent);
        }

        let p = &mut self.nodes[parent];
        if let Some(pos) = p.children.iter().position(|&c| c == id) {
            p.children.swap_remove(pos);
            p.degree -= 1;
        }

        if parent_is_root {
            self.add_root(parent);
        }
        self.add_root(id);
        self.offer_min(id);
    }

    /// Walks up from a node that just lost a child
    fn cascading_cut(&mut self, mut current: NodeRef) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[current].parent {
            let node = &mut self.nodes[current];
            if !node.lost_a_child {
                node.lost_a_child = true;
                break;
            }
            self.cut(current, parent);
            cuts += 1;
            current = parent;
        }
        trace!(cuts, "cascading cut finished");
    }
}

impl<N, K> Default for FibonacciHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    fn default() -> Self {
        <Self as NamedHeap<N, K>>::new()
    }
}

impl<N: fmt::Debug, K: fmt::Debug> fmt::Debug for FibonacciHeap<N, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min.map(|id| {
            let node = &self.nodes[id];
            (&node.name, &node.key)
        });
        f.debug_struct("FibonacciHeap")
            .field("len", &self.nodes.len())
            .field("roots", &self.roots.values().map(FxHashSet::len).sum::<usize>())
            .field("min", &min)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pushes 0..=8 and pops 0, leaving one binomial tree of degree 3
    fn single_tree() -> FibonacciHeap<i32, i32> {
        let mut heap = FibonacciHeap::new();
        for i in 0..=8 {
            heap.push(i, i).unwrap();
        }
        assert_eq!(heap.pop_min(), Some((0, 0)));
        heap
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.push("a", 5).unwrap();
        heap.push("b", 3).unwrap();
        heap.push("c", 7).unwrap();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.get_min(), Some((&"b", &3)));

        assert_eq!(heap.pop_min(), Some(("b", 3)));
        assert_eq!(heap.get_min(), Some((&"a", &5)));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_empty_heap_sentinel() {
        let mut heap: FibonacciHeap<&str, i32> = FibonacciHeap::new();
        assert_eq!(heap.get_min(), None);
        assert_eq!(heap.pop_min(), None);
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        heap.push("a", 10).unwrap();
        heap.push("b", 20).unwrap();
        heap.push("c", 30).unwrap();

        assert_eq!(heap.get_min(), Some((&"a", &10)));

        heap.decrease_key(&"b", 5).unwrap();
        assert_eq!(heap.get_min(), Some((&"b", &5)));

        heap.decrease_key(&"c", 1).unwrap();
        assert_eq!(heap.get_min(), Some((&"c", &1)));
        assert_eq!(heap.key_of(&"a"), Some(&10));
    }

    #[test]
    fn test_decrease_key_errors_leave_heap_unchanged() {
        let mut heap = FibonacciHeap::new();
        heap.push("a", 10).unwrap();

        assert_eq!(heap.decrease_key(&"a", 11), Err(HeapError::KeyIncreased));
        assert_eq!(heap.decrease_key(&"zz", 1), Err(HeapError::UnknownName));
        assert_eq!(heap.key_of(&"a"), Some(&10));

        // Equal key is a valid no-op decrease
        assert_eq!(heap.decrease_key(&"a", 10), Ok(()));
        assert_eq!(heap.get_min(), Some((&"a", &10)));
    }

    #[test]
    fn test_duplicate_push_rejected() {
        let mut heap = FibonacciHeap::new();
        heap.push("a", 10).unwrap();
        heap.push("b", 4).unwrap();

        assert_eq!(heap.push("a", 1), Err(HeapError::DuplicateName));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.get_min(), Some((&"b", &4)));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_consolidation_builds_single_tree() {
        let heap = single_tree();
        assert_eq!(heap.root_count(), 1);
        let root = heap.min.unwrap();
        assert_eq!(heap.nodes[root].degree, 3);
        assert_eq!(heap.get_min(), Some((&1, &1)));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_decrease_key_is_lazy() {
        let mut heap = single_tree();
        heap.decrease_key(&8, -1).unwrap();

        // The cut node joins the root list; no trees are merged yet
        assert!(heap.root_count() >= 2);
        assert_eq!(heap.get_min(), Some((&8, &-1)));
        assert!(heap.verify_internal_structure());

        assert_eq!(heap.pop_min(), Some((8, -1)));
        assert_eq!(heap.root_count(), heap.roots.len());
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_decrease_without_violation_does_not_cut() {
        let mut heap = single_tree();
        // Lowering 8 to just above its parent keeps heap order
        let id = heap.index[&8];
        let parent = heap.nodes[id].parent.unwrap();
        let parent_key = heap.nodes[parent].key;

        heap.decrease_key(&8, parent_key + 1).unwrap();
        assert_eq!(heap.root_count(), 1);
        assert_eq!(heap.nodes[id].parent, Some(parent));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_cascading_cut() {
        let mut heap = single_tree();
        let root = heap.min.unwrap();
        let p = heap.nodes[root]
            .children
            .iter()
            .copied()
            .find(|&c| heap.nodes[c].children.len() >= 2)
            .unwrap();
        let p_name = heap.nodes[p].name;
        let kids: Vec<i32> = heap.nodes[p]
            .children
            .iter()
            .map(|&c| heap.nodes[c].name)
            .collect();

        heap.decrease_key(&kids[0], -10).unwrap();
        assert!(heap.nodes[p].lost_a_child);
        assert_eq!(heap.root_count(), 2);
        assert!(heap.verify_internal_structure());

        heap.decrease_key(&kids[1], -20).unwrap();
        // p had already lost a child, so it is cut too; the root stops the cascade
        assert_eq!(heap.nodes[p].parent, None);
        assert!(!heap.nodes[p].lost_a_child);
        assert_eq!(heap.root_count(), 4);
        assert_eq!(heap.nodes[root].degree, 2);
        assert_eq!(heap.get_min(), Some((&kids[1], &-20)));
        assert!(heap.contains(&p_name));
        assert!(heap.verify_internal_structure());

        let mut last = i32::MIN;
        while let Some((_, key)) = heap.pop_min() {
            assert!(key >= last);
            last = key;
            assert!(heap.verify_internal_structure());
        }
    }

    #[test]
    fn test_equal_keys_pop_by_name() {
        let mut heap = FibonacciHeap::new();
        for name in ["d", "b", "e", "a", "c"] {
            heap.push(name, 1).unwrap();
        }
        let order: Vec<&str> = std::iter::from_fn(|| heap.pop_min().map(|(n, _)| n)).collect();
        assert_eq!(order, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_handles_go_stale() {
        let mut heap = FibonacciHeap::new();
        let a = heap.insert("a", 1).unwrap();
        let b = heap.insert("b", 2).unwrap();
        assert_eq!(heap.get(a), Some((&"a", &1)));

        heap.pop_min();
        assert_eq!(heap.get(a), None);
        assert_eq!(heap.get(b), Some((&"b", &2)));
    }

    #[test]
    fn test_meld() {
        let mut heap1 = FibonacciHeap::new();
        heap1.push("a", 5).unwrap();
        heap1.push("b", 10).unwrap();
        heap1.push("x", 11).unwrap();
        heap1.pop_min();

        let mut heap2 = FibonacciHeap::new();
        heap2.push("c", 3).unwrap();
        heap2.push("d", 7).unwrap();
        heap2.push("e", 8).unwrap();
        heap2.pop_min();

        heap1.meld(heap2).unwrap();
        assert_eq!(heap1.len(), 4);
        assert_eq!(heap1.get_min(), Some((&"d", &7)));
        assert!(heap1.verify_internal_structure());

        heap1.decrease_key(&"e", 1).unwrap();
        let order: Vec<&str> = std::iter::from_fn(|| heap1.pop_min().map(|(n, _)| n)).collect();
        assert_eq!(order, vec!["e", "d", "b", "x"]);
    }

    #[test]
    fn test_meld_rejects_shared_names() {
        let mut heap1 = FibonacciHeap::new();
        heap1.push("a", 5).unwrap();
        let mut heap2 = FibonacciHeap::new();
        heap2.push("a", 1).unwrap();
        heap2.push("b", 2).unwrap();

        assert_eq!(heap1.meld(heap2), Err(HeapError::DuplicateName));
        assert_eq!(heap1.len(), 1);
        assert_eq!(heap1.get_min(), Some((&"a", &5)));
    }

    #[test]
    fn test_clear() {
        let mut heap = single_tree();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.root_count(), 0);
        heap.push(1, 1).unwrap();
        assert_eq!(heap.get_min(), Some((&1, &1)));
    }
}
