//! Indexed Binary Heap implementation
//!
//! A binary min-heap over `(key, name)` pairs plus a name → slot map, so
//! that `decrease_key` can find an element without searching. It implements
//! the same [`NamedHeap`] API as [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//! with worst-case rather than amortized bounds.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `push`         | O(log n)   |
//! | `pop_min`      | O(log n)   |
//! | `get_min`      | O(1)       |
//! | `decrease_key` | O(log n)   |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::NamedHeap;
//! use fibonacci_sssp::binary::IndexedBinaryHeap;
//!
//! let mut heap = IndexedBinaryHeap::new();
//! heap.push("three", 3).unwrap();
//! heap.push("one", 1).unwrap();
//! heap.push("two", 2).unwrap();
//! heap.decrease_key(&"three", 0).unwrap();
//!
//! assert_eq!(heap.pop_min(), Some(("three", 0)));
//! assert_eq!(heap.pop_min(), Some(("one", 1)));
//! assert_eq!(heap.pop_min(), Some(("two", 2)));
//! assert_eq!(heap.pop_min(), None);
//! ```

use crate::traits::{precedes, HeapError, NamedHeap};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// A binary min-heap addressed by element name
#[derive(Debug, Clone)]
pub struct IndexedBinaryHeap<N, K> {
    /// Heap-ordered `(key, name)` pairs
    data: Vec<(K, N)>,
    /// Slot of each name in `data`
    positions: FxHashMap<N, usize>,
}

impl<N, K> NamedHeap<N, K> for IndexedBinaryHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    fn new() -> Self {
        Self {
            data: Vec::new(),
            positions: FxHashMap::default(),
        }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, name: &N) -> bool {
        self.positions.contains_key(name)
    }

    fn key_of(&self, name: &N) -> Option<&K> {
        self.positions.get(name).map(|&slot| &self.data[slot].0)
    }

    fn push(&mut self, name: N, key: K) -> Result<(), HeapError> {
        if self.positions.contains_key(&name) {
            return Err(HeapError::DuplicateName);
        }
        let slot = self.data.len();
        self.positions.insert(name.clone(), slot);
        self.data.push((key, name));
        self.sift_up(slot);
        Ok(())
    }

    fn get_min(&self) -> Option<(&N, &K)> {
        self.data.first().map(|(k, n)| (n, k))
    }

    fn pop_min(&mut self) -> Option<(N, K)> {
        if self.data.is_empty() {
            return None;
        }

        let last = self.data.len() - 1;
        self.swap(0, last);
        let (key, name) = self.data.pop()?;
        self.positions.remove(&name);

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some((name, key))
    }

    fn decrease_key(&mut self, name: &N, new_key: K) -> Result<(), HeapError> {
        let slot = *self.positions.get(name).ok_or(HeapError::UnknownName)?;
        if new_key > self.data[slot].0 {
            return Err(HeapError::KeyIncreased);
        }
        self.data[slot].0 = new_key;
        self.sift_up(slot);
        Ok(())
    }
}

impl<N, K> IndexedBinaryHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    fn less(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.data[i], &self.data[j]);
        precedes(&a.0, &a.1, &b.0, &b.1)
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.data.swap(i, j);
        if let Some(slot) = self.positions.get_mut(&self.data[i].1) {
            *slot = i;
        }
        if let Some(slot) = self.positions.get_mut(&self.data[j].1) {
            *slot = j;
        }
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.less(index, parent) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<N, K> Default for IndexedBinaryHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    fn default() -> Self {
        <Self as NamedHeap<N, K>>::new()
    }
}
