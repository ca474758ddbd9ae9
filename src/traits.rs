//! Common traits for name-indexed heaps
//!
//! Both heaps in this crate address their elements by *name* rather than by an
//! opaque handle: every element carries a unique name, and `decrease_key` takes
//! that name. This is the shape Dijkstra's algorithm wants, where the name is
//! the vertex itself.
//!
//! - [`NamedHeap`]: the shared priority-queue API
//! - [`HeapError`]: misuse errors reported by every implementation

use std::hash::Hash;
use thiserror::Error;

/// Error type for heap operations
///
/// All variants are programmer errors: the operation that reports one has
/// left the heap unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// An element with the same name is already in the heap
    #[error("an element with this name is already in the heap")]
    DuplicateName,
    /// No element with the given name is in the heap
    #[error("no element with this name is in the heap")]
    UnknownName,
    /// The new key is greater than the current key
    #[error("new key is greater than the current key")]
    KeyIncreased,
}

/// A min-priority queue whose elements are identified by unique names
///
/// Ties between equal keys are broken by name, smaller name first, so the
/// pop order of every implementation is fully determined by its contents.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::NamedHeap;
/// use fibonacci_sssp::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push("b", 20).unwrap();
/// heap.push("a", 10).unwrap();
/// heap.decrease_key(&"b", 5).unwrap();
///
/// assert_eq!(heap.get_min(), Some((&"b", &5)));
/// assert_eq!(heap.pop_min(), Some(("b", 5)));
/// assert_eq!(heap.pop_min(), Some(("a", 10)));
/// assert_eq!(heap.pop_min(), None);
/// ```
pub trait NamedHeap<N, K>
where
    N: Clone + Eq + Hash + Ord,
    K: Ord,
{
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Returns true if an element with this name is in the heap
    fn contains(&self, name: &N) -> bool;

    /// Returns the current key of the named element
    fn key_of(&self, name: &N) -> Option<&K>;

    /// Inserts a new element
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateName`] if `name` is already present; the
    /// heap is not modified.
    fn push(&mut self, name: N, key: K) -> Result<(), HeapError>;

    /// Returns the element with the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn get_min(&self) -> Option<(&N, &K)>;

    /// Removes and returns the element with the minimum key
    fn pop_min(&mut self) -> Option<(N, K)>;

    /// Lowers the key of the named element
    ///
    /// A `new_key` equal to the current key is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::UnknownName`] if no element has this name
    /// - [`HeapError::KeyIncreased`] if `new_key` is greater than the current key
    ///
    /// On error the heap is not modified.
    fn decrease_key(&mut self, name: &N, new_key: K) -> Result<(), HeapError>;
}

/// Returns true if `(key_a, name_a)` comes strictly before `(key_b, name_b)`
pub(crate) fn precedes<N: Ord, K: Ord>(key_a: &K, name_a: &N, key_b: &K, name_b: &N) -> bool {
    (key_a, name_a) < (key_b, name_b)
}
