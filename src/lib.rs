//! Fibonacci Heap and Dijkstra's shortest paths
//!
//! This crate provides a name-indexed Fibonacci heap with lazy `decrease_key`,
//! and a single-source shortest-path engine that uses it.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized push and decrease_key; O(log n) amortized pop_min.
//!   Cuts are lazy, consolidation waits for the next pop_min
//! - **Indexed Binary Heap**: O(log n) push, pop_min and decrease_key behind the same API
//! - **Dijkstra**: O(V log V + E) single-source shortest paths with predecessor tree
//! - **Bellman-Ford**: O(V * E) reference algorithm with negative-cycle detection
//!
//! Enable the `serde` feature to serialize [`dijkstra::Distance`] and
//! [`dijkstra::ShortestPaths`].
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::dijkstra::{dijkstra, Distance};
//! use fibonacci_sssp::graph::AdjacencyGraph;
//!
//! let mut graph = AdjacencyGraph::directed();
//! graph.add_edge("A", "B", 10u32);
//! graph.add_edge("A", "C", 3);
//! graph.add_edge("C", "B", 4);
//!
//! let paths = dijkstra(&graph, &"A").unwrap();
//! assert_eq!(paths.distance(&"B"), Some(Distance::Finite(7)));
//! assert_eq!(paths.predecessor(&"B"), Some(&"C"));
//! ```

pub mod bellman_ford;
pub mod binary;
pub mod dijkstra;
pub mod fibonacci;
pub mod graph;
pub mod traits;

// Re-export the main types for convenience
pub use dijkstra::{dijkstra, Distance, PathError, ShortestPaths};
pub use fibonacci::FibonacciHeap;
pub use graph::{AdjacencyGraph, Graph};
pub use traits::{HeapError, NamedHeap};
