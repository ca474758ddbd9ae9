//! Weighted graph abstraction consumed by the shortest-path algorithms
//!
//! The algorithms only need four queries: the vertex set, membership, the
//! out-neighbours of a vertex, and the weight of an edge. [`Graph`] is that
//! contract; [`AdjacencyGraph`] is a hash-map implementation of it.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as edge weights and path lengths.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero length.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// A weighted graph, directed or undirected
///
/// Implementations are read-only from the algorithms' point of view. Every
/// vertex returned by `neighbors` must also be listed by `vertices`.
pub trait Graph {
    /// Vertex identifier
    type Vertex: Clone + Eq + Hash + Ord + fmt::Debug;
    /// Edge weight, e.g. `u32` or `OrderedFloat<f64>`
    type Weight: Cost;

    /// All vertices of the graph
    fn vertices(&self) -> Vec<Self::Vertex>;

    /// Returns true if `v` is a vertex of the graph
    fn contains(&self, v: &Self::Vertex) -> bool;

    /// Out-neighbours of `u`; empty when `u` has none or is not in the graph
    fn neighbors(&self, u: &Self::Vertex) -> Vec<Self::Vertex>;

    /// Weight of the edge `u -> v`, or `None` if there is no such edge
    fn weight(&self, u: &Self::Vertex, v: &Self::Vertex) -> Option<Self::Weight>;

    /// Every edge as `(from, to, weight)`
    fn edges(&self) -> Vec<(Self::Vertex, Self::Vertex, Self::Weight)> {
        let mut edges = Vec::new();
        for u in self.vertices() {
            for v in self.neighbors(&u) {
                if let Some(w) = self.weight(&u, &v) {
                    edges.push((u.clone(), v, w));
                }
            }
        }
        edges
    }
}

/// Adjacency-map graph
///
/// Each vertex maps to its out-neighbours and their weights. An undirected
/// graph stores every edge as two arcs. Re-adding an existing edge replaces
/// its weight.
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::graph::{AdjacencyGraph, Graph};
///
/// let mut graph = AdjacencyGraph::undirected();
/// graph.add_edge('a', 'b', 3u32);
/// assert_eq!(graph.weight(&'b', &'a'), Some(3));
/// assert_eq!(graph.vertex_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyGraph<V, W> {
    outgoing: FxHashMap<V, FxHashMap<V, W>>,
    incoming: FxHashMap<V, FxHashSet<V>>,
    directed: bool,
    arcs: usize,
}

impl<V, W> AdjacencyGraph<V, W>
where
    V: Clone + Eq + Hash + Ord + fmt::Debug,
    W: Cost,
{
    /// Creates an empty graph
    pub fn new(directed: bool) -> Self {
        AdjacencyGraph {
            outgoing: FxHashMap::default(),
            incoming: FxHashMap::default(),
            directed,
            arcs: 0,
        }
    }

    /// Creates an empty directed graph
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty undirected graph
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Builds a graph from `(from, to, weight)` triples
    pub fn from_edges(directed: bool, edges: impl IntoIterator<Item = (V, V, W)>) -> Self {
        let mut graph = Self::new(directed);
        for (u, v, w) in edges {
            graph.add_edge(u, v, w);
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds an isolated vertex; returns false if it was already present
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.outgoing.contains_key(&v) {
            return false;
        }
        self.incoming.entry(v.clone()).or_default();
        self.outgoing.insert(v, FxHashMap::default());
        true
    }

    /// Adds the arc `u -> v` regardless of the graph's directedness
    pub fn add_directed_edge(&mut self, u: V, v: V, weight: W) {
        self.add_vertex(u.clone());
        self.add_vertex(v.clone());
        self.incoming.entry(v.clone()).or_default().insert(u.clone());
        if self.outgoing.entry(u).or_default().insert(v, weight).is_none() {
            self.arcs += 1;
        }
    }

    /// Adds the edge `u - v`; an undirected graph also gets `v -> u`
    pub fn add_edge(&mut self, u: V, v: V, weight: W) {
        if !self.directed && u != v {
            self.add_directed_edge(v.clone(), u.clone(), weight);
        }
        self.add_directed_edge(u, v, weight);
    }

    /// Vertices with an arc into `v`
    pub fn neighbors_incoming(&self, v: &V) -> Vec<V> {
        self.incoming
            .get(v)
            .map(|sources| sources.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of stored arcs; an undirected edge counts once per direction
    pub fn edge_count(&self) -> usize {
        self.arcs
    }
}

impl<V, W> Graph for AdjacencyGraph<V, W>
where
    V: Clone + Eq + Hash + Ord + fmt::Debug,
    W: Cost,
{
    type Vertex = V;
    type Weight = W;

    fn vertices(&self) -> Vec<V> {
        let mut vertices: Vec<V> = self.outgoing.keys().cloned().collect();
        vertices.sort();
        vertices
    }

    fn contains(&self, v: &V) -> bool {
        self.outgoing.contains_key(v)
    }

    fn neighbors(&self, u: &V) -> Vec<V> {
        self.outgoing
            .get(u)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn weight(&self, u: &V, v: &V) -> Option<W> {
        self.outgoing.get(u)?.get(v).copied()
    }
}
