//! Dijkstra's single-source shortest paths over a [`Graph`]
//!
//! Every vertex is pushed into a [`NamedHeap`] up front, keyed by its initial
//! distance (zero for the source, [`Distance::Infinite`] otherwise). Each
//! `pop_min` settles one vertex; improving a neighbour's distance is a single
//! `decrease_key`. With the Fibonacci heap this runs in O(V log V + E).
//!
//! Edge weights must be non-negative. Every edge the search examines is
//! checked and a negative one fails with [`PathError::NegativeWeight`].
//!
//! # Example
//!
//! ```rust
//! use fibonacci_sssp::dijkstra::{dijkstra, Distance};
//! use fibonacci_sssp::graph::AdjacencyGraph;
//!
//! let graph = AdjacencyGraph::from_edges(true, [('A', 'B', 4u32), ('A', 'C', 1), ('C', 'B', 2)]);
//! let paths = dijkstra(&graph, &'A').unwrap();
//!
//! assert_eq!(paths.distance(&'B'), Some(Distance::Finite(3)));
//! assert_eq!(paths.path_to(&'B'), Some(vec!['A', 'C', 'B']));
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::graph::{Cost, Graph};
use crate::traits::{HeapError, NamedHeap};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a path, or `Infinite` when there is none
///
/// Orders every finite distance before `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distance<W> {
    /// Length of a known path
    Finite(W),
    /// No path
    Infinite,
}

impl<W: Cost> Distance<W> {
    /// The distance of the source to itself
    pub fn zero() -> Self {
        Distance::Finite(W::default())
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// The finite length, if any
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(w) => Some(w),
            Distance::Infinite => None,
        }
    }

    /// This distance followed by an edge of weight `w`
    pub fn extend(self, w: W) -> Self {
        match self {
            Distance::Finite(d) => Distance::Finite(d + w),
            Distance::Infinite => Distance::Infinite,
        }
    }
}

impl<W> From<W> for Distance<W> {
    fn from(w: W) -> Self {
        Distance::Finite(w)
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{w}"),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Errors reported by the shortest-path algorithms
///
/// Vertices are rendered with their `Debug` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("source vertex {0} is not in the graph")]
    UnknownSource(String),
    #[error("vertex {0} is not in the graph")]
    NotInGraph(String),
    #[error("{to} is not adjacent to {from}")]
    NoSuchEdge { from: String, to: String },
    #[error("edge {from} -> {to} has a negative weight")]
    NegativeWeight { from: String, to: String },
    #[error("a negative-weight cycle is reachable from the source")]
    NegativeCycle,
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Result of a single-source search
///
/// Holds a distance and a predecessor entry for every vertex of the graph.
/// The source and unreachable vertices have no predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShortestPaths<V: Eq + Hash, W> {
    source: V,
    dist: FxHashMap<V, Distance<W>>,
    predecessor: FxHashMap<V, Option<V>>,
}

impl<V, W> ShortestPaths<V, W>
where
    V: Clone + Eq + Hash,
    W: Cost,
{
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Shortest distance from the source, `None` if `v` is not in the graph
    pub fn distance(&self, v: &V) -> Option<Distance<W>> {
        self.dist.get(v).copied()
    }

    /// The vertex before `v` on a shortest path
    pub fn predecessor(&self, v: &V) -> Option<&V> {
        self.predecessor.get(v)?.as_ref()
    }

    pub fn distances(&self) -> &FxHashMap<V, Distance<W>> {
        &self.dist
    }

    pub fn predecessors(&self) -> &FxHashMap<V, Option<V>> {
        &self.predecessor
    }

    /// Reachable vertices with their distances
    pub fn reachable(&self) -> impl Iterator<Item = (&V, W)> + '_ {
        self.dist.iter().filter_map(|(v, d)| d.finite().map(|w| (v, w)))
    }

    /// Vertices of a shortest path from the source to `target`, inclusive
    ///
    /// Returns `None` if `target` is unreachable or not in the graph.
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        if !self.dist.get(target)?.is_finite() {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev.clone());
            current = prev;
        }

        path.reverse();
        Some(path)
    }

    /// Splits into the distance map and the predecessor map
    pub fn into_parts(self) -> (FxHashMap<V, Distance<W>>, FxHashMap<V, Option<V>>) {
        (self.dist, self.predecessor)
    }
}

/// Relaxes the edge `u -> v`
///
/// If going through `u` shortens the best known path to `v`, updates
/// `dist[v]` and `predecessor[v]` and returns `true`.
///
/// # Errors
/// - [`PathError::NotInGraph`] if `u` is not a vertex
/// - [`PathError::NoSuchEdge`] if `v` is not adjacent to `u`
/// - [`PathError::NegativeWeight`] if the edge weight is below zero
pub fn relax<G: Graph>(
    graph: &G,
    u: &G::Vertex,
    v: &G::Vertex,
    dist: &mut FxHashMap<G::Vertex, Distance<G::Weight>>,
    predecessor: &mut FxHashMap<G::Vertex, Option<G::Vertex>>,
) -> Result<bool, PathError> {
    if !graph.contains(u) {
        return Err(PathError::NotInGraph(format!("{u:?}")));
    }
    let weight = graph.weight(u, v).ok_or_else(|| PathError::NoSuchEdge {
        from: format!("{u:?}"),
        to: format!("{v:?}"),
    })?;
    if weight < G::Weight::default() {
        return Err(PathError::NegativeWeight {
            from: format!("{u:?}"),
            to: format!("{v:?}"),
        });
    }

    let candidate = dist
        .get(u)
        .copied()
        .unwrap_or(Distance::Infinite)
        .extend(weight);
    let best = dist.entry(v.clone()).or_insert(Distance::Infinite);
    if candidate < *best {
        *best = candidate;
        predecessor.insert(v.clone(), Some(u.clone()));
        trace!(from = ?u, to = ?v, "relaxed edge");
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Runs Dijkstra's algorithm from `source` with a [`FibonacciHeap`]
///
/// # Errors
/// - [`PathError::UnknownSource`] if `source` is not a vertex
/// - [`PathError::NegativeWeight`] if a reachable edge has a negative weight
pub fn dijkstra<G: Graph>(
    graph: &G,
    source: &G::Vertex,
) -> Result<ShortestPaths<G::Vertex, G::Weight>, PathError> {
    dijkstra_with::<G, FibonacciHeap<_, _>>(graph, source)
}

/// Runs Dijkstra's algorithm from `source` with any [`NamedHeap`]
///
/// ```rust
/// use fibonacci_sssp::binary::IndexedBinaryHeap;
/// use fibonacci_sssp::dijkstra::{dijkstra_with, Distance};
/// use fibonacci_sssp::graph::AdjacencyGraph;
///
/// let graph = AdjacencyGraph::from_edges(false, [(0, 1, 2u64), (1, 2, 2)]);
/// let paths = dijkstra_with::<_, IndexedBinaryHeap<_, _>>(&graph, &0).unwrap();
/// assert_eq!(paths.distance(&2), Some(Distance::Finite(4)));
/// ```
pub fn dijkstra_with<G, H>(
    graph: &G,
    source: &G::Vertex,
) -> Result<ShortestPaths<G::Vertex, G::Weight>, PathError>
where
    G: Graph,
    H: NamedHeap<G::Vertex, Distance<G::Weight>>,
{
    search::<G, H>(graph, source, &Limits::default())
}

struct Limits<V, W> {
    max_distance: Option<W>,
    target: Option<V>,
}

impl<V, W> Default for Limits<V, W> {
    fn default() -> Self {
        Limits {
            max_distance: None,
            target: None,
        }
    }
}

fn search<G, H>(
    graph: &G,
    source: &G::Vertex,
    limits: &Limits<G::Vertex, G::Weight>,
) -> Result<ShortestPaths<G::Vertex, G::Weight>, PathError>
where
    G: Graph,
    H: NamedHeap<G::Vertex, Distance<G::Weight>>,
{
    if !graph.contains(source) {
        return Err(PathError::UnknownSource(format!("{source:?}")));
    }

    let vertices = graph.vertices();
    debug!(vertices = vertices.len(), source = ?source, "dijkstra started");

    let mut dist: FxHashMap<G::Vertex, Distance<G::Weight>> = FxHashMap::default();
    let mut predecessor: FxHashMap<G::Vertex, Option<G::Vertex>> = FxHashMap::default();
    dist.reserve(vertices.len());
    predecessor.reserve(vertices.len());

    let mut heap = H::new();
    for v in vertices {
        let initial = if &v == source {
            Distance::zero()
        } else {
            Distance::Infinite
        };
        dist.insert(v.clone(), initial);
        predecessor.insert(v.clone(), None);
        heap.push(v, initial)?;
    }

    let cutoff = limits.max_distance.map(Distance::Finite);
    let mut settled: FxHashSet<G::Vertex> = FxHashSet::default();

    while let Some((u, key)) = heap.pop_min() {
        if cutoff.is_some_and(|max| key > max) {
            debug!(settled = settled.len(), "distance limit reached");
            break;
        }
        settled.insert(u.clone());

        if limits.target.as_ref() == Some(&u) {
            debug!(target = ?u, "target settled");
            break;
        }
        if !key.is_finite() {
            // Everything left in the heap is unreachable
            continue;
        }

        for v in graph.neighbors(&u) {
            if settled.contains(&v) {
                continue;
            }
            if relax(graph, &u, &v, &mut dist, &mut predecessor)? {
                if let Some(&improved) = dist.get(&v) {
                    heap.decrease_key(&v, improved)?;
                }
            }
        }
    }

    if settled.len() < dist.len() {
        // Tentative distances of vertices the search stopped before are not final
        for (v, d) in dist.iter_mut() {
            if !settled.contains(v) {
                *d = Distance::Infinite;
                predecessor.insert(v.clone(), None);
            }
        }
    }

    debug!(settled = settled.len(), "dijkstra finished");
    Ok(ShortestPaths {
        source: source.clone(),
        dist,
        predecessor,
    })
}

/// Builder for shortest-path queries with more configuration options.
///
/// Vertices the search does not settle because of a limit are reported as
/// [`Distance::Infinite`] with no predecessor.
///
/// ```rust
/// use fibonacci_sssp::dijkstra::{DijkstraBuilder, Distance};
/// use fibonacci_sssp::graph::AdjacencyGraph;
///
/// let graph = AdjacencyGraph::from_edges(true, [(0, 1, 1u32), (1, 2, 1), (2, 3, 1)]);
/// let paths = DijkstraBuilder::new(0).max_distance(2).run(&graph).unwrap();
/// assert_eq!(paths.distance(&2), Some(Distance::Finite(2)));
/// assert_eq!(paths.distance(&3), Some(Distance::Infinite));
/// ```
pub struct DijkstraBuilder<V, W> {
    source: V,
    limits: Limits<V, W>,
}

impl<V, W> DijkstraBuilder<V, W>
where
    V: Clone + Eq + Hash + Ord + fmt::Debug,
    W: Cost,
{
    /// Creates a new builder starting from the given vertex.
    pub fn new(source: V) -> Self {
        DijkstraBuilder {
            source,
            limits: Limits::default(),
        }
    }

    /// Ignores vertices farther than `max` from the source.
    pub fn max_distance(mut self, max: W) -> Self {
        self.limits.max_distance = Some(max);
        self
    }

    /// Stops as soon as `target` is settled.
    pub fn target(mut self, target: V) -> Self {
        self.limits.target = Some(target);
        self
    }

    /// Runs the search with a [`FibonacciHeap`].
    pub fn run<G>(self, graph: &G) -> Result<ShortestPaths<V, W>, PathError>
    where
        G: Graph<Vertex = V, Weight = W>,
    {
        self.run_with::<G, FibonacciHeap<V, Distance<W>>>(graph)
    }

    /// Runs the search with the given heap type.
    pub fn run_with<G, H>(self, graph: &G) -> Result<ShortestPaths<V, W>, PathError>
    where
        G: Graph<Vertex = V, Weight = W>,
        H: NamedHeap<V, Distance<W>>,
    {
        search::<G, H>(graph, &self.source, &self.limits)
    }
}
