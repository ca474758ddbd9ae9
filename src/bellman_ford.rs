//! Bellman-Ford single-source shortest paths.
//!
//! Slower than Dijkstra (O(V * E)) but correct with negative edge weights, so
//! it doubles as an independent oracle for checking Dijkstra's distances.
//!
//! - Initialise: `dist[source] = 0`, every other vertex `Infinite`
//! - Relax every edge, at most V - 1 rounds, stopping early once a round
//!   changes nothing
//! - One more pass: if any edge still relaxes, a negative cycle is reachable

use crate::dijkstra::{Distance, PathError};
use crate::graph::Graph;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Shortest distances from `source` to every vertex of `graph`
///
/// # Errors
/// - [`PathError::UnknownSource`] if `source` is not a vertex
/// - [`PathError::NegativeCycle`] if a negative-weight cycle is reachable
///   from `source`
///
/// # Example
///
/// ```rust
/// use fibonacci_sssp::bellman_ford::bellman_ford;
/// use fibonacci_sssp::dijkstra::Distance;
/// use fibonacci_sssp::graph::AdjacencyGraph;
///
/// let graph = AdjacencyGraph::from_edges(true, [(0, 1, 4i64), (0, 2, 1), (2, 1, -2)]);
/// let dist = bellman_ford(&graph, &0).unwrap();
/// assert_eq!(dist[&1], Distance::Finite(-1));
/// ```
pub fn bellman_ford<G: Graph>(
    graph: &G,
    source: &G::Vertex,
) -> Result<FxHashMap<G::Vertex, Distance<G::Weight>>, PathError> {
    if !graph.contains(source) {
        return Err(PathError::UnknownSource(format!("{source:?}")));
    }

    let vertices = graph.vertices();
    let edges = graph.edges();
    let mut dist: FxHashMap<G::Vertex, Distance<G::Weight>> = vertices
        .iter()
        .map(|v| (v.clone(), Distance::Infinite))
        .collect();
    dist.insert(source.clone(), Distance::zero());

    let rounds = vertices.len().saturating_sub(1);
    for round in 0..rounds {
        let mut updated = false;

        for (u, v, w) in &edges {
            let from = dist.get(u).copied().unwrap_or(Distance::Infinite);
            if !from.is_finite() {
                continue;
            }
            let candidate = from.extend(*w);
            if let Some(best) = dist.get_mut(v) {
                if candidate < *best {
                    *best = candidate;
                    updated = true;
                }
            }
        }

        if !updated {
            trace!(round, "bellman-ford converged");
            break;
        }
    }

    // V-th pass: negative cycle check
    for (u, v, w) in &edges {
        let from = dist.get(u).copied().unwrap_or(Distance::Infinite);
        if !from.is_finite() {
            continue;
        }
        let best = dist.get(v).copied().unwrap_or(Distance::Infinite);
        if from.extend(*w) < best {
            debug!(from = ?u, to = ?v, "negative cycle detected");
            return Err(PathError::NegativeCycle);
        }
    }

    Ok(dist)
}
