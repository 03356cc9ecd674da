use std::collections::HashSet;

use fixedbitset::FixedBitSet;
use indexmap::IndexSet;
use itertools::Itertools;
use tracing::{debug, trace};

use super::error::{GraphRole, IsomorphismError};
use crate::graph::visit::{MatchGraph, VisitMap};
use crate::graph::Direction;

/// Index value meaning "not mapped", never a valid vertex index.
pub const NULL_NODE: usize = usize::MAX;

/// A fixed bijection between the vertices of a graph and `0..n`.
///
/// Indices follow a depth-first walk that always starts from, and descends
/// into, the most connected unvisited vertex first, so the search meets the
/// most constrained vertices early. Ties fall back to the graph's own
/// enumeration order, which keeps the assignment deterministic.
pub struct NodeOrdering<G: MatchGraph> {
    graph: G,
    nodes: IndexSet<G::NodeId>,
    directed: bool,
    edge_count: usize,
    // [outgoing, incoming], both identical for undirected graphs
    degrees: [Vec<usize>; 2],
    self_loops: FixedBitSet,
    // sorted search indices per direction, only with edge caching
    adjacency: Option<[Vec<Vec<usize>>; 2]>,
}

impl<G: MatchGraph> NodeOrdering<G> {
    /// Index `graph`, rejecting it when two edges join the same vertex pair.
    pub fn new(graph: G, role: GraphRole, cache_edges: bool) -> Result<Self, IsomorphismError> {
        let directed = graph.is_directed();
        let native: IndexSet<G::NodeId> = graph.node_identifiers().collect();
        let n = native.len();

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for (_, source, target) in graph.edge_references() {
            let (Some(s), Some(t)) = (native.get_index_of(&source), native.get_index_of(&target))
            else {
                continue;
            };
            let key = if directed || s <= t { (s, t) } else { (t, s) };
            if !seen.insert(key) {
                trace!(%role, ?source, ?target, "rejecting graph with parallel edges");
                return Err(IsomorphismError::UnsupportedTopology {
                    role,
                    from: format!("{source:?}"),
                    to: format!("{target:?}"),
                });
            }
            edges.push((s, t));
        }

        // undirected view of the graph, used to pick the search order
        let mut connections = vec![vec![]; n];
        for &(s, t) in edges.iter() {
            if s != t {
                connections[s].push(t);
                connections[t].push(s);
            }
        }
        for neighbors in connections.iter_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        let order = search_order(&connections);
        let mut position = vec![NULL_NODE; n];
        for (idx, &native_idx) in order.iter().enumerate() {
            position[native_idx] = idx;
        }
        let nodes: IndexSet<G::NodeId> = order.iter().map(|&i| native[i]).collect();

        let mut lists: [Vec<Vec<usize>>; 2] = [vec![vec![]; n], vec![vec![]; n]];
        let mut self_loops = FixedBitSet::with_capacity(n);
        for &(s, t) in edges.iter() {
            let (s, t) = (position[s], position[t]);
            if s == t {
                self_loops.insert(s);
            }
            if directed {
                lists[0][s].push(t);
                lists[1][t].push(s);
            } else {
                lists[0][s].push(t);
                if s != t {
                    lists[0][t].push(s);
                }
            }
        }
        if !directed {
            lists[1] = lists[0].clone();
        }
        for list in lists.iter_mut().flat_map(|l| l.iter_mut()) {
            list.sort_unstable();
        }

        let degrees = [
            lists[0].iter().map(Vec::len).collect(),
            lists[1].iter().map(Vec::len).collect(),
        ];

        debug!(
            %role,
            nodes = n,
            edges = edges.len(),
            directed,
            cache_edges,
            "built node ordering"
        );

        Ok(Self {
            graph,
            nodes,
            directed,
            edge_count: edges.len(),
            degrees,
            self_loops,
            adjacency: cache_edges.then_some(lists),
        })
    }

    pub fn graph(&self) -> G {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_cached(&self) -> bool {
        self.adjacency.is_some()
    }

    pub fn index_of(&self, n: G::NodeId) -> Option<usize> {
        self.nodes.get_index_of(&n)
    }

    pub fn vertex_at(&self, idx: usize) -> Option<G::NodeId> {
        self.nodes.get_index(idx).copied()
    }

    #[inline]
    pub(crate) fn vertex(&self, idx: usize) -> G::NodeId {
        self.nodes[idx]
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = G::NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Number of distinct neighbors of `idx` in direction `d`, a self-loop
    /// counts once.
    pub fn degree(&self, idx: usize, d: Direction) -> usize {
        self.degrees[usize::from(self.effective(d))][idx]
    }

    pub fn has_self_loop(&self, idx: usize) -> bool {
        self.self_loops.is_visit(idx)
    }

    /// Successors of `idx` for `Outgoing`, predecessors for `Incoming`. May
    /// repeat `idx` itself when it carries a self-loop and edges are not cached.
    pub fn neighbors_of(&self, idx: usize, d: Direction) -> Neighbors<'_, G> {
        let d = self.effective(d);
        match &self.adjacency {
            Some(lists) => Neighbors::Cached(lists[usize::from(d)][idx].iter()),
            None => Neighbors::Live {
                iter: self.graph.neighbors_directed(self.nodes[idx], d),
                nodes: &self.nodes,
            },
        }
    }

    /// Whether an edge leads from `a` to `b`, either way round when undirected.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        match &self.adjacency {
            Some(lists) => lists[0][a].binary_search(&b).is_ok(),
            None => self.edge_between(a, b).is_some(),
        }
    }

    pub fn edge_between(&self, a: usize, b: usize) -> Option<G::EdgeId> {
        let (a, b) = (self.vertex_at(a)?, self.vertex_at(b)?);
        self.graph.find_edge(a, b)
    }

    fn effective(&self, d: Direction) -> Direction {
        if self.directed {
            d
        } else {
            Direction::Outgoing
        }
    }
}

/// Depth-first order over `connections` (native positions), most connected
/// vertex first at every root and every branch.
fn search_order(connections: &[Vec<usize>]) -> Vec<usize> {
    let n = connections.len();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut order = Vec::with_capacity(n);
    let mut stack = Vec::new();

    let roots = (0..n).sorted_by_key(|&i| (std::cmp::Reverse(connections[i].len()), i));
    for root in roots {
        if visited.is_visit(root) {
            continue;
        }
        stack.push(root);
        while let Some(node) = stack.pop() {
            if !visited.visit(node) {
                continue;
            }
            order.push(node);
            // the last pushed is explored first
            stack.extend(
                connections[node]
                    .iter()
                    .copied()
                    .filter(|&m| !visited.is_visit(m))
                    .sorted_by_key(|&m| (connections[m].len(), std::cmp::Reverse(m))),
            );
        }
    }

    order
}

/// Neighbor indices of one vertex, see [`NodeOrdering::neighbors_of`].
pub enum Neighbors<'a, G: MatchGraph> {
    Cached(std::slice::Iter<'a, usize>),
    Live {
        iter: G::NeighborsDirected,
        nodes: &'a IndexSet<G::NodeId>,
    },
}

impl<'a, G: MatchGraph> Iterator for Neighbors<'a, G> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Neighbors::Cached(iter) => iter.next().copied(),
            Neighbors::Live { iter, nodes } => iter.find_map(|n| nodes.get_index_of(&n)),
        }
    }
}
