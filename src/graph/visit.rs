use fixedbitset::FixedBitSet;
use std::{fmt::Debug, hash::Hash};

use super::Direction;

pub trait GraphBase {
    type NodeId: Copy + Eq + Hash + Debug;
    type EdgeId: Copy + Eq + Debug;
}

pub trait GraphRef: Copy + GraphBase {}

pub trait IntoNodeIdentifiers: GraphRef {
    type NodeIdentifiers: Iterator<Item = Self::NodeId>;

    fn node_identifiers(self) -> Self::NodeIdentifiers;
}

/// For an undirected graph both directions yield every neighbor.
pub trait IntoNeighborsDirected: GraphRef {
    type NeighborsDirected: Iterator<Item = Self::NodeId>;

    fn neighbors_directed(self, n: Self::NodeId, d: Direction) -> Self::NeighborsDirected;
}

pub trait IntoEdgeReferences: GraphRef {
    /// `(edge, source, target)` triples
    type EdgeReferences: Iterator<Item = (Self::EdgeId, Self::NodeId, Self::NodeId)>;

    fn edge_references(self) -> Self::EdgeReferences;
}

pub trait EdgeFinder: GraphRef {
    /// Lookup the edge from `a` to `b`, either orientation for undirected graphs.
    fn find_edge(self, a: Self::NodeId, b: Self::NodeId) -> Option<Self::EdgeId>;

    fn edge_endpoints(self, e: Self::EdgeId) -> Option<(Self::NodeId, Self::NodeId)>;
}

pub trait NodeCount {
    fn node_count(self) -> usize;
}

pub trait EdgeCount {
    fn edge_count(self) -> usize;
}

pub trait GraphProp: GraphBase {
    fn is_directed(self) -> bool;
}

pub trait GraphDataAccess: GraphRef {
    type NodeWeight;
    type EdgeWeight;

    fn node_weight(self, n: Self::NodeId) -> Option<Self::NodeWeight>;

    fn edge_weight(self, e: Self::EdgeId) -> Option<Self::EdgeWeight>;
}

/// Everything the matcher needs from a graph.
pub trait MatchGraph:
    IntoNodeIdentifiers
    + IntoNeighborsDirected
    + IntoEdgeReferences
    + EdgeFinder
    + NodeCount
    + EdgeCount
    + GraphProp
{
}

impl<G> MatchGraph for G where
    G: IntoNodeIdentifiers
        + IntoNeighborsDirected
        + IntoEdgeReferences
        + EdgeFinder
        + NodeCount
        + EdgeCount
        + GraphProp
{
}

pub trait VisitMap<N> {
    fn visit(&mut self, n: N) -> bool;

    fn is_visit(&self, n: N) -> bool;
}

/// use `FixedBitSet` to record the visited node, save much memory space
impl VisitMap<usize> for FixedBitSet {
    fn is_visit(&self, n: usize) -> bool {
        self.contains(n)
    }

    fn visit(&mut self, n: usize) -> bool {
        !self.put(n)
    }
}
