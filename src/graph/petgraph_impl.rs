//! Graph collaborator impls for petgraph's `Graph` and `StableGraph`.
//!
//! Both are accessed through a shared reference, mirroring how petgraph itself
//! implements its `visit` traits.

use super::visit::{
    EdgeCount, EdgeFinder, GraphBase, GraphDataAccess, GraphProp, GraphRef, IntoEdgeReferences,
    IntoNeighborsDirected, IntoNodeIdentifiers, NodeCount,
};
use super::Direction;
use petgraph::graph::{self, EdgeIndex, IndexType, NodeIndex};
use petgraph::stable_graph::{self, StableGraph};
use petgraph::visit::{EdgeRef as PgEdgeRef, IntoEdgeReferences as PgIntoEdgeReferences};
use petgraph::{EdgeType, Graph};
use std::iter::Map;

type PgEdgeReference<G> = <G as PgIntoEdgeReferences>::EdgeRef;
type PgEdgeReferences<G> = <G as PgIntoEdgeReferences>::EdgeReferences;
type EdgeTriple<Ix> = (EdgeIndex<Ix>, NodeIndex<Ix>, NodeIndex<Ix>);

fn edge_triple<R: PgEdgeRef>(e: R) -> (R::EdgeId, R::NodeId, R::NodeId) {
    (e.id(), e.source(), e.target())
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphBase for &'a Graph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;
    type EdgeId = EdgeIndex<Ix>;
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphRef for &'a Graph<N, E, Ty, Ix> {}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoNodeIdentifiers for &'a Graph<N, E, Ty, Ix> {
    type NodeIdentifiers = graph::NodeIndices<Ix>;

    fn node_identifiers(self) -> Self::NodeIdentifiers {
        self.node_indices()
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoNeighborsDirected for &'a Graph<N, E, Ty, Ix> {
    type NeighborsDirected = graph::Neighbors<'a, E, Ix>;

    fn neighbors_directed(self, n: Self::NodeId, d: Direction) -> Self::NeighborsDirected {
        Graph::neighbors_directed(self, n, d.into())
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoEdgeReferences for &'a Graph<N, E, Ty, Ix> {
    type EdgeReferences = Map<PgEdgeReferences<Self>, fn(PgEdgeReference<Self>) -> EdgeTriple<Ix>>;

    fn edge_references(self) -> Self::EdgeReferences {
        let f: fn(PgEdgeReference<Self>) -> EdgeTriple<Ix> = edge_triple;
        PgIntoEdgeReferences::edge_references(self).map(f)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> EdgeFinder for &'a Graph<N, E, Ty, Ix> {
    fn find_edge(self, a: Self::NodeId, b: Self::NodeId) -> Option<Self::EdgeId> {
        Graph::find_edge(self, a, b)
    }

    fn edge_endpoints(self, e: Self::EdgeId) -> Option<(Self::NodeId, Self::NodeId)> {
        Graph::edge_endpoints(self, e)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> NodeCount for &'a Graph<N, E, Ty, Ix> {
    fn node_count(self) -> usize {
        Graph::node_count(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> EdgeCount for &'a Graph<N, E, Ty, Ix> {
    fn edge_count(self) -> usize {
        Graph::edge_count(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphProp for &'a Graph<N, E, Ty, Ix> {
    fn is_directed(self) -> bool {
        Graph::is_directed(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphDataAccess for &'a Graph<N, E, Ty, Ix> {
    type NodeWeight = &'a N;
    type EdgeWeight = &'a E;

    fn node_weight(self, n: Self::NodeId) -> Option<Self::NodeWeight> {
        Graph::node_weight(self, n)
    }

    fn edge_weight(self, e: Self::EdgeId) -> Option<Self::EdgeWeight> {
        Graph::edge_weight(self, e)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphBase for &'a StableGraph<N, E, Ty, Ix> {
    type NodeId = NodeIndex<Ix>;
    type EdgeId = EdgeIndex<Ix>;
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphRef for &'a StableGraph<N, E, Ty, Ix> {}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoNodeIdentifiers
    for &'a StableGraph<N, E, Ty, Ix>
{
    type NodeIdentifiers = stable_graph::NodeIndices<'a, N, Ix>;

    fn node_identifiers(self) -> Self::NodeIdentifiers {
        self.node_indices()
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoNeighborsDirected
    for &'a StableGraph<N, E, Ty, Ix>
{
    type NeighborsDirected = stable_graph::Neighbors<'a, E, Ix>;

    fn neighbors_directed(self, n: Self::NodeId, d: Direction) -> Self::NeighborsDirected {
        StableGraph::neighbors_directed(self, n, d.into())
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> IntoEdgeReferences
    for &'a StableGraph<N, E, Ty, Ix>
{
    type EdgeReferences = Map<PgEdgeReferences<Self>, fn(PgEdgeReference<Self>) -> EdgeTriple<Ix>>;

    fn edge_references(self) -> Self::EdgeReferences {
        let f: fn(PgEdgeReference<Self>) -> EdgeTriple<Ix> = edge_triple;
        PgIntoEdgeReferences::edge_references(self).map(f)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> EdgeFinder for &'a StableGraph<N, E, Ty, Ix> {
    fn find_edge(self, a: Self::NodeId, b: Self::NodeId) -> Option<Self::EdgeId> {
        StableGraph::find_edge(self, a, b)
    }

    fn edge_endpoints(self, e: Self::EdgeId) -> Option<(Self::NodeId, Self::NodeId)> {
        StableGraph::edge_endpoints(self, e)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> NodeCount for &'a StableGraph<N, E, Ty, Ix> {
    fn node_count(self) -> usize {
        StableGraph::node_count(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> EdgeCount for &'a StableGraph<N, E, Ty, Ix> {
    fn edge_count(self) -> usize {
        StableGraph::edge_count(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphProp for &'a StableGraph<N, E, Ty, Ix> {
    fn is_directed(self) -> bool {
        StableGraph::is_directed(self)
    }
}

impl<'a, N, E, Ty: EdgeType, Ix: IndexType> GraphDataAccess for &'a StableGraph<N, E, Ty, Ix> {
    type NodeWeight = &'a N;
    type EdgeWeight = &'a E;

    fn node_weight(self, n: Self::NodeId) -> Option<Self::NodeWeight> {
        StableGraph::node_weight(self, n)
    }

    fn edge_weight(self, e: Self::EdgeId) -> Option<Self::EdgeWeight> {
        StableGraph::edge_weight(self, e)
    }
}
