use crate::graph::visit::{GraphBase, GraphDataAccess};

/// Vertex equivalence beyond structure. `G1` is the host, `G2` the pattern.
pub trait NodeMatcher<G1: GraphBase, G2: GraphBase> {
    /// `false` lets the matcher skip the comparison altogether.
    fn enabled() -> bool;

    fn eq(&mut self, g1: G1, g2: G2, host_node: G1::NodeId, pattern_node: G2::NodeId) -> bool;
}

/// Edge equivalence beyond structure, called once per pattern edge whose
/// endpoints are both mapped.
pub trait EdgeMatcher<G1: GraphBase, G2: GraphBase> {
    fn enabled() -> bool;

    fn eq(&mut self, g1: G1, g2: G2, host_edge: G1::EdgeId, pattern_edge: G2::EdgeId) -> bool;
}

/// Structural matching only, every pair of vertices or edges is equivalent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSemanticMatch;

impl<G1: GraphBase, G2: GraphBase> NodeMatcher<G1, G2> for NoSemanticMatch {
    #[inline]
    fn enabled() -> bool {
        false
    }

    #[inline]
    fn eq(&mut self, _g1: G1, _g2: G2, _: G1::NodeId, _: G2::NodeId) -> bool {
        true
    }
}

impl<G1: GraphBase, G2: GraphBase> EdgeMatcher<G1, G2> for NoSemanticMatch {
    #[inline]
    fn enabled() -> bool {
        false
    }

    #[inline]
    fn eq(&mut self, _g1: G1, _g2: G2, _: G1::EdgeId, _: G2::EdgeId) -> bool {
        true
    }
}

/// Closures compare weights as `(pattern, host)`.
impl<G1, G2, F> NodeMatcher<G1, G2> for F
where
    G1: GraphDataAccess,
    G2: GraphDataAccess,
    F: FnMut(G2::NodeWeight, G1::NodeWeight) -> bool,
{
    #[inline]
    fn enabled() -> bool {
        true
    }

    fn eq(&mut self, g1: G1, g2: G2, host_node: G1::NodeId, pattern_node: G2::NodeId) -> bool {
        if let (Some(p), Some(h)) = (g2.node_weight(pattern_node), g1.node_weight(host_node)) {
            self(p, h)
        } else {
            false
        }
    }
}

impl<G1, G2, F> EdgeMatcher<G1, G2> for F
where
    G1: GraphDataAccess,
    G2: GraphDataAccess,
    F: FnMut(G2::EdgeWeight, G1::EdgeWeight) -> bool,
{
    #[inline]
    fn enabled() -> bool {
        true
    }

    fn eq(&mut self, g1: G1, g2: G2, host_edge: G1::EdgeId, pattern_edge: G2::EdgeId) -> bool {
        if let (Some(p), Some(h)) = (g2.edge_weight(pattern_edge), g1.edge_weight(host_edge)) {
            self(p, h)
        } else {
            false
        }
    }
}
