use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;

use super::ordering::{NodeOrdering, NULL_NODE};
use crate::graph::visit::MatchGraph;

/// One solution of a matcher: a frozen copy of both cores, safe to keep
/// while the search carries on.
///
/// "Forward" lookups (`image`, `edge_image`) go from the pattern into the
/// host. The backward ones (`preimage`, `edge_preimage`) are total only for
/// isomorphisms; host vertices outside a subgraph match have no preimage.
pub struct Mapping<G1: MatchGraph, G2: MatchGraph> {
    host: Arc<NodeOrdering<G1>>,
    pattern: Arc<NodeOrdering<G2>>,
    core1: Vec<usize>,
    core2: Vec<usize>,
}

impl<G1: MatchGraph, G2: MatchGraph> Mapping<G1, G2> {
    pub(crate) fn new(
        host: Arc<NodeOrdering<G1>>,
        pattern: Arc<NodeOrdering<G2>>,
        core1: Vec<usize>,
        core2: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(core1.len(), host.node_count());
        debug_assert_eq!(core2.len(), pattern.node_count());
        Self {
            host,
            pattern,
            core1,
            core2,
        }
    }

    /// Number of mapped pattern vertices.
    pub fn len(&self) -> usize {
        self.core2.iter().filter(|&&h| h != NULL_NODE).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The host vertex a pattern vertex is mapped to.
    pub fn image(&self, pattern_node: G2::NodeId) -> Option<G1::NodeId> {
        let p = self.pattern.index_of(pattern_node)?;
        match self.core2[p] {
            NULL_NODE => None,
            h => Some(self.host.vertex(h)),
        }
    }

    /// The pattern vertex mapped onto a host vertex.
    pub fn preimage(&self, host_node: G1::NodeId) -> Option<G2::NodeId> {
        let h = self.host.index_of(host_node)?;
        match self.core1[h] {
            NULL_NODE => None,
            p => Some(self.pattern.vertex(p)),
        }
    }

    pub fn has_image(&self, pattern_node: G2::NodeId) -> bool {
        self.image(pattern_node).is_some()
    }

    pub fn has_preimage(&self, host_node: G1::NodeId) -> bool {
        self.preimage(host_node).is_some()
    }

    /// The host edge joining the images of a pattern edge's endpoints.
    pub fn edge_image(&self, pattern_edge: G2::EdgeId) -> Option<G1::EdgeId> {
        let (a, b) = self.pattern.graph().edge_endpoints(pattern_edge)?;
        let (a, b) = (self.image(a)?, self.image(b)?);
        self.host.graph().find_edge(a, b)
    }

    /// The pattern edge joining the preimages of a host edge's endpoints.
    pub fn edge_preimage(&self, host_edge: G1::EdgeId) -> Option<G2::EdgeId> {
        let (a, b) = self.host.graph().edge_endpoints(host_edge)?;
        let (a, b) = (self.preimage(a)?, self.preimage(b)?);
        self.pattern.graph().find_edge(a, b)
    }

    pub fn has_edge_image(&self, pattern_edge: G2::EdgeId) -> bool {
        self.edge_image(pattern_edge).is_some()
    }

    pub fn has_edge_preimage(&self, host_edge: G1::EdgeId) -> bool {
        self.edge_preimage(host_edge).is_some()
    }

    /// `(pattern, host)` pairs in the pattern graph's enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (G2::NodeId, G1::NodeId)> + '_ {
        self.pattern
            .graph()
            .node_identifiers()
            .filter_map(move |p| Some((p, self.image(p)?)))
    }

    pub fn to_index_map(&self) -> IndexMap<G2::NodeId, G1::NodeId> {
        self.iter().collect()
    }
}

impl<G1: MatchGraph, G2: MatchGraph> Clone for Mapping<G1, G2> {
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            pattern: Arc::clone(&self.pattern),
            core1: self.core1.clone(),
            core2: self.core2.clone(),
        }
    }
}

/// Equal when every pattern vertex has the same image. Agreement on the
/// preimages of host vertices is a different relation and is not used.
impl<G1: MatchGraph, G2: MatchGraph> PartialEq for Mapping<G1, G2> {
    fn eq(&self, other: &Self) -> bool {
        self.core2.len() == other.core2.len()
            && self.len() == other.len()
            && self.iter().all(|(p, h)| other.image(p) == Some(h))
    }
}

impl<G1: MatchGraph, G2: MatchGraph> Eq for Mapping<G1, G2> {}

impl<G1: MatchGraph, G2: MatchGraph> fmt::Display for Mapping<G1, G2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .format_with(", ", |(p, h), f| f(&format_args!("{p:?} -> {h:?}")))
        )
    }
}

impl<G1: MatchGraph, G2: MatchGraph> fmt::Debug for Mapping<G1, G2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
