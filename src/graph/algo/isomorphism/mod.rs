//! VF2 graph and subgraph isomorphism.
//!
//! The host graph (`G1`) is searched for the pattern graph (`G2`); every
//! solution is a [`Mapping`] from pattern vertices onto host vertices.

mod config;
mod error;
mod mapping;
mod ordering;
mod semantic;
mod state;
mod vf2;

pub use config::{MatchMode, Vf2Config};
pub use error::{GraphRole, IsomorphismError};
pub use mapping::Mapping;
pub use ordering::{Neighbors, NodeOrdering, NULL_NODE};
pub use semantic::{EdgeMatcher, NoSemanticMatch, NodeMatcher};
pub use state::MatchState;
pub use vf2::{Mappings, SearchStatus, Vf2Matcher, Vf2MatcherBuilder};

use crate::graph::visit::{GraphDataAccess, MatchGraph};

fn mode_of(subgraph: bool) -> MatchMode {
    if subgraph {
        MatchMode::Subgraph
    } else {
        MatchMode::Isomorphism
    }
}

/// Return `true` if the graphs `g0` and `g1` are isomorphic or, with
/// `subgraph`, if `g1` is isomorphic to a (not necessarily induced)
/// subgraph of `g0`.
pub fn is_isomorphism_matching<G1, G2>(
    g0: G1,
    g1: G2,
    subgraph: bool,
) -> Result<bool, IsomorphismError>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    Ok(Vf2Matcher::new(g0, g1, Vf2Config::from(mode_of(subgraph)))?.isomorphism_exists())
}

/// Like [`is_isomorphism_matching`], also comparing weights with
/// `node_match` and `edge_match`, both called as `(g1 weight, g0 weight)`.
pub fn is_isomorphism_semantic_matching<G1, G2, NM, EM>(
    g0: G1,
    g1: G2,
    node_match: NM,
    edge_match: EM,
    subgraph: bool,
) -> Result<bool, IsomorphismError>
where
    G1: MatchGraph + GraphDataAccess,
    G2: MatchGraph + GraphDataAccess,
    NM: FnMut(G2::NodeWeight, G1::NodeWeight) -> bool,
    EM: FnMut(G2::EdgeWeight, G1::EdgeWeight) -> bool,
{
    Ok(isomorphism_semantic_matching_iter(g0, g1, node_match, edge_match, subgraph)?
        .next()
        .is_some())
}

/// Every isomorphism (or subgraph isomorphism) from `g1` into `g0`.
pub fn isomorphism_matching_iter<G1, G2>(
    g0: G1,
    g1: G2,
    subgraph: bool,
) -> Result<Mappings<G1, G2>, IsomorphismError>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    Ok(Vf2Matcher::new(g0, g1, Vf2Config::from(mode_of(subgraph)))?.mappings())
}

pub fn isomorphism_semantic_matching_iter<G1, G2, NM, EM>(
    g0: G1,
    g1: G2,
    node_match: NM,
    edge_match: EM,
    subgraph: bool,
) -> Result<Mappings<G1, G2, NM, EM>, IsomorphismError>
where
    G1: MatchGraph + GraphDataAccess,
    G2: MatchGraph + GraphDataAccess,
    NM: FnMut(G2::NodeWeight, G1::NodeWeight) -> bool,
    EM: FnMut(G2::EdgeWeight, G1::EdgeWeight) -> bool,
{
    let matcher = Vf2MatcherBuilder::new(g0, g1)
        .mode(mode_of(subgraph))
        .node_matcher(node_match)
        .edge_matcher(edge_match)
        .build()?;
    Ok(matcher.mappings())
}
