//! VF2 graph and subgraph isomorphism over petgraph graphs.

pub mod graph;

pub use graph::algo::isomorphism::{
    is_isomorphism_matching, is_isomorphism_semantic_matching, isomorphism_matching_iter,
    isomorphism_semantic_matching_iter, IsomorphismError, Mapping, Mappings, MatchMode,
    Vf2Config, Vf2Matcher, Vf2MatcherBuilder,
};
