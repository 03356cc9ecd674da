use std::fmt;

use thiserror::Error;

/// Which input of a matcher a construction error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphRole {
    /// The graph searched in (`G1`).
    Host,
    /// The graph searched for (`G2`).
    Pattern,
}

impl fmt::Display for GraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphRole::Host => f.write_str("host"),
            GraphRole::Pattern => f.write_str("pattern"),
        }
    }
}

/// Errors raised while building a matcher. The search itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsomorphismError {
    #[error("{role} graph has parallel edges between {from} and {to}, multigraphs are not supported")]
    UnsupportedTopology {
        role: GraphRole,
        from: String,
        to: String,
    },
    #[error("cannot match {} host graph against {} pattern graph", kind(.host_directed), kind(.pattern_directed))]
    DirectednessMismatch {
        host_directed: bool,
        pattern_directed: bool,
    },
}

fn kind(directed: &bool) -> &'static str {
    if *directed {
        "a directed"
    } else {
        "an undirected"
    }
}
