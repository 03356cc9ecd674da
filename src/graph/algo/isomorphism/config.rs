/// Which correspondence the matcher searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Bijective, adjacency preserved in both directions.
    #[default]
    Isomorphism,
    /// Injective pattern → host, every pattern edge present in the host.
    /// The host may have extra edges between mapped vertices (monomorphism).
    Subgraph,
    /// Like `Subgraph`, but host edges between mapped vertices must also be
    /// pattern edges.
    InducedSubgraph,
}

impl MatchMode {
    /// Whether host adjacency has to be reflected back onto the pattern.
    pub fn checks_host_edges(self) -> bool {
        !matches!(self, MatchMode::Subgraph)
    }

    pub fn is_subgraph(self) -> bool {
        !matches!(self, MatchMode::Isomorphism)
    }

    /// The counting prune of look-ahead: equal counts for an isomorphism,
    /// pattern bounded by host otherwise.
    #[inline]
    pub(crate) fn admits(self, pattern: usize, host: usize) -> bool {
        match self {
            MatchMode::Isomorphism => pattern == host,
            MatchMode::Subgraph | MatchMode::InducedSubgraph => pattern <= host,
        }
    }
}

/// Search configuration of a `Vf2Matcher`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vf2Config {
    pub mode: MatchMode,
    /// Keep per-vertex adjacency lists in the orderings instead of querying
    /// the graphs during search.
    pub cache_edges: bool,
}

impl Vf2Config {
    pub fn new(mode: MatchMode, cache_edges: bool) -> Self {
        Self { mode, cache_edges }
    }

    pub fn isomorphism() -> Self {
        Self::new(MatchMode::Isomorphism, true)
    }

    pub fn subgraph() -> Self {
        Self::new(MatchMode::Subgraph, true)
    }

    pub fn induced_subgraph() -> Self {
        Self::new(MatchMode::InducedSubgraph, true)
    }
}

impl Default for Vf2Config {
    fn default() -> Self {
        Self::isomorphism()
    }
}

impl From<MatchMode> for Vf2Config {
    fn from(mode: MatchMode) -> Self {
        Self::new(mode, true)
    }
}
