use std::iter::FusedIterator;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::{MatchMode, Vf2Config};
use super::error::{GraphRole, IsomorphismError};
use super::mapping::Mapping;
use super::ordering::NodeOrdering;
use super::semantic::{EdgeMatcher, NoSemanticMatch, NodeMatcher};
use super::state::{MatchState, Terminal};
use crate::graph::visit::{GraphDataAccess, MatchGraph};

/// A VF2 matcher of a pattern graph (`G2`) against a host graph (`G1`).
///
/// Both graphs are validated and indexed on construction, so a live matcher
/// can only run out of solutions, never fail. Call [`Vf2Matcher::mappings`]
/// to enumerate solutions lazily.
pub struct Vf2Matcher<G1, G2, NM = NoSemanticMatch, EM = NoSemanticMatch>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    host: Arc<NodeOrdering<G1>>,
    pattern: Arc<NodeOrdering<G2>>,
    config: Vf2Config,
    node_matcher: NM,
    edge_matcher: EM,
}

impl<G1, G2> Vf2Matcher<G1, G2>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    /// Structural matcher, every vertex and edge pair is equivalent.
    pub fn new(host: G1, pattern: G2, config: Vf2Config) -> Result<Self, IsomorphismError> {
        Self::with_matchers(host, pattern, config, NoSemanticMatch, NoSemanticMatch)
    }
}

impl<G1, G2, NM, EM> Vf2Matcher<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
    NM: NodeMatcher<G1, G2>,
    EM: EdgeMatcher<G1, G2>,
{
    pub fn with_matchers(
        host: G1,
        pattern: G2,
        config: Vf2Config,
        node_matcher: NM,
        edge_matcher: EM,
    ) -> Result<Self, IsomorphismError> {
        let (host_directed, pattern_directed) = (host.is_directed(), pattern.is_directed());
        if host_directed != pattern_directed {
            trace!(host_directed, pattern_directed, "rejecting mixed directedness");
            return Err(IsomorphismError::DirectednessMismatch {
                host_directed,
                pattern_directed,
            });
        }

        let host = NodeOrdering::new(host, GraphRole::Host, config.cache_edges)?;
        let pattern = NodeOrdering::new(pattern, GraphRole::Pattern, config.cache_edges)?;

        debug!(
            mode = ?config.mode,
            host_nodes = host.node_count(),
            host_edges = host.edge_count(),
            pattern_nodes = pattern.node_count(),
            pattern_edges = pattern.edge_count(),
            node_semantics = NM::enabled(),
            edge_semantics = EM::enabled(),
            "built vf2 matcher"
        );

        Ok(Self {
            host: Arc::new(host),
            pattern: Arc::new(pattern),
            config,
            node_matcher,
            edge_matcher,
        })
    }

    pub fn config(&self) -> Vf2Config {
        self.config
    }

    pub fn host_ordering(&self) -> &NodeOrdering<G1> {
        &self.host
    }

    pub fn pattern_ordering(&self) -> &NodeOrdering<G2> {
        &self.pattern
    }

    /// Start the search. The sequence cannot be rewound, build (or clone)
    /// another matcher to enumerate again.
    pub fn mappings(self) -> Mappings<G1, G2, NM, EM> {
        Mappings::new(self)
    }

    /// Whether at least one solution exists, stopping at the first one.
    pub fn isomorphism_exists(self) -> bool {
        self.mappings().next().is_some()
    }
}

impl<G1, G2, NM, EM> Clone for Vf2Matcher<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
    NM: Clone,
    EM: Clone,
{
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            pattern: Arc::clone(&self.pattern),
            config: self.config,
            node_matcher: self.node_matcher.clone(),
            edge_matcher: self.edge_matcher.clone(),
        }
    }
}

/// Fluent construction of a [`Vf2Matcher`].
pub struct Vf2MatcherBuilder<G1, G2, NM = NoSemanticMatch, EM = NoSemanticMatch> {
    host: G1,
    pattern: G2,
    config: Vf2Config,
    node_matcher: NM,
    edge_matcher: EM,
}

impl<G1, G2> Vf2MatcherBuilder<G1, G2>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    pub fn new(host: G1, pattern: G2) -> Self {
        Self {
            host,
            pattern,
            config: Vf2Config::default(),
            node_matcher: NoSemanticMatch,
            edge_matcher: NoSemanticMatch,
        }
    }
}

impl<G1, G2, NM, EM> Vf2MatcherBuilder<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    pub fn config(mut self, config: Vf2Config) -> Self {
        self.config = config;
        self
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn cache_edges(mut self, cache_edges: bool) -> Self {
        self.config.cache_edges = cache_edges;
        self
    }

    /// Vertex comparator, called with `(pattern weight, host weight)`.
    pub fn node_matcher<F>(self, node_matcher: F) -> Vf2MatcherBuilder<G1, G2, F, EM>
    where
        G1: GraphDataAccess,
        G2: GraphDataAccess,
        F: FnMut(G2::NodeWeight, G1::NodeWeight) -> bool,
    {
        Vf2MatcherBuilder {
            host: self.host,
            pattern: self.pattern,
            config: self.config,
            node_matcher,
            edge_matcher: self.edge_matcher,
        }
    }

    /// Edge comparator, called with `(pattern weight, host weight)`.
    pub fn edge_matcher<F>(self, edge_matcher: F) -> Vf2MatcherBuilder<G1, G2, NM, F>
    where
        G1: GraphDataAccess,
        G2: GraphDataAccess,
        F: FnMut(G2::EdgeWeight, G1::EdgeWeight) -> bool,
    {
        Vf2MatcherBuilder {
            host: self.host,
            pattern: self.pattern,
            config: self.config,
            node_matcher: self.node_matcher,
            edge_matcher,
        }
    }

    pub fn build(self) -> Result<Vf2Matcher<G1, G2, NM, EM>, IsomorphismError>
    where
        NM: NodeMatcher<G1, G2>,
        EM: EdgeMatcher<G1, G2>,
    {
        Vf2Matcher::with_matchers(
            self.host,
            self.pattern,
            self.config,
            self.node_matcher,
            self.edge_matcher,
        )
    }
}

/// Where the search driver stands between two calls to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    /// The state holds a solution that was handed out, the next step
    /// backtracks from it.
    Found,
    Exhausted,
}

/// Candidate cursor of one search depth.
#[derive(Debug, Clone, Copy)]
struct Frame {
    pattern_node: usize,
    terminal: Terminal,
    // next host index to try
    cursor: usize,
}

/// The lazy sequence of solutions of a [`Vf2Matcher`].
///
/// Depth-first backtracking over an explicit stack of frames, one per
/// mapped pattern vertex, so the search stops after every solution and
/// resumes where it left off.
pub struct Mappings<G1, G2, NM = NoSemanticMatch, EM = NoSemanticMatch>
where
    G1: MatchGraph,
    G2: MatchGraph,
{
    host: Arc<NodeOrdering<G1>>,
    pattern: Arc<NodeOrdering<G2>>,
    state: MatchState<G1, G2>,
    frames: Vec<Frame>,
    status: SearchStatus,
    node_matcher: NM,
    edge_matcher: EM,
    explored: usize,
    found: usize,
}

impl<G1, G2, NM, EM> Mappings<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
    NM: NodeMatcher<G1, G2>,
    EM: EdgeMatcher<G1, G2>,
{
    fn new(matcher: Vf2Matcher<G1, G2, NM, EM>) -> Self {
        let Vf2Matcher {
            host,
            pattern,
            config,
            node_matcher,
            edge_matcher,
        } = matcher;

        let state = MatchState::new(Arc::clone(&host), Arc::clone(&pattern), config.mode);
        let mut mappings = Self {
            frames: Vec::with_capacity(pattern.node_count()),
            host,
            pattern,
            state,
            status: SearchStatus::Searching,
            node_matcher,
            edge_matcher,
            explored: 0,
            found: 0,
        };
        if !mappings.counts_admit_solution(config.mode) {
            mappings.finish();
        }
        mappings
    }

    /// Necessary conditions checked before any state is explored.
    fn counts_admit_solution(&self, mode: MatchMode) -> bool {
        let (n1, n2) = (self.host.node_count(), self.pattern.node_count());
        let (e1, e2) = (self.host.edge_count(), self.pattern.edge_count());
        if n2 > n1 {
            return false;
        }
        match mode {
            MatchMode::Isomorphism => n1 == n2 && e1 == e2,
            MatchMode::Subgraph | MatchMode::InducedSubgraph => e2 <= e1,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of pairs pushed onto the state so far.
    pub fn explored_states(&self) -> usize {
        self.explored
    }

    pub fn solutions_found(&self) -> usize {
        self.found
    }

    fn finish(&mut self) {
        self.status = SearchStatus::Exhausted;
        self.state.reset();
        self.frames.clear();
        debug!(
            explored = self.explored,
            found = self.found,
            "vf2 search exhausted"
        );
    }

    fn snapshot(&self) -> Mapping<G1, G2> {
        Mapping::new(
            Arc::clone(&self.host),
            Arc::clone(&self.pattern),
            self.state.core1().to_vec(),
            self.state.core2().to_vec(),
        )
    }

    /// Undo the deepest pair, ending the search when nothing is left.
    fn backtrack(&mut self) -> bool {
        if self.state.pop().is_some() {
            true
        } else {
            self.finish();
            false
        }
    }
}

impl<G1, G2, NM, EM> Iterator for Mappings<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
    NM: NodeMatcher<G1, G2>,
    EM: EdgeMatcher<G1, G2>,
{
    type Item = Mapping<G1, G2>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.status {
                SearchStatus::Exhausted => return None,
                SearchStatus::Found => {
                    self.status = SearchStatus::Searching;
                    if !self.backtrack() {
                        return None;
                    }
                }
                SearchStatus::Searching => {
                    if self.state.is_complete() {
                        self.status = SearchStatus::Found;
                        self.found += 1;
                        let mapping = self.snapshot();
                        trace!(found = self.found, %mapping, "vf2 mapping found");
                        return Some(mapping);
                    }

                    let depth = self.state.depth();
                    if self.frames.len() == depth {
                        let Some((pattern_node, terminal)) = self.state.next_pattern_node() else {
                            self.finish();
                            return None;
                        };
                        self.frames.push(Frame {
                            pattern_node,
                            terminal,
                            cursor: 0,
                        });
                    }

                    let Frame {
                        pattern_node,
                        terminal,
                        mut cursor,
                    } = self.frames[depth];
                    let mut chosen = None;
                    while let Some(h) = self.state.next_host_candidate(terminal, cursor) {
                        cursor = h + 1;
                        if self.state.is_feasible(
                            pattern_node,
                            h,
                            &mut self.node_matcher,
                            &mut self.edge_matcher,
                        ) {
                            chosen = Some(h);
                            break;
                        }
                    }

                    match chosen {
                        Some(h) => {
                            self.frames[depth].cursor = cursor;
                            self.state.push(pattern_node, h);
                            self.explored += 1;
                        }
                        None => {
                            self.frames.pop();
                            if !self.backtrack() {
                                return None;
                            }
                        }
                    }
                }
            }
        }
    }
}

impl<G1, G2, NM, EM> FusedIterator for Mappings<G1, G2, NM, EM>
where
    G1: MatchGraph,
    G2: MatchGraph,
    NM: NodeMatcher<G1, G2>,
    EM: EdgeMatcher<G1, G2>,
{
}
