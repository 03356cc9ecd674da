use std::sync::Arc;

use super::config::MatchMode;
use super::ordering::{NodeOrdering, NULL_NODE};
use super::semantic::{EdgeMatcher, NodeMatcher};
use crate::graph::visit::MatchGraph;
use crate::graph::Direction;

const DIRECTED: [Direction; 2] = [Direction::Outgoing, Direction::Incoming];
const UNDIRECTED: [Direction; 1] = [Direction::Outgoing];

/// Search bookkeeping of one graph.
#[derive(Debug, Clone)]
struct GraphState {
    // index in this graph -> index in the other graph, NULL_NODE if unmapped
    core: Vec<usize>,
    // depth at which a vertex became a successor of the core, 0 if it is not
    outs: Vec<usize>,
    // depth at which a vertex became a predecessor of the core, 0 if it is not
    ins: Vec<usize>,
    outs_len: usize,
    ins_len: usize,
}

impl GraphState {
    fn new(node_count: usize) -> Self {
        Self {
            core: vec![NULL_NODE; node_count],
            outs: vec![0; node_count],
            ins: vec![0; node_count],
            outs_len: 0,
            ins_len: 0,
        }
    }

    #[inline]
    fn is_mapped(&self, n: usize) -> bool {
        self.core[n] != NULL_NODE
    }

    #[inline]
    fn terminal(&self, n: usize) -> Terminal {
        Terminal {
            out: self.outs[n] != 0,
            ins: self.ins[n] != 0,
        }
    }

    fn mark<G: MatchGraph>(&mut self, ordering: &NodeOrdering<G>, n: usize, depth: usize) {
        for m in ordering.neighbors_of(n, Direction::Outgoing) {
            if self.outs[m] == 0 {
                self.outs[m] = depth;
                self.outs_len += 1;
            }
        }
        if ordering.is_directed() {
            for m in ordering.neighbors_of(n, Direction::Incoming) {
                if self.ins[m] == 0 {
                    self.ins[m] = depth;
                    self.ins_len += 1;
                }
            }
        }
    }

    fn unmark<G: MatchGraph>(&mut self, ordering: &NodeOrdering<G>, n: usize, depth: usize) {
        for m in ordering.neighbors_of(n, Direction::Outgoing) {
            if self.outs[m] == depth {
                self.outs[m] = 0;
                self.outs_len -= 1;
            }
        }
        if ordering.is_directed() {
            for m in ordering.neighbors_of(n, Direction::Incoming) {
                if self.ins[m] == depth {
                    self.ins[m] = 0;
                    self.ins_len -= 1;
                }
            }
        }
    }
}

/// Membership of an unmapped vertex in the terminal sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Terminal {
    pub out: bool,
    pub ins: bool,
}

impl Terminal {
    fn covers(self, other: Terminal) -> bool {
        (self.out || !other.out) && (self.ins || !other.ins)
    }
}

/// Unmapped neighbors of a candidate vertex in one direction, split by
/// terminal set membership.
#[derive(Debug, Clone, Copy, Default)]
struct LookAhead {
    term_out: usize,
    term_in: usize,
    new: usize,
    total: usize,
}

impl LookAhead {
    #[inline]
    fn record(&mut self, t: Terminal) {
        self.total += 1;
        if t.out {
            self.term_out += 1;
        }
        if t.ins {
            self.term_in += 1;
        }
        if !t.out && !t.ins {
            self.new += 1;
        }
    }

    fn admits(&self, host: &LookAhead, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Isomorphism | MatchMode::InducedSubgraph => {
                mode.admits(self.term_out, host.term_out)
                    && mode.admits(self.term_in, host.term_in)
                    && mode.admits(self.new, host.new)
            }
            // images of pattern vertices outside the terminal sets may land
            // inside the host's, so only the totals bound the new ones
            MatchMode::Subgraph => {
                self.term_out <= host.term_out
                    && self.term_in <= host.term_in
                    && self.total <= host.total
            }
        }
    }
}

/// The partial mapping explored by the search together with the terminal
/// sets of both graphs.
///
/// `core1` lives in the host state and `core2` in the pattern state. For
/// every mapped pattern index `p`, `core1[core2[p]] == p`.
pub struct MatchState<G1: MatchGraph, G2: MatchGraph> {
    host_ordering: Arc<NodeOrdering<G1>>,
    pattern_ordering: Arc<NodeOrdering<G2>>,
    host: GraphState,
    pattern: GraphState,
    // (pattern, host) pairs in push order
    pairs: Vec<(usize, usize)>,
    mode: MatchMode,
}

impl<G1: MatchGraph, G2: MatchGraph> MatchState<G1, G2> {
    pub fn new(
        host_ordering: Arc<NodeOrdering<G1>>,
        pattern_ordering: Arc<NodeOrdering<G2>>,
        mode: MatchMode,
    ) -> Self {
        let host = GraphState::new(host_ordering.node_count());
        let pattern = GraphState::new(pattern_ordering.node_count());
        Self {
            pairs: Vec::with_capacity(pattern_ordering.node_count()),
            host_ordering,
            pattern_ordering,
            host,
            pattern,
            mode,
        }
    }

    /// Number of mapped pairs.
    pub fn depth(&self) -> usize {
        self.pairs.len()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_complete(&self) -> bool {
        self.depth() == self.pattern.core.len()
    }

    pub fn core1(&self) -> &[usize] {
        &self.host.core
    }

    pub fn core2(&self) -> &[usize] {
        &self.pattern.core
    }

    /// Sizes of the (out, in) terminal sets of the (host, pattern), mapped
    /// vertices included.
    pub fn terminal_sizes(&self) -> ((usize, usize), (usize, usize)) {
        (
            (self.host.outs_len, self.host.ins_len),
            (self.pattern.outs_len, self.pattern.ins_len),
        )
    }

    /// Extend the mapping with `pattern_idx -> host_idx`.
    pub fn push(&mut self, pattern_idx: usize, host_idx: usize) {
        debug_assert!(!self.pattern.is_mapped(pattern_idx) && !self.host.is_mapped(host_idx));
        self.pairs.push((pattern_idx, host_idx));
        let depth = self.pairs.len();
        self.pattern.core[pattern_idx] = host_idx;
        self.host.core[host_idx] = pattern_idx;
        self.pattern.mark(&self.pattern_ordering, pattern_idx, depth);
        self.host.mark(&self.host_ordering, host_idx, depth);
    }

    /// Undo the last `push`, returning its pair.
    pub fn pop(&mut self) -> Option<(usize, usize)> {
        let depth = self.pairs.len();
        let (pattern_idx, host_idx) = self.pairs.pop()?;
        self.pattern.unmark(&self.pattern_ordering, pattern_idx, depth);
        self.host.unmark(&self.host_ordering, host_idx, depth);
        self.pattern.core[pattern_idx] = NULL_NODE;
        self.host.core[host_idx] = NULL_NODE;
        Some((pattern_idx, host_idx))
    }

    /// Undo every `push`.
    pub fn reset(&mut self) {
        while self.pop().is_some() {}
    }

    /// The pattern vertex to extend next with the terminal sets it belongs
    /// to: the lowest index adjacent to the core, or the lowest unmapped
    /// index when no unmapped vertex touches the core.
    pub(crate) fn next_pattern_node(&self) -> Option<(usize, Terminal)> {
        let pattern = &self.pattern;
        (0..pattern.core.len())
            .filter(|&p| !pattern.is_mapped(p))
            .map(|p| (p, pattern.terminal(p)))
            .find(|(_, t)| t.out || t.ins)
            .or_else(|| {
                pattern
                    .core
                    .iter()
                    .position(|&h| h == NULL_NODE)
                    .map(|p| (p, Terminal::default()))
            })
    }

    /// The lowest unmapped host index `>= from` whose terminal set
    /// membership can accommodate a pattern vertex in `terminal`.
    pub(crate) fn next_host_candidate(&self, terminal: Terminal, from: usize) -> Option<usize> {
        let host = &self.host;
        (from..host.core.len()).find(|&h| {
            if host.is_mapped(h) {
                return false;
            }
            let t = host.terminal(h);
            match self.mode {
                MatchMode::Subgraph => t.covers(terminal),
                MatchMode::Isomorphism | MatchMode::InducedSubgraph => t == terminal,
            }
        })
    }

    /// Whether mapping `pattern_idx -> host_idx` can still lead to a solution.
    ///
    /// Checks, in order: degrees and self-loops, adjacency to the mapped
    /// core on the pattern side (and on the host side unless the mode is a
    /// plain monomorphism), the look-ahead counts over the terminal sets,
    /// then the vertex and edge comparators.
    pub fn is_feasible<NM, EM>(
        &self,
        pattern_idx: usize,
        host_idx: usize,
        node_matcher: &mut NM,
        edge_matcher: &mut EM,
    ) -> bool
    where
        NM: NodeMatcher<G1, G2>,
        EM: EdgeMatcher<G1, G2>,
    {
        let (g1, g2) = (&*self.host_ordering, &*self.pattern_ordering);
        let (p, h) = (pattern_idx, host_idx);
        let directions: &[Direction] = if g2.is_directed() {
            &DIRECTED
        } else {
            &UNDIRECTED
        };

        if directions
            .iter()
            .any(|&d| !self.mode.admits(g2.degree(p, d), g1.degree(h, d)))
        {
            return false;
        }

        let (p_loop, h_loop) = (g2.has_self_loop(p), g1.has_self_loop(h));
        if (p_loop && !h_loop) || (h_loop && !p_loop && self.mode.checks_host_edges()) {
            return false;
        }

        macro_rules! check_r_pred_succ {
            ($ordering:expr, $own:expr, $other_ordering:expr, $n:expr, $m:expr, $check_edges:expr) => {{
                let mut counts = [LookAhead::default(); 2];
                for &d in directions {
                    for n2 in $ordering.neighbors_of($n, d) {
                        if n2 == $n {
                            continue;
                        }
                        let m2 = $own.core[n2];
                        if m2 == NULL_NODE {
                            counts[usize::from(d)].record($own.terminal(n2));
                            continue;
                        }
                        if $check_edges {
                            let adjacent = match d {
                                Direction::Outgoing => $other_ordering.has_edge($m, m2),
                                Direction::Incoming => $other_ordering.has_edge(m2, $m),
                            };
                            if !adjacent {
                                return false;
                            }
                        }
                    }
                }
                counts
            }};
        }

        // every mapped pattern neighbor must be mirrored in the host
        let pattern_counts = check_r_pred_succ!(g2, self.pattern, g1, p, h, true);
        // and for an (induced) isomorphism the other way round as well
        let host_counts =
            check_r_pred_succ!(g1, self.host, g2, h, p, self.mode.checks_host_edges());

        if directions.iter().any(|&d| {
            let d: usize = d.into();
            !pattern_counts[d].admits(&host_counts[d], self.mode)
        }) {
            return false;
        }

        if NM::enabled() && !node_matcher.eq(g1.graph(), g2.graph(), g1.vertex(h), g2.vertex(p)) {
            return false;
        }

        if EM::enabled() {
            let mut edge_pairs = vec![];
            if p_loop {
                edge_pairs.push(((p, p), (h, h)));
            }
            for &d in directions {
                for p2 in g2.neighbors_of(p, d) {
                    let h2 = self.pattern.core[p2];
                    if p2 == p || h2 == NULL_NODE {
                        continue;
                    }
                    edge_pairs.push(match d {
                        Direction::Outgoing => ((p, p2), (h, h2)),
                        Direction::Incoming => ((p2, p), (h2, h)),
                    });
                }
            }
            for ((pa, pb), (ha, hb)) in edge_pairs {
                let (Some(pattern_edge), Some(host_edge)) =
                    (g2.edge_between(pa, pb), g1.edge_between(ha, hb))
                else {
                    return false;
                };
                if !edge_matcher.eq(g1.graph(), g2.graph(), host_edge, pattern_edge) {
                    return false;
                }
            }
        }

        true
    }
}
