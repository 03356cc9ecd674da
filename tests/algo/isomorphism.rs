use std::collections::HashSet;
use std::thread;

use graph_isomorphism::graph::algo::isomorphism::{
    is_isomorphism_matching, is_isomorphism_semantic_matching, isomorphism_matching_iter,
    isomorphism_semantic_matching_iter, GraphRole, IsomorphismError, Mapping, MatchMode,
    SearchStatus, Vf2Config, Vf2Matcher, Vf2MatcherBuilder,
};
use graph_isomorphism::graph::visit::MatchGraph;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::{Directed, Graph, Undirected};
use quickcheck::TestResult;
use rstest::{fixture, rstest};

use crate::common::*;

type UnGraph = Graph<(), (), Undirected>;
type DiGraph = Graph<(), (), Directed>;

fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

fn count<G1: MatchGraph, G2: MatchGraph>(host: G1, pattern: G2, mode: MatchMode) -> usize {
    init_logging();
    Vf2Matcher::new(host, pattern, mode.into())
        .unwrap()
        .mappings()
        .count()
}

/// Every pattern edge lands on a host edge and no two pattern vertices
/// share an image.
fn is_sound<G1: MatchGraph, G2: MatchGraph>(m: &Mapping<G1, G2>, pattern: G2) -> bool {
    let images: HashSet<_> = m.iter().map(|(_, h)| h).collect();
    images.len() == m.len() && pattern.edge_references().all(|(e, _, _)| m.has_edge_image(e))
}

fn edge_list<G: MatchGraph>(g: G) -> Vec<(G::EdgeId, G::NodeId, G::NodeId)> {
    g.edge_references().collect()
}

#[fixture]
fn triangle() -> UnGraph {
    UnGraph::from_edges([(0, 1), (1, 2), (2, 0)])
}

#[fixture]
fn path3() -> UnGraph {
    UnGraph::from_edges([(0, 1), (1, 2)])
}

#[rstest]
fn triangle_has_six_automorphisms(triangle: UnGraph) {
    assert_eq!(count(&triangle, &triangle, MatchMode::Isomorphism), 6);
    assert!(is_isomorphism_matching(&triangle, &triangle, false).unwrap());
}

#[rstest]
#[case::monomorphism(MatchMode::Subgraph, 6)]
#[case::induced(MatchMode::InducedSubgraph, 0)]
#[case::isomorphism(MatchMode::Isomorphism, 0)]
fn path_inside_triangle(
    triangle: UnGraph,
    path3: UnGraph,
    #[case] mode: MatchMode,
    #[case] expected: usize,
) {
    assert_eq!(count(&triangle, &path3, mode), expected);
}

#[rstest]
#[case::monomorphism(MatchMode::Subgraph, 16)]
#[case::induced(MatchMode::InducedSubgraph, 4)]
fn path_inside_square_with_chord(path3: UnGraph, #[case] mode: MatchMode, #[case] expected: usize) {
    let host = UnGraph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
    let found: Vec<_> = Vf2Matcher::new(&host, &path3, mode.into())
        .unwrap()
        .mappings()
        .collect();
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|m| is_sound(m, &path3)));
    if mode == MatchMode::InducedSubgraph {
        // the ends of an induced path are never adjacent in the host
        for m in &found {
            let (a, c) = (m.image(n(0)).unwrap(), m.image(n(2)).unwrap());
            assert!(host.find_edge(a, c).is_none());
        }
    }
}

#[rstest]
#[case::monomorphism(MatchMode::Subgraph, 8)]
#[case::induced(MatchMode::InducedSubgraph, 0)]
fn disconnected_pattern(#[case] mode: MatchMode, #[case] expected: usize) {
    let host = UnGraph::from_edges([(0, 1), (1, 2), (2, 3)]);
    let pattern = UnGraph::from_edges([(0, 1), (2, 3)]);
    assert_eq!(count(&host, &pattern, mode), expected);
}

#[test]
fn vertex_of_too_high_degree_never_fits() {
    let host = UnGraph::from_edges([(0, 1), (1, 2), (2, 3)]);
    let star = UnGraph::from_edges([(0, 1), (0, 2), (0, 3)]);
    assert!(!is_isomorphism_matching(&host, &star, true).unwrap());
}

#[test]
fn different_vertex_counts_skip_the_search() {
    let host = UnGraph::from_edges([(0, 1), (1, 2)]);
    let pattern = UnGraph::from_edges([(0, 1)]);
    let mut mappings = isomorphism_matching_iter(&host, &pattern, false).unwrap();
    assert_eq!(mappings.status(), SearchStatus::Exhausted);
    assert!(mappings.next().is_none());
    assert_eq!(mappings.explored_states(), 0);

    // swapped roles cannot be a subgraph either
    assert!(!is_isomorphism_matching(&pattern, &host, true).unwrap());
}

#[test]
fn empty_graphs_are_isomorphic() {
    let empty = UnGraph::default();
    let all: Vec<_> = isomorphism_matching_iter(&empty, &empty, false)
        .unwrap()
        .collect();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_empty());
}

#[rstest]
#[case::host(GraphRole::Host)]
#[case::pattern(GraphRole::Pattern)]
fn parallel_edges_are_rejected(#[case] role: GraphRole) {
    let multi = UnGraph::from_edges([(0, 1), (1, 0)]);
    let simple = UnGraph::from_edges([(0, 1)]);
    let result = match role {
        GraphRole::Host => Vf2Matcher::new(&multi, &simple, Vf2Config::default()).err(),
        GraphRole::Pattern => Vf2Matcher::new(&simple, &multi, Vf2Config::default()).err(),
    };
    match result {
        Some(IsomorphismError::UnsupportedTopology { role: r, .. }) => assert_eq!(r, role),
        other => panic!("expected a topology error, got {other:?}"),
    }
}

#[test]
fn antiparallel_directed_edges_are_fine() {
    let g = DiGraph::from_edges([(0, 1), (1, 0)]);
    assert_eq!(count(&g, &g, MatchMode::Isomorphism), 2);
}

#[test]
fn directedness_must_agree() {
    let directed = DiGraph::from_edges([(0, 1)]);
    let undirected = UnGraph::from_edges([(0, 1)]);
    let err = is_isomorphism_matching(&directed, &undirected, true).unwrap_err();
    assert_eq!(
        err,
        IsomorphismError::DirectednessMismatch {
            host_directed: true,
            pattern_directed: false,
        }
    );
    assert_eq!(
        err.to_string(),
        "cannot match a directed host graph against an undirected pattern graph"
    );
}

#[test]
fn directed_edges_keep_their_orientation() {
    let g = DiGraph::from_edges([(0, 1)]);
    let all: Vec<_> = isomorphism_matching_iter(&g, &g, false).unwrap().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].image(n(0)), Some(n(0)));

    // a directed path has no automorphism but the identity
    let chain = DiGraph::from_edges([(0, 1), (1, 2), (2, 3)]);
    assert_eq!(count(&chain, &chain, MatchMode::Isomorphism), 1);
    // a directed triangle only rotates
    let cycle = DiGraph::from_edges([(0, 1), (1, 2), (2, 0)]);
    assert_eq!(count(&cycle, &cycle, MatchMode::Isomorphism), 3);
}

#[rstest]
#[case::monomorphism(MatchMode::Subgraph, true)]
#[case::induced(MatchMode::InducedSubgraph, false)]
fn host_self_loops(#[case] mode: MatchMode, #[case] expected: bool) {
    let host = UnGraph::from_edges([(0, 0), (0, 1)]);
    let pattern = UnGraph::from_edges([(0, 1)]);
    let matcher = Vf2Matcher::new(&host, &pattern, mode.into()).unwrap();
    assert_eq!(matcher.isomorphism_exists(), expected);
}

#[test]
fn pattern_self_loop_needs_a_host_loop() {
    let host = UnGraph::from_edges([(0, 1), (1, 2)]);
    let pattern = UnGraph::from_edges([(0, 0), (0, 1)]);
    assert!(!is_isomorphism_matching(&host, &pattern, true).unwrap());

    let looped = UnGraph::from_edges([(0, 1), (1, 1), (1, 2)]);
    let all: Vec<_> = isomorphism_matching_iter(&looped, &pattern, true)
        .unwrap()
        .collect();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|m| m.image(n(0)) == Some(n(1))));
}

#[rstest]
#[case::petersen(ungraph().petersen_a(), ungraph().petersen_b(), true)]
#[case::full(ungraph().full_a(), ungraph().full_b(), true)]
#[case::praust(ungraph().praust_a(), ungraph().praust_b(), false)]
fn undirected_fixtures(#[case] a: UnGraph, #[case] b: UnGraph, #[case] expected: bool) {
    init_logging();
    assert_eq!(is_isomorphism_matching(&a, &b, false).unwrap(), expected);
    assert_eq!(is_isomorphism_matching(&b, &a, false).unwrap(), expected);
}

#[rstest]
#[case::petersen(digraph().petersen_a(), digraph().petersen_b(), true)]
#[case::full(digraph().full_a(), digraph().full_b(), true)]
#[case::praust(digraph().praust_a(), digraph().praust_b(), false)]
fn directed_fixtures(#[case] a: DiGraph, #[case] b: DiGraph, #[case] expected: bool) {
    init_logging();
    assert_eq!(is_isomorphism_matching(&a, &b, false).unwrap(), expected);
}

#[test]
fn petersen_mappings_are_sound() {
    let a = ungraph().petersen_a();
    let b = ungraph().petersen_b();
    // the Petersen graph has 120 automorphisms
    let all: Vec<_> = isomorphism_matching_iter(&a, &b, false).unwrap().collect();
    assert_eq!(all.len(), 120);
    assert!(all.iter().all(|m| is_sound(m, &b)));
    let distinct: HashSet<_> = all.iter().map(|m| m.to_string()).collect();
    assert_eq!(distinct.len(), 120);
}

#[test]
fn cached_and_live_adjacency_agree() {
    let a = ungraph().petersen_a();
    let b = path3();
    for mode in [MatchMode::Subgraph, MatchMode::InducedSubgraph] {
        let run = |cache_edges| -> Vec<String> {
            Vf2Matcher::new(&a, &b, Vf2Config::new(mode, cache_edges))
                .unwrap()
                .mappings()
                .map(|m| m.to_string())
                .collect()
        };
        assert_eq!(run(true), run(false));
    }
}

#[test]
fn enumeration_is_deterministic() {
    let a = ungraph().petersen_a();
    let b = triangle();
    let host = ungraph().full_a();
    let run = || -> Vec<String> {
        isomorphism_matching_iter(&host, &b, true)
            .unwrap()
            .map(|m| m.to_string())
            .collect()
    };
    assert_eq!(run(), run());
    // the Petersen graph has girth five
    assert!(!is_isomorphism_matching(&a, &b, true).unwrap());
}

#[test]
fn labels_restrict_vertices() {
    let mut host: Graph<char, u32, Undirected> = Graph::default();
    let a = host.add_node('a');
    let b = host.add_node('b');
    let c = host.add_node('c');
    host.add_edge(a, b, 1);
    host.add_edge(b, c, 2);
    host.add_edge(c, a, 3);

    let mut pattern: Graph<char, u32, Undirected> = Graph::default();
    let x = pattern.add_node('a');
    let y = pattern.add_node('b');
    let e = pattern.add_edge(x, y, 1);

    let all: Vec<_> = isomorphism_semantic_matching_iter(
        &host,
        &pattern,
        |p: &char, h: &char| p == h,
        |p: &u32, h: &u32| p == h,
        true,
    )
    .unwrap()
    .collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].image(x), Some(a));
    assert_eq!(all[0].image(y), Some(b));
    assert_eq!(all[0].edge_image(e), Some(EdgeIndex::new(0)));
    assert_eq!(all[0].edge_preimage(EdgeIndex::new(0)), Some(e));
    assert_eq!(all[0].preimage(c), None);

    // right labels, wrong edge weight
    assert!(!is_isomorphism_semantic_matching(
        &host,
        &pattern,
        |p: &char, h: &char| p == h,
        |p: &u32, h: &u32| p + 1 == *h,
        true,
    )
    .unwrap());
}

#[test]
fn comparators_see_pattern_weight_first() {
    let mut host: Graph<u32, (), Undirected> = Graph::default();
    let big = host.add_node(10);
    let small = host.add_node(1);
    host.add_edge(big, small, ());
    let mut pattern: Graph<u32, (), Undirected> = Graph::default();
    let p = pattern.add_node(5);

    // the pattern vertex only fits into a host vertex at least as large
    let matcher = Vf2MatcherBuilder::new(&host, &pattern)
        .mode(MatchMode::Subgraph)
        .node_matcher(|p: &u32, h: &u32| p <= h)
        .build()
        .unwrap();
    let all: Vec<_> = matcher.mappings().collect();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].image(p), Some(big));
}

#[test]
fn stable_graph_with_holes() {
    let mut host: StableGraph<(), (), Undirected> = StableGraph::default();
    let nodes: Vec<_> = (0..4).map(|_| host.add_node(())).collect();
    host.add_edge(nodes[1], nodes[2], ());
    host.add_edge(nodes[2], nodes[3], ());
    host.add_edge(nodes[3], nodes[1], ());
    host.add_edge(nodes[0], nodes[1], ());
    host.remove_node(nodes[0]);

    let tri = triangle();
    let all: Vec<_> = isomorphism_matching_iter(&host, &tri, false)
        .unwrap()
        .collect();
    assert_eq!(all.len(), 6);
    for m in &all {
        assert!(m.iter().all(|(_, h)| h != nodes[0]));
        assert!(is_sound(m, &tri));
    }
}

#[test]
fn clones_search_independently_across_threads() {
    let host = ungraph().petersen_a();
    let pattern = path3();
    let matcher = Vf2Matcher::new(&host, &pattern, Vf2Config::subgraph()).unwrap();
    let expected = matcher.clone().mappings().count();
    // 10 middle vertices, 3 neighbours each, ordered ends
    assert_eq!(expected, 60);

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let matcher = matcher.clone();
                s.spawn(move || matcher.mappings().count())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

#[test]
fn results_outlive_the_search() {
    let t = triangle();
    let mut mappings = isomorphism_matching_iter(&t, &t, false).unwrap();
    let first = mappings.next().unwrap();
    let snapshot = first.to_string();
    let rest: Vec<_> = mappings.by_ref().collect();
    assert_eq!(rest.len(), 5);
    assert!(mappings.next().is_none());
    assert_eq!(first.to_string(), snapshot);
    assert!(rest.iter().all(|m| *m != first));
}

fn prop_self_isomorphism(nodes: u8, pairs: Vec<(u8, u8)>) -> TestResult {
    let n = (nodes % 6) as usize + 1;
    let g = simple_ungraph(n, &pairs[..pairs.len().min(10)]);
    let mut mappings = isomorphism_matching_iter(&g, &g, false).unwrap();
    match mappings.next() {
        Some(m) => TestResult::from_bool(m.len() == n && is_sound(&m, &g)),
        None => TestResult::failed(),
    }
}

fn prop_relabelled_copy_is_isomorphic(nodes: u8, pairs: Vec<(u8, u8)>, shift: u8) -> TestResult {
    let n = (nodes % 6) as usize + 1;
    let g = simple_ungraph(n, &pairs[..pairs.len().min(10)]);
    let perm: Vec<_> = (0..n).map(|i| (i + shift as usize) % n).collect();
    let h = relabel(&g, &perm);
    TestResult::from_bool(is_isomorphism_matching(&h, &g, false).unwrap())
}

fn prop_subgraph_mappings_round_trip(
    host_pairs: Vec<(u8, u8)>,
    pattern_pairs: Vec<(u8, u8)>,
) -> TestResult {
    let host = simple_ungraph(5, &host_pairs[..host_pairs.len().min(8)]);
    let pattern = simple_ungraph(3, &pattern_pairs[..pattern_pairs.len().min(3)]);
    for mode in [MatchMode::Subgraph, MatchMode::InducedSubgraph] {
        let matcher = Vf2Matcher::new(&host, &pattern, mode.into()).unwrap();
        for m in matcher.mappings() {
            if !is_sound(&m, &pattern) {
                return TestResult::failed();
            }
            for (p, h) in m.iter() {
                if m.preimage(h) != Some(p) {
                    return TestResult::failed();
                }
            }
            if mode == MatchMode::InducedSubgraph
                && edge_list(&host)
                    .into_iter()
                    .filter(|&(_, a, b)| m.has_preimage(a) && m.has_preimage(b))
                    .any(|(e, _, _)| !m.has_edge_preimage(e))
            {
                return TestResult::failed();
            }
        }
    }
    TestResult::passed()
}

#[test]
fn quickcheck_self_isomorphism() {
    quickcheck::quickcheck(prop_self_isomorphism as fn(u8, Vec<(u8, u8)>) -> TestResult);
}

#[test]
fn quickcheck_relabelled_copy() {
    quickcheck::quickcheck(
        prop_relabelled_copy_is_isomorphic as fn(u8, Vec<(u8, u8)>, u8) -> TestResult,
    );
}

#[test]
fn quickcheck_subgraph_round_trip() {
    quickcheck::quickcheck(
        prop_subgraph_mappings_round_trip as fn(Vec<(u8, u8)>, Vec<(u8, u8)>) -> TestResult,
    );
}
