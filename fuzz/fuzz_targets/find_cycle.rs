#![no_main]

use arbor_core::SearchGraph;
use arbor_cycles::{Cycle, CycleFinder, CycleQuery, Parity};
use libfuzzer_sys::fuzz_target;
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

// Byte 0: flags (bit 0 directed, bit 1 shortest, bits 2-3 parity).
// Byte 1: vertex count (1..=32). Byte 2: target. Rest: edge endpoint pairs.
fuzz_target!(|data: &[u8]| {
    let [flags, count, target, rest @ ..] = data else {
        return;
    };
    let vertices = usize::from(*count % 32) + 1;
    let edges = rest
        .chunks_exact(2)
        .map(|pair| (u32::from(pair[0]) % vertices as u32, u32::from(pair[1]) % vertices as u32));

    let mut query = if flags & 0b10 == 0 {
        CycleQuery::any()
    } else {
        CycleQuery::shortest()
    };
    match (flags >> 2) & 0b11 {
        1 => query = query.with_parity(Parity::Odd),
        2 => query = query.with_parity(Parity::Even),
        _ => {}
    }
    if flags & 0b1_0000 != 0 {
        query = query.through(NodeIndex::new(usize::from(*target) % vertices));
    }

    if flags & 1 == 0 {
        let mut graph = UnGraph::<(), ()>::with_capacity(vertices, rest.len() / 2);
        for _ in 0..vertices {
            graph.add_node(());
        }
        graph.extend_with_edges(edges);
        check(&graph, &query);
    } else {
        let mut graph = DiGraph::<(), ()>::with_capacity(vertices, rest.len() / 2);
        for _ in 0..vertices {
            graph.add_node(());
        }
        graph.extend_with_edges(edges);
        check(&graph, &query);
    }
});

fn check<G: SearchGraph<Vertex = NodeIndex>>(graph: &G, query: &CycleQuery<NodeIndex>) {
    let finder = CycleFinder::new(graph);
    let found: Option<Cycle<NodeIndex>> = finder.find(query).expect("targets are in range");
    if let Some(cycle) = &found {
        assert!(cycle.is_valid(graph), "invalid cycle {cycle:?}");
        assert!(query.accepts(cycle.len()));
        if let Some(target) = query.target() {
            assert!(cycle.contains(&target));
        }
        assert!(finder.contains_cycle());
    }
    if query.parity().is_none() && query.target().is_none() {
        assert_eq!(found.is_some(), finder.contains_cycle());
    }
}
