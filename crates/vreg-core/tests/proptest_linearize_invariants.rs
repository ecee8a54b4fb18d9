#![forbid(unsafe_code)]

//! Property tests for the chain linearizer.
//!
//! Validates:
//! - A chain built by successive connects linearizes to the concatenation
//!   of its fragments in chain order.
//! - Replacing the start anchor by an equivalent one appended at the end of
//!   the node list yields the same pattern.
//! - Traversal always terminates, whatever connections are present.

use proptest::prelude::*;

use vreg_core::linearize::{Linearizer, MIN_TRAVERSAL_LIMIT};
use vreg_core::{Graph, NodeId, Point, TokenKind, generate};

fn body_kind() -> impl Strategy<Value = TokenKind> {
    // Anything except the start anchor, so the chain head stays unambiguous.
    (1u8..TokenKind::COUNT as u8).prop_map(|o| TokenKind::from_ordinal(o).unwrap())
}

fn build_chain(head: TokenKind, body: &[TokenKind]) -> (Graph, Vec<NodeId>) {
    let mut g = Graph::new();
    let mut ids = vec![g.add_node(head, Point::ZERO).unwrap()];
    for (i, kind) in body.iter().enumerate() {
        let id = g.add_node(*kind, Point::new(160.0 * (i + 1) as f32, 0.0)).unwrap();
        g.connect(*ids.last().unwrap(), id);
        ids.push(id);
    }
    (g, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pattern_is_fragments_in_chain_order(body in prop::collection::vec(body_kind(), 0..40)) {
        let (g, _) = build_chain(TokenKind::StartAnchor, &body);
        let expected: String = std::iter::once("^")
            .chain(body.iter().map(|k| k.descriptor().fragment))
            .collect();
        prop_assert_eq!(generate(&g), expected);
    }

    #[test]
    fn replacing_start_anchor_preserves_pattern(body in prop::collection::vec(body_kind(), 1..30)) {
        let (mut g, ids) = build_chain(TokenKind::StartAnchor, &body);
        let before = generate(&g);

        g.remove_nodes_where(|n| n.id == ids[0]);
        let anchor = g.add_node(TokenKind::StartAnchor, Point::new(-160.0, 0.0)).unwrap();
        g.connect(anchor, ids[1]);

        prop_assert_eq!(generate(&g), before);
    }

    #[test]
    fn traversal_terminates_on_arbitrary_edges(
        kinds in prop::collection::vec(body_kind(), 1..20),
        edges in prop::collection::vec((0usize..20, 0usize..20), 0..60),
    ) {
        let mut g = Graph::new();
        let ids: Vec<_> = kinds.iter().map(|k| g.add_node(*k, Point::ZERO).unwrap()).collect();
        for (a, b) in edges {
            g.connect(ids[a % ids.len()], ids[b % ids.len()]);
        }
        let chain = Linearizer::new(MIN_TRAVERSAL_LIMIT).chain(&g);
        prop_assert!(chain.nodes.len() <= MIN_TRAVERSAL_LIMIT + 1);
        // Single outgoing edge per node: every visited node follows its predecessor's edge.
        for pair in chain.nodes.windows(2) {
            prop_assert_eq!(g.outgoing(pair[0]).map(|c| c.to), Some(pair[1]));
        }
    }
}
