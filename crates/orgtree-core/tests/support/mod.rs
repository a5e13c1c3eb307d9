//! Forest generators shared by the property tests of both crates.

#![allow(dead_code)]

use orgtree_core::{NodeId, NodeKind, OrgNode};
use proptest::prelude::*;

pub fn arb_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        Just(NodeKind::City),
        Just(NodeKind::Department),
        Just(NodeKind::Employee),
    ]
}

/// Acyclic forests of up to `max_len - 1` nodes: each node's parent, if any,
/// has a smaller id. Ids are shuffled in the output so nothing can rely on
/// input order.
pub fn arb_forest(max_len: usize) -> impl Strategy<Value = Vec<OrgNode>> {
    prop::collection::vec(
        (arb_kind(), any::<prop::sample::Index>(), any::<bool>()),
        1..max_len,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (kind, parent, is_root))| {
                let id = i as NodeId + 1;
                let parent_id = (i > 0 && !is_root).then(|| parent.index(i) as NodeId + 1);
                OrgNode::new(id, parent_id, format!("node-{id}"), kind)
            })
            .collect::<Vec<_>>()
    })
    .prop_shuffle()
}
