/*
 * status.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Status propagation over a blueprint dependency graph.
 */

//! Status propagation.
//!
//! Computes the derived formalization-readiness flags of every node in
//! a graph from its authored flags and its prerequisites:
//!
//! - `can_state`: every direct prerequisite has `leanok`, and the node
//!   is not marked `notready`
//! - `can_prove`: every prerequisite of the statement *and* of its
//!   proof has `leanok` (false when there is no proof node)
//! - `proved`: the proof node has `leanok`
//! - `fully_proved`: every ancestor, and the node itself, is `proved`
//!   or a definition
//!
//! The first three are computed for all nodes before any
//! `fully_proved`, which reads other nodes' `proved` values. A
//! reference to a node absent from the graph counts as flag-absent,
//! not as an error.
//!
//! The declaration documentation URLs are built in the same pass, one
//! `{dochome}/find/#doc/{decl}` link per attached declaration.

use blueprint_depgraph::{DepGraph, NodeId};

/// Documentation site used for declaration links when the document does
/// not set one.
pub const DEFAULT_DOCHOME: &str = "https://leanprover-community.github.io/mathlib4_docs";

fn leanok(graph: &DepGraph, id: &NodeId) -> bool {
    graph.get(id).map(|n| n.meta.leanok).unwrap_or(false)
}

/// Recompute all derived status flags and declaration URLs for `graph`.
///
/// Derived fields are overwritten from scratch; stale values from a
/// previous pass never survive.
pub fn propagate(graph: &mut DepGraph, dochome: &str) {
    let ids: Vec<NodeId> = graph.node_ids().cloned().collect();

    for id in &ids {
        let Some(node) = graph.get(id) else { continue };

        let lean_urls: Vec<(String, String)> = node
            .meta
            .lean_decls
            .iter()
            .map(|decl| (decl.clone(), format!("{dochome}/find/#doc/{decl}")))
            .collect();

        let can_state =
            node.meta.uses.iter().all(|u| leanok(graph, u)) && !node.meta.notready;

        let (can_prove, proved) = match node
            .meta
            .proved_by
            .as_ref()
            .and_then(|proof_id| graph.get(proof_id))
        {
            Some(proof) => {
                let can_prove = node
                    .meta
                    .uses
                    .iter()
                    .chain(proof.meta.uses.iter())
                    .all(|u| leanok(graph, u));
                (can_prove, proof.meta.leanok)
            }
            None => (false, false),
        };

        let Some(node) = graph.get_mut(id) else { continue };
        node.meta.lean_urls = lean_urls;
        node.meta.can_state = can_state;
        node.meta.can_prove = can_prove;
        node.meta.proved = proved;
    }

    // Second pass: fully_proved reads the proved flags set above.
    for id in &ids {
        let fully_proved = graph
            .ancestors(id)
            .iter()
            .chain(std::iter::once(id))
            .all(|m| {
                graph
                    .get(m)
                    .map(|n| n.meta.proved || n.kind.is_definition())
                    .unwrap_or(false)
            });
        if let Some(node) = graph.get_mut(id) {
            node.meta.fully_proved = fully_proved;
        }
    }

    tracing::debug!(nodes = ids.len(), "Propagated status flags");
}
