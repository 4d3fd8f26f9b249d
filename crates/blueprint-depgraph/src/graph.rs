/*
 * graph.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Dependency graph with ancestor and induced-subgraph queries.
 */

//! The blueprint dependency graph.
//!
//! Edges point from a dependent node to a prerequisite ("uses")
//! node. Proof edges point from a statement to the node holding its
//! proof. The graph must be acyclic under the uses relation for
//! ancestor computation to be meaningful; the traversal itself uses a
//! visited set and terminates either way.
//!
//! Node and edge collections are insertion-ordered so exports are
//! deterministic.

use indexmap::{IndexMap, IndexSet};

use crate::node::{Node, NodeId};

/// A dependency graph for one section of a blueprint document.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    nodes: IndexMap<NodeId, Node>,
    /// `(dependent, prerequisite)` pairs.
    edges: IndexSet<(NodeId, NodeId)>,
    /// `(statement, proof)` pairs. At most one per statement.
    proof_edges: IndexSet<(NodeId, NodeId)>,
}

impl DepGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any node with the same identifier.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = &(NodeId, NodeId)> {
        self.edges.iter()
    }

    pub fn proof_edges(&self) -> impl Iterator<Item = &(NodeId, NodeId)> {
        self.proof_edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn proof_edge_count(&self) -> usize {
        self.proof_edges.len()
    }

    pub fn add_edge(&mut self, dependent: impl Into<NodeId>, prerequisite: impl Into<NodeId>) {
        self.edges.insert((dependent.into(), prerequisite.into()));
    }

    pub fn add_proof_edge(&mut self, statement: impl Into<NodeId>, proof: impl Into<NodeId>) {
        self.proof_edges.insert((statement.into(), proof.into()));
    }

    /// Rebuild the edge and proof-edge sets from node metadata.
    ///
    /// The `uses` and `proved_by` fields on node metadata are the source
    /// of truth; calling this after graph construction keeps the edge
    /// sets from drifting. References to nodes absent from the graph
    /// are kept (the annotation layer treats missing prerequisites as
    /// flag-absent, not as errors).
    pub fn rebuild_edges(&mut self) {
        self.edges.clear();
        self.proof_edges.clear();
        let pairs: Vec<(NodeId, Vec<NodeId>, Option<NodeId>)> = self
            .nodes
            .values()
            .map(|n| (n.id.clone(), n.meta.uses.clone(), n.meta.proved_by.clone()))
            .collect();
        for (id, uses, proved_by) in pairs {
            for prerequisite in uses {
                self.edges.insert((id.clone(), prerequisite));
            }
            if let Some(proof) = proved_by {
                self.proof_edges.insert((id.clone(), proof));
            }
        }
    }

    /// Direct prerequisites of a node, in edge insertion order.
    pub fn uses_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> {
        self.edges
            .iter()
            .filter(move |(dependent, _)| dependent == id)
            .map(|(_, prerequisite)| prerequisite)
    }

    /// The proof node of a statement, when one exists in the graph.
    pub fn proof_of(&self, id: &NodeId) -> Option<&Node> {
        let proof_id = self.nodes.get(id)?.meta.proved_by.as_ref()?;
        self.nodes.get(proof_id)
    }

    /// All nodes transitively reachable from `id` via the uses
    /// relation, excluding `id` itself.
    pub fn ancestors(&self, id: &NodeId) -> IndexSet<NodeId> {
        let mut seen: IndexSet<NodeId> = IndexSet::new();
        let mut stack: Vec<&NodeId> = self.uses_of(id).collect();
        while let Some(current) = stack.pop() {
            if seen.insert(current.clone()) {
                stack.extend(self.uses_of(current));
            }
        }
        seen
    }

    /// Induced subgraph of `id` and all its ancestors.
    ///
    /// Edge and proof-edge sets are restricted to pairs fully contained
    /// in the induced node set. Returns `None` when `id` is not in the
    /// graph.
    pub fn subgraph(&self, id: &NodeId) -> Option<DepGraph> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        let mut keep = self.ancestors(id);
        keep.insert(id.clone());

        let mut sub = DepGraph::new();
        for node in self.nodes.values() {
            if keep.contains(&node.id) {
                sub.add_node(node.clone());
            }
        }
        for (s, t) in &self.edges {
            if keep.contains(s) && keep.contains(t) {
                sub.edges.insert((s.clone(), t.clone()));
            }
        }
        for (s, t) in &self.proof_edges {
            if keep.contains(s) && keep.contains(t) {
                sub.proof_edges.insert((s.clone(), t.clone()));
            }
        }
        Some(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn node(id: &str, kind: NodeKind, uses: &[&str]) -> Node {
        let mut node = Node::new(id, kind);
        node.meta.uses = uses.iter().map(|u| NodeId::new(*u)).collect();
        node
    }

    /// A -> B -> C chain plus a proof node for A.
    fn chain_graph() -> DepGraph {
        let mut graph = DepGraph::new();
        graph.add_node(node("def:c", NodeKind::Definition, &[]));
        graph.add_node(node("lem:b", NodeKind::Lemma, &["def:c"]));
        let mut a = node("thm:a", NodeKind::Theorem, &["lem:b"]);
        a.meta.proved_by = Some(NodeId::new("proof:a"));
        graph.add_node(a);
        graph.add_node(node("proof:a", NodeKind::Theorem, &[]));
        graph.rebuild_edges();
        graph
    }

    #[test]
    fn test_rebuild_edges_from_meta() {
        let graph = chain_graph();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.proof_edge_count(), 1);
        assert!(graph.edges().any(|(s, t)| {
            s == &NodeId::new("thm:a") && t == &NodeId::new("lem:b")
        }));
    }

    #[test]
    fn test_ancestors_are_transitive() {
        let graph = chain_graph();
        let ancestors = graph.ancestors(&NodeId::new("thm:a"));
        assert!(ancestors.contains(&NodeId::new("lem:b")));
        assert!(ancestors.contains(&NodeId::new("def:c")));
        assert!(!ancestors.contains(&NodeId::new("thm:a")));
        assert_eq!(ancestors.len(), 2);
    }

    #[test]
    fn test_ancestors_of_leaf_is_empty() {
        let graph = chain_graph();
        assert!(graph.ancestors(&NodeId::new("def:c")).is_empty());
    }

    #[test]
    fn test_proof_of() {
        let graph = chain_graph();
        let proof = graph.proof_of(&NodeId::new("thm:a")).unwrap();
        assert_eq!(proof.id, NodeId::new("proof:a"));
        assert!(graph.proof_of(&NodeId::new("lem:b")).is_none());
    }

    #[test]
    fn test_subgraph_of_missing_node_is_none() {
        let graph = chain_graph();
        assert!(graph.subgraph(&NodeId::new("thm:absent")).is_none());
    }

    #[test]
    fn test_subgraph_of_leaf_is_single_node() {
        let graph = chain_graph();
        let sub = graph.subgraph(&NodeId::new("def:c")).unwrap();
        assert_eq!(sub.node_count(), 1);
        assert_eq!(sub.edge_count(), 0);
        assert_eq!(sub.proof_edge_count(), 0);
    }

    #[test]
    fn test_subgraph_restricts_edges_to_induced_set() {
        let graph = chain_graph();
        let sub = graph.subgraph(&NodeId::new("lem:b")).unwrap();
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 1);
        // proof:a is not an ancestor of lem:b, so its proof edge is gone
        assert_eq!(sub.proof_edge_count(), 0);
    }

    #[test]
    fn test_subgraph_keeps_proof_edges_inside_set() {
        let mut graph = chain_graph();
        // Make the proof an ancestor too so the proof edge survives
        graph.get_mut(&NodeId::new("thm:a")).unwrap().meta.uses.push(NodeId::new("proof:a"));
        graph.rebuild_edges();
        let sub = graph.subgraph(&NodeId::new("thm:a")).unwrap();
        assert_eq!(sub.proof_edge_count(), 1);
    }
}
