/*
 * dot.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * DOT emission for dependency graphs.
 */

//! DOT emission.
//!
//! Produces the Graphviz source of a graph with the status colors
//! applied: outline color on the node border, fill color as the
//! background, `box` shape for definitions, dashed arrows for proof
//! edges. Layout and transitive reduction are the renderer's concern;
//! this only emits the source the page embeds.

use std::fmt::Write;

use blueprint_depgraph::DepGraph;

use crate::color::ColorScheme;

/// Escape a string for use inside a double-quoted DOT identifier.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Emit the DOT source of `graph` with `colors` applied per node.
pub fn to_dot(graph: &DepGraph, colors: &ColorScheme) -> String {
    let mut out = String::new();
    out.push_str("digraph dependencies {\n");
    out.push_str("  node [style=filled];\n");

    for node in graph.nodes() {
        let mut attrs: Vec<String> = vec![format!("label=\"{}\"", escape(node.title()))];
        if node.kind.is_definition() {
            attrs.push("shape=box".to_string());
        }
        let outline = colors.outline_color(node);
        if !outline.is_empty() {
            attrs.push(format!("color=\"{}\"", escape(outline)));
        }
        let fill = colors.fill_color(node);
        if !fill.is_empty() {
            attrs.push(format!("fillcolor=\"{}\"", escape(fill)));
        } else {
            attrs.push("fillcolor=\"white\"".to_string());
        }
        let _ = writeln!(
            out,
            "  \"{}\" [{}];",
            escape(node.id.as_str()),
            attrs.join(", ")
        );
    }

    for (dependent, prerequisite) in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            escape(prerequisite.as_str()),
            escape(dependent.as_str())
        );
    }
    for (statement, proof) in graph.proof_edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [style=dashed];",
            escape(proof.as_str()),
            escape(statement.as_str())
        );
    }

    out.push_str("}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_depgraph::{Node, NodeId, NodeKind};

    #[test]
    fn test_dot_contains_nodes_and_edges() {
        let mut graph = DepGraph::new();
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        a.meta.uses = vec![NodeId::new("def:d")];
        graph.add_node(a);
        graph.add_node(Node::new("def:d", NodeKind::Definition));
        graph.rebuild_edges();

        let dot = to_dot(&graph, &ColorScheme::default());
        assert!(dot.starts_with("digraph dependencies {"));
        assert!(dot.contains("\"thm:a\""));
        assert!(dot.contains("\"def:d\" -> \"thm:a\";"));
        // Definitions are boxes
        assert!(dot.contains("shape=box"));
    }

    #[test]
    fn test_dot_applies_status_colors() {
        let mut graph = DepGraph::new();
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        a.meta.leanok = true;
        a.meta.proved = true;
        graph.add_node(a);

        let dot = to_dot(&graph, &ColorScheme::default());
        assert!(dot.contains("color=\"green\""));
        assert!(dot.contains("fillcolor=\"#9CEC8B\""));
    }

    #[test]
    fn test_dot_escapes_quotes_in_captions() {
        let mut graph = DepGraph::new();
        graph.add_node(Node::new("thm:q", NodeKind::Theorem).with_caption("the \"main\" result"));
        let dot = to_dot(&graph, &ColorScheme::default());
        assert!(dot.contains("label=\"the \\\"main\\\" result\""));
    }

    #[test]
    fn test_proof_edges_are_dashed() {
        let mut graph = DepGraph::new();
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        a.meta.proved_by = Some(NodeId::new("proof:a"));
        graph.add_node(a);
        graph.add_node(Node::new("proof:a", NodeKind::Theorem));
        graph.rebuild_edges();

        let dot = to_dot(&graph, &ColorScheme::default());
        assert!(dot.contains("\"proof:a\" -> \"thm:a\" [style=dashed];"));
    }
}
