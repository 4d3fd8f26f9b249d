/*
 * subgraph.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Per-node dependency subgraph pages.
 */

//! Per-node subgraph pages.
//!
//! For every node with at least one prerequisite, writes one HTML page
//! showing the induced subgraph of the node and its ancestors: the DOT
//! source (rendered client-side), the color legend, and the node's
//! metadata links. Nodes whose induced subgraph is just themselves are
//! skipped.
//!
//! Generation is opt-in via `LEANBLUEPRINT_SUBGRAPH=1` and is never
//! fatal: an unwritable page is logged and dropped.

use std::fmt::Write as _;
use std::fs;

use blueprint_depgraph::{DepGraph, Node, NodeId};

use crate::document::{DepGraphSection, Document};
use crate::dot::to_dot;

/// Environment variable gating subgraph page generation.
pub const SUBGRAPH_ENV: &str = "LEANBLUEPRINT_SUBGRAPH";

/// Whether subgraph pages should be generated for this build.
pub fn subgraph_enabled() -> bool {
    std::env::var(SUBGRAPH_ENV).is_ok_and(|v| v == "1")
}

/// Node identifier with path- and anchor-hostile characters replaced.
pub fn sanitize_id(id: &NodeId) -> String {
    id.as_str().replace([':', '/'], "_")
}

/// File name of the subgraph page for a node.
pub fn subgraph_file_name(id: &NodeId) -> String {
    format!("subgraph_{}.html", sanitize_id(id))
}

fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Render the subgraph page for `node`.
pub fn render_subgraph_page(
    node: &Node,
    sub: &DepGraph,
    section: &DepGraphSection,
    doc: &Document,
) -> String {
    let title = format!("Dependencies of {}", node.title());
    let dot = to_dot(sub, &section.colors);

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\" />\n");
    let _ = writeln!(page, "<title>{}</title>", escape_html(&title));
    page.push_str("</head>\n<body>\n");
    let _ = writeln!(page, "<h1>{}</h1>", escape_html(&title));

    // DOT source, rendered client-side by the graph viewer.
    page.push_str("<div id=\"graph\"></div>\n");
    let _ = writeln!(
        page,
        "<script type=\"text/vnd.graphviz\" id=\"graph-source\">\n{dot}</script>"
    );

    if !section.legend.is_empty() {
        page.push_str("<dl class=\"legend\">\n");
        for entry in &section.legend {
            let _ = writeln!(page, "  <dt>{}</dt>", escape_html(&entry.label));
            // Legend descriptions carry markup (<em>) by design.
            let _ = writeln!(page, "  <dd>{}</dd>", entry.description);
        }
        page.push_str("</dl>\n");
    }

    let mut links = String::new();
    for (name, url) in &node.meta.lean_urls {
        let _ = writeln!(
            links,
            "  <li><a class=\"lean_decl\" href=\"{}\">{}</a></li>",
            escape_html(url),
            escape_html(name)
        );
    }
    if let (Some(github), Some(issue)) = (&doc.project.github, &node.meta.issue) {
        let _ = writeln!(
            links,
            "  <li><a class=\"issue_link\" href=\"{}/issues/{}\">Discussion</a></li>",
            escape_html(github),
            escape_html(issue)
        );
    }
    if !links.is_empty() {
        page.push_str("<ul class=\"links\">\n");
        page.push_str(&links);
        page.push_str("</ul>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

/// Write subgraph pages for every eligible node of every graph.
///
/// Returns the file names written. Failures are logged and skipped;
/// this never aborts the surrounding build.
pub fn write_subgraph_pages(doc: &Document) -> Vec<String> {
    let Some(section) = &doc.dep_graph else {
        return Vec::new();
    };

    let mut files = Vec::new();
    let mut total_nodes = 0;
    for graph in section.graphs.values() {
        total_nodes += graph.node_count();
        for node in graph.nodes() {
            let Some(sub) = graph.subgraph(&node.id) else {
                continue;
            };
            // Leaf nodes get no page.
            if sub.node_count() <= 1 {
                continue;
            }
            let file_name = subgraph_file_name(&node.id);
            let page = render_subgraph_page(node, &sub, section, doc);
            match fs::write(doc.out_dir.join(&file_name), page) {
                Ok(()) => files.push(file_name),
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Failed to write subgraph page");
                }
            }
        }
    }

    if !files.is_empty() {
        tracing::debug!(
            files = files.len(),
            graphs = section.graphs.len(),
            nodes = total_nodes,
            "Generated subgraph pages"
        );
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_depgraph::{DepGraph, NodeKind};

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id(&NodeId::new("thm:main")), "thm_main");
        assert_eq!(sanitize_id(&NodeId::new("ch1/thm:x")), "ch1_thm_x");
        assert_eq!(
            subgraph_file_name(&NodeId::new("thm:main")),
            "subgraph_thm_main.html"
        );
    }

    #[test]
    fn test_page_contains_dot_legend_and_links() {
        let mut doc = Document::new("/tmp/out");
        doc.project.github = Some("https://github.com/org/proj".to_string());

        let mut graph = DepGraph::new();
        graph.add_node(Node::new("def:d", NodeKind::Definition));
        let mut a = Node::new("thm:a", NodeKind::Theorem).with_caption("Main result");
        a.meta.uses = vec![NodeId::new("def:d")];
        a.meta.issue = Some("42".to_string());
        a.meta.lean_urls = vec![(
            "Foo.bar".to_string(),
            "https://docs.example.org/find/#doc/Foo.bar".to_string(),
        )];
        graph.add_node(a.clone());
        graph.rebuild_edges();

        let section = {
            doc.add_graph("sect0001", graph.clone());
            let section = doc.dep_graph_mut();
            section.legend = section.colors.legend_entries();
            section.clone()
        };

        let sub = graph.subgraph(&NodeId::new("thm:a")).unwrap();
        let page = render_subgraph_page(&a, &sub, &section, &doc);

        assert!(page.contains("<title>Dependencies of Main result</title>"));
        assert!(page.contains("digraph dependencies {"));
        assert!(page.contains("class=\"legend\""));
        assert!(page.contains("https://docs.example.org/find/#doc/Foo.bar"));
        assert!(page.contains("https://github.com/org/proj/issues/42"));
    }

    #[test]
    fn test_write_skips_leaf_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new(dir.path());

        let mut graph = DepGraph::new();
        graph.add_node(Node::new("def:d", NodeKind::Definition));
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        a.meta.uses = vec![NodeId::new("def:d")];
        graph.add_node(a);
        graph.rebuild_edges();
        doc.add_graph("sect0001", graph);

        let files = write_subgraph_pages(&doc);
        assert_eq!(files, vec!["subgraph_thm_a.html".to_string()]);
        assert!(dir.path().join("subgraph_thm_a.html").exists());
        assert!(!dir.path().join("subgraph_def_d.html").exists());
    }

    #[test]
    fn test_write_without_graphs_is_empty() {
        let doc = Document::new("/tmp/out");
        assert!(write_subgraph_pages(&doc).is_empty());
    }

    #[test]
    fn test_unwritable_directory_is_not_fatal() {
        let mut doc = Document::new("/nonexistent/blueprint/out");
        let mut graph = DepGraph::new();
        graph.add_node(Node::new("def:d", NodeKind::Definition));
        let mut a = Node::new("thm:a", NodeKind::Theorem);
        a.meta.uses = vec![NodeId::new("def:d")];
        graph.add_node(a);
        graph.rebuild_edges();
        doc.add_graph("sect0001", graph);

        let files = write_subgraph_pages(&doc);
        assert!(files.is_empty());
    }
}
